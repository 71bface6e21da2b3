// src/models/record.rs

use std::{collections::HashMap, fmt::Debug};

use rust_decimal::Decimal;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::{
    common::error::AppError,
    db::{Order, Relation, Row, SelectQuery},
};

/// Tabela de onde vêm as opções de um campo de referência (chave estrangeira).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionSource {
    pub table: &'static str,
    pub label_column: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
    Decimal,
    Choice(&'static [&'static str]),
    Reference(OptionSource),
}

/// Campo de formulário: nome da coluna, rótulo exibido e tipo de entrada.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
}

impl Field {
    pub const fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self { name, label, kind }
    }

    /// Converte o texto digitado no valor JSON da coluna.
    /// Campos numéricos são interpretados; os demais ficam como vieram.
    pub fn parse(&self, raw: &str) -> Result<Value, AppError> {
        let invalid = || AppError::InvalidFieldValue(self.label.to_string());

        match self.kind {
            FieldKind::Text => Ok(Value::String(raw.to_string())),
            FieldKind::Integer => {
                let raw = raw.trim();
                if raw.is_empty() {
                    return Ok(Value::from(0));
                }
                raw.parse::<i64>().map(Value::from).map_err(|_| invalid())
            }
            FieldKind::Decimal => {
                let raw = raw.trim().replace(',', ".");
                if raw.is_empty() {
                    return Ok(serde_json::to_value(Decimal::ZERO)?);
                }
                let value = raw.parse::<Decimal>().map_err(|_| invalid())?;
                Ok(serde_json::to_value(value)?)
            }
            FieldKind::Choice(options) => {
                if options.contains(&raw) {
                    Ok(Value::String(raw.to_string()))
                } else {
                    Err(invalid())
                }
            }
            FieldKind::Reference(_) => {
                Uuid::parse_str(raw.trim()).map_err(|_| invalid())?;
                Ok(Value::String(raw.trim().to_string()))
            }
        }
    }
}

/// Contrato de uma entidade gerenciada por uma página de registros.
pub trait Record: DeserializeOwned + Clone + Debug + Send + Sync + 'static {
    /// Apenas os campos mutáveis, enviados no update.
    type Edit: Serialize + DeserializeOwned + Clone + PartialEq + Debug + Send + Sync;
    /// Dados de criação, validados antes do insert.
    type New: Serialize + DeserializeOwned + Validate + Send + Sync;

    const TABLE: &'static str;
    const RELATIONS: &'static [Relation] = &[];
    const ORDER: Order = Order::desc("created_at");
    const EDIT_FIELDS: &'static [Field];
    const NEW_FIELDS: &'static [Field];

    fn id(&self) -> &str;

    fn to_edit(&self) -> Self::Edit;

    fn query() -> SelectQuery {
        SelectQuery {
            table: Self::TABLE,
            relations: Self::RELATIONS,
            order: Some(Self::ORDER),
        }
    }

    fn edit_field(name: &str) -> Option<&'static Field> {
        Self::EDIT_FIELDS.iter().find(|f| f.name == name)
    }
}

/// Monta o payload tipado a partir dos campos brutos de um formulário.
/// Campos ausentes contam como texto vazio.
pub fn parse_form<T: DeserializeOwned>(
    fields: &[Field],
    raw: &HashMap<String, String>,
) -> Result<T, AppError> {
    let mut row = Row::new();
    for field in fields {
        let value = raw.get(field.name).map(String::as_str).unwrap_or("");
        row.insert(field.name.to_string(), field.parse(value)?);
    }
    Ok(serde_json::from_value(Value::Object(row))?)
}

/// Serializa um valor tipado como linha (objeto JSON).
pub fn to_row<T: Serialize>(value: &T) -> Result<Row, AppError> {
    match serde_json::to_value(value)? {
        Value::Object(row) => Ok(row),
        other => Err(anyhow::anyhow!("esperado um objeto JSON, veio {}", other).into()),
    }
}

pub fn validate_not_negative(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() {
        let mut err = ValidationError::new("range");
        err.add_param("min".into(), &0.0);
        err.message = Some("O valor não pode ser negativo.".into());
        return Err(err);
    }
    Ok(())
}
