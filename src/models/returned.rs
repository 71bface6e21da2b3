// src/models/returned.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::VariantNames;
use uuid::Uuid;
use validator::Validate;

use crate::db::Relation;
use super::{
    record::{validate_not_negative, Field, FieldKind, Record},
    toner::{TonerSummary, TONER_OPTIONS, TONER_RELATION},
    unit::{UnitSummary, UNIT_OPTIONS, UNIT_RELATION},
};

/// Páginas consideradas no valor recuperado de um toner devolvido ao estoque.
pub const RECOVERY_PAGE_COUNT: i64 = 10_000;

/// Destino final de um toner retornado.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
    strum::Display, strum::AsRefStr, strum::VariantNames, strum::EnumIter,
)]
pub enum Destination {
    Descarte,
    Garantia,
    Estoque,
    #[serde(rename = "Uso Interno")]
    #[strum(serialize = "Uso Interno")]
    UsoInterno,
}

/// preco_folha × 10.000, apenas para o destino Estoque.
/// Sem o toner relacionado o valor é zero.
pub fn recovered_value(destination: Destination, toner: Option<&TonerSummary>) -> Decimal {
    match (destination, toner) {
        (Destination::Estoque, Some(toner)) => toner.preco_folha * Decimal::from(RECOVERY_PAGE_COUNT),
        _ => Decimal::ZERO,
    }
}

// --- Registro de toners retornados ---
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReturnedItem {
    pub id: String,
    pub id_cliente: i64,
    pub toner_id: String,
    pub peso_retornado: Decimal,
    pub unidade_id: String,
    pub destino_final: Destination,
    pub created_at: DateTime<Utc>,
    pub toner: Option<TonerSummary>,
    pub unidade: Option<UnitSummary>,
}

impl ReturnedItem {
    pub fn recovered_value(&self) -> Decimal {
        recovered_value(self.destino_final, self.toner.as_ref())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnedItemEdit {
    pub id_cliente: i64,
    pub peso_retornado: Decimal,
    pub destino_final: Destination,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewReturnedItem {
    #[validate(range(min = 1, message = "Informe o ID do cliente."))]
    pub id_cliente: i64,
    pub toner_id: Uuid,
    #[validate(custom(function = "validate_not_negative"))]
    pub peso_retornado: Decimal,
    pub unidade_id: Uuid,
    pub destino_final: Destination,
}

impl Record for ReturnedItem {
    type Edit = ReturnedItemEdit;
    type New = NewReturnedItem;

    const TABLE: &'static str = "retornados";
    const RELATIONS: &'static [Relation] = &[TONER_RELATION, UNIT_RELATION];
    const EDIT_FIELDS: &'static [Field] = &[
        Field::new("id_cliente", "ID Cliente", FieldKind::Integer),
        Field::new("peso_retornado", "Peso Retornado (g)", FieldKind::Decimal),
        Field::new("destino_final", "Destino", FieldKind::Choice(Destination::VARIANTS)),
    ];
    const NEW_FIELDS: &'static [Field] = &[
        Field::new("id_cliente", "ID Cliente", FieldKind::Integer),
        Field::new("toner_id", "Toner", FieldKind::Reference(TONER_OPTIONS)),
        Field::new("peso_retornado", "Peso Retornado (g)", FieldKind::Decimal),
        Field::new("unidade_id", "Unidade", FieldKind::Reference(UNIT_OPTIONS)),
        Field::new("destino_final", "Destino", FieldKind::Choice(Destination::VARIANTS)),
    ];

    fn id(&self) -> &str {
        &self.id
    }

    fn to_edit(&self) -> ReturnedItemEdit {
        ReturnedItemEdit {
            id_cliente: self.id_cliente,
            peso_retornado: self.peso_retornado,
            destino_final: self.destino_final,
        }
    }
}
