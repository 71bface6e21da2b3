// src/models/toner.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::VariantNames;
use validator::Validate;

use crate::db::Relation;
use super::record::{validate_not_negative, Field, FieldKind, OptionSource, Record};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize,
    strum::Display, strum::AsRefStr, strum::VariantNames,
)]
pub enum TonerColor {
    Black,
    Cyan,
    Magenta,
    Yellow,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize,
    strum::Display, strum::AsRefStr, strum::VariantNames,
)]
pub enum TonerType {
    #[serde(rename = "Compatível")]
    #[strum(serialize = "Compatível")]
    Compativel,
    Original,
}

/// Relação `toner:toner_id(...)` usada pelas páginas que referenciam toners.
pub const TONER_RELATION: Relation = Relation {
    alias: "toner",
    foreign_key: "toner_id",
    table: "toners",
    columns: &[
        "modelo",
        "peso_cheio",
        "peso_vazio",
        "impressoras_compativeis",
        "cor",
        "area_impressa_iso",
        "capacidade_folhas",
        "tipo",
        "preco_folha",
    ],
};

pub const TONER_OPTIONS: OptionSource = OptionSource { table: "toners", label_column: "modelo" };

// --- Catálogo de toners ---
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Toner {
    pub id: String,
    pub modelo: String,
    pub peso_cheio: Decimal,
    pub peso_vazio: Decimal,
    pub impressoras_compativeis: String,
    pub cor: TonerColor,
    pub area_impressa_iso: Decimal,
    pub capacidade_folhas: i32,
    pub tipo: TonerType,
    pub preco_folha: Decimal,
    pub created_at: DateTime<Utc>,
}

impl Toner {
    /// Peso do pó (cheio - vazio), em gramas.
    pub fn gramatura(&self) -> Decimal {
        self.peso_cheio - self.peso_vazio
    }
}

/// Colunas do toner embutidas nas linhas de outras tabelas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TonerSummary {
    pub modelo: String,
    pub peso_cheio: Decimal,
    pub peso_vazio: Decimal,
    pub impressoras_compativeis: String,
    pub cor: TonerColor,
    pub area_impressa_iso: Decimal,
    pub capacidade_folhas: i32,
    pub tipo: TonerType,
    pub preco_folha: Decimal,
}

// Cadastro e edição usam os mesmos campos.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct TonerForm {
    #[validate(length(min = 1, message = "O modelo é obrigatório."))]
    pub modelo: String,
    #[validate(custom(function = "validate_not_negative"))]
    pub peso_cheio: Decimal,
    #[validate(custom(function = "validate_not_negative"))]
    pub peso_vazio: Decimal,
    pub impressoras_compativeis: String,
    pub cor: TonerColor,
    #[validate(custom(function = "validate_not_negative"))]
    pub area_impressa_iso: Decimal,
    #[validate(range(min = 1, message = "A capacidade deve ser de pelo menos 1 folha."))]
    pub capacidade_folhas: i32,
    pub tipo: TonerType,
    #[validate(custom(function = "validate_not_negative"))]
    pub preco_folha: Decimal,
}

const TONER_FIELDS: &[Field] = &[
    Field::new("modelo", "Modelo", FieldKind::Text),
    Field::new("peso_cheio", "Peso Cheio (g)", FieldKind::Decimal),
    Field::new("peso_vazio", "Peso Vazio (g)", FieldKind::Decimal),
    Field::new("impressoras_compativeis", "Impressoras Compatíveis", FieldKind::Text),
    Field::new("cor", "Cor", FieldKind::Choice(TonerColor::VARIANTS)),
    Field::new("area_impressa_iso", "Área Impressa ISO", FieldKind::Decimal),
    Field::new("capacidade_folhas", "Capacidade (folhas)", FieldKind::Integer),
    Field::new("tipo", "Tipo", FieldKind::Choice(TonerType::VARIANTS)),
    Field::new("preco_folha", "Preço por Folha", FieldKind::Decimal),
];

impl Record for Toner {
    type Edit = TonerForm;
    type New = TonerForm;

    const TABLE: &'static str = "toners";
    const EDIT_FIELDS: &'static [Field] = TONER_FIELDS;
    const NEW_FIELDS: &'static [Field] = TONER_FIELDS;

    fn id(&self) -> &str {
        &self.id
    }

    fn to_edit(&self) -> TonerForm {
        TonerForm {
            modelo: self.modelo.clone(),
            peso_cheio: self.peso_cheio,
            peso_vazio: self.peso_vazio,
            impressoras_compativeis: self.impressoras_compativeis.clone(),
            cor: self.cor,
            area_impressa_iso: self.area_impressa_iso,
            capacidade_folhas: self.capacidade_folhas,
            tipo: self.tipo,
            preco_folha: self.preco_folha,
        }
    }
}
