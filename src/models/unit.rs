// src/models/unit.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::db::Relation;
use super::record::{Field, FieldKind, OptionSource, Record};

/// Relação `unidade:unidade_id(unidade)`.
pub const UNIT_RELATION: Relation = Relation {
    alias: "unidade",
    foreign_key: "unidade_id",
    table: "unidades",
    columns: &["unidade"],
};

pub const UNIT_OPTIONS: OptionSource = OptionSource { table: "unidades", label_column: "unidade" };

// --- Unidades (locais físicos) ---
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Unit {
    pub id: String,
    pub unidade: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitSummary {
    pub unidade: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct UnitForm {
    #[validate(length(min = 1, message = "O nome da unidade é obrigatório."))]
    pub unidade: String,
}

const UNIT_FIELDS: &[Field] = &[Field::new("unidade", "Unidade", FieldKind::Text)];

impl Record for Unit {
    type Edit = UnitForm;
    type New = UnitForm;

    const TABLE: &'static str = "unidades";
    const EDIT_FIELDS: &'static [Field] = UNIT_FIELDS;
    const NEW_FIELDS: &'static [Field] = UNIT_FIELDS;

    fn id(&self) -> &str {
        &self.id
    }

    fn to_edit(&self) -> UnitForm {
        UnitForm { unidade: self.unidade.clone() }
    }
}
