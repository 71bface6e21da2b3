// src/models/movement.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::VariantNames;
use uuid::Uuid;
use validator::Validate;

use crate::db::Relation;
use super::{
    record::{Field, FieldKind, Record},
    toner::{TonerSummary, TONER_OPTIONS, TONER_RELATION},
    unit::{UnitSummary, UNIT_OPTIONS, UNIT_RELATION},
};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize,
    strum::Display, strum::AsRefStr, strum::VariantNames,
)]
pub enum MovementKind {
    Entrada,
    #[serde(rename = "Saída")]
    #[strum(serialize = "Saída")]
    Saida,
}

// --- Movimentação de toners entre unidades ---
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movement {
    pub id: String,
    pub toner_id: String,
    pub unidade_id: String,
    pub tipo: MovementKind,
    pub quantidade: i32,
    pub observacao: Option<String>,
    pub created_at: DateTime<Utc>,
    pub toner: Option<TonerSummary>,
    pub unidade: Option<UnitSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovementEdit {
    pub tipo: MovementKind,
    pub quantidade: i32,
    pub observacao: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewMovement {
    pub toner_id: Uuid,
    pub unidade_id: Uuid,
    pub tipo: MovementKind,
    #[validate(range(min = 1, message = "A quantidade deve ser maior que zero."))]
    pub quantidade: i32,
    pub observacao: Option<String>,
}

impl Record for Movement {
    type Edit = MovementEdit;
    type New = NewMovement;

    const TABLE: &'static str = "movimentacoes";
    const RELATIONS: &'static [Relation] = &[TONER_RELATION, UNIT_RELATION];
    const EDIT_FIELDS: &'static [Field] = &[
        Field::new("tipo", "Tipo", FieldKind::Choice(MovementKind::VARIANTS)),
        Field::new("quantidade", "Quantidade", FieldKind::Integer),
        Field::new("observacao", "Observação", FieldKind::Text),
    ];
    const NEW_FIELDS: &'static [Field] = &[
        Field::new("toner_id", "Toner", FieldKind::Reference(TONER_OPTIONS)),
        Field::new("unidade_id", "Unidade", FieldKind::Reference(UNIT_OPTIONS)),
        Field::new("tipo", "Tipo", FieldKind::Choice(MovementKind::VARIANTS)),
        Field::new("quantidade", "Quantidade", FieldKind::Integer),
        Field::new("observacao", "Observação", FieldKind::Text),
    ];

    fn id(&self) -> &str {
        &self.id
    }

    fn to_edit(&self) -> MovementEdit {
        MovementEdit {
            tipo: self.tipo,
            quantidade: self.quantidade,
            observacao: self.observacao.clone(),
        }
    }
}
