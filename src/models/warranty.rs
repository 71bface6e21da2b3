// src/models/warranty.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::VariantNames;
use uuid::Uuid;
use validator::Validate;

use crate::db::Relation;
use super::{
    record::{Field, FieldKind, Record},
    toner::{TonerSummary, TONER_OPTIONS, TONER_RELATION},
};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize,
    strum::Display, strum::AsRefStr, strum::VariantNames,
)]
pub enum WarrantyStatus {
    Aberta,
    #[serde(rename = "Em Análise")]
    #[strum(serialize = "Em Análise")]
    EmAnalise,
    Aprovada,
    Reprovada,
}

// --- Garantias abertas junto aos fornecedores ---
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Warranty {
    pub id: String,
    pub toner_id: String,
    pub fornecedor: String,
    pub nota_fiscal: String,
    pub quantidade: i32,
    pub status: WarrantyStatus,
    pub observacao: Option<String>,
    pub created_at: DateTime<Utc>,
    pub toner: Option<TonerSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarrantyEdit {
    pub fornecedor: String,
    pub nota_fiscal: String,
    pub quantidade: i32,
    pub status: WarrantyStatus,
    pub observacao: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewWarranty {
    pub toner_id: Uuid,
    #[validate(length(min = 1, message = "O fornecedor é obrigatório."))]
    pub fornecedor: String,
    #[validate(length(min = 1, message = "A nota fiscal é obrigatória."))]
    pub nota_fiscal: String,
    #[validate(range(min = 1, message = "A quantidade deve ser maior que zero."))]
    pub quantidade: i32,
    pub status: WarrantyStatus,
    pub observacao: Option<String>,
}

impl Record for Warranty {
    type Edit = WarrantyEdit;
    type New = NewWarranty;

    const TABLE: &'static str = "garantias";
    const RELATIONS: &'static [Relation] = &[TONER_RELATION];
    const EDIT_FIELDS: &'static [Field] = &[
        Field::new("fornecedor", "Fornecedor", FieldKind::Text),
        Field::new("nota_fiscal", "Nota Fiscal", FieldKind::Text),
        Field::new("quantidade", "Quantidade", FieldKind::Integer),
        Field::new("status", "Status", FieldKind::Choice(WarrantyStatus::VARIANTS)),
        Field::new("observacao", "Observação", FieldKind::Text),
    ];
    const NEW_FIELDS: &'static [Field] = &[
        Field::new("toner_id", "Toner", FieldKind::Reference(TONER_OPTIONS)),
        Field::new("fornecedor", "Fornecedor", FieldKind::Text),
        Field::new("nota_fiscal", "Nota Fiscal", FieldKind::Text),
        Field::new("quantidade", "Quantidade", FieldKind::Integer),
        Field::new("status", "Status", FieldKind::Choice(WarrantyStatus::VARIANTS)),
        Field::new("observacao", "Observação", FieldKind::Text),
    ];

    fn id(&self) -> &str {
        &self.id
    }

    fn to_edit(&self) -> WarrantyEdit {
        WarrantyEdit {
            fornecedor: self.fornecedor.clone(),
            nota_fiscal: self.nota_fiscal.clone(),
            quantidade: self.quantidade,
            status: self.status,
            observacao: self.observacao.clone(),
        }
    }
}
