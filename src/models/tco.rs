// src/models/tco.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::db::Relation;
use super::{
    record::{validate_not_negative, Field, FieldKind, Record},
    toner::{TonerSummary, TONER_OPTIONS, TONER_RELATION},
};

// --- TCO (custo total de propriedade) por toner ---
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostOfOwnership {
    pub id: String,
    pub toner_id: String,
    pub custo_aquisicao: Decimal,
    pub custo_manutencao: Decimal,
    pub custo_operacional: Decimal,
    pub periodo_meses: i32,
    pub created_at: DateTime<Utc>,
    pub toner: Option<TonerSummary>,
}

impl CostOfOwnership {
    pub fn total(&self) -> Decimal {
        self.custo_aquisicao + self.custo_manutencao + self.custo_operacional
    }

    /// Total dividido pelo período; `None` quando o período é zero.
    pub fn monthly(&self) -> Option<Decimal> {
        (self.periodo_meses > 0).then(|| self.total() / Decimal::from(self.periodo_meses))
    }

    /// Total dividido pela capacidade do toner relacionado.
    pub fn per_page(&self) -> Option<Decimal> {
        self.toner
            .as_ref()
            .filter(|t| t.capacidade_folhas > 0)
            .map(|t| self.total() / Decimal::from(t.capacidade_folhas))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostOfOwnershipEdit {
    pub custo_aquisicao: Decimal,
    pub custo_manutencao: Decimal,
    pub custo_operacional: Decimal,
    pub periodo_meses: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewCostOfOwnership {
    pub toner_id: Uuid,
    #[validate(custom(function = "validate_not_negative"))]
    pub custo_aquisicao: Decimal,
    #[validate(custom(function = "validate_not_negative"))]
    pub custo_manutencao: Decimal,
    #[validate(custom(function = "validate_not_negative"))]
    pub custo_operacional: Decimal,
    #[validate(range(min = 1, message = "O período deve ter pelo menos 1 mês."))]
    pub periodo_meses: i32,
}

impl Record for CostOfOwnership {
    type Edit = CostOfOwnershipEdit;
    type New = NewCostOfOwnership;

    const TABLE: &'static str = "tco";
    const RELATIONS: &'static [Relation] = &[TONER_RELATION];
    const EDIT_FIELDS: &'static [Field] = &[
        Field::new("custo_aquisicao", "Custo de Aquisição", FieldKind::Decimal),
        Field::new("custo_manutencao", "Custo de Manutenção", FieldKind::Decimal),
        Field::new("custo_operacional", "Custo Operacional", FieldKind::Decimal),
        Field::new("periodo_meses", "Período (meses)", FieldKind::Integer),
    ];
    const NEW_FIELDS: &'static [Field] = &[
        Field::new("toner_id", "Toner", FieldKind::Reference(TONER_OPTIONS)),
        Field::new("custo_aquisicao", "Custo de Aquisição", FieldKind::Decimal),
        Field::new("custo_manutencao", "Custo de Manutenção", FieldKind::Decimal),
        Field::new("custo_operacional", "Custo Operacional", FieldKind::Decimal),
        Field::new("periodo_meses", "Período (meses)", FieldKind::Integer),
    ];

    fn id(&self) -> &str {
        &self.id
    }

    fn to_edit(&self) -> CostOfOwnershipEdit {
        CostOfOwnershipEdit {
            custo_aquisicao: self.custo_aquisicao,
            custo_manutencao: self.custo_manutencao,
            custo_operacional: self.custo_operacional,
            periodo_meses: self.periodo_meses,
        }
    }
}
