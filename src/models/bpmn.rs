// src/models/bpmn.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::record::{Field, FieldKind, Record};

// --- Registro de BPMNs (diagramas de processo) ---
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BpmnDocument {
    pub id: String,
    pub titulo: String,
    pub setor: String,
    pub versao: i32,
    pub link: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct BpmnForm {
    #[validate(length(min = 1, message = "O título é obrigatório."))]
    pub titulo: String,
    #[validate(length(min = 1, message = "O setor é obrigatório."))]
    pub setor: String,
    #[validate(range(min = 1, message = "A versão deve ser maior que zero."))]
    pub versao: i32,
    pub link: String,
}

const BPMN_FIELDS: &[Field] = &[
    Field::new("titulo", "Título", FieldKind::Text),
    Field::new("setor", "Setor", FieldKind::Text),
    Field::new("versao", "Versão", FieldKind::Integer),
    Field::new("link", "Link do Arquivo", FieldKind::Text),
];

impl Record for BpmnDocument {
    type Edit = BpmnForm;
    type New = BpmnForm;

    const TABLE: &'static str = "bpmns";
    const EDIT_FIELDS: &'static [Field] = BPMN_FIELDS;
    const NEW_FIELDS: &'static [Field] = BPMN_FIELDS;

    fn id(&self) -> &str {
        &self.id
    }

    fn to_edit(&self) -> BpmnForm {
        BpmnForm {
            titulo: self.titulo.clone(),
            setor: self.setor.clone(),
            versao: self.versao,
            link: self.link.clone(),
        }
    }
}
