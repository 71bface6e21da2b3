// src/models/instruction.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::record::{Field, FieldKind, Record};

// --- Arquivamento de ITs (instruções de trabalho) ---
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchivedInstruction {
    pub id: String,
    pub codigo: String,
    pub titulo: String,
    pub setor: String,
    pub revisao: i32,
    pub motivo: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ArchivedInstructionForm {
    #[validate(length(min = 1, message = "O código da IT é obrigatório."))]
    pub codigo: String,
    #[validate(length(min = 1, message = "O título é obrigatório."))]
    pub titulo: String,
    pub setor: String,
    #[validate(range(min = 0, message = "A revisão não pode ser negativa."))]
    pub revisao: i32,
    pub motivo: String,
}

const INSTRUCTION_FIELDS: &[Field] = &[
    Field::new("codigo", "Código", FieldKind::Text),
    Field::new("titulo", "Título", FieldKind::Text),
    Field::new("setor", "Setor", FieldKind::Text),
    Field::new("revisao", "Revisão", FieldKind::Integer),
    Field::new("motivo", "Motivo do Arquivamento", FieldKind::Text),
];

impl Record for ArchivedInstruction {
    type Edit = ArchivedInstructionForm;
    type New = ArchivedInstructionForm;

    const TABLE: &'static str = "arquivamento_its";
    const EDIT_FIELDS: &'static [Field] = INSTRUCTION_FIELDS;
    const NEW_FIELDS: &'static [Field] = INSTRUCTION_FIELDS;

    fn id(&self) -> &str {
        &self.id
    }

    fn to_edit(&self) -> ArchivedInstructionForm {
        ArchivedInstructionForm {
            codigo: self.codigo.clone(),
            titulo: self.titulo.clone(),
            setor: self.setor.clone(),
            revisao: self.revisao,
            motivo: self.motivo.clone(),
        }
    }
}
