// src/services/record_page.rs

use std::{collections::HashMap, sync::Arc};

use serde_json::Value;
use validator::Validate;

use crate::{
    common::error::AppError,
    db::{DataApi, Order, SelectQuery},
    models::{
        record::{parse_form, to_row},
        FieldKind, Record,
    },
};

pub const LOAD_ERROR: &str = "Erro ao carregar os dados";
pub const DELETE_CONFIRMATION: &str = "Tem certeza que deseja excluir este registro?";

/// Opção de um `<select>` de chave estrangeira.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// Estado de uma página de registros: lista, edição em linha, exclusão e cadastro.
///
/// O backend é a única fonte de verdade: toda mutação bem-sucedida é seguida
/// de um `load()` completo, sem reconciliação local.
pub struct RecordPage<R: Record> {
    api: Arc<dyn DataApi>,
    rows: Vec<R>,
    editing_id: Option<String>,
    edit_buffer: Option<R::Edit>,
    options: HashMap<&'static str, Vec<SelectOption>>,
    error: Option<String>,
}

impl<R: Record> RecordPage<R> {
    pub fn new(api: Arc<dyn DataApi>) -> Self {
        Self {
            api,
            rows: Vec::new(),
            editing_id: None,
            edit_buffer: None,
            options: HashMap::new(),
            error: None,
        }
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn editing_id(&self) -> Option<&str> {
        self.editing_id.as_deref()
    }

    pub fn edit_buffer(&self) -> Option<&R::Edit> {
        self.edit_buffer.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn options(&self, field: &str) -> &[SelectOption] {
        self.options.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Busca todas as linhas (com relações) na ordem do servidor.
    /// Em caso de falha mantém a lista anterior e mostra a mensagem fixa.
    pub async fn load(&mut self) -> bool {
        match self.fetch().await {
            Ok(rows) => {
                self.rows = rows;
                true
            }
            Err(e) => {
                tracing::error!("Erro ao buscar {}: {}", R::TABLE, e);
                self.error = Some(LOAD_ERROR.to_string());
                false
            }
        }
    }

    async fn fetch(&self) -> Result<Vec<R>, AppError> {
        let rows = self.api.select(&R::query()).await?;
        rows.into_iter()
            .map(|row| serde_json::from_value(Value::Object(row)).map_err(AppError::from))
            .collect()
    }

    /// Carrega as opções dos campos de referência do formulário de cadastro.
    /// Uma falha aqui não substitui um erro já exibido.
    pub async fn load_options(&mut self) -> bool {
        for field in R::NEW_FIELDS {
            let FieldKind::Reference(source) = field.kind else { continue };

            let query = SelectQuery {
                table: source.table,
                relations: &[],
                order: Some(Order::asc(source.label_column)),
            };

            match self.api.select(&query).await {
                Ok(rows) => {
                    let options = rows
                        .iter()
                        .filter_map(|row| {
                            let value = row.get("id")?.as_str()?.to_string();
                            let label = match row.get(source.label_column)? {
                                Value::String(s) => s.clone(),
                                other => other.to_string(),
                            };
                            Some(SelectOption { value, label })
                        })
                        .collect();
                    self.options.insert(field.name, options);
                }
                Err(e) => {
                    tracing::error!("Erro ao buscar opções de {}: {}", source.table, e);
                    self.error.get_or_insert_with(|| LOAD_ERROR.to_string());
                    return false;
                }
            }
        }
        true
    }

    /// Copia os campos mutáveis da linha para o buffer de edição.
    pub fn start_edit(&mut self, id: &str) -> bool {
        let Some(row) = self.rows.iter().find(|r| r.id() == id) else {
            return false;
        };

        self.edit_buffer = Some(row.to_edit());
        self.editing_id = Some(id.to_string());
        self.error = None;
        true
    }

    /// A linha pedida para edição não está na lista carregada.
    pub fn report_missing(&mut self) {
        self.error = Some(update_error(&AppError::RecordNotFound));
    }

    pub fn cancel_edit(&mut self) {
        self.editing_id = None;
        self.edit_buffer = None;
        self.error = None;
    }

    /// Atualiza um campo do buffer. Campos numéricos são interpretados a partir
    /// do texto; os demais ficam como vieram.
    pub fn change_field(&mut self, name: &str, raw: &str) -> Result<(), AppError> {
        let Some(buffer) = self.edit_buffer.as_ref() else {
            return Ok(());
        };

        let result = R::edit_field(name)
            .ok_or_else(|| AppError::UnknownField(name.to_string()))
            .and_then(|field| {
                let mut row = to_row(buffer)?;
                row.insert(field.name.to_string(), field.parse(raw)?);
                serde_json::from_value::<R::Edit>(Value::Object(row))
                    .map_err(|_| AppError::InvalidFieldValue(field.label.to_string()))
            });

        match result {
            Ok(updated) => {
                self.edit_buffer = Some(updated);
                Ok(())
            }
            Err(e) => {
                self.error = Some(e.user_message());
                Err(e)
            }
        }
    }

    /// Envia apenas os campos mutáveis; em caso de erro mantém a edição ativa.
    pub async fn save_edit(&mut self) -> Result<(), AppError> {
        let (Some(id), Some(buffer)) = (self.editing_id.clone(), self.edit_buffer.as_ref()) else {
            return Ok(());
        };

        let outcome = match to_row(buffer) {
            Ok(fields) => self.api.update(R::TABLE, &id, fields).await,
            Err(e) => Err(e),
        };

        match outcome {
            Ok(()) => {
                tracing::info!("✏️ Registro {} atualizado em {}", id, R::TABLE);
                self.editing_id = None;
                self.edit_buffer = None;
                self.error = None;
                self.load().await;
                Ok(())
            }
            Err(e) => {
                self.error = Some(update_error(&e));
                Err(e)
            }
        }
    }

    /// Exclui a linha após confirmação. Retorna `Ok(false)` se o usuário desistiu.
    pub async fn remove<F>(&mut self, id: &str, confirm: F) -> Result<bool, AppError>
    where
        F: FnOnce(&str) -> bool,
    {
        if !confirm(DELETE_CONFIRMATION) {
            return Ok(false);
        }

        match self.api.delete(R::TABLE, id).await {
            Ok(()) => {
                tracing::info!("🗑️ Registro {} excluído de {}", id, R::TABLE);
                self.error = None;
                self.load().await;
                Ok(true)
            }
            Err(e) => {
                self.error = Some(format!("Erro ao excluir registro: {}", e.user_message()));
                Err(e)
            }
        }
    }

    /// Cadastro via formulário: interpreta, valida, insere e recarrega.
    pub async fn create(&mut self, raw: &HashMap<String, String>) -> Result<(), AppError> {
        match self.insert_new(raw).await {
            Ok(()) => {
                tracing::info!("✅ Novo registro em {}", R::TABLE);
                self.error = None;
                self.load().await;
                Ok(())
            }
            Err(e) => {
                self.error = Some(format!("Erro ao cadastrar registro: {}", e.user_message()));
                Err(e)
            }
        }
    }

    async fn insert_new(&self, raw: &HashMap<String, String>) -> Result<(), AppError> {
        let new: R::New = parse_form(R::NEW_FIELDS, raw)?;
        new.validate()?;
        self.api.insert(R::TABLE, to_row(&new)?).await
    }
}

fn update_error(e: &AppError) -> String {
    format!("Erro ao atualizar registro: {}", e.user_message())
}
