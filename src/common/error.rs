use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Registro não encontrado.")]
    RecordNotFound,

    #[error("Campo desconhecido: {0}")]
    UnknownField(String),

    #[error("Valor inválido para o campo '{0}'")]
    InvalidFieldValue(String),

    #[error("Identificador SQL inválido: {0}")]
    InvalidIdentifier(String),

    // Mensagem devolvida pelo backend, repassada literalmente ao usuário
    #[error("{0}")]
    Backend(String),

    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro de serialização: {0}")]
    SerializationError(#[from] serde_json::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl AppError {
    /// Converte um erro do sqlx preservando a mensagem do banco, quando houver.
    pub fn from_backend(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::Database(db_err) => AppError::Backend(db_err.message().to_string()),
            other => AppError::DatabaseError(other),
        }
    }

    /// Texto exibido no banner de erro das páginas.
    pub fn user_message(&self) -> String {
        match self {
            AppError::ValidationError(errors) => {
                let mut messages: Vec<String> = errors
                    .field_errors()
                    .iter()
                    .flat_map(|(field, field_errors)| {
                        field_errors.iter().map(move |e| match &e.message {
                            Some(m) => m.to_string(),
                            None => format!("Campo '{}' inválido.", field),
                        })
                    })
                    .collect();
                messages.sort();
                messages.join(" ")
            }
            AppError::DatabaseError(e) => {
                tracing::error!("Erro de banco de dados: {}", e);
                "Falha de comunicação com o banco de dados.".to_string()
            }
            AppError::InternalServerError(e) => {
                tracing::error!("Erro Interno do Servidor: {:?}", e);
                "Ocorreu um erro inesperado.".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::ValidationError(_)
            | AppError::UnknownField(_)
            | AppError::InvalidFieldValue(_) => (StatusCode::BAD_REQUEST, self.user_message()),
            AppError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "E-mail ou senha inválidos.".to_string()),
            AppError::InvalidToken => (StatusCode::UNAUTHORIZED, "Sessão inválida ou ausente.".to_string()),
            AppError::RecordNotFound => (StatusCode::NOT_FOUND, "Registro não encontrado.".to_string()),

            // Todos os outros erros viram 500, com o detalhe apenas no log.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Ocorreu um erro inesperado.".to_string())
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::{ValidationError, ValidationErrors};

    #[test]
    fn backend_message_is_kept_verbatim() {
        let err = AppError::Backend("constraint violation".into());
        assert_eq!(err.user_message(), "constraint violation");
    }

    #[test]
    fn validation_errors_are_flattened_into_one_line() {
        let mut errors = ValidationErrors::new();
        let mut e = ValidationError::new("length");
        e.message = Some("O modelo é obrigatório.".into());
        errors.add("modelo", e);
        errors.add("cor", ValidationError::new("custom"));

        let message = AppError::ValidationError(errors).user_message();
        assert!(message.contains("O modelo é obrigatório."));
        assert!(message.contains("Campo 'cor' inválido."));
    }

    #[test]
    fn not_found_maps_to_404() {
        let response = AppError::RecordNotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
