// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    // Sobreposição de reservas ou registro ainda referenciado.
    #[error("Conflito: {0}")]
    Conflict(String),

    #[error("Não encontrado: {0}")]
    NotFound(String),

    // IDs divergentes entre rota e corpo, intervalo inválido, bloqueio de 24h...
    #[error("Requisição inválida: {0}")]
    BadRequest(String),

    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::Conflict(_) | AppError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DatabaseError(_) | AppError::InternalServerError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let error_message = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .map(|e| {
                            e.message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| e.code.to_string())
                        })
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "One or more fields are invalid.",
                    "details": details,
                }));
                return (status, body).into_response();
            }
            AppError::Conflict(message)
            | AppError::NotFound(message)
            | AppError::BadRequest(message) => message,

            // DatabaseError e InternalServerError viram 500; o detalhe fica só no log.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {:?}", e);
                "An unexpected error occurred.".to_string()
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflicts_and_validation_failures_are_client_errors() {
        let conflict = AppError::Conflict("Room is not available for the selected dates.".into());
        assert_eq!(conflict.into_response().status(), StatusCode::BAD_REQUEST);

        let mismatch = AppError::BadRequest("id mismatch".into());
        assert_eq!(mismatch.into_response().status(), StatusCode::BAD_REQUEST);

        let invalid = AppError::ValidationError(validator::ValidationErrors::new());
        assert_eq!(invalid.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn missing_entities_map_to_404() {
        let err = AppError::NotFound("Booking not found.".into());
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn unexpected_errors_are_hidden_behind_500() {
        let err = AppError::InternalServerError(anyhow::anyhow!("pool exhausted"));
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);

        let err = AppError::DatabaseError(sqlx::Error::RowNotFound);
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
