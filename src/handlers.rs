// src/handlers.rs

pub mod bookings;
pub mod catalog;
pub mod guests;
pub mod reviews;

use uuid::Uuid;

use crate::common::error::AppError;

/// PUT substitui o registro inteiro: o `id` da rota e o do corpo precisam bater.
pub(crate) fn ensure_same_id(path_id: Uuid, body_id: Uuid) -> Result<(), AppError> {
    if path_id != body_id {
        tracing::warn!("ID divergente: rota {} não corresponde ao corpo {}", path_id, body_id);
        return Err(AppError::BadRequest(format!(
            "Path id {} does not match body id {}.",
            path_id, body_id
        )));
    }
    Ok(())
}
