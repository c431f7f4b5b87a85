// src/handlers/guests.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    handlers::ensure_same_id,
    models::guest::{CreateGuestPayload, Guest, UpdateGuestPayload},
};

// GET /api/guests
#[utoipa::path(
    get,
    path = "/api/guests",
    tag = "Guests",
    responses(
        (status = 200, description = "Lista de hóspedes", body = Vec<Guest>)
    )
)]
pub async fn list_guests(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    tracing::info!("Listando hóspedes.");
    let guests = app_state.guest_repo.list_guests().await?;
    tracing::info!("{} hóspedes encontrados.", guests.len());

    Ok((StatusCode::OK, Json(guests)))
}

// GET /api/guests/{id}
#[utoipa::path(
    get,
    path = "/api/guests/{id}",
    tag = "Guests",
    params(("id" = Uuid, Path, description = "ID do hóspede")),
    responses(
        (status = 200, description = "Hóspede encontrado", body = Guest),
        (status = 404, description = "Hóspede não encontrado")
    )
)]
pub async fn get_guest(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let guest = app_state.guest_repo.find_guest(id).await?.ok_or_else(|| {
        tracing::warn!("Hóspede {} não encontrado.", id);
        AppError::NotFound("Guest not found.".to_string())
    })?;

    Ok((StatusCode::OK, Json(guest)))
}

// POST /api/guests
#[utoipa::path(
    post,
    path = "/api/guests",
    tag = "Guests",
    request_body = CreateGuestPayload,
    responses(
        (status = 201, description = "Hóspede criado", body = Guest),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn create_guest(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateGuestPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let guest = app_state.guest_repo.create_guest(&payload).await?;
    tracing::info!("Hóspede {} criado.", guest.id);

    Ok((StatusCode::CREATED, Json(guest)))
}

// PUT /api/guests/{id}
#[utoipa::path(
    put,
    path = "/api/guests/{id}",
    tag = "Guests",
    request_body = UpdateGuestPayload,
    params(("id" = Uuid, Path, description = "ID do hóspede")),
    responses(
        (status = 204, description = "Hóspede atualizado"),
        (status = 400, description = "Dados inválidos ou ID divergente"),
        (status = 404, description = "Hóspede não encontrado")
    )
)]
pub async fn update_guest(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateGuestPayload>,
) -> Result<impl IntoResponse, AppError> {
    ensure_same_id(id, payload.id)?;
    payload.validate()?;

    tracing::info!("Atualizando hóspede {}", id);
    if !app_state.guest_repo.update_guest(&payload).await? {
        return Err(AppError::NotFound("Guest not found.".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

// DELETE /api/guests/{id}
#[utoipa::path(
    delete,
    path = "/api/guests/{id}",
    tag = "Guests",
    params(("id" = Uuid, Path, description = "ID do hóspede")),
    responses(
        (status = 204, description = "Hóspede removido"),
        (status = 400, description = "Hóspede ainda possui reservas"),
        (status = 404, description = "Hóspede não encontrado")
    )
)]
pub async fn delete_guest(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    tracing::info!("Removendo hóspede {}", id);
    if !app_state.guest_repo.delete_guest(id).await? {
        tracing::warn!("Hóspede {} não encontrado.", id);
        return Err(AppError::NotFound("Guest not found.".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
