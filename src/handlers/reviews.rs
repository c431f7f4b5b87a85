// src/handlers/reviews.rs

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
    models::review::{CreateReviewPayload, Review, UpdateReviewPayload},
};

// GET /api/reviews
#[utoipa::path(
    get,
    path = "/api/reviews",
    tag = "Reviews",
    responses(
        (status = 200, description = "Lista de avaliações", body = Vec<Review>)
    )
)]
pub async fn list_reviews(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let reviews = app_state.review_repo.list_reviews().await?;
    tracing::info!("{} avaliações encontradas.", reviews.len());

    Ok((StatusCode::OK, Json(reviews)))
}

// GET /api/reviews/{id}
#[utoipa::path(
    get,
    path = "/api/reviews/{id}",
    tag = "Reviews",
    params(("id" = Uuid, Path, description = "ID da avaliação")),
    responses(
        (status = 200, description = "Avaliação encontrada", body = Review),
        (status = 404, description = "Avaliação não encontrada")
    )
)]
pub async fn get_review(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let review = app_state.review_repo.find_review(id).await?.ok_or_else(|| {
        tracing::warn!("Avaliação {} não encontrada.", id);
        AppError::NotFound("Review not found.".to_string())
    })?;

    Ok((StatusCode::OK, Json(review)))
}

// POST /api/reviews
#[utoipa::path(
    post,
    path = "/api/reviews",
    tag = "Reviews",
    request_body = CreateReviewPayload,
    responses(
        (status = 201, description = "Avaliação criada", body = Review),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Reserva ou hotel não encontrado")
    )
)]
pub async fn create_review(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateReviewPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    tracing::info!("Criando avaliação para a reserva {}", payload.booking_id);
    let review = app_state.review_repo.create_review(&payload).await?;

    Ok((StatusCode::CREATED, Json(review)))
}

// PUT /api/reviews/{id}
#[utoipa::path(
    put,
    path = "/api/reviews/{id}",
    tag = "Reviews",
    request_body = UpdateReviewPayload,
    params(("id" = Uuid, Path, description = "ID da avaliação")),
    responses(
        (status = 204, description = "Avaliação atualizada"),
        (status = 400, description = "Dados inválidos ou ID divergente"),
        (status = 404, description = "Avaliação não encontrada")
    )
)]
pub async fn update_review(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateReviewPayload>,
) -> Result<impl IntoResponse, AppError> {
    ensure_same_id(id, payload.id)?;
    payload.validate()?;

    if !app_state.review_repo.update_review(&payload).await? {
        return Err(AppError::NotFound("Review not found.".to_string()));
    }

    tracing::info!("Avaliação {} atualizada.", id);
    Ok(StatusCode::NO_CONTENT)
}

// DELETE /api/reviews/{id}
#[utoipa::path(
    delete,
    path = "/api/reviews/{id}",
    tag = "Reviews",
    params(("id" = Uuid, Path, description = "ID da avaliação")),
    responses(
        (status = 204, description = "Avaliação removida"),
        (status = 404, description = "Avaliação não encontrada")
    )
)]
pub async fn delete_review(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    tracing::info!("Removendo avaliação {}", id);
    if !app_state.review_repo.delete_review(id).await? {
        tracing::warn!("Avaliação {} não encontrada.", id);
        return Err(AppError::NotFound("Review not found.".to_string()));
    }

    tracing::info!("Avaliação {} removida.", id);
    Ok(StatusCode::NO_CONTENT)
}
