// src/handlers/catalog.rs

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
    models::catalog::{
        CreateHotelPayload, CreateRoomPayload, CreateRoomTypePayload, Hotel, Room, RoomType,
        UpdateHotelPayload, UpdateRoomPayload, UpdateRoomTypePayload,
    },
};

// =============================================================================
//  ÁREA 1: HOTÉIS
// =============================================================================

// GET /api/hotels
#[utoipa::path(
    get,
    path = "/api/hotels",
    tag = "Hotels",
    responses(
        (status = 200, description = "Lista de hotéis", body = Vec<Hotel>)
    )
)]
pub async fn list_hotels(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    tracing::info!("Listando hotéis.");
    let hotels = app_state.catalog_repo.list_hotels().await?;
    tracing::info!("{} hotéis encontrados.", hotels.len());

    Ok((StatusCode::OK, Json(hotels)))
}

// GET /api/hotels/{id}
#[utoipa::path(
    get,
    path = "/api/hotels/{id}",
    tag = "Hotels",
    params(("id" = Uuid, Path, description = "ID do hotel")),
    responses(
        (status = 200, description = "Hotel encontrado", body = Hotel),
        (status = 404, description = "Hotel não encontrado")
    )
)]
pub async fn get_hotel(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let hotel = app_state.catalog_repo.find_hotel(id).await?.ok_or_else(|| {
        tracing::warn!("Hotel {} não encontrado.", id);
        AppError::NotFound("Hotel not found.".to_string())
    })?;

    Ok((StatusCode::OK, Json(hotel)))
}

// POST /api/hotels
#[utoipa::path(
    post,
    path = "/api/hotels",
    tag = "Hotels",
    request_body = CreateHotelPayload,
    responses(
        (status = 201, description = "Hotel criado", body = Hotel),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn create_hotel(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateHotelPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    tracing::info!("Criando hotel: {}", payload.name);
    let hotel = app_state.catalog_repo.create_hotel(&payload).await?;

    Ok((StatusCode::CREATED, Json(hotel)))
}

// PUT /api/hotels/{id}
#[utoipa::path(
    put,
    path = "/api/hotels/{id}",
    tag = "Hotels",
    request_body = UpdateHotelPayload,
    params(("id" = Uuid, Path, description = "ID do hotel")),
    responses(
        (status = 204, description = "Hotel atualizado"),
        (status = 400, description = "Dados inválidos ou ID divergente"),
        (status = 404, description = "Hotel não encontrado")
    )
)]
pub async fn update_hotel(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateHotelPayload>,
) -> Result<impl IntoResponse, AppError> {
    ensure_same_id(id, payload.id)?;
    payload.validate()?;

    tracing::info!("Atualizando hotel {}", id);
    if !app_state.catalog_repo.update_hotel(&payload).await? {
        return Err(AppError::NotFound("Hotel not found.".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

// DELETE /api/hotels/{id}
#[utoipa::path(
    delete,
    path = "/api/hotels/{id}",
    tag = "Hotels",
    params(("id" = Uuid, Path, description = "ID do hotel")),
    responses(
        (status = 204, description = "Hotel removido"),
        (status = 400, description = "Hotel ainda referenciado"),
        (status = 404, description = "Hotel não encontrado")
    )
)]
pub async fn delete_hotel(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    tracing::info!("Removendo hotel {}", id);
    if !app_state.catalog_repo.delete_hotel(id).await? {
        tracing::warn!("Hotel {} não encontrado.", id);
        return Err(AppError::NotFound("Hotel not found.".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  ÁREA 2: TIPOS DE QUARTO
// =============================================================================

// GET /api/room-types
#[utoipa::path(
    get,
    path = "/api/room-types",
    tag = "Room Types",
    responses(
        (status = 200, description = "Lista de tipos de quarto", body = Vec<RoomType>)
    )
)]
pub async fn list_room_types(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let room_types = app_state.catalog_repo.list_room_types().await?;
    tracing::info!("{} tipos de quarto encontrados.", room_types.len());

    Ok((StatusCode::OK, Json(room_types)))
}

// GET /api/room-types/{id}
#[utoipa::path(
    get,
    path = "/api/room-types/{id}",
    tag = "Room Types",
    params(("id" = Uuid, Path, description = "ID do tipo de quarto")),
    responses(
        (status = 200, description = "Tipo de quarto encontrado", body = RoomType),
        (status = 404, description = "Tipo de quarto não encontrado")
    )
)]
pub async fn get_room_type(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let room_type = app_state
        .catalog_repo
        .find_room_type(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Room type not found.".to_string()))?;

    Ok((StatusCode::OK, Json(room_type)))
}

// POST /api/room-types
#[utoipa::path(
    post,
    path = "/api/room-types",
    tag = "Room Types",
    request_body = CreateRoomTypePayload,
    responses(
        (status = 201, description = "Tipo de quarto criado", body = RoomType),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn create_room_type(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateRoomTypePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    tracing::info!("Criando tipo de quarto: {}", payload.name);
    let room_type = app_state.catalog_repo.create_room_type(&payload).await?;

    Ok((StatusCode::CREATED, Json(room_type)))
}

// PUT /api/room-types/{id}
#[utoipa::path(
    put,
    path = "/api/room-types/{id}",
    tag = "Room Types",
    request_body = UpdateRoomTypePayload,
    params(("id" = Uuid, Path, description = "ID do tipo de quarto")),
    responses(
        (status = 204, description = "Tipo de quarto atualizado"),
        (status = 400, description = "Dados inválidos ou ID divergente"),
        (status = 404, description = "Tipo de quarto não encontrado")
    )
)]
pub async fn update_room_type(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateRoomTypePayload>,
) -> Result<impl IntoResponse, AppError> {
    ensure_same_id(id, payload.id)?;
    payload.validate()?;

    if !app_state.catalog_repo.update_room_type(&payload).await? {
        return Err(AppError::NotFound("Room type not found.".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

// DELETE /api/room-types/{id}
#[utoipa::path(
    delete,
    path = "/api/room-types/{id}",
    tag = "Room Types",
    params(("id" = Uuid, Path, description = "ID do tipo de quarto")),
    responses(
        (status = 204, description = "Tipo de quarto removido"),
        (status = 400, description = "Tipo de quarto ainda referenciado"),
        (status = 404, description = "Tipo de quarto não encontrado")
    )
)]
pub async fn delete_room_type(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    tracing::info!("Removendo tipo de quarto {}", id);
    if !app_state.catalog_repo.delete_room_type(id).await? {
        return Err(AppError::NotFound("Room type not found.".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  ÁREA 3: QUARTOS
// =============================================================================

// GET /api/rooms
#[utoipa::path(
    get,
    path = "/api/rooms",
    tag = "Rooms",
    responses(
        (status = 200, description = "Lista de quartos", body = Vec<Room>)
    )
)]
pub async fn list_rooms(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    tracing::info!("Listando quartos.");
    let rooms = app_state.catalog_repo.list_rooms().await?;
    tracing::info!("{} quartos encontrados.", rooms.len());

    Ok((StatusCode::OK, Json(rooms)))
}

// GET /api/rooms/{id}
#[utoipa::path(
    get,
    path = "/api/rooms/{id}",
    tag = "Rooms",
    params(("id" = Uuid, Path, description = "ID do quarto")),
    responses(
        (status = 200, description = "Quarto encontrado", body = Room),
        (status = 404, description = "Quarto não encontrado")
    )
)]
pub async fn get_room(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let room = app_state.catalog_repo.find_room(id).await?.ok_or_else(|| {
        tracing::warn!("Quarto {} não encontrado.", id);
        AppError::NotFound("Room not found.".to_string())
    })?;

    Ok((StatusCode::OK, Json(room)))
}

// POST /api/rooms
#[utoipa::path(
    post,
    path = "/api/rooms",
    tag = "Rooms",
    request_body = CreateRoomPayload,
    responses(
        (status = 201, description = "Quarto criado", body = Room),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Hotel ou tipo de quarto não encontrado")
    )
)]
pub async fn create_room(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateRoomPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    tracing::info!("Criando quarto: {}", payload.room_number);
    let room = app_state.catalog_repo.create_room(&payload).await?;

    Ok((StatusCode::CREATED, Json(room)))
}

// PUT /api/rooms/{id}
#[utoipa::path(
    put,
    path = "/api/rooms/{id}",
    tag = "Rooms",
    request_body = UpdateRoomPayload,
    params(("id" = Uuid, Path, description = "ID do quarto")),
    responses(
        (status = 204, description = "Quarto atualizado"),
        (status = 400, description = "Dados inválidos ou ID divergente"),
        (status = 404, description = "Quarto não encontrado")
    )
)]
pub async fn update_room(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateRoomPayload>,
) -> Result<impl IntoResponse, AppError> {
    ensure_same_id(id, payload.id)?;
    payload.validate()?;

    tracing::info!("Atualizando quarto {}", id);
    if !app_state.catalog_repo.update_room(&payload).await? {
        return Err(AppError::NotFound("Room not found.".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

// DELETE /api/rooms/{id}
#[utoipa::path(
    delete,
    path = "/api/rooms/{id}",
    tag = "Rooms",
    params(("id" = Uuid, Path, description = "ID do quarto")),
    responses(
        (status = 204, description = "Quarto removido"),
        (status = 400, description = "Quarto ainda referenciado"),
        (status = 404, description = "Quarto não encontrado")
    )
)]
pub async fn delete_room(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    tracing::info!("Removendo quarto {}", id);
    if !app_state.catalog_repo.delete_room(id).await? {
        tracing::warn!("Quarto {} não encontrado.", id);
        return Err(AppError::NotFound("Room not found.".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
