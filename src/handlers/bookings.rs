// src/handlers/bookings.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    handlers::ensure_same_id,
    models::booking::{
        Booking, BookingDetail, CreateBookingPayload, DateRangeQuery, GuestQuery, HotelQuery,
        OccupancyEntry, UpdateBookingPayload,
    },
};

// =============================================================================
//  ÁREA 1: CRUD DE RESERVAS
// =============================================================================

// GET /api/bookings
#[utoipa::path(
    get,
    path = "/api/bookings",
    tag = "Bookings",
    responses(
        (status = 200, description = "Reservas com hóspede e tipo de quarto", body = Vec<BookingDetail>)
    )
)]
pub async fn list_bookings(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let bookings = app_state.booking_service.list_bookings().await?;
    tracing::info!("{} reservas encontradas.", bookings.len());

    Ok((StatusCode::OK, Json(bookings)))
}

// GET /api/bookings/{id}
#[utoipa::path(
    get,
    path = "/api/bookings/{id}",
    tag = "Bookings",
    params(("id" = Uuid, Path, description = "ID da reserva")),
    responses(
        (status = 200, description = "Reserva encontrada", body = BookingDetail),
        (status = 404, description = "Reserva não encontrada")
    )
)]
pub async fn get_booking(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let booking = app_state.booking_service.get_booking(id).await?;
    Ok((StatusCode::OK, Json(booking)))
}

// POST /api/bookings
#[utoipa::path(
    post,
    path = "/api/bookings",
    tag = "Bookings",
    request_body = CreateBookingPayload,
    responses(
        (status = 201, description = "Reserva admitida", body = Booking),
        (status = 400, description = "Conflito de datas, outro hotel no período, quarto divergente ou dados inválidos"),
        (status = 404, description = "Quarto ou tipo de quarto não encontrado")
    )
)]
pub async fn create_booking(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateBookingPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    tracing::info!(
        room_id = %payload.room_id,
        guest_id = %payload.guest_id,
        "Pedido de reserva recebido"
    );

    let booking = app_state
        .booking_service
        .create_booking(payload.into())
        .await?;

    Ok((StatusCode::CREATED, Json(booking)))
}

// PUT /api/bookings/{id}
#[utoipa::path(
    put,
    path = "/api/bookings/{id}",
    tag = "Bookings",
    request_body = UpdateBookingPayload,
    params(("id" = Uuid, Path, description = "ID da reserva")),
    responses(
        (status = 204, description = "Reserva atualizada"),
        (status = 400, description = "ID divergente, janela de 24h, quarto divergente ou conflito de quarto"),
        (status = 404, description = "Reserva ou quarto não encontrado")
    )
)]
pub async fn update_booking(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateBookingPayload>,
) -> Result<impl IntoResponse, AppError> {
    ensure_same_id(id, payload.id)?;
    payload.validate()?;

    app_state
        .booking_service
        .update_booking(id, payload.into(), Utc::now())
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

// DELETE /api/bookings/{id}
#[utoipa::path(
    delete,
    path = "/api/bookings/{id}",
    tag = "Bookings",
    params(("id" = Uuid, Path, description = "ID da reserva")),
    responses(
        (status = 204, description = "Reserva removida"),
        (status = 404, description = "Reserva não encontrada")
    )
)]
pub async fn delete_booking(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.booking_service.delete_booking(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  ÁREA 2: CONSULTAS E RELATÓRIOS
// =============================================================================

// GET /api/bookings/search?startDate=..&endDate=..
#[utoipa::path(
    get,
    path = "/api/bookings/search",
    tag = "Bookings",
    params(DateRangeQuery),
    responses(
        (status = 200, description = "Reservas contidas no período", body = Vec<Booking>)
    )
)]
pub async fn search_bookings(
    State(app_state): State<AppState>,
    Query(range): Query<DateRangeQuery>,
) -> Result<impl IntoResponse, AppError> {
    let bookings = app_state
        .booking_service
        .search_by_date_range(range.start_date, range.end_date)
        .await?;

    Ok((StatusCode::OK, Json(bookings)))
}

// GET /api/bookings/search/guest?guestId=..
#[utoipa::path(
    get,
    path = "/api/bookings/search/guest",
    tag = "Bookings",
    params(GuestQuery),
    responses(
        (status = 200, description = "Reservas do hóspede", body = Vec<Booking>)
    )
)]
pub async fn bookings_for_guest(
    State(app_state): State<AppState>,
    Query(query): Query<GuestQuery>,
) -> Result<impl IntoResponse, AppError> {
    let bookings = app_state
        .booking_service
        .bookings_for_guest(query.guest_id)
        .await?;

    Ok((StatusCode::OK, Json(bookings)))
}

// GET /api/bookings/hotel?hotelId=..
#[utoipa::path(
    get,
    path = "/api/bookings/hotel",
    tag = "Bookings",
    params(HotelQuery),
    responses(
        (status = 200, description = "Reservas do hotel", body = Vec<Booking>)
    )
)]
pub async fn bookings_for_hotel(
    State(app_state): State<AppState>,
    Query(query): Query<HotelQuery>,
) -> Result<impl IntoResponse, AppError> {
    let bookings = app_state
        .booking_service
        .bookings_for_hotel(query.hotel_id)
        .await?;

    Ok((StatusCode::OK, Json(bookings)))
}

// GET /api/bookings/reports/occupancy
#[utoipa::path(
    get,
    path = "/api/bookings/reports/occupancy",
    tag = "Bookings",
    responses(
        (status = 200, description = "Taxa de ocupação por quarto", body = Vec<OccupancyEntry>)
    )
)]
pub async fn occupancy_report(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    tracing::info!("Gerando relatório de ocupação.");
    let report = app_state.booking_service.occupancy_report().await?;

    Ok((StatusCode::OK, Json(report)))
}
