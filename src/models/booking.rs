// src/models/booking.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::models::catalog::validate_not_negative;

// ---
// 1. Booking (a linha da tabela)
// ---
// Intervalo [start_date, end_date): o fim é exclusivo para o quarto.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    pub room_type_id: Uuid,
    pub hotel_id: Uuid,
    pub guest_id: Uuid,
    pub room_id: Uuid,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[schema(value_type = f64, example = 360.0)]
    pub total_cost: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ---
// 2. BookingDetail (reserva + hóspede + tipo de quarto via JOIN)
// ---
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingDetail {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub booking: Booking,
    #[schema(example = "John Doe")]
    pub guest_name: String,
    #[schema(example = "john.doe@example.com")]
    pub guest_email: String,
    #[schema(example = "Deluxe Double")]
    pub room_type_name: String,
}

// ---
// 3. Entradas da admissão
// ---

/// Pedido de reserva como chega na admissão. Sem `total_cost`, o custo é
/// calculado a partir da diária do tipo de quarto.
#[derive(Debug, Clone)]
pub struct BookingRequest {
    pub room_type_id: Uuid,
    pub hotel_id: Uuid,
    pub guest_id: Uuid,
    pub room_id: Uuid,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub total_cost: Option<Decimal>,
}

/// Valores persistidos num INSERT ou num PUT (substituição completa).
#[derive(Debug, Clone, PartialEq)]
pub struct NewBooking {
    pub room_type_id: Uuid,
    pub hotel_id: Uuid,
    pub guest_id: Uuid,
    pub room_id: Uuid,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub total_cost: Decimal,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingPayload {
    pub room_type_id: Uuid,
    pub hotel_id: Uuid,
    pub guest_id: Uuid,
    pub room_id: Uuid,

    #[schema(example = "2025-01-01T14:00:00Z")]
    pub start_date: DateTime<Utc>,

    #[schema(example = "2025-01-03T11:00:00Z")]
    pub end_date: DateTime<Utc>,

    #[validate(custom(function = "validate_not_negative"))]
    #[schema(value_type = Option<f64>, example = 360.0)]
    pub total_cost: Option<Decimal>,
}

impl From<CreateBookingPayload> for BookingRequest {
    fn from(p: CreateBookingPayload) -> Self {
        Self {
            room_type_id: p.room_type_id,
            hotel_id: p.hotel_id,
            guest_id: p.guest_id,
            room_id: p.room_id,
            start_date: p.start_date,
            end_date: p.end_date,
            total_cost: p.total_cost,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookingPayload {
    pub id: Uuid,
    pub room_type_id: Uuid,
    pub hotel_id: Uuid,
    pub guest_id: Uuid,
    pub room_id: Uuid,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,

    #[validate(custom(function = "validate_not_negative"))]
    #[schema(value_type = f64)]
    pub total_cost: Decimal,
}

impl From<UpdateBookingPayload> for NewBooking {
    fn from(p: UpdateBookingPayload) -> Self {
        Self {
            room_type_id: p.room_type_id,
            hotel_id: p.hotel_id,
            guest_id: p.guest_id,
            room_id: p.room_id,
            start_date: p.start_date,
            end_date: p.end_date,
            total_cost: p.total_cost,
        }
    }
}

/// Onde o quarto está de fato: hotel e tipo cadastrados na tabela `rooms`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRow)]
pub struct RoomPlacement {
    pub hotel_id: Uuid,
    pub room_type_id: Uuid,
}

// ---
// 4. Consultas
// ---

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct DateRangeQuery {
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct GuestQuery {
    pub guest_id: Uuid,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct HotelQuery {
    pub hotel_id: Uuid,
}

// Taxa de ocupação = reservas do quarto / 365
#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OccupancyEntry {
    pub room_id: Uuid,
    #[schema(example = 0.0164)]
    pub occupancy_rate: f64,
}
