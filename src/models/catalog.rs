// src/models/catalog.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

// ---
// Validação Customizada
// ---
pub(crate) fn validate_not_negative(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() {
        let mut err = ValidationError::new("range");
        err.add_param("min".into(), &0.0);
        err.message = Some("The value cannot be negative.".into());
        return Err(err);
    }
    Ok(())
}

// ---
// 1. Hotel
// ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Hotel {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    #[schema(example = "Grand Budapest")]
    pub name: String,
    #[schema(example = "1 Alpine Road, Zubrowka")]
    pub address: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateHotelPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Grand Budapest")]
    pub name: String,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "1 Alpine Road, Zubrowka")]
    pub address: String,
}

// PUT substitui o registro inteiro; o `id` do corpo precisa bater com o da rota.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHotelPayload {
    pub id: Uuid,

    #[validate(length(min = 1, message = "required"))]
    pub name: String,

    #[validate(length(min = 1, message = "required"))]
    pub address: String,
}

// ---
// 2. RoomType (categoria e preço da diária)
// ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoomType {
    pub id: Uuid,
    #[schema(example = "Deluxe Double")]
    pub name: String,
    #[schema(value_type = f64, example = 180.0)]
    pub price: Decimal,
    #[schema(example = "Two queen beds, city view")]
    pub description: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomTypePayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Deluxe Double")]
    pub name: String,

    #[validate(custom(function = "validate_not_negative"))]
    #[schema(value_type = f64, example = 180.0)]
    pub price: Decimal,

    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoomTypePayload {
    pub id: Uuid,

    #[validate(length(min = 1, message = "required"))]
    pub name: String,

    #[validate(custom(function = "validate_not_negative"))]
    #[schema(value_type = f64)]
    pub price: Decimal,

    #[serde(default)]
    pub description: String,
}

// ---
// 3. Room
// ---
// O número do quarto deveria ser único por hotel, mas isso não é imposto.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: Uuid,
    pub hotel_id: Uuid,
    pub room_type_id: Uuid,
    #[schema(example = "101")]
    pub room_number: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomPayload {
    pub hotel_id: Uuid,
    pub room_type_id: Uuid,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "101")]
    pub room_number: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoomPayload {
    pub id: Uuid,
    pub hotel_id: Uuid,
    pub room_type_id: Uuid,

    #[validate(length(min = 1, message = "required"))]
    pub room_number: String,
}
