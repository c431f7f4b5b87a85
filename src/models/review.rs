// src/models/review.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: Uuid,
    pub booking_id: Uuid,
    // Opcional: avaliação ligada direto ao hotel
    pub hotel_id: Option<Uuid>,
    #[schema(example = "Lovely stay, great breakfast.")]
    pub content: String,
    #[schema(example = 5)]
    pub rating: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewPayload {
    pub booking_id: Uuid,
    pub hotel_id: Option<Uuid>,

    #[validate(length(min = 1, message = "required"))]
    pub content: String,

    #[validate(range(min = 1, max = 5, message = "invalid_rating"))]
    #[schema(example = 4)]
    pub rating: i32,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReviewPayload {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub hotel_id: Option<Uuid>,

    #[validate(length(min = 1, message = "required"))]
    pub content: String,

    #[validate(range(min = 1, max = 5, message = "invalid_rating"))]
    pub rating: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_outside_one_to_five_is_rejected() {
        let mut payload = CreateReviewPayload {
            booking_id: Uuid::new_v4(),
            hotel_id: None,
            content: "ok".into(),
            rating: 6,
        };
        assert!(payload.validate().is_err());

        payload.rating = 0;
        assert!(payload.validate().is_err());

        payload.rating = 5;
        assert!(payload.validate().is_ok());
    }
}
