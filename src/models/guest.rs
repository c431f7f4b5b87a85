// src/models/guest.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// Identidade usada nas reservas e contato para a confirmação por e-mail
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Guest {
    pub id: Uuid,
    #[schema(example = "John")]
    pub first_name: String,
    #[schema(example = "Doe")]
    pub last_name: String,
    #[schema(example = "123-456-7890")]
    pub phone: String,
    #[schema(example = "john.doe@example.com")]
    pub email: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateGuestPayload {
    #[validate(length(min = 1, message = "required"))]
    pub first_name: String,

    #[validate(length(min = 1, message = "required"))]
    pub last_name: String,

    #[serde(default)]
    pub phone: String,

    #[validate(email(message = "invalid_email"))]
    #[schema(example = "john.doe@example.com")]
    pub email: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGuestPayload {
    pub id: Uuid,

    #[validate(length(min = 1, message = "required"))]
    pub first_name: String,

    #[validate(length(min = 1, message = "required"))]
    pub last_name: String,

    #[serde(default)]
    pub phone: String,

    #[validate(email(message = "invalid_email"))]
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guest_email_must_be_well_formed() {
        let payload = CreateGuestPayload {
            first_name: "John".into(),
            last_name: "Doe".into(),
            phone: String::new(),
            email: "not-an-email".into(),
        };
        let errors = payload.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }
}
