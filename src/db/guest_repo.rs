// src/db/guest_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::{db_utils::map_delete_error, error::AppError},
    models::guest::{CreateGuestPayload, Guest, UpdateGuestPayload},
};

#[derive(Clone)]
pub struct GuestRepository {
    pool: PgPool,
}

impl GuestRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_guests(&self) -> Result<Vec<Guest>, AppError> {
        let guests = sqlx::query_as::<_, Guest>(
            "SELECT id, first_name, last_name, phone, email FROM guests ORDER BY last_name, first_name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(guests)
    }

    pub async fn find_guest(&self, id: Uuid) -> Result<Option<Guest>, AppError> {
        let guest = sqlx::query_as::<_, Guest>(
            "SELECT id, first_name, last_name, phone, email FROM guests WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(guest)
    }

    pub async fn create_guest(&self, input: &CreateGuestPayload) -> Result<Guest, AppError> {
        let guest = sqlx::query_as::<_, Guest>(
            r#"
            INSERT INTO guests (first_name, last_name, phone, email)
            VALUES ($1, $2, $3, $4)
            RETURNING id, first_name, last_name, phone, email
            "#,
        )
        .bind(&input.first_name)
        .bind(&input.last_name)
        .bind(&input.phone)
        .bind(&input.email)
        .fetch_one(&self.pool)
        .await?;

        Ok(guest)
    }

    pub async fn update_guest(&self, input: &UpdateGuestPayload) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE guests
            SET first_name = $2, last_name = $3, phone = $4, email = $5
            WHERE id = $1
            "#,
        )
        .bind(input.id)
        .bind(&input.first_name)
        .bind(&input.last_name)
        .bind(&input.phone)
        .bind(&input.email)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_guest(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM guests WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_delete_error(e, "Guest"))?;

        Ok(result.rows_affected() > 0)
    }
}
