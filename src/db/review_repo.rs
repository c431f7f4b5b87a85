// src/db/review_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::{db_utils::map_write_error, error::AppError},
    models::review::{CreateReviewPayload, Review, UpdateReviewPayload},
};

const MISSING_REFERENCE: &str = "Booking or hotel not found.";

#[derive(Clone)]
pub struct ReviewRepository {
    pool: PgPool,
}

impl ReviewRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_reviews(&self) -> Result<Vec<Review>, AppError> {
        let reviews = sqlx::query_as::<_, Review>(
            r#"
            SELECT id, booking_id, hotel_id, content, rating, created_at
            FROM reviews
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(reviews)
    }

    pub async fn find_review(&self, id: Uuid) -> Result<Option<Review>, AppError> {
        let review = sqlx::query_as::<_, Review>(
            r#"
            SELECT id, booking_id, hotel_id, content, rating, created_at
            FROM reviews
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(review)
    }

    pub async fn create_review(&self, input: &CreateReviewPayload) -> Result<Review, AppError> {
        sqlx::query_as::<_, Review>(
            r#"
            INSERT INTO reviews (booking_id, hotel_id, content, rating)
            VALUES ($1, $2, $3, $4)
            RETURNING id, booking_id, hotel_id, content, rating, created_at
            "#,
        )
        .bind(input.booking_id)
        .bind(input.hotel_id)
        .bind(&input.content)
        .bind(input.rating)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, MISSING_REFERENCE))
    }

    pub async fn update_review(&self, input: &UpdateReviewPayload) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE reviews
            SET booking_id = $2, hotel_id = $3, content = $4, rating = $5
            WHERE id = $1
            "#,
        )
        .bind(input.id)
        .bind(input.booking_id)
        .bind(input.hotel_id)
        .bind(&input.content)
        .bind(input.rating)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, MISSING_REFERENCE))?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_review(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
