// src/db/catalog_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::{
        db_utils::{map_delete_error, map_write_error},
        error::AppError,
    },
    models::catalog::{
        CreateHotelPayload, CreateRoomPayload, CreateRoomTypePayload, Hotel, Room, RoomType,
        UpdateHotelPayload, UpdateRoomPayload, UpdateRoomTypePayload,
    },
};

// Hotéis, tipos de quarto e quartos: o "catálogo" físico da rede.
#[derive(Clone)]
pub struct CatalogRepository {
    pool: PgPool,
}

impl CatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  HOTÉIS
    // =========================================================================

    pub async fn list_hotels(&self) -> Result<Vec<Hotel>, AppError> {
        let hotels = sqlx::query_as::<_, Hotel>(
            "SELECT id, name, address, created_at FROM hotels ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(hotels)
    }

    pub async fn find_hotel(&self, id: Uuid) -> Result<Option<Hotel>, AppError> {
        let hotel = sqlx::query_as::<_, Hotel>(
            "SELECT id, name, address, created_at FROM hotels WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(hotel)
    }

    pub async fn create_hotel(&self, input: &CreateHotelPayload) -> Result<Hotel, AppError> {
        let hotel = sqlx::query_as::<_, Hotel>(
            r#"
            INSERT INTO hotels (name, address)
            VALUES ($1, $2)
            RETURNING id, name, address, created_at
            "#,
        )
        .bind(&input.name)
        .bind(&input.address)
        .fetch_one(&self.pool)
        .await?;

        Ok(hotel)
    }

    /// Retorna `false` se o hotel não existe.
    pub async fn update_hotel(&self, input: &UpdateHotelPayload) -> Result<bool, AppError> {
        let result = sqlx::query("UPDATE hotels SET name = $2, address = $3 WHERE id = $1")
            .bind(input.id)
            .bind(&input.name)
            .bind(&input.address)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_hotel(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM hotels WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_delete_error(e, "Hotel"))?;

        Ok(result.rows_affected() > 0)
    }

    // =========================================================================
    //  TIPOS DE QUARTO
    // =========================================================================

    pub async fn list_room_types(&self) -> Result<Vec<RoomType>, AppError> {
        let room_types = sqlx::query_as::<_, RoomType>(
            "SELECT id, name, price, description FROM room_types ORDER BY price ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(room_types)
    }

    pub async fn find_room_type(&self, id: Uuid) -> Result<Option<RoomType>, AppError> {
        let room_type = sqlx::query_as::<_, RoomType>(
            "SELECT id, name, price, description FROM room_types WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(room_type)
    }

    pub async fn create_room_type(&self, input: &CreateRoomTypePayload) -> Result<RoomType, AppError> {
        let room_type = sqlx::query_as::<_, RoomType>(
            r#"
            INSERT INTO room_types (name, price, description)
            VALUES ($1, $2, $3)
            RETURNING id, name, price, description
            "#,
        )
        .bind(&input.name)
        .bind(input.price)
        .bind(&input.description)
        .fetch_one(&self.pool)
        .await?;

        Ok(room_type)
    }

    pub async fn update_room_type(&self, input: &UpdateRoomTypePayload) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE room_types SET name = $2, price = $3, description = $4 WHERE id = $1",
        )
        .bind(input.id)
        .bind(&input.name)
        .bind(input.price)
        .bind(&input.description)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_room_type(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM room_types WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_delete_error(e, "Room type"))?;

        Ok(result.rows_affected() > 0)
    }

    // =========================================================================
    //  QUARTOS
    // =========================================================================

    pub async fn list_rooms(&self) -> Result<Vec<Room>, AppError> {
        let rooms = sqlx::query_as::<_, Room>(
            "SELECT id, hotel_id, room_type_id, room_number FROM rooms ORDER BY hotel_id, room_number",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rooms)
    }

    pub async fn find_room(&self, id: Uuid) -> Result<Option<Room>, AppError> {
        let room = sqlx::query_as::<_, Room>(
            "SELECT id, hotel_id, room_type_id, room_number FROM rooms WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(room)
    }

    pub async fn create_room(&self, input: &CreateRoomPayload) -> Result<Room, AppError> {
        sqlx::query_as::<_, Room>(
            r#"
            INSERT INTO rooms (hotel_id, room_type_id, room_number)
            VALUES ($1, $2, $3)
            RETURNING id, hotel_id, room_type_id, room_number
            "#,
        )
        .bind(input.hotel_id)
        .bind(input.room_type_id)
        .bind(&input.room_number)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "Hotel or room type not found."))
    }

    pub async fn update_room(&self, input: &UpdateRoomPayload) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE rooms SET hotel_id = $2, room_type_id = $3, room_number = $4 WHERE id = $1",
        )
        .bind(input.id)
        .bind(input.hotel_id)
        .bind(input.room_type_id)
        .bind(&input.room_number)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "Hotel or room type not found."))?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_room(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM rooms WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_delete_error(e, "Room"))?;

        Ok(result.rows_affected() > 0)
    }
}
