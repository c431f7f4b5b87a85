// src/db/booking_repo.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::{
        db_utils::{classify, map_write_error, Violation},
        error::AppError,
    },
    models::booking::{Booking, BookingDetail, NewBooking, OccupancyEntry, RoomPlacement},
    services::booking_service::ROOM_UNAVAILABLE,
};

/// Tudo o que a admissão de reservas precisa do armazenamento.
///
/// `room_has_conflict` segue `availability::intersects_half_open` (e a EXCLUDE
/// constraint); as regras do hóspede são avaliadas no serviço sobre `list_by_guest`.
#[async_trait]
pub trait BookingStore: Send + Sync {
    async fn list_bookings(&self) -> Result<Vec<BookingDetail>, AppError>;
    async fn find_booking_detail(&self, id: Uuid) -> Result<Option<BookingDetail>, AppError>;
    async fn find_booking(&self, id: Uuid) -> Result<Option<Booking>, AppError>;

    /// Existe reserva do quarto com `start_date < end AND end_date > start`?
    async fn room_has_conflict(
        &self,
        room_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<bool, AppError>;


    /// Hotel e tipo de quarto cadastrados para o quarto; `None` se ele não existe.
    async fn room_placement(&self, room_id: Uuid) -> Result<Option<RoomPlacement>, AppError>;
    async fn room_type_price(&self, room_type_id: Uuid) -> Result<Option<Decimal>, AppError>;
    async fn guest_email(&self, guest_id: Uuid) -> Result<Option<String>, AppError>;

    /// Violação da exclusão por quarto vira `AppError::Conflict`.
    async fn insert_booking(&self, booking: &NewBooking) -> Result<Booking, AppError>;
    async fn replace_booking(&self, id: Uuid, booking: &NewBooking) -> Result<Option<Booking>, AppError>;
    async fn delete_booking(&self, id: Uuid) -> Result<bool, AppError>;

    async fn search_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Booking>, AppError>;
    async fn list_by_guest(&self, guest_id: Uuid) -> Result<Vec<Booking>, AppError>;
    async fn list_by_hotel(&self, hotel_id: Uuid) -> Result<Vec<Booking>, AppError>;
    async fn occupancy_report(&self) -> Result<Vec<OccupancyEntry>, AppError>;
}

const BOOKING_COLUMNS: &str = "id, room_type_id, hotel_id, guest_id, room_id, \
    start_date, end_date, total_cost, created_at, updated_at";

// Substitui o Include(Guest)/Include(RoomType) do ORM por um JOIN explícito
const BOOKING_DETAIL_SELECT: &str = r#"
    SELECT
        b.id, b.room_type_id, b.hotel_id, b.guest_id, b.room_id,
        b.start_date, b.end_date, b.total_cost, b.created_at, b.updated_at,
        g.first_name || ' ' || g.last_name AS guest_name,
        g.email AS guest_email,
        rt.name AS room_type_name
    FROM bookings b
    INNER JOIN guests g ON g.id = b.guest_id
    INNER JOIN room_types rt ON rt.id = b.room_type_id
"#;

const MISSING_REFERENCE: &str = "Referenced hotel, room, room type or guest not found.";

fn map_booking_write_error(e: sqlx::Error) -> AppError {
    if classify(&e) == Some(Violation::Exclusion) {
        return AppError::Conflict(ROOM_UNAVAILABLE.to_string());
    }
    map_write_error(e, MISSING_REFERENCE)
}

#[derive(Clone)]
pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingStore for BookingRepository {
    async fn list_bookings(&self) -> Result<Vec<BookingDetail>, AppError> {
        let query = format!("{} ORDER BY b.start_date ASC", BOOKING_DETAIL_SELECT);

        let bookings = sqlx::query_as::<_, BookingDetail>(&query)
            .fetch_all(&self.pool)
            .await?;

        Ok(bookings)
    }

    async fn find_booking_detail(&self, id: Uuid) -> Result<Option<BookingDetail>, AppError> {
        let query = format!("{} WHERE b.id = $1", BOOKING_DETAIL_SELECT);

        let booking = sqlx::query_as::<_, BookingDetail>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(booking)
    }

    async fn find_booking(&self, id: Uuid) -> Result<Option<Booking>, AppError> {
        let query = format!("SELECT {} FROM bookings WHERE id = $1", BOOKING_COLUMNS);

        let booking = sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(booking)
    }

    async fn room_has_conflict(
        &self,
        room_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM bookings
                WHERE room_id = $1
                  AND start_date < $3
                  AND end_date > $2
            )
            "#,
        )
        .bind(room_id)
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn room_placement(&self, room_id: Uuid) -> Result<Option<RoomPlacement>, AppError> {
        let placement = sqlx::query_as::<_, RoomPlacement>(
            "SELECT hotel_id, room_type_id FROM rooms WHERE id = $1",
        )
        .bind(room_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(placement)
    }

    async fn room_type_price(&self, room_type_id: Uuid) -> Result<Option<Decimal>, AppError> {
        let price = sqlx::query_scalar::<_, Decimal>("SELECT price FROM room_types WHERE id = $1")
            .bind(room_type_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(price)
    }

    async fn guest_email(&self, guest_id: Uuid) -> Result<Option<String>, AppError> {
        let email = sqlx::query_scalar::<_, String>("SELECT email FROM guests WHERE id = $1")
            .bind(guest_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(email)
    }

    async fn insert_booking(&self, booking: &NewBooking) -> Result<Booking, AppError> {
        let query = format!(
            r#"
            INSERT INTO bookings (
                room_type_id, hotel_id, guest_id, room_id, start_date, end_date, total_cost
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {}
            "#,
            BOOKING_COLUMNS
        );

        sqlx::query_as::<_, Booking>(&query)
            .bind(booking.room_type_id)
            .bind(booking.hotel_id)
            .bind(booking.guest_id)
            .bind(booking.room_id)
            .bind(booking.start_date)
            .bind(booking.end_date)
            .bind(booking.total_cost)
            .fetch_one(&self.pool)
            .await
            .map_err(map_booking_write_error)
    }

    async fn replace_booking(&self, id: Uuid, booking: &NewBooking) -> Result<Option<Booking>, AppError> {
        let query = format!(
            r#"
            UPDATE bookings SET
                room_type_id = $2,
                hotel_id = $3,
                guest_id = $4,
                room_id = $5,
                start_date = $6,
                end_date = $7,
                total_cost = $8,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            BOOKING_COLUMNS
        );

        sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .bind(booking.room_type_id)
            .bind(booking.hotel_id)
            .bind(booking.guest_id)
            .bind(booking.room_id)
            .bind(booking.start_date)
            .bind(booking.end_date)
            .bind(booking.total_cost)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_booking_write_error)
    }

    async fn delete_booking(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn search_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Booking>, AppError> {
        let query = format!(
            "SELECT {} FROM bookings WHERE start_date >= $1 AND end_date <= $2 ORDER BY start_date ASC",
            BOOKING_COLUMNS
        );

        let bookings = sqlx::query_as::<_, Booking>(&query)
            .bind(start)
            .bind(end)
            .fetch_all(&self.pool)
            .await?;

        Ok(bookings)
    }

    async fn list_by_guest(&self, guest_id: Uuid) -> Result<Vec<Booking>, AppError> {
        let query = format!(
            "SELECT {} FROM bookings WHERE guest_id = $1 ORDER BY start_date ASC",
            BOOKING_COLUMNS
        );

        let bookings = sqlx::query_as::<_, Booking>(&query)
            .bind(guest_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(bookings)
    }

    async fn list_by_hotel(&self, hotel_id: Uuid) -> Result<Vec<Booking>, AppError> {
        let query = format!(
            "SELECT {} FROM bookings WHERE hotel_id = $1 ORDER BY start_date ASC",
            BOOKING_COLUMNS
        );

        let bookings = sqlx::query_as::<_, Booking>(&query)
            .bind(hotel_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(bookings)
    }

    async fn occupancy_report(&self) -> Result<Vec<OccupancyEntry>, AppError> {
        let report = sqlx::query_as::<_, OccupancyEntry>(
            r#"
            SELECT room_id, COUNT(*)::float8 / 365.0::float8 AS occupancy_rate
            FROM bookings
            GROUP BY room_id
            ORDER BY room_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(report)
    }
}
