// src/docs.rs

use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Hotel Reservations API",
        description = "Hotéis, quartos, hóspedes, reservas e avaliações"
    ),
    paths(
        // --- Hotels ---
        handlers::catalog::list_hotels,
        handlers::catalog::get_hotel,
        handlers::catalog::create_hotel,
        handlers::catalog::update_hotel,
        handlers::catalog::delete_hotel,

        // --- Room Types ---
        handlers::catalog::list_room_types,
        handlers::catalog::get_room_type,
        handlers::catalog::create_room_type,
        handlers::catalog::update_room_type,
        handlers::catalog::delete_room_type,

        // --- Rooms ---
        handlers::catalog::list_rooms,
        handlers::catalog::get_room,
        handlers::catalog::create_room,
        handlers::catalog::update_room,
        handlers::catalog::delete_room,

        // --- Guests ---
        handlers::guests::list_guests,
        handlers::guests::get_guest,
        handlers::guests::create_guest,
        handlers::guests::update_guest,
        handlers::guests::delete_guest,

        // --- BOOKINGS ---
        handlers::bookings::list_bookings,
        handlers::bookings::get_booking,
        handlers::bookings::create_booking,
        handlers::bookings::update_booking,
        handlers::bookings::delete_booking,
        handlers::bookings::search_bookings,
        handlers::bookings::bookings_for_guest,
        handlers::bookings::bookings_for_hotel,
        handlers::bookings::occupancy_report,

        // --- Reviews ---
        handlers::reviews::list_reviews,
        handlers::reviews::get_review,
        handlers::reviews::create_review,
        handlers::reviews::update_review,
        handlers::reviews::delete_review,
    ),
    components(
        schemas(
            // --- Catalog ---
            models::catalog::Hotel,
            models::catalog::RoomType,
            models::catalog::Room,
            models::catalog::CreateHotelPayload,
            models::catalog::UpdateHotelPayload,
            models::catalog::CreateRoomTypePayload,
            models::catalog::UpdateRoomTypePayload,
            models::catalog::CreateRoomPayload,
            models::catalog::UpdateRoomPayload,

            // --- Guests ---
            models::guest::Guest,
            models::guest::CreateGuestPayload,
            models::guest::UpdateGuestPayload,

            // --- Bookings ---
            models::booking::Booking,
            models::booking::BookingDetail,
            models::booking::CreateBookingPayload,
            models::booking::UpdateBookingPayload,
            models::booking::OccupancyEntry,

            // --- Reviews ---
            models::review::Review,
            models::review::CreateReviewPayload,
            models::review::UpdateReviewPayload,
        )
    ),
    tags(
        (name = "Hotels", description = "Cadastro de Hotéis"),
        (name = "Room Types", description = "Tipos de Quarto e Diárias"),
        (name = "Rooms", description = "Quartos Físicos por Hotel"),
        (name = "Guests", description = "Cadastro de Hóspedes"),
        (name = "Bookings", description = "Reservas, Disponibilidade e Relatórios"),
        (name = "Reviews", description = "Avaliações de Estadias")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn booking_routes_are_documented() {
        let doc = ApiDoc::openapi();

        assert!(doc.paths.paths.contains_key("/api/bookings"));
        assert!(doc.paths.paths.contains_key("/api/bookings/{id}"));
        assert!(doc.paths.paths.contains_key("/api/bookings/search"));
        assert!(doc.paths.paths.contains_key("/api/bookings/reports/occupancy"));
    }
}
