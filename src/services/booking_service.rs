// src/services/booking_service.rs

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::BookingStore,
    models::booking::{Booking, BookingDetail, BookingRequest, NewBooking, OccupancyEntry},
    services::{
        availability::overlaps,
        notification::{Notifier, CONFIRMATION_BODY, CONFIRMATION_SUBJECT},
    },
};

pub const CROSS_HOTEL_CONFLICT: &str =
    "Cannot book at multiple hotels with the same identity at the same time.";
pub const ROOM_UNAVAILABLE: &str = "Room is not available for the selected dates.";
pub const UPDATE_LOCKED: &str = "Booking cannot be changed within 24 hours of its start.";
pub const INVALID_RANGE: &str = "Booking end date must be after its start date.";
pub const ROOM_MISMATCH: &str = "Hotel or room type does not match the selected room.";

// Janela de bloqueio de alterações, contada a partir de `start_date`.
const UPDATE_LOCK_HOURS: i64 = 24;

fn booking_not_found() -> AppError {
    AppError::NotFound("Booking not found.".to_string())
}

fn ensure_ordered(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<(), AppError> {
    if start >= end {
        return Err(AppError::BadRequest(INVALID_RANGE.to_string()));
    }
    Ok(())
}

const SECONDS_PER_DAY: i64 = 86_400;

/// Diárias cobradas: dias inteiros arredondados para cima, no mínimo uma.
pub(crate) fn nights_between(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    let secs = (end - start).num_seconds();
    ((secs + SECONDS_PER_DAY - 1) / SECONDS_PER_DAY).max(1)
}

#[derive(Clone)]
pub struct BookingService {
    store: Arc<dyn BookingStore>,
    notifier: Arc<dyn Notifier>,
}

impl BookingService {
    pub fn new(store: Arc<dyn BookingStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self { store, notifier }
    }

    // =========================================================================
    //  VERIFICAÇÕES
    // =========================================================================

    pub async fn is_room_available(
        &self,
        room_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<bool, AppError> {
        Ok(!self.store.room_has_conflict(room_id, start, end).await?)
    }

    /// Regra do serviço: nenhuma reserva sobreposta do hóspede, em QUALQUER hotel.
    pub async fn is_guest_booking_valid(
        &self,
        guest_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<bool, AppError> {
        let bookings = self.store.list_by_guest(guest_id).await?;
        Ok(!bookings
            .iter()
            .any(|b| overlaps(start, end, b.start_date, b.end_date)))
    }

    /// Regra da entrada: o hóspede já tem reserva sobreposta em OUTRO hotel?
    pub async fn has_cross_hotel_conflict(
        &self,
        guest_id: Uuid,
        hotel_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<bool, AppError> {
        let bookings = self.store.list_by_guest(guest_id).await?;
        Ok(bookings
            .iter()
            .any(|b| b.hotel_id != hotel_id && overlaps(start, end, b.start_date, b.end_date)))
    }

    // =========================================================================
    //  ADMISSÃO
    // =========================================================================

    /// Ponto de entrada do POST /bookings: confere o quarto, aplica a guarda
    /// de hotéis cruzados e só então a admissão propriamente dita. As duas camadas rodam sempre;
    /// a primeira que falhar define a mensagem.
    pub async fn create_booking(&self, request: BookingRequest) -> Result<Booking, AppError> {
        ensure_ordered(request.start_date, request.end_date)?;
        self.ensure_placement(request.room_id, request.hotel_id, request.room_type_id)
            .await?;

        if self
            .has_cross_hotel_conflict(
                request.guest_id,
                request.hotel_id,
                request.start_date,
                request.end_date,
            )
            .await?
        {
            tracing::warn!(
                guest_id = %request.guest_id,
                hotel_id = %request.hotel_id,
                "⛔ Reserva recusada: hóspede já hospedado em outro hotel no período"
            );
            return Err(AppError::Conflict(CROSS_HOTEL_CONFLICT.to_string()));
        }

        self.admit(request).await
    }

    /// Hotel e tipo de quarto da reserva vêm do quarto cadastrado, não do cliente.
    async fn ensure_placement(
        &self,
        room_id: Uuid,
        hotel_id: Uuid,
        room_type_id: Uuid,
    ) -> Result<(), AppError> {
        let placement = self
            .store
            .room_placement(room_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Room not found.".to_string()))?;

        if placement.hotel_id != hotel_id || placement.room_type_id != room_type_id {
            tracing::warn!(
                %room_id,
                %hotel_id,
                %room_type_id,
                "⛔ Reserva recusada: hotel ou tipo de quarto não corresponde ao quarto"
            );
            return Err(AppError::BadRequest(ROOM_MISMATCH.to_string()));
        }

        Ok(())
    }

    /// Admissão: quarto livre E hóspede sem conflito; depois grava e dispara
    /// a confirmação em segundo plano. Chamada só depois de `ensure_placement`.
    async fn admit(&self, request: BookingRequest) -> Result<Booking, AppError> {
        ensure_ordered(request.start_date, request.end_date)?;

        let (room_free, guest_ok) = tokio::try_join!(
            self.is_room_available(request.room_id, request.start_date, request.end_date),
            self.is_guest_booking_valid(request.guest_id, request.start_date, request.end_date),
        )?;

        if !(room_free && guest_ok) {
            tracing::warn!(
                room_id = %request.room_id,
                guest_id = %request.guest_id,
                room_free,
                guest_ok,
                "⛔ Reserva recusada: quarto indisponível para as datas"
            );
            return Err(AppError::Conflict(ROOM_UNAVAILABLE.to_string()));
        }

        let total_cost = match request.total_cost {
            Some(cost) => cost,
            None => {
                self.quote(request.room_type_id, request.start_date, request.end_date)
                    .await?
            }
        };

        let booking = self
            .store
            .insert_booking(&NewBooking {
                room_type_id: request.room_type_id,
                hotel_id: request.hotel_id,
                guest_id: request.guest_id,
                room_id: request.room_id,
                start_date: request.start_date,
                end_date: request.end_date,
                total_cost,
            })
            .await?;

        tracing::info!(
            booking_id = %booking.id,
            guest_id = %booking.guest_id,
            "✅ Reserva criada"
        );

        // Fire-and-forget: a falha do envio não desfaz a reserva.
        self.dispatch_confirmation(booking.guest_id, booking.id);

        Ok(booking)
    }

    /// Preço da diária do tipo de quarto vezes o número de diárias.
    pub async fn quote(
        &self,
        room_type_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Decimal, AppError> {
        let price = self
            .store
            .room_type_price(room_type_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Room type not found.".to_string()))?;

        Ok(price * Decimal::from(nights_between(start, end)))
    }

    fn dispatch_confirmation(&self, guest_id: Uuid, booking_id: Uuid) {
        let store = Arc::clone(&self.store);
        let notifier = Arc::clone(&self.notifier);

        tokio::spawn(async move {
            let email = match store.guest_email(guest_id).await {
                Ok(Some(email)) => email,
                Ok(None) => {
                    tracing::warn!(%guest_id, %booking_id, "Hóspede sem e-mail cadastrado, confirmação não enviada");
                    return;
                }
                Err(e) => {
                    tracing::warn!(%guest_id, %booking_id, error = %e, "Falha ao buscar e-mail do hóspede");
                    return;
                }
            };

            if let Err(e) = notifier
                .send(&email, CONFIRMATION_SUBJECT, CONFIRMATION_BODY)
                .await
            {
                tracing::warn!(%booking_id, error = %e, "📧 Falha ao enviar confirmação da reserva");
            }
        });
    }

    // =========================================================================
    //  ALTERAÇÃO / REMOÇÃO
    // =========================================================================

    /// Substitui a reserva inteira. Bloqueada enquanto `now - start_date < 24h`
    /// (inclui reservas que ainda vão começar).
    pub async fn update_booking(
        &self,
        id: Uuid,
        replacement: NewBooking,
        now: DateTime<Utc>,
    ) -> Result<Booking, AppError> {
        ensure_ordered(replacement.start_date, replacement.end_date)?;

        let existing = self
            .store
            .find_booking(id)
            .await?
            .ok_or_else(booking_not_found)?;

        if now - existing.start_date < Duration::hours(UPDATE_LOCK_HOURS) {
            tracing::warn!(booking_id = %id, "Alteração recusada: dentro da janela de 24h");
            return Err(AppError::BadRequest(UPDATE_LOCKED.to_string()));
        }

        self.ensure_placement(
            replacement.room_id,
            replacement.hotel_id,
            replacement.room_type_id,
        )
        .await?;

        let updated = self
            .store
            .replace_booking(id, &replacement)
            .await?
            .ok_or_else(booking_not_found)?;

        tracing::info!(booking_id = %id, "Reserva atualizada");
        Ok(updated)
    }

    pub async fn delete_booking(&self, id: Uuid) -> Result<(), AppError> {
        if !self.store.delete_booking(id).await? {
            tracing::warn!(booking_id = %id, "Reserva não encontrada para remoção");
            return Err(booking_not_found());
        }

        tracing::info!(booking_id = %id, "Reserva removida");
        Ok(())
    }

    // =========================================================================
    //  CONSULTAS
    // =========================================================================

    pub async fn list_bookings(&self) -> Result<Vec<BookingDetail>, AppError> {
        self.store.list_bookings().await
    }

    pub async fn get_booking(&self, id: Uuid) -> Result<BookingDetail, AppError> {
        self.store
            .find_booking_detail(id)
            .await?
            .ok_or_else(booking_not_found)
    }

    pub async fn search_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Booking>, AppError> {
        self.store.search_by_date_range(start, end).await
    }

    pub async fn bookings_for_guest(&self, guest_id: Uuid) -> Result<Vec<Booking>, AppError> {
        self.store.list_by_guest(guest_id).await
    }

    pub async fn bookings_for_hotel(&self, hotel_id: Uuid) -> Result<Vec<Booking>, AppError> {
        self.store.list_by_hotel(hotel_id).await
    }

    pub async fn occupancy_report(&self) -> Result<Vec<OccupancyEntry>, AppError> {
        self.store.occupancy_report().await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use chrono::TimeZone;
    use tokio::sync::{mpsc, Mutex};

    use super::*;
    use crate::models::booking::RoomPlacement;
    use crate::services::availability::intersects_half_open;
    use crate::services::notification::NotificationError;

    // --- Armazenamento em memória com as mesmas regras do Postgres ---

    #[derive(Default)]
    struct MemoryState {
        bookings: Vec<Booking>,
        rooms: HashMap<Uuid, RoomPlacement>,
        guest_emails: HashMap<Uuid, String>,
        prices: HashMap<Uuid, Decimal>,
    }

    impl MemoryState {
        // equivalente à EXCLUDE constraint por quarto
        fn room_taken(&self, booking: &NewBooking, ignore: Option<Uuid>) -> bool {
            self.bookings.iter().any(|b| {
                Some(b.id) != ignore
                    && b.room_id == booking.room_id
                    && intersects_half_open(b.start_date, b.end_date, booking.start_date, booking.end_date)
            })
        }
    }

    #[derive(Default)]
    struct MemoryStore {
        state: Mutex<MemoryState>,
    }

    impl MemoryStore {
        async fn seed(&self, booking: Booking) {
            self.state.lock().await.bookings.push(booking);
        }

        async fn add_room(&self, room_id: Uuid, hotel_id: Uuid, room_type_id: Uuid) {
            self.state.lock().await.rooms.insert(
                room_id,
                RoomPlacement {
                    hotel_id,
                    room_type_id,
                },
            );
        }

        async fn add_guest(&self, guest_id: Uuid, email: &str) {
            self.state
                .lock()
                .await
                .guest_emails
                .insert(guest_id, email.to_string());
        }

        async fn add_room_type(&self, room_type_id: Uuid, price: Decimal) {
            self.state.lock().await.prices.insert(room_type_id, price);
        }

        async fn count(&self) -> usize {
            self.state.lock().await.bookings.len()
        }
    }

    fn materialize(id: Uuid, b: &NewBooking) -> Booking {
        let now = Utc::now();
        Booking {
            id,
            room_type_id: b.room_type_id,
            hotel_id: b.hotel_id,
            guest_id: b.guest_id,
            room_id: b.room_id,
            start_date: b.start_date,
            end_date: b.end_date,
            total_cost: b.total_cost,
            created_at: now,
            updated_at: now,
        }
    }

    #[async_trait]
    impl BookingStore for MemoryStore {
        async fn list_bookings(&self) -> Result<Vec<BookingDetail>, AppError> {
            let state = self.state.lock().await;
            Ok(state
                .bookings
                .iter()
                .map(|b| BookingDetail {
                    booking: b.clone(),
                    guest_name: String::new(),
                    guest_email: state.guest_emails.get(&b.guest_id).cloned().unwrap_or_default(),
                    room_type_name: String::new(),
                })
                .collect())
        }

        async fn find_booking_detail(&self, id: Uuid) -> Result<Option<BookingDetail>, AppError> {
            Ok(self.list_bookings().await?.into_iter().find(|d| d.booking.id == id))
        }

        async fn find_booking(&self, id: Uuid) -> Result<Option<Booking>, AppError> {
            let state = self.state.lock().await;
            Ok(state.bookings.iter().find(|b| b.id == id).cloned())
        }

        async fn room_has_conflict(
            &self,
            room_id: Uuid,
            start: DateTime<Utc>,
            end: DateTime<Utc>,
        ) -> Result<bool, AppError> {
            // deixa requisições concorrentes se intercalarem entre checagem e gravação
            tokio::task::yield_now().await;
            let state = self.state.lock().await;
            Ok(state.bookings.iter().any(|b| {
                b.room_id == room_id && intersects_half_open(b.start_date, b.end_date, start, end)
            }))
        }

        async fn room_placement(&self, room_id: Uuid) -> Result<Option<RoomPlacement>, AppError> {
            Ok(self.state.lock().await.rooms.get(&room_id).copied())
        }

        async fn room_type_price(&self, room_type_id: Uuid) -> Result<Option<Decimal>, AppError> {
            Ok(self.state.lock().await.prices.get(&room_type_id).copied())
        }

        async fn guest_email(&self, guest_id: Uuid) -> Result<Option<String>, AppError> {
            Ok(self.state.lock().await.guest_emails.get(&guest_id).cloned())
        }

        async fn insert_booking(&self, booking: &NewBooking) -> Result<Booking, AppError> {
            tokio::task::yield_now().await;
            let mut state = self.state.lock().await;
            if state.room_taken(booking, None) {
                return Err(AppError::Conflict(ROOM_UNAVAILABLE.to_string()));
            }
            let stored = materialize(Uuid::new_v4(), booking);
            state.bookings.push(stored.clone());
            Ok(stored)
        }

        async fn replace_booking(&self, id: Uuid, booking: &NewBooking) -> Result<Option<Booking>, AppError> {
            let mut state = self.state.lock().await;
            if state.room_taken(booking, Some(id)) {
                return Err(AppError::Conflict(ROOM_UNAVAILABLE.to_string()));
            }
            Ok(state.bookings.iter_mut().find(|b| b.id == id).map(|slot| {
                let created_at = slot.created_at;
                *slot = materialize(id, booking);
                slot.created_at = created_at;
                slot.clone()
            }))
        }

        async fn delete_booking(&self, id: Uuid) -> Result<bool, AppError> {
            let mut state = self.state.lock().await;
            let before = state.bookings.len();
            state.bookings.retain(|b| b.id != id);
            Ok(state.bookings.len() < before)
        }

        async fn search_by_date_range(
            &self,
            start: DateTime<Utc>,
            end: DateTime<Utc>,
        ) -> Result<Vec<Booking>, AppError> {
            let state = self.state.lock().await;
            Ok(state
                .bookings
                .iter()
                .filter(|b| b.start_date >= start && b.end_date <= end)
                .cloned()
                .collect())
        }

        async fn list_by_guest(&self, guest_id: Uuid) -> Result<Vec<Booking>, AppError> {
            let state = self.state.lock().await;
            Ok(state.bookings.iter().filter(|b| b.guest_id == guest_id).cloned().collect())
        }

        async fn list_by_hotel(&self, hotel_id: Uuid) -> Result<Vec<Booking>, AppError> {
            let state = self.state.lock().await;
            Ok(state.bookings.iter().filter(|b| b.hotel_id == hotel_id).cloned().collect())
        }

        async fn occupancy_report(&self) -> Result<Vec<OccupancyEntry>, AppError> {
            let state = self.state.lock().await;
            let mut counts: HashMap<Uuid, usize> = HashMap::new();
            for b in &state.bookings {
                *counts.entry(b.room_id).or_default() += 1;
            }
            Ok(counts
                .into_iter()
                .map(|(room_id, n)| OccupancyEntry {
                    room_id,
                    occupancy_rate: n as f64 / 365.0,
                })
                .collect())
        }
    }

    // --- Notificadores de teste ---

    struct RecordingNotifier {
        tx: mpsc::UnboundedSender<(String, String)>,
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn send(&self, to: &str, subject: &str, _body: &str) -> Result<(), NotificationError> {
            let _ = self.tx.send((to.to_string(), subject.to_string()));
            Ok(())
        }
    }

    struct FailingNotifier {
        attempts: Arc<AtomicUsize>,
        done: Arc<tokio::sync::Notify>,
    }

    #[async_trait]
    impl Notifier for FailingNotifier {
        async fn send(&self, _to: &str, _subject: &str, _body: &str) -> Result<(), NotificationError> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            self.done.notify_one();
            Err(NotificationError::Rejected(reqwest::StatusCode::BAD_GATEWAY))
        }
    }

    // --- Helpers ---

    fn jan(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, day, 0, 0, 0).unwrap()
    }

    struct Fixture {
        store: Arc<MemoryStore>,
        service: BookingService,
        sent: mpsc::UnboundedReceiver<(String, String)>,
        room_type_id: Uuid,
    }

    impl Fixture {
        /// Cadastra um quarto do tipo padrão da fixture no hotel dado.
        async fn room_in(&self, hotel_id: Uuid) -> Uuid {
            let room_id = Uuid::new_v4();
            self.store.add_room(room_id, hotel_id, self.room_type_id).await;
            room_id
        }

        /// Pedido sem custo explícito para um quarto recém-cadastrado.
        async fn request_in(
            &self,
            hotel_id: Uuid,
            guest_id: Uuid,
            start: DateTime<Utc>,
            end: DateTime<Utc>,
        ) -> BookingRequest {
            let room_id = self.room_in(hotel_id).await;
            self.request_for(hotel_id, guest_id, room_id, start, end)
        }

        fn request_for(
            &self,
            hotel_id: Uuid,
            guest_id: Uuid,
            room_id: Uuid,
            start: DateTime<Utc>,
            end: DateTime<Utc>,
        ) -> BookingRequest {
            BookingRequest {
                room_type_id: self.room_type_id,
                hotel_id,
                guest_id,
                room_id,
                start_date: start,
                end_date: end,
                total_cost: None,
            }
        }

        fn existing(
            &self,
            hotel_id: Uuid,
            guest_id: Uuid,
            room_id: Uuid,
            start: DateTime<Utc>,
            end: DateTime<Utc>,
        ) -> Booking {
            materialize(
                Uuid::new_v4(),
                &NewBooking {
                    room_type_id: self.room_type_id,
                    hotel_id,
                    guest_id,
                    room_id,
                    start_date: start,
                    end_date: end,
                    total_cost: Decimal::ZERO,
                },
            )
        }
    }

    async fn fixture() -> Fixture {
        let store = Arc::new(MemoryStore::default());
        let (tx, sent) = mpsc::unbounded_channel();
        let service = BookingService::new(store.clone(), Arc::new(RecordingNotifier { tx }));
        let room_type_id = Uuid::new_v4();
        store.add_room_type(room_type_id, Decimal::new(100, 0)).await;
        Fixture {
            store,
            service,
            sent,
            room_type_id,
        }
    }

    fn replacement_of(b: &Booking) -> NewBooking {
        NewBooking {
            room_type_id: b.room_type_id,
            hotel_id: b.hotel_id,
            guest_id: b.guest_id,
            room_id: b.room_id,
            start_date: b.start_date,
            end_date: b.end_date,
            total_cost: b.total_cost,
        }
    }

    fn conflict_message(err: AppError) -> String {
        match err {
            AppError::Conflict(message) => message,
            other => panic!("expected a conflict, got {other:?}"),
        }
    }

    // --- Cenários ---

    #[tokio::test]
    async fn overlapping_room_request_is_rejected_but_adjacent_one_is_accepted() {
        let f = fixture().await;
        let hotel = Uuid::new_v4();
        let room = f.room_in(hotel).await;
        f.store.seed(f.existing(hotel, Uuid::new_v4(), room, jan(1), jan(3))).await;

        let err = f
            .service
            .create_booking(f.request_for(hotel, Uuid::new_v4(), room, jan(2), jan(4)))
            .await
            .unwrap_err();
        assert_eq!(conflict_message(err), ROOM_UNAVAILABLE);

        let booking = f
            .service
            .create_booking(f.request_for(hotel, Uuid::new_v4(), room, jan(3), jan(5)))
            .await
            .unwrap();
        assert_eq!(booking.start_date, jan(3));
        assert_eq!(f.store.count().await, 2);
    }

    #[tokio::test]
    async fn guest_cannot_hold_overlapping_stays_at_two_hotels() {
        let f = fixture().await;
        let (h1, h2, guest) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        f.store.seed(f.existing(h1, guest, Uuid::new_v4(), jan(1), jan(3))).await;

        let err = f
            .service
            .create_booking(f.request_in(h2, guest, jan(2), jan(4)).await)
            .await
            .unwrap_err();
        assert_eq!(conflict_message(err), CROSS_HOTEL_CONFLICT);

        // mesmo hotel, datas livres: passa pela guarda e pela admissão
        assert!(
            !f.service
                .has_cross_hotel_conflict(guest, h1, jan(5), jan(6))
                .await
                .unwrap()
        );
        assert!(f.service.is_guest_booking_valid(guest, jan(5), jan(6)).await.unwrap());
        let later = f.request_in(h1, guest, jan(5), jan(6)).await;
        assert!(f.service.create_booking(later).await.is_ok());
    }

    #[tokio::test]
    async fn same_hotel_overlap_passes_the_guard_but_fails_admission() {
        let f = fixture().await;
        let (hotel, guest) = (Uuid::new_v4(), Uuid::new_v4());
        f.store.seed(f.existing(hotel, guest, Uuid::new_v4(), jan(1), jan(3))).await;

        assert!(
            !f.service
                .has_cross_hotel_conflict(guest, hotel, jan(2), jan(4))
                .await
                .unwrap()
        );

        let err = f
            .service
            .create_booking(f.request_in(hotel, guest, jan(2), jan(4)).await)
            .await
            .unwrap_err();
        assert_eq!(conflict_message(err), ROOM_UNAVAILABLE);
    }

    #[tokio::test]
    async fn request_enclosing_an_existing_stay_is_a_conflict() {
        let f = fixture().await;
        let (h1, h2, guest) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        f.store.seed(f.existing(h1, guest, Uuid::new_v4(), jan(4), jan(5))).await;

        let err = f
            .service
            .create_booking(f.request_in(h2, guest, jan(1), jan(10)).await)
            .await
            .unwrap_err();
        assert_eq!(conflict_message(err), CROSS_HOTEL_CONFLICT);
    }

    #[tokio::test]
    async fn inverted_date_range_is_a_bad_request() {
        let f = fixture().await;
        let request = f.request_in(Uuid::new_v4(), Uuid::new_v4(), jan(5), jan(5)).await;
        let err = f.service.create_booking(request).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(ref m) if m == INVALID_RANGE));
        assert_eq!(f.store.count().await, 0);
    }

    #[tokio::test]
    async fn concurrent_admissions_for_one_room_never_both_succeed() {
        let f = fixture().await;
        let hotel = Uuid::new_v4();
        let room = f.room_in(hotel).await;

        let first = f.request_for(hotel, Uuid::new_v4(), room, jan(1), jan(4));
        let second = f.request_for(hotel, Uuid::new_v4(), room, jan(2), jan(5));

        let (a, b) = tokio::join!(f.service.admit(first), f.service.admit(second));

        assert_eq!(a.is_ok() as u8 + b.is_ok() as u8, 1);
        assert_eq!(f.store.count().await, 1);
    }

    // --- Quarto cadastrado x pedido ---

    #[tokio::test]
    async fn room_type_must_match_the_booked_room() {
        let f = fixture().await;
        let hotel = Uuid::new_v4();
        let room = f.room_in(hotel).await;
        let suite = Uuid::new_v4();
        f.store.add_room_type(suite, Decimal::new(900, 0)).await;

        let mut request = f.request_for(hotel, Uuid::new_v4(), room, jan(1), jan(3));
        request.room_type_id = suite;

        let err = f.service.create_booking(request).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(ref m) if m == ROOM_MISMATCH));
        assert_eq!(f.store.count().await, 0);
    }

    #[tokio::test]
    async fn hotel_must_match_the_booked_room() {
        let f = fixture().await;
        let room = f.room_in(Uuid::new_v4()).await;

        let request = f.request_for(Uuid::new_v4(), Uuid::new_v4(), room, jan(1), jan(3));
        let err = f.service.create_booking(request).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(ref m) if m == ROOM_MISMATCH));
    }

    #[tokio::test]
    async fn unknown_room_is_not_found() {
        let f = fixture().await;
        let request = f.request_for(Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4(), jan(1), jan(2));
        let err = f.service.create_booking(request).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    // --- Custo ---

    #[tokio::test]
    async fn total_cost_defaults_to_nightly_rate_times_nights() {
        let f = fixture().await;
        let check_in = Utc.with_ymd_and_hms(2025, 1, 1, 14, 0, 0).unwrap();
        let check_out = Utc.with_ymd_and_hms(2025, 1, 3, 11, 0, 0).unwrap();

        let request = f.request_in(Uuid::new_v4(), Uuid::new_v4(), check_in, check_out).await;
        let booking = f.service.create_booking(request).await.unwrap();
        assert_eq!(booking.total_cost, Decimal::new(200, 0));

        let mut explicit = f.request_in(Uuid::new_v4(), Uuid::new_v4(), jan(10), jan(12)).await;
        explicit.total_cost = Some(Decimal::new(12345, 2));
        let booking = f.service.create_booking(explicit).await.unwrap();
        assert_eq!(booking.total_cost, Decimal::new(12345, 2));
    }

    #[tokio::test]
    async fn room_without_a_priced_type_and_no_explicit_cost_is_not_found() {
        let f = fixture().await;
        let (hotel, room, unpriced) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        f.store.add_room(room, hotel, unpriced).await;

        let mut request = f.request_for(hotel, Uuid::new_v4(), room, jan(1), jan(2));
        request.room_type_id = unpriced;

        let err = f.service.create_booking(request).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn partial_days_round_up_to_a_full_night() {
        let noon = jan(1) + Duration::hours(12);

        assert_eq!(nights_between(jan(1), jan(3)), 2);
        assert_eq!(nights_between(jan(1), jan(1) + Duration::hours(3)), 1);
        assert_eq!(nights_between(jan(1), jan(2) + Duration::hours(1)), 2);
        assert_eq!(nights_between(noon, noon + Duration::hours(24) + Duration::minutes(59)), 2);
        assert_eq!(nights_between(jan(1), jan(2) + Duration::seconds(1)), 2);
    }

    // --- Confirmação ---

    #[tokio::test]
    async fn confirmation_goes_to_the_guest_email() {
        let mut f = fixture().await;
        let guest = Uuid::new_v4();
        f.store.add_guest(guest, "john.doe@example.com").await;

        let request = f.request_in(Uuid::new_v4(), guest, jan(1), jan(2)).await;
        f.service.create_booking(request).await.unwrap();

        let (to, subject) = tokio::time::timeout(std::time::Duration::from_secs(1), f.sent.recv())
            .await
            .expect("confirmation was not dispatched")
            .unwrap();
        assert_eq!(to, "john.doe@example.com");
        assert_eq!(subject, CONFIRMATION_SUBJECT);
    }

    #[tokio::test]
    async fn rejected_booking_sends_nothing() {
        let mut f = fixture().await;
        let (hotel, guest) = (Uuid::new_v4(), Uuid::new_v4());
        let room = f.room_in(hotel).await;
        f.store.add_guest(guest, "john.doe@example.com").await;
        f.store.seed(f.existing(hotel, Uuid::new_v4(), room, jan(1), jan(3))).await;

        assert!(
            f.service
                .create_booking(f.request_for(hotel, guest, room, jan(2), jan(4)))
                .await
                .is_err()
        );
        tokio::task::yield_now().await;
        assert!(f.sent.try_recv().is_err());
    }

    #[tokio::test]
    async fn notification_failure_does_not_undo_the_booking() {
        let store = Arc::new(MemoryStore::default());
        let attempts = Arc::new(AtomicUsize::new(0));
        let done = Arc::new(tokio::sync::Notify::new());
        let service = BookingService::new(
            store.clone(),
            Arc::new(FailingNotifier {
                attempts: attempts.clone(),
                done: done.clone(),
            }),
        );
        let (guest, hotel, room, room_type) =
            (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        store.add_guest(guest, "jane@example.com").await;
        store.add_room(room, hotel, room_type).await;

        let request = BookingRequest {
            room_type_id: room_type,
            hotel_id: hotel,
            guest_id: guest,
            room_id: room,
            start_date: jan(1),
            end_date: jan(2),
            total_cost: Some(Decimal::new(50, 0)),
        };
        let booking = service.create_booking(request).await.unwrap();

        tokio::time::timeout(std::time::Duration::from_secs(1), done.notified())
            .await
            .expect("notifier was never called");
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
        assert!(store.find_booking(booking.id).await.unwrap().is_some());
    }

    // --- Alteração / remoção ---

    #[tokio::test]
    async fn updates_are_locked_for_24_hours_after_start() {
        let f = fixture().await;
        let now = Utc::now();
        let (hotel, guest) = (Uuid::new_v4(), Uuid::new_v4());
        let (room_a, room_b) = (f.room_in(hotel).await, f.room_in(hotel).await);

        let recent = f.existing(hotel, guest, room_a, now - Duration::hours(10), now + Duration::days(2));
        let older = f.existing(hotel, guest, room_b, now - Duration::hours(30), now + Duration::days(2));
        f.store.seed(recent.clone()).await;
        f.store.seed(older.clone()).await;

        let extended = |b: &Booking| NewBooking {
            end_date: b.end_date + Duration::days(1),
            total_cost: Decimal::new(999, 0),
            ..replacement_of(b)
        };

        let err = f
            .service
            .update_booking(recent.id, extended(&recent), now)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(ref m) if m == UPDATE_LOCKED));

        let updated = f
            .service
            .update_booking(older.id, extended(&older), now)
            .await
            .unwrap();
        assert_eq!(updated.total_cost, Decimal::new(999, 0));
        assert_eq!(updated.end_date, older.end_date + Duration::days(1));
    }

    #[tokio::test]
    async fn update_that_collides_on_the_room_is_refused_by_storage() {
        let f = fixture().await;
        let now = jan(20);
        let hotel = Uuid::new_v4();
        let room = f.room_in(hotel).await;

        let first = f.existing(hotel, Uuid::new_v4(), room, jan(1), jan(3));
        let second = f.existing(hotel, Uuid::new_v4(), room, jan(5), jan(7));
        f.store.seed(first.clone()).await;
        f.store.seed(second.clone()).await;

        let moved = NewBooking {
            start_date: jan(2),
            ..replacement_of(&second)
        };
        let err = f
            .service
            .update_booking(second.id, moved, now)
            .await
            .unwrap_err();
        assert_eq!(conflict_message(err), ROOM_UNAVAILABLE);

        // o próprio intervalo da reserva não conta contra ela
        let widened = NewBooking {
            start_date: jan(4),
            ..replacement_of(&second)
        };
        let updated = f.service.update_booking(second.id, widened, now).await.unwrap();
        assert_eq!(updated.start_date, jan(4));
    }

    #[tokio::test]
    async fn update_cannot_move_a_booking_to_a_room_of_another_type() {
        let f = fixture().await;
        let hotel = Uuid::new_v4();
        let room = f.room_in(hotel).await;
        let booking = f.existing(hotel, Uuid::new_v4(), room, jan(1), jan(3));
        f.store.seed(booking.clone()).await;

        let retyped = NewBooking {
            room_type_id: Uuid::new_v4(),
            ..replacement_of(&booking)
        };
        let err = f
            .service
            .update_booking(booking.id, retyped, jan(20))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(ref m) if m == ROOM_MISMATCH));
    }

    #[tokio::test]
    async fn updating_a_missing_booking_is_not_found() {
        let f = fixture().await;
        let replacement = NewBooking {
            room_type_id: Uuid::new_v4(),
            hotel_id: Uuid::new_v4(),
            guest_id: Uuid::new_v4(),
            room_id: Uuid::new_v4(),
            start_date: jan(1),
            end_date: jan(2),
            total_cost: Decimal::ZERO,
        };
        let err = f
            .service
            .update_booking(Uuid::new_v4(), replacement, Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn deleting_an_unknown_booking_is_not_found() {
        let f = fixture().await;
        let err = f.service.delete_booking(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let booking = f.existing(Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4(), jan(1), jan(2));
        f.store.seed(booking.clone()).await;
        f.service.delete_booking(booking.id).await.unwrap();
        assert!(matches!(
            f.service.get_booking(booking.id).await,
            Err(AppError::NotFound(_))
        ));
    }

    // --- Consultas ---

    #[tokio::test]
    async fn queries_filter_by_guest_hotel_and_window() {
        let f = fixture().await;
        let (h1, h2, guest) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let room = Uuid::new_v4();
        f.store.seed(f.existing(h1, guest, room, jan(1), jan(3))).await;
        f.store.seed(f.existing(h2, Uuid::new_v4(), room, jan(5), jan(9))).await;

        assert_eq!(f.service.bookings_for_guest(guest).await.unwrap().len(), 1);
        assert_eq!(f.service.bookings_for_hotel(h2).await.unwrap().len(), 1);
        // só entra quem cabe inteiro na janela
        assert_eq!(f.service.search_by_date_range(jan(1), jan(4)).await.unwrap().len(), 1);
        assert_eq!(f.service.search_by_date_range(jan(1), jan(9)).await.unwrap().len(), 2);

        let report = f.service.occupancy_report().await.unwrap();
        assert_eq!(report.len(), 1);
        assert!((report[0].occupancy_rate - 2.0 / 365.0).abs() < f64::EPSILON);
    }
}
