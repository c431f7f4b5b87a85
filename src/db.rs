pub mod booking_repo;
pub use booking_repo::{BookingRepository, BookingStore};
pub mod catalog_repo;
pub use catalog_repo::CatalogRepository;
pub mod guest_repo;
pub use guest_repo::GuestRepository;
pub mod review_repo;
pub use review_repo::ReviewRepository;
