//! PostgreSQL adapters implementing the persistence ports.

mod account_store;
mod game_catalog;
mod purchase_repository;
mod rental_repository;
mod session_repository;

pub use account_store::{
    PostgresNotificationPreferencesRepository, PostgresReleaseNotifyRepository,
    PostgresSupportTicketRepository,
};
pub use game_catalog::PostgresGameCatalog;
pub use purchase_repository::PostgresPurchaseRepository;
pub use rental_repository::PostgresRentalRepository;
pub use session_repository::PostgresSessionRepository;
