//! Ports: trait seams between the application core and its adapters.

mod account;
mod game_catalog;
mod purchase_repository;
mod rental_repository;
mod session_repository;
mod session_validator;

pub use account::{
    NotificationPreferences, NotificationPreferencesRepository, ReleaseNotifyRepository,
    SupportTicket, SupportTicketRepository,
};
pub use game_catalog::GameCatalog;
pub use purchase_repository::PurchaseRepository;
pub use rental_repository::RentalRepository;
pub use session_repository::{SessionRepository, SessionWithGame};
pub use session_validator::SessionValidator;
