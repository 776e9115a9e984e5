pub mod app_config;
pub mod database;
pub mod flight_repo;
pub mod passenger_repo;
pub mod seat_repo;
pub mod ticket_repo;

pub use database::{DbClient, StoreError};
pub use flight_repo::FlightRepository;
pub use passenger_repo::PassengerRepository;
pub use seat_repo::SeatRepository;
pub use ticket_repo::TicketRepository;

/// True when `err` is the store rejecting a duplicate value on a UNIQUE column.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .map(|db| db.is_unique_violation())
        .unwrap_or(false)
}
