pub mod models;
pub mod validation;

pub use models::{
    Flight, FlightId, NewFlight, NewPassenger, Passenger, PassengerId, Seat, SeatState, Ticket,
    TicketId,
};

use std::fmt;

/// Entity kinds referenced by [`CoreError::NotFound`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Flight,
    Passenger,
    Seat,
    Ticket,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Entity::Flight => "Flight",
            Entity::Passenger => "Passenger",
            Entity::Seat => "Seat",
            Entity::Ticket => "Ticket",
        };
        f.write_str(name)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("{entity} not found: {id}")]
    NotFound { entity: Entity, id: String },
    #[error("Seat not available: flight {flight_id}, seat {label}")]
    SeatNotAvailable { flight_id: FlightId, label: String },
    #[error("Passport already registered")]
    DuplicatePassport,
    #[error("Storage error: {0}")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl CoreError {
    pub fn validation(msg: impl Into<String>) -> Self {
        CoreError::Validation(msg.into())
    }

    pub fn not_found(entity: Entity, id: impl fmt::Display) -> Self {
        CoreError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn seat_not_available(flight_id: FlightId, label: impl Into<String>) -> Self {
        CoreError::SeatNotAvailable {
            flight_id,
            label: label.into(),
        }
    }

    pub fn storage<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        CoreError::Storage(err.into())
    }

    /// True for failures where an invariant would have been violated. The caller has to pick
    /// another seat or passport; retrying the same request cannot succeed.
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            CoreError::SeatNotAvailable { .. } | CoreError::DuplicatePassport
        )
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
