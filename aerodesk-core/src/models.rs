use aerodesk_shared::Masked;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! surrogate_id {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }
    };
}

surrogate_id!(FlightId);
surrogate_id!(PassengerId);
surrogate_id!(TicketId);

/// A scheduled origin-destination service. Immutable once registered.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Flight {
    pub id: FlightId,
    pub origin: String,
    pub destination: String,
    pub schedule: NaiveDateTime,
    pub max_capacity: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Passenger {
    pub id: PassengerId,
    pub name: String,
    pub passport: Masked<String>,
}

/// Seat lifecycle. A deleted seat is simply an absent row, so it has no variant here.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SeatState {
    Available,
    Reserved,
}

impl SeatState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeatState::Available => "available",
            SeatState::Reserved => "reserved",
        }
    }
}

impl fmt::Display for SeatState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SeatState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(SeatState::Available),
            "reserved" => Ok(SeatState::Reserved),
            other => Err(format!("unknown seat state: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Seat {
    pub flight_id: FlightId,
    pub label: String,
    pub state: SeatState,
}

/// Record of a completed sale. Never updated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ticket {
    pub id: TicketId,
    pub flight_id: FlightId,
    pub passenger_id: PassengerId,
    pub seat_label: String,
}

/// Input for flight registration. `capacity` is signed so that callers can hand over whatever
/// they parsed and let validation reject it.
#[derive(Debug, Clone, Deserialize)]
pub struct NewFlight {
    pub origin: String,
    pub destination: String,
    pub schedule: NaiveDateTime,
    pub capacity: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewPassenger {
    pub name: String,
    pub passport: Masked<String>,
}

/// Labels of a freshly created seat pool: `"1"..="capacity"`.
pub fn seat_labels(capacity: u32) -> impl Iterator<Item = String> {
    (1..=capacity).map(|n| n.to_string())
}
