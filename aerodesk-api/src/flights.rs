use aerodesk_core::{Flight, FlightId, NewFlight, Seat, Ticket};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::state::AppState;

const SCHEDULE_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateFlightRequest {
    pub origin: String,
    pub destination: String,
    /// `YYYY-MM-DD HH:MM:SS`
    pub schedule: String,
    pub capacity: i64,
}

#[derive(Debug, Serialize)]
pub struct CreateFlightResponse {
    pub flight_id: FlightId,
}

#[derive(Debug, Serialize)]
pub struct AvailableSeatsResponse {
    pub flight_id: FlightId,
    pub seats: Vec<String>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/flights", post(create_flight))
        .route("/v1/flights/{id}", get(get_flight))
        .route("/v1/flights/{id}/seats", get(list_seats))
        .route("/v1/flights/{id}/seats/{label}", delete(remove_seat))
        .route("/v1/flights/{id}/available-seats", get(list_available_seats))
        .route("/v1/flights/{id}/tickets", get(list_tickets))
}

pub fn parse_schedule(raw: &str) -> Result<NaiveDateTime, AppError> {
    let raw = raw.trim();
    SCHEDULE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .ok_or_else(|| {
            AppError::ValidationError(format!(
                "schedule must look like YYYY-MM-DD HH:MM:SS, got {:?}",
                raw
            ))
        })
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /v1/flights
async fn create_flight(
    State(state): State<AppState>,
    Json(req): Json<CreateFlightRequest>,
) -> Result<(StatusCode, Json<CreateFlightResponse>), AppError> {
    let schedule = parse_schedule(&req.schedule)?;

    let flight_id = state
        .registration
        .register_flight(NewFlight {
            origin: req.origin,
            destination: req.destination,
            schedule,
            capacity: req.capacity,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(CreateFlightResponse { flight_id })))
}

/// GET /v1/flights/{id}
async fn get_flight(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Flight>, AppError> {
    Ok(Json(state.registration.flight(FlightId(id)).await?))
}

/// GET /v1/flights/{id}/seats
async fn list_seats(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<Seat>>, AppError> {
    Ok(Json(state.inventory.seats(FlightId(id)).await?))
}

/// GET /v1/flights/{id}/available-seats
async fn list_available_seats(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<AvailableSeatsResponse>, AppError> {
    let flight_id = FlightId(id);
    let seats = state.inventory.list_available(flight_id).await?;
    Ok(Json(AvailableSeatsResponse { flight_id, seats }))
}

/// DELETE /v1/flights/{id}/seats/{label}
async fn remove_seat(
    State(state): State<AppState>,
    Path((id, label)): Path<(i64, String)>,
) -> Result<StatusCode, AppError> {
    state.inventory.remove(FlightId(id), &label).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /v1/flights/{id}/tickets
async fn list_tickets(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<Ticket>>, AppError> {
    Ok(Json(state.booking.tickets_for_flight(FlightId(id)).await?))
}
