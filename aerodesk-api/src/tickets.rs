use aerodesk_core::{FlightId, PassengerId, Ticket, TicketId};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SellTicketRequest {
    pub flight_id: FlightId,
    pub passenger_id: PassengerId,
    pub seat: String,
}

#[derive(Debug, Serialize)]
pub struct SellTicketResponse {
    pub ticket_id: TicketId,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/tickets", post(sell_ticket))
        .route("/v1/tickets/{id}", get(get_ticket))
}

/// POST /v1/tickets
async fn sell_ticket(
    State(state): State<AppState>,
    Json(req): Json<SellTicketRequest>,
) -> Result<(StatusCode, Json<SellTicketResponse>), AppError> {
    let ticket_id = state
        .booking
        .sell(req.flight_id, req.passenger_id, &req.seat)
        .await?;

    Ok((StatusCode::CREATED, Json(SellTicketResponse { ticket_id })))
}

/// GET /v1/tickets/{id}
async fn get_ticket(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Ticket>, AppError> {
    Ok(Json(state.booking.ticket(TicketId(id)).await?))
}
