use aerodesk_core::{NewPassenger, Passenger, PassengerId};
use aerodesk_shared::Masked;
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
pub struct CreatePassengerRequest {
    pub name: String,
    pub passport: Masked<String>,
}

#[derive(Debug, Serialize)]
pub struct CreatePassengerResponse {
    pub passenger_id: PassengerId,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/passengers", post(create_passenger))
        .route("/v1/passengers/{id}", get(get_passenger))
}

/// POST /v1/passengers
async fn create_passenger(
    State(state): State<AppState>,
    Json(req): Json<CreatePassengerRequest>,
) -> Result<(StatusCode, Json<CreatePassengerResponse>), AppError> {
    let passenger_id = state
        .registration
        .register_passenger(NewPassenger {
            name: req.name,
            passport: req.passport,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(CreatePassengerResponse { passenger_id })))
}

/// GET /v1/passengers/{id}
async fn get_passenger(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Passenger>, AppError> {
    Ok(Json(state.registration.passenger(PassengerId(id)).await?))
}
