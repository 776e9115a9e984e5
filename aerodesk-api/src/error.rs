use aerodesk_core::CoreError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

#[derive(Debug)]
pub enum AppError {
    ValidationError(String),
    NotFoundError(String),
    ConflictError(String),
    InternalServerError(String),
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(_) => AppError::ValidationError(err.to_string()),
            CoreError::NotFound { .. } => AppError::NotFoundError(err.to_string()),
            CoreError::SeatNotAvailable { .. } | CoreError::DuplicatePassport => {
                AppError::ConflictError(err.to_string())
            }
            CoreError::Storage(_) => AppError::InternalServerError(err.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFoundError(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::ConflictError(msg) => (StatusCode::CONFLICT, msg),
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aerodesk_core::{Entity, FlightId};

    #[test]
    fn test_core_errors_map_to_status() {
        let cases = [
            (CoreError::validation("bad"), StatusCode::BAD_REQUEST),
            (CoreError::not_found(Entity::Flight, 1), StatusCode::NOT_FOUND),
            (CoreError::seat_not_available(FlightId(1), "2"), StatusCode::CONFLICT),
            (CoreError::DuplicatePassport, StatusCode::CONFLICT),
            (CoreError::storage("disk I/O error"), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            let response = AppError::from(err).into_response();
            assert_eq!(response.status(), status);
        }
    }
}
