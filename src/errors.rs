use axum::{http::StatusCode, Json};
use serde_json::json;
use uuid::Uuid;

/// Failures of the tracker operations themselves.
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    #[error("habit {0} not found")]
    HabitNotFound(Uuid),
    #[error("record {0} not found")]
    RecordNotFound(Uuid),
    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}
