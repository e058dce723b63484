use axum::response::IntoResponse;
use axum::Json;
use http::StatusCode;
use serde_json::json;
use thiserror::Error;

/// Failure converting between a platform request/response and the neutral records
#[derive(Debug, Error)]
pub enum AdapterError {
    /// The request body could not be read or is not UTF-8
    #[error("failed to read request body: {0}")]
    BodyRead(String),
    /// The response carries a status the platform cannot represent
    #[error("invalid response status: {0}")]
    InvalidStatus(u16),
    /// The response carries a header name or value the platform rejects
    #[error("invalid response header {name:?}: {reason}")]
    InvalidHeader { name: String, reason: String },
}

impl AdapterError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AdapterError::BodyRead(_) => StatusCode::BAD_REQUEST,
            AdapterError::InvalidStatus(_) | AdapterError::InvalidHeader { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AdapterError {
    fn into_response(self) -> axum::response::Response {
        log::error!("{}", self);
        let body = json!({
            "error": self.to_string(),
        });
        (self.status_code(), Json(body)).into_response()
    }
}
