use crate::render::json_response;
use crate::request::NeutralResponse;
use serde_json::json;
use thiserror::Error;

const BAD_REQUEST: u16 = 400;
const INTERNAL_SERVER_ERROR: u16 = 500;

/// A request that cannot be dispatched because an input is missing or malformed.
///
/// Always answered with 400 before the OAuth App is called.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("\"Authorization\" header is required")]
    MissingAuthorization,
    #[error("\"code\" parameter is required")]
    MissingCode,
    #[error("\"target\" parameter is required")]
    MissingTarget,
    #[error("refreshToken must be sent in request body")]
    MissingRefreshToken,
    /// Body is not a JSON object or a field has the wrong type
    #[error("request error")]
    InvalidBody,
    /// The authorization server redirected back with an error
    #[error("{}", callback_message(.error, .description))]
    Callback {
        error: String,
        description: Option<String>,
    },
}

fn callback_message(error: &str, description: &Option<String>) -> String {
    match description {
        Some(description) => format!("{error} {description}"),
        None => error.to_string(),
    }
}

/// Rejection reported by an [`OAuthApp`](crate::OAuthApp) operation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct OAuthAppError {
    pub message: String,
    /// Status to answer with; 500 when absent
    pub status: Option<u16>,
}

impl OAuthAppError {
    /// Create an error without a status
    pub fn new<S: ToString>(message: S) -> Self {
        Self {
            message: message.to_string(),
            status: None,
        }
    }

    /// Create an error answered with the given status
    pub fn with_status<S: ToString>(message: S, status: u16) -> Self {
        Self {
            message: message.to_string(),
            status: Some(status),
        }
    }
}

/// Any failure while handling a routed request
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandlerError {
    #[error(transparent)]
    Request(#[from] RequestError),
    #[error(transparent)]
    App(#[from] OAuthAppError),
    /// Failure inside the router itself
    #[error("{0}")]
    Internal(String),
}

impl HandlerError {
    /// HTTP status of the error response
    pub fn status(&self) -> u16 {
        match self {
            HandlerError::Request(_) => BAD_REQUEST,
            HandlerError::App(err) => err
                .status
                .filter(|status| (400..600).contains(status))
                .unwrap_or(INTERNAL_SERVER_ERROR),
            HandlerError::Internal(_) => INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<HandlerError> for NeutralResponse {
    fn from(err: HandlerError) -> Self {
        json_response(err.status(), &json!({ "error": err.to_string() }))
    }
}
