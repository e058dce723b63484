//! Turning operation outcomes into neutral responses

use crate::app::{Authentication, TokenResult};
use crate::request::NeutralResponse;
use serde::Serialize;

pub(crate) const CONTENT_TYPE: &str = "content-type";
pub(crate) const APPLICATION_JSON: &str = "application/json";
const ACCESS_CONTROL_ALLOW_ORIGIN: &str = "access-control-allow-origin";
const ACCESS_CONTROL_ALLOW_METHODS: &str = "access-control-allow-methods";
const ACCESS_CONTROL_ALLOW_HEADERS: &str = "access-control-allow-headers";
const ALLOWED_HEADERS: &str = "Content-Type, User-Agent, Authorization";

/// JSON response with CORS enabled for any origin
pub(crate) fn json_response<T: Serialize>(status: u16, body: &T) -> NeutralResponse {
    let text = match serde_json::to_string(body) {
        Ok(text) => text,
        Err(e) => {
            log::error!("Failed to serialize response body: {}", e);
            return NeutralResponse::new(500)
                .with_header(CONTENT_TYPE, APPLICATION_JSON)
                .with_text(r#"{"error":"response serialization failed"}"#);
        }
    };

    NeutralResponse::new(status)
        .with_header(CONTENT_TYPE, APPLICATION_JSON)
        .with_header(ACCESS_CONTROL_ALLOW_ORIGIN, "*")
        .with_text(text)
}

/// Token operation result with client credentials stripped
pub(crate) fn token_response(status: u16, result: &TokenResult) -> NeutralResponse {
    json_response(status, &result.sanitized())
}

/// Result of a code exchange: only the authentication, with client credentials stripped
pub(crate) fn authentication_response(status: u16, result: &TokenResult) -> NeutralResponse {
    #[derive(Serialize)]
    struct AuthenticationBody {
        authentication: Authentication,
    }

    json_response(
        status,
        &AuthenticationBody {
            authentication: result.authentication.sanitized(),
        },
    )
}

/// Body-less success, e.g. after a revocation
pub(crate) fn no_content() -> NeutralResponse {
    NeutralResponse::new(204).with_header(ACCESS_CONTROL_ALLOW_ORIGIN, "*")
}

pub(crate) fn redirect(location: &str) -> NeutralResponse {
    NeutralResponse::new(302).with_header("location", location)
}

/// Answer to the CORS pre-flight request
pub(crate) fn preflight() -> NeutralResponse {
    NeutralResponse::new(200)
        .with_header(ACCESS_CONTROL_ALLOW_ORIGIN, "*")
        .with_header(ACCESS_CONTROL_ALLOW_METHODS, "*")
        .with_header(ACCESS_CONTROL_ALLOW_HEADERS, ALLOWED_HEADERS)
}
