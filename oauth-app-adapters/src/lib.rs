//! Platform adapters for `oauth-app-router`.
//!
//! - [`axum`](crate::axum): request/response conversion for axum and `http` types
//! - [`oauth_middleware`]: serves the OAuth endpoints in front of an existing router
//! - [`oauth_router`]: standalone router that answers every request
//! - [`aws_lambda`]: API Gateway HTTP API (payload format 2.0) events

pub mod aws_lambda;
pub mod axum;
pub mod config;
pub mod error;
pub mod middleware;
pub mod router;
pub mod state;
#[cfg(test)]
pub(crate) mod test_utils;

pub use crate::aws_lambda::{handle_api_gateway_v2_event, ApiGatewayV2Event, ApiGatewayV2Result};
pub use crate::config::RouterConfig;
pub use crate::error::AdapterError;
pub use crate::middleware::oauth_middleware;
pub use crate::router::oauth_router;
pub use crate::state::OAuthAppState;
