//! # oauth-app-router
//!
//! Platform-agnostic request handling for the server side of an OAuth App
//! web flow.
//!
//! ## Components
//!
//! - **Request model:** neutral request/response records platform adapters convert to and from.
//! - **Routing:** a fixed table of the login, callback and token lifecycle endpoints.
//! - **Dispatch:** parameter validation, one call into the [`OAuthApp`], response rendering.
//!
//! ## Endpoints
//!
//! Below the path prefix (default `/api/github/oauth`):
//!
//! | Route | OAuth App call |
//! |---|---|
//! | `GET login` | redirect to the authorize URL |
//! | `GET callback` | `create_token` |
//! | `OPTIONS token` | none (CORS pre-flight) |
//! | `POST token` | `create_token` |
//! | `GET token` | `check_token` |
//! | `POST token/scoped` | `scope_token` |
//! | `PATCH refresh-token` | `refresh_token` |
//! | `PATCH token` | `reset_token` |
//! | `DELETE token` | `delete_token` |
//! | `DELETE grant` | `delete_authorization` |

pub mod app;
pub mod error;
pub mod extract;
pub mod handler;
pub mod login;
pub mod mock_app;
pub mod options;
mod render;
pub mod request;
pub mod route;

pub use crate::app::{
    Authentication, CreateTokenOptions, OAuthApp, RefreshTokenOptions, ScopeTokenOptions,
    TokenOptions, TokenResult,
};
pub use crate::error::{HandlerError, OAuthAppError, RequestError};
pub use crate::handler::{handle_request, route_request};
pub use crate::login::{RandomStateGenerator, StateGenerator};
pub use crate::mock_app::{MockOAuthApp, RecordedCall};
pub use crate::options::{on_unhandled_request_default, HandlerOptions, UnhandledRequestHandler};
pub use crate::request::{NeutralRequest, NeutralResponse};
pub use crate::route::{match_route, Route, DEFAULT_PATH_PREFIX};
