//! Middleware that serves the OAuth endpoints in front of an existing router

use crate::axum::{parse_request, send_response};
use crate::state::OAuthAppState;
use axum::body::Body;
use axum::extract::State;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use http::Request;
use oauth_app_router::{match_route, route_request, NeutralRequest};

/// Answer requests for the OAuth endpoints and pass everything else to `next`.
///
/// Route matching only looks at the method and path, so requests for other
/// routes reach `next` with their body untouched.
///
/// ```ignore
/// let state = OAuthAppState::new(Arc::new(my_app), HandlerOptions::default());
/// let app = Router::new()
///     .route("/", get(index))
///     .layer(middleware::from_fn_with_state(state, oauth_middleware));
/// ```
pub async fn oauth_middleware(
    State(state): State<OAuthAppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    // Resolve the path the way the router does so both agree on what matches
    let method = request.method().as_str();
    let pathname = NeutralRequest::new(method, request.uri().to_string()).pathname();
    if match_route(method, &pathname, &state.options.path_prefix).is_none() {
        return next.run(request).await;
    }

    let request = match parse_request(request).await {
        Ok(request) => request,
        Err(e) => return e.into_response(),
    };

    let response = match route_request(state.app.as_ref(), &state.options, &request).await {
        Some(response) => response,
        None => state.options.unhandled(&request),
    };

    match send_response(response) {
        Ok(response) => response,
        Err(e) => e.into_response(),
    }
}
