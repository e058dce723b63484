//! Standalone axum router answering every request

use crate::axum::{parse_request, send_response};
use crate::error::AdapterError;
use crate::state::OAuthAppState;
use axum::body::Body;
use axum::extract::State;
use axum::response::Response;
use axum::routing::any;
use axum::Router;
use http::Request;
use oauth_app_router::{handle_request, HandlerOptions, OAuthApp};
use std::sync::Arc;

/// Router that handles the OAuth endpoints and answers every other request
/// with the configured unhandled-request handler.
///
/// ```ignore
/// let app = oauth_router(Arc::new(my_app), HandlerOptions::default());
/// let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
/// axum::serve(listener, app).await?;
/// ```
pub fn oauth_router(app: Arc<dyn OAuthApp>, options: HandlerOptions) -> Router {
    Router::new()
        .fallback(any(handle_any))
        .with_state(OAuthAppState::new(app, options))
}

async fn handle_any(
    State(state): State<OAuthAppState>,
    request: Request<Body>,
) -> Result<Response, AdapterError> {
    let request = parse_request(request).await?;
    let response = handle_request(state.app.as_ref(), &state.options, &request).await;
    send_response(response)
}

#[cfg(test)]
mod tests {
    use crate::test_utils::TestFixture;
    use http::{Method, StatusCode};
    use oauth_app_router::{
        Authentication, HandlerOptions, MockOAuthApp, NeutralRequest, NeutralResponse,
        RecordedCall, TokenOptions, TokenResult,
    };
    use serde_json::json;

    fn app_with_result() -> MockOAuthApp {
        MockOAuthApp::new("0123").with_result(TokenResult::new(Authentication::oauth_token("token123")))
    }

    #[tokio::test]
    async fn test_login_redirect() {
        let fixture = TestFixture::router(MockOAuthApp::new("0123"), HandlerOptions::default());
        let response = fixture
            .get("/api/github/oauth/login?state=state123&scopes=repo")
            .await;

        response.assert_status(StatusCode::FOUND);
        response.assert_header(
            "location",
            "https://github.com/login/oauth/authorize?client_id=0123&state=state123&scope=repo",
        );
    }

    #[tokio::test]
    async fn test_check_token() {
        let fixture = TestFixture::router(app_with_result(), HandlerOptions::default());
        let response = fixture
            .send_with_headers(
                Method::GET,
                "/api/github/oauth/token",
                None,
                &[("Authorization", "token token123")],
            )
            .await;

        response.assert_ok();
        response.assert_header("access-control-allow-origin", "*");
        assert_eq!(
            response.json,
            json!({"authentication": {"type": "token", "tokenType": "oauth", "token": "token123"}})
        );
        assert_eq!(
            fixture.app.calls(),
            vec![RecordedCall::CheckToken(TokenOptions {
                token: "token123".to_string()
            })]
        );
    }

    #[tokio::test]
    async fn test_create_token_with_invalid_json() {
        let fixture = TestFixture::router(app_with_result(), HandlerOptions::default());
        let response = fixture
            .send_with_headers(Method::POST, "/api/github/oauth/token", Some("foo"), &[])
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json, json!({"error": "request error"}));
        assert!(fixture.app.calls().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let fixture = TestFixture::router(MockOAuthApp::new("0123"), HandlerOptions::default());
        let response = fixture.get("/unknown").await;

        response.assert_status(StatusCode::NOT_FOUND);
        assert_eq!(response.json, json!({"error": "Unknown route: GET /unknown"}));
    }

    #[tokio::test]
    async fn test_unknown_route_with_custom_handler() {
        let options = HandlerOptions::new().with_unhandled_request_handler(
            |request: &NeutralRequest| {
                NeutralResponse::new(200)
                    .with_header("content-type", "application/json")
                    .with_text(json!({"handled": request.pathname()}).to_string())
            },
        );
        let fixture = TestFixture::router(MockOAuthApp::new("0123"), options);
        let response = fixture.get("/elsewhere").await;

        response.assert_ok();
        assert_eq!(response.json, json!({"handled": "/elsewhere"}));
    }
}
