use crate::middleware::oauth_middleware;
use crate::router::oauth_router;
use crate::state::OAuthAppState;
use axum::body::Body;
use axum::routing::{get, post};
use axum::{middleware, Json, Router};
use http::{HeaderMap, Method, Request, StatusCode, Uri};
use http_body_util::BodyExt;
use log::LevelFilter;
use oauth_app_router::{HandlerOptions, MockOAuthApp};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

/// Test fixture wrapping an axum router around a [`MockOAuthApp`].
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_endpoint() {
///     let fixture = TestFixture::router(MockOAuthApp::new("0123"), HandlerOptions::default());
///
///     let response = fixture.get("/api/github/oauth/login").await;
///
///     response.assert_status(StatusCode::FOUND);
///     assert!(fixture.app.calls().is_empty());
/// }
/// ```
pub struct TestFixture {
    /// The router under test
    pub router: Router,
    /// The OAuth App the router dispatches to
    pub app: Arc<MockOAuthApp>,
}

impl TestFixture {
    /// Fixture for the standalone [`oauth_router`]
    pub fn router(app: MockOAuthApp, options: HandlerOptions) -> Self {
        Self::setup_logger(LevelFilter::Debug);
        let app = Arc::new(app);
        let router = oauth_router(app.clone(), options);
        Self { router, app }
    }

    /// Fixture for [`oauth_middleware`] layered over a small downstream router.
    ///
    /// Downstream answers `GET /` with `{"next": "index"}`, echoes the body of
    /// `POST /echo` and answers anything else with 404 `{"next": <path>}`.
    pub fn middleware(app: MockOAuthApp, options: HandlerOptions) -> Self {
        Self::setup_logger(LevelFilter::Debug);
        let app = Arc::new(app);
        let state = OAuthAppState::new(app.clone(), options);

        let router = Router::new()
            .route("/", get(|| async { Json(json!({"next": "index"})) }))
            .route("/echo", post(|body: String| async move { body }))
            .fallback(|uri: Uri| async move {
                (StatusCode::NOT_FOUND, Json(json!({"next": uri.path()})))
            })
            .layer(middleware::from_fn_with_state(state, oauth_middleware));

        Self { router, app }
    }

    /// Initializes the test logger with the given level.
    pub fn setup_logger(level: LevelFilter) {
        let _ = env_logger::builder()
            .filter_level(level)
            .is_test(true)
            .try_init();
    }

    /// Sends a GET request without headers.
    pub async fn get(&self, uri: impl AsRef<str>) -> TestResponse {
        self.send_with_headers(Method::GET, uri, None, &[]).await
    }

    /// Sends a request with an optional raw body and custom headers.
    pub async fn send_with_headers(
        &self,
        method: Method,
        uri: impl AsRef<str>,
        body: Option<&str>,
        headers: &[(&str, &str)],
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri.as_ref());
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }

        let body = match body {
            Some(body) => Body::from(body.to_string()),
            None => Body::empty(),
        };
        let request = builder.body(body).expect("Failed to build request");

        self.send(request).await
    }

    /// Sends a request and returns a TestResponse.
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read response body")
            .to_bytes();

        let text = String::from_utf8_lossy(&body).to_string();
        // Defaults to an empty object if parsing fails or the body is empty
        let json = if !body.is_empty() {
            serde_json::from_slice(&body).unwrap_or_else(|_| json!({}))
        } else {
            json!({})
        };

        TestResponse {
            status,
            headers,
            text,
            json,
        }
    }
}

/// Response from a test request with convenient access to status, headers and body.
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Raw response body
    pub text: String,
    /// Response body as JSON (if present and valid JSON)
    pub json: Value,
}

impl TestResponse {
    /// Asserts that the response has the expected status code.
    ///
    /// # Panics
    ///
    /// Panics if the status code doesn't match the expected value.
    pub fn assert_status(&self, expected: StatusCode) -> &Self {
        assert_eq!(
            self.status, expected,
            "Expected status {} but got {} with body: {}",
            expected, self.status, self.text
        );
        self
    }

    /// Asserts that the response status is OK (200).
    pub fn assert_ok(&self) -> &Self {
        self.assert_status(StatusCode::OK)
    }

    /// Asserts that the response carries a header with the expected value.
    pub fn assert_header(&self, name: &str, expected: &str) -> &Self {
        let value = self
            .headers
            .get(name)
            .unwrap_or_else(|| panic!("Missing header {name}"))
            .to_str()
            .expect("Header value is not ASCII");
        assert_eq!(value, expected, "Unexpected value for header {name}");
        self
    }
}
