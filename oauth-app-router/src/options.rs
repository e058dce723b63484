use crate::login::{RandomStateGenerator, StateGenerator};
use crate::render::json_response;
use crate::request::{NeutralRequest, NeutralResponse};
use crate::route::DEFAULT_PATH_PREFIX;
use serde_json::json;
use std::fmt;
use std::sync::Arc;

/// Produces the response for requests no route matches.
pub trait UnhandledRequestHandler: Send + Sync {
    fn handle(&self, request: &NeutralRequest) -> NeutralResponse;
}

impl<F> UnhandledRequestHandler for F
where
    F: Fn(&NeutralRequest) -> NeutralResponse + Send + Sync,
{
    fn handle(&self, request: &NeutralRequest) -> NeutralResponse {
        self(request)
    }
}

/// 404 with `{"error": "Unknown route: <METHOD> <path>"}`
pub fn on_unhandled_request_default(request: &NeutralRequest) -> NeutralResponse {
    let message = format!("Unknown route: {} {}", request.method, request.pathname());
    json_response(404, &json!({ "error": message }))
}

/// Per-invocation router configuration
#[derive(Clone)]
pub struct HandlerOptions {
    /// Prefix stripped before route matching
    pub path_prefix: String,
    /// Replacement for [`on_unhandled_request_default`]
    pub on_unhandled_request: Option<Arc<dyn UnhandledRequestHandler>>,
    /// Source of generated login `state` values
    pub state_generator: Arc<dyn StateGenerator>,
}

impl Default for HandlerOptions {
    fn default() -> Self {
        Self {
            path_prefix: DEFAULT_PATH_PREFIX.to_string(),
            on_unhandled_request: None,
            state_generator: Arc::new(RandomStateGenerator),
        }
    }
}

impl fmt::Debug for HandlerOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerOptions")
            .field("path_prefix", &self.path_prefix)
            .field("on_unhandled_request", &self.on_unhandled_request.is_some())
            // Skip state_generator as it doesn't implement Debug
            .finish_non_exhaustive()
    }
}

impl HandlerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_path_prefix(mut self, path_prefix: impl Into<String>) -> Self {
        self.path_prefix = path_prefix.into();
        self
    }

    pub fn with_unhandled_request_handler(
        mut self,
        handler: impl UnhandledRequestHandler + 'static,
    ) -> Self {
        self.on_unhandled_request = Some(Arc::new(handler));
        self
    }

    pub fn with_state_generator(mut self, generator: impl StateGenerator + 'static) -> Self {
        self.state_generator = Arc::new(generator);
        self
    }

    /// Run the configured unhandled-request handler, or the default one
    pub fn unhandled(&self, request: &NeutralRequest) -> NeutralResponse {
        match &self.on_unhandled_request {
            Some(handler) => handler.handle(request),
            None => on_unhandled_request_default(request),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_default_unhandled_response() {
        let response =
            on_unhandled_request_default(&NeutralRequest::new("POST", "/unknown?foo=bar"));
        assert_eq!(response.status, 404);
        let body: Value = serde_json::from_str(response.text.as_deref().unwrap()).unwrap();
        assert_eq!(body, json!({"error": "Unknown route: POST /unknown"}));
    }

    #[test]
    fn test_default_options() {
        let options = HandlerOptions::default();
        assert_eq!(options.path_prefix, "/api/github/oauth");
        assert!(options.on_unhandled_request.is_none());
    }

    #[test]
    fn test_override_handler_receives_request() {
        let options = HandlerOptions::new().with_unhandled_request_handler(
            |request: &NeutralRequest| NeutralResponse::new(418).with_text(request.url.clone()),
        );
        let response = options.unhandled(&NeutralRequest::new("GET", "/teapot"));
        assert_eq!(response.status, 418);
        assert_eq!(response.text.as_deref(), Some("/teapot"));
    }
}
