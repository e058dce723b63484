use oauth_app_router::{HandlerOptions, OAuthApp};
use std::fmt;
use std::sync::Arc;

/// Shared state of the axum router and middleware
#[derive(Clone)]
pub struct OAuthAppState {
    pub app: Arc<dyn OAuthApp>,
    pub options: Arc<HandlerOptions>,
}

impl OAuthAppState {
    pub fn new(app: Arc<dyn OAuthApp>, options: HandlerOptions) -> Self {
        Self {
            app,
            options: Arc::new(options),
        }
    }
}

impl fmt::Debug for OAuthAppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthAppState")
            .field("client_id", &self.app.client_id())
            .field("options", &self.options)
            .finish()
    }
}
