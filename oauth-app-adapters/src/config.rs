//! Router configuration

use confique::Config;
use oauth_app_router::{HandlerOptions, DEFAULT_PATH_PREFIX};

/// Configuration shared by the platform adapters
#[derive(Debug, Config, Clone)]
pub struct RouterConfig {
    /// Path prefix of the OAuth endpoints (default: /api/github/oauth)
    #[config(env = "OAUTH_APP_PATH_PREFIX", default = "/api/github/oauth")]
    pub path_prefix: String,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            path_prefix: DEFAULT_PATH_PREFIX.to_string(),
        }
    }
}

impl RouterConfig {
    /// Load the configuration from environment variables, falling back to defaults
    pub fn load() -> Result<Self, confique::Error> {
        Self::builder().env().load()
    }
}

impl From<RouterConfig> for HandlerOptions {
    fn from(config: RouterConfig) -> Self {
        HandlerOptions::new().with_path_prefix(config.path_prefix)
    }
}
