//! The OAuth App capability the router dispatches to
//!
//! The router never talks to an authorization server itself. Everything that
//! exchanges codes, checks or rotates tokens goes through an [`OAuthApp`]
//! implementation supplied by the caller.

use crate::error::OAuthAppError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Keys that carry client credentials and must never reach a response body.
const SECRET_KEYS: [&str; 2] = ["clientSecret", "client_secret"];

/// Parameters for exchanging an OAuth code for a token
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTokenOptions {
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
}

/// Parameters for operations addressed by an existing token
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenOptions {
    pub token: String,
}

/// Parameters for refreshing an expiring user token
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenOptions {
    pub refresh_token: String,
}

/// Parameters for narrowing a user token to a target and repositories
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeTokenOptions {
    pub token: String,
    /// User or organization login the token is scoped to
    pub target: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repositories: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository_ids: Option<Vec<u64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Map<String, Value>>,
}

/// Authentication object returned by the token operations.
///
/// Unknown fields are kept in `extra` so the router passes through whatever
/// the OAuth App reports.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Authentication {
    /// Always `token`
    #[serde(rename = "type")]
    pub kind: String,
    /// `oauth` for OAuth Apps, `app` for GitHub Apps
    pub token_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scopes: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token_expires_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Authentication {
    /// OAuth App user token
    pub fn oauth_token(token: impl Into<String>) -> Self {
        Self {
            kind: "token".to_string(),
            token_type: "oauth".to_string(),
            token: Some(token.into()),
            ..Default::default()
        }
    }

    /// Copy of the authentication with client credentials removed
    pub fn sanitized(&self) -> Self {
        let mut authentication = self.clone();
        authentication.client_secret = None;
        for key in SECRET_KEYS {
            authentication.extra.remove(key);
        }
        authentication
    }
}

/// Successful result of a token operation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenResult {
    /// Response data of the underlying API call, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    pub authentication: Authentication,
}

impl TokenResult {
    pub fn new(authentication: Authentication) -> Self {
        Self {
            data: None,
            authentication,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Copy of the result safe to put in a response body
    pub fn sanitized(&self) -> Self {
        Self {
            data: self.data.clone(),
            authentication: self.authentication.sanitized(),
        }
    }
}

/// Token lifecycle operations of an OAuth App.
///
/// Implementations must be shareable across concurrently handled requests.
/// Rejections carry a message and, optionally, the HTTP status to answer with.
#[async_trait]
pub trait OAuthApp: Send + Sync {
    /// Client ID used to build the login redirect
    fn client_id(&self) -> &str;

    /// Scopes requested on login when the request names none
    fn default_scopes(&self) -> &[String] {
        &[]
    }

    /// Exchange an OAuth code for a user token
    async fn create_token(&self, options: CreateTokenOptions) -> Result<TokenResult, OAuthAppError>;

    /// Check that a token is valid
    async fn check_token(&self, options: TokenOptions) -> Result<TokenResult, OAuthAppError>;

    /// Invalidate a token and issue a new one
    async fn reset_token(&self, options: TokenOptions) -> Result<TokenResult, OAuthAppError>;

    /// Obtain a new token using a refresh token
    async fn refresh_token(
        &self,
        options: RefreshTokenOptions,
    ) -> Result<TokenResult, OAuthAppError>;

    /// Create a token limited to a target and set of repositories
    async fn scope_token(&self, options: ScopeTokenOptions) -> Result<TokenResult, OAuthAppError>;

    /// Revoke a single token
    async fn delete_token(&self, options: TokenOptions) -> Result<(), OAuthAppError>;

    /// Revoke the app's authorization for the token's user, including all tokens
    async fn delete_authorization(&self, options: TokenOptions) -> Result<(), OAuthAppError>;
}
