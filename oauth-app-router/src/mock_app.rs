use crate::app::{
    CreateTokenOptions, OAuthApp, RefreshTokenOptions, ScopeTokenOptions, TokenOptions,
    TokenResult,
};
use crate::error::OAuthAppError;
use async_trait::async_trait;
use std::sync::{Mutex, MutexGuard};

/// A call received by [`MockOAuthApp`]
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    CreateToken(CreateTokenOptions),
    CheckToken(TokenOptions),
    ResetToken(TokenOptions),
    RefreshToken(RefreshTokenOptions),
    ScopeToken(ScopeTokenOptions),
    DeleteToken(TokenOptions),
    DeleteAuthorization(TokenOptions),
}

/// An in-memory OAuth App that records every call and answers with a canned outcome.
///
/// Token operations fail until a result is configured; delete operations
/// succeed unless an error is configured.
#[derive(Debug)]
pub struct MockOAuthApp {
    client_id: String,
    default_scopes: Vec<String>,
    result: Option<TokenResult>,
    error: Option<OAuthAppError>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockOAuthApp {
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            default_scopes: Vec::new(),
            result: None,
            error: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_default_scopes(mut self, scopes: &[&str]) -> Self {
        self.default_scopes = scopes.iter().map(|scope| scope.to_string()).collect();
        self
    }

    /// Answer token operations with `result`
    pub fn with_result(mut self, result: TokenResult) -> Self {
        self.result = Some(result);
        self
    }

    /// Reject every operation with `error`
    pub fn with_error(mut self, error: OAuthAppError) -> Self {
        self.error = Some(error);
        self
    }

    /// Calls received so far, oldest first
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<RecordedCall>> {
        // a panicking test thread must not hide the calls from the others
        self.calls.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn record(&self, call: RecordedCall) {
        self.lock().push(call);
    }

    fn token_outcome(&self) -> Result<TokenResult, OAuthAppError> {
        if let Some(error) = &self.error {
            return Err(error.clone());
        }
        self.result
            .clone()
            .ok_or_else(|| OAuthAppError::new("MockOAuthApp has no result configured"))
    }

    fn delete_outcome(&self) -> Result<(), OAuthAppError> {
        match &self.error {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl OAuthApp for MockOAuthApp {
    fn client_id(&self) -> &str {
        &self.client_id
    }

    fn default_scopes(&self) -> &[String] {
        &self.default_scopes
    }

    async fn create_token(&self, options: CreateTokenOptions) -> Result<TokenResult, OAuthAppError> {
        self.record(RecordedCall::CreateToken(options));
        self.token_outcome()
    }

    async fn check_token(&self, options: TokenOptions) -> Result<TokenResult, OAuthAppError> {
        self.record(RecordedCall::CheckToken(options));
        self.token_outcome()
    }

    async fn reset_token(&self, options: TokenOptions) -> Result<TokenResult, OAuthAppError> {
        self.record(RecordedCall::ResetToken(options));
        self.token_outcome()
    }

    async fn refresh_token(
        &self,
        options: RefreshTokenOptions,
    ) -> Result<TokenResult, OAuthAppError> {
        self.record(RecordedCall::RefreshToken(options));
        self.token_outcome()
    }

    async fn scope_token(&self, options: ScopeTokenOptions) -> Result<TokenResult, OAuthAppError> {
        self.record(RecordedCall::ScopeToken(options));
        self.token_outcome()
    }

    async fn delete_token(&self, options: TokenOptions) -> Result<(), OAuthAppError> {
        self.record(RecordedCall::DeleteToken(options));
        self.delete_outcome()
    }

    async fn delete_authorization(&self, options: TokenOptions) -> Result<(), OAuthAppError> {
        self.record(RecordedCall::DeleteAuthorization(options));
        self.delete_outcome()
    }
}
