//! Per-route parameter extraction and validation
//!
//! Each routed request is turned into an [`Operation`] holding exactly the
//! inputs its OAuth App call needs. Anything missing or malformed becomes a
//! [`RequestError`] and the request is answered without touching the app.

use crate::app::{CreateTokenOptions, RefreshTokenOptions, ScopeTokenOptions, TokenOptions};
use crate::error::RequestError;
use crate::request::NeutralRequest;
use crate::route::Route;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Authorization schemes accepted in front of a token.
const TOKEN_SCHEMES: [&str; 2] = ["token", "bearer"];

/// Inputs for the login redirect
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginParameters {
    pub state: Option<String>,
    /// Comma-separated scope list, passed through as given
    pub scopes: Option<String>,
    pub redirect_url: Option<String>,
    pub allow_signup: Option<bool>,
}

/// A validated request, ready for dispatch
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    Login(LoginParameters),
    Callback(CreateTokenOptions),
    Preflight,
    CreateToken(CreateTokenOptions),
    CheckToken(TokenOptions),
    ScopeToken(ScopeTokenOptions),
    RefreshToken(RefreshTokenOptions),
    ResetToken(TokenOptions),
    DeleteToken(TokenOptions),
    DeleteGrant(TokenOptions),
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateTokenBody {
    code: Option<String>,
    redirect_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RefreshTokenBody {
    refresh_token: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScopeTokenBody {
    target: Option<String>,
    repositories: Option<Vec<String>>,
    repository_ids: Option<Vec<u64>>,
    permissions: Option<Map<String, Value>>,
}

/// Extract and validate the inputs of `route` from `request`.
///
/// The JSON body is checked first, then the `Authorization` header, then
/// route-specific fields.
pub fn extract(route: Route, request: &NeutralRequest) -> Result<Operation, RequestError> {
    let body = if route.reads_json_body() {
        parse_json_body(request.body.as_deref())?
    } else {
        Map::new()
    };

    let token = if route.requires_authorization() {
        Some(authorization_token(request)?)
    } else {
        None
    };

    match (route, token) {
        (Route::GetLogin, _) => Ok(Operation::Login(login_parameters(&request.query()))),
        (Route::GetCallback, _) => callback_parameters(&request.query()).map(Operation::Callback),
        (Route::Preflight, _) => Ok(Operation::Preflight),
        (Route::CreateToken, _) => {
            let body: CreateTokenBody = from_body(body)?;
            let code = non_empty(body.code).ok_or(RequestError::MissingCode)?;
            Ok(Operation::CreateToken(CreateTokenOptions {
                code,
                state: None,
                redirect_url: non_empty(body.redirect_url),
            }))
        }
        (Route::RefreshToken, Some(_)) => {
            let body: RefreshTokenBody = from_body(body)?;
            let refresh_token =
                non_empty(body.refresh_token).ok_or(RequestError::MissingRefreshToken)?;
            Ok(Operation::RefreshToken(RefreshTokenOptions { refresh_token }))
        }
        (Route::ScopeToken, Some(token)) => {
            let body: ScopeTokenBody = from_body(body)?;
            let target = non_empty(body.target).ok_or(RequestError::MissingTarget)?;
            Ok(Operation::ScopeToken(ScopeTokenOptions {
                token,
                target,
                repositories: body.repositories,
                repository_ids: body.repository_ids,
                permissions: body.permissions,
            }))
        }
        (Route::CheckToken, Some(token)) => Ok(Operation::CheckToken(TokenOptions { token })),
        (Route::ResetToken, Some(token)) => Ok(Operation::ResetToken(TokenOptions { token })),
        (Route::DeleteToken, Some(token)) => Ok(Operation::DeleteToken(TokenOptions { token })),
        (Route::DeleteGrant, Some(token)) => Ok(Operation::DeleteGrant(TokenOptions { token })),
        (_, None) => Err(RequestError::MissingAuthorization),
    }
}

/// Parse the request body as a JSON object. An absent or empty body is `{}`.
fn parse_json_body(text: Option<&str>) -> Result<Map<String, Value>, RequestError> {
    let text = match text {
        Some(text) if !text.trim().is_empty() => text,
        _ => return Ok(Map::new()),
    };

    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(RequestError::InvalidBody),
        Err(e) => {
            log::debug!("Failed to parse request body as JSON: {}", e);
            Err(RequestError::InvalidBody)
        }
    }
}

fn from_body<T: DeserializeOwned>(body: Map<String, Value>) -> Result<T, RequestError> {
    serde_json::from_value(Value::Object(body)).map_err(|e| {
        log::debug!("Request body has unexpected shape: {}", e);
        RequestError::InvalidBody
    })
}

/// Token from an `Authorization: token <T>` or `Authorization: bearer <T>` header
fn authorization_token(request: &NeutralRequest) -> Result<String, RequestError> {
    let header = request
        .header("authorization")
        .ok_or(RequestError::MissingAuthorization)?;

    let (scheme, token) = header
        .trim()
        .split_once(char::is_whitespace)
        .ok_or(RequestError::MissingAuthorization)?;

    if !TOKEN_SCHEMES
        .iter()
        .any(|accepted| scheme.eq_ignore_ascii_case(accepted))
    {
        log::warn!("Unsupported Authorization scheme: {}", scheme);
        return Err(RequestError::MissingAuthorization);
    }

    non_empty(Some(token.trim().to_string())).ok_or(RequestError::MissingAuthorization)
}

fn login_parameters(query: &HashMap<String, String>) -> LoginParameters {
    LoginParameters {
        state: non_empty(query.get("state").cloned()),
        scopes: non_empty(query.get("scopes").cloned()),
        redirect_url: non_empty(query.get("redirectUrl").cloned()),
        allow_signup: query.get("allowSignup").map(|value| value == "true"),
    }
}

fn callback_parameters(query: &HashMap<String, String>) -> Result<CreateTokenOptions, RequestError> {
    if let Some(error) = non_empty(query.get("error").cloned()) {
        return Err(RequestError::Callback {
            error,
            description: non_empty(query.get("error_description").cloned()),
        });
    }

    let code = non_empty(query.get("code").cloned()).ok_or(RequestError::MissingCode)?;
    Ok(CreateTokenOptions {
        code,
        state: non_empty(query.get("state").cloned()),
        redirect_url: None,
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}
