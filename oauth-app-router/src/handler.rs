//! Request dispatch
//!
//! [`handle_request`] is the single entry point platform adapters call. It
//! matches the route, extracts the inputs, awaits exactly one OAuth App call
//! and renders the outcome. Every path ends in a [`NeutralResponse`].

use crate::app::OAuthApp;
use crate::error::HandlerError;
use crate::extract::{extract, Operation};
use crate::login::authorization_url;
use crate::options::HandlerOptions;
use crate::render;
use crate::request::{NeutralRequest, NeutralResponse};
use crate::route::{match_route, Route};
use log::{debug, error, warn};

/// Handle a request, falling back to the unhandled-request handler when no
/// route matches.
pub async fn handle_request(
    app: &dyn OAuthApp,
    options: &HandlerOptions,
    request: &NeutralRequest,
) -> NeutralResponse {
    match route_request(app, options, request).await {
        Some(response) => response,
        None => {
            debug!("No route for {} {}", request.method, request.pathname());
            options.unhandled(request)
        }
    }
}

/// Handle a request if it matches a route. `None` means the request is not
/// ours and the caller decides what to answer.
pub async fn route_request(
    app: &dyn OAuthApp,
    options: &HandlerOptions,
    request: &NeutralRequest,
) -> Option<NeutralResponse> {
    let route = match_route(&request.method, &request.pathname(), &options.path_prefix)?;
    debug!("Routing {} {} to {}", request.method, request.pathname(), route);

    let response = match dispatch(app, options, route, request).await {
        Ok(response) => response,
        Err(err) => {
            match &err {
                HandlerError::Request(err) => warn!("Rejected {} request: {}", route, err),
                HandlerError::App(err) => error!("OAuth App failed on {}: {}", route, err),
                HandlerError::Internal(err) => error!("Failed to handle {}: {}", route, err),
            }
            NeutralResponse::from(err)
        }
    };
    Some(response)
}

async fn dispatch(
    app: &dyn OAuthApp,
    options: &HandlerOptions,
    route: Route,
    request: &NeutralRequest,
) -> Result<NeutralResponse, HandlerError> {
    let response = match extract(route, request)? {
        Operation::Preflight => render::preflight(),
        Operation::Login(parameters) => {
            let url = authorization_url(app, &parameters, options.state_generator.as_ref())
                .map_err(|e| HandlerError::Internal(format!("invalid authorization URL: {e}")))?;
            render::redirect(url.as_str())
        }
        Operation::Callback(create) => {
            let result = app.create_token(create).await?;
            render::authentication_response(200, &result)
        }
        Operation::CreateToken(create) => {
            let result = app.create_token(create).await?;
            render::authentication_response(201, &result)
        }
        Operation::CheckToken(token) => {
            let result = app.check_token(token).await?;
            render::token_response(200, &result)
        }
        Operation::ScopeToken(scope) => {
            let result = app.scope_token(scope).await?;
            render::token_response(200, &result)
        }
        Operation::RefreshToken(refresh) => {
            let result = app.refresh_token(refresh).await?;
            render::token_response(200, &result)
        }
        Operation::ResetToken(token) => {
            let result = app.reset_token(token).await?;
            render::token_response(200, &result)
        }
        Operation::DeleteToken(token) => {
            app.delete_token(token).await?;
            render::no_content()
        }
        Operation::DeleteGrant(token) => {
            app.delete_authorization(token).await?;
            render::no_content()
        }
    };
    Ok(response)
}
