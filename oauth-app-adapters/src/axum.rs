//! Conversion between axum requests/responses and the neutral records

use crate::error::AdapterError;
use axum::body::{to_bytes, Body};
use axum::response::Response;
use http::header::{HeaderMap, HeaderName, HeaderValue};
use http::{Request, StatusCode};
use oauth_app_router::{NeutralRequest, NeutralResponse};
use std::collections::HashMap;

/// Largest request body read into a [`NeutralRequest`]
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Drain an axum request into a [`NeutralRequest`].
///
/// An empty body becomes `None`. Repeated headers are joined with `", "`.
pub async fn parse_request(request: Request<Body>) -> Result<NeutralRequest, AdapterError> {
    let (parts, body) = request.into_parts();

    let bytes = to_bytes(body, MAX_BODY_BYTES)
        .await
        .map_err(|e| AdapterError::BodyRead(e.to_string()))?;
    let body = if bytes.is_empty() {
        None
    } else {
        let text =
            String::from_utf8(bytes.to_vec()).map_err(|e| AdapterError::BodyRead(e.to_string()))?;
        Some(text)
    };

    Ok(NeutralRequest {
        method: parts.method.to_string(),
        url: parts.uri.to_string(),
        headers: headers_to_map(&parts.headers),
        body,
    })
}

pub(crate) fn headers_to_map(headers: &HeaderMap) -> HashMap<String, String> {
    let mut map: HashMap<String, String> = HashMap::new();
    for (name, value) in headers {
        let Ok(value) = value.to_str() else {
            log::warn!("Skipping header {} with non-visible ASCII value", name);
            continue;
        };
        map.entry(name.as_str().to_string())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(value);
            })
            .or_insert_with(|| value.to_string());
    }
    map
}

/// Build the axum response for a [`NeutralResponse`]
pub fn send_response(response: NeutralResponse) -> Result<Response, AdapterError> {
    let status = StatusCode::from_u16(response.status)
        .map_err(|_| AdapterError::InvalidStatus(response.status))?;

    let body = match response.text {
        Some(text) => Body::from(text),
        None => Body::empty(),
    };
    let mut resp = Response::new(body);
    *resp.status_mut() = status;

    for (name, value) in response.headers {
        let header_name =
            HeaderName::from_bytes(name.as_bytes()).map_err(|e| AdapterError::InvalidHeader {
                name: name.clone(),
                reason: e.to_string(),
            })?;
        let header_value = HeaderValue::from_str(&value).map_err(|e| AdapterError::InvalidHeader {
            name: name.clone(),
            reason: e.to_string(),
        })?;
        resp.headers_mut().insert(header_name, header_value);
    }

    Ok(resp)
}
