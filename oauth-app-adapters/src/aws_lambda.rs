//! AWS Lambda behind an API Gateway HTTP API (payload format 2.0)

use crate::error::AdapterError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use oauth_app_router::{handle_request, HandlerOptions, NeutralRequest, NeutralResponse, OAuthApp};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::HashMap;

/// Incoming API Gateway v2 proxy event. Only the fields the router reads are modelled.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiGatewayV2Event {
    pub raw_path: String,
    #[serde(default)]
    pub raw_query_string: String,
    #[serde(default)]
    pub headers: HashMap<String, String>,
    #[serde(default)]
    pub cookies: Option<Vec<String>>,
    pub request_context: ApiGatewayV2RequestContext,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub is_base64_encoded: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiGatewayV2RequestContext {
    pub http: ApiGatewayV2Http,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiGatewayV2Http {
    pub method: String,
}

/// Structured result returned to API Gateway
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiGatewayV2Result {
    pub status_code: u16,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub headers: HashMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    pub is_base64_encoded: bool,
}

/// Build a [`NeutralRequest`] from an API Gateway v2 event.
///
/// Base64-encoded bodies are decoded; cookies travel as a `cookie` header.
pub fn parse_request(event: ApiGatewayV2Event) -> Result<NeutralRequest, AdapterError> {
    let url = if event.raw_query_string.is_empty() {
        event.raw_path
    } else {
        format!("{}?{}", event.raw_path, event.raw_query_string)
    };

    let body = match event.body {
        Some(body) if event.is_base64_encoded => {
            let bytes = STANDARD
                .decode(body)
                .map_err(|e| AdapterError::BodyRead(e.to_string()))?;
            Some(String::from_utf8(bytes).map_err(|e| AdapterError::BodyRead(e.to_string()))?)
        }
        body => body,
    };

    let mut headers = event.headers;
    if let Some(cookies) = event.cookies.filter(|cookies| !cookies.is_empty()) {
        headers.insert("cookie".to_string(), cookies.join("; "));
    }

    Ok(NeutralRequest {
        method: event.request_context.http.method,
        url,
        headers,
        body,
    })
}

pub fn send_response(response: NeutralResponse) -> ApiGatewayV2Result {
    ApiGatewayV2Result {
        status_code: response.status,
        headers: response.headers,
        body: response.text,
        is_base64_encoded: false,
    }
}

/// Handle an API Gateway v2 event. Requests no route matches get the
/// configured unhandled-request response.
pub async fn handle_api_gateway_v2_event(
    app: &dyn OAuthApp,
    options: &HandlerOptions,
    event: ApiGatewayV2Event,
) -> ApiGatewayV2Result {
    let request = match parse_request(event) {
        Ok(request) => request,
        Err(e) => {
            log::error!("Failed to parse API Gateway event: {}", e);
            return ApiGatewayV2Result {
                status_code: e.status_code().as_u16(),
                headers: HashMap::from([(
                    "content-type".to_string(),
                    "application/json".to_string(),
                )]),
                body: Some(json!({ "error": e.to_string() }).to_string()),
                is_base64_encoded: false,
            };
        }
    };

    send_response(handle_request(app, options, &request).await)
}
