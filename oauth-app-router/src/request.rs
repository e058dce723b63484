//! Platform-independent request and response records

use std::collections::HashMap;
use url::Url;

/// Base used to resolve path-relative request URLs.
const RELATIVE_URL_BASE: &str = "http://localhost";

/// An HTTP request as handed over by a platform adapter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NeutralRequest {
    /// HTTP method, e.g. `GET`
    pub method: String,
    /// Absolute or path-relative URL; only path and query are consulted
    pub url: String,
    /// Request headers
    pub headers: HashMap<String, String>,
    /// Request body, if any
    pub body: Option<String>,
}

impl NeutralRequest {
    /// Create a request without headers or body
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            headers: HashMap::new(),
            body: None,
        }
    }

    /// Add a header
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Set the request body
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Look up a header by name, ignoring ASCII case
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Resolve the URL against a dummy origin so relative URLs parse too.
    pub(crate) fn parsed_url(&self) -> Option<Url> {
        let base = Url::parse(RELATIVE_URL_BASE).ok()?;
        base.join(&self.url).ok()
    }

    /// Path component of the request URL
    pub fn pathname(&self) -> String {
        match self.parsed_url() {
            Some(url) => url.path().to_string(),
            None => self.url.split(&['?', '#'][..]).next().unwrap_or_default().to_string(),
        }
    }

    /// Query parameters, decoded. Later duplicates win.
    pub fn query(&self) -> HashMap<String, String> {
        self.parsed_url()
            .map(|url| url.query_pairs().into_owned().collect())
            .unwrap_or_default()
    }
}

/// An HTTP response handed back to a platform adapter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NeutralResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers, lower-case names
    pub headers: HashMap<String, String>,
    /// Response body, if any
    pub text: Option<String>,
}

impl NeutralResponse {
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            text: None,
        }
    }

    /// Add a header. Names are stored lower-case.
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Look up a header by name, ignoring ASCII case
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_url_pathname_and_query() {
        let request = NeutralRequest::new("GET", "/api/github/oauth/login?state=abc&scopes=a,b");
        assert_eq!(request.pathname(), "/api/github/oauth/login");

        let query = request.query();
        assert_eq!(query.get("state").map(String::as_str), Some("abc"));
        assert_eq!(query.get("scopes").map(String::as_str), Some("a,b"));
    }

    #[test]
    fn test_absolute_url_ignores_origin() {
        let request = NeutralRequest::new("GET", "https://example.com/api/github/oauth/token");
        assert_eq!(request.pathname(), "/api/github/oauth/token");
        assert!(request.query().is_empty());
    }

    #[test]
    fn test_query_decodes_plus_and_percent() {
        let request = NeutralRequest::new("GET", "/cb?error_description=The+redirect_uri%20MUST");
        assert_eq!(
            request.query().get("error_description").map(String::as_str),
            Some("The redirect_uri MUST")
        );
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let request = NeutralRequest::new("GET", "/").with_header("Authorization", "token abc");
        assert_eq!(request.header("authorization"), Some("token abc"));
        assert_eq!(request.header("AUTHORIZATION"), Some("token abc"));
        assert_eq!(request.header("content-type"), None);
    }

    #[test]
    fn test_response_headers_are_lowercased() {
        let response = NeutralResponse::new(302).with_header("Location", "https://example.com");
        assert_eq!(
            response.headers.get("location").map(String::as_str),
            Some("https://example.com")
        );
        assert_eq!(response.header("LOCATION"), Some("https://example.com"));
    }
}
