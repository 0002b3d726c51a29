//! Transport-neutral inbound request.
//!
//! Both the axum server and the event invoker build an [`IncomingRequest`];
//! everything past that point (normalizer, router, auth gate, handlers)
//! only sees this type.

use std::collections::HashMap;
use std::sync::OnceLock;

use axum::http::Method;
use serde::Deserialize;

use super::cookie::parse_cookie_header;

#[derive(Debug, Clone)]
pub struct IncomingRequest {
    pub method: Method,
    pub path: String,
    /// Header names are kept as given by the platform. Private: `cookies`
    /// is derived from them.
    headers: HashMap<String, String>,
    pub query: HashMap<String, String>,
    pub body: String,
    cookies: OnceLock<HashMap<String, String>>,
}

impl IncomingRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: HashMap::new(),
            query: HashMap::new(),
            body: String::new(),
            cookies: OnceLock::new(),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self.cookies = OnceLock::new();
        self
    }

    /// Replace all headers.
    pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers = headers;
        self.cookies = OnceLock::new();
        self
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(name.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Look up a header, preferring the exact name and falling back to an
    /// ASCII case-insensitive match (the axum adapter lowercases names).
    /// Among several case variants the lexicographically smallest name wins.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(name)
            .or_else(|| {
                self.headers
                    .iter()
                    .filter(|(k, _)| k.eq_ignore_ascii_case(name))
                    .min_by(|(a, _), (b, _)| a.cmp(b))
                    .map(|(_, v)| v)
            })
            .map(String::as_str)
    }

    /// Cookies from the `Cookie` header, parsed on first access.
    pub fn cookies(&self) -> &HashMap<String, String> {
        self.cookies
            .get_or_init(|| self.header("Cookie").map(parse_cookie_header).unwrap_or_default())
    }

    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies().get(name).map(String::as_str)
    }
}

/// Platform event as delivered by an API-gateway style host.
///
/// `queryStringParameters` and `body` may be `null`; conversion into
/// [`IncomingRequest`] replaces them with empty values.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomingEvent {
    pub http_method: String,
    pub path: String,
    #[serde(default)]
    pub headers: Option<HashMap<String, String>>,
    #[serde(default)]
    pub query_string_parameters: Option<HashMap<String, String>>,
    #[serde(default)]
    pub body: Option<String>,
}

#[derive(Debug, thiserror::Error)]
#[error("invalid http method: {0}")]
pub struct InvalidMethod(pub String);

impl TryFrom<IncomingEvent> for IncomingRequest {
    type Error = InvalidMethod;

    fn try_from(event: IncomingEvent) -> Result<Self, Self::Error> {
        let method = Method::from_bytes(event.http_method.to_ascii_uppercase().as_bytes())
            .map_err(|_| InvalidMethod(event.http_method.clone()))?;

        Ok(Self {
            method,
            path: event.path,
            headers: event.headers.unwrap_or_default(),
            query: event.query_string_parameters.unwrap_or_default(),
            body: event.body.unwrap_or_default(),
            cookies: OnceLock::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_lookup_falls_back_to_case_insensitive() {
        let req = IncomingRequest::new(Method::GET, "/v1/cart")
            .with_header("authorization", "Bearer abc");
        assert_eq!(req.header("Authorization"), Some("Bearer abc"));
        assert_eq!(req.header("Cookie"), None);
    }

    #[test]
    fn exact_header_name_wins() {
        let req = IncomingRequest::new(Method::GET, "/")
            .with_header("Cookie", "AccessToken=exact")
            .with_header("cookie", "AccessToken=lower");
        assert_eq!(req.cookie("AccessToken"), Some("exact"));
    }

    #[test]
    fn case_variants_resolve_deterministically() {
        for _ in 0..16 {
            let req = IncomingRequest::new(Method::GET, "/v1/cart")
                .with_header("cookie", "AccessToken=lower")
                .with_header("COOKIE", "AccessToken=upper")
                .with_header("CooKie", "AccessToken=mixed");
            assert_eq!(req.header("Cookie"), Some("AccessToken=upper"));
        }
    }

    #[test]
    fn cookie_cache_follows_header_changes() {
        let req = IncomingRequest::new(Method::GET, "/v1/cart")
            .with_header("Cookie", "AccessToken=first");
        assert_eq!(req.cookie("AccessToken"), Some("first"));

        let req = req.with_header("Cookie", "AccessToken=second");
        assert_eq!(req.cookie("AccessToken"), Some("second"));

        let req = req.with_headers(HashMap::new());
        assert_eq!(req.cookie("AccessToken"), None);
    }

    #[test]
    fn cookies_are_empty_without_header() {
        let req = IncomingRequest::new(Method::GET, "/");
        assert!(req.cookies().is_empty());
        assert_eq!(req.cookie("AccessToken"), None);
    }

    #[test]
    fn event_with_null_fields_normalizes_to_empty() {
        let event: IncomingEvent = serde_json::from_str(
            r#"{
                "httpMethod": "get",
                "path": "/api/v1/hello",
                "headers": null,
                "queryStringParameters": null,
                "body": null
            }"#,
        )
        .unwrap();

        let req = IncomingRequest::try_from(event).unwrap();
        assert_eq!(req.method, Method::GET);
        assert_eq!(req.path, "/api/v1/hello");
        assert!(req.headers().is_empty());
        assert!(req.query.is_empty());
        assert!(req.body.is_empty());
    }

    #[test]
    fn event_with_bad_method_is_rejected() {
        let event = IncomingEvent {
            http_method: "GE T".to_string(),
            path: "/".to_string(),
            headers: None,
            query_string_parameters: None,
            body: None,
        };
        assert!(IncomingRequest::try_from(event).is_err());
    }
}
