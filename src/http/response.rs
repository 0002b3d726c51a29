//! Response envelope and the fixed set of outcome builders.
//!
//! Every response leaving the dispatcher is a [`ResponseEnvelope`]. Builders
//! attach `Content-Type: application/json` and a permissive CORS origin;
//! error bodies are always `{"message": "..."}`.

use std::collections::BTreeMap;

use axum::{
    body::Body,
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub multi_value_headers: BTreeMap<String, Vec<String>>,
    pub body: String,
}

/// Headers produced by a silent refresh that must reach the response of the
/// same request.
///
/// Consumed by value in [`ResponseEnvelope::merge_auth_headers`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingAuthHeaders {
    values: BTreeMap<String, Vec<String>>,
}

impl PendingAuthHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.entry(name.into()).or_default().push(value.into());
    }

    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.values.get(name).map(Vec::as_slice)
    }
}

impl ResponseEnvelope {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert("Access-Control-Allow-Origin".to_string(), "*".to_string());

        Self {
            status_code: status.as_u16(),
            headers,
            multi_value_headers: BTreeMap::new(),
            body: body.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// 200 with the serialized payload.
    pub fn success<T: Serialize>(payload: &T) -> Self {
        match serde_json::to_string(payload) {
            Ok(body) => Self::new(StatusCode::OK, body),
            Err(err) => {
                tracing::error!(error = %err, "failed to serialize response payload");
                Self::server_error(err.to_string())
            }
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::message(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized() -> Self {
        Self::message(StatusCode::UNAUTHORIZED, "Unauthorized")
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::message(StatusCode::NOT_FOUND, message)
    }

    pub fn method_not_allowed() -> Self {
        Self::message(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
    }

    pub fn payload_too_large() -> Self {
        Self::message(StatusCode::PAYLOAD_TOO_LARGE, "Request body too large")
    }

    pub fn server_error(message: impl Into<String>) -> Self {
        Self::message(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    fn message(status: StatusCode, message: impl Into<String>) -> Self {
        let message: String = message.into();
        Self::new(status, json!({ "message": message }).to_string())
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Append refreshed-credential headers after any values already present.
    pub fn merge_auth_headers(mut self, pending: PendingAuthHeaders) -> Self {
        for (name, values) in pending.values {
            self.multi_value_headers
                .entry(name)
                .or_default()
                .extend(values);
        }
        self
    }
}

impl IntoResponse for ResponseEnvelope {
    fn into_response(self) -> Response {
        let status = self.status();
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = status;

        let headers = response.headers_mut();
        let single = self
            .headers
            .into_iter()
            .map(|(name, value)| (name, vec![value]));

        for (name, values) in single.chain(self.multi_value_headers) {
            let Ok(header_name) = HeaderName::from_bytes(name.as_bytes()) else {
                tracing::warn!(header = %name, "dropping response header with invalid name");
                continue;
            };
            for value in values {
                match HeaderValue::from_str(&value) {
                    Ok(v) => {
                        headers.append(header_name.clone(), v);
                    }
                    Err(_) => {
                        tracing::warn!(header = %name, "dropping response header with invalid value");
                    }
                }
            }
        }

        response
    }
}
