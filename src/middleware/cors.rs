//! CORS preflight short-circuit.
//!
//! Note:
//! - Runs before normalization, routing and auth: any `OPTIONS` request gets
//!   the same fixed answer, whatever the path or credentials.
//!
//! Policy:
//! - Allow-Origin `*`, Allow-Credentials `true`, fixed method and header lists.

use axum::http::{Method, StatusCode};

use crate::http::{IncomingRequest, ResponseEnvelope};

pub const ALLOW_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";
pub const ALLOW_HEADERS: &str = "Content-Type, Authorization, Cookie, Accept, X-Request-Id";

/// The fixed 200 preflight answer.
pub fn preflight_response() -> ResponseEnvelope {
    let mut envelope = ResponseEnvelope::new(StatusCode::OK, "");
    envelope.headers.clear();
    envelope
        .with_header("Access-Control-Allow-Origin", "*")
        .with_header("Access-Control-Allow-Methods", ALLOW_METHODS)
        .with_header("Access-Control-Allow-Headers", ALLOW_HEADERS)
        .with_header("Access-Control-Allow-Credentials", "true")
}

/// `Some(response)` when `req` is a preflight request.
pub fn preflight(req: &IncomingRequest) -> Option<ResponseEnvelope> {
    (req.method == Method::OPTIONS).then(preflight_response)
}
