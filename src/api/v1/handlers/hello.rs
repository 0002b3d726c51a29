/*
 * Responsibility
 * - GET /v1/hello (疎通用)
 * - Answered in-crate; never reaches the domain handlers
 */
use serde_json::json;

use crate::http::ResponseEnvelope;

pub fn hello() -> ResponseEnvelope {
    ResponseEnvelope::success(&json!({ "message": "Hello from the booking API" }))
}
