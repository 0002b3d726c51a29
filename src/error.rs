/*
 * Responsibility
 * - Dispatch-level error taxonomy (AppError)
 * - Conversion into the fixed ResponseEnvelope (status / JSON message body)
 * - Auth failures stay uninformative: every variant that stems from
 *   credentials or the identity provider collapses into `Unauthorized`
 */
use std::any::Any;

use thiserror::Error;

use crate::http::ResponseEnvelope;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("unauthorized")]
    Unauthorized,

    #[error("Endpoint not found: {path}")]
    NotFound { path: String },

    #[error("method not allowed")]
    MethodNotAllowed,

    #[error("Request body too large")]
    PayloadTooLarge,

    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound { path: path.into() }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    pub fn into_envelope(self) -> ResponseEnvelope {
        match self {
            AppError::BadRequest(message) => ResponseEnvelope::bad_request(message),
            AppError::Unauthorized => ResponseEnvelope::unauthorized(),
            err @ AppError::NotFound { .. } => ResponseEnvelope::not_found(err.to_string()),
            AppError::MethodNotAllowed => ResponseEnvelope::method_not_allowed(),
            AppError::PayloadTooLarge => ResponseEnvelope::payload_too_large(),
            AppError::Internal(message) => ResponseEnvelope::server_error(message),
        }
    }
}

/// Message carried by a panic payload (`panic!("...")` or `panic!("{x}")`).
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "internal server error".to_string()
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::BadRequest(format!("invalid request body: {e}"))
    }
}
