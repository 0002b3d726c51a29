#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use booking_api::api::v1::{DomainHandlers, Endpoint, HandlerRequest};
use booking_api::error::AppError;
use booking_api::http::ResponseEnvelope;
use booking_api::services::auth::{Claims, TokenPair, TokenValidator, ValidatorError};
use serde_json::json;

pub const VALID_ACCESS: &str = "valid-access";
pub const REFRESHED_ACCESS: &str = "refreshed-access";
pub const VALID_REFRESH: &str = "valid-refresh";
pub const ROTATED_REFRESH: &str = "rotated-refresh";
pub const UNREACHABLE: &str = "unreachable";

/// Token validator with fixed valid tokens and call counters.
///
/// - `valid-access` / `refreshed-access` validate to `sub = user-1`
/// - `valid-refresh` refreshes to `refreshed-access` + `rotated-refresh`
/// - `unreachable` makes either call fail like a network error
#[derive(Default)]
pub struct FakeIdentityProvider {
    pub validate_calls: AtomicUsize,
    pub refresh_calls: AtomicUsize,
}

impl FakeIdentityProvider {
    pub fn validate_calls(&self) -> usize {
        self.validate_calls.load(Ordering::SeqCst)
    }

    pub fn refresh_calls(&self) -> usize {
        self.refresh_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TokenValidator for FakeIdentityProvider {
    async fn validate(&self, access_token: &str) -> Result<Option<Claims>, ValidatorError> {
        self.validate_calls.fetch_add(1, Ordering::SeqCst);
        match access_token {
            UNREACHABLE => Err(ValidatorError::UpstreamStatus(504)),
            VALID_ACCESS | REFRESHED_ACCESS => Ok(Claims::from_map(
                json!({ "sub": "user-1", "roles": ["customer"] })
                    .as_object()
                    .cloned()
                    .unwrap_or_default(),
            )),
            _ => Ok(None),
        }
    }

    async fn refresh(&self, refresh_token: &str) -> Result<Option<TokenPair>, ValidatorError> {
        self.refresh_calls.fetch_add(1, Ordering::SeqCst);
        match refresh_token {
            UNREACHABLE => Err(ValidatorError::UpstreamStatus(504)),
            VALID_REFRESH => Ok(Some(TokenPair {
                access_token: REFRESHED_ACCESS.to_string(),
                refresh_token: Some(ROTATED_REFRESH.to_string()),
            })),
            _ => Ok(None),
        }
    }
}

/// A call seen by `RecordingHandlers`.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub endpoint: Endpoint,
    pub path_params: HashMap<String, String>,
    pub subject: Option<String>,
    pub body: String,
}

/// Domain handlers that record each call and answer with the endpoint name.
/// `CancelReservation` fails, to exercise the 500 path.
#[derive(Default)]
pub struct RecordingHandlers {
    pub calls: Mutex<Vec<RecordedCall>>,
}

impl RecordingHandlers {
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<RecordedCall> {
        self.calls.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl DomainHandlers for RecordingHandlers {
    async fn handle(
        &self,
        endpoint: Endpoint,
        req: HandlerRequest<'_>,
    ) -> Result<ResponseEnvelope, AppError> {
        self.calls.lock().unwrap().push(RecordedCall {
            endpoint,
            path_params: req.path_params.clone(),
            subject: req.claims.and_then(|c| c.subject()).map(str::to_string),
            body: req.body.to_string(),
        });

        if endpoint == Endpoint::CancelReservation {
            return Err(AppError::internal("reservation store unavailable"));
        }

        Ok(ResponseEnvelope::success(&json!({ "endpoint": endpoint.as_str() })))
    }
}
