/*
 * Responsibility
 * - Domain handler capability consumed by the dispatcher (one operation per
 *   Endpoint)
 * - HandlerRequest: what a handler gets to see (body, path params, query,
 *   claims for protected routes)
 */
use std::collections::HashMap;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::api::v1::Endpoint;
use crate::error::AppError;
use crate::http::ResponseEnvelope;
use crate::routing::PathParams;
use crate::services::auth::Claims;

pub mod hello;
pub mod scaffold;

pub use scaffold::ScaffoldHandlers;

/// Input handed to a domain handler.
#[derive(Debug)]
pub struct HandlerRequest<'a> {
    pub path_params: PathParams,
    pub query: &'a HashMap<String, String>,
    pub body: &'a str,
    /// Present only for protected routes, after the auth gate succeeded.
    pub claims: Option<&'a Claims>,
}

impl HandlerRequest<'_> {
    /// Deserialize the JSON body; malformed JSON becomes a 400.
    pub fn json_body<T: DeserializeOwned>(&self) -> Result<T, AppError> {
        Ok(serde_json::from_str(self.body)?)
    }
}

/// Bookings, dishes, feedback, cart and profile operations.
///
/// Implementations live outside this crate; `ScaffoldHandlers` is the
/// wiring stand-in used by the binaries.
#[async_trait]
pub trait DomainHandlers: Send + Sync {
    async fn handle(
        &self,
        endpoint: Endpoint,
        req: HandlerRequest<'_>,
    ) -> Result<ResponseEnvelope, AppError>;
}
