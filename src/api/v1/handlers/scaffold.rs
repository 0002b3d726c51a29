//! Wiring stand-in for the domain handlers.
//!
//! Echoes the resolved endpoint, path parameters, query and caller subject so
//! routing and auth can be exercised end to end before real handlers exist.

use async_trait::async_trait;
use serde_json::json;

use super::{DomainHandlers, HandlerRequest};
use crate::api::v1::Endpoint;
use crate::error::AppError;
use crate::http::ResponseEnvelope;

#[derive(Debug, Clone, Copy, Default)]
pub struct ScaffoldHandlers;

#[async_trait]
impl DomainHandlers for ScaffoldHandlers {
    async fn handle(
        &self,
        endpoint: Endpoint,
        req: HandlerRequest<'_>,
    ) -> Result<ResponseEnvelope, AppError> {
        let subject = req.claims.and_then(|c| c.subject());

        Ok(ResponseEnvelope::success(&json!({
            "endpoint": endpoint.as_str(),
            "pathParams": req.path_params,
            "query": req.query,
            "subject": subject,
        })))
    }
}
