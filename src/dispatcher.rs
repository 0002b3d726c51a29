//! Request dispatch.
//!
//! Pipeline for a single request:
//! 1. CORS preflight short-circuit (`OPTIONS`, any path)
//! 2. Path normalization (`/api`, `/admin` prefixes)
//! 3. Route lookup, first match wins
//! 4. Auth gate for protected routes
//! 5. Handler call, then merge of refreshed-credential headers
//!
//! Every failure is turned into a `ResponseEnvelope` here; nothing escapes to
//! the caller. Domain handlers run on their own task; a panic there becomes a
//! 500 carrying the panic message.

use std::sync::Arc;

use tracing::{debug, error};

use crate::api::v1::handlers::hello::hello;
use crate::api::v1::{DomainHandlers, Endpoint, HandlerRequest, RouteTarget, routes};
use crate::error::{AppError, panic_message};
use crate::http::{IncomingRequest, ResponseEnvelope};
use crate::middleware::auth::{AuthGate, AuthOutcome};
use crate::middleware::{cors, normalize::normalize_path};
use crate::routing::{PathParams, RouteTable};
use crate::services::auth::{Claims, TokenValidator};

/// Immutable per-process dispatch graph: route table, auth gate, handlers.
#[derive(Clone)]
pub struct Dispatcher {
    routes: Arc<RouteTable<RouteTarget>>,
    auth: AuthGate,
    handlers: Arc<dyn DomainHandlers>,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("routes", &self.routes.rules().len())
            .finish_non_exhaustive()
    }
}

impl Dispatcher {
    /// Dispatcher over the v1 route table.
    pub fn new(validator: Arc<dyn TokenValidator>, handlers: Arc<dyn DomainHandlers>) -> Self {
        Self::with_routes(routes(), validator, handlers)
    }

    pub fn with_routes(
        routes: RouteTable<RouteTarget>,
        validator: Arc<dyn TokenValidator>,
        handlers: Arc<dyn DomainHandlers>,
    ) -> Self {
        Self {
            routes: Arc::new(routes),
            auth: AuthGate::new(validator),
            handlers,
        }
    }

    pub async fn dispatch(&self, req: &IncomingRequest) -> ResponseEnvelope {
        if let Some(preflight) = cors::preflight(req) {
            return preflight;
        }

        let path = normalize_path(&req.path);

        let Some(found) = self.routes.find(&req.method, path) else {
            debug!(method = %req.method, raw_path = %req.path, path, "no route matched");
            return AppError::not_found(path).into_envelope();
        };

        let endpoint = match found.rule.handler {
            RouteTarget::Endpoint(endpoint) => endpoint,
            RouteTarget::MethodNotAllowed => {
                debug!(method = %req.method, path, "method not allowed");
                return AppError::MethodNotAllowed.into_envelope();
            }
        };

        debug!(
            method = %req.method,
            raw_path = %req.path,
            path,
            %endpoint,
            protected = found.rule.protected,
            "dispatching"
        );

        if !found.rule.protected {
            return self
                .call(endpoint, req, found.params, None)
                .await
                .unwrap_or_else(AppError::into_envelope);
        }

        match self.auth.authenticate(req).await {
            AuthOutcome::Unauthenticated => AppError::Unauthorized.into_envelope(),
            AuthOutcome::Authenticated { claims, pending } => {
                let envelope = self
                    .call(endpoint, req, found.params, Some(&claims))
                    .await
                    .unwrap_or_else(AppError::into_envelope);
                match pending {
                    Some(pending) => envelope.merge_auth_headers(pending),
                    None => envelope,
                }
            }
        }
    }

    async fn call(
        &self,
        endpoint: Endpoint,
        req: &IncomingRequest,
        path_params: PathParams,
        claims: Option<&Claims>,
    ) -> Result<ResponseEnvelope, AppError> {
        if endpoint == Endpoint::Hello {
            return Ok(hello());
        }

        let handlers = Arc::clone(&self.handlers);
        let query = req.query.clone();
        let body = req.body.clone();
        let claims = claims.cloned();

        let task = tokio::spawn(async move {
            handlers
                .handle(
                    endpoint,
                    HandlerRequest {
                        path_params,
                        query: &query,
                        body: &body,
                        claims: claims.as_ref(),
                    },
                )
                .await
        });

        match task.await {
            Ok(result) => result,
            Err(err) => match err.try_into_panic() {
                Ok(payload) => {
                    let message = panic_message(payload.as_ref());
                    error!(%endpoint, panic = %message, "handler panicked");
                    Err(AppError::internal(message))
                }
                Err(err) => Err(AppError::internal(err.to_string())),
            },
        }
    }
}
