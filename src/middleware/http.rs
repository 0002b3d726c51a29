//! HTTP-level middleware for the axum entry point.
//!
//! Responsibility:
//! - Request-Id generation + propagation (X-Request-Id)
//! - Access logging / request tracing (TraceLayer)
//! - Body size limit (413 as a JSON envelope)
//! - Panics inside the service become a 500 envelope
//!
//! No timeout layer: requests run to completion, including identity-provider
//! calls.

use std::any::Any;

use axum::body::{Bytes, HttpBody};
use axum::http::StatusCode;
use axum::http::header::HeaderName;
use axum::response::{IntoResponse, Response};
use axum::{BoxError, Router, middleware};
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::error::{AppError, panic_message};
use crate::http::ResponseEnvelope;

/// Apply HTTP-level middleware to the given Router.
pub fn apply(router: Router, body_limit_bytes: usize) -> Router {
    let request_id_header = HeaderName::from_static("x-request-id");

    let layers = ServiceBuilder::new()
        // Generate a request id if missing, then propagate it to the response.
        .layer(SetRequestIdLayer::new(
            request_id_header.clone(),
            MakeRequestUuid,
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header))
        // Access log / tracing for all requests.
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(middleware::map_response(envelope_payload_too_large))
        .layer(RequestBodyLimitLayer::new(body_limit_bytes));

    router.layer(layers)
}

fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let message = panic_message(payload.as_ref());
    tracing::error!(panic = %message, "request panicked");
    ResponseEnvelope::server_error(message).into_response()
}

/// Body-limit rejections (from the limit layer or the body extractor) get
/// the JSON envelope like every other error.
async fn envelope_payload_too_large<B>(response: Response<B>) -> Response
where
    B: HttpBody<Data = Bytes> + Send + 'static,
    B::Error: Into<BoxError>,
{
    if response.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::PayloadTooLarge.into_envelope().into_response();
    }
    response.into_response()
}
