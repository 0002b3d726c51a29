/*
 * Responsibility
 * - v1 の公開ポイント (route table, endpoints, handler capability)
 */
mod endpoint;
pub mod handlers;
mod routes;

pub use endpoint::Endpoint;
pub use handlers::{DomainHandlers, HandlerRequest, ScaffoldHandlers};
pub use routes::{RouteTarget, routes};
