/*
 * Responsibility
 * - Request pipeline stages ahead of the handlers (CORS preflight, path
 *   normalization, auth gate)
 * - HTTP server layers for the axum entry point
 */
pub mod auth;
pub mod cors;
pub mod http;
pub mod normalize;
