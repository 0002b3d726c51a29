//! Request dispatch and authentication layer for the booking API.
//!
//! A request flows through CORS preflight handling, path normalization, the
//! ordered route table and, for protected routes, the auth gate with silent
//! token refresh before reaching a domain handler. Both entry points (the
//! axum server and the event invoker) share [`dispatcher::Dispatcher`].

pub mod api;
pub mod app;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod http;
pub mod middleware;
pub mod routing;
pub mod services;
pub mod state;

pub use dispatcher::Dispatcher;
