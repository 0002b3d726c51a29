/*
 * Responsibility
 * - tracing / panic hook の初期化
 * - Config読み込み → 依存生成 (validator, handlers, dispatcher)
 * - Router 組み立て: every request goes to one fallback handler that hands
 *   it to the dispatcher
 * - axum::serve() で起動
 */
use std::collections::HashMap;
use std::{panic, sync::Arc};

use anyhow::{Context, Result};
use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, Uri, header},
};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api::v1::{DomainHandlers, ScaffoldHandlers};
use crate::config::Config;
use crate::dispatcher::Dispatcher;
use crate::error::AppError;
use crate::http::{IncomingRequest, ResponseEnvelope};
use crate::middleware::{self, cors};
use crate::services::auth::build_token_validator;
use crate::state::AppState;

pub fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,booking_api=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        // stderr keeps stdout free for the invoker's JSON output
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn init_panic_hook(print_default_report: bool) {
    // Development keeps the default report as well (stderr with location/payload).
    // Must not abort: the dispatcher and CatchPanicLayer recover after the hook runs.
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        tracing::error!(?info, "panic");
        if print_default_report {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;

    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting API in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let state = build_state(&config, Arc::new(ScaffoldHandlers))?;
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("binding {}", config.addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the process-wide dispatch graph once; it is only read afterwards.
pub fn build_state(config: &Config, handlers: Arc<dyn DomainHandlers>) -> Result<AppState> {
    let validator = build_token_validator(config)?;
    Ok(AppState::new(Dispatcher::new(validator, handlers)))
}

pub fn build_router(state: AppState, config: &Config) -> Router {
    let router = Router::new().fallback(gateway).with_state(state);
    middleware::http::apply(router, config.body_limit_bytes)
}

async fn gateway(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> ResponseEnvelope {
    match String::from_utf8(body.to_vec()) {
        Ok(body) => {
            let req = incoming_request(method, &uri, &headers, body);
            state.dispatcher.dispatch(&req).await
        }
        Err(err) => {
            let req = incoming_request(method, &uri, &headers, String::new());
            if let Some(preflight) = cors::preflight(&req) {
                return preflight;
            }
            debug!(method = %req.method, path = %req.path, "request body is not utf-8");
            AppError::bad_request(format!("Request body is not valid UTF-8: {err}")).into_envelope()
        }
    }
}

/// Convert axum request parts into an `IncomingRequest`.
///
/// Repeated `Cookie` headers are joined with `"; "`, other repeated headers
/// with `", "`. Header values that are not visible ASCII are dropped.
pub fn incoming_request(
    method: Method,
    uri: &Uri,
    headers: &HeaderMap,
    body: String,
) -> IncomingRequest {
    let mut flat: HashMap<String, String> = HashMap::new();
    for name in headers.keys() {
        let separator = if *name == header::COOKIE { "; " } else { ", " };
        let joined = headers
            .get_all(name)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .collect::<Vec<_>>()
            .join(separator);
        flat.insert(name.as_str().to_string(), joined);
    }

    let query: HashMap<String, String> = uri
        .query()
        .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default();

    let mut req = IncomingRequest::new(method, uri.path())
        .with_headers(flat)
        .with_body(body);
    req.query = query;
    req
}
