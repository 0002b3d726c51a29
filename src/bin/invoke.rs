use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
    sync::Arc,
};

use anyhow::{Context, Result};
use booking_api::{
    api::v1::ScaffoldHandlers,
    app,
    config::Config,
    http::{IncomingEvent, IncomingRequest},
};
use clap::Parser;

/// Dispatch a single platform event and print the response envelope.
///
/// The event is API-gateway shaped JSON:
/// `{"httpMethod", "path", "headers", "queryStringParameters", "body"}`
/// (`headers`, `queryStringParameters` and `body` may be null).
/// The response is printed as
/// `{"statusCode", "headers", "multiValueHeaders", "body"}`.
///
/// Identity-provider settings come from the same environment as the server.
#[derive(Parser, Debug)]
#[command(name = "booking-invoke", version, about)]
struct Args {
    /// Path to the event JSON. Reads stdin when omitted.
    #[arg(long, value_name = "FILE")]
    event: Option<PathBuf>,

    /// Pretty-print the response JSON
    #[arg(long, default_value_t = false)]
    pretty: bool,
}

fn read_event(path: Option<&PathBuf>) -> Result<IncomingEvent> {
    let raw = match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("reading event file {}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("reading event from stdin")?;
            buf
        }
    };

    serde_json::from_str(&raw).context("parsing event json")
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    app::init_tracing();

    let config = Config::from_env()?;
    let state = app::build_state(&config, Arc::new(ScaffoldHandlers))?;

    let event = read_event(args.event.as_ref())?;
    let req = IncomingRequest::try_from(event)?;
    let response = state.dispatcher.dispatch(&req).await;

    let out = if args.pretty {
        serde_json::to_string_pretty(&response)?
    } else {
        serde_json::to_string(&response)?
    };
    println!("{out}");

    Ok(())
}
