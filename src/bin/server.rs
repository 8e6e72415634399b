use std::{fs::OpenOptions, net::SocketAddr, process::ExitCode, sync::Arc};

use axum::{
    Router,
    extract::{MatchedPath, Request},
};
use axum_server::Handle;
use clap::Parser;
use rusqlite::Connection;
use tower_http::trace::TraceLayer;

#[cfg(debug_assertions)]
use auto_transactions::logging_middleware;
#[cfg(debug_assertions)]
use axum::middleware;
#[cfg(debug_assertions)]
use tower_livereload::LiveReloadLayer;

use tracing_subscriber::{EnvFilter, Layer, filter, layer::SubscriberExt, util::SubscriberInitExt};

use auto_transactions::{AppState, build_router, graceful_shutdown};

/// The web server for managing auto transaction rules.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database.
    #[arg(long)]
    db_path: String,

    /// The IP address to serve the app from.
    #[arg(long, default_value = "127.0.0.1")]
    address: String,

    /// The port to serve the app from.
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// File path to write debug logs to.
    #[arg(long, default_value = "debug.log")]
    log_path: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(error) = setup_logging(&args.log_path) {
        eprintln!("Could not set up logging: {error}");
        return ExitCode::FAILURE;
    }

    let addr = match format!("{}:{}", args.address, args.port).parse::<SocketAddr>() {
        Ok(addr) => addr,
        Err(error) => {
            tracing::error!("Invalid address {}:{}: {error}", args.address, args.port);
            return ExitCode::FAILURE;
        }
    };

    let connection = match Connection::open(&args.db_path) {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("Could not open database file {}: {error}", args.db_path);
            return ExitCode::FAILURE;
        }
    };

    let state = match AppState::new(connection) {
        Ok(state) => state,
        Err(error) => {
            tracing::error!("Could not initialize the database: {error}");
            return ExitCode::FAILURE;
        }
    };

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = add_tracing_layer(build_router(state));

    #[cfg(debug_assertions)]
    let router = router
        .layer(middleware::from_fn(logging_middleware))
        .layer(LiveReloadLayer::new());

    tracing::info!("HTTP server listening on http://{addr}");

    if let Err(error) = axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
    {
        tracing::error!("Server stopped with an error: {error}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn setup_logging(log_path: &str) -> Result<(), std::io::Error> {
    let stdout_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")));

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)?;

    let debug_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_ansi(false)
        .with_writer(Arc::new(log_file))
        .with_filter(filter::LevelFilter::DEBUG);

    tracing_subscriber::registry()
        .with(stdout_log)
        .with(debug_log)
        .init();

    Ok(())
}

fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        // By default, `TraceLayer` will log 5xx responses but we're doing our specific
        // logging of errors so disable that
        .on_failure(());

    router.layer(tracing_layer)
}
