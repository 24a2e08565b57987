use std::{error::Error, net::SocketAddr, process::exit};

use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware,
};
use axum_server::Handle;
use clap::Parser;
use rusqlite::Connection;
use tower_http::trace::TraceLayer;

#[cfg(debug_assertions)]
use tower_livereload::LiveReloadLayer;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use peerpay::{
    AppState, CurrencyFormat, DisplayConfig, Grouping, build_router, get_local_offset,
    graceful_shutdown, logging_middleware,
};

/// The web server for the PeerPay wallet dashboard and transaction history.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database.
    #[arg(long, env = "DB_PATH")]
    db_path: String,

    /// The port to serve the app from.
    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    port: u16,

    /// The canonical name of the timezone to display times in, e.g. "Asia/Kolkata".
    #[arg(long, env = "LOCAL_TIMEZONE", default_value = "Asia/Kolkata")]
    local_timezone: String,

    /// The symbol placed before amounts.
    #[arg(long, env = "CURRENCY_SYMBOL", default_value = "₹")]
    currency_symbol: String,

    /// How to group the digits of amounts.
    #[arg(long, env = "DIGIT_GROUPING", value_enum, default_value_t = Grouping::Indian)]
    grouping: Grouping,

    /// The number of transactions to show under "Recent Activity" on the dashboard.
    #[arg(long, env = "RECENT_ACTIVITY_LIMIT", default_value_t = 5)]
    recent_activity_limit: usize,

    /// The secret shared with the authentication service for reading session cookies.
    #[arg(long, env = "SECRET", hide_env_values = true)]
    secret: String,

    /// Log the full request and response of every request.
    #[arg(long)]
    log_bodies: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    setup_logging();

    let args = Args::parse();

    if get_local_offset(&args.local_timezone).is_none() {
        tracing::error!("Invalid timezone {}", args.local_timezone);
        eprintln!(
            "Could not find the timezone \"{}\". Use a canonical timezone name, e.g. \"Asia/Kolkata\".",
            args.local_timezone
        );
        exit(1);
    }

    let addr = SocketAddr::from(([127, 0, 0, 1], args.port));

    let conn = Connection::open(&args.db_path)?;
    let display = DisplayConfig {
        currency: CurrencyFormat {
            symbol: args.currency_symbol,
            grouping: args.grouping,
        },
        recent_activity_limit: args.recent_activity_limit,
    };
    let state = AppState::new(conn, &args.secret, &args.local_timezone, display)?;

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = build_router(state);
    let router = if args.log_bodies {
        router.layer(middleware::from_fn(logging_middleware))
    } else {
        router
    };
    let router = add_tracing_layer(router);

    #[cfg(debug_assertions)]
    let router = router.layer(LiveReloadLayer::new());

    tracing::info!("HTTP server listening on {}", addr);
    axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await?;

    Ok(())
}

fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().pretty())
        .init();
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
