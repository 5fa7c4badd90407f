pub mod api;
pub mod config;
pub mod constants;
pub mod db;
pub mod entities;
pub mod seed;
pub mod services;
pub mod state;

use std::sync::Arc;

pub use config::Config;
use state::SharedState;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

pub async fn run() -> anyhow::Result<()> {
    let config = Config::load()?;
    config.validate()?;

    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    let fmt_layer = tracing_subscriber::fmt::layer();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    let args: Vec<String> = std::env::args().collect();

    match args.get(1).map(String::as_str) {
        None | Some("serve" | "daemon" | "-d" | "--daemon") => run_server(config).await,

        Some("seed") => run_seed(config).await,

        Some("init" | "--init") => {
            Config::create_default_if_missing()?;
            println!("✓ Config file created. Edit config.toml and run again.");
            Ok(())
        }

        Some("help" | "-h" | "--help") => {
            print_help();
            Ok(())
        }

        Some(other) => {
            println!("Unknown command: {other}");
            print_help();
            Ok(())
        }
    }
}

async fn run_server(config: Config) -> anyhow::Result<()> {
    info!(
        "RAD Portal v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let port = config.server.port;

    let shared = Arc::new(SharedState::new(config).await?);
    let state = api::create_app_state(shared).await?;
    let app = api::router(state).await;

    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    let server_handle = tokio::spawn(async move {
        info!("Portal running at http://0.0.0.0:{port}");
        if let Err(e) = axum::serve(listener, app).await {
            error!("Web server error: {}", e);
        }
    });

    info!("Server running. Press Ctrl+C to stop.");

    match signal::ctrl_c().await {
        Ok(()) => {
            info!("Shutdown signal received");
        }
        Err(e) => {
            error!("Error listening for shutdown: {}", e);
        }
    }

    server_handle.abort();
    info!("Server stopped");

    Ok(())
}

async fn run_seed(config: Config) -> anyhow::Result<()> {
    let shared = SharedState::new(config).await?;
    seed::run(&shared).await
}

fn print_help() {
    println!("RAD Portal v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: rad-portal [command]");
    println!();
    println!("Commands:");
    println!("  serve        Run the portal server (default)");
    println!("  seed         Load demo users and opportunities");
    println!("  init         Create a default config.toml");
    println!("  help         Show this help");
}
