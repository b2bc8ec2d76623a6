use anyhow::{Context, Result};
use calmmate::{
    cors_layer, create_router, render_report, AppState, Clock, Config, FixedClock, MemoryStore,
    SessionStore, SystemClock,
};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "calmmate")]
#[command(version, about = "Voice session journal with emotion analytics")]
struct Cli {
    /// Configuration file (extension optional)
    #[arg(short, long, default_value = "config/calmmate")]
    config: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API (default)
    Serve,
    /// Print analytics for a JSON array of session records
    Report {
        /// File containing `[{"emotion", "confidence", "createdAt"}, ...]`
        #[arg(long)]
        records: PathBuf,

        /// Reference instant (RFC 3339); defaults to now
        #[arg(long)]
        now: Option<DateTime<Utc>>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = Config::load(&cli.config)?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cfg.service.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(cfg).await,
        Commands::Report { records, now } => report(&records, now),
    }
}

async fn serve(cfg: Config) -> Result<()> {
    info!("{} v{}", cfg.service.name, env!("CARGO_PKG_VERSION"));

    let store: Arc<dyn SessionStore> = match &cfg.storage.sessions_path {
        Some(path) => {
            info!("Session snapshot: {}", path);
            Arc::new(MemoryStore::open(path).await?)
        }
        None => {
            info!("No session snapshot configured, sessions are kept in memory only");
            Arc::new(MemoryStore::new())
        }
    };

    let state = AppState::new(store, Arc::new(SystemClock)).with_service_name(&cfg.service.name);
    let app = create_router(state, cors_layer(&cfg.cors.allowed_origins)?);

    let addr = cfg.http_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("HTTP server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("HTTP server stopped");
    Ok(())
}

fn report(path: &Path, now: Option<DateTime<Utc>>) -> Result<()> {
    let clock: Box<dyn Clock> = match now {
        Some(instant) => Box::new(FixedClock(instant)),
        None => Box::new(SystemClock),
    };

    println!("{}", render_report(path, clock.now())?);
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
