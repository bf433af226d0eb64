use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use salesboard::{
    AppConfig, AppState, HttpTransactionSource, IngestionLoader, RecordStore, TransactionSource,
    build_router, open_store, web::with_cors,
};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "salesboard")]
#[command(about = "Monthly sales listings, statistics and charts over a product-transaction dataset")]
struct Cli {
    /// Listen host (overrides APP_HOST)
    #[arg(long, global = true)]
    host: Option<String>,

    /// Listen port (overrides APP_PORT)
    #[arg(long, global = true)]
    port: Option<u16>,

    /// Record store url: memory:// or file://<path> (overrides DATABASE_URL)
    #[arg(long, global = true)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP service (default)
    Serve,
    /// Replace the store contents from the source and exit
    Load,
}

impl Cli {
    fn apply(&self, mut config: AppConfig) -> AppConfig {
        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(database_url) = &self.database_url {
            config.database_url = database_url.clone();
        }
        config
    }
}

/// Record store and dataset source named by the configuration.
async fn open_backends(
    config: &AppConfig,
) -> Result<(Arc<dyn RecordStore>, Arc<dyn TransactionSource>)> {
    let store = open_store(&config.database_url)
        .await
        .with_context(|| format!("failed to open record store '{}'", config.database_url))?;
    let source = HttpTransactionSource::new(&config.source_url, config.source_timeout)
        .context("failed to build source client")?;

    info!(
        database_url = %config.database_url,
        source = %source.url(),
        timeout_secs = config.source_timeout.as_secs(),
        "backends ready"
    );

    let source: Arc<dyn TransactionSource> = Arc::new(source);
    Ok((store, source))
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = cli.apply(
        AppConfig::from_env().context("failed to load application configuration")?,
    );

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config).await,
        Command::Load => load(config).await,
    }
}

async fn load(config: AppConfig) -> Result<()> {
    if config.database_url.starts_with("memory") {
        warn!("loading into an in-memory store, the data will not outlive this process");
    }

    let (store, source) = open_backends(&config).await?;

    let loaded = IngestionLoader::new(store, source)
        .reload()
        .await
        .context("failed to load transactions")?;

    info!(records = loaded, "load finished");
    Ok(())
}

async fn serve(config: AppConfig) -> Result<()> {
    let (store, source) = open_backends(&config).await?;
    let state = AppState::new(store, source);

    if config.load_on_start {
        match state.loader.reload().await {
            Ok(records) => info!(records, "dataset loaded at startup"),
            Err(err) => warn!(error = %err, "startup load failed, serving existing records"),
        }
    }

    let mut app = build_router(state);
    if config.cors_enabled {
        app = with_cors(app);
    }

    let addr = config.address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;

    info!(address = %addr, "salesboard started");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("salesboard=debug,tower_http=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "unable to install Ctrl+C signal handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!(error = %err, "unable to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
