//! Inventory HTTP server

use camino::Utf8PathBuf;
use clap::Parser;
use eyre::WrapErr;
use inventory::{ConfigLayer, InventoryBuilder, ServerConfig, UploadStore};
use tracing_subscriber::EnvFilter;

/// Inventory tracking service
#[derive(Debug, Parser)]
#[command(version, about, disable_help_flag = true)]
struct Cli {
    /// Address to bind
    #[arg(short = 'h', long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Cache directory, created if missing
    #[arg(short, long)]
    cache: Option<Utf8PathBuf>,

    /// Directory for uploaded photos (defaults to a temporary directory)
    #[arg(long)]
    uploads: Option<Utf8PathBuf>,

    /// Maximum request body size in bytes
    #[arg(long)]
    max_upload_bytes: Option<usize>,

    /// TOML file with default settings
    #[arg(long)]
    config: Option<Utf8PathBuf>,

    /// Print help
    #[arg(long, action = clap::ArgAction::Help)]
    help: Option<bool>,
}

impl Cli {
    fn into_config(self) -> eyre::Result<ServerConfig> {
        let file = match &self.config {
            Some(path) => ConfigLayer::from_file(path)?,
            None => ConfigLayer::default(),
        };

        let overrides = ConfigLayer {
            host: self.host,
            port: self.port,
            cache: self.cache,
            uploads: self.uploads,
            max_upload_bytes: self.max_upload_bytes,
        };

        Ok(ServerConfig::try_from(file.merge(overrides))?)
    }
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Cli::parse().into_config()?;

    config
        .ensure_cache_dir()
        .await
        .wrap_err_with(|| format!("creating cache directory {}", config.cache))?;

    let uploads = match &config.uploads {
        Some(path) => UploadStore::new(path.clone())
            .await
            .wrap_err_with(|| format!("creating upload directory {path}"))?,
        None => UploadStore::temporary().wrap_err("creating temporary upload directory")?,
    };
    tracing::info!(uploads = %uploads.root(), "storing photos");

    let app = InventoryBuilder::new(uploads)
        .body_limit(config.max_upload_bytes)
        .build();

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port))
        .await
        .wrap_err_with(|| format!("binding {}:{}", config.host, config.port))?;

    tracing::info!("Inventory listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            tracing::error!(%error, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::error!(%error, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
