//! ohako - karaoke attempt tracker
//!
//! Serves the single-page web UI for logging karaoke song attempts and
//! browsing filtered listings, per-song statistics, and score trends.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

use ohako::config;
use ohako::store::RecordStore;
use ohako::{build_router, AppState};

#[derive(Parser, Debug)]
#[command(name = "ohako", version, about = "Single-user karaoke attempt tracker")]
struct Args {
    /// Data folder holding the record table (overrides OHAKO_DATA_FOLDER
    /// and the config file)
    #[arg(long)]
    data_folder: Option<PathBuf>,

    /// Listen port
    #[arg(long, default_value_t = config::DEFAULT_PORT)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting ohako v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();

    let data_folder = config::resolve_data_folder(args.data_folder.as_deref());
    let data_file = config::ensure_data_folder(&data_folder)?;
    info!("Record table: {}", data_file.display());

    let store = match RecordStore::load(&data_file) {
        Ok(store) => {
            info!("✓ Loaded {} recorded attempts", store.len());
            store
        }
        Err(e) => {
            error!("Failed to load record table: {}", e);
            return Err(e.into());
        }
    };

    let state = AppState::new(store);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", args.port)).await?;
    info!("ohako listening on http://127.0.0.1:{}", args.port);

    axum::serve(listener, app).await?;

    Ok(())
}
