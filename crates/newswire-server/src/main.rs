use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use newswire_core::AppConfig;
use newswire_server::{create_app, AppState};

#[derive(Parser)]
#[command(name = "newswire")]
#[command(author, version, about = "Keyword-filtered news aggregation and article reader API")]
struct Cli {
    /// Path to the configuration file (defaults to ~/.config/newswire/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen address, overriding the configuration
    #[arg(short, long)]
    bind: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = match cli.config {
        Some(path) => AppConfig::load_from(&path)?,
        None => AppConfig::load()?,
    };

    let addr: SocketAddr = match cli.bind {
        Some(addr) => addr,
        None => config.server.bind_addr.parse()?,
    };

    let state = AppState::new(&config)?;
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
