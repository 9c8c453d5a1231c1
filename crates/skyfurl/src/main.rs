//! skyfurl - HTTP server for Bluesky post unfurl pages.
//!
//! Serves HTML pages with Open Graph tags for Bluesky posts, or redirects
//! straight to a post's media.

use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use skyfurl::{AppState, Config};

/// skyfurl - Open Graph unfurl pages for Bluesky posts.
#[derive(Parser, Debug)]
#[command(name = "skyfurl")]
#[command(about = "Open Graph unfurl server for Bluesky post links", long_about = None)]
struct Args {
    /// Path to .env file (optional).
    #[arg(long, env = "DOTENV_PATH", default_value = ".env")]
    dotenv: String,

    /// Check configuration and the page template, then exit without serving.
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if std::path::Path::new(&args.dotenv).exists() {
        dotenvy::from_path(&args.dotenv)?;
        eprintln!("Loaded environment from {}", args.dotenv);
    }

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info,skyfurl=debug".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    tracing::info!(
        appview = %config.appview_url,
        blob_service = %config.blob_service_url,
        template = ?config.template_path,
        "skyfurl {} starting",
        env!("CARGO_PKG_VERSION"),
    );

    let bind_addr = config.bind_addr.clone();
    let state = AppState::new(config)?;

    if args.check {
        tracing::info!("configuration ok");
        return Ok(());
    }

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, skyfurl::app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

/// Resolves on Ctrl+C; in-flight requests are allowed to finish.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received, stopping gracefully");
}
