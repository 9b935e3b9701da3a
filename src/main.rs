//! TubeGrab - YouTube download-link resolver
//!
//! A stateless HTTP service that turns a video id plus a requested format
//! into a direct download URL, by normalizing and ranking the quality
//! variants of a configured upstream extraction provider.

use anyhow::Result;
use clap::Parser;
use std::net::{IpAddr, SocketAddr};
use tracing::{info, warn};
use tubegrab::server::routes::{router, AppState};
use tubegrab::utils::config::AppSettings;

#[derive(Parser)]
struct Args {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1")]
    host: IpAddr,

    /// Port to listen on
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    tracing_subscriber::fmt::init();

    let settings = AppSettings::from_env();
    if settings.api_key.is_none() {
        warn!("No API key configured; requests will fail until TUBEGRAB_API_KEY is set");
    }
    info!(
        "Provider: {}, rank policy: {}, resolution ceiling: {:?}",
        settings.provider.as_str(),
        settings.rank_policy.as_str(),
        settings.resolution_ceiling
    );

    let state = AppState::from_settings(settings);
    let addr = SocketAddr::new(args.host, args.port);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, router(state)).await?;

    Ok(())
}
