use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use rsvp::config::Config;
use rsvp::server::{serve, GuestStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    println!("💍 RSVP Guest Server");
    println!("====================");

    let config = Config::load();
    let store = Arc::new(GuestStore::load(&config.guests_file)?);

    let address = format!("0.0.0.0:{}", config.server_port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("cannot bind {address}"))?;

    serve(listener, store).await?;

    println!("Server shutting down...");
    Ok(())
}
