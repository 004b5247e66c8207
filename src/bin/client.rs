use tracing_subscriber::{fmt, EnvFilter};

use rsvp::backend::HttpBackend;
use rsvp::client::RsvpClient;
use rsvp::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load();
    let backend = HttpBackend::from_config(&config);

    let mut client = RsvpClient::new(backend, &config.redirect);
    client.run().await?;

    Ok(())
}
