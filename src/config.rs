use std::{env, fmt::Display, path::PathBuf, str::FromStr};

use tracing::{info, warn};

pub const DEFAULT_GUESTS_URL: &str =
    "https://x8ki-letl-twmt.n7.xano.io/api:ILNGnLID/casamento/get/convidados";
pub const DEFAULT_CONFIRM_URL: &str =
    "https://x8ki-letl-twmt.n7.xano.io/api:ILNGnLID/casamento/confirm";
pub const DEFAULT_REDIRECT: &str = "index.html";

#[derive(Debug, Clone)]
pub struct Config {
    pub guests_url: String,
    pub confirm_url: String,
    /// Where the visitor goes once the acknowledgment is dismissed.
    pub redirect: String,
    pub server_port: u16,
    pub guests_file: PathBuf,
}

impl Config {
    pub fn load() -> Self {
        Self {
            guests_url: try_load("RSVP_GUESTS_URL", DEFAULT_GUESTS_URL.to_string()),
            confirm_url: try_load("RSVP_CONFIRM_URL", DEFAULT_CONFIRM_URL.to_string()),
            redirect: try_load("RSVP_REDIRECT", DEFAULT_REDIRECT.to_string()),
            server_port: try_load("RSVP_SERVER_PORT", 8080),
            guests_file: try_load("RSVP_GUESTS_FILE", PathBuf::from("data/guests.json")),
        }
    }
}

fn var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn try_load<T>(key: &str, default: T) -> T
where
    T: FromStr + std::fmt::Debug,
    T::Err: Display,
{
    let Some(raw) = var(key) else {
        info!("{key} not set, using default: {default:?}");
        return default;
    };

    raw.trim().parse().unwrap_or_else(|e| {
        warn!("Invalid {key} value {raw:?}: {e}, using default: {default:?}");
        default
    })
}
