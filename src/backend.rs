//! Network boundary to the guest backend.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CACHE_CONTROL, CONTENT_TYPE};
use tracing::debug;

use crate::config::Config;
use crate::error::RsvpError;
use crate::protocol::ConfirmationRequest;

const JSON: &str = "application/json";

/// The two operations the workflow needs from the backend.
#[async_trait]
pub trait GuestBackend: Send + Sync {
    /// Fetches the raw guest list body. Non-success responses are `Fetch` errors.
    async fn fetch_guests(&self) -> Result<String, RsvpError>;

    /// Posts a confirmation. Non-success responses are `Submit` errors.
    async fn send_confirmation(&self, request: &ConfirmationRequest) -> Result<(), RsvpError>;
}

/// [`GuestBackend`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    guests_url: String,
    confirm_url: String,
}

impl HttpBackend {
    pub fn new(guests_url: impl Into<String>, confirm_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            guests_url: guests_url.into(),
            confirm_url: confirm_url.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.guests_url, &config.confirm_url)
    }
}

#[async_trait]
impl GuestBackend for HttpBackend {
    async fn fetch_guests(&self) -> Result<String, RsvpError> {
        debug!("GET {}", self.guests_url);

        let response = self
            .client
            .get(&self.guests_url)
            .header(ACCEPT, JSON)
            .header(CACHE_CONTROL, "no-store")
            .send()
            .await
            .map_err(|e| RsvpError::Fetch {
                status: None,
                detail: e.to_string(),
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| RsvpError::Fetch {
            status: Some(status.as_u16()),
            detail: e.to_string(),
        })?;

        if !status.is_success() {
            return Err(RsvpError::Fetch {
                status: Some(status.as_u16()),
                detail: body,
            });
        }

        Ok(body)
    }

    async fn send_confirmation(&self, request: &ConfirmationRequest) -> Result<(), RsvpError> {
        let body = request.to_json()?;
        debug!("POST {} with {} entries", self.confirm_url, request.info.len());

        let response = self
            .client
            .post(&self.confirm_url)
            .header(CONTENT_TYPE, JSON)
            .header(ACCEPT, JSON)
            .body(body)
            .send()
            .await
            .map_err(|e| RsvpError::Submit {
                status: None,
                detail: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(RsvpError::Submit {
                status: Some(status.as_u16()),
                detail: if text.is_empty() {
                    "confirmation rejected".to_string()
                } else {
                    text
                },
            });
        }

        Ok(())
    }
}
