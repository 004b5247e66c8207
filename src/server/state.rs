use std::{fs::read_to_string, io::ErrorKind, path::Path};

use chrono::Utc;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::error::RsvpError;
use crate::protocol::ConfirmationRequest;

const ATTENDING: &str = "attending";
const ATTENDING_PT: &str = "presenca";
const CONFIRMED_AT: &str = "confirmed_at";

/// Guest records held by the stand-in server, kept verbatim as JSON.
pub struct GuestStore {
    records: RwLock<Vec<Value>>,
}

impl GuestStore {
    pub fn new(records: Vec<Value>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    /// Seeds the store from a JSON array file. A missing file starts empty.
    pub fn load(path: &Path) -> Result<Self, RsvpError> {
        let text = match read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!("{} not found, starting with no guests", path.display());
                return Ok(Self::new(Vec::new()));
            }
            Err(e) => {
                return Err(RsvpError::Config(format!(
                    "cannot read {}: {e}",
                    path.display()
                )))
            }
        };

        let records = match serde_json::from_str(&text) {
            Ok(Value::Array(records)) => records,
            Ok(_) => {
                return Err(RsvpError::Config(format!(
                    "{} must hold a JSON array",
                    path.display()
                )))
            }
            Err(e) => {
                return Err(RsvpError::Config(format!(
                    "invalid JSON in {}: {e}",
                    path.display()
                )))
            }
        };

        info!("Loaded {} guest records from {}", records.len(), path.display());
        Ok(Self::new(records))
    }

    pub async fn snapshot(&self) -> Vec<Value> {
        self.records.read().await.clone()
    }

    /// Records each confirmation entry against the matching guest. Returns
    /// how many guests were updated; unknown ids are skipped.
    pub async fn apply(&self, request: &ConfirmationRequest) -> usize {
        let mut records = self.records.write().await;
        let confirmed_at = Utc::now().to_rfc3339();
        let mut updated = 0;

        for entry in &request.info {
            let id = match serde_json::to_value(&entry.id) {
                Ok(id) => id,
                Err(_) => continue,
            };

            let Some(record) = records
                .iter_mut()
                .filter_map(Value::as_object_mut)
                .find(|record| record.get("id") == Some(&id))
            else {
                warn!("Confirmation for unknown guest {}", entry.id);
                continue;
            };

            let key = if record.contains_key(ATTENDING_PT) && !record.contains_key(ATTENDING) {
                ATTENDING_PT
            } else {
                ATTENDING
            };
            record.insert(key.to_string(), Value::Bool(entry.attending));
            record.insert(CONFIRMED_AT.to_string(), Value::String(confirmed_at.clone()));
            updated += 1;
        }

        updated
    }
}
