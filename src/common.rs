use std::fmt;

use serde::{Deserialize, Serialize};

/// Party label given to guests the backend left without one.
pub const NO_GROUP: &str = "No group";

/// Backend identifier for a guest.
///
/// Kept in the JSON type it arrived in so the confirmation echoes it back
/// unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GuestId {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for GuestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GuestId::Number(n) => write!(f, "{}", n),
            GuestId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for GuestId {
    fn from(value: i64) -> Self {
        GuestId::Number(value.into())
    }
}

impl From<i32> for GuestId {
    fn from(value: i32) -> Self {
        GuestId::Number(value.into())
    }
}

impl From<&str> for GuestId {
    fn from(value: &str) -> Self {
        GuestId::Text(value.to_string())
    }
}

/// A guest as known at directory load time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guest {
    pub id: GuestId,
    pub name: String,
    pub group: String,
    pub attending: bool,
}

impl Guest {
    pub fn new(id: impl Into<GuestId>, name: &str, group: &str, attending: bool) -> Self {
        Self {
            id: id.into(),
            name: name.to_string(),
            group: if group.is_empty() { NO_GROUP.to_string() } else { group.to_string() },
            attending,
        }
    }
}

/// One attendance control rendered for the selected party.
#[derive(Debug, Clone, PartialEq)]
pub struct ToggleDescriptor {
    pub guest_id: GuestId,
    pub name: String,
    pub attending_default: bool,
}

impl From<&Guest> for ToggleDescriptor {
    fn from(guest: &Guest) -> Self {
        Self {
            guest_id: guest.id.clone(),
            name: guest.name.clone(),
            attending_default: guest.attending,
        }
    }
}
