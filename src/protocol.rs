//! Wire contract with the guest backend.
//!
//! The directory read is decoded leniently: the backend schema is owned
//! elsewhere, so records that cannot be used are dropped instead of failing
//! the whole load.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::common::*;
use crate::error::RsvpError;

const ID_FIELDS: &[&str] = &["id"];
const NAME_FIELDS: &[&str] = &["name", "nome"];
const GROUP_FIELDS: &[&str] = &["group", "grupo"];
const ATTENDING_FIELDS: &[&str] = &["attending", "presenca"];

/// One `{id, attending}` pair of a confirmation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfirmationEntry {
    pub id: GuestId,
    pub attending: bool,
}

/// Body of the confirmation write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfirmationRequest {
    pub info: Vec<ConfirmationEntry>,
}

/// Body returned by the stand-in server after a confirmation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfirmationReceipt {
    pub updated: usize,
}

impl ConfirmationRequest {
    /// Serializes the request as JSON
    pub fn to_json(&self) -> Result<String, RsvpError> {
        serde_json::to_string(self).map_err(|e| RsvpError::Submit {
            status: None,
            detail: format!("could not encode confirmation: {e}"),
        })
    }

    /// Parses a request from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Decodes a raw directory response body.
pub fn decode_guest_list(body: &str) -> Result<Vec<Guest>, RsvpError> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| RsvpError::Schema(format!("invalid JSON: {e}")))?;
    decode_guest_records(&value)
}

/// Decodes an already parsed directory response.
///
/// Fails only when the body is not an array; unusable records are skipped.
pub fn decode_guest_records(value: &Value) -> Result<Vec<Guest>, RsvpError> {
    let Value::Array(records) = value else {
        return Err(RsvpError::Schema(format!(
            "expected an array of guests, got {}",
            json_kind(value)
        )));
    };

    let guests: Vec<Guest> = records
        .iter()
        .filter_map(Value::as_object)
        .filter_map(decode_guest)
        .collect();

    let dropped = records.len() - guests.len();
    if dropped > 0 {
        warn!("Dropped {dropped} guest records without a usable id or name");
    }

    Ok(guests)
}

fn decode_guest(record: &Map<String, Value>) -> Option<Guest> {
    let id = match field(record, ID_FIELDS)? {
        Value::Number(n) => GuestId::Number(n.clone()),
        Value::String(s) if !s.is_empty() => GuestId::Text(s.clone()),
        _ => return None,
    };

    let name = match field(record, NAME_FIELDS)? {
        Value::String(s) if !s.is_empty() => s.clone(),
        _ => return None,
    };

    // falsy party labels share the sentinel; any other scalar keeps its text
    let group = match field(record, GROUP_FIELDS) {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(value) if is_truthy(value) => value.to_string(),
        _ => NO_GROUP.to_string(),
    };

    let attending = field(record, ATTENDING_FIELDS).is_some_and(is_truthy);

    Some(Guest {
        id,
        name,
        group,
        attending,
    })
}

/// First non-null value among the accepted spellings of a field.
fn field<'a>(record: &'a Map<String, Value>, names: &[&str]) -> Option<&'a Value> {
    names
        .iter()
        .filter_map(|name| record.get(*name))
        .find(|value| !value.is_null())
}

/// JavaScript-style truthiness, which is how the backend's flags are meant.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
