//! The guest directory: every guest of the current session, sorted by name,
//! plus the grouping of guests into parties.
//!
//! A directory is built once from the backend response and never mutated.

use std::collections::HashMap;

use tracing::{debug, info};

use crate::backend::GuestBackend;
use crate::common::*;
use crate::error::RsvpError;
use crate::normalize::{compare_names, normalize};
use crate::protocol::decode_guest_list;

#[derive(Debug, Clone)]
pub struct Directory {
    guests: Vec<Guest>,
    /// Search keys, index-aligned with `guests`.
    keys: Vec<String>,
    parties: HashMap<String, Vec<Guest>>,
}

impl Directory {
    /// Builds a directory from decoded guests.
    pub fn from_guests(mut guests: Vec<Guest>) -> Result<Self, RsvpError> {
        if guests.is_empty() {
            return Err(RsvpError::EmptyDirectory);
        }

        guests.sort_by(|a, b| compare_names(&a.name, &b.name));

        let keys = guests.iter().map(|g| normalize(&g.name)).collect();

        let mut parties: HashMap<String, Vec<Guest>> = HashMap::new();
        for guest in &guests {
            parties
                .entry(guest.group.clone())
                .or_default()
                .push(guest.clone());
        }

        debug!(
            "Directory built with {} guests in {} parties",
            guests.len(),
            parties.len()
        );

        Ok(Self {
            guests,
            keys,
            parties,
        })
    }

    /// Builds a directory from a raw directory read body.
    pub fn from_response(body: &str) -> Result<Self, RsvpError> {
        Self::from_guests(decode_guest_list(body)?)
    }

    pub fn guests(&self) -> &[Guest] {
        &self.guests
    }

    pub fn len(&self) -> usize {
        self.guests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.guests.is_empty()
    }

    /// Members of a party in name order.
    pub fn party(&self, group: &str) -> Option<&[Guest]> {
        self.parties.get(group).map(Vec::as_slice)
    }

    pub fn party_count(&self) -> usize {
        self.parties.len()
    }

    /// Guests paired with their search keys, in name order.
    pub(crate) fn entries(&self) -> impl Iterator<Item = (&Guest, &str)> {
        self.guests
            .iter()
            .zip(self.keys.iter().map(String::as_str))
    }
}

/// Reads the full guest list from the backend. Single attempt, no retry.
pub async fn load<B>(backend: &B) -> Result<Directory, RsvpError>
where
    B: GuestBackend + ?Sized,
{
    let body = backend.fetch_guests().await?;
    let directory = Directory::from_response(&body)?;

    info!("Loaded {} guests", directory.len());

    Ok(directory)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Guest> {
        vec![
            Guest::new(3, "Rui Silva", "A", false),
            Guest::new(1, "Ana Silva", "A", true),
            Guest::new(2, "Édson Costa", "", false),
            Guest::new(4, "bruno Lima", "B", false),
        ]
    }

    #[test]
    fn empty_input_is_empty_directory() {
        assert!(matches!(
            Directory::from_guests(Vec::new()),
            Err(RsvpError::EmptyDirectory)
        ));
    }

    #[test]
    fn all_records_dropped_is_empty_directory() {
        assert!(matches!(
            Directory::from_response(r#"[{"id": null, "name": "X"}]"#),
            Err(RsvpError::EmptyDirectory)
        ));
    }

    #[test]
    fn guests_are_sorted_ignoring_case_and_accents() {
        let directory = Directory::from_guests(sample()).unwrap();
        let names: Vec<&str> = directory.guests().iter().map(|g| g.name.as_str()).collect();

        assert_eq!(names, ["Ana Silva", "bruno Lima", "Édson Costa", "Rui Silva"]);
    }

    #[test]
    fn parties_group_members_in_name_order() {
        let directory = Directory::from_guests(sample()).unwrap();

        let party_a: Vec<&str> = directory
            .party("A")
            .unwrap()
            .iter()
            .map(|g| g.name.as_str())
            .collect();
        assert_eq!(party_a, ["Ana Silva", "Rui Silva"]);

        assert_eq!(directory.party(NO_GROUP).unwrap().len(), 1);
        assert_eq!(directory.party_count(), 3);
        assert!(directory.party("missing").is_none());
    }

    #[test]
    fn keys_are_normalized_names() {
        let directory = Directory::from_guests(sample()).unwrap();
        let keys: Vec<&str> = directory.entries().map(|(_, key)| key).collect();

        assert_eq!(keys, ["ana silva", "bruno lima", "edson costa", "rui silva"]);
    }
}
