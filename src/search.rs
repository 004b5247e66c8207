//! Name search over the loaded directory.

use crate::common::Guest;
use crate::directory::Directory;
use crate::normalize::normalize;

/// Most results shown for one query.
pub const MAX_RESULTS: usize = 20;

/// Result of a search. "Nothing typed" and "nothing found" are reported
/// differently to the visitor, so they are distinct variants.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SearchOutcome {
    #[default]
    NoQuery,
    NoMatches,
    Matches(Vec<Guest>),
}

impl SearchOutcome {
    pub fn guests(&self) -> &[Guest] {
        match self {
            SearchOutcome::Matches(guests) => guests,
            SearchOutcome::NoQuery | SearchOutcome::NoMatches => &[],
        }
    }
}

/// Guests whose folded name contains the folded query, in directory order,
/// capped at [`MAX_RESULTS`].
pub fn search(directory: &Directory, query: &str) -> SearchOutcome {
    let needle = normalize(query);
    if needle.is_empty() {
        return SearchOutcome::NoQuery;
    }

    let matches: Vec<Guest> = directory
        .entries()
        .filter(|(_, key)| key.contains(needle.as_str()))
        .map(|(guest, _)| guest.clone())
        .take(MAX_RESULTS)
        .collect();

    if matches.is_empty() {
        SearchOutcome::NoMatches
    } else {
        SearchOutcome::Matches(matches)
    }
}
