//! Error taxonomy for the RSVP workflow.
//!
//! Every variant carries operator detail in its `Display` text and maps to a
//! fixed visitor-facing sentence through [`RsvpError::user_message`].

/// Errors raised by loading, selecting and confirming.
#[derive(Debug, thiserror::Error)]
pub enum RsvpError {
    /// Directory read returned a non-success status or never completed
    #[error("guest list request failed{}: {detail}", status_suffix(.status))]
    Fetch { status: Option<u16>, detail: String },

    /// Directory read body was not a JSON array
    #[error("unexpected guest list format: {0}")]
    Schema(String),

    /// Directory read succeeded but no usable guest survived decoding
    #[error("guest list is empty")]
    EmptyDirectory,

    /// Submit attempted with no guest selected
    #[error("no guest selected")]
    NoSelection,

    /// Submit attempted with no attendance controls on screen
    #[error("nothing to confirm")]
    EmptyPayload,

    /// Selection refers to a result that is not on screen
    #[error("no search result at position {0}")]
    UnknownGuest(usize),

    /// Confirmation write returned a non-success status or never completed
    #[error("confirmation request failed{}: {detail}", status_suffix(.status))]
    Submit { status: Option<u16>, detail: String },

    #[error("configuration error: {0}")]
    Config(String),
}

fn status_suffix(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!(" with status {code}"),
        None => String::new(),
    }
}

impl RsvpError {
    /// Status line text shown to the visitor. Never includes diagnostic detail.
    pub fn user_message(&self) -> &'static str {
        match self {
            RsvpError::Fetch { .. } | RsvpError::Schema(_) => {
                "We couldn't load the guest list. Please reload the page."
            }
            RsvpError::EmptyDirectory => "No guests found.",
            RsvpError::NoSelection => "Search for your name and select it first.",
            RsvpError::EmptyPayload => "Select at least one guest from the party.",
            RsvpError::UnknownGuest(_) => "Pick one of the names listed in the results.",
            RsvpError::Submit { .. } => {
                "We couldn't send your confirmation right now. Please try again in a moment."
            }
            RsvpError::Config(_) => "This page is not configured correctly.",
        }
    }

    /// Whether the failure came from the network boundary rather than a local check.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            RsvpError::Fetch { .. }
                | RsvpError::Schema(_)
                | RsvpError::EmptyDirectory
                | RsvpError::Submit { .. }
        )
    }
}
