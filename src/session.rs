//! The RSVP session: everything one visit holds in memory, and the
//! transitions user input and network completions drive it through.
//!
//! Transitions are plain methods on [`Session`]; the only awaits are in
//! [`Session::load`] and [`Session::submit`], which wrap the split
//! `begin_*`/`finish_*` pairs around one backend call. Rendering is
//! [`Session::view`], a pure derivation of the current state.

use tracing::{error, warn};

use crate::backend::GuestBackend;
use crate::directory::{self, Directory};
use crate::error::RsvpError;
use crate::normalize::normalize;
use crate::protocol::ConfirmationRequest;
use crate::search::{search, SearchOutcome};
use crate::selection::{select, PartyView, ToggleStates};
use crate::status::{Acknowledgment, DismissTrigger, Focus, Navigation, StatusKind, StatusLine};
use crate::submitter::{SubmitOutcome, Submitter};

pub const LOADING_MESSAGE: &str = "Loading guests…";
pub const SENDING_MESSAGE: &str = "Sending your confirmation…";
pub const NO_QUERY_HINT: &str = "Type a name and search.";
pub const NO_MATCHES_HINT: &str = "No name found. Try part of the surname.";

#[derive(Debug, Default)]
pub enum DirectoryState {
    #[default]
    Unloaded,
    Loading,
    Loaded(Directory),
    Failed,
}

#[derive(Debug, Clone)]
struct PartySelection {
    view: PartyView,
    states: ToggleStates,
}

#[derive(Debug, Default)]
pub struct Session {
    directory: DirectoryState,
    query: String,
    /// `None` when no result list is on screen.
    results: Option<SearchOutcome>,
    party: Option<PartySelection>,
    submitter: Submitter,
    status: StatusLine,
    ack: Acknowledgment,
}

/// Result list as shown.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultsView {
    Hidden,
    Hint(&'static str),
    Names(Vec<String>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToggleView {
    pub name: String,
    pub attending: bool,
}

/// Everything a front-end needs to draw the page.
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub query: String,
    pub status_kind: StatusKind,
    pub status: String,
    pub results: ResultsView,
    pub party: Vec<ToggleView>,
    pub submit_enabled: bool,
    pub acknowledgment_visible: bool,
    pub focus: Option<Focus>,
}

impl Session {
    /// `redirect` is where the visitor goes after the acknowledgment.
    pub fn new(redirect: impl Into<String>) -> Self {
        Self {
            ack: Acknowledgment::new(redirect),
            ..Self::default()
        }
    }

    pub fn directory(&self) -> Option<&Directory> {
        match &self.directory {
            DirectoryState::Loaded(directory) => Some(directory),
            _ => None,
        }
    }

    pub fn directory_state(&self) -> &DirectoryState {
        &self.directory
    }

    pub fn is_loaded(&self) -> bool {
        self.directory().is_some()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> Option<&SearchOutcome> {
        self.results.as_ref()
    }

    pub fn party(&self) -> Option<&PartyView> {
        self.party.as_ref().map(|p| &p.view)
    }

    pub fn toggle_states(&self) -> Option<&ToggleStates> {
        self.party.as_ref().map(|p| &p.states)
    }

    pub fn status(&self) -> &StatusLine {
        &self.status
    }

    pub fn acknowledgment(&self) -> &Acknowledgment {
        &self.ack
    }

    pub fn is_submitting(&self) -> bool {
        self.submitter.is_submitting()
    }

    pub fn submit_enabled(&self) -> bool {
        self.is_loaded()
            && self.party.is_some()
            && !self.submitter.is_submitting()
            && !self.ack.is_visible()
            && !self.ack.is_dismissed()
    }

    // Loading

    pub fn begin_load(&mut self) {
        self.directory = DirectoryState::Loading;
        self.status.info(LOADING_MESSAGE);
    }

    pub fn finish_load(&mut self, result: Result<Directory, RsvpError>) {
        match result {
            Ok(directory) => {
                self.directory = DirectoryState::Loaded(directory);
                self.status.clear();
            }
            Err(e) => {
                if e.is_remote() {
                    error!("Could not load guest list: {e}");
                } else {
                    warn!("Guest list not loaded: {e}");
                }
                self.directory = DirectoryState::Failed;
                self.status.error(e.user_message());
            }
        }
    }

    /// Loads the directory once. Failures end up on the status line.
    pub async fn load<B>(&mut self, backend: &B)
    where
        B: GuestBackend + ?Sized,
    {
        self.begin_load();
        let result = directory::load(backend).await;
        self.finish_load(result);
    }

    // Searching and selecting

    /// Runs a search, dropping any current selection.
    pub fn search(&mut self, query: &str) -> &SearchOutcome {
        self.query = query.to_string();
        self.party = None;

        let outcome = match self.directory() {
            Some(directory) => search(directory, query),
            None if normalize(query).is_empty() => SearchOutcome::NoQuery,
            None => SearchOutcome::NoMatches,
        };

        self.results.insert(outcome)
    }

    /// Selects the result at `position` and renders their party.
    pub fn select(&mut self, position: usize) -> Result<&PartyView, RsvpError> {
        let view = self
            .results
            .as_ref()
            .and_then(|r| r.guests().get(position))
            .and_then(|guest| self.directory().map(|d| select(d, guest)));

        let Some(view) = view else {
            let e = RsvpError::UnknownGuest(position);
            warn!("{e}");
            self.status.error(e.user_message());
            return Err(e);
        };

        let states = ToggleStates::seeded(&view);

        self.query = view.selected.name.clone();
        self.results = None;
        self.status.clear();

        let party = self.party.insert(PartySelection { view, states });
        Ok(&party.view)
    }

    /// Flips member `index` of the current party.
    pub fn toggle(&mut self, index: usize) -> Option<bool> {
        self.party.as_mut()?.states.toggle(index)
    }

    pub fn set_attending(&mut self, index: usize, attending: bool) -> bool {
        self.party
            .as_mut()
            .is_some_and(|p| p.states.set(index, attending))
    }

    // Submitting

    /// Starts a submission. `None` means nothing should be sent: a
    /// submission is already in flight, the acknowledgment has been shown,
    /// or a local check failed (reported on the status line).
    pub fn begin_submit(&mut self) -> Option<ConfirmationRequest> {
        if self.ack.is_visible() || self.ack.is_dismissed() {
            return None;
        }

        let party = self.party.as_ref().map(|p| (&p.view, &p.states));

        match self.submitter.begin(party) {
            Ok(Some(payload)) => {
                self.status.info(SENDING_MESSAGE);
                Some(payload)
            }
            Ok(None) => None,
            Err(e) => {
                warn!("Submit refused: {e}");
                self.status.error(e.user_message());
                None
            }
        }
    }

    pub fn finish_submit(&mut self, result: Result<(), RsvpError>) -> SubmitOutcome {
        let outcome = self.submitter.finish(&result);

        match result {
            Ok(()) => {
                self.status.clear();
                self.ack.present();
            }
            Err(e) => self.status.error(e.user_message()),
        }

        outcome
    }

    /// Sends the current party's attendance. `None` when nothing was sent.
    pub async fn submit<B>(&mut self, backend: &B) -> Option<SubmitOutcome>
    where
        B: GuestBackend + ?Sized,
    {
        let payload = self.begin_submit()?;
        let result = backend.send_confirmation(&payload).await;
        Some(self.finish_submit(result))
    }

    /// Applies a dismissal trigger to the acknowledgment.
    pub fn dismiss(&mut self, trigger: DismissTrigger) -> Option<Navigation> {
        self.ack.dismiss(trigger)
    }

    // Rendering

    pub fn view(&self) -> View {
        let results = match &self.results {
            None => ResultsView::Hidden,
            Some(SearchOutcome::NoQuery) => ResultsView::Hint(NO_QUERY_HINT),
            Some(SearchOutcome::NoMatches) => ResultsView::Hint(NO_MATCHES_HINT),
            Some(SearchOutcome::Matches(guests)) => {
                ResultsView::Names(guests.iter().map(|g| g.name.clone()).collect())
            }
        };

        let party = self
            .party
            .as_ref()
            .map(|p| {
                p.view
                    .toggles
                    .iter()
                    .enumerate()
                    .map(|(i, t)| ToggleView {
                        name: t.name.clone(),
                        attending: p.states.get(i).unwrap_or(t.attending_default),
                    })
                    .collect()
            })
            .unwrap_or_default();

        View {
            query: self.query.clone(),
            status_kind: self.status.kind(),
            status: self.status.message().to_string(),
            results,
            party,
            submit_enabled: self.submit_enabled(),
            acknowledgment_visible: self.ack.is_visible(),
            focus: self.ack.focus(),
        }
    }
}
