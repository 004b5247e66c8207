//! Confirmation submission and its in-flight guard.
//!
//! `Idle -> Submitting -> Idle`, remembering whether the last attempt
//! succeeded. A request made while `Submitting` is dropped, not queued.

use tracing::{error, info, warn};

use crate::backend::GuestBackend;
use crate::error::RsvpError;
use crate::protocol::{ConfirmationEntry, ConfirmationRequest};
use crate::selection::{PartyView, ToggleStates};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitState {
    #[default]
    Idle,
    Submitting,
}

/// What a submit request turned into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitAttempt {
    Sent,
    AlreadyInFlight,
}

#[derive(Debug, Default)]
pub struct Submitter {
    state: SubmitState,
    last: Option<SubmitOutcome>,
}

/// Payload from the controls as they are now, in render order.
pub fn build_payload(view: &PartyView, states: &ToggleStates) -> ConfirmationRequest {
    let info = view
        .toggles
        .iter()
        .enumerate()
        .map(|(index, toggle)| ConfirmationEntry {
            id: toggle.guest_id.clone(),
            attending: states.get(index).unwrap_or(toggle.attending_default),
        })
        .collect();

    ConfirmationRequest { info }
}

impl Submitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SubmitState {
        self.state
    }

    pub fn is_submitting(&self) -> bool {
        self.state == SubmitState::Submitting
    }

    pub fn last_outcome(&self) -> Option<SubmitOutcome> {
        self.last
    }

    /// Checks preconditions and enters `Submitting`.
    ///
    /// Returns `Ok(None)` when a submission is already in flight. Local
    /// precondition failures leave the state untouched.
    pub fn begin(
        &mut self,
        party: Option<(&PartyView, &ToggleStates)>,
    ) -> Result<Option<ConfirmationRequest>, RsvpError> {
        if self.is_submitting() {
            return Ok(None);
        }

        let (view, states) = party.ok_or(RsvpError::NoSelection)?;
        let payload = build_payload(view, states);
        if payload.info.is_empty() {
            return Err(RsvpError::EmptyPayload);
        }

        self.state = SubmitState::Submitting;
        Ok(Some(payload))
    }

    /// Leaves `Submitting` with the result of the network write.
    pub fn finish(&mut self, result: &Result<(), RsvpError>) -> SubmitOutcome {
        let outcome = match result {
            Ok(()) => {
                info!("Confirmation accepted");
                SubmitOutcome::Succeeded
            }
            Err(e) if e.is_remote() => {
                error!("Confirmation failed: {e}");
                SubmitOutcome::Failed
            }
            Err(e) => {
                warn!("Confirmation not sent: {e}");
                SubmitOutcome::Failed
            }
        };

        self.state = SubmitState::Idle;
        self.last = Some(outcome);
        outcome
    }

    /// Runs one full attempt against `backend`. No retry on failure.
    pub async fn submit<B>(
        &mut self,
        backend: &B,
        party: Option<(&PartyView, &ToggleStates)>,
    ) -> Result<SubmitAttempt, RsvpError>
    where
        B: GuestBackend + ?Sized,
    {
        let Some(payload) = self.begin(party)? else {
            return Ok(SubmitAttempt::AlreadyInFlight);
        };

        let result = backend.send_confirmation(&payload).await;
        self.finish(&result);
        result.map(|()| SubmitAttempt::Sent)
    }
}
