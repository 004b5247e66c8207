//! Visitor feedback: the single status line and the success acknowledgment.

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusKind {
    #[default]
    Info,
    Success,
    Error,
}

/// One line of status text. Each update replaces the previous one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusLine {
    kind: StatusKind,
    message: String,
    updated_at: Option<DateTime<Utc>>,
}

impl StatusLine {
    pub fn info(&mut self, message: &str) {
        self.set(StatusKind::Info, message);
    }

    /// A success with an empty message is how the line is cleared.
    pub fn success(&mut self, message: &str) {
        self.set(StatusKind::Success, message);
    }

    pub fn error(&mut self, message: &str) {
        self.set(StatusKind::Error, message);
    }

    pub fn clear(&mut self) {
        self.success("");
    }

    fn set(&mut self, kind: StatusKind, message: &str) {
        self.kind = kind;
        self.message = message.to_string();
        self.updated_at = Some(Utc::now());
    }

    pub fn kind(&self) -> StatusKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_empty(&self) -> bool {
        self.message.is_empty()
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }
}

/// Ways the visitor can close the acknowledgment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissTrigger {
    /// The acknowledgment control was activated.
    Control,
    Escape,
    /// A click on the overlay; only clicks outside the content close it.
    Click { inside_content: bool },
}

/// Where input focus should be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    AcknowledgeControl,
}

/// Leaving the workflow for the configured destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub destination: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum AckState {
    #[default]
    Hidden,
    Shown,
    Dismissed,
}

/// Modal acknowledgment shown after a successful confirmation.
#[derive(Debug, Clone, Default)]
pub struct Acknowledgment {
    state: AckState,
    destination: String,
}

impl Acknowledgment {
    pub fn new(destination: impl Into<String>) -> Self {
        Self {
            state: AckState::Hidden,
            destination: destination.into(),
        }
    }

    /// Shows the modal and returns where focus moves.
    pub fn present(&mut self) -> Focus {
        self.state = AckState::Shown;
        Focus::AcknowledgeControl
    }

    pub fn is_visible(&self) -> bool {
        self.state == AckState::Shown
    }

    pub fn is_dismissed(&self) -> bool {
        self.state == AckState::Dismissed
    }

    pub fn focus(&self) -> Option<Focus> {
        self.is_visible().then_some(Focus::AcknowledgeControl)
    }

    /// Applies a trigger. Navigates at most once per presentation.
    pub fn dismiss(&mut self, trigger: DismissTrigger) -> Option<Navigation> {
        if self.state != AckState::Shown {
            return None;
        }

        if let DismissTrigger::Click {
            inside_content: true,
        } = trigger
        {
            return None;
        }

        self.state = AckState::Dismissed;
        Some(Navigation {
            destination: self.destination.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_update_replaces_the_last() {
        let mut status = StatusLine::default();
        status.error("failed");
        status.info("loading");

        assert_eq!(status.kind(), StatusKind::Info);
        assert_eq!(status.message(), "loading");
        assert!(status.updated_at().is_some());

        status.clear();
        assert!(status.is_empty());
        assert_eq!(status.kind(), StatusKind::Success);
    }

    #[test]
    fn hidden_modal_ignores_triggers() {
        let mut ack = Acknowledgment::new("index.html");
        assert_eq!(ack.dismiss(DismissTrigger::Escape), None);
        assert_eq!(ack.focus(), None);
    }

    #[test]
    fn present_moves_focus_to_control() {
        let mut ack = Acknowledgment::new("index.html");
        assert_eq!(ack.present(), Focus::AcknowledgeControl);
        assert_eq!(ack.focus(), Some(Focus::AcknowledgeControl));
    }

    #[test]
    fn every_trigger_dismisses_once() {
        for trigger in [
            DismissTrigger::Control,
            DismissTrigger::Escape,
            DismissTrigger::Click { inside_content: false },
        ] {
            let mut ack = Acknowledgment::new("index.html");
            ack.present();

            let nav = ack.dismiss(trigger);
            assert_eq!(
                nav,
                Some(Navigation {
                    destination: "index.html".to_string()
                })
            );
            assert!(ack.is_dismissed());
            assert_eq!(ack.dismiss(DismissTrigger::Control), None);
            assert_eq!(ack.dismiss(trigger), None);
        }
    }

    #[test]
    fn click_inside_content_keeps_modal_open() {
        let mut ack = Acknowledgment::new("/");
        ack.present();

        assert_eq!(ack.dismiss(DismissTrigger::Click { inside_content: true }), None);
        assert!(ack.is_visible());
        assert!(ack.dismiss(DismissTrigger::Escape).is_some());
    }
}
