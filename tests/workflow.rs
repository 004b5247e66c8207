//! End-to-end workflow against an in-memory backend.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use pretty_assertions::assert_eq;

use rsvp::backend::GuestBackend;
use rsvp::client::{Command, Flow, RsvpClient};
use rsvp::common::{Guest, GuestId};
use rsvp::error::RsvpError;
use rsvp::protocol::{ConfirmationEntry, ConfirmationRequest};
use rsvp::selection::{PartyView, ToggleStates};
use rsvp::session::{ResultsView, Session, ToggleView};
use rsvp::status::{DismissTrigger, StatusKind};
use rsvp::submitter::{SubmitAttempt, SubmitOutcome, Submitter};

const SILVAS: &str = r#"[
    {"id": 1, "name": "Ana Silva", "group": "A", "attending": false},
    {"id": 2, "name": "Rui Silva", "group": "A", "attending": false},
    {"id": 3, "name": "Jose Pereira", "group": "B"}
]"#;

struct FakeBackend {
    guests: Result<String, u16>,
    confirm_status: Option<u16>,
    fetches: AtomicUsize,
    sent: Mutex<Vec<ConfirmationRequest>>,
}

impl FakeBackend {
    fn new(guests: &str) -> Self {
        Self {
            guests: Ok(guests.to_string()),
            confirm_status: None,
            fetches: AtomicUsize::new(0),
            sent: Mutex::new(Vec::new()),
        }
    }

    fn failing_fetch(status: u16) -> Self {
        Self {
            guests: Err(status),
            ..Self::new("[]")
        }
    }

    fn rejecting_confirmations(mut self, status: u16) -> Self {
        self.confirm_status = Some(status);
        self
    }

    fn sent(&self) -> Vec<ConfirmationRequest> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl GuestBackend for FakeBackend {
    async fn fetch_guests(&self) -> Result<String, RsvpError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.guests.clone().map_err(|status| RsvpError::Fetch {
            status: Some(status),
            detail: "unavailable".to_string(),
        })
    }

    async fn send_confirmation(&self, request: &ConfirmationRequest) -> Result<(), RsvpError> {
        self.sent.lock().unwrap().push(request.clone());
        match self.confirm_status {
            None => Ok(()),
            Some(status) => Err(RsvpError::Submit {
                status: Some(status),
                detail: "boom".to_string(),
            }),
        }
    }
}

async fn loaded(backend: &FakeBackend) -> Session {
    let mut session = Session::new("index.html");
    session.load(backend).await;
    assert!(session.is_loaded());
    session
}

#[tokio::test]
async fn search_and_select_a_party() {
    let backend = FakeBackend::new(SILVAS);
    let mut session = loaded(&backend).await;

    session.search("silva");
    assert_eq!(
        session.view().results,
        ResultsView::Names(vec!["Ana Silva".to_string(), "Rui Silva".to_string()])
    );

    for position in 0..2 {
        session.search("silva");
        session.select(position).unwrap();
        assert_eq!(
            session.view().party,
            vec![
                ToggleView { name: "Ana Silva".to_string(), attending: false },
                ToggleView { name: "Rui Silva".to_string(), attending: false },
            ]
        );
    }

    assert_eq!(backend.fetches.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn accented_query_finds_unaccented_name() {
    let backend = FakeBackend::new(SILVAS);
    let mut session = loaded(&backend).await;

    session.search("José");
    assert_eq!(
        session.view().results,
        ResultsView::Names(vec!["Jose Pereira".to_string()])
    );
}

#[tokio::test]
async fn successful_submit_sends_current_toggles_and_acknowledges() {
    let backend = FakeBackend::new(SILVAS);
    let mut session = loaded(&backend).await;

    session.search("ana");
    session.select(0).unwrap();
    session.toggle(0);

    assert_eq!(session.submit(&backend).await, Some(SubmitOutcome::Succeeded));
    assert_eq!(
        backend.sent(),
        vec![ConfirmationRequest {
            info: vec![
                ConfirmationEntry { id: GuestId::from(1), attending: true },
                ConfirmationEntry { id: GuestId::from(2), attending: false },
            ],
        }]
    );

    let view = session.view();
    assert!(view.status.is_empty());
    assert!(view.acknowledgment_visible);

    let navigation = session
        .dismiss(DismissTrigger::Click { inside_content: false })
        .unwrap();
    assert_eq!(navigation.destination, "index.html");
}

#[tokio::test]
async fn rejected_submit_allows_retry_without_losing_edits() {
    let backend = FakeBackend::new(SILVAS).rejecting_confirmations(500);
    let mut session = loaded(&backend).await;

    session.search("rui");
    session.select(0).unwrap();
    session.set_attending(1, true);

    assert_eq!(session.submit(&backend).await, Some(SubmitOutcome::Failed));

    let view = session.view();
    assert_eq!(view.status_kind, StatusKind::Error);
    assert!(view.submit_enabled);
    assert!(!view.acknowledgment_visible);
    assert!(view.party[1].attending);

    assert_eq!(session.submit(&backend).await, Some(SubmitOutcome::Failed));
    assert_eq!(backend.sent().len(), 2);
    assert_eq!(backend.sent()[0], backend.sent()[1]);
}

#[tokio::test]
async fn submit_while_in_flight_sends_once() {
    let backend = FakeBackend::new(SILVAS);
    let mut session = loaded(&backend).await;
    session.search("silva");
    session.select(0).unwrap();

    let first = session.begin_submit();
    let second = session.begin_submit();
    assert!(first.is_some());
    assert!(second.is_none());

    for payload in [first, second].into_iter().flatten() {
        let result = backend.send_confirmation(&payload).await;
        session.finish_submit(result);
    }

    assert_eq!(backend.sent().len(), 1);
}

#[tokio::test]
async fn no_selection_is_refused_without_network() {
    let backend = FakeBackend::new(SILVAS);
    let mut submitter = Submitter::new();

    let result = submitter.submit(&backend, None).await;
    assert!(matches!(result, Err(RsvpError::NoSelection)));
    assert!(backend.sent().is_empty());
}

#[tokio::test]
async fn empty_party_is_refused_without_network() {
    let backend = FakeBackend::new(SILVAS);
    let mut submitter = Submitter::new();
    let view = PartyView {
        selected: Guest::new(1, "Ana Silva", "A", false),
        toggles: Vec::new(),
    };
    let states = ToggleStates::seeded(&view);

    let result = submitter.submit(&backend, Some((&view, &states))).await;
    assert!(matches!(result, Err(RsvpError::EmptyPayload)));
    assert!(backend.sent().is_empty());
    assert!(!submitter.is_submitting());
}

#[tokio::test]
async fn submitter_reports_sent_attempts() {
    let backend = FakeBackend::new(SILVAS);
    let mut session = loaded(&backend).await;
    session.search("jose");
    let view = session.select(0).unwrap().clone();
    let states = ToggleStates::seeded(&view);

    let mut submitter = Submitter::new();
    let attempt = submitter.submit(&backend, Some((&view, &states))).await.unwrap();

    assert_eq!(attempt, SubmitAttempt::Sent);
    assert_eq!(backend.sent()[0].info.len(), 1);
}

#[tokio::test]
async fn non_array_directory_blocks_the_workflow() {
    let backend = FakeBackend::new("{}");
    let mut session = Session::new("index.html");
    session.load(&backend).await;

    let view = session.view();
    assert!(!session.is_loaded());
    assert_eq!(view.status_kind, StatusKind::Error);
    assert_eq!(view.status, "We couldn't load the guest list. Please reload the page.");
    assert!(!view.submit_enabled);
}

#[tokio::test]
async fn fetch_failure_and_empty_list_have_distinct_messages() {
    let mut session = Session::new("index.html");
    session.load(&FakeBackend::failing_fetch(500)).await;
    let failed = session.status().message().to_string();

    session.load(&FakeBackend::new(r#"[{"name": "no id"}]"#)).await;
    let empty = session.status().message().to_string();

    assert_ne!(failed, empty);
    assert_eq!(empty, RsvpError::EmptyDirectory.user_message());
}

#[tokio::test]
async fn client_keeps_results_after_a_bad_pick() {
    let mut client = RsvpClient::new(FakeBackend::new(SILVAS), "index.html");
    client.start().await;

    assert_eq!(client.handle(Command::Search("silva".to_string())).await, Flow::Continue);
    assert_eq!(client.handle(Command::Select(9)).await, Flow::Continue);

    let session = client.session();
    assert!(session.party().is_none());
    assert_eq!(session.status().kind(), StatusKind::Error);
    assert_eq!(
        session.view().results,
        ResultsView::Names(vec!["Ana Silva".to_string(), "Rui Silva".to_string()])
    );

    assert_eq!(client.handle(Command::Select(1)).await, Flow::Continue);
    assert_eq!(client.session().party().unwrap().selected.name, "Rui Silva");
}
