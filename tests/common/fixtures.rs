//! Test data factories and a controller harness
//!
//! These are test utilities - not all may be used in current tests but are
//! available for future test development.

#![allow(dead_code)]

use super::mock_services::{CallLog, MockTokenProvider, MockTransport, RecordingObserver};
use event_signup::form::{FormHandle, RegistrationForm, TicketField};
use event_signup::modal::Document;
use event_signup::notify::RecordingNotifier;
use event_signup::submit::SubmissionController;
use event_signup::types::{SubmissionResponse, ToastType};
use std::sync::Arc;

pub const ENDPOINT: &str = "/event/7/registration/new";

pub const MODAL_MARKUP: &str = concat!(
    r#"<div class="modal fade"><div class="modal-dialog"><div class="modal-content">"#,
    r#"<div class="modal-body"><div class="container o_wevent_registration">"#,
    r#"<p>Your registration is confirmed.</p>"#,
    r#"<a class="btn btn-primary js_goto_event" href="/event/7">Go to event</a>"#,
    r#"</div></div>"#,
    r#"<button type="button" class="btn-close"></button>"#,
    r#"</div></div></div>"#
);

/// Form with one ticket select per entry, each preset to the given value
pub fn make_form(quantities: &[(&str, &str)]) -> FormHandle {
    let mut form = RegistrationForm::new(ENDPOINT);
    for (name, _) in quantities {
        form = form.with_ticket(TicketField::with_max_quantity(*name, 9));
    }
    let handle = FormHandle::new(form);
    for (name, value) in quantities {
        handle.select(name, value).unwrap();
    }
    handle
}

/// Form whose selects hold arbitrary raw values
pub fn make_raw_form(values: &[(&str, &str)]) -> FormHandle {
    let mut form = RegistrationForm::new(ENDPOINT);
    for (name, value) in values {
        form = form.with_ticket(TicketField {
            name: (*name).to_string(),
            choices: vec![(*value).to_string()],
            selected: (*value).to_string(),
        });
    }
    FormHandle::new(form)
}

/// Successful registration response
pub fn make_response() -> SubmissionResponse {
    SubmissionResponse {
        title: "Registered".to_string(),
        message: "Thanks!".to_string(),
        toast_type: ToastType::Success,
        markup: MODAL_MARKUP.to_string(),
        extra: serde_json::Map::new(),
    }
}

/// Controller wired to mocks
pub struct Harness {
    pub controller: Arc<SubmissionController>,
    pub token: Arc<MockTokenProvider>,
    pub transport: Arc<MockTransport>,
    pub notifier: Arc<RecordingNotifier>,
    pub document: Arc<Document>,
    pub observer: Arc<RecordingObserver>,
    pub log: CallLog,
}

impl Harness {
    pub fn new() -> Self {
        let log = CallLog::default();
        let token = Arc::new(MockTokenProvider::new(log.clone()));
        let transport = Arc::new(MockTransport::new(make_response(), log.clone()));
        let notifier = Arc::new(RecordingNotifier::new());
        let document = Arc::new(Document::new());
        let observer = Arc::new(RecordingObserver::default());

        let controller = SubmissionController::new(
            token.clone(),
            transport.clone(),
            notifier.clone(),
            document.clone(),
        )
        .with_observer(observer.clone());

        Self {
            controller: Arc::new(controller),
            token,
            transport,
            notifier,
            document,
            observer,
            log,
        }
    }

    /// Harness with `form` already mounted
    pub async fn mounted(form: &FormHandle) -> Self {
        let harness = Self::new();
        harness.controller.mount(form.clone()).await;
        harness
    }
}
