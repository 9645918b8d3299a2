//! CLI submission observer with spinners

use crate::cli::style::{hyperlink_url, spinner_style, Stream, Stylize};
use anstream::println;
use async_trait::async_trait;
use event_signup::error::Error;
use event_signup::submit::{SubmissionObserver, SubmissionState};
use event_signup::types::{SubmissionPayload, SubmissionResponse};
use indicatif::ProgressBar;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

/// Observer showing a spinner while the token or the server is awaited
pub struct CliProgress {
    spinner: Mutex<Option<ProgressBar>>,
}

impl CliProgress {
    pub const fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn start(&self, message: &str) {
        let bar = ProgressBar::new_spinner();
        bar.set_style(spinner_style());
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(80));

        let previous = self
            .spinner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(bar);
        if let Some(previous) = previous {
            previous.finish_and_clear();
        }
    }

    fn stop(&self) {
        let current = self
            .spinner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(bar) = current {
            bar.finish_and_clear();
        }
    }
}

#[async_trait]
impl SubmissionObserver for CliProgress {
    async fn on_state(&self, state: SubmissionState) {
        match state {
            SubmissionState::Validating => self.start("Requesting anti-abuse token..."),
            SubmissionState::Submitting => self.start("Submitting registration..."),
            SubmissionState::Idle => {}
            SubmissionState::TokenError
            | SubmissionState::NoTicketsSelected
            | SubmissionState::Rendered
            | SubmissionState::TransportFailed => self.stop(),
        }
    }

    async fn on_request(&self, endpoint: &str, payload: &SubmissionPayload) {
        let fields = payload.selection.len();
        println!(
            "Registering {} ticket field{} at {}",
            fields.accent(),
            if fields == 1 { "" } else { "s" },
            hyperlink_url(Stream::Stdout, endpoint)
        );
        if payload.recaptcha_token_response.is_none() {
            println!("{}", "  (no anti-abuse token attached)".muted());
        }
    }

    async fn on_response(&self, _response: &SubmissionResponse) {
        self.stop();
    }

    async fn on_error(&self, _error: &Error) {
        self.stop();
    }
}
