//! Observer trait for interface-agnostic submission updates
//!
//! Lets a terminal, a page, or a test follow a submission attempt
//! without the controller knowing how it is displayed.

use crate::error::Error;
use crate::types::{SubmissionPayload, SubmissionResponse};
use async_trait::async_trait;
use std::fmt;

/// State of the submission state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    /// Waiting for a submit
    Idle,
    /// Reading the form and requesting a token
    Validating,
    /// The token service rejected the attempt
    TokenError,
    /// No ticket quantity was selected
    NoTicketsSelected,
    /// Request in flight, submit control disabled
    Submitting,
    /// Confirmation dialog shown
    Rendered,
    /// The request failed
    TransportFailed,
}

impl fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Idle => "Idle",
            Self::Validating => "Validating",
            Self::TokenError => "Token rejected",
            Self::NoTicketsSelected => "No tickets selected",
            Self::Submitting => "Submitting",
            Self::Rendered => "Registered",
            Self::TransportFailed => "Request failed",
        };
        f.write_str(label)
    }
}

/// Submission observer
///
/// - CLI implementations can drive spinners
/// - Pages can reflect the state in their markup
#[async_trait]
pub trait SubmissionObserver: Send + Sync {
    /// Called on every state transition
    async fn on_state(&self, state: SubmissionState);

    /// Called right before the request is sent
    async fn on_request(&self, endpoint: &str, payload: &SubmissionPayload);

    /// Called with the decoded server response
    async fn on_response(&self, response: &SubmissionResponse);

    /// Called when the request fails
    async fn on_error(&self, error: &Error);
}

/// No-op observer for when updates aren't needed
pub struct NoopObserver;

#[async_trait]
impl SubmissionObserver for NoopObserver {
    async fn on_state(&self, _state: SubmissionState) {}
    async fn on_request(&self, _endpoint: &str, _payload: &SubmissionPayload) {}
    async fn on_response(&self, _response: &SubmissionResponse) {}
    async fn on_error(&self, _error: &Error) {}
}
