//! Submission state machine
//!
//! Handles one registration attempt end to end:
//! 1. Validating - read the form, request an anti-abuse token
//! 2. Submitting - disable the control, post the payload
//! 3. Rendering - show the confirmation dialog and a toast
//!
//! Every attempt returns to idle, immediately for validation and token
//! failures, after the user dismisses the dialog on success.

mod controller;
mod execute;
mod progress;

pub use controller::{SubmissionController, SubmissionOutcome, SubmitEvent};
pub use execute::NO_TICKET_MESSAGE;
pub use progress::{NoopObserver, SubmissionObserver, SubmissionState};
