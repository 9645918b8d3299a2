//! Submit handler
//!
//! One attempt: read the form, request a token, validate, post, render.

use crate::error::Error;
use crate::form::{has_any_ticket, FormHandle, InlineAlert};
use crate::modal::Modal;
use crate::submit::{SubmissionController, SubmissionOutcome, SubmissionState, SubmitEvent};
use crate::types::{
    Notification, SubmissionPayload, SubmissionResponse, TokenResult, REGISTRATION_ACTION,
};
use tracing::{debug, info, warn};

/// Inline alert shown when every quantity is zero
pub const NO_TICKET_MESSAGE: &str = "Please select at least one ticket.";

/// Text shown to the user for a failed request
fn user_message(error: &Error) -> String {
    match error {
        Error::Rpc { message, .. } => message.clone(),
        other => other.to_string(),
    }
}

impl SubmissionController {
    /// Handle a click on the submit control
    ///
    /// The token is always requested before validation is acted on, and the
    /// submit control is disabled before the request is issued.
    pub async fn handle_submit(&self, event: &mut SubmitEvent) -> SubmissionOutcome {
        event.prevent_default();
        event.stop_propagation();

        let Some(form) = self.current_form() else {
            debug!("submit without a mounted form ignored");
            return SubmissionOutcome::Ignored;
        };

        if form.listener() != Some(self.listener) || !form.is_submit_enabled() {
            debug!("submit control inactive, click ignored");
            return SubmissionOutcome::Ignored;
        }

        self.observer.on_state(SubmissionState::Validating).await;

        let removed = form.clear_alerts();
        let selection = form.selection();
        let any_ticket = has_any_ticket(&selection);
        debug!(
            fields = selection.len(),
            any_ticket, removed, "collected ticket selection"
        );

        let token = self.recaptcha.get_token(REGISTRATION_ACTION).await;
        match &token {
            TokenResult::Error(message) => {
                warn!(%message, "anti-abuse token rejected");
                self.notifier
                    .notify(Notification::sticky_error(message.clone()))
                    .await;
                self.finish(SubmissionState::TokenError).await;
                return SubmissionOutcome::TokenRejected(message.clone());
            }
            TokenResult::Skipped(reason) => {
                debug!(%reason, "submitting without anti-abuse token");
            }
            TokenResult::Token(_) => {}
        }

        if !any_ticket {
            form.insert_alert(InlineAlert::info(NO_TICKET_MESSAGE));
            self.finish(SubmissionState::NoTicketsSelected).await;
            return SubmissionOutcome::NoTicketsSelected;
        }

        // Clicks that passed the entry check while the token was awaited
        // race here; only one of them gets the control.
        if !form.try_disable_submit() {
            debug!("another submission owns the control, click ignored");
            self.observer.on_state(SubmissionState::Idle).await;
            return SubmissionOutcome::Ignored;
        }

        let payload = SubmissionPayload {
            selection,
            recaptcha_token_response: token.token().map(ToString::to_string),
        };
        self.observer.on_state(SubmissionState::Submitting).await;

        let result = match form.endpoint() {
            Some(endpoint) => {
                self.observer.on_request(&endpoint, &payload).await;
                self.transport.submit(&endpoint, &payload).await
            }
            None => Err(Error::Config(format!(
                "form {} has no action endpoint",
                form.selector()
            ))),
        };

        match result {
            Ok(response) => self.render(form, &response).await,
            Err(e) => {
                warn!(error = %e, "registration request failed");
                self.observer.on_error(&e).await;
                form.set_submit_enabled(true);

                let message = user_message(&e);
                self.notifier
                    .notify(Notification::sticky_error(message.clone()))
                    .await;
                self.finish(SubmissionState::TransportFailed).await;
                SubmissionOutcome::TransportFailed(message)
            }
        }
    }

    async fn render(&self, form: FormHandle, response: &SubmissionResponse) -> SubmissionOutcome {
        self.observer.on_response(response).await;

        let id = self.modals.append(Modal::from_response(response));
        self.track_modal(id, form);
        self.modals.show(id);

        self.notifier
            .notify(Notification::from_response(response))
            .await;

        info!(title = %response.title, "registration confirmed");
        self.observer.on_state(SubmissionState::Rendered).await;
        SubmissionOutcome::Rendered(id)
    }

    /// Report a terminal state of an attempt that ends without a dialog
    async fn finish(&self, state: SubmissionState) {
        self.observer.on_state(state).await;
        self.observer.on_state(SubmissionState::Idle).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_rpc_message() {
        let rpc = Error::Rpc {
            code: 200,
            message: "Event is sold out".to_string(),
        };
        assert_eq!(user_message(&rpc), "Event is sold out");

        let transport = Error::Transport("timeout".to_string());
        assert_eq!(user_message(&transport), "transport error: timeout");
    }
}
