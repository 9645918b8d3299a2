//! Controller lifecycle: mount, unmount, dialog controls

use crate::error::{Error, Result};
use crate::form::{FormHandle, ListenerId};
use crate::modal::{ModalAction, ModalHost, ModalId};
use crate::notify::NotificationService;
use crate::recaptcha::TokenProvider;
use crate::rpc::RpcTransport;
use crate::submit::{NoopObserver, SubmissionObserver, SubmissionState};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info};

/// Click event delivered to the submit listener
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubmitEvent {
    default_prevented: bool,
    propagation_stopped: bool,
}

impl SubmitEvent {
    /// Fresh click event
    pub const fn new() -> Self {
        Self {
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    /// Suppress the native form submission
    pub const fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Stop the event from reaching ancestors
    pub const fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Whether the native submission was suppressed
    pub const fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Whether bubbling was stopped
    pub const fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

/// How a submission attempt ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Click swallowed: not mounted, or the control was disabled
    Ignored,
    /// Token service error, shown as a sticky notification
    TokenRejected(String),
    /// Nothing selected, inline alert shown
    NoTicketsSelected,
    /// Confirmation dialog shown; the control stays disabled until dismissed
    Rendered(ModalId),
    /// Request failed, control re-enabled and error shown
    TransportFailed(String),
}

/// Owns the submit interaction of one registration form
pub struct SubmissionController {
    pub(super) listener: ListenerId,
    pub(super) recaptcha: Arc<dyn TokenProvider>,
    pub(super) transport: Arc<dyn RpcTransport>,
    pub(super) notifier: Arc<dyn NotificationService>,
    pub(super) modals: Arc<dyn ModalHost>,
    pub(super) observer: Arc<dyn SubmissionObserver>,
    form: Mutex<Option<FormHandle>>,
    open_modals: Mutex<HashMap<ModalId, FormHandle>>,
}

impl SubmissionController {
    /// Create an unmounted controller
    pub fn new(
        recaptcha: Arc<dyn TokenProvider>,
        transport: Arc<dyn RpcTransport>,
        notifier: Arc<dyn NotificationService>,
        modals: Arc<dyn ModalHost>,
    ) -> Self {
        Self {
            listener: ListenerId::next(),
            recaptcha,
            transport,
            notifier,
            modals,
            observer: Arc::new(NoopObserver),
            form: Mutex::new(None),
            open_modals: Mutex::new(HashMap::new()),
        }
    }

    /// Replace the observer
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn SubmissionObserver>) -> Self {
        self.observer = observer;
        self
    }

    fn lock_form(&self) -> MutexGuard<'_, Option<FormHandle>> {
        self.form.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_modals(&self) -> MutexGuard<'_, HashMap<ModalId, FormHandle>> {
        self.open_modals
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Listener id this controller attaches to forms
    pub const fn listener_id(&self) -> ListenerId {
        self.listener
    }

    /// Mounted form
    pub fn form(&self) -> Result<FormHandle> {
        self.lock_form().clone().ok_or(Error::NotMounted)
    }

    /// Whether a form is mounted
    pub fn is_mounted(&self) -> bool {
        self.lock_form().is_some()
    }

    /// Attach to a form and make its submit control interactive
    ///
    /// Any listener already on the control is replaced. A form mounted
    /// earlier is unmounted first.
    pub async fn mount(&self, form: FormHandle) {
        self.recaptcha.load().await;
        self.unmount();

        if let Some(previous) = form.attach_listener(self.listener) {
            debug!(?previous, "replaced submit listener");
        }
        form.set_submit_enabled(true);

        info!(selector = %form.selector(), "registration form mounted");
        *self.lock_form() = Some(form);
        self.observer.on_state(SubmissionState::Idle).await;
    }

    /// Detach from the mounted form; no-op when nothing is mounted
    pub fn unmount(&self) {
        let form = self.lock_form().take();
        if let Some(form) = form {
            form.detach_listener(self.listener);
            debug!(selector = %form.selector(), "registration form unmounted");
        }
    }

    pub(super) fn current_form(&self) -> Option<FormHandle> {
        self.lock_form().clone()
    }

    pub(super) fn track_modal(&self, id: ModalId, form: FormHandle) {
        self.lock_modals().insert(id, form);
    }

    /// A control inside a confirmation dialog was clicked
    ///
    /// Both controls dismiss the dialog and re-enable the submit control of
    /// the form that produced it. Returns `false` for unknown dialogs.
    pub async fn handle_modal_action(&self, id: ModalId, action: ModalAction) -> bool {
        let form = self.lock_modals().remove(&id);
        let Some(form) = form else {
            debug!(?id, ?action, "action on unknown dialog ignored");
            return false;
        };

        self.modals.hide(id);
        form.set_submit_enabled(true);
        debug!(?id, ?action, "confirmation dialog dismissed");
        self.observer.on_state(SubmissionState::Idle).await;
        true
    }
}

impl Drop for SubmissionController {
    fn drop(&mut self) {
        self.unmount();
    }
}
