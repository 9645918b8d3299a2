//! Registration form model and its shared handle

use crate::error::{Error, Result};
use crate::types::{TicketSelection, ToastType};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Selector of the registration form on event pages
pub const REGISTRATION_FORM_SELECTOR: &str = "#registration_form";

static NEXT_LISTENER_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a submit listener attached to a form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

impl ListenerId {
    /// Allocate a process-unique listener id
    pub fn next() -> Self {
        Self(NEXT_LISTENER_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// A ticket quantity select
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketField {
    /// Field name, sent as the payload key
    pub name: String,
    /// Values the select offers
    pub choices: Vec<String>,
    /// Currently selected value
    pub selected: String,
}

impl TicketField {
    /// Select offering quantities `0..=max`, with `0` selected
    pub fn with_max_quantity(name: impl Into<String>, max: u32) -> Self {
        Self {
            name: name.into(),
            choices: (0..=max).map(|q| q.to_string()).collect(),
            selected: "0".to_string(),
        }
    }
}

/// The form's submit button
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmitControl {
    /// Whether clicks are delivered
    pub enabled: bool,
    /// Listener receiving clicks
    pub listener: Option<ListenerId>,
}

/// Alert block inserted after the ticket table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineAlert {
    /// Styling tag
    pub kind: ToastType,
    /// Text content
    pub text: String,
}

impl InlineAlert {
    /// Informational alert
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: ToastType::Info,
            text: text.into(),
        }
    }
}

/// State of one registration form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationForm {
    /// Selector identifying the form on the page
    pub selector: String,
    /// `action` attribute
    pub action: String,
    /// `data-action` attribute, preferred over `action` when present
    pub data_action: Option<String>,
    /// Ticket selects in page order
    pub tickets: Vec<TicketField>,
    /// Submit button
    pub submit: SubmitControl,
    /// Alerts currently shown after the ticket table
    pub alerts: Vec<InlineAlert>,
}

impl RegistrationForm {
    /// New form posting to `action`, submit control disabled until mounted
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            selector: REGISTRATION_FORM_SELECTOR.to_string(),
            action: action.into(),
            data_action: None,
            tickets: Vec::new(),
            submit: SubmitControl::default(),
            alerts: Vec::new(),
        }
    }

    /// Set the `data-action` attribute
    #[must_use]
    pub fn with_data_action(mut self, data_action: impl Into<String>) -> Self {
        self.data_action = Some(data_action.into());
        self
    }

    /// Append a ticket select
    #[must_use]
    pub fn with_ticket(mut self, field: TicketField) -> Self {
        self.tickets.push(field);
        self
    }

    /// Endpoint the form posts to: `data-action`, then `action`
    pub fn endpoint(&self) -> Option<&str> {
        self.data_action
            .as_deref()
            .filter(|a| !a.trim().is_empty())
            .or_else(|| Some(self.action.as_str()).filter(|a| !a.trim().is_empty()))
    }
}

/// Shared handle to a [`RegistrationForm`]
///
/// Clones refer to the same form, the way several scripts see one element.
#[derive(Debug, Clone)]
pub struct FormHandle(Arc<Mutex<RegistrationForm>>);

impl FormHandle {
    /// Wrap a form
    pub fn new(form: RegistrationForm) -> Self {
        Self(Arc::new(Mutex::new(form)))
    }

    fn lock(&self) -> MutexGuard<'_, RegistrationForm> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Form selector
    pub fn selector(&self) -> String {
        self.lock().selector.clone()
    }

    /// Resolved endpoint, see [`RegistrationForm::endpoint`]
    pub fn endpoint(&self) -> Option<String> {
        self.lock().endpoint().map(ToString::to_string)
    }

    /// Names of the ticket fields in page order
    pub fn ticket_names(&self) -> Vec<String> {
        self.lock().tickets.iter().map(|t| t.name.clone()).collect()
    }

    /// Choices offered by a ticket field
    pub fn choices(&self, name: &str) -> Result<Vec<String>> {
        self.lock()
            .tickets
            .iter()
            .find(|t| t.name == name)
            .map(|t| t.choices.clone())
            .ok_or_else(|| Error::UnknownField(name.to_string()))
    }

    /// Select a quantity on a ticket field
    pub fn select(&self, name: &str, value: &str) -> Result<()> {
        let mut form = self.lock();
        let field = form
            .tickets
            .iter_mut()
            .find(|t| t.name == name)
            .ok_or_else(|| Error::UnknownField(name.to_string()))?;

        if !field.choices.iter().any(|c| c == value) {
            return Err(Error::InvalidQuantity {
                field: name.to_string(),
                value: value.to_string(),
            });
        }

        field.selected = value.to_string();
        Ok(())
    }

    /// Read every ticket field into a selection
    pub fn selection(&self) -> TicketSelection {
        self.lock()
            .tickets
            .iter()
            .map(|t| (t.name.clone(), t.selected.clone()))
            .collect()
    }

    /// Whether the submit control accepts clicks
    pub fn is_submit_enabled(&self) -> bool {
        self.lock().submit.enabled
    }

    /// Enable or disable the submit control
    pub fn set_submit_enabled(&self, enabled: bool) {
        self.lock().submit.enabled = enabled;
    }

    /// Disable the submit control if it is enabled
    ///
    /// Returns `false` when it was already disabled, i.e. another attempt
    /// owns the control.
    pub fn try_disable_submit(&self) -> bool {
        let mut form = self.lock();
        std::mem::replace(&mut form.submit.enabled, false)
    }

    /// Listener attached to the submit control
    pub fn listener(&self) -> Option<ListenerId> {
        self.lock().submit.listener
    }

    /// Attach a listener, replacing any previous one; returns the replaced id
    pub fn attach_listener(&self, id: ListenerId) -> Option<ListenerId> {
        self.lock().submit.listener.replace(id)
    }

    /// Detach `id` if it is the attached listener
    pub fn detach_listener(&self, id: ListenerId) -> bool {
        let mut form = self.lock();
        if form.submit.listener == Some(id) {
            form.submit.listener = None;
            true
        } else {
            false
        }
    }

    /// Alerts shown after the ticket table
    pub fn alerts(&self) -> Vec<InlineAlert> {
        self.lock().alerts.clone()
    }

    /// Insert an alert after the ticket table
    pub fn insert_alert(&self, alert: InlineAlert) {
        self.lock().alerts.push(alert);
    }

    /// Remove all alerts after the ticket table; returns how many were removed
    pub fn clear_alerts(&self) -> usize {
        let mut form = self.lock();
        let removed = form.alerts.len();
        form.alerts.clear();
        removed
    }
}

impl From<RegistrationForm> for FormHandle {
    fn from(form: RegistrationForm) -> Self {
        Self::new(form)
    }
}
