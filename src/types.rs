//! Core types for event-signup

use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Anti-abuse action name sent with every registration token request
pub const REGISTRATION_ACTION: &str = "website_mass_mailing_subscribe";

/// Field carrying the anti-abuse token in the submitted payload
pub const TOKEN_FIELD: &str = "recaptcha_token_response";

/// Ticket quantities read from the form, keyed by ticket field name
///
/// Keeps the order in which fields appear on the form. Setting a name twice
/// keeps its first position and replaces the value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketSelection {
    entries: Vec<(String, String)>,
}

impl TicketSelection {
    /// Create an empty selection
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Set the raw selected value for a ticket field
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Raw value selected for a ticket field
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate `(name, value)` pairs in form order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Number of ticket fields read
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no ticket field was read
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for TicketSelection {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut selection = Self::new();
        for (name, value) in iter {
            selection.insert(name, value);
        }
        selection
    }
}

impl Serialize for TicketSelection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Body posted to the registration endpoint
///
/// Serializes flat: every ticket field, then `recaptcha_token_response`
/// when a token was obtained.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionPayload {
    /// Selected quantities
    #[serde(flatten)]
    pub selection: TicketSelection,
    /// Anti-abuse token, omitted when the provider is not configured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recaptcha_token_response: Option<String>,
}

/// Outcome of an anti-abuse token request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenResult {
    /// Token issued for the action
    Token(String),
    /// The check failed; the message is shown to the user
    Error(String),
    /// No provider is configured: proceed without a token
    Skipped(String),
}

impl TokenResult {
    /// Token to attach to the payload, if any
    pub fn token(&self) -> Option<&str> {
        match self {
            Self::Token(token) => Some(token),
            Self::Error(_) | Self::Skipped(_) => None,
        }
    }
}

/// Severity tag controlling notification styling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastType {
    /// Completed successfully
    Success,
    /// Neutral information
    #[default]
    Info,
    /// Needs attention
    Warning,
    /// Failure
    Danger,
}

impl ToastType {
    /// Parse a server-supplied tag; unknown tags fall back to `Info`
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "success" => Self::Success,
            "warning" => Self::Warning,
            "danger" => Self::Danger,
            _ => Self::Info,
        }
    }

    /// Lowercase tag name
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Danger => "danger",
        }
    }
}

impl fmt::Display for ToastType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ToastType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from_name(&raw))
    }
}

/// Server answer to a successful registration call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionResponse {
    /// Toast title
    #[serde(default)]
    pub title: String,
    /// Toast body
    #[serde(default)]
    pub message: String,
    /// Toast severity
    #[serde(default)]
    pub toast_type: ToastType,
    /// Confirmation dialog markup, rendered server-side
    #[serde(default, alias = "html", alias = "modal")]
    pub markup: String,
    /// Any other fields the server sent
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A message for the notification bus
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    /// Styling tag
    #[serde(rename = "type")]
    pub kind: ToastType,
    /// Title line
    pub title: String,
    /// Body text
    pub message: String,
    /// Stays until dismissed by the user
    pub sticky: bool,
}

impl Notification {
    /// Sticky danger notification titled "Error"
    pub fn sticky_error(message: impl Into<String>) -> Self {
        Self {
            kind: ToastType::Danger,
            title: "Error".to_string(),
            message: message.into(),
            sticky: true,
        }
    }

    /// Sticky toast built from a registration response
    pub fn from_response(response: &SubmissionResponse) -> Self {
        Self {
            kind: response.toast_type,
            title: response.title.clone(),
            message: response.message.clone(),
            sticky: true,
        }
    }
}
