//! Confirmation dialogs built from registration responses

mod markup;

pub use markup::{modal_text, strip_legacy_container, LEGACY_CONTAINER_CLASS};

use crate::types::SubmissionResponse;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

static NEXT_MODAL_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a modal appended to the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModalId(u64);

impl ModalId {
    fn next() -> Self {
        Self(NEXT_MODAL_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Backdrop behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backdrop {
    /// Clicking the backdrop closes the dialog
    Dismissible,
    /// Clicking the backdrop does nothing
    Static,
}

/// Display options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModalOptions {
    /// Backdrop behavior
    pub backdrop: Backdrop,
    /// Whether Escape closes the dialog
    pub keyboard: bool,
}

impl ModalOptions {
    /// Only explicit controls inside the dialog can close it
    pub const fn explicit_dismiss_only() -> Self {
        Self {
            backdrop: Backdrop::Static,
            keyboard: false,
        }
    }
}

/// Controls inside the confirmation dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalAction {
    /// "Go to event" link (`.js_goto_event`)
    GotoEvent,
    /// Close button (`.btn-close`)
    Close,
}

/// A confirmation dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modal {
    /// Document-unique id
    pub id: ModalId,
    /// Title of the response it was built from
    pub title: String,
    /// Markup with the legacy container class removed
    pub markup: String,
    /// Display options
    pub options: ModalOptions,
    /// Whether the dialog is shown
    pub visible: bool,
}

impl Modal {
    /// Build a hidden dialog from a registration response
    pub fn from_response(response: &SubmissionResponse) -> Self {
        Self {
            id: ModalId::next(),
            title: response.title.clone(),
            markup: strip_legacy_container(&response.markup),
            options: ModalOptions::explicit_dismiss_only(),
            visible: false,
        }
    }

    /// Plain-text rendering of the dialog
    pub fn text(&self) -> String {
        modal_text(&self.markup)
    }
}

/// Document body receiving dialogs
pub trait ModalHost: Send + Sync {
    /// Append a dialog to the document
    fn append(&self, modal: Modal) -> ModalId;

    /// Show a previously appended dialog
    fn show(&self, id: ModalId);

    /// Hide a dialog; it stays in the document
    fn hide(&self, id: ModalId);
}

/// In-memory document body
#[derive(Debug, Default)]
pub struct Document {
    modals: Mutex<Vec<Modal>>,
}

impl Document {
    /// Empty document
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Modal>> {
        self.modals.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Every appended dialog, in append order
    pub fn modals(&self) -> Vec<Modal> {
        self.lock().clone()
    }

    /// A dialog by id
    pub fn get(&self, id: ModalId) -> Option<Modal> {
        self.lock().iter().find(|m| m.id == id).cloned()
    }

    /// Whether a dialog is currently shown
    pub fn is_visible(&self, id: ModalId) -> bool {
        self.get(id).is_some_and(|m| m.visible)
    }

    fn set_visible(&self, id: ModalId, visible: bool) {
        if let Some(modal) = self.lock().iter_mut().find(|m| m.id == id) {
            modal.visible = visible;
        }
    }
}

impl ModalHost for Document {
    fn append(&self, modal: Modal) -> ModalId {
        let id = modal.id;
        self.lock().push(modal);
        id
    }

    fn show(&self, id: ModalId) {
        self.set_visible(id, true);
    }

    fn hide(&self, id: ModalId) {
        self.set_visible(id, false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ToastType;

    fn make_response(markup: &str) -> SubmissionResponse {
        SubmissionResponse {
            title: "Registered".to_string(),
            message: "Thanks!".to_string(),
            toast_type: ToastType::Success,
            markup: markup.to_string(),
            extra: serde_json::Map::new(),
        }
    }

    #[test]
    fn test_from_response_strips_and_disables_dismiss() {
        let modal = Modal::from_response(&make_response(
            r#"<div class="modal-body"><div class="container">hi</div></div>"#,
        ));

        assert_eq!(modal.markup, r#"<div class="modal-body"><div>hi</div></div>"#);
        assert_eq!(modal.options.backdrop, Backdrop::Static);
        assert!(!modal.options.keyboard);
        assert!(!modal.visible);
        assert_eq!(modal.text(), "hi");
    }

    #[test]
    fn test_document_show_hide() {
        let document = Document::new();
        let first = document.append(Modal::from_response(&make_response("<p>a</p>")));
        let second = document.append(Modal::from_response(&make_response("<p>b</p>")));
        assert_ne!(first, second);

        document.show(first);
        assert!(document.is_visible(first));
        assert!(!document.is_visible(second));

        document.hide(first);
        assert!(!document.is_visible(first));
        assert_eq!(document.modals().len(), 2);
    }
}
