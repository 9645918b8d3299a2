//! Typed registration form state
//!
//! The form is read through explicit fields instead of scanning markup at
//! submit time: ticket quantity fields, the submit control, and the inline
//! alerts shown after the ticket table.

mod selection;
mod state;

pub use selection::{has_any_ticket, parse_quantity};
pub use state::{
    FormHandle, InlineAlert, ListenerId, RegistrationForm, SubmitControl, TicketField,
    REGISTRATION_FORM_SELECTOR,
};
