//! event-signup - event registration form controller
//!
//! Validates a ticket selection, obtains an anti-abuse token, submits the
//! registration over JSON-RPC, and renders the confirmation dialog and toast.

pub mod config;
pub mod error;
pub mod form;
pub mod modal;
pub mod notify;
pub mod recaptcha;
pub mod rpc;
pub mod submit;
pub mod types;
