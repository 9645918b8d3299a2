//! CLI commands
//!
//! Command implementations for the `signup` binary.

mod notify;
mod progress;
mod register;
mod style;
mod token;

pub use register::{parse_ticket_arg, run_register, RegisterForm};
pub use token::run_token;
