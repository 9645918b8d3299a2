//! Anti-abuse token providers
//!
//! The submission flow only needs `get_token(action)`; where the token comes
//! from (a fixed value, an external helper command, nothing at all) is
//! decided by configuration.

mod command;
mod factory;
mod fixed;

pub use command::CommandTokenProvider;
pub use factory::create_token_provider;
pub use fixed::{DisabledTokenProvider, StaticTokenProvider, NO_SITE_KEY_MESSAGE};

use crate::types::TokenResult;
use async_trait::async_trait;

/// Source of anti-abuse tokens
///
/// Failures are reported as [`TokenResult::Error`], never as `Err`: the
/// caller shows the message to the user and stops.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Prepare the provider before the form becomes interactive
    async fn load(&self) {}

    /// Request a token scoped to `action`
    async fn get_token(&self, action: &str) -> TokenResult;
}
