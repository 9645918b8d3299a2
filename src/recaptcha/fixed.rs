//! Fixed-token and disabled providers

use crate::recaptcha::TokenProvider;
use crate::types::TokenResult;
use async_trait::async_trait;

/// Message returned when no anti-abuse service is configured
pub const NO_SITE_KEY_MESSAGE: &str = "No recaptcha site key set.";

/// Provider returning the same token for every action
#[derive(Debug, Clone)]
pub struct StaticTokenProvider {
    token: String,
}

impl StaticTokenProvider {
    /// Create a provider for `token`
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn get_token(&self, _action: &str) -> TokenResult {
        TokenResult::Token(self.token.clone())
    }
}

/// Provider used when no site key is configured
///
/// Submissions go through without a token.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledTokenProvider;

#[async_trait]
impl TokenProvider for DisabledTokenProvider {
    async fn get_token(&self, _action: &str) -> TokenResult {
        TokenResult::Skipped(NO_SITE_KEY_MESSAGE.to_string())
    }
}
