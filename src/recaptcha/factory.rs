//! Token provider factory
//!
//! Creates the provider selected by configuration.

use crate::config::RecaptchaConfig;
use crate::recaptcha::{
    CommandTokenProvider, DisabledTokenProvider, StaticTokenProvider, TokenProvider,
};
use std::sync::Arc;
use tracing::debug;

/// Create a token provider from configuration
///
/// Priority:
/// 1. helper command
/// 2. fixed token
/// 3. disabled (submit without a token)
pub fn create_token_provider(config: &RecaptchaConfig) -> Arc<dyn TokenProvider> {
    if let Some(provider) = config
        .command
        .as_deref()
        .and_then(CommandTokenProvider::from_command_line)
    {
        debug!("using command token provider");
        return Arc::new(provider);
    }

    if let Some(token) = config.token.as_deref().filter(|t| !t.is_empty()) {
        debug!("using static token provider");
        return Arc::new(StaticTokenProvider::new(token));
    }

    debug!("no token provider configured");
    Arc::new(DisabledTokenProvider)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recaptcha::NO_SITE_KEY_MESSAGE;
    use crate::types::TokenResult;

    #[tokio::test]
    async fn test_static_token_selected() {
        let config = RecaptchaConfig {
            command: None,
            token: Some("abc".to_string()),
        };
        let provider = create_token_provider(&config);
        assert_eq!(
            provider.get_token("x").await,
            TokenResult::Token("abc".to_string())
        );
    }

    #[tokio::test]
    async fn test_nothing_configured_is_disabled() {
        let config = RecaptchaConfig {
            command: Some("   ".to_string()),
            token: Some(String::new()),
        };
        let provider = create_token_provider(&config);
        assert_eq!(
            provider.get_token("x").await,
            TokenResult::Skipped(NO_SITE_KEY_MESSAGE.to_string())
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_command_wins_over_token() {
        let config = RecaptchaConfig {
            command: Some("echo from-command".to_string()),
            token: Some("abc".to_string()),
        };
        let provider = create_token_provider(&config);
        assert_eq!(
            provider.get_token("act").await,
            TokenResult::Token("from-command act".to_string())
        );
    }
}
