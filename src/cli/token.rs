//! Token command - check the configured anti-abuse provider

use crate::cli::style::Stylize;
use anstream::println;
use anyhow::{bail, Result};
use event_signup::config::Config;
use event_signup::recaptcha::create_token_provider;
use event_signup::types::TokenResult;

/// Run the token command
pub async fn run_token(config: &Config, action: &str) -> Result<()> {
    let provider = create_token_provider(&config.recaptcha);
    provider.load().await;

    match provider.get_token(action).await {
        TokenResult::Token(token) => println!("{token}"),
        TokenResult::Skipped(message) => println!("{}", message.muted()),
        TokenResult::Error(message) => bail!("token request failed: {message}"),
    }

    Ok(())
}
