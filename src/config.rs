//! Runtime configuration
//!
//! Values come from CLI flags with environment fallbacks; the binary fills
//! [`Config`] and validates it once before building services.

use crate::error::{Error, Result};
use std::time::Duration;
use url::Url;

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Anti-abuse token source
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecaptchaConfig {
    /// Helper command printing a token for the action given as last argument
    pub command: Option<String>,
    /// Fixed token
    pub token: Option<String>,
}

/// Settings shared by every command
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL relative endpoints are joined onto
    pub base_url: Option<Url>,
    /// Token source
    pub recaptcha: RecaptchaConfig,
    /// HTTP request timeout
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: None,
            recaptcha: RecaptchaConfig::default(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Parse a base URL, requiring http(s)
    pub fn parse_base_url(raw: &str) -> Result<Url> {
        let url = Url::parse(raw)?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(Error::Config(format!(
                "base url must be http or https, got {other}://"
            ))),
        }
    }

    /// Check settings that cannot be expressed in the flag types
    pub fn validate(&self) -> Result<()> {
        if self.timeout.is_zero() {
            return Err(Error::Config("timeout must be greater than zero".to_string()));
        }

        if self
            .recaptcha
            .command
            .as_deref()
            .is_some_and(|c| c.trim().is_empty())
        {
            return Err(Error::Config("recaptcha command is empty".to_string()));
        }

        if self.base_url.as_ref().is_some_and(Url::cannot_be_a_base) {
            return Err(Error::Config("base url cannot be used as a base".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = Config {
            timeout: Duration::ZERO,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_blank_command_rejected() {
        let config = Config {
            recaptcha: RecaptchaConfig {
                command: Some("  ".to_string()),
                token: None,
            },
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_parse_base_url() {
        assert!(Config::parse_base_url("https://events.example.com").is_ok());
        assert!(matches!(
            Config::parse_base_url("ftp://events.example.com"),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            Config::parse_base_url("not a url"),
            Err(Error::Url(_))
        ));
    }
}
