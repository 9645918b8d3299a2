//! Token provider backed by an external helper command

use crate::recaptcha::TokenProvider;
use crate::types::TokenResult;
use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

/// Runs `program args... <action>` and reads the token from stdout
#[derive(Debug, Clone)]
pub struct CommandTokenProvider {
    program: String,
    args: Vec<String>,
}

impl CommandTokenProvider {
    /// Create a provider for `program` with leading `args`
    pub fn new(
        program: impl Into<String>,
        args: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Split a whitespace-separated command line; `None` if it is blank
    pub fn from_command_line(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace();
        let program = parts.next()?;
        Some(Self::new(program, parts))
    }
}

#[async_trait]
impl TokenProvider for CommandTokenProvider {
    async fn get_token(&self, action: &str) -> TokenResult {
        debug!(program = %self.program, action, "requesting token from command");
        let output = match Command::new(&self.program)
            .args(&self.args)
            .arg(action)
            .output()
            .await
        {
            Ok(output) => output,
            Err(e) => return TokenResult::Error(format!("Failed to run {}: {e}", self.program)),
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return TokenResult::Error(if stderr.is_empty() {
                format!("Token command exited with {}", output.status)
            } else {
                stderr
            });
        }

        let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if token.is_empty() {
            TokenResult::Error("Token command returned an empty token".to_string())
        } else {
            TokenResult::Token(token)
        }
    }
}
