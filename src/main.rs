//! signup - event registration from the terminal
//!
//! CLI binary driving one registration form submission.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use event_signup::config::{Config, RecaptchaConfig, DEFAULT_TIMEOUT_SECS};
use event_signup::types::REGISTRATION_ACTION;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

mod cli;

#[derive(Parser)]
#[command(name = "signup")]
#[command(about = "Register for an event: pick tickets, pass the anti-abuse check, submit")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct GlobalArgs {
    /// Base URL relative endpoints are resolved against
    #[arg(long, global = true, env = "SIGNUP_BASE_URL")]
    base_url: Option<String>,

    /// Command printing an anti-abuse token; the action is passed as last argument
    #[arg(long, global = true, env = "RECAPTCHA_COMMAND")]
    recaptcha_command: Option<String>,

    /// Fixed anti-abuse token
    #[arg(long, global = true, env = "RECAPTCHA_TOKEN")]
    recaptcha_token: Option<String>,

    /// HTTP request timeout in seconds
    #[arg(long, global = true, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Log progress details (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit a registration form
    Register {
        /// Form action endpoint (absolute, or relative to --base-url)
        endpoint: String,

        /// Ticket field, optionally with a quantity: NAME or NAME=QTY
        #[arg(short, long = "ticket", value_parser = cli::parse_ticket_arg)]
        tickets: Vec<(String, Option<String>)>,

        /// Highest quantity each ticket select offers
        #[arg(long, default_value_t = 9)]
        max_quantity: u32,

        /// `data-action` override for the endpoint
        #[arg(long)]
        data_action: Option<String>,

        /// Choose quantities and dismiss the confirmation interactively
        #[arg(short, long)]
        interactive: bool,
    },

    /// Request an anti-abuse token with the configured provider
    Token {
        /// Action the token is scoped to
        #[arg(long, default_value = REGISTRATION_ACTION)]
        action: String,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn build_config(global: &GlobalArgs) -> Result<Config> {
    let config = Config {
        base_url: global
            .base_url
            .as_deref()
            .map(Config::parse_base_url)
            .transpose()?,
        recaptcha: RecaptchaConfig {
            command: global.recaptcha_command.clone(),
            token: global.recaptcha_token.clone(),
        },
        timeout: Duration::from_secs(global.timeout_secs),
    };
    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.global.verbose);
    let config = build_config(&cli.global)?;

    match cli.command {
        Commands::Register {
            endpoint,
            tickets,
            max_quantity,
            data_action,
            interactive,
        } => {
            let form = cli::RegisterForm {
                endpoint,
                data_action,
                tickets,
                max_quantity,
            };
            cli::run_register(&config, form, interactive).await?;
        }
        Commands::Token { action } => {
            cli::run_token(&config, &action).await?;
        }
    }

    Ok(())
}
