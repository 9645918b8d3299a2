//! Register command - submit a registration form

use crate::cli::notify::TerminalNotifier;
use crate::cli::progress::CliProgress;
use crate::cli::style::{check, Stylize};
use anstream::{eprintln, println};
use anyhow::{bail, Result};
use dialoguer::Select;
use event_signup::config::Config;
use event_signup::form::{FormHandle, RegistrationForm, TicketField};
use event_signup::modal::{Document, Modal, ModalAction};
use event_signup::recaptcha::create_token_provider;
use event_signup::rpc::JsonRpcTransport;
use event_signup::submit::{SubmissionController, SubmissionOutcome, SubmitEvent};
use std::sync::Arc;

/// Form described on the command line
pub struct RegisterForm {
    /// `action` attribute
    pub endpoint: String,
    /// `data-action` attribute
    pub data_action: Option<String>,
    /// Ticket fields with an optional preselected quantity
    pub tickets: Vec<(String, Option<String>)>,
    /// Highest quantity offered by each select
    pub max_quantity: u32,
}

impl RegisterForm {
    fn build(&self) -> Result<FormHandle> {
        let mut form = RegistrationForm::new(self.endpoint.as_str());
        if let Some(data_action) = &self.data_action {
            form = form.with_data_action(data_action.as_str());
        }
        for (name, _) in &self.tickets {
            form = form.with_ticket(TicketField::with_max_quantity(name.as_str(), self.max_quantity));
        }

        let handle = FormHandle::new(form);
        for (name, quantity) in &self.tickets {
            if let Some(quantity) = quantity {
                handle.select(name, quantity)?;
            }
        }
        Ok(handle)
    }
}

/// Parse `NAME` or `NAME=QTY`
pub fn parse_ticket_arg(raw: &str) -> std::result::Result<(String, Option<String>), String> {
    let (name, quantity) = match raw.split_once('=') {
        Some((name, quantity)) => (name.trim(), Some(quantity.trim().to_string())),
        None => (raw.trim(), None),
    };

    if name.is_empty() {
        return Err(format!("missing ticket field name in {raw:?}"));
    }
    Ok((name.to_string(), quantity))
}

fn choose_quantities(form: &FormHandle) -> Result<()> {
    let current = form.selection();
    for name in form.ticket_names() {
        let choices = form.choices(&name)?;
        let selected = current.get(&name).unwrap_or("0");
        let default = choices.iter().position(|c| c == selected).unwrap_or(0);

        let index = Select::new()
            .with_prompt(format!("Quantity for {name}"))
            .items(choices.as_slice())
            .default(default)
            .interact()?;
        form.select(&name, &choices[index])?;
    }
    Ok(())
}

fn print_modal(modal: &Modal) {
    println!();
    if !modal.title.is_empty() {
        println!("{}", modal.title.emphasis());
    }
    for line in modal.text().lines() {
        println!("  {line}");
    }
    println!();
}

fn choose_dismissal() -> Result<ModalAction> {
    let index = Select::new()
        .with_prompt("Confirmation")
        .items(&["Go to event", "Close"])
        .default(0)
        .interact()?;
    Ok(if index == 0 {
        ModalAction::GotoEvent
    } else {
        ModalAction::Close
    })
}

/// Run the register command
pub async fn run_register(config: &Config, form: RegisterForm, interactive: bool) -> Result<()> {
    if form.tickets.is_empty() {
        bail!("at least one --ticket is required");
    }

    let handle = form.build()?;
    let document = Arc::new(Document::new());
    let transport = Arc::new(JsonRpcTransport::new(config.base_url.clone(), config.timeout)?);
    let controller = SubmissionController::new(
        create_token_provider(&config.recaptcha),
        transport,
        Arc::new(TerminalNotifier),
        document.clone(),
    )
    .with_observer(Arc::new(CliProgress::new()));

    controller.mount(handle.clone()).await;

    if interactive {
        choose_quantities(&handle)?;
    }

    let mut event = SubmitEvent::new();
    let outcome = controller.handle_submit(&mut event).await;

    let result = match outcome {
        SubmissionOutcome::Rendered(id) => {
            if let Some(modal) = document.get(id) {
                print_modal(&modal);
            }
            println!("{} {}", check(), "Registration submitted".success());

            if interactive {
                let action = choose_dismissal()?;
                controller.handle_modal_action(id, action).await;
            }
            Ok(())
        }
        SubmissionOutcome::NoTicketsSelected => {
            for alert in handle.alerts() {
                println!("{} {}", "!".warn().for_stdout(), alert.text);
            }
            Err(anyhow::anyhow!("no tickets selected"))
        }
        SubmissionOutcome::TokenRejected(_) => Err(anyhow::anyhow!("anti-abuse check failed")),
        SubmissionOutcome::TransportFailed(_) => Err(anyhow::anyhow!("registration request failed")),
        SubmissionOutcome::Ignored => {
            eprintln!("{}", "Submit control is not active".warn());
            Err(anyhow::anyhow!("submission ignored"))
        }
    };

    controller.unmount();
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ticket_arg() {
        assert_eq!(
            parse_ticket_arg("ticket_type_1=2"),
            Ok(("ticket_type_1".to_string(), Some("2".to_string())))
        );
        assert_eq!(
            parse_ticket_arg(" vip "),
            Ok(("vip".to_string(), None))
        );
        assert!(parse_ticket_arg("=3").is_err());
    }

    #[test]
    fn test_build_preselects_quantities() {
        let form = RegisterForm {
            endpoint: "/event/1/registration/new".to_string(),
            data_action: None,
            tickets: vec![
                ("ticket_type_1".to_string(), Some("2".to_string())),
                ("ticket_type_2".to_string(), None),
            ],
            max_quantity: 5,
        };

        let handle = form.build().unwrap();
        let selection = handle.selection();
        assert_eq!(selection.get("ticket_type_1"), Some("2"));
        assert_eq!(selection.get("ticket_type_2"), Some("0"));
    }

    #[test]
    fn test_build_rejects_out_of_range_quantity() {
        let form = RegisterForm {
            endpoint: "/e".to_string(),
            data_action: None,
            tickets: vec![("t".to_string(), Some("12".to_string()))],
            max_quantity: 9,
        };
        assert!(form.build().is_err());
    }
}
