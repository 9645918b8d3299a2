//! Terminal notification bus

use crate::cli::style::{toast_marker, Stylize};
use anstream::{eprintln, println};
use async_trait::async_trait;
use event_signup::notify::NotificationService;
use event_signup::types::{Notification, ToastType};

/// Prints notifications; danger goes to stderr
pub struct TerminalNotifier;

#[async_trait]
impl NotificationService for TerminalNotifier {
    async fn notify(&self, n: Notification) {
        let marker = toast_marker(n.kind);
        let sticky = if n.sticky { " (sticky)" } else { "" };

        if n.kind == ToastType::Danger {
            eprintln!(
                "{marker} {}{}: {}",
                n.title.error(),
                sticky.muted().for_stderr(),
                n.message
            );
        } else {
            println!("{marker} {}{}: {}", n.title.emphasis(), sticky.muted(), n.message);
        }
    }
}
