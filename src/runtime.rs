//! Carries out the actions produced by the event handler.
//!
//! Every side effect goes through a [`Launcher`]. Failures are logged and
//! otherwise ignored: the state machine has already moved on, and a launch
//! that fails does not reopen a closed session.

use crate::app::Action;
use crate::domain::MenuCommand;
use crate::infrastructure::{expand_field_codes, fallback_url, Launcher};
use crate::Config;

/// Executes `actions` in order.
///
/// Returns `true` if one of them ends the overlay session.
pub fn execute(actions: &[Action], launcher: &dyn Launcher, config: &Config) -> bool {
    let _span = tracing::debug_span!("execute_actions", count = actions.len()).entered();

    let mut close = false;
    for action in actions {
        let result = match action {
            Action::Launch { command, name } => {
                let expanded = expand_field_codes(command, name);
                tracing::info!(name = %name, command = %expanded, "launching");
                launcher.launch(&expanded)
            }
            Action::RunFallback { query } => {
                let url = fallback_url(&config.fallback_url, query);
                tracing::info!(url = %url, "running fallback search");
                launcher.open_url(&url)
            }
            Action::RunMenuCommand(MenuCommand::CopyToClipboard(text)) => {
                launcher.copy_to_clipboard(text)
            }
            Action::Close => {
                close = true;
                Ok(())
            }
        };

        if let Err(e) = result {
            tracing::error!(action = ?action, error = %e, "action failed");
        }
    }

    close
}
