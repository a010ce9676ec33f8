//! Shared helpers for command handlers.

use std::io::IsTerminal;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use agrisci_core::{CoreError, DashboardController, Navigation, Route};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, action: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: action.into(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Spinner on stderr while a request is in flight. Hidden when quiet or
/// when stderr is not a terminal.
pub fn spinner(message: &str, quiet: bool) -> ProgressBar {
    if quiet || !std::io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    pb.set_style(style);
    pb.set_message(message.to_owned());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Fail unless the session would land on the dashboard.
pub fn require_dashboard(controller: &DashboardController) -> Result<(), CliError> {
    match agrisci_core::landing(Route::Dashboard.path(), controller.is_authenticated()) {
        Route::Dashboard => Ok(()),
        Route::Login => Err(CliError::NotLoggedIn),
    }
}

/// Fetch every collection, with a spinner.
pub async fn load(controller: &mut DashboardController, global: &GlobalOpts) -> Result<(), CliError> {
    require_dashboard(controller)?;
    let pb = spinner("Loading dashboard data...", global.quiet);
    let result = controller.load().await;
    pb.finish_and_clear();
    finish(controller, global, result)
}

/// Report the outcome of a controller action.
///
/// Prints the notification the action left behind and converts the error.
/// A queued login redirect means the session ended; that is reported by
/// the returned error alone.
pub fn finish(
    controller: &mut DashboardController,
    global: &GlobalOpts,
    result: Result<(), CoreError>,
) -> Result<(), CliError> {
    if let Some(nav) = controller.take_navigation() {
        debug!(?nav, "controller requested navigation");
        if nav == Navigation::Login {
            return Err(match result {
                Err(e) => e.into(),
                Ok(()) => CliError::SessionExpired,
            });
        }
    }
    if let Some(notification) = controller.notifications().current() {
        output::print_notification(notification, output::should_color(global.color), global.quiet);
    }
    result.map_err(CliError::from)
}
