//! Command handlers, one module per top-level command.

pub mod auth;
pub mod config_cmd;
pub mod entities;
pub mod summary;
pub mod util;

use agrisci_core::{DashboardController, EntityKind};

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Route a controller-backed command to its handler.
pub async fn dispatch(
    cmd: Command,
    controller: &mut DashboardController,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Login(args) => auth::login(controller, args, global).await,
        Command::Logout => {
            auth::logout(controller, global);
            Ok(())
        }
        Command::Status => {
            auth::status(controller, global);
            Ok(())
        }
        Command::Products(args) => {
            entities::handle(controller, EntityKind::Product, args, global).await
        }
        Command::Orders(args) => entities::handle(controller, EntityKind::Order, args, global).await,
        Command::Shipping(args) => {
            entities::handle(controller, EntityKind::Shipping, args, global).await
        }
        Command::Summary => summary::handle(controller, global).await,
        Command::Config(_) | Command::Completions(_) => Err(CliError::Internal(
            "command does not use the admin API".into(),
        )),
    }
}
