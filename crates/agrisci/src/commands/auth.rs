//! Login, logout and session status.

use std::io::{BufRead, IsTerminal};

use owo_colors::OwoColorize;
use secrecy::SecretString;
use serde::Serialize;
use tracing::debug;

use agrisci_core::{DashboardController, Route};

use crate::cli::{GlobalOpts, LoginArgs};
use crate::error::CliError;
use crate::output;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusView {
    authenticated: bool,
    username: Option<String>,
    api_base_url: String,
}

pub async fn login(
    controller: &mut DashboardController,
    args: LoginArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let username = match args.username {
        Some(name) => name,
        None => prompt_username()?,
    };
    let password = if args.password_stdin {
        read_password_stdin()?
    } else {
        let raw = rpassword::prompt_password("Password: ")?;
        SecretString::from(raw)
    };

    let pb = super::util::spinner("Signing in...", global.quiet);
    let result = controller.login(&username, &password).await;
    pb.finish_and_clear();

    let route = Route::from(result?);
    debug!(%route, "login complete");
    if !global.quiet {
        let msg = format!("Logged in as {username}");
        if output::should_color(global.color) {
            eprintln!("{}", msg.green());
        } else {
            eprintln!("{msg}");
        }
    }
    Ok(())
}

pub fn logout(controller: &mut DashboardController, global: &GlobalOpts) {
    let route = Route::from(controller.logout());
    debug!(%route, "logged out");
    if !global.quiet {
        eprintln!("Logged out");
    }
}

pub fn status(controller: &DashboardController, global: &GlobalOpts) {
    let view = StatusView {
        authenticated: controller.is_authenticated(),
        username: controller.session().username().map(str::to_owned),
        api_base_url: controller.config().base_url.clone(),
    };
    let out = output::render_single(
        global.output,
        &view,
        |v| match &v.username {
            Some(name) if v.authenticated => {
                format!("Logged in as {name}\nAPI: {}", v.api_base_url)
            }
            _ => format!("Not logged in\nAPI: {}", v.api_base_url),
        },
        |v| v.username.clone().unwrap_or_default(),
    );
    output::print_output(&out, global.quiet);
}

fn prompt_username() -> Result<String, CliError> {
    if !std::io::stdin().is_terminal() {
        return Err(CliError::Validation {
            field: "username".into(),
            reason: "pass --username when stdin is not a terminal".into(),
        });
    }
    dialoguer::Input::<String>::new()
        .with_prompt("Username")
        .interact_text()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))
}

fn read_password_stdin() -> Result<SecretString, CliError> {
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    let trimmed = line.trim_end_matches(['\r', '\n']);
    Ok(SecretString::from(trimmed.to_owned()))
}
