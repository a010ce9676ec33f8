//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use agrisci_config::ConfigError;
use agrisci_core::CoreError;

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the admin API")]
    #[diagnostic(
        code(agrisci::connection_failed),
        help(
            "Check that the API is running and reachable.\n\
             Reason: {message}\n\
             Override the address with --api-url or AGRISCI_API_BASE_URL."
        )
    )]
    ConnectionFailed { message: String },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Invalid login credentials")]
    #[diagnostic(code(agrisci::auth_failed), help("Check the username and password and try again."))]
    AuthFailed,

    #[error("Not logged in")]
    #[diagnostic(code(agrisci::not_logged_in), help("Run: agrisci login"))]
    NotLoggedIn,

    #[error("Session expired. Please log in again.")]
    #[diagnostic(
        code(agrisci::session_expired),
        help("The stored token was rejected and has been removed.\nRun: agrisci login")
    )]
    SessionExpired,

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(agrisci::not_found),
        help("Run: agrisci {list_command} to see available records")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── API ──────────────────────────────────────────────────────────
    #[error("API error (HTTP {status}): {message}")]
    #[diagnostic(code(agrisci::api_error))]
    ApiError { status: u16, message: String },

    #[error("Failed to load data")]
    #[diagnostic(code(agrisci::load_failed), help("{message}"))]
    LoadFailed { message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(agrisci::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(
        code(agrisci::config),
        help("Inspect the effective settings with: agrisci config show")
    )]
    Config(#[from] ConfigError),

    #[error("Config file already exists at {path}")]
    #[diagnostic(code(agrisci::config_exists), help("Pass --force to overwrite it."))]
    ConfigExists { path: String },

    #[error("Credential storage error: {message}")]
    #[diagnostic(code(agrisci::credentials))]
    Credentials { message: String },

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(agrisci::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── Internal / IO ────────────────────────────────────────────────
    #[error("Internal error: {0}")]
    #[diagnostic(code(agrisci::internal))]
    Internal(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::LoadFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed | Self::NotLoggedIn | Self::SessionExpired => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. }
            | Self::NonInteractiveRequiresYes { .. }
            | Self::ConfigExists { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation { message } | CoreError::InvalidState { message } => {
                Self::Validation {
                    field: "input".into(),
                    reason: message,
                }
            }
            CoreError::InvalidCredentials => Self::AuthFailed,
            CoreError::Unauthorized => Self::SessionExpired,
            CoreError::NotAuthenticated => Self::NotLoggedIn,
            CoreError::Transport { message } => Self::ConnectionFailed { message },
            CoreError::Api { status, message } => Self::ApiError { status, message },
            CoreError::Load { message } => Self::LoadFailed { message },
            CoreError::NotFound { kind, id } => Self::NotFound {
                list_command: list_command_for(&kind),
                resource_type: kind,
                identifier: id,
            },
            CoreError::Storage { message } => Self::Credentials { message },
            CoreError::Config { message } | CoreError::Internal(message) => Self::Internal(message),
        }
    }
}

fn list_command_for(kind: &str) -> String {
    if kind.starts_with("order") {
        "orders list".into()
    } else if kind.starts_with("shipping") {
        "shipping list".into()
    } else {
        "products list".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_errors_map_to_exit_codes() {
        assert_eq!(CliError::from(CoreError::Unauthorized).exit_code(), exit_code::AUTH);
        assert_eq!(
            CliError::from(CoreError::validation("Please fill in all required fields."))
                .exit_code(),
            exit_code::USAGE
        );
        assert_eq!(
            CliError::from(CoreError::Load {
                message: "boom".into()
            })
            .exit_code(),
            exit_code::CONNECTION
        );
        assert_eq!(
            CliError::from(CoreError::Api {
                status: 500,
                message: "oops".into()
            })
            .exit_code(),
            exit_code::GENERAL
        );
    }

    #[test]
    fn not_found_points_at_the_right_list() {
        let err = CliError::from(CoreError::NotFound {
            kind: "order".into(),
            id: "ORD-1-9".into(),
        });
        assert!(matches!(
            err,
            CliError::NotFound { ref list_command, .. } if list_command == "orders list"
        ));
    }
}
