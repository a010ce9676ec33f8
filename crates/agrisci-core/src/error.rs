// ── Core error types ──
//
// User-facing errors from agrisci-core. Consumers never see raw HTTP
// statuses or JSON parse failures; `From<agrisci_api::Error>` folds
// transport-layer errors into these variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Local validation ─────────────────────────────────────────────
    /// A required field is empty or a numeric field does not parse.
    /// Raised before any network call.
    #[error("{message}")]
    Validation { message: String },

    // ── Authentication ───────────────────────────────────────────────
    /// Login failed. The message is deliberately generic.
    #[error("Invalid login credentials")]
    InvalidCredentials,

    /// An authenticated call was answered with HTTP 401.
    #[error("Session expired -- please log in again")]
    Unauthorized,

    /// The operation needs a session and there is none.
    #[error("Not logged in")]
    NotAuthenticated,

    // ── Remote ───────────────────────────────────────────────────────
    #[error("Cannot reach the admin API: {message}")]
    Transport { message: String },

    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// A list fetch during `load()` failed.
    #[error("Failed to load data: {message}")]
    Load { message: String },

    // ── Local state ──────────────────────────────────────────────────
    #[error("{kind} not found: {id}")]
    NotFound { kind: String, id: String },

    /// The requested action does not fit the current UI state, e.g. a
    /// second submit while a save is in flight.
    #[error("{message}")]
    InvalidState { message: String },

    // ── Local plumbing ───────────────────────────────────────────────
    /// Durable credential storage could not be read or written.
    #[error("Credential storage error: {message}")]
    Storage { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// `true` if the session is gone and the user has to log in again.
    pub fn is_auth(&self) -> bool {
        matches!(
            self,
            Self::Unauthorized | Self::InvalidCredentials | Self::NotAuthenticated
        )
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<agrisci_api::Error> for CoreError {
    fn from(err: agrisci_api::Error) -> Self {
        match err {
            agrisci_api::Error::Authentication { .. } => CoreError::InvalidCredentials,
            agrisci_api::Error::Unauthorized => CoreError::Unauthorized,
            agrisci_api::Error::Transport(ref e) => {
                if let Some(status) = e.status() {
                    CoreError::Api {
                        status: status.as_u16(),
                        message: e.to_string(),
                    }
                } else {
                    CoreError::Transport {
                        message: e.to_string(),
                    }
                }
            }
            agrisci_api::Error::Api { status, message } => CoreError::Api { status, message },
            agrisci_api::Error::Deserialization { message, .. } => CoreError::Api {
                status: 200,
                message: format!("unexpected response body: {message}"),
            },
            agrisci_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("invalid API URL: {e}"),
            },
            agrisci_api::Error::InvalidBaseUrl(url) => CoreError::Config {
                message: format!("base URL cannot be used for API requests: {url}"),
            },
            agrisci_api::Error::ClientBuild(message) => CoreError::Config { message },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_survives_translation() {
        let err: CoreError = agrisci_api::Error::Unauthorized.into();
        assert!(matches!(err, CoreError::Unauthorized));
        assert!(err.is_auth());
    }

    #[test]
    fn rejected_login_is_generic() {
        let err: CoreError = agrisci_api::Error::Authentication {
            message: "HTTP 403 from upstream".into(),
        }
        .into();
        assert_eq!(err.to_string(), "Invalid login credentials");
    }

    #[test]
    fn api_status_is_kept() {
        let err: CoreError = agrisci_api::Error::Api {
            status: 422,
            message: "bad".into(),
        }
        .into();
        assert!(matches!(err, CoreError::Api { status: 422, .. }));
        assert!(!err.is_auth());
    }
}
