use thiserror::Error;

/// Top-level error type for the `agrisci-api` crate.
///
/// Covers every failure mode of the admin API surface: login,
/// transport, non-success responses, and body decoding.
/// `agrisci-core` maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Login was rejected (wrong credentials, malformed token response, etc.)
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// An authenticated call came back with HTTP 401.
    ///
    /// The bearer token is missing, expired, or revoked. The gateway never
    /// refreshes tokens; the caller decides how to re-authenticate.
    #[error("Unauthorized -- the session token was rejected")]
    Unauthorized,

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The configured base URL cannot carry path segments (e.g. `mailto:`).
    #[error("Base URL cannot be used for API requests: {0}")]
    InvalidBaseUrl(String),

    /// Building the underlying HTTP client failed (TLS setup, CA file, etc.)
    #[error("HTTP client setup failed: {0}")]
    ClientBuild(String),

    // ── API ─────────────────────────────────────────────────────────
    /// Non-success HTTP response from the admin API.
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this error means the bearer token is no longer
    /// accepted and a fresh login might resolve it.
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    /// HTTP status code carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized => Some(401),
            Self::Api { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_counts_as_expired_session() {
        assert!(Error::Unauthorized.is_auth_expired());
        assert_eq!(Error::Unauthorized.status(), Some(401));
    }

    #[test]
    fn api_status_is_exposed() {
        let err = Error::Api {
            status: 404,
            message: "missing".into(),
        };
        assert_eq!(err.status(), Some(404));
        assert!(!err.is_auth_expired());
    }
}
