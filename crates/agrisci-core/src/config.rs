// ── Runtime connection configuration ──
//
// Describes how to reach the admin API and how long notifications stay
// up. Built by the CLI from file/env config; core never reads config
// files itself.

use std::time::Duration;

use agrisci_api::{TlsMode, TransportConfig};

/// Base URL used when neither the environment nor the config file sets one.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8086";

/// Environment variable that overrides the configured base URL.
pub const BASE_URL_ENV: &str = "AGRISCI_API_BASE_URL";

/// How long a notification stays visible unless replaced or dismissed.
pub const DEFAULT_NOTIFICATION_DURATION: Duration = Duration::from_secs(6);

/// Configuration for one dashboard controller.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Admin API base URL, e.g. `http://localhost:8086`.
    pub base_url: String,
    pub tls: TlsMode,
    /// Per-request timeout.
    pub timeout: Duration,
    pub notification_duration: Duration,
}

impl ControllerConfig {
    pub fn transport(&self) -> TransportConfig {
        TransportConfig {
            tls: self.tls.clone(),
            timeout: self.timeout,
        }
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            tls: TlsMode::System,
            timeout: Duration::from_secs(30),
            notification_duration: DEFAULT_NOTIFICATION_DURATION,
        }
    }
}
