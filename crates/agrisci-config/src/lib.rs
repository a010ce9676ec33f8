//! Shared configuration for the agrisci CLI.
//!
//! TOML config with environment overrides, durable credential storage
//! (JSON file or OS keyring), and translation to
//! `agrisci_core::ControllerConfig`.

mod credentials;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use agrisci_api::TlsMode;
use agrisci_core::{ControllerConfig, CredentialStore, DEFAULT_BASE_URL};

pub use credentials::{FileCredentialStore, KeyringCredentialStore};

/// Prefix for environment overrides; `AGRISCI_API_BASE_URL` sets
/// `api_base_url`.
pub const ENV_PREFIX: &str = "AGRISCI_";

/// Overrides the config file location.
pub const CONFIG_PATH_ENV: &str = "AGRISCI_CONFIG";

const KEYRING_SERVICE: &str = "agrisci";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("credential store error: {0}")]
    Credentials(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── Config struct ───────────────────────────────────────────────────

/// Where login tokens are kept between runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CredentialBackend {
    /// JSON file in the platform data directory.
    #[default]
    File,
    /// OS keyring (Keychain, Secret Service, Credential Manager).
    Keyring,
}

/// Top-level TOML configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Admin API base URL.
    #[serde(default = "default_base_url")]
    pub api_base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// How long notifications stay up, in seconds.
    #[serde(default = "default_notification_secs")]
    pub notification_secs: u64,

    #[serde(default)]
    pub credential_store: CredentialBackend,

    /// Override for the credentials file (file backend only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials_path: Option<PathBuf>,

    /// Accept invalid TLS certificates.
    #[serde(default)]
    pub insecure: bool,

    /// Custom CA certificate (PEM).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_cert: Option<PathBuf>,

    /// Default output format for the CLI.
    #[serde(default = "default_output")]
    pub output: String,

    /// Color mode for the CLI: auto, always, never.
    #[serde(default = "default_color")]
    pub color: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_base_url(),
            timeout: default_timeout(),
            notification_secs: default_notification_secs(),
            credential_store: CredentialBackend::default(),
            credentials_path: None,
            insecure: false,
            ca_cert: None,
            output: default_output(),
            color: default_color(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.into()
}
fn default_timeout() -> u64 {
    30
}
fn default_notification_secs() -> u64 {
    6
}
fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}

impl Config {
    /// Check values that would only fail later, deep inside a request.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = url::Url::parse(&self.api_base_url).map_err(|e| ConfigError::Validation {
            field: "api_base_url".into(),
            reason: e.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Validation {
                field: "api_base_url".into(),
                reason: format!("unsupported scheme '{}'", url.scheme()),
            });
        }
        if self.timeout == 0 {
            return Err(ConfigError::Validation {
                field: "timeout".into(),
                reason: "must be at least 1 second".into(),
            });
        }
        Ok(())
    }

    pub fn tls_mode(&self) -> TlsMode {
        match (&self.ca_cert, self.insecure) {
            (Some(path), _) => TlsMode::CustomCa(path.clone()),
            (None, true) => TlsMode::DangerAcceptInvalid,
            (None, false) => TlsMode::System,
        }
    }

    /// Translate into the controller's runtime config.
    pub fn controller_config(&self) -> ControllerConfig {
        ControllerConfig {
            base_url: self.api_base_url.clone(),
            tls: self.tls_mode(),
            timeout: Duration::from_secs(self.timeout),
            notification_duration: Duration::from_secs(self.notification_secs),
        }
    }

    /// Open the configured credential backend.
    pub fn credential_store(&self) -> Result<Arc<dyn CredentialStore>, ConfigError> {
        match self.credential_store {
            CredentialBackend::File => {
                let path = self
                    .credentials_path
                    .clone()
                    .unwrap_or_else(default_credentials_path);
                Ok(Arc::new(FileCredentialStore::new(path)))
            }
            CredentialBackend::Keyring => Ok(Arc::new(KeyringCredentialStore::new(KEYRING_SERVICE))),
        }
    }
}

// ── Paths ───────────────────────────────────────────────────────────

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "uniqueagrisciences", "agrisci")
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("agrisci");
    p
}

/// Resolve the config file path: `AGRISCI_CONFIG`, else platform conventions.
pub fn config_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
        return PathBuf::from(path);
    }
    project_dirs().map_or_else(
        || dirs_fallback().join("config.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

/// Default location of the credentials file.
pub fn default_credentials_path() -> PathBuf {
    project_dirs().map_or_else(
        || dirs_fallback().join("credentials.json"),
        |dirs| dirs.data_dir().join("credentials.json"),
    )
}

// ── Loading ─────────────────────────────────────────────────────────

/// Layered sources: defaults, then the TOML file, then `AGRISCI_*` env.
pub fn figment_for(path: &Path) -> Figment {
    Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).ignore(&["config"]))
}

/// Load config from the canonical path plus environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let config: Config = figment_for(path).extract()?;
    config.validate()?;
    Ok(config)
}

// ── Saving ──────────────────────────────────────────────────────────

/// Serialize config to TOML and write it to `path`.
pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}
