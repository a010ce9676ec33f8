//! CLI configuration: a thin layer over `agrisci_config` that applies
//! `GlobalOpts` flag overrides (--api-url, --timeout, --insecure).

use std::path::PathBuf;

use agrisci_config::Config;

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Config file in effect: `--config` / `AGRISCI_CONFIG`, else the platform path.
pub fn config_file(global: &GlobalOpts) -> PathBuf {
    global
        .config
        .clone()
        .unwrap_or_else(agrisci_config::config_path)
}

/// Load file and env config, then apply flag overrides and validate.
pub fn resolve(global: &GlobalOpts) -> Result<Config, CliError> {
    let mut cfg: Config = agrisci_config::figment_for(&config_file(global))
        .extract()
        .map_err(agrisci_config::ConfigError::from)?;

    if let Some(ref url) = global.api_url {
        cfg.api_base_url.clone_from(url);
    }
    if let Some(timeout) = global.timeout {
        cfg.timeout = timeout;
    }
    if global.insecure {
        cfg.insecure = true;
    }

    cfg.validate()?;
    Ok(cfg)
}
