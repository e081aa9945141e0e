use std::path::Path;

use config::{Config, ConfigError, Environment, File};
use tracing::debug;
use vin_core::DecoderConfig;

use crate::args::Cli;

/// Settings file looked up in the working directory when `--config` is absent.
pub const DEFAULT_SETTINGS_NAME: &str = "vin-decoder";

/// Prefix for environment overrides, e.g. `VIN__TIMEOUT_SECS=5`.
pub const ENV_PREFIX: &str = "VIN";

/// Layered settings: file, then `VIN__*` environment variables.
///
/// An explicit `path` must exist. Without one, `./vin-decoder.*` is used if
/// present and skipped otherwise.
///
/// # Errors
///
/// Returns an error if an explicit file is missing or any layer fails to
/// deserialize into [`DecoderConfig`].
pub fn load_settings(path: Option<&Path>) -> Result<DecoderConfig, ConfigError> {
    let file = match path {
        Some(p) => File::from(p).required(true),
        None => File::with_name(DEFAULT_SETTINGS_NAME).required(false),
    };

    let config = Config::builder()
        .add_source(file)
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize::<DecoderConfig>()?;

    debug!(?config, "settings loaded");
    Ok(config)
}

/// Settings with command-line overrides applied on top.
pub fn resolve(cli: &Cli) -> Result<DecoderConfig, ConfigError> {
    let mut config = load_settings(cli.config.as_deref())?;
    if let Some(base_url) = &cli.base_url {
        config.base_url = base_url.clone();
    }
    if let Some(timeout) = cli.timeout {
        config.timeout_secs = timeout;
    }
    Ok(config)
}
