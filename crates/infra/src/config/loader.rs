//! Configuration loader
//!
//! Loads client configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If none are set, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//! 5. Uses [`ClientConfig::default`] when neither source exists
//!
//! ## Environment Variables
//! - `VENMO_BASE_URL`: API base URL
//! - `VENMO_CLIENT_ID`: Default OAuth client id
//! - `VENMO_TIMEOUT_SECS`: Per-request timeout in seconds
//! - `VENMO_USER_AGENT`: `User-Agent` override
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./venmo.json` or `./venmo.toml` (current working directory)
//! 2. `./config.json` or `./config.toml` (current working directory)
//! 3. The same names in the parent and grandparent directories
//! 4. The same names next to the executable

use std::path::{Path, PathBuf};

use tracing::{debug, info};
use venmo_domain::{ClientConfig, ConfigError};

const ENV_BASE_URL: &str = "VENMO_BASE_URL";
const ENV_CLIENT_ID: &str = "VENMO_CLIENT_ID";
const ENV_TIMEOUT_SECS: &str = "VENMO_TIMEOUT_SECS";
const ENV_USER_AGENT: &str = "VENMO_USER_AGENT";

const CONFIG_FILE_NAMES: [&str; 4] = ["venmo.json", "venmo.toml", "config.json", "config.toml"];

/// Load configuration with automatic fallback strategy
///
/// Environment variables win if any is set; otherwise the first config file
/// found by [`probe_config_paths`] is used; otherwise defaults.
///
/// # Errors
/// Returns `ConfigError` if a source exists but holds an invalid value or
/// cannot be read or parsed. A missing source is never an error.
pub fn load() -> Result<ClientConfig, ConfigError> {
    match load_from_env() {
        Ok(config) => {
            info!("Configuration loaded from environment variables");
            return Ok(config);
        }
        Err(ConfigError::Missing(reason)) => {
            debug!(%reason, "No configuration in environment, trying file");
        }
        Err(err) => return Err(err),
    }

    match load_from_file(None) {
        Err(ConfigError::Missing(reason)) => {
            debug!(%reason, "No configuration file found, using defaults");
            Ok(ClientConfig::default())
        }
        other => other,
    }
}

/// Load configuration from environment variables
///
/// Every variable is optional; unset ones take their default. Empty values
/// count as unset.
///
/// # Errors
/// - `ConfigError::Missing` if none of the variables is set
/// - `ConfigError::Invalid` if `VENMO_TIMEOUT_SECS` is not a number
pub fn load_from_env() -> Result<ClientConfig, ConfigError> {
    let base_url = env_var(ENV_BASE_URL);
    let client_id = env_var(ENV_CLIENT_ID);
    let timeout = env_var(ENV_TIMEOUT_SECS);
    let user_agent = env_var(ENV_USER_AGENT);

    if base_url.is_none() && client_id.is_none() && timeout.is_none() && user_agent.is_none() {
        return Err(ConfigError::Missing("no VENMO_* environment variables set".to_string()));
    }

    let mut config = ClientConfig::default();
    if let Some(base_url) = base_url {
        config.base_url = base_url;
    }
    if let Some(client_id) = client_id {
        config.default_client_id = client_id;
    }
    if let Some(timeout) = timeout {
        config.timeout_secs = timeout.trim().parse::<u64>().map_err(|e| {
            ConfigError::Invalid(format!("Invalid {ENV_TIMEOUT_SECS} '{timeout}': {e}"))
        })?;
    }
    config.user_agent = user_agent;

    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
/// Fields absent from the file take their default.
///
/// # Errors
/// - `ConfigError::Missing` if the file (or any probed file) does not exist
/// - `ConfigError::Io` if the file cannot be read
/// - `ConfigError::Parse` if the format is invalid or unsupported
pub fn load_from_file(path: Option<PathBuf>) -> Result<ClientConfig, ConfigError> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(ConfigError::Missing(format!("Config file not found: {}", p.display())));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            ConfigError::Missing("No config file found in any of the standard locations".into())
        })?,
    };

    info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|source| ConfigError::Io { path: config_path.clone(), source })?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`); a file without
/// an extension is read as JSON.
fn parse_config(contents: &str, path: &Path) -> Result<ClientConfig, ConfigError> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| ConfigError::Parse(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| ConfigError::Parse(format!("Invalid JSON format: {e}"))),
        _ => Err(ConfigError::Parse(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe multiple paths for configuration files
///
/// Searches the current working directory, its two nearest ancestors, then
/// the same three levels starting at the executable's directory.
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut roots = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        roots.push(cwd);
    }
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            roots.push(exe_dir.to_path_buf());
        }
    }

    roots
        .iter()
        .flat_map(|root| [root.clone(), root.join(".."), root.join("../..")])
        .flat_map(|dir| CONFIG_FILE_NAMES.map(|name| dir.join(name)))
        .find(|path| path.is_file())
}

/// Get an environment variable, treating empty values as unset
fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}
