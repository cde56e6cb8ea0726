//! Configuration loading and setting resolution
//!
//! Every setting resolves with the same priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! The catalog API key is the exception: it comes from the environment
//! first, then from a local key file, and is otherwise absent.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Remote catalog base URL
pub const DEFAULT_API_BASE: &str = "https://api.pokemontcg.io/v2";

/// Local mirror of the catalog (a clone of the pokemon-tcg-data repo)
pub const DEFAULT_DATA_DIR: &str = "data/pokemon-tcg-data";

/// Artifact written by both pipelines
pub const DEFAULT_OUTPUT_FILE: &str = "sets-data.json";

/// Environment variable holding the catalog API key
pub const API_KEY_ENV: &str = "POKEMON_TCG_API_KEY";

/// Key file consulted when the environment variable is unset
pub const DEFAULT_API_KEY_FILE: &str = ".api_key";

/// Environment variable pointing at the TOML config file
pub const CONFIG_PATH_ENV: &str = "PTCG_CONFIG";

/// Logging section of the TOML config
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// trace, debug, info, warn or error
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Optional TOML configuration file
///
/// ```toml
/// data_dir = "data/pokemon-tcg-data"
/// output = "sets-data.json"
/// series = ["Scarlet & Violet", "Mega Evolution"]
///
/// [logging]
/// level = "debug"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TomlConfig {
    pub data_dir: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub api_base: Option<String>,
    pub api_key_file: Option<PathBuf>,
    /// Series names to keep; absent or empty means every series
    pub series: Option<Vec<String>>,
    pub logging: LoggingConfig,
}

/// Locate the config file: CLI argument, then `PTCG_CONFIG`, then the
/// per-user config directory
pub fn config_path(cli_arg: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = cli_arg {
        return Some(path.to_path_buf());
    }

    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        if !path.trim().is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    dirs::config_dir().map(|d| d.join("ptcg").join("config.toml"))
}

/// Load the TOML config
///
/// Returns `Ok(None)` for a missing file; the caller falls back to
/// defaults and reports it once logging is up. A file that exists but
/// does not parse is a `Config` error.
pub fn load_toml_config(path: &Path) -> Result<Option<TomlConfig>> {
    if !path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;

    let config: TomlConfig = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))?;

    Ok(Some(config))
}

/// Resolve a path setting by priority: CLI → ENV → TOML → default
pub fn resolve_path(
    cli_arg: Option<&Path>,
    env_var_name: &str,
    toml_value: Option<&Path>,
    default: &str,
) -> PathBuf {
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    if let Ok(path) = std::env::var(env_var_name) {
        if !path.trim().is_empty() {
            return PathBuf::from(path);
        }
    }

    if let Some(path) = toml_value {
        return path.to_path_buf();
    }

    PathBuf::from(default)
}

/// Resolve the optional catalog API key
///
/// **Priority:** ENV → key file. Returns `None` when neither yields a
/// usable key; requests are then sent unauthenticated.
pub fn resolve_api_key(key_file: &Path) -> Option<String> {
    let env_key = std::env::var(API_KEY_ENV)
        .ok()
        .filter(|key| is_valid_key(key));

    let file_key = if key_file.exists() {
        match std::fs::read_to_string(key_file) {
            Ok(content) => Some(content.trim().to_string()).filter(|key| is_valid_key(key)),
            Err(e) => {
                warn!("Could not read API key file {}: {}", key_file.display(), e);
                None
            }
        }
    } else {
        None
    };

    if env_key.is_some() && file_key.is_some() {
        warn!(
            "API key found in both {} and {}. Using environment (highest priority).",
            API_KEY_ENV,
            key_file.display()
        );
    }

    if let Some(key) = env_key {
        info!("API key loaded from environment variable");
        return Some(key.trim().to_string());
    }

    if let Some(key) = file_key {
        info!("API key loaded from {}", key_file.display());
        return Some(key);
    }

    info!("No API key configured, sending unauthenticated requests");
    None
}

/// Validate API key (non-empty, non-whitespace)
pub fn is_valid_key(key: &str) -> bool {
    !key.trim().is_empty()
}
