//! Configuration system for Lacuna.
//!
//! Uses `figment` for layered configuration: defaults -> user config file
//! -> explicit config file -> environment. The user config is loaded from
//! `~/.config/lacuna/config.toml` (platform equivalent via `directories`);
//! environment variables use the `LACUNA_` prefix with `__` separators.

use crate::error::ConfigError;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for a research engine instance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResearchConfig {
    /// Maximum search iterations per research run.
    pub max_iterations: usize,
    /// Maximum documents requested from the provider per search.
    pub results_per_search: usize,
    /// Timeout for a single provider request, in seconds.
    pub search_timeout_secs: u64,
}

impl Default for ResearchConfig {
    fn default() -> Self {
        Self {
            max_iterations: 10,
            results_per_search: 5,
            search_timeout_secs: 15,
        }
    }
}

/// Load configuration with figment layering.
///
/// Precedence, lowest to highest: built-in defaults, the user config file,
/// `config_file` when given, then `LACUNA_`-prefixed environment variables
/// (nested keys split on `__`).
pub fn load_config(config_file: Option<&Path>) -> Result<ResearchConfig, ConfigError> {
    let mut figment = Figment::from(Serialized::defaults(ResearchConfig::default()));

    if let Some(dirs) = directories::ProjectDirs::from("", "", "lacuna") {
        let user_config = dirs.config_dir().join("config.toml");
        if user_config.exists() {
            figment = figment.merge(Toml::file(&user_config));
        }
    }

    if let Some(path) = config_file {
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        figment = figment.merge(Toml::file(path));
    }

    figment = figment.merge(Env::prefixed("LACUNA_").split("__"));

    figment.extract().map_err(|e| ConfigError::ParseError {
        message: e.to_string(),
    })
}
