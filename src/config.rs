use crate::constants::{API_URL_ENV, DEFAULT_API_BASE_URL, DEFAULT_REQUEST_TIMEOUT_SECS};
use crate::errors::{AtomiaError, AtomiaResult};
use crate::models::Subject;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
    sync::RwLock,
    time::Duration,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub default_subject: Subject,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            default_subject: Subject::Physics,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

static CONFIG: Lazy<RwLock<Config>> = Lazy::new(|| RwLock::new(Config::default()));

/// Loads the config file (creating it with defaults on first run), applies
/// environment overrides and installs the result as the global config.
pub fn initialize_config() -> AtomiaResult<()> {
    let mut config = load_config_from(&get_config_path()?)?;
    apply_env_overrides(&mut config);
    validate_config(&config)?;

    *CONFIG.write().unwrap_or_else(|e| e.into_inner()) = config;
    Ok(())
}

pub fn config_dir() -> AtomiaResult<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| AtomiaError::config_error("Could not determine home directory"))?;

    Ok(home_dir.join(".config").join("atomia"))
}

fn get_config_path() -> AtomiaResult<PathBuf> {
    Ok(config_dir()?.join("config.json"))
}

pub fn load_config_from(path: &Path) -> AtomiaResult<Config> {
    if path.exists() {
        let config_str = fs::read_to_string(path).map_err(|e| {
            AtomiaError::config_error(format!("Failed to read config file: {}", e))
        })?;

        let config: Config = serde_json::from_str(&config_str)
            .map_err(|e| AtomiaError::config_error(format!("Failed to parse config: {}", e)))?;

        validate_config(&config)?;
        return Ok(config);
    }

    let config = Config::default();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            AtomiaError::config_error(format!("Failed to create config directory: {}", e))
        })?;
    }

    let config_str = serde_json::to_string_pretty(&config)?;
    fs::write(path, config_str)
        .map_err(|e| AtomiaError::config_error(format!("Failed to write config file: {}", e)))?;

    Ok(config)
}

fn apply_env_overrides(config: &mut Config) {
    if let Ok(url) = env::var(API_URL_ENV) {
        if !url.trim().is_empty() {
            config.api_base_url = url.trim().to_string();
        }
    }
}

pub fn validate_config(config: &Config) -> AtomiaResult<()> {
    let url = config.api_base_url.trim();
    if url.is_empty() {
        return Err(AtomiaError::config_error("api_base_url is required"));
    }

    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(AtomiaError::config_error(
            "api_base_url must start with http:// or https://",
        ));
    }

    if config.request_timeout_secs == 0 {
        return Err(AtomiaError::config_error(
            "request_timeout_secs must be greater than 0",
        ));
    }

    if config.log_level.trim().is_empty() {
        return Err(AtomiaError::config_error("log_level is required"));
    }

    Ok(())
}

pub fn get_config() -> Config {
    CONFIG.read().unwrap_or_else(|e| e.into_inner()).clone()
}
