use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Requests to the media server never use a timeout shorter than this.
pub const MIN_TIMEOUT_SECS: u64 = 120;

const APP_DIR: &str = "ms-channel-links";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    #[serde(alias = "SERVER_URL")]
    pub server_url: String,
    #[serde(default, alias = "API_KEY")]
    pub api_key: Option<String>,
    #[serde(default = "default_timeout", alias = "TIMEOUT")]
    pub timeout: u64,
    #[serde(default = "default_verify_ssl", alias = "VERIFY_SSL")]
    pub verify_ssl: bool,
    #[serde(default = "default_item_delay_ms")]
    pub item_delay_ms: u64,
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_timeout() -> u64 {
    MIN_TIMEOUT_SECS
}

fn default_verify_ssl() -> bool {
    true
}

fn default_item_delay_ms() -> u64 {
    500
}

impl Config {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let parsed = if is_json {
            Self::from_json(&contents)
        } else {
            Self::from_toml(&contents)
        };
        parsed.with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validated()
    }

    /// Media server client configurations are JSON with upper-case keys.
    pub fn from_json(contents: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(contents)?;
        config.validated()
    }

    fn validated(self) -> Result<Self> {
        if self.server_url.trim().is_empty() {
            anyhow::bail!("server_url must not be empty");
        }
        Ok(self)
    }

    pub fn get_logging_format(&self) -> &str {
        self.logging.format.as_deref().unwrap_or("text")
    }

    pub fn effective_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout.max(MIN_TIMEOUT_SECS))
    }

    /// Pause applied after every processed item.
    pub fn item_delay(&self) -> Duration {
        Duration::from_millis(self.item_delay_ms)
    }
}

/// Picks the config file: explicit argument, then `MS_LINKS_CONFIG`, then the
/// XDG and home config directories. Only the implicit locations are checked
/// for existence here.
pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(PathBuf::from(path));
    }

    if let Ok(path) = std::env::var("MS_LINKS_CONFIG") {
        return Some(PathBuf::from(path));
    }

    if let Ok(xdg_config_home) = std::env::var("XDG_CONFIG_HOME") {
        let config_path = Path::new(&xdg_config_home).join(APP_DIR).join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }
    }

    if let Some(home) = dirs::home_dir() {
        let config_path = home.join(".config").join(APP_DIR).join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }
    }

    None
}
