use color_eyre::{eyre::eyre, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

const BASE_URL_ENV: &str = "NOTEVAULT_API_BASE_URL";
const ACCESS_TOKEN_ENV: &str = "NOTEVAULT_ACCESS_TOKEN";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
  #[serde(default)]
  pub api: ApiConfig,
  #[serde(default)]
  pub cache: CacheConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
  /// Prefix for every endpoint, e.g. "https://notes.example.com/api".
  /// Unset means requests go to a bare relative path.
  pub base_url: Option<String>,
  /// Request timeout enforced by the HTTP client
  #[serde(default = "default_timeout_secs")]
  pub timeout_secs: u64,
  /// Sent as `X-Access-Token` on every request when present
  pub access_token: Option<String>,
}

impl Default for ApiConfig {
  fn default() -> Self {
    Self {
      base_url: None,
      timeout_secs: default_timeout_secs(),
      access_token: None,
    }
  }
}

impl ApiConfig {
  pub fn timeout(&self) -> Duration {
    Duration::from_secs(self.timeout_secs)
  }

  /// Endpoint prefix with any trailing slash removed, or "" when unset.
  pub fn prefix(&self) -> &str {
    self
      .base_url
      .as_deref()
      .map(|u| u.trim_end_matches('/'))
      .unwrap_or("")
  }
}

fn default_timeout_secs() -> u64 {
  30
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
  /// Disable to send every list request to the remote service
  #[serde(default = "default_true")]
  pub enabled: bool,
}

impl Default for CacheConfig {
  fn default() -> Self {
    Self { enabled: true }
  }
}

fn default_true() -> bool {
  true
}

impl Config {
  /// Load configuration, then apply environment overrides.
  ///
  /// Search order:
  /// 1. Explicit path if provided
  /// 2. ./notevault.yaml (current directory)
  /// 3. $XDG_CONFIG_HOME/notevault/config.yaml
  ///
  /// No file at all is fine: every option has a default.
  pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
    let path = if let Some(p) = explicit_path {
      if p.exists() {
        Some(p.to_path_buf())
      } else {
        return Err(eyre!("Config file not found: {}", p.display()));
      }
    } else {
      Self::find_config_file()
    };

    let config = match path {
      Some(p) => Self::load_from_path(&p)?,
      None => Config::default(),
    };

    let config = config.with_env_overrides(
      std::env::var(BASE_URL_ENV).ok(),
      std::env::var(ACCESS_TOKEN_ENV).ok(),
    );
    config.validate()?;

    Ok(config)
  }

  fn find_config_file() -> Option<PathBuf> {
    // Check current directory
    let local = PathBuf::from("notevault.yaml");
    if local.exists() {
      return Some(local);
    }

    // Check XDG config directory
    if let Some(config_dir) = dirs::config_dir() {
      let xdg_path = config_dir.join("notevault").join("config.yaml");
      if xdg_path.exists() {
        return Some(xdg_path);
      }
    }

    None
  }

  fn load_from_path(path: &Path) -> Result<Self> {
    let contents = std::fs::read_to_string(path)
      .map_err(|e| eyre!("Failed to read config file {}: {}", path.display(), e))?;

    Self::parse(&contents)
      .map_err(|e| eyre!("Failed to parse config file {}: {}", path.display(), e))
  }

  fn parse(contents: &str) -> Result<Self> {
    // An empty file deserializes to null
    if contents.trim().is_empty() {
      return Ok(Config::default());
    }
    Ok(serde_yaml::from_str(contents)?)
  }

  fn with_env_overrides(mut self, base_url: Option<String>, access_token: Option<String>) -> Self {
    if let Some(url) = base_url.filter(|u| !u.is_empty()) {
      self.api.base_url = Some(url);
    }
    if let Some(token) = access_token.filter(|t| !t.is_empty()) {
      self.api.access_token = Some(token);
    }
    self
  }

  /// Override the base URL (e.g. from the command line).
  pub fn with_base_url(mut self, base_url: Option<String>) -> Result<Self> {
    if base_url.is_some() {
      self.api.base_url = base_url;
    }
    self.validate()?;
    Ok(self)
  }

  fn validate(&self) -> Result<()> {
    if let Some(url) = &self.api.base_url {
      Url::parse(url).map_err(|e| eyre!("Invalid API base URL '{}': {}", url, e))?;
    }
    Ok(())
  }
}
