//! Runtime configuration.
//!
//! A [`Config`] is built once at process start and passed by reference to every
//! stage. It is read from `{config_dir}/config.toml` when that file exists and
//! falls back to defaults otherwise; a few environment variables override the
//! executable paths so tests and CI can point at alternative tools.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::consts::{DEFAULT_LITE_CLIENT_TRIES, FIFT_LIBS_DIR};
use crate::network::Network;
use crate::platform::executable_name;
use crate::platform::paths::config_dir;

/// Name of the configuration file inside the config directory.
pub const CONFIG_FILENAME: &str = "config.toml";

pub const FUNC_ENV: &str = "TONCLI_FUNC";
pub const FIFT_ENV: &str = "TONCLI_FIFT";
pub const LITE_CLIENT_ENV: &str = "TONCLI_LITE_CLIENT";

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to read config {}: {source}", path.display())]
  Read { path: PathBuf, source: std::io::Error },

  #[error("failed to parse config {}: {source}", path.display())]
  Parse { path: PathBuf, source: toml::de::Error },

  #[error("lite-client-tries must be at least 1, got {0}")]
  InvalidTries(u32),
}

/// Paths of the external tools.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Executables {
  pub func: PathBuf,
  pub fift: PathBuf,
  pub lite_client: PathBuf,
}

impl Default for Executables {
  fn default() -> Self {
    Self {
      func: PathBuf::from(executable_name("func")),
      fift: PathBuf::from(executable_name("fift")),
      lite_client: PathBuf::from(executable_name("lite-client")),
    }
  }
}

/// Where the global network configs are downloaded from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkUrls {
  pub testnet: String,
  pub mainnet: String,
}

impl Default for NetworkUrls {
  fn default() -> Self {
    Self {
      testnet: "https://ton.org/testnet-global.config.json".to_string(),
      mainnet: "https://ton.org/global-config.json".to_string(),
    }
  }
}

impl NetworkUrls {
  pub fn url(&self, network: Network) -> &str {
    match network {
      Network::Testnet => &self.testnet,
      Network::Mainnet => &self.mainnet,
    }
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
  pub executables: Executables,

  /// Upper bound of `lite-client` attempts per submission.
  pub lite_client_tries: u32,

  pub network_urls: NetworkUrls,

  /// Directory the config was loaded from; holds `fift-libs/` and network configs.
  #[serde(skip_deserializing)]
  pub config_dir: PathBuf,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      executables: Executables::default(),
      lite_client_tries: DEFAULT_LITE_CLIENT_TRIES,
      network_urls: NetworkUrls::default(),
      config_dir: PathBuf::new(),
    }
  }
}

impl Config {
  /// Load the configuration from the default config directory.
  pub fn load() -> Result<Self, ConfigError> {
    Self::load_from(&config_dir())
  }

  /// Load the configuration from `dir`, applying environment overrides.
  pub fn load_from(dir: &Path) -> Result<Self, ConfigError> {
    let path = dir.join(CONFIG_FILENAME);

    let mut config = if path.exists() {
      let content = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
        path: path.clone(),
        source,
      })?;
      toml::from_str::<Config>(&content).map_err(|source| ConfigError::Parse {
        path: path.clone(),
        source,
      })?
    } else {
      debug!(path = %path.display(), "no config file, using defaults");
      Config::default()
    };

    config.config_dir = dir.to_path_buf();
    config.apply_env_overrides();

    if config.lite_client_tries == 0 {
      return Err(ConfigError::InvalidTries(config.lite_client_tries));
    }

    Ok(config)
  }

  fn apply_env_overrides(&mut self) {
    if let Ok(path) = std::env::var(FUNC_ENV) {
      self.executables.func = PathBuf::from(path);
    }
    if let Ok(path) = std::env::var(FIFT_ENV) {
      self.executables.fift = PathBuf::from(path);
    }
    if let Ok(path) = std::env::var(LITE_CLIENT_ENV) {
      self.executables.lite_client = PathBuf::from(path);
    }
  }

  /// Directory with the Fift standard library passed to `fift -I`.
  pub fn fift_libs_dir(&self) -> PathBuf {
    self.config_dir.join(FIFT_LIBS_DIR)
  }

  pub fn config_file(&self) -> PathBuf {
    self.config_dir.join(CONFIG_FILENAME)
  }
}
