//! TON network selection and the `lite-client` global config files.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::Config;

#[derive(Debug, Error)]
pub enum NetworkError {
  #[error("unknown network '{0}', expected 'testnet' or 'mainnet'")]
  UnknownNetwork(String),

  #[error("failed to download network config from {url}: {source}")]
  Download { url: String, source: reqwest::Error },

  #[error("failed to write network config {}: {source}", path.display())]
  Write { path: PathBuf, source: std::io::Error },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
  #[default]
  Testnet,
  Mainnet,
}

impl Network {
  pub fn as_str(&self) -> &'static str {
    match self {
      Network::Testnet => "testnet",
      Network::Mainnet => "mainnet",
    }
  }
}

impl fmt::Display for Network {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for Network {
  type Err = NetworkError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_ascii_lowercase().as_str() {
      "testnet" => Ok(Network::Testnet),
      "mainnet" => Ok(Network::Mainnet),
      _ => Err(NetworkError::UnknownNetwork(s.to_string())),
    }
  }
}

/// Location of the global config passed to `lite-client -C`.
pub fn config_path(config: &Config, network: Network) -> PathBuf {
  config.config_dir.join(format!("{}.config.json", network))
}

/// Make sure the global config for `network` exists on disk.
///
/// The file is downloaded when it is missing or when `refresh` is set;
/// otherwise the cached copy is reused.
pub async fn ensure_network_config(config: &Config, network: Network, refresh: bool) -> Result<PathBuf, NetworkError> {
  let path = config_path(config, network);

  if path.exists() && !refresh {
    debug!(path = %path.display(), "using cached network config");
    return Ok(path);
  }

  let url = config.network_urls.url(network).to_string();
  info!(%network, %url, "downloading network config");

  let body = fetch(&url)
    .await
    .map_err(|source| NetworkError::Download { url: url.clone(), source })?;

  if let Some(parent) = path.parent() {
    tokio::fs::create_dir_all(parent)
      .await
      .map_err(|source| NetworkError::Write {
        path: parent.to_path_buf(),
        source,
      })?;
  }
  tokio::fs::write(&path, body)
    .await
    .map_err(|source| NetworkError::Write {
      path: path.clone(),
      source,
    })?;

  Ok(path)
}

async fn fetch(url: &str) -> Result<Vec<u8>, reqwest::Error> {
  let response = reqwest::get(url).await?.error_for_status()?;
  Ok(response.bytes().await?.to_vec())
}
