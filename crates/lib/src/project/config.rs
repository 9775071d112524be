use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::ProjectError;
use crate::artifacts::{BuildTarget, contract_target};

/// One entry of `project.yaml` as written by the user.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContractEntry {
  /// Source files relative to the project root, in compilation order.
  pub func: Vec<String>,
  /// Optional data script relative to the project root.
  #[serde(default)]
  pub data: Option<String>,
}

/// A contract with its sources and derived build outputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contract {
  pub name: String,
  pub data: Option<PathBuf>,
  pub target: BuildTarget,
}

/// Parsed `project.yaml`; contracts keep the order of the file.
#[derive(Debug, Clone, Default)]
pub struct ProjectConfig {
  pub contracts: Vec<Contract>,
}

impl ProjectConfig {
  /// Read and parse `{root}/project.yaml`.
  pub fn load(root: &Path) -> Result<Self, ProjectError> {
    let path = root.join(crate::consts::PROJECT_FILE);
    let content = fs::read_to_string(&path).map_err(|source| ProjectError::Read {
      path: path.clone(),
      source,
    })?;
    Self::parse(root, &path, &content)
  }

  fn parse(root: &Path, path: &Path, content: &str) -> Result<Self, ProjectError> {
    // A `Mapping` rather than a HashMap so contracts build in file order.
    let mapping: serde_yaml::Mapping = match serde_yaml::from_str(content) {
      Ok(serde_yaml::Value::Null) => serde_yaml::Mapping::new(),
      Ok(value) => serde_yaml::from_value(value).map_err(|source| ProjectError::Parse {
        path: path.to_path_buf(),
        source,
      })?,
      Err(source) => {
        return Err(ProjectError::Parse {
          path: path.to_path_buf(),
          source,
        });
      }
    };

    let mut contracts = Vec::with_capacity(mapping.len());
    for (key, value) in mapping {
      let name = key
        .as_str()
        .ok_or_else(|| ProjectError::InvalidContractName { path: path.to_path_buf() })?
        .to_string();
      let entry: ContractEntry = serde_yaml::from_value(value).map_err(|source| ProjectError::InvalidContract {
        name: name.clone(),
        path: path.to_path_buf(),
        source,
      })?;

      let sources = entry.func.iter().map(|file| root.join(file)).collect();
      contracts.push(Contract {
        target: contract_target(root, &name, sources),
        data: entry.data.map(|data| root.join(data)),
        name,
      });
    }

    Ok(Self { contracts })
  }
}
