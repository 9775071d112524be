use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Serialize;

use toncli_lib::config::{Config, Executables};
use toncli_lib::platform::host_triple;
use toncli_lib::project::ProjectContext;

use crate::output::{OutputFormat, print_json, print_stat};

#[derive(Serialize)]
struct Info<'a> {
  version: &'static str,
  platform: String,
  config_file: PathBuf,
  fift_libs: PathBuf,
  executables: &'a Executables,
  lite_client_tries: u32,
  project_root: &'a Path,
  is_project: bool,
}

pub fn cmd_info(config: &Config, cwd: &Path, format: OutputFormat) -> Result<()> {
  let context = ProjectContext::detect(cwd);
  let info = Info {
    version: env!("CARGO_PKG_VERSION"),
    platform: host_triple(),
    config_file: config.config_file(),
    fift_libs: config.fift_libs_dir(),
    executables: &config.executables,
    lite_client_tries: config.lite_client_tries,
    project_root: context.root(),
    is_project: context.is_project(),
  };

  if format.is_json() {
    return print_json(&info);
  }

  println!("toncli {}", info.version);
  print_stat("Platform", &info.platform);
  print_stat("Config", &info.config_file.display().to_string());
  print_stat("Fift libs", &info.fift_libs.display().to_string());
  print_stat("func", &config.executables.func.display().to_string());
  print_stat("fift", &config.executables.fift.display().to_string());
  print_stat("lite-client", &config.executables.lite_client.display().to_string());
  print_stat("lite-client tries", &info.lite_client_tries.to_string());
  println!();
  if info.is_project {
    println!("Project: {}", info.project_root.display());
  } else {
    println!("Not a project: {}", info.project_root.display());
  }

  Ok(())
}
