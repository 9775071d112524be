mod cmd;
mod output;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use toncli_lib::config::Config;
use toncli_lib::network::Network;
use toncli_lib::stage::RunOptions;

use crate::output::OutputFormat;

/// toncli - build, run and deploy TON smart contracts
#[derive(Parser)]
#[command(name = "toncli")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Compile FunC files, or every contract of project.yaml when no files are given
  Build {
    /// Source files, compiled in the given order
    files: Vec<PathBuf>,

    /// Extra arguments for func, e.g. "-A -P"
    #[arg(long, allow_hyphen_values = true, default_value = "")]
    func_args: String,

    /// Arguments for fift when running the result
    #[arg(long, allow_hyphen_values = true, default_value = "")]
    fift_args: String,

    /// Run the produced script(s) after building
    #[arg(short, long)]
    run: bool,
  },

  /// Run a Fift script
  Run {
    /// Script to run
    file: Option<PathBuf>,

    /// Arguments passed to the script
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,

    /// Arguments for fift (default: -I <config dir>/fift-libs)
    #[arg(long, allow_hyphen_values = true, default_value = "")]
    fift_args: String,

    /// Build the project before running
    #[arg(short, long)]
    build: bool,
  },

  /// Start an interactive Fift session
  Shell {
    /// Arguments for fift (default: -I <config dir>/fift-libs)
    #[arg(long, allow_hyphen_values = true, default_value = "")]
    fift_args: String,
  },

  /// Produce a BOC with a Fift script and send it to the network
  Sendboc {
    /// Fift script containing saveboc
    file: Option<PathBuf>,

    /// Arguments passed to the script
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,

    /// Arguments for fift (default: -I <config dir>/fift-libs)
    #[arg(long, allow_hyphen_values = true, default_value = "")]
    fift_args: String,

    /// Network to send to (testnet or mainnet)
    #[arg(long, default_value = "testnet")]
    net: Network,

    /// Download a fresh network config
    #[arg(short, long)]
    update: bool,

    /// Don't print lite-client output
    #[arg(short, long)]
    quiet: bool,
  },

  /// List declared procedures of a compiled script, or resolve test names
  Procs {
    /// Compiled Fift script
    file: PathBuf,

    /// Test names, '*' matches any run of non-space characters
    tests: Vec<String>,

    #[arg(long, value_enum, default_value_t)]
    format: OutputFormat,
  },

  /// Show configuration and project context
  Info {
    #[arg(long, value_enum, default_value_t)]
    format: OutputFormat,
  },
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "debug" } else { "info" };
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  let env = || -> Result<(Config, PathBuf)> {
    let config = Config::load().context("Failed to load configuration")?;
    let cwd = std::env::current_dir().context("Failed to determine current directory")?;
    debug!(config_dir = %config.config_dir.display(), cwd = %cwd.display(), "configuration loaded");
    Ok((config, cwd))
  };

  match cli.command {
    Commands::Procs { file, tests, format } => cmd::cmd_procs(&file, &tests, format),
    Commands::Build {
      files,
      func_args,
      fift_args,
      run,
    } => {
      let options = RunOptions {
        compiler_args: RunOptions::split_args(&func_args).context("Invalid --func-args")?,
        interpreter_args: RunOptions::split_args(&fift_args).context("Invalid --fift-args")?,
        ..RunOptions::default()
      };
      let (config, cwd) = env()?;
      cmd::cmd_build(&config, &cwd, files, options, run)
    }
    Commands::Run {
      file,
      args,
      fift_args,
      build,
    } => {
      let options = RunOptions {
        interpreter_args: RunOptions::split_args(&fift_args).context("Invalid --fift-args")?,
        build_before_run: build,
        ..RunOptions::default()
      };
      let (config, cwd) = env()?;
      cmd::cmd_run(&config, &cwd, file, args, options)
    }
    Commands::Shell { fift_args } => {
      let options = RunOptions {
        interpreter_args: RunOptions::split_args(&fift_args).context("Invalid --fift-args")?,
        ..RunOptions::default()
      };
      let (config, cwd) = env()?;
      cmd::cmd_shell(&config, &cwd, options)
    }
    Commands::Sendboc {
      file,
      args,
      fift_args,
      net,
      update,
      quiet,
    } => {
      let options = RunOptions {
        interpreter_args: RunOptions::split_args(&fift_args).context("Invalid --fift-args")?,
        network: net,
        refresh_network_config: update,
        ..RunOptions::default()
      };
      let (config, cwd) = env()?;
      cmd::cmd_sendboc(&config, &cwd, file, args, options, quiet)
    }
    Commands::Info { format } => {
      let (config, cwd) = env()?;
      cmd::cmd_info(&config, &cwd, format)
    }
  }
}
