//! Submit stage: produce a BOC with `fift` and send it with `lite-client`.
//!
//! The network call is retried up to `lite-client-tries` times without delay.
//! Output containing "Connection refused" and any failed call each consume an
//! attempt. Running out of attempts is logged once and reported as
//! [`SubmitOutcome::Unresolved`], not as an error.

use std::path::{Path, PathBuf};

use tracing::{error, info, warn};

use super::glue::GlueScript;
use super::interpret::{self, ScriptRun};
use super::{RunOptions, StageError};
use crate::config::Config;
use crate::consts::SAVEBOC_DIRECTIVE;
use crate::network::{Network, ensure_network_config};
use crate::process::{self, ToolInvocation, ToolOutput};
use crate::project::ProjectContext;
use crate::retry::{RetryOutcome, RetryPolicy, retry};

/// Marker in `lite-client` output for a node that refused the connection.
pub const CONNECTION_REFUSED: &str = "Connection refused";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
  /// The BOC was handed to the network; `output` is absent in quiet mode.
  Sent { output: Option<String>, attempts: u32 },
  /// Every attempt failed.
  Unresolved { attempts: u32 },
}

impl SubmitOutcome {
  pub fn is_sent(&self) -> bool {
    matches!(self, SubmitOutcome::Sent { .. })
  }
}

/// A Fift script that writes a BOC, and where that BOC goes.
#[derive(Debug, Clone, Copy)]
pub struct SubmitRequest<'a> {
  pub script: &'a Path,
  pub script_args: &'a [String],
  pub boc: &'a Path,
  pub quiet: bool,
}

/// Whether a script can produce a BOC at all.
pub fn has_saveboc(code: &str) -> bool {
  code.contains(SAVEBOC_DIRECTIVE)
}

/// `lite-client -C <config> -v 2 -c "sendfile <boc>"`.
pub fn send_invocation(config: &Config, network_config: &Path, boc: &Path, cwd: &Path) -> ToolInvocation {
  ToolInvocation::new(&config.executables.lite_client)
    .arg("-C")
    .arg(network_config)
    .args(["-v", "2", "-c"])
    .arg(format!("sendfile {}", boc.display()))
    .current_dir(cwd)
}

/// Run the script with a fresh glue library so it writes `request.boc`.
///
/// Fails before spawning anything when the script has no `saveboc`.
pub async fn produce_boc(
  config: &Config,
  context: &ProjectContext,
  request: &SubmitRequest<'_>,
  options: &RunOptions,
) -> Result<PathBuf, StageError> {
  let code = tokio::fs::read_to_string(request.script)
    .await
    .map_err(|source| StageError::ReadScript {
      path: request.script.to_path_buf(),
      source,
    })?;
  if !has_saveboc(&code) {
    return Err(StageError::MissingSaveBoc {
      path: request.script.to_path_buf(),
    });
  }

  info!(path = %request.boc.display(), "will save BOC");
  if let Some(parent) = request.boc.parent() {
    tokio::fs::create_dir_all(parent).await?;
  }

  let glue = GlueScript::for_context(context, request.boc).write(context).await?;

  let run = ScriptRun {
    script: request.script,
    args: request.script_args,
    glue: Some(&glue),
    cwd: context.root(),
  };
  interpret::run_script(config, &run, options).await?;

  if !request.boc.exists() {
    warn!(path = %request.boc.display(), "script finished without writing the BOC");
  }
  Ok(request.boc.to_path_buf())
}

/// Send an existing BOC to `network`, retrying refused connections.
pub async fn send_boc(
  config: &Config,
  boc: &Path,
  network: Network,
  refresh_network_config: bool,
  quiet: bool,
  cwd: &Path,
) -> Result<SubmitOutcome, StageError> {
  let network_config = ensure_network_config(config, network, refresh_network_config).await?;
  let invocation = send_invocation(config, &network_config, boc, cwd);
  let policy = RetryPolicy::new(config.lite_client_tries);

  let attempt = &invocation;
  let outcome = retry(
    policy,
    |_| async move { process::output(attempt).await?.check(&attempt.program) },
    |output: &ToolOutput| output.combined().contains(CONNECTION_REFUSED),
  )
  .await;

  match outcome {
    RetryOutcome::Succeeded { value, attempts } => {
      info!(%network, attempts, "BOC sent");
      Ok(SubmitOutcome::Sent {
        output: (!quiet).then_some(value.stdout),
        attempts,
      })
    }
    RetryOutcome::Exhausted { attempts, .. } => {
      error!(command = %invocation, attempts, "error in lite-client execution");
      Ok(SubmitOutcome::Unresolved { attempts })
    }
  }
}

/// Produce the BOC for `request` and send it.
pub async fn submit(
  config: &Config,
  context: &ProjectContext,
  request: &SubmitRequest<'_>,
  options: &RunOptions,
) -> Result<SubmitOutcome, StageError> {
  let boc = produce_boc(config, context, request, options).await?;
  send_boc(
    config,
    &boc,
    options.network,
    options.refresh_network_config,
    request.quiet,
    context.root(),
  )
  .await
}
