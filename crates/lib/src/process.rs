//! External tool invocation.
//!
//! `func`, `fift` and `lite-client` are opaque processes: an argument vector
//! and a working directory go in, an exit status and optionally text come out.
//! Only one tool runs at a time; every helper here waits for the process
//! except [`spawn_captured`], which hands back a line stream.

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};

use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::{Child, Command};
use tokio::sync::mpsc;
use tracing::{debug, error, info};

#[derive(Debug, Error)]
pub enum ToolError {
  #[error("failed to start {}: {source}", program.display())]
  Spawn { program: PathBuf, source: std::io::Error },

  /// The tool ran and exited non-zero; `output` is its own diagnostic text.
  #[error("{} exited with code {code:?}{}", program.display(), format_output(output))]
  Failed {
    program: PathBuf,
    code: Option<i32>,
    output: String,
  },

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
}

fn format_output(output: &str) -> String {
  let output = output.trim_end();
  if output.is_empty() {
    String::new()
  } else {
    format!(":\n{}", output)
  }
}

/// A fully described tool call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
  pub program: PathBuf,
  pub args: Vec<OsString>,
  pub cwd: Option<PathBuf>,
}

impl ToolInvocation {
  pub fn new(program: impl Into<PathBuf>) -> Self {
    Self {
      program: program.into(),
      args: Vec::new(),
      cwd: None,
    }
  }

  pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
    self.args.push(arg.as_ref().to_os_string());
    self
  }

  pub fn args<I, S>(mut self, args: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
  {
    self.args.extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
    self
  }

  pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
    self.cwd = Some(dir.into());
    self
  }

  /// Arguments as strings, for logs and assertions.
  pub fn args_lossy(&self) -> Vec<String> {
    self.args.iter().map(|a| a.to_string_lossy().into_owned()).collect()
  }

  fn command(&self) -> Command {
    let mut command = Command::new(&self.program);
    command.args(&self.args);
    if let Some(cwd) = &self.cwd {
      command.current_dir(cwd);
    }
    command
  }

  fn spawn_error(&self, source: std::io::Error) -> ToolError {
    ToolError::Spawn {
      program: self.program.clone(),
      source,
    }
  }
}

impl fmt::Display for ToolInvocation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.program.display())?;
    for arg in &self.args {
      write!(f, " {}", arg.to_string_lossy())?;
    }
    Ok(())
  }
}

/// Captured result of a finished tool.
#[derive(Debug, Clone)]
pub struct ToolOutput {
  pub status: ExitStatus,
  pub stdout: String,
  pub stderr: String,
}

impl ToolOutput {
  pub fn success(&self) -> bool {
    self.status.success()
  }

  /// stdout followed by stderr.
  pub fn combined(&self) -> String {
    let mut combined = self.stdout.clone();
    combined.push_str(&self.stderr);
    combined
  }

  /// Turn a non-zero exit into [`ToolError::Failed`].
  pub fn check(self, program: &Path) -> Result<Self, ToolError> {
    if self.success() {
      Ok(self)
    } else {
      Err(ToolError::Failed {
        program: program.to_path_buf(),
        code: self.status.code(),
        output: self.combined(),
      })
    }
  }
}

/// Run with inherited stdio and wait for exit.
pub async fn run(invocation: &ToolInvocation) -> Result<ExitStatus, ToolError> {
  info!(command = %invocation, "running");
  let status = invocation
    .command()
    .status()
    .await
    .map_err(|e| invocation.spawn_error(e))?;
  debug!(code = ?status.code(), "process exited");
  Ok(status)
}

/// Run with inherited stdio; a non-zero exit becomes [`ToolError::Failed`].
pub async fn run_checked(invocation: &ToolInvocation) -> Result<(), ToolError> {
  let status = run(invocation).await?;
  if status.success() {
    Ok(())
  } else {
    Err(ToolError::Failed {
      program: invocation.program.clone(),
      code: status.code(),
      output: String::new(),
    })
  }
}

/// Run with captured stdout and stderr and wait for exit.
pub async fn output(invocation: &ToolInvocation) -> Result<ToolOutput, ToolError> {
  info!(command = %invocation, "running");
  let output = invocation
    .command()
    .stdin(Stdio::null())
    .output()
    .await
    .map_err(|e| invocation.spawn_error(e))?;

  let result = ToolOutput {
    status: output.status,
    stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
    stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
  };

  if !result.stderr.is_empty() {
    debug!(stderr = %result.stderr, "process stderr");
  }
  debug!(code = ?result.status.code(), "process exited");

  Ok(result)
}

/// A running tool whose stdout and stderr are merged into one line stream.
#[derive(Debug)]
pub struct CapturedRun {
  child: Child,
  lines: mpsc::UnboundedReceiver<String>,
}

impl CapturedRun {
  /// Next line of output, or `None` once both streams are closed.
  pub async fn next_line(&mut self) -> Option<String> {
    self.lines.recv().await
  }

  /// Wait for the process to exit. Unread output stays available via [`next_line`](Self::next_line).
  pub async fn wait(&mut self) -> Result<ExitStatus, ToolError> {
    Ok(self.child.wait().await?)
  }

  /// Drain the remaining output and wait for exit.
  pub async fn collect(mut self) -> Result<(Vec<String>, ExitStatus), ToolError> {
    let mut lines = Vec::new();
    while let Some(line) = self.lines.recv().await {
      lines.push(line);
    }
    let status = self.child.wait().await?;
    Ok((lines, status))
  }
}

/// Spawn with stdout and stderr merged into a line stream; does not wait for exit.
pub async fn spawn_captured(invocation: &ToolInvocation) -> Result<CapturedRun, ToolError> {
  info!(command = %invocation, "spawning with captured output");
  let mut child = invocation
    .command()
    .stdin(Stdio::null())
    .stdout(Stdio::piped())
    .stderr(Stdio::piped())
    .kill_on_drop(true)
    .spawn()
    .map_err(|e| invocation.spawn_error(e))?;

  let (tx, lines) = mpsc::unbounded_channel();
  if let Some(stdout) = child.stdout.take() {
    forward_lines(stdout, tx.clone());
  }
  if let Some(stderr) = child.stderr.take() {
    forward_lines(stderr, tx);
  }

  Ok(CapturedRun { child, lines })
}

fn forward_lines<R>(stream: R, tx: mpsc::UnboundedSender<String>)
where
  R: AsyncRead + Unpin + Send + 'static,
{
  tokio::spawn(async move {
    let mut reader = BufReader::new(stream);
    let mut buf = Vec::new();
    loop {
      buf.clear();
      match reader.read_until(b'\n', &mut buf).await {
        Ok(0) => break,
        Ok(_) => {
          if buf.ends_with(b"\n") {
            buf.pop();
            if buf.ends_with(b"\r") {
              buf.pop();
            }
          }
          // Invalid UTF-8 becomes U+FFFD, as in `output`.
          if tx.send(String::from_utf8_lossy(&buf).into_owned()).is_err() {
            break;
          }
        }
        Err(e) => {
          error!(error = %e, "failed to read process output");
          break;
        }
      }
    }
  });
}

/// How an interactive session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
  Exited(ExitStatus),
  Interrupted,
}

/// Run attached to the terminal until the tool exits or Ctrl-C is pressed.
pub async fn interactive(invocation: &ToolInvocation) -> Result<SessionEnd, ToolError> {
  info!(command = %invocation, "starting interactive session");
  let mut child = invocation
    .command()
    .spawn()
    .map_err(|e| invocation.spawn_error(e))?;

  tokio::select! {
    status = child.wait() => Ok(SessionEnd::Exited(status?)),
    _ = tokio::signal::ctrl_c() => {
      if let Err(e) = child.kill().await {
        debug!(error = %e, "interactive process already gone");
      }
      Ok(SessionEnd::Interrupted)
    }
  }
}
