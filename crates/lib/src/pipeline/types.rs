use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

use crate::artifacts::BuildTarget;
use crate::process::SessionEnd;
use crate::project::ProjectError;
use crate::stage::StageError;
use crate::stage::submit::SubmitOutcome;

#[derive(Debug, Error)]
pub enum PipelineError {
  #[error("{} is not a project root (expected project.yaml, func/ and fift/), can't build a project without a project", root.display())]
  NotAProject { root: PathBuf },

  #[error("contract '{0}' has no source files")]
  EmptyContract(String),

  #[error("you need to specify {0}")]
  MissingTarget(&'static str),

  #[error("unknown action '{0}', expected one of: interactive, build, build-and-run, run, sendboc")]
  UnknownAction(String),

  #[error(transparent)]
  Stage(#[from] StageError),

  #[error(transparent)]
  Project(#[from] ProjectError),

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
}

/// The single top-level action of an invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
  /// Interactive interpreter session.
  Interactive,
  /// Compile the given files, or the whole project when `files` is empty.
  Build { files: Vec<PathBuf> },
  /// [`Action::Build`], then run every produced script.
  BuildAndRun { files: Vec<PathBuf> },
  /// Run a Fift script.
  Run { script: Option<PathBuf>, args: Vec<String> },
  /// Produce a BOC from a Fift script and send it to the network.
  Submit {
    target: Option<PathBuf>,
    args: Vec<String>,
    quiet: bool,
  },
}

impl Action {
  pub fn name(&self) -> &'static str {
    match self {
      Action::Interactive => "interactive",
      Action::Build { .. } => "build",
      Action::BuildAndRun { .. } => "build-and-run",
      Action::Run { .. } => "run",
      Action::Submit { .. } => "sendboc",
    }
  }
}

/// Parses an action name into the action with no files, script or arguments.
impl FromStr for Action {
  type Err = PipelineError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "interactive" => Ok(Action::Interactive),
      "build" => Ok(Action::Build { files: Vec::new() }),
      "build-and-run" => Ok(Action::BuildAndRun { files: Vec::new() }),
      "run" => Ok(Action::Run {
        script: None,
        args: Vec::new(),
      }),
      "sendboc" => Ok(Action::Submit {
        target: None,
        args: Vec::new(),
        quiet: false,
      }),
      other => Err(PipelineError::UnknownAction(other.to_string())),
    }
  }
}

/// What an action did.
#[derive(Debug)]
pub enum Outcome {
  Session(SessionEnd),
  Built(Vec<BuildTarget>),
  Ran { built: Vec<BuildTarget> },
  Finished,
  Submitted(SubmitOutcome),
}
