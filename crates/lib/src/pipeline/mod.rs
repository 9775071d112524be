//! Pipeline coordination.
//!
//! A [`Pipeline`] is created once per invocation: it detects whether the
//! working directory is a project root and then executes exactly one
//! [`Action`], sequencing the compile, interpret and submit stages.

mod types;

use std::path::{Path, PathBuf};

use tracing::info;

use crate::artifacts::{self, BuildTarget, absolute};
use crate::config::Config;
use crate::consts::{BOC_DIR, BUILD_DIR};
use crate::process::{CapturedRun, SessionEnd};
use crate::project::{ProjectConfig, ProjectContext};
use crate::stage::interpret::{self, ScriptRun};
use crate::stage::submit::{self, SubmitOutcome, SubmitRequest};
use crate::stage::{RunOptions, compile};

pub use types::{Action, Outcome, PipelineError};

pub struct Pipeline<'a> {
  config: &'a Config,
  context: ProjectContext,
  options: RunOptions,
}

impl<'a> Pipeline<'a> {
  /// Detect the project context of `cwd`.
  pub fn new(config: &'a Config, cwd: &Path, options: RunOptions) -> Self {
    Self::with_context(config, ProjectContext::detect(cwd), options)
  }

  pub fn with_context(config: &'a Config, context: ProjectContext, options: RunOptions) -> Self {
    Self {
      config,
      context,
      options,
    }
  }

  pub fn context(&self) -> &ProjectContext {
    &self.context
  }

  pub fn options(&self) -> &RunOptions {
    &self.options
  }

  pub async fn execute(&self, action: Action) -> Result<Outcome, PipelineError> {
    info!(action = action.name(), root = %self.context.root().display(), "executing");

    match action {
      Action::Interactive => Ok(Outcome::Session(self.interactive().await?)),
      Action::Build { files } => Ok(Outcome::Built(self.build(&files).await?)),
      Action::BuildAndRun { files } => {
        let built = self.build(&files).await?;
        info!("will run your code");
        for target in &built {
          self.run_script(&target.script, &[]).await?;
        }
        Ok(Outcome::Ran { built })
      }
      Action::Run { script, args } => {
        let script = script.ok_or(PipelineError::MissingTarget("file path to run"))?;
        self.prebuild().await?;
        self.run_script(&script, &args).await?;
        Ok(Outcome::Finished)
      }
      Action::Submit { target, args, quiet } => {
        let target = target.ok_or(PipelineError::MissingTarget("FIFT file path to sendboc"))?;
        Ok(Outcome::Submitted(self.submit(&target, &args, quiet).await?))
      }
    }
  }

  pub async fn interactive(&self) -> Result<SessionEnd, PipelineError> {
    info!("run interactive fift (Ctrl+C to exit), type `bye` to quit or `words` to list all commands");
    Ok(interpret::interactive(self.config, &self.options).await?)
  }

  /// Compile `files` into one script, or the whole project when `files` is empty.
  pub async fn build(&self, files: &[PathBuf]) -> Result<Vec<BuildTarget>, PipelineError> {
    let Some(last) = files.last() else {
      return self.build_project().await;
    };

    // Only the script is written here; the BOC location is resolved at submit time.
    let mut target = if self.context.is_project() {
      artifacts::contract_target(self.context.root(), &artifacts::basename(last), Vec::new())
    } else {
      artifacts::resolve(&self.context, last)?
    };
    target.source_files = files
      .iter()
      .map(|file| absolute(self.context.root(), file))
      .collect();

    compile::compile(
      self.config,
      &target.source_files,
      &target.script,
      &self.options.compiler_args,
      self.context.root(),
    )
    .await?;

    info!(output = %target.script.display(), "build successful");
    Ok(vec![target])
  }

  /// Compile every contract of `project.yaml` in declaration order.
  pub async fn build_project(&self) -> Result<Vec<BuildTarget>, PipelineError> {
    if !self.context.is_project() {
      return Err(PipelineError::NotAProject {
        root: self.context.root().to_path_buf(),
      });
    }

    let project = ProjectConfig::load(self.context.root())?;
    if let Some(empty) = project.contracts.iter().find(|c| c.target.source_files.is_empty()) {
      return Err(PipelineError::EmptyContract(empty.name.clone()));
    }

    tokio::fs::create_dir_all(self.context.root().join(BUILD_DIR).join(BOC_DIR)).await?;

    let mut built = Vec::with_capacity(project.contracts.len());
    for contract in project.contracts {
      compile::compile(
        self.config,
        &contract.target.source_files,
        &contract.target.script,
        &self.options.compiler_args,
        self.context.root(),
      )
      .await?;
      info!(contract = %contract.name, output = %contract.target.script.display(), "contract built");
      built.push(contract.target);
    }

    info!(contracts = built.len(), "project build successful");
    Ok(built)
  }

  /// Build the project first when `build_before_run` is set in project mode.
  async fn prebuild(&self) -> Result<(), PipelineError> {
    if self.options.build_before_run && self.context.is_project() {
      self.build_project().await?;
    }
    Ok(())
  }

  fn script_run<'s>(&'s self, script: &'s Path, args: &'s [String]) -> ScriptRun<'s> {
    ScriptRun {
      script,
      args,
      glue: None,
      cwd: self.context.root(),
    }
  }

  /// Run a script and wait for it.
  pub async fn run_script(&self, script: &Path, args: &[String]) -> Result<(), PipelineError> {
    let script = absolute(self.context.root(), script);
    interpret::run_script(self.config, &self.script_run(&script, args), &self.options).await?;
    Ok(())
  }

  /// Run a script with its output exposed as a line stream.
  pub async fn run_captured(&self, script: &Path, args: &[String]) -> Result<CapturedRun, PipelineError> {
    self.prebuild().await?;
    let script = absolute(self.context.root(), script);
    Ok(interpret::capture(self.config, &self.script_run(&script, args), &self.options).await?)
  }

  /// Produce the BOC of `target` and send it.
  pub async fn submit(&self, target: &Path, args: &[String], quiet: bool) -> Result<SubmitOutcome, PipelineError> {
    let script = absolute(self.context.root(), target);
    let resolved = artifacts::resolve(&self.context, &script)?;
    let request = SubmitRequest {
      script: &script,
      script_args: args,
      boc: &resolved.boc,
      quiet,
    };
    Ok(submit::submit(self.config, &self.context, &request, &self.options).await?)
  }
}
