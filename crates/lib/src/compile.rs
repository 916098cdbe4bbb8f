//! The `redo-cc` build step: compile one C file into an executable.
//!
//! Given the redo arguments `(target, base, tmp_output)` this runs
//! `cc -o <tmp_output> <base>.c` and hands back the compiler's exit code
//! untouched. Promoting `tmp_output` to the target is left to the caller.

use std::env;
use std::path::PathBuf;
use std::process::Command;

use tracing::debug;

use crate::consts::{DEFAULT_COMPILER, ENV_CC};
use crate::error::{RedoError, Result};
use crate::exec::exit_code;
use crate::paths::append_suffix;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileStep {
  pub target: PathBuf,
  pub base: PathBuf,
  pub tmp_output: PathBuf,
  /// Compiler command line; split on whitespace into program and flags.
  pub compiler: String,
}

impl CompileStep {
  pub fn new(target: impl Into<PathBuf>, base: impl Into<PathBuf>, tmp_output: impl Into<PathBuf>) -> Self {
    Self {
      target: target.into(),
      base: base.into(),
      tmp_output: tmp_output.into(),
      compiler: DEFAULT_COMPILER.to_string(),
    }
  }

  /// Like [`CompileStep::new`], taking the compiler from `CC` when set.
  pub fn from_env(target: impl Into<PathBuf>, base: impl Into<PathBuf>, tmp_output: impl Into<PathBuf>) -> Self {
    let step = Self::new(target, base, tmp_output);
    match env::var(ENV_CC) {
      Ok(cc) if !cc.trim().is_empty() => step.with_compiler(cc),
      _ => step,
    }
  }

  pub fn with_compiler(mut self, compiler: impl Into<String>) -> Self {
    self.compiler = compiler.into();
    self
  }

  /// `<base>.c`
  pub fn source(&self) -> PathBuf {
    append_suffix(&self.base, ".c")
  }

  pub fn command(&self) -> Command {
    let mut words = self.compiler.split_whitespace();
    let program = words.next().unwrap_or(DEFAULT_COMPILER);
    let mut command = Command::new(program);
    command.args(words).arg("-o").arg(&self.tmp_output).arg(self.source());
    command
  }

  /// Runs the compiler and returns its exit code.
  pub fn run(&self) -> Result<i32> {
    let mut command = self.command();
    debug!(target = %self.target.display(), command = ?command, "compiling");

    let status = command.status().map_err(|source| RedoError::Spawn {
      program: command.get_program().to_string_lossy().into_owned(),
      source,
    })?;
    Ok(exit_code(status))
  }
}
