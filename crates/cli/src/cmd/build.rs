//! Implementation of `do`, `redo` and `redo-ifchange`.
//!
//! The top-level invocation prepares `.do_built` and the helper commands;
//! nested ones (started by `.do` scripts) reuse the parent's.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing::debug;

use minido_lib::consts::DEFAULT_TARGET;
use minido_lib::redo::redo;
use minido_lib::setup;
use minido_lib::state::{BuildOptions, BuildState, Invocation};

use crate::output::CliReporter;

pub fn cmd_build(invocation: &Invocation, options: BuildOptions, targets: Vec<PathBuf>) -> Result<ExitCode> {
  let targets = if targets.is_empty() && invocation.defaults_to_all() {
    vec![PathBuf::from(DEFAULT_TARGET)]
  } else {
    targets
  };

  let reporter = CliReporter;
  let mut state = BuildState::from_env(options)
    .context("Failed to initialize build state")?
    .with_force(invocation.forces_rebuild());

  setup::prepare(&mut state, &reporter).context("Failed to prepare build environment")?;
  let result = redo(&state, &reporter, &targets);
  setup::finish(&state, &reporter).context("Failed to remove stamp files")?;
  let ok = result?;

  debug!(command = invocation.name(), targets = targets.len(), ok, "finished");
  Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
