//! Implementation of `redo-cc`: compile `<base>.c` into the temporary
//! output and exit with the compiler's status.

use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;

use minido_lib::RedoError;
use minido_lib::compile::CompileStep;
use minido_lib::consts::EXIT_NOT_FOUND;

use crate::output::{exit_status, print_error};

pub fn cmd_cc(target: &Path, base: &Path, tmp_output: &Path) -> Result<ExitCode> {
  let step = CompileStep::from_env(target, base, tmp_output);
  match step.run() {
    Ok(code) => Ok(exit_status(code)),
    Err(err @ RedoError::Spawn { .. }) => {
      print_error(&format!("error: {:#}", anyhow::Error::new(err)));
      Ok(exit_status(EXIT_NOT_FOUND))
    }
    Err(err) => Err(err.into()),
  }
}
