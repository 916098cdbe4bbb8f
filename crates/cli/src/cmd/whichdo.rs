//! Implementation of `redo-whichdo`: list the `.do` files tried for a
//! target, ending with the one that would be used.

use std::env;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};

use minido_lib::dofile;
use minido_lib::paths::{relative_path, resolve_target};

pub fn cmd_whichdo(target: Option<&Path>) -> Result<ExitCode> {
  let Some(target) = target else {
    return Ok(ExitCode::SUCCESS);
  };

  let cwd = env::current_dir().context("Failed to determine current directory")?;
  let cwd = dunce::canonicalize(&cwd).unwrap_or(cwd);
  let target = resolve_target(&cwd, target)?;

  let search = dofile::search(&target);
  for candidate in &search.tried {
    println!("{}", relative_path(candidate, &cwd).display());
  }

  Ok(if search.found.is_some() {
    ExitCode::SUCCESS
  } else {
    ExitCode::FAILURE
  })
}
