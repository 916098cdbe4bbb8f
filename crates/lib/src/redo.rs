//! Building targets.
//!
//! Each target runs through its `.do` script at most once per tree: a
//! `<target>.did` stamp marks it as done until a clean run. There is no
//! dependency checking.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::built::BuiltLog;
use crate::dofile;
use crate::error::{RedoError, Result};
use crate::exec::{DoArgs, run_dofile};
use crate::paths::{did_path, did_tmp_path, remove_if_exists, resolve_target, tmp_path, touch};
use crate::report::Reporter;
use crate::state::BuildState;

/// Builds `targets` in order, stopping at the first failure.
///
/// Relative targets are resolved against the start directory.
pub fn redo(state: &BuildState, reporter: &dyn Reporter, targets: &[PathBuf]) -> Result<bool> {
  for target in targets {
    let target = resolve_target(&state.start_dir, target)?;
    if !build_target(state, reporter, &target)? {
      return Ok(false);
    }
  }
  Ok(true)
}

/// Whether `target` must run through its `.do` script.
pub fn needs_build(state: &BuildState, target: &Path) -> bool {
  state.force || ((!target.exists() || target.is_dir()) && !did_path(target).exists())
}

/// Builds one absolute `target`. `Ok(false)` means the build failed and
/// was reported.
pub fn build_target(state: &BuildState, reporter: &dyn Reporter, target: &Path) -> Result<bool> {
  let shown = state.display_path(target);
  if !needs_build(state, target) {
    debug!("{}{} exists.", state.depth, shown.display());
    return Ok(true);
  }

  reporter.building(&state.depth, &shown);

  let Some(dofile) = dofile::find(target) else {
    let dir = target.parent().unwrap_or(state.start_dir.as_path());
    reporter.missing_dofile(&shown, dir);
    return Ok(false);
  };

  let rel_target = dofile.relative_target(target);
  let base = dofile.base_for(&rel_target);
  let rel_tmp = tmp_path(&rel_target);

  let tmp = tmp_path(target);
  let did = did_path(target);
  let did_tmp = did_tmp_path(target);
  if let Err(e) = touch(&did_tmp) {
    debug!(error = %e, "could not create stamp");
  }

  let args = DoArgs {
    target: &rel_target,
    base: &base,
    tmp_output: &rel_tmp,
    abs_target: target,
  };
  let code = match run_dofile(state, &dofile, &args) {
    Ok(code) => code,
    Err(e) => {
      remove_if_exists(&did_tmp)?;
      return Err(e);
    }
  };

  if code != 0 {
    reporter.failed(&state.depth, &shown, code);
    remove_if_exists(&tmp)?;
    remove_if_exists(&did_tmp)?;
    remove_if_exists(&did)?;
    return Ok(false);
  }

  BuiltLog::new(&state.built_file).append(target)?;

  if tmp.exists() {
    fs::rename(&tmp, target).map_err(|e| RedoError::io(target, e))?;
    debug!(target = %shown.display(), "promoted output");
  }
  if did_tmp.exists() {
    fs::rename(&did_tmp, &did).map_err(|e| RedoError::io(&did, e))?;
  } else {
    touch(&did)?;
  }

  Ok(true)
}
