//! Preparing and tearing down the build environment of a top-level run.
//!
//! The top-level `do` cleans up after interrupted builds, installs the
//! `redo-*` helper commands in `.do_built.dir`, and exports the variables
//! that let nested invocations find its log.

use std::env;
use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::built::BuiltLog;
use crate::consts::{ENV_BUILT, ENV_PATH, ENV_STARTDIR, LINKED_COMMANDS, STUB_COMMANDS, STUB_SCRIPT};
use crate::error::{RedoError, Result};
use crate::paths::{did_path, did_tmp_path, remove_if_exists, tmp_path};
use crate::report::Reporter;
use crate::state::BuildState;

/// Prepares a top-level run. Nested invocations return immediately.
pub fn prepare(state: &mut BuildState, reporter: &dyn Reporter) -> Result<()> {
  if !state.top_level {
    return Ok(());
  }

  let log = BuiltLog::new(&state.built_file);
  let had_log = log.exists();
  log.touch()?;

  remove_leftovers(&log, state.options.clean)?;
  if state.options.clean {
    log.truncate()?;
  }

  install_commands(state)?;
  export_env(state)?;

  if !state.options.clean && had_log {
    reporter.incremental_mode();
  }
  Ok(())
}

/// Ends a top-level run; in clean mode drops the stamps it wrote.
pub fn finish(state: &BuildState, reporter: &dyn Reporter) -> Result<()> {
  if !state.top_level || !state.options.clean {
    return Ok(());
  }

  let log = BuiltLog::new(&state.built_file);
  if !log.exists() {
    return Ok(());
  }

  reporter.removing_stamps();
  for target in log.read()? {
    remove_if_exists(&did_path(&target))?;
  }
  Ok(())
}

/// Removes scratch files of recorded targets, and in clean mode the
/// targets and their stamps too.
fn remove_leftovers(log: &BuiltLog, clean: bool) -> Result<()> {
  for target in log.read()? {
    if clean {
      if target.is_dir() {
        warn!(target = %target.display(), "not removing directory target");
      } else {
        remove_if_exists(&target)?;
      }
      remove_if_exists(&did_path(&target))?;
    }
    remove_if_exists(&did_tmp_path(&target))?;
    remove_if_exists(&tmp_path(&target))?;
  }
  Ok(())
}

/// Links the `redo-*` commands to the running binary and writes no-op stubs
/// for the ones this build driver does not implement.
fn install_commands(state: &BuildState) -> Result<()> {
  let dir = &state.path_dir;
  fs::create_dir_all(dir).map_err(|e| RedoError::io(dir, e))?;

  for name in LINKED_COMMANDS {
    link_executable(&state.exe, &dir.join(name))?;
  }

  for name in STUB_COMMANDS {
    let stub = dir.join(name);
    fs::write(&stub, STUB_SCRIPT).map_err(|e| RedoError::io(&stub, e))?;
    make_executable(&stub)?;
  }

  debug!(dir = %dir.display(), "installed helper commands");
  Ok(())
}

fn export_env(state: &mut BuildState) -> Result<()> {
  let mut paths = vec![state.path_dir.clone()];
  if let Some(existing) = env::var_os("PATH") {
    paths.extend(env::split_paths(&existing));
  }
  let path = env::join_paths(paths).map_err(|e| RedoError::InvalidPath(e.to_string()))?;

  let built = state.built_file.clone();
  let start = state.start_dir.clone();
  let path_dir = state.path_dir.clone();
  state.set_child_env("PATH", path);
  state.set_child_env(ENV_BUILT, built);
  state.set_child_env(ENV_STARTDIR, start);
  state.set_child_env(ENV_PATH, path_dir);
  Ok(())
}

#[cfg(unix)]
fn link_executable(exe: &Path, link: &Path) -> Result<()> {
  remove_if_exists(link)?;
  std::os::unix::fs::symlink(exe, link).map_err(|e| RedoError::io(link, e))
}

#[cfg(not(unix))]
fn link_executable(exe: &Path, link: &Path) -> Result<()> {
  let link = link.with_extension("exe");
  remove_if_exists(&link)?;
  fs::copy(exe, &link).map(drop).map_err(|e| RedoError::io(link, e))
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<()> {
  use std::os::unix::fs::PermissionsExt;
  fs::set_permissions(path, fs::Permissions::from_mode(0o755)).map_err(|e| RedoError::io(path, e))
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<()> {
  Ok(())
}
