//! Per-process build state.
//!
//! A top-level `do` owns the `.do_built` log and helper directory in its
//! start directory. Nested invocations (a `.do` script running
//! `redo-ifchange`) find them through `DO_BUILT` and `DO_PATH` instead.

use std::env;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use crate::consts::{BUILT_FILE, ENV_BUILT, ENV_DEPTH, ENV_PATH, PATH_DIR};
use crate::error::{RedoError, Result};

/// Which personality of the multi-call binary is running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
  Do,
  Redo,
  RedoIfchange,
  RedoWhichdo,
  RedoCc,
  Unknown(String),
}

impl Invocation {
  /// Selects the personality from `argv[0]`.
  pub fn from_program(arg0: &OsStr) -> Self {
    let name = Path::new(arg0)
      .file_name()
      .map(|n| n.to_string_lossy().into_owned())
      .unwrap_or_default();
    let name = name.strip_suffix(".exe").unwrap_or(&name);

    match name {
      "do" => Invocation::Do,
      "redo" => Invocation::Redo,
      "redo-ifchange" => Invocation::RedoIfchange,
      "redo-whichdo" => Invocation::RedoWhichdo,
      "redo-cc" => Invocation::RedoCc,
      other => Invocation::Unknown(other.to_string()),
    }
  }

  pub fn name(&self) -> &str {
    match self {
      Invocation::Do => "do",
      Invocation::Redo => "redo",
      Invocation::RedoIfchange => "redo-ifchange",
      Invocation::RedoWhichdo => "redo-whichdo",
      Invocation::RedoCc => "redo-cc",
      Invocation::Unknown(name) => name,
    }
  }

  /// `do` and `redo` build `all` when given no targets.
  pub fn defaults_to_all(&self) -> bool {
    matches!(self, Invocation::Do | Invocation::Redo)
  }

  /// `redo` rebuilds targets even when their stamp says they are done.
  pub fn forces_rebuild(&self) -> bool {
    matches!(self, Invocation::Redo)
  }
}

/// Flags accepted by the building personalities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildOptions {
  /// Print extra debug messages.
  pub debug: bool,
  /// Run `.do` files with `sh -v`.
  pub verbose: bool,
  /// Run `.do` files with `sh -x`.
  pub exec_trace: bool,
  /// Remove previously built targets before starting.
  pub clean: bool,
}

#[derive(Debug, Clone)]
pub struct BuildState {
  pub options: BuildOptions,
  /// Canonical directory the invocation started in.
  pub start_dir: PathBuf,
  pub built_file: PathBuf,
  pub path_dir: PathBuf,
  /// Indentation for build messages.
  pub depth: String,
  pub force: bool,
  /// The running binary; helper commands link to it.
  pub exe: PathBuf,
  /// True when no enclosing `do` is running.
  pub top_level: bool,
  child_env: Vec<(OsString, OsString)>,
}

impl BuildState {
  /// State for a top-level build rooted at `start_dir`.
  pub fn new(options: BuildOptions, start_dir: PathBuf, exe: PathBuf) -> Self {
    Self {
      options,
      built_file: start_dir.join(BUILT_FILE),
      path_dir: start_dir.join(PATH_DIR),
      start_dir,
      depth: String::new(),
      force: false,
      exe,
      top_level: true,
      child_env: Vec::new(),
    }
  }

  /// Builds state from the current directory and the `DO_*` environment.
  pub fn from_env(options: BuildOptions) -> Result<Self> {
    let cwd = env::current_dir().map_err(RedoError::CurrentDir)?;
    let start_dir = dunce::canonicalize(&cwd).unwrap_or(cwd);
    let exe = env::current_exe().map_err(|e| RedoError::io("current executable", e))?;

    let mut state = Self::new(options, start_dir, exe);
    if let Some(built) = env::var_os(ENV_BUILT) {
      state.built_file = PathBuf::from(built);
      state.top_level = false;
    }
    if let Some(path_dir) = env::var_os(ENV_PATH) {
      state.path_dir = PathBuf::from(path_dir);
    }
    if let Ok(depth) = env::var(ENV_DEPTH) {
      state.depth = depth;
    }
    Ok(state)
  }

  pub fn with_force(mut self, force: bool) -> Self {
    self.force = force;
    self
  }

  /// Adds a variable to the environment of every `.do` process.
  pub fn set_child_env(&mut self, key: impl Into<OsString>, value: impl Into<OsString>) {
    let key = key.into();
    let value = value.into();
    match self.child_env.iter_mut().find(|(k, _)| *k == key) {
      Some(entry) => entry.1 = value,
      None => self.child_env.push((key, value)),
    }
  }

  pub fn child_env(&self) -> &[(OsString, OsString)] {
    &self.child_env
  }

  /// `path` relative to the start directory, for messages.
  pub fn display_path(&self, path: &Path) -> PathBuf {
    path
      .strip_prefix(&self.start_dir)
      .map(Path::to_path_buf)
      .unwrap_or_else(|_| path.to_path_buf())
  }
}
