//! Build progress notifications.
//!
//! The library never prints; front ends implement [`Reporter`].

use std::path::Path;

pub trait Reporter {
  /// A previous run's log was found and `-c` was not given.
  fn incremental_mode(&self) {}

  /// A target is about to be built. `depth` indents nested builds.
  fn building(&self, depth: &str, target: &Path);

  /// A `.do` script exited with a non-zero status.
  fn failed(&self, depth: &str, target: &Path, code: i32);

  /// No `.do` file exists for `target`; `dir` is where the search began.
  fn missing_dofile(&self, target: &Path, dir: &Path);

  /// Clean mode is removing the stamps written by this run.
  fn removing_stamps(&self) {}
}

