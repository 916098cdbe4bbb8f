//! Error types for minido-lib.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that stop a build outright.
///
/// A `.do` script exiting non-zero is not an error: it is reported through
/// [`crate::report::Reporter`] and surfaces as a failed build.
#[derive(Debug, Error)]
pub enum RedoError {
  #[error("failed to determine current directory")]
  CurrentDir(#[source] std::io::Error),

  #[error("{}", path.display())]
  Io { path: PathBuf, source: std::io::Error },

  #[error("invalid target: {0}")]
  InvalidTarget(String),

  #[error("invalid path: {0}")]
  InvalidPath(String),

  #[error("failed to run {program}")]
  Spawn { program: String, source: std::io::Error },
}

impl RedoError {
  pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
    RedoError::Io {
      path: path.into(),
      source,
    }
  }
}

pub type Result<T> = std::result::Result<T, RedoError>;
