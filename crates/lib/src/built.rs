//! The `.do_built` log of targets built in this tree.

use std::collections::HashSet;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::{RedoError, Result};
use crate::paths::touch;

#[derive(Debug, Clone)]
pub struct BuiltLog {
  path: PathBuf,
}

impl BuiltLog {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }

  pub fn exists(&self) -> bool {
    self.path.exists()
  }

  pub fn touch(&self) -> Result<()> {
    touch(&self.path)
  }

  /// Recorded targets in first-built order, without duplicates.
  pub fn read(&self) -> Result<Vec<PathBuf>> {
    let contents = match fs::read_to_string(&self.path) {
      Ok(contents) => contents,
      Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
      Err(e) => return Err(RedoError::io(&self.path, e)),
    };

    let mut seen = HashSet::new();
    Ok(
      contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| seen.insert(*line))
        .map(PathBuf::from)
        .collect(),
    )
  }

  pub fn append(&self, target: &Path) -> Result<()> {
    let mut file = OpenOptions::new()
      .create(true)
      .append(true)
      .open(&self.path)
      .map_err(|e| RedoError::io(&self.path, e))?;
    writeln!(file, "{}", target.display()).map_err(|e| RedoError::io(&self.path, e))
  }

  pub fn truncate(&self) -> Result<()> {
    fs::File::create(&self.path)
      .map(drop)
      .map_err(|e| RedoError::io(&self.path, e))
  }
}
