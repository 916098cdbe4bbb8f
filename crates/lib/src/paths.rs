//! Path and file helpers for targets and their companion files.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::consts::{DID_SUFFIX, DID_TMP_SUFFIX, TMP_SUFFIX};
use crate::error::{RedoError, Result};

/// Appends `suffix` to the final component: `hello.o` + `.did` is `hello.o.did`.
pub fn append_suffix(path: &Path, suffix: &str) -> PathBuf {
  let mut s = path.as_os_str().to_owned();
  s.push(suffix);
  PathBuf::from(s)
}

pub fn tmp_path(target: &Path) -> PathBuf {
  append_suffix(target, TMP_SUFFIX)
}

pub fn did_path(target: &Path) -> PathBuf {
  append_suffix(target, DID_SUFFIX)
}

pub fn did_tmp_path(target: &Path) -> PathBuf {
  append_suffix(target, DID_TMP_SUFFIX)
}

/// Makes `target` absolute against `base`, canonicalizing its directory
/// when that directory exists. The target itself need not exist.
pub fn resolve_target(base: &Path, target: &Path) -> Result<PathBuf> {
  let joined = base.join(target);
  let invalid = || RedoError::InvalidTarget(target.display().to_string());
  let name = joined.file_name().ok_or_else(invalid)?;
  let parent = joined.parent().ok_or_else(invalid)?;
  let parent = dunce::canonicalize(parent).unwrap_or_else(|_| parent.to_path_buf());
  Ok(parent.join(name))
}

/// `path` relative to `base` when it lies below it, otherwise unchanged.
pub fn relative_to(path: &Path, base: &Path) -> PathBuf {
  path
    .strip_prefix(base)
    .map(Path::to_path_buf)
    .unwrap_or_else(|_| path.to_path_buf())
}

/// Relative path from directory `base` to `path`, using `..` where needed.
/// Both paths must be absolute; paths on different roots come back unchanged.
pub fn relative_path(path: &Path, base: &Path) -> PathBuf {
  let path_parts: Vec<_> = path.components().collect();
  let base_parts: Vec<_> = base.components().collect();
  let common = path_parts
    .iter()
    .zip(&base_parts)
    .take_while(|(a, b)| a == b)
    .count();
  if common == 0 {
    return path.to_path_buf();
  }

  let mut rel = PathBuf::new();
  for _ in common..base_parts.len() {
    rel.push("..");
  }
  for part in &path_parts[common..] {
    rel.push(part.as_os_str());
  }
  if rel.as_os_str().is_empty() {
    rel.push(".");
  }
  rel
}

/// Creates `path` if missing without truncating it.
pub fn touch(path: &Path) -> Result<()> {
  OpenOptions::new()
    .create(true)
    .append(true)
    .open(path)
    .map(drop)
    .map_err(|e| RedoError::io(path, e))
}

/// Removes a file, treating a missing file as success.
pub fn remove_if_exists(path: &Path) -> Result<bool> {
  match fs::remove_file(path) {
    Ok(()) => {
      debug!(path = %path.display(), "removed");
      Ok(true)
    }
    Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
    Err(e) => Err(RedoError::io(path, e)),
  }
}
