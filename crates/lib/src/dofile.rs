//! Locating the `.do` script for a target.
//!
//! For `src/hello.o` the search tries `src/hello.o.do`, then
//! `default.o.do` and `default.do` in `src/`, then the same default names
//! in each parent directory up to the filesystem root.

use std::path::{Path, PathBuf};

use crate::consts::{DO_EXTENSION, MAX_SEARCH_DEPTH};
use crate::paths::{append_suffix, relative_to};

/// A `.do` script chosen for a target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoFile {
  pub path: PathBuf,
  /// Extension matched by a `default*.do` file, e.g. `.o`. Empty for an
  /// exact match or plain `default.do`.
  pub ext: String,
}

impl DoFile {
  pub fn dir(&self) -> &Path {
    self.path.parent().unwrap_or_else(|| Path::new("."))
  }

  pub fn file_name(&self) -> String {
    self
      .path
      .file_name()
      .map(|n| n.to_string_lossy().into_owned())
      .unwrap_or_default()
  }

  /// The target as seen from the script's directory (`$1`).
  pub fn relative_target(&self, target: &Path) -> PathBuf {
    relative_to(target, self.dir())
  }

  /// `$1` without the matched extension (`$2`).
  pub fn base_for(&self, relative_target: &Path) -> PathBuf {
    let rel = relative_target.to_string_lossy();
    match rel.strip_suffix(self.ext.as_str()) {
      Some(base) if !self.ext.is_empty() => PathBuf::from(base),
      _ => relative_target.to_path_buf(),
    }
  }
}

/// Outcome of a search: every path tried, in order, and the match if any.
#[derive(Debug, Clone, Default)]
pub struct Search {
  pub tried: Vec<PathBuf>,
  pub found: Option<DoFile>,
}

/// `default*.do` names for a file name, most specific first, paired with
/// the extension each one matches.
pub fn default_dofiles(name: &str) -> Vec<(String, String)> {
  let parts: Vec<&str> = name.split('.').collect();
  (1..=parts.len())
    .map(|i| {
      let ext = if i < parts.len() {
        format!(".{}", parts[i..].join("."))
      } else {
        String::new()
      };
      (format!("default{}{}", ext, DO_EXTENSION), ext)
    })
    .collect()
}

/// Searches for the `.do` file of an absolute `target` path.
pub fn search(target: &Path) -> Search {
  let mut search = Search::default();
  let Some(name) = target.file_name().map(|n| n.to_string_lossy().into_owned()) else {
    return search;
  };

  let exact = append_suffix(target, DO_EXTENSION);
  search.tried.push(exact.clone());
  if exact.is_file() {
    search.found = Some(DoFile {
      path: exact,
      ext: String::new(),
    });
    return search;
  }

  let defaults = default_dofiles(&name);
  for dir in target.parent().into_iter().flat_map(Path::ancestors).take(MAX_SEARCH_DEPTH) {
    for (file, ext) in &defaults {
      let candidate = dir.join(file);
      search.tried.push(candidate.clone());
      if candidate.is_file() {
        search.found = Some(DoFile {
          path: candidate,
          ext: ext.clone(),
        });
        return search;
      }
    }
  }

  search
}

pub fn find(target: &Path) -> Option<DoFile> {
  search(target).found
}
