//! Shared test helpers for CLI integration tests.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

pub const HELLO_C: &str = "int main(void) { return 0; }\n";
pub const BROKEN_C: &str = "int main(void) { return 0 }\n";

/// Variables a surrounding build would leak into the binary under test.
const INHERITED_VARS: &[&str] = &["DO_BUILT", "DO_STARTDIR", "DO_PATH", "DO_DEPTH", "CC", "RUST_LOG"];

/// Isolated project directory.
pub struct TestEnv {
  pub temp: TempDir,
  pub root: PathBuf,
}

impl TestEnv {
  pub fn new() -> Self {
    let temp = TempDir::new().unwrap();
    let root = dunce::canonicalize(temp.path()).unwrap();
    Self { temp, root }
  }

  /// Write a file relative to the project root.
  pub fn write_file(&self, relative_path: &str, content: &str) -> PathBuf {
    let path = self.root.join(relative_path);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
    path
  }

  /// Write an executable script relative to the project root.
  pub fn write_script(&self, relative_path: &str, content: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;
    let path = self.write_file(relative_path, content);
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
  }

  pub fn read(&self, relative_path: &str) -> String {
    std::fs::read_to_string(self.root.join(relative_path)).unwrap()
  }

  pub fn exists(&self, relative_path: &str) -> bool {
    self.root.join(relative_path).exists()
  }

  /// `do` running in the project root.
  pub fn do_cmd(&self) -> Command {
    let mut cmd = cargo_bin_cmd!("do");
    isolate(&mut cmd, &self.root);
    cmd
  }

  /// The binary under another personality, through a link in a private
  /// `bin/` directory.
  pub fn personality(&self, name: &str) -> Command {
    let bin = self.temp.path().join("bin");
    std::fs::create_dir_all(&bin).unwrap();
    let link = bin.join(name);
    if !link.exists() {
      std::os::unix::fs::symlink(env!("CARGO_BIN_EXE_do"), &link).unwrap();
    }
    let mut cmd = Command::new(link);
    isolate(&mut cmd, &self.root);
    cmd
  }
}

fn isolate(cmd: &mut Command, dir: &Path) {
  cmd.current_dir(dir);
  for var in INHERITED_VARS {
    cmd.env_remove(var);
  }
}

/// Whether a C compiler is on `PATH`; compile tests are skipped without one.
pub fn compiler_available() -> bool {
  std::process::Command::new("cc")
    .arg("--version")
    .output()
    .map(|o| o.status.success())
    .unwrap_or(false)
}
