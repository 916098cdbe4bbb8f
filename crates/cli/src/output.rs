//! CLI output formatting.
//!
//! Everything the build driver says goes to stderr, prefixed with `do`,
//! so that stdout stays free for `.do` scripts and `redo-whichdo`.

use std::path::Path;
use std::process::ExitCode;

use owo_colors::{OwoColorize, Stream, Style};

use minido_lib::consts::APP_NAME;
use minido_lib::report::Reporter;

pub fn print_error(message: &str) {
  eprintln!(
    "{}: {}",
    APP_NAME,
    message.if_supports_color(Stream::Stderr, |s| s.red())
  );
}

pub fn print_notice(message: &str) {
  eprintln!("{}: {}", APP_NAME, message);
}

/// Exit status for a child's exit code.
pub fn exit_status(code: i32) -> ExitCode {
  ExitCode::from(exit_byte(code))
}

/// Codes that do not fit a byte become a plain failure.
fn exit_byte(code: i32) -> u8 {
  u8::try_from(code).unwrap_or(1)
}

/// Reports build progress on stderr, coloured when stderr is a terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct CliReporter;

impl Reporter for CliReporter {
  fn incremental_mode(&self) {
    print_notice("Incremental mode. Use -c for clean rebuild.");
  }

  fn building(&self, depth: &str, target: &Path) {
    let prefix = format!("{}  {}", APP_NAME, depth);
    eprintln!(
      "{}{}",
      prefix.if_supports_color(Stream::Stderr, |s| s.green()),
      target
        .display()
        .if_supports_color(Stream::Stderr, |s| s.style(Style::new().green().bold()))
    );
  }

  fn failed(&self, depth: &str, target: &Path, code: i32) {
    print_error(&format!("{}{}: got exit code {}", depth, target.display(), code));
  }

  fn missing_dofile(&self, target: &Path, dir: &Path) {
    print_error(&format!("{}: no .do file ({})", target.display(), dir.display()));
  }

  fn removing_stamps(&self) {
    print_notice("Removing stamp files...");
  }
}
