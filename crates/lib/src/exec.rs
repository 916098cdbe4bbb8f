//! Running a `.do` script.
//!
//! Scripts starting with `#!/` run under the named interpreter. Anything
//! else is sourced by `sh`, with the redo arguments available both as
//! `$1 $2 $3` and as `$target $base $tmp_output`.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::process::{Command, ExitStatus};

use tracing::debug;

use crate::consts::{DEPTH_STEP, ENV_DEPTH, ENV_REDO_TARGET};
use crate::dofile::DoFile;
use crate::error::{RedoError, Result};
use crate::state::BuildState;

/// The three redo arguments, relative to the script's directory, plus the
/// absolute target for `REDO_TARGET`.
#[derive(Debug, Clone, Copy)]
pub struct DoArgs<'a> {
  pub target: &'a Path,
  pub base: &'a Path,
  pub tmp_output: &'a Path,
  pub abs_target: &'a Path,
}

/// Interpreter and arguments from a `#!/` first line.
pub fn interpreter(dofile: &Path) -> Option<Vec<String>> {
  let file = File::open(dofile).ok()?;
  let mut first_line = String::new();
  BufReader::new(file).read_line(&mut first_line).ok()?;

  let line = first_line.trim().strip_prefix("#!")?;
  if !line.starts_with('/') {
    return None;
  }
  let words: Vec<String> = line.split_whitespace().map(str::to_string).collect();
  (!words.is_empty()).then_some(words)
}

/// Builds the process that runs `dofile`, without starting it.
pub fn command(state: &BuildState, dofile: &DoFile, args: &DoArgs<'_>) -> Command {
  let mut command = match interpreter(&dofile.path) {
    Some(words) => {
      let mut command = Command::new(&words[0]);
      command.args(&words[1..]).arg(&dofile.path);
      command
    }
    None => {
      let mut command = Command::new("sh");
      if state.options.verbose {
        command.arg("-v");
      }
      if state.options.exec_trace {
        command.arg("-x");
      }
      command
        .arg("-c")
        .arg(". \"$0\"")
        .arg(format!("./{}", dofile.file_name()))
        .env("target", args.target)
        .env("base", args.base)
        .env("tmp_output", args.tmp_output);
      command
    }
  };

  command
    .arg(args.target)
    .arg(args.base)
    .arg(args.tmp_output)
    .current_dir(dofile.dir())
    .envs(state.child_env().iter().map(|(k, v)| (k, v)))
    .env(ENV_DEPTH, format!("{}{}", state.depth, DEPTH_STEP))
    .env(ENV_REDO_TARGET, args.abs_target);
  command
}

/// Runs `dofile` to completion and returns its exit code.
pub fn run_dofile(state: &BuildState, dofile: &DoFile, args: &DoArgs<'_>) -> Result<i32> {
  let mut command = command(state, dofile, args);
  debug!(dofile = %dofile.path.display(), command = ?command, "running .do file");

  let status = command.status().map_err(|source| RedoError::Spawn {
    program: command.get_program().to_string_lossy().into_owned(),
    source,
  })?;
  Ok(exit_code(status))
}

/// Exit code of a finished process. Death by signal maps to 128 + signal.
pub fn exit_code(status: ExitStatus) -> i32 {
  if let Some(code) = status.code() {
    return code;
  }

  #[cfg(unix)]
  {
    use std::os::unix::process::ExitStatusExt;
    if let Some(signal) = status.signal() {
      return 128 + signal;
    }
  }

  1
}
