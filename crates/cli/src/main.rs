use std::env;
use std::ffi::{OsStr, OsString};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{ArgAction, Parser};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use minido_lib::consts::EXIT_UNKNOWN_COMMAND;
use minido_lib::state::{BuildOptions, Invocation};

mod cmd;
mod output;

/// A minimal alternative to djb redo.
///
/// do does *not* check dependencies. It will never rebuild a target it has
/// already built, unless you use -c.
#[derive(Parser)]
#[command(name = "do", version, about, long_about, disable_help_flag = true)]
struct BuildCli {
  /// Print extra debug messages (mostly about dependency checks)
  #[arg(short, long)]
  debug: bool,

  /// Run .do files with 'set -v'
  #[arg(short, long)]
  verbose: bool,

  /// Run .do files with 'set -x'
  #[arg(short = 'x', long)]
  exec_trace: bool,

  /// Clean up all old targets before starting
  #[arg(short, long)]
  clean: bool,

  /// Ignored, for compatibility with real redo
  #[arg(short, long, value_name = "N")]
  jobs: Option<usize>,

  /// Print help
  #[arg(short, long, short_alias = '?', action = ArgAction::Help)]
  help: Option<bool>,

  /// Targets to build (default: all)
  targets: Vec<PathBuf>,
}

impl BuildCli {
  fn options(&self) -> BuildOptions {
    BuildOptions {
      debug: self.debug,
      verbose: self.verbose,
      exec_trace: self.exec_trace,
      clean: self.clean,
    }
  }
}

/// List the .do files that would be tried for a target
#[derive(Parser)]
#[command(name = "redo-whichdo", version, about)]
struct WhichdoCli {
  target: Option<PathBuf>,
}

/// Compile <base>.c into <tmp_output> with $CC (default: cc)
#[derive(Parser)]
#[command(name = "redo-cc", version, about)]
struct CcCli {
  /// Name of the target being built ($1)
  target: PathBuf,
  /// Target name without extension; the source is <base>.c ($2)
  base: PathBuf,
  /// Where the compiler writes the executable ($3)
  tmp_output: PathBuf,
}

fn main() -> ExitCode {
  let args: Vec<OsString> = env::args_os().collect();
  let program = args.first().map(OsString::as_os_str).unwrap_or(OsStr::new("do"));
  let invocation = Invocation::from_program(program);

  match run(invocation, args) {
    Ok(code) => code,
    Err(err) => {
      output::print_error(&format!("error: {:#}", err));
      ExitCode::FAILURE
    }
  }
}

fn run(invocation: Invocation, args: Vec<OsString>) -> Result<ExitCode> {
  match invocation {
    Invocation::Do | Invocation::Redo | Invocation::RedoIfchange => {
      let cli = BuildCli::parse_from(args);
      init_tracing(cli.debug);
      if let Some(jobs) = cli.jobs {
        debug!(jobs, "ignoring -j");
      }
      cmd::cmd_build(&invocation, cli.options(), cli.targets)
    }
    Invocation::RedoWhichdo => {
      let cli = WhichdoCli::parse_from(args);
      init_tracing(false);
      cmd::cmd_whichdo(cli.target.as_deref())
    }
    Invocation::RedoCc => {
      let cli = CcCli::parse_from(args);
      init_tracing(false);
      cmd::cmd_cc(&cli.target, &cli.base, &cli.tmp_output)
    }
    Invocation::Unknown(name) => {
      output::print_error(&format!("'{}': unexpected redo command", name));
      Ok(ExitCode::from(EXIT_UNKNOWN_COMMAND))
    }
  }
}

/// Logs go to stderr. `RUST_LOG` wins over `-d`.
fn init_tracing(debug: bool) {
  let default = if debug { "debug" } else { "warn" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_target(false)
    .without_time()
    .init();
}
