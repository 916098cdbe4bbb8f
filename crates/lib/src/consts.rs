//! File names, environment variables and helper commands shared by every
//! personality of the binary.

/// Name used in messages (`do: ...`).
pub const APP_NAME: &str = "do";

/// Log of every target built in this tree, one absolute path per line.
pub const BUILT_FILE: &str = ".do_built";

/// Directory prepended to `PATH` for `.do` scripts.
pub const PATH_DIR: &str = ".do_built.dir";

/// Suffix of the scratch output passed to `.do` files as `$3`.
pub const TMP_SUFFIX: &str = ".redo.tmp";

/// Suffix of the stamp recording that a target was built.
pub const DID_SUFFIX: &str = ".did";

/// Suffix of the stamp while its target is being built.
pub const DID_TMP_SUFFIX: &str = ".did.tmp";

pub const DO_EXTENSION: &str = ".do";

/// Path of the top-level `.do_built` log. Its presence marks a nested run.
pub const ENV_BUILT: &str = "DO_BUILT";
pub const ENV_STARTDIR: &str = "DO_STARTDIR";
pub const ENV_PATH: &str = "DO_PATH";
/// Indentation of build messages; grows by two spaces per nesting level.
pub const ENV_DEPTH: &str = "DO_DEPTH";
pub const ENV_REDO_TARGET: &str = "REDO_TARGET";
/// Overrides the compiler used by `redo-cc`.
pub const ENV_CC: &str = "CC";

pub const DEFAULT_TARGET: &str = "all";
pub const DEFAULT_COMPILER: &str = "cc";

/// Indentation added for each nested build.
pub const DEPTH_STEP: &str = "  ";

/// Upper bound on directories walked while looking for `default*.do`.
pub const MAX_SEARCH_DEPTH: usize = 100;

/// Commands linked to the running binary inside [`PATH_DIR`].
pub const LINKED_COMMANDS: &[&str] = &["redo", "redo-ifchange", "redo-whichdo", "redo-cc"];

/// Commands that exist only so `.do` scripts written for full redo still run.
pub const STUB_COMMANDS: &[&str] = &[
  "redo-ifcreate",
  "redo-stamp",
  "redo-always",
  "redo-ood",
  "redo-targets",
  "redo-sources",
];

pub const STUB_SCRIPT: &str = "#!/bin/sh\n";

/// Exit code for an unrecognised personality.
pub const EXIT_UNKNOWN_COMMAND: u8 = 99;

/// Exit code when a program cannot be started, as reported by POSIX shells.
pub const EXIT_NOT_FOUND: i32 = 127;
