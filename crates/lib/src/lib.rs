//! minido-lib: a minimal redo-style build driver.
//!
//! Targets are built by `.do` scripts found next to them (or as
//! `default*.do` further up the tree). Scripts write to a temporary file
//! that is renamed over the target only when they succeed. Targets are
//! built once per tree; there is no dependency checking.
//!
//! - `dofile`: finding the script for a target
//! - `exec`: running a script with the redo arguments
//! - `redo`: building targets and promoting their output
//! - `setup`: preparing the environment of a top-level run
//! - `compile`: the `redo-cc` step that compiles one C file

pub mod built;
pub mod compile;
pub mod consts;
pub mod dofile;
pub mod error;
pub mod exec;
pub mod paths;
pub mod redo;
pub mod report;
pub mod setup;
pub mod state;


pub use error::{RedoError, Result};
