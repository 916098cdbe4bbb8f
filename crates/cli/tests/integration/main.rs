//! Integration tests driving real `.do` scripts through the binary.
//!
//! Personalities are reached through symlinks, so these run on unix only.

#![cfg(unix)]

mod build_tests;
mod common;
