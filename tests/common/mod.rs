//! Common test utilities and helpers
//!
//! Shared functionality for integration tests:
//! - Locating the compiled binary
//! - Writing listing, dependency map, ownership and config fixtures
//!
//! # Usage
//!
//! ```rust,no_run
//! mod common;
//! use common::{fixtures::Project, get_bin};
//!
//! let project = Project::new().unwrap();
//! get_bin().arg("analyze").arg(project.base_listing()).assert().success();
//! ```

pub mod fixtures;

use assert_cmd::Command;

/// Helper to get the bundle-ruler binary command
#[allow(dead_code)]
pub fn get_bin() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_bundle-ruler"));
    cmd.env("NO_EMOJI", "1");
    cmd
}
