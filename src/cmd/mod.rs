//! Command handlers for the bundle-ruler CLI
//!
//! Each submodule handles a specific CLI command.

pub mod analyze;
pub mod compare;
pub mod completions;
pub mod init;

pub use analyze::{cmd_analyze, AnalyzeOptions, FeatureListing};
pub use compare::cmd_compare;
pub use completions::cmd_completions;
pub use init::cmd_init;
