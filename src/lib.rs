#![warn(missing_docs)]
#![warn(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! bundle-ruler library
//!
//! This library provides the size accounting behind the `bundle-ruler`
//! CLI: raw archive entries are sanitized into canonical files, each file
//! is attributed to the build component that produced it, owners are
//! resolved and two builds can be diffed. It can be used programmatically
//! in addition to the CLI interface.
//!
//! # Basic Example
//!
//! Sanitizing entries and attributing them to components:
//!
//! ```
//! use bundle_ruler::attribution::Attributor;
//! use bundle_ruler::model::{ArchiveEntry, DependencyComponent, DependencyMap};
//! use bundle_ruler::sanitizer::SizeSanitizer;
//!
//! let entries = vec![
//!     ArchiveEntry::new("/AndroidManifest.xml", 600, 1400),
//!     ArchiveEntry::container(
//!         "/classes.dex",
//!         100,
//!         150,
//!         vec![
//!             ArchiveEntry::new("com.a.B", 0, 50),
//!             ArchiveEntry::new("com.a.C", 0, 100),
//!         ],
//!     ),
//! ];
//! let files = SizeSanitizer::new().sanitize(&entries)?;
//! assert_eq!(files.iter().map(|f| f.download_size).sum::<u64>(), 700);
//!
//! let mut deps = DependencyMap::new();
//! deps.insert("com.a.B", DependencyComponent::external("com.a:lib:1.0"));
//!
//! let attribution = Attributor::new(DependencyComponent::internal(":app"))
//!     .attribute(&files, &deps)?;
//! // com.a.C shares its package with com.a.B
//! assert_eq!(attribution[&DependencyComponent::external("com.a:lib:1.0")].len(), 2);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Advanced Example: Size Budget Validation
//!
//! ```
//! use bundle_ruler::config::{SizeBudget, SizeMetric};
//!
//! let budget = SizeBudget {
//!     metric: SizeMetric::Download,
//!     target_size_kb: Some(300),
//!     warn_threshold_kb: Some(400),
//!     max_size_kb: Some(500),
//! };
//! assert!(budget.validate().is_ok());
//!
//! // Invalid budget (target > max) should fail
//! let bad_budget = SizeBudget {
//!     target_size_kb: Some(600),
//!     ..budget
//! };
//! assert!(bad_budget.validate().is_err());
//! ```

/// Attribution of files to build components
pub mod attribution;
/// CI/CD integration tooling
pub mod cicd;
/// Command handlers for CLI operations
pub mod cmd;
/// Cross-build comparison
pub mod compare;
/// Configuration file management
pub mod config;
/// Error types with contextual suggestions
pub mod error;
/// Shared formatting utilities
pub mod fmt;
/// Infrastructure traits for filesystem access
pub mod infra;
/// Input contracts for listings and dependency maps
pub mod input;
/// Core data model
pub mod model;
/// Ownership rules and resolution
pub mod ownership;
/// Report aggregation and rendering
pub mod report;
/// Size sanitization of raw archive entries
pub mod sanitizer;
