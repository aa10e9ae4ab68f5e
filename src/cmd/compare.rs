//! Compare command implementation
//!
//! Handles the `bundle-ruler compare` command which sanitizes two archive
//! listings independently and reports per-file download size changes.

use anyhow::{Context, Result};
use console::style;
use std::path::Path;

use crate::compare::{Comparer, ComparisonReport};
use crate::error::RulerError;
use crate::fmt::CHART;
use crate::input::ArchiveListing;
use crate::model::AppFile;
use crate::report::console::print_comparison_report;
use crate::sanitizer::SizeSanitizer;

/// Compare a head build against a base build
///
/// # Examples
///
/// ```no_run
/// use bundle_ruler::cmd::compare::cmd_compare;
/// use std::path::Path;
///
/// cmd_compare(Path::new("head.json"), Path::new("base.json"), false, false, 20)?;
/// # Ok::<(), anyhow::Error>(())
/// ```
///
/// # Errors
///
/// Returns an error if either listing is missing or malformed.
pub fn cmd_compare(
    head: &Path,
    base: &Path,
    include_removed: bool,
    json: bool,
    top: usize,
) -> Result<()> {
    let report = compare_listings(head, base, include_removed)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}{} Build Comparison", CHART, style("bundle-ruler").bold());
        print_comparison_report(&report, top);
    }

    Ok(())
}

/// Load, sanitize and diff two listings
pub fn compare_listings(
    head: &Path,
    base: &Path,
    include_removed: bool,
) -> Result<ComparisonReport> {
    let head_files =
        sanitized_files(head).with_context(|| format!("Failed to load head build {}", head.display()))?;
    let base_files =
        sanitized_files(base).with_context(|| format!("Failed to load base build {}", base.display()))?;

    Ok(Comparer::new()
        .with_removed_files(include_removed)
        .report(&head_files, &base_files))
}

fn sanitized_files(path: &Path) -> Result<Vec<AppFile>, RulerError> {
    let entries = ArchiveListing::load(path)?.into_entries()?;
    Ok(SizeSanitizer::new().sanitize(&entries)?)
}
