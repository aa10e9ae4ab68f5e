//! Cross-build comparison of sanitized file lists
//!
//! Files are matched by name. Sizes of files appearing more than once in
//! one list (the same path in several archive fragments) are summed
//! before comparing, so the per-file differences always reconcile with
//! the totals.

use crate::model::{total_sizes, AppFile};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A file whose download size differs between base and head
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DifferentAppFile {
    /// Archive path or class name
    pub name: String,
    /// Download size in the base build (0 if added)
    pub old_size: u64,
    /// Download size in the head build (0 if removed)
    pub new_size: u64,
    /// `new_size - old_size`
    pub difference: i64,
}

impl DifferentAppFile {
    /// Create a diff row, computing the difference
    pub fn new(name: impl Into<String>, old_size: u64, new_size: u64) -> Self {
        Self {
            name: name.into(),
            old_size,
            new_size,
            difference: signed_delta(old_size, new_size),
        }
    }
}

/// Changed files plus download totals of both builds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonReport {
    /// Total download size of the base build
    pub old_download_size: u64,
    /// Total download size of the head build
    pub new_download_size: u64,
    /// Change in total download size
    pub difference: i64,
    /// Change relative to the base build, in percent
    pub delta_percent: f64,
    /// Changed files, largest change first
    pub files: Vec<DifferentAppFile>,
}

/// Diffs two sanitized builds
///
/// # Examples
///
/// ```
/// use bundle_ruler::compare::{Comparer, DifferentAppFile};
/// use bundle_ruler::model::{AppFile, FileType};
///
/// let head = vec![AppFile::new("f", FileType::Other, 100, 100)];
/// let diff = Comparer::new().compare(&head, &[]);
///
/// assert_eq!(diff, vec![DifferentAppFile::new("f", 0, 100)]);
/// assert_eq!(diff[0].difference, 100);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Comparer {
    include_removed: bool,
}

impl Comparer {
    /// Comparer reporting changed and added files
    pub fn new() -> Self {
        Self::default()
    }

    /// Also report files present only in the base build
    pub fn with_removed_files(mut self, include_removed: bool) -> Self {
        self.include_removed = include_removed;
        self
    }

    /// Files whose download size changed from `base` to `head`
    ///
    /// Sorted by descending absolute difference, then by name.
    pub fn compare(&self, head: &[AppFile], base: &[AppFile]) -> Vec<DifferentAppFile> {
        let head_sizes = sizes_by_name(head);
        let mut base_sizes = sizes_by_name(base);

        let mut files: Vec<DifferentAppFile> = Vec::new();
        for (name, new_size) in head_sizes {
            match base_sizes.remove(name) {
                None => files.push(DifferentAppFile::new(name, 0, new_size)),
                Some(old_size) if old_size != new_size => {
                    files.push(DifferentAppFile::new(name, old_size, new_size));
                }
                Some(_) => {}
            }
        }

        if self.include_removed {
            files.extend(
                base_sizes
                    .into_iter()
                    .map(|(name, old_size)| DifferentAppFile::new(name, old_size, 0)),
            );
        }

        files.sort_by(|a, b| {
            b.difference
                .unsigned_abs()
                .cmp(&a.difference.unsigned_abs())
                .then_with(|| a.name.cmp(&b.name))
        });
        files
    }

    /// Full comparison report with build totals
    pub fn report(&self, head: &[AppFile], base: &[AppFile]) -> ComparisonReport {
        let (new_download_size, _) = total_sizes(head);
        let (old_download_size, _) = total_sizes(base);
        let files = self.compare(head, base);
        let difference = signed_delta(old_download_size, new_download_size);
        let delta_percent = if old_download_size == 0 {
            0.0
        } else {
            difference as f64 / old_download_size as f64 * 100.0
        };

        debug!(
            "Compared {} head files against {} base files: {} changed, {:+} bytes",
            head.len(),
            base.len(),
            files.len(),
            difference
        );

        ComparisonReport {
            old_download_size,
            new_download_size,
            difference,
            delta_percent,
            files,
        }
    }
}

fn sizes_by_name(files: &[AppFile]) -> BTreeMap<&str, u64> {
    let mut sizes = BTreeMap::new();
    for file in files {
        let size = sizes.entry(file.name.as_str()).or_insert(0u64);
        *size = size.saturating_add(file.download_size);
    }
    sizes
}

fn signed_delta(old: u64, new: u64) -> i64 {
    let delta = i128::from(new) - i128::from(old);
    i64::try_from(delta).unwrap_or(if delta < 0 { i64::MIN } else { i64::MAX })
}
