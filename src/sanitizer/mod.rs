//! Size sanitization of raw archive entries
//!
//! Turns the entries of every physical fragment of one logical bundle into a
//! deduplicated list of canonical [`AppFile`]s with exact size accounting.
//! Entries are routed through the ordered [`Bucket`] list; the only bytes
//! intentionally dropped are toolchain-injected files and duplicate copies
//! of the primary manifest.
//!
//! # Examples
//!
//! ```
//! use bundle_ruler::model::{ArchiveEntry, FileType};
//! use bundle_ruler::sanitizer::SizeSanitizer;
//!
//! let entries = vec![
//!     ArchiveEntry::new("/AndroidManifest.xml", 250, 600),
//!     ArchiveEntry::new("/AndroidManifest.xml", 300, 776),
//!     ArchiveEntry::new("/META-INF/MANIFEST.MF", 40, 90),
//! ];
//! let files = SizeSanitizer::new().sanitize(&entries)?;
//!
//! assert_eq!(files.len(), 1);
//! assert_eq!(files[0].install_size, 776);
//! # Ok::<(), bundle_ruler::sanitizer::SanitizeError>(())
//! ```

pub mod buckets;
pub mod name;
pub mod resource_type;

pub use buckets::Bucket;
pub use name::{IdentityNameSanitizer, MappingNameSanitizer, NameSanitizer};
pub use resource_type::{classify_resource, file_type_for_path};

use crate::model::{AppFile, ArchiveEntry};
use log::debug;
use std::collections::HashMap;
use thiserror::Error;

/// Errors that abort a sanitize pass
#[derive(Error, Debug)]
pub enum SanitizeError {
    /// Combined sizes no longer fit the size type
    #[error("Size overflow in {bucket} bucket while adding '{entry}'")]
    SizeOverflow {
        /// Bucket label
        bucket: &'static str,
        /// Entry being added when the sum overflowed
        entry: String,
    },
}

/// Sanitizes raw entries into canonical files
pub struct SizeSanitizer<N: NameSanitizer = IdentityNameSanitizer> {
    names: N,
}

impl SizeSanitizer {
    /// Create a sanitizer that keeps names as they are
    pub fn new() -> Self {
        Self::with_names(IdentityNameSanitizer)
    }
}

impl Default for SizeSanitizer {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: NameSanitizer> SizeSanitizer<N> {
    /// Create a sanitizer that deobfuscates names through `names`
    pub fn with_names(names: N) -> Self {
        Self { names }
    }

    /// Route every entry to its bucket and flatten the bucket outputs.
    ///
    /// Output order follows bucket priority, then entry order within a
    /// bucket. Any error discards the whole pass.
    pub fn sanitize(&self, entries: &[ArchiveEntry]) -> Result<Vec<AppFile>, SanitizeError> {
        let mut routed: HashMap<Bucket, Vec<&ArchiveEntry>> = HashMap::new();
        for entry in entries {
            routed.entry(Bucket::route(entry)).or_default().push(entry);
        }

        let mut files = Vec::with_capacity(entries.len());
        for bucket in Bucket::ORDERED {
            let Some(bucket_entries) = routed.get(&bucket) else {
                continue;
            };
            let sanitized = bucket.sanitize(bucket_entries, &self.names)?;
            debug!(
                "{} bucket: {} entries -> {} files",
                bucket.label(),
                bucket_entries.len(),
                sanitized.len()
            );
            files.extend(sanitized);
        }

        Ok(files)
    }
}
