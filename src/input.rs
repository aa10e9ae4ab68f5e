//! Input contracts for archive listings and dependency maps
//!
//! Archive listings are produced by an external splitting tool: one
//! fragment per physical archive, each a flat list of raw entries.
//! Compiled-code containers carry their compiled units as `children`.
//!
//! ```json
//! { "fragments": [ { "name": "base-master.apk", "entries": [
//!     { "name": "/AndroidManifest.xml", "downloadSize": 600, "installSize": 1400 },
//!     { "name": "/classes.dex", "downloadSize": 100, "installSize": 150,
//!       "children": [ { "name": "com.a.B", "installSize": 50 } ] }
//! ] } ] }
//! ```

use crate::infra::{FileSystem, RealFileSystem};
use crate::model::{ArchiveEntry, DependencyMap};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading or validating external inputs
#[derive(Error, Debug)]
pub enum InputError {
    /// Input file could not be read
    #[error("Failed to read {path}")]
    Io {
        /// File being read
        path: PathBuf,
        #[source]
        /// IO error source
        source: std::io::Error,
    },

    /// Input file is not valid JSON for the expected contract
    #[error("Failed to parse {path}: {source}")]
    Parse {
        /// File being parsed
        path: PathBuf,
        #[source]
        /// JSON error source
        source: serde_json::Error,
    },

    /// An entry lacks a required size measurement
    #[error("Entry '{entry}' in fragment '{fragment}' is missing its {field}")]
    MissingSize {
        /// Fragment containing the entry
        fragment: String,
        /// Entry name
        entry: String,
        /// Which measurement is missing
        field: &'static str,
    },

    /// A top-level entry name is not archive-absolute
    #[error("Entry '{entry}' in fragment '{fragment}' must start with '/'")]
    InvalidName {
        /// Fragment containing the entry
        fragment: String,
        /// Entry name
        entry: String,
    },
}

/// Listing of every physical archive fragment of one logical bundle
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArchiveListing {
    /// Physical fragments (base split, config splits, ...)
    pub fragments: Vec<Fragment>,
}

/// One physical archive
#[derive(Debug, Clone, Deserialize)]
pub struct Fragment {
    /// Fragment name, used in error messages
    pub name: String,
    /// Raw entries in archive order
    pub entries: Vec<RawEntry>,
}

/// Raw entry as produced by the splitting tool; sizes may be absent
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEntry {
    /// Entry name
    pub name: String,
    /// Compressed size
    #[serde(default)]
    pub download_size: Option<u64>,
    /// Uncompressed size
    #[serde(default)]
    pub install_size: Option<u64>,
    /// Compiled units, present only for compiled-code containers
    #[serde(default)]
    pub children: Option<Vec<RawEntry>>,
}

impl ArchiveListing {
    /// Load a listing from a JSON file
    pub fn load(path: &Path) -> Result<Self, InputError> {
        Self::load_with_fs(path, &RealFileSystem)
    }

    /// Load a listing with a custom filesystem implementation
    pub fn load_with_fs<FS: FileSystem>(path: &Path, fs: &FS) -> Result<Self, InputError> {
        read_json(path, fs)
    }

    /// Validate every raw entry and flatten all fragments into one entry list.
    ///
    /// Any missing measurement fails the whole listing.
    ///
    /// # Examples
    ///
    /// ```
    /// use bundle_ruler::input::ArchiveListing;
    ///
    /// let listing: ArchiveListing = serde_json::from_str(r#"{"fragments": [
    ///     {"name": "base.apk", "entries": [{"name": "/a.bin", "installSize": 3}]}
    /// ]}"#)?;
    /// assert!(listing.into_entries().is_err());
    /// # Ok::<(), serde_json::Error>(())
    /// ```
    pub fn into_entries(self) -> Result<Vec<ArchiveEntry>, InputError> {
        let mut entries = Vec::new();
        for fragment in self.fragments {
            for raw in fragment.entries {
                entries.push(convert_top_level(&fragment.name, raw)?);
            }
        }
        Ok(entries)
    }
}

fn convert_top_level(fragment: &str, raw: RawEntry) -> Result<ArchiveEntry, InputError> {
    if !raw.name.starts_with('/') {
        return Err(InputError::InvalidName {
            fragment: fragment.to_string(),
            entry: raw.name,
        });
    }

    let download_size = require(fragment, &raw.name, raw.download_size, "download size")?;
    let install_size = require(fragment, &raw.name, raw.install_size, "install size")?;

    match raw.children {
        None => Ok(ArchiveEntry::new(raw.name, download_size, install_size)),
        Some(children) => {
            let children = children
                .into_iter()
                .map(|child| convert_child(fragment, child))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(ArchiveEntry::container(
                raw.name,
                download_size,
                install_size,
                children,
            ))
        }
    }
}

// Compiled units are only measured uncompressed; their download size is
// apportioned later by the sanitizer.
fn convert_child(fragment: &str, raw: RawEntry) -> Result<ArchiveEntry, InputError> {
    let install_size = require(fragment, &raw.name, raw.install_size, "install size")?;
    Ok(ArchiveEntry::new(
        raw.name,
        raw.download_size.unwrap_or(0),
        install_size,
    ))
}

fn require(
    fragment: &str,
    entry: &str,
    value: Option<u64>,
    field: &'static str,
) -> Result<u64, InputError> {
    value.ok_or_else(|| InputError::MissingSize {
        fragment: fragment.to_string(),
        entry: entry.to_string(),
        field,
    })
}

/// Load a dependency map from a JSON file
pub fn load_dependency_map(path: &Path) -> Result<DependencyMap, InputError> {
    load_dependency_map_with_fs(path, &RealFileSystem)
}

/// Load a dependency map with a custom filesystem implementation
pub fn load_dependency_map_with_fs<FS: FileSystem>(
    path: &Path,
    fs: &FS,
) -> Result<DependencyMap, InputError> {
    read_json(path, fs)
}

pub(crate) fn read_json<T, FS>(path: &Path, fs: &FS) -> Result<T, InputError>
where
    T: serde::de::DeserializeOwned,
    FS: FileSystem,
{
    let contents = fs.read_to_string(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| InputError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
