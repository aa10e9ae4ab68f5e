//! Ownership rule files
//!
//! Rules are read from TOML or JSON, chosen by file extension. Both hold
//! an `owners` list; fields other than `identifier` and `owner` are
//! ignored.
//!
//! ```toml
//! [[owners]]
//! identifier = ":feature:chat"
//! owner = "messaging"
//!
//! [[owners]]
//! identifier = "com.squareup:*"
//! owner = "platform"
//! ```

use super::OwnershipEntry;
use crate::infra::{FileSystem, RealFileSystem};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading ownership rules
#[derive(Error, Debug)]
pub enum OwnershipError {
    /// Rule file could not be read
    #[error("Failed to read ownership rules from {path}")]
    Io {
        /// Rule file
        path: PathBuf,
        #[source]
        /// IO error source
        source: std::io::Error,
    },

    /// TOML rule file is malformed
    #[error("Failed to parse ownership rules in {path}: {source}")]
    Toml {
        /// Rule file
        path: PathBuf,
        #[source]
        /// TOML error source
        source: toml_edit::de::Error,
    },

    /// JSON rule file is malformed
    #[error("Failed to parse ownership rules in {path}: {source}")]
    Json {
        /// Rule file
        path: PathBuf,
        #[source]
        /// JSON error source
        source: serde_json::Error,
    },

    /// Extension is neither `.toml` nor `.json`
    #[error("Unsupported ownership file format: {path} (expected .toml or .json)")]
    UnsupportedFormat {
        /// Rule file
        path: PathBuf,
    },

    /// A rule has an empty identifier or owner
    #[error("Ownership rule #{index} in {path} has an empty {field}")]
    EmptyField {
        /// Rule file
        path: PathBuf,
        /// Zero-based position of the rule
        index: usize,
        /// `identifier` or `owner`
        field: &'static str,
    },
}

#[derive(Debug, Deserialize)]
struct OwnershipFile {
    #[serde(default)]
    owners: Vec<OwnershipEntry>,
}

/// Load ownership rules from a `.toml` or `.json` file
pub fn load_ownership_entries(path: &Path) -> Result<Vec<OwnershipEntry>, OwnershipError> {
    load_ownership_entries_with_fs(path, &RealFileSystem)
}

/// Load ownership rules with a custom filesystem implementation
pub fn load_ownership_entries_with_fs<FS: FileSystem>(
    path: &Path,
    fs: &FS,
) -> Result<Vec<OwnershipEntry>, OwnershipError> {
    let extension = path.extension().and_then(|e| e.to_str());
    if !matches!(extension, Some("toml") | Some("json")) {
        return Err(OwnershipError::UnsupportedFormat {
            path: path.to_path_buf(),
        });
    }

    let contents = fs
        .read_to_string(path)
        .map_err(|source| OwnershipError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    let file: OwnershipFile = if extension == Some("toml") {
        toml_edit::de::from_str(&contents).map_err(|source| OwnershipError::Toml {
            path: path.to_path_buf(),
            source,
        })?
    } else {
        serde_json::from_str(&contents).map_err(|source| OwnershipError::Json {
            path: path.to_path_buf(),
            source,
        })?
    };

    for (index, entry) in file.owners.iter().enumerate() {
        let field = if entry.identifier.is_empty() {
            "identifier"
        } else if entry.owner.is_empty() {
            "owner"
        } else {
            continue;
        };
        return Err(OwnershipError::EmptyField {
            path: path.to_path_buf(),
            index,
            field,
        });
    }

    Ok(file.owners)
}
