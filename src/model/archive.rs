//! Raw archive entries

/// One file-like record packed inside a physical archive fragment.
///
/// `download_size` is the compressed transfer size and `install_size` the
/// unpacked on-device size. A [`ArchiveEntry::Container`] packs individually
/// measured compiled units whose download size cannot be measured on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArchiveEntry {
    /// A plain entry (resource, asset, native library, metadata, ...)
    Default {
        /// Archive-absolute path, starting with `/`
        name: String,
        /// Compressed size in bytes
        download_size: u64,
        /// Uncompressed size in bytes
        install_size: u64,
    },
    /// A compiled-code container holding one child per compiled unit
    Container {
        /// Archive-absolute path, starting with `/`
        name: String,
        /// Compressed size of the whole container in bytes
        download_size: u64,
        /// Uncompressed size of the whole container in bytes
        install_size: u64,
        /// Compiled units packed in the container, in archive order
        children: Vec<ArchiveEntry>,
    },
}

impl ArchiveEntry {
    /// Create a plain entry
    pub fn new(name: impl Into<String>, download_size: u64, install_size: u64) -> Self {
        Self::Default {
            name: name.into(),
            download_size,
            install_size,
        }
    }

    /// Create a compiled-code container entry
    pub fn container(
        name: impl Into<String>,
        download_size: u64,
        install_size: u64,
        children: Vec<ArchiveEntry>,
    ) -> Self {
        Self::Container {
            name: name.into(),
            download_size,
            install_size,
            children,
        }
    }

    /// Entry name
    pub fn name(&self) -> &str {
        match self {
            Self::Default { name, .. } | Self::Container { name, .. } => name,
        }
    }

    /// Compressed size in bytes
    pub fn download_size(&self) -> u64 {
        match self {
            Self::Default { download_size, .. } | Self::Container { download_size, .. } => {
                *download_size
            }
        }
    }

    /// Uncompressed size in bytes
    pub fn install_size(&self) -> u64 {
        match self {
            Self::Default { install_size, .. } | Self::Container { install_size, .. } => {
                *install_size
            }
        }
    }

    /// Whether this entry is a compiled-code container
    pub fn is_container(&self) -> bool {
        matches!(self, Self::Container { .. })
    }

    /// Child units of a container; empty for plain entries
    pub fn children(&self) -> &[ArchiveEntry] {
        match self {
            Self::Container { children, .. } => children,
            Self::Default { .. } => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors_read_both_variants() {
        let plain = ArchiveEntry::new("/res/layout/main.xml", 10, 30);
        assert_eq!(plain.name(), "/res/layout/main.xml");
        assert_eq!(plain.download_size(), 10);
        assert_eq!(plain.install_size(), 30);
        assert!(!plain.is_container());
        assert!(plain.children().is_empty());

        let dex = ArchiveEntry::container(
            "/classes.dex",
            100,
            150,
            vec![ArchiveEntry::new("com.a.B", 0, 50)],
        );
        assert!(dex.is_container());
        assert_eq!(dex.children().len(), 1);
        assert_eq!(dex.install_size(), 150);
    }
}
