//! Core data model shared by the sanitizer, attributor, ownership resolver
//! and comparer.
//!
//! - [`ArchiveEntry`]: a raw entry read from one physical archive fragment
//! - [`AppFile`]: the canonical, reporting-ready unit produced by sanitization
//! - [`DependencyComponent`] and [`DependencyMap`]: build components and the
//!   index from file names to the components that could have contributed them

pub mod app_file;
pub mod archive;
pub mod component;
pub mod paths;

pub use app_file::{AppFile, FileType, ResourceType};
pub use archive::ArchiveEntry;
pub use component::{ComponentType, DependencyComponent, DependencyMap};

/// Sum the download and install sizes of a set of files.
///
/// # Examples
///
/// ```
/// use bundle_ruler::model::{total_sizes, AppFile, FileType};
///
/// let files = vec![
///     AppFile::new("/a", FileType::Other, 10, 20),
///     AppFile::new("/b", FileType::Other, 5, 7),
/// ];
/// assert_eq!(total_sizes(&files), (15, 27));
/// ```
pub fn total_sizes<'a>(files: impl IntoIterator<Item = &'a AppFile>) -> (u64, u64) {
    files.into_iter().fold((0, 0), |(download, install), file| {
        (download + file.download_size, install + file.install_size)
    })
}
