//! Category handlers ("buckets") for raw archive entries
//!
//! Every entry is routed to the first bucket in [`Bucket::ORDERED`] whose
//! predicate matches. Each bucket then turns its whole share of entries into
//! canonical files at once, since most policies (deduplication, merging,
//! proportional allocation) need to see every matching entry.

use super::name::NameSanitizer;
use super::resource_type::{classify_resource, file_type_for_path};
use super::SanitizeError;
use crate::model::paths::{
    MANIFEST, RESOURCE_ROOT, RESOURCE_TABLE, SPLIT_DESCRIPTOR_PATTERN, TOOLCHAIN_MANIFEST,
};
use crate::model::{AppFile, ArchiveEntry, FileType};
use regex::Regex;
use std::sync::OnceLock;

static SPLIT_DESCRIPTOR_RE: OnceLock<Regex> = OnceLock::new();

fn split_descriptor_re() -> &'static Regex {
    SPLIT_DESCRIPTOR_RE.get_or_init(|| {
        // SAFETY: constant pattern, validated by the tests below
        Regex::new(SPLIT_DESCRIPTOR_PATTERN).expect("split descriptor regex is valid")
    })
}

/// Entry category handlers in routing priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    /// Compiled-code containers; children get proportional download sizes
    CompiledCode,
    /// Primary manifest; only the largest copy is kept
    Manifest,
    /// Files injected by the packaging toolchain; dropped entirely
    ToolchainNoise,
    /// Compiled resource table; copies are summed
    ResourceTable,
    /// Files under the resource root; names are deobfuscated
    ResourcePath,
    /// Everything else; typed by path prefix
    Default,
}

impl Bucket {
    /// Routing order, most specific first
    pub const ORDERED: [Bucket; 6] = [
        Bucket::CompiledCode,
        Bucket::Manifest,
        Bucket::ToolchainNoise,
        Bucket::ResourceTable,
        Bucket::ResourcePath,
        Bucket::Default,
    ];

    /// Whether this bucket claims `entry`
    pub fn matches(self, entry: &ArchiveEntry) -> bool {
        let name = entry.name();
        match self {
            Bucket::CompiledCode => entry.is_container(),
            Bucket::Manifest => name == MANIFEST,
            Bucket::ToolchainNoise => {
                name == TOOLCHAIN_MANIFEST || split_descriptor_re().is_match(name)
            }
            Bucket::ResourceTable => name == RESOURCE_TABLE,
            Bucket::ResourcePath => name.starts_with(RESOURCE_ROOT),
            Bucket::Default => true,
        }
    }

    /// First bucket claiming `entry`
    ///
    /// # Examples
    ///
    /// ```
    /// use bundle_ruler::model::ArchiveEntry;
    /// use bundle_ruler::sanitizer::Bucket;
    ///
    /// let descriptor = ArchiveEntry::new("/res/xml/splits0.xml", 1, 1);
    /// assert_eq!(Bucket::route(&descriptor), Bucket::ToolchainNoise);
    ///
    /// let layout = ArchiveEntry::new("/res/layout/main.xml", 1, 1);
    /// assert_eq!(Bucket::route(&layout), Bucket::ResourcePath);
    /// ```
    pub fn route(entry: &ArchiveEntry) -> Bucket {
        Self::ORDERED
            .into_iter()
            .find(|bucket| bucket.matches(entry))
            .unwrap_or(Bucket::Default)
    }

    /// Short label used in logs and errors
    pub fn label(self) -> &'static str {
        match self {
            Bucket::CompiledCode => "compiled-code",
            Bucket::Manifest => "manifest",
            Bucket::ToolchainNoise => "toolchain-noise",
            Bucket::ResourceTable => "resource-table",
            Bucket::ResourcePath => "resource-path",
            Bucket::Default => "default",
        }
    }

    /// Turn every entry routed to this bucket into canonical files
    pub fn sanitize<N: NameSanitizer + ?Sized>(
        self,
        entries: &[&ArchiveEntry],
        names: &N,
    ) -> Result<Vec<AppFile>, SanitizeError> {
        match self {
            Bucket::CompiledCode => sanitize_containers(entries, names),
            Bucket::Manifest => Ok(largest_manifest(entries)),
            Bucket::ToolchainNoise => Ok(Vec::new()),
            Bucket::ResourceTable => merge_resource_tables(entries).map(|f| f.into_iter().collect()),
            Bucket::ResourcePath => Ok(entries
                .iter()
                .map(|entry| {
                    let name = names.resource_name(entry.name());
                    let file_type = file_type_for_path(&name);
                    let resource_type = classify_resource(&name);
                    AppFile::new(
                        name,
                        file_type,
                        entry.download_size(),
                        entry.install_size(),
                    )
                    .with_resource_type(resource_type)
                })
                .collect()),
            Bucket::Default => Ok(entries.iter().map(|entry| typed_file(entry)).collect()),
        }
    }
}

fn typed_file(entry: &ArchiveEntry) -> AppFile {
    AppFile::new(
        entry.name(),
        file_type_for_path(entry.name()),
        entry.download_size(),
        entry.install_size(),
    )
    .with_resource_type(classify_resource(entry.name()))
}

/// Apportion the combined download size of every container that has
/// children over those children in proportion to their install size.
///
/// Shares are computed from rounded cumulative totals, so the emitted
/// download sizes always sum to exactly the combined size of those
/// containers. Containers without children are kept whole.
fn sanitize_containers<N: NameSanitizer + ?Sized>(
    containers: &[&ArchiveEntry],
    names: &N,
) -> Result<Vec<AppFile>, SanitizeError> {
    let (parents, childless): (Vec<&ArchiveEntry>, Vec<&ArchiveEntry>) = containers
        .iter()
        .copied()
        .partition(|c| !c.children().is_empty());

    let total_download = checked_sum(
        Bucket::CompiledCode,
        parents.iter().map(|c| (c.name(), c.download_size())),
    )?;
    let children: Vec<&ArchiveEntry> = parents
        .iter()
        .copied()
        .flat_map(ArchiveEntry::children)
        .collect();

    let total_install = checked_sum(
        Bucket::CompiledCode,
        children.iter().map(|c| (c.name(), c.install_size())),
    )?;
    // Without any measured install size every unit gets an equal share
    let weight = |child: &ArchiveEntry| -> u128 {
        if total_install == 0 {
            1
        } else {
            u128::from(child.install_size())
        }
    };
    let total_weight = if total_install == 0 {
        children.len() as u128
    } else {
        u128::from(total_install)
    };

    let mut files = Vec::with_capacity(children.len() + childless.len());
    let mut cumulative_weight = 0u128;
    let mut allocated = 0u64;
    for child in children {
        cumulative_weight += weight(child);
        let target = rounded_share(cumulative_weight, u128::from(total_download), total_weight);
        files.push(AppFile::new(
            names.class_name(child.name()),
            FileType::Class,
            target - allocated,
            child.install_size(),
        ));
        allocated = target;
    }

    // Nothing to apportion to; keep the containers so their bytes are not lost
    files.extend(childless.into_iter().map(typed_file));

    Ok(files)
}

// round(weight * total / total_weight), half up
fn rounded_share(weight: u128, total: u128, total_weight: u128) -> u64 {
    let share = (weight * total + total_weight / 2) / total_weight;
    // weight <= total_weight, so share <= total which came from a u64
    share as u64
}

fn largest_manifest(entries: &[&ArchiveEntry]) -> Vec<AppFile> {
    entries
        .iter()
        .copied()
        .reduce(|best, entry| {
            if entry.install_size() > best.install_size() {
                entry
            } else {
                best
            }
        })
        .map(typed_file)
        .into_iter()
        .collect()
}

fn merge_resource_tables(entries: &[&ArchiveEntry]) -> Result<Option<AppFile>, SanitizeError> {
    let Some(first) = entries.first() else {
        return Ok(None);
    };
    let download = checked_sum(
        Bucket::ResourceTable,
        entries.iter().map(|e| (e.name(), e.download_size())),
    )?;
    let install = checked_sum(
        Bucket::ResourceTable,
        entries.iter().map(|e| (e.name(), e.install_size())),
    )?;
    Ok(Some(AppFile::new(
        first.name(),
        file_type_for_path(first.name()),
        download,
        install,
    )))
}

fn checked_sum<'a>(
    bucket: Bucket,
    sizes: impl IntoIterator<Item = (&'a str, u64)>,
) -> Result<u64, SanitizeError> {
    sizes.into_iter().try_fold(0u64, |acc, (entry, size)| {
        acc.checked_add(size).ok_or_else(|| SanitizeError::SizeOverflow {
            bucket: bucket.label(),
            entry: entry.to_string(),
        })
    })
}
