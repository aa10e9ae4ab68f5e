//! Report aggregation over attributed files
//!
//! [`ReportBuilder`] turns an [`Attribution`] into per-component reports
//! carrying owners and sorted file lists, and assembles those into the
//! app-level [`AppReport`]. Console rendering lives in [`console`].

pub mod console;

use crate::attribution::Attribution;
use crate::model::{total_sizes, AppFile, ComponentType};
use crate::ownership::OwnershipResolver;
use serde::Serialize;
use std::cmp::Reverse;

/// Sizes and files contributed by one component
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentReport {
    /// Module path or external coordinate
    pub name: String,
    /// Internal or external
    #[serde(rename = "type")]
    pub component_type: ComponentType,
    /// Resolved owner of the component
    pub owner: String,
    /// Sum of the files' download sizes
    pub download_size: u64,
    /// Sum of the files' install sizes
    pub install_size: u64,
    /// Files with their resolved owner, largest download first
    pub files: Vec<AppFile>,
}

/// One on-demand feature, attributed independently of the base app
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicFeatureReport {
    /// Feature name
    pub name: String,
    /// Owner resolved by feature name
    pub owner: String,
    /// Total download size of the feature
    pub download_size: u64,
    /// Total install size of the feature
    pub install_size: u64,
    /// Components contributing to the feature
    pub components: Vec<ComponentReport>,
}

/// Whole-app report
///
/// Totals cover the base app only; each dynamic feature carries its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppReport {
    /// App name
    pub name: String,
    /// Total download size of the base app
    pub download_size: u64,
    /// Total install size of the base app
    pub install_size: u64,
    /// Base app components, largest download first
    pub components: Vec<ComponentReport>,
    /// Dynamic features
    pub dynamic_features: Vec<DynamicFeatureReport>,
}

/// Builds reports, resolving owners along the way
///
/// # Examples
///
/// ```
/// use bundle_ruler::attribution::Attribution;
/// use bundle_ruler::model::{AppFile, DependencyComponent, FileType};
/// use bundle_ruler::ownership::{OwnershipEntry, OwnershipResolver};
/// use bundle_ruler::report::ReportBuilder;
///
/// let resolver = OwnershipResolver::new(vec![OwnershipEntry::new(":app", "core")], "unknown");
/// let mut attribution = Attribution::new();
/// attribution.insert(
///     DependencyComponent::internal(":app"),
///     vec![AppFile::new("com.a.Main", FileType::Class, 10, 20)],
/// );
///
/// let report = ReportBuilder::new(&resolver).app_report("demo", attribution, Vec::new());
/// assert_eq!(report.download_size, 10);
/// assert_eq!(report.components[0].owner, "core");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ReportBuilder<'a> {
    resolver: &'a OwnershipResolver,
}

impl<'a> ReportBuilder<'a> {
    /// Create a builder resolving owners with `resolver`
    pub fn new(resolver: &'a OwnershipResolver) -> Self {
        Self { resolver }
    }

    /// One report per component, largest download first
    pub fn component_reports(&self, attribution: Attribution) -> Vec<ComponentReport> {
        let mut reports: Vec<ComponentReport> = attribution
            .into_iter()
            .map(|(component, files)| {
                let owner = self
                    .resolver
                    .owner_for_component(&component.name, component.component_type)
                    .to_string();

                let mut files: Vec<AppFile> = files
                    .into_iter()
                    .map(|file| {
                        let file_owner = self.resolver.owner_for_file(
                            &file.name,
                            &component.name,
                            component.component_type,
                        );
                        let file_owner = file_owner.to_string();
                        file.with_owner(file_owner)
                    })
                    .collect();
                sort_files(&mut files);

                let (download_size, install_size) = total_sizes(&files);
                ComponentReport {
                    name: component.name,
                    component_type: component.component_type,
                    owner,
                    download_size,
                    install_size,
                    files,
                }
            })
            .collect();

        reports.sort_by(|a, b| {
            b.download_size
                .cmp(&a.download_size)
                .then_with(|| a.name.cmp(&b.name))
        });
        reports
    }

    /// Report for one dynamic feature
    pub fn dynamic_feature(&self, name: &str, attribution: Attribution) -> DynamicFeatureReport {
        let components = self.component_reports(attribution);
        let (download_size, install_size) = component_totals(&components);
        DynamicFeatureReport {
            name: name.to_string(),
            owner: self.resolver.owner_for_feature(name).to_string(),
            download_size,
            install_size,
            components,
        }
    }

    /// Report for the base app plus its already-built feature reports
    pub fn app_report(
        &self,
        name: &str,
        attribution: Attribution,
        mut dynamic_features: Vec<DynamicFeatureReport>,
    ) -> AppReport {
        let components = self.component_reports(attribution);
        let (download_size, install_size) = component_totals(&components);
        dynamic_features.sort_by(|a, b| a.name.cmp(&b.name));
        AppReport {
            name: name.to_string(),
            download_size,
            install_size,
            components,
            dynamic_features,
        }
    }
}

fn sort_files(files: &mut [AppFile]) {
    files.sort_by(|a, b| {
        Reverse(a.download_size)
            .cmp(&Reverse(b.download_size))
            .then_with(|| a.name.cmp(&b.name))
    });
}

fn component_totals(components: &[ComponentReport]) -> (u64, u64) {
    components.iter().fold((0, 0), |(download, install), c| {
        (
            download.saturating_add(c.download_size),
            install.saturating_add(c.install_size),
        )
    })
}
