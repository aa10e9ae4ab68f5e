//! Analyze command implementation
//!
//! Handles the `bundle-ruler analyze` command: sanitize the base listing
//! and every dynamic-feature listing, attribute files to components,
//! resolve owners and print the resulting app report.

use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crate::attribution::{Attribution, Attributor};
use crate::cicd::BudgetChecker;
use crate::config::{ConfigFile, ConfigLoader, CONFIG_FILE_NAME};
use crate::error::RulerError;
use crate::fmt::MICROSCOPE;
use crate::input::{load_dependency_map, ArchiveListing};
use crate::model::{DependencyComponent, DependencyMap};
use crate::ownership::{load_ownership_entries, OwnershipResolver};
use crate::report::{console::print_app_report, AppReport, ReportBuilder};
use crate::sanitizer::{MappingNameSanitizer, SizeSanitizer};

/// A dynamic feature given as `name=listing.json`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureListing {
    /// Feature name
    pub name: String,
    /// Archive listing of the feature's split
    pub listing: PathBuf,
}

impl FromStr for FeatureListing {
    type Err = RulerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('=') {
            Some((name, listing)) if !name.is_empty() && !listing.is_empty() => Ok(Self {
                name: name.to_string(),
                listing: PathBuf::from(listing),
            }),
            _ => Err(RulerError::InvalidFeatureArg { arg: s.to_string() }),
        }
    }
}

/// Inputs and overrides for one analysis run
#[derive(Debug, Clone, Default)]
pub struct AnalyzeOptions {
    /// Base app listing
    pub listing: PathBuf,
    /// Dependency map
    pub deps: PathBuf,
    /// Dynamic feature listings
    pub features: Vec<FeatureListing>,
    /// Ownership rules, overriding the config file
    pub ownership: Option<PathBuf>,
    /// Deobfuscation tables
    pub mapping: Option<PathBuf>,
    /// Default owner, overriding the config file
    pub default_owner: Option<String>,
    /// Default component, overriding the config file
    pub default_component: Option<String>,
    /// Verify the configured size budget
    pub check: bool,
    /// Print the report as JSON
    pub json: bool,
    /// Components listed per section in console output
    pub top: usize,
}

/// Analyze an app and its dynamic features
///
/// # Examples
///
/// ```no_run
/// use bundle_ruler::cmd::analyze::{cmd_analyze, AnalyzeOptions};
///
/// cmd_analyze(&AnalyzeOptions {
///     listing: "base.json".into(),
///     deps: "deps.json".into(),
///     top: 20,
///     ..AnalyzeOptions::default()
/// })?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn cmd_analyze(options: &AnalyzeOptions) -> Result<()> {
    let project_root = env::current_dir()?;
    let config = ConfigLoader::load(&project_root)?;

    let spinner = if options.json {
        ProgressBar::hidden()
    } else {
        println!("{}{}", MICROSCOPE, style("bundle-ruler analyze").bold());
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(ProgressStyle::with_template("{spinner:.cyan} {msg}")?);
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner
    };

    let result = build_report(options, &config, &project_root, &spinner);
    spinner.finish_and_clear();
    let report = result?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_app_report(&report, options.top);
    }

    if options.check {
        check_budget(&report, &config, &project_root, options.json)?;
    }

    Ok(())
}

/// Run every analysis stage and assemble the app report
pub fn build_report(
    options: &AnalyzeOptions,
    config: &ConfigFile,
    project_root: &Path,
    progress: &ProgressBar,
) -> Result<AppReport> {
    progress.set_message("Loading inputs");
    let deps = load_dependency_map(&options.deps).map_err(RulerError::from)?;
    let names = match &options.mapping {
        Some(path) => MappingNameSanitizer::load(path).map_err(RulerError::from)?,
        None => MappingNameSanitizer::default(),
    };
    let sanitizer = SizeSanitizer::with_names(names);

    let default_owner = options
        .default_owner
        .clone()
        .unwrap_or_else(|| config.default_owner.clone());
    let ownership_file = options
        .ownership
        .clone()
        .or_else(|| ConfigLoader::ownership_path(config, project_root));
    let resolver = match ownership_file {
        Some(path) => OwnershipResolver::new(
            load_ownership_entries(&path).map_err(RulerError::from)?,
            default_owner,
        ),
        None => OwnershipResolver::empty(default_owner),
    };

    let default_component = options
        .default_component
        .clone()
        .unwrap_or_else(|| config.default_component.clone());
    let attributor = Attributor::new(DependencyComponent::internal(default_component));
    let builder = ReportBuilder::new(&resolver);

    progress.set_message("Attributing base app");
    let base = attribute_listing(&options.listing, &sanitizer, &attributor, &deps)?;

    let mut features = Vec::with_capacity(options.features.len());
    for feature in &options.features {
        progress.set_message(format!("Attributing feature '{}'", feature.name));
        let attribution = attribute_listing(&feature.listing, &sanitizer, &attributor, &deps)
            .with_context(|| format!("Failed to analyze dynamic feature '{}'", feature.name))?;
        features.push(builder.dynamic_feature(&feature.name, attribution));
    }

    let app_name = config
        .app_name
        .clone()
        .or_else(|| {
            options
                .listing
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| "app".to_string());

    let report = builder.app_report(&app_name, base, features);
    info!(
        "Report for '{}': {} components, {} dynamic features",
        report.name,
        report.components.len(),
        report.dynamic_features.len()
    );
    Ok(report)
}

fn attribute_listing(
    path: &Path,
    sanitizer: &SizeSanitizer<MappingNameSanitizer>,
    attributor: &Attributor,
    deps: &DependencyMap,
) -> Result<Attribution> {
    let entries = ArchiveListing::load(path)
        .and_then(ArchiveListing::into_entries)
        .map_err(RulerError::from)?;
    let files = sanitizer.sanitize(&entries).map_err(RulerError::from)?;
    let attribution = attributor
        .attribute(&files, deps)
        .map_err(RulerError::from)?;
    Ok(attribution)
}

fn check_budget(
    report: &AppReport,
    config: &ConfigFile,
    project_root: &Path,
    json: bool,
) -> Result<()> {
    let budget = config
        .size_budget
        .clone()
        .ok_or_else(|| RulerError::BudgetNotConfigured {
            path: project_root.join(CONFIG_FILE_NAME),
        })?;

    let size = budget.measure(report.download_size, report.install_size);
    let checker = BudgetChecker::new(budget);
    if !json {
        checker.check(size).print();
    }
    checker.enforce(size)?;
    Ok(())
}
