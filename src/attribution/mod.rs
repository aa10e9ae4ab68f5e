//! Attribution of app files to the build components that produced them
//!
//! Each file is matched against the dependency map by a per-type chain of
//! heuristics (see [`heuristics`]). Files no heuristic can place go to the
//! caller's default component, so every input file appears in exactly one
//! bucket of the result.

pub mod heuristics;

pub use heuristics::{DependencyIndex, MatchStage};

use crate::model::{AppFile, DependencyComponent, DependencyMap};
use log::debug;
use rayon::prelude::*;
use std::collections::HashMap;
use thiserror::Error;

/// Files grouped by the component they were attributed to
pub type Attribution = HashMap<DependencyComponent, Vec<AppFile>>;

/// Errors raised before attribution starts
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AttributionError {
    /// The fallback component has no name
    #[error("Default component must have a non-empty name")]
    EmptyDefaultComponent,

    /// A dependency map entry lists a component without a name
    #[error("Dependency map entry '{file}' lists a component with an empty name")]
    EmptyComponentName {
        /// Key of the malformed entry
        file: String,
    },
}

/// Assigns every file to exactly one component
///
/// # Examples
///
/// ```
/// use bundle_ruler::attribution::Attributor;
/// use bundle_ruler::model::{AppFile, DependencyComponent, DependencyMap, FileType};
///
/// let mut deps = DependencyMap::new();
/// deps.insert("com.a.B", DependencyComponent::internal(":feature"));
///
/// let files = vec![
///     AppFile::new("com.a.B_Factory", FileType::Class, 10, 20),
///     AppFile::new("com.z.Unknown", FileType::Class, 5, 5),
/// ];
///
/// let attributor = Attributor::new(DependencyComponent::internal(":app"));
/// let attribution = attributor.attribute(&files, &deps)?;
///
/// assert_eq!(attribution[&DependencyComponent::internal(":feature")].len(), 1);
/// assert_eq!(attribution[&DependencyComponent::internal(":app")].len(), 1);
/// # Ok::<(), bundle_ruler::attribution::AttributionError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Attributor {
    default_component: DependencyComponent,
    chunk_size: usize,
}

impl Attributor {
    /// Files handed to one worker at a time
    pub const DEFAULT_CHUNK_SIZE: usize = 1024;

    /// Create an attributor that places unmatched files in `default_component`
    pub fn new(default_component: DependencyComponent) -> Self {
        Self {
            default_component,
            chunk_size: Self::DEFAULT_CHUNK_SIZE,
        }
    }

    /// Override the number of files per parallel work unit
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// The fallback component
    pub fn default_component(&self) -> &DependencyComponent {
        &self.default_component
    }

    /// Group `files` by owning component
    ///
    /// Input order is kept within each component's file list.
    pub fn attribute(
        &self,
        files: &[AppFile],
        deps: &DependencyMap,
    ) -> Result<Attribution, AttributionError> {
        self.validate(deps)?;
        let index = DependencyIndex::new(deps);

        let partials: Vec<(Attribution, usize)> = files
            .par_chunks(self.chunk_size)
            .map(|chunk| {
                let mut local = Attribution::new();
                let mut fallbacks = 0;
                for file in chunk {
                    let (component, stage) = self.resolve(file, &index);
                    if stage == MatchStage::Default {
                        fallbacks += 1;
                    }
                    local
                        .entry(component.clone())
                        .or_default()
                        .push(file.clone());
                }
                (local, fallbacks)
            })
            .collect();

        let mut attribution = Attribution::new();
        let mut fallbacks = 0;
        for (local, local_fallbacks) in partials {
            fallbacks += local_fallbacks;
            for (component, component_files) in local {
                attribution
                    .entry(component)
                    .or_default()
                    .extend(component_files);
            }
        }

        debug!(
            "Attributed {} files to {} components ({} to default '{}')",
            files.len(),
            attribution.len(),
            fallbacks,
            self.default_component.name
        );
        Ok(attribution)
    }

    /// Component for a single file, with the heuristic stage that matched
    pub fn resolve<'a>(
        &'a self,
        file: &AppFile,
        index: &DependencyIndex<'a>,
    ) -> (&'a DependencyComponent, MatchStage) {
        heuristics::resolve(&file.name, file.file_type, index)
            .unwrap_or((&self.default_component, MatchStage::Default))
    }

    fn validate(&self, deps: &DependencyMap) -> Result<(), AttributionError> {
        if self.default_component.name.is_empty() {
            return Err(AttributionError::EmptyDefaultComponent);
        }
        for (file, components) in deps.iter() {
            if components.iter().any(|c| c.name.is_empty()) {
                return Err(AttributionError::EmptyComponentName {
                    file: file.to_string(),
                });
            }
        }
        Ok(())
    }
}
