//! Build components and the file-to-component dependency map

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Whether a component is built from the project's own sources
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComponentType {
    /// Module of the project itself (e.g. `:lib:core`)
    Internal,
    /// External library coordinate (e.g. `com.squareup:okio:3.0.0`)
    External,
}

/// A build component that can contribute files to the app
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DependencyComponent {
    /// Stable identifier (module path or external coordinate)
    pub name: String,
    /// Internal or external
    #[serde(rename = "type")]
    pub component_type: ComponentType,
}

impl DependencyComponent {
    /// Create a new component
    pub fn new(name: impl Into<String>, component_type: ComponentType) -> Self {
        Self {
            name: name.into(),
            component_type,
        }
    }

    /// Create an internal component
    pub fn internal(name: impl Into<String>) -> Self {
        Self::new(name, ComponentType::Internal)
    }

    /// Create an external component
    pub fn external(name: impl Into<String>) -> Self {
        Self::new(name, ComponentType::External)
    }
}

/// Index from file name to every component that could have contributed it.
///
/// Class keys are fully qualified class names. Resource, asset and native
/// library keys are relative to their root directory (`drawable/icon.png`,
/// `fonts/a.ttf`, `arm64-v8a/libfoo.so`). Other files use the full archive
/// path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DependencyMap {
    entries: HashMap<String, Vec<DependencyComponent>>,
}

impl DependencyMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `component` as a candidate owner of `file`
    pub fn insert(&mut self, file: impl Into<String>, component: DependencyComponent) {
        self.entries.entry(file.into()).or_default().push(component);
    }

    /// All candidates for `file`
    pub fn get(&self, file: &str) -> Option<&[DependencyComponent]> {
        self.entries.get(file).map(Vec::as_slice)
    }

    /// The candidate for `file` if exactly one component claims it
    ///
    /// # Examples
    ///
    /// ```
    /// use bundle_ruler::model::{DependencyComponent, DependencyMap};
    ///
    /// let mut deps = DependencyMap::new();
    /// deps.insert("com.a.B", DependencyComponent::internal(":a"));
    /// deps.insert("com.a.C", DependencyComponent::internal(":a"));
    /// deps.insert("com.a.C", DependencyComponent::internal(":b"));
    ///
    /// assert_eq!(deps.single("com.a.B").map(|c| c.name.as_str()), Some(":a"));
    /// assert!(deps.single("com.a.C").is_none());
    /// assert!(deps.single("com.a.D").is_none());
    /// ```
    pub fn single(&self, file: &str) -> Option<&DependencyComponent> {
        match self.entries.get(file).map(Vec::as_slice) {
            Some([component]) => Some(component),
            _ => None,
        }
    }

    /// Iterate over `(file, candidates)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[DependencyComponent])> {
        self.entries
            .iter()
            .map(|(file, components)| (file.as_str(), components.as_slice()))
    }

    /// Number of file keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map has no keys
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, Vec<DependencyComponent>)> for DependencyMap {
    fn from_iter<T: IntoIterator<Item = (String, Vec<DependencyComponent>)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
