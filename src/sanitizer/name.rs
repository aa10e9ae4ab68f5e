//! Name deobfuscation seam
//!
//! Mapping tables are produced by the code shrinker; loading them from
//! shrinker output is handled elsewhere. The sanitizer only needs a lookup
//! that returns the original name unchanged when nothing is mapped.

use crate::infra::{FileSystem, RealFileSystem};
use crate::input::{read_json, InputError};
use serde::Deserialize;
use std::borrow::Cow;
use std::collections::HashMap;
use std::path::Path;

/// Resolves obfuscated class and resource names back to their originals
pub trait NameSanitizer: Sync {
    /// Original name of a compiled class
    fn class_name<'a>(&self, name: &'a str) -> Cow<'a, str>;

    /// Original path of a resource
    fn resource_name<'a>(&self, name: &'a str) -> Cow<'a, str>;
}

/// Leaves every name untouched
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityNameSanitizer;

impl NameSanitizer for IdentityNameSanitizer {
    fn class_name<'a>(&self, name: &'a str) -> Cow<'a, str> {
        Cow::Borrowed(name)
    }

    fn resource_name<'a>(&self, name: &'a str) -> Cow<'a, str> {
        Cow::Borrowed(name)
    }
}

/// In-memory deobfuscation tables keyed by obfuscated name
///
/// # Examples
///
/// ```
/// use bundle_ruler::sanitizer::{MappingNameSanitizer, NameSanitizer};
///
/// let names = MappingNameSanitizer::default().with_class("a.a", "com.example.Widget");
/// assert_eq!(names.class_name("a.a"), "com.example.Widget");
/// assert_eq!(names.class_name("a.b"), "a.b");
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MappingNameSanitizer {
    #[serde(default)]
    classes: HashMap<String, String>,
    #[serde(default)]
    resources: HashMap<String, String>,
}

impl MappingNameSanitizer {
    /// Load tables from a JSON file `{ "classes": {..}, "resources": {..} }`
    pub fn load(path: &Path) -> Result<Self, InputError> {
        Self::load_with_fs(path, &RealFileSystem)
    }

    /// Load tables with a custom filesystem implementation
    pub fn load_with_fs<FS: FileSystem>(path: &Path, fs: &FS) -> Result<Self, InputError> {
        read_json(path, fs)
    }

    /// Add a class mapping
    pub fn with_class(mut self, obfuscated: impl Into<String>, original: impl Into<String>) -> Self {
        self.classes.insert(obfuscated.into(), original.into());
        self
    }

    /// Add a resource mapping
    pub fn with_resource(
        mut self,
        obfuscated: impl Into<String>,
        original: impl Into<String>,
    ) -> Self {
        self.resources.insert(obfuscated.into(), original.into());
        self
    }
}

impl NameSanitizer for MappingNameSanitizer {
    fn class_name<'a>(&self, name: &'a str) -> Cow<'a, str> {
        lookup(&self.classes, name)
    }

    fn resource_name<'a>(&self, name: &'a str) -> Cow<'a, str> {
        lookup(&self.resources, name)
    }
}

fn lookup<'a>(table: &HashMap<String, String>, name: &'a str) -> Cow<'a, str> {
    match table.get(name) {
        Some(original) => Cow::Owned(original.clone()),
        None => Cow::Borrowed(name),
    }
}
