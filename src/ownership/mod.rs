//! Ownership resolution for components, dynamic features and files
//!
//! Rules are loaded once (see [`loader`]) and split into exact rules and
//! wildcard rules. An identifier ending in [`WILDCARD`] matches anything
//! starting with the text before it; when several wildcard rules match,
//! the longest prefix wins so that `a.b.*` overrides `a.*`.

pub mod loader;

pub use loader::{load_ownership_entries, load_ownership_entries_with_fs, OwnershipError};

use crate::model::ComponentType;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Trailing marker of a prefix rule
pub const WILDCARD: char = '*';

/// Owner used when no rule matches and none is configured
pub const DEFAULT_OWNER: &str = "unknown";

/// A single `{identifier, owner}` rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnershipEntry {
    /// Exact identifier, or a prefix followed by `*`
    pub identifier: String,
    /// Team or person responsible
    pub owner: String,
}

impl OwnershipEntry {
    /// Create a rule
    pub fn new(identifier: impl Into<String>, owner: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            owner: owner.into(),
        }
    }
}

/// Read-only rule set answering "who owns this?"
///
/// # Examples
///
/// ```
/// use bundle_ruler::ownership::{OwnershipEntry, OwnershipResolver};
/// use bundle_ruler::model::ComponentType;
///
/// let resolver = OwnershipResolver::new(
///     vec![OwnershipEntry::new("a.*", "X"), OwnershipEntry::new("a.b.*", "Y")],
///     "unknown",
/// );
///
/// assert_eq!(resolver.owner_for_component("a.b.c", ComponentType::Internal), "Y");
/// assert_eq!(resolver.owner_for_component("a.z", ComponentType::Internal), "X");
/// assert_eq!(resolver.owner_for_component("other", ComponentType::Internal), "unknown");
/// ```
#[derive(Debug, Clone)]
pub struct OwnershipResolver {
    exact: HashMap<String, String>,
    wildcards: Vec<(String, String)>,
    default_owner: String,
}

impl OwnershipResolver {
    /// Build a resolver from rules; earlier rules win duplicate identifiers
    pub fn new(
        entries: impl IntoIterator<Item = OwnershipEntry>,
        default_owner: impl Into<String>,
    ) -> Self {
        let mut exact = HashMap::new();
        let mut wildcards = Vec::new();

        for entry in entries {
            match entry.identifier.strip_suffix(WILDCARD) {
                Some(prefix) => wildcards.push((prefix.to_string(), entry.owner)),
                None => {
                    exact.entry(entry.identifier).or_insert(entry.owner);
                }
            }
        }

        debug!(
            "Loaded {} exact and {} wildcard ownership rules",
            exact.len(),
            wildcards.len()
        );

        Self {
            exact,
            wildcards,
            default_owner: default_owner.into(),
        }
    }

    /// Resolver with no rules
    pub fn empty(default_owner: impl Into<String>) -> Self {
        Self::new(Vec::new(), default_owner)
    }

    /// Owner returned when nothing matches
    pub fn default_owner(&self) -> &str {
        &self.default_owner
    }

    /// Owner of a component
    ///
    /// External coordinates are also matched without their version, so a
    /// rule for `com.squareup:okio` covers `com.squareup:okio:3.0.0`.
    pub fn owner_for_component(&self, name: &str, component_type: ComponentType) -> &str {
        self.exact_owner(name)
            .or_else(|| match component_type {
                ComponentType::External => self.exact_owner(strip_version(name)),
                ComponentType::Internal => None,
            })
            .or_else(|| self.wildcard_owner(name))
            .unwrap_or(self.default_owner.as_str())
    }

    /// Owner of a dynamic feature
    pub fn owner_for_feature(&self, name: &str) -> &str {
        self.exact_owner(name)
            .or_else(|| self.wildcard_owner(name))
            .unwrap_or(self.default_owner.as_str())
    }

    /// Owner of a file: an exact or wildcard rule for the file itself,
    /// otherwise the owner of the component it was attributed to
    pub fn owner_for_file(
        &self,
        file_name: &str,
        component_name: &str,
        component_type: ComponentType,
    ) -> &str {
        self.exact_owner(file_name)
            .or_else(|| self.wildcard_owner(file_name))
            .unwrap_or_else(|| self.owner_for_component(component_name, component_type))
    }

    fn exact_owner(&self, identifier: &str) -> Option<&str> {
        self.exact.get(identifier).map(String::as_str)
    }

    fn wildcard_owner(&self, identifier: &str) -> Option<&str> {
        self.wildcards
            .iter()
            .filter(|(prefix, _)| identifier.starts_with(prefix.as_str()))
            .fold(None, |best: Option<&(String, String)>, rule| match best {
                Some(current) if current.0.len() >= rule.0.len() => Some(current),
                _ => Some(rule),
            })
            .map(|(_, owner)| owner.as_str())
    }
}

fn strip_version(coordinate: &str) -> &str {
    coordinate
        .rsplit_once(':')
        .map_or(coordinate, |(unversioned, _)| unversioned)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver(rules: &[(&str, &str)]) -> OwnershipResolver {
        OwnershipResolver::new(
            rules.iter().map(|(id, owner)| OwnershipEntry::new(*id, *owner)),
            DEFAULT_OWNER,
        )
    }

    #[test]
    fn test_longest_wildcard_prefix_wins() {
        let resolver = resolver(&[("a.*", "X"), ("a.b.*", "Y")]);
        assert_eq!(resolver.owner_for_component("a.b.c", ComponentType::Internal), "Y");
        assert_eq!(resolver.owner_for_component("a.z", ComponentType::Internal), "X");
    }

    #[test]
    fn test_longest_wildcard_prefix_wins_regardless_of_order() {
        let resolver = resolver(&[("a.b.*", "Y"), ("a.*", "X")]);
        assert_eq!(resolver.owner_for_component("a.b.c", ComponentType::Internal), "Y");
    }

    #[test]
    fn test_equal_wildcard_prefixes_keep_first_registered() {
        let resolver = resolver(&[(":lib:*", "first"), (":lib:*", "second")]);
        assert_eq!(resolver.owner_for_feature(":lib:core"), "first");
    }

    #[test]
    fn test_unknown_component_returns_default_owner() {
        let resolver = resolver(&[]);
        assert_eq!(
            resolver.owner_for_component(":anything", ComponentType::Internal),
            "unknown"
        );
    }

    #[test]
    fn test_exact_rule_beats_wildcard() {
        let resolver = resolver(&[(":feature:*", "broad"), (":feature:chat", "chat-team")]);
        assert_eq!(
            resolver.owner_for_component(":feature:chat", ComponentType::Internal),
            "chat-team"
        );
        assert_eq!(
            resolver.owner_for_component(":feature:home", ComponentType::Internal),
            "broad"
        );
    }

    #[test]
    fn test_external_component_matches_without_version() {
        let resolver = resolver(&[("com.squareup:okio", "platform")]);
        assert_eq!(
            resolver.owner_for_component("com.squareup:okio:3.0.0", ComponentType::External),
            "platform"
        );
        // Internal components are never version-stripped
        assert_eq!(
            resolver.owner_for_component("com.squareup:okio:3.0.0", ComponentType::Internal),
            "unknown"
        );
    }

    #[test]
    fn test_file_rule_then_component_owner() {
        let resolver = resolver(&[("/assets/big.bin", "media"), (":app", "core")]);
        assert_eq!(
            resolver.owner_for_file("/assets/big.bin", ":app", ComponentType::Internal),
            "media"
        );
        assert_eq!(
            resolver.owner_for_file("/assets/small.bin", ":app", ComponentType::Internal),
            "core"
        );
    }

    #[test]
    fn test_file_wildcard_beats_component_owner() {
        let resolver = resolver(&[("com.spotify.music.*", "music-team"), (":app", "core")]);
        assert_eq!(
            resolver.owner_for_file("com.spotify.music.Player", ":app", ComponentType::Internal),
            "music-team"
        );
        assert_eq!(
            resolver.owner_for_file("com.spotify.login.Form", ":app", ComponentType::Internal),
            "core"
        );
    }

    #[test]
    fn test_file_wildcard_longest_prefix_wins() {
        let resolver = resolver(&[
            ("com.spotify.*", "platform"),
            ("com.spotify.music.*", "music-team"),
        ]);
        assert_eq!(
            resolver.owner_for_file("com.spotify.music.Player", ":app", ComponentType::Internal),
            "music-team"
        );
        assert_eq!(
            resolver.owner_for_file("com.spotify.Core", ":app", ComponentType::Internal),
            "platform"
        );
    }

    #[test]
    fn test_file_exact_rule_beats_file_wildcard() {
        let resolver = resolver(&[("com.spotify.*", "platform"), ("com.spotify.Main", "core")]);
        assert_eq!(
            resolver.owner_for_file("com.spotify.Main", ":app", ComponentType::Internal),
            "core"
        );
    }

    #[test]
    fn test_feature_owner_uses_wildcards() {
        let resolver = resolver(&[("dynamic_*", "features")]);
        assert_eq!(resolver.owner_for_feature("dynamic_camera"), "features");
        assert_eq!(resolver.owner_for_feature("camera"), "unknown");
    }

    #[test]
    fn test_duplicate_exact_rules_keep_first() {
        let resolver = resolver(&[(":app", "first"), (":app", "second")]);
        assert_eq!(resolver.owner_for_feature(":app"), "first");
    }

    #[test]
    fn test_bare_wildcard_matches_everything() {
        let resolver = resolver(&[("*", "everyone")]);
        assert_eq!(resolver.owner_for_feature("x"), "everyone");
    }
}
