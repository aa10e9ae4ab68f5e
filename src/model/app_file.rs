//! Canonical file records produced by sanitization

use serde::{Deserialize, Serialize};

/// Broad category of a sanitized file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FileType {
    /// Compiled class unpacked from a compiled-code container
    Class,
    /// Android resource under `/res/`
    Resource,
    /// Raw asset under `/assets/`
    Asset,
    /// Native library under `/lib/`
    NativeLib,
    /// Anything else (metadata, manifests, ...)
    Other,
}

/// Resource category derived from the resource directory name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResourceType {
    /// `drawable*` directories
    Drawable,
    /// `layout*` directories
    Layout,
    /// `raw*` directories
    Raw,
    /// `values*` directories
    Values,
    /// `font*` directories
    Font,
    /// Any other resource directory
    Other,
}

/// A single reporting-ready file of the app
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppFile {
    /// Canonical name (class name or archive path)
    pub name: String,
    /// File category
    #[serde(rename = "type")]
    pub file_type: FileType,
    /// Compressed size in bytes
    pub download_size: u64,
    /// Uncompressed size in bytes
    pub install_size: u64,
    /// Resolved owner, filled in during report aggregation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    /// Resource category for resource files
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<ResourceType>,
}

impl AppFile {
    /// Create a file without owner or resource type
    pub fn new(
        name: impl Into<String>,
        file_type: FileType,
        download_size: u64,
        install_size: u64,
    ) -> Self {
        Self {
            name: name.into(),
            file_type,
            download_size,
            install_size,
            owner: None,
            resource_type: None,
        }
    }

    /// Set the resource category
    pub fn with_resource_type(mut self, resource_type: Option<ResourceType>) -> Self {
        self.resource_type = resource_type;
        self
    }

    /// Set the owner
    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_type_serializes_in_screaming_snake_case() {
        let json = serde_json::to_string(&FileType::NativeLib).unwrap();
        assert_eq!(json, "\"NATIVE_LIB\"");
    }

    #[test]
    fn test_app_file_json_omits_missing_optionals() {
        let file = AppFile::new("/assets/a.bin", FileType::Asset, 1, 2);
        let json = serde_json::to_string(&file).unwrap();
        assert!(json.contains("\"type\":\"ASSET\""));
        assert!(json.contains("\"downloadSize\":1"));
        assert!(!json.contains("owner"));
        assert!(!json.contains("resourceType"));
    }

    #[test]
    fn test_app_file_builders_set_optional_fields() {
        let file = AppFile::new("/res/layout/a.xml", FileType::Resource, 1, 2)
            .with_resource_type(Some(ResourceType::Layout))
            .with_owner("team-ui");
        assert_eq!(file.resource_type, Some(ResourceType::Layout));
        assert_eq!(file.owner.as_deref(), Some("team-ui"));
    }
}
