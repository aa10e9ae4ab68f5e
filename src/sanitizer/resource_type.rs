//! Resource and file type classification by path

use crate::model::paths::{ASSET_ROOT, NATIVE_LIB_ROOT, RESOURCE_ROOT};
use crate::model::{FileType, ResourceType};

/// Classify a resource by the directory directly under the resource root.
///
/// Returns `None` for paths outside the resource root.
///
/// # Examples
///
/// ```
/// use bundle_ruler::model::ResourceType;
/// use bundle_ruler::sanitizer::classify_resource;
///
/// assert_eq!(classify_resource("/res/drawable-xxhdpi-v4/icon.png"), Some(ResourceType::Drawable));
/// assert_eq!(classify_resource("/res/anim/fade.xml"), Some(ResourceType::Other));
/// assert_eq!(classify_resource("/assets/fonts/a.ttf"), None);
/// ```
pub fn classify_resource(name: &str) -> Option<ResourceType> {
    let relative = name.strip_prefix(RESOURCE_ROOT)?;
    let Some((directory, _)) = relative.split_once('/') else {
        return Some(ResourceType::Other);
    };

    // Qualifiers follow the base directory name: drawable-xxhdpi-v4
    let base = directory.split('-').next().unwrap_or(directory);
    Some(match base {
        "drawable" => ResourceType::Drawable,
        "layout" => ResourceType::Layout,
        "raw" => ResourceType::Raw,
        "values" => ResourceType::Values,
        "font" => ResourceType::Font,
        _ => ResourceType::Other,
    })
}

/// Assign a file type from the archive path prefix
pub fn file_type_for_path(name: &str) -> FileType {
    if name.starts_with(RESOURCE_ROOT) {
        FileType::Resource
    } else if name.starts_with(ASSET_ROOT) {
        FileType::Asset
    } else if name.starts_with(NATIVE_LIB_ROOT) {
        FileType::NativeLib
    } else {
        FileType::Other
    }
}
