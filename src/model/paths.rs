//! Well-known archive paths

/// Root of Android resources
pub const RESOURCE_ROOT: &str = "/res/";

/// Root of raw assets
pub const ASSET_ROOT: &str = "/assets/";

/// Root of native libraries
pub const NATIVE_LIB_ROOT: &str = "/lib/";

/// Top-level descriptor present once per physical fragment
pub const MANIFEST: &str = "/AndroidManifest.xml";

/// Compiled resource table, split per module across fragments
pub const RESOURCE_TABLE: &str = "/resources.arsc";

/// Manifest injected by the packaging toolchain
pub const TOOLCHAIN_MANIFEST: &str = "/META-INF/MANIFEST.MF";

/// Numbered split descriptors injected by the packaging toolchain
pub const SPLIT_DESCRIPTOR_PATTERN: &str = r"^/res/xml/splits[0-9]+\.xml$";
