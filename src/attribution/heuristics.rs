//! Matching heuristics mapping a file name to its owning component
//!
//! Every heuristic is a pure function over a [`DependencyIndex`] and is
//! tried in the order given by [`chain_for`]. The first one returning a
//! component wins.

use crate::model::paths::{ASSET_ROOT, NATIVE_LIB_ROOT, RESOURCE_ROOT};
use crate::model::{DependencyComponent, DependencyMap, FileType};
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Suffix of generated factory classes (`Foo_Factory` constructs `Foo`)
pub const FACTORY_SUFFIX: &str = "_Factory";

/// Marker of generated provider classes (`FooModule_ProvideBarFactory`)
pub const PROVIDER_MARKER: &str = "_Provide";

/// Marker of desugared lambda classes (`com.a.-$$Lambda$Foo$1`)
pub const LAMBDA_MARKER: &str = "-$$Lambda$";

/// Marker of compiler-synthesized classes (`com.a.Foo$$ExternalSyntheticLambda0`)
pub const EXTERNAL_SYNTHETIC_MARKER: &str = "$$ExternalSynthetic";

/// Infix of native libraries recompressed for on-device storage
pub const COMPRESSED_LIB_INFIX: &str = ".xz";

static VECTOR_OUTPUT_RE: OnceLock<Regex> = OnceLock::new();

// Inline vector resources are split into `$name__<n>.xml` outputs
fn vector_output_re() -> &'static Regex {
    VECTOR_OUTPUT_RE.get_or_init(|| {
        // SAFETY: constant pattern, covered by tests
        Regex::new(r"^(?P<dir>.*/)?\$(?P<base>[^/]+)__[0-9]+(?P<ext>\.[^./]+)$")
            .expect("vector output regex is valid")
    })
}

/// Heuristic stage that resolved a file, for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchStage {
    /// Name (relative to its root) claimed by exactly one component
    Exact,
    /// Generated factory resolved through the class it constructs
    FactorySuffix,
    /// Generated provider resolved through its module class
    ProviderMarker,
    /// Desugared lambda resolved through its package
    Lambda,
    /// Synthesized class resolved through its simple class name
    ExternalSynthetic,
    /// Class resolved through its package
    Package,
    /// Resource resolved without its last directory qualifier
    Unqualified,
    /// Generated vector output resolved through its source resource
    VectorSource,
    /// Ambiguous resource assigned to its first candidate
    Guess,
    /// Native library resolved without its compression infix
    Decompressed,
    /// No heuristic matched; the fallback component was used
    Default,
}

/// Read-only lookup tables over a dependency map, built once per attribution
#[derive(Debug)]
pub struct DependencyIndex<'a> {
    deps: &'a DependencyMap,
    packages: HashMap<&'a str, Vec<&'a DependencyComponent>>,
    simple_names: HashMap<&'a str, Vec<&'a DependencyComponent>>,
}

impl<'a> DependencyIndex<'a> {
    /// Index every key of `deps` by package and by simple name
    pub fn new(deps: &'a DependencyMap) -> Self {
        let mut packages: HashMap<&str, Vec<&DependencyComponent>> = HashMap::new();
        let mut simple_names: HashMap<&str, Vec<&DependencyComponent>> = HashMap::new();

        for (key, components) in deps.iter() {
            if let Some(package) = package_of(key) {
                add_distinct(packages.entry(package).or_default(), components);
            }
            add_distinct(simple_names.entry(simple_name_of(key)).or_default(), components);
        }

        Self {
            deps,
            packages,
            simple_names,
        }
    }

    /// Component of `key` if exactly one component claims it
    pub fn single(&self, key: &str) -> Option<&'a DependencyComponent> {
        self.deps.single(key)
    }

    /// First candidate of `key`, even if several components claim it
    pub fn first(&self, key: &str) -> Option<&'a DependencyComponent> {
        self.deps.get(key).and_then(<[_]>::first)
    }

    /// The one component owning every class of `package`
    pub fn by_package(&self, package: &str) -> Option<&'a DependencyComponent> {
        unique(self.packages.get(package)?)
    }

    /// The one component owning every class with this simple name
    pub fn by_simple_name(&self, simple_name: &str) -> Option<&'a DependencyComponent> {
        unique(self.simple_names.get(simple_name)?)
    }
}

fn add_distinct<'a>(
    target: &mut Vec<&'a DependencyComponent>,
    components: &'a [DependencyComponent],
) {
    for component in components {
        if !target.contains(&component) {
            target.push(component);
        }
    }
}

fn unique<'a>(components: &[&'a DependencyComponent]) -> Option<&'a DependencyComponent> {
    match components {
        [component] => Some(component),
        _ => None,
    }
}

fn package_of(class_name: &str) -> Option<&str> {
    class_name.rsplit_once('.').map(|(package, _)| package)
}

fn simple_name_of(class_name: &str) -> &str {
    class_name.rsplit('.').next().unwrap_or(class_name)
}

/// A single matching strategy
pub type Heuristic = for<'a> fn(&str, &DependencyIndex<'a>) -> Option<&'a DependencyComponent>;

const CLASS_CHAIN: &[(MatchStage, Heuristic)] = &[
    (MatchStage::Exact, exact),
    (MatchStage::FactorySuffix, factory_class),
    (MatchStage::ProviderMarker, provider_class),
    (MatchStage::Lambda, lambda_class),
    (MatchStage::ExternalSynthetic, external_synthetic_class),
    (MatchStage::Package, package_class),
];

const RESOURCE_CHAIN: &[(MatchStage, Heuristic)] = &[
    (MatchStage::Exact, exact_resource),
    (MatchStage::Unqualified, unqualified_resource),
    (MatchStage::VectorSource, vector_source_resource),
    (MatchStage::Guess, guessed_resource),
];

const ASSET_CHAIN: &[(MatchStage, Heuristic)] = &[(MatchStage::Exact, exact_asset)];

const NATIVE_LIB_CHAIN: &[(MatchStage, Heuristic)] = &[
    (MatchStage::Exact, exact_native_lib),
    (MatchStage::Decompressed, decompressed_native_lib),
];

const OTHER_CHAIN: &[(MatchStage, Heuristic)] = &[(MatchStage::Exact, exact)];

/// Ordered heuristics for a file type
pub fn chain_for(file_type: FileType) -> &'static [(MatchStage, Heuristic)] {
    match file_type {
        FileType::Class => CLASS_CHAIN,
        FileType::Resource => RESOURCE_CHAIN,
        FileType::Asset => ASSET_CHAIN,
        FileType::NativeLib => NATIVE_LIB_CHAIN,
        FileType::Other => OTHER_CHAIN,
    }
}

/// Run the chain for `file_type` and report the stage that matched
pub fn resolve<'a>(
    name: &str,
    file_type: FileType,
    index: &DependencyIndex<'a>,
) -> Option<(&'a DependencyComponent, MatchStage)> {
    chain_for(file_type)
        .iter()
        .find_map(|(stage, heuristic)| heuristic(name, index).map(|c| (c, *stage)))
}

/// Single match on the raw name
pub fn exact<'a>(name: &str, index: &DependencyIndex<'a>) -> Option<&'a DependencyComponent> {
    index.single(name)
}

/// `com.a.Foo_Factory` resolves like `com.a.Foo`
pub fn factory_class<'a>(
    name: &str,
    index: &DependencyIndex<'a>,
) -> Option<&'a DependencyComponent> {
    index.single(name.strip_suffix(FACTORY_SUFFIX)?)
}

/// `com.a.FooModule_ProvideBarFactory` resolves like `com.a.FooModule`
pub fn provider_class<'a>(
    name: &str,
    index: &DependencyIndex<'a>,
) -> Option<&'a DependencyComponent> {
    let (module, _) = name.split_once(PROVIDER_MARKER)?;
    index.single(module)
}

/// `com.a.-$$Lambda$Foo$1` resolves through package `com.a`
pub fn lambda_class<'a>(
    name: &str,
    index: &DependencyIndex<'a>,
) -> Option<&'a DependencyComponent> {
    let (prefix, _) = name.split_once(LAMBDA_MARKER)?;
    index.by_package(prefix.trim_end_matches('.'))
}

/// `com.a.Foo$$ExternalSyntheticLambda0` resolves through any class named `Foo`
pub fn external_synthetic_class<'a>(
    name: &str,
    index: &DependencyIndex<'a>,
) -> Option<&'a DependencyComponent> {
    let (outer, _) = name.split_once(EXTERNAL_SYNTHETIC_MARKER)?;
    index.by_simple_name(simple_name_of(outer))
}

/// Resolve through every class sharing the package of `name`
pub fn package_class<'a>(
    name: &str,
    index: &DependencyIndex<'a>,
) -> Option<&'a DependencyComponent> {
    index.by_package(package_of(name)?)
}

fn relative_to<'n>(name: &'n str, root: &str) -> &'n str {
    name.strip_prefix(root).unwrap_or(name)
}

/// Drop the last dash-delimited qualifier of the resource directory:
/// `drawable-xhdpi-v4/icon.png` becomes `drawable-xhdpi/icon.png`
pub fn strip_qualifier(path: &str) -> Option<String> {
    let (directory, file) = path.rsplit_once('/')?;
    let segment_start = directory.rfind('/').map_or(0, |i| i + 1);
    let dash = directory[segment_start..].rfind('-')? + segment_start;
    Some(format!("{}/{}", &directory[..dash], file))
}

/// Collapse a generated vector output back to its source:
/// `drawable/$ic_logo__0.xml` becomes `drawable/ic_logo.xml`
pub fn collapse_vector_output(path: &str) -> Option<String> {
    let captures = vector_output_re().captures(path)?;
    Some(format!(
        "{}{}{}",
        captures.name("dir").map_or("", |m| m.as_str()),
        &captures["base"],
        &captures["ext"]
    ))
}

fn resource_keys(name: &str) -> Vec<String> {
    let relative = relative_to(name, RESOURCE_ROOT);
    let mut keys = vec![relative.to_string()];
    keys.extend(strip_qualifier(relative));
    keys.extend(resource_vector_keys(relative));
    keys
}

fn resource_vector_keys(relative: &str) -> Vec<String> {
    let mut keys: Vec<String> = collapse_vector_output(relative).into_iter().collect();
    if let Some(unqualified) = strip_qualifier(relative) {
        keys.extend(collapse_vector_output(&unqualified));
    }
    keys
}

fn exact_resource<'a>(
    name: &str,
    index: &DependencyIndex<'a>,
) -> Option<&'a DependencyComponent> {
    index.single(relative_to(name, RESOURCE_ROOT))
}

fn unqualified_resource<'a>(
    name: &str,
    index: &DependencyIndex<'a>,
) -> Option<&'a DependencyComponent> {
    index.single(&strip_qualifier(relative_to(name, RESOURCE_ROOT))?)
}

fn vector_source_resource<'a>(
    name: &str,
    index: &DependencyIndex<'a>,
) -> Option<&'a DependencyComponent> {
    resource_vector_keys(relative_to(name, RESOURCE_ROOT))
        .iter()
        .find_map(|key| index.single(key))
}

// Resource names collide across libraries often enough that a best guess
// beats the fallback component
fn guessed_resource<'a>(
    name: &str,
    index: &DependencyIndex<'a>,
) -> Option<&'a DependencyComponent> {
    resource_keys(name).iter().find_map(|key| index.first(key))
}

fn exact_asset<'a>(name: &str, index: &DependencyIndex<'a>) -> Option<&'a DependencyComponent> {
    index.single(relative_to(name, ASSET_ROOT))
}

fn exact_native_lib<'a>(
    name: &str,
    index: &DependencyIndex<'a>,
) -> Option<&'a DependencyComponent> {
    index.single(relative_to(name, NATIVE_LIB_ROOT))
}

fn decompressed_native_lib<'a>(
    name: &str,
    index: &DependencyIndex<'a>,
) -> Option<&'a DependencyComponent> {
    let relative = relative_to(name, NATIVE_LIB_ROOT);
    if !relative.contains(COMPRESSED_LIB_INFIX) {
        return None;
    }
    index.single(&relative.replacen(COMPRESSED_LIB_INFIX, "", 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deps(pairs: &[(&str, &[&str])]) -> DependencyMap {
        let mut map = DependencyMap::new();
        for (file, components) in pairs {
            for component in *components {
                map.insert(*file, DependencyComponent::internal(*component));
            }
        }
        map
    }

    fn resolved(map: &DependencyMap, name: &str, file_type: FileType) -> Option<(String, MatchStage)> {
        let index = DependencyIndex::new(map);
        resolve(name, file_type, &index).map(|(c, stage)| (c.name.clone(), stage))
    }

    #[test]
    fn test_class_exact_match() {
        let map = deps(&[("com.a.B", &["X"])]);
        assert_eq!(
            resolved(&map, "com.a.B", FileType::Class),
            Some(("X".to_string(), MatchStage::Exact))
        );
    }

    #[test]
    fn test_class_factory_suffix() {
        let map = deps(&[("com.a.B", &["X"])]);
        assert_eq!(
            resolved(&map, "com.a.B_Factory", FileType::Class),
            Some(("X".to_string(), MatchStage::FactorySuffix))
        );
    }

    #[test]
    fn test_class_provider_marker() {
        let map = deps(&[("com.a.NetModule", &["net"]), ("com.a.Other", &["other"])]);
        assert_eq!(
            resolved(&map, "com.a.NetModule_ProvideClientFactory", FileType::Class),
            Some(("net".to_string(), MatchStage::ProviderMarker))
        );
    }

    #[test]
    fn test_class_lambda_resolves_through_package() {
        let map = deps(&[("com.a.Foo", &["X"]), ("com.a.Bar", &["X"])]);
        assert_eq!(
            resolved(&map, "com.a.-$$Lambda$Foo$abc", FileType::Class),
            Some(("X".to_string(), MatchStage::Lambda))
        );
    }

    #[test]
    fn test_class_external_synthetic_searches_all_packages() {
        let map = deps(&[("com.b.Foo", &["Y"]), ("com.b.Other", &["Z"])]);
        assert_eq!(
            resolved(&map, "com.a.Foo$$ExternalSyntheticLambda0", FileType::Class),
            Some(("Y".to_string(), MatchStage::ExternalSynthetic))
        );
    }

    #[test]
    fn test_class_external_synthetic_rejects_ambiguous_simple_name() {
        let map = deps(&[("com.b.Foo", &["Y"]), ("com.c.Foo", &["Z"])]);
        assert_eq!(
            resolved(&map, "com.a.Foo$$ExternalSyntheticLambda0", FileType::Class),
            None
        );
    }

    #[test]
    fn test_class_package_fallback_requires_one_component() {
        let map = deps(&[("com.a.B", &["X"]), ("com.a.C", &["X"])]);
        assert_eq!(
            resolved(&map, "com.a.Generated", FileType::Class),
            Some(("X".to_string(), MatchStage::Package))
        );

        let split = deps(&[("com.a.B", &["X"]), ("com.a.C", &["Y"])]);
        assert_eq!(resolved(&split, "com.a.Generated", FileType::Class), None);
    }

    #[test]
    fn test_class_package_ignores_nested_packages() {
        let map = deps(&[("com.a.b.C", &["X"])]);
        assert_eq!(resolved(&map, "com.a.D", FileType::Class), None);
    }

    #[test]
    fn test_ambiguous_exact_key_falls_through_to_package() {
        let map = deps(&[("com.a.B", &["X", "Y"]), ("com.a.C", &["X"])]);
        // Package com.a has two distinct components
        assert_eq!(resolved(&map, "com.a.B", FileType::Class), None);
    }

    #[test]
    fn test_strip_qualifier() {
        assert_eq!(
            strip_qualifier("drawable-xhdpi-v4/icon.png").as_deref(),
            Some("drawable-xhdpi/icon.png")
        );
        assert_eq!(strip_qualifier("drawable/icon.png"), None);
        assert_eq!(strip_qualifier("icon.png"), None);
    }

    #[test]
    fn test_collapse_vector_output() {
        assert_eq!(
            collapse_vector_output("drawable/$ic_logo__0.xml").as_deref(),
            Some("drawable/ic_logo.xml")
        );
        assert_eq!(
            collapse_vector_output("drawable-v24/$avd_hide__12.xml").as_deref(),
            Some("drawable-v24/avd_hide.xml")
        );
        assert_eq!(collapse_vector_output("drawable/ic_logo.xml"), None);
    }

    #[test]
    fn test_resource_chain_order() {
        let map = deps(&[
            ("layout/main.xml", &["ui"]),
            ("drawable-xhdpi/icon.png", &["icons"]),
            ("drawable/ic_logo.xml", &["brand"]),
            ("values/strings.xml", &["ui", "core"]),
        ]);

        assert_eq!(
            resolved(&map, "/res/layout/main.xml", FileType::Resource),
            Some(("ui".to_string(), MatchStage::Exact))
        );
        assert_eq!(
            resolved(&map, "/res/drawable-xhdpi-v4/icon.png", FileType::Resource),
            Some(("icons".to_string(), MatchStage::Unqualified))
        );
        assert_eq!(
            resolved(&map, "/res/drawable-v24/$ic_logo__0.xml", FileType::Resource),
            Some(("brand".to_string(), MatchStage::VectorSource))
        );
        assert_eq!(
            resolved(&map, "/res/values/strings.xml", FileType::Resource),
            Some(("ui".to_string(), MatchStage::Guess))
        );
        assert_eq!(resolved(&map, "/res/raw/none.bin", FileType::Resource), None);
    }

    #[test]
    fn test_asset_requires_single_match() {
        let map = deps(&[("fonts/a.ttf", &["fonts"]), ("data.bin", &["a", "b"])]);
        assert_eq!(
            resolved(&map, "/assets/fonts/a.ttf", FileType::Asset),
            Some(("fonts".to_string(), MatchStage::Exact))
        );
        assert_eq!(resolved(&map, "/assets/data.bin", FileType::Asset), None);
    }

    #[test]
    fn test_native_lib_compression_infix() {
        let map = deps(&[("arm64-v8a/libfoo.so", &["native"])]);
        assert_eq!(
            resolved(&map, "/lib/arm64-v8a/libfoo.so", FileType::NativeLib),
            Some(("native".to_string(), MatchStage::Exact))
        );
        assert_eq!(
            resolved(&map, "/lib/arm64-v8a/libfoo.xz.so", FileType::NativeLib),
            Some(("native".to_string(), MatchStage::Decompressed))
        );
    }

    #[test]
    fn test_other_uses_raw_name_only() {
        let map = deps(&[("/META-INF/core.version", &["core"])]);
        assert_eq!(
            resolved(&map, "/META-INF/core.version", FileType::Other),
            Some(("core".to_string(), MatchStage::Exact))
        );
        assert_eq!(resolved(&map, "/META-INF/other.version", FileType::Other), None);
    }
}
