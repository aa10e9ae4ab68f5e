//! Test fixture helpers
//!
//! [`Project`] lays out a realistic analysis input in a temporary
//! directory: a two-fragment base listing, a dynamic feature listing, a
//! dependency map and ownership rules.
//!
//! Expected base app totals after sanitization: 1050 bytes download,
//! 1960 bytes install. Per component (download): `:app` 717,
//! `com.fonts:roboto:1.0` 200, `:ui:icons` 80, `:feature:auth` 53.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Re-export anyhow for convenience
pub use anyhow;

pub const BASE_DOWNLOAD: u64 = 1050;
pub const BASE_INSTALL: u64 = 1960;

pub const BASE_LISTING: &str = r#"{
  "fragments": [
    {
      "name": "base-master.apk",
      "entries": [
        { "name": "/AndroidManifest.xml", "downloadSize": 600, "installSize": 1400 },
        { "name": "/classes.dex", "downloadSize": 100, "installSize": 150, "children": [
          { "name": "com.a.B", "installSize": 50 },
          { "name": "com.z.Other", "installSize": 100 }
        ] },
        { "name": "/resources.arsc", "downloadSize": 40, "installSize": 80 },
        { "name": "/res/layout/main.xml", "downloadSize": 20, "installSize": 30 },
        { "name": "/assets/fonts/a.ttf", "downloadSize": 200, "installSize": 200 },
        { "name": "/META-INF/MANIFEST.MF", "downloadSize": 5, "installSize": 10 }
      ]
    },
    {
      "name": "base-xxhdpi.apk",
      "entries": [
        { "name": "/AndroidManifest.xml", "downloadSize": 50, "installSize": 300 },
        { "name": "/res/drawable-xxhdpi-v4/icon.png", "downloadSize": 80, "installSize": 80 },
        { "name": "/resources.arsc", "downloadSize": 10, "installSize": 20 }
      ]
    }
  ]
}"#;

/// Same base app after a regression: the font grew and a new asset appeared
pub const HEAD_LISTING: &str = r#"{
  "fragments": [
    {
      "name": "base-master.apk",
      "entries": [
        { "name": "/AndroidManifest.xml", "downloadSize": 600, "installSize": 1400 },
        { "name": "/classes.dex", "downloadSize": 100, "installSize": 150, "children": [
          { "name": "com.a.B", "installSize": 50 },
          { "name": "com.z.Other", "installSize": 100 }
        ] },
        { "name": "/resources.arsc", "downloadSize": 40, "installSize": 80 },
        { "name": "/res/layout/main.xml", "downloadSize": 20, "installSize": 30 },
        { "name": "/assets/fonts/a.ttf", "downloadSize": 450, "installSize": 450 },
        { "name": "/assets/new.bin", "downloadSize": 70, "installSize": 70 }
      ]
    },
    {
      "name": "base-xxhdpi.apk",
      "entries": [
        { "name": "/res/drawable-xxhdpi-v4/icon.png", "downloadSize": 80, "installSize": 80 },
        { "name": "/resources.arsc", "downloadSize": 10, "installSize": 20 }
      ]
    }
  ]
}"#;

pub const CAMERA_LISTING: &str = r#"{
  "fragments": [
    {
      "name": "camera-master.apk",
      "entries": [
        { "name": "/classes.dex", "downloadSize": 30, "installSize": 60, "children": [
          { "name": "com.cam.Capture", "installSize": 60 }
        ] },
        { "name": "/assets/models/face.bin", "downloadSize": 500, "installSize": 500 }
      ]
    }
  ]
}"#;

pub const DEPENDENCY_MAP: &str = r#"{
  "com.a.B": [{ "name": ":feature:auth", "type": "INTERNAL" }],
  "layout/main.xml": [{ "name": ":feature:auth", "type": "INTERNAL" }],
  "fonts/a.ttf": [{ "name": "com.fonts:roboto:1.0", "type": "EXTERNAL" }],
  "drawable-xxhdpi/icon.png": [{ "name": ":ui:icons", "type": "INTERNAL" }],
  "com.cam.Capture": [{ "name": ":feature:camera", "type": "INTERNAL" }]
}"#;

pub const OWNERSHIP_TOML: &str = r#"
[[owners]]
identifier = ":feature:*"
owner = "growth"

[[owners]]
identifier = "com.fonts:roboto"
owner = "design"

[[owners]]
identifier = ":app"
owner = "core"

[[owners]]
identifier = "camera"
owner = "media"
"#;

/// A temporary project directory with every analysis input written out
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn new() -> anyhow::Result<Self> {
        let project = Self {
            dir: TempDir::new()?,
        };
        project.write("base.json", BASE_LISTING)?;
        project.write("head.json", HEAD_LISTING)?;
        project.write("camera.json", CAMERA_LISTING)?;
        project.write("deps.json", DEPENDENCY_MAP)?;
        project.write("owners.toml", OWNERSHIP_TOML)?;
        Ok(project)
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn base_listing(&self) -> PathBuf {
        self.path("base.json")
    }

    pub fn deps(&self) -> PathBuf {
        self.path("deps.json")
    }

    pub fn write(&self, name: &str, contents: &str) -> anyhow::Result<PathBuf> {
        let path = self.path(name);
        fs::write(&path, contents)?;
        Ok(path)
    }

    /// Write `.bundle-ruler.toml` with a download budget of `max_kb`
    pub fn with_budget(&self, max_kb: u64) -> anyhow::Result<PathBuf> {
        self.write(
            ".bundle-ruler.toml",
            &format!(
                "app-name = \"demo\"\nownership-file = \"owners.toml\"\n\n[size-budget]\nmetric = \"download\"\nmax-size-kb = {max_kb}\n"
            ),
        )
    }
}
