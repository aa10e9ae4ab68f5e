//! Reading and writing `.bundle-ruler.toml`

use super::file::{ConfigFile, CONFIG_FILE_NAME};
use crate::infra::{FileSystem, RealFileSystem};
use anyhow::{bail, Context, Result};
use std::io;
use std::path::{Path, PathBuf};

/// Loads and saves the project configuration
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load the project configuration, or defaults when the project has none
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use bundle_ruler::config::ConfigLoader;
    /// use std::path::Path;
    ///
    /// let config = ConfigLoader::load(Path::new("."))?;
    /// println!("Unmatched files go to {}", config.default_component);
    /// if let Some(budget) = &config.size_budget {
    ///     println!("Budget measured on {} size", budget.metric);
    /// }
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn load(project_root: &Path) -> Result<ConfigFile> {
        Self::load_with_fs(project_root, &RealFileSystem)
    }

    /// Load with a custom filesystem implementation
    pub fn load_with_fs<FS: FileSystem>(project_root: &Path, fs: &FS) -> Result<ConfigFile> {
        let path = Self::path(project_root);
        let contents = match fs.read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(ConfigFile::default()),
            Err(e) => return Err(e).with_context(|| format!("Failed to read {}", path.display())),
        };

        let config: ConfigFile = toml_edit::de::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Self::validate(&config).with_context(|| format!("Invalid {}", path.display()))?;
        Ok(config)
    }

    /// Write the configuration into the project root
    pub fn save(config: &ConfigFile, project_root: &Path) -> Result<()> {
        Self::save_with_fs(config, project_root, &RealFileSystem)
    }

    /// Save with a custom filesystem implementation
    pub fn save_with_fs<FS: FileSystem>(
        config: &ConfigFile,
        project_root: &Path,
        fs: &FS,
    ) -> Result<()> {
        let path = Self::path(project_root);
        let contents =
            toml_edit::ser::to_string_pretty(config).context("Failed to serialize config")?;
        fs.write(&path, contents)
            .with_context(|| format!("Failed to write {}", path.display()))
    }

    /// Whether the project already has a configuration file
    pub fn exists(project_root: &Path) -> bool {
        Self::path(project_root).exists()
    }

    /// Location of the configuration file inside `project_root`
    pub fn path(project_root: &Path) -> PathBuf {
        project_root.join(CONFIG_FILE_NAME)
    }

    /// Ownership rules file named by the configuration, resolved against
    /// the project root
    pub fn ownership_path(config: &ConfigFile, project_root: &Path) -> Option<PathBuf> {
        config
            .ownership_file
            .as_ref()
            .map(|file| project_root.join(file))
    }

    fn validate(config: &ConfigFile) -> Result<()> {
        if config.default_component.trim().is_empty() {
            bail!("default-component must not be empty");
        }
        if config.default_owner.trim().is_empty() {
            bail!("default-owner must not be empty");
        }
        if let Some(budget) = &config.size_budget {
            budget.validate().context("Invalid size budget")?;
        }
        Ok(())
    }
}
