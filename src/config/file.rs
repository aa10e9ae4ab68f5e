//! Configuration file data structures

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = ".bundle-ruler.toml";

/// bundle-ruler configuration file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    /// App name shown in reports
    #[serde(rename = "app-name", default, skip_serializing_if = "Option::is_none")]
    pub app_name: Option<String>,

    /// Owner for anything no ownership rule covers
    #[serde(rename = "default-owner", default = "default_owner")]
    pub default_owner: String,

    /// Component receiving files no dependency matches
    #[serde(rename = "default-component", default = "default_component")]
    pub default_component: String,

    /// Ownership rules file (.toml or .json), relative to the project root
    #[serde(
        rename = "ownership-file",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub ownership_file: Option<PathBuf>,

    /// Size budget settings
    #[serde(rename = "size-budget", default, skip_serializing_if = "Option::is_none")]
    pub size_budget: Option<SizeBudget>,
}

fn default_owner() -> String {
    crate::ownership::DEFAULT_OWNER.to_string()
}

fn default_component() -> String {
    ":app".to_string()
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: None,
            default_owner: default_owner(),
            default_component: default_component(),
            ownership_file: None,
            size_budget: None,
        }
    }
}

/// Which size a budget is measured against
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeMetric {
    /// Compressed bytes fetched from the store
    #[default]
    Download,
    /// Bytes occupied on device
    Install,
}

impl fmt::Display for SizeMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Download => write!(f, "download"),
            Self::Install => write!(f, "install"),
        }
    }
}

/// Size budget configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SizeBudget {
    /// Size the thresholds apply to
    #[serde(default)]
    pub metric: SizeMetric,

    /// Maximum size in KB (hard limit, CI fails)
    #[serde(rename = "max-size-kb", skip_serializing_if = "Option::is_none")]
    pub max_size_kb: Option<u64>,

    /// Warning threshold in KB (CI passes with warning)
    #[serde(rename = "warn-threshold-kb", skip_serializing_if = "Option::is_none")]
    pub warn_threshold_kb: Option<u64>,

    /// Target size in KB (ideal target)
    #[serde(rename = "target-size-kb", skip_serializing_if = "Option::is_none")]
    pub target_size_kb: Option<u64>,
}

impl SizeBudget {
    /// Validate that budget thresholds are properly ordered
    ///
    /// Ensures: target <= warn <= max
    pub fn validate(&self) -> Result<()> {
        if let (Some(target), Some(warn)) = (self.target_size_kb, self.warn_threshold_kb) {
            if target > warn {
                anyhow::bail!(
                    "Target size ({} KB) cannot exceed warning threshold ({} KB)",
                    target,
                    warn
                );
            }
        }

        if let (Some(warn), Some(max)) = (self.warn_threshold_kb, self.max_size_kb) {
            if warn > max {
                anyhow::bail!(
                    "Warning threshold ({} KB) cannot exceed max size ({} KB)",
                    warn,
                    max
                );
            }
        }

        if let (Some(target), Some(max)) = (self.target_size_kb, self.max_size_kb) {
            if target > max {
                anyhow::bail!(
                    "Target size ({} KB) cannot exceed max size ({} KB)",
                    target,
                    max
                );
            }
        }

        Ok(())
    }

    /// Pick the measured size matching [`SizeBudget::metric`]
    pub fn measure(&self, download_size: u64, install_size: u64) -> u64 {
        match self.metric {
            SizeMetric::Download => download_size,
            SizeMetric::Install => install_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn budget(target: Option<u64>, warn: Option<u64>, max: Option<u64>) -> SizeBudget {
        SizeBudget {
            metric: SizeMetric::Download,
            target_size_kb: target,
            warn_threshold_kb: warn,
            max_size_kb: max,
        }
    }

    #[test]
    fn test_config_file_default_values() {
        let config = ConfigFile::default();
        assert_eq!(config.default_owner, "unknown");
        assert_eq!(config.default_component, ":app");
        assert!(config.size_budget.is_none());
    }

    #[test]
    fn test_config_file_parses_kebab_case_fields() {
        let config: ConfigFile = toml_edit::de::from_str(
            r#"
app-name = "demo"
default-owner = "platform"
ownership-file = "owners.toml"

[size-budget]
metric = "install"
max-size-kb = 4096
"#,
        )
        .unwrap();

        assert_eq!(config.app_name.as_deref(), Some("demo"));
        assert_eq!(config.default_owner, "platform");
        assert_eq!(config.default_component, ":app");
        assert_eq!(config.ownership_file, Some(PathBuf::from("owners.toml")));
        let budget = config.size_budget.unwrap();
        assert_eq!(budget.metric, SizeMetric::Install);
        assert_eq!(budget.max_size_kb, Some(4096));
    }

    #[test]
    fn test_size_budget_validate_with_correct_order_succeeds() {
        assert!(budget(Some(500), Some(800), Some(1000)).validate().is_ok());
    }

    #[test]
    fn test_size_budget_validate_with_target_exceeds_warn_returns_error() {
        let err = budget(Some(900), Some(800), None).validate().unwrap_err();
        assert!(err.to_string().contains("warning threshold"));
    }

    #[test]
    fn test_size_budget_validate_with_warn_exceeds_max_returns_error() {
        let err = budget(None, Some(1200), Some(1000)).validate().unwrap_err();
        assert!(err.to_string().contains("max size"));
    }

    #[test]
    fn test_size_budget_validate_with_target_exceeds_max_returns_error() {
        assert!(budget(Some(1500), None, Some(1000)).validate().is_err());
    }

    #[test]
    fn test_size_budget_measure_uses_metric() {
        let mut b = budget(None, None, None);
        assert_eq!(b.measure(10, 20), 10);
        b.metric = SizeMetric::Install;
        assert_eq!(b.measure(10, 20), 20);
    }
}
