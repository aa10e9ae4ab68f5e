//! Error types with contextual suggestions
//!
//! [`RulerError`] wraps the module-level errors raised while loading and
//! analyzing inputs, and adds:
//! - Suggested fixes and recovery actions
//! - Documentation links
//! - Proper exit codes for CI/CD
//!
//! # Examples
//!
//! ```
//! use bundle_ruler::config::SizeMetric;
//! use bundle_ruler::error::RulerError;
//!
//! let err = RulerError::BudgetExceeded {
//!     metric: SizeMetric::Download,
//!     actual: 1_500_000,
//!     max_allowed: 1_000_000,
//!     percentage_over: 50.0,
//! };
//! assert_eq!(err.exit_code(), 1);
//! assert!(err.suggestion().is_some());
//! ```

use std::path::PathBuf;
use thiserror::Error;

use crate::attribution::AttributionError;
use crate::config::SizeMetric;
use crate::input::InputError;
use crate::ownership::OwnershipError;
use crate::sanitizer::SanitizeError;

const DOCS_BASE: &str = "https://github.com/bundle-ruler/bundle-ruler";

/// bundle-ruler errors with contextual suggestions
#[derive(Error, Debug)]
pub enum RulerError {
    /// Listing or dependency map could not be loaded
    #[error(transparent)]
    Input(#[from] InputError),

    /// Archive entries could not be sanitized
    #[error("Sanitization failed: {0}")]
    Sanitize(#[from] SanitizeError),

    /// Attribution could not start
    #[error("Attribution failed: {0}")]
    Attribution(#[from] AttributionError),

    /// Ownership rules could not be loaded
    #[error(transparent)]
    Ownership(#[from] OwnershipError),

    /// Measured size is over the configured maximum
    #[error("App {metric} size ({actual} bytes) exceeds maximum ({max_allowed} bytes)")]
    BudgetExceeded {
        /// Size the budget applies to
        metric: SizeMetric,
        /// Measured size
        actual: u64,
        /// Maximum allowed size
        max_allowed: u64,
        /// Percentage over budget
        percentage_over: f64,
    },

    /// A `--feature` argument is not of the form `name=listing.json`
    #[error("Invalid feature argument: '{arg}'")]
    InvalidFeatureArg {
        /// Argument as given
        arg: String,
    },

    /// Size budget check requested without a configured budget
    #[error("No size budget configured in {path}")]
    BudgetNotConfigured {
        /// Config file that was consulted
        path: PathBuf,
    },

    /// Generic I/O error with context
    #[error("I/O error: {context}")]
    Io {
        /// Context about where the error occurred
        context: String,
        #[source]
        /// IO error source
        source: std::io::Error,
    },
}

impl RulerError {
    /// Get actionable suggestion for resolving this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use bundle_ruler::error::RulerError;
    ///
    /// let error = RulerError::InvalidFeatureArg { arg: "camera".to_string() };
    /// assert!(error.suggestion().unwrap().contains("name=listing.json"));
    /// ```
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::Input(InputError::Io { path, .. }) => {
                Some(format!("Ensure {} exists and is readable", path.display()))
            }
            Self::Input(InputError::Parse { .. }) => Some(
                "Listings need a top-level \"fragments\" array; dependency maps map file keys to component lists"
                    .to_string(),
            ),
            Self::Input(_) => Some(
                "Regenerate the archive listing; every entry needs a name starting with '/' and both sizes"
                    .to_string(),
            ),
            Self::Sanitize(_) => {
                Some("Check the listing for entries with implausibly large sizes".to_string())
            }
            Self::Attribution(_) => Some(
                "Every component in the dependency map and --default-component needs a non-empty name"
                    .to_string(),
            ),
            Self::Ownership(OwnershipError::UnsupportedFormat { .. }) => {
                Some("Convert the ownership rules to .toml or .json".to_string())
            }
            Self::Ownership(_) => Some(
                "Each rule needs an 'identifier' and an 'owner', listed under 'owners'".to_string(),
            ),
            Self::BudgetExceeded {
                percentage_over, ..
            } => Some(format!(
                "App is {:.1}% over budget. Consider:\n  \
                     - Running 'bundle-ruler analyze' to find the largest components\n  \
                     - Running 'bundle-ruler compare' against the last passing build",
                percentage_over
            )),
            Self::InvalidFeatureArg { .. } => {
                Some("Use --feature name=listing.json, e.g. --feature camera=camera.json".to_string())
            }
            Self::BudgetNotConfigured { .. } => Some(
                "Add a [size-budget] table with max-size-kb, or run 'bundle-ruler init'"
                    .to_string(),
            ),
            Self::Io { context, .. } => Some(format!(
                "Check file permissions and that {} is accessible",
                context
            )),
        }
    }

    /// Get documentation URL for this error.
    pub fn docs_url(&self) -> Option<String> {
        let anchor = match self {
            Self::Input(_) => "input-formats",
            Self::Ownership(_) => "ownership-rules",
            Self::BudgetExceeded { .. } | Self::BudgetNotConfigured { .. } => "size-budgets",
            _ => return None,
        };
        Some(format!("{}#{}", DOCS_BASE, anchor))
    }

    /// Get appropriate exit code for this error.
    ///
    /// Follows sysexits.h conventions; a budget violation exits 1 so CI fails.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Input(InputError::Io { .. }) => 66, // EX_NOINPUT
            Self::Input(_) => 65,                     // EX_DATAERR
            Self::Sanitize(_) => 65,
            Self::Attribution(_) => 65,
            Self::Ownership(OwnershipError::Io { .. }) => 66,
            Self::Ownership(_) => 65,
            Self::BudgetExceeded { .. } => 1,
            Self::InvalidFeatureArg { .. } => 64, // EX_USAGE
            Self::BudgetNotConfigured { .. } => 78, // EX_CONFIG
            Self::Io { .. } => 74,                // EX_IOERR
        }
    }
}

/// Error formatter with colors and structured output
pub struct ErrorFormatter;

impl ErrorFormatter {
    /// Format error with suggestions and documentation links
    pub fn format(error: &anyhow::Error) -> String {
        use console::style;

        let mut output = String::new();

        output.push_str(&format!("{} {}\n", style("error:").red().bold(), error));

        let mut source = error.source();
        let mut indent = 1;
        while let Some(err) = source {
            output.push_str(&format!(
                "{}{} {}\n",
                "  ".repeat(indent),
                style("caused by:").yellow(),
                err
            ));
            source = err.source();
            indent += 1;
        }

        if let Some(ruler_error) = Self::find(error) {
            if let Some(suggestion) = ruler_error.suggestion() {
                output.push_str(&format!(
                    "\n{} {}\n",
                    style("help:").cyan().bold(),
                    suggestion
                ));
            }

            if let Some(docs) = ruler_error.docs_url() {
                output.push_str(&format!("{} {}\n", style("docs:").blue(), docs));
            }
        }

        output
    }

    /// Get exit code from error
    pub fn exit_code(error: &anyhow::Error) -> i32 {
        Self::find(error).map_or(1, RulerError::exit_code)
    }

    // Handlers attach context, so the RulerError may sit below the top
    fn find(error: &anyhow::Error) -> Option<&RulerError> {
        error.chain().find_map(|e| e.downcast_ref::<RulerError>())
    }
}
