//! Size budget enforcement for CI/CD
//!
//! Implements three-tier budget system:
//! - Target: Ideal size goal (informational)
//! - Warning: Threshold for warnings (exit 0 with warning)
//! - Max: Hard limit (exit 1 if exceeded)

use crate::config::file::{SizeBudget, SizeMetric};
use crate::error::RulerError;
use console::style;

/// Status of size budget check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetStatus {
    /// Under target size (green)
    UnderTarget,
    /// Between target and warning threshold (green/yellow)
    AboveTarget,
    /// Between warning and max (yellow)
    Warning,
    /// Over max size (red)
    OverBudget,
}

/// Result of budget check with detailed information
#[derive(Debug, Clone)]
pub struct BudgetResult {
    /// Budget status
    pub status: BudgetStatus,
    /// Size the budget applies to
    pub metric: SizeMetric,
    /// Measured size in bytes
    pub size_bytes: u64,
    /// Measured size in KB
    pub size_kb: f64,
    /// Target size if set
    pub target_kb: Option<u64>,
    /// Warning threshold if set
    pub warn_threshold_kb: Option<u64>,
    /// Maximum allowed size if set
    pub max_size_kb: Option<u64>,
    /// Human-readable message
    pub message: String,
}

impl BudgetResult {
    /// Get exit code for CI/CD (0 = pass, 1 = fail)
    pub fn exit_code(&self) -> i32 {
        match self.status {
            BudgetStatus::UnderTarget | BudgetStatus::AboveTarget => 0,
            BudgetStatus::Warning => 0,
            BudgetStatus::OverBudget => 1,
        }
    }

    /// Print colored status message
    pub fn print(&self) {
        let status_icon = match self.status {
            BudgetStatus::UnderTarget => style("✅").green(),
            BudgetStatus::AboveTarget => style("✓").green(),
            BudgetStatus::Warning => style("⚠️").yellow(),
            BudgetStatus::OverBudget => style("❌").red(),
        };

        let size_str = format!("{:.2} KB {}", self.size_kb, self.metric);
        let size_str = match self.status {
            BudgetStatus::UnderTarget | BudgetStatus::AboveTarget => style(size_str).green(),
            BudgetStatus::Warning => style(size_str).yellow(),
            BudgetStatus::OverBudget => style(size_str).red(),
        };

        println!("\n{} Size Budget Check: {}", status_icon, size_str);
        println!("   {}", self.message);

        if let Some(target) = self.target_kb {
            let target_str = if self.size_kb <= target as f64 {
                style(format!("Target: {} KB", target)).green()
            } else {
                style(format!("Target: {} KB", target)).dim()
            };
            println!("   {}", target_str);
        }

        if let Some(warn) = self.warn_threshold_kb {
            let warn_str = if self.status == BudgetStatus::Warning {
                style(format!("Warning: {} KB", warn)).yellow()
            } else {
                style(format!("Warning: {} KB", warn)).dim()
            };
            println!("   {}", warn_str);
        }

        if let Some(max) = self.max_size_kb {
            let max_str = if self.status == BudgetStatus::OverBudget {
                style(format!("Max: {} KB (EXCEEDED)", max)).red()
            } else {
                style(format!("Max: {} KB", max)).dim()
            };
            println!("   {}", max_str);
        }
    }
}

/// Size budget checker
#[derive(Debug, Clone)]
pub struct BudgetChecker {
    budget: SizeBudget,
}

impl BudgetChecker {
    /// Create a new budget checker
    pub fn new(budget: SizeBudget) -> Self {
        Self { budget }
    }

    /// The configured budget
    pub fn budget(&self) -> &SizeBudget {
        &self.budget
    }

    /// Priority order: max > warn > target
    fn determine_status(&self, size_kb: f64) -> BudgetStatus {
        if let Some(max) = self.budget.max_size_kb {
            if size_kb > max as f64 {
                return BudgetStatus::OverBudget;
            }
        }

        if let Some(warn) = self.budget.warn_threshold_kb {
            if size_kb > warn as f64 {
                return BudgetStatus::Warning;
            }
        }

        if let Some(target) = self.budget.target_size_kb {
            if size_kb <= target as f64 {
                return BudgetStatus::UnderTarget;
            } else {
                return BudgetStatus::AboveTarget;
            }
        }

        if self.budget.max_size_kb.is_some() || self.budget.warn_threshold_kb.is_some() {
            BudgetStatus::AboveTarget
        } else {
            BudgetStatus::UnderTarget
        }
    }

    /// Check a measured size against the budget
    ///
    /// # Examples
    ///
    /// ```
    /// use bundle_ruler::cicd::{BudgetChecker, budget::BudgetStatus};
    /// use bundle_ruler::config::{SizeBudget, SizeMetric};
    ///
    /// let budget = SizeBudget {
    ///     metric: SizeMetric::Download,
    ///     target_size_kb: Some(500),
    ///     warn_threshold_kb: Some(750),
    ///     max_size_kb: Some(1000),
    /// };
    /// let checker = BudgetChecker::new(budget);
    /// let result = checker.check(600 * 1024);
    /// assert!(matches!(result.status, BudgetStatus::AboveTarget));
    /// ```
    pub fn check(&self, size_bytes: u64) -> BudgetResult {
        let size_kb = size_bytes as f64 / 1024.0;
        let status = self.determine_status(size_kb);

        let message = match status {
            BudgetStatus::UnderTarget => match self.budget.target_size_kb {
                Some(target) => format!("Under target by {:.2} KB", target as f64 - size_kb),
                None => "Size OK".to_string(),
            },
            BudgetStatus::AboveTarget => match self.budget.target_size_kb {
                Some(target) => format!(
                    "Above target by {:.2} KB (still within limits)",
                    size_kb - target as f64
                ),
                None => "Size OK".to_string(),
            },
            BudgetStatus::Warning => match self.budget.warn_threshold_kb {
                Some(warn) => format!(
                    "Warning: {} KB over threshold (review the largest components)",
                    (size_kb - warn as f64) as i64
                ),
                None => "Warning threshold exceeded".to_string(),
            },
            BudgetStatus::OverBudget => match self.budget.max_size_kb {
                Some(max) => format!(
                    "FAILED: {} KB over budget (size reduction required)",
                    (size_kb - max as f64) as i64
                ),
                None => "Budget exceeded".to_string(),
            },
        };

        BudgetResult {
            status,
            metric: self.budget.metric,
            size_bytes,
            size_kb,
            target_kb: self.budget.target_size_kb,
            warn_threshold_kb: self.budget.warn_threshold_kb,
            max_size_kb: self.budget.max_size_kb,
            message,
        }
    }

    /// Check and fail with [`RulerError::BudgetExceeded`] when over the max
    pub fn enforce(&self, size_bytes: u64) -> Result<BudgetResult, RulerError> {
        let result = self.check(size_bytes);
        match (result.status, self.budget.max_size_kb) {
            (BudgetStatus::OverBudget, Some(max_kb)) => {
                let max_allowed = max_kb.saturating_mul(1024);
                let percentage_over = if max_allowed == 0 {
                    100.0
                } else {
                    size_bytes.saturating_sub(max_allowed) as f64 / max_allowed as f64 * 100.0
                };
                Err(RulerError::BudgetExceeded {
                    metric: self.budget.metric,
                    actual: size_bytes,
                    max_allowed,
                    percentage_over,
                })
            }
            _ => Ok(result),
        }
    }
}
