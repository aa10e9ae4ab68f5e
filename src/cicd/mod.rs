//! CI/CD integration
//!
//! Size budget verification with exit codes for automated workflows.

pub mod budget;

pub use budget::{BudgetChecker, BudgetResult, BudgetStatus};
