//! Init command implementation
//!
//! Handles the `bundle-ruler init` command which writes a default
//! `.bundle-ruler.toml` to the current directory.

use anyhow::Result;
use console::style;
use std::env;
use std::path::Path;

use crate::config::{self, ConfigFile, SizeBudget};
use crate::fmt::{CHECKMARK, INFO, SPARKLES, WARNING};

/// Create a `.bundle-ruler.toml` in the current directory
///
/// Leaves an existing file untouched.
///
/// # Examples
///
/// ```no_run
/// use bundle_ruler::cmd::init::cmd_init;
///
/// cmd_init()?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn cmd_init() -> Result<()> {
    let project_root = env::current_dir()?;
    init_in(&project_root)
}

/// Create a default configuration in `project_root`
pub fn init_in(project_root: &Path) -> Result<()> {
    println!("{}{}", SPARKLES, style("bundle-ruler init").bold());
    println!();

    if config::ConfigLoader::exists(project_root) {
        println!(
            "{}Config file already exists: {}",
            WARNING,
            style(config::CONFIG_FILE_NAME).cyan()
        );
        println!("   Delete it first or edit manually to update.");
        return Ok(());
    }

    let config = ConfigFile {
        size_budget: Some(SizeBudget::default()),
        ..ConfigFile::default()
    };
    config::ConfigLoader::save(&config, project_root)?;

    println!(
        "{}Created {}",
        CHECKMARK,
        style(config::CONFIG_FILE_NAME).cyan()
    );
    println!();
    println!("{}Next steps:", INFO);
    println!(
        "   {} Set {} and point {} at your ownership rules",
        style("•").dim(),
        style("app-name").green(),
        style("ownership-file").green()
    );
    println!(
        "   {} Add {} under {} to enable {}",
        style("•").dim(),
        style("max-size-kb").green(),
        style("[size-budget]").green(),
        style("analyze --check").cyan()
    );

    Ok(())
}
