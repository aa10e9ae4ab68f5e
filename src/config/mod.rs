//! Project configuration for bundle-ruler
//!
//! Settings live in `.bundle-ruler.toml` at the project root. Command-line
//! flags take precedence over anything read from the file.

pub mod file;
pub mod loader;

pub use file::{ConfigFile, SizeBudget, SizeMetric, CONFIG_FILE_NAME};
pub use loader::ConfigLoader;
