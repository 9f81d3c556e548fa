//! Configuration
//!
//! YAML configuration for year windows, label formatting, colours and the
//! predefined plot definition files.

pub mod loader;
pub mod types;

pub use loader::{ConfigLoader, CONFIG_FILE};
pub use types::{DefinitionPaths, LabelConfig, LibraConfig, YearWindow};
