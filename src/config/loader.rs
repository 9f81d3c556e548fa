//! Configuration loader
//!
//! Loads and validates `libra.yaml` and the plot definition files it points at.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tracing::info;

use super::types::LibraConfig;
use crate::plot::definitions::{load_line_definitions, load_stack_definitions};
use crate::plot::{PlotParameters, StackPlotParameters};

/// File name of the main configuration inside the config directory
pub const CONFIG_FILE: &str = "libra.yaml";

pub struct ConfigLoader {
    config_dir: String,
}

impl ConfigLoader {
    pub fn new(config_dir: impl Into<String>) -> Self {
        Self {
            config_dir: config_dir.into(),
        }
    }

    /// Create loader from LIBRA_CONFIG_DIR env var or default to "config"
    ///
    /// Path resolution order:
    /// 1. LIBRA_CONFIG_DIR environment variable (explicit override)
    /// 2. Relative "config" path (works when running from workspace root)
    /// 3. CARGO_MANIFEST_DIR/config (test binaries)
    pub fn from_env() -> Self {
        if let Ok(dir) = std::env::var("LIBRA_CONFIG_DIR") {
            return Self::new(dir);
        }

        if Path::new("config").join(CONFIG_FILE).exists() {
            return Self::new("config");
        }

        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let config_path = format!("{}/config", manifest_dir);
            if Path::new(&config_path).join(CONFIG_FILE).exists() {
                return Self::new(config_path);
            }
        }

        // Missing directory is fine: load() falls back to defaults
        Self::new("config")
    }

    pub fn config_dir(&self) -> PathBuf {
        PathBuf::from(&self.config_dir)
    }

    pub fn config_path(&self) -> PathBuf {
        self.config_dir().join(CONFIG_FILE)
    }

    /// Load `libra.yaml`, or the defaults when the file does not exist
    pub fn load(&self) -> Result<LibraConfig> {
        let path = self.config_path();
        if !path.exists() {
            info!(
                "No configuration at {}, using defaults",
                path.display()
            );
            return Ok(LibraConfig::default());
        }

        info!("Loading configuration from {}", path.display());
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid configuration in {}", path.display()))
    }

    /// Parse and validate configuration text
    pub fn parse(content: &str) -> Result<LibraConfig> {
        let config: LibraConfig =
            serde_yaml::from_str(content).context("Failed to parse configuration YAML")?;
        validate(&config)?;
        Ok(config)
    }

    /// Resolve a path from the configuration against the config directory
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.config_dir().join(path)
        }
    }

    /// Load the predefined line plots named in the configuration
    pub fn load_line_definitions(&self, config: &LibraConfig) -> Result<Vec<PlotParameters>> {
        let Some(path) = config.definitions.line.as_deref() else {
            return Ok(Vec::new());
        };
        let path = self.resolve(path);
        let definitions = load_line_definitions(&path)
            .with_context(|| format!("Failed to load line plot definitions from {}", path.display()))?;
        info!("Loaded {} line plot definitions", definitions.len());
        Ok(definitions)
    }

    /// Load the predefined stack plots named in the configuration
    pub fn load_stack_definitions(
        &self,
        config: &LibraConfig,
    ) -> Result<Vec<StackPlotParameters>> {
        let Some(path) = config.definitions.stack.as_deref() else {
            return Ok(Vec::new());
        };
        let path = self.resolve(path);
        let definitions = load_stack_definitions(&path).with_context(|| {
            format!("Failed to load stack plot definitions from {}", path.display())
        })?;
        info!("Loaded {} stack plot definitions", definitions.len());
        Ok(definitions)
    }
}

fn validate(config: &LibraConfig) -> Result<()> {
    if config.years.is_empty() {
        bail!(
            "years: start_year {} is after end_year {}",
            config.years.start_year,
            config.years.end_year
        );
    }
    if config.labels.title_width == 0 || config.labels.y_label_width == 0 {
        bail!("labels: wrap widths must be greater than zero");
    }
    if config.palette.is_empty() {
        bail!("palette: at least one colour is required");
    }
    for color in &config.palette {
        crate::plot::style::fill_color(color, 1.0)
            .with_context(|| format!("palette: invalid colour '{}'", color))?;
    }
    if !(0.0..=1.0).contains(&config.stack_alpha) {
        bail!("stack_alpha must be between 0 and 1 (got {})", config.stack_alpha);
    }
    Ok(())
}
