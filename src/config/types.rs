//! Configuration types
//!
//! Everything is optional in `libra.yaml`; missing keys take the defaults the
//! LIBRA dashboards have always used.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::plot::style::DEFAULT_PALETTE;

/// Top-level configuration (`config/libra.yaml`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraConfig {
    pub years: YearWindow,
    pub labels: LabelConfig,
    /// `#rrggbb` colours assigned to runs / stacked series in order
    pub palette: Vec<String>,
    /// Opacity of stack plot fills
    pub stack_alpha: f64,
    pub definitions: DefinitionPaths,
}

impl Default for LibraConfig {
    fn default() -> Self {
        Self {
            years: YearWindow::default(),
            labels: LabelConfig::default(),
            palette: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
            stack_alpha: 0.8,
            definitions: DefinitionPaths::default(),
        }
    }
}

/// Years plotted on the x axis (inclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct YearWindow {
    pub start_year: i32,
    pub end_year: i32,
}

impl Default for YearWindow {
    fn default() -> Self {
        Self {
            start_year: 2020,
            end_year: 2050,
        }
    }
}

impl YearWindow {
    /// Number of years in the window; zero when `start_year > end_year`
    pub fn len(&self) -> usize {
        let span = i64::from(self.end_year) - i64::from(self.start_year) + 1;
        usize::try_from(span).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Title and axis label formatting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    /// Wrap width of plot titles, in characters
    pub title_width: usize,
    /// Wrap width of y axis labels, in characters
    pub y_label_width: usize,
    /// Prepended to titles of exogenous input variables
    pub exogenous_prefix: String,
    /// Line separator used when joining wrapped lines
    pub line_break: String,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            title_width: 50,
            y_label_width: 30,
            exogenous_prefix: "LIBRA input: ".to_string(),
            line_break: "<br>".to_string(),
        }
    }
}

/// Predefined plot definition files, relative to the config directory
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefinitionPaths {
    pub line: Option<PathBuf>,
    pub stack: Option<PathBuf>,
}
