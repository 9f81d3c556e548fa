//! Per-run line styling
//!
//! One colour, line style and highlight flag per selected run. In compare mode
//! the runs are read as two halves (baseline runs, then their counterparts):
//! the halves share colours, and the second half is dashed.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::LibraConfig;

/// Colour-blind friendly palette used when no colours are given
pub const DEFAULT_PALETTE: [&str; 10] = [
    "#377eb8", "#ff7f00", "#4daf4a", "#f781bf", "#a65628", "#984ea3", "#999999", "#b7121f",
    "#dede00", "#600FFF",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StyleError {
    #[error("Run names cannot be empty")]
    NoRuns,

    #[error("Number of {field} ({found}) should match the number of run names ({expected})")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("Colour palette cannot be empty")]
    EmptyPalette,

    #[error("'{0}' is not a #rrggbb colour")]
    InvalidColor(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    Solid,
    Dashed,
}

impl LineStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineStyle::Solid => "solid",
            LineStyle::Dashed => "dashed",
        }
    }
}

/// Style of a single run's line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeriesStyle<'a> {
    pub run: &'a str,
    pub color: &'a str,
    pub line_style: LineStyle,
    pub highlight: bool,
}

/// Validated style parameters for a set of runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleParameters {
    run_names: Vec<String>,
    compare: bool,
    line_styles: Vec<LineStyle>,
    colors: Vec<String>,
    highlight: Vec<bool>,
}

impl StyleParameters {
    /// Style `run_names` with defaults from `palette`
    pub fn new<S: AsRef<str>>(
        run_names: Vec<String>,
        compare: bool,
        palette: &[S],
    ) -> Result<Self, StyleError> {
        Self::build(run_names, compare, Vec::new(), Vec::new(), Vec::new(), palette)
    }

    /// Style `run_names` with the configured palette
    pub fn from_config(
        run_names: Vec<String>,
        compare: bool,
        config: &LibraConfig,
    ) -> Result<Self, StyleError> {
        Self::new(run_names, compare, &config.palette)
    }

    /// Style runs with explicit overrides; empty overrides take defaults
    pub fn build<S: AsRef<str>>(
        run_names: Vec<String>,
        compare: bool,
        line_styles: Vec<LineStyle>,
        colors: Vec<String>,
        highlight: Vec<bool>,
        palette: &[S],
    ) -> Result<Self, StyleError> {
        let runs = run_names.len();
        if runs == 0 {
            return Err(StyleError::NoRuns);
        }
        check_len("highlights", runs, highlight.len())?;

        let colors = if colors.is_empty() {
            default_colors(runs, compare, palette)?
        } else {
            check_len("colors", runs, colors.len())?;
            colors
        };

        let line_styles = if line_styles.is_empty() {
            default_line_styles(runs, compare)
        } else {
            check_len("line styles", runs, line_styles.len())?;
            line_styles
        };

        Ok(Self {
            run_names,
            compare,
            line_styles,
            colors,
            highlight,
        })
    }

    pub fn run_names(&self) -> &[String] {
        &self.run_names
    }

    pub fn compare(&self) -> bool {
        self.compare
    }

    pub fn colors(&self) -> &[String] {
        &self.colors
    }

    pub fn line_styles(&self) -> &[LineStyle] {
        &self.line_styles
    }

    /// One style per run, in run order
    pub fn series(&self) -> impl Iterator<Item = SeriesStyle<'_>> {
        self.run_names.iter().enumerate().map(|(i, run)| SeriesStyle {
            run,
            color: &self.colors[i],
            line_style: self.line_styles[i],
            highlight: self.highlight.get(i).copied().unwrap_or(false),
        })
    }
}

fn check_len(field: &'static str, expected: usize, found: usize) -> Result<(), StyleError> {
    if found != 0 && found != expected {
        return Err(StyleError::LengthMismatch {
            field,
            expected,
            found,
        });
    }
    Ok(())
}

fn default_colors<S: AsRef<str>>(
    runs: usize,
    compare: bool,
    palette: &[S],
) -> Result<Vec<String>, StyleError> {
    if palette.is_empty() {
        return Err(StyleError::EmptyPalette);
    }
    let pick = |i: usize| palette[i % palette.len()].as_ref().to_string();

    if compare {
        // second half reuses the first half's colours
        let half = runs.div_ceil(2);
        Ok((0..runs).map(|i| pick(i % half)).collect())
    } else {
        Ok((0..runs).map(pick).collect())
    }
}

fn default_line_styles(runs: usize, compare: bool) -> Vec<LineStyle> {
    if !compare {
        return vec![LineStyle::Solid; runs];
    }
    let half = runs.div_ceil(2);
    (0..runs)
        .map(|i| {
            if i < half {
                LineStyle::Solid
            } else {
                LineStyle::Dashed
            }
        })
        .collect()
}

/// `rgba(r, g, b, alpha)` fill colour for a `#rrggbb` palette entry
pub fn fill_color(hex: &str, alpha: f64) -> Result<String, StyleError> {
    let digits = hex
        .strip_prefix('#')
        .filter(|d| d.len() == 6 && d.chars().all(|c| c.is_ascii_hexdigit()))
        .ok_or_else(|| StyleError::InvalidColor(hex.to_string()))?;

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16).map_err(|_| StyleError::InvalidColor(hex.to_string()))
    };
    Ok(format!(
        "rgba({}, {}, {}, {})",
        channel(0..2)?,
        channel(2..4)?,
        channel(4..6)?,
        alpha
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn runs(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("Run {i}")).collect()
    }

    #[test]
    fn test_default_styles() {
        let style = StyleParameters::new(runs(3), false, &DEFAULT_PALETTE).unwrap();
        assert_eq!(style.colors(), ["#377eb8", "#ff7f00", "#4daf4a"]);
        assert_eq!(style.line_styles(), [LineStyle::Solid; 3]);
    }

    #[test]
    fn test_compare_mode_halves() {
        let style = StyleParameters::new(runs(4), true, &DEFAULT_PALETTE).unwrap();
        assert_eq!(style.colors(), ["#377eb8", "#ff7f00", "#377eb8", "#ff7f00"]);
        assert_eq!(
            style.line_styles(),
            [
                LineStyle::Solid,
                LineStyle::Solid,
                LineStyle::Dashed,
                LineStyle::Dashed
            ]
        );
    }

    #[test]
    fn test_configured_palette() {
        let config = LibraConfig {
            palette: vec!["#000000".to_string(), "#ffffff".to_string()],
            ..LibraConfig::default()
        };
        let style = StyleParameters::from_config(runs(3), false, &config).unwrap();
        assert_eq!(style.colors(), ["#000000", "#ffffff", "#000000"]);

        let empty = LibraConfig {
            palette: Vec::new(),
            ..LibraConfig::default()
        };
        assert_eq!(
            StyleParameters::from_config(runs(1), false, &empty).unwrap_err(),
            StyleError::EmptyPalette
        );
    }

    #[test]
    fn test_palette_cycles_past_its_end() {
        let style = StyleParameters::new(runs(12), false, &DEFAULT_PALETTE).unwrap();
        assert_eq!(style.colors()[10], "#377eb8");
        assert_eq!(style.colors()[11], "#ff7f00");
    }

    #[test]
    fn test_validation() {
        assert_eq!(
            StyleParameters::new(Vec::new(), false, &DEFAULT_PALETTE).unwrap_err(),
            StyleError::NoRuns
        );
        let err = StyleParameters::build(
            runs(2),
            false,
            Vec::new(),
            vec!["#000000".to_string()],
            Vec::new(),
            &DEFAULT_PALETTE,
        )
        .unwrap_err();
        assert_eq!(
            err,
            StyleError::LengthMismatch {
                field: "colors",
                expected: 2,
                found: 1
            }
        );
        assert!(StyleParameters::build(
            runs(2),
            false,
            Vec::new(),
            Vec::new(),
            vec![true],
            &DEFAULT_PALETTE
        )
        .is_err());
        assert_eq!(
            StyleParameters::new(runs(1), false, &[] as &[&str]).unwrap_err(),
            StyleError::EmptyPalette
        );
    }

    #[test]
    fn test_series() {
        let style = StyleParameters::build(
            runs(2),
            false,
            vec![LineStyle::Dashed, LineStyle::Solid],
            Vec::new(),
            vec![true, false],
            &DEFAULT_PALETTE,
        )
        .unwrap();
        let series: Vec<_> = style.series().collect();
        assert_eq!(series[0].run, "Run 1");
        assert_eq!(series[0].line_style, LineStyle::Dashed);
        assert!(series[0].highlight);
        assert_eq!(series[1].color, "#ff7f00");
        assert!(!series[1].highlight);
    }

    #[test]
    fn test_fill_color() {
        assert_eq!(
            fill_color("#377eb8", 0.8).unwrap(),
            "rgba(55, 126, 184, 0.8)"
        );
        assert_eq!(
            fill_color("#600FFF", 0.5).unwrap(),
            "rgba(96, 15, 255, 0.5)"
        );
        assert!(fill_color("377eb8", 0.8).is_err());
        assert!(fill_color("#37eb8", 0.8).is_err());
    }
}
