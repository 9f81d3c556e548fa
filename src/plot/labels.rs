//! Display labels
//!
//! Formats the text a rendering layer puts around a plot: wrapped title and
//! y label, tick format and axis bounds.

use serde::Serialize;

use super::parameters::PlotParameters;
use crate::config::LibraConfig;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotLabels {
    pub title: String,
    pub y_label: String,
    pub x_label: Option<String>,
    /// `".2f"` when decimals are requested, empty otherwise
    pub tick_format: &'static str,
    pub max_y: Option<f64>,
    /// First and last year on the x axis
    pub x_range: (i32, i32),
    pub tag: Option<String>,
}

impl PlotLabels {
    pub fn from_parameters(params: &PlotParameters, config: &LibraConfig) -> Self {
        let labels = &config.labels;
        let title = if params.is_exogenous_input() {
            format!("{}{}", labels.exogenous_prefix, params.title())
        } else {
            params.title().to_string()
        };

        Self {
            title: wrap_label(&title, labels.title_width, &labels.line_break),
            y_label: wrap_label(params.y_label(), labels.y_label_width, &labels.line_break),
            x_label: params.x_label().map(str::to_string),
            tick_format: if params.decimal() { ".2f" } else { "" },
            max_y: params.max_y(),
            x_range: (config.years.start_year, config.years.end_year),
            tag: params.tag().map(str::to_string),
        }
    }
}

/// Wrap `text` to `width` columns and join the lines with `line_break`
///
/// Greedy first-fit wrapping, so a line is only broken when the next word
/// does not fit.
pub fn wrap_label(text: &str, width: usize, line_break: &str) -> String {
    let options = textwrap::Options::new(width).wrap_algorithm(textwrap::WrapAlgorithm::FirstFit);
    textwrap::wrap(text, options).join(line_break)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plot::PlotRequest;
    use pretty_assertions::assert_eq;

    fn params(request: PlotRequest) -> PlotParameters {
        PlotParameters::build(request).unwrap()
    }

    #[test]
    fn test_exogenous_prefix() {
        let p = params(
            PlotRequest::new("RIRA", "loan rate", "Loan rate", "%").with_exogenous_input(true),
        );
        let labels = PlotLabels::from_parameters(&p, &LibraConfig::default());
        assert_eq!(labels.title, "LIBRA input: Loan rate");
        assert_eq!(labels.tick_format, "");
    }

    #[test]
    fn test_long_title_wrapped() {
        let p = params(
            PlotRequest::new(
                "Battery Market",
                "demand",
                "Total lithium-ion battery demand across all vehicle segments and regions",
                "Demand in gigawatt hours per year for all chemistries",
            )
            .with_decimal(true),
        );
        let labels = PlotLabels::from_parameters(&p, &LibraConfig::default());
        assert_eq!(
            labels.title,
            "Total lithium-ion battery demand across all<br>vehicle segments and regions"
        );
        assert!(labels.y_label.contains("<br>"));
        assert!(labels
            .y_label
            .split("<br>")
            .all(|line| line.chars().count() <= 30));
        assert_eq!(labels.tick_format, ".2f");
    }

    #[test]
    fn test_configured_labels_and_years() {
        let config: LibraConfig = serde_yaml::from_str(
            "years: {start_year: 2025, end_year: 2040}\nlabels: {exogenous_prefix: 'Input: ', line_break: ' | ', title_width: 12}",
        )
        .unwrap();
        let p = params(
            PlotRequest::new("RIRA", "loan rate", "Loan rate by region", "%")
                .with_exogenous_input(true),
        );
        let labels = PlotLabels::from_parameters(&p, &config);
        assert_eq!(labels.title, "Input: Loan | rate by | region");
        assert_eq!(labels.x_range, (2025, 2040));

        let defaults = PlotLabels::from_parameters(&p, &LibraConfig::default());
        assert_eq!(defaults.x_range, (2020, 2050));
    }

    #[test]
    fn test_short_text_untouched() {
        assert_eq!(wrap_label("GWh", 30, "<br>"), "GWh");
        assert_eq!(wrap_label("a b c", 3, "\n"), "a b\nc");
    }
}
