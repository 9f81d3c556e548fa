//! Stack plot parameters
//!
//! A stack plot expands the last selected dimension across its whole domain:
//! `[US, LFP]` becomes one series per battery chemistry, `[US, LCO]` ...
//! `[US, NMC955]`, in the registry's declared order. That order is the legend
//! order.

use serde::Serialize;

use libra_types::{registry, DimensionKind};

use super::compose::{column_name, compose_with_last};
use super::parameters::{PlotParameters, PlotRequest, ValidationError};
use super::style::{fill_color, StyleError};
use crate::config::LibraConfig;

/// One stacked series: the domain value and its canonical name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StackSeries<'a> {
    pub label: &'a str,
    pub full_name: &'a str,
}

/// Validated parameters of one stack plot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StackPlotParameters {
    #[serde(flatten)]
    parameters: PlotParameters,
    stack_kind: DimensionKind,
    stack_domain: Vec<String>,
    sibling_names: Vec<String>,
}

impl StackPlotParameters {
    /// Validate a request and derive the stacked sibling names
    pub fn build(request: PlotRequest) -> Result<Self, ValidationError> {
        let parameters = PlotParameters::build(request)?;
        let last = parameters
            .array_tokens()
            .last()
            .ok_or(ValidationError::MissingStackDimension)?;

        let stack_kind = last.kind();
        let stack_domain = registry().domain_of(stack_kind).to_vec();
        let raws: Vec<&str> = parameters
            .array_tokens()
            .iter()
            .map(|t| t.raw())
            .collect();
        let sibling_names = stack_domain
            .iter()
            .map(|value| {
                compose_with_last(parameters.module(), parameters.variable(), &raws, value)
            })
            .collect();

        Ok(Self {
            parameters,
            stack_kind,
            stack_domain,
            sibling_names,
        })
    }

    pub fn parameters(&self) -> &PlotParameters {
        &self.parameters
    }

    /// Kind of the expanded (last) dimension
    pub fn stack_kind(&self) -> DimensionKind {
        self.stack_kind
    }

    pub fn stack_domain(&self) -> &[String] {
        &self.stack_domain
    }

    pub fn sibling_names(&self) -> &[String] {
        &self.sibling_names
    }

    /// Series in legend order
    pub fn series(&self) -> impl Iterator<Item = StackSeries<'_>> {
        self.stack_domain
            .iter()
            .zip(&self.sibling_names)
            .map(|(label, full_name)| StackSeries { label, full_name })
    }

    /// Fill colour of each stacked series, in legend order
    ///
    /// Cycles the configured palette at `stack_alpha` opacity.
    pub fn fill_colors(&self, config: &LibraConfig) -> Result<Vec<String>, StyleError> {
        if config.palette.is_empty() {
            return Err(StyleError::EmptyPalette);
        }
        let palette = &config.palette;
        (0..self.stack_domain.len())
            .map(|i| fill_color(&palette[i % palette.len()], config.stack_alpha))
            .collect()
    }

    /// Column names of every stacked series in one run
    pub fn column_names(&self, run: &str) -> Vec<String> {
        self.sibling_names
            .iter()
            .map(|name| column_name(run, name))
            .collect()
    }
}
