//! Plot definition files
//!
//! Predefined plots are kept in CSV files with one plot per row:
//!
//! ```text
//! module,variable,array_vals,title,y_label,max_yval,decimal,is_exogenous_input,tag
//! Battery Market,demand,"US, LFP",Battery demand,GWh,,TRUE,FALSE,
//! ```
//!
//! `array_vals` is a comma-separated list, booleans are `TRUE` (any case) or
//! anything else for false, and a blank `max_yval` means no limit. Loading
//! returns a caller-owned list; nothing is registered globally.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use super::parameters::{PlotParameters, PlotRequest, ValidationError};
use super::stack::StackPlotParameters;

#[derive(Debug, Error)]
pub enum DefinitionsError {
    #[error("row {row}: {source}")]
    InvalidRow {
        row: usize,
        #[source]
        source: ValidationError,
    },

    #[error("row {row}: max_yval '{value}' is not a number")]
    InvalidNumber { row: usize, value: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// One row of a definitions file, as written
#[derive(Debug, Clone, Deserialize)]
struct DefinitionRow {
    module: String,
    variable: String,
    #[serde(default)]
    array_vals: String,
    title: String,
    y_label: String,
    #[serde(default)]
    x_label: Option<String>,
    #[serde(default)]
    max_yval: Option<String>,
    #[serde(default)]
    decimal: Option<String>,
    #[serde(default)]
    is_exogenous_input: Option<String>,
    #[serde(default)]
    tag: Option<String>,
}

fn flag(value: Option<&str>) -> bool {
    value.is_some_and(|v| v.trim().eq_ignore_ascii_case("TRUE"))
}

impl DefinitionRow {
    fn into_request(self, row: usize) -> Result<PlotRequest, DefinitionsError> {
        let max_y = match self.max_yval.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(value) => Some(value.parse::<f64>().map_err(|_| {
                DefinitionsError::InvalidNumber {
                    row,
                    value: value.to_string(),
                }
            })?),
        };

        Ok(PlotRequest {
            module: self.module,
            variable: self.variable,
            array_values: self
                .array_vals
                .split(',')
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .collect(),
            title: self.title,
            y_label: self.y_label,
            x_label: self.x_label,
            max_y,
            decimal: flag(self.decimal.as_deref()),
            is_exogenous_input: flag(self.is_exogenous_input.as_deref()),
            tag: self.tag,
        })
    }
}

/// Read the plot requests of a definitions file, numbered from 1
pub fn read_requests<R: Read>(reader: R) -> Result<Vec<(usize, PlotRequest)>, DefinitionsError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    csv_reader
        .deserialize::<DefinitionRow>()
        .enumerate()
        .map(|(i, record)| {
            let row = i + 1;
            Ok((row, record?.into_request(row)?))
        })
        .collect()
}

/// Build line plot parameters from a definitions CSV
pub fn line_definitions_from_reader<R: Read>(
    reader: R,
) -> Result<Vec<PlotParameters>, DefinitionsError> {
    read_requests(reader)?
        .into_iter()
        .map(|(row, request)| {
            PlotParameters::build(request)
                .map_err(|source| DefinitionsError::InvalidRow { row, source })
        })
        .collect()
}

/// Build stack plot parameters from a definitions CSV
pub fn stack_definitions_from_reader<R: Read>(
    reader: R,
) -> Result<Vec<StackPlotParameters>, DefinitionsError> {
    read_requests(reader)?
        .into_iter()
        .map(|(row, request)| {
            StackPlotParameters::build(request)
                .map_err(|source| DefinitionsError::InvalidRow { row, source })
        })
        .collect()
}

pub fn load_line_definitions(path: &Path) -> Result<Vec<PlotParameters>, DefinitionsError> {
    line_definitions_from_reader(std::fs::File::open(path)?)
}

pub fn load_stack_definitions(path: &Path) -> Result<Vec<StackPlotParameters>, DefinitionsError> {
    stack_definitions_from_reader(std::fs::File::open(path)?)
}
