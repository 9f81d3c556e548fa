//! Plot parameters
//!
//! A [`PlotRequest`] is what the UI (or a definitions file) hands over: plain
//! strings and flags. [`PlotParameters::build`] validates it against the
//! dimension registry and composes the canonical column name. Parameters are
//! built per plot and dropped after use; nothing keeps a list of them.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use libra_types::{ArrayToken, TokenError};

use super::compose::{column_name, compose_full_name};
use crate::catalog::MAX_DIMENSIONS;

// =============================================================================
// ERROR TYPES
// =============================================================================

/// A plot request that violates one of the parameter invariants
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Module name cannot be empty")]
    EmptyModule,

    #[error("Variable name cannot be empty")]
    EmptyVariable,

    #[error("Title cannot be empty")]
    EmptyTitle,

    #[error("Y label cannot be empty")]
    EmptyYLabel,

    #[error("Number of array values cannot exceed {max} (got {count})")]
    TooManyTokens { count: usize, max: usize },

    #[error("Invalid array value at position {position}: {source}")]
    InvalidToken {
        position: usize,
        #[source]
        source: TokenError,
    },

    #[error("Maximum y value must be a finite, non-negative number (got {0})")]
    InvalidMaxY(f64),

    #[error("At least one array value is required for a stack plot")]
    MissingStackDimension,
}

impl ValidationError {
    /// Short name of the violated constraint, for UI display
    pub fn constraint(&self) -> &'static str {
        match self {
            ValidationError::EmptyModule => "module",
            ValidationError::EmptyVariable => "variable",
            ValidationError::EmptyTitle => "title",
            ValidationError::EmptyYLabel => "y_label",
            ValidationError::TooManyTokens { .. } => "array_values",
            ValidationError::InvalidToken { .. } => "array_values",
            ValidationError::InvalidMaxY(_) => "max_y",
            ValidationError::MissingStackDimension => "array_values",
        }
    }
}

// =============================================================================
// REQUEST
// =============================================================================

/// Unvalidated plot request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlotRequest {
    pub module: String,
    pub variable: String,
    /// Raw array values; empty strings are ignored
    #[serde(default)]
    pub array_values: Vec<String>,
    pub title: String,
    pub y_label: String,
    #[serde(default)]
    pub x_label: Option<String>,
    #[serde(default)]
    pub max_y: Option<f64>,
    #[serde(default)]
    pub decimal: bool,
    #[serde(default)]
    pub is_exogenous_input: bool,
    #[serde(default)]
    pub tag: Option<String>,
}

impl PlotRequest {
    pub fn new(
        module: impl Into<String>,
        variable: impl Into<String>,
        title: impl Into<String>,
        y_label: impl Into<String>,
    ) -> Self {
        Self {
            module: module.into(),
            variable: variable.into(),
            title: title.into(),
            y_label: y_label.into(),
            ..Default::default()
        }
    }

    pub fn with_array_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.array_values = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_tokens(mut self, tokens: &[ArrayToken]) -> Self {
        self.array_values = tokens.iter().map(|t| t.raw().to_string()).collect();
        self
    }

    pub fn with_x_label(mut self, x_label: impl Into<String>) -> Self {
        self.x_label = Some(x_label.into());
        self
    }

    pub fn with_max_y(mut self, max_y: f64) -> Self {
        self.max_y = Some(max_y);
        self
    }

    pub fn with_decimal(mut self, decimal: bool) -> Self {
        self.decimal = decimal;
        self
    }

    pub fn with_exogenous_input(mut self, is_exogenous_input: bool) -> Self {
        self.is_exogenous_input = is_exogenous_input;
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }
}

// =============================================================================
// PARAMETERS
// =============================================================================

/// Validated parameters of one line plot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotParameters {
    module: String,
    variable: String,
    array_tokens: Vec<ArrayToken>,
    title: String,
    y_label: String,
    x_label: Option<String>,
    max_y: Option<f64>,
    decimal: bool,
    is_exogenous_input: bool,
    tag: Option<String>,
    full_name: String,
}

impl PlotParameters {
    /// Validate a request and compose its canonical name
    pub fn build(request: PlotRequest) -> Result<Self, ValidationError> {
        let module = request.module.trim().to_string();
        if module.is_empty() {
            return Err(ValidationError::EmptyModule);
        }
        if request.variable.trim().is_empty() {
            return Err(ValidationError::EmptyVariable);
        }
        if request.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if request.y_label.trim().is_empty() {
            return Err(ValidationError::EmptyYLabel);
        }

        let raw_values: Vec<&str> = request
            .array_values
            .iter()
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .collect();
        if raw_values.len() > MAX_DIMENSIONS {
            return Err(ValidationError::TooManyTokens {
                count: raw_values.len(),
                max: MAX_DIMENSIONS,
            });
        }
        let array_tokens = raw_values
            .iter()
            .enumerate()
            .map(|(position, raw)| {
                ArrayToken::new(raw)
                    .map_err(|source| ValidationError::InvalidToken { position, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let max_y = match request.max_y {
            Some(v) if !v.is_finite() || v < 0.0 => return Err(ValidationError::InvalidMaxY(v)),
            // 0 is the UI's "no limit" value
            Some(v) if v == 0.0 => None,
            other => other,
        };

        let full_name = compose_full_name(
            &module,
            &request.variable,
            &array_tokens.iter().map(ArrayToken::raw).collect::<Vec<_>>(),
        );

        Ok(Self {
            module,
            variable: request.variable,
            array_tokens,
            title: request.title,
            y_label: request.y_label,
            x_label: request.x_label.filter(|l| !l.trim().is_empty()),
            max_y,
            decimal: request.decimal,
            is_exogenous_input: request.is_exogenous_input,
            tag: request.tag.filter(|t| !t.trim().is_empty()),
            full_name,
        })
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn variable(&self) -> &str {
        &self.variable
    }

    pub fn array_tokens(&self) -> &[ArrayToken] {
        &self.array_tokens
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn y_label(&self) -> &str {
        &self.y_label
    }

    pub fn x_label(&self) -> Option<&str> {
        self.x_label.as_deref()
    }

    pub fn max_y(&self) -> Option<f64> {
        self.max_y
    }

    pub fn decimal(&self) -> bool {
        self.decimal
    }

    pub fn is_exogenous_input(&self) -> bool {
        self.is_exogenous_input
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Canonical lookup key: `module.variable[tok, ...]`
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Column names of this variable in each of `runs`
    pub fn column_names<S: AsRef<str>>(&self, runs: &[S]) -> Vec<String> {
        runs.iter()
            .map(|run| column_name(run.as_ref(), &self.full_name))
            .collect()
    }
}
