//! Plot requests
//!
//! Validated parameter bundles handed to the rendering layer:
//! - [`PlotParameters`] for line plots, with the canonical `full_name`
//! - [`StackPlotParameters`] for stack plots, with the sibling name family
//! - [`StyleParameters`] for per-run colours and line styles
//! - [`PlotLabels`] for wrapped titles and axis formatting

pub mod compose;
pub mod definitions;
pub mod labels;
pub mod parameters;
pub mod stack;
pub mod style;

pub use compose::{column_name, compose_full_name, compose_with_last};
pub use definitions::{
    line_definitions_from_reader, load_line_definitions, load_stack_definitions,
    stack_definitions_from_reader, DefinitionsError,
};
pub use labels::{wrap_label, PlotLabels};
pub use parameters::{PlotParameters, PlotRequest, ValidationError};
pub use stack::{StackPlotParameters, StackSeries};
pub use style::{fill_color, LineStyle, SeriesStyle, StyleError, StyleParameters, DEFAULT_PALETTE};
