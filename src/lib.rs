//! LIBRA visualization core
//!
//! Turns the column headers of a LIBRA system-dynamics output file into a
//! browsable catalog, and turns plot selections into validated parameter
//! bundles carrying the canonical column names a renderer must look up.
//!
//! ## Pipeline
//! Output CSV -> headers -> [`Catalog`] -> selector options -> [`PlotRequest`]
//! -> [`PlotParameters`] / [`StackPlotParameters`] -> column names per run
//!
//! ## Quick Start
//!
//! ```rust
//! use libra_viz::{CatalogBuilder, PlotParameters, PlotRequest};
//!
//! let catalog = CatalogBuilder::build(["Base: Battery Market.demand[US, LFP]"]);
//! assert!(catalog.has_variable("Battery Market", "demand"));
//!
//! let plot = PlotParameters::build(
//!     PlotRequest::new("Battery Market", "demand", "Battery demand", "GWh")
//!         .with_array_values(["US", "LFP"]),
//! )
//! .unwrap();
//! assert_eq!(plot.full_name(), "Battery Market.demand[US, LFP]");
//! ```

// Core error handling
pub mod error;

// Header parsing and the per-file catalog
pub mod catalog;

// YAML configuration and predefined plot definitions
pub mod config;

// Equations listing (exogenous inputs)
pub mod equations;

// Validated plot parameters, labels and styles
pub mod plot;

// Cascading dropdown options
pub mod selector;

pub use catalog::{parse_header, Catalog, CatalogBuilder, HeaderParts, MalformedHeader};
pub use config::{ConfigLoader, LibraConfig};
pub use equations::{parse_equations, InputValue, ModuleInputs};
pub use error::{LibraError, Result};
pub use plot::{
    compose_full_name, compose_with_last, PlotLabels, PlotParameters, PlotRequest,
    StackPlotParameters, StyleParameters, ValidationError,
};

pub use libra_types::{registry, ArrayToken, DimensionKind, DimensionRegistry, TokenError};
