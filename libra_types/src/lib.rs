//! LIBRA Types - Level 1 Foundation Types
//!
//! This crate holds the closed vocabulary of LIBRA array dimensions. Every
//! other part of the workspace (header catalog, plot parameters, equations
//! parser) validates array values against the table defined here.
//!
//! ## Contents
//!
//! - [`DimensionKind`] - the closed set of array dimension kinds
//! - [`DimensionRegistry`] - kind → ordered domain, plus the derived
//!   token → kind reverse index
//! - [`ArrayToken`] - a single validated array value
//! - [`TokenError`] - classification failures
//!
//! ## Rules
//!
//! 1. **ONE TABLE** - domains are declared once in `registry.rs`; the reverse
//!    index is generated from them, never written by hand.
//! 2. **NO WORKSPACE DEPENDENCIES**
//! 3. **THREAD SAFE** - the registry is immutable after first use.

pub mod error;
pub mod kind;
pub mod registry;
pub mod token;

pub use error::TokenError;
pub use kind::DimensionKind;
pub use registry::{registry, DimensionRegistry};
pub use token::ArrayToken;
