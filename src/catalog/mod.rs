//! Header catalog
//!
//! Parses convention-encoded LIBRA column headers into a browsable catalog of
//! runs, modules, variables and observed array dimensions.

pub mod builder;
pub mod header;
pub mod source;

pub use builder::{Catalog, CatalogBuilder, CatalogReport};
pub use header::{parse_header, variable_key, HeaderParts, MalformedHeader, MAX_DIMENSIONS};
pub use source::{read_headers, read_headers_from_path, sanitize_header};
