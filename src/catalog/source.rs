//! Header source
//!
//! Reads the header row of an uploaded LIBRA output file. Only the headers are
//! of interest here; the year-indexed values stay with the rendering layer.

use std::borrow::Cow;
use std::io::Read;
use std::path::Path;

use tracing::info;

use crate::error::LibraError;

/// Undo spreadsheet formula escaping of a header
///
/// Some exports write `="Run: Module.variable"`. Headers starting with `=`
/// lose every `=` and `"`; anything else is returned unchanged.
pub fn sanitize_header(header: &str) -> Cow<'_, str> {
    if header.starts_with('=') {
        Cow::Owned(header.chars().filter(|c| *c != '=' && *c != '"').collect())
    } else {
        Cow::Borrowed(header)
    }
}

/// Read and sanitise the column headers of a CSV output file
///
/// The first column is the year index and is dropped.
pub fn read_headers<R: Read>(reader: R) -> Result<Vec<String>, LibraError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader
        .headers()?
        .iter()
        .skip(1)
        .map(|h| sanitize_header(h).into_owned())
        .collect();
    Ok(headers)
}

/// Read the column headers of a CSV output file on disk
pub fn read_headers_from_path(path: impl AsRef<Path>) -> Result<Vec<String>, LibraError> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)?;
    let headers = read_headers(file)?;
    info!("Read {} column headers from {}", headers.len(), path.display());
    Ok(headers)
}
