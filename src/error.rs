//! Error types for the LIBRA plotting core
//!
//! Each concern owns a `thiserror` enum next to its code; `LibraError` gathers
//! them for callers that deal with several at once (the CLI, file loaders).
//! None of these errors is fatal to the process: a rejected header, token or
//! plot request only fails that one call.

use thiserror::Error;

pub use libra_types::TokenError;

pub use crate::catalog::MalformedHeader;
pub use crate::equations::EquationParseError;
pub use crate::plot::{DefinitionsError, StyleError, ValidationError};

/// Main error type for the crate
#[derive(Error, Debug)]
pub enum LibraError {
    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Style error: {0}")]
    Style(#[from] StyleError),

    #[error("Plot definitions error: {0}")]
    Definitions(#[from] DefinitionsError),

    #[error("Equations parse error: {0}")]
    Equations(#[from] EquationParseError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LibraError>;

impl LibraError {
    /// Whether the error comes from a user selection rather than from a file
    ///
    /// The UI shows these inline next to the plot instead of as upload errors.
    pub fn is_user_input(&self) -> bool {
        matches!(
            self,
            LibraError::Token(_) | LibraError::Validation(_) | LibraError::Style(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_error_converts() {
        let err: LibraError = TokenError::UnknownDimensionToken("Mars".to_string()).into();
        assert!(err.is_user_input());
        assert!(err.to_string().contains("Mars"));
    }

    #[test]
    fn test_io_error_is_not_user_input() {
        let err: LibraError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(!err.is_user_input());
    }
}
