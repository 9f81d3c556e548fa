//! Token classification errors

use thiserror::Error;

use crate::kind::DimensionKind;

/// Failure to turn a raw string into a dimension token
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// The raw value is in no kind's domain and is no kind alias
    #[error("'{0}' is not a known LIBRA dimension token")]
    UnknownDimensionToken(String),

    /// The raw value cannot be used as a concrete array value
    #[error("'{raw}' is not a valid LIBRA array value: {reason}")]
    InvalidArrayType { raw: String, reason: String },
}

impl TokenError {
    /// The raw string that was rejected
    pub fn raw(&self) -> &str {
        match self {
            TokenError::UnknownDimensionToken(raw) => raw,
            TokenError::InvalidArrayType { raw, .. } => raw,
        }
    }

    pub(crate) fn generic_alias(raw: &str, kind: DimensionKind) -> Self {
        TokenError::InvalidArrayType {
            raw: raw.to_string(),
            reason: format!(
                "it is the generic name of the {} dimension, not one of its values",
                kind.label()
            ),
        }
    }
}
