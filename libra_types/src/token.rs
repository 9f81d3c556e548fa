//! Array tokens
//!
//! A validated array value such as `US` or `NMC811`, tagged with its kind.

use serde::{Deserialize, Serialize};

use crate::error::TokenError;
use crate::kind::DimensionKind;
use crate::registry::{registry, DimensionRegistry, TokenClass};

/// A single validated array value
///
/// Immutable once built. Equality, hashing and ordering use `(raw, kind)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ArrayToken {
    raw: String,
    kind: DimensionKind,
}

impl ArrayToken {
    /// Classify `raw` against the built-in registry
    ///
    /// Surrounding whitespace is ignored. Bare kind aliases such as `region`
    /// are rejected: they name a whole dimension, not a value in it.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, TokenError> {
        Self::with_registry(raw, registry())
    }

    /// Classify `raw` against an explicit registry
    pub fn with_registry(
        raw: impl AsRef<str>,
        registry: &DimensionRegistry,
    ) -> Result<Self, TokenError> {
        let raw = raw.as_ref().trim();
        match registry.lookup(raw) {
            Some(TokenClass::Value(kind)) => Ok(Self {
                raw: raw.to_string(),
                kind,
            }),
            Some(TokenClass::Alias(kind)) => Err(TokenError::generic_alias(raw, kind)),
            None => Err(TokenError::InvalidArrayType {
                raw: raw.to_string(),
                reason: "it is not in any dimension's domain".to_string(),
            }),
        }
    }

    /// Parse a comma-separated list (`"US, LFP"`), skipping empty entries
    pub fn parse_list(list: &str) -> Result<Vec<Self>, TokenError> {
        list.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(Self::new)
            .collect()
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn kind(&self) -> DimensionKind {
        self.kind
    }

    /// A token of the same kind holding `value`, if `value` belongs to the kind
    pub fn sibling(&self, value: &str) -> Option<Self> {
        registry().contains(self.kind, value).then(|| Self {
            raw: value.to_string(),
            kind: self.kind,
        })
    }
}

impl std::fmt::Display for ArrayToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl std::str::FromStr for ArrayToken {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ArrayToken {
    type Error = TokenError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ArrayToken> for String {
    fn from(token: ArrayToken) -> Self {
        token.raw
    }
}
