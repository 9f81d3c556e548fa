//! Column header parsing
//!
//! LIBRA output columns are named by convention:
//!
//! ```text
//! <run>: <module>.<variable>
//! <run>: <module>.<variable>[<tok1>, <tok2>, <tok3>]
//! ```
//!
//! Run, module and variable names are made of word characters, whitespace and
//! `$ % / -`. A header that does not match the root form is malformed; a
//! bracket group that does not hold 1–3 tokens is ignored.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum number of array dimensions a LIBRA variable can carry
pub const MAX_DIMENSIONS: usize = 3;

// Unanchored: a prefix that is not part of a run name is skipped
static ROOT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([\w\s$%/-]+):\s([\w\s$%/-]+)\.([\w\s$%/-]+)")
        .expect("root header pattern compiles")
});

static BRACKET_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\[\]]*)\]").expect("bracket pattern compiles"));

static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w&]+$").expect("token pattern compiles"));

/// A header that does not follow the `<run>: <module>.<variable>` convention
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("malformed header '{header}': {reason}")]
pub struct MalformedHeader {
    pub header: String,
    pub reason: String,
}

/// The parts of one column header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderParts {
    pub run: String,
    pub module: String,
    pub variable: String,
    /// Raw dimension tokens, `None` when the header has no usable bracket group
    pub tokens: Option<Vec<String>>,
}

impl HeaderParts {
    /// Catalog key: `"module.variable"`
    pub fn key(&self) -> String {
        variable_key(&self.module, &self.variable)
    }
}

/// `"module.variable"`, the key dimension lists are stored under
pub fn variable_key(module: &str, variable: &str) -> String {
    format!("{}.{}", module, variable)
}

/// Parse a single column header
pub fn parse_header(header: &str) -> Result<HeaderParts, MalformedHeader> {
    let caps = ROOT_PATTERN.captures(header).ok_or_else(|| MalformedHeader {
        header: header.to_string(),
        reason: "expected '<run>: <module>.<variable>'".to_string(),
    })?;

    // Groups 1..=3 always participate when the pattern matches
    let run = caps.get(1).map_or("", |m| m.as_str());
    let module = caps.get(2).map_or("", |m| m.as_str());
    let variable = caps.get(3).map_or("", |m| m.as_str());
    let rest = caps.get(0).map_or("", |m| &header[m.end()..]);

    Ok(HeaderParts {
        run: run.to_string(),
        module: module.to_string(),
        variable: variable.to_string(),
        tokens: parse_bracket(rest),
    })
}

/// Extract 1–3 trimmed tokens from the first `[...]` group in `text`
fn parse_bracket(text: &str) -> Option<Vec<String>> {
    let inner = BRACKET_PATTERN.captures(text)?.get(1)?.as_str();
    let tokens: Vec<String> = inner
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect();

    let shape_ok = (1..=MAX_DIMENSIONS).contains(&tokens.len())
        && tokens.iter().all(|t| TOKEN_PATTERN.is_match(t));
    shape_ok.then_some(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_header_with_dimensions() {
        let parts = parse_header("ScenarioA: Minerals Market.time to have fun[US, LFP]").unwrap();
        assert_eq!(parts.run, "ScenarioA");
        assert_eq!(parts.module, "Minerals Market");
        assert_eq!(parts.variable, "time to have fun");
        assert_eq!(
            parts.tokens,
            Some(vec!["US".to_string(), "LFP".to_string()])
        );
        assert_eq!(parts.key(), "Minerals Market.time to have fun");
    }

    #[test]
    fn test_header_without_dimensions() {
        let parts = parse_header("Base: Battery Market.total demand").unwrap();
        assert_eq!(parts.module, "Battery Market");
        assert_eq!(parts.variable, "total demand");
        assert_eq!(parts.tokens, None);
    }

    #[test]
    fn test_symbols_in_names() {
        let parts = parse_header("High-Li run: RIRA.NPV $/kWh %[US]").unwrap();
        assert_eq!(parts.run, "High-Li run");
        assert_eq!(parts.variable, "NPV $/kWh %");
        assert_eq!(parts.tokens, Some(vec!["US".to_string()]));
    }

    #[test]
    fn test_project_year_token() {
        let parts = parse_header("Base: RIRA.cash flow[Hydro, D&C1]").unwrap();
        assert_eq!(
            parts.tokens,
            Some(vec!["Hydro".to_string(), "D&C1".to_string()])
        );
    }

    #[test]
    fn test_three_tokens_and_spacing() {
        let parts = parse_header("R: HydroPyro.yield[ US ,Ni,  Hydro ]").unwrap();
        assert_eq!(
            parts.tokens,
            Some(vec!["US".to_string(), "Ni".to_string(), "Hydro".to_string()])
        );
    }

    #[test]
    fn test_bad_bracket_ignored() {
        // four tokens
        let parts = parse_header("R: Consumer.x[US, BEV, Ni, Hydro]").unwrap();
        assert_eq!(parts.tokens, None);
        // empty group
        let parts = parse_header("R: Consumer.x[]").unwrap();
        assert_eq!(parts.tokens, None);
        // punctuation inside a token
        let parts = parse_header("R: Consumer.x[U.S]").unwrap();
        assert_eq!(parts.tokens, None);
    }

    #[test]
    fn test_prefix_before_run_name_skipped() {
        let parts = parse_header("(v2) Base: RIRA.NPV[US]").unwrap();
        assert_eq!(parts.run, " Base");
        assert_eq!(parts.module, "RIRA");
        assert_eq!(parts.variable, "NPV");
        assert_eq!(parts.tokens, Some(vec!["US".to_string()]));

        // the character right before ':' must still belong to the run name
        assert!(parse_header("Base (v2): RIRA.NPV[US]").is_err());
    }

    #[test]
    fn test_malformed_headers() {
        for header in ["Years", "", "no colon.here", "Run:Module.var", "Run: NoDot"] {
            let err = parse_header(header).unwrap_err();
            assert_eq!(err.header, header);
        }
    }
}
