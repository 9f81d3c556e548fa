//! Equations listing parser
//!
//! Reads the exogenous inputs and constants out of a Stella equations export.
//! Only the lines that matter are recognised; everything else is skipped.
//!
//! ```text
//! Battery_Market:                         module header
//! base demand[US, BEV] = 120.5            constant
//! price decline = GRAPH(TIME)             graphical input, points follow
//! (2020, 1.0), (2030, 0.8), (2050, 0.5)
//! INIT battery stock = 0                  stock initialiser, skipped
//! ```

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{char, space0},
    combinator::{all_consuming, map, map_res, opt, value},
    multi::many1,
    sequence::{delimited, separated_pair, terminated, tuple},
    IResult,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use libra_types::{ArrayToken, TokenError};

use crate::catalog::MAX_DIMENSIONS;
use crate::plot::compose_full_name;

/// LIBRA modules as they appear in output headers
pub const KNOWN_MODULES: [&str; 14] = [
    "RIRA",
    "Minerals Market",
    "HydroPyro",
    "DirectRecycle",
    "Battery Market",
    "Manufacturing",
    "Cathode",
    "Consumer",
    "BES",
    "LDV",
    "LCV",
    "MHDV",
    "Two3Wheel",
    "EBus",
];

// ============================================================================
// Types
// ============================================================================

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EquationParseError {
    #[error("line {line}: definition of '{variable}' appears before any module header")]
    OutsideModule { line: usize, variable: String },

    #[error("line {line}: invalid array value in '{variable}': {source}")]
    InvalidToken {
        line: usize,
        variable: String,
        #[source]
        source: TokenError,
    },

    #[error("line {line}: '{variable}' has {count} array values (at most {max})")]
    TooManyTokens {
        line: usize,
        variable: String,
        count: usize,
        max: usize,
    },

    #[error("line {line}: GRAPH(TIME) for '{variable}' is not followed by a list of points")]
    MissingGraphPoints { line: usize, variable: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputValue {
    Constant(f64),
    /// `(time, value)` pairs of a graphical function of time
    Graph(Vec<(f64, f64)>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputVariable {
    pub variable: String,
    pub array_tokens: Vec<ArrayToken>,
    pub value: InputValue,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleInputs {
    pub module: String,
    pub inputs: Vec<InputVariable>,
}

impl ModuleInputs {
    /// Canonical names of every input, as they appear in output headers
    pub fn full_names(&self) -> Vec<String> {
        self.inputs
            .iter()
            .map(|input| {
                let raws: Vec<&str> = input.array_tokens.iter().map(ArrayToken::raw).collect();
                compose_full_name(&self.module, &input.variable, &raws)
            })
            .collect()
    }
}

// ============================================================================
// Line parsers
// ============================================================================

/// What the right-hand side of a definition holds
#[derive(Debug, Clone, Copy, PartialEq)]
enum Rhs {
    Number(f64),
    GraphOfTime,
}

#[derive(Debug, Clone, PartialEq)]
struct Definition<'a> {
    name: &'a str,
    dims: Option<&'a str>,
    rhs: Rhs,
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == ' ' || c == '\t' || "$%/-".contains(c)
}

fn module_header(input: &str) -> IResult<&str, &str> {
    all_consuming(terminated(
        take_while1(|c: char| c.is_ascii_alphabetic() || c == '_'),
        tuple((char(':'), space0)),
    ))(input)
}

fn dims(input: &str) -> IResult<&str, &str> {
    delimited(
        char('['),
        take_while1(|c: char| c.is_alphanumeric() || c == '_' || c == '&' || c == ',' || c == ' '),
        char(']'),
    )(input)
}

/// Plain decimal literal: digits and `.` only, no sign, exponent or `nan`/`inf`
fn decimal(input: &str) -> IResult<&str, f64> {
    map_res(
        take_while1(|c: char| c.is_ascii_digit() || c == '.'),
        str::parse::<f64>,
    )(input)
}

fn rhs(input: &str) -> IResult<&str, Rhs> {
    alt((
        value(Rhs::GraphOfTime, tag("GRAPH(TIME)")),
        map(decimal, Rhs::Number),
    ))(input)
}

fn definition(input: &str) -> IResult<&str, Definition<'_>> {
    let (input, name) = take_while1(is_name_char)(input)?;
    let (input, dims) = opt(dims)(input)?;
    let (input, _) = tuple((space0, char('='), space0))(input)?;
    let (input, rhs) = all_consuming(terminated(rhs, space0))(input)?;
    Ok((
        input,
        Definition {
            name: name.trim(),
            dims,
            rhs,
        },
    ))
}

fn point(input: &str) -> IResult<&str, (f64, f64)> {
    delimited(
        tuple((char('('), space0)),
        separated_pair(decimal, tuple((space0, char(','), space0)), decimal),
        tuple((space0, char(')'))),
    )(input)
}

fn points(input: &str) -> IResult<&str, Vec<(f64, f64)>> {
    all_consuming(many1(delimited(
        space0,
        point,
        tuple((space0, opt(char(',')), space0)),
    )))(input)
}

// ============================================================================
// Public API
// ============================================================================

/// Parse an equations listing into per-module inputs
///
/// Modules keep the order of their first header; a repeated header appends to
/// the existing module.
pub fn parse_equations(text: &str) -> Result<Vec<ModuleInputs>, EquationParseError> {
    let mut modules: Vec<ModuleInputs> = Vec::new();
    let mut current: Option<usize> = None;
    let mut lines = text.lines().enumerate().map(|(i, l)| (i + 1, l.trim()));

    while let Some((line_no, line)) = lines.next() {
        if let Ok((_, name)) = module_header(line) {
            let module = name.replace('_', " ");
            if KNOWN_MODULES.contains(&module.as_str()) {
                let index = match modules.iter().position(|m| m.module == module) {
                    Some(index) => index,
                    None => {
                        modules.push(ModuleInputs {
                            module,
                            inputs: Vec::new(),
                        });
                        modules.len() - 1
                    }
                };
                current = Some(index);
            } else {
                debug!(line = line_no, "ignoring unknown module header '{}'", name);
            }
            continue;
        }

        let Ok((_, def)) = definition(line) else {
            continue;
        };
        if def.name.is_empty() || def.name.starts_with("INIT ") {
            continue;
        }

        let Some(index) = current else {
            return Err(EquationParseError::OutsideModule {
                line: line_no,
                variable: def.name.to_string(),
            });
        };

        let array_tokens = parse_dims(line_no, &def)?;
        let input_value = match def.rhs {
            Rhs::Number(n) => InputValue::Constant(n),
            Rhs::GraphOfTime => {
                let graph = lines
                    .next()
                    .and_then(|(_, next)| points(next).ok())
                    .map(|(_, pts)| pts)
                    .ok_or_else(|| EquationParseError::MissingGraphPoints {
                        line: line_no,
                        variable: def.name.to_string(),
                    })?;
                InputValue::Graph(graph)
            }
        };

        modules[index].inputs.push(InputVariable {
            variable: def.name.to_string(),
            array_tokens,
            value: input_value,
        });
    }

    info!(
        "Parsed {} inputs across {} modules",
        modules.iter().map(|m| m.inputs.len()).sum::<usize>(),
        modules.len()
    );
    Ok(modules)
}

fn parse_dims(line: usize, def: &Definition<'_>) -> Result<Vec<ArrayToken>, EquationParseError> {
    let Some(dims) = def.dims else {
        return Ok(Vec::new());
    };
    let tokens = ArrayToken::parse_list(dims).map_err(|source| EquationParseError::InvalidToken {
        line,
        variable: def.name.to_string(),
        source,
    })?;
    if tokens.len() > MAX_DIMENSIONS {
        return Err(EquationParseError::TooManyTokens {
            line,
            variable: def.name.to_string(),
            count: tokens.len(),
            max: MAX_DIMENSIONS,
        });
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const LISTING: &str = "\
Top-Level Model:
Battery_Market:
base demand[US, BEV] = 120.5
price decline = GRAPH(TIME)
(2020, 1.0), (2030, 0.8), (2050, 0.5)
INIT battery stock = 0
demand growth = base demand * 1.05
Minerals_Market:
ore grade[Ni] = 0.02
";

    #[test]
    fn test_parse_listing() {
        let modules = parse_equations(LISTING).unwrap();
        assert_eq!(modules.len(), 2);

        let battery = &modules[0];
        assert_eq!(battery.module, "Battery Market");
        assert_eq!(battery.inputs.len(), 2);
        assert_eq!(battery.inputs[0].variable, "base demand");
        assert_eq!(battery.inputs[0].value, InputValue::Constant(120.5));
        assert_eq!(
            battery.inputs[1].value,
            InputValue::Graph(vec![(2020.0, 1.0), (2030.0, 0.8), (2050.0, 0.5)])
        );

        let minerals = &modules[1];
        assert_eq!(minerals.module, "Minerals Market");
        assert_eq!(minerals.full_names(), vec!["Minerals Market.ore grade[Ni]"]);
    }

    #[test]
    fn test_full_names_match_header_convention() {
        let modules = parse_equations(LISTING).unwrap();
        assert_eq!(
            modules[0].full_names(),
            vec![
                "Battery Market.base demand[US, BEV]",
                "Battery Market.price decline"
            ]
        );
    }

    #[test]
    fn test_definition_outside_module() {
        let err = parse_equations("rate = 1\n").unwrap_err();
        assert_eq!(
            err,
            EquationParseError::OutsideModule {
                line: 1,
                variable: "rate".to_string()
            }
        );
    }

    #[test]
    fn test_invalid_dimension() {
        let err = parse_equations("RIRA:\nhurdle rate[Moon] = 0.1\n").unwrap_err();
        assert!(matches!(err, EquationParseError::InvalidToken { line: 2, .. }));
    }

    #[test]
    fn test_graph_without_points() {
        let err = parse_equations("RIRA:\nloan rate = GRAPH(TIME)\n").unwrap_err();
        assert!(matches!(err, EquationParseError::MissingGraphPoints { line: 2, .. }));
    }

    #[test]
    fn test_repeated_module_header_appends() {
        let modules = parse_equations("LDV:\na = 1\nRIRA:\nb = 2\nLDV:\nc = 3\n").unwrap();
        assert_eq!(modules.len(), 2);
        assert_eq!(modules[0].inputs.len(), 2);
        assert_eq!(modules[0].inputs[1].variable, "c");
    }

    #[test]
    fn test_non_decimal_constants_skipped() {
        let modules =
            parse_equations("RIRA:\nrate = nan\nother = inf\nbig = 1e9\nodd = 1.2.3\nok = .5\n")
                .unwrap();
        let inputs = &modules[0].inputs;
        assert_eq!(inputs.len(), 1);
        assert_eq!(inputs[0].variable, "ok");
        assert_eq!(inputs[0].value, InputValue::Constant(0.5));
    }

    #[test]
    fn test_line_parsers() {
        assert_eq!(module_header("Battery_Market:"), Ok(("", "Battery_Market")));
        assert!(module_header("x = 1").is_err());

        let (_, def) = definition("yield[US, Hydro] = 0.95").unwrap();
        assert_eq!(def.name, "yield");
        assert_eq!(def.dims, Some("US, Hydro"));
        assert_eq!(def.rhs, Rhs::Number(0.95));

        assert!(definition("x = a + b").is_err());
        assert!(definition("x = -1").is_err());
        assert!(points("(nan, 1)").is_err());
        assert_eq!(points("(1, 2) (3,4)").unwrap().1, vec![(1.0, 2.0), (3.0, 4.0)]);
    }
}
