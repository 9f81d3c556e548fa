//! Cascading selector options
//!
//! Module list → variable list → up to three dimension lists. Everything here
//! is a pure function of a [`Catalog`]; the UI passes the current catalog on
//! every call instead of holding one.

use serde::Serialize;
use tracing::debug;

use libra_types::{registry, DimensionKind};

use crate::catalog::{Catalog, MAX_DIMENSIONS};

/// One dropdown entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

impl SelectOption {
    fn same(value: &str) -> Self {
        Self {
            label: value.to_string(),
            value: value.to_string(),
        }
    }
}

/// Options for one dimension position of a variable
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DimensionChoice {
    pub kind: DimensionKind,
    /// Full domain of `kind`, sorted
    pub options: Vec<SelectOption>,
    /// Pre-selected value: first sorted option
    pub default: String,
}

fn sorted_options<'a>(values: impl IntoIterator<Item = &'a String>) -> Vec<SelectOption> {
    let mut values: Vec<&String> = values.into_iter().collect();
    values.sort();
    values.into_iter().map(|v| SelectOption::same(v)).collect()
}

pub fn run_options(catalog: &Catalog) -> Vec<SelectOption> {
    sorted_options(catalog.runs())
}

pub fn module_options(catalog: &Catalog) -> Vec<SelectOption> {
    sorted_options(catalog.modules())
}

/// Variables of `module`; empty for an unknown module
pub fn variable_options(catalog: &Catalog, module: &str) -> Vec<SelectOption> {
    catalog
        .variables(module)
        .map(|variables| sorted_options(variables))
        .unwrap_or_default()
}

/// Options for dimension `position` (0-based) of a variable
///
/// `None` when the variable has no such dimension or its observed token is
/// not in the registry.
pub fn dimension_options(
    catalog: &Catalog,
    module: &str,
    variable: &str,
    position: usize,
) -> Option<DimensionChoice> {
    if position >= MAX_DIMENSIONS {
        return None;
    }
    let observed = catalog.dims(module, variable)?.get(position)?;
    let kind = match registry().classify(observed) {
        Ok(kind) => kind,
        Err(err) => {
            debug!(module, variable, position, "no dimension options: {}", err);
            return None;
        }
    };

    let values = registry().sorted_domain(kind);
    let default = values.first()?.clone();
    Some(DimensionChoice {
        kind,
        options: values.iter().map(|v| SelectOption::same(v)).collect(),
        default,
    })
}

/// Options for every dimension position of a variable, in order
pub fn all_dimension_options(
    catalog: &Catalog,
    module: &str,
    variable: &str,
) -> Vec<Option<DimensionChoice>> {
    (0..MAX_DIMENSIONS)
        .map(|position| dimension_options(catalog, module, variable, position))
        .collect()
}

/// Suggested title for a selection: `module.variable[tok, ...]`
pub fn default_title<S: AsRef<str>>(module: &str, variable: &str, tokens: &[S]) -> String {
    let tokens: Vec<&str> = tokens
        .iter()
        .map(AsRef::as_ref)
        .filter(|t| !t.is_empty())
        .collect();
    if tokens.is_empty() {
        format!("{}.{}", module, variable)
    } else {
        format!("{}.{}[{}]", module, variable, tokens.join(", "))
    }
}

/// Suggested y label for a selection: `module.variable`
pub fn default_y_label(module: &str, variable: &str) -> String {
    format!("{}.{}", module, variable)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogBuilder;
    use pretty_assertions::assert_eq;

    fn catalog() -> Catalog {
        CatalogBuilder::build([
            "Base: Minerals Market.price[Ni, US]",
            "Base: Minerals Market.demand",
            "High: Battery Market.sales[ROW, BEV, NMC811]",
            "Base: Battery Market.odd[Atlantis]",
        ])
    }

    fn values(options: &[SelectOption]) -> Vec<&str> {
        options.iter().map(|o| o.value.as_str()).collect()
    }

    #[test]
    fn test_run_module_variable_options() {
        let catalog = catalog();
        assert_eq!(values(&run_options(&catalog)), vec!["Base", "High"]);
        assert_eq!(
            values(&module_options(&catalog)),
            vec!["Battery Market", "Minerals Market"]
        );
        assert_eq!(
            values(&variable_options(&catalog, "Minerals Market")),
            vec!["demand", "price"]
        );
        assert!(variable_options(&catalog, "Nowhere").is_empty());
    }

    #[test]
    fn test_dimension_options_sorted_domain() {
        let choice = dimension_options(&catalog(), "Minerals Market", "price", 0).unwrap();
        assert_eq!(choice.kind, DimensionKind::Mineral);
        assert_eq!(values(&choice.options), vec!["Co", "Li", "Ni"]);
        assert_eq!(choice.default, "Co");

        let choice = dimension_options(&catalog(), "Minerals Market", "price", 1).unwrap();
        assert_eq!(choice.kind, DimensionKind::Region);
        assert_eq!(values(&choice.options), vec!["ROW", "US"]);
    }

    #[test]
    fn test_dimension_options_absent() {
        let catalog = catalog();
        assert_eq!(dimension_options(&catalog, "Minerals Market", "demand", 0), None);
        assert_eq!(dimension_options(&catalog, "Minerals Market", "price", 2), None);
        assert_eq!(dimension_options(&catalog, "Battery Market", "odd", 0), None);
        assert_eq!(dimension_options(&catalog, "Battery Market", "sales", 3), None);
    }

    #[test]
    fn test_all_dimension_options() {
        let all = all_dimension_options(&catalog(), "Battery Market", "sales");
        let kinds: Vec<_> = all.iter().map(|c| c.as_ref().map(|c| c.kind)).collect();
        assert_eq!(
            kinds,
            vec![
                Some(DimensionKind::Region),
                Some(DimensionKind::BatteryPlatform),
                Some(DimensionKind::BatteryChemistry)
            ]
        );
    }

    #[test]
    fn test_default_labels() {
        assert_eq!(
            default_title("Minerals Market", "price", &["Ni", "US", ""]),
            "Minerals Market.price[Ni, US]"
        );
        assert_eq!(
            default_title::<&str>("Minerals Market", "demand", &[]),
            "Minerals Market.demand"
        );
        assert_eq!(default_y_label("RIRA", "NPV"), "RIRA.NPV");
    }
}
