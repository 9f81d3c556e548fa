//! Header catalog builder
//!
//! Turns a snapshot of column headers into a [`Catalog`]. The builder holds no
//! state between calls: the catalog is recomputed from scratch whenever the
//! uploaded data changes.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet, HashSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::header::{parse_header, variable_key, MalformedHeader};

// ============================================================================
// Catalog
// ============================================================================

/// Browsable index of the runs, modules, variables and dimensions present in
/// one uploaded output file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    /// Run names in first-seen order
    runs: Vec<String>,
    modules: BTreeSet<String>,
    variables_by_module: BTreeMap<String, BTreeSet<String>>,
    /// `"module.variable"` → dimension tokens of the first bracketed column
    dims_by_variable: BTreeMap<String, Vec<String>>,
}

impl Catalog {
    pub fn runs(&self) -> &[String] {
        &self.runs
    }

    /// Run names sorted for display
    pub fn sorted_runs(&self) -> Vec<String> {
        let mut runs = self.runs.clone();
        runs.sort();
        runs
    }

    pub fn modules(&self) -> &BTreeSet<String> {
        &self.modules
    }

    pub fn variables_by_module(&self) -> &BTreeMap<String, BTreeSet<String>> {
        &self.variables_by_module
    }

    pub fn dims_by_variable(&self) -> &BTreeMap<String, Vec<String>> {
        &self.dims_by_variable
    }

    /// Variables registered under `module`
    pub fn variables(&self, module: &str) -> Option<&BTreeSet<String>> {
        self.variables_by_module.get(module)
    }

    pub fn has_variable(&self, module: &str, variable: &str) -> bool {
        self.variables(module)
            .is_some_and(|variables| variables.contains(variable))
    }

    /// Dimension tokens observed for a variable
    ///
    /// `None` means the variable has no array dimensions, not an error.
    pub fn dims(&self, module: &str, variable: &str) -> Option<&[String]> {
        self.dims_by_variable
            .get(&variable_key(module, variable))
            .map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Total number of distinct `module.variable` pairs
    pub fn variable_count(&self) -> usize {
        self.variables_by_module.values().map(BTreeSet::len).sum()
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Result of a catalog build, including the headers that were skipped
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CatalogReport {
    pub catalog: Catalog,
    pub skipped: Vec<MalformedHeader>,
}

/// Stateless builder; every call starts from an empty catalog
#[derive(Debug, Clone, Copy, Default)]
pub struct CatalogBuilder;

impl CatalogBuilder {
    /// Build a catalog, silently skipping malformed headers
    pub fn build<I, S>(headers: I) -> Catalog
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::build_with_report(headers).catalog
    }

    /// Build a catalog and report which headers were skipped
    ///
    /// When several columns of one variable carry bracket groups, the first
    /// one encountered defines the variable's dimension list.
    pub fn build_with_report<I, S>(headers: I) -> CatalogReport
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut catalog = Catalog::default();
        let mut seen_runs = HashSet::new();
        let mut skipped = Vec::new();

        for header in headers {
            let header = header.as_ref();
            let parts = match parse_header(header) {
                Ok(parts) => parts,
                Err(malformed) => {
                    debug!(header = %header, "skipping header: {}", malformed.reason);
                    skipped.push(malformed);
                    continue;
                }
            };

            if seen_runs.insert(parts.run.clone()) {
                catalog.runs.push(parts.run.clone());
            }
            catalog.modules.insert(parts.module.clone());
            catalog
                .variables_by_module
                .entry(parts.module.clone())
                .or_default()
                .insert(parts.variable.clone());

            let Some(tokens) = parts.tokens.as_ref() else {
                continue;
            };
            match catalog.dims_by_variable.entry(parts.key()) {
                Entry::Vacant(slot) => {
                    slot.insert(tokens.clone());
                }
                Entry::Occupied(existing) => {
                    if existing.get().len() != tokens.len() {
                        debug!(
                            variable = %existing.key(),
                            kept = ?existing.get(),
                            ignored = ?tokens,
                            "dimension shape differs from first column; keeping first"
                        );
                    }
                }
            }
        }

        debug!(
            runs = catalog.runs.len(),
            modules = catalog.modules.len(),
            variables = catalog.variable_count(),
            skipped = skipped.len(),
            "built header catalog"
        );

        CatalogReport { catalog, skipped }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn headers() -> Vec<&'static str> {
        vec![
            "ScenarioA: Minerals Market.time to have fun[US, LFP]",
            "ScenarioA: Minerals Market.time to have fun[ROW, LFP]",
            "ScenarioA: Minerals Market.price[Ni]",
            "ScenarioA: Battery Market.total demand",
            "ScenarioB: Minerals Market.time to have fun[US, NMC811]",
            "Years",
        ]
    }

    #[test]
    fn test_build_catalog() {
        let report = CatalogBuilder::build_with_report(headers());
        let catalog = &report.catalog;

        assert_eq!(catalog.runs(), ["ScenarioA", "ScenarioB"]);
        assert_eq!(
            catalog.modules().iter().collect::<Vec<_>>(),
            vec!["Battery Market", "Minerals Market"]
        );
        assert!(catalog.has_variable("Minerals Market", "time to have fun"));
        assert!(catalog.has_variable("Minerals Market", "price"));
        assert!(catalog.has_variable("Battery Market", "total demand"));
        assert_eq!(catalog.variable_count(), 3);

        assert_eq!(
            catalog.dims("Minerals Market", "time to have fun"),
            Some(&["US".to_string(), "LFP".to_string()][..])
        );
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].header, "Years");
    }

    #[test]
    fn test_first_bracket_wins() {
        let catalog = CatalogBuilder::build([
            "A: M.v[ROW, Grid]",
            "A: M.v[US, Grid]",
            "A: M.v[US]",
        ]);
        assert_eq!(
            catalog.dims_by_variable().get("M.v"),
            Some(&vec!["ROW".to_string(), "Grid".to_string()])
        );
    }

    #[test]
    fn test_variable_without_bracket_has_no_dims_entry() {
        let catalog = CatalogBuilder::build(["A: Consumer.adoption"]);
        assert!(catalog.has_variable("Consumer", "adoption"));
        assert_eq!(catalog.dims("Consumer", "adoption"), None);
        assert!(catalog.dims_by_variable().is_empty());
    }

    #[test]
    fn test_bracket_after_plain_column_still_recorded() {
        let catalog = CatalogBuilder::build(["A: LDV.sales", "B: LDV.sales[BEV]"]);
        assert_eq!(
            catalog.dims("LDV", "sales"),
            Some(&["BEV".to_string()][..])
        );
    }

    #[test]
    fn test_build_is_idempotent() {
        let first = CatalogBuilder::build(headers());
        let second = CatalogBuilder::build(headers());
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_input() {
        let catalog = CatalogBuilder::build(Vec::<String>::new());
        assert!(catalog.is_empty());
        assert!(catalog.runs().is_empty());
    }

    #[test]
    fn test_sorted_runs() {
        let catalog = CatalogBuilder::build(["Zeta: M.v", "Alpha: M.v", "Zeta: M.w"]);
        assert_eq!(catalog.runs(), ["Zeta", "Alpha"]);
        assert_eq!(catalog.sorted_runs(), vec!["Alpha", "Zeta"]);
    }

    #[test]
    fn test_catalog_serializes_as_plain_maps() {
        let catalog = CatalogBuilder::build(["A: M.v[US]"]);
        let json = serde_json::to_value(&catalog).unwrap();
        assert_eq!(json["variables_by_module"]["M"][0], "v");
        assert_eq!(json["dims_by_variable"]["M.v"][0], "US");
        assert_eq!(json["runs"][0], "A");
    }
}
