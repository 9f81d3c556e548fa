//! Dimension Registry
//!
//! Single source of truth for LIBRA array dimension vocabularies.
//!
//! ```text
//! DIMENSION_TABLE (kind → domain)  ──derive──▶  reverse index (token → kind)
//! ```
//!
//! Adding a kind means adding one row to `DIMENSION_TABLE` and one variant to
//! [`DimensionKind`]; the reverse index follows automatically.

use std::collections::HashMap;
use std::sync::OnceLock;

use tracing::warn;

use crate::error::TokenError;
use crate::kind::DimensionKind;

// =============================================================================
// TABLE
// =============================================================================

/// How a kind's domain is written down
enum DomainSpec {
    /// Literal values in display order
    Listed(&'static [&'static str]),
    /// `D&C1..D&Cn` construction years followed by `Yr1..Yrm` operating years
    ProjectYears { construction: usize, operating: usize },
}

impl DomainSpec {
    fn expand(&self) -> Vec<String> {
        match self {
            DomainSpec::Listed(values) => values.iter().map(|v| v.to_string()).collect(),
            DomainSpec::ProjectYears {
                construction,
                operating,
            } => (1..=*construction)
                .map(|i| format!("D&C{}", i))
                .chain((1..=*operating).map(|j| format!("Yr{}", j)))
                .collect(),
        }
    }
}

const DIMENSION_TABLE: [(DimensionKind, DomainSpec); 10] = [
    (DimensionKind::Region, DomainSpec::Listed(&["US", "ROW"])),
    (DimensionKind::BatteryPlatform, DomainSpec::Listed(&["BEV", "PHEV"])),
    (
        DimensionKind::BatteryChemistry,
        DomainSpec::Listed(&[
            "LCO", "LFP", "LMO", "NCA", "NMC111", "NMC442", "NMC532", "NMC622", "NMC811",
            "NMC955",
        ]),
    ),
    (DimensionKind::Mineral, DomainSpec::Listed(&["Ni", "Co", "Li"])),
    (DimensionKind::Process, DomainSpec::Listed(&["Hydro", "Pyro"])),
    (DimensionKind::StorageBatteryType, DomainSpec::Listed(&["Grid"])),
    (
        DimensionKind::ConversionPolicy,
        DomainSpec::Listed(&["Price", "Feedstock", "FCI", "Loan"]),
    ),
    (
        DimensionKind::TechAttribute,
        DomainSpec::Listed(&[
            "ProcessYield",
            "PSuccess",
            "InputCap",
            "CapitalCost",
            "Risk",
            "DebtFrac",
        ]),
    ),
    (DimensionKind::TransportMode, DomainSpec::Listed(&["TrainRail", "Road"])),
    (
        DimensionKind::ProjectYear,
        DomainSpec::ProjectYears {
            construction: 3,
            operating: 31,
        },
    ),
];

// =============================================================================
// REGISTRY
// =============================================================================

static REGISTRY: OnceLock<DimensionRegistry> = OnceLock::new();

/// The process-wide registry built from `DIMENSION_TABLE`
pub fn registry() -> &'static DimensionRegistry {
    REGISTRY.get_or_init(DimensionRegistry::new)
}

/// How a raw string relates to the vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenClass {
    /// A concrete value in the kind's domain
    Value(DimensionKind),
    /// The kind's generic alias (e.g. `region`)
    Alias(DimensionKind),
}

impl TokenClass {
    pub fn kind(&self) -> DimensionKind {
        match self {
            TokenClass::Value(kind) | TokenClass::Alias(kind) => *kind,
        }
    }
}

/// A token claimed by more than one kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainCollision {
    pub token: String,
    /// Kind that keeps the token (earlier in priority order)
    pub owner: DimensionKind,
    /// Kind whose claim was ignored
    pub ignored: DimensionKind,
}

pub struct DimensionRegistry {
    /// Domain per kind, in declared order
    domains: HashMap<DimensionKind, Vec<String>>,
    /// Derived: value → owning kind
    index: HashMap<String, DimensionKind>,
    /// Derived: alias → kind
    aliases: HashMap<&'static str, DimensionKind>,
    collisions: Vec<DomainCollision>,
}

impl DimensionRegistry {
    /// Build the registry from the built-in dimension table
    pub fn new() -> Self {
        Self::from_domains(
            DIMENSION_TABLE
                .iter()
                .map(|(kind, spec)| (*kind, spec.expand())),
        )
    }

    /// Build a registry from explicit domains
    ///
    /// Domains are indexed in the order given; a token already owned by an
    /// earlier kind stays with that kind and the clash is recorded.
    pub fn from_domains(domains: impl IntoIterator<Item = (DimensionKind, Vec<String>)>) -> Self {
        let mut by_kind: HashMap<DimensionKind, Vec<String>> = HashMap::new();
        let mut index: HashMap<String, DimensionKind> = HashMap::new();
        let mut collisions = Vec::new();

        for (kind, values) in domains {
            for value in &values {
                match index.get(value) {
                    Some(owner) if *owner != kind => {
                        warn!(
                            token = %value,
                            owner = %owner,
                            ignored = %kind,
                            "dimension token claimed by two kinds; keeping the first"
                        );
                        collisions.push(DomainCollision {
                            token: value.clone(),
                            owner: *owner,
                            ignored: kind,
                        });
                    }
                    Some(_) => {}
                    None => {
                        index.insert(value.clone(), kind);
                    }
                }
            }
            by_kind.entry(kind).or_default().extend(values);
        }

        let aliases = DimensionKind::ALL
            .iter()
            .map(|kind| (kind.alias(), *kind))
            .collect();

        Self {
            domains: by_kind,
            index,
            aliases,
            collisions,
        }
    }

    /// Classify a token, accepting both domain values and kind aliases
    pub fn classify(&self, token: &str) -> Result<DimensionKind, TokenError> {
        self.lookup(token)
            .map(|class| class.kind())
            .ok_or_else(|| TokenError::UnknownDimensionToken(token.to_string()))
    }

    /// Like [`classify`](Self::classify) but tells values and aliases apart
    pub fn lookup(&self, token: &str) -> Option<TokenClass> {
        if let Some(kind) = self.index.get(token) {
            return Some(TokenClass::Value(*kind));
        }
        self.aliases.get(token).map(|kind| TokenClass::Alias(*kind))
    }

    /// Valid values for a kind, in declared order
    ///
    /// This order is the series order of stack plots.
    pub fn domain_of(&self, kind: DimensionKind) -> &[String] {
        self.domains.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Valid values for a kind, sorted lexicographically (stable)
    pub fn sorted_domain(&self, kind: DimensionKind) -> Vec<String> {
        let mut values = self.domain_of(kind).to_vec();
        values.sort();
        values
    }

    /// Whether `token` is a concrete value of `kind`
    pub fn contains(&self, kind: DimensionKind, token: &str) -> bool {
        self.index.get(token) == Some(&kind)
    }

    /// Tokens that were claimed by more than one kind while indexing
    pub fn collisions(&self) -> &[DomainCollision] {
        &self.collisions
    }
}

impl Default for DimensionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DimensionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DimensionRegistry")
            .field("kinds", &self.domains.len())
            .field("tokens", &self.index.len())
            .field("collisions", &self.collisions.len())
            .finish()
    }
}
