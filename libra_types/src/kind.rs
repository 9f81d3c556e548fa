//! Dimension kinds
//!
//! The closed set of array dimensions a LIBRA variable can be indexed by.

use serde::{Deserialize, Serialize};

/// A LIBRA array dimension kind
///
/// Declaration order is the classification priority order: if two kinds
/// ever claimed the same token, the earlier one here owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DimensionKind {
    Region,
    BatteryPlatform,
    BatteryChemistry,
    Mineral,
    Process,
    StorageBatteryType,
    ConversionPolicy,
    TechAttribute,
    TransportMode,
    ProjectYear,
}

impl DimensionKind {
    /// Every kind, in priority order
    pub const ALL: [DimensionKind; 10] = [
        DimensionKind::Region,
        DimensionKind::BatteryPlatform,
        DimensionKind::BatteryChemistry,
        DimensionKind::Mineral,
        DimensionKind::Process,
        DimensionKind::StorageBatteryType,
        DimensionKind::ConversionPolicy,
        DimensionKind::TechAttribute,
        DimensionKind::TransportMode,
        DimensionKind::ProjectYear,
    ];

    /// The generic token Stella uses for the whole dimension (e.g. `region`)
    pub fn alias(&self) -> &'static str {
        match self {
            DimensionKind::Region => "region",
            DimensionKind::BatteryPlatform => "VBattType",
            DimensionKind::BatteryChemistry => "chemistry",
            DimensionKind::Mineral => "mineral",
            DimensionKind::Process => "process",
            DimensionKind::StorageBatteryType => "storage_batt_type",
            DimensionKind::ConversionPolicy => "ConversionPolicy",
            DimensionKind::TechAttribute => "techattribute",
            DimensionKind::TransportMode => "transport",
            DimensionKind::ProjectYear => "ProjectYear",
        }
    }

    /// Human-readable name for messages
    pub fn label(&self) -> &'static str {
        match self {
            DimensionKind::Region => "region",
            DimensionKind::BatteryPlatform => "battery platform",
            DimensionKind::BatteryChemistry => "battery chemistry",
            DimensionKind::Mineral => "mineral",
            DimensionKind::Process => "process",
            DimensionKind::StorageBatteryType => "storage battery type",
            DimensionKind::ConversionPolicy => "conversion policy",
            DimensionKind::TechAttribute => "technology attribute",
            DimensionKind::TransportMode => "transport mode",
            DimensionKind::ProjectYear => "project year",
        }
    }
}

impl std::fmt::Display for DimensionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
