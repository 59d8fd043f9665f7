use crate::fault::error::FaultError;
use crate::fault::kind::{FaultType, Severity};

/// Static reference data for one fault type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaultCatalogEntry {
    pub fault_type: FaultType,
    pub severity: Severity,
    pub icon: &'static str,
    pub loss_range: &'static str,
    pub action: &'static str,
}

static CATALOG: [FaultCatalogEntry; 12] = [
    FaultCatalogEntry {
        fault_type: FaultType::Cell,
        severity: Severity::High,
        icon: "⚡",
        loss_range: "5-15%",
        action: "Inspect cell, check connections",
    },
    FaultCatalogEntry {
        fault_type: FaultType::CellMulti,
        severity: Severity::Critical,
        icon: "🔥",
        loss_range: "20-40%",
        action: "Replace module immediately",
    },
    FaultCatalogEntry {
        fault_type: FaultType::Cracking,
        severity: Severity::Medium,
        icon: "💔",
        loss_range: "3-10%",
        action: "Monitor and schedule replacement",
    },
    FaultCatalogEntry {
        fault_type: FaultType::Diode,
        severity: Severity::High,
        icon: "⚙️",
        loss_range: "10-25%",
        action: "Replace bypass diode",
    },
    FaultCatalogEntry {
        fault_type: FaultType::DiodeMulti,
        severity: Severity::Critical,
        icon: "🚨",
        loss_range: "30-50%",
        action: "Emergency diode replacement",
    },
    FaultCatalogEntry {
        fault_type: FaultType::HotSpot,
        severity: Severity::High,
        icon: "🔥",
        loss_range: "15-30%",
        action: "Check for shading, replace if needed",
    },
    FaultCatalogEntry {
        fault_type: FaultType::HotSpotMulti,
        severity: Severity::Critical,
        icon: "🚨",
        loss_range: "40-70%",
        action: "URGENT: Disconnect and replace",
    },
    FaultCatalogEntry {
        fault_type: FaultType::NoAnomaly,
        severity: Severity::Low,
        icon: "✅",
        loss_range: "0%",
        action: "Continue routine monitoring",
    },
    FaultCatalogEntry {
        fault_type: FaultType::OfflineModule,
        severity: Severity::Critical,
        icon: "⚠️",
        loss_range: "100%",
        action: "Check connections, test output",
    },
    FaultCatalogEntry {
        fault_type: FaultType::Shadowing,
        severity: Severity::Medium,
        icon: "🌳",
        loss_range: "10-30%",
        action: "Remove shading source",
    },
    FaultCatalogEntry {
        fault_type: FaultType::Soiling,
        severity: Severity::Low,
        icon: "🧹",
        loss_range: "2-8%",
        action: "Clean panels",
    },
    FaultCatalogEntry {
        fault_type: FaultType::Vegetation,
        severity: Severity::Medium,
        icon: "🌱",
        loss_range: "5-20%",
        action: "Remove vegetation",
    },
];

/// Catalog entry for a known fault type.
pub fn entry(fault_type: FaultType) -> &'static FaultCatalogEntry {
    // CATALOG is laid out in FaultType::ALL order
    &CATALOG[fault_type as usize]
}

/// Catalog entry for a fault label, failing on anything outside the twelve classes.
pub fn lookup(fault_type: &str) -> Result<&'static FaultCatalogEntry, FaultError> {
    let fault_type: FaultType = fault_type.parse()?;
    Ok(entry(fault_type))
}

pub fn entries() -> &'static [FaultCatalogEntry] {
    &CATALOG
}
