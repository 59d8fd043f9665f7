use crate::fault::error::FaultError;
use std::fmt;
use std::str::FromStr;

/// The twelve thermal anomaly classes the classifier is trained on.
///
/// Variant order matches the class-index order of the model output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FaultType {
    Cell,
    CellMulti,
    Cracking,
    Diode,
    DiodeMulti,
    HotSpot,
    HotSpotMulti,
    NoAnomaly,
    OfflineModule,
    Shadowing,
    Soiling,
    Vegetation,
}

impl FaultType {
    pub const ALL: [FaultType; 12] = [
        FaultType::Cell,
        FaultType::CellMulti,
        FaultType::Cracking,
        FaultType::Diode,
        FaultType::DiodeMulti,
        FaultType::HotSpot,
        FaultType::HotSpotMulti,
        FaultType::NoAnomaly,
        FaultType::OfflineModule,
        FaultType::Shadowing,
        FaultType::Soiling,
        FaultType::Vegetation,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FaultType::Cell => "Cell",
            FaultType::CellMulti => "Cell-Multi",
            FaultType::Cracking => "Cracking",
            FaultType::Diode => "Diode",
            FaultType::DiodeMulti => "Diode-Multi",
            FaultType::HotSpot => "Hot-Spot",
            FaultType::HotSpotMulti => "Hot-Spot-Multi",
            FaultType::NoAnomaly => "No-Anomaly",
            FaultType::OfflineModule => "Offline-Module",
            FaultType::Shadowing => "Shadowing",
            FaultType::Soiling => "Soiling",
            FaultType::Vegetation => "Vegetation",
        }
    }

    pub fn from_index(index: usize) -> Option<FaultType> {
        Self::ALL.get(index).copied()
    }
}

impl fmt::Display for FaultType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FaultType {
    type Err = FaultError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|fault_type| fault_type.label() == s)
            .ok_or_else(|| FaultError::UnknownFaultType(s.to_string()))
    }
}

/// Ordered from most to least severe, so `Critical < Low` under `Ord`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Critical,
        Severity::High,
        Severity::Medium,
        Severity::Low,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Severity {
    type Err = FaultError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|severity| severity.label() == s)
            .ok_or_else(|| FaultError::UnknownSeverity(s.to_string()))
    }
}

/// Workflow status of a record. Any status may follow any other.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Status {
    New,
    Assigned,
    InProgress,
    Pending,
    Completed,
}

impl Status {
    pub const ALL: [Status; 5] = [
        Status::New,
        Status::Assigned,
        Status::InProgress,
        Status::Pending,
        Status::Completed,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Status::New => "New",
            Status::Assigned => "Assigned",
            Status::InProgress => "In Progress",
            Status::Pending => "Pending",
            Status::Completed => "Completed",
        }
    }

    pub fn is_active(self) -> bool {
        self != Status::Completed
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Status {
    type Err = FaultError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|status| status.label() == s)
            .ok_or_else(|| FaultError::UnknownStatus(s.to_string()))
    }
}

/// Technician roster, plus the unassigned slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Assignee {
    Unassigned,
    JohnSmith,
    SarahJohnson,
    MikeChen,
    EmmaDavis,
}

impl Assignee {
    pub const ALL: [Assignee; 5] = [
        Assignee::Unassigned,
        Assignee::JohnSmith,
        Assignee::SarahJohnson,
        Assignee::MikeChen,
        Assignee::EmmaDavis,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Assignee::Unassigned => "Unassigned",
            Assignee::JohnSmith => "John Smith",
            Assignee::SarahJohnson => "Sarah Johnson",
            Assignee::MikeChen => "Mike Chen",
            Assignee::EmmaDavis => "Emma Davis",
        }
    }
}

impl fmt::Display for Assignee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Assignee {
    type Err = FaultError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|assignee| assignee.label() == s)
            .ok_or_else(|| FaultError::UnknownAssignee(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fault_type_labels_parse_back() {
        for fault_type in FaultType::ALL {
            assert_eq!(fault_type.label().parse::<FaultType>(), Ok(fault_type));
        }
    }

    #[test]
    fn fault_type_rejects_unknown_label() {
        assert_eq!(
            "Nonexistent".parse::<FaultType>(),
            Err(FaultError::UnknownFaultType("Nonexistent".to_string()))
        );
        // labels are case sensitive
        assert!("hot-spot".parse::<FaultType>().is_err());
    }

    #[test]
    fn fault_type_index_follows_model_class_order() {
        assert_eq!(FaultType::from_index(0), Some(FaultType::Cell));
        assert_eq!(FaultType::from_index(5), Some(FaultType::HotSpot));
        assert_eq!(FaultType::from_index(11), Some(FaultType::Vegetation));
        assert_eq!(FaultType::from_index(12), None);
    }

    #[test]
    fn severity_orders_critical_first() {
        let mut severities = vec![Severity::Low, Severity::Critical, Severity::Medium, Severity::High];
        severities.sort();
        assert_eq!(severities, Severity::ALL.to_vec());
    }

    #[test]
    fn status_and_assignee_use_display_labels() {
        assert_eq!("In Progress".parse::<Status>(), Ok(Status::InProgress));
        assert_eq!(Status::InProgress.to_string(), "In Progress");
        assert!(!Status::Completed.is_active());
        assert!(Status::Pending.is_active());

        assert_eq!("Mike Chen".parse::<Assignee>(), Ok(Assignee::MikeChen));
        assert_eq!(
            "Nobody".parse::<Assignee>(),
            Err(FaultError::UnknownAssignee("Nobody".to_string()))
        );
    }
}
