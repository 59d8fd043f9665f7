use crate::fault::kind::{Assignee, FaultType, Severity, Status};
use chrono::{DateTime, Local};
use std::fmt;

/// Stable identity of a record, assigned by the store at creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(pub u64);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One observation of a fault on a physical panel.
///
/// `severity` and `efficiency_loss` are snapshots taken when the record is
/// created; only `assigned_to` and `status` change afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct FaultRecord {
    id: RecordId,
    panel_id: String,
    fault_type: FaultType,
    severity: Severity,
    detected_at: DateTime<Local>,
    efficiency_loss: String,
    pub assigned_to: Assignee,
    pub status: Status,
}

impl FaultRecord {
    pub(crate) fn new(id: RecordId, draft: RecordDraft) -> Self {
        Self {
            id,
            panel_id: draft.panel_id,
            fault_type: draft.fault_type,
            severity: draft.severity,
            detected_at: draft.detected_at,
            efficiency_loss: draft.efficiency_loss,
            assigned_to: draft.assigned_to,
            status: draft.status,
        }
    }

    pub fn id(&self) -> RecordId {
        self.id
    }

    pub fn panel_id(&self) -> &str {
        &self.panel_id
    }

    pub fn fault_type(&self) -> FaultType {
        self.fault_type
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn detected_at(&self) -> DateTime<Local> {
        self.detected_at
    }

    pub fn efficiency_loss(&self) -> &str {
        &self.efficiency_loss
    }

    pub fn detected_label(&self) -> String {
        self.detected_at.format("%Y-%m-%d %H:%M").to_string()
    }
}

/// Every field of a record except its id. Used for seeding, where the
/// severity/loss snapshot is supplied rather than looked up.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordDraft {
    pub panel_id: String,
    pub fault_type: FaultType,
    pub severity: Severity,
    pub detected_at: DateTime<Local>,
    pub assigned_to: Assignee,
    pub status: Status,
    pub efficiency_loss: String,
}

/// Field-level changes accepted by `FaultStore::update`. `None` leaves the field as is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RecordUpdate {
    pub assigned_to: Option<Assignee>,
    pub status: Option<Status>,
}

#[cfg(test)]
impl RecordUpdate {
    pub fn status(status: Status) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn assigned_to(assignee: Assignee) -> Self {
        Self {
            assigned_to: Some(assignee),
            ..Self::default()
        }
    }
}
