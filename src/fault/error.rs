use crate::fault::record::RecordId;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FaultError {
    #[error("unknown fault type: {0}")]
    UnknownFaultType(String),
    #[error("unknown severity: {0}")]
    UnknownSeverity(String),
    #[error("unknown status: {0}")]
    UnknownStatus(String),
    #[error("unknown assignee: {0}")]
    UnknownAssignee(String),
    #[error("no fault record with id {0}")]
    RecordNotFound(RecordId),
}
