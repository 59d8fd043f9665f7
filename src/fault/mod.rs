pub mod catalog;
pub mod error;
pub mod kind;
pub mod record;
pub mod report;
pub mod store;


pub use catalog::FaultCatalogEntry;
pub use error::FaultError;
pub use kind::{Assignee, FaultType, Severity, Status};
pub use record::{FaultRecord, RecordDraft, RecordId, RecordUpdate};
pub use store::{FaultFilter, FaultStore, FilterSummary, GroupBy};
