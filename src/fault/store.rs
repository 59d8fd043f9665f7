use crate::fault::catalog;
use crate::fault::error::FaultError;
use crate::fault::kind::{Assignee, FaultType, Severity, Status};
use crate::fault::record::{FaultRecord, RecordDraft, RecordId, RecordUpdate};
use crate::library::logger::interface::Logger;
use chrono::{DateTime, Duration, Local};
use rand::seq::IndexedRandom;
use rand::Rng;
use std::sync::Arc;

const PANEL_ROWS: [&str; 4] = ["A", "B", "C", "D"];

/// Conjunctive record filter. `None` means "All".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FaultFilter {
    pub status: Option<Status>,
    pub severity: Option<Severity>,
    pub assigned_to: Option<Assignee>,
}

impl FaultFilter {
    pub fn matches(&self, record: &FaultRecord) -> bool {
        self.status.map_or(true, |s| record.status == s)
            && self.severity.map_or(true, |s| record.severity() == s)
            && self.assigned_to.map_or(true, |a| record.assigned_to == a)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GroupBy {
    FaultType,
    Severity,
    AssignedTo,
    Status,
}

impl GroupBy {
    fn key(self, record: &FaultRecord) -> &'static str {
        match self {
            GroupBy::FaultType => record.fault_type().label(),
            GroupBy::Severity => record.severity().label(),
            GroupBy::AssignedTo => record.assigned_to.label(),
            GroupBy::Status => record.status.label(),
        }
    }
}

/// Headline counts over a (possibly filtered) set of records.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FilterSummary {
    pub total: usize,
    pub critical: usize,
    pub in_progress: usize,
    pub completed: usize,
}

impl FilterSummary {
    pub fn of(records: &[&FaultRecord]) -> Self {
        records.iter().fold(Self::default(), |mut summary, record| {
            summary.total += 1;
            if record.severity() == Severity::Critical {
                summary.critical += 1;
            }
            match record.status {
                Status::InProgress => summary.in_progress += 1,
                Status::Completed => summary.completed += 1,
                _ => {}
            }
            summary
        })
    }
}

/// In-memory fault log, newest record first.
pub struct FaultStore {
    records: Vec<FaultRecord>,
    next_id: u64,
    seeded: bool,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl FaultStore {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            records: Vec::new(),
            next_id: 1,
            seeded: false,
            logger: logger.with_namespace("fault_store"),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FaultRecord> {
        self.records.iter()
    }

    pub fn get(&self, id: RecordId) -> Option<&FaultRecord> {
        self.iter().find(|r| r.id() == id)
    }

    fn allocate_id(&mut self) -> RecordId {
        let id = RecordId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Populates the store once per lifetime, and only while it is empty.
    /// Returns whether the records were taken.
    pub fn seed(&mut self, initial: Vec<RecordDraft>) -> bool {
        if self.seeded || !self.is_empty() {
            return false;
        }
        self.seeded = true;

        for draft in initial {
            let id = self.allocate_id();
            self.records.push(FaultRecord::new(id, draft));
        }

        let _ = self
            .logger
            .info(&format!("Seeded with {} records", self.records.len()));
        true
    }

    /// Creates a record from the catalog snapshot for `fault_type` and puts
    /// it in front of every existing record.
    pub fn add(
        &mut self,
        panel_id: &str,
        fault_type: &str,
        assigned_to: Assignee,
        status: Status,
    ) -> Result<&FaultRecord, FaultError> {
        let entry = match catalog::lookup(fault_type) {
            Ok(entry) => entry,
            Err(e) => {
                let _ = self
                    .logger
                    .error(&format!("Rejected record for panel {}: {}", panel_id, e));
                return Err(e);
            }
        };

        let id = self.allocate_id();
        let record = FaultRecord::new(
            id,
            RecordDraft {
                panel_id: panel_id.to_string(),
                fault_type: entry.fault_type,
                severity: entry.severity,
                detected_at: Local::now(),
                assigned_to,
                status,
                efficiency_loss: entry.loss_range.to_string(),
            },
        );

        let _ = self.logger.info(&format!(
            "Added {} {} on panel {} ({})",
            id,
            record.fault_type(),
            record.panel_id(),
            record.severity()
        ));

        self.records.insert(0, record);
        Ok(&self.records[0])
    }

    /// Records matching every set predicate, in store order.
    pub fn filter(&self, filter: &FaultFilter) -> Vec<&FaultRecord> {
        self.iter().filter(|r| filter.matches(r)).collect()
    }

    /// Changes assignment and/or status of the record with `id`. Nothing else
    /// about a record is mutable.
    pub fn update(&mut self, id: RecordId, update: RecordUpdate) -> Result<&FaultRecord, FaultError> {
        let Some(record) = self.records.iter_mut().find(|r| r.id() == id) else {
            let _ = self
                .logger
                .error(&format!("Update for unknown record {}", id));
            return Err(FaultError::RecordNotFound(id));
        };

        if let Some(assignee) = update.assigned_to {
            record.assigned_to = assignee;
        }
        if let Some(status) = update.status {
            record.status = status;
        }

        let _ = self.logger.info(&format!(
            "Updated {}: assigned to {}, status {}",
            id, record.assigned_to, record.status
        ));

        Ok(record)
    }

    /// Count per distinct value, most frequent first. Ties keep first-seen order.
    pub fn aggregate(&self, group_by: GroupBy) -> Vec<(String, usize)> {
        let mut counts: Vec<(&'static str, usize)> = Vec::new();
        for record in &self.records {
            let key = group_by.key(record);
            match counts.iter_mut().find(|(k, _)| *k == key) {
                Some((_, count)) => *count += 1,
                None => counts.push((key, 1)),
            }
        }
        // stable sort keeps first-seen order among equal counts
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts
            .into_iter()
            .map(|(key, count)| (key.to_string(), count))
            .collect()
    }

    pub fn active_count(&self) -> usize {
        self.iter().filter(|r| r.status.is_active()).count()
    }
}

/// The five demo records the dashboard starts with, newest first.
pub fn sample_records(now: DateTime<Local>) -> Vec<RecordDraft> {
    let sample = |panel_id: &str,
                  fault_type: FaultType,
                  severity: Severity,
                  hours_ago: i64,
                  assigned_to: Assignee,
                  status: Status,
                  efficiency_loss: &str| RecordDraft {
        panel_id: panel_id.to_string(),
        fault_type,
        severity,
        detected_at: now - Duration::hours(hours_ago),
        assigned_to,
        status,
        efficiency_loss: efficiency_loss.to_string(),
    };

    vec![
        sample(
            "A-125",
            FaultType::HotSpot,
            Severity::High,
            2,
            Assignee::JohnSmith,
            Status::InProgress,
            "15-30%",
        ),
        sample(
            "B-087",
            FaultType::Cell,
            Severity::High,
            5,
            Assignee::SarahJohnson,
            Status::Pending,
            "5-15%",
        ),
        sample(
            "C-234",
            FaultType::Diode,
            Severity::Medium,
            8,
            Assignee::MikeChen,
            Status::Assigned,
            "10-25%",
        ),
        sample(
            "A-089",
            FaultType::Cracking,
            Severity::Medium,
            10,
            Assignee::JohnSmith,
            Status::Completed,
            "3-10%",
        ),
        sample(
            "D-156",
            FaultType::Soiling,
            Severity::Low,
            12,
            Assignee::SarahJohnson,
            Status::Pending,
            "2-8%",
        ),
    ]
}

/// Panel id in the `<row>-<number>` form used across the farm, e.g. `C-482`.
pub fn random_panel_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    let row = PANEL_ROWS.choose(rng).copied().unwrap_or("A");
    format!("{}-{}", row, rng.random_range(100..=999))
}
