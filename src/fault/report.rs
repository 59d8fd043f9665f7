use crate::fault::catalog::FaultCatalogEntry;
use chrono::{DateTime, Local};

pub const REPORT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Everything a detection report shows about a single classification.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionReport {
    pub fault_type: String,
    pub confidence: f32,
    pub severity: String,
    pub loss: String,
    pub action: String,
    pub timestamp: String,
}

impl DetectionReport {
    pub fn from_entry(entry: &FaultCatalogEntry, confidence: f32, at: DateTime<Local>) -> Self {
        Self {
            fault_type: entry.fault_type.label().to_string(),
            confidence,
            severity: entry.severity.label().to_string(),
            loss: entry.loss_range.to_string(),
            action: entry.action.to_string(),
            timestamp: at.format(REPORT_TIMESTAMP_FORMAT).to_string(),
        }
    }

    pub fn render(&self) -> String {
        format_report(
            &self.fault_type,
            self.confidence,
            &self.severity,
            &self.loss,
            &self.action,
            &self.timestamp,
        )
    }
}

pub fn format_report(
    fault_type: &str,
    confidence: f32,
    severity: &str,
    loss: &str,
    action: &str,
    timestamp: &str,
) -> String {
    format!(
        "SOLAR PANEL FAULT DETECTION REPORT\n\
         ========================================\n\
         Generated: {timestamp}\n\
         \n\
         DETECTION RESULT\n\
         -----------------\n\
         Fault Type: {fault_type}\n\
         Confidence: {:.2}%\n\
         Severity: {severity}\n\
         \n\
         IMPACT\n\
         ------\n\
         Efficiency Loss: {loss}\n\
         Action: {action}\n",
        confidence * 100.0
    )
}

pub fn report_file_name(at: DateTime<Local>) -> String {
    format!("report_{}.txt", at.format("%Y%m%d_%H%M%S"))
}
