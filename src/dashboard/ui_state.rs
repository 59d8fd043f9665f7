use crate::fault::{FaultFilter, RecordId, RecordUpdate};
use std::collections::HashMap;
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Analyze,
    Manage,
    Overview,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::Analyze, Page::Manage, Page::Overview];

    pub fn label(self) -> &'static str {
        match self {
            Page::Analyze => "🔍 Analyze Image",
            Page::Manage => "📋 Fault Management",
            Page::Overview => "📊 System Overview",
        }
    }
}

#[derive(Default)]
pub struct UiState {
    pub page: Page,
    pub image_path: String,
    pub selected_sample: Option<PathBuf>,
    pub filter: FaultFilter,
    /// Unsaved technician/status picks per record card.
    pub drafts: HashMap<RecordId, RecordUpdate>,
    pub notice: Option<String>,
    pub last_error: Option<String>,
}

impl UiState {
    pub fn clear_messages(&mut self) {
        self.notice = None;
        self.last_error = None;
    }
}
