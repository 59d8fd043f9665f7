mod analyze;
mod manage;
mod overview;
mod style;
mod ui_state;

#[cfg(test)]
mod dashboard_test;

use crate::config::Config;
use crate::dataset::list_images;
use crate::fault::report::{report_file_name, DetectionReport};
use crate::fault::store::{random_panel_id, sample_records};
use crate::fault::{catalog, Assignee, FaultError, FaultStore, RecordId, RecordUpdate, Status};
use crate::image_classifier::decode::{decode_image, open_image};
use crate::image_classifier::error::ClassifierError;
use crate::image_classifier::gateway::ClassifierGateway;
use crate::image_classifier::interface::Classification;
use crate::library::logger::interface::Logger;
use anyhow::Context;
use chrono::{DateTime, Local};
use eframe::egui;
use image::DynamicImage;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub use ui_state::{Page, UiState};

/// A classified image, as shown on the analyze page.
pub struct Analysis {
    pub source: PathBuf,
    pub image: DynamicImage,
    pub texture: Option<egui::TextureHandle>,
    pub classification: Classification,
    pub analyzed_at: DateTime<Local>,
    pub added_record: Option<RecordId>,
}

impl Analysis {
    pub fn report(&self) -> DetectionReport {
        DetectionReport::from_entry(
            catalog::entry(self.classification.fault_type),
            self.classification.confidence,
            self.analyzed_at,
        )
    }
}

pub struct DashboardApp {
    pub config: Config,
    pub store: FaultStore,
    pub gateway: ClassifierGateway,
    pub analysis: Option<Analysis>,
    pub ui: UiState,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl DashboardApp {
    pub fn new(
        config: Config,
        logger: Arc<dyn Logger + Send + Sync>,
        gateway: ClassifierGateway,
    ) -> Self {
        let mut store = FaultStore::new(logger.clone());
        store.seed(sample_records(Local::now()));

        Self {
            config,
            store,
            gateway,
            analysis: None,
            ui: UiState::default(),
            logger: logger.with_namespace("dashboard"),
        }
    }

    pub fn sample_images(&self) -> Vec<PathBuf> {
        if !self.config.sample_images_dir.is_dir() {
            return Vec::new();
        }
        match list_images(&self.config.sample_images_dir) {
            Ok(images) => images,
            Err(e) => {
                let _ = self.logger.error(&format!("{:#}", e));
                Vec::new()
            }
        }
    }

    /// Classifies the image at `path`. A failure clears the current result
    /// and is reported; the fault store is never touched.
    pub fn analyze(&mut self, path: &Path) {
        self.show_analysis(path.to_path_buf(), open_image(path));
    }

    /// Like `analyze`, for an image that arrived as bytes, such as a file
    /// dropped onto the window.
    pub fn analyze_bytes(&mut self, name: &str, bytes: &[u8]) {
        self.show_analysis(PathBuf::from(name), decode_image(bytes, name));
    }

    fn show_analysis(&mut self, source: PathBuf, image: Result<DynamicImage, ClassifierError>) {
        self.ui.clear_messages();
        self.analysis = None;

        let result = image.and_then(|image| {
            let classification = self.gateway.classify(&image)?;
            Ok((image, classification))
        });

        match result {
            Ok((image, classification)) => {
                let _ = self.logger.info(&format!(
                    "{} -> {} ({:.2}%)",
                    source.display(),
                    classification.fault_type,
                    classification.confidence * 100.0
                ));
                self.analysis = Some(Analysis {
                    source,
                    image,
                    texture: None,
                    classification,
                    analyzed_at: Local::now(),
                    added_record: None,
                });
            }
            Err(e) => {
                let _ = self.logger.error(&e.to_string());
                self.ui.last_error = Some(e.to_string());
            }
        }
    }

    /// Logs the current detection as a new, unassigned record on a generated panel id.
    pub fn add_analysis_to_store(&mut self) -> Option<Result<RecordId, FaultError>> {
        let analysis = self.analysis.as_mut()?;
        let panel_id = random_panel_id(&mut rand::rng());

        let result = self
            .store
            .add(
                &panel_id,
                analysis.classification.fault_type.label(),
                Assignee::Unassigned,
                Status::New,
            )
            .map(|record| record.id());

        if let Ok(id) = result {
            analysis.added_record = Some(id);
        }
        Some(result)
    }

    /// Writes the current detection report into the reports directory.
    pub fn save_report(&self) -> anyhow::Result<Option<PathBuf>> {
        let Some(analysis) = &self.analysis else {
            return Ok(None);
        };

        fs::create_dir_all(&self.config.reports_dir)
            .with_context(|| format!("creating {}", self.config.reports_dir.display()))?;
        let path = self
            .config
            .reports_dir
            .join(report_file_name(analysis.analyzed_at));
        fs::write(&path, analysis.report().render())
            .with_context(|| format!("writing report {}", path.display()))?;

        let _ = self
            .logger
            .info(&format!("Report saved to {}", path.display()));
        Ok(Some(path))
    }

    /// Applies the pending picks of a record card.
    pub fn save_record(&mut self, id: RecordId) -> Result<(), FaultError> {
        let Some(update) = self.ui.drafts.remove(&id) else {
            return Ok(());
        };
        self.store.update(id, update).map(|_| ())
    }

    pub fn draft_for(&mut self, id: RecordId) -> Option<&mut RecordUpdate> {
        let record = self.store.get(id)?;
        let current = RecordUpdate {
            assigned_to: Some(record.assigned_to),
            status: Some(record.status),
        };
        Some(self.ui.drafts.entry(id).or_insert(current))
    }

    fn sidebar(&mut self, ui: &mut egui::Ui) {
        ui.heading("🌞 Solar Fault System");
        ui.separator();

        ui.label(egui::RichText::new("Navigation").strong());
        for page in Page::ALL {
            ui.radio_value(&mut self.ui.page, page, page.label());
        }
        ui.separator();

        ui.label(egui::RichText::new("ℹ️ System Info").strong());
        ui.label(format!(
            "Model: {}",
            Path::new(&self.config.model.onnx_model_path)
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| self.config.model.onnx_model_path.clone())
        ));
        ui.label(format!("Classes: {} fault types", catalog::entries().len()));
        if !self.gateway.is_available() {
            ui.colored_label(style::severity_color(crate::fault::Severity::Critical), "Model unavailable");
        }
        ui.separator();

        ui.label(egui::RichText::new("📞 Quick Stats").strong());
        ui.label(format!("Total Faults: {}", self.store.len()));
        ui.label(format!("Active: {}", self.store.active_count()));
        if let Some(latest) = self.store.iter().map(|r| r.detected_at()).max() {
            ui.label(format!("Last Detection: {}", latest.format("%Y-%m-%d %H:%M")));
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::SidePanel::left("navigation")
            .resizable(false)
            .default_width(220.0)
            .show(ctx, |ui| self.sidebar(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .id_source("page_scroll")
                .auto_shrink([false, false])
                .show(ui, |ui| match self.ui.page {
                    Page::Analyze => analyze::analyze_page(ui, self),
                    Page::Manage => manage::manage_page(ui, self),
                    Page::Overview => overview::overview_page(ui, self),
                });
        });
    }
}

pub fn run(app: DashboardApp) -> eframe::Result<()> {
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Solar Fault Detection")
            .with_inner_size([1200.0, 800.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Solar Fault Detection",
        native_options,
        Box::new(|_cc| Box::new(app)),
    )
}
