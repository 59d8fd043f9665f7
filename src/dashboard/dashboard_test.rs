use super::DashboardApp;
use crate::config::Config;
use crate::fault::{Assignee, FaultType, RecordUpdate, Severity, Status};
use crate::image_classifier::gateway::ClassifierGateway;
use crate::image_classifier::impl_fake::ImageClassifierFake;
use crate::image_classifier::models::model_config::ModelConfig;
use crate::library::logger::{impl_console::LoggerConsole, interface::Logger};
use image::{DynamicImage, ImageBuffer, ImageOutputFormat, Rgb, RgbImage};
use std::io::Cursor;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

struct Fixture {
    dir: TempDir,
    app: DashboardApp,
}

impl Fixture {
    fn with_gateway(gateway: impl FnOnce(Arc<dyn Logger + Send + Sync>) -> ClassifierGateway) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let logger: Arc<dyn Logger + Send + Sync> =
            Arc::new(LoggerConsole::new(chrono::FixedOffset::east_opt(0).unwrap()));
        let config = Config {
            sample_images_dir: dir.path().join("samples"),
            reports_dir: dir.path().join("reports"),
            ..Config::default()
        };
        let app = DashboardApp::new(config, logger.clone(), gateway(logger));
        Self { dir, app }
    }

    fn fixed(fault_type: FaultType, confidence: f32) -> Self {
        Self::with_gateway(|logger| {
            ClassifierGateway::with_classifier(
                Arc::new(ImageClassifierFake::fixed(logger.clone(), fault_type, confidence)),
                logger,
            )
        })
    }

    fn image(&self, name: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        let image: RgbImage = ImageBuffer::from_pixel(16, 16, Rgb([200, 60, 20]));
        image.save(&path).unwrap();
        path
    }
}

#[test]
fn test_starts_with_seed_records() {
    let f = Fixture::fixed(FaultType::Soiling, 0.9);
    assert_eq!(f.app.store.len(), 5);
    assert_eq!(f.app.store.active_count(), 4);
    assert!(f.app.analysis.is_none());
}

#[test]
fn test_analyze_then_add_to_store() {
    let mut f = Fixture::fixed(FaultType::HotSpot, 0.93);
    let path = f.image("panel.png");

    f.app.analyze(&path);
    let analysis = f.app.analysis.as_ref().unwrap();
    assert_eq!(analysis.classification.fault_type, FaultType::HotSpot);
    assert!(f.app.ui.last_error.is_none());

    let id = f.app.add_analysis_to_store().unwrap().unwrap();
    assert_eq!(f.app.store.len(), 6);

    let first = f.app.store.iter().next().unwrap();
    assert_eq!(first.id(), id);
    assert_eq!(first.fault_type(), FaultType::HotSpot);
    assert_eq!(first.severity(), Severity::High);
    assert_eq!(first.efficiency_loss(), "15-30%");
    assert_eq!(first.assigned_to, Assignee::Unassigned);
    assert_eq!(first.status, Status::New);
    assert_eq!(f.app.analysis.as_ref().unwrap().added_record, Some(id));
}

#[test]
fn test_add_without_analysis_does_nothing() {
    let mut f = Fixture::fixed(FaultType::Cell, 0.9);
    assert!(f.app.add_analysis_to_store().is_none());
    assert_eq!(f.app.store.len(), 5);
}

#[test]
fn test_unreadable_image_leaves_store_alone() {
    let mut f = Fixture::fixed(FaultType::Cell, 0.9);
    let path = f.dir.path().join("corrupt.jpg");
    std::fs::write(&path, b"definitely not a jpeg").unwrap();

    f.app.analyze(&path);

    assert!(f.app.analysis.is_none());
    assert!(f.app.ui.last_error.is_some());
    assert_eq!(f.app.store.len(), 5);
}

#[test]
fn test_dropped_image_bytes_are_analyzed() {
    let mut f = Fixture::fixed(FaultType::Vegetation, 0.77);
    let image: RgbImage = ImageBuffer::from_pixel(16, 16, Rgb([30, 160, 40]));
    let mut bytes = Vec::new();
    DynamicImage::ImageRgb8(image)
        .write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)
        .unwrap();

    f.app.analyze_bytes("dropped.png", &bytes);

    let analysis = f.app.analysis.as_ref().unwrap();
    assert_eq!(analysis.source, PathBuf::from("dropped.png"));
    assert_eq!(analysis.classification.fault_type, FaultType::Vegetation);
    assert!(f.app.ui.last_error.is_none());
}

#[test]
fn test_dropped_garbage_is_reported_by_name() {
    let mut f = Fixture::fixed(FaultType::Cell, 0.9);
    let path = f.image("before.png");
    f.app.analyze(&path);
    assert!(f.app.analysis.is_some());

    f.app.analyze_bytes("scan.jpg", b"not an image");

    assert!(f.app.analysis.is_none());
    assert!(f.app.ui.last_error.as_ref().unwrap().contains("scan.jpg"));
    assert_eq!(f.app.store.len(), 5);
}

#[test]
fn test_missing_model_degrades_to_records_only() {
    let mut f = Fixture::with_gateway(|logger| {
        ClassifierGateway::onnx(
            ModelConfig {
                onnx_model_path: "missing/best.onnx".to_string(),
                ..ModelConfig::default()
            },
            logger,
        )
    });
    let path = f.image("panel.png");

    f.app.analyze(&path);

    assert!(!f.app.gateway.is_available());
    assert!(f.app.analysis.is_none());
    assert!(f.app.ui.last_error.as_ref().unwrap().contains("missing/best.onnx"));
    assert_eq!(f.app.store.len(), 5);
}

#[test]
fn test_save_report_writes_rendered_report() {
    let mut f = Fixture::fixed(FaultType::Soiling, 0.812);
    assert!(f.app.save_report().unwrap().is_none());

    let path = f.image("panel.png");
    f.app.analyze(&path);
    let written = f.app.save_report().unwrap().unwrap();

    assert!(written.starts_with(f.dir.path().join("reports")));
    let name = written.file_name().unwrap().to_str().unwrap();
    assert!(name.starts_with("report_") && name.ends_with(".txt"));

    let contents = std::fs::read_to_string(&written).unwrap();
    assert_eq!(contents, f.app.analysis.as_ref().unwrap().report().render());
    assert!(contents.contains("Fault Type: Soiling\n"));
    assert!(contents.contains("Confidence: 81.20%\n"));
    assert!(contents.contains("Action: Clean panels\n"));
}

#[test]
fn test_record_card_edits_are_saved_by_id() {
    let mut f = Fixture::fixed(FaultType::Soiling, 0.9);
    let target = f.app.store.iter().nth(1).unwrap().clone();

    let draft = f.app.draft_for(target.id()).unwrap();
    assert_eq!(draft.assigned_to, Some(target.assigned_to));
    assert_eq!(draft.status, Some(target.status));
    *draft = RecordUpdate {
        assigned_to: Some(Assignee::EmmaDavis),
        status: Some(Status::Completed),
    };

    // a new record shifts every position before the save lands
    f.app
        .store
        .add("Z-9", "Cell", Assignee::Unassigned, Status::New)
        .unwrap();
    f.app.save_record(target.id()).unwrap();

    let saved = f.app.store.get(target.id()).unwrap();
    assert_eq!(saved.assigned_to, Assignee::EmmaDavis);
    assert_eq!(saved.status, Status::Completed);
    assert_eq!(saved.severity(), target.severity());
    assert!(f.app.ui.drafts.is_empty());
}

#[test]
fn test_sample_images_listed_when_present() {
    let f = Fixture::fixed(FaultType::Soiling, 0.9);
    assert!(f.app.sample_images().is_empty());

    let samples = f.dir.path().join("samples");
    std::fs::create_dir(&samples).unwrap();
    std::fs::write(samples.join("b.jpg"), b"x").unwrap();
    std::fs::write(samples.join("a.jpg"), b"x").unwrap();
    std::fs::write(samples.join("notes.txt"), b"x").unwrap();

    let names: Vec<String> = f
        .app
        .sample_images()
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
        .collect();
    assert_eq!(names, vec!["a.jpg", "b.jpg"]);
}
