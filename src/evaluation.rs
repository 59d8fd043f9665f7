use crate::dataset::ClassImages;
use crate::image_classifier::decode::open_image;
use crate::image_classifier::error::ClassifierError;
use crate::image_classifier::gateway::ClassifierGateway;
use crate::library::logger::interface::Logger;
use std::sync::Arc;

const TOP_K: usize = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvaluationReport {
    pub images: usize,
    pub top1_hits: usize,
    pub top5_hits: usize,
    pub failures: usize,
}

impl EvaluationReport {
    pub fn top1_accuracy(&self) -> f64 {
        ratio(self.top1_hits, self.images)
    }

    pub fn top5_accuracy(&self) -> f64 {
        ratio(self.top5_hits, self.images)
    }
}

fn ratio(hits: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        hits as f64 / total as f64
    }
}

/// Classifies every image of every known class and tallies top-1 / top-5
/// hits. Unreadable images are counted as failures and skipped; a model
/// that cannot be loaded aborts the run.
pub fn evaluate(
    gateway: &ClassifierGateway,
    classes: &[ClassImages],
    logger: Arc<dyn Logger + Send + Sync>,
) -> Result<EvaluationReport, ClassifierError> {
    let logger = logger.with_namespace("evaluation");
    let classifier = gateway.classifier()?;
    let mut report = EvaluationReport::default();

    for class in classes {
        let Some(expected) = class.fault_type else {
            let _ = logger.info(&format!(
                "Skipping {}: not a fault class ({} images)",
                class.label,
                class.images.len()
            ));
            continue;
        };

        for path in &class.images {
            let classification = match open_image(path).and_then(|image| classifier.classify(&image)) {
                Ok(classification) => classification,
                Err(e) => {
                    let _ = logger.error(&e.to_string());
                    report.failures += 1;
                    continue;
                }
            };

            report.images += 1;
            if classification.fault_type == expected {
                report.top1_hits += 1;
            }
            if classification.top_k(TOP_K).any(|f| f == expected) {
                report.top5_hits += 1;
            }
        }
    }

    let _ = logger.info(&format!(
        "Evaluated {} images ({} failures)",
        report.images, report.failures
    ));

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::scan_split;
    use crate::fault::FaultType;
    use crate::image_classifier::impl_fake::ImageClassifierFake;
    use crate::image_classifier::models::model_config::ModelConfig;
    use crate::library::logger::impl_console::LoggerConsole;
    use image::{ImageBuffer, Rgb, RgbImage};
    use std::fs;

    fn logger() -> Arc<dyn Logger + Send + Sync> {
        Arc::new(LoggerConsole::new(chrono::FixedOffset::east_opt(0).unwrap()))
    }

    #[test]
    fn evaluate_counts_top1_and_top5_hits() {
        let dir = tempfile::tempdir().unwrap();
        let image: RgbImage = ImageBuffer::from_pixel(8, 8, Rgb([40, 40, 40]));
        for (class, count) in [("Soiling", 2), ("Cell", 1), ("Vegetation", 1), ("notes", 1)] {
            let class_dir = dir.path().join(class);
            fs::create_dir(&class_dir).unwrap();
            for i in 0..count {
                image.save(class_dir.join(format!("{}.png", i))).unwrap();
            }
        }
        fs::write(dir.path().join("Soiling").join("broken.jpg"), b"garbage").unwrap();

        let log = logger();
        let gateway = ClassifierGateway::with_classifier(
            Arc::new(ImageClassifierFake::fixed(log.clone(), FaultType::Soiling, 0.9)),
            log.clone(),
        );
        let classes = scan_split(dir.path()).unwrap();

        let report = evaluate(&gateway, &classes, log).unwrap();

        // remaining probability is shared evenly, so ties fall back to class order:
        // Soiling, Cell, Cell-Multi, Cracking, Diode
        assert_eq!(
            report,
            EvaluationReport {
                images: 4,
                top1_hits: 2,
                top5_hits: 3,
                failures: 1,
            }
        );
        assert!((report.top1_accuracy() - 0.5).abs() < 1e-9);
        assert!((report.top5_accuracy() - 0.75).abs() < 1e-9);
    }

    #[test]
    fn evaluate_fails_when_model_cannot_load() {
        let log = logger();
        let gateway = ClassifierGateway::onnx(
            ModelConfig {
                onnx_model_path: "missing.onnx".to_string(),
                ..ModelConfig::default()
            },
            log.clone(),
        );

        assert!(matches!(
            evaluate(&gateway, &[], log),
            Err(ClassifierError::ModelLoad { .. })
        ));
    }

    #[test]
    fn empty_report_has_zero_accuracy() {
        let report = EvaluationReport::default();
        assert_eq!(report.top1_accuracy(), 0.0);
        assert_eq!(report.top5_accuracy(), 0.0);
    }
}
