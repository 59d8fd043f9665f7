use crate::image_classifier::error::ClassifierError;
use crate::image_classifier::decode::open_image;
use crate::image_classifier::impl_tract_onnx::ImageClassifierTractOnnx;
use crate::image_classifier::interface::{Classification, ImageClassifier};
use crate::image_classifier::models::model_config::ModelConfig;
use crate::library::logger::interface::Logger;
use image::DynamicImage;
use std::path::Path;
use std::sync::{Arc, OnceLock};

type Loaded = Result<Arc<dyn ImageClassifier + Send + Sync>, ClassifierError>;
type Loader = Box<dyn Fn() -> Loaded + Send + Sync>;

/// Loads the classifier on first use and keeps it, or the load failure,
/// for the rest of the process.
pub struct ClassifierGateway {
    loader: Loader,
    loaded: OnceLock<Loaded>,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl ClassifierGateway {
    pub fn new(loader: Loader, logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            loader,
            loaded: OnceLock::new(),
            logger: logger.with_namespace("classifier_gateway"),
        }
    }

    pub fn onnx(config: ModelConfig, logger: Arc<dyn Logger + Send + Sync>) -> Self {
        let model_logger = logger.clone();
        Self::new(
            Box::new(move || -> Loaded {
                let classifier = ImageClassifierTractOnnx::new(config.clone(), model_logger.clone())?;
                Ok(Arc::new(classifier) as Arc<dyn ImageClassifier + Send + Sync>)
            }),
            logger,
        )
    }

    pub fn with_classifier(
        classifier: Arc<dyn ImageClassifier + Send + Sync>,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Self {
        Self::new(Box::new(move || -> Loaded { Ok(classifier.clone()) }), logger)
    }

    pub fn classifier(&self) -> Loaded {
        self.loaded
            .get_or_init(|| {
                let loaded = (self.loader)();
                match &loaded {
                    Ok(_) => {
                        let _ = self.logger.info("Classifier ready");
                    }
                    Err(e) => {
                        let _ = self.logger.error(&format!("Model unavailable: {}", e));
                    }
                }
                loaded
            })
            .clone()
    }

    pub fn is_available(&self) -> bool {
        self.classifier().is_ok()
    }

    pub fn classify(&self, image: &DynamicImage) -> Result<Classification, ClassifierError> {
        let classifier = self.classifier()?;
        classifier.classify(image).map_err(|e| {
            let _ = self.logger.error(&e.to_string());
            e
        })
    }

    pub fn classify_path(&self, path: &Path) -> Result<Classification, ClassifierError> {
        let image = open_image(path)?;
        self.classify(&image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fault::FaultType;
    use crate::image_classifier::impl_fake::ImageClassifierFake;
    use crate::library::logger::impl_console::LoggerConsole;
    use image::{ImageBuffer, Rgb};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn logger() -> Arc<dyn Logger + Send + Sync> {
        Arc::new(LoggerConsole::new(chrono::FixedOffset::east_opt(0).unwrap()))
    }

    fn image() -> DynamicImage {
        DynamicImage::ImageRgb8(ImageBuffer::from_pixel(8, 8, Rgb([9, 9, 9])))
    }

    #[test]
    fn loads_once() {
        let loads = Arc::new(AtomicUsize::new(0));
        let counter = loads.clone();
        let log = logger();
        let fake_logger = log.clone();
        let gateway = ClassifierGateway::new(
            Box::new(move || -> Loaded {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(Arc::new(ImageClassifierFake::fixed(
                    fake_logger.clone(),
                    FaultType::Diode,
                    0.9,
                )) as Arc<dyn ImageClassifier + Send + Sync>)
            }),
            log,
        );

        assert_eq!(gateway.classify(&image()).unwrap().fault_type, FaultType::Diode);
        assert_eq!(gateway.classify(&image()).unwrap().fault_type, FaultType::Diode);
        assert!(gateway.is_available());
        assert_eq!(loads.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn missing_model_is_remembered_as_unavailable() {
        let config = ModelConfig {
            onnx_model_path: "does/not/exist.onnx".to_string(),
            ..ModelConfig::default()
        };
        let gateway = ClassifierGateway::onnx(config, logger());

        assert!(!gateway.is_available());
        assert!(matches!(
            gateway.classify(&image()),
            Err(ClassifierError::ModelLoad { ref path, .. }) if path == "does/not/exist.onnx"
        ));
    }

    #[test]
    fn unreadable_image_surfaces_an_error() {
        let log = logger();
        let gateway = ClassifierGateway::with_classifier(
            Arc::new(ImageClassifierFake::new(log.clone())),
            log,
        );
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.jpg");
        std::fs::write(&path, b"garbage").unwrap();

        assert!(matches!(
            gateway.classify_path(&path),
            Err(ClassifierError::ImageDecode { .. })
        ));
    }
}
