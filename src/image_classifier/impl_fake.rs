use crate::fault::FaultType;
use crate::image_classifier::error::ClassifierError;
use crate::image_classifier::interface::{Classification, ImageClassifier};
use crate::library::logger::interface::Logger;
use image::DynamicImage;
use std::sync::Arc;

/// Stand-in classifier with reproducible output, for tests and running
/// without a model artifact.
pub struct ImageClassifierFake {
    logger: Arc<dyn Logger + Send + Sync>,
    fixed: Option<(FaultType, f32)>,
}

impl ImageClassifierFake {
    /// Picks the fault type from the image's pixel content, so the same
    /// image always gets the same label.
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            logger: logger.with_namespace("image_classifier").with_namespace("fake"),
            fixed: None,
        }
    }

    /// Always answers `fault_type` with `confidence`.
    #[cfg(test)]
    pub fn fixed(logger: Arc<dyn Logger + Send + Sync>, fault_type: FaultType, confidence: f32) -> Self {
        Self {
            fixed: Some((fault_type, confidence.clamp(0.0, 1.0))),
            ..Self::new(logger)
        }
    }
}

fn scores_for(fault_type: FaultType, confidence: f32) -> Vec<f32> {
    let rest = (1.0 - confidence) / (FaultType::ALL.len() - 1) as f32;
    FaultType::ALL
        .iter()
        .map(|f| if *f == fault_type { confidence } else { rest })
        .collect()
}

impl ImageClassifier for ImageClassifierFake {
    fn classify(&self, image: &DynamicImage) -> Result<Classification, ClassifierError> {
        let _ = self.logger.info(&format!(
            "Classifying {}x{} image with fake classifier...",
            image.width(),
            image.height()
        ));

        let (fault_type, confidence) = match self.fixed {
            Some(fixed) => fixed,
            None => {
                let luma = image.to_luma8();
                let checksum = luma
                    .as_raw()
                    .iter()
                    .fold(0u64, |acc, &p| acc.wrapping_mul(31).wrapping_add(p as u64));
                let index = (checksum % FaultType::ALL.len() as u64) as usize;
                (FaultType::ALL[index], 0.8)
            }
        };

        Classification::from_scores(&scores_for(fault_type, confidence))
    }
}
