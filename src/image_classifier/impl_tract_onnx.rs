use crate::image_classifier::error::ClassifierError;
use crate::image_classifier::interface::{Classification, ImageClassifier};
use crate::image_classifier::models::model_config::ModelConfig;
use crate::image_classifier::tract::image::resize_image_to_tensor;
use crate::library::logger::interface::Logger;
use image::DynamicImage;
use std::sync::Arc;
use std::time::Instant;
use tract_onnx::prelude::*;

/// Classifier backed by the fine-tuned model exported to ONNX.
pub struct ImageClassifierTractOnnx {
    model: SimplePlan<TypedFact, Box<dyn TypedOp>, TypedModel>,
    config: ModelConfig,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl ImageClassifierTractOnnx {
    pub fn new(
        config: ModelConfig,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Result<Self, ClassifierError> {
        let logger = logger.with_namespace("image_classifier").with_namespace("tract");
        let (height, width) = config.input_shape;

        let _ = logger.info(&format!("Loading model from {}", config.onnx_model_path));

        let model = tract_onnx::onnx()
            .model_for_path(&config.onnx_model_path)
            .and_then(|model| {
                model.with_input_fact(0, f32::fact([1, 3, height as usize, width as usize]).into())
            })
            .and_then(|model| model.into_optimized())
            .and_then(|model| model.into_runnable())
            .map_err(|e| ClassifierError::ModelLoad {
                path: config.onnx_model_path.clone(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            model,
            config,
            logger,
        })
    }
}

impl ImageClassifier for ImageClassifierTractOnnx {
    fn classify(&self, image: &DynamicImage) -> Result<Classification, ClassifierError> {
        let started = Instant::now();
        let (height, width) = self.config.input_shape;
        let input = resize_image_to_tensor(image, width, height);

        let outputs = self
            .model
            .run(tvec!(input.into_tvalue()))
            .map_err(|e| ClassifierError::Classification(e.to_string()))?;

        let output = outputs
            .first()
            .ok_or_else(|| ClassifierError::Classification("model produced no output".to_string()))?
            .to_array_view::<f32>()
            .map_err(|e| ClassifierError::Classification(e.to_string()))?;

        // [1, classes] for a classification head
        let scores: Vec<f32> = output.iter().copied().collect();
        let classification = Classification::from_scores(&scores)?;

        let _ = self.logger.info(&format!(
            "Classified as {} ({:.2}%) in {:?}",
            classification.fault_type,
            classification.confidence * 100.0,
            started.elapsed()
        ));

        Ok(classification)
    }
}
