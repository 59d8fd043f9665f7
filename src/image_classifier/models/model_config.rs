use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub onnx_model_path: String,
    /// (height, width) of the model input.
    pub input_shape: (u32, u32),
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            onnx_model_path: "runs/classify/solar_fault_detection/weights/best.onnx".to_string(),
            input_shape: (224, 224),
        }
    }
}
