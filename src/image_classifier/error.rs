#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ClassifierError {
    #[error("could not load model {path}: {reason}")]
    ModelLoad { path: String, reason: String },
    #[error("could not read image {source_name}: {reason}")]
    ImageDecode { source_name: String, reason: String },
    #[error("classification failed: {0}")]
    Classification(String),
}
