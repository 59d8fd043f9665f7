use crate::image_classifier::models::model_config::ModelConfig;
use anyhow::Context;
use chrono::{FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub model: ModelConfig,
    pub sample_images_dir: PathBuf,
    pub reports_dir: PathBuf,
    pub dataset_dir: PathBuf,
    pub logger_utc_offset_hours: i32,
    /// Installed panel count shown on the overview page.
    pub total_panels: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: ModelConfig::default(),
            sample_images_dir: PathBuf::from("sample_images"),
            reports_dir: PathBuf::from("reports"),
            dataset_dir: PathBuf::from("data/images"),
            logger_utc_offset_hours: 0,
            total_panels: 1247,
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading config {}", path_ref.display()))?;
        let config: Config = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn logger_timezone(&self) -> FixedOffset {
        self.logger_utc_offset_hours
            .checked_mul(3600)
            .and_then(FixedOffset::east_opt)
            .unwrap_or_else(|| Utc.fix())
    }
}
