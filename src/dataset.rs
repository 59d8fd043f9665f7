use crate::fault::FaultType;
use crate::image_classifier::decode::is_supported_image;
use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};

/// Images of one class directory in a dataset split (`<split>/<Class>/*.jpg`).
#[derive(Debug, Clone, PartialEq)]
pub struct ClassImages {
    pub label: String,
    pub fault_type: Option<FaultType>,
    pub images: Vec<PathBuf>,
}

/// Class directories of a split, sorted by name. Image lists are sorted too
/// so runs are reproducible.
pub fn scan_split(dir: &Path) -> anyhow::Result<Vec<ClassImages>> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("reading dataset split {}", dir.display()))?;

    let mut classes = Vec::new();
    for entry in entries {
        let path = entry
            .with_context(|| format!("listing {}", dir.display()))?
            .path();
        if !path.is_dir() {
            continue;
        }
        let label = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name.to_string(),
            None => continue,
        };
        classes.push(ClassImages {
            fault_type: label.parse().ok(),
            images: list_images(&path)?,
            label,
        });
    }

    classes.sort_by(|a, b| a.label.cmp(&b.label));
    Ok(classes)
}

pub fn list_images(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut images = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("reading {}", dir.display()))? {
        let path = entry.with_context(|| format!("listing {}", dir.display()))?.path();
        if path.is_file() && is_supported_image(&path) {
            images.push(path);
        }
    }
    images.sort();
    Ok(images)
}
