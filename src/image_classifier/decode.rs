use crate::image_classifier::error::ClassifierError;
use image::DynamicImage;
use std::path::Path;

const SUPPORTED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

pub fn decode_image(bytes: &[u8], source_name: &str) -> Result<DynamicImage, ClassifierError> {
    image::load_from_memory(bytes).map_err(|e| ClassifierError::ImageDecode {
        source_name: source_name.to_string(),
        reason: e.to_string(),
    })
}

pub fn open_image(path: &Path) -> Result<DynamicImage, ClassifierError> {
    let source_name = path.display().to_string();
    let bytes = std::fs::read(path).map_err(|e| ClassifierError::ImageDecode {
        source_name: source_name.clone(),
        reason: e.to_string(),
    })?;
    decode_image(&bytes, &source_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, ImageOutputFormat, Rgb};
    use std::io::Cursor;

    #[test]
    fn supported_extensions() {
        assert!(is_supported_image(Path::new("a/b/panel.jpg")));
        assert!(is_supported_image(Path::new("panel.JPEG")));
        assert!(is_supported_image(Path::new("panel.png")));
        assert!(!is_supported_image(Path::new("panel.gif")));
        assert!(!is_supported_image(Path::new("panel")));
    }

    #[test]
    fn decodes_png_bytes() {
        let image = DynamicImage::ImageRgb8(ImageBuffer::from_pixel(4, 3, Rgb([1, 2, 3])));
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)
            .unwrap();

        let decoded = decode_image(&bytes, "memory").unwrap();
        assert_eq!((decoded.width(), decoded.height()), (4, 3));
    }

    #[test]
    fn corrupt_bytes_are_an_error() {
        let err = decode_image(b"not an image", "corrupt.jpg").unwrap_err();
        assert!(matches!(err, ClassifierError::ImageDecode { ref source_name, .. } if source_name == "corrupt.jpg"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = open_image(&dir.path().join("missing.jpg"));
        assert!(matches!(result, Err(ClassifierError::ImageDecode { .. })));
    }
}
