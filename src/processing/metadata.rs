//! Header-only metadata probe.
//!
//! Reads just enough of the container to learn width, height, and declared
//! format; pixel data is never decoded here. The async deadline around this
//! probe lives in the pipeline.

use std::io::Cursor;

use image::ImageReader;

use crate::core::ImageMetadata;
use crate::processing::validation::validate_metadata;
use crate::utils::MetadataError;

/// Probes `buffer` for image metadata and validates its bounds.
pub fn probe(buffer: &[u8]) -> Result<ImageMetadata, MetadataError> {
    let reader = ImageReader::new(Cursor::new(buffer))
        .with_guessed_format()
        .map_err(|e| MetadataError::Decode(format!("Failed to sniff image format: {e}")))?;

    let format = reader
        .format()
        .ok_or_else(|| MetadataError::Decode("Unrecognized image format".to_string()))?;
    let source_format = format
        .extensions_str()
        .first()
        .copied()
        .unwrap_or("unknown")
        .to_string();

    let (width, height) = reader
        .into_dimensions()
        .map_err(|e| MetadataError::Decode(format!("Failed to read image header: {e}")))?;

    let metadata = ImageMetadata { width, height, source_format };
    validate_metadata(&metadata)?;
    Ok(metadata)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, RgbaImage};

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, image::Rgba([40, 90, 200, 255]));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png).unwrap();
        bytes
    }

    #[test]
    fn probes_dimensions_and_format() {
        let meta = probe(&png_bytes(64, 48)).unwrap();
        assert_eq!(meta.width, 64);
        assert_eq!(meta.height, 48);
        assert_eq!(meta.source_format, "png");
    }

    #[test]
    fn rejects_undecodable_bytes() {
        match probe(b"definitely not an image") {
            Err(MetadataError::Decode(_)) => {}
            other => panic!("expected Decode error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_truncated_header() {
        let mut bytes = png_bytes(10, 10);
        bytes.truncate(12);
        assert!(probe(&bytes).is_err());
    }

    #[test]
    fn rejects_oversized_image() {
        // 10001x1 keeps the fixture tiny while crossing the dimension cap
        match probe(&png_bytes(10_001, 1)) {
            Err(MetadataError::TooLarge { width, .. }) => assert_eq!(width, 10_001),
            other => panic!("expected TooLarge, got {other:?}"),
        }
    }
}
