//! Entry validation for caller options and probed metadata.

use crate::core::{ImageMetadata, ProcessOptions};
use crate::utils::{MetadataError, PipelineError, PipelineResult};

/// Largest accepted source dimension, in pixels.
///
/// Decoding anywhere near this limit is memory-heavy; anything beyond it is
/// rejected before any pixel data is touched.
pub const MAX_DIMENSION: u32 = 10_000;

/// Validates a caller-supplied options bundle.
///
/// A malformed bundle is a programmer error and fails the whole call, unlike
/// per-image data problems which are isolated per image.
pub fn validate_options(options: &ProcessOptions) -> PipelineResult<()> {
    if options.quality == 0 || options.quality > 100 {
        return Err(PipelineError::invalid_options(format!(
            "Invalid quality value: {}. Must be between 1 and 100",
            options.quality
        )));
    }

    if options.formats.is_empty() {
        return Err(PipelineError::invalid_options("No output formats requested"));
    }

    if options.sizes.is_empty() {
        return Err(PipelineError::invalid_options("No sizes requested"));
    }

    Ok(())
}

/// Validates probed metadata bounds.
pub fn validate_metadata(metadata: &ImageMetadata) -> Result<(), MetadataError> {
    if metadata.width == 0 || metadata.height == 0 {
        return Err(MetadataError::InvalidImage(format!(
            "Image has a zero dimension: {}x{}",
            metadata.width, metadata.height
        )));
    }

    if metadata.width > MAX_DIMENSION || metadata.height > MAX_DIMENSION {
        return Err(MetadataError::TooLarge {
            width: metadata.width,
            height: metadata.height,
            max: MAX_DIMENSION,
        });
    }

    Ok(())
}
