//! Maps output formats to their encoder settings and runs the encode.
//!
//! Each format gets a fixed settings profile: WebP takes the job's quality at
//! maximum compression effort, JPEG is pinned to quality 85, PNG uses heavy
//! compression with adaptive filtering. Dispatch goes through the closed
//! [`EncodeSettings`] variant, never through string comparison.

use std::io::Cursor;

use image::DynamicImage;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder};

use crate::utils::{OutputFormat, TransformError};

// ── Default encoder constants ─────────────────────────────────────────────────────────

const JPEG_QUALITY: u8 = 85;
const PNG_COMPRESSION: u8 = 8; // 0-9 scale, mapped to the png crate's tiers
const WEBP_EFFORT: u8 = 6; // libwebp method 0-6, 6 = slowest/smallest

/// Fully resolved encoder settings for one transform job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeSettings {
    Webp { quality: u8, effort: u8 },
    Jpeg { quality: u8 },
    Png { compression: u8, adaptive_filter: bool },
}

impl EncodeSettings {
    /// Resolves the settings profile for `format` at the job's `quality`.
    ///
    /// Only WebP is quality-driven; JPEG and PNG use fixed profiles.
    pub fn resolve(format: OutputFormat, quality: u8) -> Self {
        match format {
            OutputFormat::Webp => Self::Webp { quality, effort: WEBP_EFFORT },
            OutputFormat::Jpeg => Self::Jpeg { quality: JPEG_QUALITY },
            OutputFormat::Png => Self::Png {
                compression: PNG_COMPRESSION,
                adaptive_filter: true,
            },
        }
    }
}

// ── Format encode functions ───────────────────────────────────────────────────────────

/// Encodes `image` as lossy WebP via libwebp.
fn encode_webp(image: &DynamicImage, quality: u8, effort: u8) -> Result<Vec<u8>, TransformError> {
    let rgba = image.to_rgba8();
    let encoder = webp::Encoder::from_rgba(rgba.as_raw(), rgba.width(), rgba.height());

    let mut config = webp::WebPConfig::new()
        .map_err(|_| TransformError::processing("Failed to initialise WebP config"))?;
    config.quality = quality as f32;
    config.method = effort as i32;

    let encoded = encoder
        .encode_advanced(&config)
        .map_err(|e| TransformError::processing(format!("WebP encode failed: {e:?}")))?;
    Ok(encoded.to_vec())
}

/// Encodes `image` as baseline JPEG over RGB8.
fn encode_jpeg(image: &DynamicImage, quality: u8) -> Result<Vec<u8>, TransformError> {
    let mut buf = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buf, quality);
    image
        .to_rgb8()
        .write_with_encoder(encoder)
        .map_err(|e| TransformError::processing(format!("JPEG encode failed: {e}")))?;
    Ok(buf.into_inner())
}

/// Encodes `image` as PNG.
fn encode_png(
    image: &DynamicImage,
    compression: u8,
    adaptive_filter: bool,
) -> Result<Vec<u8>, TransformError> {
    let compression = match compression {
        0..=3 => CompressionType::Fast,
        4..=6 => CompressionType::Default,
        _ => CompressionType::Best,
    };
    let filter = if adaptive_filter {
        PngFilterType::Adaptive
    } else {
        PngFilterType::NoFilter
    };

    let mut buf = Cursor::new(Vec::new());
    let encoder = PngEncoder::new_with_quality(&mut buf, compression, filter);
    image
        .write_with_encoder(encoder)
        .map_err(|e| TransformError::processing(format!("PNG encode failed: {e}")))?;
    Ok(buf.into_inner())
}

/// Encodes `image` with the given settings, returning the output bytes.
pub fn encode_image(
    image: &DynamicImage,
    settings: &EncodeSettings,
) -> Result<Vec<u8>, TransformError> {
    match *settings {
        EncodeSettings::Webp { quality, effort } => encode_webp(image, quality, effort),
        EncodeSettings::Jpeg { quality } => encode_jpeg(image, quality),
        EncodeSettings::Png { compression, adaptive_filter } => {
            encode_png(image, compression, adaptive_filter)
        }
    }
}
