//! Error types for the variant pipeline.
//!
//! Provides a hierarchy of error types using `thiserror` for ergonomic error handling.
//! Two severities exist: [`MetadataError`] is fatal to a whole image, while
//! [`TransformError`] is scoped to a single variant job and never aborts siblings.

use std::time::Duration;
use thiserror::Error;
use serde::Serialize;

/// Fatal errors produced while probing and validating image metadata.
///
/// Any of these abort the affected image's outcome as a whole.
#[derive(Error, Debug, Serialize)]
pub enum MetadataError {
    /// Metadata probe did not finish within its deadline
    #[error("Metadata probe timed out after {0:?}")]
    Timeout(Duration),

    /// Bytes could not be parsed as an image
    #[error("Decode error: {0}")]
    Decode(String),

    /// Decoded header reported a zero or missing dimension
    #[error("Invalid image: {0}")]
    InvalidImage(String),

    /// A dimension exceeds the supported maximum
    #[error("Image too large: {width}x{height} exceeds {max}px limit")]
    TooLarge { width: u32, height: u32, max: u32 },
}

/// Soft errors produced while executing a single transform job.
///
/// A job failing with any of these is recorded in the outcome's failure list;
/// sibling jobs and sibling images proceed untouched.
#[derive(Error, Debug, Serialize)]
pub enum TransformError {
    /// Job did not finish within its deadline
    #[error("Transform timed out after {0:?}")]
    Timeout(Duration),

    /// Encoder produced a zero-length buffer
    #[error("Transform produced empty output")]
    EmptyOutput,

    /// Requested output format is not one of the supported set
    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),

    /// Decode, resize, or encode failed
    #[error("Processing error: {0}")]
    Processing(String),
}

/// Main error type for the pipeline entry points.
#[derive(Error, Debug, Serialize)]
pub enum PipelineError {
    /// Image metadata was rejected
    #[error("Metadata error: {0}")]
    Metadata(#[from] MetadataError),

    /// Caller-supplied options are malformed
    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    /// Worker pool or task scheduling failure
    #[error("Worker error: {0}")]
    Worker(String),
}

/// Convenience result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

// Helper methods for error creation
impl PipelineError {
    pub fn invalid_options<T: Into<String>>(msg: T) -> Self {
        Self::InvalidOptions(msg.into())
    }

    pub fn worker<T: Into<String>>(msg: T) -> Self {
        Self::Worker(msg.into())
    }
}

impl TransformError {
    pub fn processing<T: Into<String>>(msg: T) -> Self {
        Self::Processing(msg.into())
    }
}

impl From<tokio::sync::AcquireError> for PipelineError {
    fn from(err: tokio::sync::AcquireError) -> Self {
        Self::Worker(format!("Failed to acquire worker: {}", err))
    }
}
