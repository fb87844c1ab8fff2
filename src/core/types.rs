//! Core types for variant generation options and results.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::utils::{PipelineError, TransformError};

/// Options bundle controlling which variants are produced from one image.
///
/// Format and size names are loosely typed tags here; they are normalised and
/// resolved inside the pipeline. Unknown size names are dropped without
/// error, unknown format tags fail their jobs softly at execution time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessOptions {
    /// Requested output formats ("webp", "jpeg"/"jpg", "png")
    pub formats: Vec<String>,
    /// Requested size-profile names ("thumbnail", "medium", "large", "original")
    pub sizes: Vec<String>,
    /// Encoding quality (1-100), applied to quality-driven formats
    pub quality: u8,
}

/// Read-only facts about a source image, derived from its header.
#[derive(Debug, Clone, Serialize)]
pub struct ImageMetadata {
    /// Source width in pixels
    pub width: u32,
    /// Source height in pixels
    pub height: u32,
    /// Declared format's canonical extension ("jpeg", "png", ...)
    #[serde(rename = "sourceFormat")]
    pub source_format: String,
}

/// Resolved target geometry for one transform job.
///
/// Resolved once at planning time so every job carries exact dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizePlan {
    /// Scale to fully cover the box, then center-crop to exact dimensions.
    Cover { width: u32, height: u32 },
    /// Render at exactly these aspect-preserving dimensions.
    Exact { width: u32, height: u32 },
}

impl ResizePlan {
    /// Target dimensions the rendered variant will have.
    pub fn dimensions(&self) -> (u32, u32) {
        match *self {
            Self::Cover { width, height } | Self::Exact { width, height } => (width, height),
        }
    }
}

/// One planned unit of work: a single (size, format) rendition.
#[derive(Debug, Clone)]
pub struct TransformJob {
    /// Size-profile name this job renders
    pub size: String,
    /// Normalised output format tag (resolved to a codec at execution)
    pub format: String,
    /// Encoding quality (1-100)
    pub quality: u8,
    /// Resolved target geometry
    pub plan: ResizePlan,
    /// Key the resulting buffer is stored under in the variant map
    pub key: String,
}

/// A single job that failed, recorded without disturbing its siblings.
#[derive(Debug)]
pub struct TransformFailure {
    /// Variant key the job would have produced
    pub key: String,
    /// Why the job failed
    pub error: TransformError,
}

/// Result of processing one image.
///
/// The image-level operation is successful once metadata validation passed;
/// individual jobs may still have failed and are listed in `failures` in job
/// order so the caller can enumerate which variants are missing and why.
#[derive(Debug)]
pub struct ProcessingOutcome {
    /// Produced variants, keyed by size (single-format) or size_format
    pub variants: HashMap<String, Vec<u8>>,
    /// Jobs that failed, in planning order
    pub failures: Vec<TransformFailure>,
    /// Validated source metadata
    pub metadata: ImageMetadata,
}

impl ProcessingOutcome {
    /// Returns the variant buffer stored under `key`, if the job succeeded.
    pub fn variant(&self, key: &str) -> Option<&[u8]> {
        self.variants.get(key).map(Vec::as_slice)
    }

    /// True when every planned job produced a variant.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// One entry of a batch result, in input order.
#[derive(Debug)]
pub struct BatchItem {
    /// Position of the source buffer in the input sequence
    pub index: usize,
    /// The image's outcome, or its fatal error
    pub outcome: Result<ProcessingOutcome, PipelineError>,
}

impl BatchItem {
    /// True when the image passed metadata validation and was processed.
    pub fn success(&self) -> bool {
        self.outcome.is_ok()
    }
}
