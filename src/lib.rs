//! Image-variant generation pipeline.
//!
//! Given raw uploaded image bytes, produces a bounded set of resized,
//! re-encoded renditions (named size presets × output formats) for storage
//! and serving. Transforms fan out concurrently under a bounded worker pool
//! with per-stage deadlines; a failing variant never takes its siblings down.

// Module declarations in dependency order
pub mod utils;
pub mod core;
pub mod processing;

// Public exports for external consumers
pub use crate::core::{
    BatchItem, ImageMetadata, ProcessOptions, ProcessingOutcome, ResizePlan, SizeProfile,
    TransformFailure, resolve_profile, size_profile,
};
pub use crate::processing::{EncodeSettings, ImagePipeline, MAX_DIMENSION};
pub use crate::utils::{
    MetadataError, OutputFormat, PipelineError, PipelineResult, TransformError,
};
