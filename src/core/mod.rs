//! Core pipeline types and profile tables.
//!
//! This module contains the fundamental types used throughout the crate:
//! - [`ProcessOptions`]: which variants to produce and at what quality
//! - [`ImageMetadata`]: validated facts about a source image
//! - [`ProcessingOutcome`] / [`BatchItem`]: per-image and per-batch results
//! - [`resolve_profile`] / [`size_profile`]: use-case and size preset tables

mod profiles;
mod types;

pub use profiles::{SizeProfile, resolve_profile, size_profile};
pub use types::{
    BatchItem, ImageMetadata, ProcessOptions, ProcessingOutcome, ResizePlan, TransformFailure,
    TransformJob,
};
