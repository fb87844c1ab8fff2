//! Executes one transform job on a blocking thread.
//!
//! Each job decodes its own view of the shared source buffer, so a failing
//! or slow job cannot corrupt or block a sibling. The async deadline and
//! pool permit around this call live in the pipeline.

use tracing::debug;

use crate::core::TransformJob;
use crate::processing::encode::{EncodeSettings, encode_image};
use crate::processing::resize::apply_resize;
use crate::utils::{OutputFormat, TransformError};

/// Renders one variant synchronously: decode → resize → encode.
pub fn execute_job(buffer: &[u8], job: &TransformJob) -> Result<Vec<u8>, TransformError> {
    // Parse the format tag first; an unsupported tag must not cost a decode
    let format: OutputFormat = job.format.parse()?;

    let image = image::load_from_memory(buffer)
        .map_err(|e| TransformError::processing(format!("Failed to decode source: {e}")))?;

    let resized = apply_resize(&image, &job.plan);
    let settings = EncodeSettings::resolve(format, job.quality);
    let encoded = encode_image(&resized, &settings)?;

    if encoded.is_empty() {
        return Err(TransformError::EmptyOutput);
    }

    let (width, height) = job.plan.dimensions();
    debug!(
        "Rendered '{}': {}x{} {} ({} bytes)",
        job.key,
        width,
        height,
        job.format,
        encoded.len()
    );
    Ok(encoded)
}
