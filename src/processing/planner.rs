//! Expands requested sizes × formats into concrete transform jobs.

use tracing::debug;

use crate::core::{ImageMetadata, ProcessOptions, ResizePlan, TransformJob, size_profile};
use crate::processing::resize::fit_to_width;
use crate::utils::normalize_format_tag;

/// Normalises a tag list: lowercased (formats also jpg → jpeg), de-duplicated
/// preserving first-seen order. Keeps variant keys unique by construction.
fn normalize_unique(tags: &[String], format_tags: bool) -> Vec<String> {
    let mut seen = Vec::new();
    for tag in tags {
        let tag = if format_tags {
            normalize_format_tag(tag)
        } else {
            tag.to_lowercase()
        };
        if !seen.contains(&tag) {
            seen.push(tag);
        }
    }
    seen
}

/// Builds the ordered job list for one image, size-major format-minor.
///
/// Unknown size names contribute no jobs. Unknown format tags still produce
/// jobs so they can fail softly at execution, and they count toward the
/// distinct-format tally that decides key naming.
pub fn plan_jobs(options: &ProcessOptions, metadata: &ImageMetadata) -> Vec<TransformJob> {
    let formats = normalize_unique(&options.formats, true);
    let sizes = normalize_unique(&options.sizes, false);
    let multi_format = formats.len() > 1;

    let mut jobs = Vec::with_capacity(sizes.len() * formats.len());
    for size in &sizes {
        let Some(profile) = size_profile(size) else {
            debug!("Skipping unknown size profile: {}", size);
            continue;
        };

        let plan = match profile.height {
            Some(height) => ResizePlan::Cover { width: profile.width, height },
            None => {
                let (width, height) =
                    fit_to_width(metadata.width, metadata.height, profile.width);
                ResizePlan::Exact { width, height }
            }
        };

        for format in &formats {
            let key = if multi_format {
                format!("{}_{}", size, format)
            } else {
                size.clone()
            };
            jobs.push(TransformJob {
                size: size.clone(),
                format: format.clone(),
                quality: options.quality,
                plan,
                key,
            });
        }
    }

    jobs
}
