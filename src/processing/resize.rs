//! Resize application and width-fit geometry.
//!
//! The [`ResizePlan`] on each job is resolved at planning time; this module
//! applies it and owns the aspect-preserving width math.

use image::DynamicImage;
use image::imageops::FilterType;

use crate::core::ResizePlan;

/// Computes width-constrained dimensions preserving aspect ratio.
///
/// The scale factor is capped at 1.0 so the source is never enlarged; each
/// resulting dimension is at least 1px.
pub fn fit_to_width(src_w: u32, src_h: u32, target_w: u32) -> (u32, u32) {
    let scale = (target_w as f64 / src_w as f64).min(1.0);
    let new_w = ((src_w as f64 * scale).round() as u32).max(1);
    let new_h = ((src_h as f64 * scale).round() as u32).max(1);
    (new_w, new_h)
}

/// Applies `plan` to `image` with Lanczos3 resampling.
pub fn apply_resize(image: &DynamicImage, plan: &ResizePlan) -> DynamicImage {
    match *plan {
        ResizePlan::Cover { width, height } => {
            image.resize_to_fill(width, height, FilterType::Lanczos3)
        }
        ResizePlan::Exact { width, height } => {
            image.resize_exact(width, height, FilterType::Lanczos3)
        }
    }
}
