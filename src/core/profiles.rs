//! Size-profile table and use-case defaults.
//!
//! Size profiles map a preset name to target dimensions. A profile with both
//! dimensions is rendered by covering the box and cropping to it exactly; a
//! width-only profile preserves aspect ratio and never enlarges the source.

use crate::core::types::ProcessOptions;

/// Target geometry of a named size preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeProfile {
    /// Target width in pixels
    pub width: u32,
    /// Target height in pixels; `None` preserves aspect ratio without upscaling
    pub height: Option<u32>,
}

/// Looks up a size profile by preset name (case-insensitive).
///
/// Returns `None` for unknown names; the planner drops those sizes silently.
pub fn size_profile(name: &str) -> Option<SizeProfile> {
    match name.to_lowercase().as_str() {
        "thumbnail" => Some(SizeProfile { width: 300, height: Some(200) }),
        "medium" => Some(SizeProfile { width: 800, height: Some(600) }),
        "large" => Some(SizeProfile { width: 1200, height: Some(900) }),
        "original" => Some(SizeProfile { width: 1920, height: None }),
        _ => None,
    }
}

/// Resolves a use-case tag to its default options bundle.
///
/// Pure lookup, never fails: an unrecognized tag falls back to a single-size,
/// single-format bundle at moderate quality.
pub fn resolve_profile(use_case: &str) -> ProcessOptions {
    match use_case {
        "property" => ProcessOptions {
            formats: vec!["webp".to_string()],
            sizes: vec![
                "thumbnail".to_string(),
                "medium".to_string(),
                "large".to_string(),
                "original".to_string(),
            ],
            quality: 80,
        },
        "profile" => ProcessOptions {
            formats: vec!["webp".to_string()],
            sizes: vec!["thumbnail".to_string(), "medium".to_string()],
            quality: 85,
        },
        "document" => ProcessOptions {
            formats: vec!["jpeg".to_string()],
            sizes: vec!["medium".to_string(), "original".to_string()],
            quality: 90,
        },
        _ => ProcessOptions {
            formats: vec!["webp".to_string()],
            sizes: vec!["original".to_string()],
            quality: 80,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_profiles_resolve() {
        assert_eq!(
            size_profile("thumbnail"),
            Some(SizeProfile { width: 300, height: Some(200) })
        );
        assert_eq!(
            size_profile("medium"),
            Some(SizeProfile { width: 800, height: Some(600) })
        );
        assert_eq!(
            size_profile("large"),
            Some(SizeProfile { width: 1200, height: Some(900) })
        );
        assert_eq!(
            size_profile("original"),
            Some(SizeProfile { width: 1920, height: None })
        );
    }

    #[test]
    fn unknown_size_is_none() {
        assert_eq!(size_profile("poster"), None);
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(size_profile("Thumbnail"), size_profile("thumbnail"));
    }

    #[test]
    fn property_bundle() {
        let options = resolve_profile("property");
        assert_eq!(options.formats, vec!["webp"]);
        assert_eq!(options.sizes, vec!["thumbnail", "medium", "large", "original"]);
        assert_eq!(options.quality, 80);
    }

    #[test]
    fn profile_bundle() {
        let options = resolve_profile("profile");
        assert_eq!(options.formats, vec!["webp"]);
        assert_eq!(options.sizes, vec!["thumbnail", "medium"]);
        assert_eq!(options.quality, 85);
    }

    #[test]
    fn document_bundle() {
        let options = resolve_profile("document");
        assert_eq!(options.formats, vec!["jpeg"]);
        assert_eq!(options.sizes, vec!["medium", "original"]);
        assert_eq!(options.quality, 90);
    }

    #[test]
    fn unknown_use_case_falls_back() {
        let options = resolve_profile("banner");
        assert_eq!(options.formats, vec!["webp"]);
        assert_eq!(options.sizes, vec!["original"]);
        assert_eq!(options.quality, 80);
    }
}
