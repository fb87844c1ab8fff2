use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use crate::utils::TransformError;

/// The closed set of output formats the pipeline can encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Webp,
    Jpeg,
    Png,
}

impl OutputFormat {
    /// Get file extensions associated with this format
    pub fn extensions(&self) -> &[&str] {
        match self {
            Self::Webp => &["webp"],
            Self::Jpeg => &["jpeg", "jpg"],
            Self::Png => &["png"],
        }
    }

    /// Get the primary extension for this format
    pub fn primary_extension(&self) -> &str {
        self.extensions()[0]
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.primary_extension())
    }
}

impl FromStr for OutputFormat {
    type Err = TransformError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match normalize_format_tag(tag).as_str() {
            "webp" => Ok(Self::Webp),
            "jpeg" => Ok(Self::Jpeg),
            "png" => Ok(Self::Png),
            other => Err(TransformError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Normalises a requested format tag: lowercase, "jpg" → "jpeg".
///
/// Unknown tags pass through unchanged so they can surface verbatim in an
/// [`TransformError::UnsupportedFormat`] at execution time.
pub fn normalize_format_tag(tag: &str) -> String {
    match tag.to_lowercase().as_str() {
        "jpg" => "jpeg".to_string(),
        other => other.to_string(),
    }
}
