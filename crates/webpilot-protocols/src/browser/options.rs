//! Options accepted by browser primitives.

use serde::{Deserialize, Serialize};

/// When a navigation counts as finished.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaitPolicy {
    /// The `load` event has fired.
    #[default]
    Load,
    /// The DOM is parsed; subresources may still be loading.
    DomContentLoaded,
    /// Return as soon as the navigation was committed.
    Commit,
}

/// Encoding of a captured screenshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    #[default]
    Png,
    Jpeg,
}

impl ImageFormat {
    /// MIME type of the encoded image.
    pub fn media_type(&self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(WaitPolicy::default(), WaitPolicy::Load);
        assert_eq!(ImageFormat::default(), ImageFormat::Png);
    }

    #[test]
    fn test_media_type() {
        assert_eq!(ImageFormat::Png.media_type(), "image/png");
        assert_eq!(ImageFormat::Jpeg.media_type(), "image/jpeg");
    }

    #[test]
    fn test_wait_policy_serialization() {
        let json = serde_json::to_string(&WaitPolicy::DomContentLoaded).unwrap();
        assert_eq!(json, "\"domcontentloaded\"");
    }
}
