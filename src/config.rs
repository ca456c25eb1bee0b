use serde::{Deserialize, Serialize};

/// Tunables for a [`crate::PlateRecognizer`].
///
/// Every field has a default so a partial config deserializes cleanly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognizerConfig {
    /// Floor confidence the recognizer always enforces, regardless of the
    /// per-call minimum.
    #[serde(default = "default_baseline_confidence")]
    pub baseline_confidence: f32,

    /// Per-call minimum confidence used when the caller does not supply one.
    #[serde(default = "default_min_confidence")]
    pub default_min_confidence: f32,

    /// Inputs larger than this are rejected before decoding.
    #[serde(default = "default_max_image_bytes")]
    pub max_image_bytes: usize,

    /// Contrast-limited adaptive histogram equalization clip limit.
    #[serde(default = "default_clahe_clip_limit")]
    pub clahe_clip_limit: f32,

    /// CLAHE tile grid size (tiles per image side).
    #[serde(default = "default_clahe_tiles")]
    pub clahe_tiles: u32,

    /// Median filter radius for the denoising pass.
    #[serde(default = "default_denoise_radius")]
    pub denoise_radius: u32,
}

fn default_baseline_confidence() -> f32 {
    0.5
}

fn default_min_confidence() -> f32 {
    0.7
}

fn default_max_image_bytes() -> usize {
    10 * 1024 * 1024
}

fn default_clahe_clip_limit() -> f32 {
    2.0
}

fn default_clahe_tiles() -> u32 {
    8
}

fn default_denoise_radius() -> u32 {
    2
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        Self {
            baseline_confidence: default_baseline_confidence(),
            default_min_confidence: default_min_confidence(),
            max_image_bytes: default_max_image_bytes(),
            clahe_clip_limit: default_clahe_clip_limit(),
            clahe_tiles: default_clahe_tiles(),
            denoise_radius: default_denoise_radius(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = RecognizerConfig::default();
        assert_eq!(config.baseline_confidence, 0.5);
        assert_eq!(config.default_min_confidence, 0.7);
        assert_eq!(config.max_image_bytes, 10 * 1024 * 1024);
        assert_eq!(config.clahe_clip_limit, 2.0);
        assert_eq!(config.clahe_tiles, 8);
        assert_eq!(config.denoise_radius, 2);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: RecognizerConfig =
            serde_json::from_str(r#"{"default_min_confidence": 0.8}"#).unwrap();
        assert_eq!(config.default_min_confidence, 0.8);
        assert_eq!(config.baseline_confidence, 0.5);
        assert_eq!(config.clahe_tiles, 8);
    }
}
