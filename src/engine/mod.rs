pub mod ocrs;

pub use self::ocrs::OcrsEngine;

use crate::models::Detection;
use image::GrayImage;

/// Boundary to the black-box text-detection engine.
///
/// Implementations must be safe to call from multiple threads at once; an
/// engine without interior thread safety has to serialize its own calls
/// (e.g. behind a mutex) rather than push that burden onto callers.
pub trait TextDetectionEngine: Send + Sync {
    /// Run text detection over a conditioned single-channel image.
    ///
    /// Returns one [`Detection`] per found text region, in the engine's own
    /// order. Errors are infrastructure failures, never "no text found";
    /// an image without text yields an empty list.
    fn detect(&self, image: &GrayImage) -> anyhow::Result<Vec<Detection>>;
}
