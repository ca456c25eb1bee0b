use image::{GrayImage, Rgb, RgbImage};
use platescan::models::{Detection, Quad};
use platescan::TextDetectionEngine;

/// Engine stub that returns a canned detection list for every image.
pub struct StubEngine {
    detections: Vec<Detection>,
}

impl StubEngine {
    pub fn new(detections: Vec<Detection>) -> Self {
        Self { detections }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }
}

impl TextDetectionEngine for StubEngine {
    fn detect(&self, _image: &GrayImage) -> anyhow::Result<Vec<Detection>> {
        Ok(self.detections.clone())
    }
}

/// Engine stub whose every call fails, for exercising the error channel.
pub struct FailingEngine;

impl TextDetectionEngine for FailingEngine {
    fn detect(&self, _image: &GrayImage) -> anyhow::Result<Vec<Detection>> {
        anyhow::bail!("model inference crashed")
    }
}

/// Build a detection from raw corner points.
pub fn detection(corners: [(i32, i32); 4], text: &str, confidence: f32) -> Detection {
    Detection::new(Quad::new(corners), text, confidence)
}

/// Build a detection with an unremarkable axis-aligned quad.
pub fn simple_detection(text: &str, confidence: f32) -> Detection {
    Detection::new(Quad::axis_aligned(10, 10, 110, 40), text, confidence)
}

/// Encode a synthetic plate-like image (light background, dark band) as PNG bytes.
pub fn plate_image_png() -> Vec<u8> {
    let img = RgbImage::from_fn(160, 60, |x, y| {
        if (20..140).contains(&x) && (15..45).contains(&y) {
            Rgb([20u8, 20u8, 20u8])
        } else {
            Rgb([245u8, 245u8, 245u8])
        }
    });

    let mut bytes = Vec::new();
    let mut cursor = std::io::Cursor::new(&mut bytes);
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut cursor, image::ImageFormat::Png)
        .expect("Failed to encode test image");
    bytes
}
