use super::TextDetectionEngine;
use crate::models::{Detection, Quad};
use anyhow::Result;
use image::{DynamicImage, GrayImage};
use ocrs::{ImageSource, OcrEngine, OcrEngineParams, TextItem, TextLine};
use rten::Model;
use std::path::Path;

/// Nominal per-line score: the ocrs text API does not expose recognition
/// confidence, so every line is reported at this fixed value.
const LINE_CONFIDENCE: f32 = 0.9;

/// Engine adapter backed by ocrs text detection and recognition models.
///
/// Model weights are immutable after load, so one instance can serve
/// concurrent calls without locking.
pub struct OcrsEngine {
    engine: OcrEngine,
}

impl OcrsEngine {
    /// Load models from the standard ocrs cache location.
    pub fn from_cache_dir() -> Result<Self> {
        let home_dir = std::env::var("HOME").or_else(|_| std::env::var("USERPROFILE"))?;

        let cache_dir = Path::new(&home_dir).join(".cache/ocrs");
        let detection_model_path = cache_dir.join("text-detection.rten");
        let recognition_model_path = cache_dir.join("text-recognition.rten");

        if !detection_model_path.exists() || !recognition_model_path.exists() {
            anyhow::bail!(
                "OCR models not found. Please run: ocrs-cli --help (or download models manually)\n\
                 Expected locations:\n  - {}\n  - {}",
                detection_model_path.display(),
                recognition_model_path.display()
            );
        }

        Self::from_model_files(&detection_model_path, &recognition_model_path)
    }

    /// Load models from explicit file paths.
    pub fn from_model_files(detection_model: &Path, recognition_model: &Path) -> Result<Self> {
        tracing::info!(
            detection = %detection_model.display(),
            recognition = %recognition_model.display(),
            "loading text detection models"
        );

        let detection_model = Model::load_file(detection_model)?;
        let recognition_model = Model::load_file(recognition_model)?;

        let engine = OcrEngine::new(OcrEngineParams {
            detection_model: Some(detection_model),
            recognition_model: Some(recognition_model),
            ..Default::default()
        })?;

        Ok(Self { engine })
    }
}

impl TextDetectionEngine for OcrsEngine {
    fn detect(&self, image: &GrayImage) -> Result<Vec<Detection>> {
        // ocrs expects multi-channel input
        let rgb = DynamicImage::ImageLuma8(image.clone()).to_rgb8();
        let source = ImageSource::from_bytes(rgb.as_raw(), rgb.dimensions())?;
        let input = self.engine.prepare_input(source)?;

        let word_rects = self.engine.detect_words(&input)?;
        let line_rects = self.engine.find_text_lines(&input, &word_rects);
        let lines = self.engine.recognize_text(&input, &line_rects)?;

        let mut detections = Vec::new();
        for line in lines.into_iter().flatten() {
            let text = line.to_string();
            if text.trim().is_empty() {
                continue;
            }
            detections.push(Detection::new(line_quad(&line), text, LINE_CONFIDENCE));
        }
        Ok(detections)
    }
}

/// Normalize whatever corner order the engine emits into a top-left-first
/// clockwise quad.
fn line_quad(line: &TextLine) -> Quad {
    let corners = line.rotated_rect().corners();
    let mut min_x = f32::INFINITY;
    let mut min_y = f32::INFINITY;
    let mut max_x = f32::NEG_INFINITY;
    let mut max_y = f32::NEG_INFINITY;
    for corner in &corners {
        min_x = min_x.min(corner.x);
        min_y = min_y.min(corner.y);
        max_x = max_x.max(corner.x);
        max_y = max_y.max(corner.y);
    }
    Quad::axis_aligned(
        min_x.floor() as i32,
        min_y.floor() as i32,
        max_x.ceil() as i32,
        max_y.ceil() as i32,
    )
}
