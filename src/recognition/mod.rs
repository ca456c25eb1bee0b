pub mod grammar;
pub mod normalize;
pub mod preprocessing;
pub mod select;
pub mod stages;

use crate::config::RecognizerConfig;
use crate::engine::TextDetectionEngine;
use crate::models::{NoPlateReason, RecognitionError, RecognitionOutcome};
use crate::pipeline::Conditioner;
use std::path::PathBuf;
use std::sync::Arc;

/// Full recognition pipeline: decode, condition, detect, select, threshold.
///
/// Each call is independent and owns all of its buffers; the only shared
/// state is the engine handle, which is read-only after construction.
pub struct PlateRecognizer {
    engine: Arc<dyn TextDetectionEngine>,
    config: RecognizerConfig,
    conditioner: Conditioner,
}

impl PlateRecognizer {
    pub fn new(engine: Arc<dyn TextDetectionEngine>) -> Self {
        Self::with_config(engine, RecognizerConfig::default())
    }

    pub fn with_config(engine: Arc<dyn TextDetectionEngine>, config: RecognizerConfig) -> Self {
        let conditioner = stages::standard_conditioning(&config);
        Self {
            engine,
            config,
            conditioner,
        }
    }

    /// Dump every conditioning stage's output into `output_dir` (which must
    /// be empty or absent) on each call.
    pub fn with_debug_dump(mut self, output_dir: PathBuf) -> anyhow::Result<Self> {
        self.conditioner = stages::standard_conditioning(&self.config).with_debug(output_dir)?;
        Ok(self)
    }

    pub fn config(&self) -> &RecognizerConfig {
        &self.config
    }

    /// The larger of the recognizer's baseline minimum and the caller's
    /// requested minimum (falling back to the configured default).
    pub fn effective_threshold(&self, requested: Option<f32>) -> f32 {
        let requested = requested.unwrap_or(self.config.default_min_confidence);
        self.config.baseline_confidence.max(requested)
    }

    /// Recognize a license plate in encoded image bytes.
    ///
    /// "No plate" outcomes come back as `Ok(NotFound)`; only infrastructure
    /// failures (engine errors, malformed detections) use the `Err` channel.
    pub fn recognize(
        &self,
        image_bytes: &[u8],
        min_confidence: Option<f32>,
    ) -> Result<RecognitionOutcome, RecognitionError> {
        if image_bytes.len() > self.config.max_image_bytes {
            tracing::warn!(
                size = image_bytes.len(),
                limit = self.config.max_image_bytes,
                "rejecting oversized image"
            );
            return Ok(not_found(NoPlateReason::InvalidImage {
                message: format!(
                    "image is {} bytes, exceeds the {} byte limit",
                    image_bytes.len(),
                    self.config.max_image_bytes
                ),
            }));
        }

        let image = match image::load_from_memory(image_bytes) {
            Ok(image) => image,
            Err(e) => {
                tracing::warn!(error = %e, "failed to decode image");
                return Ok(not_found(NoPlateReason::InvalidImage {
                    message: format!("failed to decode image: {}", e),
                }));
            }
        };
        if image.width() == 0 || image.height() == 0 {
            return Ok(not_found(NoPlateReason::InvalidImage {
                message: "image has a zero dimension".to_string(),
            }));
        }

        let conditioned = self
            .conditioner
            .run(&image)
            .map_err(RecognitionError::Conditioning)?;

        let detections = self
            .engine
            .detect(&conditioned)
            .map_err(RecognitionError::Engine)?;
        if detections.is_empty() {
            tracing::info!("no text detected in image");
            return Ok(not_found(NoPlateReason::NoTextDetected));
        }

        let Some(candidate) = select::select(&detections)? else {
            tracing::info!(
                detections = detections.len(),
                "no detection matched a plate grammar"
            );
            return Ok(not_found(NoPlateReason::NoValidPlate));
        };

        let threshold = self.effective_threshold(min_confidence);
        if candidate.confidence < threshold {
            tracing::info!(
                best_confidence = candidate.confidence,
                threshold,
                "valid plate below confidence threshold"
            );
            return Ok(not_found(NoPlateReason::BelowThreshold {
                best_confidence: candidate.confidence,
            }));
        }

        tracing::info!(
            plate = %candidate.plate,
            confidence = candidate.confidence,
            "recognized plate"
        );
        Ok(RecognitionOutcome::Found {
            plate: candidate.plate,
            confidence: candidate.confidence,
            bbox: candidate.bbox,
        })
    }

    /// Run [`recognize`](Self::recognize) on the blocking pool.
    ///
    /// Recognition is CPU-bound; this keeps the engine call off scheduler
    /// threads so concurrent requests stay responsive.
    pub async fn recognize_async(
        self: Arc<Self>,
        image_bytes: Vec<u8>,
        min_confidence: Option<f32>,
    ) -> Result<RecognitionOutcome, RecognitionError> {
        tokio::task::spawn_blocking(move || self.recognize(&image_bytes, min_confidence))
            .await
            .map_err(RecognitionError::Task)?
    }
}

fn not_found(reason: NoPlateReason) -> RecognitionOutcome {
    RecognitionOutcome::NotFound { reason }
}
