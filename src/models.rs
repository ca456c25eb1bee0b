use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

/// Four corner points of a detected text region, top-left first, clockwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quad {
    pub corners: [(i32, i32); 4],
}

impl Quad {
    pub fn new(corners: [(i32, i32); 4]) -> Self {
        Self { corners }
    }

    /// Build a quad from an axis-aligned extent.
    pub fn axis_aligned(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Self {
        Self {
            corners: [
                (min_x, min_y),
                (max_x, min_y),
                (max_x, max_y),
                (min_x, max_y),
            ],
        }
    }

    /// Axis-aligned bounding box from the first and third corner.
    ///
    /// The two corners are the diagonal of the region, so a non-positive
    /// width or height means the engine broke its corner-ordering contract.
    pub fn bounding_box(&self) -> Result<BoundingBox, RecognitionError> {
        let p0 = self.corners[0];
        let p2 = self.corners[2];
        let width = p2.0 - p0.0;
        let height = p2.1 - p0.1;
        if width <= 0 || height <= 0 {
            return Err(RecognitionError::MalformedQuad { p0, p2 });
        }
        Ok(BoundingBox {
            x: p0.0,
            y: p0.1,
            width: width as u32,
            height: height as u32,
        })
    }
}

/// One raw output of the text-detection engine.
#[derive(Debug, Clone)]
pub struct Detection {
    pub quad: Quad,
    pub text: String,
    pub confidence: f32,
}

impl Detection {
    pub fn new(quad: Quad, text: impl Into<String>, confidence: f32) -> Self {
        Self {
            quad,
            text: text.into(),
            confidence,
        }
    }
}

/// Axis-aligned rectangle in pixel coordinates of the input image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BoundingBox {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// Result of one recognition call.
#[derive(Debug, Clone, PartialEq)]
pub enum RecognitionOutcome {
    Found {
        plate: String,
        confidence: f32,
        bbox: BoundingBox,
    },
    NotFound {
        reason: NoPlateReason,
    },
}

/// Why a call produced no plate. These are ordinary outcomes, not failures.
#[derive(Debug, Clone, PartialEq)]
pub enum NoPlateReason {
    /// Input could not be decoded, exceeded the size limit, or had a zero dimension.
    InvalidImage { message: String },
    /// The engine returned zero detections.
    NoTextDetected,
    /// Detections exist but none matched a known plate grammar.
    NoValidPlate,
    /// A valid candidate exists but its confidence is below the effective minimum.
    BelowThreshold { best_confidence: f32 },
}

impl std::fmt::Display for NoPlateReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NoPlateReason::InvalidImage { message } => write!(f, "invalid image: {}", message),
            NoPlateReason::NoTextDetected => write!(f, "no text detected in image"),
            NoPlateReason::NoValidPlate => {
                write!(f, "no detected text matched a known plate format")
            }
            NoPlateReason::BelowThreshold { best_confidence } => write!(
                f,
                "best candidate confidence {:.4} below required minimum",
                best_confidence
            ),
        }
    }
}

/// Infrastructure failures, kept apart from "no plate found" outcomes so
/// callers can alert on them separately.
#[derive(Debug, Error)]
pub enum RecognitionError {
    #[error("text detection engine failed: {0}")]
    Engine(#[source] anyhow::Error),
    #[error("image conditioning failed: {0}")]
    Conditioning(#[source] anyhow::Error),
    #[error("malformed detection quad: corners {p0:?} and {p2:?} give a non-positive box")]
    MalformedQuad { p0: (i32, i32), p2: (i32, i32) },
    #[error("recognition task failed to complete: {0}")]
    Task(#[source] tokio::task::JoinError),
}

/// Transport-independent record of one recognition call.
#[derive(Debug, Clone, Serialize)]
pub struct RecognitionReport {
    pub success: bool,
    pub license_plate: Option<String>,
    pub confidence: Option<f32>,
    pub bounding_box: Option<BoundingBox>,
    pub processing_time_ms: f64,
    pub error: Option<String>,
}

impl RecognitionReport {
    pub fn from_outcome(outcome: &RecognitionOutcome, elapsed: Duration) -> Self {
        let processing_time_ms = round_to(elapsed.as_secs_f64() * 1000.0, 2);
        match outcome {
            RecognitionOutcome::Found {
                plate,
                confidence,
                bbox,
            } => Self {
                success: true,
                license_plate: Some(plate.clone()),
                confidence: Some(round_to(*confidence as f64, 4) as f32),
                bounding_box: Some(*bbox),
                processing_time_ms,
                error: None,
            },
            RecognitionOutcome::NotFound { reason } => Self {
                success: false,
                license_plate: None,
                confidence: None,
                bounding_box: None,
                processing_time_ms,
                error: Some(reason.to_string()),
            },
        }
    }
}

fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}
