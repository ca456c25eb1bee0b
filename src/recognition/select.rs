use crate::models::{BoundingBox, Detection, RecognitionError};
use crate::recognition::{grammar, normalize};

/// A validated plate candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub plate: String,
    pub confidence: f32,
    pub bbox: BoundingBox,
}

/// Pick the best-confidence validated candidate from the engine's detections.
///
/// Detections are visited in engine order; the comparison is strict, so on a
/// confidence tie the first-seen candidate wins. Confidence values outside
/// [0.0, 1.0] break the engine contract and are clamped into range before
/// comparison. A malformed quad aborts selection with an error.
pub fn select(detections: &[Detection]) -> Result<Option<Candidate>, RecognitionError> {
    let mut best: Option<Candidate> = None;

    for detection in detections {
        let plate = normalize::normalize(&detection.text);
        if plate.is_empty() || !grammar::is_plate(&plate) {
            continue;
        }

        let confidence = clamped_confidence(detection);
        let best_confidence = best.as_ref().map(|c| c.confidence).unwrap_or(0.0);
        if confidence > best_confidence {
            let bbox = detection.quad.bounding_box()?;
            best = Some(Candidate {
                plate,
                confidence,
                bbox,
            });
        }
    }

    Ok(best)
}

fn clamped_confidence(detection: &Detection) -> f32 {
    let confidence = detection.confidence;
    if !(0.0..=1.0).contains(&confidence) {
        tracing::warn!(
            confidence,
            text = %detection.text,
            "engine confidence outside [0, 1], clamping"
        );
        return confidence.clamp(0.0, 1.0);
    }
    confidence
}
