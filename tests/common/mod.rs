mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from platescan for tests
pub use platescan::{
    BoundingBox, Detection, NoPlateReason, PlateRecognizer, Quad, RecognitionError,
    RecognitionOutcome, RecognitionReport, RecognizerConfig, TextDetectionEngine,
};
