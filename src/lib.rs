pub mod config;
pub mod engine;
pub mod models;
pub mod pipeline;
pub mod recognition;

pub use config::RecognizerConfig;
pub use engine::{OcrsEngine, TextDetectionEngine};
pub use models::{
    BoundingBox, Detection, NoPlateReason, Quad, RecognitionError, RecognitionOutcome,
    RecognitionReport,
};
pub use pipeline::{Conditioner, ConditioningStage, DebugConfig};
pub use recognition::PlateRecognizer;
