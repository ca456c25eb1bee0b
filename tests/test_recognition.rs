mod common;

use common::*;
use std::sync::Arc;

fn recognizer_with(engine: impl TextDetectionEngine + 'static) -> PlateRecognizer {
    PlateRecognizer::new(Arc::new(engine))
}

#[test]
fn recognizes_plate_end_to_end() -> anyhow::Result<()> {
    let engine = StubEngine::new(vec![detection(
        [(10, 10), (10, 50), (60, 50), (60, 10)],
        "А123ВС777",
        0.92,
    )]);
    let outcome = recognizer_with(engine).recognize(&plate_image_png(), Some(0.7))?;

    assert_eq!(
        outcome,
        RecognitionOutcome::Found {
            plate: "А123ВС777".to_string(),
            confidence: 0.92,
            bbox: BoundingBox {
                x: 10,
                y: 10,
                width: 50,
                height: 40
            },
        }
    );
    Ok(())
}

#[test]
fn zero_detections_reports_no_text() -> anyhow::Result<()> {
    let outcome = recognizer_with(StubEngine::empty()).recognize(&plate_image_png(), None)?;
    assert_eq!(
        outcome,
        RecognitionOutcome::NotFound {
            reason: NoPlateReason::NoTextDetected
        }
    );
    Ok(())
}

#[test]
fn unmatched_text_reports_no_valid_plate() -> anyhow::Result<()> {
    let engine = StubEngine::new(vec![
        simple_detection("ok", 0.95),
        simple_detection("A1", 0.99),
    ]);
    let outcome = recognizer_with(engine).recognize(&plate_image_png(), None)?;
    assert_eq!(
        outcome,
        RecognitionOutcome::NotFound {
            reason: NoPlateReason::NoValidPlate
        }
    );
    Ok(())
}

#[test]
fn below_threshold_reports_best_confidence() -> anyhow::Result<()> {
    let engine = StubEngine::new(vec![simple_detection("А123ВС77", 0.65)]);
    let outcome = recognizer_with(engine).recognize(&plate_image_png(), Some(0.7))?;
    assert_eq!(
        outcome,
        RecognitionOutcome::NotFound {
            reason: NoPlateReason::BelowThreshold {
                best_confidence: 0.65
            }
        }
    );
    Ok(())
}

#[test]
fn baseline_confidence_floors_low_requests() -> anyhow::Result<()> {
    // The recognizer's own 0.5 floor applies even if the caller asks for less.
    let engine = StubEngine::new(vec![simple_detection("А123ВС77", 0.45)]);
    let outcome = recognizer_with(engine).recognize(&plate_image_png(), Some(0.3))?;
    assert!(matches!(
        outcome,
        RecognitionOutcome::NotFound {
            reason: NoPlateReason::BelowThreshold { .. }
        }
    ));
    Ok(())
}

#[test]
fn selection_prefers_highest_confidence_detection() -> anyhow::Result<()> {
    let engine = StubEngine::new(vec![
        simple_detection("AB1", 0.6),
        simple_detection("А123ВС77", 0.8),
        simple_detection("А999ХХ99", 0.9),
    ]);
    let outcome = recognizer_with(engine).recognize(&plate_image_png(), Some(0.7))?;
    match outcome {
        RecognitionOutcome::Found {
            plate, confidence, ..
        } => {
            assert_eq!(plate, "А999ХХ99");
            assert_eq!(confidence, 0.9);
        }
        other => panic!("expected Found, got {:?}", other),
    }
    Ok(())
}

#[test]
fn equal_confidence_keeps_first_seen_detection() -> anyhow::Result<()> {
    let engine = StubEngine::new(vec![
        simple_detection("А123ВС77", 0.8),
        simple_detection("А999ХХ99", 0.8),
    ]);
    let outcome = recognizer_with(engine).recognize(&plate_image_png(), Some(0.7))?;
    match outcome {
        RecognitionOutcome::Found { plate, .. } => assert_eq!(plate, "А123ВС77"),
        other => panic!("expected Found, got {:?}", other),
    }
    Ok(())
}

#[test]
fn undecodable_bytes_report_invalid_image() -> anyhow::Result<()> {
    let outcome =
        recognizer_with(StubEngine::empty()).recognize(b"definitely not an image", None)?;
    match outcome {
        RecognitionOutcome::NotFound {
            reason: NoPlateReason::InvalidImage { message },
        } => assert!(message.contains("decode")),
        other => panic!("expected InvalidImage, got {:?}", other),
    }
    Ok(())
}

#[test]
fn oversized_input_is_rejected_before_decode() -> anyhow::Result<()> {
    let config = RecognizerConfig {
        max_image_bytes: 16,
        ..RecognizerConfig::default()
    };
    let recognizer = PlateRecognizer::with_config(Arc::new(StubEngine::empty()), config);

    let outcome = recognizer.recognize(&vec![0u8; 17], None)?;
    match outcome {
        RecognitionOutcome::NotFound {
            reason: NoPlateReason::InvalidImage { message },
        } => assert!(message.contains("exceeds")),
        other => panic!("expected InvalidImage, got {:?}", other),
    }
    Ok(())
}

#[test]
fn engine_failure_uses_the_error_channel() {
    let result = recognizer_with(FailingEngine).recognize(&plate_image_png(), None);
    assert!(matches!(result, Err(RecognitionError::Engine(_))));
}

#[test]
fn malformed_quad_uses_the_error_channel() {
    // Corners in reverse order make the diagonal negative.
    let engine = StubEngine::new(vec![detection(
        [(60, 50), (60, 10), (10, 10), (10, 50)],
        "А123ВС77",
        0.9,
    )]);
    let result = recognizer_with(engine).recognize(&plate_image_png(), None);
    assert!(matches!(result, Err(RecognitionError::MalformedQuad { .. })));
}

#[tokio::test]
async fn recognize_async_matches_sync_outcome() -> anyhow::Result<()> {
    let engine = StubEngine::new(vec![simple_detection("А123ВС777", 0.92)]);
    let recognizer = Arc::new(recognizer_with(engine));

    let sync_outcome = recognizer.recognize(&plate_image_png(), Some(0.7))?;
    let async_outcome = recognizer
        .recognize_async(plate_image_png(), Some(0.7))
        .await?;

    assert_eq!(sync_outcome, async_outcome);
    Ok(())
}

#[tokio::test]
async fn concurrent_calls_share_one_engine() -> anyhow::Result<()> {
    let engine = StubEngine::new(vec![simple_detection("А123ВС777", 0.92)]);
    let recognizer = Arc::new(recognizer_with(engine));

    let mut handles = Vec::new();
    for _ in 0..4 {
        let recognizer = Arc::clone(&recognizer);
        handles.push(tokio::spawn(async move {
            recognizer.recognize_async(plate_image_png(), None).await
        }));
    }
    for handle in handles {
        let outcome = handle.await??;
        assert!(matches!(outcome, RecognitionOutcome::Found { .. }));
    }
    Ok(())
}

#[test]
fn debug_dump_writes_stage_images() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let dump = dir.path().join("stages");
    let recognizer = recognizer_with(StubEngine::empty()).with_debug_dump(dump.clone())?;
    recognizer.recognize(&plate_image_png(), None)?;

    assert!(dump.join("00_input.png").exists());
    assert!(dump.join("01_grayscale_conversion.png").exists());
    assert!(dump.join("02_adaptive_contrast.png").exists());
    assert!(dump.join("03_denoise.png").exists());
    assert!(dump.join("04_binarize.png").exists());
    Ok(())
}

#[test]
fn report_shape_for_found_and_not_found() -> anyhow::Result<()> {
    let engine = StubEngine::new(vec![simple_detection("А123ВС777", 0.923456)]);
    let recognizer = recognizer_with(engine);

    let started = std::time::Instant::now();
    let outcome = recognizer.recognize(&plate_image_png(), Some(0.7))?;
    let report = RecognitionReport::from_outcome(&outcome, started.elapsed());
    let json = serde_json::to_value(&report)?;

    assert_eq!(json["success"], true);
    assert_eq!(json["license_plate"], "А123ВС777");
    assert_eq!(json["bounding_box"]["width"], 100);
    assert_eq!(json["error"], serde_json::Value::Null);

    let miss = RecognitionReport::from_outcome(
        &RecognitionOutcome::NotFound {
            reason: NoPlateReason::NoTextDetected,
        },
        std::time::Duration::from_millis(1),
    );
    let json = serde_json::to_value(&miss)?;
    assert_eq!(json["success"], false);
    assert_eq!(json["license_plate"], serde_json::Value::Null);
    assert!(
        json["error"]
            .as_str()
            .unwrap()
            .contains("no text detected")
    );
    Ok(())
}
