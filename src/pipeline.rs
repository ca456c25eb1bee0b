use anyhow::Result;
use image::{DynamicImage, GrayImage};
use std::path::PathBuf;

/// One image-conditioning transform.
///
/// Stages are pure and deterministic; a stage must produce an image with the
/// same dimensions as its input.
pub trait ConditioningStage: Send + Sync {
    /// Apply the transform.
    fn apply(&self, image: DynamicImage) -> DynamicImage;

    /// Human-readable name for this stage (used in debug output and logs).
    fn name(&self) -> &str;
}

/// Debug configuration for conditioning runs
#[derive(Clone, Debug)]
pub struct DebugConfig {
    /// Root directory for per-stage image dumps
    pub output_dir: PathBuf,
    /// Whether debug mode is enabled
    pub enabled: bool,
}

/// Ordered chain of conditioning stages.
///
/// The chain runs strictly in insertion order; with debug mode on, the input
/// and every stage output are saved as numbered PNGs for tuning.
pub struct Conditioner {
    stages: Vec<Box<dyn ConditioningStage>>,
    debug: Option<DebugConfig>,
}

impl Conditioner {
    /// Create a new empty conditioner
    pub fn new() -> Self {
        Self {
            stages: Vec::new(),
            debug: None,
        }
    }

    /// Add a conditioning stage to the end of the chain
    pub fn add_stage(mut self, stage: Box<dyn ConditioningStage>) -> Self {
        self.stages.push(stage);
        self
    }

    /// Enable debug mode with output directory
    /// The directory must be empty or non-existent
    pub fn with_debug(mut self, output_dir: PathBuf) -> Result<Self> {
        if output_dir.exists() {
            let entries = std::fs::read_dir(&output_dir)?;
            if entries.count() > 0 {
                return Err(anyhow::anyhow!(
                    "Debug directory is not empty: {}",
                    output_dir.display()
                ));
            }
        } else {
            std::fs::create_dir_all(&output_dir)?;
        }

        self.debug = Some(DebugConfig {
            output_dir,
            enabled: true,
        });

        Ok(self)
    }

    /// Run every stage in order and return the final single-channel image.
    pub fn run(&self, input: &DynamicImage) -> Result<GrayImage> {
        self.save_debug_output(input, 0, "input")?;

        let mut image = input.clone();
        for (idx, stage) in self.stages.iter().enumerate() {
            tracing::debug!(
                stage = stage.name(),
                width = image.width(),
                height = image.height(),
                "running conditioning stage"
            );
            image = stage.apply(image);
            self.save_debug_output(&image, idx + 1, stage.name())?;
        }

        Ok(image.to_luma8())
    }

    fn save_debug_output(&self, image: &DynamicImage, index: usize, name: &str) -> Result<()> {
        if let Some(debug_config) = &self.debug {
            if !debug_config.enabled {
                return Ok(());
            }

            let filename = format!("{:02}_{}.png", index, name.to_lowercase().replace(" ", "_"));
            let output_path = debug_config.output_dir.join(&filename);
            image
                .save(&output_path)
                .map_err(|e| anyhow::anyhow!("Failed to save debug image: {}", e))?;

            tracing::debug!(path = %output_path.display(), "saved debug image");
        }

        Ok(())
    }
}

impl Default for Conditioner {
    fn default() -> Self {
        Self::new()
    }
}
