use crate::config::RecognizerConfig;
use crate::pipeline::{Conditioner, ConditioningStage};
use crate::recognition::preprocessing;
use image::DynamicImage;

/// Collapse color channels to one intensity channel
pub struct GrayscaleStage;

impl ConditioningStage for GrayscaleStage {
    fn apply(&self, image: DynamicImage) -> DynamicImage {
        // Already single-channel input passes through unchanged.
        if let DynamicImage::ImageLuma8(gray) = image {
            return DynamicImage::ImageLuma8(gray);
        }
        DynamicImage::ImageLuma8(preprocessing::to_grayscale(&image))
    }

    fn name(&self) -> &str {
        "Grayscale Conversion"
    }
}

/// Normalize lighting variation with tile-based adaptive equalization
pub struct ContrastStage {
    pub clip_limit: f32,
    pub tiles: u32,
}

impl ConditioningStage for ContrastStage {
    fn apply(&self, image: DynamicImage) -> DynamicImage {
        let gray = image.to_luma8();
        let enhanced = preprocessing::enhance_contrast(&gray, self.clip_limit, self.tiles);
        DynamicImage::ImageLuma8(enhanced)
    }

    fn name(&self) -> &str {
        "Adaptive Contrast"
    }
}

/// Edge-preserving noise suppression
pub struct DenoiseStage {
    pub radius: u32,
}

impl ConditioningStage for DenoiseStage {
    fn apply(&self, image: DynamicImage) -> DynamicImage {
        let gray = image.to_luma8();
        let denoised = preprocessing::denoise(&gray, self.radius);
        DynamicImage::ImageLuma8(denoised)
    }

    fn name(&self) -> &str {
        "Denoise"
    }
}

/// Otsu binarization. Irreversible, so always the final stage.
pub struct BinarizeStage;

impl ConditioningStage for BinarizeStage {
    fn apply(&self, image: DynamicImage) -> DynamicImage {
        let gray = image.to_luma8();
        DynamicImage::ImageLuma8(preprocessing::binarize(&gray))
    }

    fn name(&self) -> &str {
        "Binarize"
    }
}

/// Build the standard conditioning chain: grayscale, adaptive contrast,
/// denoise, binarize. Lighting is fixed before denoising so faint plate
/// edges survive the smoothing pass.
pub fn standard_conditioning(config: &RecognizerConfig) -> Conditioner {
    Conditioner::new()
        .add_stage(Box::new(GrayscaleStage))
        .add_stage(Box::new(ContrastStage {
            clip_limit: config.clahe_clip_limit,
            tiles: config.clahe_tiles,
        }))
        .add_stage(Box::new(DenoiseStage {
            radius: config.denoise_radius,
        }))
        .add_stage(Box::new(BinarizeStage))
}
