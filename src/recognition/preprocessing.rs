use image::{DynamicImage, GrayImage};
use imageproc::contrast::{ThresholdType, otsu_level, threshold};
use imageproc::filter::median_filter;

/// Convert image to grayscale
pub fn to_grayscale(img: &DynamicImage) -> GrayImage {
    img.to_luma8()
}

/// Contrast-limited adaptive histogram equalization.
///
/// The image is divided into a `tiles` x `tiles` grid; each tile gets its own
/// clipped equalization mapping and every pixel is bilinearly interpolated
/// between the four nearest tile mappings to avoid visible tile seams.
pub fn enhance_contrast(img: &GrayImage, clip_limit: f32, tiles: u32) -> GrayImage {
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return img.clone();
    }

    let tiles = tiles.max(1);
    let tile_w = width.div_ceil(tiles).max(1);
    let tile_h = height.div_ceil(tiles).max(1);
    let tiles_x = width.div_ceil(tile_w);
    let tiles_y = height.div_ceil(tile_h);

    // One 256-entry remap table per tile.
    let mut luts = vec![[0u8; 256]; (tiles_x * tiles_y) as usize];
    for ty in 0..tiles_y {
        for tx in 0..tiles_x {
            let x0 = tx * tile_w;
            let y0 = ty * tile_h;
            let x1 = (x0 + tile_w).min(width);
            let y1 = (y0 + tile_h).min(height);

            let mut hist = [0u32; 256];
            for y in y0..y1 {
                for x in x0..x1 {
                    hist[img.get_pixel(x, y)[0] as usize] += 1;
                }
            }
            let area = (x1 - x0) * (y1 - y0);

            // Clip the histogram and spread the excess across all bins.
            let limit = ((clip_limit * area as f32) / 256.0).max(1.0) as u32;
            let mut excess = 0u32;
            for count in hist.iter_mut() {
                if *count > limit {
                    excess += *count - limit;
                    *count = limit;
                }
            }
            let bonus = excess / 256;
            let remainder = excess % 256;
            for (i, count) in hist.iter_mut().enumerate() {
                *count += bonus + u32::from((i as u32) < remainder);
            }

            let lut = &mut luts[(ty * tiles_x + tx) as usize];
            let mut cdf = 0u32;
            for (value, count) in hist.iter().enumerate() {
                cdf += count;
                lut[value] = ((cdf as f32 * 255.0) / area as f32).round().clamp(0.0, 255.0) as u8;
            }
        }
    }

    let mut out = GrayImage::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let value = img.get_pixel(x, y)[0] as usize;

            // Position relative to tile centers, for bilinear blending.
            let fx = (x as f32 - tile_w as f32 / 2.0) / tile_w as f32;
            let fy = (y as f32 - tile_h as f32 / 2.0) / tile_h as f32;
            let tx0 = fx.floor();
            let ty0 = fy.floor();
            let ax = fx - tx0;
            let ay = fy - ty0;

            let cx0 = (tx0 as i32).clamp(0, tiles_x as i32 - 1) as u32;
            let cx1 = (tx0 as i32 + 1).clamp(0, tiles_x as i32 - 1) as u32;
            let cy0 = (ty0 as i32).clamp(0, tiles_y as i32 - 1) as u32;
            let cy1 = (ty0 as i32 + 1).clamp(0, tiles_y as i32 - 1) as u32;

            let v00 = luts[(cy0 * tiles_x + cx0) as usize][value] as f32;
            let v10 = luts[(cy0 * tiles_x + cx1) as usize][value] as f32;
            let v01 = luts[(cy1 * tiles_x + cx0) as usize][value] as f32;
            let v11 = luts[(cy1 * tiles_x + cx1) as usize][value] as f32;

            let top = v00 + (v10 - v00) * ax;
            let bottom = v01 + (v11 - v01) * ax;
            let blended = top + (bottom - top) * ay;

            out.put_pixel(x, y, image::Luma([blended.round().clamp(0.0, 255.0) as u8]));
        }
    }

    out
}

/// Suppress sensor and compression noise without blurring character edges
pub fn denoise(img: &GrayImage, radius: u32) -> GrayImage {
    if radius == 0 {
        return img.clone();
    }
    median_filter(img, radius, radius)
}

/// Two-level black/white image via Otsu's automatic threshold
pub fn binarize(img: &GrayImage) -> GrayImage {
    let level = otsu_level(img);
    threshold(img, level, ThresholdType::Binary)
}
