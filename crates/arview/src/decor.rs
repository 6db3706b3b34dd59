//! Decorated-background synthesis from the idol's palette.
//!
//! The wall photo is blended with a solid fill of the idol's leading
//! dominant color, then a pattern layer drawn in the trailing dominant
//! color is blended on top. All weights are fixed.

use image::{Rgb, RgbImage};

use crate::color;
use crate::error::Result;
use crate::pattern::{self, PatternKind};

/// Colors extracted from the idol; first = background, last = pattern.
pub const PALETTE_SIZE: usize = 3;

const WALL_WEIGHT: f32 = 0.7;
const SOLID_WEIGHT: f32 = 0.3;
const BLEND_WEIGHT: f32 = 0.8;
const PATTERN_WEIGHT: f32 = 0.2;

/// Produce a decorated background with the wall photo's dimensions.
pub fn decorate(wall: &RgbImage, idol: &RgbImage, kind: PatternKind) -> Result<RgbImage> {
    let palette = color::dominant_colors(idol, PALETTE_SIZE)?;
    let bg_color = palette[0];
    let pattern_color = palette[palette.len() - 1];

    let (width, height) = wall.dimensions();
    let pattern = pattern::synthesize(width, height, pattern_color, kind);

    let mut out = RgbImage::new(width, height);
    for (x, y, px) in out.enumerate_pixels_mut() {
        let wall_px = wall.get_pixel(x, y);
        let pattern_px = pattern.get_pixel(x, y);

        let mut channels = [0u8; 3];
        for c in 0..3 {
            let blended = WALL_WEIGHT * wall_px[c] as f32 + SOLID_WEIGHT * bg_color[c] as f32;
            let v = BLEND_WEIGHT * blended + PATTERN_WEIGHT * pattern_px[c] as f32;
            channels[c] = v.round().clamp(0.0, 255.0) as u8;
        }
        *px = Rgb(channels);
    }

    Ok(out)
}
