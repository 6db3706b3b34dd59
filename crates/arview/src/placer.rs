//! Idol placement: ROI computation, silhouette masking, shadow synthesis,
//! and the final composite.

use image::imageops::{self, FilterType};
use image::{GrayImage, Luma, Rgb, RgbImage};
use imageproc::distance_transform::Norm;
use imageproc::morphology::dilate;

use crate::error::{ArError, Result};
use crate::types::Placement;

#[derive(Debug, Clone)]
pub struct PlacerConfig {
    /// Luminance cutoff separating idol foreground from backdrop. Idol
    /// assets are authored as cutouts on a near-black background; feeding
    /// assets that break that convention needs this recalibrated.
    pub foreground_threshold: u8,
    /// Disc radius of the shadow dilation (radius 7 = 15x15 ellipse).
    pub shadow_radius: u8,
    pub shadow_color: Rgb<u8>,
    /// Weight of the shadow layer when blended over the background.
    pub shadow_weight: f32,
}

impl Default for PlacerConfig {
    fn default() -> Self {
        Self {
            foreground_threshold: 10,
            shadow_radius: 7,
            shadow_color: Rgb([40, 40, 40]),
            shadow_weight: 0.7,
        }
    }
}

/// Composites a resized idol cutout onto a background within the wall mask.
#[derive(Debug, Clone, Default)]
pub struct IdolPlacer {
    config: PlacerConfig,
}

/// Idol dimensions after scaling: height is `scale * bg_height`, width
/// preserves the source aspect ratio. Both are at least one pixel.
pub fn scaled_dimensions(idol_w: u32, idol_h: u32, bg_h: u32, scale: f32) -> (u32, u32) {
    let target_h = ((scale * bg_h as f32).round() as u32).max(1);
    let aspect = idol_w as f32 / idol_h as f32;
    let target_w = ((target_h as f32 * aspect).round() as u32).max(1);
    (target_w, target_h)
}

impl IdolPlacer {
    pub fn new(config: PlacerConfig) -> Self {
        Self { config }
    }

    /// Place the idol onto `background` at the anchor described by
    /// `placement`, clamped to the image bounds. Clamping that shrinks the
    /// region crops the idol bitmap top-left aligned; an idol entirely
    /// outside the image leaves the background untouched.
    pub fn place(
        &self,
        background: &RgbImage,
        idol: &RgbImage,
        wall_mask: &GrayImage,
        placement: &Placement,
    ) -> Result<RgbImage> {
        let (bg_w, bg_h) = background.dimensions();
        if idol.width() == 0 || idol.height() == 0 {
            return Err(ArError::InvalidImage("idol image has zero pixels".into()));
        }
        if wall_mask.dimensions() != background.dimensions() {
            return Err(ArError::ShapeMismatch {
                expected: background.dimensions(),
                got: wall_mask.dimensions(),
            });
        }

        let (idol_w, idol_h) = scaled_dimensions(idol.width(), idol.height(), bg_h, placement.scale);
        let resized = imageops::resize(idol, idol_w, idol_h, FilterType::Lanczos3);

        // The anchor is the idol's bottom-center in pixel space.
        let x_px = (placement.x * bg_w as f32).round() as i64;
        let y_px = (placement.y * bg_h as f32).round() as i64;

        let left = x_px - (idol_w / 2) as i64;
        let y0 = (y_px - idol_h as i64).clamp(0, bg_h as i64) as u32;
        let y1 = y_px.clamp(0, bg_h as i64) as u32;
        let x0 = left.clamp(0, bg_w as i64) as u32;
        let x1 = (left + idol_w as i64).clamp(0, bg_w as i64) as u32;

        let mut out = background.clone();
        let (roi_w, roi_h) = (x1 - x0, y1 - y0);
        if roi_w == 0 || roi_h == 0 {
            return Ok(out);
        }

        let cropped = imageops::crop_imm(&resized, 0, 0, roi_w, roi_h).to_image();

        // Composite only where the idol silhouette and the wall overlap.
        let mask = self.composite_mask(&cropped, wall_mask, x0, y0);

        self.blend_shadow(&mut out, &mask, x0, y0);

        for (x, y, m) in mask.enumerate_pixels() {
            if m[0] > 0 {
                out.put_pixel(x0 + x, y0 + y, *cropped.get_pixel(x, y));
            }
        }

        Ok(out)
    }

    /// Silhouette (luminance above threshold) intersected with the wall
    /// mask, restricted to the ROI.
    fn composite_mask(
        &self,
        idol_roi: &RgbImage,
        wall_mask: &GrayImage,
        x0: u32,
        y0: u32,
    ) -> GrayImage {
        let mut mask = GrayImage::new(idol_roi.width(), idol_roi.height());
        for (x, y, m) in mask.enumerate_pixels_mut() {
            let p = idol_roi.get_pixel(x, y);
            let luminance = 0.299 * p[0] as f32 + 0.587 * p[1] as f32 + 0.114 * p[2] as f32;
            let foreground = luminance > self.config.foreground_threshold as f32;
            let on_wall = wall_mask.get_pixel(x0 + x, y0 + y)[0] > 0;
            if foreground && on_wall {
                *m = Luma([255]);
            }
        }
        mask
    }

    /// Morphological dilation of the composite mask; the ring of
    /// dilated-but-not-masked pixels receives the shadow blend.
    fn blend_shadow(&self, out: &mut RgbImage, mask: &GrayImage, x0: u32, y0: u32) {
        let dilated = dilate(mask, Norm::L2, self.config.shadow_radius);
        let w = self.config.shadow_weight;
        let shadow = self.config.shadow_color;

        for (x, y, d) in dilated.enumerate_pixels() {
            if d[0] > 0 && mask.get_pixel(x, y)[0] == 0 {
                let px = out.get_pixel_mut(x0 + x, y0 + y);
                for c in 0..3 {
                    let v = (1.0 - w) * px[c] as f32 + w * shadow[c] as f32;
                    px[c] = v.round().clamp(0.0, 255.0) as u8;
                }
            }
        }
    }
}
