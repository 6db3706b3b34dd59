//! Dominant-color extraction via k-means over the flattened pixel set.
//!
//! Seeding is deterministic (farthest-point from the middle pixel), so the
//! same image always yields the same centers. Output order is whatever the
//! clustering produces; callers treat the first and last centers as a
//! heuristic background/accent pair.

use image::{Rgb, RgbImage};

use crate::error::{ArError, Result};

const MAX_ITERATIONS: usize = 200;
const CONVERGENCE_EPS: f32 = 0.1;

#[derive(Clone, Copy, Default, PartialEq)]
struct ColorF {
    r: f32,
    g: f32,
    b: f32,
}

impl ColorF {
    fn from_rgb(p: &Rgb<u8>) -> Self {
        Self {
            r: p[0] as f32,
            g: p[1] as f32,
            b: p[2] as f32,
        }
    }

    fn to_rgb(self) -> Rgb<u8> {
        Rgb([
            self.r.round().clamp(0.0, 255.0) as u8,
            self.g.round().clamp(0.0, 255.0) as u8,
            self.b.round().clamp(0.0, 255.0) as u8,
        ])
    }

    fn dist_sq(self, other: Self) -> f32 {
        let dr = self.r - other.r;
        let dg = self.g - other.g;
        let db = self.b - other.b;
        dr * dr + dg * dg + db * db
    }

    fn add(self, other: Self) -> Self {
        Self {
            r: self.r + other.r,
            g: self.g + other.g,
            b: self.b + other.b,
        }
    }

    fn scale(self, s: f32) -> Self {
        Self {
            r: self.r * s,
            g: self.g * s,
            b: self.b * s,
        }
    }
}

/// Extract `k` dominant colors from an image.
///
/// Fails with [`ArError::InvalidImage`] when the image has zero pixels. A
/// single-color image degenerates to `k` identical centers.
pub fn dominant_colors(image: &RgbImage, k: usize) -> Result<Vec<Rgb<u8>>> {
    if image.width() == 0 || image.height() == 0 {
        return Err(ArError::InvalidImage(
            "cannot extract colors from an image with zero pixels".into(),
        ));
    }
    if k == 0 {
        return Ok(Vec::new());
    }

    let pixels: Vec<ColorF> = image.pixels().map(ColorF::from_rgb).collect();
    let mut centroids = seed_centroids(&pixels, k);

    let mut counts = vec![0usize; k];
    let mut sums = vec![ColorF::default(); k];

    for _ in 0..MAX_ITERATIONS {
        counts.fill(0);
        sums.fill(ColorF::default());

        for p in &pixels {
            let c = nearest(*p, &centroids);
            counts[c] += 1;
            sums[c] = sums[c].add(*p);
        }

        let mut movement = 0.0f32;
        for i in 0..k {
            // Empty clusters keep their previous center.
            if counts[i] > 0 {
                let updated = sums[i].scale(1.0 / counts[i] as f32);
                movement = movement.max(centroids[i].dist_sq(updated).sqrt());
                centroids[i] = updated;
            }
        }

        if movement < CONVERGENCE_EPS {
            break;
        }
    }

    Ok(centroids.into_iter().map(ColorF::to_rgb).collect())
}

/// Farthest-point seeding, starting from the middle pixel.
fn seed_centroids(pixels: &[ColorF], k: usize) -> Vec<ColorF> {
    let mut centroids = Vec::with_capacity(k);
    centroids.push(pixels[pixels.len() / 2]);

    while centroids.len() < k {
        let (mut best_dist, mut best_idx) = (0.0f32, 0usize);
        for (i, p) in pixels.iter().enumerate() {
            let d = centroids
                .iter()
                .map(|c| p.dist_sq(*c))
                .fold(f32::MAX, f32::min);
            if d > best_dist {
                best_dist = d;
                best_idx = i;
            }
        }
        centroids.push(pixels[best_idx]);
    }

    centroids
}

fn nearest(p: ColorF, centroids: &[ColorF]) -> usize {
    let mut best = 0;
    let mut best_dist = f32::MAX;
    for (i, c) in centroids.iter().enumerate() {
        let d = p.dist_sq(*c);
        if d < best_dist {
            best_dist = d;
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_pixel_image_is_rejected() {
        let image = RgbImage::new(0, 0);
        assert!(matches!(
            dominant_colors(&image, 3),
            Err(ArError::InvalidImage(_))
        ));
    }

    #[test]
    fn test_single_color_image_degenerates() {
        let image = RgbImage::from_pixel(16, 16, Rgb([120, 40, 200]));
        let colors = dominant_colors(&image, 3).expect("Should cluster");
        assert_eq!(colors.len(), 3);
        for c in colors {
            assert_eq!(c, Rgb([120, 40, 200]));
        }
    }

    #[test]
    fn test_two_color_image_finds_both() {
        let mut image = RgbImage::from_pixel(20, 20, Rgb([255, 0, 0]));
        for y in 0..20 {
            for x in 0..10 {
                image.put_pixel(x, y, Rgb([0, 0, 255]));
            }
        }
        let colors = dominant_colors(&image, 2).expect("Should cluster");
        assert_eq!(colors.len(), 2);
        assert!(colors.contains(&Rgb([255, 0, 0])));
        assert!(colors.contains(&Rgb([0, 0, 255])));
    }

    #[test]
    fn test_clustering_is_deterministic() {
        let mut image = RgbImage::new(32, 32);
        for (x, y, p) in image.enumerate_pixels_mut() {
            *p = Rgb([(x * 8) as u8, (y * 8) as u8, ((x + y) * 4) as u8]);
        }
        let a = dominant_colors(&image, 3).expect("Should cluster");
        let b = dominant_colors(&image, 3).expect("Should cluster");
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_k_yields_empty() {
        let image = RgbImage::from_pixel(4, 4, Rgb([1, 2, 3]));
        assert!(dominant_colors(&image, 0).expect("Should succeed").is_empty());
    }
}
