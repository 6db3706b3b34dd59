use image::{GrayImage, RgbImage};

use crate::error::Result;

/// Trait for wall segmentation backends.
///
/// Returns a binary mask (255 = wall, 0 = not wall) with the same spatial
/// dimensions as the input photo. Segmentation quality is best-effort;
/// downstream stages must tolerate a partially wrong mask.
pub trait Segmenter: Send + Sync {
    fn segment(&self, photo: &RgbImage) -> Result<GrayImage>;
}
