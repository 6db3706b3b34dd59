//! Photo-to-tensor conversion matched to the pretrained model's training
//! distribution.

use image::RgbImage;
use image::imageops::{self, FilterType};
use ndarray::Array4;

/// Segmentation preprocessing configuration.
#[derive(Debug, Clone)]
pub struct PreprocessConfig {
    /// Side length of the model's square input.
    pub input_size: u32,
    /// Per-channel mean in [0, 1] space (ImageNet values).
    pub mean: [f32; 3],
    /// Per-channel std in [0, 1] space (ImageNet values).
    pub std: [f32; 3],
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            input_size: 512,
            mean: [0.485, 0.456, 0.406],
            std: [0.229, 0.224, 0.225],
        }
    }
}

/// Resize to the model's square input and normalize into an NCHW tensor
/// of shape `[1, 3, size, size]`.
pub fn photo_to_tensor(photo: &RgbImage, config: &PreprocessConfig) -> Array4<f32> {
    let size = config.input_size;
    let resized = imageops::resize(photo, size, size, FilterType::Triangle);

    let mut tensor = Array4::<f32>::zeros((1, 3, size as usize, size as usize));
    for (x, y, p) in resized.enumerate_pixels() {
        for c in 0..3 {
            let v = (p[c] as f32 / 255.0 - config.mean[c]) / config.std[c];
            tensor[[0, c, y as usize, x as usize]] = v;
        }
    }
    tensor
}
