//! Logits-to-mask conversion: argmax over classes, wall-class selection,
//! nearest-neighbor upsample back to the photo's resolution.

use image::{GrayImage, Luma};
use ndarray::ArrayViewD;

use crate::{Result, SegError};

/// Convert raw class logits into a binary wall mask of `out_w` x `out_h`.
///
/// Accepts `[batch, classes, h, w]` or `[classes, h, w]` layouts; anything
/// else is a shape error. With a batch dimension only the first item is
/// read.
pub fn logits_to_mask(
    logits: &ArrayViewD<'_, f32>,
    wall_class: usize,
    out_w: u32,
    out_h: u32,
) -> Result<GrayImage> {
    let shape = logits.shape();
    let (classes, mh, mw) = match *shape {
        [_, c, h, w] => (c, h, w),
        [c, h, w] => (c, h, w),
        _ => return Err(SegError::OutputShape(shape.to_vec())),
    };
    if wall_class >= classes || mh == 0 || mw == 0 {
        return Err(SegError::OutputShape(shape.to_vec()));
    }

    let flat: Vec<f32> = logits.iter().copied().collect();
    let plane = mh * mw;

    // Argmax over the class axis at model-native resolution.
    let mut native = vec![0u8; plane];
    for y in 0..mh {
        for x in 0..mw {
            let mut best = f32::MIN;
            let mut best_class = 0usize;
            for c in 0..classes {
                let v = flat[c * plane + y * mw + x];
                if v > best {
                    best = v;
                    best_class = c;
                }
            }
            if best_class == wall_class {
                native[y * mw + x] = 255;
            }
        }
    }

    // Nearest-neighbor upsample to the photo's resolution.
    let sx = mw as f32 / out_w as f32;
    let sy = mh as f32 / out_h as f32;
    let mut mask = GrayImage::new(out_w, out_h);
    for (x, y, p) in mask.enumerate_pixels_mut() {
        let src_x = (((x as f32 + 0.5) * sx) as usize).min(mw - 1);
        let src_y = (((y as f32 + 0.5) * sy) as usize).min(mh - 1);
        *p = Luma([native[src_y * mw + src_x]]);
    }

    Ok(mask)
}
