use serde::{Deserialize, Serialize};

use crate::error::{ArError, Result};

/// Where and how large the idol appears on the wall photo.
///
/// `x` and `y` locate the idol's bottom-center anchor as fractions of the
/// photo's width and height, so the same placement generalizes across photo
/// resolutions. `scale` is the idol's height relative to the photo's height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub x: f32,
    pub y: f32,
    pub scale: f32,
}

impl Placement {
    /// Validates ranges at the boundary: x, y in [0, 1] and scale in (0, 1].
    pub fn new(x: f32, y: f32, scale: f32) -> Result<Self> {
        if !(0.0..=1.0).contains(&x) {
            return Err(ArError::InvalidPlacement(format!(
                "x must be within [0, 1], got {x}"
            )));
        }
        if !(0.0..=1.0).contains(&y) {
            return Err(ArError::InvalidPlacement(format!(
                "y must be within [0, 1], got {y}"
            )));
        }
        if !(scale > 0.0 && scale <= 1.0) {
            return Err(ArError::InvalidPlacement(format!(
                "scale must be within (0, 1], got {scale}"
            )));
        }
        Ok(Self { x, y, scale })
    }
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            x: 0.5,
            y: 0.8,
            scale: 0.3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_placement() {
        let p = Placement::new(0.5, 1.0, 0.25).expect("Should accept in-range values");
        assert_eq!(p.x, 0.5);
        assert_eq!(p.y, 1.0);
        assert_eq!(p.scale, 0.25);
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert!(Placement::new(-0.1, 0.5, 0.3).is_err());
        assert!(Placement::new(0.5, 1.5, 0.3).is_err());
        assert!(Placement::new(0.5, 0.5, 0.0).is_err());
        assert!(Placement::new(0.5, 0.5, 1.1).is_err());
    }

    #[test]
    fn test_rejects_nan() {
        assert!(Placement::new(f32::NAN, 0.5, 0.3).is_err());
        assert!(Placement::new(0.5, 0.5, f32::NAN).is_err());
    }

    #[test]
    fn test_defaults() {
        let p = Placement::default();
        assert_eq!(p.x, 0.5);
        assert_eq!(p.y, 0.8);
        assert_eq!(p.scale, 0.3);
    }
}
