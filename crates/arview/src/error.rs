use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArError {
    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("Invalid placement: {0}")]
    InvalidPlacement(String),

    #[error("Segmentation failed: {0}")]
    Segmentation(String),

    #[error("Buffer shape mismatch: expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        expected: (u32, u32),
        got: (u32, u32),
    },

    #[error("Image codec error: {0}")]
    Codec(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, ArError>;
