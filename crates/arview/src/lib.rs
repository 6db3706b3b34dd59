//! # AR Idol Compositing
//!
//! Chains wall segmentation, decoration synthesis, and idol placement into
//! a single request-scoped pipeline. The segmentation backend sits behind
//! the [`Segmenter`] trait so the neural stage is pluggable (and stubbable
//! in tests); everything else is deterministic image arithmetic.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use arview::{ArPipeline, PatternChoice, PatternKind, Placement, Segmenter};
//! use image::{GrayImage, Luma, RgbImage};
//!
//! struct AllWall;
//!
//! impl Segmenter for AllWall {
//!     fn segment(&self, photo: &RgbImage) -> arview::Result<GrayImage> {
//!         Ok(GrayImage::from_pixel(photo.width(), photo.height(), Luma([255])))
//!     }
//! }
//!
//! let pipeline = ArPipeline::builder(AllWall)
//!     .pattern_choice(PatternChoice::Fixed(PatternKind::Geometric))
//!     .build();
//!
//! let wall = image::open("wall.jpg")?.to_rgb8();
//! let idol = image::open("idol.jpg")?.to_rgb8();
//! let composite = pipeline.visualize(&wall, &idol, &Placement::default())?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod color;
pub mod decor;
pub mod error;
pub mod pattern;
pub mod pipeline;
pub mod placer;
pub mod traits;
pub mod types;

pub use color::dominant_colors;
pub use error::{ArError, Result};
pub use pattern::PatternKind;
pub use pipeline::{ArPipeline, ArPipelineBuilder, PatternChoice};
pub use placer::{IdolPlacer, PlacerConfig};
pub use traits::Segmenter;
pub use types::Placement;
