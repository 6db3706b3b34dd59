//! Wall segmentation with a frozen pretrained semantic-segmentation model.
//!
//! The model (a SegFormer-style ADE20K network exported to ONNX) is loaded
//! once at process startup and run inference-only. Loading is fail-fast:
//! there is no fallback segmentation heuristic, so callers must abort
//! startup on [`SegError::ModelLoad`].

use std::path::PathBuf;
use std::sync::Mutex;

use image::{GrayImage, RgbImage};
use ort::session::Session;
use ort::value::Value;
use thiserror::Error;
use tracing::{debug, info};

pub mod postprocessing;
pub mod preprocessing;

use preprocessing::PreprocessConfig;

#[derive(Error, Debug)]
pub enum SegError {
    #[error("Failed to load segmentation model: {0}")]
    ModelLoad(#[source] ort::Error),

    #[error("Segmentation inference failed: {0}")]
    Inference(#[from] ort::Error),

    #[error("Unexpected model output shape: {0:?}")]
    OutputShape(Vec<usize>),
}

pub type Result<T> = std::result::Result<T, SegError>;

#[derive(Debug, Clone)]
pub struct SegmenterConfig {
    pub model_path: PathBuf,
    /// Index of the wall class in the model's label set (ADE20K: 0).
    pub wall_class: usize,
    pub preprocess: PreprocessConfig,
}

impl SegmenterConfig {
    pub fn new(model_path: impl Into<PathBuf>) -> Self {
        Self {
            model_path: model_path.into(),
            wall_class: 0,
            preprocess: PreprocessConfig::default(),
        }
    }
}

/// ONNX-backed [`arview::Segmenter`] implementation.
///
/// The session requires exclusive access to run, so it sits behind a mutex;
/// the weights themselves are frozen and shared read-only.
pub struct OnnxWallSegmenter {
    session: Mutex<Session>,
    input_name: String,
    config: SegmenterConfig,
}

impl OnnxWallSegmenter {
    /// Load the model once. Expensive; do this at startup and abort on
    /// failure.
    pub fn load(config: SegmenterConfig) -> Result<Self> {
        let session = Session::builder()
            .map_err(SegError::ModelLoad)?
            .commit_from_file(&config.model_path)
            .map_err(SegError::ModelLoad)?;

        let input_name = session
            .inputs()
            .first()
            .map(|i| i.name().to_string())
            .unwrap_or_else(|| "pixel_values".into());

        info!(
            model = %config.model_path.display(),
            wall_class = config.wall_class,
            "segmentation model loaded"
        );

        Ok(Self {
            session: Mutex::new(session),
            input_name,
            config,
        })
    }

    /// Segment a photo into a binary wall mask at the photo's resolution.
    pub fn segment_photo(&self, photo: &RgbImage) -> Result<GrayImage> {
        let tensor = preprocessing::photo_to_tensor(photo, &self.config.preprocess);
        let input = Value::from_array(tensor)?;
        let name = self.input_name.clone();

        let mut session = self.session.lock().unwrap_or_else(|e| e.into_inner());
        let outputs = session.run(ort::inputs![name => input])?;
        let logits = outputs[0].try_extract_array::<f32>()?;
        debug!(shape = ?logits.shape(), "segmentation logits extracted");

        postprocessing::logits_to_mask(
            &logits,
            self.config.wall_class,
            photo.width(),
            photo.height(),
        )
    }
}

impl arview::Segmenter for OnnxWallSegmenter {
    fn segment(&self, photo: &RgbImage) -> arview::Result<GrayImage> {
        self.segment_photo(photo)
            .map_err(|e| arview::ArError::Segmentation(e.to_string()))
    }
}
