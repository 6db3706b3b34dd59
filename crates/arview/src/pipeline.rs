//! Pipeline orchestration: segment, decorate, place, in that fixed order,
//! with no branching and no retries. Stage errors propagate unchanged.

use image::RgbImage;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;

use crate::decor;
use crate::error::{ArError, Result};
use crate::pattern::PatternKind;
use crate::placer::{IdolPlacer, PlacerConfig};
use crate::traits::Segmenter;
use crate::types::Placement;

/// How the decoration stage picks its motif.
///
/// `Os` draws from the operating system's entropy per invocation; `Fixed`
/// and `Seeded` make the pipeline reproducible for tests.
#[derive(Debug, Clone)]
pub enum PatternChoice {
    Fixed(PatternKind),
    Seeded(u64),
    Os,
}

pub struct ArPipeline {
    segmenter: Box<dyn Segmenter>,
    pattern_choice: PatternChoice,
    placer: IdolPlacer,
}

impl ArPipeline {
    /// Create a pipeline builder around the given segmentation backend.
    pub fn builder<S: Segmenter + 'static>(segmenter: S) -> ArPipelineBuilder {
        ArPipelineBuilder {
            segmenter: Box::new(segmenter),
            pattern_choice: PatternChoice::Os,
            placer_config: PlacerConfig::default(),
        }
    }

    /// Run the full pipeline and return a composite with the wall photo's
    /// dimensions.
    pub fn visualize(
        &self,
        wall: &RgbImage,
        idol: &RgbImage,
        placement: &Placement,
    ) -> Result<RgbImage> {
        if wall.width() == 0 || wall.height() == 0 {
            return Err(ArError::InvalidImage("wall photo has zero pixels".into()));
        }

        let mask = self.segmenter.segment(wall)?;
        debug!(width = wall.width(), height = wall.height(), "wall segmented");

        let kind = self.pick_pattern();
        let decorated = decor::decorate(wall, idol, kind)?;
        debug!(%kind, "background decorated");

        self.placer.place(&decorated, idol, &mask, placement)
    }

    fn pick_pattern(&self) -> PatternKind {
        match self.pattern_choice {
            PatternChoice::Fixed(kind) => kind,
            PatternChoice::Seeded(seed) => PatternKind::random(&mut StdRng::seed_from_u64(seed)),
            PatternChoice::Os => PatternKind::random(&mut rand::rng()),
        }
    }
}

/// Fluent builder for [`ArPipeline`].
pub struct ArPipelineBuilder {
    segmenter: Box<dyn Segmenter>,
    pattern_choice: PatternChoice,
    placer_config: PlacerConfig,
}

impl ArPipelineBuilder {
    pub fn pattern_choice(mut self, choice: PatternChoice) -> Self {
        self.pattern_choice = choice;
        self
    }

    pub fn placer_config(mut self, config: PlacerConfig) -> Self {
        self.placer_config = config;
        self
    }

    pub fn build(self) -> ArPipeline {
        ArPipeline {
            segmenter: self.segmenter,
            pattern_choice: self.pattern_choice,
            placer: IdolPlacer::new(self.placer_config),
        }
    }
}
