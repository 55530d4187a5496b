//! Full regeneration pass over a terrain storage.

use std::time::{Duration, Instant};

use glam::Vec3;
use noise::{NoiseFn, Perlin};
use tracing::{debug, info, info_span};

use crate::carve::{CarveReport, PathCarver};
use crate::classify::TextureClassifier;
use crate::curve::ShapingCurve;
use crate::heightfield::HeightfieldBuffer;
use crate::heightmap::NoiseHeightfieldGenerator;
use crate::host::{Navigator, TerrainStorage};
use crate::params::GenerationParameters;
use crate::smooth::SplatSmoother;
use crate::splat::SplatBuffer;

/// One step of a regeneration pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Fill the heightfield from noise.
    Synthesize,
    /// Assign texture layers from the committed surface.
    Classify,
    /// Route waypoints and carve paths.
    Carve,
    /// Blur splat weights.
    Smooth,
    /// Push both buffers to the storage.
    Commit,
}

impl Stage {
    /// The order every pass runs in. Carving must follow classification so dirt
    /// overwrites the classified layer, and smoothing must follow carving so
    /// path edges blend.
    pub const ORDER: [Stage; 5] = [
        Stage::Synthesize,
        Stage::Classify,
        Stage::Carve,
        Stage::Smooth,
        Stage::Commit,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Stage::Synthesize => "synthesize",
            Stage::Classify => "classify",
            Stage::Carve => "carve",
            Stage::Smooth => "smooth",
            Stage::Commit => "commit",
        }
    }
}

/// Summary of one completed pass.
#[derive(Clone, Debug, PartialEq)]
pub struct RegenerationReport {
    pub resolution: usize,
    /// `(width, height)` of the splat map.
    pub splat_dimensions: (usize, usize),
    pub carve: CarveReport,
    /// Stages in the order they ran.
    pub stages: Vec<Stage>,
    pub elapsed: Duration,
}

/// Runs every [`Stage`] in [`Stage::ORDER`] against a storage and navigator.
///
/// Holds no state between passes; everything it reads comes from its arguments
/// and the storage's committed data.
pub struct RegenerationPipeline<F = Perlin> {
    generator: NoiseHeightfieldGenerator<F>,
    smoother: SplatSmoother,
}

impl RegenerationPipeline<Perlin> {
    pub fn new() -> Self {
        Self::with_generator(NoiseHeightfieldGenerator::new())
    }
}

impl Default for RegenerationPipeline<Perlin> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: NoiseFn<f64, 2>> RegenerationPipeline<F> {
    pub fn with_generator(generator: NoiseHeightfieldGenerator<F>) -> Self {
        Self {
            generator,
            smoother: SplatSmoother::new(),
        }
    }

    /// Regenerate and commit the heightfield and splat map.
    pub fn run<S, N>(
        &self,
        storage: &mut S,
        navigator: &mut N,
        params: &GenerationParameters,
        curve: &ShapingCurve,
        waypoints: &[Vec3],
    ) -> RegenerationReport
    where
        S: TerrainStorage,
        N: Navigator + ?Sized,
    {
        let started = Instant::now();
        let resolution = storage.heightmap_resolution();
        let (alpha_width, alpha_height) = storage.alphamap_dimensions();
        let _span = info_span!("regenerate", resolution, alpha_width, alpha_height).entered();

        let mut heights = HeightfieldBuffer::from_storage(&*storage);
        let mut splat = SplatBuffer::new(alpha_width, alpha_height);
        let mut carve = CarveReport::default();
        let mut stages = Vec::with_capacity(Stage::ORDER.len());

        for stage in Stage::ORDER {
            match stage {
                Stage::Synthesize => self.generator.generate(&mut heights, params, curve),
                Stage::Classify => {
                    TextureClassifier::from_params(params).classify(&*storage, &mut splat)
                }
                Stage::Carve => {
                    carve = PathCarver::from_params(params).carve(
                        waypoints,
                        &*storage,
                        navigator,
                        &mut heights,
                        &mut splat,
                    );
                }
                Stage::Smooth => self.smoother.smooth(&mut splat),
                Stage::Commit => {
                    storage.set_alphamaps(0, 0, &splat);
                    storage.set_heights(0, 0, &heights);
                }
            }
            debug!(stage = stage.name(), "stage complete");
            stages.push(stage);
        }

        let elapsed = started.elapsed();
        info!(
            waypoints = waypoints.len(),
            snapped = carve.waypoints_snapped,
            points = carve.points_stamped,
            elapsed_ms = elapsed.as_secs_f64() * 1000.0,
            "terrain regenerated"
        );

        RegenerationReport {
            resolution,
            splat_dimensions: (alpha_width, alpha_height),
            carve,
            stages,
            elapsed,
        }
    }
}
