//! Parameter-driven editing session over a host terrain.
//!
//! [`TerrainEditor`] owns the host collaborators, the current
//! [`GenerationParameters`], the shaping curve and the placed waypoints. Every
//! mutation runs a full regeneration pass before returning.

use glam::Vec3;
use noise::{NoiseFn, Perlin};
use rand::Rng;
use tracing::info;

use crate::curve::ShapingCurve;
use crate::host::{Navigator, TerrainStorage};
use crate::params::{
    GenerationParameters, HEIGHT_MULTIPLIER_RANGE, MAX_SLOPE_RANGE, PATH_HEIGHT_RANGE,
    PATH_WIDTH_RANGE, PERLIN_STRETCH_RANGE, clamp_to,
};
use crate::pipeline::{RegenerationPipeline, RegenerationReport};

/// Seeds drawn by [`TerrainEditor::randomize_seed`] fall in this half-open range.
pub const RANDOM_SEED_RANGE: std::ops::Range<i32> = -9999..9999;

pub struct TerrainEditor<S, N, F = Perlin> {
    storage: S,
    navigator: N,
    pipeline: RegenerationPipeline<F>,
    params: GenerationParameters,
    curve: ShapingCurve,
    waypoints: Vec<Vec3>,
    resolution: usize,
    last_report: Option<RegenerationReport>,
}

impl<S: TerrainStorage, N: Navigator> TerrainEditor<S, N, Perlin> {
    /// Wrap a host terrain and navigator. Nothing is regenerated until the first
    /// mutation or an explicit [`regenerate`](Self::regenerate).
    pub fn new(storage: S, navigator: N, params: GenerationParameters, curve: ShapingCurve) -> Self {
        Self::with_pipeline(storage, navigator, RegenerationPipeline::new(), params, curve)
    }
}

impl<S, N, F> TerrainEditor<S, N, F>
where
    S: TerrainStorage,
    N: Navigator,
    F: NoiseFn<f64, 2>,
{
    pub fn with_pipeline(
        storage: S,
        navigator: N,
        pipeline: RegenerationPipeline<F>,
        params: GenerationParameters,
        curve: ShapingCurve,
    ) -> Self {
        let mut editor = Self {
            storage,
            navigator,
            pipeline,
            params: params.clamped(),
            curve,
            waypoints: Vec::new(),
            resolution: 0,
            last_report: None,
        };
        editor.pull_terrain();
        editor
    }

    /// Re-read the heightmap resolution from the host storage.
    pub fn pull_terrain(&mut self) -> usize {
        self.resolution = self.storage.heightmap_resolution();
        self.resolution
    }

    /// Run a full pass with the current parameters, curve and waypoints.
    pub fn regenerate(&mut self) -> &RegenerationReport {
        let report = self.pipeline.run(
            &mut self.storage,
            &mut self.navigator,
            &self.params,
            &self.curve,
            &self.waypoints,
        );
        self.last_report.insert(report)
    }

    pub fn params(&self) -> &GenerationParameters {
        &self.params
    }

    pub fn curve(&self) -> &ShapingCurve {
        &self.curve
    }

    pub fn perlin_stretch(&self) -> f32 {
        self.params.perlin_stretch
    }

    pub fn height_multiplier(&self) -> f32 {
        self.params.height_multiplier
    }

    pub fn max_slope(&self) -> f32 {
        self.params.max_slope
    }

    pub fn path_width(&self) -> i32 {
        self.params.path_width
    }

    pub fn path_height(&self) -> f32 {
        self.params.path_height
    }

    pub fn water_level(&self) -> f32 {
        self.params.water_level
    }

    pub fn seed(&self) -> f32 {
        self.params.seed
    }

    /// Resolution as of the last [`pull_terrain`](Self::pull_terrain).
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    pub fn waypoints(&self) -> &[Vec3] {
        &self.waypoints
    }

    pub fn set_perlin_stretch(&mut self, value: f32) {
        self.params.perlin_stretch = clamp_to(value, &PERLIN_STRETCH_RANGE);
        self.regenerate();
    }

    pub fn set_height_multiplier(&mut self, value: f32) {
        self.params.height_multiplier = clamp_to(value, &HEIGHT_MULTIPLIER_RANGE);
        self.regenerate();
    }

    pub fn set_max_slope(&mut self, value: f32) {
        self.params.max_slope = clamp_to(value, &MAX_SLOPE_RANGE);
        self.regenerate();
    }

    pub fn set_path_width(&mut self, value: i32) {
        self.params.path_width = clamp_to(value, &PATH_WIDTH_RANGE);
        self.regenerate();
    }

    pub fn set_path_height(&mut self, value: f32) {
        self.params.path_height = clamp_to(value, &PATH_HEIGHT_RANGE);
        self.regenerate();
    }

    pub fn set_water_level(&mut self, value: f32) {
        self.params.water_level = value;
        self.regenerate();
    }

    pub fn set_seed(&mut self, value: f32) {
        self.params.seed = value;
        self.regenerate();
    }

    /// Replace the shaping curve and regenerate.
    pub fn set_curve(&mut self, curve: ShapingCurve) {
        self.curve = curve;
        self.regenerate();
    }

    /// Append a waypoint to the route and regenerate.
    pub fn add_waypoint(&mut self, point: Vec3) {
        self.waypoints.push(point);
        info!(
            x = point.x,
            y = point.y,
            z = point.z,
            count = self.waypoints.len(),
            "waypoint added"
        );
        self.regenerate();
    }

    /// Drop every waypoint, draw a fresh integer seed and regenerate.
    pub fn randomize_seed<R: Rng>(&mut self, rng: &mut R) -> f32 {
        self.waypoints.clear();
        self.params.seed = rng.random_range(RANDOM_SEED_RANGE) as f32;
        info!(seed = self.params.seed, "seed randomized");
        self.regenerate();
        self.params.seed
    }

    pub fn last_report(&self) -> Option<&RegenerationReport> {
        self.last_report.as_ref()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Mutable access to the host storage. Call
    /// [`pull_terrain`](Self::pull_terrain) after resizing it.
    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

}
