//! Procedural terrain with carved paths: noise heightfield synthesis, slope and
//! height texture classification, waypoint path carving and splat smoothing,
//! committed to a host terrain through the [`TerrainStorage`] and [`Navigator`]
//! traits.

mod carve;
mod classify;
mod curve;
mod editor;
mod heightfield;
mod heightmap;
mod params;
mod pipeline;
mod smooth;
mod splat;

pub mod debug_viz;
pub mod host;
pub mod memory;

pub use carve::{
    CarveReport, PathCarver, SAMPLES_PER_UNIT, SNAP_SEARCH_RADIUS, grid_cell, resample_segment,
    terrain_position,
};
pub use classify::TextureClassifier;
pub use curve::{CurveKey, ShapingCurve};
pub use editor::{RANDOM_SEED_RANGE, TerrainEditor};
pub use heightfield::HeightfieldBuffer;
pub use heightmap::{EDGE_BAND, NoiseHeightfieldGenerator, edge_ramp, radial_falloff};
pub use host::{NavigationError, Navigator, TerrainStorage};
pub use memory::{InMemoryTerrain, StraightLineNavigator};
pub use params::{
    GenerationParameters, HEIGHT_MULTIPLIER_RANGE, MAX_SLOPE_RANGE, PATH_HEIGHT_RANGE,
    PATH_WIDTH_RANGE, PERLIN_STRETCH_RANGE,
};
pub use pipeline::{RegenerationPipeline, RegenerationReport, Stage};
pub use smooth::{SplatSmoother, neighborhood_mean};
pub use splat::{SplatBuffer, SplatLayer};
