//! Scalar generation parameters and their declared ranges.

use std::ops::RangeInclusive;

/// Valid noise frequency scales. Values near zero sample a single noise lattice cell.
pub const PERLIN_STRETCH_RANGE: RangeInclusive<f32> = 0.0001..=0.05;
pub const HEIGHT_MULTIPLIER_RANGE: RangeInclusive<f32> = 0.0..=1.0;
/// Degrees.
pub const MAX_SLOPE_RANGE: RangeInclusive<f32> = 0.0..=90.0;
/// Cells.
pub const PATH_WIDTH_RANGE: RangeInclusive<i32> = 1..=20;
pub const PATH_HEIGHT_RANGE: RangeInclusive<f32> = 0.0..=0.5;

/// Everything a regeneration pass reads besides the shaping curve and waypoints.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GenerationParameters {
    /// Noise frequency scale.
    pub perlin_stretch: f32,
    /// Vertical scale applied after the shaping curve.
    pub height_multiplier: f32,
    /// Steepness threshold (degrees) above which a cell is rock.
    pub max_slope: f32,
    /// Half-width of the square carve brush, in cells.
    pub path_width: i32,
    /// Each brush stamp lowers heights by `path_height / 100`.
    pub path_height: f32,
    /// World-space elevation below which a cell is sand.
    pub water_level: f32,
    /// Additive offset into noise sample coordinates.
    pub seed: f32,
}

impl Default for GenerationParameters {
    fn default() -> Self {
        Self {
            perlin_stretch: 0.01,
            height_multiplier: 0.5,
            max_slope: 40.0,
            path_width: 1,
            path_height: 0.1,
            water_level: 0.0,
            seed: 0.0,
        }
    }
}

pub(crate) fn clamp_to<T: PartialOrd + Copy>(value: T, range: &RangeInclusive<T>) -> T {
    if value < *range.start() {
        *range.start()
    } else if value > *range.end() {
        *range.end()
    } else {
        value
    }
}

impl GenerationParameters {
    /// Copy with every bounded field clamped to its declared range.
    pub fn clamped(self) -> Self {
        Self {
            perlin_stretch: clamp_to(self.perlin_stretch, &PERLIN_STRETCH_RANGE),
            height_multiplier: clamp_to(self.height_multiplier, &HEIGHT_MULTIPLIER_RANGE),
            max_slope: clamp_to(self.max_slope, &MAX_SLOPE_RANGE),
            path_width: clamp_to(self.path_width, &PATH_WIDTH_RANGE),
            path_height: clamp_to(self.path_height, &PATH_HEIGHT_RANGE),
            ..self
        }
    }
}
