//! Noise heightfield synthesis with radial falloff and edge flattening.
//!
//! Three full-grid passes, each purely positional:
//! 1. shaped noise scaled by the height multiplier,
//! 2. a radial falloff away from the grid center,
//! 3. a linear ramp down across the outer [`EDGE_BAND`] cells.

use noise::{NoiseFn, Perlin};

use crate::curve::ShapingCurve;
use crate::heightfield::HeightfieldBuffer;
use crate::params::GenerationParameters;

/// Width in cells of the border band that ramps down toward the edge.
pub const EDGE_BAND: i64 = 20;

/// Divisor applied to both the radial falloff and the edge ramp.
const FALLOFF_SCALE: f32 = 5.0;

/// Fills a [`HeightfieldBuffer`] from a 2D noise function.
///
/// Output is a pure function of the noise source, the parameters, the curve and
/// the grid resolution: the same inputs always produce the same grid.
pub struct NoiseHeightfieldGenerator<F = Perlin> {
    noise: F,
}

impl NoiseHeightfieldGenerator<Perlin> {
    /// Generator backed by Perlin noise with the library's default permutation.
    pub fn new() -> Self {
        Self {
            noise: Perlin::new(Perlin::DEFAULT_SEED),
        }
    }
}

impl Default for NoiseHeightfieldGenerator<Perlin> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: NoiseFn<f64, 2>> NoiseHeightfieldGenerator<F> {
    /// Generator backed by an arbitrary noise source.
    pub fn with_noise(noise: F) -> Self {
        Self { noise }
    }

    /// Sample the noise source remapped from `[-1, 1]` to `[0, 1]`.
    pub fn sample(&self, x: f32, y: f32) -> f32 {
        let raw = self.noise.get([x as f64, y as f64]) as f32;
        ((raw + 1.0) * 0.5).clamp(0.0, 1.0)
    }

    /// Overwrite every cell of `heightfield`.
    pub fn generate(
        &self,
        heightfield: &mut HeightfieldBuffer,
        params: &GenerationParameters,
        curve: &ShapingCurve,
    ) {
        let resolution = heightfield.resolution();
        let seed = params.seed;
        let stretch = params.perlin_stretch;

        heightfield.for_each_mut(|x, y, h| {
            let n = self.sample((x as f32 + seed) * stretch, (y as f32 + seed) * stretch);
            *h = curve.evaluate(n) * params.height_multiplier;
        });

        heightfield.for_each_mut(|x, y, h| {
            *h -= radial_falloff(x, y, resolution);
        });

        heightfield.for_each_mut(|x, y, h| {
            *h -= edge_ramp(x, y, resolution);
        });
    }
}

/// Height removed at `(x, y)` for its distance from the grid center.
pub fn radial_falloff(x: usize, y: usize, resolution: usize) -> f32 {
    if resolution == 0 {
        return 0.0;
    }
    let center = (resolution / 2) as f32;
    let dx = x as f32 - center;
    let dy = y as f32 - center;
    (dx * dx + dy * dy).sqrt() / resolution as f32 / FALLOFF_SCALE
}

/// Height removed at `(x, y)` by the border ramp; zero outside the band.
pub fn edge_ramp(x: usize, y: usize, resolution: usize) -> f32 {
    let (x, y, res) = (x as i64, y as i64, resolution as i64);
    let in_band = x < EDGE_BAND || x > res - EDGE_BAND || y < EDGE_BAND || y > res - EDGE_BAND;
    if !in_band {
        return 0.0;
    }
    let nearest_edge = x.min(res - x).min(y).min(res - y);
    (EDGE_BAND - nearest_edge) as f32 / EDGE_BAND as f32 / FALLOFF_SCALE
}
