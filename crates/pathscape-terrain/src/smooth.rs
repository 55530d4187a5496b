//! 3x3 box smoothing of splat weights.

use crate::splat::{SplatBuffer, SplatLayer};

/// Averages every layer over each cell's in-bounds 3x3 neighborhood.
///
/// Layers are averaged independently and not renormalized, so a cell's weights
/// may stop summing to one. The sweep runs columns outer, rows inner, and writes
/// each mean straight back: a cell sees the already-smoothed values of the cells
/// visited before it, so blur carries further toward higher columns and rows.
#[derive(Clone, Copy, Debug, Default)]
pub struct SplatSmoother;

impl SplatSmoother {
    pub fn new() -> Self {
        Self
    }

    pub fn smooth(&self, splat: &mut SplatBuffer) {
        let (width, height) = (splat.width() as i64, splat.height() as i64);
        for col in 0..width {
            for row in 0..height {
                let mean = neighborhood_mean(splat, row, col);
                splat.set(row, col, mean);
            }
        }
    }
}

/// Per-layer mean of `(row, col)` and its in-bounds 8-neighbors.
///
/// Edge and corner cells average over fewer samples; missing neighbors are not
/// counted as zero.
pub fn neighborhood_mean(splat: &SplatBuffer, row: i64, col: i64) -> [f32; SplatLayer::COUNT] {
    let mut total = [0.0f32; SplatLayer::COUNT];
    let mut count = 0u32;
    for dc in -1..=1 {
        for dr in -1..=1 {
            if let Some(weights) = splat.get(row + dr, col + dc) {
                for (sum, w) in total.iter_mut().zip(weights) {
                    *sum += w;
                }
                count += 1;
            }
        }
    }
    if count > 0 {
        total.iter_mut().for_each(|sum| *sum /= count as f32);
    }
    total
}
