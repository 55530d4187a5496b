//! Waypoint routing and path carving.
//!
//! Waypoints are snapped onto the navigator's baked surface, routed pairwise,
//! resampled into dense points and stamped into the heightfield and splat map
//! with a square brush.

use glam::{Vec2, Vec3};
use tracing::{debug, warn};

use crate::heightfield::HeightfieldBuffer;
use crate::host::{Navigator, TerrainStorage};
use crate::params::GenerationParameters;
use crate::splat::{SplatBuffer, SplatLayer};

/// Maximum distance a waypoint may move when snapped onto the navigable surface.
pub const SNAP_SEARCH_RADIUS: f32 = 100.0;

/// Resampled points per world unit of corner-to-corner distance.
pub const SAMPLES_PER_UNIT: f32 = 10.0;

/// Map a world position to normalized terrain coordinates.
///
/// The result is `(z, x)`: the first component runs along world Z and the second
/// along world X, matching the heightfield's `(row, col)` layout.
pub fn terrain_position(world: Vec3, origin: Vec3, size: Vec3) -> Vec2 {
    let local = world - origin;
    Vec2::new(local.z / size.z, local.x / size.x)
}

/// Grid cell for normalized coordinates, truncating toward zero.
pub fn grid_cell(normalized: Vec2, resolution: usize) -> (i64, i64) {
    let res = resolution as f32;
    ((normalized.x * res) as i64, (normalized.y * res) as i64)
}

/// Evenly spaced points from `a` toward `b`, excluding `b`.
///
/// The count is the distance times [`SAMPLES_PER_UNIT`], rounded half to even.
pub fn resample_segment(a: Vec3, b: Vec3) -> impl Iterator<Item = Vec3> {
    let count = (a.distance(b) * SAMPLES_PER_UNIT).round_ties_even() as u32;
    (0..count).map(move |k| a.lerp(b, k as f32 / count as f32))
}

/// What a carve pass did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CarveReport {
    /// Waypoints that snapped onto the navigable surface.
    pub waypoints_snapped: usize,
    /// Consecutive waypoint pairs that produced a usable polyline.
    pub segments_routed: usize,
    /// Resampled points stamped with the brush.
    pub points_stamped: usize,
}

/// Depresses and paints a square brush along routed paths.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathCarver {
    /// Brush covers offsets `-path_width..path_width` on both axes.
    pub path_width: i32,
    pub path_height: f32,
}

impl PathCarver {
    pub fn new(path_width: i32, path_height: f32) -> Self {
        Self {
            path_width,
            path_height,
        }
    }

    pub fn from_params(params: &GenerationParameters) -> Self {
        Self::new(params.path_width, params.path_height)
    }

    /// Height removed from each brushed cell per stamp.
    pub fn depth(&self) -> f32 {
        self.path_height / 100.0
    }

    /// Route through `waypoints` in order and carve every resolved segment.
    ///
    /// Fewer than two waypoints is a no-op and does not bake. The bake reads the
    /// storage's committed terrain, so routes ignore this pass's edits. A failed
    /// bake, a waypoint that will not snap, or an empty route skips that unit of
    /// work and carving carries on with the rest.
    pub fn carve<N: Navigator + ?Sized>(
        &self,
        waypoints: &[Vec3],
        storage: &dyn TerrainStorage,
        navigator: &mut N,
        heights: &mut HeightfieldBuffer,
        splat: &mut SplatBuffer,
    ) -> CarveReport {
        let mut report = CarveReport::default();
        if waypoints.len() < 2 {
            return report;
        }

        if let Err(err) = navigator.bake(storage) {
            warn!(%err, "navigable surface bake failed, snapping may fail");
        }

        let snapped: Vec<Vec3> = waypoints
            .iter()
            .filter_map(|&waypoint| {
                let hit = navigator.snap_to_surface(waypoint, SNAP_SEARCH_RADIUS);
                if hit.is_none() {
                    debug!(?waypoint, "waypoint has no navigable surface in range, dropped");
                }
                hit
            })
            .collect();
        report.waypoints_snapped = snapped.len();
        if snapped.len() < 2 {
            return report;
        }

        let origin = storage.origin();
        let size = storage.size();
        for pair in snapped.windows(2) {
            let corners = navigator.compute_path(pair[0], pair[1]);
            if corners.len() < 2 {
                debug!(from = ?pair[0], to = ?pair[1], "no route between waypoints");
                continue;
            }
            if !corners.iter().all(|corner| corner.is_finite()) {
                warn!(from = ?pair[0], to = ?pair[1], "route has non-finite corners, skipped");
                continue;
            }
            report.segments_routed += 1;
            report.points_stamped += self.carve_polyline(&corners, origin, size, heights, splat);
        }

        report
    }

    /// Stamp the brush along every resampled point of `corners`. Returns the point count.
    pub fn carve_polyline(
        &self,
        corners: &[Vec3],
        origin: Vec3,
        size: Vec3,
        heights: &mut HeightfieldBuffer,
        splat: &mut SplatBuffer,
    ) -> usize {
        let resolution = heights.resolution();
        let mut stamped = 0;
        for leg in corners.windows(2) {
            for point in resample_segment(leg[0], leg[1]) {
                let cell = grid_cell(terrain_position(point, origin, size), resolution);
                self.stamp(cell, heights, splat);
                stamped += 1;
            }
        }
        stamped
    }

    /// Depress and paint dirt over the brush centered on `(x, y)`.
    ///
    /// Cells outside either buffer are skipped by that buffer, including offsets
    /// that would overflow a far-off center.
    pub fn stamp(
        &self,
        (x, y): (i64, i64),
        heights: &mut HeightfieldBuffer,
        splat: &mut SplatBuffer,
    ) {
        let width = self.path_width as i64;
        let depth = self.depth();
        for i in -width..width {
            for j in -width..width {
                let (cx, cy) = (x.saturating_add(i), y.saturating_add(j));
                heights.add(cx, cy, -depth);
                splat.paint(cx, cy, SplatLayer::Dirt);
            }
        }
    }
}
