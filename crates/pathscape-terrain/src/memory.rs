//! In-memory host collaborators.
//!
//! [`InMemoryTerrain`] stands in for an engine's terrain storage and
//! [`StraightLineNavigator`] for its pathfinding service. The demo binary runs on
//! them, and they make every pipeline stage testable without an engine.

use glam::Vec3;

use crate::heightfield::HeightfieldBuffer;
use crate::host::{NavigationError, Navigator, TerrainStorage};
use crate::splat::SplatBuffer;

/// Terrain storage holding normalized heights in `[0, 1]`.
///
/// World elevation is `origin.y + normalized * size.y`. Committed heights are
/// clamped into `[0, 1]`, so the negative values produced by edge shaping land
/// as a flat floor.
#[derive(Clone, Debug)]
pub struct InMemoryTerrain {
    resolution: usize,
    heights: Vec<f32>,
    alphamaps: SplatBuffer,
    origin: Vec3,
    size: Vec3,
    height_commits: usize,
    alphamap_commits: usize,
}

impl InMemoryTerrain {
    /// A flat terrain at height zero.
    pub fn new(
        resolution: usize,
        alphamap_dimensions: (usize, usize),
        origin: Vec3,
        size: Vec3,
    ) -> Self {
        let (width, height) = alphamap_dimensions;
        Self {
            resolution,
            heights: vec![0.0; resolution * resolution],
            alphamaps: SplatBuffer::new(width, height),
            origin,
            size,
            height_commits: 0,
            alphamap_commits: 0,
        }
    }

    /// Set every normalized height from `f(row, col)`.
    pub fn fill_with(&mut self, mut f: impl FnMut(usize, usize) -> f32) {
        let res = self.resolution;
        for (i, h) in self.heights.iter_mut().enumerate() {
            *h = f(i / res, i % res).clamp(0.0, 1.0);
        }
    }

    /// Normalized committed height at `(row, col)`.
    pub fn normalized_height(&self, row: usize, col: usize) -> Option<f32> {
        (row < self.resolution && col < self.resolution)
            .then(|| self.heights[row * self.resolution + col])
    }

    /// The committed splat map.
    pub fn alphamaps(&self) -> &SplatBuffer {
        &self.alphamaps
    }

    /// Number of `set_heights` calls received.
    pub fn height_commits(&self) -> usize {
        self.height_commits
    }

    /// Number of `set_alphamaps` calls received.
    pub fn alphamap_commits(&self) -> usize {
        self.alphamap_commits
    }

    fn clamped_normalized(&self, row: i64, col: i64) -> f32 {
        let max = self.resolution as i64 - 1;
        let row = row.clamp(0, max) as usize;
        let col = col.clamp(0, max) as usize;
        self.heights[row * self.resolution + col]
    }

    /// World-space distance between adjacent grid samples along (x, z).
    fn cell_spacing(&self) -> (f32, f32) {
        let steps = self.resolution.saturating_sub(1).max(1) as f32;
        (self.size.x / steps, self.size.z / steps)
    }
}

impl TerrainStorage for InMemoryTerrain {
    fn heightmap_resolution(&self) -> usize {
        self.resolution
    }

    fn get_heights(&self, x0: usize, y0: usize, width: usize, height: usize) -> Vec<f32> {
        let mut block = Vec::with_capacity(width * height);
        for x in x0..x0 + width {
            for y in y0..y0 + height {
                block.push(self.normalized_height(x, y).unwrap_or(0.0));
            }
        }
        block
    }

    fn set_heights(&mut self, x0: usize, y0: usize, heights: &HeightfieldBuffer) {
        let res = heights.resolution() as i64;
        for x in 0..res {
            for y in 0..res {
                let (row, col) = (x0 + x as usize, y0 + y as usize);
                if row < self.resolution
                    && col < self.resolution
                    && let Some(h) = heights.get(x, y)
                {
                    self.heights[row * self.resolution + col] = h.clamp(0.0, 1.0);
                }
            }
        }
        self.height_commits += 1;
    }

    fn alphamap_dimensions(&self) -> (usize, usize) {
        (self.alphamaps.width(), self.alphamaps.height())
    }

    fn set_alphamaps(&mut self, x0: usize, y0: usize, splat: &SplatBuffer) {
        for row in 0..splat.height() as i64 {
            for col in 0..splat.width() as i64 {
                if let Some(weights) = splat.get(row, col) {
                    self.alphamaps
                        .set(y0 as i64 + row, x0 as i64 + col, weights);
                }
            }
        }
        self.alphamap_commits += 1;
    }

    fn steepness(&self, norm_x: f32, norm_y: f32) -> f32 {
        if self.resolution < 2 {
            return 0.0;
        }
        let max = (self.resolution - 1) as f32;
        let col = (norm_x * max).round() as i64;
        let row = (norm_y * max).round() as i64;
        let (dx, dz) = self.cell_spacing();

        let slope = |a: f32, b: f32, span: f32| (b - a) * self.size.y / span;
        let grad_x = slope(
            self.clamped_normalized(row, col - 1),
            self.clamped_normalized(row, col + 1),
            2.0 * dx,
        );
        let grad_z = slope(
            self.clamped_normalized(row - 1, col),
            self.clamped_normalized(row + 1, col),
            2.0 * dz,
        );
        (grad_x * grad_x + grad_z * grad_z).sqrt().atan().to_degrees()
    }

    fn height(&self, x: usize, y: usize) -> f32 {
        if self.resolution == 0 {
            return 0.0;
        }
        self.clamped_normalized(y as i64, x as i64) * self.size.y
    }

    fn origin(&self) -> Vec3 {
        self.origin
    }

    fn size(&self) -> Vec3 {
        self.size
    }
}

#[derive(Clone, Debug)]
struct BakedSurface {
    origin: Vec3,
    size: Vec3,
    resolution: usize,
    /// World-space elevations, row-major.
    heights: Vec<f32>,
}

impl BakedSurface {
    fn elevation(&self, x: f32, z: f32) -> f32 {
        let max = self.resolution.saturating_sub(1);
        let to_index = |local: f32, extent: f32| {
            let t = if extent > 0.0 { local / extent } else { 0.0 };
            ((t * max as f32).round().max(0.0) as usize).min(max)
        };
        let col = to_index(x - self.origin.x, self.size.x);
        let row = to_index(z - self.origin.z, self.size.z);
        self.origin.y + self.heights[row * self.resolution + col]
    }
}

/// Navigator whose whole terrain is walkable and whose paths are straight lines.
///
/// Baking snapshots the committed heights. Snapping clamps a point into the
/// terrain footprint and onto the snapshot surface, failing when that moves it
/// farther than the search radius.
#[derive(Clone, Debug, Default)]
pub struct StraightLineNavigator {
    surface: Option<BakedSurface>,
    bake_count: usize,
}

impl StraightLineNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of bakes requested so far.
    pub fn bake_count(&self) -> usize {
        self.bake_count
    }

    /// Whether a surface is currently baked.
    pub fn is_baked(&self) -> bool {
        self.surface.is_some()
    }
}

impl Navigator for StraightLineNavigator {
    fn bake(&mut self, terrain: &dyn TerrainStorage) -> Result<(), NavigationError> {
        self.bake_count += 1;
        let resolution = terrain.heightmap_resolution();
        if resolution == 0 {
            self.surface = None;
            return Err(NavigationError::EmptySurface);
        }
        let size = terrain.size();
        let heights = terrain
            .get_heights(0, 0, resolution, resolution)
            .into_iter()
            .map(|h| h * size.y)
            .collect();
        self.surface = Some(BakedSurface {
            origin: terrain.origin(),
            size,
            resolution,
            heights,
        });
        Ok(())
    }

    fn snap_to_surface(&self, point: Vec3, search_radius: f32) -> Option<Vec3> {
        let surface = self.surface.as_ref()?;
        let min = surface.origin;
        let max = surface.origin + surface.size;
        let x = point.x.clamp(min.x, max.x);
        let z = point.z.clamp(min.z, max.z);
        let snapped = Vec3::new(x, surface.elevation(x, z), z);
        (snapped.distance(point) <= search_radius).then_some(snapped)
    }

    fn compute_path(&self, from: Vec3, to: Vec3) -> Vec<Vec3> {
        if self.surface.is_some() {
            vec![from, to]
        } else {
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terrain() -> InMemoryTerrain {
        InMemoryTerrain::new(11, (10, 10), Vec3::ZERO, Vec3::new(10.0, 10.0, 10.0))
    }

    #[test]
    fn test_commit_clamps_to_unit_range() {
        let mut storage = terrain();
        let mut field = HeightfieldBuffer::filled(11, 0.5);
        field.set(0, 0, -0.3);
        field.set(1, 1, 1.7);
        storage.set_heights(0, 0, &field);

        assert_eq!(storage.normalized_height(0, 0), Some(0.0));
        assert_eq!(storage.normalized_height(1, 1), Some(1.0));
        assert_eq!(storage.normalized_height(5, 5), Some(0.5));
        assert_eq!(storage.height_commits(), 1);
    }

    #[test]
    fn test_get_heights_roundtrips_buffer() {
        let mut storage = terrain();
        storage.fill_with(|row, col| (row * 11 + col) as f32 / 121.0);
        let field = HeightfieldBuffer::from_storage(&storage);
        assert_eq!(field.get(3, 7), storage.normalized_height(3, 7));
    }

    #[test]
    fn test_height_reads_column_then_row() {
        let mut storage = terrain();
        storage.fill_with(|row, col| if row == 2 && col == 7 { 0.4 } else { 0.0 });
        assert!((storage.height(7, 2) - 4.0).abs() < 1e-6);
        assert_eq!(storage.height(2, 7), 0.0);
    }

    #[test]
    fn test_flat_terrain_has_zero_steepness() {
        let storage = terrain();
        assert_eq!(storage.steepness(0.5, 0.5), 0.0);
        assert_eq!(storage.steepness(0.0, 1.0), 0.0);
    }

    #[test]
    fn test_ramp_steepness_is_45_degrees() {
        // Rises one world unit per world unit along X.
        let mut storage = terrain();
        storage.fill_with(|_, col| col as f32 / 10.0);
        let slope = storage.steepness(0.5, 0.5);
        assert!((slope - 45.0).abs() < 1e-3, "slope {slope}");
    }

    #[test]
    fn test_set_alphamaps_copies_weights() {
        let mut storage = terrain();
        let mut splat = SplatBuffer::new(10, 10);
        splat.paint(4, 6, crate::SplatLayer::Rock);
        storage.set_alphamaps(0, 0, &splat);
        assert_eq!(storage.alphamaps(), &splat);
        assert_eq!(storage.alphamap_commits(), 1);
    }

    #[test]
    fn test_navigator_requires_bake() {
        let navigator = StraightLineNavigator::new();
        assert!(navigator.snap_to_surface(Vec3::ONE, 100.0).is_none());
        assert!(navigator.compute_path(Vec3::ZERO, Vec3::ONE).is_empty());
    }

    #[test]
    fn test_snap_projects_onto_baked_surface() {
        let mut storage = terrain();
        storage.fill_with(|_, _| 0.3);
        let mut navigator = StraightLineNavigator::new();
        navigator.bake(&storage).unwrap();

        let snapped = navigator.snap_to_surface(Vec3::new(4.0, 8.0, 6.0), 100.0).unwrap();
        assert!((snapped - Vec3::new(4.0, 3.0, 6.0)).length() < 1e-5);

        // Far outside the footprint and beyond the search radius.
        assert!(navigator.snap_to_surface(Vec3::new(500.0, 3.0, 5.0), 100.0).is_none());
    }

    #[test]
    fn test_bake_sees_only_committed_heights() {
        let mut storage = terrain();
        let mut navigator = StraightLineNavigator::new();
        navigator.bake(&storage).unwrap();

        storage.set_heights(0, 0, &HeightfieldBuffer::filled(11, 1.0));
        let stale = navigator.snap_to_surface(Vec3::new(5.0, 0.0, 5.0), 100.0).unwrap();
        assert_eq!(stale.y, 0.0);

        navigator.bake(&storage).unwrap();
        let fresh = navigator.snap_to_surface(Vec3::new(5.0, 0.0, 5.0), 100.0).unwrap();
        assert_eq!(fresh.y, 10.0);
        assert_eq!(navigator.bake_count(), 2);
    }

    #[test]
    fn test_bake_empty_terrain_fails() {
        let storage = InMemoryTerrain::new(0, (0, 0), Vec3::ZERO, Vec3::ONE);
        let mut navigator = StraightLineNavigator::new();
        assert!(matches!(
            navigator.bake(&storage),
            Err(NavigationError::EmptySurface)
        ));
        assert!(!navigator.is_baked());
    }
}
