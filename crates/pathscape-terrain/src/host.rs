//! Boundary traits for the host engine's terrain storage and navigation service.
//!
//! The generation pipeline never owns terrain data or a pathfinder itself. It pulls
//! committed state through [`TerrainStorage`], pushes regenerated buffers back through
//! it, and asks a [`Navigator`] to route between waypoints.

use glam::Vec3;

use crate::heightfield::HeightfieldBuffer;
use crate::splat::SplatBuffer;

/// Errors a navigation collaborator can report while baking its surface.
#[derive(Debug, thiserror::Error)]
pub enum NavigationError {
    /// The collaborator could not build a navigable surface.
    #[error("navigable surface bake failed: {0}")]
    BakeFailed(String),

    /// The terrain has no cells to bake from.
    #[error("terrain has no walkable area")]
    EmptySurface,
}

/// Source of, and sink for, the committed heightfield and splat map.
///
/// Grid conventions: the heightfield's first index is the row (world Z) and the
/// second the column (world X). Splat maps use the same `(row, col)` order.
pub trait TerrainStorage {
    /// Side length of the square heightfield grid.
    fn heightmap_resolution(&self) -> usize;

    /// Read a `width * height` block of committed heights, row-major from `(x0, y0)`.
    fn get_heights(&self, x0: usize, y0: usize, width: usize, height: usize) -> Vec<f32>;

    /// Commit a regenerated heightfield with its corner at `(x0, y0)`.
    fn set_heights(&mut self, x0: usize, y0: usize, heights: &HeightfieldBuffer);

    /// `(width, height)` of the splat map, independent of the heightfield resolution.
    fn alphamap_dimensions(&self) -> (usize, usize);

    /// Commit a regenerated splat map with its corner at `(x0, y0)`.
    fn set_alphamaps(&mut self, x0: usize, y0: usize, splat: &SplatBuffer);

    /// Surface slope in degrees at normalized coordinates (`x` along world X, `y` along world Z).
    fn steepness(&self, norm_x: f32, norm_y: f32) -> f32;

    /// World-space elevation of the committed heightfield at column `x`, row `y`.
    fn height(&self, x: usize, y: usize) -> f32;

    /// World-space position of the terrain's minimum corner.
    fn origin(&self) -> Vec3;

    /// World-space extent of the terrain (`y` is the maximum height).
    fn size(&self) -> Vec3;
}

/// Pathfinding over a baked navigable surface.
pub trait Navigator {
    /// Rebuild the navigable surface from the storage's committed data. Blocking.
    fn bake(&mut self, terrain: &dyn TerrainStorage) -> Result<(), NavigationError>;

    /// Project `point` onto the nearest navigable location within `search_radius`.
    fn snap_to_surface(&self, point: Vec3, search_radius: f32) -> Option<Vec3>;

    /// Ordered corner list from `from` to `to`. Empty when no route exists.
    fn compute_path(&self, from: Vec3, to: Vec3) -> Vec<Vec3>;
}
