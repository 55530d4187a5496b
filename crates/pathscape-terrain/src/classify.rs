//! Slope and height driven texture classification.

use crate::host::TerrainStorage;
use crate::params::GenerationParameters;
use crate::splat::{SplatBuffer, SplatLayer};

/// Assigns each splat cell a single texture layer.
///
/// Reads the storage's committed surface, not the heightfield being built in the
/// same pass. Never emits [`SplatLayer::Dirt`]; that layer belongs to path painting.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextureClassifier {
    /// Degrees.
    pub max_slope: f32,
    pub water_level: f32,
}

impl TextureClassifier {
    pub fn new(max_slope: f32, water_level: f32) -> Self {
        Self {
            max_slope,
            water_level,
        }
    }

    pub fn from_params(params: &GenerationParameters) -> Self {
        Self::new(params.max_slope, params.water_level)
    }

    /// Layer for a cell with the given steepness (degrees) and elevation.
    ///
    /// Water overrides slope: anything below the water level is sand.
    pub fn classify_cell(&self, steepness: f32, height: f32) -> SplatLayer {
        if height < self.water_level {
            SplatLayer::Sand
        } else if steepness > self.max_slope {
            SplatLayer::Rock
        } else {
            SplatLayer::Grass
        }
    }

    /// Write a one-hot vector into every cell of `splat`.
    pub fn classify(&self, storage: &dyn TerrainStorage, splat: &mut SplatBuffer) {
        let (width, height) = (splat.width(), splat.height());
        for x in 0..width {
            for y in 0..height {
                let norm_x = x as f32 / width as f32;
                let norm_y = y as f32 / height as f32;
                let steepness = storage.steepness(norm_x, norm_y);
                let elevation = storage.height(x, y);
                let layer = self.classify_cell(steepness, elevation);
                splat.paint(y as i64, x as i64, layer);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryTerrain;
    use glam::Vec3;

    #[test]
    fn test_steep_cells_are_rock() {
        let classifier = TextureClassifier::new(40.0, 0.0);
        assert_eq!(classifier.classify_cell(41.0, 10.0), SplatLayer::Rock);
        assert_eq!(classifier.classify_cell(40.0, 10.0), SplatLayer::Grass);
        assert_eq!(classifier.classify_cell(5.0, 10.0), SplatLayer::Grass);
    }

    #[test]
    fn test_water_overrides_slope() {
        let classifier = TextureClassifier::new(40.0, 20.0);
        assert_eq!(classifier.classify_cell(80.0, 5.0), SplatLayer::Sand);
        assert_eq!(classifier.classify_cell(0.0, 19.9), SplatLayer::Sand);
        assert_eq!(classifier.classify_cell(80.0, 20.0), SplatLayer::Rock);
    }

    #[test]
    fn test_every_cell_is_one_hot() {
        // A ramp along world X produces a mix of grass, rock and sand.
        let mut terrain = InMemoryTerrain::new(33, (33, 33), Vec3::ZERO, Vec3::new(32.0, 64.0, 32.0));
        terrain.fill_with(|_, col| if col < 8 { 0.0 } else { (col as f32 - 8.0) / 24.0 });

        let classifier = TextureClassifier::new(45.0, 1.0);
        let mut splat = SplatBuffer::new(33, 33);
        classifier.classify(&terrain, &mut splat);

        let mut seen = [false; SplatLayer::COUNT];
        for cell in splat.as_slice() {
            let ones = cell.iter().filter(|&&w| w == 1.0).count();
            let zeros = cell.iter().filter(|&&w| w == 0.0).count();
            assert_eq!((ones, zeros), (1, 3), "cell {cell:?} is not one-hot");
            let layer = cell.iter().position(|&w| w == 1.0).unwrap();
            seen[layer] = true;
        }
        assert!(seen[SplatLayer::Grass.index()] || seen[SplatLayer::Rock.index()]);
        assert!(seen[SplatLayer::Sand.index()]);
        assert!(!seen[SplatLayer::Dirt.index()]);
    }

    #[test]
    fn test_splat_sized_independently_of_heightfield() {
        let terrain = InMemoryTerrain::new(17, (8, 4), Vec3::ZERO, Vec3::splat(16.0));
        let classifier = TextureClassifier::new(40.0, -1.0);
        let mut splat = SplatBuffer::new(8, 4);
        classifier.classify(&terrain, &mut splat);
        assert!(splat.as_slice().iter().all(|c| *c == SplatLayer::Grass.one_hot()));
    }
}
