//! Owned square height grid with bounds-checked access.

use crate::host::TerrainStorage;

/// A square grid of elevations, `resolution * resolution` cells, row-major.
///
/// Coordinates are signed so brush offsets can be applied directly; any write
/// outside `[0, resolution)` on either axis is skipped rather than wrapped.
#[derive(Clone, Debug, PartialEq)]
pub struct HeightfieldBuffer {
    resolution: usize,
    heights: Vec<f32>,
}

impl HeightfieldBuffer {
    /// Create a flat (all-zero) grid.
    pub fn new(resolution: usize) -> Self {
        Self {
            resolution,
            heights: vec![0.0; resolution * resolution],
        }
    }

    /// Create a grid with every cell set to `height`.
    pub fn filled(resolution: usize, height: f32) -> Self {
        Self {
            resolution,
            heights: vec![height; resolution * resolution],
        }
    }

    /// Initialize from the storage's committed heightfield.
    ///
    /// A short read from the storage is padded with zeros.
    pub fn from_storage(storage: &dyn TerrainStorage) -> Self {
        let resolution = storage.heightmap_resolution();
        let mut heights = storage.get_heights(0, 0, resolution, resolution);
        heights.resize(resolution * resolution, 0.0);
        Self {
            resolution,
            heights,
        }
    }

    /// Side length of the grid.
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    fn index(&self, x: i64, y: i64) -> Option<usize> {
        let res = self.resolution as i64;
        if (0..res).contains(&x) && (0..res).contains(&y) {
            Some((x * res + y) as usize)
        } else {
            None
        }
    }

    /// Height at `(x, y)`, or `None` when out of range.
    pub fn get(&self, x: i64, y: i64) -> Option<f32> {
        self.index(x, y).map(|i| self.heights[i])
    }

    /// Overwrite the height at `(x, y)`. Returns `false` (and writes nothing) when out of range.
    pub fn set(&mut self, x: i64, y: i64, height: f32) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.heights[i] = height;
                true
            }
            None => false,
        }
    }

    /// Add `delta` to the height at `(x, y)`. Returns `false` when out of range.
    pub fn add(&mut self, x: i64, y: i64, delta: f32) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.heights[i] += delta;
                true
            }
            None => false,
        }
    }

    /// Visit every cell as `(x, y, &mut height)`, `x` outermost.
    pub fn for_each_mut(&mut self, mut f: impl FnMut(usize, usize, &mut f32)) {
        let res = self.resolution;
        for (i, h) in self.heights.iter_mut().enumerate() {
            f(i / res, i % res, h);
        }
    }

    /// Row-major view of all heights.
    pub fn as_slice(&self) -> &[f32] {
        &self.heights
    }

    /// `(min, max)` over all cells, or `None` for an empty grid.
    pub fn min_max(&self) -> Option<(f32, f32)> {
        self.heights.iter().fold(None, |acc, &h| match acc {
            None => Some((h, h)),
            Some((lo, hi)) => Some((lo.min(h), hi.max(h))),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_writes_are_skipped() {
        let mut field = HeightfieldBuffer::new(4);
        assert!(!field.set(-1, 0, 1.0));
        assert!(!field.set(0, 4, 1.0));
        assert!(!field.add(4, 4, 1.0));
        assert!(field.as_slice().iter().all(|&h| h == 0.0));
    }

    #[test]
    fn test_no_wraparound_at_row_end() {
        let mut field = HeightfieldBuffer::new(3);
        // (0, 3) would alias (1, 0) in a naive flat index.
        assert!(!field.set(0, 3, 5.0));
        assert_eq!(field.get(1, 0), Some(0.0));
    }

    #[test]
    fn test_add_accumulates() {
        let mut field = HeightfieldBuffer::filled(2, 0.5);
        assert!(field.add(1, 1, -0.25));
        assert!(field.add(1, 1, -0.25));
        assert_eq!(field.get(1, 1), Some(0.0));
        assert_eq!(field.get(0, 0), Some(0.5));
    }

    #[test]
    fn test_for_each_mut_visits_x_major() {
        let mut field = HeightfieldBuffer::new(3);
        field.for_each_mut(|x, y, h| *h = (x * 10 + y) as f32);
        assert_eq!(field.get(2, 1), Some(21.0));
        assert_eq!(field.get(0, 2), Some(2.0));
    }

    #[test]
    fn test_min_max() {
        let mut field = HeightfieldBuffer::new(2);
        field.set(0, 1, -3.0);
        field.set(1, 0, 7.0);
        assert_eq!(field.min_max(), Some((-3.0, 7.0)));
        assert_eq!(HeightfieldBuffer::new(0).min_max(), None);
    }
}
