//! Four-layer texture weight grid.

/// Texture classes painted into the splat map, in layer order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SplatLayer {
    Grass = 0,
    Dirt = 1,
    Rock = 2,
    Sand = 3,
}

impl SplatLayer {
    /// Number of layers per cell.
    pub const COUNT: usize = 4;

    /// All layers in storage order.
    pub const ALL: [SplatLayer; Self::COUNT] = [
        SplatLayer::Grass,
        SplatLayer::Dirt,
        SplatLayer::Rock,
        SplatLayer::Sand,
    ];

    /// Index of this layer within a cell's weight vector.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Weight vector with this layer at 1 and all others at 0.
    pub fn one_hot(self) -> [f32; SplatLayer::COUNT] {
        let mut weights = [0.0; SplatLayer::COUNT];
        weights[self.index()] = 1.0;
        weights
    }
}

/// Per-cell texture weights, `height` rows by `width` columns.
///
/// Like [`crate::HeightfieldBuffer`], accessors take signed `(row, col)` and
/// skip anything out of range.
#[derive(Clone, Debug, PartialEq)]
pub struct SplatBuffer {
    width: usize,
    height: usize,
    weights: Vec<[f32; SplatLayer::COUNT]>,
}

impl SplatBuffer {
    /// Create a grid with all weights zero.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            weights: vec![[0.0; SplatLayer::COUNT]; width * height],
        }
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, row: i64, col: i64) -> Option<usize> {
        if (0..self.height as i64).contains(&row) && (0..self.width as i64).contains(&col) {
            Some(row as usize * self.width + col as usize)
        } else {
            None
        }
    }

    /// All four weights at `(row, col)`.
    pub fn get(&self, row: i64, col: i64) -> Option<[f32; SplatLayer::COUNT]> {
        self.index(row, col).map(|i| self.weights[i])
    }

    /// A single layer's weight at `(row, col)`.
    pub fn weight(&self, row: i64, col: i64, layer: SplatLayer) -> Option<f32> {
        self.get(row, col).map(|w| w[layer.index()])
    }

    /// Overwrite all weights at `(row, col)`. Returns `false` when out of range.
    pub fn set(&mut self, row: i64, col: i64, weights: [f32; SplatLayer::COUNT]) -> bool {
        match self.index(row, col) {
            Some(i) => {
                self.weights[i] = weights;
                true
            }
            None => false,
        }
    }

    /// Paint `(row, col)` entirely with `layer`.
    pub fn paint(&mut self, row: i64, col: i64, layer: SplatLayer) -> bool {
        self.set(row, col, layer.one_hot())
    }

    /// Row-major view of all cells.
    pub fn as_slice(&self) -> &[[f32; SplatLayer::COUNT]] {
        &self.weights
    }
}
