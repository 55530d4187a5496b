//! RGBA pixel buffer with PNG export.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

/// Failure writing a [`DebugImage`] to disk.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to create image file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode PNG: {0}")]
    Encode(#[from] png::EncodingError),
    #[error("image has no pixels")]
    Empty,
}

/// Row-major RGBA8 image. Row 0 is the top of the picture.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DebugImage {
    pub width: u32,
    pub height: u32,
    /// `width * height * 4` bytes.
    pub pixels: Vec<u8>,
}

impl DebugImage {
    /// Opaque black image.
    pub fn new(width: u32, height: u32) -> Self {
        let mut pixels = vec![0; width as usize * height as usize * 4];
        pixels.chunks_exact_mut(4).for_each(|px| px[3] = 255);
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Build an image by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> [u8; 3]) -> Self {
        let mut image = Self::new(width, height);
        for y in 0..height {
            for x in 0..width {
                image.set_pixel(x, y, f(x, y));
            }
        }
        image
    }

    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| (y as usize * self.width as usize + x as usize) * 4)
    }

    /// Set an opaque pixel. Out-of-bounds coordinates are ignored.
    pub fn set_pixel(&mut self, x: u32, y: u32, rgb: [u8; 3]) {
        if let Some(i) = self.offset(x, y) {
            self.pixels[i..i + 3].copy_from_slice(&rgb);
            self.pixels[i + 3] = 255;
        }
    }

    pub fn get_pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let i = self.offset(x, y)?;
        let mut px = [0; 4];
        px.copy_from_slice(&self.pixels[i..i + 4]);
        Some(px)
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of distinct RGB values.
    pub fn unique_color_count(&self) -> usize {
        let mut colors = std::collections::HashSet::new();
        for chunk in self.pixels.chunks_exact(4) {
            colors.insert((chunk[0], chunk[1], chunk[2]));
        }
        colors.len()
    }

    /// Encode as an 8-bit RGBA PNG into `out`.
    pub fn write_png<W: Write>(&self, out: W) -> Result<(), ExportError> {
        if self.width == 0 || self.height == 0 {
            return Err(ExportError::Empty);
        }
        let mut encoder = png::Encoder::new(out, self.width, self.height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&self.pixels)?;
        writer.finish()?;
        Ok(())
    }

    /// Write the image as a PNG file, replacing any existing file.
    pub fn save_png(&self, path: &Path) -> Result<(), ExportError> {
        let file = File::create(path).map_err(|source| ExportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.write_png(BufWriter::new(file))?;
        debug!(
            path = %path.display(),
            width = self.width,
            height = self.height,
            "wrote debug image"
        );
        Ok(())
    }
}
