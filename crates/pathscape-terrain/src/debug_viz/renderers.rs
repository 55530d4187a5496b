//! Renderers for heightfields and splat maps.

use super::image::DebugImage;
use crate::heightfield::HeightfieldBuffer;
use crate::host::TerrainStorage;
use crate::splat::{SplatBuffer, SplatLayer};

/// Map a height in `[0, 1]` to a color: water blue below `water_level`, then
/// green lowlands shading to brown slopes and pale peaks.
pub fn height_to_color(height: f32, water_level: f32) -> [u8; 3] {
    let h = height.clamp(0.0, 1.0);
    if height < water_level {
        // Darker the deeper.
        let depth = ((water_level - height) * 4.0).clamp(0.0, 1.0);
        return [20, (90.0 - depth * 50.0) as u8, (210.0 - depth * 90.0) as u8];
    }
    if h < 0.4 {
        let t = h / 0.4;
        [(40.0 + t * 70.0) as u8, (150.0 - t * 30.0) as u8, (40.0 + t * 10.0) as u8]
    } else if h < 0.75 {
        let t = (h - 0.4) / 0.35;
        [(110.0 + t * 40.0) as u8, (120.0 - t * 45.0) as u8, (50.0 + t * 20.0) as u8]
    } else {
        let base = 150.0 + (h - 0.75) / 0.25 * 105.0;
        [base as u8, base as u8, base as u8]
    }
}

/// Display color of a splat layer.
pub fn layer_color(layer: SplatLayer) -> [u8; 3] {
    match layer {
        SplatLayer::Grass => [70, 150, 50],
        SplatLayer::Dirt => [130, 90, 50],
        SplatLayer::Rock => [120, 120, 125],
        SplatLayer::Sand => [220, 200, 130],
    }
}

/// One pixel per heightfield cell, pixel `(x, y)` showing cell `(row = y, col = x)`.
///
/// Heights are stretched over the buffer's own min/max so low-relief terrain
/// stays visible. The water line is placed on the same stretched scale.
pub fn render_heightfield(heights: &HeightfieldBuffer, water_level: f32) -> DebugImage {
    let res = heights.resolution() as u32;
    let (min, max) = heights.min_max().unwrap_or((0.0, 1.0));
    let span = max - min;
    let normalize = |h: f32| if span > 0.0 { (h - min) / span } else { 0.5 };
    let water = normalize(water_level);
    DebugImage::from_fn(res, res, |x, y| {
        let h = heights.get(y as i64, x as i64).unwrap_or(min);
        height_to_color(normalize(h), water)
    })
}

/// Render the heights currently committed to a host storage.
pub fn render_storage_heights(storage: &dyn TerrainStorage, water_level: f32) -> DebugImage {
    render_heightfield(&HeightfieldBuffer::from_storage(storage), water_level)
}

/// Blend [`layer_color`]s by each cell's weights. Weights summing below one
/// darken the pixel.
pub fn render_splat(splat: &SplatBuffer) -> DebugImage {
    DebugImage::from_fn(splat.width() as u32, splat.height() as u32, |x, y| {
        let weights = splat.get(y as i64, x as i64).unwrap_or_default();
        let mut rgb = [0.0f32; 3];
        for layer in SplatLayer::ALL {
            let w = weights[layer.index()];
            for (channel, c) in rgb.iter_mut().zip(layer_color(layer)) {
                *channel += w * c as f32;
            }
        }
        rgb.map(|c| c.round().clamp(0.0, 255.0) as u8)
    })
}
