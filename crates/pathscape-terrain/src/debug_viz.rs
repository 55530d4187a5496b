//! Debug images of generated terrain data.
//!
//! Renders a [`HeightfieldBuffer`](crate::HeightfieldBuffer) or
//! [`SplatBuffer`](crate::SplatBuffer) into an RGBA [`DebugImage`] that can be
//! written out as PNG for inspection.

mod image;
mod renderers;

pub use self::image::{DebugImage, ExportError};
pub use renderers::{
    height_to_color, layer_color, render_heightfield, render_splat, render_storage_heights,
};
