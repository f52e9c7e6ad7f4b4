//! Terrain debug visualization: 2D images of a generated terrain.
//!
//! Provides [`DebugImage`] plus renderers for the height grid and the
//! per-patch material map, and PNG export for inspecting runs offline.

mod image;
mod renderers;

pub use self::image::DebugImage;
pub use renderers::{
    export_debug_images, height_to_color, material_color, render_heightmap_debug,
    render_material_debug,
};
