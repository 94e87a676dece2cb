use rayon::iter::{IntoParallelIterator, ParallelIterator};
use tracing::debug;

use crate::framebuffer::FrameBuffer;
use crate::raycast::{self, MarchSettings, RayHit, Viewport};
use crate::viewer::Viewer;
use crate::world::GridMap;

/// Hits closer than this are not projected.
pub const MIN_PERPENDICULAR: f32 = 1e-4;

#[inline]
pub fn pack_rgb(r: u8, g: u8, b: u8) -> u32 {
    // 0x00RRGGBB, the layout softbuffer presents
    (b as u32) | ((g as u32) << 8) | ((r as u32) << 16)
}

#[inline]
pub fn unpack_rgb(c: u32) -> [u8; 3] {
    [(c >> 16) as u8, (c >> 8) as u8, c as u8]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: u32,
    /// Slices whose hit lies on a cell edge
    pub boundary: u32,
    pub interior: u32,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: pack_rgb(255, 255, 255),
            boundary: pack_rgb(255, 255, 255),
            interior: pack_rgb(0, 0, 0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RenderSettings {
    pub march: MarchSettings,
    pub palette: Palette,
}

/// One column's wall strip in screen space. `top` may be negative and
/// `top + height` may exceed the image; the compositor clips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slice {
    pub column: usize,
    pub top: i64,
    pub height: i64,
    pub color: u32,
}

/// Projected height for a perpendicular distance, or `None` when the
/// distance is too small to project.
#[inline]
pub fn column_height(perpendicular_distance: f32, image_height: usize) -> Option<f32> {
    if !(perpendicular_distance > MIN_PERPENDICULAR) {
        return None;
    }
    Some(image_height as f32 / perpendicular_distance)
}

pub fn project(hit: &RayHit, image_height: usize, palette: &Palette) -> Option<Slice> {
    let h = column_height(hit.perpendicular_distance, image_height)?;
    let top = image_height as f32 / 2.0 - h / 2.0;
    let color = if hit.is_cell_boundary {
        palette.boundary
    } else {
        palette.interior
    };
    Some(Slice {
        column: hit.column,
        top: top as i64,
        height: h as i64,
        color,
    })
}

/// Cast every column and project the hits. Columns are independent, so
/// they are cast in parallel; the result is ordered by column.
pub fn render(
    viewer: &Viewer,
    map: &GridMap,
    viewport: Viewport,
    settings: &RenderSettings,
) -> Vec<Slice> {
    (0..viewport.width)
        .into_par_iter()
        .filter_map(|column| {
            let hit = raycast::cast(viewer, map, column, viewport, &settings.march)?;
            project(&hit, viewport.height, &settings.palette)
        })
        .collect()
}

pub fn render_frame(buf: &mut FrameBuffer, viewer: &Viewer, map: &GridMap, settings: &RenderSettings) {
    let viewport = Viewport {
        width: buf.width(),
        height: buf.height(),
    };

    // Clear background
    buf.fill(settings.palette.background);

    let slices = render(viewer, map, viewport, settings);
    for slice in &slices {
        buf.vline(slice.column, slice.top, slice.height, slice.color);
    }

    debug!(
        columns = viewport.width,
        drawn = slices.len(),
        "frame rendered"
    );
}
