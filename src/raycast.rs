//! Per-column ray marching against the occupancy grid.
//!
//! Each screen column gets one ray. The ray is sampled at fixed range
//! increments until a sample lands outside open space or the range bound
//! is reached.

use serde::{Deserialize, Serialize};

use crate::viewer::Viewer;
use crate::world::GridMap;

pub const DEFAULT_STEP: f32 = 0.05;
pub const DEFAULT_MAX_RANGE: f32 = 20.0;

/// How a wall hit is classified as lying on a cell edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryRule {
    /// Hit point mapped to pixels; on an edge when either pixel coordinate
    /// is a multiple of the cell's pixel size.
    #[default]
    HitPoint,
    /// Screen column is a multiple of the cell pixel width. Produces fixed
    /// vertical seams regardless of what was hit.
    ScreenColumn,
}

/// Output image dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: usize,
    pub height: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarchSettings {
    pub step: f32,
    pub max_range: f32,
    pub boundary_rule: BoundaryRule,
}

impl Default for MarchSettings {
    fn default() -> Self {
        Self {
            step: DEFAULT_STEP,
            max_range: DEFAULT_MAX_RANGE,
            boundary_rule: BoundaryRule::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub x: f32,
    pub y: f32,
    pub angle: f32,
    pub max_range: f32,
}

impl Ray {
    #[inline]
    pub fn point_at(&self, range: f32) -> (f32, f32) {
        (
            self.x + range * self.angle.cos(),
            self.y + range * self.angle.sin(),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub column: usize,
    pub angle: f32,
    /// Range marched along the ray
    pub distance: f32,
    /// Range projected onto the heading axis
    pub perpendicular_distance: f32,
    pub is_cell_boundary: bool,
}

/// Ray angle for a column, interpolated linearly across the field of
/// vision with column 0 at the left edge.
#[inline]
pub fn column_angle(viewer: &Viewer, column: usize, image_width: usize) -> f32 {
    let left = viewer.heading() - viewer.fov() / 2.0;
    left + viewer.fov() * (column as f32 / image_width as f32)
}

/// Cast the ray for one screen column. `None` means nothing was hit within
/// range, or the ray runs perpendicular to the heading.
pub fn cast(
    viewer: &Viewer,
    map: &GridMap,
    column: usize,
    viewport: Viewport,
    settings: &MarchSettings,
) -> Option<RayHit> {
    let angle = column_angle(viewer, column, viewport.width);
    cast_ray(viewer, map, angle, column, viewport, settings)
}

/// Cast a ray at an explicit angle from the viewer's position.
pub fn cast_ray(
    viewer: &Viewer,
    map: &GridMap,
    angle: f32,
    column: usize,
    viewport: Viewport,
    settings: &MarchSettings,
) -> Option<RayHit> {
    let offset = (angle - viewer.heading()).cos();
    if offset.abs() <= f32::EPSILON {
        return None;
    }

    let ray = Ray {
        x: viewer.x(),
        y: viewer.y(),
        angle,
        max_range: settings.max_range,
    };
    let distance = march(&ray, map, settings.step)?;
    let (hx, hy) = ray.point_at(distance);

    Some(RayHit {
        column,
        angle,
        distance,
        perpendicular_distance: distance * offset,
        is_cell_boundary: is_cell_boundary(settings.boundary_rule, hx, hy, column, map, viewport),
    })
}

/// Range of the first sample that is not open, if any below `max_range`.
pub fn march(ray: &Ray, map: &GridMap, step: f32) -> Option<f32> {
    if !(step > 0.0) {
        return None;
    }
    // Multiply instead of accumulating so samples do not drift.
    let steps = (ray.max_range / step).ceil() as u32;
    (0..steps).map(|i| i as f32 * step).find(|&range| {
        let (px, py) = ray.point_at(range);
        !map.is_open_at(px, py)
    })
}

fn is_cell_boundary(
    rule: BoundaryRule,
    hit_x: f32,
    hit_y: f32,
    column: usize,
    map: &GridMap,
    viewport: Viewport,
) -> bool {
    let (cell_w, cell_h) = map.cell_size_px(viewport.width, viewport.height);
    match rule {
        BoundaryRule::HitPoint => {
            let cw = (cell_w as i64).max(1);
            let ch = (cell_h as i64).max(1);
            let pix_x = (hit_x * cell_w) as i64;
            let pix_y = (hit_y * cell_h) as i64;
            pix_x.rem_euclid(cw) == 0 || pix_y.rem_euclid(ch) == 0
        }
        BoundaryRule::ScreenColumn => column as f32 % cell_w == 0.0,
    }
}
