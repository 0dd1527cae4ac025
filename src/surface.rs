/*
 * Render Surface Module
 *
 * The drawing contract the particle field needs from its host. Coordinates
 * are surface pixels with the origin in the top-left corner and y growing
 * downwards, matching the size reported by the surface.
 */

use glam::DVec2;

use crate::color::Color;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSize {
    pub width: f64,
    pub height: f64,
}

impl SurfaceSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    pub fn contains(&self, point: DVec2) -> bool {
        (0.0..=self.width).contains(&point.x) && (0.0..=self.height).contains(&point.y)
    }
}

pub trait RenderSurface {
    fn size(&self) -> SurfaceSize;

    // Erase everything drawn in the previous frame
    fn clear(&mut self);

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Color);

    // Disc whose color fades from `inner` at the center to `outer` at `radius`
    fn fill_radial_gradient(&mut self, center: DVec2, radius: f64, inner: Color, outer: Color);

    fn stroke_line(&mut self, from: DVec2, to: DVec2, width: f64, color: Color);
}
