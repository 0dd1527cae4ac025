/*
 * Viewport Module
 *
 * The simulation works in surface pixels: origin top-left, y down. nannou
 * draws with the origin at the window center and y up. Viewport converts
 * between the two for a window of a given size.
 */

use glam::DVec2;
use nannou::prelude::*;

use crate::surface::SurfaceSize;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub size: SurfaceSize,
}

impl Viewport {
    pub fn new(size: SurfaceSize) -> Self {
        Self { size }
    }

    pub fn from_rect(rect: Rect) -> Self {
        Self::new(SurfaceSize::new(rect.w() as f64, rect.h() as f64))
    }

    // Convert a point from surface space to window space
    pub fn to_screen(&self, point: DVec2) -> Point2 {
        pt2(
            (point.x - self.size.width / 2.0) as f32,
            (self.size.height / 2.0 - point.y) as f32,
        )
    }

    // Convert a point from window space to surface space
    pub fn from_screen(&self, point: Point2) -> DVec2 {
        DVec2::new(
            point.x as f64 + self.size.width / 2.0,
            self.size.height / 2.0 - point.y as f64,
        )
    }
}
