/*
 * Renderer Module
 *
 * This module draws the network. The drawing functions target any
 * RenderSurface; DrawSurface adapts a nannou Draw to that contract and
 * `view` is the nannou view callback for the host window.
 */

use glam::DVec2;
use nannou::color::{srgba, Srgba};
use nannou::prelude::*;

use crate::app::Model;
use crate::color::Color;
use crate::connection::Connection;
use crate::params::ColorScheme;
use crate::particle::Particle;
use crate::surface::{RenderSurface, SurfaceSize};
use crate::ui;
use crate::viewport::Viewport;
use crate::BACKGROUND_COLOR;

// Particles brighter than this get a halo
pub const GLOW_THRESHOLD: f64 = 0.5;
// Halo radius as a multiple of particle size
pub const GLOW_RADIUS: f64 = 3.0;
// Halo alpha at the center per unit of activity
pub const GLOW_INTENSITY: f64 = 0.3;

pub fn draw_connection(
    surface: &mut dyn RenderSurface,
    connection: &Connection,
    a: &Particle,
    b: &Particle,
    colors: &ColorScheme,
) {
    if !connection.is_visible() {
        return;
    }
    surface.stroke_line(a.position, b.position, connection.width(), connection.color(colors));
}

pub fn draw_particle(surface: &mut dyn RenderSurface, particle: &Particle, colors: &ColorScheme) {
    let color = particle.color(colors);

    if particle.activity > GLOW_THRESHOLD {
        surface.fill_radial_gradient(
            particle.position,
            particle.size * GLOW_RADIUS,
            color.with_alpha(particle.activity * GLOW_INTENSITY),
            color.with_alpha(0.0),
        );
    }

    surface.fill_circle(particle.position, particle.size, color.with_alpha(particle.opacity));
}

// nannou has no gradient fill; a stack of translucent discs approximates it
const GRADIENT_RINGS: usize = 8;

pub struct DrawSurface<'a> {
    draw: &'a Draw,
    viewport: Viewport,
    clear_color: Color,
}

impl<'a> DrawSurface<'a> {
    pub fn new(draw: &'a Draw, viewport: Viewport, clear_color: Color) -> Self {
        Self {
            draw,
            viewport,
            clear_color,
        }
    }
}

fn to_srgba(color: Color) -> Srgba {
    let [r, g, b, a] = color.to_f32_array();
    srgba(r, g, b, a)
}

impl RenderSurface for DrawSurface<'_> {
    fn size(&self) -> SurfaceSize {
        self.viewport.size
    }

    fn clear(&mut self) {
        self.draw.background().color(to_srgba(self.clear_color));
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Color) {
        let p = self.viewport.to_screen(center);
        self.draw
            .ellipse()
            .xy(p)
            .radius(radius as f32)
            .color(to_srgba(color));
    }

    fn fill_radial_gradient(&mut self, center: DVec2, radius: f64, inner: Color, outer: Color) {
        let p = self.viewport.to_screen(center);
        // Outermost ring first; each inner ring adds its share of alpha
        for ring in 0..GRADIENT_RINGS {
            let t = ring as f64 / GRADIENT_RINGS as f64;
            let ring_radius = radius * (1.0 - t);
            let alpha = (outer.a + (inner.a - outer.a) * t) / GRADIENT_RINGS as f64;
            self.draw
                .ellipse()
                .xy(p)
                .radius(ring_radius as f32)
                .color(to_srgba(inner.with_alpha(alpha)));
        }
    }

    fn stroke_line(&mut self, from: DVec2, to: DVec2, width: f64, color: Color) {
        self.draw
            .line()
            .start(self.viewport.to_screen(from))
            .end(self.viewport.to_screen(to))
            .weight(width as f32)
            .color(to_srgba(color));
    }
}

// Render the model
pub fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    let window_rect = app.window_rect();

    let mut surface = DrawSurface::new(&draw, Viewport::from_rect(window_rect), BACKGROUND_COLOR);
    // The background may not draw at all (destroyed or failed); clear anyway
    surface.clear();
    model.background.render(&mut surface);

    if model.show_stats {
        ui::draw_stats_overlay(&draw, &model.stats, window_rect);
    }

    if let Err(e) = draw.to_frame(app, &frame) {
        log::error!("Failed to draw frame: {:?}", e);
    }

    if model.show_controls {
        if let Err(e) = model.egui.draw_to_frame(&frame) {
            log::error!("Failed to draw controls: {:?}", e);
        }
    }
}
