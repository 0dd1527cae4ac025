#![allow(dead_code)]

use glam::DVec2;
use particle_network::{Color, NetworkParams, ParticleField, RenderSurface, SurfaceSize};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear,
    Circle { center: DVec2, radius: f64, color: Color },
    Gradient { center: DVec2, radius: f64, inner: Color, outer: Color },
    Line { from: DVec2, to: DVec2, width: f64, color: Color },
}

// Surface that remembers every call, in order
pub struct RecordingSurface {
    pub size: SurfaceSize,
    pub ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            size: SurfaceSize::new(width, height),
            ops: Vec::new(),
        }
    }

    pub fn lines(&self) -> usize {
        self.ops.iter().filter(|op| matches!(op, DrawOp::Line { .. })).count()
    }

    pub fn circles(&self) -> usize {
        self.ops.iter().filter(|op| matches!(op, DrawOp::Circle { .. })).count()
    }
}

impl RenderSurface for RecordingSurface {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn clear(&mut self) {
        self.ops.push(DrawOp::Clear);
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Color) {
        self.ops.push(DrawOp::Circle { center, radius, color });
    }

    fn fill_radial_gradient(&mut self, center: DVec2, radius: f64, inner: Color, outer: Color) {
        self.ops.push(DrawOp::Gradient { center, radius, inner, outer });
    }

    fn stroke_line(&mut self, from: DVec2, to: DVec2, width: f64, color: Color) {
        self.ops.push(DrawOp::Line { from, to, width, color });
    }
}

pub fn params_with(count: usize, speed: f64) -> NetworkParams {
    NetworkParams {
        particle_count: count,
        particle_speed: speed,
        ..NetworkParams::default()
    }
}

pub fn seeded_field(width: f64, height: f64, params: NetworkParams, seed: u64) -> ParticleField {
    ParticleField::seeded(SurfaceSize::new(width, height), params, seed)
}

// Field whose particles sit still at the given positions
pub fn still_field(positions: &[DVec2]) -> ParticleField {
    let mut field = seeded_field(1000.0, 800.0, params_with(positions.len(), 0.0), 1);
    for (particle, &position) in field.particles_mut().iter_mut().zip(positions) {
        particle.position = position;
        particle.velocity = DVec2::ZERO;
    }
    field
}
