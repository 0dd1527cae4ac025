/*
 * Particle Field Module
 *
 * ParticleField owns the particle population, the connection graph and the
 * animation loop. A frame is: update every particle, rebuild the connection
 * graph, then clear the surface and draw connections under particles.
 *
 * Pointer state and surface bounds are passed in explicitly, so the field
 * can be driven headless in tests.
 */

use glam::DVec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::animation::{AnimationLoop, CancellationToken};
use crate::connection::{Connection, ConnectionGraph};
use crate::error::BackgroundError;
use crate::params::NetworkParams;
use crate::particle::Particle;
use crate::pointer::PointerState;
use crate::renderer;
use crate::stats::FrameStats;
use crate::surface::{RenderSurface, SurfaceSize};

// Particles stranded outside the surface after a resize are pulled back
// this far inside the new edge
pub const RESIZE_INSET: f64 = 50.0;

pub struct ParticleField {
    params: NetworkParams,
    bounds: SurfaceSize,
    particles: Vec<Particle>,
    graph: ConnectionGraph,
    animation: AnimationLoop,
    rng: StdRng,
}

impl ParticleField {
    // Build a field for the host's surface. No surface, no field.
    pub fn create(
        surface: Option<SurfaceSize>,
        params: NetworkParams,
    ) -> Result<Self, BackgroundError> {
        let bounds = surface.ok_or(BackgroundError::SurfaceMissing)?;
        if bounds.is_empty() {
            // Still usable: particles gather at the origin until a resize
            log::warn!(
                "Particle field surface is empty ({:.0}x{:.0})",
                bounds.width,
                bounds.height
            );
        }
        Ok(Self::with_rng(bounds, params, StdRng::from_entropy()))
    }

    pub fn with_rng(bounds: SurfaceSize, params: NetworkParams, rng: StdRng) -> Self {
        let mut field = Self {
            params,
            bounds,
            particles: Vec::new(),
            graph: ConnectionGraph::new(),
            animation: AnimationLoop::new(),
            rng,
        };
        field.initialize();
        field
    }

    pub fn seeded(bounds: SurfaceSize, params: NetworkParams, seed: u64) -> Self {
        Self::with_rng(bounds, params, StdRng::seed_from_u64(seed))
    }

    // Discard the population and scatter a fresh one over the surface
    pub fn initialize(&mut self) {
        let count = self.params.particle_count;
        let bounds = self.bounds;

        self.graph.clear();
        self.particles = Vec::with_capacity(count);
        for _ in 0..count {
            let position = DVec2::new(
                self.rng.gen::<f64>() * bounds.width,
                self.rng.gen::<f64>() * bounds.height,
            );
            self.particles.push(Particle::new(position, &self.params, &mut self.rng));
        }

        log::info!(
            "Particle field initialized: {} particles on {:.0}x{:.0}",
            count,
            bounds.width,
            bounds.height
        );
    }

    // New parameters mean a new population
    pub fn reconfigure(&mut self, params: NetworkParams) {
        self.params = params;
        self.initialize();
    }

    pub fn resize(&mut self, size: SurfaceSize) {
        self.bounds = size;

        for particle in &mut self.particles {
            if particle.position.x > size.width {
                particle.position.x = (size.width - RESIZE_INSET).max(0.0);
            }
            if particle.position.y > size.height {
                particle.position.y = (size.height - RESIZE_INSET).max(0.0);
            }
        }

        log::debug!("Particle field resized to {:.0}x{:.0}", size.width, size.height);
    }

    // Advance physics and rebuild the connection graph
    pub fn step(&mut self, pointer: &PointerState) {
        advance(
            &mut self.particles,
            &mut self.graph,
            &self.params,
            self.bounds,
            &mut self.rng,
            pointer,
        );
    }

    // Call after step within the same frame
    pub fn render(&self, surface: &mut dyn RenderSurface) {
        surface.clear();

        for connection in self.graph.connections() {
            let a = &self.particles[connection.key.low()];
            let b = &self.particles[connection.key.high()];
            renderer::draw_connection(surface, connection, a, b, &self.params.colors);
        }

        for particle in &self.particles {
            renderer::draw_particle(surface, particle, &self.params.colors);
        }
    }

    // Host update hook: one step, unless destroyed
    pub fn tick(&mut self, pointer: &PointerState) -> bool {
        let Self { animation, particles, graph, params, bounds, rng } = self;
        animation.run_frame(|| advance(particles, graph, params, *bounds, rng, pointer))
    }

    // Host view hook: draw, unless destroyed
    pub fn draw(&self, surface: &mut dyn RenderSurface) -> bool {
        if !self.animation.is_running() {
            return false;
        }
        self.render(surface);
        true
    }

    // Step and render in one pass
    pub fn frame(&mut self, pointer: &PointerState, surface: &mut dyn RenderSurface) -> bool {
        if !self.tick(pointer) {
            return false;
        }
        self.render(surface);
        true
    }

    // Stops the loop; no further step or render passes run
    pub fn destroy(&mut self) {
        if self.animation.is_running() {
            log::info!("Particle field destroyed after {} frames", self.animation.frames());
        }
        self.animation.cancel();
    }

    pub fn is_running(&self) -> bool {
        self.animation.is_running()
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.animation.token()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    // Particles can be moved or retuned, but the count only changes by
    // reconfiguring
    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn connections(&self) -> &[Connection] {
        self.graph.connections()
    }

    pub fn graph(&self) -> &ConnectionGraph {
        &self.graph
    }

    pub fn params(&self) -> &NetworkParams {
        &self.params
    }

    pub fn bounds(&self) -> SurfaceSize {
        self.bounds
    }

    pub fn stats(&self) -> FrameStats {
        let frame_time = self.animation.frame_time();
        FrameStats {
            fps: FrameStats::fps_from(frame_time),
            frame_time,
            frames: self.animation.frames(),
            particles: self.particles.len(),
            connections: self.graph.len(),
            visible_connections: self.graph.connections().iter().filter(|c| c.is_visible()).count(),
            tracked_pairs: self.graph.tracked_pairs(),
        }
    }
}

fn advance(
    particles: &mut [Particle],
    graph: &mut ConnectionGraph,
    params: &NetworkParams,
    bounds: SurfaceSize,
    rng: &mut StdRng,
    pointer: &PointerState,
) {
    for particle in particles.iter_mut() {
        particle.update(pointer, bounds, params, rng);
    }
    graph.rebuild(particles, pointer, params);
}
