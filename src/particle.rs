/*
 * Particle Module
 *
 * This module defines the Particle struct: a drifting point whose size and
 * opacity swell while the pointer is near. Visual state is split into a
 * current value and a target value; the physics step eases one toward the
 * other so pointer forcing never makes a particle pop.
 */

use glam::DVec2;
use rand::Rng;

use crate::color::Color;
use crate::params::{ColorScheme, NetworkParams};
use crate::physics;
use crate::pointer::PointerState;
use crate::surface::SurfaceSize;

// Resting opacity; pointer activity raises it toward 1.0
pub const BASE_OPACITY: f64 = 0.8;
// Share of particles drawn with the alternate color
pub const ALTERNATE_COLOR_PROBABILITY: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorVariant {
    Primary,
    Alternate,
}

#[derive(Debug, Clone)]
pub struct Particle {
    pub position: DVec2,
    pub velocity: DVec2,
    pub size: f64,
    pub target_size: f64,
    pub opacity: f64,
    pub target_opacity: f64,
    pub activity: f64,
    pub variant: ColorVariant,
    base_size: f64,
}

impl Particle {
    pub fn new<R: Rng + ?Sized>(position: DVec2, params: &NetworkParams, rng: &mut R) -> Self {
        // Each velocity component uniform in [-speed/2, speed/2]
        let speed = params.particle_speed;
        let velocity = DVec2::new(
            (rng.gen::<f64>() - 0.5) * speed,
            (rng.gen::<f64>() - 0.5) * speed,
        );

        let range = params.particle_size;
        let size = rng.gen::<f64>() * (range.max - range.min) + range.min;

        let variant = if rng.gen_bool(ALTERNATE_COLOR_PROBABILITY) {
            ColorVariant::Alternate
        } else {
            ColorVariant::Primary
        };

        Self::with_state(position, velocity, size, variant)
    }

    // Particle at rest on its baseline visuals
    pub fn with_state(
        position: DVec2,
        velocity: DVec2,
        base_size: f64,
        variant: ColorVariant,
    ) -> Self {
        Self {
            position,
            velocity,
            size: base_size,
            target_size: base_size,
            opacity: BASE_OPACITY,
            target_opacity: BASE_OPACITY,
            activity: 0.0,
            variant,
            base_size,
        }
    }

    pub fn base_size(&self) -> f64 {
        self.base_size
    }

    pub fn color(&self, colors: &ColorScheme) -> Color {
        match self.variant {
            ColorVariant::Primary => colors.particle,
            ColorVariant::Alternate => colors.particle_alt,
        }
    }

    // Advance this particle by one frame
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        pointer: &PointerState,
        bounds: SurfaceSize,
        params: &NetworkParams,
        rng: &mut R,
    ) {
        physics::step_particle(self, pointer, bounds, params, rng);
    }

    pub fn distance(&self, other: &Particle) -> f64 {
        self.position.distance(other.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn construction_respects_configuration() {
        let params = NetworkParams::default();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..500 {
            let particle = Particle::new(DVec2::new(5.0, 5.0), &params, &mut rng);
            let half = params.particle_speed / 2.0;
            assert!(particle.velocity.x.abs() <= half);
            assert!(particle.velocity.y.abs() <= half);
            assert!(particle.base_size() >= params.particle_size.min);
            assert!(particle.base_size() <= params.particle_size.max);
            assert_eq!(particle.size, particle.base_size());
            assert_eq!(particle.opacity, BASE_OPACITY);
            assert_eq!(particle.activity, 0.0);
        }
    }

    #[test]
    fn roughly_a_fifth_use_the_alternate_color() {
        let params = NetworkParams::default();
        let mut rng = StdRng::seed_from_u64(11);
        let alternates = (0..5_000)
            .map(|_| Particle::new(DVec2::ZERO, &params, &mut rng))
            .filter(|p| p.variant == ColorVariant::Alternate)
            .count();
        assert!((800..1200).contains(&alternates), "got {}", alternates);
    }

    #[test]
    fn color_follows_variant() {
        let colors = ColorScheme::default();
        let at_rest = |variant| Particle::with_state(DVec2::ZERO, DVec2::ZERO, 3.0, variant);
        let primary = at_rest(ColorVariant::Primary);
        let alternate = at_rest(ColorVariant::Alternate);
        assert_eq!(primary.color(&colors), colors.particle);
        assert_eq!(alternate.color(&colors), colors.particle_alt);
    }
}
