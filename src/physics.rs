/*
 * Physics Module
 *
 * Per-particle physics for the network background. One frame is five stages:
 * 1. Integrate position by velocity
 * 2. Bounce off the surface edges and clamp inside them
 * 3. Occasionally perturb the velocity, capped at the configured speed
 * 4. Pull toward the pointer and raise activity, or let activity decay
 * 5. Ease size and opacity toward their targets
 */

use glam::DVec2;
use rand::Rng;

use crate::params::NetworkParams;
use crate::particle::{Particle, BASE_OPACITY};
use crate::pointer::PointerState;
use crate::surface::SurfaceSize;

// Chance per frame that a particle changes direction slightly
pub const DRIFT_PROBABILITY: f64 = 0.02;
// Each velocity component moves by at most half of this per drift
pub const DRIFT_MAGNITUDE: f64 = 0.1;

pub const ACTIVITY_GAIN: f64 = 1.5;
// Decay while the pointer is active but out of reach
pub const ACTIVITY_DECAY_FAR: f64 = 0.02;
// Decay while there is no pointer at all
pub const ACTIVITY_DECAY_IDLE: f64 = 0.01;
// Below this activity counts as fully decayed
const ACTIVITY_EPSILON: f64 = 1e-9;

pub const SIZE_BOOST: f64 = 0.5;
pub const OPACITY_BOOST: f64 = 0.2;
// Fraction of the remaining gap closed each frame
pub const EASING: f64 = 0.1;

pub fn step_particle<R: Rng + ?Sized>(
    particle: &mut Particle,
    pointer: &PointerState,
    bounds: SurfaceSize,
    params: &NetworkParams,
    rng: &mut R,
) {
    integrate(particle);
    reflect_and_clamp(particle, bounds);

    if rng.gen_bool(DRIFT_PROBABILITY) {
        let jitter = DVec2::new(rng.gen::<f64>() - 0.5, rng.gen::<f64>() - 0.5) * DRIFT_MAGNITUDE;
        drift(particle, jitter, params.particle_speed);
    }

    apply_pointer(particle, pointer, params);
    keep_on_surface(particle, bounds);
    ease_visuals(particle);
}

pub fn integrate(particle: &mut Particle) {
    particle.position += particle.velocity;
}

// Bounce on any edge the particle's radius touches, then clamp into
// [size, bound - size] on both axes
pub fn reflect_and_clamp(particle: &mut Particle, bounds: SurfaceSize) {
    let size = particle.size;
    let p = particle.position;

    if p.x <= size || p.x >= bounds.width - size {
        particle.velocity.x = -particle.velocity.x;
    }
    if p.y <= size || p.y >= bounds.height - size {
        particle.velocity.y = -particle.velocity.y;
    }

    particle.position.x = clamp_axis(p.x, size, bounds.width - size);
    particle.position.y = clamp_axis(p.y, size, bounds.height - size);
}

// Unlike f64::clamp this tolerates lo > hi (surface narrower than a
// particle), preferring the lower bound like the edge test above
fn clamp_axis(value: f64, lo: f64, hi: f64) -> f64 {
    value.min(hi).max(lo)
}

pub fn drift(particle: &mut Particle, jitter: DVec2, speed_cap: f64) {
    particle.velocity = limit_speed(particle.velocity + jitter, speed_cap);
}

// Rescale to the cap when faster than it, preserving direction
pub fn limit_speed(velocity: DVec2, cap: f64) -> DVec2 {
    let speed = velocity.length();
    if speed > cap {
        velocity * (cap / speed)
    } else {
        velocity
    }
}

// Normalized proximity in (0, 1], or None when out of reach.
// A zero distance is full force.
pub fn proximity(distance: f64, radius: f64) -> Option<f64> {
    if distance < radius {
        Some((radius - distance) / radius)
    } else {
        None
    }
}

pub fn apply_pointer(particle: &mut Particle, pointer: &PointerState, params: &NetworkParams) {
    let radius = params.cursor_influence_radius;

    match pointer.distance_to(particle.position) {
        Some(distance) => match proximity(distance, radius) {
            Some(force) => {
                let toward = pointer.position - particle.position;
                particle.position += toward * force * params.cursor_attraction_strength;

                particle.activity = (force * ACTIVITY_GAIN).min(1.0);
                let base = particle.base_size();
                particle.target_size = base + base * SIZE_BOOST * particle.activity;
                particle.target_opacity = BASE_OPACITY + OPACITY_BOOST * particle.activity;
            }
            None => settle(particle, ACTIVITY_DECAY_FAR),
        },
        None => settle(particle, ACTIVITY_DECAY_IDLE),
    }
}

fn settle(particle: &mut Particle, decay: f64) {
    particle.activity = decay_activity(particle.activity, decay);
    particle.target_size = particle.base_size();
    particle.target_opacity = BASE_OPACITY;
}

pub fn decay_activity(activity: f64, step: f64) -> f64 {
    let next = activity - step;
    if next <= ACTIVITY_EPSILON {
        0.0
    } else {
        next
    }
}

// The pointer pull can only move a particle toward the pointer; this keeps
// it on the surface even when the pointer sits outside
fn keep_on_surface(particle: &mut Particle, bounds: SurfaceSize) {
    let p = &mut particle.position;
    p.x = p.x.min(bounds.width).max(0.0);
    p.y = p.y.min(bounds.height).max(0.0);
}

// First-order low-pass toward the targets; never overshoots
pub fn ease_visuals(particle: &mut Particle) {
    particle.size += (particle.target_size - particle.size) * EASING;
    particle.opacity += (particle.target_opacity - particle.opacity) * EASING;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::ColorVariant;

    fn particle_at(x: f64, y: f64, vx: f64, vy: f64) -> Particle {
        Particle::with_state(DVec2::new(x, y), DVec2::new(vx, vy), 3.0, ColorVariant::Primary)
    }

    #[test]
    fn bounces_off_edges_and_clamps() {
        let bounds = SurfaceSize::new(100.0, 100.0);
        let mut particle = particle_at(98.5, 50.0, 0.2, 0.0);
        integrate(&mut particle);
        reflect_and_clamp(&mut particle, bounds);

        assert!(particle.velocity.x < 0.0);
        assert_eq!(particle.position.x, 97.0);

        let mut particle = particle_at(1.0, 2.0, -0.1, -0.1);
        reflect_and_clamp(&mut particle, bounds);
        assert_eq!(particle.position, DVec2::new(3.0, 3.0));
        assert!(particle.velocity.x > 0.0 && particle.velocity.y > 0.0);
    }

    #[test]
    fn tiny_surface_does_not_panic() {
        let mut particle = particle_at(1.0, 1.0, 0.1, 0.1);
        reflect_and_clamp(&mut particle, SurfaceSize::new(2.0, 2.0));
        keep_on_surface(&mut particle, SurfaceSize::new(2.0, 2.0));
        assert!(particle.position.x <= 2.0 && particle.position.x >= 0.0);
    }

    #[test]
    fn drift_never_exceeds_the_cap() {
        let mut particle = particle_at(50.0, 50.0, 0.19, 0.0);
        drift(&mut particle, DVec2::new(0.05, 0.05), 0.2);
        assert!(particle.velocity.length() <= 0.2 + 1e-12);

        let slow = limit_speed(DVec2::new(0.01, 0.0), 0.2);
        assert_eq!(slow, DVec2::new(0.01, 0.0));

        let capped = limit_speed(DVec2::new(3.0, 4.0), 1.0);
        assert!((capped.length() - 1.0).abs() < 1e-12);
        assert!((capped.x / capped.y - 0.75).abs() < 1e-12);
    }

    #[test]
    fn proximity_is_normalized() {
        assert_eq!(proximity(0.0, 150.0), Some(1.0));
        assert_eq!(proximity(75.0, 150.0), Some(0.5));
        assert_eq!(proximity(150.0, 150.0), None);
        assert_eq!(proximity(0.0, 0.0), None);
    }

    #[test]
    fn pointer_pulls_and_activates() {
        let params = NetworkParams {
            cursor_influence_radius: 100.0,
            ..NetworkParams::default()
        };
        let mut particle = particle_at(50.0, 50.0, 0.0, 0.0);
        let pointer = PointerState::at(100.0, 50.0);

        apply_pointer(&mut particle, &pointer, &params);

        let force = 0.5;
        let expected_x = 50.0 + 50.0 * force * params.cursor_attraction_strength;
        assert!((particle.position.x - expected_x).abs() < 1e-12);
        assert!((particle.activity - 0.75).abs() < 1e-12);
        assert!((particle.target_size - (3.0 + 3.0 * 0.5 * 0.75)).abs() < 1e-12);
        assert!((particle.target_opacity - (0.8 + 0.2 * 0.75)).abs() < 1e-12);
    }

    #[test]
    fn activity_decays_faster_when_pointer_is_far() {
        let params = NetworkParams::default();
        let mut near_miss = particle_at(10.0, 10.0, 0.0, 0.0);
        near_miss.activity = 0.5;
        apply_pointer(&mut near_miss, &PointerState::at(900.0, 900.0), &params);
        assert!((near_miss.activity - 0.48).abs() < 1e-12);

        let mut idle = particle_at(10.0, 10.0, 0.0, 0.0);
        idle.activity = 0.5;
        apply_pointer(&mut idle, &PointerState::inactive(), &params);
        assert!((idle.activity - 0.49).abs() < 1e-12);
        assert_eq!(idle.target_size, idle.base_size());
        assert_eq!(idle.target_opacity, BASE_OPACITY);
    }

    #[test]
    fn easing_closes_ten_percent_of_the_gap() {
        let mut particle = particle_at(0.0, 0.0, 0.0, 0.0);
        particle.target_size = 4.0;
        particle.target_opacity = 1.0;
        ease_visuals(&mut particle);
        assert!((particle.size - 3.1).abs() < 1e-12);
        assert!((particle.opacity - 0.82).abs() < 1e-12);
    }
}
