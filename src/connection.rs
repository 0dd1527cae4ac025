/*
 * Connection Module
 *
 * Edges of the particle network. Every frame each unordered pair of particles
 * closer than the connection distance becomes a Connection. A connection's
 * strength reacts to the pointer and fades out once the pointer leaves, so
 * strength is remembered per pair (keyed by the two particle indices) across
 * frames while the edge list itself is rebuilt from scratch.
 *
 * Pair enumeration is exhaustive, O(n^2). Particle counts stay in the
 * hundreds, where this is cheaper than maintaining a spatial index.
 */

use std::collections::HashMap;

use crate::color::Color;
use crate::params::{ColorScheme, NetworkParams};
use crate::particle::Particle;
use crate::physics::proximity;
use crate::pointer::PointerState;

// Strength lost per frame once the pointer is gone
pub const STRENGTH_FADE: f64 = 0.02;
// Connections at or below this base opacity are not drawn
pub const MIN_VISIBLE_OPACITY: f64 = 0.1;
// Strength above which the active style is used
pub const ACTIVE_THRESHOLD: f64 = 0.5;
const BASE_OPACITY_WEIGHT: f64 = 0.3;
const STRENGTH_OPACITY_WEIGHT: f64 = 0.3;
const BASE_WIDTH: f64 = 1.0;
const STRENGTH_WIDTH: f64 = 0.5;

// Unordered pair of distinct particle indices, stored low index first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PairKey {
    low: usize,
    high: usize,
}

impl PairKey {
    pub fn new(i: usize, j: usize) -> Option<Self> {
        match i.cmp(&j) {
            std::cmp::Ordering::Less => Some(Self { low: i, high: j }),
            std::cmp::Ordering::Greater => Some(Self { low: j, high: i }),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn low(&self) -> usize {
        self.low
    }

    pub fn high(&self) -> usize {
        self.high
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStyle {
    Idle,
    Active,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connection {
    pub key: PairKey,
    pub distance: f64,
    pub base_opacity: f64,
    pub strength: f64,
}

impl Connection {
    pub fn is_visible(&self) -> bool {
        self.base_opacity > MIN_VISIBLE_OPACITY
    }

    pub fn opacity(&self) -> f64 {
        self.base_opacity * BASE_OPACITY_WEIGHT + self.strength * STRENGTH_OPACITY_WEIGHT
    }

    pub fn width(&self) -> f64 {
        BASE_WIDTH + self.strength * STRENGTH_WIDTH
    }

    pub fn style(&self) -> ConnectionStyle {
        if self.strength > ACTIVE_THRESHOLD {
            ConnectionStyle::Active
        } else {
            ConnectionStyle::Idle
        }
    }

    // Style color with its alpha replaced by the blended opacity
    pub fn color(&self, colors: &ColorScheme) -> Color {
        let base = match self.style() {
            ConnectionStyle::Active => colors.connection_active,
            ConnectionStyle::Idle => colors.connection,
        };
        base.with_alpha(self.opacity())
    }
}

// Visibility from distance alone: 1 for touching particles, 0 at the threshold
pub fn base_opacity(distance: f64, max_distance: f64) -> f64 {
    if max_distance > 0.0 {
        (1.0 - distance / max_distance).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

pub fn connection_strength(
    previous: f64,
    a: &Particle,
    b: &Particle,
    pointer: &PointerState,
    influence_radius: f64,
) -> f64 {
    if !pointer.active {
        return (previous - STRENGTH_FADE).max(0.0);
    }

    let midpoint = (a.position + b.position) * 0.5;
    let distance = pointer.position.distance(midpoint);
    let endpoint_activity = a.activity.max(b.activity);

    match proximity(distance, influence_radius) {
        Some(near) => near.max(endpoint_activity).min(1.0),
        None => endpoint_activity.max(0.0),
    }
}

#[derive(Debug, Clone, Copy)]
struct PairMemory {
    strength: f64,
    last_seen: u64,
}

#[derive(Debug, Default)]
pub struct ConnectionGraph {
    memory: HashMap<PairKey, PairMemory>,
    connections: Vec<Connection>,
    generation: u64,
}

impl ConnectionGraph {
    pub fn new() -> Self {
        Self::default()
    }

    // Recompute every edge for the current particle positions
    pub fn rebuild(
        &mut self,
        particles: &[Particle],
        pointer: &PointerState,
        params: &NetworkParams,
    ) {
        self.generation = self.generation.wrapping_add(1);
        let generation = self.generation;
        let max_distance = params.max_connection_distance;

        self.connections.clear();

        for i in 0..particles.len() {
            for j in (i + 1)..particles.len() {
                let (a, b) = (&particles[i], &particles[j]);
                let distance = a.distance(b);
                if !(distance < max_distance) {
                    continue;
                }

                let key = PairKey { low: i, high: j };
                let previous = self.memory.get(&key).map_or(0.0, |m| m.strength);
                let radius = params.cursor_influence_radius;
                let strength = connection_strength(previous, a, b, pointer, radius);

                self.memory.insert(key, PairMemory { strength, last_seen: generation });
                self.connections.push(Connection {
                    key,
                    distance,
                    base_opacity: base_opacity(distance, max_distance),
                    strength,
                });
            }
        }

        // Pairs that drifted apart keep fading until nothing is left to remember
        self.memory.retain(|_, memory| {
            if memory.last_seen == generation {
                return true;
            }
            memory.strength = (memory.strength - STRENGTH_FADE).max(0.0);
            memory.strength > 0.0
        });
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }

    // Pairs with remembered strength, connected or fading
    pub fn tracked_pairs(&self) -> usize {
        self.memory.len()
    }

    pub fn remembered_strength(&self, key: PairKey) -> Option<f64> {
        self.memory.get(&key).map(|m| m.strength)
    }

    // Indices are about to change meaning
    pub fn clear(&mut self) {
        self.memory.clear();
        self.connections.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::ColorVariant;
    use glam::DVec2;

    fn still(x: f64, y: f64) -> Particle {
        Particle::with_state(DVec2::new(x, y), DVec2::ZERO, 2.0, ColorVariant::Primary)
    }

    #[test]
    fn pair_keys_are_unordered() {
        assert_eq!(PairKey::new(3, 1), PairKey::new(1, 3));
        assert_eq!(PairKey::new(2, 2), None);
        let key = PairKey::new(9, 4).unwrap();
        assert_eq!((key.low(), key.high()), (4, 9));
    }

    #[test]
    fn threshold_is_strict() {
        let params = NetworkParams::default();
        let mut graph = ConnectionGraph::new();

        let particles = [still(0.0, 0.0), still(150.0, 0.0), still(0.0, 149.0)];
        graph.rebuild(&particles, &PointerState::inactive(), &params);

        let keys: Vec<PairKey> = graph.connections().iter().map(|c| c.key).collect();
        assert_eq!(keys, vec![PairKey::new(0, 2).unwrap()]);
    }

    #[test]
    fn coincident_particles_are_fully_opaque() {
        let params = NetworkParams::default();
        let mut graph = ConnectionGraph::new();
        graph.rebuild(&[still(5.0, 5.0), still(5.0, 5.0)], &PointerState::inactive(), &params);

        let connection = graph.connections()[0];
        assert_eq!(connection.distance, 0.0);
        assert_eq!(connection.base_opacity, 1.0);
    }

    #[test]
    fn strength_from_pointer_near_midpoint() {
        let a = still(0.0, 0.0);
        let b = still(100.0, 0.0);
        let pointer = PointerState::at(50.0, 0.0);
        assert_eq!(connection_strength(0.0, &a, &b, &pointer, 150.0), 1.0);

        let pointer = PointerState::at(50.0, 75.0);
        assert!((connection_strength(0.0, &a, &b, &pointer, 150.0) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn strength_falls_back_to_endpoint_activity() {
        let mut a = still(0.0, 0.0);
        let b = still(100.0, 0.0);
        a.activity = 0.4;
        let far = PointerState::at(5_000.0, 5_000.0);
        assert_eq!(connection_strength(0.9, &a, &b, &far, 150.0), 0.4);
    }

    #[test]
    fn strength_fades_after_pointer_leaves() {
        let params = NetworkParams::default();
        let mut graph = ConnectionGraph::new();
        let particles = [still(0.0, 0.0), still(100.0, 0.0)];
        let key = PairKey::new(0, 1).unwrap();

        graph.rebuild(&particles, &PointerState::at(50.0, 0.0), &params);
        assert_eq!(graph.remembered_strength(key), Some(1.0));

        let gone = PointerState::inactive();
        graph.rebuild(&particles, &gone, &params);
        assert!((graph.connections()[0].strength - 0.98).abs() < 1e-12);

        for _ in 0..60 {
            graph.rebuild(&particles, &gone, &params);
        }
        assert_eq!(graph.connections()[0].strength, 0.0);
    }

    #[test]
    fn stale_pairs_are_forgotten_once_faded() {
        let params = NetworkParams::default();
        let mut graph = ConnectionGraph::new();
        graph.rebuild(&[still(0.0, 0.0), still(100.0, 0.0)], &PointerState::at(50.0, 0.0), &params);
        assert_eq!(graph.tracked_pairs(), 1);

        let apart = [still(0.0, 0.0), still(400.0, 0.0)];
        graph.rebuild(&apart, &PointerState::inactive(), &params);
        assert!(graph.is_empty());
        assert_eq!(graph.tracked_pairs(), 1);

        for _ in 0..60 {
            graph.rebuild(&apart, &PointerState::inactive(), &params);
        }
        assert_eq!(graph.tracked_pairs(), 0);
    }

    #[test]
    fn render_style_follows_strength() {
        let colors = ColorScheme::default();
        let mut connection = Connection {
            key: PairKey::new(0, 1).unwrap(),
            distance: 75.0,
            base_opacity: 0.5,
            strength: 0.2,
        };
        assert_eq!(connection.style(), ConnectionStyle::Idle);
        assert!((connection.opacity() - 0.21).abs() < 1e-12);
        assert!((connection.width() - 1.1).abs() < 1e-12);
        assert_eq!(connection.color(&colors).a, connection.opacity());

        connection.strength = 0.8;
        assert_eq!(connection.style(), ConnectionStyle::Active);
        let color = connection.color(&colors);
        assert_eq!((color.r, color.g, color.b), (74, 158, 255));

        connection.base_opacity = 0.1;
        assert!(!connection.is_visible());
    }
}
