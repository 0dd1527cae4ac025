/*
 * Pointer Module
 *
 * Mouse and touch input collapsed into a single pointer: a position in
 * surface pixels plus an active flag. The simulation only ever reads it.
 */

use glam::DVec2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Move(DVec2),
    Leave,
    // Position of the first touch point, if any
    TouchMove(Option<DVec2>),
    TouchEnd,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerState {
    pub position: DVec2,
    pub active: bool,
}

impl PointerState {
    pub fn inactive() -> Self {
        Self::default()
    }

    pub fn at(x: f64, y: f64) -> Self {
        Self {
            position: DVec2::new(x, y),
            active: true,
        }
    }

    pub fn apply(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Move(position) => {
                self.position = position;
                self.active = true;
            }
            PointerEvent::TouchMove(Some(position)) => {
                self.position = position;
                self.active = true;
            }
            // A touch-move without touches carries nothing to track
            PointerEvent::TouchMove(None) => {}
            PointerEvent::Leave | PointerEvent::TouchEnd => {
                self.active = false;
            }
        }
    }

    // Distance from the pointer, or None while it is inactive
    pub fn distance_to(&self, point: DVec2) -> Option<f64> {
        self.active.then(|| self.position.distance(point))
    }
}
