/*
 * Input Module
 *
 * nannou event handlers for the network window. Pointer and touch events are
 * converted to surface coordinates and folded into the model's PointerState;
 * keys toggle the panels and drive the background.
 *
 * Keys:
 * - Tab: show or hide the control panel
 * - D: show or hide the stats overlay
 * - R: rebuild the current background
 * - B: cycle through registered backgrounds
 */

use glam::DVec2;
use nannou::event::TouchEvent;
use nannou::prelude::*;
use nannou::winit::event::TouchPhase;

use crate::app::Model;
use crate::pointer::PointerEvent;
use crate::surface::SurfaceSize;
use crate::viewport::Viewport;

pub fn mouse_moved(app: &App, model: &mut Model, pos: Point2) {
    let viewport = Viewport::from_rect(app.window_rect());
    model.pointer.apply(PointerEvent::Move(viewport.from_screen(pos)));
}

pub fn mouse_exited(_app: &App, model: &mut Model) {
    model.pointer.apply(PointerEvent::Leave);
}

pub fn touch(app: &App, model: &mut Model, touch: TouchEvent) {
    let viewport = Viewport::from_rect(app.window_rect());
    if let Some(event) = touch_event(touch.phase, viewport.from_screen(touch.position)) {
        model.pointer.apply(event);
    }
}

// Only a moving touch steers the pointer; a tap leaves it where it was
fn touch_event(phase: TouchPhase, position: DVec2) -> Option<PointerEvent> {
    match phase {
        TouchPhase::Started => None,
        TouchPhase::Moved => Some(PointerEvent::TouchMove(Some(position))),
        TouchPhase::Ended | TouchPhase::Cancelled => Some(PointerEvent::TouchEnd),
    }
}

pub fn resized(_app: &App, model: &mut Model, size: Vec2) {
    model.background.resize(SurfaceSize::new(size.x as f64, size.y as f64));
}

pub fn key_pressed(_app: &App, model: &mut Model, key: Key) {
    // Typing into an egui widget shouldn't trigger shortcuts
    if model.egui.ctx().wants_keyboard_input() {
        return;
    }

    match key {
        Key::Tab => model.show_controls = !model.show_controls,
        Key::D => model.show_stats = !model.show_stats,
        Key::R => model.background.reload(),
        Key::B => model.cycle_background(),
        _ => {}
    }
}

// Handle raw window events for egui
pub fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    model.egui.handle_raw_event(event);
}
