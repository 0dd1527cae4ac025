/*
 * UI Module
 *
 * The egui control panel for tuning the particle network and picking a
 * background, plus the stats overlay drawn straight onto the frame.
 * Parameter change detection is handled by TunableParams.
 */

use nannou_egui::{egui, Egui};

use crate::params::{NetworkParams, TunableParams};
use crate::stats::FrameStats;

// What the user asked for this frame
#[derive(Debug, Default, Clone, PartialEq)]
pub struct UiActions {
    pub rebuild: bool,
    pub params_changed: bool,
    pub background: Option<String>,
}

pub fn update_ui(
    egui: &mut Egui,
    tunable: &mut TunableParams,
    stats: &FrameStats,
    backgrounds: &[String],
    active_background: &str,
) -> UiActions {
    let mut actions = UiActions::default();
    let mut selected = active_background.to_string();

    tunable.take_snapshot();

    let ctx = egui.begin_frame();

    egui::Window::new("Particle Network")
        .default_pos([10.0, 10.0])
        .show(&ctx, |ui| {
            egui::ComboBox::from_label("Background")
                .selected_text(selected.clone())
                .show_ui(ui, |ui| {
                    for id in backgrounds {
                        ui.selectable_value(&mut selected, id.clone(), id.as_str());
                    }
                });

            let params = &mut tunable.params;

            ui.collapsing("Particles", |ui| {
                let count_range = NetworkParams::particle_count_range();
                ui.add(egui::Slider::new(&mut params.particle_count, count_range).text("Count"));
                ui.add(
                    egui::Slider::new(&mut params.particle_speed, NetworkParams::speed_range())
                        .text("Speed"),
                );
                ui.add(
                    egui::Slider::new(&mut params.particle_size.min, NetworkParams::size_range())
                        .text("Min Size"),
                );
                ui.add(
                    egui::Slider::new(&mut params.particle_size.max, NetworkParams::size_range())
                        .text("Max Size"),
                );

                if ui.button("Rebuild Field").clicked() {
                    actions.rebuild = true;
                }
            });

            ui.collapsing("Connections", |ui| {
                let range = NetworkParams::distance_range();
                ui.add(
                    egui::Slider::new(&mut params.max_connection_distance, range)
                        .text("Max Distance"),
                );
            });

            ui.collapsing("Pointer", |ui| {
                let radius_range = NetworkParams::distance_range();
                ui.add(
                    egui::Slider::new(&mut params.cursor_influence_radius, radius_range)
                        .text("Influence Radius"),
                );
                let attraction_range = NetworkParams::attraction_range();
                ui.add(
                    egui::Slider::new(&mut params.cursor_attraction_strength, attraction_range)
                        .text("Attraction"),
                );
            });

            ui.separator();
            for line in stats.lines() {
                ui.label(line);
            }
        });

    tunable.normalize();
    actions.params_changed = tunable.detect_changes();
    if selected != active_background {
        actions.background = Some(selected);
    }

    actions
}

// Draw frame statistics in the top-left corner of the window
pub fn draw_stats_overlay(
    draw: &nannou::Draw,
    stats: &FrameStats,
    window_rect: nannou::geom::Rect,
) {
    let margin = 20.0;
    let line_height = 20.0;
    let lines = stats.lines();

    let panel_width = 240.0;
    let panel_height = line_height * lines.len() as f32 + margin;
    let panel_x = window_rect.left() + panel_width / 2.0;
    let panel_y = window_rect.top() - panel_height / 2.0;

    draw.rect()
        .x_y(panel_x, panel_y)
        .w_h(panel_width, panel_height)
        .color(nannou::color::rgba(0.0, 0.0, 0.0, 0.7));

    // Text boxes are positioned by their center
    let text_width = panel_width - margin;
    let text_x = window_rect.left() + margin + text_width / 2.0;
    let text_y = window_rect.top() - margin;

    for (i, text) in lines.iter().enumerate() {
        draw.text(text)
            .x_y(text_x, text_y - i as f32 * line_height)
            .w(text_width)
            .left_justify()
            .color(nannou::color::WHITE)
            .font_size(14);
    }
}
