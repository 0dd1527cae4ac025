/*
 * Application Module
 *
 * The nannou model for the network window: the background manager, the
 * pointer state fed by the input handlers, and the control panel.
 *
 * Startup reads an optional JSON background config from the first command
 * line argument or PARTICLE_NETWORK_CONFIG. A config that can't be read is
 * logged and the default background is used instead.
 */

use std::path::PathBuf;

use anyhow::Context;
use nannou::prelude::*;
use nannou_egui::Egui;

use crate::background::{BackgroundManager, BackgroundRegistry};
use crate::config::{BackgroundConfig, ParticleOptions, PARTICLE_NETWORK};
use crate::input::{key_pressed, mouse_exited, mouse_moved, raw_window_event, resized, touch};
use crate::params::{NetworkParams, TunableParams};
use crate::pointer::PointerState;
use crate::renderer::view;
use crate::stats::FrameStats;
use crate::surface::SurfaceSize;
use crate::ui::{self, UiActions};

pub const CONFIG_ENV: &str = "PARTICLE_NETWORK_CONFIG";

const DEFAULT_WINDOW_SIZE: (u32, u32) = (1280, 800);

pub struct Model {
    pub background: BackgroundManager,
    pub pointer: PointerState,
    pub tunable: TunableParams,
    pub egui: Egui,
    pub stats: FrameStats,
    pub show_controls: bool,
    pub show_stats: bool,
}

impl Model {
    // Load the next registered background after the current one
    pub fn cycle_background(&mut self) {
        let ids = identifiers(&self.background);
        let current = self.background.requested().unwrap_or(PARTICLE_NETWORK);
        let next = next_identifier(&ids, current).unwrap_or(PARTICLE_NETWORK).to_string();
        switch_to(&mut self.background, &self.tunable.params, &next);
    }
}

fn identifiers(background: &BackgroundManager) -> Vec<String> {
    background.registry().identifiers().map(String::from).collect()
}

// The particle network starts from the panel's values, anything else from its own defaults
fn switch_to(background: &mut BackgroundManager, params: &NetworkParams, kind: &str) {
    let options = if kind == PARTICLE_NETWORK {
        ParticleOptions::from_params(params).to_map()
    } else {
        serde_json::Map::new()
    };
    background.switch_background(kind, options);
}

fn apply_actions(background: &mut BackgroundManager, params: &NetworkParams, actions: UiActions) {
    if let Some(kind) = actions.background {
        switch_to(background, params, &kind);
    } else if actions.params_changed {
        // Sliders only drive the particle network; other backgrounds keep running
        if background.requested() == Some(PARTICLE_NETWORK) {
            background.set_options(ParticleOptions::from_params(params).to_map());
        }
    } else if actions.rebuild {
        background.reload();
    }
}

fn next_identifier<'a>(ids: &'a [String], current: &str) -> Option<&'a str> {
    let position = ids.iter().position(|id| id == current);
    let next = match position {
        Some(i) => (i + 1) % ids.len(),
        None => 0,
    };
    ids.get(next).map(String::as_str)
}

fn config_path() -> Option<PathBuf> {
    std::env::args()
        .nth(1)
        .or_else(|| std::env::var(CONFIG_ENV).ok())
        .map(PathBuf::from)
}

pub fn load_config(path: Option<PathBuf>) -> anyhow::Result<BackgroundConfig> {
    let Some(path) = path else {
        return Ok(BackgroundConfig::default());
    };
    BackgroundConfig::load(&path)
        .with_context(|| format!("Failed to load background config {}", path.display()))
}

fn window_size(app: &App) -> (u32, u32) {
    // 80% of the monitor, like a browser window that isn't maximized
    match app.primary_monitor() {
        Some(monitor) => {
            let size = monitor.size();
            ((size.width as f32 * 0.8) as u32, (size.height as f32 * 0.8) as u32)
        }
        None => DEFAULT_WINDOW_SIZE,
    }
}

// A window is the one thing the app can't run without
fn fatal(message: &str) -> ! {
    log::error!("{}", message);
    std::process::exit(1);
}

pub fn model(app: &App) -> Model {
    let (width, height) = window_size(app);

    let window_id = match app
        .new_window()
        .title("Particle Network")
        .size(width, height)
        .view(view)
        .mouse_moved(mouse_moved)
        .mouse_exited(mouse_exited)
        .touch(touch)
        .resized(resized)
        .key_pressed(key_pressed)
        .raw_event(raw_window_event)
        .build()
    {
        Ok(id) => id,
        Err(e) => fatal(&format!("Failed to build window: {:?}", e)),
    };

    let Some(window) = app.window(window_id) else {
        fatal("Window closed during startup");
    };
    let egui = Egui::from_window(&window);

    let rect = window.rect();
    let surface = SurfaceSize::new(rect.w() as f64, rect.h() as f64);
    drop(window);

    let config = match load_config(config_path()) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("{:#}", e);
            BackgroundConfig::default()
        }
    };

    // Seed the panel from whatever the particle options resolve to
    let params = ParticleOptions::from_map(&config.options)
        .and_then(|options| options.resolve(surface.width))
        .unwrap_or_else(|_| NetworkParams::for_viewport(surface.width));

    let registry = BackgroundRegistry::with_effects(None);
    let background = BackgroundManager::new(registry, Some(surface), &config);

    Model {
        background,
        pointer: PointerState::inactive(),
        tunable: TunableParams::new(params),
        egui,
        stats: FrameStats::default(),
        show_controls: true,
        show_stats: false,
    }
}

pub fn update(_app: &App, model: &mut Model, update: Update) {
    model.egui.set_elapsed_time(update.since_start);

    let backgrounds = identifiers(&model.background);
    let active = model.background.requested().unwrap_or(PARTICLE_NETWORK).to_string();
    let actions = ui::update_ui(
        &mut model.egui,
        &mut model.tunable,
        &model.stats,
        &backgrounds,
        &active,
    );
    apply_actions(&mut model.background, &model.tunable.params, actions);

    model.background.update(&model.pointer);

    if let Some(stats) = model.background.stats() {
        model.stats = stats;
    }
}
