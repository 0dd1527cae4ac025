/*
 * Particle Network - Module Definitions
 *
 * An interactive particle network: drifting particles linked by fading
 * lines, attracted to and lit up by the pointer. The network is one of
 * several selectable backgrounds managed by BackgroundManager.
 */

// Re-export key components for easier access
pub use app::Model;
pub use background::{Background, BackgroundManager, BackgroundRegistry};
pub use color::Color;
pub use config::BackgroundConfig;
pub use error::{BackgroundError, ConfigError};
pub use field::ParticleField;
pub use params::NetworkParams;
pub use pointer::{PointerEvent, PointerState};
pub use surface::{RenderSurface, SurfaceSize};

// Define modules
pub mod animation;
pub mod app;
pub mod background;
pub mod color;
pub mod config;
pub mod connection;
pub mod effects;
pub mod error;
pub mod field;
pub mod input;
pub mod params;
pub mod particle;
pub mod physics;
pub mod pointer;
pub mod renderer;
pub mod stats;
pub mod surface;
pub mod ui;
pub mod viewport;

// Constants
pub const BACKGROUND_COLOR: Color = Color::rgb(0x1a, 0x1a, 0x2e);
