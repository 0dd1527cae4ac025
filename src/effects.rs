/*
 * External Effects Module
 *
 * Full-scene effects rendered by an external runtime rather than by this
 * crate. Each catalog entry knows the runtime symbol it needs and the option
 * set it starts from; user options are spread over those defaults. When no
 * runtime provides the effect, creation fails and the background manager
 * falls back to the particle field.
 *
 * A running effect remembers the options it was started with, so an option
 * update only needs the keys that change (the sky's live recoloring).
 */

use std::sync::Arc;

use serde_json::{json, Map, Value};

use crate::background::{Background, BackgroundContext, BackgroundFactory};
use crate::error::BackgroundError;
use crate::pointer::PointerState;
use crate::stats::FrameStats;
use crate::surface::{RenderSurface, SurfaceSize};

// Whatever hosts the external effects (a script engine, a GPU plugin, ...)
pub trait EffectRuntime {
    fn provides(&self, symbol: &str) -> bool;

    fn start(
        &self,
        symbol: &str,
        options: Map<String, Value>,
        surface: SurfaceSize,
    ) -> Result<Box<dyn Background>, BackgroundError>;
}

#[derive(Debug, Clone)]
pub struct ExternalEffect {
    pub id: &'static str,
    pub symbol: &'static str,
    defaults: Value,
}

impl ExternalEffect {
    pub fn defaults(&self) -> Map<String, Value> {
        let mut options = common_defaults();
        if let Value::Object(specific) = &self.defaults {
            options.extend(specific.clone());
        }
        options
    }
}

// Input handling shared by every effect
fn common_defaults() -> Map<String, Value> {
    let value = json!({
        "mouseControls": true,
        "touchControls": true,
        "gyroControls": false,
        "minHeight": 200.0,
        "minWidth": 200.0
    });
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

pub fn catalog() -> Vec<ExternalEffect> {
    vec![
        // Daylight clouds with a warm sun
        ExternalEffect {
            id: "sky",
            symbol: "VANTA.CLOUDS",
            defaults: json!({
                "skyColor": 0x5eb7d9, "cloudColor": 0xb1c2dc, "cloudShadowColor": 0x1b3a57,
                "sunColor": 0xff9c21, "sunGlareColor": 0xfa6331, "sunlightColor": 0xfa9531,
                "speed": 1.0
            }),
        },
        ExternalEffect {
            id: "vanta-clouds",
            symbol: "VANTA.CLOUDS",
            defaults: json!({
                "skyColor": 0x68b8d7, "cloudColor": 0xadc1de, "cloudShadowColor": 0x183550,
                "sunColor": 0xff9919, "sunGlareColor": 0xff6633, "sunlightColor": 0xff9933,
                "speed": 1.2
            }),
        },
        ExternalEffect {
            id: "vanta-clouds2",
            symbol: "VANTA.CLOUDS2",
            defaults: json!({
                "skyColor": 0x222233, "cloudColor": 0x445566, "lightColor": 0xffffff,
                "speed": 0.6
            }),
        },
        ExternalEffect {
            id: "vanta-waves",
            symbol: "VANTA.WAVES",
            defaults: json!({
                "scale": 1.0, "scaleMobile": 1.0, "color": 0x1f4f7, "shininess": 30.0,
                "waveHeight": 15.0, "waveSpeed": 0.75, "zoom": 0.75
            }),
        },
        ExternalEffect {
            id: "vanta-fog",
            symbol: "VANTA.FOG",
            defaults: json!({
                "highlightColor": 0x5599ff, "midtoneColor": 0x3355aa, "lowlightColor": 0x111133,
                "baseColor": 0x111122, "blurFactor": 0.6, "speed": 1.5, "zoom": 0.8
            }),
        },
        ExternalEffect {
            id: "vanta-birds",
            symbol: "VANTA.BIRDS",
            defaults: json!({
                "scale": 1.0, "scaleMobile": 1.0, "backgroundColor": 0x111122,
                "color1": 0xff00ff, "color2": 0x00ffff, "colorMode": "lerp",
                "birdSize": 1.5, "wingSpan": 25.0, "speedLimit": 5.0,
                "separation": 40.0, "alignment": 40.0, "cohesion": 30.0, "quantity": 3.0
            }),
        },
        ExternalEffect {
            id: "vanta-net",
            symbol: "VANTA.NET",
            defaults: json!({
                "scale": 1.0, "scaleMobile": 1.0, "color": 0x3f9cff, "backgroundColor": 0x0a0a0a,
                "points": 10.0, "maxDistance": 20.0, "spacing": 15.0, "showDots": true
            }),
        },
        ExternalEffect {
            id: "vanta-cells",
            symbol: "VANTA.CELLS",
            defaults: json!({
                "scale": 1.0, "color1": 0x2266ff, "color2": 0xff3388, "size": 1.5, "speed": 1.0
            }),
        },
        ExternalEffect {
            id: "vanta-trunk",
            symbol: "VANTA.TRUNK",
            defaults: json!({
                "scale": 1.0, "scaleMobile": 1.0, "backgroundColor": 0x0a0a0a, "color": 0x3f9cff,
                "spacing": 0, "chaos": 4.0
            }),
        },
        ExternalEffect {
            id: "vanta-topology",
            symbol: "VANTA.TOPOLOGY",
            defaults: json!({
                "scale": 1.0, "scaleMobile": 1.0, "color": 0x3f9cff, "backgroundColor": 0x0a0a0a
            }),
        },
        ExternalEffect {
            id: "vanta-dots",
            symbol: "VANTA.DOTS",
            defaults: json!({
                "scale": 1.0, "scaleMobile": 1.0, "color": 0x3f9cff, "color2": 0xff3f7f,
                "backgroundColor": 0x0a0a0a, "size": 3.0, "spacing": 35.0, "showLines": true
            }),
        },
        ExternalEffect {
            id: "vanta-rings",
            symbol: "VANTA.RINGS",
            defaults: json!({
                "scale": 1.0, "scaleMobile": 1.0, "backgroundColor": 0x0a0a0a, "color": 0x3f9cff
            }),
        },
        ExternalEffect {
            id: "vanta-globe",
            symbol: "VANTA.GLOBE",
            defaults: json!({
                "scale": 1.0, "scaleMobile": 1.0, "color": 0x3f9cff, "color2": 0xff3388,
                "backgroundColor": 0x0a0a0a, "size": 1.0
            }),
        },
        ExternalEffect {
            id: "vanta-halo",
            symbol: "VANTA.HALO",
            defaults: json!({
                "baseColor": 0x0, "backgroundColor": 0x0a0a0a, "amplitudeFactor": 1.0,
                "xOffset": 0.2, "yOffset": 0.1, "size": 1.5
            }),
        },
    ]
}

// Shallow spread: top-level keys in `overrides` replace those in `defaults`
pub fn merge_options(
    mut defaults: Map<String, Value>,
    overrides: &Map<String, Value>,
) -> Map<String, Value> {
    for (key, value) in overrides {
        defaults.insert(key.clone(), value.clone());
    }
    defaults
}

pub struct ExternalEffectFactory {
    effect: ExternalEffect,
    runtime: Option<Arc<dyn EffectRuntime>>,
}

impl ExternalEffectFactory {
    pub fn new(effect: ExternalEffect, runtime: Option<Arc<dyn EffectRuntime>>) -> Self {
        Self { effect, runtime }
    }
}

impl BackgroundFactory for ExternalEffectFactory {
    fn create(
        &self,
        options: &Map<String, Value>,
        context: &BackgroundContext,
    ) -> Result<Box<dyn Background>, BackgroundError> {
        let runtime = self
            .runtime
            .as_ref()
            .filter(|runtime| runtime.provides(self.effect.symbol))
            .ok_or_else(|| BackgroundError::RuntimeUnavailable {
                effect: self.effect.symbol.to_string(),
            })?;

        let options = merge_options(self.effect.defaults(), options);
        log::debug!("Starting {} with {} options", self.effect.symbol, options.len());
        let effect = runtime.start(self.effect.symbol, options.clone(), context.surface)?;
        Ok(Box::new(ExternalBackground { effect, options }))
    }
}

// An effect started by the runtime, together with its current options
pub struct ExternalBackground {
    effect: Box<dyn Background>,
    options: Map<String, Value>,
}

impl ExternalBackground {
    pub fn options(&self) -> &Map<String, Value> {
        &self.options
    }
}

impl Background for ExternalBackground {
    fn name(&self) -> &str {
        self.effect.name()
    }

    fn update(&mut self, pointer: &PointerState) {
        self.effect.update(pointer);
    }

    fn render(&self, surface: &mut dyn RenderSurface) {
        self.effect.render(surface);
    }

    fn resize(&mut self, size: SurfaceSize) {
        self.effect.resize(size);
    }

    fn destroy(&mut self) {
        self.effect.destroy();
    }

    // The runtime always receives the complete option set
    fn set_options(&mut self, options: &Map<String, Value>) -> Result<(), BackgroundError> {
        let merged = merge_options(self.options.clone(), options);
        self.effect.set_options(&merged)?;
        self.options = merged;
        Ok(())
    }

    fn stats(&self) -> Option<FrameStats> {
        self.effect.stats()
    }
}
