/*
 * Background Module
 *
 * Selects and owns the active background effect. Effects are created through
 * factories registered under a string identifier; the particle network is
 * the default and also what "none" and unknown identifiers resolve to.
 *
 * Nothing here aborts the host: creation failures are logged and replaced by
 * the particle field, and a missing surface leaves the manager inert.
 */

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::config::{BackgroundConfig, ParticleOptions, PARTICLE_NETWORK};
use crate::effects::{self, EffectRuntime, ExternalEffectFactory};
use crate::error::BackgroundError;
use crate::field::ParticleField;
use crate::pointer::PointerState;
use crate::stats::FrameStats;
use crate::surface::{RenderSurface, SurfaceSize};

pub const NO_BACKGROUND: &str = "none";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackgroundContext {
    pub surface: SurfaceSize,
}

// A running background effect
pub trait Background {
    fn name(&self) -> &str;

    // Advance one frame
    fn update(&mut self, pointer: &PointerState);

    fn render(&self, surface: &mut dyn RenderSurface);

    fn resize(&mut self, size: SurfaceSize);

    // Stop for good; later update/render calls do nothing
    fn destroy(&mut self);

    // Change options while running. Keys not given keep their current value.
    fn set_options(&mut self, _options: &Map<String, Value>) -> Result<(), BackgroundError> {
        Err(BackgroundError::OptionsUnsupported {
            effect: self.name().to_string(),
        })
    }

    fn stats(&self) -> Option<FrameStats> {
        None
    }
}

pub trait BackgroundFactory {
    fn create(
        &self,
        options: &Map<String, Value>,
        context: &BackgroundContext,
    ) -> Result<Box<dyn Background>, BackgroundError>;
}

impl Background for ParticleField {
    fn name(&self) -> &str {
        PARTICLE_NETWORK
    }

    fn update(&mut self, pointer: &PointerState) {
        self.tick(pointer);
    }

    fn render(&self, surface: &mut dyn RenderSurface) {
        self.draw(surface);
    }

    fn resize(&mut self, size: SurfaceSize) {
        ParticleField::resize(self, size);
    }

    fn destroy(&mut self) {
        ParticleField::destroy(self);
    }

    // New parameters mean a new population
    fn set_options(&mut self, options: &Map<String, Value>) -> Result<(), BackgroundError> {
        let params = ParticleOptions::from_map(options)
            .and_then(|options| options.merge_over(self.params()))
            .map_err(|source| BackgroundError::InvalidOptions {
                effect: PARTICLE_NETWORK.to_string(),
                source,
            })?;
        self.reconfigure(params);
        Ok(())
    }

    fn stats(&self) -> Option<FrameStats> {
        Some(ParticleField::stats(self))
    }
}

pub struct ParticleNetworkFactory;

impl BackgroundFactory for ParticleNetworkFactory {
    fn create(
        &self,
        options: &Map<String, Value>,
        context: &BackgroundContext,
    ) -> Result<Box<dyn Background>, BackgroundError> {
        let invalid = |source| BackgroundError::InvalidOptions {
            effect: PARTICLE_NETWORK.to_string(),
            source,
        };
        let params = ParticleOptions::from_map(options)
            .and_then(|options| options.resolve(context.surface.width))
            .map_err(invalid)?;

        let field = ParticleField::create(Some(context.surface), params)?;
        Ok(Box::new(field))
    }
}

pub struct BackgroundRegistry {
    factories: BTreeMap<String, Box<dyn BackgroundFactory>>,
}

impl Default for BackgroundRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl BackgroundRegistry {
    // Registry holding only the particle network
    pub fn new() -> Self {
        let mut registry = Self {
            factories: BTreeMap::new(),
        };
        registry.register(PARTICLE_NETWORK, Box::new(ParticleNetworkFactory));
        registry
    }

    // Particle network plus every external effect from the catalog
    pub fn with_effects(runtime: Option<Arc<dyn EffectRuntime>>) -> Self {
        let mut registry = Self::new();
        for effect in effects::catalog() {
            let id = effect.id;
            let factory = ExternalEffectFactory::new(effect, runtime.clone());
            registry.register(id, Box::new(factory));
        }
        registry
    }

    pub fn register(&mut self, id: &str, factory: Box<dyn BackgroundFactory>) {
        self.factories.insert(id.to_string(), factory);
    }

    pub fn contains(&self, id: &str) -> bool {
        self.factories.contains_key(id)
    }

    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    // Resolve an identifier to a registered one, falling back to the default
    pub fn resolve<'a>(&self, id: &'a str) -> &'a str {
        if self.contains(id) {
            id
        } else if id == NO_BACKGROUND {
            PARTICLE_NETWORK
        } else {
            log::warn!("Unknown background type: {}, defaulting to particle network", id);
            PARTICLE_NETWORK
        }
    }

    fn factory(&self, id: &str) -> Option<&dyn BackgroundFactory> {
        self.factories.get(id).map(|f| f.as_ref())
    }
}

pub struct BackgroundManager {
    registry: BackgroundRegistry,
    surface: Option<SurfaceSize>,
    current: Option<Box<dyn Background>>,
    requested: Option<String>,
    options: Map<String, Value>,
}

impl BackgroundManager {
    pub fn new(
        registry: BackgroundRegistry,
        surface: Option<SurfaceSize>,
        config: &BackgroundConfig,
    ) -> Self {
        let mut manager = Self {
            registry,
            surface,
            current: None,
            requested: None,
            options: Map::new(),
        };

        if surface.is_none() {
            log::error!("{}", BackgroundError::SurfaceMissing);
            return manager;
        }

        manager.load(&config.kind, config.options.clone());
        manager
    }

    // Replace the current background with `kind`
    pub fn load(&mut self, kind: &str, options: Map<String, Value>) {
        self.cleanup();

        let Some(surface) = self.surface else {
            log::error!("{}", BackgroundError::SurfaceMissing);
            return;
        };
        let context = BackgroundContext { surface };

        let resolved = self.registry.resolve(kind).to_string();
        self.current = self.create_with_fallback(&resolved, &options, &context);
        self.requested = Some(kind.to_string());
        self.options = options;

        if let Some(current) = &self.current {
            log::info!("Background '{}' active (requested '{}')", current.name(), kind);
        }
    }

    pub fn switch_background(&mut self, kind: &str, options: Map<String, Value>) {
        self.load(kind, options);
    }

    // Recreate the current background with its last options
    pub fn reload(&mut self) {
        let kind = self.requested.clone().unwrap_or_else(|| PARTICLE_NETWORK.to_string());
        let options = self.options.clone();
        self.load(&kind, options);
    }

    // Update the running background in place; returns whether it took them
    pub fn set_options(&mut self, options: Map<String, Value>) -> bool {
        let Some(current) = self.current.as_mut() else {
            return false;
        };

        match current.set_options(&options) {
            Ok(()) => {
                log::debug!("Updated {} option(s) on '{}'", options.len(), current.name());
                // A later reload should come back with these values
                let previous = std::mem::take(&mut self.options);
                self.options = effects::merge_options(previous, &options);
                true
            }
            Err(e) => {
                log::error!("{}", e);
                false
            }
        }
    }

    pub fn options(&self) -> &Map<String, Value> {
        &self.options
    }

    fn create_with_fallback(
        &self,
        id: &str,
        options: &Map<String, Value>,
        context: &BackgroundContext,
    ) -> Option<Box<dyn Background>> {
        let factory = self.registry.factory(id)?;
        match factory.create(options, context) {
            Ok(background) => return Some(background),
            Err(e) => log::error!("{}", e),
        }

        // External effect options mean nothing to the particle field
        let fallback = self.registry.factory(PARTICLE_NETWORK)?;
        match fallback.create(&Map::new(), context) {
            Ok(background) => {
                log::warn!("Falling back to particle network background");
                Some(background)
            }
            Err(e) => {
                log::error!("Fallback background failed: {}", e);
                None
            }
        }
    }

    // Destroy the current background, if any
    pub fn cleanup(&mut self) {
        if let Some(mut current) = self.current.take() {
            current.destroy();
        }
    }

    pub fn update(&mut self, pointer: &PointerState) {
        if let Some(current) = self.current.as_mut() {
            current.update(pointer);
        }
    }

    pub fn render(&self, surface: &mut dyn RenderSurface) {
        if let Some(current) = &self.current {
            current.render(surface);
        }
    }

    pub fn resize(&mut self, size: SurfaceSize) {
        self.surface = Some(size);
        if let Some(current) = self.current.as_mut() {
            current.resize(size);
        }
    }

    pub fn requested(&self) -> Option<&str> {
        self.requested.as_deref()
    }

    pub fn active(&self) -> Option<&str> {
        self.current.as_ref().map(|c| c.name())
    }

    pub fn stats(&self) -> Option<FrameStats> {
        self.current.as_ref().and_then(|c| c.stats())
    }

    pub fn registry(&self) -> &BackgroundRegistry {
        &self.registry
    }
}

impl Drop for BackgroundManager {
    fn drop(&mut self) {
        self.cleanup();
    }
}
