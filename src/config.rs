/*
 * Configuration Module
 *
 * Host configuration as read from a JSON file:
 *
 *   { "type": "particleNetwork", "options": { "particleCount": 80, ... } }
 *
 * Options are effect specific. For the particle field every key is optional
 * and is merged over the viewport-dependent defaults from NetworkParams.
 */

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::color::Color;
use crate::error::ConfigError;
use crate::params::{ColorScheme, NetworkParams, SizeRange};

pub const PARTICLE_NETWORK: &str = "particleNetwork";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackgroundConfig {
    #[serde(rename = "type", default = "default_kind")]
    pub kind: String,
    #[serde(default)]
    pub options: Map<String, Value>,
}

fn default_kind() -> String {
    PARTICLE_NETWORK.to_string()
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            kind: default_kind(),
            options: Map::new(),
        }
    }
}

impl BackgroundConfig {
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub particle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub particle_alt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_active: Option<String>,
}

// Partial particle field options; absent keys fall back to defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticleOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub particle_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_connection_distance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor_influence_radius: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor_attraction_strength: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub particle_speed: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub particle_size: Option<SizeOptions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<ColorOptions>,
}

impl ParticleOptions {
    pub fn from_map(options: &Map<String, Value>) -> Result<Self, ConfigError> {
        Ok(serde_json::from_value(Value::Object(options.clone()))?)
    }

    pub fn to_map(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }

    // Full option set describing the given parameters
    pub fn from_params(params: &NetworkParams) -> Self {
        Self {
            particle_count: Some(params.particle_count),
            max_connection_distance: Some(params.max_connection_distance),
            cursor_influence_radius: Some(params.cursor_influence_radius),
            cursor_attraction_strength: Some(params.cursor_attraction_strength),
            particle_speed: Some(params.particle_speed),
            particle_size: Some(SizeOptions {
                min: Some(params.particle_size.min),
                max: Some(params.particle_size.max),
            }),
            colors: Some(ColorOptions {
                particle: Some(params.colors.particle.to_string()),
                particle_alt: Some(params.colors.particle_alt.to_string()),
                connection: Some(params.colors.connection.to_string()),
                connection_active: Some(params.colors.connection_active.to_string()),
            }),
        }
    }

    // Merge over the defaults for this viewport and validate the result
    pub fn resolve(&self, viewport_width: f64) -> Result<NetworkParams, ConfigError> {
        self.merge_over(&NetworkParams::for_viewport(viewport_width))
    }

    // Merge over `defaults` field by field and validate the result
    pub fn merge_over(&self, defaults: &NetworkParams) -> Result<NetworkParams, ConfigError> {
        let size = self.particle_size.clone().unwrap_or_default();
        let colors = self.colors.clone().unwrap_or_default();

        let params = NetworkParams {
            particle_count: self.particle_count.unwrap_or(defaults.particle_count),
            max_connection_distance: self
                .max_connection_distance
                .unwrap_or(defaults.max_connection_distance),
            cursor_influence_radius: self
                .cursor_influence_radius
                .unwrap_or(defaults.cursor_influence_radius),
            cursor_attraction_strength: self
                .cursor_attraction_strength
                .unwrap_or(defaults.cursor_attraction_strength),
            particle_speed: self.particle_speed.unwrap_or(defaults.particle_speed),
            particle_size: SizeRange {
                min: size.min.unwrap_or(defaults.particle_size.min),
                max: size.max.unwrap_or(defaults.particle_size.max),
            },
            colors: ColorScheme {
                particle: pick_color(colors.particle.as_deref(), defaults.colors.particle)?,
                particle_alt: pick_color(
                    colors.particle_alt.as_deref(),
                    defaults.colors.particle_alt,
                )?,
                connection: pick_color(colors.connection.as_deref(), defaults.colors.connection)?,
                connection_active: pick_color(
                    colors.connection_active.as_deref(),
                    defaults.colors.connection_active,
                )?,
            },
        };

        params.validate()?;
        Ok(params)
    }
}

fn pick_color(value: Option<&str>, fallback: Color) -> Result<Color, ConfigError> {
    match value {
        Some(text) => Color::parse(text),
        None => Ok(fallback),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_type_defaults_to_particle_network() {
        let config = BackgroundConfig::from_json_str("{}").unwrap();
        assert_eq!(config.kind, PARTICLE_NETWORK);
        assert!(config.options.is_empty());
    }

    #[test]
    fn partial_options_merge_over_defaults() {
        let config = BackgroundConfig::from_json_str(
            r##"{
                "type": "particleNetwork",
                "options": {
                    "particleCount": 120,
                    "particleSize": { "max": 6 },
                    "colors": { "particle": "#ff0000" }
                }
            }"##,
        )
        .unwrap();

        let options = ParticleOptions::from_map(&config.options).unwrap();
        let params = options.resolve(1920.0).unwrap();

        assert_eq!(params.particle_count, 120);
        assert_eq!(params.particle_size, SizeRange { min: 2.0, max: 6.0 });
        assert_eq!(params.colors.particle, Color::rgb(255, 0, 0));
        assert_eq!(params.colors.particle_alt, Color::rgb(255, 255, 255));
        assert_eq!(params.cursor_influence_radius, 200.0);
    }

    #[test]
    fn merge_keeps_unmentioned_fields_of_the_base() {
        let mut base = NetworkParams::default();
        base.particle_count = 12;
        base.colors.particle = Color::rgb(1, 2, 3);

        let options = ParticleOptions {
            particle_speed: Some(0.7),
            ..ParticleOptions::default()
        };
        let merged = options.merge_over(&base).unwrap();
        assert_eq!(merged.particle_speed, 0.7);
        assert_eq!(merged.particle_count, 12);
        assert_eq!(merged.colors.particle, Color::rgb(1, 2, 3));
    }

    #[test]
    fn narrow_viewport_defaults_apply() {
        let params = ParticleOptions::default().resolve(480.0).unwrap();
        assert_eq!(params.particle_count, 50);
        assert_eq!(params.cursor_influence_radius, 150.0);
    }

    #[test]
    fn bad_color_is_reported() {
        let options = ParticleOptions {
            colors: Some(ColorOptions {
                connection: Some("not-a-color".into()),
                ..ColorOptions::default()
            }),
            ..ParticleOptions::default()
        };
        assert!(matches!(
            options.resolve(1024.0),
            Err(ConfigError::InvalidValue { field: "color", .. })
        ));
    }

    #[test]
    fn params_survive_a_trip_through_options() {
        let mut params = NetworkParams::default();
        params.particle_count = 33;
        params.colors.connection = Color::rgba(10, 20, 30, 0.5);

        let map = ParticleOptions::from_params(&params).to_map();
        let resolved = ParticleOptions::from_map(&map).unwrap().resolve(100.0).unwrap();
        assert_eq!(resolved, params);
    }
}
