/*
 * Network Parameters Module
 *
 * This module defines NetworkParams, the configuration snapshot a particle
 * field is built from. A field never mutates its parameters; changing any of
 * them means rebuilding the field. TunableParams wraps a copy for the control
 * panel and provides snapshot-based change detection.
 */

use crate::color::Color;
use crate::error::ConfigError;

// Viewports at or below this width get the lighter defaults
pub const NARROW_VIEWPORT_MAX: f64 = 768.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeRange {
    pub min: f64,
    pub max: f64,
}

impl Default for SizeRange {
    fn default() -> Self {
        Self { min: 2.0, max: 4.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorScheme {
    pub particle: Color,
    pub particle_alt: Color,
    pub connection: Color,
    pub connection_active: Color,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            particle: Color::rgb(0x4a, 0x9e, 0xff),
            particle_alt: Color::rgb(0xff, 0xff, 0xff),
            connection: Color::rgba(74, 158, 255, 0.3),
            connection_active: Color::rgba(74, 158, 255, 0.6),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NetworkParams {
    pub particle_count: usize,
    pub max_connection_distance: f64,
    pub cursor_influence_radius: f64,
    pub cursor_attraction_strength: f64,
    pub particle_speed: f64,
    pub particle_size: SizeRange,
    pub colors: ColorScheme,
}

impl Default for NetworkParams {
    fn default() -> Self {
        Self::for_viewport(NARROW_VIEWPORT_MAX + 1.0)
    }
}

impl NetworkParams {
    // Defaults scale with the viewport: small screens get fewer particles
    // and a smaller pointer radius
    pub fn for_viewport(width: f64) -> Self {
        let wide = width > NARROW_VIEWPORT_MAX;
        Self {
            particle_count: if wide { 80 } else { 50 },
            max_connection_distance: 150.0,
            cursor_influence_radius: if wide { 200.0 } else { 150.0 },
            cursor_attraction_strength: 0.015,
            particle_speed: 0.2,
            particle_size: SizeRange::default(),
            colors: ColorScheme::default(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("maxConnectionDistance", self.max_connection_distance)?;
        non_negative("cursorInfluenceRadius", self.cursor_influence_radius)?;
        non_negative("cursorAttractionStrength", self.cursor_attraction_strength)?;
        non_negative("particleSpeed", self.particle_speed)?;

        let size = self.particle_size;
        if !(size.min.is_finite() && size.max.is_finite()) || size.min <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "particleSize",
                reason: format!("sizes must be positive and finite, got {:?}", size),
            });
        }
        if size.max < size.min {
            return Err(ConfigError::InvalidValue {
                field: "particleSize",
                reason: format!("max {} is below min {}", size.max, size.min),
            });
        }
        if self.particle_count > MAX_PARTICLES {
            return Err(ConfigError::InvalidValue {
                field: "particleCount",
                reason: format!("{} exceeds the limit of {}", self.particle_count, MAX_PARTICLES),
            });
        }
        Ok(())
    }

    // Get parameter ranges for UI sliders
    pub fn particle_count_range() -> std::ops::RangeInclusive<usize> {
        0..=400
    }

    pub fn distance_range() -> std::ops::RangeInclusive<f64> {
        10.0..=400.0
    }

    pub fn attraction_range() -> std::ops::RangeInclusive<f64> {
        0.0..=0.1
    }

    pub fn speed_range() -> std::ops::RangeInclusive<f64> {
        0.0..=2.0
    }

    pub fn size_range() -> std::ops::RangeInclusive<f64> {
        0.5..=12.0
    }
}

// Pairwise connection recomputation is O(n^2); past this the field stops
// being interactive
pub const MAX_PARTICLES: usize = 2_000;

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field,
            reason: format!("expected a finite, non-negative number, got {}", value),
        })
    }
}

// Parameters being edited in the control panel
pub struct TunableParams {
    pub params: NetworkParams,
    previous_values: Option<NetworkParams>,
}

impl TunableParams {
    pub fn new(params: NetworkParams) -> Self {
        Self {
            params,
            previous_values: None,
        }
    }

    // Take a snapshot of current parameter values for change detection
    pub fn take_snapshot(&mut self) {
        self.previous_values = Some(self.params.clone());
    }

    // True when anything changed since the last snapshot
    pub fn detect_changes(&self) -> bool {
        match &self.previous_values {
            Some(prev) => *prev != self.params,
            None => false,
        }
    }

    // Sliders can leave min above max; keep the range ordered
    pub fn normalize(&mut self) {
        let size = &mut self.params.particle_size;
        if size.max < size.min {
            size.max = size.min;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_defaults() {
        let narrow = NetworkParams::for_viewport(768.0);
        assert_eq!(narrow.particle_count, 50);
        assert_eq!(narrow.cursor_influence_radius, 150.0);

        let wide = NetworkParams::for_viewport(1280.0);
        assert_eq!(wide.particle_count, 80);
        assert_eq!(wide.cursor_influence_radius, 200.0);
        assert_eq!(wide.max_connection_distance, 150.0);
        assert_eq!(wide.cursor_attraction_strength, 0.015);
        assert_eq!(wide.particle_speed, 0.2);
        assert_eq!(wide.particle_size, SizeRange { min: 2.0, max: 4.0 });
    }

    #[test]
    fn validation_rejects_bad_values() {
        assert!(NetworkParams::default().validate().is_ok());

        let mut params = NetworkParams::default();
        params.particle_speed = f64::NAN;
        assert!(params.validate().is_err());

        let mut params = NetworkParams::default();
        params.particle_size = SizeRange { min: 4.0, max: 2.0 };
        assert!(params.validate().is_err());

        let mut params = NetworkParams::default();
        params.max_connection_distance = -1.0;
        assert!(params.validate().is_err());
    }

    #[test]
    fn change_detection_uses_snapshot() {
        let mut tunable = TunableParams::new(NetworkParams::default());
        assert!(!tunable.detect_changes());

        tunable.take_snapshot();
        assert!(!tunable.detect_changes());

        tunable.params.particle_count += 1;
        assert!(tunable.detect_changes());
    }
}
