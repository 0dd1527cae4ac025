/*
 * Color Module
 *
 * Colors arrive from configuration as CSS-style strings ("#4a9eff",
 * "rgba(74, 158, 255, 0.3)"). This module parses them once into a plain
 * RGBA value so the renderer can swap the alpha channel per draw call
 * instead of rewriting strings every frame.
 */

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    // Same channels, alpha replaced (clamped to [0, 1])
    pub fn with_alpha(self, alpha: f64) -> Self {
        let a = if alpha.is_finite() { alpha.clamp(0.0, 1.0) } else { 0.0 };
        Self { a, ..self }
    }

    pub fn to_f32_array(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32,
        ]
    }

    pub fn parse(input: &str) -> Result<Self, ConfigError> {
        let text = input.trim();
        if let Some(hex) = text.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| invalid(input));
        }

        let lower = text.to_ascii_lowercase();
        let (body, expects_alpha) = if let Some(rest) = lower.strip_prefix("rgba(") {
            (rest, true)
        } else if let Some(rest) = lower.strip_prefix("rgb(") {
            (rest, false)
        } else {
            return Err(invalid(input));
        };

        let body = body.strip_suffix(')').ok_or_else(|| invalid(input))?;
        let parts: Vec<&str> = body.split(',').map(str::trim).collect();
        let expected = if expects_alpha { 4 } else { 3 };
        if parts.len() != expected {
            return Err(invalid(input));
        }

        let channel = |s: &str| s.parse::<u8>().map_err(|_| invalid(input));
        let r = channel(parts[0])?;
        let g = channel(parts[1])?;
        let b = channel(parts[2])?;
        let a = if expects_alpha {
            let a = parts[3].parse::<f64>().map_err(|_| invalid(input))?;
            if !(0.0..=1.0).contains(&a) {
                return Err(invalid(input));
            }
            a
        } else {
            1.0
        };

        Ok(Self { r, g, b, a })
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    // from_str_radix alone would accept a sign
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let digits = match hex.len() {
        3 => hex.chars().flat_map(|c| [c, c]).collect::<String>(),
        6 => hex.to_string(),
        _ => return None,
    };
    let value = u32::from_str_radix(&digits, 16).ok()?;
    Some(Color::rgb(
        ((value >> 16) & 0xff) as u8,
        ((value >> 8) & 0xff) as u8,
        (value & 0xff) as u8,
    ))
}

fn invalid(input: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: "color",
        reason: format!("unrecognised color '{}'", input),
    }
}

impl FromStr for Color {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::parse(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {:.2})", self.r, self.g, self.b, self.a)
    }
}
