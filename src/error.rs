/*
 * Error Module
 *
 * Error types for configuration loading and background creation.
 * Background errors never escape the manager: they are logged and
 * turned into a fallback so the host keeps running.
 */

use std::fmt;

// Errors raised while reading or validating configuration
#[derive(Debug)]
pub enum ConfigError {
    // The configuration file could not be read
    Io(std::io::Error),
    // The configuration file is not valid JSON for the expected shape
    Parse(serde_json::Error),
    // A value parsed but is outside its allowed range
    InvalidValue { field: &'static str, reason: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "Failed to read configuration: {}", e),
            ConfigError::Parse(e) => write!(f, "Failed to parse configuration: {}", e),
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "Invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::InvalidValue { .. } => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

// Errors raised while creating a background effect
#[derive(Debug)]
pub enum BackgroundError {
    // The external runtime that provides this effect is not loaded
    RuntimeUnavailable { effect: String },
    // The options object could not be interpreted for this effect
    InvalidOptions { effect: String, source: ConfigError },
    // There is no surface to draw on
    SurfaceMissing,
    // The effect can't change its options while running
    OptionsUnsupported { effect: String },
}

impl fmt::Display for BackgroundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackgroundError::RuntimeUnavailable { effect } => {
                write!(f, "{} not found. Make sure its runtime is loaded.", effect)
            }
            BackgroundError::InvalidOptions { effect, source } => {
                write!(f, "Invalid options for {}: {}", effect, source)
            }
            BackgroundError::SurfaceMissing => write!(f, "Background surface not found"),
            BackgroundError::OptionsUnsupported { effect } => {
                write!(f, "{} does not support changing options", effect)
            }
        }
    }
}

impl std::error::Error for BackgroundError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BackgroundError::InvalidOptions { source, .. } => Some(source),
            _ => None,
        }
    }
}
