//! Error types for Horizon GridForm.
//!
//! Controller operations never fail: misses and stale targets degrade to
//! no-ops. Only configuration loading and validation return these errors.

use std::path::PathBuf;

/// Result type alias for GridForm operations.
pub type Result<T> = std::result::Result<T, GridFormError>;

/// Errors that can occur while configuring a GridForm controller.
#[derive(Debug, thiserror::Error)]
pub enum GridFormError {
    /// The configured interaction mode names no known mode.
    #[error("Invalid interaction mode '{0}', possible values: form, formDialog")]
    InvalidInteractionMode(String),

    /// Configuration text could not be parsed.
    #[error("Failed to parse {format} configuration: {message}")]
    ConfigParse {
        format: &'static str,
        message: String,
    },

    /// The configuration file extension is not a supported format.
    #[error("Unsupported configuration format for '{0}', expected .json or .toml")]
    UnsupportedConfigFormat(PathBuf),

    /// File I/O error.
    #[error("Failed to read configuration '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl GridFormError {
    /// Create an invalid interaction mode error.
    pub fn invalid_interaction_mode(mode: impl Into<String>) -> Self {
        Self::InvalidInteractionMode(mode.into())
    }

    /// Create a parse error.
    pub fn config_parse(format: &'static str, message: impl Into<String>) -> Self {
        Self::ConfigParse {
            format,
            message: message.into(),
        }
    }

    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<serde_json::Error> for GridFormError {
    fn from(err: serde_json::Error) -> Self {
        Self::config_parse("JSON", err.to_string())
    }
}

impl From<toml::de::Error> for GridFormError {
    fn from(err: toml::de::Error) -> Self {
        Self::config_parse("TOML", err.to_string())
    }
}
