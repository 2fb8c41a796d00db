//! Error types for field generation and persistence.

use thiserror::Error;

/// Errors that can occur while generating, writing or loading a field.
#[derive(Error, Debug)]
pub enum FieldError {
    /// Invalid sampling settings.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    /// Settings file could not be parsed.
    #[error("settings parse error: {0}")]
    SettingsParse(#[from] toml::de::Error),

    /// A serialized grid is malformed.
    #[error("malformed field: {0}")]
    Format(String),

    /// A serialized grid has the wrong number of distance values.
    #[error("field declares {expected} distances but contains {found}")]
    TokenCount {
        /// `nx * ny * nz` from the header.
        expected: usize,
        /// Distance tokens actually present.
        found: usize,
    },

    /// IO error reading or writing a field.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for field operations.
pub type Result<T> = std::result::Result<T, FieldError>;
