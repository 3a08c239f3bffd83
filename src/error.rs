//! Error handling for Morphtable
//!
//! Every error carries enough context (frame index, generator identity or
//! file path) to localize the fault without inspecting intermediate buffers.
//! None of them are retried internally.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for Morphtable operations
pub type Result<T> = std::result::Result<T, MorphError>;

/// Main error type for Morphtable operations
#[derive(Error, Debug)]
pub enum MorphError {
    // Configuration Errors
    #[error("Invalid configuration: {field} {reason}")]
    InvalidConfiguration { field: &'static str, reason: String },

    #[error("Invalid parameter: {name} = {value} is outside [0, 1]")]
    InvalidParameter { name: &'static str, value: f64 },

    // Generation Errors
    #[error("Generation failed in '{generator}' at frame {frame_index}: {reason}")]
    GenerationFailure {
        generator: String,
        frame_index: usize,
        reason: String,
    },

    // Catalog Errors
    #[error("Unknown generator '{name}' (available: {})", available.join(", "))]
    UnknownGenerator { name: String, available: Vec<String> },

    #[error("Invalid metadata for generator '{generator}': {reason}")]
    InvalidMetadata { generator: String, reason: String },

    #[error("Generator '{id}' is already registered")]
    DuplicateGenerator { id: String },

    // File Errors
    #[error("Export failed for {}: {reason}", path.display())]
    ExportFailure {
        path: PathBuf,
        reason: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Invalid wavetable file {}: {reason}", path.display())]
    InvalidAudio { path: PathBuf, reason: String },

    // I/O Errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization Errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl MorphError {
    /// Shorthand for an `InvalidConfiguration` error
    pub fn config(field: &'static str, reason: impl Into<String>) -> Self {
        MorphError::InvalidConfiguration {
            field,
            reason: reason.into(),
        }
    }

    /// Wrap a lower-level failure that happened while writing `path`
    pub fn export<E>(path: impl Into<PathBuf>, reason: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        MorphError::ExportFailure {
            path: path.into(),
            reason: reason.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            MorphError::InvalidConfiguration { .. } => "INVALID_CONFIGURATION",
            MorphError::InvalidParameter { .. } => "INVALID_PARAMETER",
            MorphError::GenerationFailure { .. } => "GENERATION_FAILURE",
            MorphError::UnknownGenerator { .. } => "UNKNOWN_GENERATOR",
            MorphError::InvalidMetadata { .. } => "INVALID_METADATA",
            MorphError::DuplicateGenerator { .. } => "DUPLICATE_GENERATOR",
            MorphError::ExportFailure { .. } => "EXPORT_FAILURE",
            MorphError::InvalidAudio { .. } => "INVALID_AUDIO",
            MorphError::Io(_) => "IO_ERROR",
            MorphError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Frame index the failure is attributed to, if any
    pub fn frame_index(&self) -> Option<usize> {
        match self {
            MorphError::GenerationFailure { frame_index, .. } => Some(*frame_index),
            _ => None,
        }
    }

    /// Get recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            MorphError::InvalidConfiguration { .. } => vec![
                "Supported sample rates: 44100, 48000, 96000",
                "Supported bit depths: 16, 24, 32",
                "Frame count and frame size must be at least 1",
            ],
            MorphError::GenerationFailure { .. } => vec![
                "Run 'morphtable-cli validate' to check the generator",
                "Make sure the formula returns one value per phase sample",
                "Guard divisions and logarithms against NaN/Infinity",
            ],
            MorphError::UnknownGenerator { .. } => {
                vec!["Run 'morphtable-cli list' to see available generators"]
            }
            MorphError::ExportFailure { .. } => vec![
                "Check that the output directory is writable",
                "Free up disk space",
                "Export to a different location",
            ],
            _ => vec![],
        }
    }
}
