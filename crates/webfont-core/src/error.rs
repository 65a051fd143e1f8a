//! Error types for the webfont plugin

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, WebfontError>;

/// Main error type for the webfont plugin
///
/// Every failure a lifecycle hook can hit ends up here and is handed back
/// to the host, which fails the build step.
#[derive(Debug, Error)]
pub enum WebfontError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    #[error("No input files matched `{0}`")]
    NoInputFiles(String),

    #[error("Font generation failed: {0}")]
    Generation(#[from] GenerationError),

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Regeneration cancelled")]
    Cancelled,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl WebfontError {
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }
}

/// Configuration errors, raised before any build work starts
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Require `files` option")]
    MissingFiles,

    #[error("Require `dest` option")]
    MissingDest,

    #[error("Unknown stylesheet template: {0}")]
    UnknownTemplate(String),

    #[error("Unknown font format: {0}")]
    UnknownFormat(String),

    #[error("Required font format missing from `formats`: {0}")]
    MissingFormat(String),

    #[error("Invalid `files` pattern `{pattern}`: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Invalid start code point: {0:#X}")]
    InvalidStartUnicode(u32),

    #[error("Invalid font name: {0:?}")]
    InvalidFontName(String),
}

/// Font generation errors reported by (or about) the generation service
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Generator `{generator}` did not produce the {format} format")]
    MissingFormat { generator: String, format: String },

    #[error("Command `{command}` exited with {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("Failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Backend error: {0}")]
    Backend(String),
}
