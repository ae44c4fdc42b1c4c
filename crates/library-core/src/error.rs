use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the project library.
#[derive(Error, Debug)]
pub enum LibraryError {
    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A JSON document could not be parsed.
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// The catalog directory does not exist.
    #[error("Catalog directory not found: {0}")]
    CatalogNotFound(PathBuf),

    /// No project carries the requested id.
    #[error("Unknown project: {0}")]
    UnknownProject(String),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the library crates.
pub type Result<T> = std::result::Result<T, LibraryError>;
