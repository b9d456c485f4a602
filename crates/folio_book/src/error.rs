//! Error types for folio_book

use folio_core::GeometryError;
use folio_theme::ThemeError;
use thiserror::Error;

/// Errors raised while configuring or mounting a book
#[derive(Error, Debug)]
pub enum BookError {
    /// Title is empty after trimming
    #[error("book title is empty")]
    EmptyTitle,

    /// Unknown color or pattern key
    #[error(transparent)]
    Theme(#[from] ThemeError),

    /// Invalid book dimensions
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Motion config could not be parsed
    #[error("failed to parse motion config: {0}")]
    Config(#[from] toml::de::Error),

    /// Motion config parsed but holds unusable values
    #[error("invalid motion config: {0}")]
    InvalidMotion(String),
}

/// Result type for folio_book operations
pub type Result<T> = std::result::Result<T, BookError>;
