//! Error types for sheet generation.
//!
//! [`WallSheetError`] is the single error returned by the public API. Each
//! variant wraps the error of one pipeline stage.

use std::io;

use thiserror::Error;

use wallsheet_core::error::GeometryError;

use crate::{export::BackendError, request::ValidationError};

/// The main error type for sheet generation.
#[derive(Debug, Error)]
pub enum WallSheetError {
    #[error("Invalid request: {0}")]
    Validation(#[from] ValidationError),

    #[error("Geometry error: {0}")]
    Geometry(#[from] GeometryError),

    #[error("Export error: {0}")]
    Backend(#[from] BackendError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}
