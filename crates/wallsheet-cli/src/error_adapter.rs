//! Error adapter for converting WallSheetError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI. Every error gets
//! a stable code; errors the user can fix also get help text.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use wallsheet::{
    GeometryError, WallSheetError, export::BackendError, request::ValidationError,
    wall::MAX_TOTAL_HEIGHT,
};

/// Adapter for [`WallSheetError`].
pub struct ErrorAdapter<'a>(pub &'a WallSheetError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

fn validation_help(err: &ValidationError) -> &'static str {
    match err {
        ValidationError::Malformed(_) => "check that the request file is valid JSON",
        ValidationError::MissingField { .. } => {
            "the request needs `predim.inputValues` with the wall inputs B18, B19, D51, D47, D49 and D45"
        }
        ValidationError::NotNumeric { .. } => {
            "the sheet origin `x` and `y` must be numbers or numeric strings"
        }
        ValidationError::InvalidSchedule { .. } => {
            "`aceros` must be a list of `{tipo, aceros: [{tipoAcero, diametro, cantidad, espaciamiento}]}` entries"
        }
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            WallSheetError::Validation(_) => "wallsheet::validation",
            WallSheetError::Geometry(err) => {
                return Some(Box::new(format!("wallsheet::geometry::{}", err.kind())));
            }
            WallSheetError::Backend(_) => "wallsheet::export",
            WallSheetError::Io(_) => "wallsheet::io",
            WallSheetError::Config(_) => "wallsheet::config",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            WallSheetError::Validation(err) => validation_help(err),
            WallSheetError::Geometry(GeometryError::TooManyElements { .. }) => {
                "increase the bar spacing or mesh pitch in the configuration"
            }
            WallSheetError::Geometry(_) => {
                return Some(Box::new(format!(
                    "D51, D47, D49 and D45 must be positive, A + B must be positive and at most {MAX_TOTAL_HEIGHT} m, and the cover must fit inside the wall"
                )));
            }
            WallSheetError::Backend(BackendError::UnknownLayer { .. }) => {
                "every view must declare the layers it draws on"
            }
            WallSheetError::Config(_) => "check the TOML configuration file",
            WallSheetError::Backend(_) | WallSheetError::Io(_) => return None,
        };
        Some(Box::new(help))
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}
