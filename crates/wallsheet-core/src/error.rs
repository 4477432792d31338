//! Error types for geometric computations.
//!
//! [`GeometryError`] covers every way the wall pipeline can reject its
//! inputs once they have been parsed into numbers.

use thiserror::Error;

/// Errors raised while deriving wall, contour or steel geometry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("`{field}` must not be zero")]
    ZeroDivisor { field: &'static str },

    #[error("`{quantity}` is not a finite number")]
    NonFinite { quantity: &'static str },

    #[error("`{field}` must be positive, got {value}")]
    NonPositiveParameter { field: &'static str, value: f64 },

    #[error("total height must be positive, got {height}")]
    NonPositiveHeight { height: f64 },

    #[error("total height {height} exceeds the supported maximum of {limit}")]
    HeightTooLarge { height: f64, limit: f64 },

    #[error("wall profile is not a simple polygon")]
    NotSimple,

    #[error("contour needs at least {required} profile vertices, got {actual}")]
    TooFewVertices { required: usize, actual: usize },

    #[error("coverage must be positive, got {coverage}")]
    NonPositiveCoverage { coverage: f64 },

    #[error("coverage {coverage} must be smaller than {limit} (half the shortest edge)")]
    CoverageTooLarge { coverage: f64, limit: f64 },

    #[error("bar spacing must be positive, got {spacing}")]
    NonPositiveSpacing { spacing: f64 },

    #[error("mesh pitch must be positive, got {pitch}")]
    NonPositivePitch { pitch: f64 },

    #[error("{what} would need more than {limit} elements")]
    TooManyElements { what: &'static str, limit: usize },
}

impl GeometryError {
    /// Short machine-readable kind, used for diagnostic codes.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ZeroDivisor { .. } => "zero_divisor",
            Self::NonFinite { .. } => "non_finite",
            Self::NonPositiveParameter { .. } => "non_positive_parameter",
            Self::NonPositiveHeight { .. } => "non_positive_height",
            Self::HeightTooLarge { .. } => "height_too_large",
            Self::NotSimple => "not_simple",
            Self::TooFewVertices { .. } => "too_few_vertices",
            Self::NonPositiveCoverage { .. } => "non_positive_coverage",
            Self::CoverageTooLarge { .. } => "coverage_too_large",
            Self::NonPositiveSpacing { .. } => "non_positive_spacing",
            Self::NonPositivePitch { .. } => "non_positive_pitch",
            Self::TooManyElements { .. } => "too_many_elements",
        }
    }
}

/// Returns `value` or a [`GeometryError::NonFinite`] naming `quantity`.
pub(crate) fn ensure_finite(quantity: &'static str, value: f64) -> Result<f64, GeometryError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(GeometryError::NonFinite { quantity })
    }
}
