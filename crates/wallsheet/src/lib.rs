//! Wallsheet - Technical sheets for cantilever retaining walls
//!
//! This library turns a structural design request into a single drawing
//! sheet. The sheet holds three views of wall section 1-1 (reinforcement,
//! drainage and a pseudo-3D projection) and the four reinforcement mesh
//! faces. It is written as DXF R12 or SVG.

pub mod artifact;
pub mod compose;
pub mod config;
pub mod export;
pub mod layout;
pub mod request;

mod error;

pub use wallsheet_core::{annotation, color, contour, draw, geometry, schedule, steel, wall};

pub use error::WallSheetError;
pub use wallsheet_core::error::GeometryError;

use std::path::PathBuf;

use log::{debug, info, trace};
use serde::Serialize;

use config::{AppConfig, OutputFormat};
use export::{DrawingBackend, DxfBackend, SvgBackend};
use layout::Sheet;
use request::SheetRequest;
use wall::{WallParameters, WallProfile, compute_wall_profile};

/// Builder for generating wall sheets.
///
/// # Examples
///
/// ```rust,no_run
/// use wallsheet::{SheetBuilder, config::AppConfig, request::SheetRequest};
///
/// let request = SheetRequest::from_json(r#"{"predim": {"inputValues": {"B18": 4.0}}}"#)
///     .expect("Invalid request");
///
/// let builder = SheetBuilder::new(AppConfig::default());
/// let dxf = builder.render(&request).expect("Failed to render");
/// assert!(dxf.trim_ascii_end().ends_with(b"EOF"));
///
/// // Or write it into the configured output directory
/// let path = builder.write(&request).expect("Failed to write");
/// println!("{}", path.display());
/// ```
#[derive(Debug, Default)]
pub struct SheetBuilder {
    config: AppConfig,
}

impl SheetBuilder {
    /// Create a new sheet builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Derive the wall profile of a request.
    ///
    /// # Errors
    ///
    /// Returns [`WallSheetError::Geometry`] if the parameters do not describe
    /// a wall.
    pub fn profile(&self, request: &SheetRequest) -> Result<WallProfile, WallSheetError> {
        let profile = compute_wall_profile(request.parameters())?;
        trace!(profile:?; "Wall profile");
        Ok(profile)
    }

    /// Lay out every view of the sheet.
    ///
    /// # Errors
    ///
    /// Returns [`WallSheetError::Geometry`] for parameters or configuration
    /// the geometry cannot be derived from.
    pub fn build(&self, request: &SheetRequest) -> Result<Sheet, WallSheetError> {
        info!(parameters:? = request.parameters(); "Building wall sheet");
        let profile = self.profile(request)?;
        let sheet = layout::layout_views(&profile, request, &self.config)?;
        debug!(views = sheet.views().len(); "Sheet built");
        Ok(sheet)
    }

    /// Render the sheet in the configured output format.
    ///
    /// # Errors
    ///
    /// Returns [`WallSheetError`] for geometry or serialization failures.
    pub fn render(&self, request: &SheetRequest) -> Result<Vec<u8>, WallSheetError> {
        let sheet = self.build(request)?;
        let bytes = match self.config.output().format() {
            OutputFormat::Dxf => render_with(sheet, DxfBackend::new())?,
            OutputFormat::Svg => render_with(sheet, SvgBackend::new())?,
        };
        info!(
            format:% = self.config.output().format(),
            bytes = bytes.len();
            "Sheet rendered"
        );
        Ok(bytes)
    }

    /// Render the sheet and write it into the configured output directory.
    ///
    /// # Errors
    ///
    /// Returns [`WallSheetError`] for rendering failures and
    /// [`WallSheetError::Io`] if the file cannot be written.
    pub fn write(&self, request: &SheetRequest) -> Result<PathBuf, WallSheetError> {
        let bytes = self.render(request)?;
        let output = self.config.output();
        let path = artifact::write_artifact(output.directory(), output.format(), &bytes)?;
        Ok(path)
    }
}

fn render_with<B: DrawingBackend>(sheet: Sheet, mut backend: B) -> Result<Vec<u8>, WallSheetError> {
    sheet.emit(&mut backend)?;
    Ok(backend.serialize()?)
}

/// Profile coordinates and parameters of a request, as reported by `validate`.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileReport {
    pub points: usize,
    pub parameters: ParameterReport,
    pub coordinates: Vec<CoordinateReport>,
}

/// The derived wall dimensions.
#[derive(Debug, Clone, Serialize)]
pub struct ParameterReport {
    pub a: f64,
    pub b: f64,
    pub total_height: f64,
    pub base_total: f64,
    pub footing_height: f64,
    pub stem_height: f64,
    pub stem_width: f64,
    pub stem_position: f64,
    pub toe: f64,
    pub heel: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CoordinateReport {
    pub x: f64,
    pub y: f64,
    pub label: String,
}

impl ProfileReport {
    pub fn new(profile: &WallProfile) -> Self {
        let WallParameters { a, b, .. } = *profile.parameters();
        let coordinates: Vec<CoordinateReport> = profile
            .vertices()
            .iter()
            .map(|vertex| CoordinateReport {
                x: vertex.point().x(),
                y: vertex.point().y(),
                label: vertex.label(),
            })
            .collect();

        Self {
            points: coordinates.len(),
            parameters: ParameterReport {
                a,
                b,
                total_height: profile.total_height(),
                base_total: profile.base_total(),
                footing_height: profile.footing_height(),
                stem_height: profile.stem_height(),
                stem_width: profile.stem_width(),
                stem_position: profile.stem_position(),
                toe: profile.toe(),
                heel: profile.heel(),
            },
            coordinates,
        }
    }
}
