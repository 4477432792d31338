//! Configuration types for sheet generation.
//!
//! Every section implements [`serde::Deserialize`] and falls back to its
//! defaults when absent, so an empty TOML document is a valid configuration.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration root.
//! - [`GeometryConfig`] - Concrete cover and 3D projection depth.
//! - [`MeshConfig`] - Grid pitch of the face meshes.
//! - [`LayoutConfig`] - Placement of the views on the sheet.
//! - [`OutputConfig`] - Output format, directory and viewer.
//! - [`ReinforcementConfig`] - Bar rows per zone, from `wallsheet-core`.
//!
//! # Example
//!
//! ```
//! # use wallsheet::config::{AppConfig, OutputFormat};
//! let config: AppConfig = toml::from_str(
//!     r#"
//!     [output]
//!     format = "svg"
//!
//!     [reinforcement.stem_left]
//!     spacing = 0.15
//!     diameter = "5/8"
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.output().format(), OutputFormat::Svg);
//! assert_eq!(config.reinforcement().stem_left.spacing, 0.15);
//! assert_eq!(config.mesh().pitch(), 0.2);
//! ```

use std::{fmt, path::PathBuf, str::FromStr};

use serde::Deserialize;

use wallsheet_core::{contour::DEFAULT_COVERAGE, steel::ReinforcementConfig};

/// Top-level configuration root.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    geometry: GeometryConfig,

    #[serde(default)]
    reinforcement: ReinforcementConfig,

    #[serde(default)]
    mesh: MeshConfig,

    #[serde(default)]
    layout: LayoutConfig,

    #[serde(default)]
    output: OutputConfig,
}

impl AppConfig {
    pub fn geometry(&self) -> &GeometryConfig {
        &self.geometry
    }

    pub fn reinforcement(&self) -> &ReinforcementConfig {
        &self.reinforcement
    }

    pub fn mesh(&self) -> &MeshConfig {
        &self.mesh
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    pub fn output(&self) -> &OutputConfig {
        &self.output
    }

    /// Returns a copy with the output format replaced.
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.output.format = format;
        self
    }

    /// Returns a copy with the output directory replaced.
    pub fn with_output_dir(mut self, directory: impl Into<PathBuf>) -> Self {
        self.output.directory = directory.into();
        self
    }

    /// Returns a copy with the viewer command replaced.
    pub fn with_viewer(mut self, viewer: Option<String>) -> Self {
        self.output.viewer = viewer;
        self
    }
}

/// Geometry settings shared by every view.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeometryConfig {
    /// Concrete cover between the wall outline and the reinforcement contours.
    coverage: f64,

    /// Depth of the pseudo-3D projection, applied along 45°.
    projection_depth: f64,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            coverage: DEFAULT_COVERAGE,
            projection_depth: 2.0,
        }
    }
}

impl GeometryConfig {
    pub fn coverage(&self) -> f64 {
        self.coverage
    }

    pub fn projection_depth(&self) -> f64 {
        self.projection_depth
    }
}

/// Mesh face settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MeshConfig {
    pitch: f64,
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self { pitch: 0.2 }
    }
}

impl MeshConfig {
    /// Grid spacing of the mesh lines, in meters.
    pub fn pitch(&self) -> f64 {
        self.pitch
    }
}

/// Placement of the views on the sheet.
///
/// Wall views form the upper row and mesh faces the lower row. Both rows
/// start at the same x anchor, `origin.x + margin + first_view_inset`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Inner border margin.
    margin: f64,

    /// Distance from the inner border to the first view anchor.
    first_view_inset: f64,

    /// Horizontal distance between wall views.
    wall_pitch: f64,

    /// Horizontal distance between mesh faces.
    mesh_pitch: f64,

    /// Lift of the wall row above the inner border, before half the sheet height.
    wall_row_lift: f64,

    /// Lift of the mesh row above the sheet origin.
    mesh_row_lift: f64,

    /// Extra sheet width on top of the retained height `A`.
    base_width: f64,

    /// Extra sheet height on top of the retained height `A`.
    base_height: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            margin: 0.6,
            first_view_inset: 4.0,
            wall_pitch: 10.0,
            mesh_pitch: 10.0,
            wall_row_lift: 2.0,
            mesh_row_lift: 1.0,
            base_width: 45.0,
            base_height: 30.0,
        }
    }
}

impl LayoutConfig {
    pub fn margin(&self) -> f64 {
        self.margin
    }

    pub fn first_view_inset(&self) -> f64 {
        self.first_view_inset
    }

    pub fn wall_pitch(&self) -> f64 {
        self.wall_pitch
    }

    pub fn mesh_pitch(&self) -> f64 {
        self.mesh_pitch
    }

    pub fn wall_row_lift(&self) -> f64 {
        self.wall_row_lift
    }

    pub fn mesh_row_lift(&self) -> f64 {
        self.mesh_row_lift
    }

    pub fn base_width(&self) -> f64 {
        self.base_width
    }

    pub fn base_height(&self) -> f64 {
        self.base_height
    }
}

/// Drawing formats the sheet can be written in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Dxf,
    Svg,
}

impl OutputFormat {
    /// File extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Dxf => "dxf",
            Self::Svg => "svg",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dxf" => Ok(Self::Dxf),
            "svg" => Ok(Self::Svg),
            _ => Err(format!("unknown output format `{s}`, expected `dxf` or `svg`")),
        }
    }
}

/// Where and how sheets are written.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    format: OutputFormat,
    directory: PathBuf,
    /// Program launched on the written sheet; none when unset.
    viewer: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            directory: PathBuf::from("documents"),
            viewer: None,
        }
    }
}

impl OutputConfig {
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn directory(&self) -> &PathBuf {
        &self.directory
    }

    pub fn viewer(&self) -> Option<&str> {
        self.viewer.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use wallsheet_core::steel::BarDiameter;

    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.geometry().coverage(), 0.05);
        assert_eq!(config.geometry().projection_depth(), 2.0);
        assert_eq!(config.layout().margin(), 0.6);
        assert_eq!(config.layout().wall_pitch(), 10.0);
        assert_eq!(config.output().format(), OutputFormat::Dxf);
        assert_eq!(config.output().viewer(), None);
        assert_eq!(
            config.reinforcement().footing_top.diameter,
            BarDiameter::ThreeEighths
        );
    }

    #[test]
    fn test_partial_sections() {
        let config: AppConfig = toml::from_str(
            r#"
            [geometry]
            coverage = 0.075

            [layout]
            wall_pitch = 12.0

            [output]
            directory = "out"
            viewer = "xdg-open"
            "#,
        )
        .unwrap();

        assert_eq!(config.geometry().coverage(), 0.075);
        assert_eq!(config.geometry().projection_depth(), 2.0);
        assert_eq!(config.layout().wall_pitch(), 12.0);
        assert_eq!(config.layout().mesh_pitch(), 10.0);
        assert_eq!(config.output().directory(), &PathBuf::from("out"));
        assert_eq!(config.output().viewer(), Some("xdg-open"));
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("SVG".parse::<OutputFormat>(), Ok(OutputFormat::Svg));
        assert_eq!("dxf".parse::<OutputFormat>(), Ok(OutputFormat::Dxf));
        assert!("pdf".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_builder_overrides() {
        let config = AppConfig::default()
            .with_format(OutputFormat::Svg)
            .with_output_dir("sheets");
        assert_eq!(config.output().format(), OutputFormat::Svg);
        assert_eq!(config.output().directory(), &PathBuf::from("sheets"));
    }
}
