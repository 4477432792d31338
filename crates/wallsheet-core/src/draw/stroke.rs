//! Line-style definitions.
//!
//! A layer carries one [`LineStyle`]. Backends translate it into their own
//! vocabulary:
//!
//! | Variant      | DXF linetype  | SVG `stroke-dasharray` |
//! |--------------|---------------|------------------------|
//! | `Continuous` | `CONTINUOUS`  | *(none)*               |
//! | `Dashed`     | `DASHED`      | `"0.2,0.1"`            |

use std::str::FromStr;

/// Defines the pattern a layer's lines are drawn with.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineStyle {
    /// Solid continuous line (default)
    #[default]
    Continuous,
    /// Dashed line, used for soil lines
    Dashed,
}

impl LineStyle {
    /// Returns the DXF linetype name for this style
    pub fn dxf_linetype(self) -> &'static str {
        match self {
            Self::Continuous => "CONTINUOUS",
            Self::Dashed => "DASHED",
        }
    }

    /// Returns the DXF linetype description shown in the LTYPE table
    pub fn dxf_description(self) -> &'static str {
        match self {
            Self::Continuous => "Solid line",
            Self::Dashed => "Dashed __ __ __",
        }
    }

    /// Dash/gap pattern in drawing units; empty for continuous lines.
    ///
    /// Positive entries are dashes and negative entries are gaps, following
    /// the DXF LTYPE convention.
    pub fn dxf_pattern(self) -> &'static [f64] {
        match self {
            Self::Continuous => &[],
            Self::Dashed => &[0.2, -0.1],
        }
    }

    /// Returns the SVG dasharray value for this style, or `None` for solid lines
    pub fn to_svg_value(self) -> Option<&'static str> {
        match self {
            Self::Continuous => None,
            Self::Dashed => Some("0.2,0.1"),
        }
    }
}

impl FromStr for LineStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "continuous" | "solid" => Ok(Self::Continuous),
            "dashed" => Ok(Self::Dashed),
            _ => Err(format!(
                "invalid line style `{s}`, valid values: continuous, dashed"
            )),
        }
    }
}
