//! Color handling for wallsheet drawings
//!
//! Drawings are colored by layer using the AutoCAD Color Index (ACI). This
//! module provides [`AciColor`] for the handful of indices the sheet uses and
//! [`Color`], which wraps `DynamicColor` from the color crate for backends
//! that need a CSS color instead of an index.

use std::{
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

use color::DynamicColor;

/// Wrapper around the `DynamicColor` type from the color crate
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

impl Color {
    /// Create a new `Color` from a CSS color string such as "#ff0000", "rgb(255, 0, 0)" or "red".
    ///
    /// # Examples
    ///
    /// ```
    /// use wallsheet_core::color::Color;
    ///
    /// let red = Color::new("#ff0000").unwrap();
    /// let blue = Color::new("blue").unwrap();
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Self { color }),
            Err(err) => Err(format!("invalid color `{color_str}`: {err}")),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.color)
    }
}

/// AutoCAD Color Index entries used by the sheet layers.
///
/// Index 7 is the "foreground" color: white on a dark CAD canvas, black on
/// paper. [`AciColor::css_name`] maps it to black since SVG output is viewed
/// on a light background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AciColor {
    Red,
    Yellow,
    Green,
    Cyan,
    Blue,
    Magenta,
    White,
}

impl AciColor {
    /// Returns the ACI index written to DXF group code 62.
    ///
    /// # Examples
    ///
    /// ```
    /// use wallsheet_core::color::AciColor;
    ///
    /// assert_eq!(AciColor::Red.index(), 1);
    /// assert_eq!(AciColor::White.index(), 7);
    /// ```
    pub fn index(self) -> u8 {
        match self {
            Self::Red => 1,
            Self::Yellow => 2,
            Self::Green => 3,
            Self::Cyan => 4,
            Self::Blue => 5,
            Self::Magenta => 6,
            Self::White => 7,
        }
    }

    /// Looks up a color by its ACI index.
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            1 => Some(Self::Red),
            2 => Some(Self::Yellow),
            3 => Some(Self::Green),
            4 => Some(Self::Cyan),
            5 => Some(Self::Blue),
            6 => Some(Self::Magenta),
            7 => Some(Self::White),
            _ => None,
        }
    }

    /// CSS color name used for raster/vector previews.
    pub fn css_name(self) -> &'static str {
        match self {
            Self::Red => "red",
            // Pure yellow is unreadable on white paper
            Self::Yellow => "goldenrod",
            Self::Green => "lime",
            Self::Cyan => "darkcyan",
            Self::Blue => "blue",
            Self::Magenta => "magenta",
            Self::White => "black",
        }
    }

    /// Returns the CSS [`Color`] for this index.
    pub fn to_css(self) -> Color {
        Color::new(self.css_name()).expect("ACI names are valid CSS colors")
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").expect("'black' is a valid CSS color")
    }
}
