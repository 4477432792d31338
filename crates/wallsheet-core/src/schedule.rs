//! Reinforcement schedule lookup.
//!
//! A request may carry the bar schedule produced by the structural design
//! step. It is a list of structural elements, each with the steel placed on
//! its faces:
//!
//! ```json
//! [
//!   { "tipo": "zapata",
//!     "aceros": [ { "tipoAcero": "superior", "diametro": "3/8", "cantidad": 1, "espaciamiento": 0.17 } ] }
//! ]
//! ```
//!
//! Lookups are keyed by a typed [`ScheduleKey`] and never fail: when no entry
//! matches, [`BarCallout::Unscheduled`] is returned and callers fall back to
//! the geometry they already have.

use serde::Deserialize;

use crate::steel::{BarDiameter, BarZone};

/// Structural element a schedule entry refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum StructuralElement {
    #[serde(rename = "zapata", alias = "footing", alias = "Zapata")]
    Footing,
    #[serde(rename = "pantalla", alias = "stem", alias = "Pantalla")]
    Stem,
    #[serde(other)]
    Other,
}

/// Face of the element the steel runs along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum SteelPosition {
    #[serde(rename = "superior", alias = "top", alias = "Superior")]
    Top,
    #[serde(rename = "inferior", alias = "bottom", alias = "Inferior")]
    Bottom,
    #[serde(rename = "interior", alias = "Interior")]
    Interior,
    #[serde(rename = "exterior", alias = "Exterior")]
    Exterior,
    #[serde(other)]
    Other,
}

/// Key a schedule entry is looked up by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScheduleKey {
    pub element: StructuralElement,
    pub position: SteelPosition,
}

impl ScheduleKey {
    pub fn new(element: StructuralElement, position: SteelPosition) -> Self {
        Self { element, position }
    }
}

impl From<BarZone> for ScheduleKey {
    /// The stem's left face is the exposed front, its right face is in
    /// contact with the retained soil.
    fn from(zone: BarZone) -> Self {
        match zone {
            BarZone::FootingTop => Self::new(StructuralElement::Footing, SteelPosition::Top),
            BarZone::FootingBottom => Self::new(StructuralElement::Footing, SteelPosition::Bottom),
            BarZone::StemLeft => Self::new(StructuralElement::Stem, SteelPosition::Exterior),
            BarZone::StemRight => Self::new(StructuralElement::Stem, SteelPosition::Interior),
        }
    }
}

/// A number that may arrive either as a JSON number or as a numeric string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
enum LooseNumber {
    Number(f64),
    Text(String),
}

impl LooseNumber {
    fn value(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct ScheduleBar {
    #[serde(rename = "tipoAcero")]
    position: SteelPosition,
    #[serde(rename = "diametro")]
    diameter: BarDiameter,
    #[serde(rename = "cantidad", default)]
    quantity: Option<LooseNumber>,
    #[serde(rename = "espaciamiento", default)]
    spacing: Option<LooseNumber>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct ScheduleEntry {
    #[serde(rename = "tipo")]
    element: StructuralElement,
    #[serde(rename = "aceros", default)]
    bars: Vec<ScheduleBar>,
}

/// Result of a schedule lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum BarCallout {
    Scheduled {
        quantity: u32,
        diameter: BarDiameter,
        /// Nominal spacing in meters, when the schedule gives one.
        spacing: Option<f64>,
    },
    Unscheduled,
}

/// The reinforcement schedule of a request.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct ReinforcementSchedule {
    entries: Vec<ScheduleEntry>,
}

impl ReinforcementSchedule {
    /// An empty schedule: every lookup is [`BarCallout::Unscheduled`].
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(|entry| entry.bars.is_empty())
    }

    /// Returns the first entry matching `key`.
    ///
    /// Missing or unreadable quantities count as 1.
    pub fn lookup(&self, key: ScheduleKey) -> BarCallout {
        self.entries
            .iter()
            .filter(|entry| entry.element == key.element)
            .flat_map(|entry| entry.bars.iter())
            .find(|bar| bar.position == key.position)
            .map_or(BarCallout::Unscheduled, |bar| BarCallout::Scheduled {
                quantity: bar
                    .quantity
                    .as_ref()
                    .and_then(LooseNumber::value)
                    .filter(|q| q.is_finite() && *q >= 1.0)
                    .map_or(1, |q| q.round() as u32),
                diameter: bar.diameter,
                spacing: bar
                    .spacing
                    .as_ref()
                    .and_then(LooseNumber::value)
                    .filter(|s| s.is_finite() && *s > 0.0),
            })
    }
}
