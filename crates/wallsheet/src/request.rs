//! Sheet requests.
//!
//! A request is the JSON document produced by the structural design step:
//!
//! ```json
//! {
//!   "x": 0, "y": 0,
//!   "predim": { "inputValues": { "B18": 6.4, "B19": 1, "D51": 0.1, "D47": 10, "D49": 8, "D45": 0.3 } },
//!   "dimen": {}, "resultdim": {},
//!   "aceros": [ { "tipo": "zapata", "aceros": [ ... ] } ]
//! }
//! ```
//!
//! The six `inputValues` map onto [`WallParameters`]:
//!
//! | Key   | Parameter         | Default |
//! |-------|-------------------|---------|
//! | `B18` | `a`               | 6.4     |
//! | `B19` | `b`               | 1.0     |
//! | `D51` | `base_ratio`      | 0.1     |
//! | `D47` | `toe_divisor`     | 10      |
//! | `D49` | `footing_divisor` | 8       |
//! | `D45` | `stem_width`      | 0.3     |
//!
//! Geometry values that are missing or not numeric take their default. The
//! sheet origin is stricter: a non-numeric `x` or `y` is rejected.

use log::{debug, warn};
use serde_json::{Map, Value};
use thiserror::Error;

use wallsheet_core::{geometry::Point, schedule::ReinforcementSchedule, wall::WallParameters};

/// Errors raised while reading a request, before any geometry is computed.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("request is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("missing required field `{field}`")]
    MissingField { field: &'static str },

    #[error("field `{field}` must be a number, got `{value}`")]
    NotNumeric { field: &'static str, value: String },

    #[error("field `aceros` is not a valid reinforcement schedule: {message}")]
    InvalidSchedule { message: String },
}

impl ValidationError {
    /// Name of the offending field, if the error is about one.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::MissingField { field } | Self::NotNumeric { field, .. } => Some(*field),
            Self::InvalidSchedule { .. } => Some("aceros"),
            Self::Malformed(_) => None,
        }
    }
}

/// A validated sheet request.
#[derive(Debug, Clone)]
pub struct SheetRequest {
    origin: Point,
    parameters: WallParameters,
    schedule: ReinforcementSchedule,
    dimen: Option<Value>,
    resultdim: Option<Value>,
}

/// Reads a value as a number, accepting numeric strings.
fn as_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite())
}

/// Reads a geometry input, falling back to `default` when it is missing or
/// not numeric.
fn geometry_input(inputs: &Map<String, Value>, key: &'static str, default: f64) -> f64 {
    match inputs.get(key) {
        None | Some(Value::Null) => default,
        Some(value) => as_number(value).unwrap_or_else(|| {
            warn!(field = key, value:% = value, default; "Non-numeric input, using default");
            default
        }),
    }
}

/// Reads a sheet origin coordinate; absent means 0.
fn origin_coordinate(request: &Map<String, Value>, key: &'static str) -> Result<f64, ValidationError> {
    match request.get(key) {
        None | Some(Value::Null) => Ok(0.0),
        Some(value) => as_number(value).ok_or_else(|| ValidationError::NotNumeric {
            field: key,
            value: value.to_string(),
        }),
    }
}

impl SheetRequest {
    /// Parses and validates a JSON request.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when the document is not JSON, when
    /// `predim.inputValues` is missing, when the origin is not numeric or when
    /// `aceros` does not have the schedule shape.
    pub fn from_json(source: &str) -> Result<Self, ValidationError> {
        let value: Value = serde_json::from_str(source)?;
        Self::from_value(value)
    }

    /// Validates an already parsed JSON request.
    ///
    /// # Errors
    ///
    /// See [`SheetRequest::from_json`].
    pub fn from_value(value: Value) -> Result<Self, ValidationError> {
        let Value::Object(mut request) = value else {
            return Err(ValidationError::MissingField { field: "predim" });
        };

        let predim = request
            .get("predim")
            .and_then(Value::as_object)
            .ok_or(ValidationError::MissingField { field: "predim" })?;
        let inputs = predim
            .get("inputValues")
            .and_then(Value::as_object)
            .ok_or(ValidationError::MissingField {
                field: "predim.inputValues",
            })?;

        let defaults = WallParameters::default();
        let parameters = WallParameters {
            a: geometry_input(inputs, "B18", defaults.a),
            b: geometry_input(inputs, "B19", defaults.b),
            base_ratio: geometry_input(inputs, "D51", defaults.base_ratio),
            toe_divisor: geometry_input(inputs, "D47", defaults.toe_divisor),
            footing_divisor: geometry_input(inputs, "D49", defaults.footing_divisor),
            stem_width: geometry_input(inputs, "D45", defaults.stem_width),
        };

        let origin = Point::new(
            origin_coordinate(&request, "x")?,
            origin_coordinate(&request, "y")?,
        );

        let schedule = match request.remove("aceros") {
            None | Some(Value::Null) => ReinforcementSchedule::empty(),
            Some(value) => serde_json::from_value(value).map_err(|err| {
                ValidationError::InvalidSchedule {
                    message: err.to_string(),
                }
            })?,
        };

        debug!(parameters:?, origin:?; "Validated sheet request");

        Ok(Self {
            origin,
            parameters,
            schedule,
            dimen: request.remove("dimen"),
            resultdim: request.remove("resultdim"),
        })
    }

    /// Builds a request directly from parameters, with no schedule.
    pub fn from_parameters(parameters: WallParameters) -> Self {
        Self {
            origin: Point::default(),
            parameters,
            schedule: ReinforcementSchedule::empty(),
            dimen: None,
            resultdim: None,
        }
    }

    /// Returns a copy with the sheet origin replaced.
    pub fn with_origin(mut self, origin: Point) -> Self {
        self.origin = origin;
        self
    }

    /// Returns a copy with the reinforcement schedule replaced.
    pub fn with_schedule(mut self, schedule: ReinforcementSchedule) -> Self {
        self.schedule = schedule;
        self
    }

    /// Lower-left corner of the sheet.
    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn parameters(&self) -> &WallParameters {
        &self.parameters
    }

    pub fn schedule(&self) -> &ReinforcementSchedule {
        &self.schedule
    }

    /// The `dimen` object, passed through untouched.
    pub fn dimen(&self) -> Option<&Value> {
        self.dimen.as_ref()
    }

    /// The `resultdim` object, passed through untouched.
    pub fn resultdim(&self) -> Option<&Value> {
        self.resultdim.as_ref()
    }
}
