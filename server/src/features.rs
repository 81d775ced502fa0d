//! Coercion of the JSON `features` list into a model input row.

use std::{
    error::Error,
    fmt::{self, Display},
};

use ndarray::{Array1, Array2, Axis};
use serde_json::Value;

/// A `features` element that can't be read as a number.
#[derive(Debug, Clone, PartialEq)]
pub enum CoercionErr {
    String(String),
    Null,
    Array(Vec<Value>),
    Object(serde_json::Map<String, Value>),
    /// A number outside of what `f64` can represent.
    Number(serde_json::Number),
}

impl Display for CoercionErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoercionErr::String(s) => write!(f, "could not convert string to float: '{s}'"),
            CoercionErr::Null => write!(f, "could not convert null to float"),
            CoercionErr::Array(values) => write!(
                f,
                "could not convert a list to float: {}",
                Value::Array(values.clone())
            ),
            CoercionErr::Object(map) => write!(
                f,
                "could not convert an object to float: {}",
                Value::Object(map.clone())
            ),
            CoercionErr::Number(n) => write!(f, "could not convert {n} to float"),
        }
    }
}

impl Error for CoercionErr {}

/// Reads a single JSON value as a feature. Booleans count as `1` and `0`.
fn coerce(value: &Value) -> Result<f64, CoercionErr> {
    match value {
        Value::Number(n) => n.as_f64().ok_or_else(|| CoercionErr::Number(n.clone())),
        Value::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
        Value::String(s) => Err(CoercionErr::String(s.clone())),
        Value::Null => Err(CoercionErr::Null),
        Value::Array(values) => Err(CoercionErr::Array(values.clone())),
        Value::Object(map) => Err(CoercionErr::Object(map.clone())),
    }
}

/// Builds a `(1, N)` input matrix out of the `N` values in `features`.
///
/// The amount of values isn't checked here, that's up to the model. Nested lists are not
/// flattened: `[[x_1, .., x_30]]` fails on its first element instead of being read as one
/// row of 30 values.
///
/// # Arguments
/// * `features` - The elements of the request's `features` list.
///
/// # Returns
/// The input row, or the first element that isn't numeric.
pub fn to_row(features: &[Value]) -> Result<Array2<f64>, CoercionErr> {
    let values = features.iter().map(coerce).collect::<Result<Vec<_>, _>>()?;
    Ok(Array1::from_vec(values).insert_axis(Axis(0)))
}
