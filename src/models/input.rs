//! Helpers for loosely-typed request input.
//!
//! Browsers send ids and orders either as JSON numbers or as strings, and
//! partial updates need to tell an absent field from an explicit `null`.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::errors::AppError;

/// A number as it arrives from a request body.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NumberInput {
    Integer(i64),
    Float(f64),
    Text(String),
    /// Anything else (booleans, objects, `null` on a present field)
    Other(Value),
}

/// Anything that can be validated into an integer identifier.
pub trait NumericArg {
    fn to_integer(&self, field: &str) -> Result<i64, AppError>;
}

impl NumericArg for i64 {
    fn to_integer(&self, _field: &str) -> Result<i64, AppError> {
        Ok(*self)
    }
}

impl NumericArg for str {
    fn to_integer(&self, field: &str) -> Result<i64, AppError> {
        let trimmed = self.trim();
        if let Ok(value) = trimmed.parse::<i64>() {
            return Ok(value);
        }
        match trimmed.parse::<f64>() {
            Ok(value) => float_to_integer(value, field),
            Err(_) => Err(invalid(field)),
        }
    }
}

impl NumericArg for String {
    fn to_integer(&self, field: &str) -> Result<i64, AppError> {
        self.as_str().to_integer(field)
    }
}

impl NumericArg for NumberInput {
    fn to_integer(&self, field: &str) -> Result<i64, AppError> {
        match self {
            NumberInput::Integer(value) => Ok(*value),
            NumberInput::Float(value) => float_to_integer(*value, field),
            NumberInput::Text(text) => text.to_integer(field),
            NumberInput::Other(_) => Err(invalid(field)),
        }
    }
}

/// Validate a field that must be present.
pub fn required_integer(value: Option<&NumberInput>, field: &str) -> Result<i64, AppError> {
    value.ok_or_else(|| invalid(field))?.to_integer(field)
}

/// 2^63, the first float past `i64::MAX`.
const I64_LIMIT: f64 = 9_223_372_036_854_775_808.0;

fn float_to_integer(value: f64, field: &str) -> Result<i64, AppError> {
    if value.is_finite() && value.fract() == 0.0 && (-I64_LIMIT..I64_LIMIT).contains(&value) {
        Ok(value as i64)
    } else {
        Err(invalid(field))
    }
}

fn invalid(field: &str) -> AppError {
    AppError::InvalidArgument(format!("Invalid {}", field))
}

/// Deserialize a field that was present in the payload, keeping `null` as a value.
///
/// Use with `#[serde(default, deserialize_with = "present")]` on an `Option<T>`
/// field: absent stays `None`, `null` becomes `Some(T::from(null))`.
pub fn present<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Trimmed text, or `None` when blank.
pub fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// JSON truthiness used when coercing flags.
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Validate a display date: blank clears it, anything else must be `YYYY-MM-DD`.
pub fn normalize_display_date(value: Option<&str>) -> Result<Option<String>, AppError> {
    let Some(trimmed) = non_blank(value) else {
        return Ok(None);
    };

    let bytes = trimmed.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });

    if well_formed {
        Ok(Some(trimmed))
    } else {
        Err(AppError::InvalidArgument(
            "Display date must use YYYY-MM-DD".to_string(),
        ))
    }
}
