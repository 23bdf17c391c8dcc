//! Parsing of provider responses into canonical snapshots.
//!
//! Two entry points with different failure contracts:
//! - [`snapshot::parse`] normalizes a single reading from either provider
//!   schema and never fails the caller; anything unusable becomes the empty
//!   snapshot and the cause is only visible in the diagnostic log.
//! - [`series::parse_series`] is specific to the forecast provider's hourly
//!   arrays and reports structural problems as [`ParseError`], because a
//!   forecast view must be able to tell "no data" from "broken response".
//!
//! Every leaf read follows one policy: a present, well-typed value is used;
//! a present value of the wrong type is logged and treated as absent; an
//! absent key is absent. Presence and type-validity are never conflated.

use serde_json::{Map, Value};
use thiserror::Error;

pub mod series;
pub mod snapshot;

pub use series::{parse_series, uv_index};
pub use snapshot::parse;

/// Errors surfaced by the schema-specific parsers.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("malformed JSON: {0}")]
    MalformedInput(#[from] serde_json::Error),

    #[error("response is not a JSON object")]
    NotAnObject,

    #[error("missing required field: {0}")]
    MissingField(&'static str),
}

pub(crate) fn celsius_to_kelvin(celsius: f32) -> f32 {
    celsius + 273.15
}

pub(crate) fn seconds_to_millis(seconds: i64) -> i64 {
    seconds.saturating_mul(1000)
}

pub(crate) fn object<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a Map<String, Value>> {
    obj.get(key).and_then(Value::as_object)
}

pub(crate) fn array<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a Vec<Value>> {
    obj.get(key).and_then(Value::as_array)
}

pub(crate) fn read_f64(obj: &Map<String, Value>, key: &str) -> Option<f64> {
    match obj.get(key) {
        None => None,
        Some(value) => match value.as_f64() {
            Some(number) => Some(number),
            None => {
                tracing::warn!(key, %value, "expected a number, treating field as absent");
                None
            }
        },
    }
}

pub(crate) fn read_f32(obj: &Map<String, Value>, key: &str) -> Option<f32> {
    read_f64(obj, key).map(|number| number as f32)
}

pub(crate) fn read_i32(obj: &Map<String, Value>, key: &str) -> Option<i32> {
    // Fractional values are truncated, matching integer coercion of numeric
    // JSON fields elsewhere.
    read_f64(obj, key).map(|number| number as i32)
}

pub(crate) fn read_string(obj: &Map<String, Value>, key: &str) -> String {
    match obj.get(key) {
        None => String::new(),
        Some(value) => match value.as_str() {
            Some(text) => text.to_owned(),
            None => {
                tracing::warn!(key, %value, "expected a string, treating field as absent");
                String::new()
            }
        },
    }
}

/// Read an epoch timestamp. Negative values carry no meaning for sunrise
/// or sunset and are treated as absent.
pub(crate) fn read_timestamp(obj: &Map<String, Value>, key: &str) -> Option<i64> {
    match obj.get(key) {
        None => None,
        Some(value) => match value.as_i64() {
            Some(seconds) if seconds >= 0 => Some(seconds),
            Some(_) => None,
            None => {
                tracing::warn!(key, %value, "expected a timestamp, treating field as absent");
                None
            }
        },
    }
}

pub(crate) fn element_f64(array: Option<&Vec<Value>>, index: usize) -> Option<f64> {
    match array.and_then(|values| values.get(index)) {
        None => None,
        Some(value) => match value.as_f64() {
            Some(number) => Some(number),
            None if value.is_null() => None,
            None => {
                tracing::warn!(index, %value, "expected a number, treating element as absent");
                None
            }
        },
    }
}

pub(crate) fn element_f32(array: Option<&Vec<Value>>, index: usize) -> Option<f32> {
    element_f64(array, index).map(|number| number as f32)
}

pub(crate) fn element_i32(array: Option<&Vec<Value>>, index: usize) -> Option<i32> {
    element_f64(array, index).map(|number| number as i32)
}

pub(crate) fn first_f64(obj: &Map<String, Value>, key: &str) -> Option<f64> {
    element_f64(array(obj, key), 0)
}

pub(crate) fn first_f32(obj: &Map<String, Value>, key: &str) -> Option<f32> {
    first_f64(obj, key).map(|number| number as f32)
}

pub(crate) fn first_i32(obj: &Map<String, Value>, key: &str) -> Option<i32> {
    first_f64(obj, key).map(|number| number as i32)
}

pub(crate) fn first_timestamp(obj: &Map<String, Value>, key: &str) -> Option<i64> {
    array(obj, key)
        .and_then(|values| values.first())
        .and_then(Value::as_i64)
        .filter(|seconds| *seconds >= 0)
}
