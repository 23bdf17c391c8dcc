//! Core library for weather-data normalization.
//!
//! This crate defines:
//! - The canonical immutable weather snapshot and its unit-aware accessors
//! - Dual-schema parsing of the two upstream provider formats
//! - Hourly forecast series and geocoding-response parsing
//! - Unit conversion, compass classification and condition-code mapping
//!
//! It is used by `meteo-cli`, but can also be reused by other binaries or
//! services; the crate performs no I/O beyond diagnostic logging.

pub mod condition;
pub mod geocode;
pub mod model;
pub mod parser;
pub mod source;
pub mod units;
pub mod wind;

pub use geocode::{FoundLocation, parse_locations};
pub use model::WeatherSnapshot;
pub use parser::{ParseError, parse, parse_series, uv_index};
pub use source::{ForecastQuery, LocationQuery, WeatherSource};
pub use units::{PressureUnit, TemperatureUnit, WindUnit};
pub use wind::{WindDirection, WindResolution};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_schemas_normalize_to_the_same_entity() {
        let legacy = parse(r#"{"main": {"temp": 281.55}}"#, 7);
        let forecast = parse(
            r#"{"hourly": {"temperature_2m": [8.4]}, "current_weather": {}}"#,
            7,
        );
        let left = legacy.temperature.unwrap();
        let right = forecast.temperature.unwrap();
        assert!((left - right).abs() < 1e-3);
    }
}
