//! The canonical weather snapshot shared by every provider schema.

use serde::{Deserialize, Serialize};

use crate::units::{
    self, PressureUnit, TemperatureUnit, WindUnit, convert_pressure, convert_temperature,
    convert_wind,
};
use crate::wind::{WindDirection, WindResolution};

/// One immutable, normalized weather reading.
///
/// Built once by a parse function and never mutated afterwards. Canonical
/// units: kelvin for temperatures, hPa for pressure, m/s for wind speed,
/// millimeters for rain, epoch milliseconds for timestamps. Missing data is
/// `None` (or an empty string), never a magic number.
///
/// A snapshot parsed from an empty document equals [`WeatherSnapshot::empty`],
/// which downstream code must treat as "no data", not as an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// Temperature in kelvin.
    pub temperature: Option<f32>,
    /// "Feels like" temperature in kelvin.
    pub feels_like_temperature: Option<f32>,
    /// Pressure in hPa.
    pub pressure: Option<f64>,
    /// Relative humidity in percent, `0..=100` when present.
    pub humidity: Option<i32>,
    /// Wind speed in m/s.
    pub wind_speed: Option<f64>,
    /// Rain accumulation in mm. Missing rain data means zero accumulation.
    pub rain: f64,
    /// Chance of precipitation as a fraction in `0.0..=1.0`.
    pub chance_of_precipitation: Option<f64>,
    /// Wind direction at 16-point resolution; `None` when no degree data.
    pub wind_direction: Option<WindDirection>,
    /// Sunrise as epoch milliseconds.
    pub sunrise: Option<i64>,
    /// Sunset as epoch milliseconds.
    pub sunset: Option<i64>,
    /// Forecast hour as epoch milliseconds; set only by the series parser.
    pub forecast_time: Option<i64>,
    pub city: String,
    /// Country code, e.g. "CZ".
    pub country: String,
    /// Human-readable condition description.
    pub description: String,
    /// Condition id in the legacy provider's vocabulary, selects the icon.
    pub weather_condition_id: Option<i32>,
    /// Time the response was fetched, epoch milliseconds, supplied by the
    /// caller at parse time. Zero for the empty snapshot.
    pub fetched_at: i64,
}

impl WeatherSnapshot {
    /// The distinguished "no data" snapshot.
    pub fn empty() -> WeatherSnapshot {
        WeatherSnapshot::default()
    }

    /// Whether this snapshot is the "no data" value.
    pub fn is_empty(&self) -> bool {
        *self == WeatherSnapshot::default()
    }

    /// Temperature converted to `unit`, when present.
    pub fn temperature_in(&self, unit: TemperatureUnit) -> Option<f32> {
        self.temperature.map(|kelvin| convert_temperature(kelvin, unit))
    }

    /// Temperature converted to `unit` and rounded for display.
    pub fn rounded_temperature_in(&self, unit: TemperatureUnit) -> Option<i32> {
        self.temperature_in(unit)
            .map(|value| units::round_for_display(f64::from(value)))
    }

    /// "Feels like" temperature converted to `unit`, when present.
    pub fn feels_like_in(&self, unit: TemperatureUnit) -> Option<f32> {
        self.feels_like_temperature
            .map(|kelvin| convert_temperature(kelvin, unit))
    }

    /// "Feels like" temperature converted to `unit` and rounded for display.
    pub fn rounded_feels_like_in(&self, unit: TemperatureUnit) -> Option<i32> {
        self.feels_like_in(unit)
            .map(|value| units::round_for_display(f64::from(value)))
    }

    /// Pressure converted to `unit`, when present.
    pub fn pressure_in(&self, unit: PressureUnit) -> Option<f64> {
        self.pressure.map(|hpa| convert_pressure(hpa, unit))
    }

    /// Wind speed converted to `unit`, when present.
    pub fn wind_speed_in(&self, unit: WindUnit) -> Option<f64> {
        self.wind_speed.map(|mps| convert_wind(mps, unit))
    }

    /// Wind direction down-sampled to `resolution`, when present.
    pub fn wind_direction_at(&self, resolution: WindResolution) -> Option<WindDirection> {
        self.wind_direction
            .map(|direction| direction.downsample(resolution))
    }
}
