//! Hourly forecast series parsing for the forecast provider.

use serde_json::Value;

use crate::condition;
use crate::model::WeatherSnapshot;
use crate::parser::{
    ParseError, array, celsius_to_kelvin, element_f32, element_f64, element_i32, first_timestamp,
    object, seconds_to_millis,
};
use crate::wind::WindDirection;

/// Parse the forecast provider's hourly arrays into one snapshot per hour.
///
/// Parallel arrays under "hourly" are zipped by index against the "time"
/// array. An array shorter than "time" (or absent entirely) leaves its
/// field absent for the remaining hours; that is normal provider output,
/// not an error. A missing "hourly" object or "time" array is a structural
/// failure and is reported, so callers can tell an empty forecast from a
/// broken response.
///
/// Sunrise and sunset come from the first "daily" entry and are copied into
/// every snapshot; the daily granularity is coarser than hourly.
/// Temperatures arrive in Celsius and are stored in kelvin. `fetched_at`
/// is the caller's "now" in epoch milliseconds.
pub fn parse_series(json: &str, fetched_at: i64) -> Result<Vec<WeatherSnapshot>, ParseError> {
    let root: Value = serde_json::from_str(json)?;
    let root = root.as_object().ok_or(ParseError::NotAnObject)?;
    let hourly = object(root, "hourly").ok_or(ParseError::MissingField("hourly"))?;
    let times = array(hourly, "time").ok_or(ParseError::MissingField("hourly.time"))?;

    let temperatures = array(hourly, "temperature_2m");
    let apparent_temperatures = array(hourly, "apparent_temperature");
    let humidities = array(hourly, "relativehumidity_2m");
    let weather_codes = array(hourly, "weathercode");
    let pressures = array(hourly, "pressure_msl");
    let wind_speeds = array(hourly, "windspeed_10m");
    let wind_directions = array(hourly, "winddirection_10m");
    let rains = array(hourly, "rain");
    let precipitation_probabilities = array(hourly, "precipitation_probability");

    let daily = object(root, "daily");
    let sunrise = daily
        .and_then(|daily| first_timestamp(daily, "sunrise"))
        .map(seconds_to_millis);
    let sunset = daily
        .and_then(|daily| first_timestamp(daily, "sunset"))
        .map(seconds_to_millis);

    let mut snapshots = Vec::with_capacity(times.len());
    for (index, time) in times.iter().enumerate() {
        let mut snapshot = WeatherSnapshot {
            fetched_at,
            sunrise,
            sunset,
            ..WeatherSnapshot::empty()
        };

        snapshot.forecast_time = time.as_i64().map(seconds_to_millis);
        snapshot.temperature = element_f32(temperatures, index).map(celsius_to_kelvin);
        snapshot.feels_like_temperature =
            element_f32(apparent_temperatures, index).map(celsius_to_kelvin);
        snapshot.humidity = element_i32(humidities, index);
        snapshot.pressure = element_f64(pressures, index);
        snapshot.wind_speed = element_f64(wind_speeds, index);
        snapshot.wind_direction =
            element_f64(wind_directions, index).map(WindDirection::from_degree);
        snapshot.rain = element_f64(rains, index).unwrap_or(0.0);
        snapshot.chance_of_precipitation =
            element_f64(precipitation_probabilities, index).map(|percent| percent / 100.0);

        if let Some(code) = element_i32(weather_codes, index) {
            snapshot.weather_condition_id = Some(condition::condition_id(code));
            snapshot.description = condition::description(code).to_owned();
        }

        snapshots.push(snapshot);
    }

    Ok(snapshots)
}

/// Extract the day's maximum UV index from "daily.uv_index_max".
///
/// Total: anything missing or malformed reads as `0.0`.
pub fn uv_index(json: &str) -> f64 {
    let root: Value = match serde_json::from_str(json) {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(error = %err, "discarding malformed UV response");
            return 0.0;
        }
    };
    root.as_object()
        .and_then(|root| object(root, "daily"))
        .and_then(|daily| array(daily, "uv_index_max"))
        .and_then(|values| values.first())
        .and_then(Value::as_f64)
        .unwrap_or(0.0)
}
