//! Dual-schema parsing of a single weather reading.
//!
//! The two upstream schemas carry no version tag; each field group is
//! resolved by probing for its discriminating key. A top-level "main"
//! object marks the legacy schema; otherwise the forecast schema's
//! "hourly"/"current_weather"/"daily" objects are consulted.

use serde_json::Value;

use crate::condition;
use crate::model::WeatherSnapshot;
use crate::parser::{
    celsius_to_kelvin, first_f32, first_f64, first_i32, first_timestamp, object, read_f32,
    read_f64, read_i32, read_string, read_timestamp, seconds_to_millis,
};
use crate::wind::WindDirection;

/// Parse a provider response in either schema into one snapshot.
///
/// `fetched_at` is the caller's "now" in epoch milliseconds; the response
/// body itself never supplies it.
///
/// This never fails: malformed JSON, a non-object document or an empty
/// object all yield [`WeatherSnapshot::empty`]. The caller sees "no data";
/// the cause is logged.
pub fn parse(json: &str, fetched_at: i64) -> WeatherSnapshot {
    let root: Value = match serde_json::from_str(json) {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(error = %err, "discarding malformed weather response");
            return WeatherSnapshot::empty();
        }
    };
    let Some(root) = root.as_object() else {
        tracing::warn!("discarding non-object weather response");
        return WeatherSnapshot::empty();
    };
    if root.is_empty() {
        return WeatherSnapshot::empty();
    }

    let mut snapshot = WeatherSnapshot {
        fetched_at,
        ..WeatherSnapshot::empty()
    };

    if let Some(main) = object(root, "main") {
        // Legacy schema: scalar readings under "main".
        snapshot.temperature = read_f32(main, "temp");
        snapshot.feels_like_temperature = read_f32(main, "feels_like");
        snapshot.pressure = read_f64(main, "pressure");
        snapshot.humidity = read_i32(main, "humidity");

        if let Some(rain) = object(root, "rain") {
            // The 3-hour bucket wins unless it reads as exactly zero, in
            // which case the 1-hour bucket is consulted. Fallback on zero,
            // not on absence, is the upstream contract.
            let three_hour = read_f64(rain, "3h").unwrap_or(0.0);
            snapshot.rain = if three_hour == 0.0 {
                read_f64(rain, "1h").unwrap_or(0.0)
            } else {
                three_hour
            };
        }
    } else if let Some(hourly) = object(root, "hourly") {
        // Forecast schema: the first element of each hourly array is the
        // current reading. Temperatures arrive in Celsius.
        snapshot.temperature = first_f32(hourly, "temperature_2m").map(celsius_to_kelvin);
        snapshot.feels_like_temperature =
            first_f32(hourly, "apparent_temperature").map(celsius_to_kelvin);
        snapshot.humidity = first_i32(hourly, "relativehumidity_2m");
        snapshot.pressure = first_f64(hourly, "pressure_msl");
        snapshot.rain = first_f64(hourly, "rain").unwrap_or(0.0);
        snapshot.chance_of_precipitation =
            first_f64(hourly, "precipitation_probability").map(|percent| percent / 100.0);
    }

    if let Some(wind) = object(root, "wind") {
        snapshot.wind_speed = read_f64(wind, "speed");
        snapshot.wind_direction = wind_degree(read_f64(wind, "deg"));
    } else if let Some(current) = object(root, "current_weather") {
        snapshot.wind_speed = read_f64(current, "windspeed");
        snapshot.wind_direction = wind_degree(read_f64(current, "winddirection"));
    }

    let today = root
        .get("weather")
        .and_then(Value::as_array)
        .and_then(|entries| entries.first())
        .and_then(Value::as_object);
    if let Some(today) = today {
        snapshot.description = read_string(today, "description");
        snapshot.weather_condition_id = read_i32(today, "id");
    } else if let Some(current) = object(root, "current_weather") {
        if let Some(code) = read_i32(current, "weathercode") {
            snapshot.description = condition::description(code).to_owned();
            snapshot.weather_condition_id = Some(condition::condition_id(code));
        }
    }
    // Ids below the valid range select no icon.
    if snapshot.weather_condition_id.is_some_and(|id| id <= -1) {
        snapshot.weather_condition_id = None;
    }

    if let Some(sys) = object(root, "sys") {
        snapshot.country = read_string(sys, "country");
        snapshot.sunrise = read_timestamp(sys, "sunrise").map(seconds_to_millis);
        snapshot.sunset = read_timestamp(sys, "sunset").map(seconds_to_millis);
    } else if let Some(daily) = object(root, "daily") {
        snapshot.sunrise = first_timestamp(daily, "sunrise").map(seconds_to_millis);
        snapshot.sunset = first_timestamp(daily, "sunset").map(seconds_to_millis);
    }

    // The forecast provider carries no city name; callers fill it in from
    // prior storage.
    snapshot.city = read_string(root, "name");

    snapshot
}

/// A degree of `i32::MIN` is the legacy absent-marker and carries no
/// direction.
fn wind_degree(degree: Option<f64>) -> Option<WindDirection> {
    degree
        .filter(|value| *value != f64::from(i32::MIN))
        .map(WindDirection::from_degree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::TemperatureUnit;
    use crate::wind::WindDirection;

    const FETCHED_AT: i64 = 1_700_000_000_000;

    const LEGACY: &str = r#"{
        "name": "Brno",
        "main": {"temp": 281.52, "feels_like": 279.8, "pressure": 1016, "humidity": 87},
        "wind": {"speed": 4.1, "deg": 80},
        "weather": [{"id": 500, "description": "light rain"}],
        "rain": {"3h": 2.25},
        "sys": {"country": "CZ", "sunrise": 1700020000, "sunset": 1700060000}
    }"#;

    const FORECAST: &str = r#"{
        "current_weather": {"temperature": 8.4, "windspeed": 14.8, "winddirection": 192, "weathercode": 61},
        "hourly": {
            "time": [1700000000],
            "temperature_2m": [8.4],
            "apparent_temperature": [5.1],
            "relativehumidity_2m": [87],
            "pressure_msl": [1016.2],
            "rain": [0.3],
            "precipitation_probability": [65]
        },
        "daily": {"sunrise": [1700020000], "sunset": [1700060000]}
    }"#;

    #[test]
    fn legacy_schema_reads_main_object() {
        let snapshot = parse(LEGACY, FETCHED_AT);
        assert_eq!(snapshot.temperature, Some(281.52));
        assert_eq!(snapshot.feels_like_temperature, Some(279.8));
        assert_eq!(snapshot.pressure, Some(1016.0));
        assert_eq!(snapshot.humidity, Some(87));
        assert_eq!(snapshot.rain, 2.25);
        assert_eq!(snapshot.wind_speed, Some(4.1));
        assert_eq!(snapshot.wind_direction, Some(WindDirection::East));
        assert_eq!(snapshot.description, "light rain");
        assert_eq!(snapshot.weather_condition_id, Some(500));
        assert_eq!(snapshot.city, "Brno");
        assert_eq!(snapshot.country, "CZ");
        assert_eq!(snapshot.sunrise, Some(1_700_020_000_000));
        assert_eq!(snapshot.sunset, Some(1_700_060_000_000));
        assert_eq!(snapshot.fetched_at, FETCHED_AT);
    }

    #[test]
    fn legacy_temperature_is_kelvin_unconverted() {
        let snapshot = parse(LEGACY, FETCHED_AT);
        assert_eq!(snapshot.temperature, Some(281.52));
        let celsius = snapshot.temperature_in(TemperatureUnit::Celsius).unwrap();
        assert!((celsius - 8.37).abs() < 0.01);
    }

    #[test]
    fn forecast_schema_reads_hourly_arrays() {
        let snapshot = parse(FORECAST, FETCHED_AT);
        let temperature = snapshot.temperature.unwrap();
        assert!((temperature - 281.55).abs() < 1e-3);
        let feels_like = snapshot.feels_like_temperature.unwrap();
        assert!((feels_like - 278.25).abs() < 1e-3);
        assert_eq!(snapshot.humidity, Some(87));
        assert_eq!(snapshot.pressure, Some(1016.2));
        assert_eq!(snapshot.rain, 0.3);
        assert_eq!(snapshot.chance_of_precipitation, Some(0.65));
        assert_eq!(snapshot.wind_speed, Some(14.8));
        assert_eq!(snapshot.wind_direction, Some(WindDirection::SouthSouthwest));
        assert_eq!(snapshot.description, "Rain");
        assert_eq!(snapshot.weather_condition_id, Some(501));
        assert_eq!(snapshot.city, "");
        assert_eq!(snapshot.country, "");
        assert_eq!(snapshot.sunrise, Some(1_700_020_000_000));
        assert_eq!(snapshot.sunset, Some(1_700_060_000_000));
    }

    #[test]
    fn empty_and_malformed_input_yield_the_empty_snapshot() {
        assert_eq!(parse("{}", FETCHED_AT), WeatherSnapshot::empty());
        assert_eq!(parse("", FETCHED_AT), WeatherSnapshot::empty());
        assert_eq!(parse("{not json", 42), WeatherSnapshot::empty());
        assert_eq!(parse("[1, 2, 3]", 42), WeatherSnapshot::empty());
        assert_eq!(parse("null", 42), WeatherSnapshot::empty());
    }

    #[test]
    fn rain_falls_back_to_one_hour_bucket_only_on_zero() {
        let zero_three_hour = r#"{"main": {}, "rain": {"3h": 0, "1h": 5.0}}"#;
        assert_eq!(parse(zero_three_hour, FETCHED_AT).rain, 5.0);

        let nonzero_three_hour = r#"{"main": {}, "rain": {"3h": 2.0, "1h": 5.0}}"#;
        assert_eq!(parse(nonzero_three_hour, FETCHED_AT).rain, 2.0);

        let absent_three_hour = r#"{"main": {}, "rain": {"1h": 1.5}}"#;
        assert_eq!(parse(absent_three_hour, FETCHED_AT).rain, 1.5);

        let no_rain = r#"{"main": {"temp": 280.0}}"#;
        assert_eq!(parse(no_rain, FETCHED_AT).rain, 0.0);
    }

    #[test]
    fn wrong_typed_fields_resolve_to_absent() {
        let json = r#"{
            "name": 12,
            "main": {"temp": "cold", "humidity": 55},
            "wind": {"speed": 3.0, "deg": "north"}
        }"#;
        let snapshot = parse(json, FETCHED_AT);
        assert_eq!(snapshot.temperature, None);
        assert_eq!(snapshot.humidity, Some(55));
        assert_eq!(snapshot.wind_speed, Some(3.0));
        assert_eq!(snapshot.wind_direction, None);
        assert_eq!(snapshot.city, "");
    }

    #[test]
    fn condition_ids_below_valid_range_are_absent() {
        let json = r#"{"main": {}, "weather": [{"id": -7, "description": "odd"}]}"#;
        let snapshot = parse(json, FETCHED_AT);
        assert_eq!(snapshot.weather_condition_id, None);
        assert_eq!(snapshot.description, "odd");
    }

    #[test]
    fn legacy_sunrise_normalized_to_milliseconds() {
        let json = r#"{"main": {}, "sys": {"sunrise": 1700020000, "sunset": -5}}"#;
        let snapshot = parse(json, FETCHED_AT);
        assert_eq!(snapshot.sunrise, Some(1_700_020_000_000));
        assert_eq!(snapshot.sunset, None);
    }

    #[test]
    fn forecast_schema_with_empty_arrays_leaves_fields_absent() {
        let json = r#"{"hourly": {"temperature_2m": [], "relativehumidity_2m": []}}"#;
        let snapshot = parse(json, FETCHED_AT);
        assert_eq!(snapshot.temperature, None);
        assert_eq!(snapshot.humidity, None);
        assert_eq!(snapshot.rain, 0.0);
        assert!(!snapshot.is_empty(), "fetched_at was still recorded");
    }

    #[test]
    fn legacy_wind_degree_sentinel_means_no_direction() {
        let json = r#"{"main": {}, "wind": {"speed": 2.0, "deg": -2147483648}}"#;
        let snapshot = parse(json, FETCHED_AT);
        assert_eq!(snapshot.wind_speed, Some(2.0));
        assert_eq!(snapshot.wind_direction, None);
    }

    #[test]
    fn parsing_is_idempotent() {
        assert_eq!(parse(LEGACY, FETCHED_AT), parse(LEGACY, FETCHED_AT));
        assert_eq!(parse(FORECAST, FETCHED_AT), parse(FORECAST, FETCHED_AT));
    }
}
