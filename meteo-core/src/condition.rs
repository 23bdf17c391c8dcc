//! Mapping of WMO weather codes to the legacy provider's condition
//! vocabulary.
//!
//! The forecast provider reports a numeric WMO weather code; display icons
//! are keyed on the legacy provider's condition ids. Both mappings are total:
//! codes outside every known band fall back to the clear-sky id (800) with
//! an "Unknown" description.

/// Condition id reported for clear sky, also the fallback for unmapped codes.
pub const CLEAR_SKY_ID: i32 = 800;

/// Map a WMO weather code to the legacy provider's condition id.
pub fn condition_id(wmo_code: i32) -> i32 {
    match wmo_code {
        0 => 800,           // Clear sky
        1 => 801,           // Mainly clear
        2 => 802,           // Partly cloudy
        3 => 804,           // Overcast
        45 | 48 => 741,     // Fog
        51 | 53 | 55 => 301, // Drizzle
        56 | 57 => 302,     // Freezing drizzle
        61 | 63 | 65 => 501, // Rain
        66 | 67 => 511,     // Freezing rain
        71 | 73 | 75 => 601, // Snow fall
        77 => 611,          // Snow grains
        80..=82 => 521,     // Rain showers
        85 | 86 => 621,     // Snow showers
        95 | 96 | 99 => 211, // Thunderstorm
        _ => CLEAR_SKY_ID,
    }
}

/// Map a WMO weather code to a human-readable description.
pub fn description(wmo_code: i32) -> &'static str {
    match wmo_code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 | 48 => "Fog",
        51 | 53 | 55 => "Drizzle",
        56 | 57 => "Freezing Drizzle",
        61 | 63 | 65 => "Rain",
        66 | 67 => "Freezing Rain",
        71 | 73 | 75 => "Snow fall",
        77 => "Snow grains",
        80..=82 => "Rain showers",
        85 | 86 => "Snow showers",
        95 | 96 | 99 => "Thunderstorm",
        _ => "Unknown",
    }
}
