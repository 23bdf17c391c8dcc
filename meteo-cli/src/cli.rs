use std::convert::TryFrom;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};

use meteo_core::{
    PressureUnit, TemperatureUnit, WeatherSnapshot, WindResolution, WindUnit, parse,
    parse_locations, parse_series, uv_index,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "meteo", version, about = "Normalize weather provider JSON")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Normalize a current-conditions response (either provider schema).
    Current {
        /// Path to the JSON response body, or "-" for stdin.
        file: PathBuf,

        /// Temperature unit: kelvin, celsius or fahrenheit.
        #[arg(long, default_value = "celsius")]
        temp_unit: String,

        /// Pressure unit: hpa, kpa, mmhg or inhg.
        #[arg(long, default_value = "hpa")]
        pressure_unit: String,

        /// Wind speed unit: mps, kmh, mph, knots or beaufort.
        #[arg(long, default_value = "mps")]
        wind_unit: String,
    },

    /// Normalize an hourly forecast response into a table.
    Series {
        /// Path to the JSON response body, or "-" for stdin.
        file: PathBuf,

        /// Maximum number of hours to print.
        #[arg(long, default_value_t = 12)]
        limit: usize,
    },

    /// Extract the daily maximum UV index.
    Uv {
        /// Path to the JSON response body, or "-" for stdin.
        file: PathBuf,
    },

    /// List the matches in a geocoding (city search) response.
    Locations {
        /// Path to the JSON response body, or "-" for stdin.
        file: PathBuf,
    },
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Current {
                file,
                temp_unit,
                pressure_unit,
                wind_unit,
            } => {
                let temperature_unit = TemperatureUnit::try_from(temp_unit.as_str())?;
                let pressure_unit = PressureUnit::try_from(pressure_unit.as_str())?;
                let wind_unit = WindUnit::try_from(wind_unit.as_str())?;

                let body = read_input(&file)?;
                let snapshot = parse(&body, now_millis());
                print_snapshot(&snapshot, temperature_unit, pressure_unit, wind_unit);
            }
            Command::Series { file, limit } => {
                let body = read_input(&file)?;
                let snapshots = parse_series(&body, now_millis())
                    .context("Failed to parse hourly forecast response")?;

                println!("{:<17} {:>6} {:>5} {:>6} {:>6}  {}", "time", "temp", "rain", "wind", "dir", "condition");
                for snapshot in snapshots.iter().take(limit) {
                    let time = snapshot
                        .forecast_time
                        .map(format_time)
                        .unwrap_or_else(|| "-".to_owned());
                    let temperature = snapshot
                        .rounded_temperature_in(TemperatureUnit::Celsius)
                        .map(|t| format!("{t}°C"))
                        .unwrap_or_else(|| "-".to_owned());
                    let wind = snapshot
                        .wind_speed
                        .map(|speed| format!("{speed:.1}"))
                        .unwrap_or_else(|| "-".to_owned());
                    let direction = snapshot
                        .wind_direction_at(WindResolution::Eight)
                        .map(|direction| direction.to_string())
                        .unwrap_or_else(|| "-".to_owned());
                    println!(
                        "{:<17} {:>6} {:>5} {:>6} {:>6}  {}",
                        time, temperature, snapshot.rain, wind, direction, snapshot.description
                    );
                }
            }
            Command::Uv { file } => {
                let body = read_input(&file)?;
                println!("{:.2}", uv_index(&body));
            }
            Command::Locations { file } => {
                let body = read_input(&file)?;
                let locations =
                    parse_locations(&body).context("Failed to parse geocoding response")?;
                if locations.is_empty() {
                    println!("No matches.");
                }
                for location in locations {
                    let mut line = location.name.clone();
                    if !location.admin_area.is_empty() {
                        line = format!("{line}, {}", location.admin_area);
                    }
                    if !location.country.is_empty() {
                        line = format!("{line}, {}", location.country);
                    }
                    println!("{line} ({:.4}, {:.4})", location.latitude, location.longitude);
                }
            }
        }

        Ok(())
    }
}

fn print_snapshot(
    snapshot: &WeatherSnapshot,
    temperature_unit: TemperatureUnit,
    pressure_unit: PressureUnit,
    wind_unit: WindUnit,
) {
    if snapshot.is_empty() {
        println!("No weather data in response.");
        return;
    }

    if !snapshot.city.is_empty() || !snapshot.country.is_empty() {
        println!("Location:    {} {}", snapshot.city, snapshot.country);
    }
    if !snapshot.description.is_empty() {
        let id = snapshot
            .weather_condition_id
            .map(|id| format!(" (id {id})"))
            .unwrap_or_default();
        println!("Condition:   {}{id}", snapshot.description);
    }
    println!(
        "Temperature: {}",
        format_reading(
            snapshot.rounded_temperature_in(temperature_unit),
            temperature_unit
        )
    );
    println!(
        "Feels like:  {}",
        format_reading(
            snapshot.rounded_feels_like_in(temperature_unit),
            temperature_unit
        )
    );
    match snapshot.humidity {
        Some(humidity) => println!("Humidity:    {humidity}%"),
        None => println!("Humidity:    -"),
    }
    match snapshot.pressure_in(pressure_unit) {
        Some(pressure) => println!("Pressure:    {pressure:.1} {pressure_unit}"),
        None => println!("Pressure:    -"),
    }
    match snapshot.wind_speed_in(wind_unit) {
        Some(speed) => {
            let direction = snapshot
                .wind_direction
                .map(|direction| format!(" from {direction}"))
                .unwrap_or_default();
            println!("Wind:        {speed:.1} {wind_unit}{direction}");
        }
        None => println!("Wind:        -"),
    }
    println!("Rain:        {} mm", snapshot.rain);
    if let Some(chance) = snapshot.chance_of_precipitation {
        println!("Precip:      {:.0}%", chance * 100.0);
    }
    if let Some(sunrise) = snapshot.sunrise {
        println!("Sunrise:     {}", format_time(sunrise));
    }
    if let Some(sunset) = snapshot.sunset {
        println!("Sunset:      {}", format_time(sunset));
    }
}

fn format_reading(value: Option<i32>, unit: TemperatureUnit) -> String {
    match value {
        Some(value) => format!("{value} {unit}"),
        None => "-".to_owned(),
    }
}

fn format_time(epoch_millis: i64) -> String {
    match DateTime::<Utc>::from_timestamp_millis(epoch_millis) {
        Some(time) => time.format("%Y-%m-%d %H:%M %Z").to_string(),
        None => "-".to_owned(),
    }
}

fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

fn read_input(path: &Path) -> anyhow::Result<String> {
    if path == Path::new("-") {
        let mut body = String::new();
        std::io::stdin()
            .read_to_string(&mut body)
            .context("Failed to read response body from stdin")?;
        Ok(body)
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read response body from {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_formatting_is_utc() {
        assert_eq!(format_time(0), "1970-01-01 00:00 UTC");
    }

    #[test]
    fn unit_tokens_are_validated() {
        assert!(TemperatureUnit::try_from("celsius").is_ok());
        assert!(TemperatureUnit::try_from("parsecs").is_err());
    }

    #[test]
    fn current_accepts_unit_flags() {
        let cli = Cli::try_parse_from([
            "meteo",
            "current",
            "response.json",
            "--temp-unit",
            "kelvin",
            "--pressure-unit",
            "mmhg",
            "--wind-unit",
            "beaufort",
        ])
        .expect("flags should parse");
        match cli.command {
            Command::Current {
                temp_unit,
                pressure_unit,
                wind_unit,
                ..
            } => {
                assert_eq!(temp_unit, "kelvin");
                assert_eq!(pressure_unit, "mmhg");
                assert_eq!(wind_unit, "beaufort");
            }
            other => panic!("expected current subcommand, got {other:?}"),
        }
    }
}
