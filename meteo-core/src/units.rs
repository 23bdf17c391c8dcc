//! Unit conversion for the canonical snapshot values.
//!
//! Snapshots store temperature in kelvin, pressure in hPa and wind speed in
//! meters per second. Conversions are pure and total over finite inputs;
//! requesting an unsupported unit token is a caller bug and is rejected when
//! the token is parsed, not silently defaulted.

use std::convert::TryFrom;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemperatureUnit {
    Kelvin,
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemperatureUnit::Kelvin => "kelvin",
            TemperatureUnit::Celsius => "celsius",
            TemperatureUnit::Fahrenheit => "fahrenheit",
        }
    }

    pub const fn all() -> &'static [TemperatureUnit] {
        &[
            TemperatureUnit::Kelvin,
            TemperatureUnit::Celsius,
            TemperatureUnit::Fahrenheit,
        ]
    }
}

impl std::fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TemperatureUnit {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "kelvin" | "k" => Ok(TemperatureUnit::Kelvin),
            "celsius" | "c" | "°c" => Ok(TemperatureUnit::Celsius),
            "fahrenheit" | "f" | "°f" => Ok(TemperatureUnit::Fahrenheit),
            _ => Err(anyhow::anyhow!(
                "Unknown temperature unit '{value}'. Supported units: kelvin, celsius, fahrenheit."
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PressureUnit {
    /// Hectopascal, identical to millibar. The canonical unit.
    Hpa,
    Kpa,
    MmHg,
    InHg,
}

impl PressureUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            PressureUnit::Hpa => "hpa",
            PressureUnit::Kpa => "kpa",
            PressureUnit::MmHg => "mmhg",
            PressureUnit::InHg => "inhg",
        }
    }

    pub const fn all() -> &'static [PressureUnit] {
        &[
            PressureUnit::Hpa,
            PressureUnit::Kpa,
            PressureUnit::MmHg,
            PressureUnit::InHg,
        ]
    }
}

impl std::fmt::Display for PressureUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for PressureUnit {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "hpa" | "mbar" => Ok(PressureUnit::Hpa),
            "kpa" => Ok(PressureUnit::Kpa),
            "mmhg" | "mm hg" => Ok(PressureUnit::MmHg),
            "inhg" | "in hg" => Ok(PressureUnit::InHg),
            _ => Err(anyhow::anyhow!(
                "Unknown pressure unit '{value}'. Supported units: hpa, kpa, mmhg, inhg."
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindUnit {
    /// Meters per second. The canonical unit.
    Mps,
    Kmh,
    Mph,
    Knots,
    /// Beaufort number, a stepped scale. The converted value is always a
    /// whole number between 0 and 12.
    Beaufort,
}

impl WindUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            WindUnit::Mps => "mps",
            WindUnit::Kmh => "kmh",
            WindUnit::Mph => "mph",
            WindUnit::Knots => "knots",
            WindUnit::Beaufort => "beaufort",
        }
    }

    pub const fn all() -> &'static [WindUnit] {
        &[
            WindUnit::Mps,
            WindUnit::Kmh,
            WindUnit::Mph,
            WindUnit::Knots,
            WindUnit::Beaufort,
        ]
    }
}

impl std::fmt::Display for WindUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for WindUnit {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "mps" | "m/s" => Ok(WindUnit::Mps),
            "kmh" | "km/h" | "kph" => Ok(WindUnit::Kmh),
            "mph" => Ok(WindUnit::Mph),
            "knots" | "kn" => Ok(WindUnit::Knots),
            "beaufort" | "bft" => Ok(WindUnit::Beaufort),
            _ => Err(anyhow::anyhow!(
                "Unknown wind speed unit '{value}'. Supported units: mps, kmh, mph, knots, beaufort."
            )),
        }
    }
}

/// Convert a temperature reading from kelvin to `unit`.
pub fn convert_temperature(kelvin: f32, unit: TemperatureUnit) -> f32 {
    match unit {
        TemperatureUnit::Kelvin => kelvin,
        TemperatureUnit::Celsius => kelvin - 273.15,
        TemperatureUnit::Fahrenheit => (kelvin - 273.15) * 9.0 / 5.0 + 32.0,
    }
}

/// Convert a pressure reading from hPa to `unit`.
pub fn convert_pressure(hpa: f64, unit: PressureUnit) -> f64 {
    match unit {
        PressureUnit::Hpa => hpa,
        PressureUnit::Kpa => hpa / 10.0,
        PressureUnit::MmHg => hpa * 0.750_061_561_303,
        PressureUnit::InHg => hpa * 0.029_529_983_071_4,
    }
}

/// Convert a wind speed reading from m/s to `unit`.
pub fn convert_wind(mps: f64, unit: WindUnit) -> f64 {
    match unit {
        WindUnit::Mps => mps,
        WindUnit::Kmh => mps * 3.6,
        WindUnit::Mph => mps * 2.236_94,
        WindUnit::Knots => mps * 1.943_844,
        WindUnit::Beaufort => f64::from(beaufort(mps)),
    }
}

/// Beaufort number for a wind speed in m/s, via the standard threshold table.
fn beaufort(mps: f64) -> u8 {
    const STEPS: [f64; 12] = [
        0.3, 1.5, 3.3, 5.5, 7.9, 10.7, 13.8, 17.1, 20.7, 24.4, 28.4, 32.6,
    ];
    STEPS.iter().position(|limit| mps < *limit).unwrap_or(12) as u8
}

/// Round a converted reading to a whole number for display,
/// half away from zero.
pub fn round_for_display(value: f64) -> i32 {
    value.round() as i32
}
