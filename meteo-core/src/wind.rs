//! 16-point compass classification of wind direction degrees.

use serde::{Deserialize, Serialize};

/// Number of compass points a wind direction may be reported with.
///
/// Sixteen is the native resolution; four and eight are lossy
/// down-samplings used by compact displays (four for text, eight for
/// arrow glyphs).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindResolution {
    Four,
    Eight,
    Sixteen,
}

impl WindResolution {
    /// Number of compass points at this resolution.
    pub const fn points(self) -> usize {
        match self {
            WindResolution::Four => 4,
            WindResolution::Eight => 8,
            WindResolution::Sixteen => 16,
        }
    }

    pub const fn all() -> &'static [WindResolution] {
        &[
            WindResolution::Four,
            WindResolution::Eight,
            WindResolution::Sixteen,
        ]
    }
}

/// A 16-point compass direction, ordered clockwise from north.
///
/// The discriminant is the index into the 16-point rose, so variant `i`
/// sits at `i * 22.5` degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WindDirection {
    North,
    NorthNortheast,
    Northeast,
    EastNortheast,
    East,
    EastSoutheast,
    Southeast,
    SouthSoutheast,
    South,
    SouthSouthwest,
    Southwest,
    WestSouthwest,
    West,
    WestNorthwest,
    Northwest,
    NorthNorthwest,
}

const ROSE: [WindDirection; 16] = [
    WindDirection::North,
    WindDirection::NorthNortheast,
    WindDirection::Northeast,
    WindDirection::EastNortheast,
    WindDirection::East,
    WindDirection::EastSoutheast,
    WindDirection::Southeast,
    WindDirection::SouthSoutheast,
    WindDirection::South,
    WindDirection::SouthSouthwest,
    WindDirection::Southwest,
    WindDirection::WestSouthwest,
    WindDirection::West,
    WindDirection::WestNorthwest,
    WindDirection::Northwest,
    WindDirection::NorthNorthwest,
];

impl WindDirection {
    /// Classify a degree value into the nearest of the 16 compass points.
    ///
    /// Each point owns a 22.5°-wide sector centered on it; values wrap at
    /// 360° and negative degrees are normalized first.
    pub fn from_degree(degree: f64) -> WindDirection {
        let normalized = degree.rem_euclid(360.0);
        let index = ((normalized + 11.25) / 22.5).floor() as usize % 16;
        ROSE[index]
    }

    /// Classify a degree value directly at the given resolution.
    ///
    /// Defined as 16-point classification followed by [`downsample`], so
    /// quantize-then-downsample and direct classification always agree.
    ///
    /// [`downsample`]: WindDirection::downsample
    pub fn from_degree_scaled(degree: f64, resolution: WindResolution) -> WindDirection {
        WindDirection::from_degree(degree).downsample(resolution)
    }

    /// Down-sample to the nearest point representable at `resolution`.
    ///
    /// A pure remap over the 16-point ordering: with `step = 16 / n`, index
    /// `i` maps to `(i + step / 2) / step * step mod 16`. Points exactly
    /// between two coarser points (e.g. northeast at four-way resolution)
    /// resolve clockwise.
    pub fn downsample(self, resolution: WindResolution) -> WindDirection {
        let step = ROSE.len() / resolution.points();
        let index = (self.index() + step / 2) / step * step % ROSE.len();
        ROSE[index]
    }

    /// Index of this point in the clockwise 16-point ordering (north = 0).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Center of this point's sector in degrees.
    pub fn degree(self) -> f64 {
        self.index() as f64 * 22.5
    }

    /// Compass abbreviation, e.g. "NNE".
    pub fn abbreviation(self) -> &'static str {
        const ABBREVIATIONS: [&str; 16] = [
            "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW",
            "NW", "NNW",
        ];
        ABBREVIATIONS[self.index()]
    }

    /// Arrow glyph pointing where the wind blows from, at eight-point
    /// resolution.
    pub fn arrow(self) -> &'static str {
        const ARROWS: [&str; 8] = ["↓", "↙", "←", "↖", "↑", "↗", "→", "↘"];
        ARROWS[self.downsample(WindResolution::Eight).index() / 2]
    }
}

impl std::fmt::Display for WindDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.abbreviation())
    }
}
