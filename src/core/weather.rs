//! Weather multiplier for near-start scoring
//!
//! Wind direction is published as a 16-point compass index (1 = blowing
//! north, clockwise in 22.5° steps). The relative angle puts 0° on a pure
//! tailwind along the back straight.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::Weather;

/// Lower clamp of the weather multiplier
pub const WEATHER_MULT_MIN: f64 = 0.75;
/// Upper clamp of the weather multiplier
pub const WEATHER_MULT_MAX: f64 = 1.25;
/// Below this wind speed (m/s) the water counts as calm
pub const CALM_WIND_SPEED: f64 = 3.0;

/// Wind direction relative to the course (8 sectors)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelativeWind {
    Tailwind,
    RightTailwind,
    RightCrosswind,
    RightHeadwind,
    Headwind,
    LeftHeadwind,
    LeftCrosswind,
    LeftTailwind,
}

/// How a relative wind acts on inside versus outside courses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindFamily {
    Headwind,
    Tailwind,
    /// Blowing from the outside courses toward the inside
    CrossOutIn,
    /// Blowing from the inside courses toward the outside
    CrossInOut,
}

impl RelativeWind {
    /// Sector for a relative angle in degrees (any value, wrapped to 0..360)
    pub fn from_relative_angle(angle: f64) -> Self {
        let a = angle.rem_euclid(360.0);
        if !(22.5..337.5).contains(&a) {
            RelativeWind::Tailwind
        } else if a < 67.5 {
            RelativeWind::RightTailwind
        } else if a < 112.5 {
            RelativeWind::RightCrosswind
        } else if a < 157.5 {
            RelativeWind::RightHeadwind
        } else if a < 202.5 {
            RelativeWind::Headwind
        } else if a < 247.5 {
            RelativeWind::LeftHeadwind
        } else if a < 292.5 {
            RelativeWind::LeftCrosswind
        } else {
            RelativeWind::LeftTailwind
        }
    }

    pub fn from_direction(index: u8) -> Option<Self> {
        relative_angle(index).map(Self::from_relative_angle)
    }

    pub fn family(&self) -> WindFamily {
        match self {
            RelativeWind::Headwind | RelativeWind::RightHeadwind | RelativeWind::LeftHeadwind => {
                WindFamily::Headwind
            }
            RelativeWind::Tailwind | RelativeWind::RightTailwind | RelativeWind::LeftTailwind => {
                WindFamily::Tailwind
            }
            RelativeWind::RightCrosswind => WindFamily::CrossOutIn,
            RelativeWind::LeftCrosswind => WindFamily::CrossInOut,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RelativeWind::Tailwind => "追い風",
            RelativeWind::RightTailwind => "右追い風",
            RelativeWind::RightCrosswind => "右横風",
            RelativeWind::RightHeadwind => "右向かい風",
            RelativeWind::Headwind => "向かい風",
            RelativeWind::LeftHeadwind => "左向かい風",
            RelativeWind::LeftCrosswind => "左横風",
            RelativeWind::LeftTailwind => "左追い風",
        }
    }
}

impl fmt::Display for RelativeWind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RelativeWind {
    type Err = String;

    /// Accepts the short before-info labels and the long course-relative ones
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "追い風" | "追い風（完全）" => Ok(RelativeWind::Tailwind),
            "右追い風" | "斜め追い風（アウト→イン寄り）" => Ok(RelativeWind::RightTailwind),
            "右横風" | "横風（アウト→イン）" => Ok(RelativeWind::RightCrosswind),
            "右向かい風" | "斜め向かい風（アウト→イン寄り）" => Ok(RelativeWind::RightHeadwind),
            "向かい風" | "向かい風（完全）" => Ok(RelativeWind::Headwind),
            "左向かい風" | "斜め向かい風（イン→アウト寄り）" => Ok(RelativeWind::LeftHeadwind),
            "左横風" | "横風（イン→アウト）" => Ok(RelativeWind::LeftCrosswind),
            "左追い風" | "斜め追い風（イン→アウト寄り）" => Ok(RelativeWind::LeftTailwind),
            other => Err(format!("unknown relative wind label: {}", other)),
        }
    }
}

/// Compass heading in degrees for a 16-point index
pub fn heading_degrees(index: u8) -> Option<f64> {
    match index {
        1..=16 => Some((index - 1) as f64 * 22.5),
        _ => None,
    }
}

/// Course-relative angle for a 16-point index
pub fn relative_angle(index: u8) -> Option<f64> {
    let heading = heading_degrees(index)?;
    let from = (heading + 180.0).rem_euclid(360.0);
    Some((from - 90.0).rem_euclid(360.0))
}

/// Relative wind from the most specific field available:
/// label, then relative angle, then compass index.
pub fn resolve_relative_wind(weather: &Weather) -> Option<RelativeWind> {
    if let Some(wind) = weather
        .relative_wind
        .as_deref()
        .and_then(|label| label.parse::<RelativeWind>().ok())
    {
        return Some(wind);
    }
    if let Some(angle) = weather.relative_angle.filter(|a| a.is_finite()) {
        return Some(RelativeWind::from_relative_angle(angle));
    }
    weather.wind_direction.and_then(RelativeWind::from_direction)
}

/// Multiplier from wind speed, wave height and wind direction for a course
pub fn weather_multiplier(weather: &Weather, course: u8) -> f64 {
    let wind = weather.wind_speed.unwrap_or(0.0);
    let wave = weather.wave_height.unwrap_or(0.0);

    let mut mult = 1.0;

    if wind > 6.0 {
        mult -= 0.015 * (wind - 6.0).powf(1.2);
    }
    if wave > 10.0 {
        mult -= 0.015 * ((wave - 10.0) / 10.0);
    }

    if let Some(wind_dir) = resolve_relative_wind(weather) {
        let favoured = |yes: bool| if yes { 1.0 } else { -0.5 };
        mult += match wind_dir.family() {
            WindFamily::Headwind => 0.02 * favoured(course <= 3),
            WindFamily::Tailwind => 0.015 * favoured(course >= 4),
            WindFamily::CrossOutIn => 0.01 * favoured(course <= 2),
            WindFamily::CrossInOut => 0.01 * favoured(course >= 5),
        };
    }

    mult.clamp(WEATHER_MULT_MIN, WEATHER_MULT_MAX)
}

/// Extra trust in the inside lanes on near-calm water
pub fn calm_multiplier(weather: &Weather, lane: u8) -> f64 {
    if weather.wind_speed.unwrap_or(0.0) < CALM_WIND_SPEED {
        1.0 + 0.03 * (4.0 - lane as f64) / 3.0
    } else {
        1.0
    }
}
