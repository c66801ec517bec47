//! Context bias: venue × lane, race class × grade, and distance
//!
//! Venue rows hold roughly ±1.0 per lane; the scorer scales them down to a
//! few percent before they reach the multiplier.

use regex::Regex;
use std::sync::OnceLock;

use crate::models::Weather;

/// Per-venue lane bias table, lanes 1..=6
pub type VenueTable = &'static [(&'static str, [f64; 6])];

/// Canonical venue table (24 stadiums)
pub const VENUE_BIAS: VenueTable = &[
    ("桐生", [0.8, 0.4, 0.1, -0.2, -0.5, -0.7]),
    ("戸田", [-0.3, -0.2, 0.1, 0.4, 0.6, 0.8]),
    ("江戸川", [-0.5, -0.2, 0.2, 0.4, 0.6, 0.8]),
    ("平和島", [0.2, 0.1, 0.0, -0.2, -0.4, -0.6]),
    ("多摩川", [1.0, 0.5, 0.2, -0.2, -0.5, -0.8]),
    ("浜名湖", [0.5, 0.3, 0.1, -0.1, -0.3, -0.5]),
    ("蒲郡", [0.4, 0.2, 0.1, -0.1, -0.3, -0.5]),
    ("常滑", [0.6, 0.3, 0.1, -0.1, -0.4, -0.6]),
    ("津", [0.7, 0.4, 0.2, -0.1, -0.4, -0.7]),
    ("三国", [0.8, 0.5, 0.2, -0.1, -0.4, -0.7]),
    ("びわこ", [-0.1, 0.1, 0.2, 0.3, 0.4, 0.6]),
    ("住之江", [0.9, 0.6, 0.3, 0.0, -0.3, -0.6]),
    ("尼崎", [0.8, 0.5, 0.2, -0.2, -0.5, -0.8]),
    ("鳴門", [0.5, 0.2, 0.0, -0.2, -0.4, -0.6]),
    ("丸亀", [0.8, 0.5, 0.2, -0.1, -0.4, -0.6]),
    ("児島", [0.7, 0.4, 0.1, -0.1, -0.3, -0.5]),
    ("宮島", [0.7, 0.4, 0.1, -0.1, -0.3, -0.5]),
    ("徳山", [1.0, 0.6, 0.3, -0.2, -0.6, -1.0]),
    ("下関", [0.9, 0.6, 0.3, 0.0, -0.3, -0.6]),
    ("若松", [0.8, 0.5, 0.2, 0.0, -0.3, -0.5]),
    ("芦屋", [0.9, 0.6, 0.3, -0.1, -0.4, -0.7]),
    ("福岡", [0.7, 0.4, 0.2, 0.0, -0.3, -0.5]),
    ("唐津", [0.8, 0.5, 0.2, -0.1, -0.3, -0.5]),
    ("大村", [1.0, 0.6, 0.2, -0.1, -0.4, -0.7]),
];

/// Class bias table indexed by `[RaceClass][Grade]`
pub type ClassTable = [[f64; 4]; 4];

/// 一般 / 予選 / 準優勝戦 / 優勝戦 × A1 / A2 / B1 / B2
pub const CLASS_BIAS: ClassTable = [
    [0.0, 0.0, 0.0, 0.0],
    [0.1, 0.05, 0.0, 0.0],
    [0.5, 0.3, 0.1, 0.0],
    [1.0, 0.5, 0.2, 0.0],
];

/// Class bias of 1.0 moves the multiplier by one percent
const CLASS_SCALE: f64 = 0.01;

/// Canonical race class (種別)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RaceClass {
    General,
    Qualifying,
    SemiFinal,
    Final,
}

impl RaceClass {
    /// Fuzzy match on the scraped label; unknown text is a general race.
    pub fn normalize(label: Option<&str>) -> Self {
        let Some(label) = label else {
            return RaceClass::General;
        };

        if label.contains("準優") {
            RaceClass::SemiFinal
        } else if label.contains("優勝") {
            RaceClass::Final
        } else if label.contains("予選") {
            RaceClass::Qualifying
        } else {
            RaceClass::General
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RaceClass::General => "一般",
            RaceClass::Qualifying => "予選",
            RaceClass::SemiFinal => "準優勝戦",
            RaceClass::Final => "優勝戦",
        }
    }

    fn index(&self) -> usize {
        match self {
            RaceClass::General => 0,
            RaceClass::Qualifying => 1,
            RaceClass::SemiFinal => 2,
            RaceClass::Final => 3,
        }
    }
}

/// Competitor grade index (A1 / A2 / B1 / B2)
fn grade_index(klass: &str) -> Option<usize> {
    match klass.trim() {
        "A1" => Some(0),
        "A2" => Some(1),
        "B1" => Some(2),
        "B2" => Some(3),
        _ => None,
    }
}

/// Venue character used to scale wind effects
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VenueGroup {
    /// イン強
    InStrong,
    /// センター伸び
    CenterStretch,
    /// アウト伸び
    OutStretch,
    /// フラット
    Flat,
}

impl VenueGroup {
    pub fn of(place: &str) -> Option<Self> {
        match place {
            "徳山" | "芦屋" | "大村" | "唐津" | "若松" => Some(VenueGroup::InStrong),
            "桐生" | "蒲郡" | "浜名湖" | "鳴門" => Some(VenueGroup::CenterStretch),
            "戸田" | "江戸川" | "びわこ" => Some(VenueGroup::OutStretch),
            "多摩川" | "下関" | "常滑" | "福岡" | "丸亀" | "児島" | "平和島" | "住之江" | "宮島"
            | "津" | "尼崎" | "三国" => Some(VenueGroup::Flat),
            _ => None,
        }
    }

    pub fn wind_factor(&self) -> f64 {
        match self {
            VenueGroup::InStrong => 1.2,
            VenueGroup::CenterStretch => 1.0,
            VenueGroup::OutStretch => 0.5,
            VenueGroup::Flat => 0.8,
        }
    }
}

/// Static lane bias row for a venue; unknown or missing venue is all zero
pub fn venue_row(table: VenueTable, place: Option<&str>) -> [f64; 6] {
    place
        .and_then(|p| table.iter().find(|(name, _)| *name == p.trim()))
        .map(|(_, row)| *row)
        .unwrap_or([0.0; 6])
}

/// Venue row adjusted for live wind, wave and temperature
///
/// Calm or venue-less races keep the static row untouched.
pub fn dynamic_venue_row(table: VenueTable, place: Option<&str>, weather: &Weather) -> [f64; 6] {
    let mut row = venue_row(table, place);
    let wind_speed = weather.wind_speed.unwrap_or(0.0);

    let Some(place) = place else {
        return row;
    };
    if wind_speed == 0.0 {
        return row;
    }

    let factor = VenueGroup::of(place.trim())
        .map(|g| g.wind_factor())
        .unwrap_or(1.0);

    // Direction the wind blows to, degrees clockwise from north
    if let Some(heading) = weather.wind_direction.and_then(super::weather::heading_degrees) {
        if heading < 45.0 || heading >= 315.0 {
            for (i, bias) in row.iter_mut().enumerate() {
                *bias += 0.12 * (3.0 - i as f64) / 3.0 * factor;
            }
        } else if (135.0..=225.0).contains(&heading) {
            for (i, bias) in row.iter_mut().enumerate() {
                *bias -= 0.12 * (3.0 - i as f64) / 3.0 * factor;
            }
        } else if heading < 135.0 {
            row[2] += 0.06 * factor;
            row[3] += 0.06 * factor;
        } else {
            for bias in row.iter_mut() {
                *bias -= 0.02 * factor;
            }
        }
    }

    if wind_speed > 7.0 {
        let strength = (1.0 + (wind_speed - 7.0) * 0.03).min(1.15);
        for bias in row.iter_mut() {
            *bias += (strength - 1.0) * 0.5;
        }
    }

    if weather.wave_height.unwrap_or(0.0) >= 4.0 {
        for bias in row.iter_mut() {
            *bias -= 0.025;
        }
    }

    if weather.temperature.unwrap_or(15.0) <= 10.0 {
        row[2] -= 0.03;
        row[3] -= 0.03;
    }

    for bias in row.iter_mut() {
        *bias = bias.clamp(-1.0, 1.0);
    }

    row
}

/// Lane bias from a row; lanes outside 1..=6 get nothing
pub fn lane_bias(row: &[f64; 6], lane: u8) -> f64 {
    match lane {
        1..=6 => row[(lane - 1) as usize],
        _ => 0.0,
    }
}

/// Race class × grade bias, already scaled to a multiplier fraction
pub fn class_bias(table: &ClassTable, race_type: Option<&str>, klass: Option<&str>) -> f64 {
    let class = RaceClass::normalize(race_type);
    klass
        .and_then(grade_index)
        .map(|grade| table[class.index()][grade] * CLASS_SCALE)
        .unwrap_or(0.0)
}

fn distance_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(\d+)").expect("valid distance pattern"))
}

/// First integer in a distance label such as "1800m"
pub fn distance_meters(text: Option<&str>) -> Option<u32> {
    let caps = distance_pattern().captures(text?)?;
    caps.get(1)?.as_str().parse().ok()
}

/// Short courses lean inward a little more than long ones
pub fn distance_bias(text: Option<&str>) -> f64 {
    match distance_meters(text) {
        Some(d) if d > 0 && d <= 1700 => 0.004,
        Some(d) if d >= 2000 => 0.002,
        _ => 0.0,
    }
}

/// Components of the context multiplier for one entry
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ContextBias {
    pub venue: f64,
    pub class: f64,
    pub distance: f64,
}

impl ContextBias {
    /// `1 + bias`, with the summed bias optionally clamped to ±`clamp`
    pub fn multiplier(&self, clamp: Option<f64>) -> f64 {
        let mut bias = self.venue + self.class + self.distance;
        if let Some(limit) = clamp {
            bias = bias.clamp(-limit, limit);
        }
        1.0 + bias
    }
}
