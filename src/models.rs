use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;

use crate::core::config::ScoringVariant;

/// Raw statistic as posted by the extractor: a number, a text cell
/// (`"6.52"`, `"38.5%"`, `"-"`) or anything else, which reads as missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatValue {
    Number(f64),
    Text(String),
    Other(Value),
}

impl StatValue {
    /// Parse into a finite number. Blank, `-`, `--` and garbage yield `None`.
    pub fn parse(&self) -> Option<f64> {
        let value = match self {
            StatValue::Number(n) => *n,
            StatValue::Text(text) => {
                let cleaned = text.replace('%', "");
                let cleaned = cleaned.trim();
                if cleaned.is_empty() || cleaned == "-" || cleaned == "--" {
                    return None;
                }
                cleaned.parse::<f64>().ok()?
            }
            StatValue::Other(_) => return None,
        };
        value.is_finite().then_some(value)
    }
}

impl From<f64> for StatValue {
    fn from(value: f64) -> Self {
        StatValue::Number(value)
    }
}

impl From<&str> for StatValue {
    fn from(value: &str) -> Self {
        StatValue::Text(value.to_string())
    }
}

/// Lanes arrive as `1` or `"1"`; anything outside 1..=6 is rejected.
fn de_lane<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = StatValue::deserialize(deserializer)?;
    match raw.parse() {
        Some(v) if v.fract() == 0.0 && (1.0..=6.0).contains(&v) => Ok(v as u8),
        _ => Err(serde::de::Error::custom(format!(
            "lane must be an integer between 1 and 6, got {:?}",
            raw
        ))),
    }
}

/// Pre-race exhibition data (展示), only available close to the start
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExhibitInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exhibit_time: Option<StatValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tilt: Option<StatValue>,
    /// Displayed start timing in the start exhibition
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub st: Option<StatValue>,
    /// Course actually taken in the start exhibition
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course: Option<StatValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adjust_weight: Option<StatValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<StatValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub propeller: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parts_change: Option<String>,
}

/// Per-factor audit trail attached to a scored entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreBreakdown {
    pub lane: f64,
    pub st: f64,
    pub win: f64,
    pub two_natloc: f64,
    pub two_mecha: f64,
    pub three_mix: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exhibit: Option<f64>,
    /// Base score (plus exhibition score) before any multiplier
    pub base: f64,
    pub venue_bias: f64,
    pub class_bias: f64,
    pub distance_bias: f64,
    pub context_mult: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather_mult: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calm_mult: Option<f64>,
}

/// One competitor in a race (出走表の1行)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Entry {
    #[serde(deserialize_with = "de_lane")]
    pub lane: u8,
    /// Competitor grade: A1 / A2 / B1 / B2
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub klass: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_st: Option<StatValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub national_win: Option<StatValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_win: Option<StatValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub national_2r: Option<StatValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_2r: Option<StatValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motor_2r: Option<StatValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boat_2r: Option<StatValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub national_3r: Option<StatValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_3r: Option<StatValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motor_3r: Option<StatValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boat_3r: Option<StatValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exhibit_info: Option<ExhibitInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score_breakdown: Option<ScoreBreakdown>,
    /// Everything else the extractor attached (racer name, id, branch, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Entry {
    pub fn new(lane: u8) -> Self {
        Self {
            lane,
            ..Default::default()
        }
    }

    /// Score used for ranking; unscored entries rank as 0
    pub fn score_or_zero(&self) -> f64 {
        self.score.unwrap_or(0.0)
    }
}

/// First lane that appears more than once in a race
pub fn duplicate_lane(entries: &[Entry]) -> Option<u8> {
    let mut seen = HashSet::new();
    entries.iter().map(|e| e.lane).find(|&lane| !seen.insert(lane))
}

/// Live weather published on the before-info page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Weather {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub water_temp: Option<f64>,
    /// Wind speed in m/s
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind_speed: Option<f64>,
    /// 16-point compass index (1..=16), arrow points where the wind blows to
    #[serde(default, alias = "wind_angle", skip_serializing_if = "Option::is_none")]
    pub wind_direction: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relative_wind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relative_angle: Option<f64>,
    /// Wave height in cm
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wave_height: Option<f64>,
}

/// Race-level context for the scorer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RaceContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place: Option<String>,
    /// e.g. "1800m"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<String>,
    /// Race class label, e.g. "予選", "準優勝戦"
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub race_type: Option<String>,
    #[serde(flatten)]
    pub weather: Weather,
}

/// Generated tickets for one wager format
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TicketResult {
    pub tickets: Vec<String>,
    pub formation: String,
    pub count: usize,
    pub note: String,
}

impl TicketResult {
    pub fn new(tickets: Vec<String>, formation: impl Into<String>, note: impl Into<String>) -> Self {
        Self {
            count: tickets.len(),
            tickets,
            formation: formation.into(),
            note: note.into(),
        }
    }

    /// Soft failure when the race has too few entries for the format
    pub fn insufficient() -> Self {
        Self::new(Vec::new(), "", "error: entries不足")
    }

    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }
}

/// Scoring-only request (also the CLI race file format)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreRequest {
    pub entries: Vec<Entry>,
    #[serde(flatten)]
    pub context: RaceContext,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<ScoringVariant>,
    /// Scheduled start, "HH:MM" local time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
}

/// Race prediction request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictRequest {
    pub entries: Vec<Entry>,
    #[serde(flatten)]
    pub context: RaceContext,
    #[serde(rename = "betType")]
    pub bet_type: String,
    pub method: String,
    #[serde(default)]
    pub points: Option<StatValue>,
    /// Switches 1軸流し to seeded score-weighted sampling
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub variant: Option<ScoringVariant>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub race: Option<Value>,
    #[serde(default)]
    pub date: Option<Value>,
    #[serde(default)]
    pub memo: Option<Value>,
}

/// Race prediction response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictResponse {
    #[serde(rename = "betType")]
    pub bet_type: String,
    pub method: String,
    pub points: usize,
    /// "A" = pre-race scoring, "B" = near-start scoring
    pub mode: String,
    #[serde(flatten)]
    pub context: RaceContext,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub race: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<Value>,
    pub entries: Vec<Entry>,
    pub tickets: TicketResult,
    pub reference_picks: Vec<String>,
}

/// Supported (betType, method) pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatInfo {
    #[serde(rename = "betType")]
    pub bet_type: String,
    pub method: String,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}
