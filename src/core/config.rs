//! Scoring engine configuration
//!
//! Pre-race and near-start scoring are two configurations of the same
//! engine rather than two scorers.

use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::bias::{ClassTable, VenueTable, CLASS_BIAS, VENUE_BIAS};

/// Races further away than this are scored with the pre-race variant
pub const NEAR_START_MINUTES: i64 = 15;

/// Weights of the six base factor groups (sum to 1.0)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FactorWeights {
    pub lane: f64,
    pub st: f64,
    pub win: f64,
    pub two_natloc: f64,
    pub two_mecha: f64,
    pub three_mix: f64,
}

impl Default for FactorWeights {
    fn default() -> Self {
        Self {
            lane: 0.22,
            st: 0.20,
            win: 0.20,
            two_natloc: 0.15,
            two_mecha: 0.12,
            three_mix: 0.11,
        }
    }
}

impl FactorWeights {
    pub fn sum(&self) -> f64 {
        self.lane + self.st + self.win + self.two_natloc + self.two_mecha + self.three_mix
    }
}

/// Weights of the exhibition sub-score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExhibitWeights {
    pub exhibit_time: f64,
    pub tilt: f64,
    pub course: f64,
    pub st_display: f64,
    pub adjust_weight: f64,
}

impl Default for ExhibitWeights {
    fn default() -> Self {
        Self {
            exhibit_time: 0.08,
            tilt: 0.03,
            course: 0.04,
            st_display: 0.06,
            adjust_weight: 0.02,
        }
    }
}

/// Full scorer configuration
#[derive(Debug, Clone)]
pub struct ScorerConfig {
    pub weights: FactorWeights,
    pub exhibit_weights: ExhibitWeights,
    pub venue_bias: VenueTable,
    pub class_bias: ClassTable,
    /// Venue row value of 1.0 moves the multiplier by this fraction
    pub venue_scale: f64,
    /// Clamp on the summed context bias
    pub context_clamp: Option<f64>,
    pub include_exhibition: bool,
    /// Weather multiplier, dynamic venue bias and calm-water correction
    pub include_weather: bool,
}

impl ScorerConfig {
    /// Ability index from program data only (A mode)
    pub fn pre_race() -> Self {
        Self {
            weights: FactorWeights::default(),
            exhibit_weights: ExhibitWeights::default(),
            venue_bias: VENUE_BIAS,
            class_bias: CLASS_BIAS,
            venue_scale: 0.03,
            context_clamp: Some(0.05),
            include_exhibition: false,
            include_weather: false,
        }
    }

    /// Index including exhibition and live weather (B mode)
    pub fn near_start() -> Self {
        Self {
            context_clamp: None,
            include_exhibition: true,
            include_weather: true,
            ..Self::pre_race()
        }
    }

    pub fn for_variant(variant: ScoringVariant) -> Self {
        match variant {
            ScoringVariant::PreRace => Self::pre_race(),
            ScoringVariant::NearStart => Self::near_start(),
        }
    }
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self::pre_race()
    }
}

/// Which configuration to score with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringVariant {
    #[default]
    #[serde(alias = "A", alias = "pre")]
    PreRace,
    #[serde(alias = "B", alias = "near")]
    NearStart,
}

impl ScoringVariant {
    /// Response mode label
    pub fn mode(&self) -> &'static str {
        match self {
            ScoringVariant::PreRace => "A",
            ScoringVariant::NearStart => "B",
        }
    }

    /// Pre-race while the start is more than 15 minutes away
    pub fn for_minutes_to_start(minutes: i64) -> Self {
        if minutes > NEAR_START_MINUTES {
            ScoringVariant::PreRace
        } else {
            ScoringVariant::NearStart
        }
    }

    /// Explicit choice wins; otherwise decide from an "HH:MM" start time today.
    pub fn resolve(explicit: Option<Self>, start_time: Option<&str>, now: NaiveDateTime) -> Self {
        if let Some(variant) = explicit {
            return variant;
        }

        let Some(text) = start_time else {
            return ScoringVariant::PreRace;
        };

        match NaiveTime::parse_from_str(text.trim(), "%H:%M") {
            Ok(time) => {
                let start = now.date().and_time(time);
                Self::for_minutes_to_start((start - now).num_minutes())
            }
            Err(e) => {
                warn!("Unreadable start time {:?}: {}. Using pre-race scoring.", text, e);
                ScoringVariant::PreRace
            }
        }
    }
}
