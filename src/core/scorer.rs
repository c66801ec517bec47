//! Feature scorer
//!
//! Turns per-lane program statistics (and, close to the start, exhibition
//! and weather data) into one comparable score per entry:
//!
//! ```text
//! score = round1((base + exhibit) × context_mult × weather_mult × calm_mult)
//! ```
//!
//! Every factor is min-max normalized across the race, so a score only
//! means something relative to the other boats in the same race.

use tracing::debug;

use super::bias::{class_bias, distance_bias, dynamic_venue_row, lane_bias, venue_row, ContextBias, RaceClass};
use super::config::{ExhibitWeights, ScorerConfig, ScoringVariant};
use super::normalize::{defaults, read_rate, read_stat, round_to, Range};
use super::weather::{calm_multiplier, weather_multiplier};
use crate::models::{Entry, ExhibitInfo, RaceContext, ScoreBreakdown};

/// Raw statistics of one entry after defaulting
#[derive(Debug, Clone, Copy)]
struct RawStats {
    lane: f64,
    avg_st: f64,
    win_blend: f64,
    national_2r: f64,
    local_2r: f64,
    motor_2r: f64,
    boat_2r: f64,
    national_3r: f64,
    local_3r: f64,
    motor_3r: f64,
    boat_3r: f64,
}

impl RawStats {
    fn read(entry: &Entry) -> Self {
        let national_win = read_stat(entry.national_win.as_ref(), defaults::NATIONAL_WIN);
        let local_win = read_stat(entry.local_win.as_ref(), defaults::LOCAL_WIN);

        Self {
            lane: entry.lane as f64,
            avg_st: read_stat(entry.avg_st.as_ref(), defaults::AVG_ST),
            win_blend: 0.7 * national_win + 0.3 * local_win,
            national_2r: read_rate(entry.national_2r.as_ref(), defaults::NATIONAL_2R),
            local_2r: read_rate(entry.local_2r.as_ref(), defaults::LOCAL_2R),
            motor_2r: read_rate(entry.motor_2r.as_ref(), defaults::MOTOR_2R),
            boat_2r: read_rate(entry.boat_2r.as_ref(), defaults::BOAT_2R),
            national_3r: read_rate(entry.national_3r.as_ref(), defaults::NATIONAL_3R),
            local_3r: read_rate(entry.local_3r.as_ref(), defaults::LOCAL_3R),
            motor_3r: read_rate(entry.motor_3r.as_ref(), defaults::MOTOR_3R),
            boat_3r: read_rate(entry.boat_3r.as_ref(), defaults::BOAT_3R),
        }
    }
}

/// Normalized factor groups of one entry, each in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Factors {
    pub lane: f64,
    pub st: f64,
    pub win: f64,
    pub two_natloc: f64,
    pub two_mecha: f64,
    pub three_mix: f64,
}

impl Factors {
    fn compute(raw: &[RawStats]) -> Vec<Self> {
        let range = |f: fn(&RawStats) -> f64| Range::of(&raw.iter().map(f).collect::<Vec<_>>());

        let lane = range(|r| r.lane);
        let st = range(|r| r.avg_st);
        let win = range(|r| r.win_blend);
        let nat2 = range(|r| r.national_2r);
        let loc2 = range(|r| r.local_2r);
        let mot2 = range(|r| r.motor_2r);
        let bot2 = range(|r| r.boat_2r);
        let nat3 = range(|r| r.national_3r);
        let loc3 = range(|r| r.local_3r);
        let mot3 = range(|r| r.motor_3r);
        let bot3 = range(|r| r.boat_3r);

        raw.iter()
            .map(|r| Factors {
                lane: lane.inverse(r.lane),
                st: st.inverse(r.avg_st),
                win: win.direct(r.win_blend),
                two_natloc: 0.5 * nat2.direct(r.national_2r) + 0.5 * loc2.direct(r.local_2r),
                two_mecha: 0.5 * mot2.direct(r.motor_2r) + 0.5 * bot2.direct(r.boat_2r),
                three_mix: 0.25 * nat3.direct(r.national_3r)
                    + 0.25 * loc3.direct(r.local_3r)
                    + 0.25 * mot3.direct(r.motor_3r)
                    + 0.25 * bot3.direct(r.boat_3r),
            })
            .collect()
    }
}

/// Normalized exhibition factors of one entry, each in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExhibitFactors {
    pub exhibit_time: f64,
    pub tilt: f64,
    pub course: f64,
    pub st_display: f64,
    pub adjust_weight: f64,
}

impl ExhibitFactors {
    fn compute(entries: &[Entry]) -> Vec<Self> {
        let empty = ExhibitInfo::default();
        let infos: Vec<&ExhibitInfo> = entries
            .iter()
            .map(|e| e.exhibit_info.as_ref().unwrap_or(&empty))
            .collect();

        let times: Vec<f64> = infos
            .iter()
            .map(|x| read_stat(x.exhibit_time.as_ref(), defaults::EXHIBIT_TIME))
            .collect();
        let tilts: Vec<f64> = infos
            .iter()
            .map(|x| read_stat(x.tilt.as_ref(), defaults::TILT))
            .collect();
        let courses: Vec<f64> = infos
            .iter()
            .zip(entries)
            .map(|(x, e)| read_stat(x.course.as_ref(), e.lane as f64))
            .collect();
        let sts: Vec<f64> = infos
            .iter()
            .map(|x| read_stat(x.st.as_ref(), defaults::DISPLAY_ST))
            .collect();
        let adjusts: Vec<f64> = infos
            .iter()
            .map(|x| read_stat(x.adjust_weight.as_ref(), defaults::ADJUST_WEIGHT))
            .collect();

        let time_range = Range::of(&times);
        let course_range = Range::of(&courses);
        let st_range = Range::of(&sts);
        let adjust_range = Range::of(&adjusts);

        (0..entries.len())
            .map(|i| ExhibitFactors {
                exhibit_time: time_range.inverse(times[i]),
                tilt: 1.0 - (tilts[i].abs() / 1.5).min(1.0),
                course: course_range.inverse(courses[i]),
                st_display: st_range.inverse(sts[i]),
                adjust_weight: adjust_range.inverse(adjusts[i]),
            })
            .collect()
    }

    fn score(&self, w: &ExhibitWeights) -> f64 {
        (w.exhibit_time * self.exhibit_time
            + w.tilt * self.tilt
            + w.course * self.course
            + w.st_display * self.st_display
            + w.adjust_weight * self.adjust_weight)
            * 100.0
    }
}

/// Course taken in the exhibition, falling back to the lane
fn exhibit_course(entry: &Entry) -> u8 {
    entry
        .exhibit_info
        .as_ref()
        .and_then(|x| x.course.as_ref())
        .and_then(|c| c.parse())
        .map(|c| c.round())
        .filter(|c| (1.0..=6.0).contains(c))
        .map(|c| c as u8)
        .unwrap_or(entry.lane)
}

/// Parameterized scoring engine
#[derive(Debug, Clone, Default)]
pub struct FeatureScorer {
    config: ScorerConfig,
}

impl FeatureScorer {
    pub fn new(config: ScorerConfig) -> Self {
        Self { config }
    }

    pub fn pre_race() -> Self {
        Self::new(ScorerConfig::pre_race())
    }

    pub fn near_start() -> Self {
        Self::new(ScorerConfig::near_start())
    }

    pub fn for_variant(variant: ScoringVariant) -> Self {
        Self::new(ScorerConfig::for_variant(variant))
    }

    /// Normalized base factors per entry, in input order
    pub fn factors(&self, entries: &[Entry]) -> Vec<Factors> {
        let raw: Vec<RawStats> = entries.iter().map(RawStats::read).collect();
        Factors::compute(&raw)
    }

    /// Normalized exhibition factors per entry, in input order
    pub fn exhibit_factors(&self, entries: &[Entry]) -> Vec<ExhibitFactors> {
        ExhibitFactors::compute(entries)
    }

    /// Score every entry and return them sorted by lane.
    ///
    /// `score` and `score_breakdown` are overwritten; nothing else on the
    /// entries changes.
    pub fn score(&self, mut entries: Vec<Entry>, context: &RaceContext) -> Vec<Entry> {
        if entries.is_empty() {
            return entries;
        }

        let cfg = &self.config;
        debug!(
            "Scoring {} entries (place={:?}, class={}, exhibition={}, weather={})",
            entries.len(),
            context.place,
            RaceClass::normalize(context.race_type.as_deref()).label(),
            cfg.include_exhibition,
            cfg.include_weather
        );

        let factors = self.factors(&entries);
        let exhibits = cfg
            .include_exhibition
            .then(|| self.exhibit_factors(&entries));

        let place = context.place.as_deref();
        let row = if cfg.include_weather {
            dynamic_venue_row(cfg.venue_bias, place, &context.weather)
        } else {
            venue_row(cfg.venue_bias, place)
        };
        let distance = distance_bias(context.distance.as_deref());
        let w = &cfg.weights;

        for (i, entry) in entries.iter_mut().enumerate() {
            let f = &factors[i];

            let lane_c = w.lane * f.lane * 100.0;
            let st_c = w.st * f.st * 100.0;
            let win_c = w.win * f.win * 100.0;
            let natloc_c = w.two_natloc * f.two_natloc * 100.0;
            let mecha_c = w.two_mecha * f.two_mecha * 100.0;
            let three_c = w.three_mix * f.three_mix * 100.0;
            let base = lane_c + st_c + win_c + natloc_c + mecha_c + three_c;

            let exhibit = exhibits
                .as_ref()
                .map(|ex| ex[i].score(&cfg.exhibit_weights));
            let base_total = base + exhibit.unwrap_or(0.0);

            let bias = ContextBias {
                venue: lane_bias(&row, entry.lane) * cfg.venue_scale,
                class: class_bias(
                    &cfg.class_bias,
                    context.race_type.as_deref(),
                    entry.klass.as_deref(),
                ),
                distance,
            };
            let context_mult = bias.multiplier(cfg.context_clamp);

            let (weather_mult, calm_mult) = if cfg.include_weather {
                (
                    Some(weather_multiplier(&context.weather, exhibit_course(entry))),
                    Some(calm_multiplier(&context.weather, entry.lane)),
                )
            } else {
                (None, None)
            };

            let score = round_to(
                base_total * context_mult * weather_mult.unwrap_or(1.0) * calm_mult.unwrap_or(1.0),
                1,
            );

            entry.score = Some(score);
            entry.score_breakdown = Some(ScoreBreakdown {
                lane: round_to(lane_c, 1),
                st: round_to(st_c, 1),
                win: round_to(win_c, 1),
                two_natloc: round_to(natloc_c, 1),
                two_mecha: round_to(mecha_c, 1),
                three_mix: round_to(three_c, 1),
                exhibit: exhibit.map(|x| round_to(x, 1)),
                base: round_to(base_total, 1),
                venue_bias: round_to(bias.venue, 4),
                class_bias: round_to(bias.class, 4),
                distance_bias: round_to(bias.distance, 4),
                context_mult: round_to(context_mult, 4),
                weather_mult: weather_mult.map(|m| round_to(m, 4)),
                calm_mult: calm_mult.map(|m| round_to(m, 4)),
            });
        }

        entries.sort_by_key(|e| e.lane);
        entries
    }
}
