//! Score-then-generate flow shared by the API server and the CLI

use chrono::NaiveDateTime;
use tracing::info;

use crate::core::{FeatureScorer, ScoringVariant};
use crate::models::{duplicate_lane, Entry, PredictRequest, PredictResponse, RaceContext};
use crate::tickets::{reference_picks, Sampling, TicketError, TicketGenerator, WagerFormat};

/// Pick the variant and score the race. A lane may appear only once.
pub fn score_race(
    entries: Vec<Entry>,
    context: &RaceContext,
    variant: Option<ScoringVariant>,
    start_time: Option<&str>,
    now: NaiveDateTime,
) -> Result<(ScoringVariant, Vec<Entry>), TicketError> {
    if let Some(lane) = duplicate_lane(&entries) {
        return Err(TicketError::DuplicateLane { lane });
    }

    let variant = ScoringVariant::resolve(variant, start_time, now);
    let scored = FeatureScorer::for_variant(variant).score(entries, context);
    Ok((variant, scored))
}

/// Full prediction for one race and wager format.
///
/// Fails when the (betType, method) pair is not supported or a lane repeats.
pub fn predict(req: PredictRequest, points: usize, now: NaiveDateTime) -> Result<PredictResponse, TicketError> {
    let format = WagerFormat::parse(&req.bet_type, &req.method)?;

    let (variant, entries) = score_race(
        req.entries,
        &req.context,
        req.variant,
        req.time.as_deref(),
        now,
    )?;

    let generator = TicketGenerator::new(Sampling::from_seed(req.seed));
    let tickets = generator.generate(&entries, points, format);

    info!(
        "Predicted {} (mode {}, place={:?}): {} tickets",
        format,
        variant.mode(),
        req.context.place,
        tickets.count
    );

    Ok(PredictResponse {
        bet_type: format.bet_type().label().to_string(),
        method: format.method_label().to_string(),
        points,
        mode: variant.mode().to_string(),
        context: req.context,
        race: req.race,
        date: req.date,
        memo: req.memo,
        reference_picks: reference_picks(&entries),
        entries,
        tickets,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 11, 20)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn request(bet_type: &str, method: &str) -> PredictRequest {
        serde_json::from_value(json!({
            "entries": [
                {"lane": 1, "klass": "A1", "avg_st": "0.13", "national_win": "7.10", "motor_2r": "44.0"},
                {"lane": 2, "klass": "B1", "avg_st": "0.18", "national_win": "4.90", "motor_2r": "31.5"},
                {"lane": 3, "klass": "A2", "avg_st": "0.15", "national_win": "6.05", "motor_2r": "38.2"},
                {"lane": 4, "klass": "B1", "avg_st": "0.17", "national_win": "5.02", "motor_2r": "29.9"},
                {"lane": 5, "klass": "B2", "avg_st": "0.20", "national_win": "3.80", "motor_2r": "27.0"},
                {"lane": 6, "klass": "B1", "avg_st": "0.19", "national_win": "4.40", "motor_2r": "33.3"}
            ],
            "place": "住之江",
            "race": 12,
            "betType": bet_type,
            "method": method
        }))
        .unwrap()
    }

    #[test]
    fn test_predict_trifecta() {
        let response = predict(request("3連単", "通常"), 5, noon()).unwrap();

        assert_eq!(response.bet_type, "3連単");
        assert_eq!(response.mode, "A");
        assert_eq!(response.tickets.count, 5);
        assert_eq!(response.reference_picks.len(), 10);
        assert_eq!(response.tickets.tickets[..], response.reference_picks[..5]);
        assert_eq!(response.race, Some(json!(12)));
        assert!(response.entries.iter().all(|e| e.score.is_some()));
    }

    #[test]
    fn test_predict_near_start_by_time() {
        let mut req = request("2連複", "ボックス");
        req.time = Some("12:10".to_string());

        let response = predict(req, 3, noon()).unwrap();
        assert_eq!(response.mode, "B");
        assert_eq!(response.tickets.count, 3);
    }

    #[test]
    fn test_predict_unsupported_format() {
        let err = predict(request("単勝", "2軸流し"), 5, noon()).unwrap_err();
        assert!(matches!(err, TicketError::UnsupportedFormat { .. }));
    }

    #[test]
    fn test_predict_seed_is_reproducible() {
        let mut a = request("3連単", "1軸流し");
        a.seed = Some(99);
        let b = a.clone();

        let first = predict(a, 5, noon()).unwrap();
        let second = predict(b, 5, noon()).unwrap();
        assert_eq!(first.tickets, second.tickets);
    }

    #[test]
    fn test_predict_rejects_duplicate_lanes() {
        let mut req = request("3連単", "通常");
        req.entries[1].lane = 1;

        let err = predict(req, 6, noon()).unwrap_err();
        assert_eq!(err, TicketError::DuplicateLane { lane: 1 });
        assert_eq!(err.to_string(), "枠番重複: 1号艇");
    }

    #[test]
    fn test_score_race_explicit_variant() {
        let req = request("単勝", "通常");
        let (variant, scored) = score_race(
            req.entries,
            &req.context,
            Some(ScoringVariant::NearStart),
            None,
            noon(),
        )
        .unwrap();
        assert_eq!(variant, ScoringVariant::NearStart);
        assert!(scored[0].score_breakdown.as_ref().unwrap().calm_mult.is_some());
    }
}
