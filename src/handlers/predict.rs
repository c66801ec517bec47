use actix_web::{web, HttpResponse};
use std::sync::Arc;
use tracing::warn;

use crate::AppState;
use kaime::error::{validate_entries, validate_points, AppError};
use kaime::models::{PredictRequest, ScoreRequest};
use kaime::persist::{race_file_name, save_json};
use kaime::pipeline;

/// Malformed request bodies become 400 `{error, message}` responses
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| AppError::ValidationError(err.to_string()).into())
}

/// Score entries without generating tickets
pub async fn score_race(req: web::Json<ScoreRequest>) -> Result<HttpResponse, AppError> {
    let req = req.into_inner();
    validate_entries(&req.entries)?;

    let now = chrono::Local::now().naive_local();
    let (_, entries) = pipeline::score_race(
        req.entries,
        &req.context,
        req.variant,
        req.time.as_deref(),
        now,
    )?;

    Ok(HttpResponse::Ok().json(entries))
}

/// Score entries and generate tickets for the requested wager format
pub async fn predict_race(
    state: web::Data<Arc<AppState>>,
    req: web::Json<PredictRequest>,
) -> Result<HttpResponse, AppError> {
    let req = req.into_inner();

    // Validate request
    validate_entries(&req.entries)?;
    let points = validate_points(req.points.as_ref())?;

    let now = chrono::Local::now().naive_local();
    let response = pipeline::predict(req, points, now)?;

    // Saving is best-effort
    if let Some(ref dir) = state.output_dir {
        let name = race_file_name(response.context.place.as_deref(), response.race.as_ref(), now.date());
        if let Err(e) = save_json(dir, &name, &response) {
            warn!("Failed to save race detail {}: {}", name, e);
        }
    }

    Ok(HttpResponse::Ok().json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, App};
    use serde_json::{json, Value};
    use std::path::PathBuf;

    fn state(output_dir: Option<PathBuf>) -> web::Data<Arc<AppState>> {
        web::Data::new(Arc::new(AppState { output_dir }))
    }

    fn race_body(bet_type: &str, method: &str) -> Value {
        json!({
            "entries": [
                {"lane": "1", "name": "峰竜太", "klass": "A1", "avg_st": "0.12", "national_win": "8.10", "local_win": "7.95", "motor_2r": "41.2%"},
                {"lane": "2", "name": "田中太郎", "klass": "B1", "avg_st": "0.17", "national_win": "5.20", "local_win": "4.88", "motor_2r": "33.0%"},
                {"lane": "3", "name": "佐藤次郎", "klass": "A2", "avg_st": "0.15", "national_win": "6.40", "local_win": "6.01", "motor_2r": "36.4%"},
                {"lane": "4", "name": "鈴木三郎", "klass": "B1", "avg_st": "0.16", "national_win": "5.55", "local_win": "-", "motor_2r": "29.8%"},
                {"lane": "5", "name": "高橋四郎", "klass": "B2", "avg_st": "0.19", "national_win": "3.90", "local_win": "", "motor_2r": "27.1%"},
                {"lane": "6", "name": "伊藤五郎", "klass": "B1", "avg_st": "0.18", "national_win": "4.75", "local_win": "4.60", "motor_2r": "31.0%"}
            ],
            "place": "住之江",
            "distance": "1800m",
            "type": "予選",
            "race": 12,
            "memo": "note",
            "betType": bet_type,
            "method": method,
            "points": 5
        })
    }

    macro_rules! app {
        ($state:expr) => {
            test::init_service(
                App::new()
                    .app_data($state)
                    .app_data(json_config())
                    .route("/score", web::post().to(score_race))
                    .route("/predict", web::post().to(predict_race)),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_predict_race() {
        let app = app!(state(None));
        let req = test::TestRequest::post()
            .uri("/predict")
            .set_json(race_body("3連単", "1軸流し"))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["betType"], "3連単");
        assert_eq!(body["method"], "1軸流し");
        assert_eq!(body["mode"], "A");
        assert_eq!(body["place"], "住之江");
        assert_eq!(body["race"], 12);
        assert_eq!(body["memo"], "note");
        assert_eq!(body["tickets"]["count"], 5);
        assert_eq!(body["reference_picks"].as_array().unwrap().len(), 10);

        let entries = body["entries"].as_array().unwrap();
        assert_eq!(entries.len(), 6);
        assert_eq!(entries[0]["name"], "峰竜太");
        assert!(entries[0]["score"].is_number());
        assert!(entries[0]["score_breakdown"]["base"].is_number());
    }

    #[actix_web::test]
    async fn test_predict_default_points() {
        let app = app!(state(None));
        let mut body = race_body("2連単", "通常");
        body.as_object_mut().unwrap().remove("points");

        let req = test::TestRequest::post().uri("/predict").set_json(body).to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["points"], 5);
        assert_eq!(body["tickets"]["count"], 5);
    }

    #[actix_web::test]
    async fn test_predict_unsupported_format() {
        let app = app!(state(None));
        let req = test::TestRequest::post()
            .uri("/predict")
            .set_json(race_body("単勝", "ボックス"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "validation_error");
        assert!(body["message"].as_str().unwrap().contains("未対応方式"));
    }

    #[actix_web::test]
    async fn test_predict_rejects_bad_points() {
        let app = app!(state(None));
        let mut body = race_body("3連単", "通常");
        body["points"] = json!(0);

        let req = test::TestRequest::post().uri("/predict").set_json(body).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_predict_malformed_json() {
        let app = app!(state(None));
        let req = test::TestRequest::post()
            .uri("/predict")
            .insert_header(("content-type", "application/json"))
            .set_payload("{\"entries\": [")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "validation_error");
    }

    #[actix_web::test]
    async fn test_predict_insufficient_entries_is_not_an_error() {
        let app = app!(state(None));
        let mut body = race_body("3連単", "通常");
        body["entries"].as_array_mut().unwrap().truncate(2);

        let req = test::TestRequest::post().uri("/predict").set_json(body).to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["tickets"]["count"], 0);
        assert_eq!(body["tickets"]["note"], "error: entries不足");
    }

    #[actix_web::test]
    async fn test_predict_saves_race_detail() {
        let dir = tempfile::tempdir().unwrap();
        let app = app!(state(Some(dir.path().to_path_buf())));

        let req = test::TestRequest::post()
            .uri("/predict")
            .set_json(race_body("3連複", "通常"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let names: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names.len(), 1);
        assert!(names[0].starts_with("race_detail_住之江_"));
        assert!(names[0].ends_with("_12.json"));
    }

    #[actix_web::test]
    async fn test_score_race() {
        let app = app!(state(None));
        let mut body = race_body("3連単", "通常");
        body["variant"] = json!("near_start");
        body["entries"].as_array_mut().unwrap().reverse();

        let req = test::TestRequest::post().uri("/score").set_json(body).to_request();
        let entries: Vec<Value> = test::call_and_read_body_json(&app, req).await;

        assert_eq!(entries.len(), 6);
        assert_eq!(entries[0]["lane"], 1);
        assert_eq!(entries[5]["lane"], 6);
        assert!(entries[0]["score_breakdown"]["calm_mult"].is_number());
    }

    #[actix_web::test]
    async fn test_score_race_duplicate_lanes() {
        let app = app!(state(None));
        let body = json!({"entries": [{"lane": 1}, {"lane": 1}]});

        let req = test::TestRequest::post().uri("/score").set_json(body).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
