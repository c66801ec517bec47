use actix_web::{middleware, web, App, HttpServer};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

mod handlers;

use handlers::{health, predict};

/// Application state shared across handlers
pub struct AppState {
    /// Where `/predict` responses are saved; `None` disables saving
    pub output_dir: Option<PathBuf>,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set subscriber");

    let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "8080".to_string());
    let addr = format!("{}:{}", host, port);

    let output_dir = std::env::var("OUTPUT_DIR")
        .ok()
        .filter(|d| !d.trim().is_empty())
        .map(PathBuf::from);

    match &output_dir {
        Some(dir) => info!("Saving race details to {:?}", dir),
        None => info!("OUTPUT_DIR not set, race details will not be saved"),
    }

    let app_state = Arc::new(AppState { output_dir });

    info!("Starting Kaime API server at http://{}", addr);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(predict::json_config())
            .wrap(middleware::Logger::default())
            .route("/health", web::get().to(health::health_check))
            .route("/formats", web::get().to(health::list_formats))
            .route("/score", web::post().to(predict::score_race))
            .route("/predict", web::post().to(predict::predict_race))
    })
    .bind(&addr)?
    .run()
    .await
}
