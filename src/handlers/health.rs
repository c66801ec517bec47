use actix_web::{HttpResponse, Responder};

use kaime::models::{FormatInfo, HealthResponse};
use kaime::tickets::WagerFormat;

/// Health check endpoint
pub async fn health_check() -> impl Responder {
    let response = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    HttpResponse::Ok().json(response)
}

/// Supported (betType, method) pairs
pub async fn list_formats() -> impl Responder {
    let formats: Vec<FormatInfo> = WagerFormat::all().iter().map(|f| f.info()).collect();
    HttpResponse::Ok().json(formats)
}
