use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use std::fmt;

use crate::models::{duplicate_lane, Entry, ErrorResponse, StatValue};
use crate::tickets::TicketError;

/// Point budget when the request does not give one
pub const DEFAULT_POINTS: usize = 5;

/// Application error types
#[derive(Debug)]
pub enum AppError {
    /// Invalid request data
    ValidationError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let (error_code, message) = match self {
            AppError::ValidationError(msg) => ("validation_error", msg.clone()),
        };

        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: error_code.to_string(),
            message,
        })
    }
}

impl From<TicketError> for AppError {
    fn from(err: TicketError) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

/// Validation functions
pub fn validate_points(points: Option<&StatValue>) -> Result<usize, AppError> {
    let Some(value) = points else {
        return Ok(DEFAULT_POINTS);
    };

    match value.parse() {
        Some(p) if p.fract() == 0.0 && p >= 1.0 => Ok(p as usize),
        Some(p) => Err(AppError::ValidationError(format!(
            "points must be a positive integer, got {}",
            p
        ))),
        None => Err(AppError::ValidationError(format!(
            "points must be a positive integer, got {:?}",
            value
        ))),
    }
}

pub fn validate_entries(entries: &[Entry]) -> Result<(), AppError> {
    if entries.is_empty() {
        return Err(AppError::ValidationError(
            "At least one racer entry required".to_string(),
        ));
    }

    if let Some(lane) = duplicate_lane(entries) {
        return Err(AppError::ValidationError(format!(
            "Lane {} appears more than once",
            lane
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_points_default() {
        assert_eq!(validate_points(None).unwrap(), DEFAULT_POINTS);
    }

    #[test]
    fn test_validate_points_valid() {
        assert_eq!(validate_points(Some(&StatValue::from(3.0))).unwrap(), 3);
        assert_eq!(validate_points(Some(&StatValue::from("10"))).unwrap(), 10);
    }

    #[test]
    fn test_validate_points_invalid() {
        assert!(validate_points(Some(&StatValue::from(0.0))).is_err());
        assert!(validate_points(Some(&StatValue::from(-2.0))).is_err());
        assert!(validate_points(Some(&StatValue::from(2.5))).is_err());
        assert!(validate_points(Some(&StatValue::from("abc"))).is_err());
    }

    #[test]
    fn test_validate_entries() {
        let entries: Vec<Entry> = (1..=6).map(Entry::new).collect();
        assert!(validate_entries(&entries).is_ok());
        assert!(validate_entries(&entries[..2]).is_ok());
    }

    #[test]
    fn test_validate_entries_invalid() {
        assert!(validate_entries(&[]).is_err());
        assert!(validate_entries(&[Entry::new(1), Entry::new(1)]).is_err());
    }

    #[test]
    fn test_ticket_error_is_validation_error() {
        let err: AppError = TicketError::UnsupportedFormat {
            bet_type: "単勝".to_string(),
            method: "2軸流し".to_string(),
        }
        .into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert!(err.to_string().contains("未対応方式: 単勝 2軸流し"));
    }

    #[test]
    fn test_error_display() {
        let err = AppError::ValidationError("test error".to_string());
        assert!(err.to_string().contains("Validation error"));
    }

    #[test]
    fn test_duplicate_lane_is_validation_error() {
        let err: AppError = TicketError::DuplicateLane { lane: 3 }.into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert!(err.to_string().contains("枠番重複: 3号艇"));
    }
}
