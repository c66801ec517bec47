//! Saving assembled race predictions as JSON files

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Persistence errors
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// File-name part for a passthrough value; "unknown" when absent
fn name_part(value: Option<&Value>) -> String {
    let raw = match value {
        Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        _ => return "unknown".to_string(),
    };

    raw.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | ' ' => '_',
            c => c,
        })
        .collect()
}

/// `race_detail_{place}_{YYYYMMDD}_{race}.json`
pub fn race_file_name(place: Option<&str>, race: Option<&Value>, date: NaiveDate) -> String {
    let place = name_part(place.map(|p| Value::String(p.to_string())).as_ref());
    format!(
        "race_detail_{}_{}_{}.json",
        place,
        date.format("%Y%m%d"),
        name_part(race)
    )
}

/// Write `value` as pretty JSON to `dir/name`, replacing any previous file.
///
/// The file is written next to its destination and renamed into place.
pub fn save_json<T: Serialize>(dir: &Path, name: &str, value: &T) -> Result<PathBuf, PersistError> {
    fs::create_dir_all(dir)?;

    let json = serde_json::to_string_pretty(value)?;
    let path = dir.join(name);
    let temp_path = path.with_extension("json.tmp");

    let cleanup_and_err = |e| {
        let _ = fs::remove_file(&temp_path);
        e
    };

    let mut file = fs::File::create(&temp_path)?;
    file.write_all(json.as_bytes()).map_err(cleanup_and_err)?;
    file.sync_all().map_err(cleanup_and_err)?;
    fs::rename(&temp_path, &path).map_err(cleanup_and_err)?;

    info!("Saved race detail: {}", path.display());
    Ok(path)
}
