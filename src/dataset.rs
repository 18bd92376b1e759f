use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// One parsed CSV data line: column name -> raw string value.
/// Transient; discarded once records are normalized.
pub type RawRow = HashMap<String, String>;

pub const DEFAULT_PREDICTIONS_CSV: &str = "data/gameweek_23_predictions.csv";
pub const DEFAULT_HEADSHOTS_CSV: &str = "data/playerImages.csv";

pub fn predictions_path() -> PathBuf {
    path_env_or_default("PREDICTIONS_CSV", DEFAULT_PREDICTIONS_CSV)
}

pub fn headshots_path() -> PathBuf {
    path_env_or_default("HEADSHOTS_CSV", DEFAULT_HEADSHOTS_CSV)
}

pub fn gameweek_label() -> String {
    env::var("GAMEWEEK_LABEL").unwrap_or_else(|_| "Gameweek 23".to_string())
}

fn path_env_or_default(key: &str, default: &str) -> PathBuf {
    env::var(key)
        .ok()
        .filter(|raw| !raw.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(default))
}

/// Parse header-row CSV text into raw rows.
///
/// Rows shorter or longer than the header simply produce rows with missing or
/// dropped trailing fields; downstream normalization defaults cover the gaps.
/// Unreadable records are skipped rather than failing the whole load.
pub fn parse_rows(text: &str) -> Result<Vec<RawRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .context("read csv header row")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let Ok(record) = record else { continue };
        let mut row = RawRow::with_capacity(headers.len());
        for (header, value) in headers.iter().zip(record.iter()) {
            if header.is_empty() {
                continue;
            }
            row.insert(header.clone(), value.to_string());
        }
        if !row.is_empty() {
            rows.push(row);
        }
    }
    Ok(rows)
}

pub fn load_rows(path: &std::path::Path) -> Result<Vec<RawRow>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("read dataset {}", path.display()))?;
    parse_rows(&text)
}
