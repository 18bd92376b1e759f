use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::dataset::RawRow;
use crate::headshots::PLACEHOLDER_IMAGE;
use crate::rating;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    Goalkeeper,
    Defender,
    Midfielder,
    Forward,
    Unknown,
}

impl Position {
    pub fn from_code(raw: &str) -> Self {
        match raw.trim().to_uppercase().as_str() {
            "GKP" | "GK" => Position::Goalkeeper,
            "DEF" => Position::Defender,
            "MID" => Position::Midfielder,
            "FWD" => Position::Forward,
            _ => Position::Unknown,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Position::Goalkeeper => "GKP",
            Position::Defender => "DEF",
            Position::Midfielder => "MID",
            Position::Forward => "FWD",
            Position::Unknown => "Unknown",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Position::Goalkeeper => "Goalkeeper",
            Position::Defender => "Defender",
            Position::Midfielder => "Midfielder",
            Position::Forward => "Forward",
            Position::Unknown => "Unknown",
        }
    }
}

/// Normalized player record. Built once per load cycle and never mutated;
/// every view derives fresh filtered/sorted copies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub name: String,
    pub team: String,
    pub position: Position,
    /// Tenths of a million throughout the core; divide by 10 for display.
    pub now_cost: u32,
    pub total_points: f64,
    pub goals_scored: f64,
    pub assists: f64,
    pub minutes: f64,
    pub form: f64,
    pub expected_points: f64,
    pub predicted_points: f64,
    pub expected_goals: f64,
    pub clean_sheets: f64,
    pub saves_per_90: f64,
    pub chance_of_playing: f64,
    /// Per-position relative rating in 0..=5 (5 = best expected_points at the position).
    pub value: u8,
    pub image: String,
    /// Columns the schema does not recognize, carried through untouched.
    pub extras: HashMap<String, String>,
}

const KNOWN_COLUMNS: &[&str] = &[
    "name",
    "position",
    "team",
    "now_cost",
    "total_points",
    "goals_scored",
    "assists",
    "minutes",
    "form",
    "expected_points",
    "predicted_points",
    "expected_goals",
    "clean_sheets",
    "saves_per_90",
    "chance_of_playing_this_round",
];

/// Convert raw rows into player records.
///
/// Two passes: the per-position expected_points maxima must be known for the
/// whole set before any row's value rating can be computed.
pub fn normalize(rows: &[RawRow]) -> Vec<PlayerRecord> {
    let best = rating::best_by_position(rows.iter().map(|row| {
        (
            Position::from_code(field(row, "position")),
            parse_number(field(row, "expected_points")).max(0.0),
        )
    }));

    rows.iter()
        .map(|row| {
            let position = Position::from_code(field(row, "position"));
            // Negative projections carry no signal; treat them as 0 like missing ones.
            let expected_points = parse_number(field(row, "expected_points")).max(0.0);
            let value = rating::relative_rating(
                expected_points,
                best.get(&position).copied().unwrap_or(0.0),
            );

            let extras: HashMap<String, String> = row
                .iter()
                .filter(|(key, _)| !KNOWN_COLUMNS.contains(&key.as_str()))
                .map(|(key, val)| (key.clone(), val.clone()))
                .collect();

            PlayerRecord {
                name: field(row, "name").trim().to_string(),
                team: field(row, "team").trim().to_string(),
                position,
                now_cost: parse_number(field(row, "now_cost")).max(0.0).round() as u32,
                total_points: parse_number(field(row, "total_points")),
                goals_scored: parse_number(field(row, "goals_scored")),
                assists: parse_number(field(row, "assists")),
                minutes: parse_number(field(row, "minutes")),
                form: parse_number(field(row, "form")),
                expected_points,
                predicted_points: parse_number(field(row, "predicted_points")),
                expected_goals: parse_number(field(row, "expected_goals")),
                clean_sheets: parse_number(field(row, "clean_sheets")),
                saves_per_90: parse_number(field(row, "saves_per_90")),
                chance_of_playing: parse_number(field(row, "chance_of_playing_this_round")),
                value,
                image: PLACEHOLDER_IMAGE.to_string(),
                extras,
            }
        })
        .collect()
}

fn field<'a>(row: &'a RawRow, key: &str) -> &'a str {
    row.get(key).map(String::as_str).unwrap_or("")
}

/// Missing or unparsable numeric fields default to 0.
pub fn parse_number(raw: &str) -> f64 {
    let s = raw.trim();
    if s.is_empty() || s == "-" {
        return 0.0;
    }
    s.parse::<f64>().unwrap_or(0.0)
}
