use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::roster::{PlayerRecord, Position};

pub const PAGE_SIZE: usize = 20;

/// Price ceiling when no filter is applied, in tenths of a million.
pub const MAX_COST_CEILING: u32 = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Name,
    Team,
    Position,
    ExpectedGoals,
    PredictedPoints,
    GoalsScored,
    TotalPoints,
    NowCost,
    Form,
    Assists,
    CleanSheets,
    SavesPer90,
}

impl SortField {
    pub const ALL: [SortField; 12] = [
        SortField::Name,
        SortField::Team,
        SortField::Position,
        SortField::ExpectedGoals,
        SortField::PredictedPoints,
        SortField::GoalsScored,
        SortField::TotalPoints,
        SortField::NowCost,
        SortField::Form,
        SortField::Assists,
        SortField::CleanSheets,
        SortField::SavesPer90,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SortField::Name => "Name",
            SortField::Team => "Team",
            SortField::Position => "Pos",
            SortField::ExpectedGoals => "xG",
            SortField::PredictedPoints => "Pred. Pts",
            SortField::GoalsScored => "Goals",
            SortField::TotalPoints => "Pts",
            SortField::NowCost => "Price",
            SortField::Form => "Form",
            SortField::Assists => "Ast",
            SortField::CleanSheets => "CS",
            SortField::SavesPer90 => "Sv90",
        }
    }
}

/// Pure query input; the engine never mutates it.
#[derive(Debug, Clone, PartialEq)]
pub struct TableQuery {
    pub name_filter: String,
    pub position_filter: Option<Position>,
    /// Empty string means no team filter.
    pub team_filter: String,
    /// Inclusive ceiling on now_cost, in tenths of a million.
    pub max_cost_tenths: u32,
    pub sort: Option<SortField>,
    pub descending: bool,
    /// 1-indexed. Out-of-range pages yield an empty slice; Previous/Next
    /// clamping is the caller's job.
    pub page: usize,
}

impl Default for TableQuery {
    fn default() -> Self {
        Self {
            name_filter: String::new(),
            position_filter: None,
            team_filter: String::new(),
            max_cost_tenths: MAX_COST_CEILING,
            sort: None,
            descending: true,
            page: 1,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TablePage {
    pub rows: Vec<PlayerRecord>,
    pub total_pages: usize,
    /// Distinct sorted team names across the unfiltered input.
    pub teams: Vec<String>,
}

/// Filter, sort, and paginate in one pass over an immutable record slice.
pub fn query_table(records: &[PlayerRecord], query: &TableQuery) -> TablePage {
    let teams: Vec<String> = records
        .iter()
        .map(|r| r.team.clone())
        .filter(|t| !t.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let name_needle = query.name_filter.to_lowercase();
    let mut filtered: Vec<&PlayerRecord> = records
        .iter()
        .filter(|r| {
            // Nameless records never show; they have nothing to click on.
            !r.name.is_empty() && r.name.to_lowercase().contains(&name_needle)
        })
        .filter(|r| query.position_filter.is_none_or(|p| r.position == p))
        .filter(|r| query.team_filter.is_empty() || r.team == query.team_filter)
        .filter(|r| r.now_cost <= query.max_cost_tenths)
        .collect();

    if let Some(field) = query.sort {
        filtered.sort_by(|a, b| {
            let ord = compare_field(a, b, field);
            let ord = if query.descending { ord.reverse() } else { ord };
            ord.then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        });
    }

    let total_pages = filtered.len().div_ceil(PAGE_SIZE);
    let start = query.page.saturating_sub(1).saturating_mul(PAGE_SIZE);
    let rows: Vec<PlayerRecord> = filtered
        .iter()
        .skip(start)
        .take(PAGE_SIZE)
        .map(|r| (*r).clone())
        .collect();

    TablePage {
        rows,
        total_pages,
        teams,
    }
}

fn compare_field(a: &PlayerRecord, b: &PlayerRecord, field: SortField) -> Ordering {
    match field {
        SortField::Name => cmp_text(&a.name, &b.name),
        SortField::Team => cmp_text(&a.team, &b.team),
        SortField::Position => cmp_text(a.position.code(), b.position.code()),
        // The table shows these two at one decimal, so values that render
        // equal must also compare equal.
        SortField::ExpectedGoals => round1(a.expected_goals).total_cmp(&round1(b.expected_goals)),
        SortField::PredictedPoints => {
            round1(a.predicted_points).total_cmp(&round1(b.predicted_points))
        }
        SortField::GoalsScored => a.goals_scored.total_cmp(&b.goals_scored),
        SortField::TotalPoints => a.total_points.total_cmp(&b.total_points),
        SortField::NowCost => a.now_cost.cmp(&b.now_cost),
        SortField::Form => a.form.total_cmp(&b.form),
        SortField::Assists => a.assists.total_cmp(&b.assists),
        SortField::CleanSheets => a.clean_sheets.total_cmp(&b.clean_sheets),
        SortField::SavesPer90 => a.saves_per_90.total_cmp(&b.saves_per_90),
    }
}

fn cmp_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}
