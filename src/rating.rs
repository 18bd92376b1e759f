use std::collections::HashMap;

use crate::roster::{PlayerRecord, Position};

/// Highest metric value seen per position across the whole set.
pub fn best_by_position(
    pairs: impl Iterator<Item = (Position, f64)>,
) -> HashMap<Position, f64> {
    let mut best: HashMap<Position, f64> = HashMap::new();
    for (position, points) in pairs {
        let entry = best.entry(position).or_insert(points);
        if points > *entry {
            *entry = points;
        }
    }
    best
}

/// Relative rating of `points` against the position best, in 0..=5.
///
/// A non-positive best is treated as 1 so a group of all-zero players rates 0
/// instead of dividing by zero. Rounding is half-away-from-zero, which for the
/// non-negative ratios here matches the half-up rounding of the source data
/// pipeline: round(2.5) = 3.
pub fn relative_rating(points: f64, best: f64) -> u8 {
    let best = if best > 0.0 { best } else { 1.0 };
    let scaled = ((points / best) * 5.0).round();
    scaled.clamp(0.0, 5.0) as u8
}

/// Star rating for the detail card: the target relative to the best
/// total_points in its position group, clamped to 1..=5. A position group
/// with no positive best has no rating to compute; that counts as 0 and
/// shows the one-star floor, same as a zero-point player.
pub fn rate_detail(target: &PlayerRecord, records: &[PlayerRecord]) -> u8 {
    let best = records
        .iter()
        .filter(|r| r.position == target.position)
        .map(|r| r.total_points)
        .fold(0.0_f64, f64::max);
    if best <= 0.0 {
        return 1;
    }
    relative_rating(target.total_points, best).max(1)
}

pub fn detail_tooltip(position: Position) -> String {
    format!(
        "Stars compare total points against the best {} in the dataset",
        position.label().to_lowercase()
    )
}

/// "★★★☆☆"-style bar for a 0..=5 rating.
pub fn star_bar(rating: u8) -> String {
    let filled = usize::from(rating.min(5));
    let mut bar = "★".repeat(filled);
    bar.push_str(&"☆".repeat(5 - filled));
    bar
}
