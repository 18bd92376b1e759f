use crate::roster::{PlayerRecord, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormationSlot {
    pub position: Position,
    pub count: usize,
}

/// The fixed Team of the Week shape: one keeper, three defenders, four
/// midfielders, three forwards.
pub const FORMATION_1_3_4_3: [FormationSlot; 4] = [
    FormationSlot {
        position: Position::Goalkeeper,
        count: 1,
    },
    FormationSlot {
        position: Position::Defender,
        count: 3,
    },
    FormationSlot {
        position: Position::Midfielder,
        count: 4,
    },
    FormationSlot {
        position: Position::Forward,
        count: 3,
    },
];

/// Top-N per formation slot by predicted points, one output row per slot in
/// slot order. Positions with fewer players than requested return what exists.
pub fn select_lineup(
    records: &[PlayerRecord],
    formation: &[FormationSlot],
) -> Vec<Vec<PlayerRecord>> {
    formation
        .iter()
        .map(|slot| {
            let mut pool: Vec<PlayerRecord> = records
                .iter()
                .filter(|r| r.position == slot.position)
                .cloned()
                .collect();
            // Stable sort; equal projections keep a deterministic name order.
            pool.sort_by(|a, b| {
                b.predicted_points
                    .total_cmp(&a.predicted_points)
                    .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
            });
            pool.truncate(slot.count);
            pool
        })
        .collect()
}

/// Board display rounds projections to one decimal.
pub fn display_points(predicted_points: f64) -> f64 {
    (predicted_points * 10.0).round() / 10.0
}
