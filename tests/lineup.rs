use std::collections::HashMap;

use premscout::headshots::PLACEHOLDER_IMAGE;
use premscout::lineup::{FORMATION_1_3_4_3, display_points, select_lineup};
use premscout::roster::{PlayerRecord, Position};

fn player(name: &str, position: Position, predicted_points: f64) -> PlayerRecord {
    PlayerRecord {
        name: name.to_string(),
        team: "Test FC".to_string(),
        position,
        now_cost: 50,
        total_points: 0.0,
        goals_scored: 0.0,
        assists: 0.0,
        minutes: 0.0,
        form: 0.0,
        expected_points: 0.0,
        predicted_points,
        expected_goals: 0.0,
        clean_sheets: 0.0,
        saves_per_90: 0.0,
        chance_of_playing: 0.0,
        value: 0,
        image: PLACEHOLDER_IMAGE.to_string(),
        extras: HashMap::new(),
    }
}

fn squad() -> Vec<PlayerRecord> {
    let mut out = Vec::new();
    for i in 0..3 {
        out.push(player(&format!("G{i}"), Position::Goalkeeper, f64::from(i)));
    }
    for i in 0..6 {
        out.push(player(&format!("D{i}"), Position::Defender, f64::from(i)));
    }
    for i in 0..8 {
        out.push(player(&format!("M{i}"), Position::Midfielder, f64::from(i)));
    }
    for i in 0..5 {
        out.push(player(&format!("F{i}"), Position::Forward, f64::from(i)));
    }
    out
}

#[test]
fn rows_respect_formation_counts_and_order() {
    let rows = select_lineup(&squad(), &FORMATION_1_3_4_3);
    let lens: Vec<usize> = rows.iter().map(Vec::len).collect();
    assert_eq!(lens, vec![1, 3, 4, 3]);
    assert!(rows[0].iter().all(|p| p.position == Position::Goalkeeper));
    assert!(rows[1].iter().all(|p| p.position == Position::Defender));
    assert!(rows[2].iter().all(|p| p.position == Position::Midfielder));
    assert!(rows[3].iter().all(|p| p.position == Position::Forward));
}

#[test]
fn each_row_sorted_by_predicted_points_descending() {
    let rows = select_lineup(&squad(), &FORMATION_1_3_4_3);
    for row in rows {
        for pair in row.windows(2) {
            assert!(pair[0].predicted_points >= pair[1].predicted_points);
        }
    }
}

#[test]
fn short_positions_return_what_exists() {
    let records = vec![
        player("OnlyKeeper", Position::Goalkeeper, 4.0),
        player("OnlyForward", Position::Forward, 6.0),
    ];
    let rows = select_lineup(&records, &FORMATION_1_3_4_3);
    let lens: Vec<usize> = rows.iter().map(Vec::len).collect();
    assert_eq!(lens, vec![1, 0, 0, 1]);
}

#[test]
fn empty_input_returns_empty_rows() {
    let rows = select_lineup(&[], &FORMATION_1_3_4_3);
    assert_eq!(rows.len(), 4);
    assert!(rows.iter().all(Vec::is_empty));
}

#[test]
fn tied_projections_order_by_name() {
    let records = vec![
        player("Zed", Position::Forward, 5.0),
        player("Abe", Position::Forward, 5.0),
        player("Mia", Position::Forward, 5.0),
    ];
    let rows = select_lineup(&records, &FORMATION_1_3_4_3);
    let names: Vec<&str> = rows[3].iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Abe", "Mia", "Zed"]);
}

#[test]
fn board_points_round_to_one_decimal() {
    assert_eq!(display_points(9.96), 10.0);
    assert_eq!(display_points(5.04), 5.0);
    assert_eq!(display_points(0.0), 0.0);
}
