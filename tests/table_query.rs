use std::collections::HashMap;

use premscout::headshots::PLACEHOLDER_IMAGE;
use premscout::roster::{PlayerRecord, Position};
use premscout::table_query::{PAGE_SIZE, SortField, TableQuery, query_table};

fn player(name: &str, team: &str, position: Position) -> PlayerRecord {
    PlayerRecord {
        name: name.to_string(),
        team: team.to_string(),
        position,
        now_cost: 50,
        total_points: 0.0,
        goals_scored: 0.0,
        assists: 0.0,
        minutes: 0.0,
        form: 0.0,
        expected_points: 0.0,
        predicted_points: 0.0,
        expected_goals: 0.0,
        clean_sheets: 0.0,
        saves_per_90: 0.0,
        chance_of_playing: 0.0,
        value: 0,
        image: PLACEHOLDER_IMAGE.to_string(),
        extras: HashMap::new(),
    }
}

#[test]
fn name_filter_is_case_insensitive_substring() {
    let records = vec![
        player("Erling Haaland", "Man City", Position::Forward),
        player("Mohamed Salah", "Liverpool", Position::Midfielder),
        player("", "Ghosts", Position::Defender),
    ];
    let query = TableQuery {
        name_filter: "haal".to_string(),
        ..TableQuery::default()
    };
    let page = query_table(&records, &query);
    assert_eq!(page.rows.len(), 1);
    assert_eq!(page.rows[0].name, "Erling Haaland");
}

#[test]
fn nameless_records_never_match() {
    let records = vec![
        player("", "Ghosts", Position::Defender),
        player("Somebody", "Ghosts", Position::Defender),
    ];
    let page = query_table(&records, &TableQuery::default());
    assert_eq!(page.rows.len(), 1);
    assert_eq!(page.rows[0].name, "Somebody");
}

#[test]
fn position_and_team_filters_combine() {
    let records = vec![
        player("A", "Arsenal", Position::Midfielder),
        player("B", "Arsenal", Position::Forward),
        player("C", "Chelsea", Position::Midfielder),
    ];
    let query = TableQuery {
        position_filter: Some(Position::Midfielder),
        team_filter: "Arsenal".to_string(),
        ..TableQuery::default()
    };
    let page = query_table(&records, &query);
    assert_eq!(page.rows.len(), 1);
    assert_eq!(page.rows[0].name, "A");
}

#[test]
fn price_filter_uses_tenths_consistently() {
    let mut cheap = player("Cheap", "T", Position::Defender);
    cheap.now_cost = 45;
    let mut pricey = player("Pricey", "T", Position::Defender);
    pricey.now_cost = 120;

    // A $5.0M ceiling is 50 tenths; the $4.5M player passes, the $12.0M
    // player does not.
    let query = TableQuery {
        max_cost_tenths: 50,
        ..TableQuery::default()
    };
    let page = query_table(&[cheap, pricey], &query);
    assert_eq!(page.rows.len(), 1);
    assert_eq!(page.rows[0].name, "Cheap");
}

#[test]
fn sort_rounds_display_fields_and_breaks_ties_by_name() {
    let mut a = player("Zed", "T", Position::Forward);
    a.predicted_points = 5.04;
    let mut b = player("Abe", "T", Position::Forward);
    b.predicted_points = 4.96;
    let mut c = player("Mia", "T", Position::Forward);
    c.predicted_points = 6.3;

    // 5.04 and 4.96 both display as 5.0, so they compare equal and fall back
    // to name order.
    let query = TableQuery {
        sort: Some(SortField::PredictedPoints),
        descending: true,
        ..TableQuery::default()
    };
    let page = query_table(&[a, b, c], &query);
    let names: Vec<&str> = page.rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Mia", "Abe", "Zed"]);
}

#[test]
fn ascending_sort_still_ties_by_name_ascending() {
    let mut a = player("Zed", "T", Position::Forward);
    a.expected_goals = 0.52;
    let mut b = player("Abe", "T", Position::Forward);
    b.expected_goals = 0.48;
    let query = TableQuery {
        sort: Some(SortField::ExpectedGoals),
        descending: false,
        ..TableQuery::default()
    };
    let page = query_table(&[a, b], &query);
    let names: Vec<&str> = page.rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Abe", "Zed"]);
}

#[test]
fn text_sort_is_case_insensitive() {
    let records = vec![
        player("alpha", "zeta", Position::Forward),
        player("Bravo", "ALPHA", Position::Forward),
    ];
    let query = TableQuery {
        sort: Some(SortField::Team),
        descending: false,
        ..TableQuery::default()
    };
    let page = query_table(&records, &query);
    assert_eq!(page.rows[0].team, "ALPHA");
}

#[test]
fn query_is_idempotent_and_pure() {
    let records: Vec<PlayerRecord> = (0..55)
        .map(|i| {
            let mut p = player(&format!("P{i:02}"), &format!("T{}", i % 7), Position::Midfielder);
            p.total_points = f64::from(i);
            p
        })
        .collect();
    let before = records.len();
    let query = TableQuery {
        sort: Some(SortField::TotalPoints),
        ..TableQuery::default()
    };
    let first = query_table(&records, &query);
    let second = query_table(&records, &query);
    let first_names: Vec<&str> = first.rows.iter().map(|r| r.name.as_str()).collect();
    let second_names: Vec<&str> = second.rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(first_names, second_names);
    assert_eq!(first.total_pages, second.total_pages);
    assert_eq!(records.len(), before);
}

#[test]
fn pagination_covers_every_record_exactly_once() {
    let records: Vec<PlayerRecord> = (0..45)
        .map(|i| player(&format!("P{i:02}"), "T", Position::Defender))
        .collect();
    let mut query = TableQuery {
        sort: Some(SortField::Name),
        descending: false,
        ..TableQuery::default()
    };

    let total_pages = query_table(&records, &query).total_pages;
    assert_eq!(total_pages, records.len().div_ceil(PAGE_SIZE));

    let mut seen = Vec::new();
    for page_no in 1..=total_pages {
        query.page = page_no;
        let page = query_table(&records, &query);
        assert!(page.rows.len() <= PAGE_SIZE);
        seen.extend(page.rows.into_iter().map(|r| r.name));
    }
    assert_eq!(seen.len(), records.len());
    let mut expected: Vec<String> = records.iter().map(|r| r.name.clone()).collect();
    expected.sort();
    assert_eq!(seen, expected);
}

#[test]
fn out_of_range_page_is_empty() {
    let records = vec![player("A", "T", Position::Forward)];
    let query = TableQuery {
        page: 99,
        ..TableQuery::default()
    };
    let page = query_table(&records, &query);
    assert!(page.rows.is_empty());
    assert_eq!(page.total_pages, 1);
}

#[test]
fn teams_come_from_unfiltered_input_distinct_and_sorted() {
    let records = vec![
        player("A", "Chelsea", Position::Forward),
        player("B", "Arsenal", Position::Forward),
        player("C", "Chelsea", Position::Forward),
    ];
    let query = TableQuery {
        team_filter: "Arsenal".to_string(),
        ..TableQuery::default()
    };
    let page = query_table(&records, &query);
    assert_eq!(page.teams, vec!["Arsenal".to_string(), "Chelsea".to_string()]);
}
