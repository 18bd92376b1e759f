use std::fs;
use std::path::PathBuf;

use premscout::dataset::parse_rows;

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

#[test]
fn parses_predictions_fixture() {
    let rows = parse_rows(&read_fixture("predictions_small.csv")).expect("fixture should parse");
    assert_eq!(rows.len(), 6);
    assert_eq!(rows[0].get("name").map(String::as_str), Some("Erling Haaland"));
    assert_eq!(rows[0].get("position").map(String::as_str), Some("FWD"));
    assert_eq!(rows[0].get("nickname").map(String::as_str), Some("Cyborg"));
}

#[test]
fn short_rows_leave_fields_missing() {
    // The last fixture row stops after `minutes`; the trailing columns should
    // simply be absent rather than failing the parse.
    let rows = parse_rows(&read_fixture("predictions_small.csv")).expect("fixture should parse");
    let short = rows.last().expect("fixture has rows");
    assert_eq!(short.get("name").map(String::as_str), Some("Mystery Man"));
    assert!(short.get("expected_points").is_none());
    assert!(short.get("form").is_none());
}

#[test]
fn empty_input_yields_no_rows() {
    assert!(parse_rows("").expect("empty text should parse").is_empty());
    assert!(
        parse_rows("name,team\n")
            .expect("header-only text should parse")
            .is_empty()
    );
}

#[test]
fn header_whitespace_is_trimmed() {
    let rows = parse_rows(" name , image_url \nA,http://x\n").expect("should parse");
    assert_eq!(rows[0].get("name").map(String::as_str), Some("A"));
    assert_eq!(rows[0].get("image_url").map(String::as_str), Some("http://x"));
}
