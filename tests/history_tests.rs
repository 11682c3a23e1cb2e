//! Location-history aggregation over a directory of exports.

use std::fs;

use detour_planner::history::aggregate_exports;
use detour_planner::places::{read_places, write_places};

const JANUARY: &str = r#"{"timelineObjects": [
    {"placeVisit": {"location": {"address": "Jaffa St 43, Jerusalem, Israel", "name": "Zion Square"}}},
    {"activitySegment": {"distance": 1200}},
    {"placeVisit": {"location": {"address": "Hillel St 8, Jerusalem, Israel", "name": "Hillel Cafe"}}},
    {"placeVisit": {"location": {"address": "Dizengoff St 50, Tel Aviv-Yafo, Israel"}}},
    {"placeVisit": {"location": {"address": "Dizengoff St 50, Tel Aviv-Yafo, Israel"}}}
]}"#;

const FEBRUARY: &str = r#"{"timelineObjects": [
    {"placeVisit": {"location": {"address": "Hillel St 8, Jerusalem, Israel"}}},
    {"placeVisit": {"location": {"address": "Hillel St 8, Jerusalem, Israel"}}},
    {"placeVisit": {"location": {"address": "Jaffa St 43, Jerusalem, Israel"}}},
    {"placeVisit": {"location": {"address": "Agron St 2, Jerusalem, Israel"}}}
]}"#;

#[test]
fn test_aggregates_directory_to_csv() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("2024_JANUARY.json"), JANUARY).unwrap();
    fs::write(dir.path().join("2024_FEBRUARY.json"), FEBRUARY).unwrap();
    fs::write(dir.path().join("notes.txt"), "not an export").unwrap();
    fs::write(dir.path().join("broken.json"), "{").unwrap();

    let places = aggregate_exports(dir.path(), Some(r".+Jerusalem, Israel$")).unwrap();

    let ranked: Vec<_> = places
        .iter()
        .map(|p| (p.address.as_str(), p.visits))
        .collect();
    assert_eq!(
        ranked,
        vec![
            ("Hillel St 8, Jerusalem, Israel", Some(3)),
            ("Jaffa St 43, Jerusalem, Israel", Some(2)),
        ]
    );
    assert_eq!(places.as_slice()[0].name.as_deref(), Some("Hillel Cafe"));

    let csv = dir.path().join("places.csv");
    write_places(&csv, &places).unwrap();
    assert_eq!(read_places(&csv).unwrap(), places);
}

#[test]
fn test_no_pattern_keeps_every_city() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.json"), JANUARY).unwrap();

    let places = aggregate_exports(dir.path(), None).unwrap();

    assert_eq!(places.len(), 1);
    assert_eq!(places.as_slice()[0].address, "Dizengoff St 50, Tel Aviv-Yafo, Israel");
}

#[test]
fn test_missing_directory_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope");

    assert!(aggregate_exports(&missing, None).is_err());
}
