//! Tests d'intégration sur des exports SurvComp réalistes

use std::path::Path;

use gk_core::parser::table::read_table_with_delimiter;
use gk_core::{
    decode_input, parse_table, run, ColumnNames, GkError, ParseHint, Separator, ZoneSelection,
};

fn fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    let data = std::fs::read(&path).unwrap();
    let (text, lossy) = decode_input(&data);
    assert!(!lossy, "fixture {} is not valid UTF-8", name);
    text.into_owned()
}

#[test]
fn test_hamburg_export_auto_zone() {
    let text = fixture("hamburg_zone3.csv");
    let run = run(
        &text,
        ZoneSelection::Auto,
        Separator::Semicolon,
        &ColumnNames::default(),
    )
    .unwrap();

    assert_eq!(run.zone.epsg, 5683);
    // La ligne sans identifiant est écartée au parsing
    assert_eq!(run.point_count(), 4);
    assert_eq!(run.unconvertible, 1);
    assert!(run.hints.is_empty());

    let lines: Vec<&str> = run.output.split("\r\n").collect();
    // En-tête + 4 points + chaîne vide après le CRLF final
    assert_eq!(lines.len(), 6);
    assert_eq!(
        lines[0],
        "\u{feff}Punktnummer;Rechtswert;Hochwert;Höhe;Art;Bemerkung"
    );
    assert_eq!(
        lines[1],
        "GP1001;3565859.537;5936410.941;6.200;GP;Rathausmarkt"
    );
    assert!(
        lines[2].ends_with(";5.950;GP;\"Ecke Mönckebergstraße; Bordstein\""),
        "line={}",
        lines[2]
    );
    assert_eq!(lines[3], "GP1003;;;;FP;keine Position");
    assert_eq!(lines[5], "");
}

#[test]
fn test_comma_export_with_missing_optional_columns() {
    let text = fixture("berlin_comma.csv");
    let parsed = parse_table(&text).unwrap();
    assert_eq!(parsed.delimiter, b',');
    assert_eq!(
        parsed.hints,
        vec![ParseHint::MissingOptionalColumns(vec![
            "hoehe".into(),
            "bemerkungen".into()
        ])]
    );

    let run = run(
        &text,
        ZoneSelection::Epsg(5684),
        Separator::Tab,
        &ColumnNames::default(),
    )
    .unwrap();
    assert_eq!(run.unconvertible, 0);
    assert!(run
        .output
        .contains("\r\nBE-1\t4595368.103\t5822133.138\t\tHP\t\r\n"));
}

#[test]
fn test_all_fixtures_preserve_point_count() {
    let pattern = format!("{}/tests/fixtures/*.csv", env!("CARGO_MANIFEST_DIR"));

    for entry in glob::glob(&pattern).unwrap().filter_map(Result::ok) {
        let data = std::fs::read(&entry).unwrap();
        let (text, _) = decode_input(&data);
        let parsed = parse_table(&text).unwrap();

        for separator in [Separator::Semicolon, Separator::Comma, Separator::Tab] {
            let run = run(
                &text,
                ZoneSelection::Auto,
                separator,
                &ColumnNames::default(),
            )
            .unwrap();
            assert_eq!(
                run.point_count(),
                parsed.records.len(),
                "{}",
                entry.display()
            );

            // Relire la sortie avec le même séparateur redonne le même nombre de points
            let reread = read_table_with_delimiter(&run.output, separator.as_char() as u8);
            assert_eq!(reread.headers.len(), 6);
            assert_eq!(reread.rows.len(), run.point_count(), "{}", entry.display());
        }
    }
}

#[test]
fn test_remarks_never_span_lines() {
    let text = "punkt_id;gps_latitude;gps_longitude;bemerkungen\n\
                P1;50.0;9.0;\"erste\nzweite\r\ndritte\"\n";
    let run = run(
        text,
        ZoneSelection::Auto,
        Separator::Semicolon,
        &ColumnNames::default(),
    )
    .unwrap();
    assert_eq!(run.records[0].remarks, "erste zweite dritte");
    assert!(!run.records[0].remarks.contains(['\n', '\r']));
    assert_eq!(run.output.matches("\r\n").count(), 2);
}

#[test]
fn test_fatal_errors_produce_no_output() {
    let err = run(
        "id;lat;lon\n1;50;9\n",
        ZoneSelection::Auto,
        Separator::Semicolon,
        &ColumnNames::default(),
    )
    .unwrap_err();
    assert!(matches!(err, GkError::MissingColumns(_)));

    let err = run(
        "punkt_id;gps_latitude;gps_longitude\nP1;;\n",
        ZoneSelection::Auto,
        Separator::Semicolon,
        &ColumnNames::default(),
    )
    .unwrap_err();
    assert_eq!(err, GkError::NoValidCoordinates);
}
