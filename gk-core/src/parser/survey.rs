//! Parser de l'export SurvComp (points levés en WGS84)

use tracing::debug;

use super::table::{read_table, RawTable};
use crate::types::{ColumnNames, ParseHint, ParsedTable, SurveyRecord};
use crate::GkError;

/// Parse un export SurvComp avec les noms de colonnes par défaut
pub fn parse_table(text: &str) -> Result<ParsedTable, GkError> {
    parse_table_with(text, &ColumnNames::default())
}

/// Parse une table de points avec des noms de colonnes explicites
///
/// # Errors
///
/// - `GkError::Malformed` si la table est illisible et qu'aucune ligne n'a pu
///   être récupérée
/// - `GkError::MissingColumns` si une colonne obligatoire manque
pub fn parse_table_with(text: &str, columns: &ColumnNames) -> Result<ParsedTable, GkError> {
    let table = read_table(text);

    if table.rows.is_empty() {
        if table.unterminated_quote {
            return Err(GkError::malformed("quoted field unterminated"));
        }
        if let Some(reason) = &table.first_error {
            return Err(GkError::malformed(reason.clone()));
        }
    }

    let missing: Vec<String> = columns
        .required()
        .iter()
        .filter(|name| table.column_index(name).is_none())
        .map(|name| name.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(GkError::MissingColumns(missing));
    }

    let mut hints = Vec::new();
    let missing_optional: Vec<String> = columns
        .optional()
        .iter()
        .filter(|name| table.column_index(name).is_none())
        .map(|name| name.to_string())
        .collect();
    if !missing_optional.is_empty() {
        hints.push(ParseHint::MissingOptionalColumns(missing_optional));
    }
    if table.unterminated_quote {
        hints.push(ParseHint::UnterminatedQuote);
    }

    let records = extract_records(&table, columns);

    debug!(
        rows = table.rows.len(),
        points = records.len(),
        skipped = table.rows.len() - records.len(),
        "Survey table parsed"
    );

    Ok(ParsedTable {
        records,
        hints,
        delimiter: table.delimiter,
    })
}

/// Construit les points, sans les lignes dont l'identifiant est vide
fn extract_records(table: &RawTable, columns: &ColumnNames) -> Vec<SurveyRecord> {
    let point_id = table.column_index(&columns.point_id);
    let latitude = table.column_index(&columns.latitude);
    let longitude = table.column_index(&columns.longitude);
    let height = table.column_index(&columns.height);
    let point_type = table.column_index(&columns.point_type);
    let remarks = table.column_index(&columns.remarks);

    table
        .rows
        .iter()
        .filter(|row| !RawTable::cell(row, point_id).trim().is_empty())
        .map(|row| SurveyRecord {
            point_id: RawTable::cell(row, point_id).to_string(),
            latitude: RawTable::cell(row, latitude).to_string(),
            longitude: RawTable::cell(row, longitude).to_string(),
            height: RawTable::cell(row, height).to_string(),
            point_type: RawTable::cell(row, point_type).to_string(),
            remarks: RawTable::cell(row, remarks).to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = "punkt_id;gps_latitude;gps_longitude;hoehe;art;bemerkungen\n\
                        P1;52.52;13.405;34.5;GP;Grenzstein\n\
                        P2;52.53;13.41;;FP;\n";

    #[test]
    fn test_parse_full_table() {
        let parsed = parse_table(FULL).unwrap();
        assert_eq!(parsed.records.len(), 2);
        assert!(parsed.hints.is_empty());
        assert_eq!(parsed.delimiter, b';');

        let p1 = &parsed.records[0];
        assert_eq!(p1.point_id, "P1");
        assert_eq!(p1.latitude, "52.52");
        assert_eq!(p1.longitude, "13.405");
        assert_eq!(p1.height, "34.5");
        assert_eq!(p1.point_type, "GP");
        assert_eq!(p1.remarks, "Grenzstein");
    }

    #[test]
    fn test_columns_are_matched_by_name() {
        let text = "gps_longitude,punkt_id,gps_latitude\n13.4,P1,52.5\n";
        let parsed = parse_table(text).unwrap();
        assert_eq!(parsed.records[0].point_id, "P1");
        assert_eq!(parsed.records[0].latitude, "52.5");
        assert_eq!(parsed.records[0].longitude, "13.4");
    }

    #[test]
    fn test_missing_required_columns() {
        let text = "punkt_id;lat;lon\nP1;52.5;13.4\n";
        let err = parse_table(text).unwrap_err();
        assert_eq!(
            err,
            GkError::MissingColumns(vec!["gps_latitude".into(), "gps_longitude".into()])
        );
    }

    #[test]
    fn test_empty_input_is_missing_columns() {
        let err = parse_table("").unwrap_err();
        assert!(matches!(err, GkError::MissingColumns(ref cols) if cols.len() == 3));
    }

    #[test]
    fn test_missing_optional_columns_is_hint() {
        let text = "punkt_id;gps_latitude;gps_longitude;art\nP1;52.5;13.4;GP\n";
        let parsed = parse_table(text).unwrap();
        assert_eq!(
            parsed.hints,
            vec![ParseHint::MissingOptionalColumns(vec![
                "hoehe".into(),
                "bemerkungen".into()
            ])]
        );
        assert_eq!(parsed.records[0].height, "");
        assert_eq!(parsed.records[0].remarks, "");
        assert_eq!(parsed.records[0].point_type, "GP");
    }

    #[test]
    fn test_empty_point_ids_are_dropped() {
        let text = "punkt_id;gps_latitude;gps_longitude\n\
                    P1;52.5;13.4\n\
                    ;52.6;13.5\n\
                    \u{20}\u{20};52.7;13.6\n\
                    P4;52.8;13.7\n";
        let parsed = parse_table(text).unwrap();
        let ids: Vec<_> = parsed.records.iter().map(|r| r.point_id.as_str()).collect();
        assert_eq!(ids, vec!["P1", "P4"]);
        assert!(parsed.hints.iter().all(|h| !matches!(h, ParseHint::UnterminatedQuote)));
    }

    #[test]
    fn test_unterminated_quote_without_rows_is_fatal() {
        let text = "punkt_id;gps_latitude;gps_longitude\n\"P1;52.5;13.4\n";
        // Le champ ouvert avale la fin du fichier mais reste une ligne : indice seulement
        let parsed = parse_table(text).unwrap();
        assert!(parsed.hints.contains(&ParseHint::UnterminatedQuote));

        let header_only = "\"punkt_id;gps_latitude;gps_longitude\n";
        let err = parse_table(header_only).unwrap_err();
        assert!(matches!(err, GkError::Malformed { .. }), "err={:?}", err);
    }

    #[test]
    fn test_custom_column_names() {
        let columns = ColumnNames {
            point_id: "id".into(),
            latitude: "lat".into(),
            longitude: "lon".into(),
            ..Default::default()
        };
        let parsed = parse_table_with("id,lat,lon\nA,50,9\n", &columns).unwrap();
        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.records[0].longitude, "9");
    }
}
