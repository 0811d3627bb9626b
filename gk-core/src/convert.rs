//! Conversion des points levés vers une zone Gauss-Krüger

use tracing::{debug, warn};

use crate::parser::number::parse_number;
use crate::projection::{Geographic, TransverseMercator};
use crate::types::{Conversion, ConvertedRecord, SurveyRecord};
use crate::zones::zone_by_epsg;
use crate::GkError;

/// Convertit tous les points vers la zone `epsg`
///
/// La sortie a la même longueur et le même ordre que l'entrée. Un point sans
/// coordonnées exploitables garde ses autres champs, avec Rechtswert et
/// Hochwert vides, et incrémente `Conversion::unconvertible`.
///
/// # Errors
///
/// `GkError::InvalidZone` si `epsg` n'est pas une des cinq zones du registre.
pub fn convert(records: &[SurveyRecord], epsg: u32) -> Result<Conversion, GkError> {
    let zone = zone_by_epsg(epsg).ok_or_else(|| GkError::InvalidZone(epsg.to_string()))?;
    let projection = TransverseMercator::new(zone);

    let mut conversion = Conversion {
        records: Vec::with_capacity(records.len()),
        unconvertible: 0,
    };

    for record in records {
        let position = valid_position(record).and_then(|(lat, lon)| {
            let (easting, northing) = projection.forward(Geographic::from_degrees(lon, lat));
            (easting.is_finite() && northing.is_finite()).then_some((easting, northing))
        });

        let (easting, northing) = match position {
            Some((easting, northing)) => (format_fixed3(easting), format_fixed3(northing)),
            None => {
                warn!(
                    point = %record.point_id,
                    latitude = %record.latitude,
                    longitude = %record.longitude,
                    "Point without valid GPS coordinates"
                );
                conversion.unconvertible += 1;
                (String::new(), String::new())
            }
        };

        conversion.records.push(ConvertedRecord {
            point_number: record.point_id.clone(),
            easting,
            northing,
            height: parse_number(&record.height)
                .map(format_fixed3)
                .unwrap_or_default(),
            point_type: record.point_type.trim().to_string(),
            remarks: single_line(&record.remarks),
        });
    }

    debug!(
        epsg,
        points = conversion.records.len(),
        unconvertible = conversion.unconvertible,
        "Conversion done"
    );

    Ok(conversion)
}

/// Latitude et longitude lisibles et dans le domaine géodésique
fn valid_position(record: &SurveyRecord) -> Option<(f64, f64)> {
    let lat = parse_number(&record.latitude)?;
    let lon = parse_number(&record.longitude)?;

    ((-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon)).then_some((lat, lon))
}

/// Formate avec exactement trois décimales
///
/// Une valeur exactement à mi-chemin entre deux millièmes est arrondie en
/// s'éloignant de zéro ; une valeur négative arrondie à zéro garde son signe
/// (`-0.0004` donne `-0.000`). Seul le zéro signé lui-même donne `0.000`.
pub fn format_fixed3(value: f64) -> String {
    if value == 0.0 {
        return "0.000".to_string();
    }
    if !is_thousandth_tie(value) {
        return format!("{:.3}", value);
    }

    // Égalité exacte : k + 0.5 est représentable, ceil donne k + 1
    let thousandths = (value.abs() * 1000.0).ceil() as u64;
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{}{}.{:03}", sign, thousandths / 1000, thousandths % 1000)
}

/// Vrai si le développement décimal exact de `value` est `x.xxx5` suivi de zéros
///
/// Une égalité demande `|value| >= 0.0005`, dont le développement binaire
/// exact tient en moins de 70 décimales.
fn is_thousandth_tie(value: f64) -> bool {
    let exact = format!("{:.70}", value.abs());
    exact
        .split_once('.')
        .and_then(|(_, fraction)| fraction.get(3..))
        .and_then(|rest| rest.strip_prefix('5'))
        .map_or(false, |rest| rest.bytes().all(|b| b == b'0'))
}

/// Remarque sur une seule ligne : espaces retirés aux bords, chaque
/// retour à la ligne (`\r\n`, `\n` ou `\r`) remplacé par une espace
pub fn single_line(text: &str) -> String {
    text.trim()
        .replace("\r\n", " ")
        .replace(['\n', '\r'], " ")
}
