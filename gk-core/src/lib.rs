//! # gk-core
//!
//! Conversion d'exports SurvComp (points levés en WGS84) vers les zones
//! Gauss-Krüger de 3° (EPSG:5681 à 5685), au format CSV gl-Survey.
//!
//! ## Features
//!
//! - Parsing CSV tolérant (séparateur détecté, colonnes nommées, BOM)
//! - Registre statique des cinq zones, détection automatique de la zone
//! - Transverse Mercator ellipsoïdal en Rust pur (séries de Krüger)
//! - Écriture CSV avec BOM, CRLF et échappement minimal
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gk_core::{run, ColumnNames, Separator, ZoneSelection};
//!
//! let run = run(&text, ZoneSelection::Auto, Separator::Semicolon, &ColumnNames::default())?;
//! println!("EPSG: {}", run.zone.epsg);
//! println!("{} points, {} sans coordonnées", run.point_count(), run.unconvertible);
//! std::fs::write("sortie.csv", &run.output)?;
//! ```

pub mod convert;
pub mod detect;
pub mod error;
pub mod parser;
pub mod projection;
pub mod types;
pub mod writer;
pub mod zones;

pub use convert::convert;
pub use detect::{detect_zone, ZoneDetection};
pub use error::GkError;
pub use parser::survey::{parse_table, parse_table_with};
pub use parser::decode_input;
pub use types::{
    ColumnNames, Conversion, ConvertedRecord, ParseHint, ParsedTable, SurveyRecord,
};
pub use writer::{write_table, Separator};
pub use zones::{zone_by_epsg, ZoneDefinition, ZoneSelection, ZONES};

use tracing::{info, warn};

/// Résultat d'une conversion complète
#[derive(Debug, Clone)]
pub struct ConversionRun {
    /// Texte CSV de sortie (avec BOM)
    pub output: String,

    /// Points convertis, dans l'ordre de l'entrée
    pub records: Vec<ConvertedRecord>,

    /// Zone cible
    pub zone: &'static ZoneDefinition,

    /// Détails de la détection, si la zone n'était pas imposée
    pub detection: Option<ZoneDetection>,

    /// Nombre de points sans coordonnées exploitables
    pub unconvertible: usize,

    /// Anomalies non fatales du parsing
    pub hints: Vec<ParseHint>,
}

impl ConversionRun {
    pub fn point_count(&self) -> usize {
        self.records.len()
    }
}

/// Enchaîne parsing, choix de la zone, conversion et écriture
///
/// # Errors
///
/// Toute erreur fatale (`GkError`) interrompt la chaîne : colonnes
/// obligatoires manquantes, table illisible, zone invalide, ou aucune
/// coordonnée exploitable pour la détection automatique.
pub fn run(
    text: &str,
    selection: ZoneSelection,
    separator: Separator,
    columns: &ColumnNames,
) -> Result<ConversionRun, GkError> {
    // 1. Parser la table
    let parsed = parse_table_with(text, columns)?;
    for hint in &parsed.hints {
        warn!("{}", hint);
    }
    info!(points = parsed.records.len(), "Survey points read");

    // 2. Choisir la zone
    let (zone, detection) = match selection {
        ZoneSelection::Epsg(code) => {
            let zone = zone_by_epsg(code).ok_or_else(|| GkError::InvalidZone(code.to_string()))?;
            (zone, None)
        }
        ZoneSelection::Auto => {
            let detection = detect_zone(&parsed.records).ok_or(GkError::NoValidCoordinates)?;
            info!(
                epsg = detection.zone.epsg,
                zone = detection.zone.zone,
                "Zone detected automatically (mean longitude {:.4}°)",
                detection.mean_longitude
            );
            (detection.zone, Some(detection))
        }
    };

    // 3. Convertir
    let conversion = convert(&parsed.records, zone.epsg)?;
    if conversion.unconvertible > 0 {
        warn!(
            count = conversion.unconvertible,
            "Points without valid GPS coordinates"
        );
    }

    // 4. Écrire
    let output = write_table(&conversion.records, separator);

    Ok(ConversionRun {
        output,
        records: conversion.records,
        zone,
        detection,
        unconvertible: conversion.unconvertible,
        hints: parsed.hints,
    })
}
