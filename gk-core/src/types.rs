//! Types de données pour le crate gk-core

use std::fmt;

use serde::{Deserialize, Serialize};

/// Un point de l'export SurvComp, valeurs brutes telles que lues
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SurveyRecord {
    /// Identifiant du point (jamais vide après parsing)
    pub point_id: String,

    /// Latitude WGS84 en degrés (texte brut)
    pub latitude: String,

    /// Longitude WGS84 en degrés (texte brut)
    pub longitude: String,

    /// Hauteur (texte brut, vide si colonne absente)
    pub height: String,

    /// Type de point
    pub point_type: String,

    /// Remarques libres, peuvent contenir des retours à la ligne
    pub remarks: String,
}

/// Un point converti, champs déjà formatés pour l'écriture
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvertedRecord {
    pub point_number: String,

    /// Rechtswert, vide si le point n'a pas pu être converti
    pub easting: String,

    /// Hochwert, vide si le point n'a pas pu être converti
    pub northing: String,

    pub height: String,
    pub point_type: String,

    /// Remarque sur une seule ligne
    pub remarks: String,
}

impl ConvertedRecord {
    /// Le point porte-t-il une position projetée ?
    pub fn has_position(&self) -> bool {
        !self.easting.is_empty() && !self.northing.is_empty()
    }
}

/// Noms des colonnes attendues dans la table d'entrée
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ColumnNames {
    pub point_id: String,
    pub latitude: String,
    pub longitude: String,
    pub height: String,
    pub point_type: String,
    pub remarks: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            point_id: "punkt_id".into(),
            latitude: "gps_latitude".into(),
            longitude: "gps_longitude".into(),
            height: "hoehe".into(),
            point_type: "art".into(),
            remarks: "bemerkungen".into(),
        }
    }
}

impl ColumnNames {
    /// Colonnes obligatoires, dans l'ordre de rapport
    pub fn required(&self) -> [&str; 3] {
        [
            self.point_id.as_str(),
            self.latitude.as_str(),
            self.longitude.as_str(),
        ]
    }

    /// Colonnes optionnelles, dans l'ordre de rapport
    pub fn optional(&self) -> [&str; 3] {
        [
            self.height.as_str(),
            self.point_type.as_str(),
            self.remarks.as_str(),
        ]
    }
}

/// Anomalie non fatale relevée pendant le parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseHint {
    /// Colonnes optionnelles absentes, valeurs vides utilisées
    MissingOptionalColumns(Vec<String>),

    /// Un champ entre guillemets n'est jamais refermé
    UnterminatedQuote,
}

impl fmt::Display for ParseHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingOptionalColumns(columns) => write!(
                f,
                "optional columns missing: {}, default values are used",
                columns.join(", ")
            ),
            Self::UnterminatedQuote => write!(f, "quoted field unterminated at end of input"),
        }
    }
}

/// Résultat du parsing de la table d'entrée
#[derive(Debug, Clone, Default)]
pub struct ParsedTable {
    /// Points dans l'ordre du fichier, sans les lignes à identifiant vide
    pub records: Vec<SurveyRecord>,

    /// Anomalies non fatales
    pub hints: Vec<ParseHint>,

    /// Séparateur détecté
    pub delimiter: u8,
}

/// Résultat de la conversion d'une séquence de points
#[derive(Debug, Clone, Default)]
pub struct Conversion {
    /// Même longueur et même ordre que l'entrée
    pub records: Vec<ConvertedRecord>,

    /// Nombre de points sans coordonnées exploitables
    pub unconvertible: usize,
}
