//! Types d'erreurs pour le crate gk-core

use thiserror::Error;

/// Erreurs fatales : la conversion est abandonnée, aucune sortie n'est produite.
///
/// Les anomalies non fatales (colonnes optionnelles absentes, points sans
/// coordonnées exploitables) ne passent jamais par ce type : elles sont
/// renvoyées avec le résultat (`ParseHint`, `Conversion::unconvertible`).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GkError {
    /// Colonnes obligatoires absentes de l'en-tête
    #[error("missing required columns: {}. Is this a SurvComp export?", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// Table illisible, aucune ligne récupérée
    #[error("table could not be parsed: {reason}")]
    Malformed { reason: String },

    /// Code EPSG hors du registre des zones
    #[error("invalid EPSG code: {0}. Allowed: auto, 5681-5685")]
    InvalidZone(String),

    /// Séparateur de sortie non supporté
    #[error("invalid separator: {0:?}. Allowed: ; , \\t")]
    InvalidSeparator(String),

    /// Détection automatique impossible
    #[error("no valid GPS coordinates found, automatic zone detection impossible")]
    NoValidCoordinates,
}

impl GkError {
    /// Crée une erreur de table illisible avec sa cause
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::Malformed {
            reason: reason.into(),
        }
    }
}
