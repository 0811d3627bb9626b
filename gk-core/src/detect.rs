//! Détection automatique de la zone Gauss-Krüger

use tracing::debug;

use crate::parser::number::parse_number;
use crate::types::SurveyRecord;
use crate::zones::{ZoneDefinition, ZONES};

/// Zone retenue par la détection
#[derive(Debug, Clone, Copy)]
pub struct ZoneDetection {
    pub zone: &'static ZoneDefinition,

    /// Longitude moyenne des points exploitables (degrés)
    pub mean_longitude: f64,

    /// Nombre de longitudes prises en compte
    pub sample_size: usize,
}

impl ZoneDetection {
    pub fn epsg(&self) -> u32 {
        self.zone.epsg
    }
}

/// Choisit la zone dont le méridien central est le plus proche de la
/// longitude moyenne des points
///
/// Les longitudes illisibles sont ignorées. `None` si aucune n'est lisible.
/// En cas d'égalité, la zone de plus petit numéro l'emporte : le registre est
/// parcouru dans l'ordre croissant et seule une distance strictement plus
/// petite remplace le meilleur candidat.
pub fn detect_zone(records: &[SurveyRecord]) -> Option<ZoneDetection> {
    let (sum, count) = records
        .iter()
        .filter_map(|r| parse_number(&r.longitude))
        .fold((0.0, 0usize), |(sum, count), lon| (sum + lon, count + 1));

    if count == 0 {
        debug!(records = records.len(), "No parseable longitude, zone detection impossible");
        return None;
    }
    let mean_longitude = sum / count as f64;

    let mut best: Option<(&'static ZoneDefinition, f64)> = None;
    for zone in ZONES.iter() {
        let distance = (mean_longitude - zone.central_meridian).abs();
        if best.map_or(true, |(_, best_distance)| distance < best_distance) {
            best = Some((zone, distance));
        }
    }

    let (zone, _) = best?;
    debug!(
        epsg = zone.epsg,
        zone = zone.zone,
        mean_longitude,
        sample_size = count,
        "Zone detected"
    );

    Some(ZoneDetection {
        zone,
        mean_longitude,
        sample_size: count,
    })
}
