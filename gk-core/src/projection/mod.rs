//! Projection Gauss-Krüger en Rust pur (sans dépendances externes)
//!
//! Source : coordonnées géographiques ETRS89/WGS84 (degrés).
//! Cibles : les cinq zones Gauss-Krüger de 3° (EPSG:5681 à 5685), même
//! ellipsoïde GRS80 que la source, donc aucun changement de datum.

mod ellipsoid;
mod tmerc;

pub use ellipsoid::Ellipsoid;
pub use tmerc::TransverseMercator;

use crate::zones::ZoneDefinition;

/// Point en coordonnées géographiques (radians)
#[derive(Debug, Clone, Copy)]
pub struct Geographic {
    /// Longitude en radians
    pub lon: f64,
    /// Latitude en radians
    pub lat: f64,
}

impl Geographic {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Convertit en degrés
    pub fn to_degrees(self) -> (f64, f64) {
        (self.lon.to_degrees(), self.lat.to_degrees())
    }

    /// Crée depuis des degrés
    pub fn from_degrees(lon_deg: f64, lat_deg: f64) -> Self {
        Self {
            lon: lon_deg.to_radians(),
            lat: lat_deg.to_radians(),
        }
    }
}

/// Projette un couple (latitude, longitude) en degrés vers (easting, northing)
///
/// Aucun contrôle de domaine ici : le filtrage des coordonnées aberrantes est
/// fait par l'appelant (voir `convert`).
///
/// Pour un point isolé. Les coefficients de la série sont recalculés à chaque
/// appel : pour un lot de points, construire un `TransverseMercator` une fois
/// et appeler `forward`, comme le fait `convert`.
pub fn project(zone: &ZoneDefinition, lat_deg: f64, lon_deg: f64) -> (f64, f64) {
    TransverseMercator::new(zone).forward(Geographic::from_degrees(lon_deg, lat_deg))
}

/// Opération inverse de `project` : (easting, northing) vers (latitude, longitude) en degrés
///
/// Même remarque que `project` : `TransverseMercator::inverse` pour un lot.
pub fn unproject(zone: &ZoneDefinition, easting: f64, northing: f64) -> (f64, f64) {
    let (lon, lat) = TransverseMercator::new(zone)
        .inverse(easting, northing)
        .to_degrees();
    (lat, lon)
}
