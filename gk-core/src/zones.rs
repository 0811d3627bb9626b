//! Registre des zones Gauss-Krüger de 3° (EPSG:5681 à 5685)
//!
//! Table statique, triée par code EPSG croissant. L'ordre est significatif :
//! la détection automatique la parcourt dans cet ordre.

use std::fmt;
use std::str::FromStr;

use crate::projection::Ellipsoid;
use crate::GkError;

/// Paramètres d'une zone Gauss-Krüger
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneDefinition {
    /// Code EPSG
    pub epsg: u32,

    /// Numéro de zone (1 à 5)
    pub zone: u8,

    /// Méridien central en degrés
    pub central_meridian: f64,

    /// False easting en mètres (zone * 1 000 000 + 500 000)
    pub false_easting: f64,

    pub false_northing: f64,
    pub scale_factor: f64,
    pub ellipsoid: Ellipsoid,

    /// Nom EPSG de la projection
    pub name: &'static str,
}

const fn gk_zone(
    epsg: u32,
    zone: u8,
    central_meridian: f64,
    false_easting: f64,
    name: &'static str,
) -> ZoneDefinition {
    ZoneDefinition {
        epsg,
        zone,
        central_meridian,
        false_easting,
        false_northing: 0.0,
        scale_factor: 1.0,
        ellipsoid: Ellipsoid::GRS80,
        name,
    }
}

/// Les cinq zones supportées
pub static ZONES: [ZoneDefinition; 5] = [
    gk_zone(5681, 1, 3.0, 1500000.0, "DB_REF / 3-degree Gauss-Kruger zone 1 (E-N)"),
    gk_zone(5682, 2, 6.0, 2500000.0, "DB_REF / 3-degree Gauss-Kruger zone 2 (E-N)"),
    gk_zone(5683, 3, 9.0, 3500000.0, "DB_REF / 3-degree Gauss-Kruger zone 3 (E-N)"),
    gk_zone(5684, 4, 12.0, 4500000.0, "DB_REF / 3-degree Gauss-Kruger zone 4 (E-N)"),
    gk_zone(5685, 5, 15.0, 5500000.0, "DB_REF / 3-degree Gauss-Kruger zone 5 (E-N)"),
];

/// Récupère une zone par son code EPSG
pub fn zone_by_epsg(epsg: u32) -> Option<&'static ZoneDefinition> {
    ZONES.iter().find(|z| z.epsg == epsg)
}

/// Vérifie si le code EPSG est supporté
pub fn is_supported(epsg: u32) -> bool {
    zone_by_epsg(epsg).is_some()
}

/// Zone cible demandée par l'appelant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZoneSelection {
    /// Détection depuis la longitude moyenne des points
    #[default]
    Auto,
    /// Zone explicite (code EPSG déjà validé)
    Epsg(u32),
}

impl FromStr for ZoneSelection {
    type Err = GkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        if value.is_empty() || value.eq_ignore_ascii_case("auto") {
            return Ok(Self::Auto);
        }

        let digits = match value.get(..5) {
            Some(prefix) if prefix.eq_ignore_ascii_case("epsg:") => &value[5..],
            _ => value,
        };

        digits
            .parse::<u32>()
            .ok()
            .filter(|code| is_supported(*code))
            .map(Self::Epsg)
            .ok_or_else(|| GkError::InvalidZone(value.to_string()))
    }
}

impl fmt::Display for ZoneSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Epsg(code) => write!(f, "{}", code),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_parameters() {
        let expected = [
            (5681, 1, 3.0, 1500000.0),
            (5682, 2, 6.0, 2500000.0),
            (5683, 3, 9.0, 3500000.0),
            (5684, 4, 12.0, 4500000.0),
            (5685, 5, 15.0, 5500000.0),
        ];
        for (zone, (epsg, number, cm, fe)) in ZONES.iter().zip(expected) {
            assert_eq!(zone.epsg, epsg);
            assert_eq!(zone.zone, number);
            assert_eq!(zone.central_meridian, cm);
            assert_eq!(zone.false_easting, fe);
            assert_eq!(zone.scale_factor, 1.0);
            assert_eq!(zone.false_northing, 0.0);
            assert_eq!(zone.ellipsoid, Ellipsoid::GRS80);
        }
    }

    #[test]
    fn test_registry_sorted() {
        assert!(ZONES.windows(2).all(|w| w[0].epsg < w[1].epsg));
    }

    #[test]
    fn test_unsupported_epsg() {
        assert!(zone_by_epsg(4326).is_none());
        assert!(zone_by_epsg(31468).is_none());
        assert!(is_supported(5685));
    }

    #[test]
    fn test_selection_from_str() {
        assert_eq!("auto".parse::<ZoneSelection>(), Ok(ZoneSelection::Auto));
        assert_eq!("AUTO".parse::<ZoneSelection>(), Ok(ZoneSelection::Auto));
        assert_eq!("".parse::<ZoneSelection>(), Ok(ZoneSelection::Auto));
        assert_eq!("5682".parse::<ZoneSelection>(), Ok(ZoneSelection::Epsg(5682)));
        assert_eq!(
            "EPSG:5684".parse::<ZoneSelection>(),
            Ok(ZoneSelection::Epsg(5684))
        );
        assert_eq!(
            " epsg:5681 ".parse::<ZoneSelection>(),
            Ok(ZoneSelection::Epsg(5681))
        );
    }

    #[test]
    fn test_selection_rejects_unknown() {
        assert_eq!(
            "5686".parse::<ZoneSelection>(),
            Err(GkError::InvalidZone("5686".into()))
        );
        assert!("31467".parse::<ZoneSelection>().is_err());
        assert!("zone2".parse::<ZoneSelection>().is_err());
    }
}
