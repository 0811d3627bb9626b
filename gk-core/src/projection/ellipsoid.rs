//! Définitions des ellipsoïdes

/// Ellipsoïde de référence (demi-grand axe, aplatissement)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipsoid {
    /// Demi-grand axe (rayon équatorial) en mètres
    pub a: f64,

    /// Aplatissement
    pub f: f64,
}

impl Ellipsoid {
    /// Ellipsoïde GRS80 (ETRS89)
    /// Note: Quasi identique à WGS84, différence < 0.1mm
    pub const GRS80: Ellipsoid = Ellipsoid {
        a: 6378137.0,
        f: 1.0 / 298.257222101,
    };

    /// Demi-petit axe (rayon polaire) en mètres
    pub fn b(&self) -> f64 {
        self.a * (1.0 - self.f)
    }

    /// Première excentricité au carré
    pub fn e2(&self) -> f64 {
        self.f * (2.0 - self.f)
    }

    /// Première excentricité
    pub fn e(&self) -> f64 {
        self.e2().sqrt()
    }

    /// Troisième aplatissement n = (a - b) / (a + b)
    pub fn n(&self) -> f64 {
        self.f / (2.0 - self.f)
    }
}
