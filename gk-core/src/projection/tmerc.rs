//! Projection Transverse Mercator ellipsoïdale (séries de Krüger à l'ordre 6)
//!
//! Formulation en troisième aplatissement n (Karney 2011), précise au
//! nanomètre dans une bande de quelques degrés autour du méridien central,
//! ce qui couvre largement les zones Gauss-Krüger de 3°.

use super::Geographic;
use crate::zones::ZoneDefinition;

/// Projection Transverse Mercator paramétrée pour une zone
#[derive(Debug, Clone)]
pub struct TransverseMercator {
    /// Méridien central en radians
    lon0: f64,
    false_easting: f64,
    false_northing: f64,
    /// k0 * A (rayon rectifiant mis à l'échelle)
    scaled_radius: f64,
    e: f64,
    e2: f64,
    /// Coefficients α (géographique → projeté)
    alpha: [f64; 6],
    /// Coefficients β (projeté → géographique)
    beta: [f64; 6],
}

impl TransverseMercator {
    /// Prépare les coefficients de la zone
    pub fn new(zone: &ZoneDefinition) -> Self {
        let ell = zone.ellipsoid;
        let n = ell.n();
        let n2 = n * n;
        let n3 = n2 * n;
        let n4 = n3 * n;
        let n5 = n4 * n;
        let n6 = n5 * n;

        // Rayon rectifiant
        let a_rect = ell.a / (1.0 + n) * (1.0 + n2 / 4.0 + n4 / 64.0 + n6 / 256.0);

        let alpha = [
            n / 2.0 - 2.0 / 3.0 * n2 + 5.0 / 16.0 * n3 + 41.0 / 180.0 * n4 - 127.0 / 288.0 * n5
                + 7891.0 / 37800.0 * n6,
            13.0 / 48.0 * n2 - 3.0 / 5.0 * n3 + 557.0 / 1440.0 * n4 + 281.0 / 630.0 * n5
                - 1983433.0 / 1935360.0 * n6,
            61.0 / 240.0 * n3 - 103.0 / 140.0 * n4 + 15061.0 / 26880.0 * n5
                + 167603.0 / 181440.0 * n6,
            49561.0 / 161280.0 * n4 - 179.0 / 168.0 * n5 + 6601661.0 / 7257600.0 * n6,
            34729.0 / 80640.0 * n5 - 3418889.0 / 1995840.0 * n6,
            212378941.0 / 319334400.0 * n6,
        ];

        let beta = [
            n / 2.0 - 2.0 / 3.0 * n2 + 37.0 / 96.0 * n3 - 1.0 / 360.0 * n4 - 81.0 / 512.0 * n5
                + 96199.0 / 604800.0 * n6,
            1.0 / 48.0 * n2 + 1.0 / 15.0 * n3 - 437.0 / 1440.0 * n4 + 46.0 / 105.0 * n5
                - 1118711.0 / 3870720.0 * n6,
            17.0 / 480.0 * n3 - 37.0 / 840.0 * n4 - 209.0 / 4480.0 * n5 + 5569.0 / 90720.0 * n6,
            4397.0 / 161280.0 * n4 - 11.0 / 504.0 * n5 - 830251.0 / 7257600.0 * n6,
            4583.0 / 161280.0 * n5 - 108847.0 / 3991680.0 * n6,
            20648693.0 / 638668800.0 * n6,
        ];

        Self {
            lon0: zone.central_meridian.to_radians(),
            false_easting: zone.false_easting,
            false_northing: zone.false_northing,
            scaled_radius: zone.scale_factor * a_rect,
            e: ell.e(),
            e2: ell.e2(),
            alpha,
            beta,
        }
    }

    /// Convertit des coordonnées géographiques en (easting, northing)
    pub fn forward(&self, geo: Geographic) -> (f64, f64) {
        let lambda = geo.lon - self.lon0;
        let (sin_l, cos_l) = lambda.sin_cos();

        // Latitude conforme via sa tangente
        let tau_prime = conformal_tangent(geo.lat.tan(), self.e);

        let xi_p = tau_prime.atan2(cos_l);
        let eta_p = (sin_l / tau_prime.hypot(cos_l)).asinh();

        let mut xi = xi_p;
        let mut eta = eta_p;
        for (j, alpha) in self.alpha.iter().enumerate() {
            let k = 2.0 * (j + 1) as f64;
            xi += alpha * (k * xi_p).sin() * (k * eta_p).cosh();
            eta += alpha * (k * xi_p).cos() * (k * eta_p).sinh();
        }

        (
            self.false_easting + self.scaled_radius * eta,
            self.false_northing + self.scaled_radius * xi,
        )
    }

    /// Convertit (easting, northing) en coordonnées géographiques
    pub fn inverse(&self, easting: f64, northing: f64) -> Geographic {
        let xi = (northing - self.false_northing) / self.scaled_radius;
        let eta = (easting - self.false_easting) / self.scaled_radius;

        let mut xi_p = xi;
        let mut eta_p = eta;
        for (j, beta) in self.beta.iter().enumerate() {
            let k = 2.0 * (j + 1) as f64;
            xi_p -= beta * (k * xi).sin() * (k * eta).cosh();
            eta_p -= beta * (k * xi).cos() * (k * eta).sinh();
        }

        let sinh_eta = eta_p.sinh();
        let (sin_xi, cos_xi) = xi_p.sin_cos();
        let tau_prime = sin_xi / sinh_eta.hypot(cos_xi);
        let lambda = sinh_eta.atan2(cos_xi);

        let tau = self.geodetic_tangent(tau_prime);

        Geographic::new(self.lon0 + lambda, tau.atan())
    }

    /// Inverse de `conformal_tangent` par Newton
    fn geodetic_tangent(&self, tau_prime: f64) -> f64 {
        let mut tau = tau_prime;

        for _ in 0..10 {
            let tau_i = conformal_tangent(tau, self.e);
            let tau_hyp = tau.hypot(1.0);
            let delta = (tau_prime - tau_i) / tau_i.hypot(1.0)
                * (1.0 + (1.0 - self.e2) * tau * tau)
                / ((1.0 - self.e2) * tau_hyp);
            tau += delta;

            if delta.abs() < 1e-14 * tau.abs().max(1.0) {
                break;
            }
        }
        tau
    }
}

/// tan(χ) en fonction de tan(φ), χ latitude conforme
fn conformal_tangent(tau: f64, e: f64) -> f64 {
    let tau_hyp = tau.hypot(1.0);
    let sigma = (e * (e * tau / tau_hyp).atanh()).sinh();
    tau * sigma.hypot(1.0) - sigma * tau_hyp
}
