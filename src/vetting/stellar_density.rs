//! Stellar density consistency check.
//!
//! Compares the density implied by the catalog mass and radius with the
//! density implied by the transit geometry (Seager & Mallen-Ornelas 2003).
//! This is an order-of-magnitude sanity ratio, not a statistical test.

use crate::constants::{days_to_seconds, G_CGS, SOLAR_MASS_G, SOLAR_RADII_PER_AU, SOLAR_RADIUS_CM};
use crate::stellar::StellarParameters;
use serde::Serialize;
use std::f64::consts::PI;
use std::fmt::Display;

/// Ratios strictly inside (LOW, HIGH) count as consistent.
pub const DENSITY_RATIO_LOW: f64 = 0.5;
pub const DENSITY_RATIO_HIGH: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DensityCheck {
    /// g/cm^3
    pub rho_catalog: f64,
    /// g/cm^3
    pub rho_transit: f64,
    pub a_over_r: f64,
    pub ratio: f64,
}

/// Mean density in g/cm^3 of a star of `mass` (M_sun) and `radius` (R_sun).
pub fn catalog_density(mass: f64, radius: f64) -> f64 {
    let r_cm = radius * SOLAR_RADIUS_CM;
    (mass * SOLAR_MASS_G) / ((4.0 / 3.0) * PI * r_cm.powi(3))
}

/// Density in g/cm^3 implied by a circular orbit with scaled semi-major axis `a_over_r`.
pub fn transit_density(period_days: f64, a_over_r: f64) -> f64 {
    let p_sec = days_to_seconds(period_days);
    (3.0 * PI / (G_CGS * p_sec.powi(2))) * a_over_r.powi(3)
}

/// a/R* from Kepler's third law with the same constants as [`catalog_density`].
pub fn scaled_semi_major_axis(mass: f64, radius: f64, period_days: f64) -> f64 {
    let p_sec = days_to_seconds(period_days);
    let a_cm = (G_CGS * mass * SOLAR_MASS_G * p_sec.powi(2) / (4.0 * PI * PI)).cbrt();
    a_cm / (radius * SOLAR_RADIUS_CM)
}

/// a/R* for a semi-major axis given in AU.
pub fn a_over_r_from_au(a_au: f64, radius: f64) -> f64 {
    a_au * SOLAR_RADII_PER_AU / radius
}

/// Compare catalog and transit densities. When `a_over_r` is `None` it is
/// derived from the star and period with Kepler's law.
pub fn density_check(
    star: &StellarParameters,
    period_days: f64,
    a_over_r: Option<f64>,
) -> DensityCheck {
    let a_over_r = a_over_r
        .unwrap_or_else(|| scaled_semi_major_axis(star.mass(), star.radius(), period_days));
    let rho_catalog = catalog_density(star.mass(), star.radius());
    let rho_transit = transit_density(period_days, a_over_r);
    DensityCheck {
        rho_catalog,
        rho_transit,
        a_over_r,
        ratio: rho_transit / rho_catalog,
    }
}

impl DensityCheck {
    pub fn is_consistent(&self) -> bool {
        self.ratio > DENSITY_RATIO_LOW && self.ratio < DENSITY_RATIO_HIGH
    }
}

impl Display for DensityCheck {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let verdict = if self.is_consistent() {
            "consistent, transiting body likely orbits the target star"
        } else {
            "discrepancy, check a/R* or eccentricity assumptions"
        };
        write!(
            f,
            "catalog = {:.2} g/cm^3, transit = {:.2} g/cm^3 (a/R* = {:.1}), ratio = {:.2} ({})",
            self.rho_catalog, self.rho_transit, self.a_over_r, self.ratio, verdict
        )
    }
}

#[cfg(test)]
pub mod test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn sun_density() {
        assert_relative_eq!(catalog_density(1.0, 1.0), 1.41, epsilon = 0.01);
    }

    #[test]
    fn kepler_consistent_inputs_give_unit_ratio() {
        let star = StellarParameters::new(0.399, 0.380, 3550.0);
        let check = density_check(&star, 0.520667, None);
        assert_relative_eq!(check.ratio, 1.0, max_relative = 1e-12);
        assert!(check.is_consistent());
    }

    #[test]
    fn toi_864_with_approximate_separation() {
        let star = StellarParameters::new(0.399, 0.380, 3550.0);
        let a_over_r = a_over_r_from_au(0.0093, star.radius());
        assert_relative_eq!(a_over_r, 5.012, epsilon = 1e-3);

        let check = density_check(&star, 0.52067, Some(a_over_r));
        assert_relative_eq!(check.rho_catalog, 8.436, epsilon = 1e-2);
        assert_relative_eq!(check.rho_transit, 8.786, epsilon = 1e-2);
        assert!(check.is_consistent());
    }

    #[test]
    fn bounds_are_exclusive() {
        let mut check = density_check(&StellarParameters::solar(), 365.25, None);
        check.ratio = 2.0;
        assert!(!check.is_consistent());
        check.ratio = 0.5;
        assert!(!check.is_consistent());
        check.ratio = 0.51;
        assert!(check.is_consistent());
        assert!(check.to_string().contains("ratio = 0.51"));
    }
}
