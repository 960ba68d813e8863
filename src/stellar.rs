//! Host-star parameters and the solar-default policy for missing catalog fields.

use crate::constants::{DEFAULT_STELLAR_MASS, DEFAULT_STELLAR_RADIUS, DEFAULT_STELLAR_TEFF};
use crate::error::MissingStellarParameter;
use log::warn;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Stellar record as returned by a catalog lookup. Any field may be absent or NaN.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogStellarParameters {
    /// Radius in solar radii
    pub radius: Option<f64>,
    /// Mass in solar masses
    pub mass: Option<f64>,
    /// Effective temperature in Kelvin
    pub teff: Option<f64>,
}

/// Fully resolved stellar parameters used by every computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StellarParameters {
    radius: f64,
    mass: f64,
    teff: f64,
}

/// Resolved parameters plus the record of every default that was substituted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedStar {
    pub params: StellarParameters,
    pub substitutions: Vec<MissingStellarParameter>,
}

fn resolve_field(
    value: Option<f64>,
    field: &'static str,
    default: f64,
    substitutions: &mut Vec<MissingStellarParameter>,
) -> f64 {
    match value {
        Some(v) if !v.is_nan() => v,
        _ => {
            let missing = MissingStellarParameter { field, default };
            warn!("{}", missing);
            substitutions.push(missing);
            default
        }
    }
}

impl StellarParameters {
    pub fn new(radius: f64, mass: f64, teff: f64) -> StellarParameters {
        StellarParameters { radius, mass, teff }
    }

    pub fn solar() -> StellarParameters {
        StellarParameters::new(DEFAULT_STELLAR_RADIUS, DEFAULT_STELLAR_MASS, DEFAULT_STELLAR_TEFF)
    }

    /// Fill missing catalog fields with solar values (R = 1.0, M = 1.0,
    /// Teff = 5770 K), logging and recording each substitution.
    pub fn resolve(catalog: &CatalogStellarParameters) -> ResolvedStar {
        let mut substitutions = Vec::new();
        let subs = &mut substitutions;
        let radius = resolve_field(catalog.radius, "radius", DEFAULT_STELLAR_RADIUS, subs);
        let mass = resolve_field(catalog.mass, "mass", DEFAULT_STELLAR_MASS, subs);
        let teff = resolve_field(catalog.teff, "teff", DEFAULT_STELLAR_TEFF, subs);
        ResolvedStar {
            params: StellarParameters { radius, mass, teff },
            substitutions,
        }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn teff(&self) -> f64 {
        self.teff
    }
}

impl Display for StellarParameters {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "R = {:.3} R_sun | M = {:.3} M_sun | Teff = {:.0} K",
            self.radius, self.mass, self.teff
        )
    }
}
