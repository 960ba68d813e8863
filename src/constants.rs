//! Unit conversions and physical constants shared by every check.
//!
//! All formulas in the crate read their constants from here so the density
//! check and the planet characterization can never drift apart.

/// Gravitational constant in cm^3 g^-1 s^-2.
pub const G_CGS: f64 = 6.674e-8;

/// Solar mass in grams.
pub const SOLAR_MASS_G: f64 = 1.989e33;

/// Solar radius in centimetres.
pub const SOLAR_RADIUS_CM: f64 = 6.957e10;

/// Earth radii per solar radius.
pub const EARTH_RADII_PER_SOLAR_RADIUS: f64 = 109.076;

/// Solar radii per astronomical unit.
pub const SOLAR_RADII_PER_AU: f64 = 215.032;

pub const DAYS_PER_YEAR: f64 = 365.25;
pub const SECONDS_PER_DAY: f64 = 86_400.0;
pub const HOURS_PER_DAY: f64 = 24.0;
pub const MINUTES_PER_DAY: f64 = 1440.0;

pub const KELVIN_OFFSET: f64 = 273.15;

pub const PPM: f64 = 1e6;

/// Solar defaults substituted for missing catalog fields.
pub const DEFAULT_STELLAR_RADIUS: f64 = 1.0;
pub const DEFAULT_STELLAR_MASS: f64 = 1.0;
pub const DEFAULT_STELLAR_TEFF: f64 = 5770.0;

#[inline]
pub fn hours_to_days(hours: f64) -> f64 {
    hours / HOURS_PER_DAY
}

#[inline]
pub fn minutes_to_days(minutes: f64) -> f64 {
    minutes / MINUTES_PER_DAY
}

#[inline]
pub fn days_to_seconds(days: f64) -> f64 {
    days * SECONDS_PER_DAY
}
