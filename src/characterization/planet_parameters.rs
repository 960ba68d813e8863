use crate::constants::{
    DAYS_PER_YEAR, EARTH_RADII_PER_SOLAR_RADIUS, KELVIN_OFFSET, PPM, SOLAR_RADII_PER_AU,
};
use crate::stellar::StellarParameters;
use serde::Serialize;
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SizeClass {
    EarthLike,
    SuperEarth,
    SubNeptune,
    GasGiant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TemperatureClass {
    LavaWorld,
    TooHotForLiquidWater,
    Temperate,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlanetParameters {
    radius_earth: f64,
    semi_major_axis_au: f64,
    semi_major_axis_rs: f64,
    equilibrium_temp_k: f64,
}

impl PlanetParameters {
    /// Derive radius, orbit and zero-albedo equilibrium temperature from the
    /// transit depth and period.
    pub fn derive(star: &StellarParameters, depth_ppm: f64, period_days: f64) -> PlanetParameters {
        let radius_earth = planet_radius_earth(star.radius(), depth_ppm);

        // Kepler's third law with the planet mass neglected
        let period_years = period_days / DAYS_PER_YEAR;
        let semi_major_axis_au = (period_years.powi(2) * star.mass()).cbrt();
        let semi_major_axis_rs = semi_major_axis_au * SOLAR_RADII_PER_AU;

        let equilibrium_temp_k = star.teff() * (star.radius() / (2.0 * semi_major_axis_rs)).sqrt();

        PlanetParameters {
            radius_earth,
            semi_major_axis_au,
            semi_major_axis_rs,
            equilibrium_temp_k,
        }
    }

    pub fn radius_earth(&self) -> f64 {
        self.radius_earth
    }

    pub fn semi_major_axis_au(&self) -> f64 {
        self.semi_major_axis_au
    }

    pub fn semi_major_axis_rs(&self) -> f64 {
        self.semi_major_axis_rs
    }

    pub fn equilibrium_temp_k(&self) -> f64 {
        self.equilibrium_temp_k
    }

    pub fn equilibrium_temp_c(&self) -> f64 {
        self.equilibrium_temp_k - KELVIN_OFFSET
    }

    pub fn size_class(&self) -> SizeClass {
        SizeClass::from_radius(self.radius_earth)
    }

    pub fn temperature_class(&self) -> TemperatureClass {
        TemperatureClass::from_celsius(self.equilibrium_temp_c())
    }
}

pub fn planet_radius_earth(star_radius: f64, depth_ppm: f64) -> f64 {
    star_radius * EARTH_RADII_PER_SOLAR_RADIUS * (depth_ppm / PPM).sqrt()
}

impl SizeClass {
    pub fn from_radius(radius_earth: f64) -> SizeClass {
        if radius_earth < 1.2 {
            SizeClass::EarthLike
        } else if radius_earth < 2.0 {
            SizeClass::SuperEarth
        } else if radius_earth < 4.0 {
            SizeClass::SubNeptune
        } else {
            SizeClass::GasGiant
        }
    }
}

impl TemperatureClass {
    pub fn from_celsius(temp_c: f64) -> TemperatureClass {
        if temp_c > 1000.0 {
            TemperatureClass::LavaWorld
        } else if temp_c > 100.0 {
            TemperatureClass::TooHotForLiquidWater
        } else {
            TemperatureClass::Temperate
        }
    }
}

impl Display for SizeClass {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let label = match self {
            SizeClass::EarthLike => "Earth-like",
            SizeClass::SuperEarth => "Super-Earth",
            SizeClass::SubNeptune => "Sub-Neptune",
            SizeClass::GasGiant => "Gas giant",
        };
        write!(f, "{label}")
    }
}

impl Display for TemperatureClass {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let label = match self {
            TemperatureClass::LavaWorld => "lava world",
            TemperatureClass::TooHotForLiquidWater => "too hot for liquid water",
            TemperatureClass::Temperate => "temperate, liquid water possible",
        };
        write!(f, "{label}")
    }
}

impl Display for PlanetParameters {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "Radius:       {:.2} R_earth ({})", self.radius_earth, self.size_class())?;
        writeln!(
            f,
            "Temperature:  {:.0} °C ({:.0} K) ({})",
            self.equilibrium_temp_c(),
            self.equilibrium_temp_k,
            self.temperature_class()
        )?;
        write!(
            f,
            "Distance (a): {:.4} AU ({:.2} R_sun)",
            self.semi_major_axis_au, self.semi_major_axis_rs
        )
    }
}
