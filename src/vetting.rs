pub mod centroid;
pub mod depth_snr;
pub mod model_comparison;
pub mod odd_even;
pub mod secondary_eclipse;
pub mod stellar_density;
pub mod transit_window;

use crate::constants::hours_to_days;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// The periodic signal under test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransitSignal {
    pub period_days: f64,
    /// Mid-transit reference time, same time base as the light curve (BTJD for TESS)
    pub epoch: f64,
    pub duration_hours: f64,
    /// Depth reported by the detection stage, if any
    #[serde(default)]
    pub depth_ppm: Option<f64>,
}

impl TransitSignal {
    pub fn duration_days(&self) -> f64 {
        hours_to_days(self.duration_hours)
    }
}

impl Display for TransitSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "P = {:.6} d, T0 = {:.4}, duration = {:.2} h",
            self.period_days, self.epoch, self.duration_hours
        )?;
        if let Some(d) = self.depth_ppm {
            write!(f, ", depth = {d:.1} ppm")?;
        }
        Ok(())
    }
}
