use crate::error::Result;
use crate::light_curve::LightCurveSample;
use crate::vetting::depth_snr::{estimate_depth_snr, DepthSnr};
use crate::vetting::transit_window::SNR_OUT_OF_TRANSIT_DURATIONS;
use serde::Serialize;
use std::fmt::Display;

/// A dip at phase 0.5 this significant (sigma) points to an eclipsing binary.
pub const SECONDARY_SIGMA_THRESHOLD: f64 = 3.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SecondaryEclipse {
    /// Depth and scatter measured around phase 0.5
    pub measurement: DepthSnr,
    /// Depth over its standard error, signed so brightening is negative
    pub significance: f64,
    #[serde(skip)]
    pub folded: LightCurveSample,
}

/// Fold at `epoch + period / 2` and measure a dip with the same windows as the
/// primary transit. Cadences near the primary transit are dropped first so it
/// can't drag down the phase-0.5 baseline.
pub fn secondary_eclipse_check(
    lc: &LightCurveSample,
    period: f64,
    epoch: f64,
    duration_days: f64,
) -> Result<SecondaryEclipse> {
    let primary_cut = SNR_OUT_OF_TRANSIT_DURATIONS * duration_days;
    let half = 0.5 * period;
    let away_from_primary = lc.select(|i| {
        let dt = (lc.time()[i] - epoch + half).rem_euclid(period) - half;
        dt.abs() > primary_cut
    });
    let folded = away_from_primary.fold(period, epoch + half)?;
    let measurement = estimate_depth_snr(&folded, duration_days, period)?;
    Ok(SecondaryEclipse {
        significance: measurement.snr,
        measurement,
        folded,
    })
}

impl SecondaryEclipse {
    pub fn is_detected(&self) -> bool {
        self.significance >= SECONDARY_SIGMA_THRESHOLD
    }
}

impl Display for SecondaryEclipse {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let verdict = if self.is_detected() {
            "secondary eclipse detected, possible eclipsing binary"
        } else {
            "flat at phase 0.5"
        };
        write!(
            f,
            "phase-0.5 depth = {:.2} ppm, significance = {:.2} sigma ({})",
            self.measurement.depth_ppm, self.significance, verdict
        )
    }
}
