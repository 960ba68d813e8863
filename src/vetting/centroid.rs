use crate::error::{Result, VettingError};
use crate::light_curve::LightCurveSample;
use crate::statistical_methods::statistics::{count_finite, mean, std_dev};
use crate::vetting::transit_window::{
    TransitWindowMask, SNR_IN_TRANSIT_DURATIONS, SNR_OUT_OF_TRANSIT_DURATIONS,
};
use log::info;
use serde::Serialize;
use std::fmt::Display;

/// Combined centroid motion at or above this many sigma suggests the dip
/// comes from a neighbouring star.
pub const CENTROID_SIGMA_THRESHOLD: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AxisShift {
    /// Mean in-transit minus mean out-of-transit position, pixels
    pub shift: f64,
    pub sigma: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CentroidShift {
    pub col: AxisShift,
    pub row: AxisShift,
    pub shift_sigma: f64,
}

fn axis_shift(phases: &[f64], positions: &[f64], mask: &TransitWindowMask) -> Result<AxisShift> {
    let w = mask.split(phases, positions).require_both("centroid")?;
    let std_out = std_dev(&w.outside).unwrap_or(f64::NAN);
    if std_out == 0.0 {
        return Err(VettingError::DegenerateNoise { check: "centroid" });
    }
    let n_in = count_finite(&w.inside) as f64;
    Ok(AxisShift {
        shift: mean(&w.inside).unwrap_or(f64::NAN) - mean(&w.outside).unwrap_or(f64::NAN),
        sigma: std_out / n_in.sqrt(),
    })
}

/// Compare the in-transit and out-of-transit centroid on both detector axes.
///
/// Returns `Ok(None)` when the light curve carries no centroid columns.
pub fn centroid_shift_test(
    lc: &LightCurveSample,
    period: f64,
    epoch: f64,
    duration_days: f64,
) -> Result<Option<CentroidShift>> {
    if lc.centroids().is_none() {
        info!("no centroid columns, skipping centroid shift test");
        return Ok(None);
    }
    let folded = lc.fold(period, epoch)?;
    let Some(c) = folded.centroids() else {
        return Ok(None);
    };

    let mask = TransitWindowMask::from_duration(
        duration_days / period,
        SNR_IN_TRANSIT_DURATIONS,
        SNR_OUT_OF_TRANSIT_DURATIONS,
    )?;
    let phases: Vec<f64> = folded.time().iter().map(|t| t / period).collect();

    let col = axis_shift(&phases, &c.col, &mask)?;
    let row = axis_shift(&phases, &c.row, &mask)?;
    let shift_sigma = (col.shift / col.sigma).hypot(row.shift / row.sigma);

    Ok(Some(CentroidShift {
        col,
        row,
        shift_sigma,
    }))
}

impl CentroidShift {
    pub fn is_on_target(&self) -> bool {
        self.shift_sigma < CENTROID_SIGMA_THRESHOLD
    }
}

impl Display for CentroidShift {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let verdict = if self.is_on_target() {
            "on target"
        } else {
            "centroid moves during transit, possible background source"
        };
        write!(
            f,
            "column shift = {:.5} px, row shift = {:.5} px, combined = {:.2} sigma ({})",
            self.col.shift, self.row.shift, self.shift_sigma, verdict
        )
    }
}
