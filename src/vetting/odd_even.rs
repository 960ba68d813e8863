//! Odd/even transit depth comparison.
//!
//! An eclipsing binary with twice the assumed period shows alternating
//! eclipse depths. Transits are split by orbit parity, each half is folded
//! and binned on its own, and the two depths are compared in units of their
//! combined uncertainty.

use crate::constants::PPM;
use crate::error::{Result, VettingError};
use crate::light_curve::LightCurveSample;
use crate::statistical_methods::statistics::{count_finite, median, std_dev};
use crate::vetting::transit_window::{
    TransitWindowMask, ODD_EVEN_IN_TRANSIT_DAYS, ODD_EVEN_OUT_OF_TRANSIT_DAYS,
};
use log::info;
use serde::Serialize;
use std::fmt::Display;

/// Depth differences at or above this many sigma are flagged.
pub const ODD_EVEN_SIGMA_THRESHOLD: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SubsetDepth {
    /// Fractional flux deficit
    pub depth: f64,
    pub sigma: f64,
    pub n_in: usize,
    pub n_out: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OddEvenResult {
    pub even: SubsetDepth,
    pub odd: SubsetDepth,
    pub diff_sigma: f64,
    #[serde(skip)]
    pub even_binned: LightCurveSample,
    #[serde(skip)]
    pub odd_binned: LightCurveSample,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OddEvenVerdict {
    Consistent,
    SignificantDifference,
}

/// Orbit number of each cadence, rounding half to even.
pub fn orbit_indices(time: &[f64], period: f64, epoch: f64) -> Vec<i64> {
    time.iter()
        .map(|t| ((t - epoch) / period).round_ties_even() as i64)
        .collect()
}

fn subset_depth(binned: &LightCurveSample, mask: &TransitWindowMask) -> Result<SubsetDepth> {
    let w = mask.split(binned.time(), binned.flux()).require_both("odd/even")?;
    let n_in = count_finite(&w.inside);
    let n_out = count_finite(&w.outside);
    let med_in = median(&w.inside).unwrap_or(f64::NAN);
    let med_out = median(&w.outside).unwrap_or(f64::NAN);
    let std_out = std_dev(&w.outside).unwrap_or(f64::NAN);

    Ok(SubsetDepth {
        depth: med_out - med_in,
        sigma: std_out / (n_in as f64).sqrt(),
        n_in,
        n_out,
    })
}

/// Run the odd/even test on an unfolded light curve.
///
/// Windows are fixed in days on the binned curves: in-transit |t| < 0.02,
/// out-of-transit |t| > 0.03. Subsets of unequal size are compared as is.
pub fn odd_even_test(
    lc: &LightCurveSample,
    period: f64,
    epoch: f64,
    bin_width_days: f64,
) -> Result<OddEvenResult> {
    let orbits = orbit_indices(lc.time(), period, epoch);
    let even = lc.select(|i| orbits[i].rem_euclid(2) == 0);
    let odd = lc.select(|i| orbits[i].rem_euclid(2) != 0);
    info!(
        "odd/even split: {} even-orbit and {} odd-orbit cadences",
        even.len(),
        odd.len()
    );

    let even_binned = even.fold(period, epoch)?.bin(bin_width_days)?;
    let odd_binned = odd.fold(period, epoch)?.bin(bin_width_days)?;

    let mask = TransitWindowMask::new(ODD_EVEN_IN_TRANSIT_DAYS, ODD_EVEN_OUT_OF_TRANSIT_DAYS)?;
    let even_depth = subset_depth(&even_binned, &mask)?;
    let odd_depth = subset_depth(&odd_binned, &mask)?;

    let sigma_diff = (even_depth.sigma.powi(2) + odd_depth.sigma.powi(2)).sqrt();
    if sigma_diff == 0.0 {
        return Err(VettingError::DegenerateNoise { check: "odd/even" });
    }
    let diff_sigma = (even_depth.depth - odd_depth.depth).abs() / sigma_diff;

    Ok(OddEvenResult {
        even: even_depth,
        odd: odd_depth,
        diff_sigma,
        even_binned,
        odd_binned,
    })
}

impl OddEvenResult {
    pub fn verdict(&self) -> OddEvenVerdict {
        if self.diff_sigma < ODD_EVEN_SIGMA_THRESHOLD {
            OddEvenVerdict::Consistent
        } else {
            OddEvenVerdict::SignificantDifference
        }
    }
}

impl Display for OddEvenVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            OddEvenVerdict::Consistent => write!(f, "consistent, no eclipsing-binary signature"),
            OddEvenVerdict::SignificantDifference => {
                write!(f, "significant odd/even depth difference, possible false positive")
            }
        }
    }
}

impl Display for OddEvenResult {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "even depth = {:.1} ppm, odd depth = {:.1} ppm, difference = {:.2} sigma ({})",
            self.even.depth * PPM,
            self.odd.depth * PPM,
            self.diff_sigma,
            self.verdict()
        )
    }
}
