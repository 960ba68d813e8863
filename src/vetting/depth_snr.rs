use crate::constants::PPM;
use crate::error::{Result, VettingError};
use crate::light_curve::LightCurveSample;
use crate::statistical_methods::statistics::{count_finite, median, std_dev};
use crate::vetting::transit_window::{
    TransitWindowMask, SNR_IN_TRANSIT_DURATIONS, SNR_OUT_OF_TRANSIT_DURATIONS,
};
use serde::Serialize;
use std::fmt::Display;

/// SNR above which a detection counts as robust.
pub const SNR_DETECTION_THRESHOLD: f64 = 7.1;

/// Depths below this (ppm) are flagged as Earth/Super-Earth sized.
pub const SMALL_DEPTH_PPM: f64 = 500.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DepthSnr {
    pub depth_ppm: f64,
    pub noise_ppm: f64,
    pub n_in: usize,
    pub snr: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Detection {
    Robust,
    Inconclusive,
}

impl DepthSnr {
    pub fn detection(&self) -> Detection {
        if self.snr > SNR_DETECTION_THRESHOLD {
            Detection::Robust
        } else {
            Detection::Inconclusive
        }
    }

    /// Advisory only: a shallow robust transit is compatible with a small planet.
    pub fn small_depth_note(&self) -> Option<&'static str> {
        if self.detection() == Detection::Robust && self.depth_ppm.abs() < SMALL_DEPTH_PPM {
            Some("compatible with Earth/Super-Earth-sized depth")
        } else {
            None
        }
    }
}

/// Depth, scatter and SNR from already-split flux windows.
pub(crate) fn depth_from_windows(
    check: &'static str,
    phases: &[f64],
    flux: &[f64],
    mask: &TransitWindowMask,
) -> Result<DepthSnr> {
    let w = mask.split(phases, flux).require_both(check)?;

    // require_both guarantees finite values on both sides
    let med_in = median(&w.inside).unwrap_or(f64::NAN);
    let med_out = median(&w.outside).unwrap_or(f64::NAN);
    let noise = std_dev(&w.outside).unwrap_or(f64::NAN);
    if noise == 0.0 {
        return Err(VettingError::DegenerateNoise { check });
    }

    let depth_ppm = (med_out - med_in) * PPM;
    let noise_ppm = noise * PPM;
    let n_in = count_finite(&w.inside);
    let snr = (depth_ppm / noise_ppm) * (n_in as f64).sqrt();

    Ok(DepthSnr {
        depth_ppm,
        noise_ppm,
        n_in,
        snr,
    })
}

/// Depth, noise and SNR of a folded light curve.
///
/// `folded` holds days from mid-transit; windows are evaluated on phase as a
/// fraction of the period: in-transit |phase| < 0.5 * duration/period,
/// out-of-transit |phase| > 2 * duration/period.
pub fn estimate_depth_snr(
    folded: &LightCurveSample,
    duration_days: f64,
    period_days: f64,
) -> Result<DepthSnr> {
    let duration_phase = duration_days / period_days;
    let mask = TransitWindowMask::from_duration(
        duration_phase,
        SNR_IN_TRANSIT_DURATIONS,
        SNR_OUT_OF_TRANSIT_DURATIONS,
    )?;
    let phases: Vec<f64> = folded.time().iter().map(|t| t / period_days).collect();
    depth_from_windows("depth/SNR", &phases, folded.flux(), &mask)
}

impl Display for Detection {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Detection::Robust => write!(f, "robust detection"),
            Detection::Inconclusive => write!(f, "inconclusive"),
        }
    }
}

impl Display for DepthSnr {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "depth = {:.2} ppm, noise = {:.2} ppm, n_in = {}, SNR = {:.2} ({})",
            self.depth_ppm,
            self.noise_ppm,
            self.n_in,
            self.snr,
            self.detection()
        )?;
        if let Some(note) = self.small_depth_note() {
            write!(f, "; note: {note}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
pub mod test {
    use super::*;
    use crate::error::TransitWindow;
    use approx::assert_relative_eq;

    const PERIOD: f64 = 0.520667;
    const DURATION: f64 = 1.0 / 24.0;

    /// Folded curve with a box transit of `depth`. Baseline points sit at
    /// 1 + scatter before mid-transit and 1 - scatter after it, so the two
    /// halves mirror each other and the baseline median is exactly 1.
    pub fn synthetic_folded(depth: f64, scatter: f64) -> LightCurveSample {
        let half = 1000;
        let dt = 0.5 * PERIOD / half as f64;
        let duration_phase = DURATION / PERIOD;
        let flux_at = |t: f64, sign: f64| {
            if (t / PERIOD).abs() < 0.5 * duration_phase {
                1.0 - depth
            } else {
                1.0 + sign * scatter
            }
        };

        let mut time = Vec::with_capacity(2 * half);
        let mut flux = Vec::with_capacity(2 * half);
        for k in (0..half).rev() {
            let t = -(k as f64 + 0.5) * dt;
            time.push(t);
            flux.push(flux_at(t, 1.0));
        }
        for k in 0..half {
            let t = (k as f64 + 0.5) * dt;
            time.push(t);
            flux.push(flux_at(t, -1.0));
        }
        LightCurveSample::from_time_flux(time, flux).unwrap()
    }

    #[test]
    fn snr_matches_closed_form() {
        let lc = synthetic_folded(400e-6, 100e-6);
        let r = estimate_depth_snr(&lc, DURATION, PERIOD).unwrap();

        assert_relative_eq!(r.depth_ppm, 400.0, epsilon = 1e-6);
        assert_relative_eq!(r.noise_ppm, 100.0, epsilon = 1e-6);
        assert!(r.n_in > 0);
        assert_relative_eq!(
            r.snr,
            r.depth_ppm / r.noise_ppm * (r.n_in as f64).sqrt(),
            epsilon = 1e-12
        );
        assert_eq!(r.detection(), Detection::Robust);
        assert!(r.small_depth_note().is_some());
    }

    #[test]
    fn nan_flux_is_ignored() {
        let lc = synthetic_folded(400e-6, 100e-6);
        let mut flux = lc.flux().to_vec();
        flux[0] = f64::NAN;
        let lc = LightCurveSample::from_time_flux(lc.time().to_vec(), flux).unwrap();
        let r = estimate_depth_snr(&lc, DURATION, PERIOD).unwrap();
        assert!(r.snr.is_finite());
    }

    #[test]
    fn deep_or_weak_signals() {
        let deep = estimate_depth_snr(&synthetic_folded(0.01, 100e-6), DURATION, PERIOD).unwrap();
        assert_eq!(deep.detection(), Detection::Robust);
        assert!(deep.small_depth_note().is_none());

        let weak = DepthSnr {
            depth_ppm: 50.0,
            noise_ppm: 500.0,
            n_in: 16,
            snr: 0.4,
        };
        assert_eq!(weak.detection(), Detection::Inconclusive);
        assert!(weak.small_depth_note().is_none());
        assert!(weak.to_string().contains("SNR = 0.40 (inconclusive)"));
    }

    #[test]
    fn empty_window_fails_fast() {
        // nothing near phase zero
        let lc = LightCurveSample::from_time_flux(vec![-0.25, 0.25], vec![1.0, 1.0]).unwrap();
        let err = estimate_depth_snr(&lc, DURATION, PERIOD);
        assert!(matches!(err, Err(VettingError::InsufficientData { .. })));
    }

    #[test]
    fn no_baseline_fails_fast() {
        // every sample within two durations of mid-transit
        let lc = LightCurveSample::from_time_flux(vec![-0.05, 0.0, 0.05], vec![1.0, 0.999, 1.0])
            .unwrap();
        match estimate_depth_snr(&lc, DURATION, PERIOD) {
            Err(VettingError::InsufficientData { window, .. }) => {
                assert_eq!(window, TransitWindow::OutOfTransit)
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn flat_baseline_is_degenerate() {
        let lc = synthetic_folded(400e-6, 0.0);
        let err = estimate_depth_snr(&lc, DURATION, PERIOD);
        assert!(matches!(err, Err(VettingError::DegenerateNoise { .. })));
    }
}
