//! One parameterised vetting run: every check, in order, on one target.

use crate::characterization::planet_parameters::PlanetParameters;
use crate::config::VettingConfig;
use crate::constants::minutes_to_days;
use crate::error::Result;
use crate::light_curve::LightCurveSample;
use crate::stellar::{ResolvedStar, StellarParameters};
use crate::vetting::centroid::{centroid_shift_test, CentroidShift};
use crate::vetting::depth_snr::{estimate_depth_snr, DepthSnr};
use crate::vetting::model_comparison::{compare_models, ModelComparison};
use crate::vetting::odd_even::{odd_even_test, OddEvenResult};
use crate::vetting::secondary_eclipse::{secondary_eclipse_check, SecondaryEclipse};
use crate::vetting::stellar_density::{density_check, DensityCheck};
use crate::vetting::TransitSignal;
use log::info;
use serde::Serialize;

/// Headline numbers of a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VettingResult {
    pub depth_ppm: f64,
    pub noise_ppm: f64,
    pub snr: f64,
    pub odd_even_sigma: f64,
    pub density_ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VettingReport {
    pub target: String,
    pub signal: TransitSignal,
    pub star: ResolvedStar,
    pub n_points: usize,
    pub detection: DepthSnr,
    pub odd_even: OddEvenResult,
    pub secondary: SecondaryEclipse,
    pub centroid: Option<CentroidShift>,
    pub density: DensityCheck,
    /// Depth the planet parameters were derived from
    pub planet_depth_ppm: f64,
    pub planet: PlanetParameters,
    pub model_comparison: Option<ModelComparison>,
    #[serde(skip)]
    pub folded: LightCurveSample,
}

impl VettingReport {
    pub fn result(&self) -> VettingResult {
        VettingResult {
            depth_ppm: self.detection.depth_ppm,
            noise_ppm: self.detection.noise_ppm,
            snr: self.detection.snr,
            odd_even_sigma: self.odd_even.diff_sigma,
            density_ratio: self.density.ratio,
        }
    }
}

/// Run every check on a stitched, normalized light curve.
///
/// The planet parameters use the depth reported in the configuration when
/// there is one, otherwise the depth measured here.
pub fn run_vetting(config: &VettingConfig, lc: &LightCurveSample) -> Result<VettingReport> {
    let signal = config.signal;
    let period = signal.period_days;
    let epoch = signal.epoch;
    let duration = signal.duration_days();
    info!("vetting {} ({}) on {} points", config.target.name, signal, lc.len());

    let star = StellarParameters::resolve(&config.star);
    info!("host star: {}", star.params);

    let folded = lc.fold(period, epoch)?;
    let detection = estimate_depth_snr(&folded, duration, period)?;
    info!("detection: {}", detection);

    let odd_even = odd_even_test(
        lc,
        period,
        epoch,
        minutes_to_days(config.processing.odd_even_bin_minutes),
    )?;
    info!("odd/even: {}", odd_even);

    let secondary = secondary_eclipse_check(lc, period, epoch, duration)?;
    info!("secondary: {}", secondary);

    let centroid = centroid_shift_test(lc, period, epoch, duration)?;
    if let Some(c) = &centroid {
        info!("centroid: {}", c);
    }

    let density = density_check(
        &star.params,
        period,
        config.density.a_over_r(star.params.radius()),
    );
    info!("density: {}", density);

    let planet_depth_ppm = signal.depth_ppm.unwrap_or(detection.depth_ppm);
    let planet = PlanetParameters::derive(&star.params, planet_depth_ppm, period);
    info!(
        "planet: {:.2} R_earth, {:.0} K",
        planet.radius_earth(),
        planet.equilibrium_temp_k()
    );

    let model_comparison = config.model_comparison.as_ref().map(compare_models);

    Ok(VettingReport {
        target: config.target.name.clone(),
        signal,
        star,
        n_points: lc.len(),
        detection,
        odd_even,
        secondary,
        centroid,
        density,
        planet_depth_ppm,
        planet,
        model_comparison,
        folded,
    })
}
