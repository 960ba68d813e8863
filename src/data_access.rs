pub mod csv_access;
pub mod data_cleaner;
#[cfg(feature = "fits")]
pub mod fits_access;

use crate::error::{Result, VettingError};
use crate::light_curve::LightCurveSample;
use log::{info, warn};
use std::path::{Path, PathBuf};

/// Default outlier clip applied to every sector before stitching.
pub const DEFAULT_CLIP_SIGMA: f64 = 5.0;

/// Load one sector file, dispatching on its extension.
pub fn load_sector(path: &Path) -> Result<LightCurveSample> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("csv") | Some("txt") | Some("dat") => csv_access::read_light_curve_file(path),
        #[cfg(feature = "fits")]
        Some("fits") => fits_access::read_light_curve_file(path),
        _ => Err(VettingError::UnsupportedFile(path.display().to_string())),
    }
}

/// Load, clean and merge every sector into one normalized, time-sorted sample.
///
/// A sector that fails to load or ends up empty is logged and skipped. If no
/// sector survives the run cannot continue.
pub fn search_and_stitch(paths: &[PathBuf], clip_sigma: f64) -> Result<LightCurveSample> {
    let mut sectors = Vec::with_capacity(paths.len());

    for path in paths {
        let raw = match load_sector(path) {
            Ok(lc) => lc,
            Err(e) => {
                warn!("skipping {}: {}", path.display(), e);
                continue;
            }
        };
        let finite: Vec<usize> = (0..raw.len())
            .filter(|&i| raw.time()[i].is_finite() && raw.flux()[i].is_finite())
            .collect();
        let sorted = raw.gather(&finite).sorted_by_time();
        let clean = data_cleaner::clean_data(&sorted, clip_sigma)?;
        if clean.is_empty() {
            warn!("skipping {}: no usable cadences", path.display());
            continue;
        }
        info!(
            "loaded {} ({} of {} cadences kept)",
            path.display(),
            clean.len(),
            raw.len()
        );
        sectors.push(clean);
    }

    if sectors.is_empty() {
        return Err(VettingError::UpstreamRetrieval(format!(
            "none of the {} input file(s) produced usable photometry",
            paths.len()
        )));
    }

    let stitched = LightCurveSample::concat(&sectors);
    info!(
        "stitched {} sector(s) into {} data points",
        sectors.len(),
        stitched.len()
    );
    Ok(stitched)
}

/// Fold on the ephemeris, bin, and write the result as header-less
/// `time,flux,flux_err` rows with time in days from mid-transit.
pub fn write_folded_csv(
    path: &Path,
    lc: &LightCurveSample,
    period: f64,
    epoch: f64,
    bin_width_days: f64,
) -> Result<LightCurveSample> {
    let binned = lc.fold(period, epoch)?.bin(bin_width_days)?;
    csv_access::write_light_curve_file(path, &binned)?;
    info!("folded light curve ({} bins) saved to {}", binned.len(), path.display());
    Ok(binned)
}
