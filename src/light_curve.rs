//! Light-curve container plus the fold and bin primitives the checks run on.

use crate::error::{Result, VettingError};
use crate::statistical_methods::statistics::{mean, std_dev};
use serde::Serialize;

/// Flux-weighted centroid positions in pixels, one per cadence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Centroids {
    pub col: Vec<f64>,
    pub row: Vec<f64>,
}

/// Time-ordered photometry: (time, flux, flux_err) triples with flux near 1.0.
///
/// After [`LightCurveSample::fold`] the time column holds days from the
/// nearest mid-transit instead of absolute time.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct LightCurveSample {
    time: Vec<f64>,
    flux: Vec<f64>,
    flux_err: Vec<f64>,
    centroids: Option<Centroids>,
}

impl LightCurveSample {
    pub fn new(time: Vec<f64>, flux: Vec<f64>, flux_err: Vec<f64>) -> Result<Self> {
        if time.len() != flux.len() || time.len() != flux_err.len() {
            return Err(VettingError::InvalidSample(format!(
                "column length mismatch: time={}, flux={}, flux_err={}",
                time.len(),
                flux.len(),
                flux_err.len()
            )));
        }
        Ok(LightCurveSample {
            time,
            flux,
            flux_err,
            centroids: None,
        })
    }

    /// Sample without per-point uncertainties (flux_err set to NaN).
    pub fn from_time_flux(time: Vec<f64>, flux: Vec<f64>) -> Result<Self> {
        let flux_err = vec![f64::NAN; flux.len()];
        Self::new(time, flux, flux_err)
    }

    pub fn with_centroids(mut self, col: Vec<f64>, row: Vec<f64>) -> Result<Self> {
        if col.len() != self.len() || row.len() != self.len() {
            return Err(VettingError::InvalidSample(format!(
                "centroid length mismatch: samples={}, col={}, row={}",
                self.len(),
                col.len(),
                row.len()
            )));
        }
        self.centroids = Some(Centroids { col, row });
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn time(&self) -> &[f64] {
        &self.time
    }

    pub fn flux(&self) -> &[f64] {
        &self.flux
    }

    pub fn flux_err(&self) -> &[f64] {
        &self.flux_err
    }

    pub fn centroids(&self) -> Option<&Centroids> {
        self.centroids.as_ref()
    }

    /// New sample made of the rows at `indices`, in that order.
    pub fn gather(&self, indices: &[usize]) -> LightCurveSample {
        let pick = |v: &[f64]| indices.iter().map(|&i| v[i]).collect::<Vec<f64>>();
        LightCurveSample {
            time: pick(&self.time),
            flux: pick(&self.flux),
            flux_err: pick(&self.flux_err),
            centroids: self.centroids.as_ref().map(|c| Centroids {
                col: pick(&c.col),
                row: pick(&c.row),
            }),
        }
    }

    /// Rows whose index satisfies `keep`.
    pub fn select<F>(&self, keep: F) -> LightCurveSample
    where
        F: Fn(usize) -> bool,
    {
        let indices: Vec<usize> = (0..self.len()).filter(|&i| keep(i)).collect();
        self.gather(&indices)
    }

    pub fn sorted_by_time(&self) -> LightCurveSample {
        let mut order: Vec<usize> = (0..self.len()).collect();
        order.sort_by(|&a, &b| self.time[a].total_cmp(&self.time[b]));
        self.gather(&order)
    }

    /// Concatenate several samples and time-sort the result. Centroids are
    /// kept only if every part carries them.
    pub fn concat(parts: &[LightCurveSample]) -> LightCurveSample {
        let mut out = LightCurveSample::default();
        let keep_centroids = !parts.is_empty() && parts.iter().all(|p| p.centroids.is_some());
        let mut col = Vec::new();
        let mut row = Vec::new();
        for part in parts {
            out.time.extend_from_slice(&part.time);
            out.flux.extend_from_slice(&part.flux);
            out.flux_err.extend_from_slice(&part.flux_err);
            if let (true, Some(c)) = (keep_centroids, &part.centroids) {
                col.extend_from_slice(&c.col);
                row.extend_from_slice(&c.row);
            }
        }
        if keep_centroids {
            out.centroids = Some(Centroids { col, row });
        }
        out.sorted_by_time()
    }

    /// Fold on `period` around `epoch`. The returned time column is days from
    /// mid-transit in [-period/2, period/2), sorted ascending.
    pub fn fold(&self, period: f64, epoch: f64) -> Result<LightCurveSample> {
        if !(period.is_finite() && period > 0.0) {
            return Err(VettingError::InvalidSample(format!(
                "fold period must be positive, got {period}"
            )));
        }
        let half = 0.5 * period;
        let mut folded = self.clone();
        for t in folded.time.iter_mut() {
            *t = (*t - epoch + half).rem_euclid(period) - half;
        }
        Ok(folded.sorted_by_time())
    }

    /// Fixed-width bins anchored at the first sample. Each bin reports its
    /// centre time, mean flux and standard error; empty bins are dropped.
    pub fn bin(&self, bin_width: f64) -> Result<LightCurveSample> {
        if !(bin_width.is_finite() && bin_width > 0.0) {
            return Err(VettingError::InvalidSample(format!(
                "bin width must be positive, got {bin_width}"
            )));
        }
        let sorted = self.sorted_by_time();
        let Some(&start) = sorted.time.first() else {
            return Ok(LightCurveSample::default());
        };

        let mut out = LightCurveSample::default();
        let mut col = Vec::new();
        let mut row = Vec::new();

        let index_of = |t: f64| ((t - start) / bin_width).floor();
        let mut lo = 0;
        while lo < sorted.len() {
            let bin_index = index_of(sorted.time[lo]);
            let mut hi = lo + 1;
            while hi < sorted.len() && index_of(sorted.time[hi]) == bin_index {
                hi += 1;
            }

            let flux = &sorted.flux[lo..hi];
            if let Some(mean_flux) = mean(flux) {
                let n = flux.iter().filter(|f| f.is_finite()).count();
                let err = if n > 1 {
                    std_dev(flux).unwrap_or(f64::NAN) / (n as f64).sqrt()
                } else {
                    // singleton bin: fall back to the measured uncertainty
                    flux.iter()
                        .zip(&sorted.flux_err[lo..hi])
                        .find(|(f, _)| f.is_finite())
                        .map(|(_, e)| *e)
                        .unwrap_or(f64::NAN)
                };
                out.time.push(start + (bin_index + 0.5) * bin_width);
                out.flux.push(mean_flux);
                out.flux_err.push(err);
                if let Some(c) = &sorted.centroids {
                    col.push(mean(&c.col[lo..hi]).unwrap_or(f64::NAN));
                    row.push(mean(&c.row[lo..hi]).unwrap_or(f64::NAN));
                }
            }
            lo = hi;
        }

        if sorted.centroids.is_some() {
            out.centroids = Some(Centroids { col, row });
        }
        Ok(out)
    }
}
