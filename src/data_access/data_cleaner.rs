use crate::error::Result;
use crate::light_curve::LightCurveSample;
use crate::statistical_methods::statistics::{median, median_cadence, robust_sigma};
use log::debug;

/// Gaps longer than this many median cadences split a sector into segments.
pub const GAP_FACTOR: f64 = 5.0;

struct NormSegment {
    indices: Vec<usize>,
    f_norm: Vec<f64>,
    f_err_norm: Vec<f64>,
    sigma: f64,
}

impl NormSegment {
    /// Drop points further than `k` robust sigmas from the segment median.
    fn segment_noise_clean(&mut self, k: f64) -> usize {
        let Some(med) = median(&self.f_norm) else {
            return 0;
        };
        let threshold = k * self.sigma;
        let before = self.indices.len();

        let keep: Vec<bool> = self
            .f_norm
            .iter()
            .map(|f| f.is_finite() && (f - med).abs() <= threshold)
            .collect();
        let mut it = keep.iter();
        self.indices.retain(|_| *it.next().unwrap_or(&false));
        let mut it = keep.iter();
        self.f_norm.retain(|_| *it.next().unwrap_or(&false));
        let mut it = keep.iter();
        self.f_err_norm.retain(|_| *it.next().unwrap_or(&false));

        before - self.indices.len()
    }
}

fn segment_on_gaps(t: &[f64], dt_med: f64, gap_factor: f64) -> Vec<(usize, usize)> {
    let mut segment_bounds: Vec<(usize, usize)> = Vec::new();
    let threshold = dt_med * gap_factor;

    if t.is_empty() {
        return segment_bounds;
    }

    let mut start = 0;
    for i in 1..t.len() {
        if (t[i] - t[i - 1]) > threshold {
            segment_bounds.push((start, i));
            start = i;
        }
    }

    segment_bounds.push((start, t.len()));
    segment_bounds
}

fn normalize_segments(lc: &LightCurveSample, segments: &[(usize, usize)]) -> Vec<NormSegment> {
    let mut out = Vec::with_capacity(segments.len());

    for &(s, e) in segments {
        let f_seg = &lc.flux()[s..e]; // e is exclusive
        let med = match median(f_seg) {
            Some(m) if m.is_finite() && m != 0.0 => m,
            _ => {
                debug!("skipping segment [{s}, {e}): median flux is zero or undefined");
                continue;
            }
        };
        let inv = 1.0 / med;
        let f_norm: Vec<f64> = f_seg.iter().map(|&f| inv * f).collect();
        let f_err_norm: Vec<f64> = lc.flux_err()[s..e].iter().map(|&f| inv * f).collect();
        let sigma = robust_sigma(&f_norm).unwrap_or(f64::INFINITY);

        out.push(NormSegment {
            indices: (s..e).collect(),
            f_norm,
            f_err_norm,
            sigma,
        });
    }
    out
}

/// Normalize each continuous segment of a sector to unit median flux and
/// sigma-clip at `k` robust sigmas. The input must be time-sorted.
pub fn clean_data(lc: &LightCurveSample, k: f64) -> Result<LightCurveSample> {
    // without a cadence there are no gaps to split on: one segment
    let seg_bounds = match median_cadence(lc.time()) {
        Some(dt_med) => segment_on_gaps(lc.time(), dt_med, GAP_FACTOR),
        None if lc.is_empty() => Vec::new(),
        None => vec![(0, lc.len())],
    };

    let mut norm_segments = normalize_segments(lc, &seg_bounds);
    let clipped: usize = norm_segments
        .iter_mut()
        .map(|seg| seg.segment_noise_clean(k))
        .sum();
    debug!(
        "cleaned {} segments, clipped {} points at {} sigma",
        norm_segments.len(),
        clipped,
        k
    );

    let indices: Vec<usize> = norm_segments
        .iter()
        .flat_map(|seg| seg.indices.iter().copied())
        .collect();
    let kept = lc.gather(&indices);
    let f_all: Vec<f64> = norm_segments
        .iter()
        .flat_map(|seg| seg.f_norm.iter().copied())
        .collect();
    let e_all: Vec<f64> = norm_segments
        .iter()
        .flat_map(|seg| seg.f_err_norm.iter().copied())
        .collect();

    let cleaned = LightCurveSample::new(kept.time().to_vec(), f_all, e_all)?;
    match kept.centroids() {
        Some(c) => cleaned.with_centroids(c.col.clone(), c.row.clone()),
        None => Ok(cleaned),
    }
}

#[cfg(test)]
pub mod test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn splits_on_gaps() {
        let t = [0.0, 1.0, 2.0, 3.0, 20.0, 21.0];
        assert_eq!(segment_on_gaps(&t, 1.0, 5.0), vec![(0, 4), (4, 6)]);
        assert!(segment_on_gaps(&[], 1.0, 5.0).is_empty());
    }

    #[test]
    fn normalizes_each_segment_and_clips_outliers() {
        let mut time = Vec::new();
        let mut flux = Vec::new();
        for i in 0..50 {
            time.push(i as f64 * 0.01);
            flux.push(if i % 2 == 0 { 1000.0 } else { 1002.0 });
        }
        for i in 0..50 {
            time.push(10.0 + i as f64 * 0.01);
            flux.push(if i % 2 == 0 { 500.0 } else { 501.0 });
        }
        // cosmic ray
        flux[10] = 5000.0;
        let err = vec![1.0; flux.len()];
        let lc = LightCurveSample::new(time, flux, err).unwrap();

        let clean = clean_data(&lc, 5.0).unwrap();
        assert_eq!(clean.len(), 99);
        assert!(clean.flux().iter().all(|&f| (f - 1.0).abs() < 0.01));
        assert_relative_eq!(clean.flux_err()[0], 1.0 / 1002.0, epsilon = 1e-12);
    }

    #[test]
    fn single_cadence_sector_is_still_normalized() {
        let lc = LightCurveSample::new(vec![5.0], vec![1200.0], vec![0.36]).unwrap();
        let clean = clean_data(&lc, 5.0).unwrap();
        assert_eq!(clean.len(), 1);
        assert_relative_eq!(clean.flux()[0], 1.0);
        assert_relative_eq!(clean.flux_err()[0], 0.36 / 1200.0, epsilon = 1e-15);

        let flux = vec![1200.0, 1201.0, 1199.0];
        let same_time = LightCurveSample::new(vec![5.0; 3], flux, vec![0.36; 3]).unwrap();
        let clean = clean_data(&same_time, 5.0).unwrap();
        assert_eq!(clean.len(), 3);
        assert!(clean.flux().iter().all(|&f| (f - 1.0).abs() < 0.01));

        assert!(clean_data(&LightCurveSample::default(), 5.0).unwrap().is_empty());
    }
}
