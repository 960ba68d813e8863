pub fn median(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    // Filter out NaNs so they don't break ordering
    let mut v: Vec<f64> = data.iter().copied().filter(|x| x.is_finite()).collect();
    if v.is_empty() {
        return None;
    }
    v.sort_by(|a, b| a.total_cmp(b));
    let mid = v.len() / 2;

    if v.len() % 2 == 0 {
        Some((v[mid - 1] + v[mid]) * 0.5)
    } else {
        Some(v[mid])
    }
}

pub fn mean(data: &[f64]) -> Option<f64> {
    let (sum, n) = data
        .iter()
        .filter(|x| x.is_finite())
        .fold((0.0, 0usize), |(s, n), &x| (s + x, n + 1));
    if n == 0 {
        return None;
    }
    Some(sum / n as f64)
}

/// Population standard deviation (ddof = 0) over the finite values.
pub fn std_dev(data: &[f64]) -> Option<f64> {
    let mu = mean(data)?;
    let (sq, n) = data
        .iter()
        .filter(|x| x.is_finite())
        .fold((0.0, 0usize), |(s, n), &x| (s + (x - mu).powi(2), n + 1));
    Some((sq / n as f64).sqrt())
}

pub fn count_finite(data: &[f64]) -> usize {
    data.iter().filter(|x| x.is_finite()).count()
}

pub fn median_cadence(times: &[f64]) -> Option<f64> {
    if times.len() < 2 {
        return None;
    }
    let dts: Vec<f64> = times
        .windows(2)
        .map(|w| w[1] - w[0])
        .filter(|dt| dt.is_finite() && *dt > 0.0)
        .collect();
    median(&dts)
}

pub fn median_absolute_deviation(arr: &[f64]) -> Option<f64> {
    let med = median(arr)?;
    let deviations: Vec<f64> = arr
        .iter()
        .copied()
        .filter(|f| f.is_finite())
        .map(|f| (f - med).abs())
        .collect();

    median(&deviations)
}

/// MAD scaled to a Gaussian-equivalent sigma.
pub fn robust_sigma(arr: &[f64]) -> Option<f64> {
    median_absolute_deviation(arr).map(|mad| 1.4826 * mad)
}
