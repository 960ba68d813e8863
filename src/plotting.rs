//! SVG figures for a vetting run.

use crate::error::{Result, VettingError};
use crate::light_curve::LightCurveSample;
use crate::pipeline::VettingReport;
use crate::statistical_methods::statistics::median;
use crate::vetting::odd_even::OddEvenResult;
use log::info;
use plotters::prelude::*;
use std::ops::Range;
use std::path::{Path, PathBuf};

const STEEL_BLUE: RGBColor = RGBColor(70, 130, 180);
const DARK_ORANGE: RGBColor = RGBColor(255, 140, 0);

/// Vertical offset applied to the odd-transit curve so the two don't overlap.
const ODD_OFFSET: f64 = -0.001;

fn plot_err<E: std::fmt::Display>(e: E) -> VettingError {
    VettingError::Plot(e.to_string())
}

/// Flux range of the points inside `x_window`, padded by 10%.
fn flux_range(curves: &[(&LightCurveSample, f64)], x_window: &Range<f64>) -> Range<f64> {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for (lc, offset) in curves {
        for (&t, &f) in lc.time().iter().zip(lc.flux()) {
            if x_window.contains(&t) && f.is_finite() {
                lo = lo.min(f + offset);
                hi = hi.max(f + offset);
            }
        }
    }
    if !lo.is_finite() || !hi.is_finite() {
        return 0.99..1.01;
    }
    let pad = ((hi - lo) * 0.1).max(1e-5);
    (lo - pad)..(hi + pad)
}

/// Folded light curve with its binned mean on top.
pub fn plot_folded(
    path: &Path,
    folded: &LightCurveSample,
    bin_width_days: f64,
    title: &str,
) -> Result<()> {
    let binned = folded.bin(bin_width_days)?;
    let x_range = -0.15..0.15;
    let y_range = flux_range(&[(&binned, 0.0)], &x_range);

    let root = SVGBackend::new(path, (1000, 600)).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 24))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(80)
        .build_cartesian_2d(x_range.clone(), y_range.clone())
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .x_desc("Phase [days]")
        .y_desc("Normalized Flux")
        .draw()
        .map_err(plot_err)?;

    chart
        .draw_series(
            folded
                .time()
                .iter()
                .zip(folded.flux())
                .filter(|(t, f)| x_range.contains(*t) && y_range.contains(*f))
                .map(|(&t, &f)| Circle::new((t, f), 1, BLACK.mix(0.15).filled())),
        )
        .map_err(plot_err)?
        .label("Data")
        .legend(|(x, y)| Circle::new((x, y), 3, BLACK.filled()));

    chart
        .draw_series(LineSeries::new(
            binned
                .time()
                .iter()
                .zip(binned.flux())
                .filter(|(t, _)| x_range.contains(*t))
                .map(|(&t, &f)| (t, f)),
            RED.stroke_width(2),
        ))
        .map_err(plot_err)?
        .label("Binned mean")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED.stroke_width(2)));

    chart
        .draw_series(LineSeries::new(
            vec![(x_range.start, 1.0), (x_range.end, 1.0)],
            GREEN.stroke_width(1),
        ))
        .map_err(plot_err)?;

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(plot_err)?;

    root.present().map_err(plot_err)?;
    Ok(())
}

/// Even and odd binned transits side by side, odd shifted down for clarity.
pub fn plot_odd_even(path: &Path, result: &OddEvenResult, title: &str) -> Result<()> {
    let x_range = -0.1..0.1;
    let y_range = flux_range(
        &[(&result.even_binned, 0.0), (&result.odd_binned, ODD_OFFSET)],
        &x_range,
    );

    let bars = |lc: &LightCurveSample, offset: f64, color: RGBColor| -> Vec<_> {
        lc.time()
            .iter()
            .zip(lc.flux())
            .zip(lc.flux_err())
            .filter(|((t, f), _)| x_range.contains(*t) && f.is_finite())
            .map(|((&t, &f), &e)| {
                let e = if e.is_finite() { e } else { 0.0 };
                let y = f + offset;
                ErrorBar::new_vertical(t, y - e, y, y + e, color.filled(), 4)
            })
            .collect()
    };

    let root = SVGBackend::new(path, (1000, 500)).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 24))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(80)
        .build_cartesian_2d(x_range.clone(), y_range)
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .x_desc("Phase (days)")
        .y_desc("Normalized Flux (Offset)")
        .draw()
        .map_err(plot_err)?;

    chart
        .draw_series(bars(&result.even_binned, 0.0, STEEL_BLUE))
        .map_err(plot_err)?
        .label("Even transits")
        .legend(|(x, y)| Circle::new((x, y), 3, STEEL_BLUE.filled()));

    chart
        .draw_series(bars(&result.odd_binned, ODD_OFFSET, DARK_ORANGE))
        .map_err(plot_err)?
        .label("Odd transits (offset -0.001)")
        .legend(|(x, y)| Circle::new((x, y), 3, DARK_ORANGE.filled()));

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(plot_err)?;

    root.present().map_err(plot_err)?;
    Ok(())
}

/// Folded column and row centroid offsets from their median position.
pub fn plot_centroids(path: &Path, folded: &LightCurveSample, title: &str) -> Result<()> {
    let Some(c) = folded.centroids() else {
        return Err(VettingError::Plot("light curve has no centroid columns".to_string()));
    };
    let x_range = -0.15..0.15;
    let offsets = |pos: &[f64]| -> Vec<(f64, f64)> {
        let med = median(pos).unwrap_or(0.0);
        folded
            .time()
            .iter()
            .zip(pos)
            .filter(|(t, p)| x_range.contains(*t) && p.is_finite())
            .map(|(&t, &p)| (t, p - med))
            .collect()
    };
    let col = offsets(&c.col);
    let row = offsets(&c.row);

    let (lo, hi) = col
        .iter()
        .chain(&row)
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &(_, d)| (lo.min(d), hi.max(d)));
    let y_range = if lo.is_finite() && hi.is_finite() {
        let pad = ((hi - lo) * 0.1).max(1e-4);
        (lo - pad)..(hi + pad)
    } else {
        -0.01..0.01
    };

    let root = SVGBackend::new(path, (1000, 600)).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 24))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(80)
        .build_cartesian_2d(x_range.clone(), y_range)
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .x_desc("Phase [days]")
        .y_desc("Centroid offset [pixels]")
        .draw()
        .map_err(plot_err)?;

    chart
        .draw_series(
            col.iter()
                .map(|&(t, d)| Circle::new((t, d), 1, STEEL_BLUE.mix(0.4).filled())),
        )
        .map_err(plot_err)?
        .label("Column")
        .legend(|(x, y)| Circle::new((x, y), 3, STEEL_BLUE.filled()));

    chart
        .draw_series(
            row.iter()
                .map(|&(t, d)| Circle::new((t, d), 1, DARK_ORANGE.mix(0.4).filled())),
        )
        .map_err(plot_err)?
        .label("Row")
        .legend(|(x, y)| Circle::new((x, y), 3, DARK_ORANGE.filled()));

    chart
        .draw_series(LineSeries::new(
            vec![(x_range.start, 0.0), (x_range.end, 0.0)],
            BLACK.stroke_width(1),
        ))
        .map_err(plot_err)?;

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(plot_err)?;

    root.present().map_err(plot_err)?;
    Ok(())
}

/// Write the primary transit, phase-0.5 and odd/even figures into `dir`,
/// plus the centroid figure when the run had centroid columns.
pub fn write_report_plots(
    dir: &Path,
    report: &VettingReport,
    bin_width_days: f64,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;
    let stem = report.target.replace(|c: char| !c.is_ascii_alphanumeric(), "_");

    let primary = dir.join(format!("{stem}_transit.svg"));
    plot_folded(
        &primary,
        &report.folded,
        bin_width_days,
        &format!("Transit, P = {:.5} d", report.signal.period_days),
    )?;

    let secondary = dir.join(format!("{stem}_phase05.svg"));
    plot_folded(
        &secondary,
        &report.secondary.folded,
        bin_width_days,
        "False positive check (phase 0.5)",
    )?;

    let odd_even = dir.join(format!("{stem}_odd_even.svg"));
    plot_odd_even(
        &odd_even,
        &report.odd_even,
        &format!("Odd-even transit check - {}", report.target),
    )?;

    let mut written = vec![primary, secondary, odd_even];

    if report.centroid.is_some() && report.folded.centroids().is_some() {
        let centroids = dir.join(format!("{stem}_centroids.svg"));
        plot_centroids(
            &centroids,
            &report.folded,
            &format!("Centroid motion - {}", report.target),
        )?;
        written.push(centroids);
    }

    for p in &written {
        info!("figure saved as {}", p.display());
    }
    Ok(written)
}
