use approx::assert_relative_eq;
use std::io::Write;
use std::path::{Path, PathBuf};
use transit_vetter::data_access::{csv_access, search_and_stitch, write_folded_csv};
use transit_vetter::plotting::write_report_plots;
use transit_vetter::report::render;
use transit_vetter::vetting::odd_even::OddEvenVerdict;
use transit_vetter::{run_vetting, VettingConfig, VettingError};

const DEPTH: f64 = 1e-3;

/// Two sectors of a box transit on the TOI 864.01 ephemeris, sampled on the
/// same phase grid every orbit, with a sinusoidal baseline.
fn write_sectors(dir: &Path, config: &VettingConfig, centroids: bool) -> Vec<PathBuf> {
    let period = config.signal.period_days;
    let epoch = config.signal.epoch;
    let cadence = period / 347.0;

    let mut paths = Vec::new();
    for (sector, first_orbit) in [(4, -20_i64), (31, 40)] {
        let path = dir.join(format!("sector_{sector}.csv"));
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "time,flux,flux_err").unwrap();
        for i in 0..(347 * 20) {
            let t = epoch + first_orbit as f64 * period + (i as f64 + 0.25) * cadence;
            let phase = (t - epoch + 0.5 * period).rem_euclid(period) - 0.5 * period;
            let flux = if phase.abs() < 0.025 {
                1.0 - DEPTH
            } else {
                1.0 + 5e-4 * (2.0 * std::f64::consts::PI * 7.0 * phase / period).sin()
            };
            // raw counts, normalized during stitching
            if centroids {
                let jitter = if i % 2 == 0 { 0.01 } else { -0.01 };
                writeln!(f, "{},{},{},{},{}", t, 1200.0 * flux, 0.36, 512.3 + jitter, 87.9 - jitter)
                    .unwrap();
            } else {
                writeln!(f, "{},{},{}", t, 1200.0 * flux, 0.36).unwrap();
            }
        }
        paths.push(path);
    }
    paths
}

#[test]
fn vets_a_synthetic_toi_864() {
    let _ = env_logger::builder().is_test(true).try_init();
    let dir = tempfile::tempdir().unwrap();
    let config = VettingConfig::toi_864_01();
    let paths = write_sectors(dir.path(), &config, false);

    let lc = search_and_stitch(&paths, config.processing.clip_sigma).unwrap();
    assert_eq!(lc.len(), 2 * 347 * 20);

    let report = run_vetting(&config, &lc).unwrap();
    let result = report.result();

    assert!((result.depth_ppm - 1000.0).abs() < 20.0, "depth = {}", result.depth_ppm);
    assert!(result.snr > 7.1);
    assert_eq!(report.odd_even.verdict(), OddEvenVerdict::Consistent);
    assert!(report.centroid.is_none());

    // catalog radius and mass are given, Teff falls back to solar
    assert_eq!(report.star.substitutions.len(), 1);
    assert_eq!(report.star.substitutions[0].field, "teff");

    // planet parameters come from the catalogued 158 ppm, not the measured depth
    assert_eq!(report.planet_depth_ppm, 158.0);
    assert_relative_eq!(report.planet.radius_earth(), 0.5471, epsilon = 1e-3);
    assert_relative_eq!(report.planet.semi_major_axis_au(), 0.009174, epsilon = 1e-5);
    assert_relative_eq!(report.planet.equilibrium_temp_k(), 1834.9, epsilon = 0.5);

    assert_relative_eq!(
        result.density_ratio,
        report.density.rho_transit / report.density.rho_catalog,
        epsilon = 1e-12
    );

    let text = render(&report);
    assert!(text.contains("TOI 864.01"));
    assert!(text.contains("robust detection"));
    assert!(text.contains("skipped (no centroid columns)"));
    assert!(text.contains("Earth-like"));
    assert!(text.contains("note:"));

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["target"], "TOI 864.01");
    assert!(json["detection"]["snr"].as_f64().unwrap() > 7.1);
}

#[test]
fn exports_and_plots() {
    let dir = tempfile::tempdir().unwrap();
    let config = VettingConfig::toi_864_01();
    let paths = write_sectors(dir.path(), &config, false);
    let lc = search_and_stitch(&paths, config.processing.clip_sigma).unwrap();
    let report = run_vetting(&config, &lc).unwrap();

    let csv_path = dir.path().join("toi864_folded.csv");
    let binned = write_folded_csv(
        &csv_path,
        &lc,
        config.signal.period_days,
        config.signal.epoch,
        5.0 / 1440.0,
    )
    .unwrap();
    let back = csv_access::read_light_curve_file(&csv_path).unwrap();
    assert_eq!(back.len(), binned.len());
    let half = 0.5 * config.signal.period_days;
    assert!(back.time().iter().all(|t| t.abs() <= half));

    let figures = write_report_plots(&dir.path().join("plots"), &report, 0.005).unwrap();
    assert_eq!(figures.len(), 3);
    assert!(figures.iter().all(|p| p.exists()));
    assert!(figures[0].ends_with("TOI_864_01_transit.svg"));
}

#[test]
fn no_photometry_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let err = search_and_stitch(&[dir.path().join("sector_4.csv")], 5.0);
    assert!(matches!(err, Err(VettingError::UpstreamRetrieval(_))));
}

#[test]
fn centroid_columns_add_a_check_and_a_figure() {
    let dir = tempfile::tempdir().unwrap();
    let config = VettingConfig::toi_864_01();
    let paths = write_sectors(dir.path(), &config, true);
    let lc = search_and_stitch(&paths, config.processing.clip_sigma).unwrap();
    assert!(lc.centroids().is_some());

    let report = run_vetting(&config, &lc).unwrap();
    let centroid = report.centroid.unwrap();
    assert!(centroid.is_on_target(), "{centroid}");
    assert!(render(&report).contains("on target"));

    let figures = write_report_plots(&dir.path().join("plots"), &report, 0.005).unwrap();
    assert_eq!(figures.len(), 4);
    assert!(figures[3].ends_with("TOI_864_01_centroids.svg"));
}
