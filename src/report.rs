use crate::pipeline::VettingReport;
use std::fmt::Write;

const RULE: &str = "==================================================";
const THIN_RULE: &str = "--------------------------------------------------";

/// Plain-text report. Every verdict is printed next to the number it came from.
pub fn render(report: &VettingReport) -> String {
    let mut out = String::new();
    // writing into a String cannot fail
    let _ = write_report(&mut out, report);
    out
}

fn write_report(out: &mut String, r: &VettingReport) -> std::fmt::Result {
    writeln!(out, "{RULE}")?;
    writeln!(out, "VETTING REPORT: {}", r.target)?;
    writeln!(out, "{RULE}")?;
    writeln!(out, "Signal:  {}", r.signal)?;
    writeln!(out, "Star:    {}", r.star.params)?;
    for sub in &r.star.substitutions {
        writeln!(out, "  note: {sub}")?;
    }
    writeln!(out, "Points:  {}", r.n_points)?;
    writeln!(out, "{THIN_RULE}")?;

    writeln!(out, "[1] Detection      {}", r.detection)?;
    writeln!(out, "[2] Odd/even       {}", r.odd_even)?;
    writeln!(out, "[3] Secondary      {}", r.secondary)?;
    match &r.centroid {
        Some(c) => writeln!(out, "[4] Centroid       {c}")?,
        None => writeln!(out, "[4] Centroid       skipped (no centroid columns)")?,
    }
    writeln!(out, "[5] Density        {}", r.density)?;
    match &r.model_comparison {
        Some(m) => writeln!(out, "[6] Model evidence {m}")?,
        None => writeln!(out, "[6] Model evidence not supplied")?,
    }
    writeln!(out, "{THIN_RULE}")?;

    writeln!(out, "PLANET PARAMETERS (depth {:.1} ppm)", r.planet_depth_ppm)?;
    writeln!(out, "{}", r.planet)?;
    writeln!(out, "{RULE}")
}
