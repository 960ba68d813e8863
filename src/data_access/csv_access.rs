use crate::error::{Result, VettingError};
use crate::light_curve::LightCurveSample;
use std::io::{Read, Write};
use std::path::Path;

/// Read a light curve table with columns `time, flux[, flux_err[, centroid_col, centroid_row]]`.
///
/// A leading header row is skipped when its first field isn't numeric, and
/// `#` lines are comments. Missing uncertainties become NaN.
pub fn read_light_curve<R: Read>(reader: R) -> Result<LightCurveSample> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .comment(Some(b'#'))
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut time = Vec::new();
    let mut flux = Vec::new();
    let mut flux_err = Vec::new();
    let mut col = Vec::new();
    let mut row = Vec::new();
    let mut all_centroids = true;

    for (line, record) in rdr.records().enumerate() {
        let record = record?;
        let first = record.get(0).unwrap_or("");
        if line == 0 && first.parse::<f64>().is_err() {
            continue;
        }
        if record.len() < 2 {
            return Err(VettingError::InvalidSample(format!(
                "row {} has {} columns, need at least time and flux",
                line + 1,
                record.len()
            )));
        }
        let field = |i: usize| -> Result<f64> {
            match record.get(i) {
                None | Some("") => Ok(f64::NAN),
                Some(s) if s.eq_ignore_ascii_case("nan") => Ok(f64::NAN),
                Some(s) => s.parse::<f64>().map_err(|_| {
                    let row = line + 1;
                    VettingError::InvalidSample(format!("row {row}: '{s}' is not a number"))
                }),
            }
        };
        time.push(field(0)?);
        flux.push(field(1)?);
        flux_err.push(field(2)?);
        if record.len() >= 5 {
            col.push(field(3)?);
            row.push(field(4)?);
        } else {
            all_centroids = false;
        }
    }

    let lc = LightCurveSample::new(time, flux, flux_err)?;
    if all_centroids && !lc.is_empty() {
        lc.with_centroids(col, row)
    } else {
        Ok(lc)
    }
}

pub fn read_light_curve_file(path: &Path) -> Result<LightCurveSample> {
    let file = std::fs::File::open(path)?;
    read_light_curve(file)
}

/// Header-less `time,flux,flux_err` rows, the layout external validation
/// tools expect for a folded curve.
pub fn write_light_curve<W: Write>(writer: W, lc: &LightCurveSample) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    for ((t, f), e) in lc.time().iter().zip(lc.flux()).zip(lc.flux_err()) {
        wtr.write_record(&[t.to_string(), f.to_string(), e.to_string()])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_light_curve_file(path: &Path, lc: &LightCurveSample) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_light_curve(file, lc)
}

#[cfg(test)]
pub mod test {
    use super::*;

    #[test]
    fn reads_header_comments_and_centroids() {
        let text = "# TIC 231728511\n\
                    time,flux,flux_err,col,row\n\
                    1.0, 1.0001, 0.0002, 10.1, 20.2\n\
                    2.0, 0.9999, nan, 10.2, 20.1\n";
        let lc = read_light_curve(text.as_bytes()).unwrap();
        assert_eq!(lc.len(), 2);
        assert_eq!(lc.time(), &[1.0, 2.0]);
        assert!(lc.flux_err()[1].is_nan());
        assert_eq!(lc.centroids().unwrap().row, vec![20.2, 20.1]);
    }

    #[test]
    fn two_column_rows_have_nan_errors() {
        let lc = read_light_curve("0.5,1.0\n0.6,0.9\n".as_bytes()).unwrap();
        assert_eq!(lc.len(), 2);
        assert!(lc.flux_err().iter().all(|e| e.is_nan()));
        assert!(lc.centroids().is_none());
    }

    #[test]
    fn rejects_garbage() {
        let err = read_light_curve("1.0,1.0\n2.0,abc\n".as_bytes());
        assert!(matches!(err, Err(VettingError::InvalidSample(_))));
    }

    #[test]
    fn writes_headerless_rows() {
        let lc = LightCurveSample::new(vec![-0.01, 0.0], vec![1.0, 0.9998], vec![1e-4, 1e-4])
            .unwrap();
        let mut buf = Vec::new();
        write_light_curve(&mut buf, &lc).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().next(), Some("-0.01,1,0.0001"));

        let back = read_light_curve(text.as_bytes()).unwrap();
        assert_eq!(back.flux(), lc.flux());
    }
}
