use crate::error::{Result, VettingError};
use crate::light_curve::LightCurveSample;
use fitsio::FitsFile;
use std::path::Path;

struct TessColumns {
    time: Vec<f64>,
    flux: Vec<f64>,
    flux_err: Vec<f64>,
    qual: Vec<i32>,
    centroids: Option<(Vec<f64>, Vec<f64>)>,
}

fn get_fits_ptr(path: &Path) -> Result<FitsFile> {
    if path.extension().and_then(|ext| ext.to_str()) != Some("fits") {
        return Err(VettingError::UnsupportedFile(path.display().to_string()));
    }
    Ok(FitsFile::open(path)?)
}

fn load_tess_data(fptr: &mut FitsFile) -> Result<TessColumns> {
    let hdu = fptr.hdu(1)?;
    let time: Vec<f64> = hdu.read_col(fptr, "TIME")?;
    let flux: Vec<f64> = hdu.read_col(fptr, "PDCSAP_FLUX")?;
    let flux_err: Vec<f64> = hdu.read_col(fptr, "PDCSAP_FLUX_ERR")?;
    let qual: Vec<i32> = hdu.read_col(fptr, "QUALITY")?;

    // SPOC files carry flux-weighted centroids; older products may not
    let col: Option<Vec<f64>> = hdu.read_col(fptr, "MOM_CENTR1").ok();
    let row: Option<Vec<f64>> = hdu.read_col(fptr, "MOM_CENTR2").ok();

    Ok(TessColumns {
        time,
        flux,
        flux_err,
        qual,
        centroids: col.zip(row),
    })
}

fn filter_and_sort_tess_data(cols: TessColumns) -> Result<LightCurveSample> {
    let n = cols.time.len();
    if cols.flux.len() != n || cols.flux_err.len() != n || cols.qual.len() != n {
        return Err(VettingError::InvalidSample(
            "TESS columns have different lengths".to_string(),
        ));
    }
    let good_indices: Vec<usize> = (0..n)
        .filter(|&i| cols.qual[i] == 0 && cols.time[i].is_finite() && cols.flux[i].is_finite())
        .collect();

    let lc = LightCurveSample::new(cols.time, cols.flux, cols.flux_err)?;
    let lc = match cols.centroids {
        Some((col, row)) if col.len() == n && row.len() == n => lc.with_centroids(col, row)?,
        _ => lc,
    };
    Ok(lc.gather(&good_indices).sorted_by_time())
}

/// Quality-filtered, time-sorted PDCSAP photometry from a TESS SPOC `_lc.fits` file.
pub fn read_light_curve_file(path: &Path) -> Result<LightCurveSample> {
    let mut fptr = get_fits_ptr(path)?;
    let cols = load_tess_data(&mut fptr)?;
    filter_and_sort_tess_data(cols)
}
