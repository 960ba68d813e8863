use std::fmt;
use thiserror::Error;

/// Fatal errors for one vetting run.
#[derive(Debug, Error)]
pub enum VettingError {
    #[error("insufficient data for {check}: {window} window selects no points")]
    InsufficientData {
        check: &'static str,
        window: TransitWindow,
    },

    #[error("out-of-transit scatter is zero for {check}, SNR is undefined")]
    DegenerateNoise { check: &'static str },

    #[error("light curve retrieval failed: {0}")]
    UpstreamRetrieval(String),

    #[error("invalid light curve sample: {0}")]
    InvalidSample(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("not a supported light curve file: {0}")]
    UnsupportedFile(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("plotting error: {0}")]
    Plot(String),

    #[cfg(feature = "fits")]
    #[error("FITS error: {0}")]
    Fits(#[from] fitsio::errors::Error),
}

pub type Result<T> = std::result::Result<T, VettingError>;

/// Which side of a transit window came up empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitWindow {
    InTransit,
    OutOfTransit,
}

impl fmt::Display for TransitWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransitWindow::InTransit => write!(f, "in-transit"),
            TransitWindow::OutOfTransit => write!(f, "out-of-transit"),
        }
    }
}

/// A catalog field that was missing and replaced by its solar default.
///
/// Not fatal: the run continues with the substituted value, but every
/// substitution is kept so it can be reported.
#[derive(Debug, Clone, PartialEq, Error, serde::Serialize)]
#[error("stellar {field} missing from catalog, substituted solar default {default}")]
pub struct MissingStellarParameter {
    pub field: &'static str,
    pub default: f64,
}
