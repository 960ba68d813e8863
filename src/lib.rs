pub mod characterization;
pub mod config;
pub mod constants;
pub mod data_access;
pub mod error;
pub mod light_curve;
pub mod pipeline;
pub mod plotting;
pub mod report;
pub mod statistical_methods;
pub mod stellar;
pub mod vetting;

pub use config::VettingConfig;
pub use error::{Result, VettingError};
pub use light_curve::LightCurveSample;
pub use pipeline::{run_vetting, VettingReport, VettingResult};
