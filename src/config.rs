//! Immutable per-target configuration.
//!
//! Everything a vetting run needs to know about its target (identity,
//! ephemeris, catalog values, processing choices) lives in one struct that is
//! loaded once, usually from a TOML file, and passed by reference.

use crate::data_access::DEFAULT_CLIP_SIGMA;
use crate::error::{Result, VettingError};
use crate::stellar::CatalogStellarParameters;
use crate::vetting::model_comparison::ModelEvidence;
use crate::vetting::stellar_density::a_over_r_from_au;
use crate::vetting::TransitSignal;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VettingConfig {
    pub target: TargetIdentity,
    pub signal: TransitSignal,
    #[serde(default)]
    pub star: CatalogStellarParameters,
    #[serde(default)]
    pub density: DensitySettings,
    #[serde(default)]
    pub processing: ProcessingSettings,
    /// Evidences from an external planet-vs-binary fit, if one was run
    #[serde(default)]
    pub model_comparison: Option<ModelEvidence>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetIdentity {
    pub name: String,
    #[serde(default)]
    pub tic_id: Option<u64>,
}

/// How to obtain a/R* for the density check. `a_over_r` wins over `a_au`;
/// with neither, a/R* comes from Kepler's law.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DensitySettings {
    #[serde(default)]
    pub a_over_r: Option<f64>,
    #[serde(default)]
    pub a_au: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProcessingSettings {
    #[serde(default = "default_clip_sigma")]
    pub clip_sigma: f64,
    #[serde(default = "default_odd_even_bin_minutes")]
    pub odd_even_bin_minutes: f64,
    #[serde(default = "default_plot_bin_days")]
    pub plot_bin_days: f64,
    #[serde(default = "default_export_bin_minutes")]
    pub export_bin_minutes: f64,
}

fn default_clip_sigma() -> f64 {
    DEFAULT_CLIP_SIGMA
}

fn default_odd_even_bin_minutes() -> f64 {
    10.0
}

fn default_plot_bin_days() -> f64 {
    0.005
}

fn default_export_bin_minutes() -> f64 {
    5.0
}

impl Default for ProcessingSettings {
    fn default() -> Self {
        ProcessingSettings {
            clip_sigma: default_clip_sigma(),
            odd_even_bin_minutes: default_odd_even_bin_minutes(),
            plot_bin_days: default_plot_bin_days(),
            export_bin_minutes: default_export_bin_minutes(),
        }
    }
}

impl DensitySettings {
    /// Resolve a/R* for a star of `radius` solar radii, if configured.
    pub fn a_over_r(&self, radius: f64) -> Option<f64> {
        self.a_over_r
            .or_else(|| self.a_au.map(|a| a_over_r_from_au(a, radius)))
    }
}

impl VettingConfig {
    /// TOI 864.01 (TIC 231728511) as analysed with TESS SPOC data.
    pub fn toi_864_01() -> VettingConfig {
        VettingConfig {
            target: TargetIdentity {
                name: "TOI 864.01".to_string(),
                tic_id: Some(231728511),
            },
            signal: TransitSignal {
                period_days: 0.520667,
                epoch: 1411.1454,
                duration_hours: 1.0,
                depth_ppm: Some(158.0),
            },
            star: CatalogStellarParameters {
                radius: Some(0.399),
                mass: Some(0.380),
                teff: None,
            },
            density: DensitySettings {
                a_over_r: None,
                a_au: Some(0.0093),
            },
            processing: ProcessingSettings::default(),
            model_comparison: None,
        }
    }

    pub fn from_toml_str(content: &str) -> Result<VettingConfig> {
        let config: VettingConfig =
            toml::from_str(content).map_err(|e| VettingError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<VettingConfig> {
        let content = fs::read_to_string(path).map_err(|e| {
            VettingError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        let positive = |name: &str, v: f64| -> Result<()> {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(VettingError::Config(format!("{name} must be positive, got {v}")))
            }
        };
        positive("signal.period_days", self.signal.period_days)?;
        positive("signal.duration_hours", self.signal.duration_hours)?;
        positive("processing.clip_sigma", self.processing.clip_sigma)?;
        positive("processing.odd_even_bin_minutes", self.processing.odd_even_bin_minutes)?;
        positive("processing.plot_bin_days", self.processing.plot_bin_days)?;
        positive("processing.export_bin_minutes", self.processing.export_bin_minutes)?;
        if !self.signal.epoch.is_finite() {
            return Err(VettingError::Config("signal.epoch must be finite".to_string()));
        }
        if self.signal.duration_days() >= self.signal.period_days {
            return Err(VettingError::Config(
                "transit duration must be shorter than the period".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
pub mod test {
    use super::*;

    #[test]
    fn parses_minimal_config_with_defaults() {
        let toml = r#"
            [target]
            name = "TOI 864.01"

            [signal]
            period_days = 0.52067
            epoch = 1411.1454
            duration_hours = 1.0
        "#;
        let config = VettingConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.target.tic_id, None);
        assert_eq!(config.signal.depth_ppm, None);
        assert_eq!(config.star, CatalogStellarParameters::default());
        assert_eq!(config.processing, ProcessingSettings::default());
        assert_eq!(config.processing.odd_even_bin_minutes, 10.0);
        assert!(config.model_comparison.is_none());
    }

    #[test]
    fn parses_full_config() {
        let toml = r#"
            [target]
            name = "TOI 864.01"
            tic_id = 231728511

            [signal]
            period_days = 0.520667
            epoch = 1411.1454
            duration_hours = 1.0
            depth_ppm = 158.0

            [star]
            radius = 0.399
            mass = 0.380

            [density]
            a_au = 0.0093

            [processing]
            clip_sigma = 4.0

            [model_comparison]
            ln_z_planet = 1520.3
            ln_z_binary = 1514.1
        "#;
        let config = VettingConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.target.tic_id, Some(231728511));
        assert_eq!(config.star.teff, None);
        assert_eq!(config.processing.clip_sigma, 4.0);
        assert_eq!(config.processing.plot_bin_days, 0.005);
        let a_over_r = config.density.a_over_r(0.399).unwrap();
        assert!((a_over_r - 5.012).abs() < 1e-3);
        assert!(config.model_comparison.is_some());
    }

    #[test]
    fn rejects_bad_ephemeris() {
        let toml = r#"
            [target]
            name = "bad"

            [signal]
            period_days = -1.0
            epoch = 0.0
            duration_hours = 1.0
        "#;
        assert!(matches!(
            VettingConfig::from_toml_str(toml),
            Err(VettingError::Config(_))
        ));

        let mut config = VettingConfig::toi_864_01();
        config.signal.duration_hours = 24.0;
        assert!(config.validate().is_err());
        assert!(VettingConfig::toi_864_01().validate().is_ok());
    }

    #[test]
    fn reads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("toi864.toml");
        let text = toml::to_string(&VettingConfig::toi_864_01()).unwrap();
        std::fs::write(&path, text).unwrap();
        let config = VettingConfig::from_file(&path).unwrap();
        assert_eq!(config, VettingConfig::toi_864_01());

        assert!(VettingConfig::from_file(&dir.path().join("missing.toml")).is_err());
    }

    #[test]
    fn shipped_config_matches_builtin_target() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("configs").join("toi_864_01.toml");
        assert_eq!(VettingConfig::from_file(&path).unwrap(), VettingConfig::toi_864_01());
    }
}
