use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Bayesian evidences (ln Z) from fitting a planet and an eclipsing-binary
/// model to the same folded light curve. The nested sampling itself runs
/// outside this crate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelEvidence {
    pub ln_z_planet: f64,
    pub ln_z_binary: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Preference {
    Strong,
    Moderate,
    Weak,
    Inconclusive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FavouredModel {
    Planet,
    EclipsingBinary,
    Neither,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ModelComparison {
    pub delta_ln_z: f64,
    pub favoured: FavouredModel,
    pub preference: Preference,
}

// Jeffreys-scale cut points on |delta ln Z|
const STRONG: f64 = 5.0;
const MODERATE: f64 = 2.5;
const WEAK: f64 = 1.0;

pub fn compare_models(evidence: &ModelEvidence) -> ModelComparison {
    let delta = evidence.ln_z_planet - evidence.ln_z_binary;
    let magnitude = delta.abs();
    let preference = if magnitude > STRONG {
        Preference::Strong
    } else if magnitude > MODERATE {
        Preference::Moderate
    } else if magnitude > WEAK {
        Preference::Weak
    } else {
        Preference::Inconclusive
    };
    let favoured = match preference {
        Preference::Inconclusive => FavouredModel::Neither,
        _ if delta > 0.0 => FavouredModel::Planet,
        _ => FavouredModel::EclipsingBinary,
    };
    ModelComparison {
        delta_ln_z: delta,
        favoured,
        preference,
    }
}

impl Display for ModelComparison {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let strength = match self.preference {
            Preference::Strong => "strong",
            Preference::Moderate => "moderate",
            Preference::Weak => "weak",
            Preference::Inconclusive => "no",
        };
        let model = match self.favoured {
            FavouredModel::Planet => "planet model",
            FavouredModel::EclipsingBinary => "eclipsing-binary model",
            FavouredModel::Neither => "either model",
        };
        write!(f, "delta lnZ = {:.2} ({} preference for {})", self.delta_ln_z, strength, model)
    }
}

#[cfg(test)]
pub mod test {
    use super::*;

    fn compare(p: f64, b: f64) -> ModelComparison {
        compare_models(&ModelEvidence {
            ln_z_planet: p,
            ln_z_binary: b,
        })
    }

    #[test]
    fn bands() {
        let c = compare(120.0, 110.0);
        assert_eq!((c.favoured, c.preference), (FavouredModel::Planet, Preference::Strong));
        assert_eq!(compare(103.0, 100.0).preference, Preference::Moderate);
        assert_eq!(compare(101.5, 100.0).preference, Preference::Weak);

        let c = compare(100.0, 100.5);
        assert_eq!((c.favoured, c.preference), (FavouredModel::Neither, Preference::Inconclusive));

        let c = compare(100.0, 106.0);
        assert_eq!(c.favoured, FavouredModel::EclipsingBinary);
        assert!(c.to_string().starts_with("delta lnZ = -6.00"));
    }
}
