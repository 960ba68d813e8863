use crate::error::{Result, TransitWindow, VettingError};
use crate::statistical_methods::statistics::count_finite;
use log::debug;

/// In-transit half-width for the SNR and phase-0.5 checks, in units of the
/// transit duration (|phase| < 0.5 * duration).
pub const SNR_IN_TRANSIT_DURATIONS: f64 = 0.5;

/// Out-of-transit cut for the SNR and phase-0.5 checks, in units of the
/// transit duration (|phase| > 2.0 * duration).
pub const SNR_OUT_OF_TRANSIT_DURATIONS: f64 = 2.0;

/// Odd/even check windows on binned data, in days from mid-transit.
pub const ODD_EVEN_IN_TRANSIT_DAYS: f64 = 0.02;
pub const ODD_EVEN_OUT_OF_TRANSIT_DAYS: f64 = 0.03;

/// Partition of folded samples into in-transit and out-of-transit sets.
///
/// Points with `in_limit <= |phase| <= out_limit` belong to neither set, so
/// ingress and egress never leak into the baseline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitWindowMask {
    in_limit: f64,
    out_limit: f64,
}

impl TransitWindowMask {
    pub fn new(in_limit: f64, out_limit: f64) -> Result<TransitWindowMask> {
        let valid = in_limit.is_finite() && in_limit > 0.0 && out_limit.is_finite();
        if !valid || out_limit <= in_limit {
            return Err(VettingError::Config(format!(
                "transit windows overlap or are invalid: in < {in_limit}, out > {out_limit}"
            )));
        }
        Ok(TransitWindowMask { in_limit, out_limit })
    }

    /// Windows scaled by the transit duration. `duration` must be in the
    /// same unit as the phases the mask is applied to.
    pub fn from_duration(
        duration: f64,
        in_multiple: f64,
        out_multiple: f64,
    ) -> Result<TransitWindowMask> {
        Self::new(duration * in_multiple, duration * out_multiple)
    }

    pub fn is_in_transit(&self, phase: f64) -> bool {
        phase.abs() < self.in_limit
    }

    pub fn is_out_of_transit(&self, phase: f64) -> bool {
        phase.abs() > self.out_limit
    }

    /// Split `values` by the phase of each point.
    pub fn split(&self, phases: &[f64], values: &[f64]) -> WindowedValues {
        let mut inside = Vec::new();
        let mut outside = Vec::new();
        for (&p, &v) in phases.iter().zip(values) {
            if self.is_in_transit(p) {
                inside.push(v);
            } else if self.is_out_of_transit(p) {
                outside.push(v);
            }
        }
        WindowedValues { inside, outside }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WindowedValues {
    pub inside: Vec<f64>,
    pub outside: Vec<f64>,
}

impl WindowedValues {
    /// Fail when either side has no finite values.
    pub fn require_both(self, check: &'static str) -> Result<WindowedValues> {
        let n_in = count_finite(&self.inside);
        let n_out = count_finite(&self.outside);
        debug!("{check}: {n_in} in-transit, {n_out} out-of-transit points");
        if n_in == 0 {
            return Err(VettingError::InsufficientData {
                check,
                window: TransitWindow::InTransit,
            });
        }
        if n_out == 0 {
            return Err(VettingError::InsufficientData {
                check,
                window: TransitWindow::OutOfTransit,
            });
        }
        Ok(self)
    }
}
