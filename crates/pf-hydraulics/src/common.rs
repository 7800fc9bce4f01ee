//! Common utilities for hydraulic calculations.

use crate::error::{HydraulicsError, HydraulicsResult};
use pf_core::PfError;
use pf_core::numeric::{ensure_finite, ensure_non_negative, ensure_positive};
use pf_core::units::constants::G0_MPS2;

/// Ensure a value is finite, returning HydraulicsError if not.
pub fn check_finite(value: f64, what: &'static str) -> HydraulicsResult<f64> {
    ensure_finite(value, what).map_err(|_| HydraulicsError::NonPhysical { what })
}

fn sign_error(err: PfError, what: &'static str) -> HydraulicsError {
    match err {
        PfError::NonFinite { .. } => HydraulicsError::NonPhysical { what },
        _ => HydraulicsError::InvalidArg { what },
    }
}

/// Finite and strictly positive.
pub fn check_positive(value: f64, what: &'static str) -> HydraulicsResult<f64> {
    ensure_positive(value, what).map_err(|e| sign_error(e, what))
}

/// Finite and not negative.
pub fn check_non_negative(value: f64, what: &'static str) -> HydraulicsResult<f64> {
    ensure_non_negative(value, what).map_err(|e| sign_error(e, what))
}

/// Specific weight ρg [N/m³].
pub fn specific_weight(density_kg_m3: f64) -> f64 {
    density_kg_m3 * G0_MPS2
}
