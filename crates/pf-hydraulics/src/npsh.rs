//! Net positive suction head.

use pf_core::units::{Density, Length, Pressure, m};
use serde::{Deserialize, Serialize};

use crate::straight_pipe::pressure_to_head;

/// NPSHa/NPSHr below this ratio is treated as a cavitation risk.
pub const MIN_NPSH_MARGIN_RATIO: f64 = 1.1;

/// `NPSHa = (P_atm − P_vapor)/(ρg) + suction static head − suction friction loss`.
///
/// Negative results are returned as-is.
pub fn npsh_available(
    atmospheric_pressure: Pressure,
    vapor_pressure: Pressure,
    density: Density,
    suction_static_head: Length,
    suction_friction_loss: Length,
) -> Length {
    let pressure_head = pressure_to_head(atmospheric_pressure - vapor_pressure, density);
    m(pressure_head.value + suction_static_head.value - suction_friction_loss.value)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NpshAssessment {
    pub available: Length,
    pub required: Length,
    /// available − required
    pub margin: Length,
    /// available / required; `None` when NPSHr is not positive
    pub ratio: Option<f64>,
    pub cavitation_risk: bool,
}

pub fn assess_npsh(available: Length, required: Length) -> NpshAssessment {
    let margin = m(available.value - required.value);
    let ratio = (required.value > 0.0).then(|| available.value / required.value);
    let cavitation_risk = margin.value < 0.0 || ratio.is_some_and(|r| r < MIN_NPSH_MARGIN_RATIO);
    NpshAssessment {
        available,
        required,
        margin,
        ratio,
        cavitation_risk,
    }
}
