//! Darcy friction factor.
//!
//! - Laminar (`Re < 2300`): `f = 64/Re`, exact.
//! - Otherwise: Churchill (1977), a single explicit expression spanning the
//!   laminar, transitional and turbulent regimes. This is the default.
//! - Swamee–Jain (1976) is available as an explicit alternative inside its
//!   validity domain (`4000 ≤ Re ≤ 1e8`, `1e-6 ≤ ε/D ≤ 1e-2`).
//! - The fully turbulent factor f_T (Re-independent) serves as the reference
//!   friction factor for equivalent-length fitting coefficients.

use pf_core::Reference;
use serde::{Deserialize, Serialize};

use crate::common::check_finite;
use crate::error::{HydraulicsError, HydraulicsResult};

/// Upper Reynolds number of the laminar regime.
pub const LAMINAR_LIMIT: f64 = 2300.0;
/// Lower Reynolds number of the turbulent regime.
pub const TURBULENT_LIMIT: f64 = 4000.0;

const SWAMEE_JAIN_RE: (f64, f64) = (4000.0, 1e8);
const SWAMEE_JAIN_RR: (f64, f64) = (1e-6, 1e-2);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowRegime {
    Laminar,
    Transitional,
    Turbulent,
}

impl FlowRegime {
    pub fn classify(reynolds: f64) -> Self {
        if reynolds < LAMINAR_LIMIT {
            Self::Laminar
        } else if reynolds < TURBULENT_LIMIT {
            Self::Transitional
        } else {
            Self::Turbulent
        }
    }
}

/// Which formula produced a friction factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FrictionMethod {
    #[serde(rename = "laminar")]
    Laminar,
    #[serde(rename = "churchill")]
    Churchill,
    #[serde(rename = "swamee-jain")]
    SwameeJain,
    #[serde(rename = "fully-turbulent")]
    FullyTurbulent,
}

impl FrictionMethod {
    pub fn tag(self) -> &'static str {
        match self {
            Self::Laminar => "laminar",
            Self::Churchill => "churchill",
            Self::SwameeJain => "swamee-jain",
            Self::FullyTurbulent => "fully-turbulent",
        }
    }

    pub fn reference(self) -> Reference {
        match self {
            Self::Laminar => Reference::new("Hagen-Poiseuille law for fully developed laminar flow")
                .with_equation("f = 64/Re"),
            Self::Churchill => Reference::new(
                "Churchill, S.W., Friction-factor equation spans all fluid-flow regimes, Chemical Engineering 84(24), 1977",
            )
            .with_page("91"),
            Self::SwameeJain => Reference::new(
                "Swamee, P.K. and Jain, A.K., Explicit equations for pipe-flow problems, J. Hydraulics Division ASCE 102(5), 1976",
            )
            .with_page("657"),
            Self::FullyTurbulent => Reference::new(
                "Crane Co., Flow of Fluids Through Valves, Fittings, and Pipe, Technical Paper No. 410",
            )
            .with_page("A-26")
            .with_equation("f_T"),
        }
    }
}

/// Correlation to use outside the laminar regime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Correlation {
    #[default]
    Churchill,
    SwameeJain,
}

/// A resolved Darcy friction factor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrictionFactor {
    pub f: f64,
    pub regime: FlowRegime,
    pub method: FrictionMethod,
    /// ε/D
    pub relative_roughness: f64,
    pub reference: Reference,
}

/// ε/D from roughness and internal diameter, both in mm.
pub fn relative_roughness(roughness_mm: f64, id_mm: f64) -> HydraulicsResult<f64> {
    check_finite(roughness_mm, "roughness")?;
    check_finite(id_mm, "internal diameter")?;
    if id_mm <= 0.0 {
        return Err(HydraulicsError::InvalidArg {
            what: "internal diameter must be positive",
        });
    }
    if roughness_mm < 0.0 {
        return Err(HydraulicsError::InvalidRoughness {
            value: roughness_mm,
        });
    }
    Ok(roughness_mm / id_mm)
}

fn check_reynolds(re: f64) -> HydraulicsResult<()> {
    if !re.is_finite() || re <= 0.0 {
        return Err(HydraulicsError::InvalidReynoldsNumber { value: re });
    }
    Ok(())
}

/// Friction factor with the default (Churchill) correlation.
pub fn friction_factor(re: f64, roughness_mm: f64, id_mm: f64) -> HydraulicsResult<FrictionFactor> {
    friction_factor_with(re, roughness_mm, id_mm, Correlation::Churchill)
}

/// Friction factor with an explicit correlation choice.
pub fn friction_factor_with(
    re: f64,
    roughness_mm: f64,
    id_mm: f64,
    correlation: Correlation,
) -> HydraulicsResult<FrictionFactor> {
    check_reynolds(re)?;
    let rr = relative_roughness(roughness_mm, id_mm)?;
    let regime = FlowRegime::classify(re);

    let (f, method) = if regime == FlowRegime::Laminar {
        (64.0 / re, FrictionMethod::Laminar)
    } else {
        match correlation {
            Correlation::Churchill => (churchill(re, rr), FrictionMethod::Churchill),
            Correlation::SwameeJain => (swamee_jain(re, rr)?, FrictionMethod::SwameeJain),
        }
    };
    check_finite(f, "friction factor")?;

    Ok(FrictionFactor {
        f,
        regime,
        method,
        relative_roughness: rr,
        reference: method.reference(),
    })
}

/// Churchill (1977) all-regime friction factor.
///
/// `f = 8·[(8/Re)^12 + (A + B)^-1.5]^(1/12)` with
/// `A = [2.457·ln(1 / ((7/Re)^0.9 + 0.27·ε/D))]^16` and `B = (37530/Re)^16`.
pub fn churchill(re: f64, rr: f64) -> f64 {
    let a = (2.457 * (1.0 / ((7.0 / re).powf(0.9) + 0.27 * rr)).ln()).powi(16);
    let b = (37_530.0 / re).powi(16);
    8.0 * ((8.0 / re).powi(12) + (a + b).powf(-1.5)).powf(1.0 / 12.0)
}

/// Swamee–Jain (1976) explicit approximation of Colebrook–White.
///
/// `f = 0.25 / [log10(ε/(3.7D) + 5.74/Re^0.9)]^2`; errors outside its domain.
/// A relative roughness of exactly zero (smooth pipe) is accepted.
pub fn swamee_jain(re: f64, rr: f64) -> HydraulicsResult<f64> {
    if !(SWAMEE_JAIN_RE.0..=SWAMEE_JAIN_RE.1).contains(&re) {
        return Err(HydraulicsError::CorrelationOutOfRange {
            correlation: "Swamee-Jain",
            what: "Reynolds number",
            value: re,
        });
    }
    if rr != 0.0 && !(SWAMEE_JAIN_RR.0..=SWAMEE_JAIN_RR.1).contains(&rr) {
        return Err(HydraulicsError::CorrelationOutOfRange {
            correlation: "Swamee-Jain",
            what: "relative roughness",
            value: rr,
        });
    }
    let log = (rr / 3.7 + 5.74 / re.powf(0.9)).log10();
    Ok(0.25 / (log * log))
}

/// Fully turbulent (rough-pipe) friction factor `f_T = 0.25 / [log10(ε/(3.7D))]^2`.
pub fn fully_turbulent(roughness_mm: f64, id_mm: f64) -> HydraulicsResult<FrictionFactor> {
    check_finite(roughness_mm, "roughness")?;
    if roughness_mm <= 0.0 {
        return Err(HydraulicsError::InvalidRoughness {
            value: roughness_mm,
        });
    }
    let rr = relative_roughness(roughness_mm, id_mm)?;
    let log = (rr / 3.7).log10();
    let f = check_finite(0.25 / (log * log), "fully turbulent friction factor")?;

    Ok(FrictionFactor {
        f,
        regime: FlowRegime::Turbulent,
        method: FrictionMethod::FullyTurbulent,
        relative_roughness: rr,
        reference: FrictionMethod::FullyTurbulent.reference(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // Commercial steel in a 2" Sch 40 pipe
    const EPS_MM: f64 = 0.045_72;
    const ID_MM: f64 = 52.5;

    #[test]
    fn laminar_is_exact() {
        let ff = friction_factor(1000.0, EPS_MM, ID_MM).unwrap();
        assert!((ff.f - 0.064).abs() < 1e-3);
        assert_eq!(ff.f, 64.0 / 1000.0);
        assert_eq!(ff.method, FrictionMethod::Laminar);
        assert_eq!(ff.method.tag(), "laminar");
        assert_eq!(ff.regime, FlowRegime::Laminar);
    }

    #[test]
    fn laminar_ignores_correlation_choice() {
        let a = friction_factor_with(500.0, EPS_MM, ID_MM, Correlation::SwameeJain).unwrap();
        assert_eq!(a.method, FrictionMethod::Laminar);
    }

    #[test]
    fn non_positive_reynolds_is_rejected() {
        for re in [0.0, -10.0, f64::NAN] {
            assert!(matches!(
                friction_factor(re, EPS_MM, ID_MM),
                Err(HydraulicsError::InvalidReynoldsNumber { .. })
            ));
        }
    }

    #[test]
    fn bad_geometry_is_rejected() {
        assert!(matches!(
            friction_factor(1e5, EPS_MM, 0.0),
            Err(HydraulicsError::InvalidArg { .. })
        ));
        assert!(matches!(
            friction_factor(1e5, -0.1, ID_MM),
            Err(HydraulicsError::InvalidRoughness { .. })
        ));
    }

    #[test]
    fn regime_classification() {
        assert_eq!(FlowRegime::classify(0.0), FlowRegime::Laminar);
        assert_eq!(FlowRegime::classify(2299.9), FlowRegime::Laminar);
        assert_eq!(FlowRegime::classify(2300.0), FlowRegime::Transitional);
        assert_eq!(FlowRegime::classify(3999.0), FlowRegime::Transitional);
        assert_eq!(FlowRegime::classify(4000.0), FlowRegime::Turbulent);
    }

    #[test]
    fn churchill_is_default_above_laminar() {
        let ff = friction_factor(67_100.0, EPS_MM, ID_MM).unwrap();
        assert_eq!(ff.method, FrictionMethod::Churchill);
        assert_eq!(ff.regime, FlowRegime::Turbulent);
        assert!(ff.f > 0.018 && ff.f < 0.028, "f = {}", ff.f);
        assert!(ff.reference.source.starts_with("Churchill"));
    }

    #[test]
    fn transitional_uses_churchill() {
        let ff = friction_factor(3000.0, EPS_MM, ID_MM).unwrap();
        assert_eq!(ff.regime, FlowRegime::Transitional);
        assert_eq!(ff.method, FrictionMethod::Churchill);
        assert!(ff.f.is_finite() && ff.f > 0.0);
    }

    #[test]
    fn swamee_jain_agrees_with_churchill() {
        for re in [5e3, 1e4, 5e4, 1e5, 1e6, 1e7, 1e8] {
            for rr in [0.0, 1e-6, 1e-5, 1e-4, 1e-3, 1e-2] {
                let sj = swamee_jain(re, rr).unwrap();
                let ch = churchill(re, rr);
                let rel = (sj - ch).abs() / ch;
                assert!(rel < 0.02, "Re={re}, rr={rr}: sj={sj}, churchill={ch}");
            }
        }
    }

    #[test]
    fn swamee_jain_outside_domain() {
        assert!(matches!(
            friction_factor_with(3000.0, EPS_MM, ID_MM, Correlation::SwameeJain),
            Err(HydraulicsError::CorrelationOutOfRange { what: "Reynolds number", .. })
        ));
        assert!(matches!(
            swamee_jain(1e5, 0.05),
            Err(HydraulicsError::CorrelationOutOfRange { what: "relative roughness", .. })
        ));
        let ff = friction_factor_with(1e5, EPS_MM, ID_MM, Correlation::SwameeJain).unwrap();
        assert_eq!(ff.method.tag(), "swamee-jain");
    }

    #[test]
    fn fully_turbulent_limit() {
        let f_t = fully_turbulent(EPS_MM, ID_MM).unwrap();
        let ff = friction_factor(1e7, EPS_MM, ID_MM).unwrap();
        assert!((ff.f - f_t.f).abs() < 1e-3, "f={}, f_T={}", ff.f, f_t.f);
        assert_eq!(f_t.method, FrictionMethod::FullyTurbulent);
        assert_eq!(f_t.reference.page.as_deref(), Some("A-26"));
    }

    #[test]
    fn fully_turbulent_needs_roughness() {
        assert!(matches!(
            fully_turbulent(0.0, ID_MM),
            Err(HydraulicsError::InvalidRoughness { .. })
        ));
        assert!(matches!(
            fully_turbulent(-1.0, ID_MM),
            Err(HydraulicsError::InvalidRoughness { .. })
        ));
    }

    #[test]
    fn smooth_pipe_turbulent_is_allowed() {
        let ff = friction_factor(1e5, 0.0, ID_MM).unwrap();
        // Blasius: 0.316 / Re^0.25 ≈ 0.0178
        assert!((ff.f - 0.0178).abs() < 0.001, "f = {}", ff.f);
    }

    #[test]
    fn monotone_in_turbulent_branch() {
        for rr in [1e-6, 1e-5, 1e-4, 1e-3, 5e-3, 1e-2] {
            let mut re = TURBULENT_LIMIT;
            let mut prev = churchill(re, rr);
            while re < 1e8 {
                re *= 1.25;
                let f = churchill(re, rr);
                assert!(f <= prev + 1e-12, "rr={rr}, Re={re}: {f} > {prev}");
                prev = f;
            }
        }
    }
}
