//! Loss-coefficient methods.
//!
//! Every method reduces to a dimensionless K multiplying one velocity head
//! (ρV²/2). The engine never branches on the method: it hands over a
//! [`ResolveContext`] and receives a K.

use pf_core::Reference;
use serde::{Deserialize, Serialize};

use crate::error::{FittingError, FittingResult};

const MM_PER_INCH: f64 = 25.4;

/// How a fitting's K is obtained.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LossMethod {
    /// Fixed tabulated K.
    TabulatedK { k: f64 },
    /// Darby 3-K: `K = k1/Re + k_inf·(1 + k_d / D_in^0.3)`, D in inches.
    ThreeK { k1: f64, k_inf: f64, k_d: f64 },
    /// Crane equivalent length: `K = f_T · (L/D)`.
    EquivalentLength { l_over_d: f64 },
    /// Pipe entrance or exit constant.
    EntranceExit { k: f64 },
}

/// Discriminant of [`LossMethod`] carried in results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LossMethodKind {
    TabulatedK,
    ThreeK,
    EquivalentLength,
    EntranceExit,
}

impl LossMethod {
    pub fn kind(&self) -> LossMethodKind {
        match self {
            Self::TabulatedK { .. } => LossMethodKind::TabulatedK,
            Self::ThreeK { .. } => LossMethodKind::ThreeK,
            Self::EquivalentLength { .. } => LossMethodKind::EquivalentLength,
            Self::EntranceExit { .. } => LossMethodKind::EntranceExit,
        }
    }

    /// True when resolving needs the fully turbulent friction factor.
    pub fn needs_fully_turbulent(&self) -> bool {
        matches!(self, Self::EquivalentLength { .. })
    }

    /// Coefficients as (name, value) pairs, for validation.
    pub(crate) fn coefficients(&self) -> Vec<(&'static str, f64)> {
        match *self {
            Self::TabulatedK { k } | Self::EntranceExit { k } => vec![("k", k)],
            Self::ThreeK { k1, k_inf, k_d } => vec![("k1", k1), ("k_inf", k_inf), ("k_d", k_d)],
            Self::EquivalentLength { l_over_d } => vec![("l_over_d", l_over_d)],
        }
    }
}

/// Flow conditions a coefficient may depend on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolveContext {
    /// Segment Reynolds number (0 for a segment at rest).
    pub reynolds: f64,
    /// Pipe internal diameter [mm].
    pub internal_diameter_mm: f64,
    /// Fully turbulent friction factor f_T, when already computed.
    pub fully_turbulent: Option<f64>,
}

/// A fitting's K together with its citation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedCoefficient {
    pub fitting_id: String,
    pub k: f64,
    pub method: LossMethodKind,
    pub reference: Reference,
}

pub(crate) fn resolve_k(id: &str, method: &LossMethod, ctx: &ResolveContext) -> FittingResult<f64> {
    let k = match *method {
        LossMethod::TabulatedK { k } | LossMethod::EntranceExit { k } => k,
        LossMethod::ThreeK { k1, k_inf, k_d } => {
            if ctx.internal_diameter_mm <= 0.0 {
                return Err(FittingError::Malformed {
                    id: id.to_string(),
                    reason: "3-K method needs a positive internal diameter".into(),
                });
            }
            let d_in = ctx.internal_diameter_mm / MM_PER_INCH;
            // A fluid at rest has no laminar contribution.
            let laminar = if ctx.reynolds > 0.0 { k1 / ctx.reynolds } else { 0.0 };
            laminar + k_inf * (1.0 + k_d / d_in.powf(0.3))
        }
        LossMethod::EquivalentLength { l_over_d } => {
            let f_t = ctx
                .fully_turbulent
                .ok_or_else(|| FittingError::MissingFrictionFactor { id: id.to_string() })?;
            f_t * l_over_d
        }
    };
    Ok(k)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(re: f64, f_t: Option<f64>) -> ResolveContext {
        ResolveContext {
            reynolds: re,
            internal_diameter_mm: 52.5,
            fully_turbulent: f_t,
        }
    }

    #[test]
    fn tabulated_and_entrance_are_constant() {
        let m = LossMethod::TabulatedK { k: 2.0 };
        assert_eq!(resolve_k("x", &m, &ctx(1e3, None)).unwrap(), 2.0);
        assert_eq!(resolve_k("x", &m, &ctx(1e6, None)).unwrap(), 2.0);
        let e = LossMethod::EntranceExit { k: 1.0 };
        assert_eq!(resolve_k("exit", &e, &ctx(0.0, None)).unwrap(), 1.0);
    }

    #[test]
    fn three_k_matches_darby_form() {
        let m = LossMethod::ThreeK {
            k1: 800.0,
            k_inf: 0.091,
            k_d: 4.0,
        };
        let k = resolve_k("elbow", &m, &ctx(1e5, None)).unwrap();
        let d_in: f64 = 52.5 / 25.4;
        let expected = 800.0 / 1e5 + 0.091 * (1.0 + 4.0 / d_in.powf(0.3));
        assert!((k - expected).abs() < 1e-12);
    }

    #[test]
    fn three_k_at_rest_drops_laminar_term() {
        let m = LossMethod::ThreeK {
            k1: 800.0,
            k_inf: 0.091,
            k_d: 4.0,
        };
        let k = resolve_k("elbow", &m, &ctx(0.0, None)).unwrap();
        assert!(k.is_finite());
        assert!(k > 0.091);
    }

    #[test]
    fn equivalent_length_needs_f_t() {
        let m = LossMethod::EquivalentLength { l_over_d: 30.0 };
        assert!(matches!(
            resolve_k("elbow", &m, &ctx(1e5, None)),
            Err(FittingError::MissingFrictionFactor { .. })
        ));
        let k = resolve_k("elbow", &m, &ctx(1e5, Some(0.019))).unwrap();
        assert!((k - 0.57).abs() < 1e-12);
        assert!(m.needs_fully_turbulent());
    }

    #[test]
    fn method_serde_tagged() {
        let json = r#"{"type":"three_k","k1":500.0,"k_inf":0.086,"k_d":4.0}"#;
        let m: LossMethod = serde_json::from_str(json).unwrap();
        assert_eq!(m.kind(), LossMethodKind::ThreeK);
    }
}
