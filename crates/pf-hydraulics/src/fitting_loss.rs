//! Fitting loss aggregation.
//!
//! All fittings in a segment see the segment velocity:
//! `dP_fittings = Σ(K_i · n_i) · ρV²/2`.

use pf_core::Reference;
use pf_core::units::{Density, Length, Pressure, Velocity, pa};
use pf_fittings::{LossMethodKind, ResolvedCoefficient};
use serde::{Deserialize, Serialize};

use crate::straight_pipe::{pressure_to_head, velocity_head};

/// Breakdown entry for one fitting instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittingLoss {
    pub fitting_id: String,
    pub quantity: u32,
    /// Resolved loss coefficient for a single fitting
    pub k: f64,
    pub method: LossMethodKind,
    pub dp: Pressure,
    pub head: Length,
    pub reference: Reference,
}

/// Per-instance breakdown plus the summed pressure loss.
pub fn aggregate_fitting_losses(
    resolved: &[(ResolvedCoefficient, u32)],
    density: Density,
    velocity: Velocity,
) -> (Vec<FittingLoss>, Pressure) {
    let vh = velocity_head(density, velocity).value;

    let breakdown = resolved
        .iter()
        .map(|(coef, quantity)| {
            let dp = pa(coef.k * f64::from(*quantity) * vh);
            FittingLoss {
                fitting_id: coef.fitting_id.clone(),
                quantity: *quantity,
                k: coef.k,
                method: coef.method,
                dp,
                head: pressure_to_head(dp, density),
                reference: coef.reference.clone(),
            }
        })
        .collect();

    let k_total: f64 = resolved
        .iter()
        .map(|(coef, quantity)| coef.k * f64::from(*quantity))
        .sum();

    (breakdown, pa(k_total * vh))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pf_core::units::{kg_per_m3, mps};

    fn coef(id: &str, k: f64) -> ResolvedCoefficient {
        ResolvedCoefficient {
            fitting_id: id.into(),
            k,
            method: LossMethodKind::EntranceExit,
            reference: Reference::new("Crane TP-410").with_page("A-30"),
        }
    }

    #[test]
    fn entrance_and_exit() {
        let resolved = vec![(coef("entrance", 0.5), 1), (coef("exit", 1.0), 1)];
        let (items, total) = aggregate_fitting_losses(&resolved, kg_per_m3(998.2), mps(1.283));
        assert_eq!(items.len(), 2);
        let expected = 1.5 * 0.5 * 998.2 * 1.283 * 1.283;
        assert!((total.value - expected).abs() < 1e-9);
        assert!(total.value > 1000.0 && total.value < 1500.0);
    }

    #[test]
    fn quantity_multiplies_k() {
        let resolved = vec![(coef("elbow", 0.3), 4)];
        let (items, total) = aggregate_fitting_losses(&resolved, kg_per_m3(1000.0), mps(2.0));
        assert!((total.value - 0.3 * 4.0 * 2000.0).abs() < 1e-9);
        assert_eq!(items[0].quantity, 4);
        assert_eq!(items[0].dp, total);
    }

    #[test]
    fn repeated_type_keeps_separate_entries() {
        let resolved = vec![(coef("elbow", 0.3), 2), (coef("elbow", 0.3), 1)];
        let (items, _) = aggregate_fitting_losses(&resolved, kg_per_m3(1000.0), mps(1.0));
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn zero_quantity_and_zero_velocity() {
        let resolved = vec![(coef("valve", 5.0), 0)];
        let (items, total) = aggregate_fitting_losses(&resolved, kg_per_m3(1000.0), mps(1.0));
        assert_eq!(total.value, 0.0);
        assert_eq!(items[0].dp.value, 0.0);

        let resolved = vec![(coef("valve", 5.0), 3)];
        let (_, total) = aggregate_fitting_losses(&resolved, kg_per_m3(1000.0), mps(0.0));
        assert_eq!(total.value, 0.0);
    }
}
