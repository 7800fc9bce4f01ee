//! Darcy–Weisbach straight-pipe loss and pressure ↔ head conversion.

use pf_core::units::{Density, Length, Pressure, Velocity, m, pa};

use crate::common::{check_finite, check_non_negative, check_positive, specific_weight};
use crate::error::HydraulicsResult;

/// Velocity head ρV²/2.
pub fn velocity_head(density: Density, velocity: Velocity) -> Pressure {
    if velocity.value == 0.0 {
        return pa(0.0);
    }
    pa(0.5 * density.value * velocity.value * velocity.value)
}

/// Straight-pipe pressure loss `dP = f·(L/D)·(ρV²/2)`.
///
/// Zero length or zero velocity yields exactly zero.
pub fn straight_pipe_loss(
    f: f64,
    length: Length,
    diameter: Length,
    density: Density,
    velocity: Velocity,
) -> HydraulicsResult<Pressure> {
    check_non_negative(length.value, "pipe length")?;
    check_finite(velocity.value, "velocity")?;
    if length.value == 0.0 || velocity.value == 0.0 {
        return Ok(pa(0.0));
    }
    check_non_negative(f, "friction factor")?;
    check_positive(diameter.value, "internal diameter")?;
    check_positive(density.value, "density")?;

    let dp = f * (length.value / diameter.value) * velocity_head(density, velocity).value;
    Ok(pa(check_finite(dp, "pressure drop")?))
}

/// `h = dP/(ρg)`.
pub fn pressure_to_head(dp: Pressure, density: Density) -> Length {
    m(dp.value / specific_weight(density.value))
}

/// `dP = ρgh`.
pub fn head_to_pressure(head: Length, density: Density) -> Pressure {
    pa(specific_weight(density.value) * head.value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pf_core::units::{kg_per_m3, mm, mps};

    #[test]
    fn zero_length_is_exactly_zero() {
        let dp = straight_pipe_loss(0.02, m(0.0), mm(52.5), kg_per_m3(998.2), mps(1.3)).unwrap();
        assert_eq!(dp.value, 0.0);
    }

    #[test]
    fn zero_velocity_is_exactly_zero() {
        let dp = straight_pipe_loss(0.02, m(50.0), mm(52.5), kg_per_m3(998.2), mps(0.0)).unwrap();
        assert_eq!(dp.value, 0.0);
    }

    #[test]
    fn darcy_weisbach_value() {
        let dp = straight_pipe_loss(0.02, m(10.0), m(0.05), kg_per_m3(1000.0), mps(2.0)).unwrap();
        // 0.02 · 200 · 2000
        assert!((dp.value - 8000.0).abs() < 1e-9);
    }

    #[test]
    fn rejects_bad_arguments() {
        assert!(straight_pipe_loss(0.02, m(-1.0), m(0.05), kg_per_m3(1000.0), mps(1.0)).is_err());
        assert!(straight_pipe_loss(0.02, m(1.0), m(0.0), kg_per_m3(1000.0), mps(1.0)).is_err());
        assert!(straight_pipe_loss(0.02, m(1.0), m(0.05), kg_per_m3(0.0), mps(1.0)).is_err());
    }

    #[test]
    fn head_of_one_bar_of_water() {
        let h = pressure_to_head(pa(1e5), kg_per_m3(1000.0));
        assert!((h.value - 10.197_16).abs() < 1e-4);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use pf_core::units::kg_per_m3;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn head_pressure_inverse(h in -500.0_f64..500.0, rho in 1.0_f64..20_000.0) {
            let back = pressure_to_head(head_to_pressure(m(h), kg_per_m3(rho)), kg_per_m3(rho));
            prop_assert!((back.value - h).abs() < 1e-6);
        }
    }
}
