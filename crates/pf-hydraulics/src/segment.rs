//! Segment pressure drop: friction + fittings + elevation for one pipe run.

use pf_core::units::{Density, Length, Pressure, Velocity, m, mps, pa};
use pf_core::{Reference, ReferenceSet};
use pf_fittings::{CoefficientSource, ResolveContext};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::common::{check_finite, check_non_negative, check_positive};
use crate::error::HydraulicsResult;
use crate::fitting_loss::{FittingLoss, aggregate_fitting_losses};
use crate::friction::{FlowRegime, FrictionFactor, friction_factor, fully_turbulent};
use crate::model::SegmentInput;
use crate::straight_pipe::{head_to_pressure, pressure_to_head, straight_pipe_loss};

/// One loss term in both pressure and head form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LossComponent {
    pub dp: Pressure,
    pub head: Length,
}

impl LossComponent {
    pub fn zero() -> Self {
        Self {
            dp: pa(0.0),
            head: m(0.0),
        }
    }

    pub fn from_pressure(dp: Pressure, density: Density) -> Self {
        Self {
            dp,
            head: pressure_to_head(dp, density),
        }
    }
}

/// Itemized loss terms. `total.dp` is the sum of the other three.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LossBreakdown {
    pub friction: LossComponent,
    pub fittings: LossComponent,
    pub elevation: LossComponent,
    pub total: LossComponent,
}

impl LossBreakdown {
    pub fn zero() -> Self {
        Self {
            friction: LossComponent::zero(),
            fittings: LossComponent::zero(),
            elevation: LossComponent::zero(),
            total: LossComponent::zero(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentResult {
    pub id: String,
    pub velocity: Velocity,
    pub reynolds: f64,
    pub regime: FlowRegime,
    /// Darcy friction factor; `None` when the segment carries no flow
    pub friction: Option<FrictionFactor>,
    /// f_T, computed only when an equivalent-length fitting needs it
    pub fully_turbulent: Option<FrictionFactor>,
    pub fittings: Vec<FittingLoss>,
    pub losses: LossBreakdown,
    pub references: Vec<Reference>,
}

/// Compute the itemized pressure drop of one segment.
pub fn calculate_segment(
    input: &SegmentInput,
    catalog: &dyn CoefficientSource,
) -> HydraulicsResult<SegmentResult> {
    let density = input.fluid.density;
    check_positive(density.value, "density")?;
    check_positive(input.fluid.viscosity.value, "viscosity")?;
    check_positive(input.pipe.internal_diameter_mm, "internal diameter")?;
    check_non_negative(input.material.roughness_mm, "roughness")?;
    check_non_negative(input.flow_rate.value, "flow rate")?;
    check_non_negative(input.length.value, "length")?;
    check_finite(input.elevation_change.value, "elevation change")?;

    let diameter = input.pipe.internal_diameter();
    let id_mm = input.pipe.internal_diameter_mm;
    let roughness_mm = input.material.roughness_mm;

    let (velocity, reynolds) = if input.flow_rate.value == 0.0 {
        (mps(0.0), 0.0)
    } else {
        let v = input.flow_rate.value / input.pipe.flow_area_m2();
        let re = density.value * v * diameter.value / input.fluid.viscosity.value;
        (mps(check_finite(v, "velocity")?), check_finite(re, "Reynolds number")?)
    };

    let mut references = ReferenceSet::new();
    references.insert(input.fluid.reference.clone());
    references.insert(input.material.reference.clone());

    let (friction, regime, dp_friction) = if reynolds > 0.0 {
        let ff = friction_factor(reynolds, roughness_mm, id_mm)?;
        let dp = straight_pipe_loss(ff.f, input.length, diameter, density, velocity)?;
        references.insert(ff.reference.clone());
        let regime = ff.regime;
        (Some(ff), regime, dp)
    } else {
        (None, FlowRegime::Laminar, pa(0.0))
    };

    let mut f_t: Option<FrictionFactor> = None;
    let mut resolved = Vec::with_capacity(input.fittings.len());
    for fitting in &input.fittings {
        let entry = catalog.entry(&fitting.fitting_id)?;
        if entry.method.needs_fully_turbulent() && f_t.is_none() {
            let ft = fully_turbulent(roughness_mm, id_mm)?;
            references.insert(ft.reference.clone());
            f_t = Some(ft);
        }
        let ctx = ResolveContext {
            reynolds,
            internal_diameter_mm: id_mm,
            fully_turbulent: f_t.as_ref().map(|ft| ft.f),
        };
        let coef = entry.resolve(&ctx)?;
        references.insert(coef.reference.clone());
        resolved.push((coef, fitting.quantity));
    }
    let (fittings, dp_fittings) = aggregate_fitting_losses(&resolved, density, velocity);

    let dp_elevation = if input.elevation_change.value == 0.0 {
        pa(0.0)
    } else {
        head_to_pressure(input.elevation_change, density)
    };

    let dp_total = pa(dp_friction.value + dp_fittings.value + dp_elevation.value);
    let losses = LossBreakdown {
        friction: LossComponent::from_pressure(dp_friction, density),
        fittings: LossComponent::from_pressure(dp_fittings, density),
        elevation: LossComponent::from_pressure(dp_elevation, density),
        total: LossComponent::from_pressure(dp_total, density),
    };

    debug!(
        segment = %input.id,
        velocity = velocity.value,
        reynolds,
        ?regime,
        dp_total = dp_total.value,
        "segment pressure drop"
    );

    Ok(SegmentResult {
        id: input.id.clone(),
        velocity,
        reynolds,
        regime,
        friction,
        fully_turbulent: f_t,
        fittings,
        losses,
        references: references.into_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HydraulicsError;
    use crate::model::{FittingInstance, FluidProperties, PipeMaterial, PipeSpec};
    use pf_core::units::{celsius, kg_per_m3, m3ph, pa_s};
    use pf_fittings::{FittingCatalog, FittingError};

    fn segment(flow_m3h: f64, length_m: f64, dz_m: f64) -> SegmentInput {
        SegmentInput {
            id: "S1".into(),
            pipe: PipeSpec {
                nominal_size: "2\"".into(),
                standard: "ASME B36.10M Sch 40".into(),
                outer_diameter_mm: 60.33,
                wall_thickness_mm: 3.91,
                internal_diameter_mm: 52.5,
            },
            material: PipeMaterial {
                name: "commercial steel".into(),
                roughness_mm: 0.045_72,
                reference: Reference::new("Crane TP-410").with_page("A-23"),
            },
            fluid: FluidProperties {
                name: "water".into(),
                density: kg_per_m3(998.2),
                viscosity: pa_s(1.002e-3),
                temperature: celsius(20.0),
                vapor_pressure: None,
                reference: Reference::new("IAPWS-95"),
            },
            flow_rate: m3ph(flow_m3h),
            length: m(length_m),
            elevation_change: m(dz_m),
            fittings: Vec::new(),
        }
    }

    #[test]
    fn zero_flow_has_no_friction_factor() {
        let mut input = segment(0.0, 50.0, 2.0);
        input.fittings.push(FittingInstance::new("elbow_90_standard", 2));
        let res = calculate_segment(&input, FittingCatalog::builtin()).unwrap();
        assert_eq!(res.velocity.value, 0.0);
        assert_eq!(res.reynolds, 0.0);
        assert!(res.friction.is_none());
        assert_eq!(res.regime, FlowRegime::Laminar);
        assert_eq!(res.losses.friction.dp.value, 0.0);
        assert_eq!(res.losses.fittings.dp.value, 0.0);
        assert!((res.losses.elevation.head.value - 2.0).abs() < 1e-9);
    }

    #[test]
    fn downhill_reduces_total() {
        let catalog = FittingCatalog::builtin();
        let up = calculate_segment(&segment(10.0, 20.0, 3.0), catalog).unwrap();
        let down = calculate_segment(&segment(10.0, 20.0, -3.0), catalog).unwrap();
        assert!(down.losses.elevation.dp.value < 0.0);
        assert!(down.losses.total.dp.value < up.losses.total.dp.value);
        assert_eq!(up.losses.friction, down.losses.friction);
    }

    #[test]
    fn total_head_matches_total_pressure() {
        let mut input = segment(10.0, 50.0, 5.0);
        input.fittings.push(FittingInstance::new("globe_valve_3k", 1));
        let res = calculate_segment(&input, FittingCatalog::builtin()).unwrap();
        let expected = res.losses.total.dp.value / (998.2 * 9.806_65);
        assert!((res.losses.total.head.value - expected).abs() < 1e-9);
    }

    #[test]
    fn fully_turbulent_only_when_needed() {
        let mut input = segment(10.0, 10.0, 0.0);
        input.fittings.push(FittingInstance::new("exit", 1));
        let res = calculate_segment(&input, FittingCatalog::builtin()).unwrap();
        assert!(res.fully_turbulent.is_none());

        input.fittings.push(FittingInstance::new("gate_valve", 1));
        let res = calculate_segment(&input, FittingCatalog::builtin()).unwrap();
        let ft = res.fully_turbulent.expect("f_T needed by gate valve");
        assert!(res.references.contains(&ft.reference));
    }

    #[test]
    fn unknown_fitting_surfaces() {
        let mut input = segment(10.0, 10.0, 0.0);
        input.fittings.push(FittingInstance::new("flux_capacitor", 1));
        let err = calculate_segment(&input, FittingCatalog::builtin()).unwrap_err();
        assert!(matches!(
            err,
            HydraulicsError::Fitting(FittingError::UnknownFitting { .. })
        ));
    }

    #[test]
    fn rejects_negative_flow_and_bad_fluid() {
        assert!(calculate_segment(&segment(-1.0, 10.0, 0.0), FittingCatalog::builtin()).is_err());
        assert!(calculate_segment(&segment(1.0, -10.0, 0.0), FittingCatalog::builtin()).is_err());
        let mut input = segment(1.0, 10.0, 0.0);
        input.fluid.viscosity = pa_s(0.0);
        assert!(matches!(
            calculate_segment(&input, FittingCatalog::builtin()),
            Err(HydraulicsError::InvalidArg { .. })
        ));
    }

    #[test]
    fn laminar_oil() {
        let mut input = segment(1.0, 10.0, 0.0);
        input.fluid.viscosity = pa_s(0.5);
        input.fluid.density = kg_per_m3(880.0);
        let res = calculate_segment(&input, FittingCatalog::builtin()).unwrap();
        assert_eq!(res.regime, FlowRegime::Laminar);
        let ff = res.friction.unwrap();
        assert!((ff.f - 64.0 / res.reynolds).abs() < 1e-12);
    }
}
