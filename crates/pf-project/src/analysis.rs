//! Full case evaluation: system losses, operating point, NPSH.

use pf_core::units::{VolumeRate, m, m3ps, pa};
use pf_fittings::CoefficientSource;
use pf_hydraulics::{
    NpshAssessment, OperatingPoint, ResistanceCurve, SystemResult, assess_npsh, calculate_segment,
    calculate_system, find_operating_point, npsh_available,
};
use serde::{Deserialize, Serialize};

use crate::ProjectResult;
use crate::inputs::{fluid_properties, pump_curve, system_input};
use crate::schema::Case;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PumpReport {
    pub name: String,
    pub resistance: ResistanceCurve,
    pub operating_point: Option<OperatingPoint>,
    pub hydraulic_power_w: Option<f64>,
    pub shaft_power_w: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseReport {
    pub name: String,
    pub system: SystemResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pump: Option<PumpReport>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub npsh: Option<NpshAssessment>,
}

/// Evaluate a validated case against `catalog`.
pub fn analyze_case(case: &Case, catalog: &dyn CoefficientSource) -> ProjectResult<CaseReport> {
    let fluid = fluid_properties(case);
    let system = calculate_system(&system_input(case)?, catalog)?;

    let pump = match (&case.pump, pump_curve(case)?) {
        (Some(def), Some(curve)) => {
            let resistance = ResistanceCurve::from_system(
                &system,
                m3ps(case.flow_rate.to_base()),
                case.resistance.max_flow_ratio,
                case.resistance.intervals,
            )?;
            let operating_point = find_operating_point(&curve, &resistance);
            let hydraulic_power_w = operating_point
                .map(|op| op.hydraulic_power(fluid.density).value);
            // Zero efficiency at the operating point leaves shaft power unknown.
            let shaft_power_w = operating_point
                .and_then(|op| op.shaft_power(fluid.density).ok())
                .map(|p| p.value);
            Some(PumpReport {
                name: def.name.clone(),
                resistance,
                operating_point,
                hydraulic_power_w,
                shaft_power_w,
            })
        }
        _ => None,
    };

    let operating_point = pump.as_ref().and_then(|p| p.operating_point);
    let npsh = match (&case.suction, fluid.vapor_pressure) {
        (Some(suction), Some(vapor_pressure)) => {
            let friction_loss = match (&suction.friction_loss, operating_point) {
                (Some(loss), _) => loss.to_base(),
                (None, Some(op)) => suction_loss_head(case, &suction.segments, op.flow, catalog)?,
                (None, None) => system
                    .segments
                    .iter()
                    .filter(|s| suction.segments.contains(&s.id))
                    .map(|s| s.losses.friction.head.value + s.losses.fittings.head.value)
                    .sum(),
            };
            let available = npsh_available(
                pa(suction.atmospheric_pressure.to_base()),
                vapor_pressure,
                fluid.density,
                m(suction.static_head.to_base()),
                m(friction_loss),
            );
            operating_point
                .map(|op| assess_npsh(available, op.npsh_required))
                .or(Some(assess_npsh(available, m(0.0))))
        }
        _ => None,
    };

    Ok(CaseReport {
        name: case.name.clone(),
        system,
        pump,
        npsh,
    })
}

/// Friction plus fittings head of the named segments carrying `flow`.
fn suction_loss_head(
    case: &Case,
    names: &[String],
    flow: VolumeRate,
    catalog: &dyn CoefficientSource,
) -> ProjectResult<f64> {
    let mut head = 0.0;
    for mut segment in system_input(case)?.segments {
        if !names.contains(&segment.id) {
            continue;
        }
        segment.flow_rate = flow;
        let losses = calculate_segment(&segment, catalog)?.losses;
        head += losses.friction.head.value + losses.fittings.head.value;
    }
    Ok(head)
}
