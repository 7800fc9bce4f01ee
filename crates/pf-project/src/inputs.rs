//! Case → engine inputs, resolving every unit into SI.

use std::collections::HashMap;

use pf_core::units::{celsius, kg_per_m3, m, m3ps, pa, pa_s};
use pf_hydraulics::{
    FittingInstance, FluidProperties, PipeMaterial, PipeSpec, PumpCurve, PumpCurvePoint,
    SegmentInput, SystemInput,
};

use crate::ProjectResult;
use crate::schema::{Case, MaterialDef, PipeDef};
use crate::validate::{ValidationError, internal_diameter_m};

pub fn fluid_properties(case: &Case) -> FluidProperties {
    let fluid = &case.fluid;
    FluidProperties {
        name: fluid.name.clone(),
        density: kg_per_m3(fluid.density_kg_m3),
        viscosity: pa_s(fluid.viscosity_pa_s),
        temperature: celsius(fluid.temperature.to_celsius()),
        vapor_pressure: fluid.vapor_pressure.map(|p| pa(p.to_base())),
        reference: fluid.reference.clone(),
    }
}

fn pipe_spec(pipe: &PipeDef) -> PipeSpec {
    PipeSpec {
        nominal_size: pipe.nominal_size.clone(),
        standard: pipe.standard.clone(),
        outer_diameter_mm: pipe.outer_diameter.to_base() * 1000.0,
        wall_thickness_mm: pipe.wall_thickness.to_base() * 1000.0,
        internal_diameter_mm: internal_diameter_m(pipe) * 1000.0,
    }
}

fn pipe_material(material: &MaterialDef) -> PipeMaterial {
    PipeMaterial {
        name: material.name.clone(),
        roughness_mm: material.roughness.to_base() * 1000.0,
        reference: material.reference.clone(),
    }
}

/// Series system of every segment in file order.
pub fn system_input(case: &Case) -> ProjectResult<SystemInput> {
    let materials: HashMap<&str, &MaterialDef> =
        case.materials.iter().map(|mat| (mat.id.as_str(), mat)).collect();
    let fluid = fluid_properties(case);
    let flow = m3ps(case.flow_rate.to_base());

    let segments = case
        .segments
        .iter()
        .map(|seg| {
            let material = materials.get(seg.material.as_str()).ok_or_else(|| {
                ValidationError::MissingReference {
                    id: seg.material.clone(),
                    context: format!("segment {} material", seg.id),
                }
            })?;
            Ok(SegmentInput {
                id: seg.id.clone(),
                pipe: pipe_spec(&seg.pipe),
                material: pipe_material(material),
                fluid: fluid.clone(),
                flow_rate: flow,
                length: m(seg.length.to_base()),
                elevation_change: m(seg.elevation_change.to_base()),
                fittings: seg
                    .fittings
                    .iter()
                    .map(|f| FittingInstance::new(f.id.clone(), f.quantity))
                    .collect(),
            })
        })
        .collect::<ProjectResult<Vec<_>>>()?;

    Ok(SystemInput::new(segments))
}

pub fn pump_curve(case: &Case) -> ProjectResult<Option<PumpCurve>> {
    let Some(pump) = &case.pump else {
        return Ok(None);
    };
    let points = pump
        .points
        .iter()
        .map(|p| PumpCurvePoint {
            flow: m3ps(p.flow.to_base()),
            head: m(p.head.to_base()),
            efficiency_pct: p.efficiency_pct,
            npsh_required: m(p.npsh_required.to_base()),
        })
        .collect();
    Ok(Some(PumpCurve::new(points)?))
}
