//! Case validation logic.

use std::collections::HashSet;

use pf_fittings::CoefficientSource;

use crate::schema::{Case, PipeDef, PumpDef, SegmentDef};

pub const LATEST_VERSION: u32 = 1;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Missing reference: {id} in {context}")]
    MissingReference { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

fn invalid(field: impl Into<String>, value: f64, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.into(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn require_positive(field: impl Into<String>, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, value, "must be positive"))
    }
}

fn require_non_negative(field: impl Into<String>, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, value, "must be non-negative"))
    }
}

fn require_finite(field: impl Into<String>, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, value, "must be finite"))
    }
}

/// Structural checks that need no fitting data.
pub fn validate_case(case: &Case) -> Result<(), ValidationError> {
    if case.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: case.version,
        });
    }

    require_positive("fluid.density_kg_m3", case.fluid.density_kg_m3)?;
    require_positive("fluid.viscosity_pa_s", case.fluid.viscosity_pa_s)?;
    require_finite("fluid.temperature", case.fluid.temperature.value)?;
    if let Some(pv) = &case.fluid.vapor_pressure {
        require_non_negative("fluid.vapor_pressure", pv.value)?;
    }
    require_non_negative("flow_rate", case.flow_rate.value)?;

    let mut material_ids = HashSet::new();
    for material in &case.materials {
        if !material_ids.insert(material.id.as_str()) {
            return Err(ValidationError::DuplicateId {
                id: material.id.clone(),
                context: "materials".to_string(),
            });
        }
        require_non_negative(
            format!("materials.{}.roughness", material.id),
            material.roughness.value,
        )?;
    }

    let mut segment_ids = HashSet::new();
    for segment in &case.segments {
        if !segment_ids.insert(segment.id.as_str()) {
            return Err(ValidationError::DuplicateId {
                id: segment.id.clone(),
                context: "segments".to_string(),
            });
        }
        if !material_ids.contains(segment.material.as_str()) {
            return Err(ValidationError::MissingReference {
                id: segment.material.clone(),
                context: format!("segment {} material", segment.id),
            });
        }
        validate_segment(segment)?;
    }

    if let Some(pump) = &case.pump {
        validate_pump(pump)?;
    }

    if let Some(suction) = &case.suction {
        if case.fluid.vapor_pressure.is_none() {
            return Err(ValidationError::MissingReference {
                id: "vapor_pressure".to_string(),
                context: "fluid (required by suction)".to_string(),
            });
        }
        require_positive("suction.atmospheric_pressure", suction.atmospheric_pressure.value)?;
        require_finite("suction.static_head", suction.static_head.value)?;
        if let Some(loss) = &suction.friction_loss {
            require_non_negative("suction.friction_loss", loss.value)?;
        }
        for id in &suction.segments {
            if !segment_ids.contains(id.as_str()) {
                return Err(ValidationError::MissingReference {
                    id: id.clone(),
                    context: "suction segments".to_string(),
                });
            }
        }
    }

    require_positive("resistance.max_flow_ratio", case.resistance.max_flow_ratio)?;
    if case.resistance.intervals == 0 {
        return Err(invalid("resistance.intervals", 0.0, "must be at least 1"));
    }

    Ok(())
}

/// Internal diameter [m] from a pipe definition.
pub(crate) fn internal_diameter_m(pipe: &PipeDef) -> f64 {
    match &pipe.internal_diameter {
        Some(id) => id.to_base(),
        None => pipe.outer_diameter.to_base() - 2.0 * pipe.wall_thickness.to_base(),
    }
}

fn validate_segment(segment: &SegmentDef) -> Result<(), ValidationError> {
    let prefix = format!("segments.{}", segment.id);
    require_non_negative(format!("{prefix}.length"), segment.length.value)?;
    require_finite(format!("{prefix}.elevation_change"), segment.elevation_change.value)?;
    require_positive(format!("{prefix}.pipe.outer_diameter"), segment.pipe.outer_diameter.value)?;
    require_non_negative(
        format!("{prefix}.pipe.wall_thickness"),
        segment.pipe.wall_thickness.value,
    )?;
    let id_m = internal_diameter_m(&segment.pipe);
    if !(id_m.is_finite() && id_m > 0.0) {
        return Err(invalid(
            format!("{prefix}.pipe"),
            id_m,
            "internal diameter must be positive",
        ));
    }
    for fitting in &segment.fittings {
        if fitting.id.trim().is_empty() {
            return Err(ValidationError::MissingReference {
                id: String::new(),
                context: format!("{prefix} fittings"),
            });
        }
    }
    Ok(())
}

fn validate_pump(pump: &PumpDef) -> Result<(), ValidationError> {
    if pump.points.len() < 2 {
        return Err(invalid(
            format!("pump.{}.points", pump.name),
            pump.points.len() as f64,
            "a pump curve needs at least two points",
        ));
    }
    for (i, p) in pump.points.iter().enumerate() {
        require_non_negative(format!("pump.points[{i}].flow"), p.flow.value)?;
        require_finite(format!("pump.points[{i}].head"), p.head.value)?;
        require_non_negative(format!("pump.points[{i}].npsh_required"), p.npsh_required.value)?;
        if !(0.0..=100.0).contains(&p.efficiency_pct) {
            return Err(invalid(
                format!("pump.points[{i}].efficiency_pct"),
                p.efficiency_pct,
                "must be within 0..=100",
            ));
        }
    }
    let flows: Vec<f64> = pump.points.iter().map(|p| p.flow.to_base()).collect();
    if let Some(i) = flows.windows(2).position(|w| w[1] <= w[0]) {
        return Err(invalid(
            format!("pump.points[{}].flow", i + 1),
            pump.points[i + 1].flow.value,
            "flow must be strictly ascending",
        ));
    }
    Ok(())
}

/// Check that every fitting id resolves in `catalog`.
pub fn validate_fittings(
    case: &Case,
    catalog: &dyn CoefficientSource,
) -> Result<(), ValidationError> {
    for segment in &case.segments {
        for fitting in &segment.fittings {
            if catalog.entry(&fitting.id).is_err() {
                return Err(ValidationError::MissingReference {
                    id: fitting.id.clone(),
                    context: format!("segment {} fittings", segment.id),
                });
            }
        }
    }
    Ok(())
}
