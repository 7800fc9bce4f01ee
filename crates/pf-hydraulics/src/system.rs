//! Series composition of segments.

use pf_core::units::{m, pa};
use pf_core::{Reference, ReferenceSet, Tolerances, nearly_equal};
use pf_fittings::CoefficientSource;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::HydraulicsResult;
use crate::model::SystemInput;
use crate::segment::{LossBreakdown, LossComponent, SegmentResult, calculate_segment};
use crate::straight_pipe::pressure_to_head;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemResult {
    pub segments: Vec<SegmentResult>,
    /// Component-wise totals across all segments
    pub losses: LossBreakdown,
    /// De-duplicated across every segment
    pub references: Vec<Reference>,
}

impl SystemResult {
    pub fn empty() -> Self {
        Self {
            segments: Vec::new(),
            losses: LossBreakdown::zero(),
            references: Vec::new(),
        }
    }
}

fn add(a: LossComponent, b: LossComponent) -> LossComponent {
    LossComponent {
        dp: pa(a.dp.value + b.dp.value),
        head: m(a.head.value + b.head.value),
    }
}

/// Compute every segment in order and sum the results.
///
/// The grand-total head is re-derived from the grand-total pressure using the
/// first segment's density instead of summing per-segment heads.
pub fn calculate_system(
    input: &SystemInput,
    catalog: &dyn CoefficientSource,
) -> HydraulicsResult<SystemResult> {
    let Some(first) = input.segments.first() else {
        debug!("empty system");
        return Ok(SystemResult::empty());
    };
    let density = first.fluid.density;
    let tol = Tolerances::default();

    let mut segments = Vec::with_capacity(input.segments.len());
    let mut references = ReferenceSet::new();
    let mut friction = LossComponent::zero();
    let mut fittings = LossComponent::zero();
    let mut elevation = LossComponent::zero();

    for seg in &input.segments {
        if !nearly_equal(seg.flow_rate.value, first.flow_rate.value, tol) {
            warn!(
                segment = %seg.id,
                flow = seg.flow_rate.value,
                expected = first.flow_rate.value,
                "series segment flow rate differs from first segment"
            );
        }
        if !nearly_equal(seg.fluid.density.value, density.value, tol) {
            warn!(
                segment = %seg.id,
                density = seg.fluid.density.value,
                expected = density.value,
                "series segment density differs from first segment"
            );
        }

        let result = calculate_segment(seg, catalog)?;
        friction = add(friction, result.losses.friction);
        fittings = add(fittings, result.losses.fittings);
        elevation = add(elevation, result.losses.elevation);
        references.extend(result.references.iter().cloned());
        segments.push(result);
    }

    let dp_total = pa(friction.dp.value + fittings.dp.value + elevation.dp.value);
    let total = LossComponent {
        dp: dp_total,
        head: pressure_to_head(dp_total, density),
    };

    debug!(
        segments = segments.len(),
        dp_total = dp_total.value,
        head_total = total.head.value,
        "system pressure drop"
    );

    Ok(SystemResult {
        segments,
        losses: LossBreakdown {
            friction,
            fittings,
            elevation,
            total,
        },
        references: references.into_vec(),
    })
}
