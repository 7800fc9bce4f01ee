//! Pump curve / system resistance curve intersection.

use pf_core::interpolate;
use pf_core::units::{Density, Length, Power, VolumeRate, m, m3ps, watt};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::common::{check_finite, check_positive, specific_weight};
use crate::error::{HydraulicsError, HydraulicsResult};
use crate::system::SystemResult;

/// Resistance-curve sample count when the caller has no preference.
pub const DEFAULT_INTERVALS: usize = 50;
/// Resistance curve extends to this multiple of the design flow.
pub const DEFAULT_MAX_FLOW_RATIO: f64 = 1.5;

/// One sample on a manufacturer performance curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PumpCurvePoint {
    pub flow: VolumeRate,
    pub head: Length,
    /// Pump efficiency [%]
    pub efficiency_pct: f64,
    pub npsh_required: Length,
}

/// Pump performance curve sorted by strictly ascending flow.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PumpCurve {
    points: Vec<PumpCurvePoint>,
}

impl PumpCurve {
    pub fn new(points: Vec<PumpCurvePoint>) -> HydraulicsResult<Self> {
        if points.len() < 2 {
            return Err(HydraulicsError::InvalidArg {
                what: "pump curve needs at least two points",
            });
        }
        for p in &points {
            check_finite(p.flow.value, "pump curve flow")?;
            check_finite(p.head.value, "pump curve head")?;
            check_finite(p.efficiency_pct, "pump curve efficiency")?;
            check_finite(p.npsh_required.value, "pump curve NPSHr")?;
        }
        if points.windows(2).any(|w| w[1].flow.value <= w[0].flow.value) {
            return Err(HydraulicsError::InvalidArg {
                what: "pump curve flows must be strictly ascending",
            });
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[PumpCurvePoint] {
        &self.points
    }

    fn column(&self, f: impl Fn(&PumpCurvePoint) -> f64) -> Vec<f64> {
        self.points.iter().map(f).collect()
    }

    /// Maximum head anywhere on the curve (usually shut-off head).
    pub fn max_head(&self) -> Length {
        m(self
            .points
            .iter()
            .map(|p| p.head.value)
            .fold(f64::NEG_INFINITY, f64::max))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResistanceCurvePoint {
    pub flow: VolumeRate,
    pub head: Length,
}

/// System head demand `H(Q) = H_static + K·Q²`, sampled from zero flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResistanceCurve {
    pub static_head: Length,
    /// K [m per (m³/s)²]
    pub k: f64,
    pub points: Vec<ResistanceCurvePoint>,
}

impl ResistanceCurve {
    /// Sample `intervals + 1` evenly spaced points from 0 to
    /// `max_flow_ratio · design_flow`.
    ///
    /// A non-positive design flow gives the single point (0, static head).
    pub fn generate(
        static_head: Length,
        friction_head: Length,
        design_flow: VolumeRate,
        max_flow_ratio: f64,
        intervals: usize,
    ) -> HydraulicsResult<Self> {
        check_finite(static_head.value, "static head")?;
        check_finite(friction_head.value, "friction head")?;
        check_finite(design_flow.value, "design flow")?;
        check_positive(max_flow_ratio, "max flow ratio")?;
        if intervals == 0 {
            return Err(HydraulicsError::InvalidArg {
                what: "resistance curve needs at least one interval",
            });
        }

        if design_flow.value <= 0.0 {
            return Ok(Self {
                static_head,
                k: 0.0,
                points: vec![ResistanceCurvePoint {
                    flow: m3ps(0.0),
                    head: static_head,
                }],
            });
        }

        let q_d = design_flow.value;
        let k = friction_head.value / (q_d * q_d);
        let q_max = max_flow_ratio * q_d;
        let points = (0..=intervals)
            .map(|i| {
                let q = q_max * i as f64 / intervals as f64;
                ResistanceCurvePoint {
                    flow: m3ps(q),
                    head: m(static_head.value + k * q * q),
                }
            })
            .collect();

        Ok(Self {
            static_head,
            k,
            points,
        })
    }

    /// Build from a computed system: elevation head is static, friction plus
    /// fittings head is the dynamic part at `design_flow`.
    pub fn from_system(
        system: &SystemResult,
        design_flow: VolumeRate,
        max_flow_ratio: f64,
        intervals: usize,
    ) -> HydraulicsResult<Self> {
        let losses = &system.losses;
        Self::generate(
            losses.elevation.head,
            m(losses.friction.head.value + losses.fittings.head.value),
            design_flow,
            max_flow_ratio,
            intervals,
        )
    }

    /// Interpolated head at `flow`; `None` outside the sampled domain.
    pub fn head_at(&self, flow: VolumeRate) -> Option<Length> {
        let (flows, heads) = self.columns();
        interpolate(&flows, &heads, flow.value).map(m)
    }

    fn columns(&self) -> (Vec<f64>, Vec<f64>) {
        self.points.iter().map(|p| (p.flow.value, p.head.value)).unzip()
    }
}

/// Pump/system intersection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OperatingPoint {
    pub flow: VolumeRate,
    pub head: Length,
    pub efficiency_pct: f64,
    pub npsh_required: Length,
}

impl OperatingPoint {
    /// Power delivered to the liquid, ρgQH.
    pub fn hydraulic_power(&self, density: Density) -> Power {
        watt(specific_weight(density.value) * self.flow.value * self.head.value)
    }

    /// Power drawn at the shaft, hydraulic power over efficiency.
    pub fn shaft_power(&self, density: Density) -> HydraulicsResult<Power> {
        let eta = self.efficiency_pct / 100.0;
        if !eta.is_finite() || eta <= 0.0 {
            return Err(HydraulicsError::InvalidArg {
                what: "efficiency must be positive to compute shaft power",
            });
        }
        Ok(watt(self.hydraulic_power(density).value / eta))
    }
}

/// First crossing of the pump curve with the resistance curve, walking pump
/// samples in ascending flow.
///
/// Intervals whose endpoints fall outside the resistance curve's sampled
/// range are skipped. Returns `None` when the curves never cross.
pub fn find_operating_point(pump: &PumpCurve, system: &ResistanceCurve) -> Option<OperatingPoint> {
    let flows = pump.column(|p| p.flow.value);
    let heads = pump.column(|p| p.head.value);
    let effs = pump.column(|p| p.efficiency_pct);
    let npshr = pump.column(|p| p.npsh_required.value);
    let (sys_flows, sys_heads) = system.columns();
    let demand = |q: f64| interpolate(&sys_flows, &sys_heads, q);

    for pair in pump.points.windows(2) {
        let (p1, p2) = (&pair[0], &pair[1]);
        let (Some(r1), Some(r2)) = (demand(p1.flow.value), demand(p2.flow.value)) else {
            continue;
        };
        let d1 = p1.head.value - r1;
        let d2 = p2.head.value - r2;
        if d1 * d2 > 0.0 {
            continue;
        }

        let span = d1.abs() + d2.abs();
        let w = if span == 0.0 { 0.0 } else { d1.abs() / span };
        let q = p1.flow.value + w * (p2.flow.value - p1.flow.value);

        let point = OperatingPoint {
            flow: m3ps(q),
            head: m(interpolate(&flows, &heads, q).unwrap_or(p1.head.value)),
            efficiency_pct: interpolate(&flows, &effs, q).unwrap_or(p1.efficiency_pct),
            npsh_required: m(interpolate(&flows, &npshr, q).unwrap_or(p1.npsh_required.value)),
        };
        debug!(
            flow = q,
            head = point.head.value,
            efficiency = point.efficiency_pct,
            "operating point found"
        );
        return Some(point);
    }

    debug!("pump and resistance curves do not cross");
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pf_core::units::kg_per_m3;

    fn pt(q: f64, h: f64, eff: f64, npshr: f64) -> PumpCurvePoint {
        PumpCurvePoint {
            flow: m3ps(q),
            head: m(h),
            efficiency_pct: eff,
            npsh_required: m(npshr),
        }
    }

    fn pump() -> PumpCurve {
        PumpCurve::new(vec![
            pt(0.0, 40.0, 0.0, 1.0),
            pt(0.005, 36.0, 60.0, 1.5),
            pt(0.010, 28.0, 72.0, 2.5),
            pt(0.015, 15.0, 65.0, 4.0),
        ])
        .unwrap()
    }

    #[test]
    fn pump_curve_validation() {
        let p = pt(0.0, 10.0, 0.0, 1.0);
        assert!(PumpCurve::new(vec![p]).is_err());
        assert!(PumpCurve::new(vec![p, p]).is_err());
    }

    #[test]
    fn zero_design_flow_is_single_point() {
        let curve = ResistanceCurve::generate(m(12.0), m(5.0), m3ps(0.0), 1.5, 50).unwrap();
        assert_eq!(curve.points.len(), 1);
        assert_eq!(curve.points[0].flow.value, 0.0);
        assert_eq!(curve.points[0].head.value, 12.0);
    }

    #[test]
    fn generate_validates_sampling() {
        assert!(ResistanceCurve::generate(m(1.0), m(1.0), m3ps(0.01), 1.5, 0).is_err());
        assert!(ResistanceCurve::generate(m(1.0), m(1.0), m3ps(0.01), 0.0, 10).is_err());
    }

    #[test]
    fn design_point_lies_on_curve() {
        let curve = ResistanceCurve::generate(m(10.0), m(8.0), m3ps(0.01), 1.5, 30).unwrap();
        assert_eq!(curve.points.len(), 31);
        let h = curve.head_at(m3ps(0.01)).unwrap();
        assert!((h.value - 18.0).abs() < 1e-3);
        assert!(curve.head_at(m3ps(0.02)).is_none());
    }

    #[test]
    fn crossing_is_found_between_samples() {
        let curve = ResistanceCurve::generate(m(10.0), m(20.0), m3ps(0.008), 1.5, 50).unwrap();
        let op = find_operating_point(&pump(), &curve).unwrap();
        assert!(op.flow.value > 0.005 && op.flow.value < 0.010);
        assert!(op.head.value > 28.0 && op.head.value < 36.0);
        assert!(op.efficiency_pct > 60.0 && op.efficiency_pct < 72.0);
    }

    #[test]
    fn static_head_above_shutoff_gives_none() {
        let curve = ResistanceCurve::generate(m(45.0), m(5.0), m3ps(0.01), 1.5, 50).unwrap();
        assert!(curve.static_head.value > pump().max_head().value);
        assert!(find_operating_point(&pump(), &curve).is_none());
    }

    #[test]
    fn first_crossing_wins() {
        // 10 -> 30 -> 10 m against a flat 20 m line crosses twice.
        let humped = PumpCurve::new(vec![
            pt(0.0, 10.0, 0.0, 1.0),
            pt(0.005, 30.0, 60.0, 1.5),
            pt(0.010, 10.0, 50.0, 2.5),
        ])
        .unwrap();
        let flat = ResistanceCurve::generate(m(20.0), m(0.0), m3ps(0.01), 1.5, 30).unwrap();
        let op = find_operating_point(&humped, &flat).unwrap();
        assert!(op.flow.value > 0.0 && op.flow.value < 0.005);
        assert!((op.flow.value - 0.0025).abs() < 1e-12);
        assert!((op.head.value - 20.0).abs() < 1e-9);
    }

    #[test]
    fn shaft_power_divides_by_efficiency() {
        let op = OperatingPoint {
            flow: m3ps(0.01),
            head: m(20.0),
            efficiency_pct: 50.0,
            npsh_required: m(2.0),
        };
        let rho = kg_per_m3(1000.0);
        let hyd = op.hydraulic_power(rho).value;
        assert!((hyd - 1000.0 * 9.806_65 * 0.01 * 20.0).abs() < 1e-9);
        assert!((op.shaft_power(rho).unwrap().value - 2.0 * hyd).abs() < 1e-9);

        let stalled = OperatingPoint { efficiency_pct: 0.0, ..op };
        assert!(stalled.shaft_power(rho).is_err());
    }
}
