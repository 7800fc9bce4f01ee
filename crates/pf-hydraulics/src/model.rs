//! Input value objects: fluid, pipe, material, fittings, segments.

use pf_core::Reference;
use pf_core::units::{Density, DynVisc, Length, Pressure, Temperature, VolumeRate};
use serde::{Deserialize, Serialize};

/// Liquid properties at the operating temperature. Supplied, never derived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FluidProperties {
    pub name: String,
    pub density: Density,
    /// Dynamic viscosity
    pub viscosity: DynVisc,
    pub temperature: Temperature,
    /// Saturation pressure at `temperature`, when known (needed for NPSHa)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vapor_pressure: Option<Pressure>,
    pub reference: Reference,
}

/// Pipe geometry. Only `internal_diameter_mm` enters the calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipeSpec {
    /// Nominal size identifier, e.g. "2\"" or "DN50"
    pub nominal_size: String,
    /// Dimensional standard and schedule, e.g. "ASME B36.10M Sch 40"
    pub standard: String,
    pub outer_diameter_mm: f64,
    pub wall_thickness_mm: f64,
    pub internal_diameter_mm: f64,
}

impl PipeSpec {
    /// Build from outer diameter and wall thickness; ID = OD − 2·wall.
    pub fn from_wall(
        nominal_size: impl Into<String>,
        standard: impl Into<String>,
        outer_diameter_mm: f64,
        wall_thickness_mm: f64,
    ) -> Self {
        Self {
            nominal_size: nominal_size.into(),
            standard: standard.into(),
            outer_diameter_mm,
            wall_thickness_mm,
            internal_diameter_mm: outer_diameter_mm - 2.0 * wall_thickness_mm,
        }
    }

    pub fn internal_diameter(&self) -> Length {
        pf_core::units::mm(self.internal_diameter_mm)
    }

    /// Flow cross-section [m²].
    pub fn flow_area_m2(&self) -> f64 {
        let d = self.internal_diameter_mm / 1000.0;
        std::f64::consts::PI * d * d / 4.0
    }
}

/// Pipe wall material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipeMaterial {
    pub name: String,
    /// Absolute roughness ε [mm]
    pub roughness_mm: f64,
    pub reference: Reference,
}

/// A fitting type and how many of it the segment contains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FittingInstance {
    pub fitting_id: String,
    pub quantity: u32,
}

impl FittingInstance {
    pub fn new(fitting_id: impl Into<String>, quantity: u32) -> Self {
        Self {
            fitting_id: fitting_id.into(),
            quantity,
        }
    }
}

/// One straight run of pipe with its fittings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentInput {
    pub id: String,
    pub pipe: PipeSpec,
    pub material: PipeMaterial,
    pub fluid: FluidProperties,
    /// Volumetric flow rate (≥ 0)
    pub flow_rate: VolumeRate,
    /// Pipe run length (≥ 0)
    pub length: Length,
    /// Outlet minus inlet elevation; negative is downhill
    pub elevation_change: Length,
    #[serde(default)]
    pub fittings: Vec<FittingInstance>,
}

/// Segments in series along one flow path.
///
/// All segments are expected to carry the same flow rate and fluid; this is
/// the caller's responsibility and is not re-derived.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemInput {
    pub segments: Vec<SegmentInput>,
}

impl SystemInput {
    pub fn new(segments: Vec<SegmentInput>) -> Self {
        Self { segments }
    }
}
