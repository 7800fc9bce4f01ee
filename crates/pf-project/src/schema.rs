//! Case file schema definitions.

use std::path::PathBuf;

use pf_core::Reference;
use pf_core::convert::{
    FlowRateUnit, LengthUnit, LinearUnit, PressureUnit, TemperatureUnit, convert_temperature,
};
use pf_core::units::constants::P_ATM_PA;
use serde::{Deserialize, Serialize};

/// A number with an explicit unit, e.g. `{ value: 10, unit: "m3/h" }`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Measured<U> {
    pub value: f64,
    pub unit: U,
}

impl<U> Measured<U> {
    pub fn new(value: f64, unit: U) -> Self {
        Self { value, unit }
    }
}

impl<U: LinearUnit> Measured<U> {
    /// Value in the family's SI base unit (Pa, m³/s, m).
    pub fn to_base(&self) -> f64 {
        self.value * self.unit.factor()
    }
}

impl Measured<TemperatureUnit> {
    pub fn to_celsius(&self) -> f64 {
        convert_temperature(self.value, self.unit, TemperatureUnit::Celsius)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Case {
    pub version: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub fluid: FluidDef,
    /// Flow carried by every segment of the series path
    pub flow_rate: Measured<FlowRateUnit>,
    #[serde(default)]
    pub materials: Vec<MaterialDef>,
    #[serde(default)]
    pub segments: Vec<SegmentDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pump: Option<PumpDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suction: Option<SuctionDef>,
    #[serde(default)]
    pub resistance: ResistanceOptions,
    /// External fitting catalog, relative to the case file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fittings_catalog: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FluidDef {
    pub name: String,
    pub density_kg_m3: f64,
    pub viscosity_pa_s: f64,
    pub temperature: Measured<TemperatureUnit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vapor_pressure: Option<Measured<PressureUnit>>,
    pub reference: Reference,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MaterialDef {
    pub id: String,
    pub name: String,
    pub roughness: Measured<LengthUnit>,
    pub reference: Reference,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PipeDef {
    pub nominal_size: String,
    pub standard: String,
    pub outer_diameter: Measured<LengthUnit>,
    pub wall_thickness: Measured<LengthUnit>,
    /// Overrides OD − 2·wall when the measured bore is known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_diameter: Option<Measured<LengthUnit>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SegmentDef {
    pub id: String,
    pub pipe: PipeDef,
    /// Id into `Case::materials`
    pub material: String,
    pub length: Measured<LengthUnit>,
    pub elevation_change: Measured<LengthUnit>,
    #[serde(default)]
    pub fittings: Vec<FittingDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FittingDef {
    pub id: String,
    #[serde(default = "one")]
    pub quantity: u32,
}

fn one() -> u32 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PumpDef {
    pub name: String,
    pub points: Vec<PumpPointDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PumpPointDef {
    pub flow: Measured<FlowRateUnit>,
    pub head: Measured<LengthUnit>,
    pub efficiency_pct: f64,
    pub npsh_required: Measured<LengthUnit>,
}

/// Suction-side conditions for NPSH available.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SuctionDef {
    /// Pressure on the liquid surface; standard atmosphere when omitted
    #[serde(default = "standard_atmosphere")]
    pub atmospheric_pressure: Measured<PressureUnit>,
    /// Liquid level above the pump centreline; negative for suction lift
    pub static_head: Measured<LengthUnit>,
    /// Explicit suction loss. When absent, the friction and fitting head of
    /// `segments` is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub friction_loss: Option<Measured<LengthUnit>>,
    #[serde(default)]
    pub segments: Vec<String>,
}

fn standard_atmosphere() -> Measured<PressureUnit> {
    Measured::new(P_ATM_PA, PressureUnit::Pascal)
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ResistanceOptions {
    #[serde(default = "default_max_flow_ratio")]
    pub max_flow_ratio: f64,
    #[serde(default = "default_intervals")]
    pub intervals: usize,
}

fn default_max_flow_ratio() -> f64 {
    pf_hydraulics::DEFAULT_MAX_FLOW_RATIO
}

fn default_intervals() -> usize {
    pf_hydraulics::DEFAULT_INTERVALS
}

impl Default for ResistanceOptions {
    fn default() -> Self {
        Self {
            max_flow_ratio: default_max_flow_ratio(),
            intervals: default_intervals(),
        }
    }
}
