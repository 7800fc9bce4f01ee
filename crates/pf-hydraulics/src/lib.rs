//! pf-hydraulics: pressure-drop engine for single-path liquid pipe systems.
//!
//! Provides:
//! - Darcy friction factor (Churchill, Swamee–Jain, laminar, fully turbulent)
//! - Darcy–Weisbach straight-pipe loss and pressure ↔ head conversion
//! - Fitting loss aggregation over a `CoefficientSource`
//! - Segment and series-system pressure drop with de-duplicated references
//! - Pump curve / resistance curve intersection and NPSH available
//!
//! All functions are pure; the only shared data is the read-only fitting catalog.

pub mod common;
pub mod error;
pub mod fitting_loss;
pub mod friction;
pub mod model;
pub mod npsh;
pub mod pump;
pub mod segment;
pub mod straight_pipe;
pub mod system;

pub use error::{HydraulicsError, HydraulicsResult};
pub use fitting_loss::{FittingLoss, aggregate_fitting_losses};
pub use friction::{
    Correlation, FlowRegime, FrictionFactor, FrictionMethod, churchill, friction_factor,
    friction_factor_with, fully_turbulent, relative_roughness, swamee_jain,
};
pub use model::{
    FittingInstance, FluidProperties, PipeMaterial, PipeSpec, SegmentInput, SystemInput,
};
pub use npsh::{MIN_NPSH_MARGIN_RATIO, NpshAssessment, assess_npsh, npsh_available};
pub use pump::{
    DEFAULT_INTERVALS, DEFAULT_MAX_FLOW_RATIO, OperatingPoint, PumpCurve, PumpCurvePoint,
    ResistanceCurve, ResistanceCurvePoint, find_operating_point,
};
pub use segment::{LossBreakdown, LossComponent, SegmentResult, calculate_segment};
pub use straight_pipe::{head_to_pressure, pressure_to_head, straight_pipe_loss, velocity_head};
pub use system::{SystemResult, calculate_system};
