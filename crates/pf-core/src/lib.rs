//! pf-core: stable foundation for pipeflow.
//!
//! Contains:
//! - units (uom SI types + constructors)
//! - convert (enumerated engineering units and base-unit conversion)
//! - numeric (Real + tolerances + float helpers)
//! - reference (citations attached to every computed quantity)
//! - error (shared error types)

pub mod convert;
pub mod error;
pub mod numeric;
pub mod reference;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use convert::{
    FlowRateUnit, LengthUnit, LinearUnit, PressureUnit, Quantity, TemperatureUnit, UnitError,
    convert, convert_flow_rate, convert_length, convert_pressure, convert_temperature,
    convert_text, parse_quantity,
};
pub use error::{PfError, PfResult};
pub use numeric::*;
pub use reference::{Reference, ReferenceKey, ReferenceSet};
pub use units::*;
