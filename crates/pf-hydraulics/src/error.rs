//! Error types for hydraulic calculations.

use pf_core::PfError;
use pf_fittings::FittingError;
use thiserror::Error;

/// Errors that can occur during hydraulic calculations.
#[derive(Error, Debug)]
pub enum HydraulicsError {
    #[error("Invalid Reynolds number: {value}")]
    InvalidReynoldsNumber { value: f64 },

    #[error("Invalid roughness: {value} mm")]
    InvalidRoughness { value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Non-physical value: {what}")]
    NonPhysical { what: &'static str },

    #[error("{correlation} is not valid for {what} = {value}")]
    CorrelationOutOfRange {
        correlation: &'static str,
        what: &'static str,
        value: f64,
    },

    #[error("Fitting lookup failed: {0}")]
    Fitting(#[from] FittingError),
}

pub type HydraulicsResult<T> = Result<T, HydraulicsError>;

impl From<HydraulicsError> for PfError {
    fn from(e: HydraulicsError) -> Self {
        match e {
            HydraulicsError::InvalidReynoldsNumber { value } => PfError::OutOfRange {
                what: "Reynolds number",
                value,
            },
            HydraulicsError::InvalidRoughness { value } => PfError::OutOfRange {
                what: "roughness",
                value,
            },
            HydraulicsError::InvalidArg { what } => PfError::InvalidArg { what },
            HydraulicsError::NonPhysical { what } => PfError::InvalidArg { what },
            HydraulicsError::CorrelationOutOfRange { what, value, .. } => {
                PfError::OutOfRange { what, value }
            }
            HydraulicsError::Fitting(err) => err.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = HydraulicsError::InvalidReynoldsNumber { value: -1.0 };
        assert!(err.to_string().contains("Reynolds"));
    }

    #[test]
    fn error_conversion() {
        let err = HydraulicsError::InvalidArg { what: "test" };
        let pf: PfError = err.into();
        assert!(matches!(pf, PfError::InvalidArg { .. }));

        let lookup: HydraulicsError = FittingError::UnknownFitting { id: "x".into() }.into();
        let pf: PfError = lookup.into();
        assert!(matches!(pf, PfError::Lookup { .. }));
    }
}
