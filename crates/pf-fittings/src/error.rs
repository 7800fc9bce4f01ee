//! Fitting lookup and catalog errors.

use pf_core::PfError;
use thiserror::Error;

/// Result type for fitting operations.
pub type FittingResult<T> = Result<T, FittingError>;

#[derive(Error, Debug)]
pub enum FittingError {
    /// Identifier not present in the catalog.
    #[error("Unknown fitting: {id}")]
    UnknownFitting { id: String },

    /// Equivalent-length entries need the fully turbulent friction factor.
    #[error("Fitting {id} needs a fully turbulent friction factor")]
    MissingFrictionFactor { id: String },

    /// Catalog row is not usable as reference data.
    #[error("Malformed catalog entry {id}: {reason}")]
    Malformed { id: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<FittingError> for PfError {
    fn from(err: FittingError) -> Self {
        PfError::Lookup {
            what: err.to_string(),
        }
    }
}
