//! pf-project: case file format, validation and conversion into engine inputs.

pub mod analysis;
pub mod inputs;
pub mod schema;
pub mod validate;

use std::path::Path;

use pf_fittings::{FittingCatalog, FittingError};
use pf_hydraulics::HydraulicsError;

pub use analysis::{CaseReport, PumpReport, analyze_case};
pub use inputs::{fluid_properties, pump_curve, system_input};
pub use schema::*;
pub use validate::{LATEST_VERSION, ValidationError, validate_case, validate_fittings};

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Calculation error: {0}")]
    Hydraulics(#[from] HydraulicsError),

    #[error("Fitting catalog error: {0}")]
    Fittings(#[from] FittingError),

    #[error("Unsupported case file extension: {path}")]
    UnsupportedFormat { path: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn load_yaml(path: &Path) -> ProjectResult<Case> {
    let content = std::fs::read_to_string(path)?;
    let case: Case = serde_yaml::from_str(&content)?;
    validate_case(&case)?;
    Ok(case)
}

pub fn save_yaml(path: &Path, case: &Case) -> ProjectResult<()> {
    validate_case(case)?;
    let content = serde_yaml::to_string(case)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &Path) -> ProjectResult<Case> {
    let content = std::fs::read_to_string(path)?;
    let case: Case = serde_json::from_str(&content)?;
    validate_case(&case)?;
    Ok(case)
}

pub fn save_json(path: &Path, case: &Case) -> ProjectResult<()> {
    validate_case(case)?;
    let content = serde_json::to_string_pretty(case)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Load by extension: `.yaml`/`.yml` or `.json`.
pub fn load_case(path: &Path) -> ProjectResult<Case> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("yaml" | "yml") => load_yaml(path),
        Some("json") => load_json(path),
        _ => Err(ProjectError::UnsupportedFormat {
            path: path.display().to_string(),
        }),
    }
}

/// The built-in catalog, extended by the case's external catalog if it names
/// one. Relative catalog paths resolve against `case_dir`.
pub fn resolve_catalog(case: &Case, case_dir: Option<&Path>) -> ProjectResult<FittingCatalog> {
    let builtin = FittingCatalog::builtin();
    let Some(rel) = &case.fittings_catalog else {
        return Ok(builtin.clone());
    };
    let path = match case_dir {
        Some(dir) if rel.is_relative() => dir.join(rel),
        _ => rel.clone(),
    };
    let external = FittingCatalog::load(&path)?;
    Ok(builtin.merged_with(&external))
}
