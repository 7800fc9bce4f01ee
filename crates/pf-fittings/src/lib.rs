//! pf-fittings: fitting loss-coefficient reference data.
//!
//! Provides:
//! - `LossMethod`, the tagged union of coefficient methods (tabulated K,
//!   Darby 3-K, Crane equivalent length, entrance/exit constant)
//! - `FittingEntry`, one catalog row with its citation
//! - `FittingCatalog`, an immutable id → entry map (built-in or loaded from YAML/JSON)
//! - `CoefficientSource`, the lookup seam the hydraulics engine consumes
//!
//! # Example
//!
//! ```
//! use pf_fittings::{CoefficientSource, FittingCatalog, ResolveContext};
//!
//! let catalog = FittingCatalog::builtin();
//! let entry = catalog.entry("entrance_sharp").unwrap();
//! let ctx = ResolveContext { reynolds: 6.7e4, internal_diameter_mm: 52.5, fully_turbulent: None };
//! let resolved = entry.resolve(&ctx).unwrap();
//! assert_eq!(resolved.k, 0.5);
//! ```

pub mod builtin;
pub mod catalog;
pub mod error;
pub mod method;

pub use catalog::{CatalogFile, CoefficientSource, FittingCatalog, FittingEntry};
pub use error::{FittingError, FittingResult};
pub use method::{LossMethod, LossMethodKind, ResolveContext, ResolvedCoefficient};
