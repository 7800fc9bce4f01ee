//! Fitting catalog: immutable id → coefficient map.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use std::sync::OnceLock;

use pf_core::Reference;
use serde::{Deserialize, Serialize};

use crate::error::{FittingError, FittingResult};
use crate::method::{LossMethod, ResolveContext, ResolvedCoefficient, resolve_k};

/// One catalog row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittingEntry {
    pub id: String,
    #[serde(default)]
    pub description: String,
    pub method: LossMethod,
    pub reference: Reference,
}

impl FittingEntry {
    /// Resolve this entry's K for the given flow conditions.
    pub fn resolve(&self, ctx: &ResolveContext) -> FittingResult<ResolvedCoefficient> {
        let k = resolve_k(&self.id, &self.method, ctx)?;
        Ok(ResolvedCoefficient {
            fitting_id: self.id.clone(),
            k,
            method: self.method.kind(),
            reference: self.reference.clone(),
        })
    }

    fn validate(&self) -> FittingResult<()> {
        if self.id.trim().is_empty() {
            return Err(FittingError::Malformed {
                id: self.id.clone(),
                reason: "empty id".into(),
            });
        }
        if self.reference.source.trim().is_empty() {
            return Err(FittingError::Malformed {
                id: self.id.clone(),
                reason: "missing reference source".into(),
            });
        }
        for (name, value) in self.method.coefficients() {
            if !value.is_finite() || value < 0.0 {
                return Err(FittingError::Malformed {
                    id: self.id.clone(),
                    reason: format!("{name} must be a non-negative number, got {value}"),
                });
            }
        }
        Ok(())
    }
}

/// Lookup seam consumed by the hydraulics engine.
pub trait CoefficientSource: Send + Sync {
    /// Fetch the entry for `id`; unknown ids are an error, never a default.
    fn entry(&self, id: &str) -> FittingResult<&FittingEntry>;

    /// Fetch and resolve in one step.
    fn resolve(&self, id: &str, ctx: &ResolveContext) -> FittingResult<ResolvedCoefficient> {
        self.entry(id)?.resolve(ctx)
    }
}

/// On-disk catalog layout (YAML or JSON).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub fittings: Vec<FittingEntry>,
}

/// Read-only fitting catalog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FittingCatalog {
    entries: BTreeMap<String, FittingEntry>,
}

static BUILTIN: OnceLock<FittingCatalog> = OnceLock::new();

impl FittingCatalog {
    /// Build a catalog, rejecting duplicate ids and malformed rows.
    pub fn from_entries(entries: Vec<FittingEntry>) -> FittingResult<Self> {
        let mut seen = HashSet::new();
        let mut map = BTreeMap::new();
        for entry in entries {
            entry.validate()?;
            if !seen.insert(entry.id.clone()) {
                return Err(FittingError::Malformed {
                    id: entry.id,
                    reason: "duplicate id".into(),
                });
            }
            map.insert(entry.id.clone(), entry);
        }
        Ok(Self { entries: map })
    }

    /// Process-wide built-in table (Crane TP-410, Darby 3-K). Built on first use.
    pub fn builtin() -> &'static FittingCatalog {
        BUILTIN.get_or_init(|| FittingCatalog {
            entries: crate::builtin::entries()
                .into_iter()
                .map(|e| (e.id.clone(), e))
                .collect(),
        })
    }

    pub fn from_yaml_str(content: &str) -> FittingResult<Self> {
        let file: CatalogFile = serde_yaml::from_str(content)?;
        Self::from_entries(file.fittings)
    }

    pub fn from_json_str(content: &str) -> FittingResult<Self> {
        let file: CatalogFile = serde_json::from_str(content)?;
        Self::from_entries(file.fittings)
    }

    /// Load from a `.json` file, otherwise YAML.
    pub fn load(path: &Path) -> FittingResult<Self> {
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&content),
            _ => Self::from_yaml_str(&content),
        }
    }

    /// Copy of this catalog with `other`'s entries added, replacing equal ids.
    pub fn merged_with(&self, other: &FittingCatalog) -> FittingCatalog {
        let mut entries = self.entries.clone();
        for (id, entry) in &other.entries {
            entries.insert(id.clone(), entry.clone());
        }
        FittingCatalog { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FittingEntry> {
        self.entries.values()
    }

    pub fn to_file(&self) -> CatalogFile {
        CatalogFile {
            fittings: self.entries.values().cloned().collect(),
        }
    }
}

impl CoefficientSource for FittingCatalog {
    fn entry(&self, id: &str) -> FittingResult<&FittingEntry> {
        self.entries
            .get(id)
            .ok_or_else(|| FittingError::UnknownFitting { id: id.to_string() })
    }
}
