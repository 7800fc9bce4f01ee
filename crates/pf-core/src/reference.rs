//! Citations attached to every computed quantity.
//!
//! A [`Reference`] is a plain value: two references are the same citation when
//! their (source, page, equation) triple matches, regardless of where they were
//! created. [`ReferenceSet`] collects references in first-seen order and drops
//! repeats of the same triple.

use std::collections::HashSet;
use std::fmt;

/// Source citation with optional page and equation/table identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reference {
    pub source: String,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub page: Option<String>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub equation: Option<String>,
}

/// De-duplication key: (source, page, equation).
pub type ReferenceKey = (String, Option<String>, Option<String>);

impl Reference {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            page: None,
            equation: None,
        }
    }

    pub fn with_page(mut self, page: impl Into<String>) -> Self {
        self.page = Some(page.into());
        self
    }

    pub fn with_equation(mut self, equation: impl Into<String>) -> Self {
        self.equation = Some(equation.into());
        self
    }

    pub fn key(&self) -> ReferenceKey {
        (
            self.source.clone(),
            self.page.clone(),
            self.equation.clone(),
        )
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)?;
        if let Some(page) = &self.page {
            write!(f, ", p. {page}")?;
        }
        if let Some(eq) = &self.equation {
            write!(f, ", {eq}")?;
        }
        Ok(())
    }
}

/// Insertion-ordered set of references keyed by (source, page, equation).
#[derive(Debug, Clone, Default)]
pub struct ReferenceSet {
    seen: HashSet<ReferenceKey>,
    items: Vec<Reference>,
}

impl ReferenceSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a reference; returns `false` if an equal citation is already present.
    pub fn insert(&mut self, reference: Reference) -> bool {
        if self.seen.insert(reference.key()) {
            self.items.push(reference);
            true
        } else {
            false
        }
    }

    pub fn extend<I: IntoIterator<Item = Reference>>(&mut self, refs: I) {
        for r in refs {
            self.insert(r);
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Reference> {
        self.items.iter()
    }

    pub fn into_vec(self) -> Vec<Reference> {
        self.items
    }
}

impl FromIterator<Reference> for ReferenceSet {
    fn from_iter<I: IntoIterator<Item = Reference>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}
