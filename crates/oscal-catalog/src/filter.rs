//! Control filter
//!
//! Selects the controls whose `controlId` is in a requested set, keeps them
//! in catalog order, and annotates the catalog title and description so the
//! derived document says what it is.

use crate::control::Control;
use crate::document::CatalogDocument;
use crate::error::StructureError;
use serde_json::Value;
use std::collections::{BTreeSet, HashSet};

/// Title assumed for a catalog that has none
pub const DEFAULT_FALLBACK_TITLE: &str = "NIST CSF 2.0";

/// Result of one filter pass
#[derive(Debug, Clone, PartialEq)]
pub struct FilterOutcome {
    /// The derived document
    pub document: CatalogDocument,
    /// Requested identifiers that matched no control, sorted
    pub not_found: BTreeSet<String>,
}

impl FilterOutcome {
    /// Number of controls kept
    #[inline]
    #[must_use]
    pub fn control_count(&self) -> usize {
        self.document.controls().len()
    }

    /// Whether every requested identifier matched at least one control
    #[inline]
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.not_found.is_empty()
    }
}

/// Filter over a fixed set of requested control identifiers
///
/// Matching is exact and case-sensitive. Requesting an identifier twice has
/// no effect on the output. A source catalog that repeats a `controlId` keeps
/// every copy.
#[derive(Debug, Clone)]
pub struct ControlFilter {
    requested: HashSet<String>,
    fallback_title: String,
}

impl ControlFilter {
    /// Create a filter for the given identifiers
    #[must_use]
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            requested: ids.into_iter().map(Into::into).collect(),
            fallback_title: DEFAULT_FALLBACK_TITLE.to_string(),
        }
    }

    /// With the title used when the catalog has none
    #[inline]
    #[must_use]
    pub fn with_fallback_title(mut self, title: impl Into<String>) -> Self {
        self.fallback_title = title.into();
        self
    }

    /// Distinct requested identifiers
    #[inline]
    #[must_use]
    pub fn requested(&self) -> &HashSet<String> {
        &self.requested
    }

    /// Whether `control` is selected by this filter
    #[inline]
    #[must_use]
    pub fn matches(&self, control: &Control) -> bool {
        control
            .control_id()
            .is_some_and(|id| self.requested.contains(id))
    }

    /// Filter a borrowed document
    ///
    /// Only the matching controls and the catalog metadata are copied; the
    /// input is left untouched.
    #[must_use]
    pub fn apply(&self, document: &CatalogDocument) -> FilterOutcome {
        let mut found: HashSet<&str> = HashSet::new();
        let controls: Vec<Control> = document
            .controls()
            .iter()
            .filter(|control| self.select(*control, &mut found))
            .cloned()
            .collect();
        let not_found = self.missing(|id| found.contains(id));

        let mut catalog = document.catalog().metadata_only();
        catalog.set_controls(controls);
        let mut filtered = document.with_catalog(catalog);
        self.annotate(&mut filtered);

        FilterOutcome {
            document: filtered,
            not_found,
        }
    }

    /// Filter a document the caller no longer needs, reusing its storage
    #[must_use]
    pub fn apply_owned(&self, mut document: CatalogDocument) -> FilterOutcome {
        let mut found: HashSet<String> = HashSet::new();
        let controls: Vec<Control> = document
            .catalog_mut()
            .take_controls()
            .into_iter()
            .filter(|control| {
                let keep = self.matches(control);
                if keep {
                    if let Some(id) = control.control_id() {
                        found.insert(id.to_string());
                    }
                }
                keep
            })
            .collect();
        let not_found = self.missing(|id| found.contains(id));

        document.catalog_mut().set_controls(controls);
        self.annotate(&mut document);

        FilterOutcome {
            document,
            not_found,
        }
    }

    fn select<'a>(&self, control: &'a Control, found: &mut HashSet<&'a str>) -> bool {
        match control.control_id() {
            Some(id) if self.requested.contains(id) => {
                found.insert(id);
                true
            }
            _ => false,
        }
    }

    fn missing(&self, is_found: impl Fn(&str) -> bool) -> BTreeSet<String> {
        self.requested
            .iter()
            .filter(|id| !is_found(id))
            .cloned()
            .collect()
    }

    fn annotate(&self, document: &mut CatalogDocument) {
        let count = document.controls().len();
        let catalog = document.catalog_mut();

        let title = filtered_title(catalog.title().unwrap_or(&self.fallback_title), count);
        let description = filtered_description(catalog.description().unwrap_or(""), count);
        catalog.set_title(title);
        catalog.set_description(description);

        tracing::debug!(
            requested = self.requested.len(),
            kept = count,
            "filtered catalog controls"
        );
    }
}

/// Title of a derived catalog holding `count` controls
#[must_use]
pub fn filtered_title(original: &str, count: usize) -> String {
    format!("{original} (Filtered - {count} controls)")
}

/// Description of a derived catalog holding `count` controls
#[must_use]
pub fn filtered_description(original: &str, count: usize) -> String {
    format!(
        "{original}\n\n<p><strong>Note:</strong> This is a filtered version containing only \
         {count} specific controls extracted from the original framework.</p>"
    )
}

/// Check the shape of a raw document and filter it
///
/// # Errors
/// Returns a [`StructureError`] when `catalog.securityControls` is missing
/// or malformed; no filtering is attempted in that case.
pub fn filter<S: AsRef<str>>(
    document: &Value,
    requested: &[S],
) -> Result<FilterOutcome, StructureError> {
    let document = CatalogDocument::from_value(document.clone())?;
    let filter = ControlFilter::new(requested.iter().map(|id| id.as_ref().to_string()));
    Ok(filter.apply_owned(document))
}
