//! Console summary of the controls in a document

use oscal_catalog::CatalogDocument;
use std::fmt;

const RULE_WIDTH: usize = 80;

/// Human-readable listing of each control's identifier, family and title,
/// in document order
#[derive(Debug, Clone, Copy)]
pub struct ControlSummary<'a> {
    document: &'a CatalogDocument,
}

impl<'a> ControlSummary<'a> {
    /// Summarize `document`
    #[inline]
    #[must_use]
    pub fn new(document: &'a CatalogDocument) -> Self {
        Self { document }
    }
}

impl fmt::Display for ControlSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let controls = self.document.controls();
        let rule = "-".repeat(RULE_WIDTH);

        writeln!(f, "Extracted {} controls:", controls.len())?;
        writeln!(f, "{rule}")?;
        for control in controls {
            writeln!(f, "ID: {}", control.control_id().unwrap_or("Unknown"))?;
            writeln!(
                f,
                "Family: {}",
                control.family.as_deref().unwrap_or("Unknown family")
            )?;
            writeln!(f, "Title: {}", control.title.as_deref().unwrap_or("No title"))?;
            writeln!(f, "{rule}")?;
        }
        Ok(())
    }
}
