//! Error types for the catalog model
//!
//! The only way a filter run can fail is a document that does not have the
//! `catalog.securityControls` shape. Everything below that level (missing
//! control IDs, unknown fields) is tolerated.

/// The parsed document does not have the shape of an OSCAL catalog
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StructureError {
    /// Document root is not a mapping
    #[error("invalid catalog structure: document root is not an object")]
    NotObject,

    /// No top-level `catalog` key
    #[error("invalid catalog structure: missing catalog.securityControls (no `catalog` key)")]
    MissingCatalog,

    /// `catalog` is present but is not a mapping
    #[error("invalid catalog structure: `catalog` is not an object")]
    CatalogNotObject,

    /// No `catalog.securityControls` key
    #[error("invalid catalog structure: missing catalog.securityControls")]
    MissingSecurityControls,

    /// `catalog.securityControls` is not a sequence
    #[error("invalid catalog structure: catalog.securityControls is not an array")]
    ControlsNotSequence,

    /// An entry of `catalog.securityControls` is not a mapping
    #[error("invalid catalog structure: catalog.securityControls[{index}] is not an object")]
    MalformedControl {
        /// Position of the offending entry
        index: usize,
    },
}

impl StructureError {
    /// Whether the required `catalog.securityControls` key path is absent,
    /// as opposed to present with the wrong shape
    #[inline]
    #[must_use]
    pub fn is_missing_key(&self) -> bool {
        matches!(self, Self::MissingCatalog | Self::MissingSecurityControls)
    }
}
