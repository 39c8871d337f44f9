//! Document loading (ingress)
//!
//! File system → JSON value → [`CatalogDocument`]. Reading and parsing
//! failures are kept apart from shape failures so callers can tell a bad
//! path from a bad file from a file that is not a catalog.

use crate::error::ExtractError;
use oscal_catalog::CatalogDocument;
use serde_json::Value;
use std::path::Path;

/// Read and parse a JSON document
///
/// # Errors
/// - `ExtractError::NotFound` if the file cannot be read
/// - `ExtractError::Parse` if the content is not valid UTF-8 JSON
pub fn load_document(path: impl AsRef<Path>) -> Result<Value, ExtractError> {
    let path = path.as_ref();

    let bytes = std::fs::read(path).map_err(|e| ExtractError::not_found(path, e))?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "read catalog file");

    serde_json::from_slice(&bytes).map_err(|e| ExtractError::parse(path, e))
}

/// Read a catalog document and check its shape
///
/// # Errors
/// Everything [`load_document`] reports, plus `ExtractError::Structure` when
/// the document lacks `catalog.securityControls`.
pub fn load_catalog(path: impl AsRef<Path>) -> Result<CatalogDocument, ExtractError> {
    let value = load_document(path)?;
    let document = CatalogDocument::from_value(value)?;
    tracing::debug!(controls = document.controls().len(), "parsed catalog");
    Ok(document)
}
