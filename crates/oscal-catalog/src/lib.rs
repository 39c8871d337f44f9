//! OSCAL Catalog
//!
//! Typed view over OSCAL-style control catalogs and the filter that derives
//! a scoped catalog from a full one.
//!
//! # Document shape
//!
//! ```text
//! { "catalog": { "title", "description", "securityControls": [ { "controlId", "title", "family", ... } ] } }
//! ```
//!
//! Only `catalog.securityControls` is required. Unknown keys at every level
//! are preserved.
//!
//! # Example
//!
//! ```rust
//! use oscal_catalog::{CatalogDocument, ControlFilter};
//! use serde_json::json;
//!
//! let document = CatalogDocument::from_value(json!({
//!     "catalog": {
//!         "title": "Framework",
//!         "description": "",
//!         "securityControls": [
//!             { "controlId": "A" }, { "controlId": "B" }, { "controlId": "C" }
//!         ]
//!     }
//! }))?;
//!
//! let outcome = ControlFilter::new(["C", "A", "X"]).apply(&document);
//! assert_eq!(outcome.control_count(), 2);
//! assert!(outcome.not_found.contains("X"));
//! # Ok::<(), oscal_catalog::StructureError>(())
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod control;
pub mod document;
pub mod error;
pub mod filter;

pub use control::Control;
pub use document::{Catalog, CatalogDocument};
pub use error::StructureError;
pub use filter::{filter, ControlFilter, FilterOutcome, DEFAULT_FALLBACK_TITLE};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
