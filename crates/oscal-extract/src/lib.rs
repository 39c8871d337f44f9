//! OSCAL Extract
//!
//! Loads an OSCAL control catalog, keeps the requested controls, and writes
//! the derived catalog.
//!
//! # Pipeline
//!
//! ```text
//! File System → ingress → CatalogDocument → ControlFilter → CatalogDocument' → egress → File System
//! ```
//!
//! Each stage runs once. A failure at any stage ends the run and nothing is
//! written.
//!
//! # Example
//!
//! ```rust,no_run
//! use oscal_extract::{run, ExtractConfig};
//!
//! let config = ExtractConfig::new()
//!     .with_input("nist-csf-2.json")
//!     .with_control_ids(["PR.DS-01", "DE.CM-01"]);
//!
//! let outcome = run(&config)?;
//! assert!(outcome.control_count() <= 2);
//! # Ok::<(), oscal_extract::ExtractError>(())
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod cli;
pub mod config;
pub mod egress;
pub mod error;
pub mod ingress;
pub mod logging;
pub mod progress;
pub mod summary;

pub use config::{ExtractConfig, FileConfig, DEFAULT_CONTROL_IDS, DEFAULT_INPUT};
pub use error::{ConfigError, ExtractError};
pub use progress::RunEvent;
pub use summary::ControlSummary;

use oscal_catalog::FilterOutcome;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Load, filter and write according to `config`, silently
///
/// Requested identifiers that match nothing are returned in
/// [`FilterOutcome::not_found`]; they do not fail the run.
///
/// # Errors
/// Any [`ExtractError`] from loading, shape checking or writing. On error the
/// output path is left untouched.
pub fn run(config: &ExtractConfig) -> Result<FilterOutcome, ExtractError> {
    run_with(config, |_| {})
}

/// Like [`run`], reporting each stage to `report` as it happens
///
/// # Errors
/// Same as [`run`].
pub fn run_with(
    config: &ExtractConfig,
    mut report: impl FnMut(RunEvent<'_>),
) -> Result<FilterOutcome, ExtractError> {
    let output = config.output_path();

    report(RunEvent::Loading(&config.input));
    let document = ingress::load_catalog(&config.input)?;

    report(RunEvent::Extracting(config.control_ids.len()));
    let outcome = config.control_filter().apply_owned(document);

    if !outcome.is_complete() {
        report(RunEvent::NotFound(&outcome.not_found));
        tracing::debug!(missing = ?outcome.not_found, "requested control IDs not found");
    }

    egress::write_document(&outcome.document, &output)?;
    report(RunEvent::Saved(&output));

    tracing::info!(
        kept = outcome.control_count(),
        output = %output.display(),
        "extraction complete"
    );
    Ok(outcome)
}
