//! Error types for an extraction run
//!
//! Every variant is fatal. Identifiers that match no control are not an
//! error; they come back on the filter outcome and are reported as a warning.

use oscal_catalog::StructureError;
use std::path::PathBuf;

/// Errors from loading, filtering or writing a catalog
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// Input path does not resolve to a readable file
    #[error("catalog file not found: {path}: {source}")]
    NotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input is not well-formed JSON
    #[error("invalid JSON in file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Input parsed but is not shaped like a catalog
    #[error(transparent)]
    Structure(#[from] StructureError),

    /// Output could not be written
    #[error("error saving filtered controls to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Output could not be encoded
    #[error("error encoding filtered controls: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Configuration file problem
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ExtractError {
    /// Create not-found error for path
    pub fn not_found(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::NotFound {
            path: path.into(),
            source,
        }
    }

    /// Create parse error for path
    pub fn parse(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Parse {
            path: path.into(),
            source,
        }
    }

    /// Create write error for path
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }

    /// Whether the run failed before any transform took place
    #[inline]
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. } | Self::Parse { .. } | Self::Config(_)
        )
    }

    /// Whether the transform succeeded in memory but the result was lost
    #[inline]
    #[must_use]
    pub fn is_output_error(&self) -> bool {
        matches!(self, Self::Write { .. } | Self::Serialize(_))
    }

    /// Process exit status for this error
    ///
    /// Every fatal error exits with 1. Status 2 stays with clap for usage
    /// errors.
    #[inline]
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::NotFound { .. }
            | Self::Parse { .. }
            | Self::Structure(_)
            | Self::Write { .. }
            | Self::Serialize(_)
            | Self::Config(_) => 1,
        }
    }

    /// Stage of the run that failed, for diagnostics
    #[must_use]
    pub fn stage(&self) -> &'static str {
        if self.is_input_error() {
            "input"
        } else if self.is_output_error() {
            "output"
        } else {
            "structure"
        }
    }
}

/// Errors reading a configuration file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("io error reading config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for the expected shape
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Config file names an empty control list
    #[error("config {path} declares an empty `controls` list")]
    EmptyControlList { path: PathBuf },
}
