//! Run configuration
//!
//! Values come from three layers: built-in defaults, an optional TOML file,
//! and command-line flags, each overriding the one before.

use crate::error::ConfigError;
use oscal_catalog::ControlFilter;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Catalog read when no input is given
pub const DEFAULT_INPUT: &str = "nist-csf-2.json";

/// NIST CSF 2.0 subcategories extracted when no list is given
pub const DEFAULT_CONTROL_IDS: [&str; 22] = [
    "ID.AM-03", "ID.AM-07", "ID.AM-08", "ID.IM-01", "ID.IM-02", "ID.IM-03", "ID.RA-01", "ID.RA-07",
    "PR.AA-05", "PR.DS-01", "PR.DS-02", "PR.DS-10", "PR.IR-01", "PR.PS-01", "PR.PS-05", "DE.AE-02",
    "DE.AE-03", "DE.CM-01", "DE.CM-02", "DE.CM-03", "DE.CM-06", "DE.CM-09",
];

/// Output path for `input` when none is given: `<stem>-filtered.json` in
/// the same directory
#[must_use]
pub fn derive_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map_or_else(|| "catalog".into(), |s| s.to_string_lossy());
    input.with_file_name(format!("{stem}-filtered.json"))
}

/// Everything one extraction run needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractConfig {
    /// Catalog to read
    pub input: PathBuf,
    /// Where to write; derived from `input` when unset
    pub output: Option<PathBuf>,
    /// Identifiers to keep
    pub control_ids: Vec<String>,
    /// Print the control summary after writing
    pub summary: bool,
}

impl ExtractConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With input path
    #[inline]
    #[must_use]
    pub fn with_input(mut self, input: impl Into<PathBuf>) -> Self {
        self.input = input.into();
        self
    }

    /// With output path
    #[inline]
    #[must_use]
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    /// With control identifiers
    #[must_use]
    pub fn with_control_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.control_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    /// With summary output
    #[inline]
    #[must_use]
    pub fn with_summary(mut self, summary: bool) -> Self {
        self.summary = summary;
        self
    }

    /// Apply the values a config file sets
    #[must_use]
    pub fn merge_file(mut self, file: FileConfig) -> Self {
        if let Some(input) = file.input {
            self.input = input;
        }
        if let Some(output) = file.output {
            self.output = Some(output);
        }
        if let Some(controls) = file.controls {
            self.control_ids = controls;
        }
        if let Some(summary) = file.summary {
            self.summary = summary;
        }
        self
    }

    /// Resolved output path
    #[must_use]
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| derive_output_path(&self.input))
    }

    /// Filter selecting the configured identifiers
    #[must_use]
    pub fn control_filter(&self) -> ControlFilter {
        ControlFilter::new(self.control_ids.iter().cloned())
    }
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: None,
            control_ids: DEFAULT_CONTROL_IDS.iter().map(ToString::to_string).collect(),
            summary: false,
        }
    }
}

/// Contents of a TOML config file
///
/// ```toml
/// input = "catalogs/nist-csf-2.json"
/// output = "profiles/detect.json"
/// controls = ["DE.CM-01", "DE.CM-09"]
/// summary = true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Catalog to read
    pub input: Option<PathBuf>,
    /// Where to write
    pub output: Option<PathBuf>,
    /// Identifiers to keep
    pub controls: Option<Vec<String>>,
    /// Print the control summary
    pub summary: Option<bool>,
}

impl FileConfig {
    /// Parse config text; `path` is only used in error messages
    ///
    /// # Errors
    /// - `ConfigError::Parse` if the text is not valid for this shape
    /// - `ConfigError::EmptyControlList` if `controls = []`
    pub fn parse(text: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        if config.controls.as_ref().is_some_and(Vec::is_empty) {
            return Err(ConfigError::EmptyControlList {
                path: path.to_path_buf(),
            });
        }
        Ok(config)
    }

    /// Read and parse a config file
    ///
    /// # Errors
    /// `ConfigError::Read` if the file cannot be read, plus everything
    /// [`FileConfig::parse`] reports.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse(&text, path)?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults() {
        let config = ExtractConfig::default();
        assert_eq!(config.input, PathBuf::from("nist-csf-2.json"));
        assert_eq!(config.output_path(), PathBuf::from("nist-csf-2-filtered.json"));
        assert_eq!(config.control_ids.len(), 22);
        assert_eq!(config.control_ids[0], "ID.AM-03");
        assert!(!config.summary);
    }

    #[test]
    fn output_derives_from_input() {
        assert_eq!(
            derive_output_path(Path::new("data/catalog.json")),
            PathBuf::from("data/catalog-filtered.json")
        );
        assert_eq!(
            derive_output_path(Path::new("catalog")),
            PathBuf::from("catalog-filtered.json")
        );
    }

    #[test]
    fn explicit_output_wins() {
        let config = ExtractConfig::new()
            .with_input("in.json")
            .with_output("elsewhere.json");
        assert_eq!(config.output_path(), PathBuf::from("elsewhere.json"));
    }

    #[test]
    fn file_values_override_defaults() {
        let file = FileConfig::parse(
            "input = \"a.json\"\ncontrols = [\"X\", \"Y\"]\nsummary = true\n",
            Path::new("cfg.toml"),
        )
        .unwrap();
        let config = ExtractConfig::default().merge_file(file);

        assert_eq!(config.input, PathBuf::from("a.json"));
        assert_eq!(config.output, None);
        assert_eq!(config.control_ids, ["X", "Y"]);
        assert!(config.summary);
    }

    #[test]
    fn empty_file_changes_nothing() {
        let file = FileConfig::parse("", Path::new("cfg.toml")).unwrap();
        assert_eq!(ExtractConfig::default().merge_file(file), ExtractConfig::default());
    }

    #[test]
    fn empty_control_list_is_rejected() {
        let err = FileConfig::parse("controls = []", Path::new("cfg.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyControlList { .. }));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = FileConfig::parse("contrls = [\"A\"]", Path::new("cfg.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileConfig::load(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn filter_uses_configured_ids() {
        let config = ExtractConfig::new().with_control_ids(["A", "B", "A"]);
        assert_eq!(config.control_filter().requested().len(), 2);
    }
}
