//! Progress of an extraction run
//!
//! [`crate::run_with`] reports each stage as a [`RunEvent`]. The library never
//! prints; the binary renders events as console lines.

use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;

/// One observable step of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunEvent<'a> {
    /// About to read the catalog
    Loading(&'a Path),
    /// Catalog loaded; filtering for this many requested identifiers
    Extracting(usize),
    /// Requested identifiers that matched no control
    NotFound(&'a BTreeSet<String>),
    /// Derived catalog written
    Saved(&'a Path),
}

impl RunEvent<'_> {
    /// Whether the event is an advisory for stderr rather than progress
    #[inline]
    #[must_use]
    pub fn is_warning(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl fmt::Display for RunEvent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loading(path) => write!(f, "Loading catalog file: {}", path.display()),
            Self::Extracting(count) => write!(f, "Extracting {count} specified controls..."),
            Self::NotFound(ids) => {
                let ids: Vec<&str> = ids.iter().map(String::as_str).collect();
                write!(f, "Warning: The following control IDs were not found: {ids:?}")
            }
            Self::Saved(path) => write!(f, "Filtered controls saved to: {}", path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn console_lines() {
        assert_eq!(
            RunEvent::Loading(Path::new("nist-csf-2.json")).to_string(),
            "Loading catalog file: nist-csf-2.json"
        );
        assert_eq!(
            RunEvent::Extracting(22).to_string(),
            "Extracting 22 specified controls..."
        );
        assert_eq!(
            RunEvent::Saved(Path::new("out.json")).to_string(),
            "Filtered controls saved to: out.json"
        );
    }

    #[test]
    fn not_found_lists_ids_sorted() {
        let ids = BTreeSet::from(["ZZ".to_string(), "AA".to_string()]);
        let event = RunEvent::NotFound(&ids);
        assert!(event.is_warning());
        assert_eq!(
            event.to_string(),
            r#"Warning: The following control IDs were not found: ["AA", "ZZ"]"#
        );
    }
}
