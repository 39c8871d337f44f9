//! Testing utilities for the OSCAL extract workspace
//!
//! Shared catalog fixtures. Everything is plain `serde_json::Value` so the
//! helpers can be used from any crate's tests without type mismatches.

#![allow(missing_docs)]

use serde_json::{json, Value};
use std::path::{Path, PathBuf};

pub const TEST_TITLE: &str = "Test Framework";
pub const TEST_DESCRIPTION: &str = "<p>Controls for testing.</p>";

/// Family label derived from an identifier like `PR.DS-01`
pub fn family_of(id: &str) -> String {
    let prefix = id.split('-').next().unwrap_or(id);
    format!("Family {prefix}")
}

pub fn control_json(id: &str) -> Value {
    json!({
        "controlId": id,
        "title": format!("Control {id}"),
        "family": family_of(id),
        "implementationExamples": [format!("Example for {id}")],
    })
}

/// Catalog document whose controls carry the given identifiers, in order
pub fn catalog_json(ids: &[&str]) -> Value {
    catalog_with_controls(ids.iter().map(|id| control_json(id)).collect())
}

pub fn catalog_with_controls(controls: Vec<Value>) -> Value {
    json!({
        "catalog": {
            "uuid": "00000000-0000-4000-8000-000000000000",
            "title": TEST_TITLE,
            "description": TEST_DESCRIPTION,
            "version": "2.0",
            "securityControls": controls,
        }
    })
}

/// A small slice of NIST CSF 2.0
pub fn csf_catalog_json() -> Value {
    json!({
        "catalog": {
            "uuid": "7f9c2b1e-0000-4000-8000-000000000001",
            "title": "NIST Cybersecurity Framework 2.0",
            "description": "<p>The NIST CSF 2.0 core.</p>",
            "securityControls": [
                {
                    "controlId": "GV.OC-01",
                    "title": "Organizational mission is understood",
                    "family": "Organizational Context"
                },
                {
                    "controlId": "ID.AM-03",
                    "title": "Representations of network communication and data flows are maintained",
                    "family": "Asset Management"
                },
                {
                    "controlId": "ID.RA-01",
                    "title": "Vulnerabilities in assets are identified, validated, and recorded",
                    "family": "Risk Assessment"
                },
                {
                    "controlId": "PR.DS-01",
                    "title": "The confidentiality, integrity, and availability of data-at-rest are protected",
                    "family": "Data Security",
                    "references": ["SP 800-53 SC-28"]
                },
                {
                    "controlId": "DE.CM-01",
                    "title": "Networks and network services are monitored",
                    "family": "Continuous Monitoring"
                },
                {
                    "controlId": "RS.MA-01",
                    "title": "The incident response plan is executed",
                    "family": "Incident Management"
                }
            ]
        }
    })
}

/// Write `value` as JSON into `dir/name`
pub fn write_json(dir: &Path, name: &str, value: &Value) -> PathBuf {
    let path = dir.join(name);
    let text = serde_json::to_string_pretty(value).unwrap();
    std::fs::write(&path, text).unwrap();
    path
}

/// Identifiers of the controls of a catalog document, in order
pub fn control_ids(document: &Value) -> Vec<String> {
    document["catalog"]["securityControls"]
        .as_array()
        .map(|controls| {
            controls
                .iter()
                .filter_map(|c| c["controlId"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
