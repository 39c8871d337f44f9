//! Catalog documents
//!
//! Only the `catalog.securityControls` path is required. Every other key, at
//! the document root and inside `catalog`, is kept in its original position
//! so a written document diffs cleanly against its source.

use crate::control::Control;
use crate::error::StructureError;
use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};

/// Top-level key holding the catalog
pub const CATALOG_KEY: &str = "catalog";
/// Catalog key holding the control sequence
pub const SECURITY_CONTROLS_KEY: &str = "securityControls";
/// Catalog key holding the title
pub const CATALOG_TITLE_KEY: &str = "title";
/// Catalog key holding the description
pub const CATALOG_DESCRIPTION_KEY: &str = "description";

/// The `catalog` mapping
///
/// `fields` keeps a `null` placeholder under `securityControls` so the
/// control sequence is written back at its original position.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    fields: Map<String, Value>,
    controls: Vec<Control>,
}

impl Catalog {
    /// Create an empty catalog with a title and description
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        let mut fields = Map::new();
        fields.insert(CATALOG_TITLE_KEY.to_string(), Value::String(title.into()));
        fields.insert(
            CATALOG_DESCRIPTION_KEY.to_string(),
            Value::String(description.into()),
        );
        fields.insert(SECURITY_CONTROLS_KEY.to_string(), Value::Null);
        Self {
            fields,
            controls: Vec::new(),
        }
    }

    /// With controls
    #[must_use]
    pub fn with_controls(mut self, controls: Vec<Control>) -> Self {
        self.set_controls(controls);
        self
    }

    /// Parse the `catalog` mapping
    ///
    /// # Errors
    /// - `StructureError::MissingSecurityControls` if the key is absent
    /// - `StructureError::ControlsNotSequence` if it is not an array
    /// - `StructureError::MalformedControl` if an entry is not an object
    pub fn from_map(mut fields: Map<String, Value>) -> Result<Self, StructureError> {
        let slot = fields
            .get_mut(SECURITY_CONTROLS_KEY)
            .ok_or(StructureError::MissingSecurityControls)?;

        let Value::Array(items) = std::mem::take(slot) else {
            return Err(StructureError::ControlsNotSequence);
        };

        let controls = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| match item {
                Value::Object(map) => Ok(Control::from_map(map)),
                _ => Err(StructureError::MalformedControl { index }),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { fields, controls })
    }

    /// Reassemble the raw `catalog` mapping
    #[must_use]
    pub fn into_map(self) -> Map<String, Value> {
        let mut fields = self.fields;
        let controls = Value::Array(self.controls.into_iter().map(Value::from).collect());
        fields.insert(SECURITY_CONTROLS_KEY.to_string(), controls);
        fields
    }

    /// Catalog title, if present as a string
    #[inline]
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.fields.get(CATALOG_TITLE_KEY).and_then(Value::as_str)
    }

    /// Replace the catalog title
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.fields
            .insert(CATALOG_TITLE_KEY.to_string(), Value::String(title.into()));
    }

    /// Catalog description, if present as a string
    #[inline]
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.fields
            .get(CATALOG_DESCRIPTION_KEY)
            .and_then(Value::as_str)
    }

    /// Replace the catalog description
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.fields.insert(
            CATALOG_DESCRIPTION_KEY.to_string(),
            Value::String(description.into()),
        );
    }

    /// Controls in catalog order
    #[inline]
    #[must_use]
    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    /// Replace the control sequence
    pub fn set_controls(&mut self, controls: Vec<Control>) {
        self.fields.entry(SECURITY_CONTROLS_KEY).or_insert(Value::Null);
        self.controls = controls;
    }

    /// Take the control sequence out, leaving it empty
    pub fn take_controls(&mut self) -> Vec<Control> {
        std::mem::take(&mut self.controls)
    }

    /// Any other catalog field
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&Value> {
        if key == SECURITY_CONTROLS_KEY {
            return None;
        }
        self.fields.get(key)
    }

    /// Copy of everything but the controls
    pub(crate) fn metadata_only(&self) -> Self {
        Self {
            fields: self.fields.clone(),
            controls: Vec::new(),
        }
    }
}

impl Serialize for Catalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            if key == SECURITY_CONTROLS_KEY {
                map.serialize_entry(key, &self.controls)?;
            } else {
                map.serialize_entry(key, value)?;
            }
        }
        map.end()
    }
}

/// A whole catalog document
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogDocument {
    fields: Map<String, Value>,
    catalog: Catalog,
}

impl CatalogDocument {
    /// Wrap a catalog in a document with no other top-level keys
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        let mut fields = Map::new();
        fields.insert(CATALOG_KEY.to_string(), Value::Null);
        Self { fields, catalog }
    }

    /// Check the document shape and split out the catalog
    ///
    /// # Errors
    /// Returns a [`StructureError`] when the document has no
    /// `catalog.securityControls` sequence of objects.
    pub fn from_value(value: Value) -> Result<Self, StructureError> {
        let Value::Object(mut fields) = value else {
            return Err(StructureError::NotObject);
        };

        let slot = fields
            .get_mut(CATALOG_KEY)
            .ok_or(StructureError::MissingCatalog)?;

        let Value::Object(catalog) = std::mem::take(slot) else {
            return Err(StructureError::CatalogNotObject);
        };

        let catalog = Catalog::from_map(catalog)?;
        Ok(Self { fields, catalog })
    }

    /// The catalog
    #[inline]
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The catalog, mutably
    #[inline]
    pub fn catalog_mut(&mut self) -> &mut Catalog {
        &mut self.catalog
    }

    /// Controls of the catalog, in order
    #[inline]
    #[must_use]
    pub fn controls(&self) -> &[Control] {
        self.catalog.controls()
    }

    /// Any other top-level field
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&Value> {
        if key == CATALOG_KEY {
            return None;
        }
        self.fields.get(key)
    }

    /// Same top-level fields around a different catalog
    pub(crate) fn with_catalog(&self, catalog: Catalog) -> Self {
        Self {
            fields: self.fields.clone(),
            catalog,
        }
    }

    /// Consume into the raw JSON value
    #[must_use]
    pub fn into_value(self) -> Value {
        let mut fields = self.fields;
        fields.insert(
            CATALOG_KEY.to_string(),
            Value::Object(self.catalog.into_map()),
        );
        Value::Object(fields)
    }
}

impl TryFrom<Value> for CatalogDocument {
    type Error = StructureError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

impl From<CatalogDocument> for Value {
    fn from(document: CatalogDocument) -> Self {
        document.into_value()
    }
}

impl Serialize for CatalogDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            if key == CATALOG_KEY {
                map.serialize_entry(key, &self.catalog)?;
            } else {
                map.serialize_entry(key, value)?;
            }
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for CatalogDocument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(value).map_err(de::Error::custom)
    }
}
