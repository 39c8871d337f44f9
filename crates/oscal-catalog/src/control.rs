//! Control records
//!
//! A control is loosely typed in the source data: only `controlId`, `title`
//! and `family` are interpreted, and even those may be missing or hold
//! something other than a string. Every other key rides along untouched.

use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};

/// Key holding the control identifier
pub const CONTROL_ID_KEY: &str = "controlId";
/// Key holding the control title
pub const TITLE_KEY: &str = "title";
/// Key holding the control family
pub const FAMILY_KEY: &str = "family";

/// One control record of a catalog
///
/// The typed fields are populated only when the source holds a string under
/// the corresponding key. A non-string value stays in [`Control::extra`]
/// exactly as it was read, so it is written back unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Control {
    /// `controlId`, the sole matching key
    pub control_id: Option<String>,
    /// `title`
    pub title: Option<String>,
    /// `family` (grouping label)
    pub family: Option<String>,
    /// Every key in source order
    ///
    /// A key whose string value was lifted into a typed field holds `null`
    /// here, marking where the typed value is written back. Clearing that
    /// typed field leaves the `null` in place.
    pub extra: Map<String, Value>,
}

impl Control {
    /// Create a control with the given identifier
    #[inline]
    #[must_use]
    pub fn new(control_id: impl Into<String>) -> Self {
        let mut extra = Map::new();
        extra.insert(CONTROL_ID_KEY.to_string(), Value::Null);
        Self {
            control_id: Some(control_id.into()),
            extra,
            ..Self::default()
        }
    }

    /// With title
    #[inline]
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.extra.entry(TITLE_KEY).or_insert(Value::Null);
        self.title = Some(title.into());
        self
    }

    /// With family
    #[inline]
    #[must_use]
    pub fn with_family(mut self, family: impl Into<String>) -> Self {
        self.extra.entry(FAMILY_KEY).or_insert(Value::Null);
        self.family = Some(family.into());
        self
    }

    /// With an additional pass-through field
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Identifier used for matching, if the control has a string one
    #[inline]
    #[must_use]
    pub fn control_id(&self) -> Option<&str> {
        self.control_id.as_deref()
    }

    /// Split a raw JSON object into typed fields and pass-through fields
    #[must_use]
    pub fn from_map(mut map: Map<String, Value>) -> Self {
        let control_id = take_string(&mut map, CONTROL_ID_KEY);
        let title = take_string(&mut map, TITLE_KEY);
        let family = take_string(&mut map, FAMILY_KEY);
        Self {
            control_id,
            title,
            family,
            extra: map,
        }
    }

    /// Reassemble the raw JSON object
    #[must_use]
    pub fn into_map(self) -> Map<String, Value> {
        let mut typed = [
            (CONTROL_ID_KEY, self.control_id),
            (TITLE_KEY, self.title),
            (FAMILY_KEY, self.family),
        ];

        let mut map = Map::with_capacity(self.extra.len() + typed.len());
        for (key, value) in self.extra {
            let value = match typed.iter_mut().find(|(typed_key, _)| *typed_key == key) {
                Some((_, slot)) => slot.take().map_or(value, Value::String),
                None => value,
            };
            map.insert(key, value);
        }
        for (key, value) in typed {
            if let Some(value) = value {
                map.insert(key.to_string(), Value::String(value));
            }
        }
        map
    }

    fn typed(&self, key: &str) -> Option<&String> {
        match key {
            CONTROL_ID_KEY => self.control_id.as_ref(),
            TITLE_KEY => self.title.as_ref(),
            FAMILY_KEY => self.family.as_ref(),
            _ => None,
        }
    }
}

/// Lift a string value out of `map`, leaving `null` at its position
fn take_string(map: &mut Map<String, Value>, key: &str) -> Option<String> {
    let slot = map.get_mut(key)?;
    if !slot.is_string() {
        return None;
    }
    match std::mem::take(slot) {
        Value::String(s) => Some(s),
        _ => None,
    }
}

impl From<Control> for Value {
    fn from(control: Control) -> Self {
        Value::Object(control.into_map())
    }
}

impl Serialize for Control {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // Typed values set without a position marker go last
        let unplaced: Vec<(&str, &String)> = [CONTROL_ID_KEY, TITLE_KEY, FAMILY_KEY]
            .into_iter()
            .filter(|key| !self.extra.contains_key(*key))
            .filter_map(|key| self.typed(key).map(|value| (key, value)))
            .collect();

        let mut map = serializer.serialize_map(Some(self.extra.len() + unplaced.len()))?;
        for (key, value) in &self.extra {
            match self.typed(key) {
                Some(typed) => map.serialize_entry(key, typed)?,
                None => map.serialize_entry(key, value)?,
            }
        }
        for (key, value) in unplaced {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Control {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Map::deserialize(deserializer).map(Self::from_map)
    }
}
