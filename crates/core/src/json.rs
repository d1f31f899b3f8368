//! Nullable JSON object
//!
//! This module defines:
//! - JsonMap: the object payload (string keys, dynamically typed values)
//! - NullJson: a JSON object that may be absent
//!
//! # Absence
//!
//! An absent `NullJson` holds no map at all, never an empty map. A present
//! empty object `{}` is a distinct, valid value.
//!
//! # Equality
//!
//! [`NullJson::eq_value`] compares canonical serializations: keys are sorted
//! at every nesting level before encoding, so the comparison does not depend
//! on insertion order or on how `serde_json` was built.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value as JsonValue;
use std::fmt;
use tracing::debug;

use crate::driver::DriverValue;
use crate::error::{Error, Result};
use crate::traits::{BindStr, Nullable, Scanner, Valuer, WireCodec};

/// JSON object payload
pub type JsonMap = serde_json::Map<String, JsonValue>;

const TYPE_NAME: &str = "NullJson";

/// Rebuild a value with every object's keys inserted in sorted order
fn canonicalize(value: &JsonValue) -> JsonValue {
    match value {
        JsonValue::Object(map) => JsonValue::Object(canonical_map(map)),
        JsonValue::Array(items) => JsonValue::Array(items.iter().map(canonicalize).collect()),
        other => other.clone(),
    }
}

fn canonical_map(map: &JsonMap) -> JsonMap {
    let mut keys: Vec<&String> = map.keys().collect();
    keys.sort();
    keys.into_iter()
        .map(|k| (k.clone(), canonicalize(&map[k.as_str()])))
        .collect()
}

/// A JSON object that may be absent
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NullJson {
    valid: bool,
    map: Option<JsonMap>,
}

impl NullJson {
    /// Create a present object
    pub fn new(map: JsonMap) -> Self {
        NullJson {
            valid: true,
            map: Some(map),
        }
    }

    /// Create an absent object
    pub fn null() -> Self {
        NullJson::default()
    }

    /// Present iff `map` is `Some`
    pub fn from_map(map: Option<JsonMap>) -> Self {
        map.map(NullJson::new).unwrap_or_default()
    }

    /// Parse JSON object text, yielding absent on failure
    pub fn as_json(text: &str) -> Self {
        let mut j = NullJson::null();
        j.bind_str(text);
        j
    }

    /// True iff a value is present
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Borrow the payload (`None` when absent)
    pub fn map(&self) -> Option<&JsonMap> {
        self.map.as_ref()
    }

    /// Look up a top-level field
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.map.as_ref().and_then(|m| m.get(key))
    }

    /// Store `map` and mark present
    pub fn set(&mut self, map: JsonMap) {
        self.valid = true;
        self.map = Some(map);
    }

    /// Returns true if present and canonically equal to `other`
    ///
    /// An absent receiver is never equal, even to another absent value.
    pub fn eq_value(&self, other: &NullJson) -> bool {
        self.valid && self.canonical_string() == other.canonical_string()
    }

    /// Delete `fields` from the payload in place
    ///
    /// No-op on an absent object. Missing keys are ignored.
    pub fn remove_fields<I, S>(&mut self, fields: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if let Some(map) = self.map.as_mut() {
            for field in fields {
                map.remove(field.as_ref());
            }
        }
    }

    /// Convert to `Option<JsonMap>`
    pub fn into_option(self) -> Option<JsonMap> {
        if self.valid {
            self.map
        } else {
            None
        }
    }

    /// Canonical JSON text, `null` when absent
    pub fn canonical_string(&self) -> String {
        match (self.valid, self.map.as_ref()) {
            (true, Some(map)) => JsonValue::Object(canonical_map(map)).to_string(),
            _ => JsonValue::Null.to_string(),
        }
    }
}

impl fmt::Display for NullJson {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical_string())
    }
}

impl From<JsonMap> for NullJson {
    fn from(map: JsonMap) -> Self {
        NullJson::new(map)
    }
}

impl From<Option<JsonMap>> for NullJson {
    fn from(map: Option<JsonMap>) -> Self {
        NullJson::from_map(map)
    }
}

impl From<NullJson> for Option<JsonMap> {
    fn from(value: NullJson) -> Self {
        value.into_option()
    }
}

impl Nullable for NullJson {
    fn is_null(&self) -> bool {
        !self.valid
    }
}

impl BindStr for NullJson {
    fn bind_str(&mut self, text: &str) {
        match serde_json::from_str::<JsonMap>(text) {
            Ok(map) => self.set(map),
            Err(e) => {
                debug!(target: "nullable::bind", error = %e, "Text is not a JSON object, binding as null");
                *self = NullJson::null();
            }
        }
    }
}

impl Scanner for NullJson {
    fn scan(&mut self, value: DriverValue) -> Result<()> {
        match value {
            DriverValue::Null => {
                *self = NullJson::null();
                Ok(())
            }
            DriverValue::Text(text) => self.unmarshal_json(text.as_bytes()),
            DriverValue::Bytes(bytes) => self.unmarshal_json(&bytes),
            other => Err(Error::unsupported(TYPE_NAME, &other)),
        }
    }
}

impl Valuer for NullJson {
    fn driver_value(&self) -> Result<DriverValue> {
        match (self.valid, self.map.as_ref()) {
            (true, Some(map)) => Ok(DriverValue::Text(serde_json::to_string(map)?)),
            _ => Ok(DriverValue::Null),
        }
    }
}

impl Serialize for NullJson {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match (self.valid, self.map.as_ref()) {
            (true, Some(map)) => map.serialize(serializer),
            _ => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for NullJson {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Option::<JsonMap>::deserialize(deserializer).map(NullJson::from_map)
    }
}

impl WireCodec for NullJson {}
