//! Nullable boolean
//!
//! `NullBool` is the one variant whose driver value never uses the null
//! marker: absent and `false` are both persisted as the text token `"0"`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

use crate::driver::DriverValue;
use crate::error::{Error, Result};
use crate::traits::{BindStr, Nullable, Scanner, Valuer, WireCodec};

/// Driver token written for a present `true`
pub const BOOL_TRUE_TOKEN: &str = "1";

/// Driver token written for `false` and for absent values
pub const BOOL_FALSE_TOKEN: &str = "0";

const TYPE_NAME: &str = "NullBool";

/// Parse a boolean token
///
/// Accepts `1 t T TRUE true True` and `0 f F FALSE false False`.
pub fn parse_bool_token(text: &str) -> Option<bool> {
    match text {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

/// A boolean that may be absent
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct NullBool {
    valid: bool,
    value: bool,
}

impl NullBool {
    /// Create a present boolean
    pub const fn new(value: bool) -> Self {
        NullBool { valid: true, value }
    }

    /// Create an absent boolean
    pub const fn null() -> Self {
        NullBool {
            valid: false,
            value: false,
        }
    }

    /// True iff a value is present
    #[inline]
    pub const fn is_valid(&self) -> bool {
        self.valid
    }

    /// The payload (`false` when absent)
    #[inline]
    pub const fn value(&self) -> bool {
        self.value
    }

    /// Store `value` and mark present
    pub fn set(&mut self, value: bool) {
        self.valid = true;
        self.value = value;
    }

    /// Returns true if present and equal to `other`
    ///
    /// Absence never equals anything.
    pub fn eq_value(&self, other: bool) -> bool {
        self.valid && self.value == other
    }

    /// Convert to `Option<bool>`
    pub fn into_option(self) -> Option<bool> {
        self.valid.then_some(self.value)
    }
}

impl From<bool> for NullBool {
    fn from(value: bool) -> Self {
        NullBool::new(value)
    }
}

impl From<Option<bool>> for NullBool {
    fn from(value: Option<bool>) -> Self {
        value.map(NullBool::new).unwrap_or_default()
    }
}

impl From<NullBool> for Option<bool> {
    fn from(value: NullBool) -> Self {
        value.into_option()
    }
}

impl Nullable for NullBool {
    fn is_null(&self) -> bool {
        !self.valid
    }
}

impl BindStr for NullBool {
    fn bind_str(&mut self, text: &str) {
        match parse_bool_token(text) {
            Some(value) => self.set(value),
            None => {
                debug!(target: "nullable::bind", len = text.len(), "Unrecognized boolean text, binding as null");
                *self = NullBool::null();
            }
        }
    }
}

impl Scanner for NullBool {
    fn scan(&mut self, value: DriverValue) -> Result<()> {
        let scanned = match value {
            DriverValue::Null => None,
            DriverValue::Bool(b) => Some(b),
            DriverValue::Int(1) => Some(true),
            DriverValue::Int(0) => Some(false),
            DriverValue::Text(ref text) => Some(
                parse_bool_token(text).ok_or_else(|| Error::invalid_text(TYPE_NAME, text.as_str()))?,
            ),
            DriverValue::Bytes(ref bytes) => Some(
                std::str::from_utf8(bytes)
                    .ok()
                    .and_then(parse_bool_token)
                    .ok_or_else(|| Error::invalid_text(TYPE_NAME, String::from_utf8_lossy(bytes)))?,
            ),
            other => return Err(Error::unsupported(TYPE_NAME, &other)),
        };

        *self = scanned.into();
        Ok(())
    }
}

impl Valuer for NullBool {
    fn driver_value(&self) -> Result<DriverValue> {
        // Absent is written as "0", never as the null marker.
        let token = if self.valid && self.value {
            BOOL_TRUE_TOKEN
        } else {
            BOOL_FALSE_TOKEN
        };
        Ok(DriverValue::Text(token.to_string()))
    }
}

impl Serialize for NullBool {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        if self.valid {
            serializer.serialize_bool(self.value)
        } else {
            serializer.serialize_none()
        }
    }
}

impl<'de> Deserialize<'de> for NullBool {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Option::<bool>::deserialize(deserializer).map(NullBool::from)
    }
}

impl WireCodec for NullBool {}
