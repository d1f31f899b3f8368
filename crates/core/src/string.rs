//! Nullable string
//!
//! The empty string is a second null signal: binding `""` from text and
//! decoding the `""` literal from JSON both yield an absent value. A present
//! empty string is only reachable through [`NullString::new`] or `set`.

use chrono::SecondsFormat;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha3::{Digest, Sha3_256};

use crate::driver::DriverValue;
use crate::error::Result;
use crate::traits::{BindStr, Nullable, Scanner, Valuer, WireCodec};

/// Length of the hex digest produced by [`NullString::hash_sum256`]
pub const DIGEST_HEX_LEN: usize = 64;

/// A string that may be absent
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NullString {
    valid: bool,
    value: String,
}

impl NullString {
    /// Create a present string
    pub fn new(value: impl Into<String>) -> Self {
        NullString {
            valid: true,
            value: value.into(),
        }
    }

    /// Create an absent string
    pub const fn null() -> Self {
        NullString {
            valid: false,
            value: String::new(),
        }
    }

    /// Map an external sentinel onto absence
    ///
    /// Returns an absent string when `s` holds exactly `sentinel`,
    /// otherwise returns `s` unchanged.
    pub fn coalesce_sentinel(sentinel: &str, s: NullString) -> NullString {
        if s.value == sentinel {
            return NullString::null();
        }
        s
    }

    /// True iff a value is present
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// The payload (`""` when absent)
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Store `value` and mark present
    pub fn set(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.valid = true;
    }

    /// Returns true if present and equal to `other`
    pub fn eq_value(&self, other: &str) -> bool {
        self.valid && self.value == other
    }

    /// Borrow as `Option<&str>`
    pub fn as_option(&self) -> Option<&str> {
        self.valid.then_some(self.value.as_str())
    }

    /// Convert to `Option<String>`
    pub fn into_option(self) -> Option<String> {
        self.valid.then_some(self.value)
    }

    /// SHA3-256 digest of the payload bytes, as lowercase hex
    ///
    /// Absent values hash their empty payload like any other string.
    pub fn hash_sum256(&self) -> NullString {
        let digest = Sha3_256::digest(self.value.as_bytes());
        NullString::new(hex::encode(digest))
    }
}

impl From<&str> for NullString {
    fn from(value: &str) -> Self {
        NullString::new(value)
    }
}

impl From<String> for NullString {
    fn from(value: String) -> Self {
        NullString::new(value)
    }
}

impl From<Option<String>> for NullString {
    fn from(value: Option<String>) -> Self {
        value.map(NullString::new).unwrap_or_default()
    }
}

impl From<NullString> for Option<String> {
    fn from(value: NullString) -> Self {
        value.into_option()
    }
}

impl Nullable for NullString {
    fn is_null(&self) -> bool {
        !self.valid
    }
}

impl BindStr for NullString {
    fn bind_str(&mut self, text: &str) {
        self.value = text.to_string();
        self.valid = !self.value.is_empty();
    }
}

impl Scanner for NullString {
    fn scan(&mut self, value: DriverValue) -> Result<()> {
        *self = match value {
            DriverValue::Null => NullString::null(),
            DriverValue::Text(text) => NullString::new(text),
            DriverValue::Bytes(bytes) => NullString::new(String::from_utf8(bytes)?),
            DriverValue::Int(i) => NullString::new(i.to_string()),
            DriverValue::Float(f) => NullString::new(f.to_string()),
            DriverValue::Bool(b) => NullString::new(b.to_string()),
            DriverValue::Time(t) => NullString::new(t.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
        };
        Ok(())
    }
}

impl Valuer for NullString {
    fn driver_value(&self) -> Result<DriverValue> {
        if !self.valid {
            return Ok(DriverValue::Null);
        }
        Ok(DriverValue::Text(self.value.clone()))
    }
}

impl Serialize for NullString {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        if self.valid {
            serializer.serialize_str(&self.value)
        } else {
            serializer.serialize_none()
        }
    }
}

impl<'de> Deserialize<'de> for NullString {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let decoded = Option::<String>::deserialize(deserializer)?;
        Ok(decoded
            .filter(|s| !s.is_empty())
            .map(NullString::new)
            .unwrap_or_default())
    }
}

impl WireCodec for NullString {}
