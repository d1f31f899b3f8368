//! Nullable 64-bit signed integer

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

use crate::driver::DriverValue;
use crate::error::{Error, Result};
use crate::traits::{BindStr, Nullable, Scanner, Valuer, WireCodec};

const TYPE_NAME: &str = "NullI64";

/// An i64 that may be absent
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct NullI64 {
    valid: bool,
    value: i64,
}

impl NullI64 {
    /// Create a present integer
    pub const fn new(value: i64) -> Self {
        NullI64 { valid: true, value }
    }

    /// Create an absent integer
    pub const fn null() -> Self {
        NullI64 {
            valid: false,
            value: 0,
        }
    }

    /// True iff a value is present
    #[inline]
    pub const fn is_valid(&self) -> bool {
        self.valid
    }

    /// The payload (`0` when absent)
    #[inline]
    pub const fn value(&self) -> i64 {
        self.value
    }

    /// Store `value` and mark present
    pub fn set(&mut self, value: i64) {
        self.value = value;
        self.valid = true;
    }

    /// Returns true if present and equal to `other`
    pub fn eq_value(&self, other: i64) -> bool {
        self.valid && self.value == other
    }

    /// Convert to `Option<i64>`
    pub fn into_option(self) -> Option<i64> {
        self.valid.then_some(self.value)
    }
}

/// Float driver values are accepted only when they hold an exact integer
fn integral(f: f64) -> Option<i64> {
    // i64::MAX as f64 rounds up to 2^63, which is out of range
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

impl From<i64> for NullI64 {
    fn from(value: i64) -> Self {
        NullI64::new(value)
    }
}

impl From<Option<i64>> for NullI64 {
    fn from(value: Option<i64>) -> Self {
        value.map(NullI64::new).unwrap_or_default()
    }
}

impl From<NullI64> for Option<i64> {
    fn from(value: NullI64) -> Self {
        value.into_option()
    }
}

impl Nullable for NullI64 {
    fn is_null(&self) -> bool {
        !self.valid
    }
}

impl BindStr for NullI64 {
    fn bind_str(&mut self, text: &str) {
        match text.parse::<i64>() {
            Ok(value) => self.set(value),
            Err(e) => {
                debug!(target: "nullable::bind", len = text.len(), error = %e, "Unparsable integer text, binding as null");
                *self = NullI64::null();
            }
        }
    }
}

impl Scanner for NullI64 {
    fn scan(&mut self, value: DriverValue) -> Result<()> {
        let scanned = match value {
            DriverValue::Null => None,
            DriverValue::Int(i) => Some(i),
            DriverValue::Float(f) => {
                Some(integral(f).ok_or_else(|| Error::invalid_text(TYPE_NAME, f.to_string()))?)
            }
            DriverValue::Text(ref text) => Some(
                text.parse::<i64>()
                    .map_err(|_| Error::invalid_text(TYPE_NAME, text.as_str()))?,
            ),
            DriverValue::Bytes(ref bytes) => Some(
                std::str::from_utf8(bytes)
                    .ok()
                    .and_then(|text| text.parse::<i64>().ok())
                    .ok_or_else(|| Error::invalid_text(TYPE_NAME, String::from_utf8_lossy(bytes)))?,
            ),
            other => return Err(Error::unsupported(TYPE_NAME, &other)),
        };

        *self = scanned.into();
        Ok(())
    }
}

impl Valuer for NullI64 {
    fn driver_value(&self) -> Result<DriverValue> {
        if !self.valid {
            return Ok(DriverValue::Null);
        }
        Ok(DriverValue::Int(self.value))
    }
}

impl Serialize for NullI64 {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        if self.valid {
            serializer.serialize_i64(self.value)
        } else {
            serializer.serialize_none()
        }
    }
}

impl<'de> Deserialize<'de> for NullI64 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Option::<i64>::deserialize(deserializer).map(NullI64::from)
    }
}

impl WireCodec for NullI64 {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_eq_value() {
        assert!(NullI64::new(42).eq_value(42));
        assert!(!NullI64::new(42).eq_value(41));
        assert!(!NullI64::null().eq_value(0));
    }

    #[test]
    fn test_int_bind_str() {
        let mut i = NullI64::null();
        i.bind_str("-17");
        assert_eq!(i, NullI64::new(-17));

        i.bind_str("+8");
        assert_eq!(i, NullI64::new(8));

        i.bind_str("4.5");
        assert!(i.is_null());
        assert_eq!(i.value(), 0);

        i.set(3);
        i.bind_str("99999999999999999999");
        assert!(i.is_null());
        assert_eq!(i.value(), 0);
    }

    #[test]
    fn test_int_wire() {
        assert_eq!(NullI64::new(42).marshal_json().unwrap(), b"42");
        assert_eq!(NullI64::default().marshal_json().unwrap(), b"null");

        let mut i = NullI64::null();
        i.unmarshal_json(b"-5").unwrap();
        assert_eq!(i, NullI64::new(-5));

        i.unmarshal_json(b"null").unwrap();
        assert!(i.is_null());

        i.set(1);
        i.unmarshal_json(b"").unwrap();
        assert!(i.is_null());

        assert!(i.unmarshal_json(b"\"5\"").is_err());
        assert!(i.unmarshal_json(b"1.5").is_err());
    }

    #[test]
    fn test_int_driver_value() {
        assert_eq!(NullI64::new(7).driver_value().unwrap(), DriverValue::Int(7));
        assert_eq!(NullI64::null().driver_value().unwrap(), DriverValue::Null);
    }

    #[test]
    fn test_int_scan_shapes() {
        let mut i = NullI64::null();

        i.scan(DriverValue::Int(10)).unwrap();
        assert_eq!(i, NullI64::new(10));

        i.scan(DriverValue::Text("-3".into())).unwrap();
        assert_eq!(i, NullI64::new(-3));

        i.scan(DriverValue::Bytes(b"12".to_vec())).unwrap();
        assert_eq!(i, NullI64::new(12));

        i.scan(DriverValue::Float(6.0)).unwrap();
        assert_eq!(i, NullI64::new(6));

        i.scan(DriverValue::Null).unwrap();
        assert!(i.is_null());
    }

    #[test]
    fn test_int_scan_rejects() {
        let mut i = NullI64::new(1);
        assert!(i.scan(DriverValue::Float(1.5)).is_err());
        assert!(i.scan(DriverValue::Text("one".into())).is_err());
        assert!(matches!(
            i.scan(DriverValue::Bool(true)),
            Err(Error::UnsupportedDriverValue { .. })
        ));
        assert_eq!(i, NullI64::new(1));
    }
}
