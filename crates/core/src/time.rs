//! Nullable timestamp
//!
//! The canonical text form is RFC 3339. Text binding, wire decoding and
//! driver text all require that profile and reject anything else.
//!
//! ## Formatting
//!
//! Output uses `Z` for a zero offset and emits fractional seconds only when
//! they are non-zero, so every instant survives a wire round trip.

use chrono::{DateTime, Datelike, FixedOffset, SecondsFormat, TimeZone};
use serde::{de, ser, Deserialize, Deserializer, Serialize, Serializer};
use tracing::{debug, warn};

use crate::driver::DriverValue;
use crate::error::{Error, Result};
use crate::traits::{BindStr, Nullable, Scanner, Valuer, WireCodec};

const TYPE_NAME: &str = "NullTime";

/// Years RFC 3339 can represent (four digits)
const RFC3339_YEARS: std::ops::RangeInclusive<i32> = 0..=9999;

/// Parse RFC 3339 text
pub fn parse_rfc3339(text: &str) -> Result<DateTime<FixedOffset>> {
    Ok(DateTime::parse_from_rfc3339(text)?)
}

/// Format as RFC 3339
pub fn format_rfc3339(value: &DateTime<FixedOffset>) -> String {
    value.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// A timezone-aware instant that may be absent
///
/// The zero payload is the Unix epoch at offset `+00:00`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct NullTime {
    valid: bool,
    value: DateTime<FixedOffset>,
}

impl NullTime {
    /// Create a present timestamp
    pub fn new(value: DateTime<FixedOffset>) -> Self {
        NullTime { valid: true, value }
    }

    /// Create an absent timestamp
    pub fn null() -> Self {
        NullTime::default()
    }

    /// Parse RFC 3339 text, yielding absent on failure
    pub fn ts(text: &str) -> Self {
        let mut t = NullTime::null();
        t.bind_str(text);
        t
    }

    /// True iff a value is present
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// The payload (the epoch when absent)
    #[inline]
    pub fn value(&self) -> DateTime<FixedOffset> {
        self.value
    }

    /// Store `value` and mark present
    pub fn set(&mut self, value: DateTime<FixedOffset>) {
        self.valid = true;
        self.value = value;
    }

    /// Returns true if present and the same instant as `other`
    ///
    /// Offsets are ignored; only the instant is compared.
    pub fn eq_value<Tz: TimeZone>(&self, other: &DateTime<Tz>) -> bool {
        self.valid && self.value == *other
    }

    /// Convert to `Option<DateTime<FixedOffset>>`
    pub fn into_option(self) -> Option<DateTime<FixedOffset>> {
        self.valid.then_some(self.value)
    }
}

impl From<DateTime<FixedOffset>> for NullTime {
    fn from(value: DateTime<FixedOffset>) -> Self {
        NullTime::new(value)
    }
}

impl From<Option<DateTime<FixedOffset>>> for NullTime {
    fn from(value: Option<DateTime<FixedOffset>>) -> Self {
        value.map(NullTime::new).unwrap_or_default()
    }
}

impl From<NullTime> for Option<DateTime<FixedOffset>> {
    fn from(value: NullTime) -> Self {
        value.into_option()
    }
}

impl Nullable for NullTime {
    fn is_null(&self) -> bool {
        !self.valid
    }
}

impl BindStr for NullTime {
    fn bind_str(&mut self, text: &str) {
        match parse_rfc3339(text) {
            Ok(value) => self.set(value),
            Err(e) => {
                debug!(target: "nullable::bind", len = text.len(), error = %e, "Text is not RFC 3339, binding as null");
                *self = NullTime::null();
            }
        }
    }
}

impl Scanner for NullTime {
    fn scan(&mut self, value: DriverValue) -> Result<()> {
        *self = match value {
            DriverValue::Null => NullTime::null(),
            DriverValue::Text(text) => match parse_rfc3339(&text) {
                Ok(parsed) => NullTime::new(parsed),
                Err(e) => {
                    warn!(target: "nullable::scan", len = text.len(), error = %e, "Driver text is not RFC 3339");
                    return Err(e);
                }
            },
            DriverValue::Time(t) => NullTime::new(t),
            other => return Err(Error::unsupported(TYPE_NAME, &other)),
        };
        Ok(())
    }
}

impl Valuer for NullTime {
    fn driver_value(&self) -> Result<DriverValue> {
        if self.valid {
            return Ok(DriverValue::Time(self.value));
        }
        Ok(DriverValue::Null)
    }
}

impl Serialize for NullTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        if self.valid {
            let year = self.value.year();
            if !RFC3339_YEARS.contains(&year) {
                return Err(ser::Error::custom(format!(
                    "year {} outside RFC 3339 range [0,9999]",
                    year
                )));
            }
            serializer.serialize_str(&format_rfc3339(&self.value))
        } else {
            serializer.serialize_none()
        }
    }
}

impl<'de> Deserialize<'de> for NullTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(NullTime::null()),
            Some(text) => DateTime::parse_from_rfc3339(&text)
                .map(NullTime::new)
                .map_err(de::Error::custom),
        }
    }
}

impl WireCodec for NullTime {}
