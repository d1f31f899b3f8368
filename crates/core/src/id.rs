//! Nullable UUID identifier
//!
//! `NullUuid` carries a 128-bit identifier with three text forms:
//!
//! | Form | Length | Example |
//! |------|--------|---------|
//! | Canonical | 36 | `550e8400-e29b-41d4-a716-446655440000` |
//! | Hex | 32 | `550e8400e29b41d4a716446655440000` |
//! | Base62 | up to 22 | `2aUyqjCzEIiEcYMKj7TZtw` |
//!
//! ## Zero vs absent
//!
//! The all-zero identifier is a valid value ([`NullUuid::is_zero`]), distinct
//! from an absent identifier. The two are never conflated.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use tracing::debug;
use uuid::Uuid;

use crate::base62;
use crate::driver::DriverValue;
use crate::error::{Error, Result};
use crate::traits::{BindStr, Nullable, Scanner, Valuer, WireCodec};

/// Raw identifier length in bytes
pub const UUID_LEN: usize = 16;

/// Length of the unpunctuated hex form
pub const UUID_HEX_LEN: usize = 32;

/// Length of the canonical hyphenated form
pub const UUID_CANONICAL_LEN: usize = 36;

/// Longest base-62 token accepted for decoding
///
/// A 16-byte payload needs at most 22 symbols; longer tokens are still
/// decoded and truncated, up to this bound.
pub const MAX_BASE62_TOKEN_LEN: usize = 64;

const TYPE_NAME: &str = "NullUuid";

/// A UUID identifier that may be absent
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct NullUuid {
    valid: bool,
    value: Uuid,
}

impl NullUuid {
    /// Create a new random v4 identifier
    pub fn new_v4() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    /// Wrap a known identifier
    pub const fn from_uuid(value: Uuid) -> Self {
        NullUuid { valid: true, value }
    }

    /// Create from raw bytes
    pub const fn from_bytes(bytes: [u8; UUID_LEN]) -> Self {
        Self::from_uuid(Uuid::from_bytes(bytes))
    }

    /// Create an absent identifier
    pub const fn null() -> Self {
        NullUuid {
            valid: false,
            value: Uuid::nil(),
        }
    }

    /// Parse a base-62 token
    ///
    /// The decoded bytes fill a zeroed 16-byte buffer from the front:
    /// shorter results leave trailing zeros, longer results are truncated.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Base62`] for a malformed token and
    /// [`Error::InvalidIdentifier`] when the token is longer than
    /// [`MAX_BASE62_TOKEN_LEN`] or decodes to no bytes.
    pub fn parse_base62(text: &str) -> Result<Self> {
        let symbols = text.chars().count();
        if symbols > MAX_BASE62_TOKEN_LEN {
            return Err(Error::InvalidIdentifier(format!(
                "base62 token has {} symbols, max {}",
                symbols, MAX_BASE62_TOKEN_LEN
            )));
        }

        let decoded = base62::decode(text)?;
        if decoded.is_empty() {
            return Err(Error::InvalidIdentifier(format!(
                "base62 token {:?} decodes to no bytes",
                text
            )));
        }

        let mut raw = [0u8; UUID_LEN];
        let n = decoded.len().min(UUID_LEN);
        raw[..n].copy_from_slice(&decoded[..n]);
        Ok(Self::from_bytes(raw))
    }

    /// Parse the canonical hyphenated form
    ///
    /// Any textual form the `uuid` crate understands is accepted.
    pub fn parse_uuid(text: &str) -> Result<Self> {
        Ok(Self::from_uuid(Uuid::parse_str(text)?))
    }

    /// Parse the 32-character hex form
    pub fn parse_hex(text: &str) -> Result<Self> {
        if text.len() != UUID_HEX_LEN {
            return Err(Error::InvalidIdentifier(format!(
                "hex identifier must be {} characters, got {}",
                UUID_HEX_LEN,
                text.len()
            )));
        }

        let mut raw = [0u8; UUID_LEN];
        hex::decode_to_slice(text, &mut raw)?;
        Ok(Self::from_bytes(raw))
    }

    /// Parse any of the three text forms, chosen by length
    ///
    /// 36 characters is canonical, 32 is hex, anything else is base-62.
    /// A 16-byte payload never encodes to more than 22 base-62 symbols, so
    /// tokens produced by [`NullUuid::base62`] are never misrouted.
    pub fn parse(text: &str) -> Result<Self> {
        match text.len() {
            UUID_CANONICAL_LEN => Self::parse_uuid(text),
            UUID_HEX_LEN => Self::parse_hex(text),
            _ => Self::parse_base62(text),
        }
    }

    /// Parse a base-62 token, yielding absent on any failure
    pub fn id(text: &str) -> Self {
        Self::parse_base62(text).unwrap_or_else(|e| {
            debug!(target: "nullable::bind", len = text.len(), error = %e, "Invalid base62 identifier, using null");
            Self::null()
        })
    }

    /// True iff a value is present
    #[inline]
    pub const fn is_valid(&self) -> bool {
        self.valid
    }

    /// True iff present and all 128 bits are zero
    pub fn is_zero(&self) -> bool {
        self.valid && self.value.is_nil()
    }

    /// The payload (nil when absent)
    #[inline]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.value
    }

    /// Raw bytes of the payload
    pub fn as_bytes(&self) -> &[u8; UUID_LEN] {
        self.value.as_bytes()
    }

    /// Returns true if present and equal to `other`
    pub fn eq_value(&self, other: &Uuid) -> bool {
        self.valid && self.value == *other
    }

    /// Convert to `Option<Uuid>`
    pub fn into_option(self) -> Option<Uuid> {
        self.valid.then_some(self.value)
    }

    /// Base-62 encoding of the raw bytes
    pub fn base62(&self) -> String {
        base62::encode(self.value.as_bytes())
    }

    /// Lowercase hex encoding of the raw bytes
    pub fn hex(&self) -> String {
        hex::encode(self.value.as_bytes())
    }
}

impl fmt::Display for NullUuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value.hyphenated())
    }
}

impl From<Uuid> for NullUuid {
    fn from(value: Uuid) -> Self {
        NullUuid::from_uuid(value)
    }
}

impl From<Option<Uuid>> for NullUuid {
    fn from(value: Option<Uuid>) -> Self {
        value.map(NullUuid::from_uuid).unwrap_or_default()
    }
}

impl From<NullUuid> for Option<Uuid> {
    fn from(value: NullUuid) -> Self {
        value.into_option()
    }
}

impl Nullable for NullUuid {
    fn is_null(&self) -> bool {
        !self.valid
    }
}

/// Text binding reads base-62 only, the same as [`NullUuid::id`]
impl BindStr for NullUuid {
    fn bind_str(&mut self, text: &str) {
        *self = Self::id(text);
    }
}

impl Scanner for NullUuid {
    fn scan(&mut self, value: DriverValue) -> Result<()> {
        *self = match value {
            DriverValue::Null => Self::null(),
            // Drivers hand back an empty value for an empty identifier column
            DriverValue::Text(ref text) if text.is_empty() => Self::null(),
            DriverValue::Bytes(ref bytes) if bytes.is_empty() => Self::null(),
            DriverValue::Text(text) => Self::parse_uuid(&text)?,
            DriverValue::Bytes(bytes) => match <[u8; UUID_LEN]>::try_from(bytes.as_slice()) {
                Ok(raw) => Self::from_bytes(raw),
                Err(_) => Self::parse_uuid(&String::from_utf8(bytes)?)?,
            },
            other => return Err(Error::unsupported(TYPE_NAME, &other)),
        };
        Ok(())
    }
}

impl Valuer for NullUuid {
    fn driver_value(&self) -> Result<DriverValue> {
        if !self.valid {
            return Ok(DriverValue::Null);
        }
        Ok(DriverValue::Text(self.value.hyphenated().to_string()))
    }
}

impl Serialize for NullUuid {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        if self.valid {
            serializer.collect_str(&self.value.hyphenated())
        } else {
            serializer.serialize_none()
        }
    }
}

impl<'de> Deserialize<'de> for NullUuid {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Option::<Uuid>::deserialize(deserializer).map(NullUuid::from)
    }
}

impl WireCodec for NullUuid {}

#[cfg(test)]
mod tests {
    use super::*;

    const CANONICAL: &str = "550e8400-e29b-41d4-a716-446655440000";
    const HEX: &str = "550e8400e29b41d4a716446655440000";

    #[test]
    fn test_new_v4_is_valid_v4() {
        let id = NullUuid::new_v4();
        assert!(id.is_valid());
        assert!(!id.is_zero());
        assert_eq!(id.as_uuid().get_version_num(), 4);
        assert_ne!(id, NullUuid::new_v4());
    }

    #[test]
    fn test_zero_is_not_null() {
        let zero = NullUuid::from_uuid(Uuid::nil());
        assert!(zero.is_zero());
        assert!(!zero.is_null());

        let absent = NullUuid::null();
        assert!(!absent.is_zero());
        assert!(absent.is_null());
        assert_ne!(zero, absent);
    }

    #[test]
    fn test_text_forms() {
        let id = NullUuid::parse_uuid(CANONICAL).unwrap();
        assert_eq!(id.to_string(), CANONICAL);
        assert_eq!(id.hex(), HEX);
        assert_eq!(NullUuid::parse_hex(HEX).unwrap(), id);
        assert_eq!(NullUuid::parse_base62(&id.base62()).unwrap(), id);
        assert_eq!(id.base62(), "2aUyqjCzEIiEcYMKj7TZtw");
    }

    #[test]
    fn test_parse_dispatch() {
        let id = NullUuid::parse_uuid(CANONICAL).unwrap();
        assert_eq!(NullUuid::parse(CANONICAL).unwrap(), id);
        assert_eq!(NullUuid::parse(HEX).unwrap(), id);
        assert_eq!(NullUuid::parse(&id.base62()).unwrap(), id);
    }

    #[test]
    fn test_parse_base62_errors() {
        assert!(matches!(
            NullUuid::parse_base62("not-base62!"),
            Err(Error::Base62 { .. })
        ));
        assert!(matches!(
            NullUuid::parse_base62(""),
            Err(Error::InvalidIdentifier(_))
        ));
    }

    #[test]
    fn test_parse_base62_short_token_fills_front() {
        let id = NullUuid::parse_base62("1").unwrap();
        let mut expected = [0u8; UUID_LEN];
        expected[0] = 1;
        assert_eq!(id.as_bytes(), &expected);
    }

    #[test]
    fn test_parse_base62_all_zero() {
        let id = NullUuid::parse_base62(&"0".repeat(16)).unwrap();
        assert!(id.is_zero());
        assert_eq!(NullUuid::from_uuid(Uuid::nil()).base62(), "0".repeat(16));
    }

    #[test]
    fn test_parse_hex_errors() {
        assert!(NullUuid::parse_hex("abc").is_err());
        assert!(matches!(
            NullUuid::parse_hex("zz0e8400e29b41d4a716446655440000"),
            Err(Error::Hex(_))
        ));
    }

    #[test]
    fn test_id_is_lenient() {
        assert!(NullUuid::id("$$$").is_null());
        assert!(NullUuid::id("").is_null());
        let id = NullUuid::new_v4();
        assert_eq!(NullUuid::id(&id.base62()), id);
    }

    #[test]
    fn test_bind_str() {
        let mut id = NullUuid::new_v4();
        id.bind_str("definitely not an id");
        assert!(id.is_null());
        assert_eq!(id.as_uuid(), &Uuid::nil());

        let expected = NullUuid::parse_uuid(CANONICAL).unwrap();
        id.bind_str(&expected.base62());
        assert_eq!(id, expected);

        // Hyphens are not base-62 symbols
        id.bind_str(CANONICAL);
        assert!(id.is_null());
    }

    #[test]
    fn test_bind_str_matches_id_for_long_tokens() {
        for token in [
            format!("{}1", "0".repeat(31)),
            format!("{}1", "0".repeat(35)),
            "z".repeat(32),
        ] {
            let mut bound = NullUuid::null();
            bound.bind_str(&token);
            assert_eq!(bound, NullUuid::id(&token), "token {token}");
            assert!(bound.is_valid());
        }

        // 31 zero bytes then 0x01, truncated to the first 16 bytes
        let mut bound = NullUuid::null();
        bound.bind_str(&format!("{}1", "0".repeat(31)));
        assert!(bound.is_zero());
    }

    #[test]
    fn test_parse_base62_rejects_oversized_tokens() {
        let at_limit = "1".repeat(MAX_BASE62_TOKEN_LEN);
        assert!(NullUuid::parse_base62(&at_limit).is_ok());

        let too_long = "1".repeat(MAX_BASE62_TOKEN_LEN + 1);
        assert!(matches!(
            NullUuid::parse_base62(&too_long),
            Err(Error::InvalidIdentifier(_))
        ));
        assert!(NullUuid::id(&too_long).is_null());

        let mut bound = NullUuid::new_v4();
        bound.bind_str(&"z".repeat(10_000));
        assert!(bound.is_null());
    }

    #[test]
    fn test_eq_value() {
        let raw = Uuid::parse_str(CANONICAL).unwrap();
        assert!(NullUuid::from_uuid(raw).eq_value(&raw));
        assert!(!NullUuid::null().eq_value(&Uuid::nil()));
    }

    #[test]
    fn test_wire() {
        let id = NullUuid::parse_uuid(CANONICAL).unwrap();
        assert_eq!(
            id.marshal_json().unwrap(),
            format!("\"{}\"", CANONICAL).into_bytes()
        );
        assert_eq!(NullUuid::null().marshal_json().unwrap(), b"null");

        let mut decoded = NullUuid::null();
        decoded
            .unmarshal_json(format!("\"{}\"", CANONICAL).as_bytes())
            .unwrap();
        assert_eq!(decoded, id);

        decoded.unmarshal_json(b"null").unwrap();
        assert!(decoded.is_null());

        decoded.unmarshal_json(b"").unwrap();
        assert!(decoded.is_null());

        assert!(decoded.unmarshal_json(b"\"nope\"").is_err());
        assert!(decoded.unmarshal_json(b"7").is_err());
    }

    #[test]
    fn test_scan() {
        let id = NullUuid::parse_uuid(CANONICAL).unwrap();
        let mut scanned = NullUuid::null();

        scanned.scan(DriverValue::Text(CANONICAL.into())).unwrap();
        assert_eq!(scanned, id);

        scanned.scan(DriverValue::Null).unwrap();
        assert!(scanned.is_null());

        scanned.scan(DriverValue::Bytes(id.as_bytes().to_vec())).unwrap();
        assert_eq!(scanned, id);

        scanned
            .scan(DriverValue::Bytes(CANONICAL.as_bytes().to_vec()))
            .unwrap();
        assert_eq!(scanned, id);

        scanned.scan(DriverValue::Text(String::new())).unwrap();
        assert!(scanned.is_null());

        // Zero from the driver stays a valid zero
        scanned
            .scan(DriverValue::Text(Uuid::nil().to_string()))
            .unwrap();
        assert!(scanned.is_zero());
    }

    #[test]
    fn test_scan_rejects() {
        let mut scanned = NullUuid::null();
        assert!(matches!(
            scanned.scan(DriverValue::Int(1)),
            Err(Error::UnsupportedDriverValue { .. })
        ));
        assert!(matches!(
            scanned.scan(DriverValue::Text("xyz".into())),
            Err(Error::Uuid(_))
        ));
        assert!(scanned.is_null());
    }

    #[test]
    fn test_driver_value() {
        let id = NullUuid::parse_uuid(CANONICAL).unwrap();
        assert_eq!(
            id.driver_value().unwrap(),
            DriverValue::Text(CANONICAL.into())
        );
        assert_eq!(NullUuid::null().driver_value().unwrap(), DriverValue::Null);
        assert_eq!(
            NullUuid::from_uuid(Uuid::nil()).driver_value().unwrap(),
            DriverValue::Text(Uuid::nil().to_string())
        );
    }
}
