//! Capability traits for nullable values
//!
//! Each conversion concern is its own named trait, and every nullable type
//! declares its conformance explicitly:
//! - Nullable: "does this instance represent an absent value?"
//! - BindStr: lenient text binding (form fields, command arguments)
//! - Scanner: strict consumption of a driver value
//! - Valuer: production of a driver value
//! - WireCodec: JSON encode/decode with empty-input handling

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::driver::DriverValue;
use crate::error::Result;

/// A value that can represent "no data"
pub trait Nullable {
    /// Returns true iff the instance is absent
    fn is_null(&self) -> bool;
}

/// Lenient text binding
///
/// Binding never fails. Text that cannot be interpreted leaves the
/// instance absent with its payload reset to the zero value.
pub trait BindStr {
    /// Parse `text` into this instance, degrading to absent on failure
    fn bind_str(&mut self, text: &str);
}

/// Strict consumption of a value read from a persistence driver
pub trait Scanner {
    /// Replace this instance with the contents of `value`
    ///
    /// `DriverValue::Null` always yields the absent state.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver shape is not accepted by the type, or
    /// if driver text does not parse. The receiver is left unchanged on error.
    fn scan(&mut self, value: DriverValue) -> Result<()>;
}

/// Production of a value for a persistence driver
pub trait Valuer {
    /// Convert this instance to a driver value
    ///
    /// # Errors
    ///
    /// Only fails where the payload's own encoder fails.
    fn driver_value(&self) -> Result<DriverValue>;
}

/// JSON wire encoding
///
/// The provided methods delegate to the type's serde implementation, which
/// maps absence to the JSON `null` literal. An empty input buffer decodes
/// to absent.
pub trait WireCodec: Serialize + DeserializeOwned + Default {
    /// Encode as JSON bytes
    fn marshal_json(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Decode from JSON bytes
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not JSON of the expected shape.
    /// The receiver is left unchanged on error.
    fn unmarshal_json(&mut self, bytes: &[u8]) -> Result<()> {
        if bytes.is_empty() {
            *self = Self::default();
            return Ok(());
        }

        *self = serde_json::from_slice(bytes)?;
        Ok(())
    }
}
