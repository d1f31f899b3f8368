//! Nullable value types
//!
//! This crate defines optional wrappers that bridge three forms of the same
//! logical value: the in-memory form, the JSON/text wire form, and the
//! persistence driver form.
//! - Nullable, BindStr, Scanner, Valuer, WireCodec: capability traits
//! - DriverValue: a single column value as seen by a persistence driver
//! - NullBool, NullI64, NullString, NullTime: scalar variants
//! - NullJson: JSON object variant
//! - NullUuid: UUID identifier with canonical, hex and base-62 text forms
//! - Error: Error type for the strict conversion paths
//!
//! Every variant is a two-field value: a validity flag and a payload that is
//! reset to its zero value whenever the flag is false.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod base62;
pub mod boolean;
pub mod driver;
pub mod error;
pub mod id;
pub mod int64;
pub mod json;
pub mod string;
pub mod time;
pub mod traits;

pub use base62::BASE62_ALPHABET;
pub use boolean::{parse_bool_token, NullBool, BOOL_FALSE_TOKEN, BOOL_TRUE_TOKEN};
pub use driver::DriverValue;
pub use error::{Error, Result};
pub use id::{NullUuid, MAX_BASE62_TOKEN_LEN, UUID_CANONICAL_LEN, UUID_HEX_LEN, UUID_LEN};
pub use int64::NullI64;
pub use json::{JsonMap, NullJson};
pub use string::{NullString, DIGEST_HEX_LEN};
pub use time::{format_rfc3339, parse_rfc3339, NullTime};
pub use traits::{BindStr, Nullable, Scanner, Valuer, WireCodec};
