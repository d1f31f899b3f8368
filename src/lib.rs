//! Nullable - optional value wrappers for wire, text and database forms
//!
//! Six independent variants share one contract: a validity flag plus a
//! payload, with lenient text binding, strict driver scanning and JSON
//! decoding, and driver/JSON encoding.
//!
//! # Quick Start
//!
//! ```
//! use nullable::{BindStr, Nullable, NullI64, NullUuid, WireCodec};
//!
//! let mut age = NullI64::null();
//! age.bind_str("not a number");
//! assert!(age.is_null());
//! assert_eq!(age.marshal_json().unwrap(), b"null");
//!
//! let id = NullUuid::new_v4();
//! assert_eq!(NullUuid::parse_base62(&id.base62()).unwrap(), id);
//! ```

// Re-export the public API from nullable-core
pub use nullable_core::*;
