//! Error types for nullable values
//!
//! Only the strict conversion paths (driver scan, wire decode and the
//! explicit identifier parsers) report errors. The lenient text-binding
//! paths absorb every failure into the absent state instead.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.

use thiserror::Error;

/// Result type alias for nullable conversions
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for nullable conversions
#[derive(Debug, Error)]
pub enum Error {
    /// JSON encode/decode error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Text is not an RFC 3339 date-time
    #[error("Time parse error: {0}")]
    Time(#[from] chrono::ParseError),

    /// Text is not a valid UUID
    #[error("UUID parse error: {0}")]
    Uuid(#[from] uuid::Error),

    /// Symbol outside the base-62 alphabet
    #[error("Invalid base62 symbol '{symbol}' at position {position}")]
    Base62 {
        /// The offending symbol
        symbol: char,
        /// Character position of the symbol
        position: usize,
    },

    /// Text is not valid hexadecimal
    #[error("Hex decode error: {0}")]
    Hex(#[from] hex::FromHexError),

    /// Token decoded to no identifier bytes
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// Driver value shape not accepted by the target type
    #[error("Unsupported driver value for {target}: {found}")]
    UnsupportedDriverValue {
        /// Name of the nullable type being scanned into
        target: &'static str,
        /// Type name of the driver value that was supplied
        found: &'static str,
    },

    /// Driver text that does not parse for the target type
    #[error("Invalid driver text for {target}: {input:?}")]
    InvalidDriverText {
        /// Name of the nullable type being scanned into
        target: &'static str,
        /// The rejected text
        input: String,
    },

    /// Driver bytes that are not valid UTF-8
    #[error("Driver bytes are not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}

impl Error {
    pub(crate) fn unsupported(target: &'static str, found: &crate::driver::DriverValue) -> Self {
        Error::UnsupportedDriverValue {
            target,
            found: found.type_name(),
        }
    }

    pub(crate) fn invalid_text(target: &'static str, input: impl Into<String>) -> Self {
        Error::InvalidDriverText {
            target,
            input: input.into(),
        }
    }
}
