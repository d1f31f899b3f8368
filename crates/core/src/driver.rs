//! Driver value model
//!
//! This module defines:
//! - DriverValue: a single column value as exchanged with a persistence driver
//!
//! ## Shapes
//!
//! The driver layer speaks in exactly seven shapes:
//! - Null, Bool, Int, Float, Text, Bytes, Time
//!
//! `Null` is the driver's own null marker. Every nullable type maps its
//! absent state onto it, except `NullBool` which always writes a text token.

use chrono::{DateTime, FixedOffset};

/// A single column value as read from or written to a persistence driver
///
/// ## Type Equality
///
/// Different shapes are never equal, even if they carry the "same" data:
/// - `Int(1) != Float(1.0)`
/// - `Bytes(b"1") != Text("1")`
///
/// `Time` compares instants, so two values with different offsets that
/// denote the same moment are equal.
#[derive(Debug, Clone, PartialEq)]
pub enum DriverValue {
    /// The driver's null marker
    Null,
    /// Native boolean
    Bool(bool),
    /// 64-bit signed integer
    Int(i64),
    /// 64-bit floating point (IEEE-754)
    Float(f64),
    /// UTF-8 text
    Text(String),
    /// Raw bytes
    Bytes(Vec<u8>),
    /// Native timezone-aware instant
    Time(DateTime<FixedOffset>),
}

impl DriverValue {
    /// Get the shape name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            DriverValue::Null => "Null",
            DriverValue::Bool(_) => "Bool",
            DriverValue::Int(_) => "Int",
            DriverValue::Float(_) => "Float",
            DriverValue::Text(_) => "Text",
            DriverValue::Bytes(_) => "Bytes",
            DriverValue::Time(_) => "Time",
        }
    }

    /// Check if this is the driver null marker
    pub fn is_null(&self) -> bool {
        matches!(self, DriverValue::Null)
    }

    /// Get as bool if this is a Bool value
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            DriverValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get as i64 if this is an Int value
    pub fn as_int(&self) -> Option<i64> {
        match self {
            DriverValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Get as f64 if this is a Float value
    pub fn as_float(&self) -> Option<f64> {
        match self {
            DriverValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Get as &str if this is a Text value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            DriverValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get as &[u8] if this is a Bytes value
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            DriverValue::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Get the instant if this is a Time value
    pub fn as_time(&self) -> Option<&DateTime<FixedOffset>> {
        match self {
            DriverValue::Time(t) => Some(t),
            _ => None,
        }
    }
}

// ============================================================================
// From implementations for ergonomic driver construction
// ============================================================================

impl From<&str> for DriverValue {
    fn from(s: &str) -> Self {
        DriverValue::Text(s.to_string())
    }
}

impl From<String> for DriverValue {
    fn from(s: String) -> Self {
        DriverValue::Text(s)
    }
}

impl From<bool> for DriverValue {
    fn from(b: bool) -> Self {
        DriverValue::Bool(b)
    }
}

impl From<i64> for DriverValue {
    fn from(i: i64) -> Self {
        DriverValue::Int(i)
    }
}

impl From<i32> for DriverValue {
    fn from(i: i32) -> Self {
        DriverValue::Int(i as i64)
    }
}

impl From<f64> for DriverValue {
    fn from(f: f64) -> Self {
        DriverValue::Float(f)
    }
}

impl From<Vec<u8>> for DriverValue {
    fn from(b: Vec<u8>) -> Self {
        DriverValue::Bytes(b)
    }
}

impl From<&[u8]> for DriverValue {
    fn from(b: &[u8]) -> Self {
        DriverValue::Bytes(b.to_vec())
    }
}

impl From<DateTime<FixedOffset>> for DriverValue {
    fn from(t: DateTime<FixedOffset>) -> Self {
        DriverValue::Time(t)
    }
}

impl<T: Into<DriverValue>> From<Option<T>> for DriverValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(DriverValue::Null)
    }
}
