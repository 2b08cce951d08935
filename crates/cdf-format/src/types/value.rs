//! Decoded scalar values.

use std::fmt;

/// One decoded element of an attribute entry or pad value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Signed integer of any width (also `CDF_BYTE`).
    Int(i64),
    /// Unsigned integer of any width.
    UInt(u64),
    Real4(f32),
    Real8(f64),
    /// Milliseconds since 0000-01-01T00:00:00.
    Epoch(f64),
    /// Seconds since 0000-01-01 plus picoseconds within the second.
    Epoch16 { seconds: f64, picoseconds: f64 },
    /// Nanoseconds since J2000 including leap seconds.
    Tt2000(i64),
    Text(String),
    /// Value of an unrecognised data type code.
    Unknown(i32),
}

impl Value {
    /// The text content, if this is a character value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Numeric view of integer-like values.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(v) | Self::Tt2000(v) => Some(*v),
            Self::UInt(v) => i64::try_from(*v).ok(),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) | Self::Tt2000(v) => write!(f, "{v}"),
            Self::UInt(v) => write!(f, "{v}"),
            Self::Real4(v) => write!(f, "{v}"),
            Self::Real8(v) | Self::Epoch(v) => write!(f, "{v}"),
            Self::Epoch16 {
                seconds,
                picoseconds,
            } => write!(f, "{seconds}:{picoseconds}"),
            Self::Text(text) => f.write_str(text),
            Self::Unknown(_) => Ok(()),
        }
    }
}
