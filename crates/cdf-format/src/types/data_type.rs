//! CDF data type codes.

use std::fmt;

/// Element data type of an attribute entry or variable.
///
/// | Code | Name | Width |
/// |------|------|-------|
/// | 1, 2, 4, 8 | `CDF_INT1`..`CDF_INT8` | 1, 2, 4, 8 |
/// | 11, 12, 14 | `CDF_UINT1`..`CDF_UINT4` | 1, 2, 4 |
/// | 21, 44 | `CDF_REAL4`, `CDF_FLOAT` | 4 |
/// | 22, 45 | `CDF_REAL8`, `CDF_DOUBLE` | 8 |
/// | 31 | `CDF_EPOCH` | 8 |
/// | 32 | `CDF_EPOCH16` | 16 |
/// | 33 | `CDF_TIME_TT2000` | 8 |
/// | 41 | `CDF_BYTE` | 1 |
/// | 51 | `CDF_CHAR` | 1 |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    Int1,
    Int2,
    Int4,
    Int8,
    UInt1,
    UInt2,
    UInt4,
    Real4,
    Real8,
    Epoch,
    Epoch16,
    TimeTt2000,
    Byte,
    Float,
    Double,
    Char,
    /// A code outside the known set.
    Unknown(i32),
}

impl DataType {
    /// Map a raw type code.
    #[must_use]
    pub const fn from_code(code: i32) -> Self {
        match code {
            1 => Self::Int1,
            2 => Self::Int2,
            4 => Self::Int4,
            8 => Self::Int8,
            11 => Self::UInt1,
            12 => Self::UInt2,
            14 => Self::UInt4,
            21 => Self::Real4,
            22 => Self::Real8,
            31 => Self::Epoch,
            32 => Self::Epoch16,
            33 => Self::TimeTt2000,
            41 => Self::Byte,
            44 => Self::Float,
            45 => Self::Double,
            51 => Self::Char,
            other => Self::Unknown(other),
        }
    }

    /// Raw type code as stored in the file.
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::Int1 => 1,
            Self::Int2 => 2,
            Self::Int4 => 4,
            Self::Int8 => 8,
            Self::UInt1 => 11,
            Self::UInt2 => 12,
            Self::UInt4 => 14,
            Self::Real4 => 21,
            Self::Real8 => 22,
            Self::Epoch => 31,
            Self::Epoch16 => 32,
            Self::TimeTt2000 => 33,
            Self::Byte => 41,
            Self::Float => 44,
            Self::Double => 45,
            Self::Char => 51,
            Self::Unknown(code) => code,
        }
    }

    /// Width of one element in bytes. Unknown types have width 0.
    #[must_use]
    pub const fn width(self) -> usize {
        match self {
            Self::Int1 | Self::UInt1 | Self::Byte | Self::Char => 1,
            Self::Int2 | Self::UInt2 => 2,
            Self::Int4 | Self::UInt4 | Self::Real4 | Self::Float => 4,
            Self::Int8 | Self::Real8 | Self::Double | Self::Epoch | Self::TimeTt2000 => 8,
            Self::Epoch16 => 16,
            Self::Unknown(_) => 0,
        }
    }

    /// Library name of the type (`CDF_INT1`, ...).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Int1 => "CDF_INT1",
            Self::Int2 => "CDF_INT2",
            Self::Int4 => "CDF_INT4",
            Self::Int8 => "CDF_INT8",
            Self::UInt1 => "CDF_UINT1",
            Self::UInt2 => "CDF_UINT2",
            Self::UInt4 => "CDF_UINT4",
            Self::Real4 => "CDF_REAL4",
            Self::Real8 => "CDF_REAL8",
            Self::Epoch => "CDF_EPOCH",
            Self::Epoch16 => "CDF_EPOCH16",
            Self::TimeTt2000 => "CDF_TIME_TT2000",
            Self::Byte => "CDF_BYTE",
            Self::Float => "CDF_FLOAT",
            Self::Double => "CDF_DOUBLE",
            Self::Char => "CDF_CHAR",
            Self::Unknown(_) => "Unknown",
        }
    }

    /// Data type name used in PDS archive labels.
    ///
    /// TT2000 times are 8-byte integers and are labelled `SignedMSB8`.
    #[must_use]
    pub const fn pds_name(self) -> &'static str {
        match self {
            Self::Int1 => "SignedByte",
            Self::Int2 => "SignedMSB2",
            Self::Int4 => "SignedMSB4",
            Self::Int8 | Self::TimeTt2000 => "SignedMSB8",
            Self::UInt1 | Self::Byte | Self::Char => "UnsignedByte",
            Self::UInt2 => "UnsignedMSB2",
            Self::UInt4 => "UnsignedMSB4",
            Self::Real4 | Self::Float => "IEEE754MSBSingle",
            Self::Real8 | Self::Double | Self::Epoch => "IEEE754MSBDouble",
            Self::Epoch16 => "ComplexMSB16",
            Self::Unknown(_) => "Unknown",
        }
    }

    /// Whether values of this type are character strings.
    #[must_use]
    pub const fn is_char(self) -> bool {
        matches!(self, Self::Char)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown(code) => write!(f, "Unknown [{code}]"),
            other => f.write_str(other.name()),
        }
    }
}
