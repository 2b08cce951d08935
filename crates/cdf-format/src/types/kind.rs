//! Record kinds, attribute scopes, encodings and variable flags.

use std::fmt;

/// Which variable family an attribute entry or variable belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VariableKind {
    /// rVariable: shares the dimensionality declared in the GDR.
    R,
    /// zVariable: declares its own dimensions.
    Z,
}

impl VariableKind {
    /// Short label used in dumps.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::R => "r",
            Self::Z => "z",
        }
    }
}

/// Attribute entry family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// gEntry (global attributes) or rEntry (variable attributes on rVariables).
    GrEntry,
    /// zEntry (variable attributes on zVariables).
    ZEntry,
}

impl EntryKind {
    /// Variable family that entries of this kind attach to.
    #[must_use]
    pub const fn variable_kind(self) -> VariableKind {
        match self {
            Self::GrEntry => VariableKind::R,
            Self::ZEntry => VariableKind::Z,
        }
    }
}

/// Kind tag carried in every record envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    FileDescriptor,
    GlobalDescriptor,
    VariableDescriptor(VariableKind),
    AttributeDescriptor,
    AttributeEntry(EntryKind),
    VariableIndex,
    VariableValues,
    UnusedInternal,
    CompressedFile,
    CompressionParameters,
    SparsenessParameters,
    CompressedValues,
    /// A tag outside the known set.
    Other(i32),
}

impl RecordKind {
    /// Map a raw kind tag.
    #[must_use]
    pub const fn from_code(code: i32) -> Self {
        match code {
            1 => Self::FileDescriptor,
            2 => Self::GlobalDescriptor,
            3 => Self::VariableDescriptor(VariableKind::R),
            4 => Self::AttributeDescriptor,
            5 => Self::AttributeEntry(EntryKind::GrEntry),
            6 => Self::VariableIndex,
            7 => Self::VariableValues,
            8 => Self::VariableDescriptor(VariableKind::Z),
            9 => Self::AttributeEntry(EntryKind::ZEntry),
            10 => Self::CompressedFile,
            11 => Self::CompressionParameters,
            12 => Self::SparsenessParameters,
            13 => Self::CompressedValues,
            -1 => Self::UnusedInternal,
            other => Self::Other(other),
        }
    }

    /// Raw kind tag.
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::FileDescriptor => 1,
            Self::GlobalDescriptor => 2,
            Self::VariableDescriptor(VariableKind::R) => 3,
            Self::AttributeDescriptor => 4,
            Self::AttributeEntry(EntryKind::GrEntry) => 5,
            Self::VariableIndex => 6,
            Self::VariableValues => 7,
            Self::VariableDescriptor(VariableKind::Z) => 8,
            Self::AttributeEntry(EntryKind::ZEntry) => 9,
            Self::CompressedFile => 10,
            Self::CompressionParameters => 11,
            Self::SparsenessParameters => 12,
            Self::CompressedValues => 13,
            Self::UnusedInternal => -1,
            Self::Other(code) => code,
        }
    }

    /// Acronym used in the format documentation (CDR, GDR, ...).
    #[must_use]
    pub fn short_name(self) -> String {
        let name = match self {
            Self::FileDescriptor => "CDR",
            Self::GlobalDescriptor => "GDR",
            Self::VariableDescriptor(VariableKind::R) => "rVDR",
            Self::VariableDescriptor(VariableKind::Z) => "zVDR",
            Self::AttributeDescriptor => "ADR",
            Self::AttributeEntry(EntryKind::GrEntry) => "AgrEDR",
            Self::AttributeEntry(EntryKind::ZEntry) => "AzEDR",
            Self::VariableIndex => "VXR",
            Self::VariableValues => "VVR",
            Self::UnusedInternal => "UIR",
            Self::CompressedFile => "CCR",
            Self::CompressionParameters => "CPR",
            Self::SparsenessParameters => "SPR",
            Self::CompressedValues => "CVVR",
            Self::Other(code) => return format!("Unknown [{code}]"),
        };
        name.to_string()
    }

    /// Whether the record belongs to a compressed layout.
    #[must_use]
    pub const fn is_compression(self) -> bool {
        matches!(
            self,
            Self::CompressedFile | Self::CompressionParameters | Self::CompressedValues
        )
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.short_name())
    }
}

/// Scope declared by an attribute descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeScope {
    Global,
    Variable,
    GlobalAssumed,
    VariableAssumed,
    Unknown(i32),
}

impl AttributeScope {
    #[must_use]
    pub const fn from_code(code: i32) -> Self {
        match code {
            1 => Self::Global,
            2 => Self::Variable,
            3 => Self::GlobalAssumed,
            4 => Self::VariableAssumed,
            other => Self::Unknown(other),
        }
    }

    /// Global or assumed-global.
    #[must_use]
    pub const fn is_global(self) -> bool {
        matches!(self, Self::Global | Self::GlobalAssumed)
    }

    /// Variable or assumed-variable.
    #[must_use]
    pub const fn is_variable(self) -> bool {
        matches!(self, Self::Variable | Self::VariableAssumed)
    }
}

impl fmt::Display for AttributeScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Global => f.write_str("Global"),
            Self::Variable => f.write_str("Variable"),
            Self::GlobalAssumed => f.write_str("Global/Assume"),
            Self::VariableAssumed => f.write_str("Variable/Assume"),
            Self::Unknown(code) => write!(f, "Unknown [{code}]"),
        }
    }
}

/// Data encoding declared in the file descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    Network,
    Sun,
    Vax,
    DecStation,
    Sgi,
    IbmPc,
    IbmRs,
    Mac,
    Hp,
    Next,
    AlphaOsf1,
    AlphaVmsD,
    AlphaVmsG,
    AlphaVmsI,
    Unknown(i32),
}

impl Encoding {
    #[must_use]
    pub const fn from_code(code: i32) -> Self {
        match code {
            1 => Self::Network,
            2 => Self::Sun,
            3 => Self::Vax,
            4 => Self::DecStation,
            5 => Self::Sgi,
            6 => Self::IbmPc,
            7 => Self::IbmRs,
            9 => Self::Mac,
            11 => Self::Hp,
            12 => Self::Next,
            13 => Self::AlphaOsf1,
            14 => Self::AlphaVmsD,
            15 => Self::AlphaVmsG,
            16 => Self::AlphaVmsI,
            other => Self::Unknown(other),
        }
    }

    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::Network => 1,
            Self::Sun => 2,
            Self::Vax => 3,
            Self::DecStation => 4,
            Self::Sgi => 5,
            Self::IbmPc => 6,
            Self::IbmRs => 7,
            Self::Mac => 9,
            Self::Hp => 11,
            Self::Next => 12,
            Self::AlphaOsf1 => 13,
            Self::AlphaVmsD => 14,
            Self::AlphaVmsG => 15,
            Self::AlphaVmsI => 16,
            Self::Unknown(code) => code,
        }
    }

    /// Library name of the encoding. Unknown codes have an empty name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Network => "NETWORK_ENCODING",
            Self::Sun => "SUN_ENCODING",
            Self::Vax => "VAX_ENCODING",
            Self::DecStation => "DECSTATION_ENCODING",
            Self::Sgi => "SGi_ENCODING",
            Self::IbmPc => "IBMPC_ENCODING",
            Self::IbmRs => "IBMRS_ENCODING",
            Self::Mac => "MAC_ENCODING",
            Self::Hp => "HP_ENCODING",
            Self::Next => "NeXT_ENCODING",
            Self::AlphaOsf1 => "ALPHAOSF1_ENCODING",
            Self::AlphaVmsD => "ALPHAVMSd_ENCODING",
            Self::AlphaVmsG => "ALPHAVMSg_ENCODING",
            Self::AlphaVmsI => "ALPHAVMSi_ENCODING",
            Self::Unknown(_) => "",
        }
    }

    /// Whether the encoding stores values most-significant byte first.
    #[must_use]
    pub const fn is_msb(self) -> bool {
        matches!(
            self,
            Self::Network | Self::Sun | Self::Sgi | Self::IbmRs | Self::Mac | Self::Next
        )
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown(code) => write!(f, "Unknown [{code}]"),
            other => f.write_str(other.name()),
        }
    }
}

/// Flag word of a variable descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct VariableFlags(pub i32);

impl VariableFlags {
    const RECORD_VARIANCE: i32 = 0x1;
    const PAD_VALUE: i32 = 0x2;
    const COMPRESSION: i32 = 0x4;

    /// Values vary from record to record.
    #[must_use]
    pub const fn record_varying(self) -> bool {
        self.0 & Self::RECORD_VARIANCE != 0
    }

    /// A pad value follows the dimension variances.
    #[must_use]
    pub const fn has_pad_value(self) -> bool {
        self.0 & Self::PAD_VALUE != 0
    }

    /// Variable values are stored compressed.
    #[must_use]
    pub const fn compressed(self) -> bool {
        self.0 & Self::COMPRESSION != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_kind_codes() {
        for code in [-1, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13] {
            let kind = RecordKind::from_code(code);
            assert!(!matches!(kind, RecordKind::Other(_)), "code {code}");
            assert_eq!(kind.code(), code);
        }
        assert_eq!(RecordKind::from_code(42), RecordKind::Other(42));
    }

    #[test]
    fn test_record_kind_names() {
        assert_eq!(RecordKind::from_code(3).short_name(), "rVDR");
        assert_eq!(RecordKind::from_code(9).short_name(), "AzEDR");
        assert_eq!(RecordKind::from_code(-1).short_name(), "UIR");
        assert_eq!(RecordKind::from_code(77).to_string(), "Unknown [77]");
        assert!(RecordKind::CompressedValues.is_compression());
        assert!(!RecordKind::SparsenessParameters.is_compression());
    }

    #[test]
    fn test_scope_classes() {
        assert!(AttributeScope::from_code(3).is_global());
        assert!(AttributeScope::from_code(4).is_variable());
        let unknown = AttributeScope::from_code(0);
        assert!(!unknown.is_global() && !unknown.is_variable());
        assert_eq!(AttributeScope::GlobalAssumed.to_string(), "Global/Assume");
    }

    #[test]
    fn test_msb_encodings() {
        let msb: Vec<i32> = (0..20)
            .filter(|code| Encoding::from_code(*code).is_msb())
            .collect();
        assert_eq!(msb, vec![1, 2, 5, 7, 9, 12]);
        assert_eq!(Encoding::from_code(6).name(), "IBMPC_ENCODING");
        assert_eq!(Encoding::from_code(8).name(), "");
    }

    #[test]
    fn test_variable_flags() {
        let flags = VariableFlags(0b111);
        assert!(flags.record_varying() && flags.has_pad_value() && flags.compressed());
        let flags = VariableFlags(0b110);
        assert!(!flags.record_varying());
        assert!(flags.compressed());
        assert!(!VariableFlags(0x1).compressed());
    }
}
