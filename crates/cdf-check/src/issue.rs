//! Compliance issue types.
//!
//! The Issue enum provides type-safe issue creation where each variant
//! carries only its needed data.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Issue severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// The file cannot be archived as is.
    Error,
    /// Should review.
    Warning,
}

impl Severity {
    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Error => "Error",
            Self::Warning => "Warning",
        }
    }
}

/// Rule family an issue belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    File,
    Attributes,
    Naming,
    Storage,
    Encoding,
    Records,
}

impl Category {
    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::File => "File",
            Self::Attributes => "Attributes",
            Self::Naming => "Naming",
            Self::Storage => "Storage",
            Self::Encoding => "Encoding",
            Self::Records => "Records",
        }
    }
}

/// Which convention requires a variable attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Requirement {
    /// Needed by the CDF tools distribution.
    CdfTools,
    /// Needed by the ISTP guidelines.
    Istp,
}

/// Compliance issue - each variant carries only its needed data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Issue {
    // File checks
    /// Magic word older than version 3.0
    VersionTooOld { magic: u32 },
    /// Whole-file compression is on
    FileCompressed,
    /// The GDR references unused internal records
    UnusedRecords { offset: u64, size: Option<u64> },
    /// Sparse-record storage is in use
    SparseRecords,

    // Attribute checks
    /// Required global attribute is missing
    MissingGlobalAttribute { name: String },
    /// Required variable attribute is missing
    MissingVariableAttribute {
        name: String,
        requirement: Requirement,
    },

    // Naming checks
    /// Variable name does not start with a letter
    NameNotLetter { variable: String },
    /// Variable name contains characters outside `[A-Za-z0-9_]`
    NameSpecialCharacters { variable: String },

    // Storage checks
    /// Variable values are compressed
    VariableCompressed { variable: String },
    /// Variable has no index record
    VirtualVariable { variable: String },
    /// Variable values are split over several value records
    FragmentedVariable { variable: String, blocks: u32 },
    /// Data variable does not vary by record
    NotRecordVarying { variable: String },
    /// Data variable uses a type archives do not accept
    DisallowedDataType { variable: String, data_type: String },
    /// Dimension variance is not the expected sentinel
    DimensionVariance {
        variable: String,
        dimension: usize,
        value: i32,
    },

    // Encoding checks
    /// Encoding is not most-significant-byte first
    EncodingNotMsb { code: i32, name: String },
    /// No CDR, so the encoding is unknown
    MissingFileDescriptor,

    // Record checks
    /// An rVariable descriptor is present
    RVariablesPresent { offset: u64 },
    /// A compression record is present
    CompressedRecords { offset: u64, kind: String },
    /// A sparseness parameters record is present
    SparseParameters { offset: u64 },
    /// A variable index continues in another index record
    FragmentedIndex { offset: u64 },

    /// The file could not be decoded or a chain does not terminate
    CorruptFile { reason: String },
}

impl Issue {
    /// Stable rule identifier.
    pub fn rule_id(&self) -> &'static str {
        match self {
            Issue::VersionTooOld { .. } => "CDF001",
            Issue::FileCompressed => "CDF002",
            Issue::UnusedRecords { .. } => "CDF003",
            Issue::SparseRecords => "CDF004",
            Issue::MissingGlobalAttribute { .. } => "CDF010",
            Issue::MissingVariableAttribute {
                requirement: Requirement::CdfTools,
                ..
            } => "CDF011",
            Issue::MissingVariableAttribute {
                requirement: Requirement::Istp,
                ..
            } => "CDF012",
            Issue::NameNotLetter { .. } => "CDF020",
            Issue::NameSpecialCharacters { .. } => "CDF021",
            Issue::VariableCompressed { .. } => "CDF030",
            Issue::VirtualVariable { .. } => "CDF031",
            Issue::FragmentedVariable { .. } => "CDF032",
            Issue::NotRecordVarying { .. } => "CDF033",
            Issue::DisallowedDataType { .. } => "CDF034",
            Issue::DimensionVariance { .. } => "CDF035",
            Issue::EncodingNotMsb { .. } => "CDF040",
            Issue::MissingFileDescriptor => "CDF041",
            Issue::RVariablesPresent { .. } => "CDF050",
            Issue::CompressedRecords { .. } => "CDF051",
            Issue::SparseParameters { .. } => "CDF052",
            Issue::FragmentedIndex { .. } => "CDF053",
            Issue::CorruptFile { .. } => "CDF099",
        }
    }

    /// Variable or attribute the issue is about, if any.
    pub fn subject(&self) -> Option<&str> {
        match self {
            Issue::MissingGlobalAttribute { name }
            | Issue::MissingVariableAttribute { name, .. } => Some(name.as_str()),
            Issue::NameNotLetter { variable }
            | Issue::NameSpecialCharacters { variable }
            | Issue::VariableCompressed { variable }
            | Issue::VirtualVariable { variable }
            | Issue::FragmentedVariable { variable, .. }
            | Issue::NotRecordVarying { variable }
            | Issue::DisallowedDataType { variable, .. }
            | Issue::DimensionVariance { variable, .. } => Some(variable.as_str()),
            _ => None,
        }
    }

    /// Category for this issue type.
    pub fn category(&self) -> Category {
        match self {
            Issue::VersionTooOld { .. }
            | Issue::FileCompressed
            | Issue::UnusedRecords { .. }
            | Issue::SparseRecords
            | Issue::CorruptFile { .. } => Category::File,
            Issue::MissingGlobalAttribute { .. } | Issue::MissingVariableAttribute { .. } => {
                Category::Attributes
            }
            Issue::NameNotLetter { .. } | Issue::NameSpecialCharacters { .. } => Category::Naming,
            Issue::VariableCompressed { .. }
            | Issue::VirtualVariable { .. }
            | Issue::FragmentedVariable { .. }
            | Issue::NotRecordVarying { .. }
            | Issue::DisallowedDataType { .. }
            | Issue::DimensionVariance { .. } => Category::Storage,
            Issue::EncodingNotMsb { .. } | Issue::MissingFileDescriptor => Category::Encoding,
            Issue::RVariablesPresent { .. }
            | Issue::CompressedRecords { .. }
            | Issue::SparseParameters { .. }
            | Issue::FragmentedIndex { .. } => Category::Records,
        }
    }

    /// Default severity.
    pub fn severity(&self) -> Severity {
        match self {
            Issue::VirtualVariable { .. }
            | Issue::FragmentedVariable { .. }
            | Issue::FragmentedIndex { .. } => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Human-readable message.
    pub fn message(&self) -> String {
        match self {
            Issue::VersionTooOld { magic } => format!("Version {magic:#010x} is prior to 3.0."),
            Issue::FileCompressed => "File is compressed.".to_string(),
            Issue::UnusedRecords { offset, size } => {
                let detail = match size {
                    Some(size) => format!("{size} bytes at offset {offset}"),
                    None => format!("unreadable record at offset {offset}"),
                };
                format!(
                    "File contains unused records, most likely left over from deleted or \
                     overwritten variables or attributes. These must be removed. \
                     First unused record: {detail}."
                )
            }
            Issue::SparseRecords => {
                "File contains sparse records. These must be removed.".to_string()
            }
            Issue::MissingGlobalAttribute { name } => {
                format!("Global ISTP required attribute '{name}' is missing.")
            }
            Issue::MissingVariableAttribute {
                name,
                requirement: Requirement::CdfTools,
            } => format!("CDF tools required attribute '{name}' is missing."),
            Issue::MissingVariableAttribute {
                name,
                requirement: Requirement::Istp,
            } => format!("ISTP required attribute '{name}' is missing."),
            Issue::NameNotLetter { variable } => {
                format!("Variable name '{variable}' does not start with a letter.")
            }
            Issue::NameSpecialCharacters { variable } => {
                format!("Variable name '{variable}' contains special characters.")
            }
            Issue::VariableCompressed { variable } => {
                format!("Variable '{variable}' is compressed.")
            }
            Issue::VirtualVariable { variable } => format!(
                "Variable '{variable}' does not contain any data \
                 and may be calculated (virtual)."
            ),
            Issue::FragmentedVariable { variable, blocks } => format!(
                "Records for variable '{variable}' are fragmented into {blocks} blocks \
                 (not contiguous)."
            ),
            Issue::NotRecordVarying { variable } => {
                format!("Records for data variable '{variable}' do not vary by record.")
            }
            Issue::DisallowedDataType {
                variable,
                data_type,
            } => format!("Variable '{variable}' has the non-allowed data type of {data_type}."),
            Issue::DimensionVariance {
                variable,
                dimension,
                value,
            } => format!(
                "Variable '{variable}' has variance {value} in dimension {dimension}; expected -1."
            ),
            Issue::EncodingNotMsb { code, name } if name.is_empty() => {
                format!("Encoding {code} is not MSB.")
            }
            Issue::EncodingNotMsb { code, name } => {
                format!("Encoding {name} ({code}) is not MSB.")
            }
            Issue::MissingFileDescriptor => {
                "File has no CDR record; the encoding cannot be verified.".to_string()
            }
            Issue::RVariablesPresent { offset } => format!(
                "rVariable descriptor at offset {offset}. \
                 rVariables need to be converted to zVariables."
            ),
            Issue::CompressedRecords { offset, kind } => {
                format!("Compression record ({kind}) at offset {offset}.")
            }
            Issue::SparseParameters { offset } => {
                format!("Sparseness parameters record at offset {offset}.")
            }
            Issue::FragmentedIndex { offset } => format!(
                "Variable index at offset {offset} continues in another index record. \
                 The records were probably written incrementally; \
                 re-writing the file may correct this."
            ),
            Issue::CorruptFile { reason } => format!("Error parsing CDF: {reason}."),
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.rule_id(), self.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let issue = Issue::MissingGlobalAttribute {
            name: "Project".into(),
        };
        assert_eq!(
            issue.message(),
            "Global ISTP required attribute 'Project' is missing."
        );
        assert_eq!(issue.subject(), Some("Project"));
        assert_eq!(issue.category(), Category::Attributes);

        let issue = Issue::VersionTooOld { magic: 0xCDF2_6002 };
        assert_eq!(issue.message(), "Version 0xcdf26002 is prior to 3.0.");
        assert_eq!(issue.subject(), None);
    }

    #[test]
    fn test_rule_ids_split_requirements() {
        let tools = Issue::MissingVariableAttribute {
            name: "FORMAT".into(),
            requirement: Requirement::CdfTools,
        };
        let istp = Issue::MissingVariableAttribute {
            name: "CATDESC".into(),
            requirement: Requirement::Istp,
        };
        assert_eq!(tools.rule_id(), "CDF011");
        assert_eq!(istp.rule_id(), "CDF012");
        assert_eq!(
            istp.to_string(),
            "[CDF012] ISTP required attribute 'CATDESC' is missing."
        );
    }

    #[test]
    fn test_severity() {
        let virtual_var = Issue::VirtualVariable {
            variable: "x".into(),
        };
        assert_eq!(virtual_var.severity(), Severity::Warning);
        assert_eq!(Issue::FileCompressed.severity(), Severity::Error);
    }

    #[test]
    fn test_encoding_message_without_name() {
        let issue = Issue::EncodingNotMsb {
            code: 8,
            name: String::new(),
        };
        assert_eq!(issue.message(), "Encoding 8 is not MSB.");
        let issue = Issue::EncodingNotMsb {
            code: 6,
            name: "IBMPC_ENCODING".into(),
        };
        assert_eq!(issue.message(), "Encoding IBMPC_ENCODING (6) is not MSB.");
    }
}
