//! Serializable summary used to generate archive labels.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::file::CdfFile;
use crate::types::{DataType, Value};

/// Everything a label generator needs from one file.
///
/// Variable types are given by [`DataType::pds_name`]. `CDF_TIME_TT2000`
/// is labelled `SignedMSB8`, the 8-byte integer it is stored as, where
/// older label generators wrote `IEEE754MSBDouble`. Labels produced from
/// this summary differ from theirs for such variables.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelSummary {
    /// Magic word as a hex string, e.g. `0xcdf30001`.
    pub version: String,
    pub format_version: i32,
    pub release: i32,
    pub increment: i32,
    pub encoding: String,
    pub copyright: String,
    pub path_name: String,
    pub checksum: String,
    pub attributes: Vec<AttributeSummary>,
    pub variables: Vec<VariableSummary>,
    pub data_variables: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeSummary {
    pub name: String,
    pub data_type: String,
    pub values: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariableSummary {
    pub name: String,
    pub kind: String,
    pub data_type: String,
    /// PDS data type; `SignedMSB8` for `CDF_TIME_TT2000`.
    pub pds_type: String,
    pub number: i32,
    pub dims: Vec<i32>,
    pub record_count: u64,
    pub start_byte: u64,
    pub pad_values: Vec<String>,
    pub attributes: BTreeMap<String, Vec<String>>,
}

fn strings(values: &[Value]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}

impl CdfFile {
    /// Summarize the file. `path_name` and `checksum` come from the caller.
    #[must_use]
    pub fn summary(&self, path_name: &str, checksum: &str) -> LabelSummary {
        let cdr = self.file_descriptor();
        LabelSummary {
            version: format!("{:#010x}", self.header().magic),
            format_version: cdr.map_or(0, |c| c.version),
            release: cdr.map_or(0, |c| c.release),
            increment: cdr.map_or(0, |c| c.increment),
            encoding: cdr.map_or("", |c| c.encoding.name()).to_string(),
            copyright: cdr.map(|c| c.copyright.clone()).unwrap_or_default(),
            path_name: path_name.to_string(),
            checksum: checksum.to_string(),
            attributes: self
                .global_attributes()
                .iter()
                .map(|a| AttributeSummary {
                    name: a.name.clone(),
                    data_type: a.data_type.map_or("", DataType::name).to_string(),
                    values: a.display_values(),
                })
                .collect(),
            variables: self
                .variables()
                .iter()
                .map(|v| VariableSummary {
                    name: v.name.clone(),
                    kind: v.kind.label().to_string(),
                    data_type: v.data_type.name().to_string(),
                    pds_type: v.data_type.pds_name().to_string(),
                    number: v.number,
                    dims: v.dims.clone(),
                    record_count: v.record_count,
                    start_byte: v.start_byte,
                    pad_values: strings(&v.pad_values),
                    attributes: v
                        .attributes
                        .iter()
                        .map(|(name, values)| (name.clone(), strings(values)))
                        .collect(),
                })
                .collect(),
            data_variables: self.data_variables().map(|v| v.name.clone()).collect(),
        }
    }
}
