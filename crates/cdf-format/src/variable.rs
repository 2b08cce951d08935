//! Variable assembly.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::attribute::{VariableAttribute, VariableId};
use crate::catalog::RecordCatalog;
use crate::record::VariableDescriptor;
use crate::types::{DataType, Value, VariableFlags, VariableKind};

/// Role of a variable as declared by its `VAR_TYPE` attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VariableRole {
    /// `VAR_TYPE` is blank, absent or `data`.
    Data,
    SupportData,
    Metadata,
    Other(String),
}

impl VariableRole {
    fn from_var_type(var_type: &str) -> Self {
        match var_type.trim() {
            "" | "data" => Self::Data,
            "support_data" => Self::SupportData,
            "metadata" => Self::Metadata,
            other => Self::Other(other.to_string()),
        }
    }

    /// The `VAR_TYPE` spelling of the role.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Data => "data",
            Self::SupportData => "support_data",
            Self::Metadata => "metadata",
            Self::Other(other) => other,
        }
    }
}

/// An assembled variable.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub name: String,
    pub kind: VariableKind,
    pub number: i32,
    pub data_type: DataType,
    pub flags: VariableFlags,
    pub element_count: i32,
    /// Offset of the VDR this variable was built from.
    pub descriptor_offset: u64,
    /// Offset of the head index record, 0 when the variable has none.
    pub index_offset: u64,
    /// Absolute offset of the first data byte, 0 when there is no data.
    pub start_byte: u64,
    pub record_count: u64,
    pub dims: Vec<i32>,
    pub dim_varys: Vec<i32>,
    pub pad_values: Vec<Value>,
    pub attributes: BTreeMap<String, Vec<Value>>,
}

impl Variable {
    #[must_use]
    pub const fn id(&self) -> VariableId {
        VariableId::new(self.kind, self.number)
    }

    /// Values of the named attribute for this variable.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&[Value]> {
        self.attributes.get(name).map(Vec::as_slice)
    }

    /// The named attribute rendered as one string.
    #[must_use]
    pub fn attribute_text(&self, name: &str) -> Option<String> {
        self.attribute(name).map(|values| {
            values
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" ")
        })
    }

    /// A variable without an index record stores no values of its own.
    #[must_use]
    pub const fn is_virtual(&self) -> bool {
        self.index_offset == 0
    }

    #[must_use]
    pub const fn is_record_varying(&self) -> bool {
        self.flags.record_varying()
    }

    #[must_use]
    pub fn role(&self) -> VariableRole {
        VariableRole::from_var_type(&self.attribute_text("VAR_TYPE").unwrap_or_default())
    }

    #[must_use]
    pub fn is_data(&self) -> bool {
        self.role() == VariableRole::Data
    }

    pub(crate) fn attach(&mut self, attribute: &VariableAttribute) {
        if let Some(values) = attribute.values_for(self.id()) {
            let values = values.to_vec();
            self.attributes.insert(attribute.name.clone(), values);
        }
    }
}

/// Build one variable per VDR, in file order.
pub(crate) fn assemble_variables(catalog: &RecordCatalog) -> Vec<Variable> {
    catalog
        .variable_descriptors()
        .map(|(offset, vdr)| assemble_variable(catalog, offset, vdr))
        .collect()
}

fn assemble_variable(catalog: &RecordCatalog, offset: u64, vdr: &VariableDescriptor) -> Variable {
    let dims = match vdr.kind {
        VariableKind::Z if !vdr.dim_sizes.is_empty() => vdr.dim_sizes.clone(),
        VariableKind::R | VariableKind::Z => vec![1],
    };
    let start_byte = first_data_offset(catalog, vdr.vxr_head);
    debug!(name = %vdr.name, start_byte, "assembled variable");

    Variable {
        name: vdr.name.clone(),
        kind: vdr.kind,
        number: vdr.number,
        data_type: vdr.data_type,
        flags: vdr.flags,
        element_count: vdr.element_count,
        descriptor_offset: offset,
        index_offset: if catalog.variable_index(vdr.vxr_head).is_some() {
            vdr.vxr_head
        } else {
            0
        },
        start_byte,
        record_count: vdr.record_count(),
        dims,
        dim_varys: vdr.dim_varys.clone(),
        pad_values: vdr.pad_values(),
        attributes: BTreeMap::new(),
    }
}

/// Offset of the first data byte reachable from an index chain head.
///
/// Follows the first used entry of each index record, descending through
/// nested index records, until a value record is reached. Anything else
/// yields 0.
pub fn first_data_offset(catalog: &RecordCatalog, head: u64) -> u64 {
    let mut offset = head;
    for _ in 0..=catalog.chain_limit() {
        if let Some(vxr) = catalog.variable_index(offset) {
            match vxr.used_entries().next() {
                Some(entry) => offset = entry.offset,
                None => return 0,
            }
        } else if let Some(vvr) = catalog.variable_values(offset) {
            return vvr.data_offset;
        } else {
            return 0;
        }
    }
    warn!(head, "index records nest without reaching a value record");
    0
}
