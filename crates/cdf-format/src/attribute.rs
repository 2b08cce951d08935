//! Attribute assembly.
//!
//! Attribute values are spread over chains of entry records hanging off
//! each attribute descriptor. Global attributes collect the values of all
//! their entries; variable attributes route each entry to the variable that
//! owns it.

use std::collections::{BTreeMap, HashSet};

use tracing::{debug, warn};

use crate::catalog::RecordCatalog;
use crate::error::Result;
use crate::record::{AttributeDescriptor, AttributeEntry};
use crate::types::{AttributeScope, DataType, EntryKind, Value, VariableKind};

/// Identity of a variable: its family and its number within the family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariableId {
    pub kind: VariableKind,
    pub number: i32,
}

impl VariableId {
    #[must_use]
    pub const fn new(kind: VariableKind, number: i32) -> Self {
        Self { kind, number }
    }
}

/// A global attribute with its values in entry order.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: String,
    pub number: i32,
    pub scope: AttributeScope,
    /// Type of the first entry; `None` when the attribute has no entries.
    pub data_type: Option<DataType>,
    /// Absolute offset of the first entry's value bytes, 0 without entries.
    pub start_byte: u64,
    pub values: Vec<Value>,
}

impl Attribute {
    /// Display strings of all values.
    #[must_use]
    pub fn display_values(&self) -> Vec<String> {
        self.values.iter().map(ToString::to_string).collect()
    }

    /// The first value as text, if it is character data.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.values.first().and_then(Value::as_text)
    }
}

/// A variable-scope attribute with values grouped by owning variable.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableAttribute {
    pub name: String,
    pub number: i32,
    pub scope: AttributeScope,
    pub data_type: Option<DataType>,
    pub start_byte: u64,
    pub values: BTreeMap<VariableId, Vec<Value>>,
}

impl VariableAttribute {
    #[must_use]
    pub fn values_for(&self, id: VariableId) -> Option<&[Value]> {
        self.values.get(&id).map(Vec::as_slice)
    }
}

/// Output of [`assemble_attributes`].
#[derive(Debug, Default)]
pub(crate) struct AssembledAttributes {
    pub globals: Vec<Attribute>,
    pub variable_attributes: Vec<VariableAttribute>,
}

/// Build every attribute from the ADRs in file order.
///
/// `known` lists the variables present in the file; variable entries owned
/// by any other number are dropped.
pub(crate) fn assemble_attributes(
    catalog: &RecordCatalog,
    known: &HashSet<VariableId>,
) -> Result<AssembledAttributes> {
    let mut out = AssembledAttributes::default();
    for adr in catalog.attribute_descriptors() {
        if adr.scope.is_global() {
            if let Some(attribute) = assemble_global(catalog, adr)? {
                out.globals.push(attribute);
            }
        } else if adr.scope.is_variable() {
            if let Some(attribute) = assemble_variable(catalog, adr, known)? {
                out.variable_attributes.push(attribute);
            }
        } else {
            warn!(name = %adr.name, scope = %adr.scope, "attribute has unknown scope; skipped");
        }
    }
    Ok(out)
}

fn entries<'a>(
    catalog: &'a RecordCatalog,
    adr: &AttributeDescriptor,
) -> Result<Vec<(EntryKind, Vec<&'a AttributeEntry>)>> {
    Ok(vec![
        (EntryKind::GrEntry, catalog.entry_chain(adr.gr_entry_head)?),
        (EntryKind::ZEntry, catalog.entry_chain(adr.z_entry_head)?),
    ])
}

fn assemble_global(
    catalog: &RecordCatalog,
    adr: &AttributeDescriptor,
) -> Result<Option<Attribute>> {
    let chains = entries(catalog, adr)?;
    let all: Vec<&AttributeEntry> = chains.into_iter().flat_map(|(_, chain)| chain).collect();

    if all.is_empty() && (adr.gr_entry_head != 0 || adr.z_entry_head != 0) {
        debug!(name = %adr.name, "global attribute entries do not resolve; skipped");
        return Ok(None);
    }

    let first = all.first();
    Ok(Some(Attribute {
        name: adr.name.clone(),
        number: adr.number,
        scope: adr.scope,
        data_type: first.map(|entry| entry.data_type),
        start_byte: first.map_or(0, |entry| entry.value_offset),
        values: all.iter().flat_map(|entry| entry.values()).collect(),
    }))
}

fn assemble_variable(
    catalog: &RecordCatalog,
    adr: &AttributeDescriptor,
    known: &HashSet<VariableId>,
) -> Result<Option<VariableAttribute>> {
    let mut values: BTreeMap<VariableId, Vec<Value>> = BTreeMap::new();
    let mut first: Option<&AttributeEntry> = None;

    for (kind, chain) in entries(catalog, adr)? {
        for entry in chain {
            let id = VariableId::new(kind.variable_kind(), entry.number);
            if !known.contains(&id) {
                warn!(
                    attribute = %adr.name,
                    kind = kind.variable_kind().label(),
                    number = entry.number,
                    "entry refers to an unknown variable; skipped"
                );
                continue;
            }
            first.get_or_insert(entry);
            values.entry(id).or_default().extend(entry.values());
        }
    }

    let Some(first) = first else {
        debug!(name = %adr.name, "variable attribute has no resolvable entry; skipped");
        return Ok(None);
    };
    Ok(Some(VariableAttribute {
        name: adr.name.clone(),
        number: adr.number,
        scope: adr.scope,
        data_type: Some(first.data_type),
        start_byte: first.value_offset,
        values,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::{AttributeSpec, EntryValue, FixtureBuilder, VariableSpec};
    use crate::record::ENTRY_VALUE_OFFSET;
    use crate::types::ReaderOptions;

    fn assemble(data: &[u8], known: &[VariableId]) -> AssembledAttributes {
        let catalog = RecordCatalog::decode(data, &ReaderOptions::default()).unwrap();
        let known: HashSet<VariableId> = known.iter().copied().collect();
        assemble_attributes(&catalog, &known).unwrap()
    }

    #[test]
    fn test_global_attribute_value_and_start() {
        let (data, layout) = FixtureBuilder::new()
            .global_attribute("Project", "TEST")
            .build_with_layout();
        let out = assemble(&data, &[]);
        assert_eq!(out.globals.len(), 1);
        let project = &out.globals[0];
        assert_eq!(project.name, "Project");
        assert_eq!(project.data_type, Some(DataType::Char));
        assert_eq!(project.display_values(), vec!["TEST"]);
        assert_eq!(
            project.start_byte,
            layout.attributes[0].gr_entries[0] + ENTRY_VALUE_OFFSET
        );
    }

    #[test]
    fn test_global_entries_concatenate() {
        let data = FixtureBuilder::new()
            .global_attribute("TEXT", "line one")
            .global_attribute("TEXT", "line two")
            .attribute(AttributeSpec::global("Mixed").z_entry(0, EntryValue::int4(&[7, 8])))
            .build();
        let out = assemble(&data, &[]);
        let text = out.globals[0].display_values();
        assert_eq!(text, vec!["line one", "line two"]);
        assert_eq!(out.globals[1].data_type, Some(DataType::Int4));
        assert_eq!(out.globals[1].display_values(), vec!["7", "8"]);
    }

    #[test]
    fn test_placeholder_and_empty_globals() {
        let data = FixtureBuilder::new()
            .attribute(AttributeSpec::global("Dangling").dangling())
            .attribute(AttributeSpec::global("Empty"))
            .build();
        let out = assemble(&data, &[]);
        assert_eq!(out.globals.len(), 1);
        let empty = &out.globals[0];
        assert_eq!(empty.name, "Empty");
        assert!(empty.values.is_empty());
        assert_eq!(empty.data_type, None);
        assert_eq!(empty.start_byte, 0);
    }

    #[test]
    fn test_variable_entries_route_by_family() {
        let data = FixtureBuilder::new()
            .r_dims(&[2])
            .variable(VariableSpec::r("rvar", DataType::Int2))
            .variable(VariableSpec::z("zvar", DataType::Int2))
            .variable_attribute("FIELDNAM", "rvar", "r field")
            .variable_attribute("FIELDNAM", "zvar", "z field")
            .build();
        let r = VariableId::new(VariableKind::R, 0);
        let z = VariableId::new(VariableKind::Z, 0);
        let out = assemble(&data, &[r, z]);
        let fieldnam = &out.variable_attributes[0];
        assert_eq!(fieldnam.values_for(r).unwrap()[0].to_string(), "r field");
        assert_eq!(fieldnam.values_for(z).unwrap()[0].to_string(), "z field");
    }

    #[test]
    fn test_unknown_owner_is_skipped() {
        let data = FixtureBuilder::new()
            .variable(VariableSpec::z("B", DataType::Real4))
            .variable_attribute_for("UNITS", VariableKind::Z, 5, "nT")
            .variable_attribute_for("CATDESC", VariableKind::Z, 5, "orphan")
            .variable_attribute("CATDESC", "B", "field")
            .build();
        let out = assemble(&data, &[VariableId::new(VariableKind::Z, 0)]);
        let names: Vec<&str> = out
            .variable_attributes
            .iter()
            .map(|a| a.name.as_str())
            .collect();
        assert_eq!(names, vec!["CATDESC"]);
        assert_eq!(out.variable_attributes[0].values.len(), 1);
    }

    #[test]
    fn test_assumed_scopes_classified() {
        let data = FixtureBuilder::new()
            .attribute(AttributeSpec::global("Assumed").scope(3).gr_entry(0, "g"))
            .attribute(AttributeSpec::global("Odd").scope(9).gr_entry(0, "x"))
            .build();
        let out = assemble(&data, &[]);
        assert_eq!(out.globals.len(), 1);
        assert_eq!(out.globals[0].scope, AttributeScope::GlobalAssumed);
    }
}
