use cdf_format::fixture::{
    AttributeSpec, EntryValue, FixtureBuilder, VariableSpec, patch_i32, patch_u64,
};
use cdf_format::record::{ENTRY_VALUE_OFFSET, ENVELOPE_LEN};
use cdf_format::{CdfError, CdfFile, DataType, Value, VariableKind, VariableRole};
use proptest::prelude::*;

fn mission_file() -> FixtureBuilder {
    FixtureBuilder::new()
        .global_attribute("Project", "TEST")
        .global_attribute("Logical_source", "mms1_fgm_srvy_l2")
        .variable(VariableSpec::z("Epoch", DataType::TimeTt2000).max_rec(99))
        .variable(
            VariableSpec::z("B_gse", DataType::Float)
                .dims(&[4], &[-1])
                .max_rec(99)
                .blocks(&[1600]),
        )
        .variable(
            VariableSpec::z("label_B", DataType::Char)
                .elements(8)
                .flags(0),
        )
        .variable_attribute("VAR_TYPE", "Epoch", "support_data")
        .variable_attribute("VAR_TYPE", "B_gse", "data")
        .variable_attribute("VAR_TYPE", "label_B", "metadata")
        .variable_attribute("DEPEND_0", "B_gse", "Epoch")
        .variable_attribute("FILLVAL", "B_gse", EntryValue::real8(&[-1.0e31]))
}

#[test]
fn project_attribute_has_value_and_start_byte() {
    let (data, layout) = FixtureBuilder::new()
        .global_attribute("Project", "TEST")
        .build_with_layout();
    let file = CdfFile::from_bytes(&data).unwrap();

    let project = file.attribute("Project").unwrap();
    assert_eq!(project.values, vec![Value::Text("TEST".into())]);
    assert_eq!(project.data_type, Some(DataType::Char));
    assert_eq!(
        project.start_byte,
        layout.attributes[0].gr_entries[0] + ENTRY_VALUE_OFFSET
    );
}

#[test]
fn variables_carry_their_attributes() {
    let file = CdfFile::from_bytes(&mission_file().build()).unwrap();

    let b = file.variable("B_gse").unwrap();
    assert_eq!(b.attribute_text("DEPEND_0").as_deref(), Some("Epoch"));
    assert_eq!(b.attribute("FILLVAL"), Some(&[Value::Real8(-1.0e31)][..]));
    assert_eq!(b.role(), VariableRole::Data);
    assert_eq!(b.dims, vec![4]);
    assert_eq!(b.record_count, 100);

    let epoch = file.variable("Epoch").unwrap();
    assert_eq!(epoch.role(), VariableRole::SupportData);
    assert!(epoch.attribute("DEPEND_0").is_none());

    let data: Vec<&str> = file.data_variables().map(|v| v.name.as_str()).collect();
    assert_eq!(data, vec!["B_gse"]);
}

#[test]
fn variable_without_var_type_is_data() {
    let data = FixtureBuilder::new()
        .variable(VariableSpec::z("counts", DataType::UInt2))
        .build();
    let file = CdfFile::from_bytes(&data).unwrap();
    assert_eq!(file.data_variables().count(), 1);
}

#[test]
fn parsing_is_idempotent() {
    let data = mission_file().build();
    let first = CdfFile::from_bytes(&data).unwrap();
    let second = CdfFile::from_bytes(&data).unwrap();
    assert_eq!(first.global_attributes(), second.global_attributes());
    assert_eq!(first.variable_attributes(), second.variable_attributes());
    assert_eq!(first.variables(), second.variables());
}

#[test]
fn two_index_entries_report_first_block() {
    let (data, layout) = FixtureBuilder::new()
        .variable(VariableSpec::z("B", DataType::Double).blocks(&[64, 64]))
        .build_with_layout();
    let file = CdfFile::from_bytes(&data).unwrap();
    let b = file.variable("B").unwrap();
    assert_eq!(b.start_byte, layout.variables[0].vvrs[0] + ENVELOPE_LEN);
    let vxr = file.catalog().variable_index(b.index_offset).unwrap();
    assert_eq!(vxr.used_entries().count(), 2);
}

#[test]
fn virtual_variable_has_no_start_byte() {
    let file = CdfFile::from_bytes(
        &FixtureBuilder::new()
            .variable(VariableSpec::z("virtual", DataType::Double).without_values())
            .build(),
    )
    .unwrap();
    let v = file.variable("virtual").unwrap();
    assert!(v.is_virtual());
    assert_eq!(v.start_byte, 0);
    assert_eq!(v.dims, vec![1]);
}

#[test]
fn missing_global_descriptor_is_fatal() {
    let data = FixtureBuilder::new().without_global_descriptor().build();
    let err = CdfFile::from_bytes(&data).unwrap_err();
    assert!(matches!(err, CdfError::MissingGlobalDescriptor));
}

#[test]
fn cyclic_entry_chain_is_fatal() {
    let (mut data, layout) = FixtureBuilder::new()
        .global_attribute("TEXT", "one")
        .global_attribute("TEXT", "two")
        .build_with_layout();
    let entries = &layout.attributes[0].gr_entries;
    patch_u64(&mut data, entries[1] + ENVELOPE_LEN, entries[0]);
    let err = CdfFile::from_bytes(&data).unwrap_err();
    assert!(matches!(err, CdfError::CyclicChain { family: "AEDR", .. }));
}

#[test]
fn cyclic_variable_chain_is_fatal() {
    let (mut data, layout) = FixtureBuilder::new()
        .variable(VariableSpec::z("a", DataType::Int4))
        .variable(VariableSpec::z("b", DataType::Int4))
        .build_with_layout();
    patch_u64(
        &mut data,
        layout.variables[1].vdr + ENVELOPE_LEN,
        layout.variables[0].vdr,
    );
    let err = CdfFile::from_bytes(&data).unwrap_err();
    assert!(matches!(err, CdfError::CyclicChain { family: "zVDR", .. }));
}

#[test]
fn truncated_file_keeps_earlier_records() {
    let (data, layout) = mission_file().build_with_layout();
    let cut = layout.variables[2].vdr as usize + 100;
    let file = CdfFile::from_bytes(&data[..cut]).unwrap();
    assert!(file.catalog().is_truncated());
    assert!(file.variable("B_gse").is_some());
    assert!(file.variable("label_B").is_none());
}

#[test]
fn unknown_entry_type_decodes_as_unknown() {
    let raw = EntryValue::raw(DataType::Unknown(77), 2, vec![1, 2, 3, 4]);
    let data = FixtureBuilder::new()
        .attribute(AttributeSpec::global("Odd").gr_entry(0, raw))
        .build();
    let file = CdfFile::from_bytes(&data).unwrap();
    let odd = file.attribute("Odd").unwrap();
    assert_eq!(odd.values, vec![Value::Unknown(77)]);
    assert_eq!(odd.display_values(), vec![String::new()]);
}

#[test]
fn negative_dimension_count_reads_as_zero() {
    let (mut data, layout) = FixtureBuilder::new()
        .variable(VariableSpec::z("scalar", DataType::Int4))
        .build_with_layout();
    // zNumDims directly follows the 256-byte name.
    patch_i32(&mut data, layout.variables[0].vdr + 340, -4);
    let file = CdfFile::from_bytes(&data).unwrap();
    let v = file.variable("scalar").unwrap();
    assert_eq!(v.dims, vec![1]);
    assert!(v.dim_varys.is_empty());
}

proptest! {
    #[test]
    fn record_count_is_max_rec_plus_one(max_rec in -5i32..10_000) {
        let data = FixtureBuilder::new()
            .variable(VariableSpec::z("v", DataType::Int2).max_rec(max_rec))
            .build();
        let file = CdfFile::from_bytes(&data).unwrap();
        let expected = u64::try_from(i64::from(max_rec) + 1).unwrap_or(0);
        prop_assert_eq!(file.variables()[0].record_count, expected);
    }

    #[test]
    fn catalog_offsets_follow_sizes(
        blocks in proptest::collection::vec(1usize..200, 0..6),
        names in proptest::collection::vec("[A-Za-z][A-Za-z0-9_]{0,12}", 1..5),
    ) {
        let mut builder = FixtureBuilder::new();
        for name in &names {
            builder = builder
                .global_attribute(name, name.as_str())
                .variable(VariableSpec::z(name, DataType::Int1).blocks(&blocks));
        }
        let (data, layout) = builder.build_with_layout();
        let file = CdfFile::from_bytes(&data).unwrap();
        let records = file.catalog().records();

        let offsets: Vec<u64> = records.iter().map(|r| r.offset()).collect();
        prop_assert_eq!(offsets, layout.record_offsets());
        for pair in records.windows(2) {
            prop_assert_eq!(pair[0].next_offset(), pair[1].offset());
        }
        let gdr = file.global_descriptor().unwrap();
        let z_chain = file.catalog().variable_chain(VariableKind::Z).unwrap();
        prop_assert_eq!(z_chain.len(), usize::try_from(gdr.z_var_count).unwrap());
    }
}
