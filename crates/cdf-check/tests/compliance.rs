//! End-to-end compliance checks on synthesized files.

use cdf_check::rules::{
    CDF_TOOLS_VARIABLE_ATTRIBUTES, ISTP_VARIABLE_ATTRIBUTES, REQUIRED_GLOBAL_ATTRIBUTES,
    is_alternate,
};
use cdf_check::{Category, ComplianceReport, Issue, Severity, check, check_bytes};
use cdf_format::fixture::{AttributeSpec, FixtureBuilder, VariableSpec, patch_u64};
use cdf_format::{CdfFile, DataType};

/// A file that satisfies every rule.
fn compliant() -> FixtureBuilder {
    let mut builder = FixtureBuilder::new();
    for name in REQUIRED_GLOBAL_ATTRIBUTES {
        builder = builder.global_attribute(name, "value");
    }
    builder = builder
        .variable(VariableSpec::z("Epoch", DataType::TimeTt2000))
        .variable(
            VariableSpec::z("B_GSE", DataType::Real4)
                .dims(&[3], &[-1])
                .blocks(&[12]),
        )
        .variable_attribute("VAR_TYPE", "Epoch", "support_data")
        .variable_attribute("VAR_TYPE", "B_GSE", "data");
    for name in CDF_TOOLS_VARIABLE_ATTRIBUTES
        .iter()
        .chain(ISTP_VARIABLE_ATTRIBUTES)
        .filter(|name| !is_alternate(name) && **name != "VAR_TYPE")
    {
        builder = builder.attribute(AttributeSpec::variable(name));
    }
    builder
}

fn report(builder: &FixtureBuilder) -> ComplianceReport {
    check(&CdfFile::from_bytes(&builder.build()).unwrap())
}

#[test]
fn compliant_file_has_no_issues() {
    let report = report(&compliant());
    assert!(report.is_compliant(), "{:?}", report.messages());
}

#[test]
fn epoch16_data_variable_is_disallowed() {
    let builder = compliant().variable(VariableSpec::z("Epoch16", DataType::Epoch16));
    let report = report(&builder);
    assert_eq!(
        report.issues(),
        &[Issue::DisallowedDataType {
            variable: "Epoch16".into(),
            data_type: "CDF_EPOCH16".into(),
        }]
    );
}

#[test]
fn epoch_named_data_variable_of_epoch16_is_flagged() {
    let mut builder = FixtureBuilder::new()
        .global_attribute("Project", "TEST")
        .variable(VariableSpec::z("Epoch", DataType::Epoch16));
    for name in CDF_TOOLS_VARIABLE_ATTRIBUTES {
        builder = builder.attribute(AttributeSpec::variable(name));
    }
    let report = report(&builder);
    let flagged: Vec<_> = report
        .issues()
        .iter()
        .filter(|issue| matches!(issue, Issue::DisallowedDataType { .. }))
        .collect();
    assert_eq!(flagged.len(), 1);
    assert_eq!(flagged[0].subject(), Some("Epoch"));
    assert_eq!(
        flagged[0].message(),
        "Variable 'Epoch' has the non-allowed data type of CDF_EPOCH16."
    );
}

#[test]
fn bad_name_does_not_stop_checking() {
    let builder = compliant()
        .variable(VariableSpec::z("2bad", DataType::Real4).without_values())
        .variable_attribute("VAR_TYPE", "2bad", "support_data");
    let report = report(&builder);
    assert_eq!(
        report.issues(),
        &[
            Issue::NameNotLetter {
                variable: "2bad".into()
            },
            Issue::VirtualVariable {
                variable: "2bad".into()
            },
        ]
    );
    assert_eq!(report.error_count(), 1);
    assert_eq!(report.warning_count(), 1);
}

#[test]
fn fragmented_variable_is_a_warning() {
    let builder = compliant().variable(
        VariableSpec::z("B_ext", DataType::Real4)
            .max_rec(1)
            .blocks(&[4, 4]),
    );
    let report = report(&builder);
    assert_eq!(report.len(), 1);
    let issue = &report.issues()[0];
    assert_eq!(issue.rule_id(), "CDF032");
    assert_eq!(issue.category(), Category::Storage);
    assert_eq!(issue.severity(), Severity::Warning);
}

#[test]
fn families_report_in_rule_order() {
    let builder = FixtureBuilder::new()
        .magic(0xCDF2_6002)
        .encoding(6)
        .variable(VariableSpec::r("x-ray", DataType::Real4));
    let report = report(&builder);
    let categories: Vec<Category> = report.issues().iter().map(Issue::category).collect();

    let position = |category: Category| categories.iter().position(|c| *c == category);
    let first = [
        Category::File,
        Category::Attributes,
        Category::Naming,
        Category::Storage,
        Category::Encoding,
        Category::Records,
    ]
    .map(position);
    // Storage is clean here: the only variable is an rVariable.
    assert_eq!(first[3], None);
    assert!(first[0] < first[1]);
    assert!(first[1] < first[2]);
    assert!(first[2] < first[4]);
    assert!(first[4] < first[5]);
    assert!(matches!(
        report.issues().last(),
        Some(Issue::RVariablesPresent { .. })
    ));
}

#[test]
fn unparseable_file_is_one_corrupt_issue() {
    let data = FixtureBuilder::new().without_global_descriptor().build();
    let report = check_bytes(&data);
    assert_eq!(report.len(), 1);
    assert!(matches!(report.issues()[0], Issue::CorruptFile { .. }));
    assert_eq!(report.issues()[0].rule_id(), "CDF099");
}

#[test]
fn cyclic_variable_chain_is_corrupt() {
    let (mut data, layout) = compliant().build_with_layout();
    let first = layout.variables[0].vdr;
    // Point the second zVDR back at the first.
    patch_u64(&mut data, layout.variables[1].vdr + 12, first);
    let report = check_bytes(&data);
    assert_eq!(report.len(), 1);
    assert!(report.messages()[0].starts_with("Error parsing CDF:"));
}

#[test]
fn short_input_is_corrupt() {
    let report = check_bytes(&[0xCD, 0xF3]);
    assert!(matches!(report.issues(), [Issue::CorruptFile { .. }]));
}

#[test]
fn malformed_record_does_not_hide_later_records() {
    // An ADR too short for its fields, then a sparseness record.
    let (data, layout) = compliant()
        .raw_record(4, 8)
        .raw_record(12, 8)
        .build_with_layout();
    let report = check_bytes(&data);
    let sparse = Issue::SparseParameters {
        offset: layout.raw[1],
    };
    assert_eq!(report.issues(), [Issue::SparseRecords, sparse]);
}

#[test]
fn report_serializes_issue_variants() {
    let builder = compliant().compressed();
    let report = report(&builder);
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["issues"][0], serde_json::json!("FileCompressed"));
}
