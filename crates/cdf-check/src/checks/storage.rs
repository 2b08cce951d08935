//! Variable storage checks.

use cdf_format::record::VariableDescriptor;
use cdf_format::{CdfFile, DataType, RecordCatalog, VariableKind};

use super::corrupt;
use crate::issue::Issue;

/// Dimension variance every dimension must carry.
const VARIANCE_SENTINEL: i32 = -1;

pub fn check(file: &CdfFile) -> Vec<Issue> {
    let mut issues = Vec::new();
    let catalog = file.catalog();

    match catalog.variable_chain(VariableKind::Z) {
        Ok(chain) => {
            for vdr in chain {
                issues.extend(check_descriptor(catalog, vdr));
            }
        }
        Err(err) => issues.push(corrupt(&err)),
    }

    for variable in file.data_variables() {
        if !variable.is_record_varying() {
            issues.push(Issue::NotRecordVarying {
                variable: variable.name.clone(),
            });
        }
        if variable.data_type == DataType::Epoch16 {
            issues.push(Issue::DisallowedDataType {
                variable: variable.name.clone(),
                data_type: variable.data_type.name().to_string(),
            });
        }
    }

    issues
}

fn check_descriptor(catalog: &RecordCatalog, vdr: &VariableDescriptor) -> Vec<Issue> {
    let mut issues = Vec::new();
    let name = || vdr.name.clone();

    if vdr.flags.compressed() {
        issues.push(Issue::VariableCompressed { variable: name() });
    }

    match catalog.variable_index(vdr.vxr_head) {
        None => issues.push(Issue::VirtualVariable { variable: name() }),
        Some(vxr) if vxr.used_count > 1 => issues.push(Issue::FragmentedVariable {
            variable: name(),
            blocks: vxr.used_count.unsigned_abs(),
        }),
        Some(_) => {}
    }

    // Character strings vary along every dimension; other types skip the first.
    let skip = usize::from(!vdr.data_type.is_char());
    for (dimension, value) in vdr.dim_varys.iter().enumerate().skip(skip) {
        if *value != VARIANCE_SENTINEL {
            issues.push(Issue::DimensionVariance {
                variable: name(),
                dimension,
                value: *value,
            });
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use cdf_format::fixture::{FixtureBuilder, VariableSpec};

    fn run(builder: FixtureBuilder) -> Vec<Issue> {
        check(&CdfFile::from_bytes(&builder.build()).unwrap())
    }

    fn support(builder: FixtureBuilder, name: &str) -> FixtureBuilder {
        builder.variable_attribute("VAR_TYPE", name, "support_data")
    }

    #[test]
    fn test_contiguous_variable_passes() {
        let builder = FixtureBuilder::new().variable(VariableSpec::z("B", DataType::Real4));
        assert!(run(builder).is_empty());
    }

    #[test]
    fn test_compressed_and_virtual() {
        let builder = FixtureBuilder::new().variable(
            VariableSpec::z("calc", DataType::Real8)
                .flags(0x5)
                .without_values(),
        );
        assert_eq!(
            run(builder),
            vec![
                Issue::VariableCompressed {
                    variable: "calc".into()
                },
                Issue::VirtualVariable {
                    variable: "calc".into()
                },
            ]
        );
    }

    #[test]
    fn test_fragmented_blocks() {
        let builder = FixtureBuilder::new()
            .variable(
                VariableSpec::z("B", DataType::Real4)
                    .max_rec(1)
                    .blocks(&[4, 4]),
            );
        assert_eq!(
            run(builder),
            vec![Issue::FragmentedVariable {
                variable: "B".into(),
                blocks: 2
            }]
        );
    }

    #[test]
    fn test_dimension_variance_skips_first_for_numbers() {
        let builder = FixtureBuilder::new().variable(
            VariableSpec::z("B", DataType::Real4)
                .dims(&[3, 2], &[0, 0])
                .blocks(&[24]),
        );
        assert_eq!(
            run(builder),
            vec![Issue::DimensionVariance {
                variable: "B".into(),
                dimension: 1,
                value: 0
            }]
        );
    }

    #[test]
    fn test_dimension_variance_checks_all_for_char() {
        let builder = support(
            FixtureBuilder::new().variable(
                VariableSpec::z("label", DataType::Char)
                    .elements(4)
                    .dims(&[3], &[0])
                    .blocks(&[12]),
            ),
            "label",
        );
        assert_eq!(
            run(builder),
            vec![Issue::DimensionVariance {
                variable: "label".into(),
                dimension: 0,
                value: 0
            }]
        );
    }

    #[test]
    fn test_data_role_rules() {
        let builder = FixtureBuilder::new()
            .variable(VariableSpec::z("Epoch", DataType::Epoch16).blocks(&[16]))
            .variable(VariableSpec::z("Static", DataType::Int4).flags(0))
            .variable(
                VariableSpec::z("Meta", DataType::Epoch16)
                    .flags(0)
                    .blocks(&[16]),
            )
            .variable_attribute("VAR_TYPE", "Meta", "metadata");
        assert_eq!(
            run(builder),
            vec![
                Issue::DisallowedDataType {
                    variable: "Epoch".into(),
                    data_type: "CDF_EPOCH16".into()
                },
                Issue::NotRecordVarying {
                    variable: "Static".into()
                },
            ]
        );
    }
}
