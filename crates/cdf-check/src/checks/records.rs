//! Record kinds that may not appear in an archived file.

use cdf_format::record::RecordBody;
use cdf_format::{CdfFile, RecordKind, VariableKind};

use crate::issue::Issue;

/// Walk every record in file order.
pub fn check(file: &CdfFile) -> Vec<Issue> {
    let mut issues = Vec::new();
    for record in file.catalog().records() {
        let offset = record.offset();
        match record.kind() {
            RecordKind::VariableDescriptor(VariableKind::R) => {
                issues.push(Issue::RVariablesPresent { offset });
            }
            kind @ (RecordKind::CompressedFile
            | RecordKind::CompressionParameters
            | RecordKind::CompressedValues) => {
                issues.push(Issue::CompressedRecords {
                    offset,
                    kind: kind.short_name(),
                });
            }
            RecordKind::SparsenessParameters => {
                issues.push(Issue::SparseParameters { offset });
            }
            RecordKind::VariableIndex => {
                if let RecordBody::VariableIndex(vxr) = &record.body
                    && vxr.next != 0
                {
                    issues.push(Issue::FragmentedIndex { offset });
                }
            }
            _ => {}
        }
    }
    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use cdf_format::DataType;
    use cdf_format::fixture::{FixtureBuilder, VariableSpec};

    #[test]
    fn test_z_variables_only_pass() {
        let data = FixtureBuilder::new()
            .variable(VariableSpec::z("B", DataType::Real4).nested_index())
            .build();
        assert!(check(&CdfFile::from_bytes(&data).unwrap()).is_empty());
    }

    #[test]
    fn test_disallowed_kinds_in_file_order() {
        let (data, layout) = FixtureBuilder::new()
            .variable(VariableSpec::r("Bx", DataType::Real4))
            .raw_record(11, 8)
            .raw_record(12, 8)
            .raw_record(13, 8)
            .build_with_layout();
        let file = CdfFile::from_bytes(&data).unwrap();
        let issues = check(&file);

        assert_eq!(issues.len(), 4);
        assert_eq!(
            issues[0],
            Issue::RVariablesPresent {
                offset: layout.variables[0].vdr
            }
        );
        let compressed_at = |issue: &Issue| match issue {
            Issue::CompressedRecords { offset, .. } => Some(*offset),
            _ => None,
        };
        assert_eq!(compressed_at(&issues[1]), Some(layout.raw[0]));
        assert_eq!(
            issues[2],
            Issue::SparseParameters {
                offset: layout.raw[1]
            }
        );
        assert_eq!(compressed_at(&issues[3]), Some(layout.raw[2]));
    }

    #[test]
    fn test_chained_index() {
        let (data, layout) = FixtureBuilder::new()
            .variable(
                VariableSpec::z("B", DataType::Real4)
                    .max_rec(1)
                    .blocks(&[4, 4])
                    .chained_index(),
            )
            .build_with_layout();
        let file = CdfFile::from_bytes(&data).unwrap();
        assert_eq!(
            check(&file),
            vec![Issue::FragmentedIndex {
                offset: layout.variables[0].vxrs[0]
            }]
        );
    }
}
