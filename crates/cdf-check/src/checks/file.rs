//! Header and file-level record checks.

use cdf_format::header::MIN_VERSION;
use cdf_format::{CdfFile, RecordKind};

use crate::issue::Issue;

pub fn check(file: &CdfFile) -> Vec<Issue> {
    let mut issues = Vec::new();
    let header = file.header();
    let catalog = file.catalog();

    if !header.meets_version(MIN_VERSION) {
        issues.push(Issue::VersionTooOld {
            magic: header.magic,
        });
    }

    if header.is_compressed() {
        issues.push(Issue::FileCompressed);
    }

    if let Some(gdr) = file.global_descriptor()
        && gdr.uir_head != 0
    {
        let size = catalog
            .record_at(gdr.uir_head)
            .map(|record| record.envelope.size);
        issues.push(Issue::UnusedRecords {
            offset: gdr.uir_head,
            size,
        });
    }

    if catalog.count_kind(RecordKind::SparsenessParameters) > 0 {
        issues.push(Issue::SparseRecords);
    }

    issues
}
