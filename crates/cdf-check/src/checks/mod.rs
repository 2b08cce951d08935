//! Rule families.
//!
//! Each module checks one family and returns its issues in discovery order.

mod attributes;
mod encoding;
mod file;
mod naming;
mod records;
mod storage;

use cdf_format::CdfError;

use crate::issue::Issue;
use crate::report::ComplianceReport;

/// Run all rule families on a file.
pub fn run_all(file: &cdf_format::CdfFile) -> ComplianceReport {
    let mut report = ComplianceReport::new();

    // 1. Header words, unused and sparse records
    report.extend(file::check(file));

    // 2. Required global attributes (ISTP)
    report.extend(attributes::check_globals(file));

    // 3. Variable names
    report.extend(naming::check(file));

    // 4. Required variable attributes (CDF tools, then ISTP)
    report.extend(attributes::check_variables(file));

    // 5. Variable storage
    report.extend(storage::check(file));

    // 6. Data encoding
    report.extend(encoding::check(file));

    // 7. Record kinds present anywhere in the file
    report.extend(records::check(file));

    report
}

/// Issue for a chain that could not be walked.
fn corrupt(err: &CdfError) -> Issue {
    Issue::CorruptFile {
        reason: err.to_string(),
    }
}
