//! Archive compliance checks for CDF files.
//!
//! Rules cover the file header, the global and variable attributes the ISTP
//! guidelines and the CDF tools require, variable naming, variable storage,
//! data encoding and the kinds of records present. Every rule runs; nothing
//! short-circuits.
//!
//! ```no_run
//! use std::path::Path;
//!
//! let file = cdf_format::read_cdf(Path::new("input.cdf")).unwrap();
//! let report = cdf_check::check(&file);
//! for issue in report.issues() {
//!     println!("{issue}");
//! }
//! ```

mod checks;
mod issue;
mod report;
pub mod rules;

use cdf_format::{CdfFile, ReaderOptions};
use tracing::{debug, warn};

pub use issue::{Category, Issue, Requirement, Severity};
pub use report::ComplianceReport;

/// Run every rule against an assembled file.
pub fn check(file: &CdfFile) -> ComplianceReport {
    let report = checks::run_all(file);
    debug!(
        issues = report.len(),
        errors = report.error_count(),
        "compliance check finished"
    );
    report
}

/// Parse `data` and check it. A parse failure is reported as one issue.
pub fn check_bytes(data: &[u8]) -> ComplianceReport {
    check_bytes_with_options(data, &ReaderOptions::default())
}

/// [`check_bytes`] with explicit reader options.
pub fn check_bytes_with_options(data: &[u8], options: &ReaderOptions) -> ComplianceReport {
    match CdfFile::parse(data, options) {
        Ok(file) => check(&file),
        Err(err) => {
            warn!(error = %err, "file could not be parsed for checking");
            let mut report = ComplianceReport::new();
            report.add(Issue::CorruptFile {
                reason: err.to_string(),
            });
            report
        }
    }
}
