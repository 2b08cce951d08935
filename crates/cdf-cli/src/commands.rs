//! Subcommand implementations.

use std::path::Path;

use anyhow::{Context, Result};
use cdf_check::ComplianceReport;
use cdf_format::{CdfFile, ReaderOptions};
use tracing::{error, info, info_span};

use crate::checksum::sha256_hex;
use crate::render;

/// What `dump` prints.
#[derive(Debug, Clone, Copy, Default)]
pub struct DumpSections {
    pub attributes: bool,
    pub variables: bool,
    pub records: bool,
    pub iso_epochs: bool,
}

impl DumpSections {
    /// Attributes and variables when nothing was selected.
    #[must_use]
    pub fn or_default(self) -> Self {
        if self.attributes || self.variables || self.records {
            self
        } else {
            Self {
                attributes: true,
                variables: true,
                ..self
            }
        }
    }
}

/// Read a whole file.
pub fn read_input(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("read {}", path.display()))
}

/// Check one file.
pub fn check_file(path: &Path, options: &ReaderOptions) -> Result<ComplianceReport> {
    let data = read_input(path)?;
    Ok(cdf_check::check_bytes_with_options(&data, options))
}

/// Check every file and print the outcome of each.
///
/// Returns whether every file was compliant. A file that cannot be read
/// counts as non-compliant; the remaining files are still checked.
pub fn run_check(files: &[impl AsRef<Path>], options: &ReaderOptions, plain: bool) -> bool {
    let mut all_compliant = true;
    for path in files {
        let path = path.as_ref();
        let span = info_span!("file", path = %path.display());
        let _guard = span.enter();

        let report = match check_file(path, options) {
            Ok(report) => report,
            Err(err) => {
                error!(error = %err, "file skipped");
                eprintln!("error: {err:#}");
                all_compliant = false;
                continue;
            }
        };
        info!(
            errors = report.error_count(),
            warnings = report.warning_count(),
            "checked"
        );

        if files.len() > 1 {
            println!("{}:", path.display());
        }
        if plain || report.is_compliant() {
            println!("{}", render::check_text(&report));
        } else {
            println!("{}", render::NON_COMPLIANT);
            println!("Reasons:");
            println!("{}", render::issue_table(&report));
        }
        all_compliant &= report.is_compliant();
    }
    all_compliant
}

/// Print the selected sections of a file.
pub fn run_dump(path: &Path, options: &ReaderOptions, sections: DumpSections) -> Result<()> {
    let span = info_span!("file", path = %path.display());
    let _guard = span.enter();

    let data = read_input(path)?;
    let file = CdfFile::parse(&data, options)
        .with_context(|| format!("parse {}", path.display()))?;
    let sections = sections.or_default();

    println!("{}", render::header_line(&file));
    if let Some(cdr) = file.file_descriptor() {
        println!(
            "Format: {}.{}.{}  Encoding: {}",
            cdr.version, cdr.release, cdr.increment, cdr.encoding
        );
    }
    if file.catalog().is_truncated() {
        println!("Warning: the record stream ends inside a record.");
    }

    if sections.attributes {
        println!();
        println!("Attributes:");
        println!("{}", render::attribute_table(&file, sections.iso_epochs));
    }
    if sections.variables {
        println!();
        println!("Variables:");
        println!("{}", render::variable_table(&file));
        println!(
            "{}",
            render::variable_attribute_table(&file, sections.iso_epochs)
        );
        let data: Vec<&str> = file.data_variables().map(|v| v.name.as_str()).collect();
        println!("Data variables: {}", data.join(", "));
    }
    if sections.records {
        println!();
        println!("Records:");
        println!("{}", render::record_table(file.catalog()));
    }
    Ok(())
}

/// Label summary JSON for a file.
pub fn summary_json(path: &Path, options: &ReaderOptions, compact: bool) -> Result<String> {
    let data = read_input(path)?;
    let file = CdfFile::parse(&data, options)
        .with_context(|| format!("parse {}", path.display()))?;
    let summary = file.summary(&path.display().to_string(), &sha256_hex(&data));
    let json = if compact {
        serde_json::to_string(&summary)
    } else {
        serde_json::to_string_pretty(&summary)
    };
    json.context("serialize label summary")
}

pub fn run_summary(path: &Path, options: &ReaderOptions, compact: bool) -> Result<()> {
    let span = info_span!("file", path = %path.display());
    let _guard = span.enter();
    println!("{}", summary_json(path, options, compact)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dump_sections_default() {
        let sections = DumpSections::default().or_default();
        assert!(sections.attributes && sections.variables && !sections.records);

        let records_only = DumpSections {
            records: true,
            ..DumpSections::default()
        }
        .or_default();
        assert!(!records_only.attributes && records_only.records);
    }
}
