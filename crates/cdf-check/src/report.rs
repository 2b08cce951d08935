//! Compliance report containing all issues for a file.

use serde::{Deserialize, Serialize};

use crate::issue::{Issue, Severity};

/// Outcome of checking one file. A file is compliant when no issue was found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceReport {
    pub issues: Vec<Issue>,
}

impl ComplianceReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an issue to the report.
    pub fn add(&mut self, issue: Issue) {
        self.issues.push(issue);
    }

    pub fn extend(&mut self, issues: impl IntoIterator<Item = Issue>) {
        self.issues.extend(issues);
    }

    /// Issues in the order the rules found them.
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// Whether the file passed every rule, warnings included.
    pub fn is_compliant(&self) -> bool {
        self.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    /// Rendered messages in rule order.
    pub fn messages(&self) -> Vec<String> {
        self.issues.iter().map(Issue::message).collect()
    }

    fn count(&self, severity: Severity) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity() == severity)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        let mut report = ComplianceReport::new();
        assert!(report.is_compliant());

        report.add(Issue::FileCompressed);
        report.add(Issue::VirtualVariable {
            variable: "calc".into(),
        });
        assert_eq!(report.len(), 2);
        assert_eq!(report.error_count(), 1);
        assert_eq!(report.warning_count(), 1);
        assert!(!report.is_compliant());
        assert_eq!(report.messages()[0], "File is compressed.");
    }
}
