//! Variable naming checks.

use std::sync::LazyLock;

use cdf_format::{CdfFile, VariableKind};
use regex::Regex;

use super::corrupt;
use crate::issue::Issue;

static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]+$").expect("valid variable name pattern"));

/// Names of every variable on the r chain, then the z chain.
pub fn check(file: &CdfFile) -> Vec<Issue> {
    let mut issues = Vec::new();
    for kind in [VariableKind::R, VariableKind::Z] {
        match file.catalog().variable_chain(kind) {
            Ok(chain) => {
                for vdr in chain {
                    issues.extend(check_name(&vdr.name));
                }
            }
            Err(err) => issues.push(corrupt(&err)),
        }
    }
    issues
}

fn check_name(name: &str) -> Vec<Issue> {
    let mut issues = Vec::new();
    if !name.chars().next().is_some_and(char::is_alphabetic) {
        issues.push(Issue::NameNotLetter {
            variable: name.to_string(),
        });
    }
    if !NAME_PATTERN.is_match(name) {
        issues.push(Issue::NameSpecialCharacters {
            variable: name.to_string(),
        });
    }
    issues
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        assert!(check_name("Epoch").is_empty());
        assert!(check_name("B_GSE_2").is_empty());
    }

    #[test]
    fn test_leading_digit() {
        assert_eq!(
            check_name("2bad"),
            vec![Issue::NameNotLetter {
                variable: "2bad".into()
            }]
        );
    }

    #[test]
    fn test_special_characters() {
        assert_eq!(
            check_name("B-field"),
            vec![Issue::NameSpecialCharacters {
                variable: "B-field".into()
            }]
        );
        assert_eq!(check_name("_x y").len(), 2);
        assert_eq!(check_name("").len(), 2);
    }

    #[test]
    fn test_non_ascii_letter_starts_name() {
        assert_eq!(
            check_name("Ωmega"),
            vec![Issue::NameSpecialCharacters {
                variable: "Ωmega".into()
            }]
        );
    }
}
