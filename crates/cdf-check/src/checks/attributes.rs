//! Required global and variable attribute checks.

use cdf_format::CdfFile;

use crate::issue::{Issue, Requirement};
use crate::rules::{
    CDF_TOOLS_VARIABLE_ATTRIBUTES, ISTP_VARIABLE_ATTRIBUTES, REQUIRED_GLOBAL_ATTRIBUTES,
    is_alternate,
};

/// Every required global attribute must resolve to an assembled attribute.
pub fn check_globals(file: &CdfFile) -> Vec<Issue> {
    REQUIRED_GLOBAL_ATTRIBUTES
        .iter()
        .filter(|name| file.attribute(name).is_none())
        .map(|name| Issue::MissingGlobalAttribute {
            name: (*name).to_string(),
        })
        .collect()
}

/// Every required variable attribute must have a variable-scope descriptor.
///
/// The check is made once for the file, not per variable.
pub fn check_variables(file: &CdfFile) -> Vec<Issue> {
    let declared: Vec<&str> = file
        .catalog()
        .attribute_descriptors()
        .filter(|adr| adr.scope.is_variable())
        .map(|adr| adr.name.as_str())
        .collect();

    let required = CDF_TOOLS_VARIABLE_ATTRIBUTES
        .iter()
        .map(|name| (*name, Requirement::CdfTools))
        .chain(
            ISTP_VARIABLE_ATTRIBUTES
                .iter()
                .map(|name| (*name, Requirement::Istp)),
        );

    required
        .filter(|(name, _)| !is_alternate(name))
        .filter(|(name, _)| !declared.contains(name))
        .map(|(name, requirement)| Issue::MissingVariableAttribute {
            name: name.to_string(),
            requirement,
        })
        .collect()
}
