//! Attribute names required for archiving.

/// Global attributes the ISTP guidelines require.
pub const REQUIRED_GLOBAL_ATTRIBUTES: &[&str] = &[
    "Project",
    "Source_name",
    "Discipline",
    "Data_type",
    "Descriptor",
    "Data_version",
    "Logical_file_id",
    "PI_name",
    "PI_affiliation",
    "TEXT",
    "Instrument_type",
    "Mission_group",
    "Logical_source",
    "Logical_source_description",
];

/// Variable attributes the CDF tools distribution requires.
pub const CDF_TOOLS_VARIABLE_ATTRIBUTES: &[&str] = &[
    "FORMAT", "VALIDMIN", "VALIDMAX", "FILLVAL", "MONOTON", "SCALEMIN", "SCALEMAX",
];

/// Variable attributes the ISTP guidelines require.
///
/// Entries with a `/` name alternates and are not enforced.
pub const ISTP_VARIABLE_ATTRIBUTES: &[&str] = &[
    "CATDESC",
    "DEPEND_0",
    "DISPLAY_TYPE",
    "FIELDNAM",
    "FORM_PTR",
    "LABLAXIS/LABL_PTR_i",
    "UNITS/UNIT_PTR",
    "VAR_TYPE",
];

/// Whether `name` lists alternate attributes rather than one name.
pub fn is_alternate(name: &str) -> bool {
    name.contains('/')
}
