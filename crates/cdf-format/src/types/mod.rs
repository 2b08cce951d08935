//! Core types for CDF file handling.
//!
//! This module provides the closed code sets of the format (data types,
//! record kinds, scopes, encodings), the decoded scalar value and the
//! reader options.

mod data_type;
mod kind;
mod options;
mod value;

pub use data_type::DataType;
pub use kind::{AttributeScope, Encoding, EntryKind, RecordKind, VariableFlags, VariableKind};
pub use options::ReaderOptions;
pub use value::Value;
