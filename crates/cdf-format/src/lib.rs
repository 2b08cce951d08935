//! Common Data Format (CDF) record decoder and attribute/variable model.
//!
//! A CDF file is a sequence of variable-length records linked by absolute
//! byte-offset pointers. This crate decodes every record into a
//! [`RecordCatalog`], then assembles the global attributes, variable
//! attributes and variables those records describe into a [`CdfFile`].
//!
//! # Features
//!
//! - Big-endian (MSB) version 3 layout with 8-byte offsets
//! - All attribute and variable descriptor kinds, index and value records
//! - Cycle-guarded chain traversal
//! - Typed value decoding, including both components of `CDF_EPOCH16`
//! - Archive label summary ([`LabelSummary`])
//! - Synthetic file builder for tests (`fixture` feature)
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use cdf_format::read_cdf;
//!
//! let file = read_cdf(Path::new("mms1_fgm_srvy_l2.cdf")).unwrap();
//! if let Some(project) = file.attribute("Project") {
//!     println!("Project: {:?}", project.display_values());
//! }
//! for variable in file.data_variables() {
//!     println!("{} {:?} starts at {}", variable.name, variable.dims, variable.start_byte);
//! }
//! ```

mod attribute;
pub mod catalog;
mod codec;
pub mod cursor;
mod error;
mod file;
pub mod header;
pub mod record;
mod summary;
mod types;
mod variable;

#[cfg(any(test, feature = "fixture"))]
pub mod fixture;

// Re-export error types
pub use error::{CdfError, Result};

// Re-export core types
pub use types::{
    AttributeScope, DataType, Encoding, EntryKind, ReaderOptions, RecordKind, Value, VariableFlags,
    VariableKind,
};

// Re-export the model
pub use attribute::{Attribute, VariableAttribute, VariableId};
pub use catalog::RecordCatalog;
pub use codec::{epoch_to_datetime, epoch16_to_datetime};
pub use file::{CdfFile, CdfReader, read_cdf, read_cdf_with_options};
pub use header::FileHeader;
pub use summary::{AttributeSummary, LabelSummary, VariableSummary};
pub use variable::{Variable, VariableRole, first_data_offset};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
