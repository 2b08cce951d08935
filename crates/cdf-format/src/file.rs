//! The assembled file model and reader entry points.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use tracing::debug;

use crate::attribute::{Attribute, VariableAttribute, VariableId, assemble_attributes};
use crate::catalog::RecordCatalog;
use crate::error::{CdfError, Result};
use crate::header::FileHeader;
use crate::record::{FileDescriptor, GlobalDescriptor};
use crate::types::{ReaderOptions, VariableKind};
use crate::variable::{Variable, assemble_variables};

/// A decoded CDF file: the record catalog plus the attributes and variables
/// assembled from it.
#[derive(Debug, Clone)]
pub struct CdfFile {
    catalog: RecordCatalog,
    global_attributes: Vec<Attribute>,
    variable_attributes: Vec<VariableAttribute>,
    variables: Vec<Variable>,
    byte_len: usize,
}

impl CdfFile {
    /// Parse an in-memory image with default options.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::parse(data, &ReaderOptions::default())
    }

    /// Parse an in-memory image.
    ///
    /// Fails when the header is too short, no GDR exists, or any pointer
    /// chain does not terminate.
    pub fn parse(data: &[u8], options: &ReaderOptions) -> Result<Self> {
        let catalog = RecordCatalog::decode(data, options)?;
        if catalog.global_descriptor().is_none() {
            return Err(CdfError::MissingGlobalDescriptor);
        }
        catalog.attribute_chain()?;
        catalog.variable_chain(VariableKind::R)?;
        catalog.variable_chain(VariableKind::Z)?;

        let mut variables = assemble_variables(&catalog);
        let known: HashSet<VariableId> = variables.iter().map(Variable::id).collect();
        let attributes = assemble_attributes(&catalog, &known)?;
        for variable in &mut variables {
            for attribute in &attributes.variable_attributes {
                variable.attach(attribute);
            }
        }

        debug!(
            records = catalog.len(),
            global_attributes = attributes.globals.len(),
            variable_attributes = attributes.variable_attributes.len(),
            variables = variables.len(),
            "assembled CDF model"
        );
        Ok(Self {
            catalog,
            global_attributes: attributes.globals,
            variable_attributes: attributes.variable_attributes,
            variables,
            byte_len: data.len(),
        })
    }

    #[must_use]
    pub const fn catalog(&self) -> &RecordCatalog {
        &self.catalog
    }

    #[must_use]
    pub const fn header(&self) -> &FileHeader {
        self.catalog.header()
    }

    /// Size of the parsed image in bytes.
    #[must_use]
    pub const fn byte_len(&self) -> usize {
        self.byte_len
    }

    #[must_use]
    pub fn file_descriptor(&self) -> Option<&FileDescriptor> {
        self.catalog.file_descriptor()
    }

    #[must_use]
    pub fn global_descriptor(&self) -> Option<&GlobalDescriptor> {
        self.catalog.global_descriptor()
    }

    #[must_use]
    pub fn global_attributes(&self) -> &[Attribute] {
        &self.global_attributes
    }

    #[must_use]
    pub fn variable_attributes(&self) -> &[VariableAttribute] {
        &self.variable_attributes
    }

    #[must_use]
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// Global attribute by exact name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.global_attributes.iter().find(|a| a.name == name)
    }

    #[must_use]
    pub fn variable_attribute(&self, name: &str) -> Option<&VariableAttribute> {
        self.variable_attributes.iter().find(|a| a.name == name)
    }

    /// Variable by exact name.
    #[must_use]
    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.variables.iter().find(|v| v.name == name)
    }

    /// Variables whose role is data.
    pub fn data_variables(&self) -> impl Iterator<Item = &Variable> {
        self.variables.iter().filter(|v| v.is_data())
    }
}

/// CDF file reader.
///
/// Reads the whole source into memory before decoding; assembly needs
/// random access to every record.
pub struct CdfReader<R: Read> {
    reader: BufReader<R>,
    options: ReaderOptions,
}

impl<R: Read> CdfReader<R> {
    /// Create a new CDF reader.
    pub fn new(reader: R) -> Self {
        Self::with_options(reader, ReaderOptions::default())
    }

    /// Create a new CDF reader with options.
    pub fn with_options(reader: R, options: ReaderOptions) -> Self {
        Self {
            reader: BufReader::new(reader),
            options,
        }
    }

    /// Read the entire source and parse it.
    pub fn read_file(mut self) -> Result<CdfFile> {
        let mut data = Vec::new();
        self.reader.read_to_end(&mut data)?;
        CdfFile::parse(&data, &self.options)
    }
}

impl CdfReader<File> {
    /// Open a CDF file for reading.
    pub fn open(path: &Path) -> Result<Self> {
        Self::open_with_options(path, ReaderOptions::default())
    }

    /// Open a CDF file with options.
    pub fn open_with_options(path: &Path, options: ReaderOptions) -> Result<Self> {
        let file = File::open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                CdfError::FileNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                CdfError::Io(e)
            }
        })?;
        Ok(Self::with_options(file, options))
    }
}

/// Read a CDF file from a path.
pub fn read_cdf(path: &Path) -> Result<CdfFile> {
    CdfReader::open(path)?.read_file()
}

/// Read a CDF file with options.
pub fn read_cdf_with_options(path: &Path, options: ReaderOptions) -> Result<CdfFile> {
    CdfReader::open_with_options(path, options)?.read_file()
}
