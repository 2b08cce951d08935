//! File-level records: CDR, GDR and UIR.

use crate::cursor::{ByteCursor, trim_padding};
use crate::error::Result;
use crate::types::Encoding;

/// Largest copyright field stored by the library.
const COPYRIGHT_FIELD_LEN: u64 = 1945;
/// Leading part of the copyright field that carries text.
const COPYRIGHT_TEXT_LEN: usize = 256;

/// CDF descriptor record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDescriptor {
    pub gdr_offset: u64,
    pub version: i32,
    pub release: i32,
    pub encoding: Encoding,
    pub flags: i32,
    pub increment: i32,
    pub copyright: String,
}

impl FileDescriptor {
    pub(crate) fn decode(cursor: &mut ByteCursor<'_>, size: u64) -> Result<Self> {
        let gdr_offset = cursor.read_offset()?;
        let version = cursor.read_i32()?;
        let release = cursor.read_i32()?;
        let encoding = Encoding::from_code(cursor.read_i32()?);
        let flags = cursor.read_i32()?;
        cursor.skip(8)?; // rfuA, rfuB
        let increment = cursor.read_i32()?;
        cursor.skip(8)?; // rfuD, rfuE

        let field_len = size.saturating_sub(56).min(COPYRIGHT_FIELD_LEN);
        let field = cursor.read_bytes(usize::try_from(field_len).unwrap_or(0))?;
        let copyright = trim_padding(&field[..field.len().min(COPYRIGHT_TEXT_LEN)]);

        Ok(Self {
            gdr_offset,
            version,
            release,
            encoding,
            flags,
            increment,
            copyright,
        })
    }
}

/// Global descriptor record: the heads of every chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalDescriptor {
    pub rvdr_head: u64,
    pub zvdr_head: u64,
    pub adr_head: u64,
    pub eof: u64,
    pub r_var_count: i32,
    pub attribute_count: i32,
    pub r_max_rec: i32,
    pub r_num_dims: i32,
    pub z_var_count: i32,
    pub uir_head: u64,
    pub r_dim_sizes: Vec<i32>,
}

impl GlobalDescriptor {
    pub(crate) fn decode(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        let rvdr_head = cursor.read_offset()?;
        let zvdr_head = cursor.read_offset()?;
        let adr_head = cursor.read_offset()?;
        let eof = cursor.read_offset()?;
        let r_var_count = cursor.read_i32()?;
        let attribute_count = cursor.read_i32()?;
        let r_max_rec = cursor.read_i32()?;
        let r_num_dims = cursor.read_i32()?;
        let z_var_count = cursor.read_i32()?;
        let uir_head = cursor.read_offset()?;
        cursor.skip(12)?; // rfuC, rfuD, rfuE
        let r_dim_sizes = cursor.read_i32_array(r_num_dims)?;

        Ok(Self {
            rvdr_head,
            zvdr_head,
            adr_head,
            eof,
            r_var_count,
            attribute_count,
            r_max_rec,
            r_num_dims,
            z_var_count,
            uir_head,
            r_dim_sizes,
        })
    }
}

/// Unused internal record. Only its links are meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnusedInternal {
    pub next: u64,
    pub prev: u64,
}

impl UnusedInternal {
    pub(crate) fn decode(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        let next = cursor.read_offset()?;
        let prev = cursor.read_offset()?;
        Ok(Self { next, prev })
    }
}
