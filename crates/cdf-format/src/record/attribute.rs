//! Attribute records: ADR and AEDR.

use crate::cursor::ByteCursor;
use crate::error::Result;
use crate::types::{AttributeScope, DataType, Value};

/// Width of fixed name fields.
pub const NAME_LEN: usize = 256;
/// Offset of the value bytes from the start of an AEDR.
pub const ENTRY_VALUE_OFFSET: u64 = 56;

/// Attribute descriptor record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeDescriptor {
    pub next: u64,
    pub gr_entry_head: u64,
    pub scope: AttributeScope,
    pub number: i32,
    pub gr_entry_count: i32,
    pub max_gr_entry: i32,
    pub z_entry_head: u64,
    pub z_entry_count: i32,
    pub max_z_entry: i32,
    pub name: String,
}

impl AttributeDescriptor {
    pub(crate) fn decode(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        let next = cursor.read_offset()?;
        let gr_entry_head = cursor.read_offset()?;
        let scope = AttributeScope::from_code(cursor.read_i32()?);
        let number = cursor.read_i32()?;
        let gr_entry_count = cursor.read_i32()?;
        let max_gr_entry = cursor.read_i32()?;
        cursor.skip(4)?; // rfuA
        let z_entry_head = cursor.read_offset()?;
        let z_entry_count = cursor.read_i32()?;
        let max_z_entry = cursor.read_i32()?;
        cursor.skip(4)?; // rfuE
        let name = cursor.read_text(NAME_LEN)?;

        Ok(Self {
            next,
            gr_entry_head,
            scope,
            number,
            gr_entry_count,
            max_gr_entry,
            z_entry_head,
            z_entry_count,
            max_z_entry,
            name,
        })
    }
}

/// Attribute entry record (AgrEDR or AzEDR).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeEntry {
    pub next: u64,
    pub attribute_number: i32,
    pub data_type: DataType,
    /// Owning variable number, or entry index for global attributes.
    pub number: i32,
    pub element_count: i32,
    pub value: Vec<u8>,
    /// Absolute file offset of the value bytes.
    pub value_offset: u64,
}

impl AttributeEntry {
    pub(crate) fn decode(cursor: &mut ByteCursor<'_>, offset: u64, size: u64) -> Result<Self> {
        let next = cursor.read_offset()?;
        let attribute_number = cursor.read_i32()?;
        let data_type = DataType::from_code(cursor.read_i32()?);
        let number = cursor.read_i32()?;
        let element_count = cursor.read_i32()?;
        cursor.skip(20)?; // rfuA, rfuB, rfuC, rfuD, rfuE
        let value_len = size.saturating_sub(ENTRY_VALUE_OFFSET);
        let value = cursor
            .read_bytes(usize::try_from(value_len).unwrap_or(usize::MAX))?
            .to_vec();

        Ok(Self {
            next,
            attribute_number,
            data_type,
            number,
            element_count,
            value,
            value_offset: offset + ENTRY_VALUE_OFFSET,
        })
    }

    /// Decoded values, bounded by the element count.
    #[must_use]
    pub fn values(&self) -> Vec<Value> {
        let count = usize::try_from(self.element_count).unwrap_or(0);
        self.data_type.decode_values(&self.value, count)
    }
}
