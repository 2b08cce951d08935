//! Variable records: rVDR/zVDR, VXR and VVR.

use crate::cursor::ByteCursor;
use crate::error::Result;
use crate::record::attribute::NAME_LEN;
use crate::types::{DataType, Value, VariableFlags, VariableKind};

/// Variable descriptor record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableDescriptor {
    pub kind: VariableKind,
    pub next: u64,
    pub data_type: DataType,
    pub max_rec: i32,
    pub vxr_head: u64,
    pub vxr_tail: u64,
    pub flags: VariableFlags,
    pub sparse_records: i32,
    pub element_count: i32,
    pub number: i32,
    pub cpr_spr_offset: u64,
    pub blocking_factor: i32,
    pub name: String,
    /// Declared dimension sizes (zVariables only).
    pub dim_sizes: Vec<i32>,
    pub dim_varys: Vec<i32>,
    /// Raw pad bytes, present when the pad flag is set.
    pub pad: Option<Vec<u8>>,
}

impl VariableDescriptor {
    pub(crate) fn decode(
        cursor: &mut ByteCursor<'_>,
        kind: VariableKind,
        r_num_dims: i32,
    ) -> Result<Self> {
        let next = cursor.read_offset()?;
        let data_type = DataType::from_code(cursor.read_i32()?);
        let max_rec = cursor.read_i32()?;
        let vxr_head = cursor.read_offset()?;
        let vxr_tail = cursor.read_offset()?;
        let flags = VariableFlags(cursor.read_i32()?);
        let sparse_records = cursor.read_i32()?;
        cursor.skip(12)?; // rfuB, rfuC, rfuF
        let element_count = cursor.read_i32()?;
        let number = cursor.read_i32()?;
        let cpr_spr_offset = cursor.read_offset()?;
        let blocking_factor = cursor.read_i32()?;
        let name = cursor.read_text(NAME_LEN)?;

        let (dim_sizes, vary_count) = match kind {
            VariableKind::Z => {
                let num_dims = cursor.read_i32()?;
                (cursor.read_i32_array(num_dims)?, num_dims)
            }
            VariableKind::R => (Vec::new(), r_num_dims),
        };
        let dim_varys = cursor.read_i32_array(vary_count)?;

        let pad = if flags.has_pad_value() {
            let len = usize::try_from(element_count)
                .unwrap_or(0)
                .saturating_mul(data_type.width())
                .min(cursor.remaining());
            Some(cursor.read_bytes(len)?.to_vec())
        } else {
            None
        };

        Ok(Self {
            kind,
            next,
            data_type,
            max_rec,
            vxr_head,
            vxr_tail,
            flags,
            sparse_records,
            element_count,
            number,
            cpr_spr_offset,
            blocking_factor,
            name,
            dim_sizes,
            dim_varys,
            pad,
        })
    }

    /// Number of records written, `max_rec + 1` clamped at zero.
    #[must_use]
    pub fn record_count(&self) -> u64 {
        u64::try_from(i64::from(self.max_rec) + 1).unwrap_or(0)
    }

    /// Decoded pad values.
    #[must_use]
    pub fn pad_values(&self) -> Vec<Value> {
        let count = usize::try_from(self.element_count).unwrap_or(0);
        self.pad
            .as_deref()
            .map(|pad| self.data_type.decode_values(pad, count))
            .unwrap_or_default()
    }
}

/// One used slot of a variable index record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexEntry {
    pub first: i32,
    pub last: i32,
    pub offset: u64,
}

/// Variable index record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableIndex {
    pub next: u64,
    pub entry_count: i32,
    pub used_count: i32,
    pub first: Vec<i32>,
    pub last: Vec<i32>,
    pub offsets: Vec<u64>,
}

impl VariableIndex {
    pub(crate) fn decode(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        let next = cursor.read_offset()?;
        let entry_count = cursor.read_i32()?;
        let used_count = cursor.read_i32()?;
        let first = cursor.read_i32_array(entry_count)?;
        let last = cursor.read_i32_array(entry_count)?;
        let offsets = cursor.read_offset_array(entry_count)?;

        Ok(Self {
            next,
            entry_count,
            used_count,
            first,
            last,
            offsets,
        })
    }

    /// The used entries, bounded by the entry capacity.
    pub fn used_entries(&self) -> impl Iterator<Item = IndexEntry> + '_ {
        let used = usize::try_from(self.used_count).unwrap_or(0);
        self.first
            .iter()
            .zip(&self.last)
            .zip(&self.offsets)
            .take(used)
            .map(|((first, last), offset)| IndexEntry {
                first: *first,
                last: *last,
                offset: *offset,
            })
    }
}

/// Variable values record. The payload stays in the source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariableValues {
    /// Absolute offset of the first data byte.
    pub data_offset: u64,
    pub data_len: u64,
}
