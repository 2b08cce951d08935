//! Record envelope and per-kind decoding.
//!
//! Every record begins with a 12-byte envelope: an 8-byte size that counts
//! the envelope itself, then a 4-byte kind tag. The record that follows
//! in file order starts at `offset + size`.

mod attribute;
mod descriptor;
mod variable;

pub use attribute::{AttributeDescriptor, AttributeEntry, ENTRY_VALUE_OFFSET, NAME_LEN};
pub use descriptor::{FileDescriptor, GlobalDescriptor, UnusedInternal};
pub use variable::{IndexEntry, VariableDescriptor, VariableIndex, VariableValues};

use tracing::{debug, warn};

use crate::cursor::ByteCursor;
use crate::error::{CdfError, Result};
use crate::types::RecordKind;

/// Length of the envelope shared by all records.
pub const ENVELOPE_LEN: u64 = 12;

/// Position, size and kind of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordEnvelope {
    /// Absolute offset of the record; the identity pointers refer to.
    pub offset: u64,
    /// Total size including the envelope.
    pub size: u64,
    pub kind: RecordKind,
}

impl RecordEnvelope {
    /// Offset of the record that follows in file order.
    #[must_use]
    pub const fn next_offset(&self) -> u64 {
        self.offset + self.size
    }
}

/// Decoded record content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordBody {
    FileDescriptor(FileDescriptor),
    GlobalDescriptor(GlobalDescriptor),
    AttributeDescriptor(AttributeDescriptor),
    AttributeEntry(AttributeEntry),
    VariableDescriptor(VariableDescriptor),
    VariableIndex(VariableIndex),
    VariableValues(VariableValues),
    UnusedInternal(UnusedInternal),
    /// Kinds without a structural decoder; only the envelope is kept.
    Opaque,
    /// A known kind whose body does not fit its declared size.
    Malformed,
}

/// A record with its envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub envelope: RecordEnvelope,
    pub body: RecordBody,
}

impl Record {
    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.envelope.offset
    }

    #[must_use]
    pub const fn kind(&self) -> RecordKind {
        self.envelope.kind
    }

    #[must_use]
    pub const fn next_offset(&self) -> u64 {
        self.envelope.next_offset()
    }
}

/// Outcome of decoding at one offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded {
    Record(Record),
    /// End of the record stream (end of input or an empty envelope).
    End,
}

/// State carried between records during the forward pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecodeContext {
    /// Dimension count of rVariables, known once the GDR is decoded.
    pub r_num_dims: i32,
}

/// Decode the record at `offset`.
///
/// Returns [`Decoded::End`] at the end of input or when the envelope size
/// is smaller than the envelope itself. A record that extends past the end
/// of input is reported as [`CdfError::Truncated`]. A body that does not
/// decode within its declared size becomes [`RecordBody::Malformed`], so
/// the pass can continue at the next record.
pub fn decode_record(data: &[u8], offset: u64, ctx: &DecodeContext) -> Result<Decoded> {
    let mut cursor = ByteCursor::new(data, offset);
    if cursor.remaining() == 0 {
        return Ok(Decoded::End);
    }
    let raw_size = cursor.read_i64()?;
    let code = cursor.read_i32()?;

    let size = u64::try_from(raw_size).unwrap_or(0);
    if size < ENVELOPE_LEN {
        if raw_size != 0 {
            warn!(offset, size = raw_size, "record size smaller than envelope");
        }
        return Ok(Decoded::End);
    }

    let available = data.len().saturating_sub(cursor.position() as usize);
    let end = offset
        .checked_add(size)
        .filter(|end| *end <= data.len() as u64)
        .ok_or_else(|| {
            let needed = usize::try_from(size).unwrap_or(usize::MAX);
            CdfError::truncated(offset, needed, available)
        })?;

    let kind = RecordKind::from_code(code);
    let envelope = RecordEnvelope { offset, size, kind };
    let bounded = &data[..usize::try_from(end).unwrap_or(data.len())];
    let body = match decode_body(bounded, &envelope, ctx) {
        Ok(body) => body,
        Err(err) => {
            warn!(offset, size, kind = %kind, error = %err, "malformed record body");
            RecordBody::Malformed
        }
    };

    debug!(offset, size, kind = %kind, "decoded record");
    Ok(Decoded::Record(Record { envelope, body }))
}

fn decode_body(
    bounded: &[u8],
    envelope: &RecordEnvelope,
    ctx: &DecodeContext,
) -> Result<RecordBody> {
    let RecordEnvelope { offset, size, kind } = *envelope;
    let mut cursor = ByteCursor::new(bounded, offset + ENVELOPE_LEN);

    let body = match kind {
        RecordKind::FileDescriptor => {
            RecordBody::FileDescriptor(FileDescriptor::decode(&mut cursor, size)?)
        }
        RecordKind::GlobalDescriptor => {
            RecordBody::GlobalDescriptor(GlobalDescriptor::decode(&mut cursor)?)
        }
        RecordKind::AttributeDescriptor => {
            RecordBody::AttributeDescriptor(AttributeDescriptor::decode(&mut cursor)?)
        }
        RecordKind::AttributeEntry(_) => {
            RecordBody::AttributeEntry(AttributeEntry::decode(&mut cursor, offset, size)?)
        }
        RecordKind::VariableDescriptor(variable_kind) => {
            RecordBody::VariableDescriptor(VariableDescriptor::decode(
                &mut cursor,
                variable_kind,
                ctx.r_num_dims,
            )?)
        }
        RecordKind::VariableIndex => {
            RecordBody::VariableIndex(VariableIndex::decode(&mut cursor)?)
        }
        RecordKind::VariableValues => RecordBody::VariableValues(VariableValues {
            data_offset: offset + ENVELOPE_LEN,
            data_len: size - ENVELOPE_LEN,
        }),
        RecordKind::UnusedInternal => {
            RecordBody::UnusedInternal(UnusedInternal::decode(&mut cursor)?)
        }
        RecordKind::CompressedFile
        | RecordKind::CompressionParameters
        | RecordKind::SparsenessParameters
        | RecordKind::CompressedValues
        | RecordKind::Other(_) => RecordBody::Opaque,
    };
    Ok(body)
}
