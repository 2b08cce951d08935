//! Ordered store of decoded records with offset lookup.
//!
//! The catalog is built in one forward pass over the record stream and is
//! never modified afterwards. Pointers between records are resolved through
//! an offset index; the offset of a record is the position the decoder found
//! it at, not a value read from the record.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::error::{CdfError, Result};
use crate::header::{FileHeader, HEADER_LEN};
use crate::record::{
    AttributeDescriptor, AttributeEntry, DecodeContext, Decoded, FileDescriptor, GlobalDescriptor,
    Record, RecordBody, UnusedInternal, VariableDescriptor, VariableIndex, VariableValues,
    decode_record,
};
use crate::types::{ReaderOptions, RecordKind, VariableKind};

/// Decoded records in file order.
#[derive(Debug, Clone)]
pub struct RecordCatalog {
    header: FileHeader,
    records: Vec<Record>,
    index: HashMap<u64, usize>,
    chain_limit: usize,
    truncated: bool,
}

impl RecordCatalog {
    /// Decode every record of `data`.
    ///
    /// Decoding stops at an empty envelope or at the end of input. A record
    /// that runs past the end of input ends the pass with a warning and is
    /// not stored. A record whose body does not decode is kept as
    /// [`RecordBody::Malformed`] and the pass continues after it.
    pub fn decode(data: &[u8], options: &ReaderOptions) -> Result<Self> {
        let header = FileHeader::parse(data)?;
        if !header.is_cdf() {
            if options.strict_magic {
                return Err(CdfError::NotCdf {
                    magic: header.magic,
                });
            }
            warn!(magic = %format!("{:#010x}", header.magic), "magic does not identify a CDF file");
        }

        let mut records = Vec::new();
        let mut index = HashMap::new();
        let mut ctx = DecodeContext::default();
        let mut truncated = false;
        let mut offset = HEADER_LEN as u64;

        loop {
            match decode_record(data, offset, &ctx) {
                Ok(Decoded::Record(record)) => {
                    if let RecordBody::GlobalDescriptor(gdr) = &record.body {
                        ctx.r_num_dims = gdr.r_num_dims;
                    }
                    offset = record.next_offset();
                    index.insert(record.offset(), records.len());
                    records.push(record);
                }
                Ok(Decoded::End) => break,
                Err(err @ CdfError::Truncated { .. }) => {
                    warn!(offset, error = %err, "record stream ends early");
                    truncated = true;
                    break;
                }
                Err(err) => return Err(err),
            }
        }

        debug!(records = records.len(), truncated, "record catalog decoded");
        let chain_limit = options.chain_limit(records.len());
        Ok(Self {
            header,
            records,
            index,
            chain_limit,
            truncated,
        })
    }

    #[must_use]
    pub const fn header(&self) -> &FileHeader {
        &self.header
    }

    /// All records in file order.
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether the record stream ended inside a record.
    #[must_use]
    pub const fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Longest chain a walk may follow.
    #[must_use]
    pub const fn chain_limit(&self) -> usize {
        self.chain_limit
    }

    /// Record starting at `offset`. Offset 0 never resolves.
    #[must_use]
    pub fn record_at(&self, offset: u64) -> Option<&Record> {
        if offset == 0 {
            return None;
        }
        self.index.get(&offset).map(|idx| &self.records[*idx])
    }

    /// Number of records of `kind`.
    #[must_use]
    pub fn count_kind(&self, kind: RecordKind) -> usize {
        self.records.iter().filter(|r| r.kind() == kind).count()
    }

    /// First CDR in file order.
    #[must_use]
    pub fn file_descriptor(&self) -> Option<&FileDescriptor> {
        self.records.iter().find_map(|r| match &r.body {
            RecordBody::FileDescriptor(cdr) => Some(cdr),
            _ => None,
        })
    }

    /// The GDR the CDR points at, or the first GDR in file order.
    #[must_use]
    pub fn global_descriptor(&self) -> Option<&GlobalDescriptor> {
        let pointed = self
            .file_descriptor()
            .and_then(|cdr| self.record_at(cdr.gdr_offset))
            .and_then(|r| match &r.body {
                RecordBody::GlobalDescriptor(gdr) => Some(gdr),
                _ => None,
            });
        pointed.or_else(|| {
            self.records.iter().find_map(|r| match &r.body {
                RecordBody::GlobalDescriptor(gdr) => Some(gdr),
                _ => None,
            })
        })
    }

    #[must_use]
    pub fn attribute_descriptor(&self, offset: u64) -> Option<&AttributeDescriptor> {
        match &self.record_at(offset)?.body {
            RecordBody::AttributeDescriptor(adr) => Some(adr),
            _ => None,
        }
    }

    #[must_use]
    pub fn attribute_entry(&self, offset: u64) -> Option<&AttributeEntry> {
        match &self.record_at(offset)?.body {
            RecordBody::AttributeEntry(entry) => Some(entry),
            _ => None,
        }
    }

    #[must_use]
    pub fn variable_descriptor(&self, offset: u64) -> Option<&VariableDescriptor> {
        match &self.record_at(offset)?.body {
            RecordBody::VariableDescriptor(vdr) => Some(vdr),
            _ => None,
        }
    }

    #[must_use]
    pub fn variable_index(&self, offset: u64) -> Option<&VariableIndex> {
        match &self.record_at(offset)?.body {
            RecordBody::VariableIndex(vxr) => Some(vxr),
            _ => None,
        }
    }

    #[must_use]
    pub fn variable_values(&self, offset: u64) -> Option<&VariableValues> {
        match &self.record_at(offset)?.body {
            RecordBody::VariableValues(vvr) => Some(vvr),
            _ => None,
        }
    }

    #[must_use]
    pub fn unused_internal(&self, offset: u64) -> Option<&UnusedInternal> {
        match &self.record_at(offset)?.body {
            RecordBody::UnusedInternal(uir) => Some(uir),
            _ => None,
        }
    }

    /// ADRs in file order.
    pub fn attribute_descriptors(&self) -> impl Iterator<Item = &AttributeDescriptor> {
        self.records.iter().filter_map(|r| match &r.body {
            RecordBody::AttributeDescriptor(adr) => Some(adr),
            _ => None,
        })
    }

    /// VDRs of both kinds in file order with their offsets.
    pub fn variable_descriptors(&self) -> impl Iterator<Item = (u64, &VariableDescriptor)> {
        self.records.iter().filter_map(|r| match &r.body {
            RecordBody::VariableDescriptor(vdr) => Some((r.offset(), vdr)),
            _ => None,
        })
    }

    /// VXRs in file order with their offsets.
    pub fn variable_indexes(&self) -> impl Iterator<Item = (u64, &VariableIndex)> {
        self.records.iter().filter_map(|r| match &r.body {
            RecordBody::VariableIndex(vxr) => Some((r.offset(), vxr)),
            _ => None,
        })
    }

    /// Follow a chain from `head` until a pointer resolves to no record.
    ///
    /// A chain longer than [`chain_limit`](Self::chain_limit) must revisit a
    /// record and is reported as [`CdfError::CyclicChain`].
    pub fn walk<'a, T: 'a>(
        &'a self,
        family: &'static str,
        head: u64,
        resolve: impl Fn(u64) -> Option<&'a T>,
        next: impl Fn(&T) -> u64,
    ) -> Result<Vec<&'a T>> {
        let mut chain = Vec::new();
        let mut offset = head;
        while offset != 0 {
            let Some(item) = resolve(offset) else {
                warn!(family, offset, "pointer does not resolve; chain ends");
                break;
            };
            if chain.len() >= self.chain_limit {
                return Err(CdfError::cyclic_chain(family, head));
            }
            chain.push(item);
            offset = next(item);
        }
        Ok(chain)
    }

    /// The ADR chain from the GDR.
    pub fn attribute_chain(&self) -> Result<Vec<&AttributeDescriptor>> {
        let head = self.global_descriptor().map_or(0, |gdr| gdr.adr_head);
        self.walk(
            "ADR",
            head,
            |o| self.attribute_descriptor(o),
            |adr| adr.next,
        )
    }

    /// An AEDR chain starting at `head`.
    pub fn entry_chain(&self, head: u64) -> Result<Vec<&AttributeEntry>> {
        self.walk(
            "AEDR",
            head,
            |o| self.attribute_entry(o),
            |entry| entry.next,
        )
    }

    /// The rVDR or zVDR chain from the GDR.
    pub fn variable_chain(&self, kind: VariableKind) -> Result<Vec<&VariableDescriptor>> {
        let (family, head) = match (kind, self.global_descriptor()) {
            (VariableKind::R, Some(gdr)) => ("rVDR", gdr.rvdr_head),
            (VariableKind::Z, Some(gdr)) => ("zVDR", gdr.zvdr_head),
            (VariableKind::R, None) => ("rVDR", 0),
            (VariableKind::Z, None) => ("zVDR", 0),
        };
        self.walk(
            family,
            head,
            |o| self.variable_descriptor(o),
            |vdr| vdr.next,
        )
    }

    /// A VXR chain starting at `head`.
    pub fn index_chain(&self, head: u64) -> Result<Vec<&VariableIndex>> {
        self.walk("VXR", head, |o| self.variable_index(o), |vxr| vxr.next)
    }
}
