//! Synthetic CDF images for tests.
//!
//! [`FixtureBuilder`] lays out a well-formed version 3 file: CDR, GDR, the
//! attribute records each followed by their entries, then every variable
//! descriptor followed by its index and value records. Pointers are patched
//! once every record has been written, and [`Layout`] reports where each
//! record landed so tests can corrupt specific fields.

use std::collections::HashMap;

use crate::header::{COMPRESSION_OFF, COMPRESSION_ON, MAGIC_V3};
use crate::record::NAME_LEN;
use crate::types::{DataType, VariableKind};

/// Offset used for pointers that must not resolve.
pub const DANGLING_OFFSET: u64 = 0x7FFF_FFF0;

/// Value bytes of one attribute entry.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryValue {
    pub data_type: DataType,
    pub element_count: i32,
    pub bytes: Vec<u8>,
}

impl EntryValue {
    pub fn text(text: &str) -> Self {
        Self {
            data_type: DataType::Char,
            element_count: i32::try_from(text.len()).unwrap_or(i32::MAX),
            bytes: text.as_bytes().to_vec(),
        }
    }

    pub fn int4(values: &[i32]) -> Self {
        Self::raw(
            DataType::Int4,
            values.len(),
            values.iter().flat_map(|v| v.to_be_bytes()).collect(),
        )
    }

    pub fn real8(values: &[f64]) -> Self {
        Self::raw(
            DataType::Real8,
            values.len(),
            values.iter().flat_map(|v| v.to_be_bytes()).collect(),
        )
    }

    pub fn epoch16(seconds: f64, picoseconds: f64) -> Self {
        let mut bytes = seconds.to_be_bytes().to_vec();
        bytes.extend_from_slice(&picoseconds.to_be_bytes());
        Self::raw(DataType::Epoch16, 1, bytes)
    }

    pub fn raw(data_type: DataType, count: usize, bytes: Vec<u8>) -> Self {
        Self {
            data_type,
            element_count: i32::try_from(count).unwrap_or(i32::MAX),
            bytes,
        }
    }
}

impl From<&str> for EntryValue {
    fn from(text: &str) -> Self {
        Self::text(text)
    }
}

#[derive(Debug, Clone)]
enum Owner {
    Named(String),
    Explicit(VariableKind, i32),
}

/// One attribute descriptor and its entries.
#[derive(Debug, Clone)]
pub struct AttributeSpec {
    pub name: String,
    pub scope: i32,
    pub gr_entries: Vec<(i32, EntryValue)>,
    pub z_entries: Vec<(i32, EntryValue)>,
    /// Point the g/r-entry head at an offset with no record.
    pub dangling_head: bool,
    pending: Vec<(Owner, EntryValue)>,
}

impl AttributeSpec {
    fn new(name: &str, scope: i32) -> Self {
        Self {
            name: name.to_string(),
            scope,
            gr_entries: Vec::new(),
            z_entries: Vec::new(),
            dangling_head: false,
            pending: Vec::new(),
        }
    }

    pub fn global(name: &str) -> Self {
        Self::new(name, 1)
    }

    pub fn variable(name: &str) -> Self {
        Self::new(name, 2)
    }

    #[must_use]
    pub fn scope(mut self, code: i32) -> Self {
        self.scope = code;
        self
    }

    #[must_use]
    pub fn gr_entry(mut self, number: i32, value: impl Into<EntryValue>) -> Self {
        self.gr_entries.push((number, value.into()));
        self
    }

    #[must_use]
    pub fn z_entry(mut self, number: i32, value: impl Into<EntryValue>) -> Self {
        self.z_entries.push((number, value.into()));
        self
    }

    #[must_use]
    pub fn dangling(mut self) -> Self {
        self.dangling_head = true;
        self
    }

    fn is_global(&self) -> bool {
        matches!(self.scope, 1 | 3)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IndexLayout {
    /// One VXR whose entries point at every value record.
    Single,
    /// One VXR per value record, linked through `next`.
    Chained,
    /// A VXR whose only entry points at a second VXR.
    Nested,
}

/// One variable descriptor with its index and value records.
#[derive(Debug, Clone)]
pub struct VariableSpec {
    pub name: String,
    pub kind: VariableKind,
    pub data_type: DataType,
    pub element_count: i32,
    pub max_rec: i32,
    pub flags: i32,
    pub sparse_records: i32,
    pub dim_sizes: Vec<i32>,
    pub dim_varys: Option<Vec<i32>>,
    pub pad: Option<Vec<u8>>,
    /// Payload length of each value record.
    pub blocks: Vec<usize>,
    index: IndexLayout,
}

impl VariableSpec {
    fn new(name: &str, kind: VariableKind, data_type: DataType) -> Self {
        Self {
            name: name.to_string(),
            kind,
            data_type,
            element_count: 1,
            max_rec: 0,
            flags: 1,
            sparse_records: 0,
            dim_sizes: Vec::new(),
            dim_varys: None,
            pad: None,
            blocks: vec![data_type.width().max(1)],
            index: IndexLayout::Single,
        }
    }

    pub fn z(name: &str, data_type: DataType) -> Self {
        Self::new(name, VariableKind::Z, data_type)
    }

    pub fn r(name: &str, data_type: DataType) -> Self {
        Self::new(name, VariableKind::R, data_type)
    }

    #[must_use]
    pub fn elements(mut self, count: i32) -> Self {
        self.element_count = count;
        self
    }

    #[must_use]
    pub fn max_rec(mut self, max_rec: i32) -> Self {
        self.max_rec = max_rec;
        self
    }

    #[must_use]
    pub fn flags(mut self, flags: i32) -> Self {
        self.flags = flags;
        self
    }

    #[must_use]
    pub fn sparse(mut self, mode: i32) -> Self {
        self.sparse_records = mode;
        self
    }

    #[must_use]
    pub fn dims(mut self, sizes: &[i32], varys: &[i32]) -> Self {
        self.dim_sizes = sizes.to_vec();
        self.dim_varys = Some(varys.to_vec());
        self
    }

    /// Set the pad bytes and the pad flag.
    #[must_use]
    pub fn pad(mut self, bytes: Vec<u8>) -> Self {
        self.pad = Some(bytes);
        self.flags |= 0x2;
        self
    }

    #[must_use]
    pub fn blocks(mut self, lengths: &[usize]) -> Self {
        self.blocks = lengths.to_vec();
        self
    }

    /// No index and no value records.
    #[must_use]
    pub fn without_values(mut self) -> Self {
        self.blocks.clear();
        self
    }

    #[must_use]
    pub fn chained_index(mut self) -> Self {
        self.index = IndexLayout::Chained;
        self
    }

    #[must_use]
    pub fn nested_index(mut self) -> Self {
        self.index = IndexLayout::Nested;
        self
    }
}

/// Offsets of the records of one attribute.
#[derive(Debug, Clone, Default)]
pub struct AttributeLayout {
    pub adr: u64,
    pub gr_entries: Vec<u64>,
    pub z_entries: Vec<u64>,
}

/// Offsets of the records of one variable.
#[derive(Debug, Clone, Default)]
pub struct VariableLayout {
    pub vdr: u64,
    pub vxrs: Vec<u64>,
    pub vvrs: Vec<u64>,
}

/// Where every record of a built image landed.
#[derive(Debug, Clone, Default)]
pub struct Layout {
    pub cdr: Option<u64>,
    pub gdr: Option<u64>,
    pub attributes: Vec<AttributeLayout>,
    pub variables: Vec<VariableLayout>,
    pub unused: Vec<u64>,
    pub raw: Vec<u64>,
    records: Vec<u64>,
}

impl Layout {
    /// Offsets of all records in file order.
    #[must_use]
    pub fn record_offsets(&self) -> Vec<u64> {
        self.records.clone()
    }
}

/// Overwrite the 8-byte big-endian field at `at`.
pub fn patch_u64(data: &mut [u8], at: u64, value: u64) {
    let at = usize::try_from(at).unwrap_or(usize::MAX);
    if let Some(field) = data.get_mut(at..at.saturating_add(8)) {
        field.copy_from_slice(&value.to_be_bytes());
    }
}

/// Overwrite the 4-byte big-endian field at `at`.
pub fn patch_i32(data: &mut [u8], at: u64, value: i32) {
    let at = usize::try_from(at).unwrap_or(usize::MAX);
    if let Some(field) = data.get_mut(at..at.saturating_add(4)) {
        field.copy_from_slice(&value.to_be_bytes());
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Target {
    Gdr,
    Eof,
    Dangling,
    Adr(usize),
    GrEntry(usize, usize),
    ZEntry(usize, usize),
    Vdr(usize),
    Vxr(usize, usize),
    Vvr(usize, usize),
    Uir(usize),
}

#[derive(Default)]
struct Writer {
    buf: Vec<u8>,
    positions: HashMap<Target, u64>,
    fixups: Vec<(usize, Target)>,
    records: Vec<u64>,
}

impl Writer {
    fn offset(&self) -> u64 {
        self.buf.len() as u64
    }

    fn begin(&mut self, target: Option<Target>, kind: i32) -> usize {
        let start = self.buf.len();
        if let Some(target) = target {
            self.positions.insert(target, start as u64);
        }
        self.records.push(start as u64);
        self.i64(0);
        self.i32(kind);
        start
    }

    fn finish(&mut self, start: usize) {
        let size = (self.buf.len() - start) as u64;
        patch_u64(&mut self.buf, start as u64, size);
    }

    fn i32(&mut self, value: i32) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    fn i64(&mut self, value: i64) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    fn zeros(&mut self, len: usize) {
        self.buf.resize(self.buf.len() + len, 0);
    }

    fn text(&mut self, text: &str, width: usize) {
        let bytes = text.as_bytes();
        let len = bytes.len().min(width);
        self.buf.extend_from_slice(&bytes[..len]);
        self.zeros(width - len);
    }

    fn pointer(&mut self, target: Option<Target>) {
        if let Some(target) = target {
            self.fixups.push((self.buf.len(), target));
        }
        self.i64(0);
    }

    fn resolve(mut self) -> (Vec<u8>, HashMap<Target, u64>, Vec<u64>) {
        self.positions.insert(Target::Eof, self.offset());
        self.positions.insert(Target::Dangling, DANGLING_OFFSET);
        for (at, target) in &self.fixups {
            let value = self.positions.get(target).copied().unwrap_or(0);
            patch_u64(&mut self.buf, *at as u64, value);
        }
        (self.buf, self.positions, self.records)
    }
}

fn count(len: usize) -> i32 {
    i32::try_from(len).unwrap_or(i32::MAX)
}

/// Builder for synthetic CDF byte images.
#[derive(Debug, Clone)]
pub struct FixtureBuilder {
    magic: u32,
    compression: u32,
    encoding: i32,
    version: (i32, i32, i32),
    copyright: String,
    file_descriptor: bool,
    global_descriptor: bool,
    r_dim_sizes: Vec<i32>,
    attributes: Vec<AttributeSpec>,
    variables: Vec<VariableSpec>,
    unused: Vec<usize>,
    raw: Vec<(i32, usize)>,
}

impl Default for FixtureBuilder {
    fn default() -> Self {
        Self {
            magic: MAGIC_V3,
            compression: COMPRESSION_OFF,
            encoding: 1,
            version: (3, 9, 0),
            copyright: "Common Data Format (CDF)".to_string(),
            file_descriptor: true,
            global_descriptor: true,
            r_dim_sizes: Vec::new(),
            attributes: Vec::new(),
            variables: Vec::new(),
            unused: Vec::new(),
            raw: Vec::new(),
        }
    }
}

impl FixtureBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn magic(mut self, magic: u32) -> Self {
        self.magic = magic;
        self
    }

    #[must_use]
    pub fn compressed(mut self) -> Self {
        self.compression = COMPRESSION_ON;
        self
    }

    #[must_use]
    pub fn encoding(mut self, code: i32) -> Self {
        self.encoding = code;
        self
    }

    #[must_use]
    pub fn version(mut self, version: i32, release: i32, increment: i32) -> Self {
        self.version = (version, release, increment);
        self
    }

    #[must_use]
    pub fn copyright(mut self, text: &str) -> Self {
        self.copyright = text.to_string();
        self
    }

    /// Dimension sizes shared by rVariables.
    #[must_use]
    pub fn r_dims(mut self, sizes: &[i32]) -> Self {
        self.r_dim_sizes = sizes.to_vec();
        self
    }

    #[must_use]
    pub fn without_file_descriptor(mut self) -> Self {
        self.file_descriptor = false;
        self
    }

    #[must_use]
    pub fn without_global_descriptor(mut self) -> Self {
        self.global_descriptor = false;
        self
    }

    /// Add a global attribute, or another entry to an existing one.
    #[must_use]
    pub fn global_attribute(mut self, name: &str, value: impl Into<EntryValue>) -> Self {
        let value = value.into();
        if let Some(spec) = self
            .attributes
            .iter_mut()
            .find(|a| a.name == name && a.is_global())
        {
            let number = count(spec.gr_entries.len());
            spec.gr_entries.push((number, value));
        } else {
            self.attributes
                .push(AttributeSpec::global(name).gr_entry(0, value));
        }
        self
    }

    #[must_use]
    pub fn attribute(mut self, spec: AttributeSpec) -> Self {
        self.attributes.push(spec);
        self
    }

    #[must_use]
    pub fn variable(mut self, spec: VariableSpec) -> Self {
        self.variables.push(spec);
        self
    }

    /// Attach a variable attribute entry to the named variable.
    ///
    /// The entry lands on the r- or z-entry chain matching the variable's
    /// kind. An unknown variable name produces a z-entry owned by number -1.
    #[must_use]
    pub fn variable_attribute(
        self,
        name: &str,
        variable: &str,
        value: impl Into<EntryValue>,
    ) -> Self {
        self.push_variable_entry(name, Owner::Named(variable.to_string()), value.into())
    }

    /// Attach a variable attribute entry to an explicit owner number.
    #[must_use]
    pub fn variable_attribute_for(
        self,
        name: &str,
        kind: VariableKind,
        number: i32,
        value: impl Into<EntryValue>,
    ) -> Self {
        self.push_variable_entry(name, Owner::Explicit(kind, number), value.into())
    }

    fn push_variable_entry(mut self, name: &str, owner: Owner, value: EntryValue) -> Self {
        if let Some(spec) = self
            .attributes
            .iter_mut()
            .find(|a| a.name == name && !a.is_global())
        {
            spec.pending.push((owner, value));
        } else {
            let mut spec = AttributeSpec::variable(name);
            spec.pending.push((owner, value));
            self.attributes.push(spec);
        }
        self
    }

    /// Append an unused internal record of `size` bytes (at least 28).
    #[must_use]
    pub fn unused_record(mut self, size: usize) -> Self {
        self.unused.push(size.max(28));
        self
    }

    /// Append a record of `kind` with `body_len` zero bytes after the envelope.
    #[must_use]
    pub fn raw_record(mut self, kind: i32, body_len: usize) -> Self {
        self.raw.push((kind, body_len));
        self
    }

    pub fn build(&self) -> Vec<u8> {
        self.build_with_layout().0
    }

    pub fn build_with_layout(&self) -> (Vec<u8>, Layout) {
        let attributes = self.resolved_attributes();
        let numbers = self.variable_numbers();
        let mut w = Writer::default();
        w.buf.extend_from_slice(&self.magic.to_be_bytes());
        w.buf.extend_from_slice(&self.compression.to_be_bytes());

        if self.file_descriptor {
            self.write_cdr(&mut w);
        }
        if self.global_descriptor {
            self.write_gdr(&mut w, &attributes);
        }
        for (a, spec) in attributes.iter().enumerate() {
            Self::write_attribute(&mut w, a, spec, a + 1 < attributes.len());
        }
        for (v, spec) in self.variables.iter().enumerate() {
            self.write_variable(&mut w, v, spec, numbers[v]);
        }
        for (u, size) in self.unused.iter().enumerate() {
            let start = w.begin(Some(Target::Uir(u)), -1);
            w.pointer((u + 1 < self.unused.len()).then_some(Target::Uir(u + 1)));
            w.pointer(u.checked_sub(1).map(Target::Uir));
            w.zeros(size - 28);
            w.finish(start);
        }
        let mut raw = Vec::new();
        for (kind, body_len) in &self.raw {
            raw.push(w.offset());
            let start = w.begin(None, *kind);
            w.zeros(*body_len);
            w.finish(start);
        }

        let (data, positions, records) = w.resolve();
        let at = |target: Target| positions.get(&target).copied();
        let layout = Layout {
            cdr: self.file_descriptor.then_some(8),
            gdr: at(Target::Gdr),
            attributes: attributes
                .iter()
                .enumerate()
                .map(|(a, spec)| AttributeLayout {
                    adr: at(Target::Adr(a)).unwrap_or(0),
                    gr_entries: (0..spec.gr_entries.len())
                        .filter_map(|i| at(Target::GrEntry(a, i)))
                        .collect(),
                    z_entries: (0..spec.z_entries.len())
                        .filter_map(|i| at(Target::ZEntry(a, i)))
                        .collect(),
                })
                .collect(),
            variables: (0..self.variables.len())
                .map(|v| VariableLayout {
                    vdr: at(Target::Vdr(v)).unwrap_or(0),
                    vxrs: (0..=self.variables[v].blocks.len())
                        .filter_map(|i| at(Target::Vxr(v, i)))
                        .collect(),
                    vvrs: (0..self.variables[v].blocks.len())
                        .filter_map(|i| at(Target::Vvr(v, i)))
                        .collect(),
                })
                .collect(),
            unused: (0..self.unused.len())
                .filter_map(|u| at(Target::Uir(u)))
                .collect(),
            raw,
            records,
        };
        (data, layout)
    }

    fn variable_numbers(&self) -> Vec<i32> {
        let mut next = (0, 0);
        self.variables
            .iter()
            .map(|spec| {
                let slot = match spec.kind {
                    VariableKind::R => &mut next.0,
                    VariableKind::Z => &mut next.1,
                };
                *slot += 1;
                *slot - 1
            })
            .collect()
    }

    fn resolved_attributes(&self) -> Vec<AttributeSpec> {
        let numbers = self.variable_numbers();
        let mut attributes = self.attributes.clone();
        for spec in &mut attributes {
            for (owner, value) in std::mem::take(&mut spec.pending) {
                let (kind, number) = match owner {
                    Owner::Explicit(kind, number) => (kind, number),
                    Owner::Named(name) => self
                        .variables
                        .iter()
                        .position(|v| v.name == name)
                        .map_or((VariableKind::Z, -1), |v| {
                            (self.variables[v].kind, numbers[v])
                        }),
                };
                match kind {
                    VariableKind::R => spec.gr_entries.push((number, value)),
                    VariableKind::Z => spec.z_entries.push((number, value)),
                }
            }
        }
        attributes
    }

    fn write_cdr(&self, w: &mut Writer) {
        let (version, release, increment) = self.version;
        let start = w.begin(None, 1);
        w.pointer(Some(Target::Gdr));
        w.i32(version);
        w.i32(release);
        w.i32(self.encoding);
        w.i32(0); // flags
        w.zeros(8);
        w.i32(increment);
        w.zeros(8);
        w.text(&self.copyright, 256);
        w.finish(start);
    }

    fn write_gdr(&self, w: &mut Writer, attributes: &[AttributeSpec]) {
        let first = |kind: VariableKind| {
            self.variables
                .iter()
                .position(|v| v.kind == kind)
                .map(Target::Vdr)
        };
        let r_count = self.variables.iter().filter(|v| v.kind == VariableKind::R);
        let r_max_rec = r_count.clone().map(|v| v.max_rec).max().unwrap_or(-1);

        let start = w.begin(Some(Target::Gdr), 2);
        w.pointer(first(VariableKind::R));
        w.pointer(first(VariableKind::Z));
        w.pointer((!attributes.is_empty()).then_some(Target::Adr(0)));
        w.pointer(Some(Target::Eof));
        w.i32(count(r_count.count()));
        w.i32(count(attributes.len()));
        w.i32(r_max_rec);
        w.i32(count(self.r_dim_sizes.len()));
        w.i32(count(
            self.variables
                .iter()
                .filter(|v| v.kind == VariableKind::Z)
                .count(),
        ));
        w.pointer((!self.unused.is_empty()).then_some(Target::Uir(0)));
        w.zeros(12);
        for size in &self.r_dim_sizes {
            w.i32(*size);
        }
        w.finish(start);
    }

    fn write_attribute(w: &mut Writer, a: usize, spec: &AttributeSpec, has_next: bool) {
        let max_number =
            |entries: &[(i32, EntryValue)]| entries.iter().map(|(n, _)| *n).max().unwrap_or(-1);
        let gr_head = if spec.dangling_head {
            Some(Target::Dangling)
        } else {
            (!spec.gr_entries.is_empty()).then_some(Target::GrEntry(a, 0))
        };

        let start = w.begin(Some(Target::Adr(a)), 4);
        w.pointer(has_next.then_some(Target::Adr(a + 1)));
        w.pointer(gr_head);
        w.i32(spec.scope);
        w.i32(count(a));
        w.i32(count(spec.gr_entries.len()));
        w.i32(max_number(&spec.gr_entries));
        w.i32(0);
        w.pointer((!spec.z_entries.is_empty()).then_some(Target::ZEntry(a, 0)));
        w.i32(count(spec.z_entries.len()));
        w.i32(max_number(&spec.z_entries));
        w.i32(0);
        w.text(&spec.name, NAME_LEN);
        w.finish(start);

        for (z, entries) in [(false, &spec.gr_entries), (true, &spec.z_entries)] {
            let target = |i: usize| {
                if z {
                    Target::ZEntry(a, i)
                } else {
                    Target::GrEntry(a, i)
                }
            };
            for (i, (number, value)) in entries.iter().enumerate() {
                let start = w.begin(Some(target(i)), if z { 9 } else { 5 });
                w.pointer((i + 1 < entries.len()).then_some(target(i + 1)));
                w.i32(count(a));
                w.i32(value.data_type.code());
                w.i32(*number);
                w.i32(value.element_count);
                w.zeros(20);
                w.buf.extend_from_slice(&value.bytes);
                w.finish(start);
            }
        }
    }

    fn write_variable(&self, w: &mut Writer, v: usize, spec: &VariableSpec, number: i32) {
        let next = self
            .variables
            .iter()
            .enumerate()
            .skip(v + 1)
            .find(|(_, other)| other.kind == spec.kind)
            .map(|(i, _)| Target::Vdr(i));
        let n = spec.blocks.len();
        let (head, tail) = match (n, spec.index) {
            (0, _) => (None, None),
            (_, IndexLayout::Single | IndexLayout::Nested) => {
                (Some(Target::Vxr(v, 0)), Some(Target::Vxr(v, 0)))
            }
            (_, IndexLayout::Chained) => (Some(Target::Vxr(v, 0)), Some(Target::Vxr(v, n - 1))),
        };
        let (kind_code, dim_varys) = match spec.kind {
            VariableKind::R => (
                3,
                spec.dim_varys
                    .clone()
                    .unwrap_or_else(|| vec![-1; self.r_dim_sizes.len()]),
            ),
            VariableKind::Z => (
                8,
                spec.dim_varys
                    .clone()
                    .unwrap_or_else(|| vec![-1; spec.dim_sizes.len()]),
            ),
        };

        let start = w.begin(Some(Target::Vdr(v)), kind_code);
        w.pointer(next);
        w.i32(spec.data_type.code());
        w.i32(spec.max_rec);
        w.pointer(head);
        w.pointer(tail);
        w.i32(spec.flags);
        w.i32(spec.sparse_records);
        w.zeros(12);
        w.i32(spec.element_count);
        w.i32(number);
        w.i64(0); // CPR/SPR
        w.i32(1); // blocking factor
        w.text(&spec.name, NAME_LEN);
        if spec.kind == VariableKind::Z {
            w.i32(count(spec.dim_sizes.len()));
            for size in &spec.dim_sizes {
                w.i32(*size);
            }
        }
        for vary in &dim_varys {
            w.i32(*vary);
        }
        if let Some(pad) = &spec.pad {
            w.buf.extend_from_slice(pad);
        }
        w.finish(start);

        let blocks: Vec<(i32, Target)> = (0..n).map(|i| (count(i), Target::Vvr(v, i))).collect();
        match (n, spec.index) {
            (0, _) => {}
            (_, IndexLayout::Single) => write_index(w, Target::Vxr(v, 0), None, &blocks),
            (_, IndexLayout::Chained) => {
                for (i, block) in blocks.iter().enumerate() {
                    let next = (i + 1 < n).then_some(Target::Vxr(v, i + 1));
                    write_index(w, Target::Vxr(v, i), next, std::slice::from_ref(block));
                }
            }
            (_, IndexLayout::Nested) => {
                let outer = w.offset();
                write_index(w, Target::Vxr(v, 0), None, &[(0, Target::Vxr(v, 1))]);
                // Last[0] of the outer index spans every inner record.
                patch_i32(&mut w.buf, outer + 32, count(n) - 1);
                write_index(w, Target::Vxr(v, 1), None, &blocks);
            }
        }
        for (i, length) in spec.blocks.iter().enumerate() {
            let start = w.begin(Some(Target::Vvr(v, i)), 7);
            let fill = u8::try_from(i + 1).unwrap_or(u8::MAX);
            w.buf.resize(w.buf.len() + length, fill);
            w.finish(start);
        }
    }
}

/// Write one VXR with an entry per `(record, target)` pair.
fn write_index(w: &mut Writer, at: Target, next: Option<Target>, entries: &[(i32, Target)]) {
    let start = w.begin(Some(at), 6);
    w.pointer(next);
    w.i32(count(entries.len()));
    w.i32(count(entries.len()));
    for (record, _) in entries {
        w.i32(*record);
    }
    for (record, _) in entries {
        w.i32(*record);
    }
    for (_, target) in entries {
        w.pointer(Some(*target));
    }
    w.finish(start);
}
