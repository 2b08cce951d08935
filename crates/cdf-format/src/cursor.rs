//! Big-endian byte cursor over an in-memory CDF image.
//!
//! Every multi-byte field in a CDF file is stored big-endian. The cursor
//! tracks the absolute file position so decoded records can remember the
//! offsets other records use to point at them.

use crate::error::{CdfError, Result};

/// Forward reader over a byte slice, positioned at an absolute offset.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    /// Create a cursor positioned at `offset`.
    pub fn new(data: &'a [u8], offset: u64) -> Self {
        Self {
            data,
            pos: usize::try_from(offset).unwrap_or(usize::MAX),
        }
    }

    /// Current absolute position.
    #[must_use]
    pub fn position(&self) -> u64 {
        self.pos as u64
    }

    /// Bytes left between the position and the end of input.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// Read `len` raw bytes.
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|end| *end <= self.data.len())
            .ok_or_else(|| CdfError::truncated(self.position(), len, self.remaining()))?;
        let slice = &self.data[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    /// Skip `len` bytes.
    pub fn skip(&mut self, len: usize) -> Result<()> {
        self.read_bytes(len).map(|_| ())
    }

    /// Read a fixed-size array.
    fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut buf = [0u8; N];
        buf.copy_from_slice(self.read_bytes(N)?);
        Ok(buf)
    }

    /// Read a big-endian i32.
    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(i32::from_be_bytes(self.read_array()?))
    }

    /// Read a big-endian u32.
    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(u32::from_be_bytes(self.read_array()?))
    }

    /// Read a big-endian i64.
    pub fn read_i64(&mut self) -> Result<i64> {
        Ok(i64::from_be_bytes(self.read_array()?))
    }

    /// Read an 8-byte file offset. Negative values never address a record
    /// and are folded to the 0 terminator.
    pub fn read_offset(&mut self) -> Result<u64> {
        Ok(u64::try_from(self.read_i64()?).unwrap_or(0))
    }

    /// Read `count` i32 values. Non-positive counts yield an empty list.
    pub fn read_i32_array(&mut self, count: i32) -> Result<Vec<i32>> {
        let count = usize::try_from(count).unwrap_or(0);
        self.ensure(count.saturating_mul(4))?;
        (0..count).map(|_| self.read_i32()).collect()
    }

    /// Read `count` file offsets.
    pub fn read_offset_array(&mut self, count: i32) -> Result<Vec<u64>> {
        let count = usize::try_from(count).unwrap_or(0);
        self.ensure(count.saturating_mul(8))?;
        (0..count).map(|_| self.read_offset()).collect()
    }

    /// Read a fixed-width text field and trim its trailing padding.
    pub fn read_text(&mut self, len: usize) -> Result<String> {
        self.read_bytes(len).map(trim_padding)
    }

    fn ensure(&self, len: usize) -> Result<()> {
        if len > self.remaining() {
            return Err(CdfError::truncated(self.position(), len, self.remaining()));
        }
        Ok(())
    }
}

/// Decode a NUL/space padded text field.
///
/// Only trailing padding is removed; interior bytes are kept as written.
#[must_use]
pub fn trim_padding(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    text.trim_end_matches(|c: char| c == '\0' || c.is_ascii_whitespace())
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_big_endian_fields() {
        let data = [
            0x00, 0x00, 0x01, 0x38, // 312
            0xFF, 0xFF, 0xFF, 0xFF, // -1
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x02, 0x00, // 512
        ];
        let mut cursor = ByteCursor::new(&data, 0);
        assert_eq!(cursor.read_i32().unwrap(), 312);
        assert_eq!(cursor.read_i32().unwrap(), -1);
        assert_eq!(cursor.read_offset().unwrap(), 512);
        assert_eq!(cursor.position(), 16);
        assert_eq!(cursor.remaining(), 0);
    }

    #[test]
    fn test_truncated_read_reports_position() {
        let data = [0u8; 6];
        let mut cursor = ByteCursor::new(&data, 4);
        let err = cursor.read_i32().unwrap_err();
        assert!(matches!(
            err,
            CdfError::Truncated {
                offset: 4,
                needed: 4,
                available: 2
            }
        ));
    }

    #[test]
    fn test_negative_offset_is_terminator() {
        let data = (-8i64).to_be_bytes();
        let mut cursor = ByteCursor::new(&data, 0);
        assert_eq!(cursor.read_offset().unwrap(), 0);
    }

    #[test]
    fn test_array_bounds_checked_before_allocation() {
        let data = [0u8; 8];
        let mut cursor = ByteCursor::new(&data, 0);
        assert!(cursor.read_i32_array(i32::MAX).is_err());
        assert_eq!(cursor.position(), 0);
        assert!(cursor.read_i32_array(-3).unwrap().is_empty());
        assert_eq!(cursor.read_i32_array(2).unwrap(), vec![0, 0]);
    }

    #[test]
    fn test_trim_padding_keeps_interior() {
        assert_eq!(trim_padding(b"Epoch\0\0\0"), "Epoch");
        assert_eq!(trim_padding(b"B field   "), "B field");
        assert_eq!(trim_padding(b"a\0b\0\0"), "a\0b");
        assert_eq!(trim_padding(b"\0\0\0"), "");
    }
}
