//! The two leading words of a CDF file.

use crate::cursor::ByteCursor;
use crate::error::{CdfError, Result};

/// Length of the file header; the first record starts here.
pub const HEADER_LEN: usize = 8;
/// Magic word of a version 3 file.
pub const MAGIC_V3: u32 = 0xCDF3_0001;
/// Oldest accepted magic for archiving.
pub const MIN_VERSION: u32 = 0xCDF3_0000;
/// Compression word of a compressed file.
pub const COMPRESSION_ON: u32 = 0xCCCC_0001;
/// Compression word of an uncompressed file.
pub const COMPRESSION_OFF: u32 = 0x0000_FFFF;

/// Magic and compression words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileHeader {
    pub magic: u32,
    pub compression: u32,
}

impl FileHeader {
    /// Read the header from the start of `data`.
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < HEADER_LEN {
            return Err(CdfError::TooSmall {
                len: data.len(),
                min: HEADER_LEN,
            });
        }
        let mut cursor = ByteCursor::new(data, 0);
        Ok(Self {
            magic: cursor.read_u32()?,
            compression: cursor.read_u32()?,
        })
    }

    /// Whether the magic carries the `0xCDF` signature.
    #[must_use]
    pub const fn is_cdf(&self) -> bool {
        self.magic & 0xFFF0_0000 == 0xCDF0_0000
    }

    #[must_use]
    pub const fn is_compressed(&self) -> bool {
        self.compression == COMPRESSION_ON
    }

    /// Whether the magic is at least `minimum`.
    #[must_use]
    pub const fn meets_version(&self, minimum: u32) -> bool {
        self.magic >= minimum
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header_bytes(magic: u32, compression: u32) -> Vec<u8> {
        let mut data = magic.to_be_bytes().to_vec();
        data.extend_from_slice(&compression.to_be_bytes());
        data
    }

    #[test]
    fn test_parse_v3_uncompressed() {
        let header = FileHeader::parse(&header_bytes(MAGIC_V3, COMPRESSION_OFF)).unwrap();
        assert!(header.is_cdf());
        assert!(!header.is_compressed());
        assert!(header.meets_version(MIN_VERSION));
    }

    #[test]
    fn test_old_and_compressed() {
        let header = FileHeader::parse(&header_bytes(0xCDF2_6002, COMPRESSION_ON)).unwrap();
        assert!(header.is_cdf());
        assert!(header.is_compressed());
        assert!(!header.meets_version(MIN_VERSION));
    }

    #[test]
    fn test_foreign_magic() {
        let header = FileHeader::parse(&header_bytes(0x8950_4E47, 0)).unwrap();
        assert!(!header.is_cdf());
    }

    #[test]
    fn test_too_small() {
        let err = FileHeader::parse(&[0xCD, 0xF3]).unwrap_err();
        assert!(matches!(err, CdfError::TooSmall { len: 2, min: 8 }));
    }
}
