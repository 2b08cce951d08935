//! Decoding of typed element buffers.
//!
//! Attribute entry values and variable pad values are stored as a packed
//! run of big-endian elements. Element `i` of a buffer starts at byte
//! `i * width`; character data is the exception and is always read as one
//! string covering the whole buffer.

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

use crate::cursor::trim_padding;
use crate::types::{DataType, Value};

impl DataType {
    /// Decode element `index` of `buf`.
    ///
    /// Returns `None` when the element is not entirely inside the buffer.
    /// Character types ignore `index` and yield the whole trimmed buffer;
    /// unknown types yield [`Value::Unknown`].
    #[must_use]
    pub fn decode_value(self, buf: &[u8], index: usize) -> Option<Value> {
        match self {
            Self::Char => return Some(Value::Text(trim_padding(buf))),
            Self::Unknown(code) => return Some(Value::Unknown(code)),
            _ => {}
        }

        let width = self.width();
        let start = index.checked_mul(width)?;
        let bytes = buf.get(start..start.checked_add(width)?)?;

        let value = match self {
            Self::Int1 | Self::Byte => Value::Int(i64::from(i8::from_be_bytes(array(bytes)?))),
            Self::Int2 => Value::Int(i64::from(i16::from_be_bytes(array(bytes)?))),
            Self::Int4 => Value::Int(i64::from(i32::from_be_bytes(array(bytes)?))),
            Self::Int8 => Value::Int(i64::from_be_bytes(array(bytes)?)),
            Self::UInt1 => Value::UInt(u64::from(bytes[0])),
            Self::UInt2 => Value::UInt(u64::from(u16::from_be_bytes(array(bytes)?))),
            Self::UInt4 => Value::UInt(u64::from(u32::from_be_bytes(array(bytes)?))),
            Self::Real4 | Self::Float => Value::Real4(f32::from_be_bytes(array(bytes)?)),
            Self::Real8 | Self::Double => Value::Real8(f64::from_be_bytes(array(bytes)?)),
            Self::Epoch => Value::Epoch(f64::from_be_bytes(array(bytes)?)),
            Self::Epoch16 => Value::Epoch16 {
                seconds: f64::from_be_bytes(array(&bytes[..8])?),
                picoseconds: f64::from_be_bytes(array(&bytes[8..])?),
            },
            Self::TimeTt2000 => Value::Tt2000(i64::from_be_bytes(array(bytes)?)),
            Self::Char | Self::Unknown(_) => return None,
        };
        Some(value)
    }

    /// Decode up to `count` elements of `buf`.
    ///
    /// Decoding stops at the first element that does not fit, so a short
    /// buffer yields only its complete elements.
    #[must_use]
    pub fn decode_values(self, buf: &[u8], count: usize) -> Vec<Value> {
        match self {
            Self::Char | Self::Unknown(_) => self.decode_value(buf, 0).into_iter().collect(),
            _ => (0..count)
                .map_while(|index| self.decode_value(buf, index))
                .collect(),
        }
    }

    /// Display strings for up to `count` elements of `buf`.
    #[must_use]
    pub fn display_values(self, buf: &[u8], count: usize) -> Vec<String> {
        self.decode_values(buf, count)
            .iter()
            .map(ToString::to_string)
            .collect()
    }
}

fn array<const N: usize>(bytes: &[u8]) -> Option<[u8; N]> {
    bytes.try_into().ok()
}

fn epoch_origin() -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(0, 1, 1)?.and_hms_opt(0, 0, 0)
}

/// Convert a `CDF_EPOCH` value (milliseconds since 0000-01-01) to a timestamp.
#[must_use]
pub fn epoch_to_datetime(milliseconds: f64) -> Option<NaiveDateTime> {
    if !milliseconds.is_finite() {
        return None;
    }
    let micros = (milliseconds * 1_000.0).round();
    if micros.abs() >= i64::MAX as f64 {
        return None;
    }
    epoch_origin()?.checked_add_signed(TimeDelta::microseconds(micros as i64))
}

/// Convert a `CDF_EPOCH16` pair (seconds since 0000-01-01, picoseconds) to a
/// timestamp with nanosecond resolution.
#[must_use]
pub fn epoch16_to_datetime(seconds: f64, picoseconds: f64) -> Option<NaiveDateTime> {
    if !seconds.is_finite() || !picoseconds.is_finite() || seconds.abs() >= i64::MAX as f64 {
        return None;
    }
    let whole = TimeDelta::try_seconds(seconds.trunc() as i64)?;
    let nanos = TimeDelta::nanoseconds((picoseconds / 1_000.0).trunc() as i64);
    epoch_origin()?
        .checked_add_signed(whole)?
        .checked_add_signed(nanos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_element_offsets_use_width() {
        let buf = [0x00, 0x01, 0x00, 0x02, 0xFF, 0xFE];
        assert_eq!(DataType::Int2.decode_value(&buf, 0), Some(Value::Int(1)));
        assert_eq!(DataType::Int2.decode_value(&buf, 1), Some(Value::Int(2)));
        assert_eq!(DataType::Int2.decode_value(&buf, 2), Some(Value::Int(-2)));
        let unsigned = DataType::UInt2.decode_value(&buf, 2);
        assert_eq!(unsigned, Some(Value::UInt(65534)));
        assert_eq!(DataType::Int2.decode_value(&buf, 3), None);
    }

    #[test]
    fn test_char_is_whole_buffer() {
        let values = DataType::Char.decode_values(b"TEST    ", 1);
        assert_eq!(values, vec![Value::Text("TEST".into())]);
        let values = DataType::Char.decode_values(b"ABC\0\0", 40);
        assert_eq!(values, vec![Value::Text("ABC".into())]);
    }

    #[test]
    fn test_unknown_type_is_single_value() {
        let values = DataType::Unknown(99).decode_values(&[1, 2, 3, 4], 4);
        assert_eq!(values, vec![Value::Unknown(99)]);
        let shown = DataType::Unknown(99).display_values(&[1], 1);
        assert_eq!(shown, vec![String::new()]);
    }

    #[test]
    fn test_short_buffer_keeps_complete_elements() {
        let mut buf = 1.5f64.to_be_bytes().to_vec();
        buf.extend_from_slice(&[0, 0, 0]);
        let values = DataType::Double.decode_values(&buf, 4);
        assert_eq!(values, vec![Value::Real8(1.5)]);
    }

    #[test]
    fn test_epoch16_keeps_both_components() {
        let mut buf = 63_000_000_000.0f64.to_be_bytes().to_vec();
        buf.extend_from_slice(&500.0f64.to_be_bytes());
        assert_eq!(
            DataType::Epoch16.decode_values(&buf, 1),
            vec![Value::Epoch16 {
                seconds: 63_000_000_000.0,
                picoseconds: 500.0
            }]
        );
        assert_eq!(
            DataType::Epoch16.display_values(&buf, 1),
            vec!["63000000000:500".to_string()]
        );
    }

    #[test]
    fn test_epoch_conversion() {
        // 2000-01-01T00:00:00 in CDF_EPOCH milliseconds.
        let dt = epoch_to_datetime(63_113_904_000_000.0).unwrap();
        assert_eq!(dt.to_string(), "2000-01-01 00:00:00");
        let dt = epoch16_to_datetime(63_113_904_000.0, 1_500_000.0).unwrap();
        assert_eq!(dt.to_string(), "2000-01-01 00:00:00.000001500");
        assert!(epoch_to_datetime(f64::NAN).is_none());
    }

    proptest! {
        #[test]
        fn prop_int4_big_endian(values in proptest::collection::vec(any::<i32>(), 0..16)) {
            let buf: Vec<u8> = values.iter().flat_map(|v| v.to_be_bytes()).collect();
            let decoded = DataType::Int4.decode_values(&buf, values.len() + 3);
            let expected: Vec<Value> = values.iter().map(|v| Value::Int(i64::from(*v))).collect();
            prop_assert_eq!(decoded, expected);
        }

        #[test]
        fn prop_decode_never_panics(
            code in any::<i32>(),
            buf in proptest::collection::vec(any::<u8>(), 0..64),
            count in 0usize..32,
        ) {
            let values = DataType::from_code(code).decode_values(&buf, count);
            prop_assert!(values.len() <= count.max(1));
        }
    }
}
