use std::fmt;
use std::str::FromStr;

use crate::error::{CursorError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endian {
    Little,
    Big,
}

/// The closed set of numeric reads, one tag per (type, byte order) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    I8,
    U8,
    I16Le,
    I16Be,
    U16Le,
    U16Be,
    I32Le,
    I32Be,
    U32Le,
    U32Be,
    F32Le,
    F32Be,
    F64Le,
    F64Be,
}

impl ScalarKind {
    pub const ALL: [ScalarKind; 14] = [
        ScalarKind::I8,
        ScalarKind::U8,
        ScalarKind::I16Le,
        ScalarKind::I16Be,
        ScalarKind::U16Le,
        ScalarKind::U16Be,
        ScalarKind::I32Le,
        ScalarKind::I32Be,
        ScalarKind::U32Le,
        ScalarKind::U32Be,
        ScalarKind::F32Le,
        ScalarKind::F32Be,
        ScalarKind::F64Le,
        ScalarKind::F64Be,
    ];

    pub fn width(&self) -> usize {
        match self {
            ScalarKind::I8 | ScalarKind::U8 => 1,
            ScalarKind::I16Le | ScalarKind::I16Be | ScalarKind::U16Le | ScalarKind::U16Be => 2,
            ScalarKind::I32Le
            | ScalarKind::I32Be
            | ScalarKind::U32Le
            | ScalarKind::U32Be
            | ScalarKind::F32Le
            | ScalarKind::F32Be => 4,
            ScalarKind::F64Le | ScalarKind::F64Be => 8,
        }
    }

    /// `None` for single-byte kinds, where byte order does not apply.
    pub fn endian(&self) -> Option<Endian> {
        match self {
            ScalarKind::I8 | ScalarKind::U8 => None,
            ScalarKind::I16Le
            | ScalarKind::U16Le
            | ScalarKind::I32Le
            | ScalarKind::U32Le
            | ScalarKind::F32Le
            | ScalarKind::F64Le => Some(Endian::Little),
            ScalarKind::I16Be
            | ScalarKind::U16Be
            | ScalarKind::I32Be
            | ScalarKind::U32Be
            | ScalarKind::F32Be
            | ScalarKind::F64Be => Some(Endian::Big),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ScalarKind::I8 => "Int8",
            ScalarKind::U8 => "UInt8",
            ScalarKind::I16Le => "Int16LE",
            ScalarKind::I16Be => "Int16BE",
            ScalarKind::U16Le => "UInt16LE",
            ScalarKind::U16Be => "UInt16BE",
            ScalarKind::I32Le => "Int32LE",
            ScalarKind::I32Be => "Int32BE",
            ScalarKind::U32Le => "UInt32LE",
            ScalarKind::U32Be => "UInt32BE",
            ScalarKind::F32Le => "FloatLE",
            ScalarKind::F32Be => "FloatBE",
            ScalarKind::F64Le => "DoubleLE",
            ScalarKind::F64Be => "DoubleBE",
        }
    }

    /// Decodes the first `width()` bytes of `bytes`.
    ///
    /// Callers bounds-check beforehand; a short slice yields `OutOfRange`
    /// against the slice itself.
    pub fn decode(&self, bytes: &[u8]) -> Result<Value> {
        let value = match self {
            ScalarKind::I8 => Value::I8(i8::from_le_bytes(take(bytes)?)),
            ScalarKind::U8 => Value::U8(take::<1>(bytes)?[0]),
            ScalarKind::I16Le => Value::I16(i16::from_le_bytes(take(bytes)?)),
            ScalarKind::I16Be => Value::I16(i16::from_be_bytes(take(bytes)?)),
            ScalarKind::U16Le => Value::U16(u16::from_le_bytes(take(bytes)?)),
            ScalarKind::U16Be => Value::U16(u16::from_be_bytes(take(bytes)?)),
            ScalarKind::I32Le => Value::I32(i32::from_le_bytes(take(bytes)?)),
            ScalarKind::I32Be => Value::I32(i32::from_be_bytes(take(bytes)?)),
            ScalarKind::U32Le => Value::U32(u32::from_le_bytes(take(bytes)?)),
            ScalarKind::U32Be => Value::U32(u32::from_be_bytes(take(bytes)?)),
            ScalarKind::F32Le => Value::F32(f32::from_le_bytes(take(bytes)?)),
            ScalarKind::F32Be => Value::F32(f32::from_be_bytes(take(bytes)?)),
            ScalarKind::F64Le => Value::F64(f64::from_le_bytes(take(bytes)?)),
            ScalarKind::F64Be => Value::F64(f64::from_be_bytes(take(bytes)?)),
        };
        Ok(value)
    }
}

fn take<const N: usize>(bytes: &[u8]) -> Result<[u8; N]> {
    bytes
        .get(..N)
        .and_then(|window| window.try_into().ok())
        .ok_or(CursorError::OutOfRange {
            target: N as i128,
            len: bytes.len(),
        })
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScalarKind {
    type Err = CursorError;

    fn from_str(name: &str) -> Result<Self> {
        ScalarKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| CursorError::UnknownScalar(name.to_string()))
    }
}

/// A decoded scalar. The variant follows the numeric type only; byte order
/// is a property of the read, not of the value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    I8(i8),
    U8(u8),
    I16(i16),
    U16(u16),
    I32(i32),
    U32(u32),
    F32(f32),
    F64(f64),
}

impl Value {
    /// Every variant widens to `f64` without loss.
    pub fn as_f64(&self) -> f64 {
        match *self {
            Value::I8(v) => f64::from(v),
            Value::U8(v) => f64::from(v),
            Value::I16(v) => f64::from(v),
            Value::U16(v) => f64::from(v),
            Value::I32(v) => f64::from(v),
            Value::U32(v) => f64::from(v),
            Value::F32(v) => f64::from(v),
            Value::F64(v) => v,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::I8(v) => write!(f, "{}", v),
            Value::U8(v) => write!(f, "{}", v),
            Value::I16(v) => write!(f, "{}", v),
            Value::U16(v) => write!(f, "{}", v),
            Value::I32(v) => write!(f, "{}", v),
            Value::U32(v) => write!(f, "{}", v),
            Value::F32(v) => write!(f, "{}", v),
            Value::F64(v) => write!(f, "{}", v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widths_match_type_sizes() {
        for kind in ScalarKind::ALL {
            let expected = match kind.decode(&[0u8; 8]).expect("8 bytes cover every kind") {
                Value::I8(_) | Value::U8(_) => 1,
                Value::I16(_) | Value::U16(_) => 2,
                Value::I32(_) | Value::U32(_) | Value::F32(_) => 4,
                Value::F64(_) => 8,
            };
            assert_eq!(kind.width(), expected, "{}", kind);
        }
    }

    #[test]
    fn single_byte_kinds_have_no_byte_order() {
        assert_eq!(ScalarKind::I8.endian(), None);
        assert_eq!(ScalarKind::U8.endian(), None);
        assert_eq!(ScalarKind::F64Be.endian(), Some(Endian::Big));
        assert_eq!(ScalarKind::U16Le.endian(), Some(Endian::Little));
    }

    #[test]
    fn names_parse_back() {
        for kind in ScalarKind::ALL {
            assert_eq!(kind.name().parse::<ScalarKind>(), Ok(kind));
        }
        assert_eq!("doublebe".parse::<ScalarKind>(), Ok(ScalarKind::F64Be));
        assert_eq!(
            "Int64LE".parse::<ScalarKind>(),
            Err(CursorError::UnknownScalar("Int64LE".into()))
        );
    }

    #[test]
    fn byte_order_selects_low_byte_position() {
        let bytes = [0x01, 0x02];
        assert_eq!(ScalarKind::U16Le.decode(&bytes), Ok(Value::U16(0x0201)));
        assert_eq!(ScalarKind::U16Be.decode(&bytes), Ok(Value::U16(0x0102)));
    }

    #[test]
    fn signed_kinds_use_twos_complement() {
        assert_eq!(ScalarKind::I8.decode(&[0xff]), Ok(Value::I8(-1)));
        assert_eq!(ScalarKind::U8.decode(&[0xff]), Ok(Value::U8(255)));
        assert_eq!(
            ScalarKind::I32Be.decode(&[0x80, 0, 0, 0]),
            Ok(Value::I32(i32::MIN))
        );
    }

    #[test]
    fn short_input_is_out_of_range() {
        assert_eq!(
            ScalarKind::F64Le.decode(&[0; 7]),
            Err(CursorError::OutOfRange { target: 8, len: 7 })
        );
    }

    #[test]
    fn values_widen_to_f64() {
        assert_eq!(Value::U32(u32::MAX).as_f64(), 4_294_967_295.0);
        assert_eq!(Value::F32(1.5).as_f64(), 1.5);
        assert_eq!(Value::I16(-7).to_string(), "-7");
    }
}
