use tracing::trace;

use crate::config::CursorConfig;
use crate::encoding::TextEncoding;
use crate::error::{CursorError, Result};
use crate::scalar::{ScalarKind, Value};


/// Integer types accepted as read lengths. Negative values are rejected
/// with `InvalidInput`; positive values too wide for `usize` can never fit
/// the buffer and are rejected with `OutOfRange`.
pub trait ByteLen: TryInto<usize> + TryInto<i128> + PartialOrd + Default + Copy {}

impl<T> ByteLen for T where T: TryInto<usize> + TryInto<i128> + PartialOrd + Default + Copy {}

/// Where a seek offset is measured from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Origin {
    #[default]
    Start,
    Current,
}

/// Sequential reader over a borrowed, fixed-length byte buffer.
///
/// Every read validates its full width before touching the offset, so a
/// failed read leaves the cursor exactly where it was and the cursor stays
/// usable afterwards. Copying a cursor gives an independent offset over the
/// same buffer.
#[derive(Debug, Clone, Copy)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    pos: usize,
    config: CursorConfig,
}

impl<'a> ByteCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_config(data, CursorConfig::default())
    }

    pub fn with_config(data: &'a [u8], config: CursorConfig) -> Self {
        Self {
            data,
            pos: 0,
            config,
        }
    }

    pub fn with_offset(data: &'a [u8], pos: usize) -> Result<Self> {
        let mut cursor = Self::new(data);
        if pos > data.len() {
            return Err(cursor.out_of_range(pos as i128));
        }
        cursor.pos = pos;
        Ok(cursor)
    }

    pub fn offset(&self) -> usize {
        self.pos
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn is_at_end(&self) -> bool {
        self.pos == self.data.len()
    }

    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// The unread tail of the buffer.
    pub fn rest(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }

    pub fn config(&self) -> &CursorConfig {
        &self.config
    }

    /// Moves to `offset`, measured from `origin`, and returns the new
    /// absolute offset. The result must lie in `[0, len]`.
    pub fn seek(&mut self, offset: isize, origin: Origin) -> Result<usize> {
        let base = match origin {
            Origin::Start => 0,
            Origin::Current => self.pos as i128,
        };
        let target = base + offset as i128;
        if target < 0 || target > self.data.len() as i128 {
            return Err(self.out_of_range(target));
        }

        self.pos = target as usize;
        trace!(offset = self.pos, "seek");
        Ok(self.pos)
    }

    pub fn rewind(&mut self) {
        self.pos = 0;
        trace!(offset = self.pos, "seek");
    }

    pub fn skip<L: ByteLen>(&mut self, len: L) -> Result<()> {
        let len = self.checked_len(len)?;
        self.window(len)?;
        self.pos += len;
        Ok(())
    }

    /// Copies the next `len` bytes out of the buffer.
    pub fn next_buffer<L: ByteLen>(&mut self, len: L) -> Result<Vec<u8>> {
        self.next_slice(len).map(<[u8]>::to_vec)
    }

    /// Like [`next_buffer`](Self::next_buffer) but borrows instead of copying.
    pub fn next_slice<L: ByteLen>(&mut self, len: L) -> Result<&'a [u8]> {
        let len = self.checked_len(len)?;
        let bytes = self.window(len)?;
        self.pos += len;
        Ok(bytes)
    }

    pub fn peek_slice<L: ByteLen>(&self, len: L) -> Result<&'a [u8]> {
        let len = self.checked_len(len)?;
        self.window(len)
    }

    /// Decodes the next `len` bytes as text. The offset only moves once
    /// decoding has succeeded.
    pub fn next_string<L: ByteLen>(
        &mut self,
        len: L,
        encoding: TextEncoding,
    ) -> Result<String> {
        let len = self.checked_len(len)?;
        let bytes = self.window(len)?;
        let text = encoding
            .decode_at(bytes, self.pos, self.config.mode)
            .inspect_err(|err| trace!(offset = self.pos, len, %err, "rejected text read"))?;
        self.pos += len;
        Ok(text)
    }

    pub fn next_string_named<L: ByteLen>(
        &mut self,
        len: L,
        encoding: &str,
    ) -> Result<String> {
        let encoding = encoding.parse()?;
        self.next_string(len, encoding)
    }

    pub fn next_string_default<L: ByteLen>(&mut self, len: L) -> Result<String> {
        self.next_string(len, self.config.default_encoding)
    }

    pub fn next_i8(&mut self) -> Result<i8> {
        Ok(i8::from_le_bytes(self.read_array()?))
    }

    pub fn next_u8(&mut self) -> Result<u8> {
        Ok(self.read_array::<1>()?[0])
    }

    pub fn next_i16_le(&mut self) -> Result<i16> {
        Ok(i16::from_le_bytes(self.read_array()?))
    }

    pub fn next_i16_be(&mut self) -> Result<i16> {
        Ok(i16::from_be_bytes(self.read_array()?))
    }

    pub fn next_u16_le(&mut self) -> Result<u16> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    pub fn next_u16_be(&mut self) -> Result<u16> {
        Ok(u16::from_be_bytes(self.read_array()?))
    }

    pub fn next_i32_le(&mut self) -> Result<i32> {
        Ok(i32::from_le_bytes(self.read_array()?))
    }

    pub fn next_i32_be(&mut self) -> Result<i32> {
        Ok(i32::from_be_bytes(self.read_array()?))
    }

    pub fn next_u32_le(&mut self) -> Result<u32> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    pub fn next_u32_be(&mut self) -> Result<u32> {
        Ok(u32::from_be_bytes(self.read_array()?))
    }

    pub fn next_f32_le(&mut self) -> Result<f32> {
        Ok(f32::from_le_bytes(self.read_array()?))
    }

    pub fn next_f32_be(&mut self) -> Result<f32> {
        Ok(f32::from_be_bytes(self.read_array()?))
    }

    pub fn next_f64_le(&mut self) -> Result<f64> {
        Ok(f64::from_le_bytes(self.read_array()?))
    }

    pub fn next_f64_be(&mut self) -> Result<f64> {
        Ok(f64::from_be_bytes(self.read_array()?))
    }

    /// Reads the scalar named by `kind`.
    pub fn next_value(&mut self, kind: ScalarKind) -> Result<Value> {
        let value = kind.decode(self.window(kind.width())?)?;
        self.pos += kind.width();
        Ok(value)
    }

    pub fn peek_value(&self, kind: ScalarKind) -> Result<Value> {
        kind.decode(self.window(kind.width())?)
    }

    /// Reads each kind of `layout` in order. Either the whole layout is
    /// read or the offset is left untouched.
    pub fn next_values(&mut self, layout: &[ScalarKind]) -> Result<Vec<Value>> {
        let mut probe = *self;
        let values = layout
            .iter()
            .map(|&kind| probe.next_value(kind))
            .collect::<Result<Vec<_>>>()?;
        self.pos = probe.pos;
        Ok(values)
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let window = self.window(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(window);
        self.pos += N;
        Ok(out)
    }

    /// Bounds-checks `[pos, pos + len)` without moving.
    fn window(&self, len: usize) -> Result<&'a [u8]> {
        let end = self.pos as i128 + len as i128;
        if end > self.data.len() as i128 {
            return Err(self.out_of_range(end));
        }
        Ok(&self.data[self.pos..self.pos + len])
    }

    fn checked_len<L: ByteLen>(&self, len: L) -> Result<usize> {
        if len < L::default() {
            trace!(offset = self.pos, "rejected negative length");
            return Err(CursorError::InvalidInput("length must be non-negative"));
        }
        <L as TryInto<usize>>::try_into(len).map_err(|_| {
            let wide = <L as TryInto<i128>>::try_into(len).unwrap_or(i128::MAX);
            self.out_of_range((self.pos as i128).saturating_add(wide))
        })
    }

    fn out_of_range(&self, target: i128) -> CursorError {
        trace!(
            offset = self.pos,
            target = %target,
            len = self.data.len(),
            "rejected out-of-range access"
        );
        CursorError::OutOfRange {
            target,
            len: self.data.len(),
        }
    }
}
