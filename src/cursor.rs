use crate::error::{DecodeError, DecodeResult};

/// Seekable little-endian reader over an in-memory `.sspm` buffer.
///
/// Every read either consumes exactly the bytes it asks for or fails with
/// [`DecodeError::Truncated`] and leaves the position untouched.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Repositions to an absolute byte offset. Seeking to the very end is allowed.
    pub fn seek(&mut self, offset: u64) -> DecodeResult<()> {
        match usize::try_from(offset) {
            Ok(target) if target <= self.data.len() => {
                self.pos = target;
                Ok(())
            }
            _ => Err(DecodeError::Truncated {
                offset: self.data.len(),
                needed: offset.saturating_sub(self.data.len() as u64),
            }),
        }
    }

    pub fn skip(&mut self, len: u64) -> DecodeResult<()> {
        let len = self.checked_len(len)?;
        self.pos += len;
        Ok(())
    }

    pub fn bytes(&mut self, len: usize) -> DecodeResult<&'a [u8]> {
        let len = self.checked_len(len as u64)?;
        let out = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(out)
    }

    fn checked_len(&self, len: u64) -> DecodeResult<usize> {
        match usize::try_from(len) {
            Ok(len) if len <= self.remaining() => Ok(len),
            _ => Err(DecodeError::Truncated {
                offset: self.pos,
                needed: len,
            }),
        }
    }

    fn array<const N: usize>(&mut self) -> DecodeResult<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.bytes(N)?);
        Ok(out)
    }

    pub fn u8(&mut self) -> DecodeResult<u8> {
        Ok(self.array::<1>()?[0])
    }

    pub fn i8(&mut self) -> DecodeResult<i8> {
        Ok(i8::from_le_bytes(self.array()?))
    }

    pub fn u16(&mut self) -> DecodeResult<u16> {
        Ok(u16::from_le_bytes(self.array()?))
    }

    pub fn i16(&mut self) -> DecodeResult<i16> {
        Ok(i16::from_le_bytes(self.array()?))
    }

    pub fn u32(&mut self) -> DecodeResult<u32> {
        Ok(u32::from_le_bytes(self.array()?))
    }

    pub fn i32(&mut self) -> DecodeResult<i32> {
        Ok(i32::from_le_bytes(self.array()?))
    }

    pub fn u64(&mut self) -> DecodeResult<u64> {
        Ok(u64::from_le_bytes(self.array()?))
    }

    pub fn i64(&mut self) -> DecodeResult<i64> {
        Ok(i64::from_le_bytes(self.array()?))
    }

    pub fn f32(&mut self) -> DecodeResult<f32> {
        Ok(f32::from_le_bytes(self.array()?))
    }

    /// One byte, any nonzero value is `true`.
    pub fn bool(&mut self) -> DecodeResult<bool> {
        Ok(self.u8()? != 0)
    }

    /// String with a u16 byte-length prefix.
    pub fn string_u16(&mut self) -> DecodeResult<String> {
        let start = self.pos;
        let len = self.u16()? as usize;
        self.utf8(len).inspect_err(|_| self.pos = start)
    }

    /// String with a u32 byte-length prefix.
    pub fn string_u32(&mut self) -> DecodeResult<String> {
        let start = self.pos;
        let len = self.u32()? as usize;
        self.utf8(len).inspect_err(|_| self.pos = start)
    }

    /// Reads up to the next `\n` (consumed, not returned) or the end of input.
    pub fn line(&mut self) -> DecodeResult<String> {
        let start = self.pos;
        let rest = &self.data[start..];
        let (text, consumed) = match rest.iter().position(|&b| b == b'\n') {
            Some(idx) => (&rest[..idx], idx + 1),
            None => (rest, rest.len()),
        };

        let text = std::str::from_utf8(text)
            .map_err(|_| DecodeError::InvalidText { offset: start })?
            .to_owned();
        self.pos += consumed;

        Ok(text)
    }

    fn utf8(&mut self, len: usize) -> DecodeResult<String> {
        let offset = self.pos;
        let raw = self.bytes(len)?;
        std::str::from_utf8(raw)
            .map(str::to_owned)
            .map_err(|_| DecodeError::InvalidText { offset })
    }
}
