//! Size accounting and object traversal.

use wirepack_buffers::Pull;

use crate::constants::{fixarray, fixmap, fixstr, tag};
use crate::decoder::Decoder;
use crate::error::MsgPackError;

impl<'m, S: Pull> Decoder<'m, S> {
    /// Length prefix one byte past the cursor, 8-bit form.
    fn peek_len8(&mut self) -> Result<u8, MsgPackError> {
        Ok(self.buf.peek_span(1, 1)?[0])
    }

    /// Length prefix one byte past the cursor, 16-bit form.
    fn peek_len16(&mut self) -> Result<u16, MsgPackError> {
        let b = self.buf.peek_span(1, 2)?;
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }

    /// Length prefix one byte past the cursor, 32-bit form.
    fn peek_len32(&mut self) -> Result<u32, MsgPackError> {
        let b = self.buf.peek_span(1, 4)?;
        Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }

    /// Size of the next object without consuming it: the byte length of its
    /// own representation (tag, length prefix, and inline payload) and the
    /// number of child objects that follow.
    fn next_size(&mut self) -> Result<(usize, u64), MsgPackError> {
        let b = self.buf.peek()?;
        // single-byte scalars: fixints and everything above map32
        if b >> 7 == 0 || b > tag::MAP32 {
            return Ok((1, 0));
        }
        if let Some(n) = fixstr(b) {
            return Ok((1 + n as usize, 0));
        }
        if let Some(n) = fixmap(b) {
            return Ok((1, 2 * u64::from(n)));
        }
        if let Some(n) = fixarray(b) {
            return Ok((1, u64::from(n)));
        }
        match b {
            tag::NIL | tag::FALSE | tag::TRUE => Ok((1, 0)),
            tag::UINT8 | tag::INT8 => Ok((2, 0)),
            tag::UINT16 | tag::INT16 => Ok((3, 0)),
            tag::UINT32 | tag::INT32 | tag::F32 => Ok((5, 0)),
            tag::UINT64 | tag::INT64 | tag::F64 => Ok((9, 0)),
            tag::BIN8 | tag::STR8 => Ok((2 + self.peek_len8()? as usize, 0)),
            tag::BIN16 | tag::STR16 => Ok((3 + self.peek_len16()? as usize, 0)),
            tag::BIN32 | tag::STR32 => Ok((5 + self.peek_len32()? as usize, 0)),
            tag::FIXEXT1 => Ok((3, 0)),
            tag::FIXEXT2 => Ok((4, 0)),
            tag::FIXEXT4 => Ok((6, 0)),
            tag::FIXEXT8 => Ok((10, 0)),
            tag::FIXEXT16 => Ok((18, 0)),
            tag::EXT8 => Ok((3 + self.peek_len8()? as usize, 0)),
            tag::EXT16 => Ok((4 + self.peek_len16()? as usize, 0)),
            tag::EXT32 => Ok((6 + self.peek_len32()? as usize, 0)),
            tag::ARRAY16 => Ok((3, u64::from(self.peek_len16()?))),
            tag::ARRAY32 => Ok((5, u64::from(self.peek_len32()?))),
            tag::MAP16 => Ok((3, 2 * u64::from(self.peek_len16()?))),
            tag::MAP32 => Ok((5, 2 * u64::from(self.peek_len32()?))),
            _ => Err(MsgPackError::TypeMismatch), // 0xc1
        }
    }

    /// Advances past the next object, including all nested children, without
    /// materializing anything.
    ///
    /// Traversal is iterative: container headers add their child counts to a
    /// pending-object budget, so input nesting depth cannot exhaust the call
    /// stack. Every tag maps to a finite size or is rejected, so malformed
    /// input fails with a type-mismatch or end-of-input error rather than
    /// looping.
    pub fn skip(&mut self) -> Result<(), MsgPackError> {
        let mut pending: u64 = 1;
        while pending > 0 {
            let (own, children) = self.next_size()?;
            self.buf.skip_bytes(own)?;
            pending = pending - 1 + children;
        }
        Ok(())
    }
}
