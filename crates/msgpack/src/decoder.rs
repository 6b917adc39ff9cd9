//! MessagePack decoder over a memory slice or a pull transport.

use wirepack_buffers::{Drained, Pull, ReadBuf};

use crate::constants::{
    fixarray, fixint, fixmap, fixstr, fixuint, tag, wire_type, WireType, MIN_STREAM_CAPACITY,
};
use crate::error::MsgPackError;

/// Reads MessagePack objects from memory or from a stream.
///
/// In memory mode ([`Decoder::from_slice`]) the supplied slice is the
/// complete message. In stream mode ([`Decoder::stream`]) bytes are pulled
/// through a bounded scratch window, so messages of unbounded size can be
/// decoded as long as no single non-raw object outgrows the window.
///
/// Every typed read checks the leading tag byte; on a mismatch the tag is
/// put back and [`MsgPackError::TypeMismatch`] is returned, leaving the
/// decoder positioned to retry the same object another way.
pub struct Decoder<'m, S = Drained> {
    pub buf: ReadBuf<'m, S>,
}

impl<'m> Decoder<'m, Drained> {
    /// Decodes from a complete in-memory message.
    pub fn from_slice(msg: &'m [u8]) -> Self {
        Self {
            buf: ReadBuf::from_slice(msg),
        }
    }
}

impl<S: Pull> Decoder<'static, S> {
    /// Decodes from a pull transport with a scratch window of `capacity`
    /// bytes.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is below [`MIN_STREAM_CAPACITY`]: a smaller
    /// window cannot hold the largest fixed-size object.
    pub fn stream(src: S, capacity: usize) -> Self {
        assert!(
            capacity >= MIN_STREAM_CAPACITY,
            "stream capacity must be at least {MIN_STREAM_CAPACITY} bytes"
        );
        Self {
            buf: ReadBuf::stream(src, capacity),
        }
    }
}

impl<'m, S: Pull> Decoder<'m, S> {
    /// Committed bytes not yet consumed.
    pub fn buffered(&self) -> usize {
        self.buf.buffered()
    }

    /// Window capacity.
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Wire type of the next object, without consuming anything.
    pub fn next_type(&mut self) -> Result<WireType, MsgPackError> {
        Ok(wire_type(self.buf.peek()?))
    }

    /// Reads a nil.
    pub fn read_nil(&mut self) -> Result<(), MsgPackError> {
        let t = self.buf.take_token()?;
        if t.byte() != tag::NIL {
            self.buf.unread(t);
            return Err(MsgPackError::TypeMismatch);
        }
        Ok(())
    }

    /// Reads a boolean.
    pub fn read_bool(&mut self) -> Result<bool, MsgPackError> {
        let t = self.buf.take_token()?;
        match t.byte() {
            tag::TRUE => Ok(true),
            tag::FALSE => Ok(false),
            _ => {
                self.buf.unread(t);
                Err(MsgPackError::TypeMismatch)
            }
        }
    }

    /// Reads an unsigned integer, accepting any legal width.
    pub fn read_uint(&mut self) -> Result<u64, MsgPackError> {
        let t = self.buf.take_token()?;
        if let Some(u) = fixuint(t.byte()) {
            return Ok(u);
        }
        match t.byte() {
            tag::UINT8 => Ok(u64::from(self.buf.u8()?)),
            tag::UINT16 => Ok(u64::from(self.buf.u16()?)),
            tag::UINT32 => Ok(u64::from(self.buf.u32()?)),
            tag::UINT64 => Ok(self.buf.u64()?),
            _ => {
                self.buf.unread(t);
                Err(MsgPackError::TypeMismatch)
            }
        }
    }

    /// Reads a signed integer, accepting any legal width.
    pub fn read_int(&mut self) -> Result<i64, MsgPackError> {
        let t = self.buf.take_token()?;
        if let Some(i) = fixint(t.byte()) {
            return Ok(i);
        }
        match t.byte() {
            tag::INT8 => Ok(i64::from(self.buf.u8()? as i8)),
            tag::INT16 => Ok(i64::from(self.buf.u16()? as i16)),
            tag::INT32 => Ok(i64::from(self.buf.u32()? as i32)),
            tag::INT64 => Ok(self.buf.u64()? as i64),
            _ => {
                self.buf.unread(t);
                Err(MsgPackError::TypeMismatch)
            }
        }
    }

    /// Reads a 32-bit float.
    pub fn read_f32(&mut self) -> Result<f32, MsgPackError> {
        let t = self.buf.take_token()?;
        if t.byte() != tag::F32 {
            self.buf.unread(t);
            return Err(MsgPackError::TypeMismatch);
        }
        Ok(self.buf.f32()?)
    }

    /// Reads a 64-bit float.
    pub fn read_f64(&mut self) -> Result<f64, MsgPackError> {
        let t = self.buf.take_token()?;
        if t.byte() != tag::F64 {
            self.buf.unread(t);
            return Err(MsgPackError::TypeMismatch);
        }
        Ok(self.buf.f64()?)
    }

    /// Reads a map header, returning the number of key/value pairs.
    ///
    /// The caller must decode exactly `2 * count` objects before the next
    /// sibling.
    pub fn read_mapsize(&mut self) -> Result<u32, MsgPackError> {
        let t = self.buf.take_token()?;
        if let Some(n) = fixmap(t.byte()) {
            return Ok(n);
        }
        match t.byte() {
            tag::MAP16 => Ok(u32::from(self.buf.u16()?)),
            tag::MAP32 => Ok(self.buf.u32()?),
            _ => {
                self.buf.unread(t);
                Err(MsgPackError::TypeMismatch)
            }
        }
    }

    /// Reads an array header, returning the element count.
    ///
    /// The caller must decode exactly `count` objects before the next
    /// sibling.
    pub fn read_arraysize(&mut self) -> Result<u32, MsgPackError> {
        let t = self.buf.take_token()?;
        if let Some(n) = fixarray(t.byte()) {
            return Ok(n);
        }
        match t.byte() {
            tag::ARRAY16 => Ok(u32::from(self.buf.u16()?)),
            tag::ARRAY32 => Ok(self.buf.u32()?),
            _ => {
                self.buf.unread(t);
                Err(MsgPackError::TypeMismatch)
            }
        }
    }

    /// Reads a string header, returning the payload length in bytes.
    pub fn read_strsize(&mut self) -> Result<u32, MsgPackError> {
        let t = self.buf.take_token()?;
        if let Some(n) = fixstr(t.byte()) {
            return Ok(n);
        }
        match t.byte() {
            tag::STR8 => Ok(u32::from(self.buf.u8()?)),
            tag::STR16 => Ok(u32::from(self.buf.u16()?)),
            tag::STR32 => Ok(self.buf.u32()?),
            _ => {
                self.buf.unread(t);
                Err(MsgPackError::TypeMismatch)
            }
        }
    }

    /// Reads a binary header, returning the payload length in bytes.
    pub fn read_binsize(&mut self) -> Result<u32, MsgPackError> {
        let t = self.buf.take_token()?;
        match t.byte() {
            tag::BIN8 => Ok(u32::from(self.buf.u8()?)),
            tag::BIN16 => Ok(u32::from(self.buf.u16()?)),
            tag::BIN32 => Ok(self.buf.u32()?),
            _ => {
                self.buf.unread(t);
                Err(MsgPackError::TypeMismatch)
            }
        }
    }

    /// Reads an extension header, returning the application type tag and the
    /// payload length in bytes.
    pub fn read_extsize(&mut self) -> Result<(i8, u32), MsgPackError> {
        let t = self.buf.take_token()?;
        let size = match t.byte() {
            tag::FIXEXT1 => 1,
            tag::FIXEXT2 => 2,
            tag::FIXEXT4 => 4,
            tag::FIXEXT8 => 8,
            tag::FIXEXT16 => 16,
            tag::EXT8 => u32::from(self.buf.u8()?),
            tag::EXT16 => u32::from(self.buf.u16()?),
            tag::EXT32 => self.buf.u32()?,
            _ => {
                self.buf.unread(t);
                return Err(MsgPackError::TypeMismatch);
            }
        };
        // the extension type byte always follows the size header
        let ty = self.buf.u8()? as i8;
        Ok((ty, size))
    }

    /// Copies exactly `dst.len()` payload bytes into `dst`, refilling the
    /// window as needed.
    pub fn read_raw(&mut self, dst: &mut [u8]) -> Result<(), MsgPackError> {
        Ok(self.buf.read_into(dst)?)
    }
}
