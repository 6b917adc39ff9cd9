//! MessagePack encoder over a memory slice or a push transport.

use wirepack_buffers::{Push, Sealed, WriteBuf};

use crate::constants::{tag, MIN_STREAM_CAPACITY};
use crate::error::MsgPackError;

/// Writes MessagePack objects to memory or through a stream.
///
/// In memory mode ([`Encoder::to_slice`]) the supplied slice is the encoding
/// target and running out of room is terminal. In stream mode
/// ([`Encoder::stream`]) encoded bytes are buffered in a scratch window and
/// flushed through the sink when full or on [`Encoder::flush`].
///
/// Integer and size headers always use the smallest wire form that fits the
/// value.
pub struct Encoder<'m, P = Sealed> {
    pub buf: WriteBuf<'m, P>,
}

impl<'m> Encoder<'m, Sealed> {
    /// Encodes into a fixed memory region.
    pub fn to_slice(target: &'m mut [u8]) -> Self {
        Self {
            buf: WriteBuf::to_slice(target),
        }
    }
}

impl<P: Push> Encoder<'static, P> {
    /// Encodes through a push transport with a scratch window of `capacity`
    /// bytes.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is below [`MIN_STREAM_CAPACITY`], the size of the
    /// largest fixed-size object header plus payload.
    pub fn stream(dst: P, capacity: usize) -> Self {
        assert!(
            capacity >= MIN_STREAM_CAPACITY,
            "stream capacity must be at least {MIN_STREAM_CAPACITY} bytes"
        );
        Self {
            buf: WriteBuf::stream(dst, capacity),
        }
    }
}

impl<'m, P: Push> Encoder<'m, P> {
    /// Bytes buffered and not yet flushed.
    pub fn buffered(&self) -> usize {
        self.buf.buffered()
    }

    /// Window capacity.
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Pushes buffered bytes through the sink. A no-op success in memory
    /// mode.
    pub fn flush(&mut self) -> Result<(), MsgPackError> {
        Ok(self.buf.flush()?)
    }

    /// Writes a nil.
    pub fn write_nil(&mut self) -> Result<(), MsgPackError> {
        Ok(self.buf.u8(tag::NIL)?)
    }

    /// Writes a boolean.
    pub fn write_bool(&mut self, b: bool) -> Result<(), MsgPackError> {
        Ok(self.buf.u8(if b { tag::TRUE } else { tag::FALSE })?)
    }

    /// Writes an unsigned integer in the smallest form that fits.
    pub fn write_uint(&mut self, u: u64) -> Result<(), MsgPackError> {
        if u <= 127 {
            Ok(self.buf.u8(u as u8)?)
        } else if u <= 0xff {
            Ok(self.buf.u8u8(tag::UINT8, u as u8)?)
        } else if u <= 0xffff {
            Ok(self.buf.u8u16(tag::UINT16, u as u16)?)
        } else if u <= 0xffff_ffff {
            Ok(self.buf.u8u32(tag::UINT32, u as u32)?)
        } else {
            Ok(self.buf.u8u64(tag::UINT64, u)?)
        }
    }

    /// Writes a signed integer in the smallest form that fits.
    ///
    /// `-32..=127` lands in the single-byte fixint forms; wider values use
    /// the int8/16/32/64 families.
    pub fn write_int(&mut self, i: i64) -> Result<(), MsgPackError> {
        match i {
            -32..=127 => Ok(self.buf.u8(i as u8)?),
            -128..=-33 => Ok(self.buf.u8u8(tag::INT8, i as u8)?),
            -32_768..=32_767 => Ok(self.buf.u8u16(tag::INT16, i as u16)?),
            -2_147_483_648..=2_147_483_647 => Ok(self.buf.u8u32(tag::INT32, i as u32)?),
            _ => Ok(self.buf.u8u64(tag::INT64, i as u64)?),
        }
    }

    /// Writes a 32-bit float as its big-endian bit pattern.
    pub fn write_f32(&mut self, f: f32) -> Result<(), MsgPackError> {
        Ok(self.buf.u8f32(tag::F32, f)?)
    }

    /// Writes a 64-bit float as its big-endian bit pattern.
    pub fn write_f64(&mut self, f: f64) -> Result<(), MsgPackError> {
        Ok(self.buf.u8f64(tag::F64, f)?)
    }

    /// Writes a map header for `n` key/value pairs.
    ///
    /// The caller must write exactly `2 * n` objects after it.
    pub fn write_mapsize(&mut self, n: u32) -> Result<(), MsgPackError> {
        if n < 16 {
            Ok(self.buf.u8(0x80 | n as u8)?)
        } else if n <= 0xffff {
            Ok(self.buf.u8u16(tag::MAP16, n as u16)?)
        } else {
            Ok(self.buf.u8u32(tag::MAP32, n)?)
        }
    }

    /// Writes an array header for `n` elements.
    ///
    /// The caller must write exactly `n` objects after it.
    pub fn write_arraysize(&mut self, n: u32) -> Result<(), MsgPackError> {
        if n < 16 {
            Ok(self.buf.u8(0x90 | n as u8)?)
        } else if n <= 0xffff {
            Ok(self.buf.u8u16(tag::ARRAY16, n as u16)?)
        } else {
            Ok(self.buf.u8u32(tag::ARRAY32, n)?)
        }
    }

    /// Writes a string header for an `n`-byte payload.
    pub fn write_strsize(&mut self, n: u32) -> Result<(), MsgPackError> {
        if n < 32 {
            Ok(self.buf.u8(0xa0 | n as u8)?)
        } else if n <= 0xff {
            Ok(self.buf.u8u8(tag::STR8, n as u8)?)
        } else if n <= 0xffff {
            Ok(self.buf.u8u16(tag::STR16, n as u16)?)
        } else {
            Ok(self.buf.u8u32(tag::STR32, n)?)
        }
    }

    /// Writes a binary header for an `n`-byte payload. The bin family has no
    /// inline form; the smallest header is bin8.
    pub fn write_binsize(&mut self, n: u32) -> Result<(), MsgPackError> {
        if n <= 0xff {
            Ok(self.buf.u8u8(tag::BIN8, n as u8)?)
        } else if n <= 0xffff {
            Ok(self.buf.u8u16(tag::BIN16, n as u16)?)
        } else {
            Ok(self.buf.u8u32(tag::BIN32, n)?)
        }
    }

    /// Writes an extension header: size header (fixext shortcut for payload
    /// sizes 1/2/4/8/16), then the application type byte.
    pub fn write_extsize(&mut self, ty: i8, n: u32) -> Result<(), MsgPackError> {
        match n {
            1 => self.buf.u8(tag::FIXEXT1)?,
            2 => self.buf.u8(tag::FIXEXT2)?,
            4 => self.buf.u8(tag::FIXEXT4)?,
            8 => self.buf.u8(tag::FIXEXT8)?,
            16 => self.buf.u8(tag::FIXEXT16)?,
            _ if n <= 0xff => self.buf.u8u8(tag::EXT8, n as u8)?,
            _ if n <= 0xffff => self.buf.u8u16(tag::EXT16, n as u16)?,
            _ => self.buf.u8u32(tag::EXT32, n)?,
        }
        // the type byte always follows the size header
        Ok(self.buf.u8(ty as u8)?)
    }

    /// Writes raw payload bytes, flushing as needed.
    pub fn write_raw(&mut self, src: &[u8]) -> Result<(), MsgPackError> {
        Ok(self.buf.write_all(src)?)
    }

    /// Writes a complete string object: header, then payload.
    pub fn write_str(&mut self, s: &str) -> Result<(), MsgPackError> {
        debug_assert!(s.len() <= u32::MAX as usize);
        self.write_strsize(s.len() as u32)?;
        self.write_raw(s.as_bytes())
    }

    /// Writes a complete binary object: header, then payload.
    pub fn write_bin(&mut self, b: &[u8]) -> Result<(), MsgPackError> {
        debug_assert!(b.len() <= u32::MAX as usize);
        self.write_binsize(b.len() as u32)?;
        self.write_raw(b)
    }

    /// Writes a complete extension object: header, type byte, then payload.
    pub fn write_ext(&mut self, ty: i8, payload: &[u8]) -> Result<(), MsgPackError> {
        debug_assert!(payload.len() <= u32::MAX as usize);
        self.write_extsize(ty, payload.len() as u32)?;
        self.write_raw(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_into(f: impl FnOnce(&mut Encoder<'_>) -> Result<(), MsgPackError>) -> Vec<u8> {
        let mut out = [0u8; 64];
        let mut enc = Encoder::to_slice(&mut out);
        f(&mut enc).unwrap();
        let n = enc.buffered();
        out[..n].to_vec()
    }

    #[test]
    fn uint_width_ladder() {
        assert_eq!(encode_into(|e| e.write_uint(0)), vec![0x00]);
        assert_eq!(encode_into(|e| e.write_uint(127)), vec![0x7f]);
        assert_eq!(encode_into(|e| e.write_uint(128)), vec![0xcc, 0x80]);
        assert_eq!(encode_into(|e| e.write_uint(255)), vec![0xcc, 0xff]);
        assert_eq!(encode_into(|e| e.write_uint(256)), vec![0xcd, 0x01, 0x00]);
        assert_eq!(
            encode_into(|e| e.write_uint(65535)),
            vec![0xcd, 0xff, 0xff]
        );
        assert_eq!(
            encode_into(|e| e.write_uint(65536)),
            vec![0xce, 0x00, 0x01, 0x00, 0x00]
        );
        assert_eq!(
            encode_into(|e| e.write_uint(u64::from(u32::MAX) + 1)),
            vec![0xcf, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00]
        );
    }

    #[test]
    fn int_width_ladder() {
        assert_eq!(encode_into(|e| e.write_int(-1)), vec![0xff]);
        assert_eq!(encode_into(|e| e.write_int(-32)), vec![0xe0]);
        assert_eq!(encode_into(|e| e.write_int(100)), vec![0x64]);
        assert_eq!(encode_into(|e| e.write_int(-33)), vec![0xd0, 0xdf]);
        assert_eq!(encode_into(|e| e.write_int(-128)), vec![0xd0, 0x80]);
        assert_eq!(encode_into(|e| e.write_int(-129)), vec![0xd1, 0xff, 0x7f]);
        assert_eq!(encode_into(|e| e.write_int(128)), vec![0xd1, 0x00, 0x80]);
        assert_eq!(
            encode_into(|e| e.write_int(-40000)),
            vec![0xd2, 0xff, 0xff, 0x63, 0xc0]
        );
        assert_eq!(
            encode_into(|e| e.write_int(i64::MIN)),
            vec![0xd3, 0x80, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]
        );
    }

    #[test]
    fn size_header_ladders() {
        assert_eq!(encode_into(|e| e.write_mapsize(0)), vec![0x80]);
        assert_eq!(encode_into(|e| e.write_mapsize(15)), vec![0x8f]);
        assert_eq!(
            encode_into(|e| e.write_mapsize(16)),
            vec![0xde, 0x00, 0x10]
        );
        assert_eq!(encode_into(|e| e.write_arraysize(9)), vec![0x99]);
        assert_eq!(encode_into(|e| e.write_strsize(31)), vec![0xbf]);
        assert_eq!(encode_into(|e| e.write_strsize(32)), vec![0xd9, 0x20]);
        assert_eq!(encode_into(|e| e.write_binsize(0)), vec![0xc4, 0x00]);
        assert_eq!(
            encode_into(|e| e.write_binsize(256)),
            vec![0xc5, 0x01, 0x00]
        );
        assert_eq!(
            encode_into(|e| e.write_mapsize(0x10000)),
            vec![0xdf, 0x00, 0x01, 0x00, 0x00]
        );
    }

    #[test]
    fn ext_header_shortcuts() {
        assert_eq!(encode_into(|e| e.write_extsize(7, 4)), vec![0xd6, 0x07]);
        assert_eq!(encode_into(|e| e.write_extsize(-2, 16)), vec![0xd8, 0xfe]);
        assert_eq!(
            encode_into(|e| e.write_extsize(7, 12)),
            vec![0xc7, 0x0c, 0x07]
        );
        assert_eq!(
            encode_into(|e| e.write_extsize(1, 300)),
            vec![0xc8, 0x01, 0x2c, 0x01]
        );
    }

    #[test]
    fn float_bit_patterns() {
        assert_eq!(
            encode_into(|e| e.write_f32(1.5)),
            vec![0xca, 0x3f, 0xc0, 0x00, 0x00]
        );
        let mut want = vec![0xcb];
        want.extend_from_slice(&(-0.25f64).to_be_bytes());
        assert_eq!(encode_into(|e| e.write_f64(-0.25)), want);
    }

    #[test]
    fn composite_str_object() {
        let bytes = encode_into(|e| e.write_str("hello"));
        assert_eq!(bytes, b"\xa5hello");
    }
}
