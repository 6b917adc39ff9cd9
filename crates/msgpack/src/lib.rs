//! MessagePack wire codec.
//!
//! A self-describing, tag-prefixed binary encoding for nil, booleans,
//! integers, floats, raw binary, UTF-8 strings, arrays, maps, and typed
//! extension objects, byte-for-byte compatible with the MessagePack
//! specification's tag layout. Multi-byte values are big-endian.
//!
//! The codec has no value tree: callers read and write wire objects
//! directly, dispatching on [`WireType`] where the shape is not known in
//! advance, and [`Decoder::skip`] advances past any object (however nested)
//! without materializing it.
//!
//! Both ends run over a fixed memory region or over a pull/push transport
//! with a bounded scratch window; see [`Decoder`] and [`Encoder`].
//!
//! # Example
//!
//! ```
//! use wirepack_msgpack::{Decoder, Encoder};
//!
//! let mut out = [0u8; 64];
//! let mut enc = Encoder::to_slice(&mut out);
//! enc.write_mapsize(1).unwrap();
//! enc.write_str("answer").unwrap();
//! enc.write_uint(42).unwrap();
//! let len = enc.buffered();
//!
//! let mut dec = Decoder::from_slice(&out[..len]);
//! assert_eq!(dec.read_mapsize().unwrap(), 1);
//! let n = dec.read_strsize().unwrap() as usize;
//! let mut key = vec![0u8; n];
//! dec.read_raw(&mut key).unwrap();
//! assert_eq!(key, b"answer");
//! assert_eq!(dec.read_uint().unwrap(), 42);
//! ```

mod constants;
mod decoder;
mod encoder;
mod error;
mod skip;

pub use constants::{tag, wire_type, WireType, MIN_STREAM_CAPACITY};
pub use decoder::Decoder;
pub use encoder::Encoder;
pub use error::MsgPackError;

// transport surface, re-exported for stream-mode construction
pub use wirepack_buffers::{BufError, Drained, IoPull, IoPush, Pull, Push, Sealed};
