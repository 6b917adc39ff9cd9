//! Dual-mode binary buffer windows for wirepack.
//!
//! This crate provides the byte-window layer shared by the wirepack codecs:
//! a read window and a write window that operate identically over a fixed
//! memory region ("memory mode") or over a pull/push transport with a bounded
//! scratch buffer ("stream mode").
//!
//! # Overview
//!
//! - [`ReadBuf`] - Reads committed bytes from a slice or a [`Pull`] source
//! - [`WriteBuf`] - Writes bytes to a slice or through a [`Push`] sink
//! - [`Pull`] / [`Push`] - Transport capability traits, with [`IoPull`] and
//!   [`IoPush`] adapters over `std::io`
//!
//! # Example
//!
//! ```
//! use wirepack_buffers::{ReadBuf, WriteBuf};
//!
//! let mut out = [0u8; 8];
//! let mut writer = WriteBuf::to_slice(&mut out);
//! writer.u8(0x01).unwrap();
//! writer.u16(0x0203).unwrap();
//! let n = writer.buffered();
//!
//! let mut reader = ReadBuf::from_slice(&out[..n]);
//! assert_eq!(reader.u8().unwrap(), 0x01);
//! assert_eq!(reader.u16().unwrap(), 0x0203);
//! ```

mod read_buf;
mod transport;
mod write_buf;

pub use read_buf::{ReadBuf, Token};
pub use transport::{Drained, IoPull, IoPush, Pull, Push, Sealed};
pub use write_buf::WriteBuf;

use std::io;

/// Error type for window operations.
#[derive(Debug)]
pub enum BufError {
    /// Not enough committed bytes to satisfy a read, and the source cannot
    /// produce more.
    EndOfBuffer,
    /// A write does not fit the remaining window and no room can be made.
    Overflow,
    /// The pull/push transport reported a failure.
    Transport(io::Error),
}

impl std::fmt::Display for BufError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BufError::EndOfBuffer => write!(f, "end of buffer"),
            BufError::Overflow => write!(f, "buffer overflow"),
            BufError::Transport(err) => write!(f, "transport failure: {err}"),
        }
    }
}

impl std::error::Error for BufError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BufError::Transport(err) => Some(err),
            _ => None,
        }
    }
}
