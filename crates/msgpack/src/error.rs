//! MessagePack codec error type.

use std::io;

use thiserror::Error;
use wirepack_buffers::BufError;

/// Errors surfaced by decoder and encoder operations.
#[derive(Debug, Error)]
pub enum MsgPackError {
    /// The buffer or stream ran out before the request was satisfied.
    #[error("unexpected end of input")]
    UnexpectedEof,
    /// The next tag byte does not encode the requested type.
    ///
    /// The tag byte is put back before this is returned, so the caller may
    /// retry the same position as a different type or skip the object.
    #[error("msgpack type mismatch")]
    TypeMismatch,
    /// The pull/push transport reported a failure.
    #[error("transport failure")]
    Transport(#[source] io::Error),
}

impl From<BufError> for MsgPackError {
    fn from(err: BufError) -> Self {
        match err {
            BufError::EndOfBuffer | BufError::Overflow => MsgPackError::UnexpectedEof,
            BufError::Transport(err) => MsgPackError::Transport(err),
        }
    }
}
