use thiserror::Error;

/// Errors raised while encoding or decoding the wire primitives in this crate.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    #[error("varint is not terminated within 10 bytes")]
    VarintOverflow,
    #[error("buffer ended before the value could be decoded")]
    UnexpectedEof,
}
