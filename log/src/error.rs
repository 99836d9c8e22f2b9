use std::io;

use benchlog_codec::CodecError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LogError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("malformed log file: {0}")]
    Malformed(String),
    #[error("unknown unit byte: {0}")]
    UnknownUnit(u8),
    #[error("unknown precision byte: {0}")]
    UnknownPrecision(u8),
    #[error("cannot convert from {from:?} to {to:?}: units are not compatible")]
    IncompatibleUnits { from: crate::schema::Unit, to: crate::schema::Unit },
    #[error("no series named {0:?}")]
    SeriesNotFound(String),
    #[error("duplicate series name {0:?}")]
    DuplicateSeriesName(String),
    #[error("series name {0:?} is longer than 64 bytes")]
    SeriesNameTooLong(String),
    #[error(transparent)]
    Codec(#[from] CodecError),
}
