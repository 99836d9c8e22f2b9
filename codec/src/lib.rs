//! Binary wire codecs: unsigned varints, big-endian fixed-width integers and
//! floats, and the half-float `f32 <-> u16` conversion.
//!
//! These are the packing primitives the measurement log format (in
//! `benchlog-log`) builds its block encoding from.

pub mod error;
pub mod fixed;
pub mod halffloat;
pub mod varint;

pub use error::CodecError;
