//! Deterministic, seekable pseudorandom stream built on a reduced-round
//! Salsa-style block function.
//!
//! This crate is the foundation the `benchlog-strings` string generator and
//! `benchlog-analytics` reservoir sampler build on. Everything here is pure:
//! no I/O, no global state, no hidden singletons — every stream is an owned
//! value threaded explicitly by the caller.

pub mod mash;
pub mod scrambler;
pub mod stream;
pub mod zipf;

pub use mash::{mash, mash_words, BLOCK_BYTES};
pub use scrambler::Scrambler;
pub use stream::StreamRng;
pub use zipf::ZipfParams;
