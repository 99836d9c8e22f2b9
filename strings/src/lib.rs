//! Deterministic random string generation over configurable alphabets and
//! cardinality/length distributions, built on `benchlog-prng`.

pub mod alphabet;
pub mod chooser;
pub mod error;
pub mod generator;

pub use alphabet::{Alphabet, Charset};
pub use chooser::{LengthChooser, StringChooser};
pub use error::ConfigError;
pub use generator::Generator;
