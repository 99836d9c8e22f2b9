use thiserror::Error;

/// Errors raised when configuring a string [`crate::generator::Generator`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("alphabet must be non-empty")]
    AlphabetEmpty,
    #[error("alphabet length {0} exceeds the 255-byte limit")]
    AlphabetTooLong(usize),
    #[error("invalid length range: lo={lo} > hi={hi}")]
    InvalidLengthRange { lo: u64, hi: u64 },
}
