//! Set- and length-choosers as tagged enums rather than a virtual-dispatch
//! class hierarchy: each variant carries its own parameters and is matched
//! once at the call site inside [`crate::generator::Generator::generate`].

use benchlog_prng::{StreamRng, ZipfParams};

use crate::error::ConfigError;

/// Chooses the 64-bit seed fed to the per-string content stream, and knows
/// when it is exhausted.
#[derive(Clone, Debug)]
pub enum StringChooser {
    /// No set bound: every call draws fresh, non-repeating content.
    Default,
    /// Uniform over a virtual set of size `size`, with repetition.
    Fixed { size: u64 },
    /// Walk `[start, limit)` exactly once, in order.
    FixedOnce { limit: u64, next: u64 },
    /// Zipf-distributed over a virtual set of size `n`.
    FixedZipf { params: ZipfParams },
}

impl StringChooser {
    pub fn fixed(size: u64) -> Self {
        StringChooser::Fixed { size }
    }

    pub fn fixed_once(start: u64, limit: u64) -> Self {
        StringChooser::FixedOnce {
            limit,
            next: start,
        }
    }

    pub fn fixed_zipf(size: u64, theta: f64) -> Self {
        StringChooser::FixedZipf {
            params: ZipfParams::new(size, theta),
        }
    }

    /// Has this chooser produced everything it will ever produce?
    pub fn done(&self) -> bool {
        match self {
            StringChooser::Default | StringChooser::Fixed { .. } | StringChooser::FixedZipf { .. } => {
                false
            }
            StringChooser::FixedOnce { limit, next } => next >= limit,
        }
    }

    /// Draw the next seed from `selection`, the outer/selection stream.
    /// `Default` never calls this — it has no seed to draw (see
    /// [`crate::generator::Generator::generate`]).
    pub fn seed(&mut self, selection: &mut StreamRng) -> u64 {
        match self {
            StringChooser::Default => unreachable!("Default chooser never draws a seed"),
            StringChooser::Fixed { size } => {
                let d = selection.generate_double();
                (*size as f64 * d) as u64
            }
            StringChooser::FixedOnce { next, .. } => {
                let v = *next;
                *next += 1;
                v
            }
            StringChooser::FixedZipf { params } => params.draw(selection),
        }
    }
}

/// Chooses the length, in bytes, of the next generated string.
#[derive(Clone, Copy, Debug)]
pub enum LengthChooser {
    Constant { size: u64 },
    Uniform { min: u64, max: u64 },
}

impl LengthChooser {
    pub fn constant(size: u64) -> Self {
        LengthChooser::Constant { size }
    }

    /// Build a `Uniform` chooser over `[min, max]`, rejecting an inverted
    /// range rather than letting it underflow later in [`Self::length`].
    pub fn uniform(min: u64, max: u64) -> Result<Self, ConfigError> {
        if min > max {
            return Err(ConfigError::InvalidLengthRange { lo: min, hi: max });
        }
        Ok(LengthChooser::Uniform { min, max })
    }

    /// The largest length this chooser can ever produce (used to size the
    /// scratch buffer).
    pub fn max(&self) -> u64 {
        match self {
            LengthChooser::Constant { size } => *size,
            LengthChooser::Uniform { max, .. } => *max,
        }
    }

    pub fn length(&self, content: &mut StreamRng) -> u64 {
        match self {
            LengthChooser::Constant { size } => *size,
            LengthChooser::Uniform { min, max } => {
                let d = content.generate_double();
                *min + (((*max - *min) as f64) * d) as u64
            }
        }
    }
}
