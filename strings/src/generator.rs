//! Deterministic random string generation: composes a [`StringChooser`] and
//! a [`LengthChooser`] over two [`StreamRng`] instances to emit strings over
//! a configured [`Alphabet`].

use benchlog_prng::StreamRng;

use crate::alphabet::Alphabet;
use crate::chooser::{LengthChooser, StringChooser};

/// Rounds `length` up to the next multiple of 4 — content bytes are drawn in
/// 4-byte groups the way the reference implementation does, purely so the
/// fill loop can be unrolled; the result is truncated back to `length`.
fn round_up4(length: u64) -> u64 {
    (length + 3) & !3
}

/// A configured string generator.
///
/// Two [`StreamRng`] instances are involved: `selection` draws the
/// set-chooser's seed (when one is configured), and `content` is seeded from
/// that value and draws the length and raw bytes. When no chooser is
/// configured (`choose_default`), `content` is never reseeded by `generate`
/// and free-runs continuously across calls, so repeated calls never repeat
/// the same keystream.
pub struct Generator {
    alphabet: Alphabet,
    chooser: Option<StringChooser>,
    lengths: LengthChooser,
    selection: StreamRng,
    content: StreamRng,
    buffer: Vec<u8>,
}

impl Generator {
    pub fn new(alphabet: Alphabet, chooser: Option<StringChooser>, lengths: LengthChooser) -> Self {
        let max_len = round_up4(lengths.max()) as usize;
        Generator {
            alphabet,
            chooser,
            lengths,
            selection: StreamRng::new(0),
            content: StreamRng::new(0),
            buffer: vec![0u8; max_len],
        }
    }

    /// Reseed the selection (set-chooser) stream. Per the mandated
    /// reseeding semantics, this never directly reseeds the content stream:
    /// in `choose_default` mode (no chooser configured) the content stream
    /// keeps running untouched, so `seed` has no externally observable
    /// effect on that configuration.
    pub fn seed(&mut self, seed: u64) {
        self.selection.seed(seed);
    }

    /// Produce the next string, or `None` once a `fixed_once` chooser is
    /// exhausted.
    pub fn generate(&mut self) -> Option<&[u8]> {
        if let Some(chooser) = self.chooser.as_mut() {
            if chooser.done() {
                return None;
            }
            let seed = chooser.seed(&mut self.selection);
            self.content.seed(seed);
        }

        let length = self.lengths.length(&mut self.content) as usize;
        let rounded = round_up4(length as u64) as usize;
        if self.buffer.len() < rounded {
            self.buffer.resize(rounded, 0);
        }
        self.content.generate_bytes(&mut self.buffer[..rounded]);
        for byte in self.buffer[..rounded].iter_mut() {
            *byte = self.alphabet.project(*byte);
        }
        Some(&self.buffer[..length])
    }
}
