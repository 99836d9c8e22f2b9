//! Reservoir sampling (Algorithm R) over a series' points, seeded from a
//! stable hash of the series' identity rather than a pointer address — the
//! iterator itself has no stable address in safe Rust, and reusing a raw
//! pointer would also make the sample depend on allocator behavior rather
//! than which series is being sampled.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use benchlog_log::{DataIterator, DataPoint};
use benchlog_prng::StreamRng;

use crate::error::AnalyticsError;

/// A deterministic seed derived from a series' name, for callers that want
/// reproducible sampling without tracking their own seed.
pub fn stable_seed(series_name: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    series_name.hash(&mut hasher);
    hasher.finish()
}

/// The result of sampling up to `capacity` points from a series: the sample
/// itself (`k <= capacity` points, `k == n` if the series has at most
/// `capacity` points) and `n`, the total number of points seen.
pub struct Sample {
    pub points: Vec<DataPoint>,
    pub n: u64,
}

/// Draw a reservoir sample of up to `capacity` points from `it`, consuming
/// it to end of stream.
pub fn sample(it: &mut dyn DataIterator, capacity: usize, seed: u64) -> Result<Sample, AnalyticsError> {
    let mut rng = StreamRng::new(seed);
    let mut points = Vec::with_capacity(capacity);
    let mut n = 0u64;

    while it.valid()? {
        let point = it.read();
        it.advance();

        if points.len() < capacity {
            points.push(point);
        } else {
            let idx = (rng.generate_double() * n as f64) as usize;
            if idx < capacity {
                points[idx] = point;
            }
        }

        n += 1;
    }

    Ok(Sample { points, n })
}
