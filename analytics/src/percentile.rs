//! Streaming percentile estimation: when a series is too large to hold in
//! memory, an initial reservoir sample picks a candidate `[lower, upper)`
//! cutoff window, then repeated full passes narrow that window — each pass
//! re-buckets every point against the current cutoffs and either answers
//! the query outright or tightens the window for the next pass.

use benchlog_log::DataIterator;

use crate::error::AnalyticsError;
use crate::reservoir::{self, Sample};

const BUFFER_CAPACITY: usize = 1024;

/// Estimate the value at `percentile` (in `(0, 1]`) of `it`'s dependent
/// axis. Consumes the iterator, rewinding it between passes.
pub fn percentile(it: &mut dyn DataIterator, percentile: f64, seed: u64) -> Result<f64, AnalyticsError> {
    if !(percentile > 0.0 && percentile <= 1.0) {
        return Err(AnalyticsError::InvalidPercentile(percentile));
    }

    let Sample { mut points, n } = reservoir::sample(it, BUFFER_CAPACITY, seed)?;
    points.sort_by(|a, b| a.dep.as_f64().total_cmp(&b.dep.as_f64()));
    let k = points.len() as u64;

    if k == n {
        if n == 0 {
            return Ok(f64::NAN);
        }
        let which = ((n - 1) as f64 * percentile) as usize;
        return Ok(points[which].dep.as_f64());
    }

    let window = (BUFFER_CAPACITY as f64 * 0.25 * k as f64 / n as f64) as usize;
    let center = (k as f64 * percentile) as usize;
    let lower_cutoff_idx = center.saturating_sub(window);
    let upper_cutoff_idx = (center + 3 * window).min(k as usize);

    let mut lower_cutoff = f64::NEG_INFINITY;
    let mut upper_cutoff = f64::INFINITY;

    if lower_cutoff_idx > 0 && lower_cutoff_idx <= upper_cutoff_idx {
        lower_cutoff = points[lower_cutoff_idx].dep.as_f64();
    }
    if upper_cutoff_idx < k as usize && lower_cutoff_idx < upper_cutoff_idx {
        upper_cutoff = points[upper_cutoff_idx].dep.as_f64();
    } else if upper_cutoff_idx + 1 < k as usize && lower_cutoff_idx == upper_cutoff_idx {
        upper_cutoff = points[upper_cutoff_idx + 1].dep.as_f64();
    }

    let mut values = vec![0.0f64; BUFFER_CAPACITY];

    loop {
        it.rewind()?;
        assert!(lower_cutoff <= upper_cutoff, "cutoff window inverted");
        let mut lower_count = 0u64;
        let mut upper_count = 0u64;
        let mut idx = 0usize;

        while it.valid()? {
            if idx >= values.len() {
                values.sort_by(f64::total_cmp);
                if values[0] >= values[idx / 4] {
                    values.resize(values.len() * 2, 0.0);
                } else {
                    let first = values[..idx].partition_point(|&v| v <= lower_cutoff);
                    let cut = first + (idx - first) / 2;
                    upper_cutoff = values[cut];
                    upper_count += (idx - cut) as u64;
                    idx = cut;
                }
            }

            let v = it.read().dep.as_f64();
            it.advance();

            if v < lower_cutoff {
                lower_count += 1;
            } else if v > lower_cutoff && v >= upper_cutoff {
                upper_count += 1;
            } else {
                values[idx] = v;
                idx += 1;
            }
        }

        assert_eq!(idx as u64 + lower_count + upper_count, n, "every point must land in exactly one bucket");

        let which = ((n - 1) as f64 * percentile) as usize;
        let adj = window * 2;
        values[..idx].sort_by(f64::total_cmp);

        if (which as u64) < lower_count {
            if idx == 0 {
                values[0] = upper_cutoff;
                idx = 1;
            }
            lower_cutoff = f64::NEG_INFINITY;
            upper_cutoff = values[..idx].iter().cloned().fold(f64::INFINITY, f64::min);

            let mut i = 0usize;
            while i + adj < points.len() && points[i + adj].dep.as_f64() < upper_cutoff {
                lower_cutoff = points[i].dep.as_f64();
                i += 1;
            }
        } else if idx == 0 || which - lower_count as usize >= idx {
            lower_cutoff = upper_cutoff;
            upper_cutoff = f64::INFINITY;

            let mut i = 0usize;
            while i + adj < points.len() && points[points.len() - 1 - i - adj].dep.as_f64() > lower_cutoff {
                upper_cutoff = points[points.len() - 1 - i].dep.as_f64();
                i += 1;
            }
        } else {
            return Ok(values[which - lower_count as usize]);
        }
    }
}
