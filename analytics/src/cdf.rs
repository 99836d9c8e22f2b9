//! Cumulative distribution function: buckets a series' dependent values
//! into `step`-wide thresholds and reports the running percentage of
//! points at or below each one.

use benchlog_log::DataIterator;

use crate::error::AnalyticsError;

/// One bucket of a computed CDF: `percentage` is the share of all points
/// (0..=100) whose dependent value is `<= threshold`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CdfPoint {
    pub threshold: u64,
    pub percentage: f64,
}

/// Compute the CDF of `it`'s dependent axis, growing buckets `step` apart
/// from zero. Returns an empty vector if the series has no points.
pub fn cdf(it: &mut dyn DataIterator, step: u64) -> Result<Vec<CdfPoint>, AnalyticsError> {
    let mut thresholds = vec![0u64];
    let mut counts = vec![0u64];
    let mut num_points = 0u64;

    while it.valid()? {
        let point = it.read();
        it.advance();
        let value = point.dep.as_f64();
        let mut idx = 0;

        while (thresholds[idx] as f64) < value {
            if idx + 1 == thresholds.len() {
                thresholds.push(thresholds[idx] + step);
                counts.push(0);
            }
            idx += 1;
        }

        counts[idx] += 1;
        num_points += 1;
    }

    if num_points == 0 {
        return Ok(Vec::new());
    }

    let mut running = 0u64;
    let mut out = Vec::with_capacity(thresholds.len());
    for (threshold, count) in thresholds.into_iter().zip(counts) {
        running += count;
        out.push(CdfPoint {
            threshold,
            percentage: 100.0 * running as f64 / num_points as f64,
        });
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use benchlog_log::{DataPoint, LogWriter, Precision, SeriesSchema, Unit, Value};
    use tempfile::NamedTempFile;

    #[test]
    fn cdf_is_monotonically_nondecreasing_and_ends_at_100() {
        let file = NamedTempFile::new().unwrap();
        let schema = SeriesSchema::new("s", Unit::Monotonic, Precision::PreciseInteger, Unit::Unit, Precision::PreciseInteger);
        let writer = LogWriter::create(file.path(), vec![schema]).unwrap();
        let handle = writer.handle("s").unwrap();
        for (i, dep) in [1u64, 5, 2, 9, 5, 3].into_iter().enumerate() {
            writer.record(handle, DataPoint { indep: Value::Precise(i as u64), dep: Value::Precise(dep) }).unwrap();
        }
        writer.flush_and_close().unwrap();

        let reader = benchlog_log::LogReader::open(file.path()).unwrap();
        let mut it = reader.iterate("s").unwrap();
        let points = cdf(&mut it, 1).unwrap();
        assert!(!points.is_empty());
        for w in points.windows(2) {
            assert!(w[1].percentage >= w[0].percentage);
        }
        assert!((points.last().unwrap().percentage - 100.0).abs() < 1e-9);
    }

    #[test]
    fn empty_series_yields_empty_cdf() {
        let file = NamedTempFile::new().unwrap();
        let schema = SeriesSchema::new("s", Unit::Monotonic, Precision::PreciseInteger, Unit::Unit, Precision::PreciseInteger);
        let writer = LogWriter::create(file.path(), vec![schema]).unwrap();
        writer.flush_and_close().unwrap();

        let reader = benchlog_log::LogReader::open(file.path()).unwrap();
        let mut it = reader.iterate("s").unwrap();
        assert!(cdf(&mut it, 1).unwrap().is_empty());
    }
}
