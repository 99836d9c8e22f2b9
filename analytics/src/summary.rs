//! Welford's online algorithm for mean and variance: a single pass keeps a
//! running mean and sum-of-squared-deviations, avoiding the cancellation
//! error of naive two-pass variance.

use benchlog_log::DataIterator;

use crate::error::AnalyticsError;

/// Summary statistics of a series' dependent axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Summary {
    pub count: u64,
    pub mean: f64,
    pub variance: f64,
}

impl Summary {
    pub fn stddev(&self) -> f64 {
        self.variance.sqrt()
    }
}

/// Compute the mean and (sample) variance of `it`'s dependent axis in one
/// pass.
pub fn summarize(it: &mut dyn DataIterator) -> Result<Summary, AnalyticsError> {
    let mut count = 0u64;
    let mut mean = 0.0f64;
    let mut m2 = 0.0f64;

    while it.valid()? {
        let value = it.read().dep.as_f64();
        it.advance();
        count += 1;
        let delta = value - mean;
        mean += delta / count as f64;
        let delta2 = value - mean;
        m2 += delta * delta2;
    }

    let variance = if count > 1 { m2 / (count - 1) as f64 } else { 0.0 };
    Ok(Summary { count, mean, variance })
}

#[cfg(test)]
mod tests {
    use super::*;
    use benchlog_log::{DataPoint, LogReader, LogWriter, Precision, SeriesSchema, Unit, Value};
    use tempfile::NamedTempFile;

    #[test]
    fn matches_known_mean_and_variance() {
        let file = NamedTempFile::new().unwrap();
        let schema = SeriesSchema::new("s", Unit::Monotonic, Precision::PreciseInteger, Unit::Unit, Precision::Double);
        let writer = LogWriter::create(file.path(), vec![schema]).unwrap();
        let handle = writer.handle("s").unwrap();
        for (i, v) in [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0].into_iter().enumerate() {
            writer.record(handle, DataPoint { indep: Value::Precise(i as u64), dep: Value::Approximate(v) }).unwrap();
        }
        writer.flush_and_close().unwrap();

        let reader = LogReader::open(file.path()).unwrap();
        let mut it = reader.iterate("s").unwrap();
        let summary = summarize(&mut it).unwrap();
        assert_eq!(summary.count, 8);
        assert!((summary.mean - 5.0).abs() < 1e-9);
        assert!((summary.variance - 4.571428571428571).abs() < 1e-9);
    }

    #[test]
    fn single_point_has_zero_variance() {
        let file = NamedTempFile::new().unwrap();
        let schema = SeriesSchema::new("s", Unit::Monotonic, Precision::PreciseInteger, Unit::Unit, Precision::Double);
        let writer = LogWriter::create(file.path(), vec![schema]).unwrap();
        let handle = writer.handle("s").unwrap();
        writer.record(handle, DataPoint { indep: Value::Precise(0), dep: Value::Approximate(3.0) }).unwrap();
        writer.flush_and_close().unwrap();

        let reader = LogReader::open(file.path()).unwrap();
        let mut it = reader.iterate("s").unwrap();
        let summary = summarize(&mut it).unwrap();
        assert_eq!(summary.count, 1);
        assert_eq!(summary.variance, 0.0);
    }
}
