//! Dense, zero-filled time-series bucketing of a series' independent axis.

use benchlog_log::{DataIterator, Value};

use crate::error::AnalyticsError;

fn indep_u64(v: Value) -> u64 {
    match v {
        Value::Precise(x) => x,
        Value::Approximate(x) => x as u64,
    }
}

/// One bucket: `count` points fell in `[offset, offset + step)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeseriesPoint {
    pub offset: u64,
    pub count: u64,
}

/// Bucket `it`'s independent axis into `step`-wide windows, filling every
/// bucket between the first and last observed value even if no point fell
/// in it.
pub fn timeseries(it: &mut dyn DataIterator, step: u64) -> Result<Vec<TimeseriesPoint>, AnalyticsError> {
    let mut seen: Vec<(u64, u64)> = Vec::new();

    while it.valid()? {
        let point = it.read();
        it.advance();
        let value = indep_u64(point.indep);
        let bucket = (value / step) * step;

        match seen.iter_mut().rev().find(|(offset, _)| *offset == bucket) {
            Some((_, count)) => *count += 1,
            None => seen.push((bucket, 1)),
        }
    }

    if seen.is_empty() {
        return Ok(Vec::new());
    }

    seen.sort_by_key(|(offset, _)| *offset);
    let base = seen.first().unwrap().0;
    let last = seen.last().unwrap().0;
    let num_points = (last - base) / step + 1;

    let mut out = vec![TimeseriesPoint { offset: 0, count: 0 }; num_points as usize];
    for (i, bucket) in out.iter_mut().enumerate() {
        bucket.offset = base + i as u64 * step;
    }
    for (offset, count) in seen {
        let idx = ((offset - base) / step) as usize;
        out[idx].count = count;
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use benchlog_log::{DataPoint, LogWriter, Precision, SeriesSchema, Unit, Value};
    use tempfile::NamedTempFile;

    #[test]
    fn fills_gaps_with_zero_counts() {
        let file = NamedTempFile::new().unwrap();
        let schema = SeriesSchema::new("s", Unit::Monotonic, Precision::PreciseInteger, Unit::Unit, Precision::PreciseInteger);
        let writer = LogWriter::create(file.path(), vec![schema]).unwrap();
        let handle = writer.handle("s").unwrap();
        for i in [0u64, 0, 20] {
            writer.record(handle, DataPoint { indep: Value::Precise(i), dep: Value::Precise(1) }).unwrap();
        }
        writer.flush_and_close().unwrap();

        let reader = benchlog_log::LogReader::open(file.path()).unwrap();
        let mut it = reader.iterate("s").unwrap();
        let buckets = timeseries(&mut it, 10).unwrap();
        assert_eq!(buckets.len(), 3);
        assert_eq!(buckets[0].count, 2);
        assert_eq!(buckets[1].count, 0);
        assert_eq!(buckets[2].count, 1);
    }

    #[test]
    fn empty_series_yields_empty_timeseries() {
        let file = NamedTempFile::new().unwrap();
        let schema = SeriesSchema::new("s", Unit::Monotonic, Precision::PreciseInteger, Unit::Unit, Precision::PreciseInteger);
        let writer = LogWriter::create(file.path(), vec![schema]).unwrap();
        writer.flush_and_close().unwrap();

        let reader = benchlog_log::LogReader::open(file.path()).unwrap();
        let mut it = reader.iterate("s").unwrap();
        assert!(timeseries(&mut it, 10).unwrap().is_empty());
    }
}
