//! Log file writer: a shared header plus, per series, a double-buffered
//! writer that batches points and flushes them as one length-prefixed
//! block.
//!
//! The locking discipline mirrors a single-writer-per-file, many-series
//! design: each series has its own points buffer (`points` mutex) and its
//! own flush-ordering lock (`io` mutex), while the underlying file handle is
//! shared behind one `output` mutex so that two series flushing at once
//! never interleave their bytes.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

use benchlog_codec::fixed;
use log::{debug, trace, warn};

use crate::error::LogError;
use crate::pack::{indep_less, pack_point};
use crate::schema::{DataPoint, SeriesHandle, SeriesSchema};

/// Points accumulated per flush before a series writer is considered full.
pub const SERIES_BUFFER_CAPACITY: usize = 1024;

struct SeriesWriter {
    ordinal: u64,
    schema: SeriesSchema,
    points: Mutex<Vec<DataPoint>>,
    io: Mutex<()>,
    output: Arc<Mutex<BufWriter<File>>>,
    /// The first I/O error seen by a background `record`-triggered flush.
    /// `record` absorbs write failures so callers can keep buffering; this
    /// is surfaced authoritatively by `flush_and_close`.
    error: Mutex<Option<LogError>>,
}

impl SeriesWriter {
    fn record(&self, point: DataPoint) -> Result<(), LogError> {
        let mut points = self.points.lock().unwrap();
        points.push(point);

        if points.len() < SERIES_BUFFER_CAPACITY {
            return Ok(());
        }

        let _io = self.io.lock().unwrap();
        let batch = std::mem::replace(&mut *points, Vec::with_capacity(SERIES_BUFFER_CAPACITY));
        drop(points);
        trace!("series {:?} buffer full, flushing {} points", self.schema.name, batch.len());
        if let Err(e) = self.write(batch) {
            warn!("background flush failed for series {:?}: {e}", self.schema.name);
            let mut error = self.error.lock().unwrap();
            if error.is_none() {
                *error = Some(e);
            }
        }
        Ok(())
    }

    fn flush(&self) -> Result<(), LogError> {
        let mut points = self.points.lock().unwrap();
        let _io = self.io.lock().unwrap();
        let batch = std::mem::take(&mut *points);
        self.write(batch)
    }

    /// The first error captured by a background flush from `record`, if any.
    fn captured_error(&self) -> Option<LogError> {
        self.error.lock().unwrap().take()
    }

    fn write(&self, mut batch: Vec<DataPoint>) -> Result<(), LogError> {
        if batch.is_empty() {
            return Ok(());
        }

        batch.sort_by(|a, b| indep_less(self.schema.indep_precision, a, b));

        let mut body = Vec::new();
        let mut ordinal_buf = Vec::new();
        benchlog_codec::varint::encode(self.ordinal, &mut ordinal_buf);
        body.write_all(&ordinal_buf)?;

        let mut prev: Option<DataPoint> = None;
        for point in &batch {
            pack_point(
                self.schema.indep_precision,
                self.schema.dep_precision,
                prev.as_ref(),
                point,
                &mut body,
            )?;
            prev = Some(*point);
        }

        let mut output = self.output.lock().unwrap();
        fixed::write_u64_be(&mut *output, body.len() as u64)?;
        output.write_all(&body)?;
        Ok(())
    }
}

/// Writes a single binary log file: a schema header followed by a stream of
/// length-prefixed blocks, one per flushed series batch.
pub struct LogWriter {
    output: Arc<Mutex<BufWriter<File>>>,
    writers: Vec<SeriesWriter>,
}

impl LogWriter {
    /// Create a new log file at `path`, writing the header for `schemas`
    /// immediately. Series names must be unique and at most 64 bytes.
    pub fn create(path: impl AsRef<Path>, schemas: Vec<SeriesSchema>) -> Result<Self, LogError> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);

        for (i, schema) in schemas.iter().enumerate() {
            if schemas[..i].iter().any(|s| s.name == schema.name) {
                return Err(LogError::DuplicateSeriesName(schema.name.clone()));
            }
            if schema.name.len() > 64 {
                return Err(LogError::SeriesNameTooLong(schema.name.clone()));
            }
            writer.write_all(schema.name.as_bytes())?;
            writer.write_all(&[0u8])?;
            writer.write_all(&[
                schema.indep_units.to_byte(),
                schema.indep_precision.to_byte(),
                schema.dep_units.to_byte(),
                schema.dep_precision.to_byte(),
            ])?;
        }
        writer.write_all(&[0u8])?;
        writer.flush()?;

        debug!("opened log file with {} series", schemas.len());

        let output = Arc::new(Mutex::new(writer));
        let writers = schemas
            .into_iter()
            .enumerate()
            .map(|(ordinal, schema)| SeriesWriter {
                ordinal: ordinal as u64,
                schema,
                points: Mutex::new(Vec::with_capacity(SERIES_BUFFER_CAPACITY)),
                io: Mutex::new(()),
                output: output.clone(),
                error: Mutex::new(None),
            })
            .collect();

        Ok(LogWriter { output, writers })
    }

    /// Look up the handle for a series registered at creation time.
    pub fn handle(&self, name: &str) -> Option<SeriesHandle> {
        self.writers
            .iter()
            .position(|w| w.schema.name == name)
            .map(SeriesHandle)
    }

    pub fn schema(&self, handle: SeriesHandle) -> &SeriesSchema {
        &self.writers[handle.0].schema
    }

    /// Record one point for `handle`, flushing its series buffer to disk
    /// once it fills.
    pub fn record(&self, handle: SeriesHandle, point: DataPoint) -> Result<(), LogError> {
        self.writers[handle.0].record(point)
    }

    /// Flush every series' buffered points, then close the file. Returns
    /// the first error seen, whether captured from an earlier background
    /// flush triggered by `record` or raised by this final flush; that
    /// return is authoritative even though individual `record` calls may
    /// have reported success along the way.
    pub fn flush_and_close(self) -> Result<(), LogError> {
        let mut first_error = None;

        for writer in &self.writers {
            if let Some(e) = writer.captured_error() {
                warn!("series {:?} had a prior background write failure: {e}", writer.schema.name);
                first_error.get_or_insert(e);
            }
            if let Err(e) = writer.flush() {
                warn!("error flushing series {:?} on close: {e}", writer.schema.name);
                first_error.get_or_insert(e);
            }
        }

        self.output.lock().unwrap().flush()?;

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Precision, Unit, Value};
    use tempfile::NamedTempFile;

    #[test]
    fn rejects_duplicate_series_names() {
        let file = NamedTempFile::new().unwrap();
        let schemas = vec![
            SeriesSchema::new("a", Unit::Seconds, Precision::PreciseInteger, Unit::Unit, Precision::Double),
            SeriesSchema::new("a", Unit::Seconds, Precision::PreciseInteger, Unit::Unit, Precision::Double),
        ];
        let err = LogWriter::create(file.path(), schemas).unwrap_err();
        assert!(matches!(err, LogError::DuplicateSeriesName(_)));
    }

    #[test]
    fn rejects_oversized_series_names() {
        let file = NamedTempFile::new().unwrap();
        let name = "x".repeat(65);
        let schemas = vec![SeriesSchema::new(
            name,
            Unit::Seconds,
            Precision::PreciseInteger,
            Unit::Unit,
            Precision::Double,
        )];
        let err = LogWriter::create(file.path(), schemas).unwrap_err();
        assert!(matches!(err, LogError::SeriesNameTooLong(_)));
    }

    #[test]
    fn records_and_flushes_without_error() {
        let file = NamedTempFile::new().unwrap();
        let schemas = vec![SeriesSchema::new(
            "latency",
            Unit::Monotonic,
            Precision::PreciseInteger,
            Unit::Millis,
            Precision::Double,
        )];
        let writer = LogWriter::create(file.path(), schemas).unwrap();
        let handle = writer.handle("latency").unwrap();
        for i in 0..10 {
            writer
                .record(handle, DataPoint { indep: Value::Precise(i), dep: Value::Approximate(i as f64 * 1.5) })
                .unwrap();
        }
        writer.flush_and_close().unwrap();

        let written = std::fs::metadata(file.path()).unwrap().len();
        assert!(written > 0);
    }

    #[test]
    fn background_flush_failures_are_captured_and_surfaced_later() {
        let file = NamedTempFile::new().unwrap();
        // Opened read-only, so the background flush triggered inside
        // record() fails every time it tries to write.
        let read_only = File::open(file.path()).unwrap();
        let writer = SeriesWriter {
            ordinal: 0,
            schema: SeriesSchema::new("s", Unit::Monotonic, Precision::PreciseInteger, Unit::Unit, Precision::PreciseInteger),
            points: Mutex::new(Vec::new()),
            io: Mutex::new(()),
            output: Arc::new(Mutex::new(BufWriter::new(read_only))),
            error: Mutex::new(None),
        };

        for i in 0..SERIES_BUFFER_CAPACITY as u64 {
            let result = writer.record(DataPoint { indep: Value::Precise(i), dep: Value::Precise(i) });
            assert!(result.is_ok(), "record() must absorb a background write failure, not propagate it");
        }

        assert!(writer.captured_error().is_some());
    }
}
