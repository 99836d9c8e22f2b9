//! Log file reader: parses the schema header, then hands out one
//! independent, seekable iterator per series.

use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use benchlog_codec::fixed;
use log::{debug, warn};

use crate::error::LogError;
use crate::pack::unpack_point;
use crate::schema::{DataPoint, Precision, SeriesSchema, Unit};

/// A parsed log file header: the path it came from, the byte offset where
/// point data begins, and each series' schema in header order (its index
/// doubles as its on-disk ordinal).
pub struct LogReader {
    path: PathBuf,
    data_offset: u64,
    schemas: Vec<SeriesSchema>,
}

impl LogReader {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, LogError> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path)?;
        let mut reader = BufReader::new(file);
        let mut schemas = Vec::new();

        loop {
            let mut name = Vec::new();
            loop {
                let mut byte = [0u8; 1];
                reader.read_exact(&mut byte)?;
                if byte[0] == 0 {
                    break;
                }
                name.push(byte[0]);
            }

            if name.is_empty() {
                break;
            }

            let mut meta = [0u8; 4];
            reader.read_exact(&mut meta)?;
            schemas.push(SeriesSchema::new(
                String::from_utf8(name).map_err(|_| LogError::Malformed("series name is not valid utf-8".into()))?,
                Unit::from_byte(meta[0])?,
                Precision::from_byte(meta[1])?,
                Unit::from_byte(meta[2])?,
                Precision::from_byte(meta[3])?,
            ));
        }

        let data_offset = reader.stream_position()?;
        debug!("parsed header with {} series, data begins at {data_offset}", schemas.len());

        Ok(LogReader { path, data_offset, schemas })
    }

    pub fn series(&self) -> &[SeriesSchema] {
        &self.schemas
    }

    pub fn series_named(&self, name: &str) -> Option<&SeriesSchema> {
        self.schemas.iter().find(|s| s.name == name)
    }

    /// Open an independent, seekable iterator over `name`'s points.
    pub fn iterate(&self, name: &str) -> Result<SeriesIterator, LogError> {
        let ordinal = self
            .schemas
            .iter()
            .position(|s| s.name == name)
            .ok_or_else(|| LogError::SeriesNotFound(name.to_string()))?;
        SeriesIterator::open(&self.path, ordinal as u64, self.schemas[ordinal].clone(), self.data_offset)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum State {
    Fresh,
    Primed,
    Eof,
    Errored,
}

/// A cursor over one series' points, independent of any other iterator over
/// the same file. Decodes one block at a time, skipping blocks that belong
/// to other series, and can be rewound to the start of the data section.
pub struct SeriesIterator {
    file: BufReader<File>,
    ordinal: u64,
    schema: SeriesSchema,
    data_offset: u64,
    data: Vec<DataPoint>,
    data_idx: usize,
    state: State,
}

impl SeriesIterator {
    fn open(path: &Path, ordinal: u64, schema: SeriesSchema, data_offset: u64) -> Result<Self, LogError> {
        let mut file = BufReader::new(File::open(path)?);
        file.seek(SeekFrom::Start(data_offset))?;
        Ok(SeriesIterator {
            file,
            ordinal,
            schema,
            data_offset,
            data: Vec::new(),
            data_idx: 0,
            state: State::Fresh,
        })
    }

    pub fn schema(&self) -> &SeriesSchema {
        &self.schema
    }

    /// `Ok(true)` if a point is ready to [`read`](Self::read), `Ok(false)`
    /// at end of file.
    pub fn valid(&mut self) -> Result<bool, LogError> {
        if self.state == State::Errored {
            return Err(LogError::Malformed("iterator is in an error state".into()));
        }
        if self.state == State::Primed {
            return Ok(true);
        }
        if self.data_idx < self.data.len() {
            self.state = State::Primed;
            return Ok(true);
        }

        loop {
            self.data.clear();
            self.data_idx = 0;

            let block_len = match fixed::read_u64_be(&mut self.file) {
                Ok(n) => n,
                Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                    self.state = State::Eof;
                    return Ok(false);
                }
                Err(e) => {
                    warn!("error reading block length for series {}: {e}", self.ordinal);
                    self.state = State::Errored;
                    return Err(e.into());
                }
            };

            let remaining = self.file.get_ref().metadata()?.len().saturating_sub(self.file.stream_position()?);
            if block_len > remaining {
                warn!(
                    "skipping block for series {} with implausible length {block_len} ({remaining} bytes remain)",
                    self.ordinal
                );
                self.state = State::Errored;
                return Err(LogError::Malformed(format!(
                    "block length {block_len} exceeds {remaining} remaining bytes in file"
                )));
            }

            let mut block = vec![0u8; block_len as usize];
            if let Err(e) = self.file.read_exact(&mut block) {
                warn!("error reading block body for series {}: {e}", self.ordinal);
                self.state = State::Errored;
                return Err(e.into());
            }

            let mut cursor = &block[..];
            let series = read_varint(&mut cursor)?;

            if series != self.ordinal {
                warn!("skipping block for series {series}, expected {}", self.ordinal);
                continue;
            }

            let mut prev: Option<DataPoint> = None;
            while !cursor.is_empty() {
                let point = unpack_point(self.schema.indep_precision, self.schema.dep_precision, prev.as_ref(), &mut cursor)?;
                self.data.push(point);
                prev = Some(point);
            }

            if !self.data.is_empty() {
                self.state = State::Primed;
                return Ok(true);
            }
        }
    }

    pub fn advance(&mut self) {
        self.data_idx += 1;
        self.state = State::Fresh;
    }

    pub fn read(&self) -> DataPoint {
        self.data[self.data_idx]
    }

    /// Seek back to the start of the data section, discarding any buffered
    /// points.
    pub fn rewind(&mut self) -> Result<(), LogError> {
        self.data.clear();
        self.data_idx = 0;
        self.state = State::Fresh;
        self.file.seek(SeekFrom::Start(self.data_offset))?;
        Ok(())
    }
}

fn read_varint<R: Read>(input: &mut R) -> Result<u64, LogError> {
    let mut value: u64 = 0;
    let mut shift = 0u32;
    loop {
        let mut byte = [0u8; 1];
        input.read_exact(&mut byte)?;
        value |= ((byte[0] & 0x7f) as u64) << shift;
        if byte[0] & 0x80 == 0 {
            return Ok(value);
        }
        shift += 7;
    }
}
