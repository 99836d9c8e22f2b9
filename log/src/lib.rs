//! An append-only, multi-series measurement log: a compact binary writer
//! and reader pair with delta-encoded integer timestamps, half/single/double
//! float storage, and unit-converting iterators.

pub mod convert;
pub mod error;
pub mod pack;
pub mod reader;
pub mod schema;
pub mod writer;

pub use convert::{units_compatible, units_conversion_ratio, ConversionIterator, DataIterator};
pub use error::LogError;
pub use reader::{LogReader, SeriesIterator};
pub use schema::{DataPoint, Precision, SeriesHandle, SeriesSchema, Unit, Value};
pub use writer::LogWriter;
