//! Series schema: the unit and precision metadata recorded once per series
//! in a log file's header, plus the value/point types carried at runtime.

use crate::error::LogError;

/// The unit a series' independent or dependent axis is measured in.
///
/// Byte values match the header encoding exactly, so `as u8` / [`Unit::from_byte`]
/// round-trip through a log file unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Unit {
    Seconds = 1,
    Millis = 2,
    Micros = 3,
    Bytes = 9,
    Kilobytes = 10,
    Megabytes = 11,
    Gigabytes = 12,
    Monotonic = 254,
    Unit = 255,
}

impl Unit {
    pub fn from_byte(b: u8) -> Result<Self, LogError> {
        Ok(match b {
            1 => Unit::Seconds,
            2 => Unit::Millis,
            3 => Unit::Micros,
            9 => Unit::Bytes,
            10 => Unit::Kilobytes,
            11 => Unit::Megabytes,
            12 => Unit::Gigabytes,
            254 => Unit::Monotonic,
            255 => Unit::Unit,
            other => return Err(LogError::UnknownUnit(other)),
        })
    }

    pub fn to_byte(self) -> u8 {
        self as u8
    }
}

/// The precision a series' independent or dependent axis is stored at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Precision {
    /// An exact `u64`, stored as a varint (delta-encoded when used as the
    /// independent axis).
    PreciseInteger = 1,
    /// A 16-bit branch-free half float.
    Half = 2,
    /// A big-endian `f32`.
    Single = 3,
    /// A big-endian `f64`.
    Double = 4,
}

impl Precision {
    pub fn from_byte(b: u8) -> Result<Self, LogError> {
        Ok(match b {
            1 => Precision::PreciseInteger,
            2 => Precision::Half,
            3 => Precision::Single,
            4 => Precision::Double,
            other => return Err(LogError::UnknownPrecision(other)),
        })
    }

    pub fn to_byte(self) -> u8 {
        self as u8
    }

    pub fn is_precise(self) -> bool {
        matches!(self, Precision::PreciseInteger)
    }

    /// The precision a value is demoted to when its unit changes: exact
    /// integers demote to doubles, doubles stay doubles, singles stay
    /// singles, and halves (or anything else) stay halves. Conversion
    /// never widens precision, only narrows or holds it.
    pub fn demote_on_unit_change(self) -> Precision {
        match self {
            Precision::PreciseInteger | Precision::Double => Precision::Double,
            Precision::Single => Precision::Single,
            Precision::Half => Precision::Half,
        }
    }
}

/// One series' schema: its name and the unit/precision of each axis.
#[derive(Clone, Debug, PartialEq)]
pub struct SeriesSchema {
    pub name: String,
    pub indep_units: Unit,
    pub indep_precision: Precision,
    pub dep_units: Unit,
    pub dep_precision: Precision,
}

impl SeriesSchema {
    pub fn new(
        name: impl Into<String>,
        indep_units: Unit,
        indep_precision: Precision,
        dep_units: Unit,
        dep_precision: Precision,
    ) -> Self {
        SeriesSchema {
            name: name.into(),
            indep_units,
            indep_precision,
            dep_units,
            dep_precision,
        }
    }
}

/// A single axis value, tagged by which precision produced it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Value {
    Precise(u64),
    Approximate(f64),
}

impl Value {
    pub fn as_f64(self) -> f64 {
        match self {
            Value::Precise(v) => v as f64,
            Value::Approximate(v) => v,
        }
    }
}

/// One recorded (independent, dependent) measurement pair.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DataPoint {
    pub indep: Value,
    pub dep: Value,
}

/// A handle to a series registered with a [`crate::writer::LogWriter`],
/// opaque outside this crate beyond its ordinal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SeriesHandle(pub(crate) usize);
