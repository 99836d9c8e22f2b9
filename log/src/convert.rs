//! Unit conversion: wraps any [`DataIterator`] and rescales its points to a
//! different, compatible pair of units, demoting precision when a unit
//! actually changes.

use crate::error::LogError;
use crate::schema::{DataPoint, Precision, SeriesSchema, Unit, Value};

/// Common interface over a cursor of a series' points: the writer's
/// [`crate::reader::SeriesIterator`] and [`ConversionIterator`] both
/// implement it, so analytics code can operate over either.
pub trait DataIterator {
    fn schema(&self) -> &SeriesSchema;
    fn valid(&mut self) -> Result<bool, LogError>;
    fn advance(&mut self);
    fn read(&self) -> DataPoint;
    fn rewind(&mut self) -> Result<(), LogError>;
}

impl DataIterator for crate::reader::SeriesIterator {
    fn schema(&self) -> &SeriesSchema {
        crate::reader::SeriesIterator::schema(self)
    }

    fn valid(&mut self) -> Result<bool, LogError> {
        crate::reader::SeriesIterator::valid(self)
    }

    fn advance(&mut self) {
        crate::reader::SeriesIterator::advance(self)
    }

    fn read(&self) -> DataPoint {
        crate::reader::SeriesIterator::read(self)
    }

    fn rewind(&mut self) -> Result<(), LogError> {
        crate::reader::SeriesIterator::rewind(self)
    }
}

struct ConversionRate {
    from: Unit,
    to: Unit,
    rate: f64,
}

const CONVERSION_RATES: &[ConversionRate] = &[
    ConversionRate { from: Unit::Seconds, to: Unit::Millis, rate: 1000.0 },
    ConversionRate { from: Unit::Seconds, to: Unit::Micros, rate: 1_000_000.0 },
    ConversionRate { from: Unit::Millis, to: Unit::Micros, rate: 1000.0 },
    ConversionRate { from: Unit::Micros, to: Unit::Seconds, rate: 0.000001 },
    ConversionRate { from: Unit::Micros, to: Unit::Millis, rate: 0.001 },
    ConversionRate { from: Unit::Millis, to: Unit::Seconds, rate: 0.001 },
    ConversionRate { from: Unit::Bytes, to: Unit::Kilobytes, rate: 0.001 },
    ConversionRate { from: Unit::Bytes, to: Unit::Megabytes, rate: 0.000001 },
    ConversionRate { from: Unit::Bytes, to: Unit::Gigabytes, rate: 0.000000001 },
    ConversionRate { from: Unit::Kilobytes, to: Unit::Megabytes, rate: 0.001 },
    ConversionRate { from: Unit::Kilobytes, to: Unit::Gigabytes, rate: 0.000001 },
    ConversionRate { from: Unit::Megabytes, to: Unit::Gigabytes, rate: 0.001 },
    ConversionRate { from: Unit::Gigabytes, to: Unit::Megabytes, rate: 1000.0 },
    ConversionRate { from: Unit::Gigabytes, to: Unit::Kilobytes, rate: 1_000_000.0 },
    ConversionRate { from: Unit::Gigabytes, to: Unit::Bytes, rate: 1_000_000_000.0 },
    ConversionRate { from: Unit::Megabytes, to: Unit::Kilobytes, rate: 1000.0 },
    ConversionRate { from: Unit::Megabytes, to: Unit::Bytes, rate: 1_000_000.0 },
    ConversionRate { from: Unit::Kilobytes, to: Unit::Bytes, rate: 1000.0 },
];

pub fn units_compatible(from: Unit, to: Unit) -> bool {
    from == to || CONVERSION_RATES.iter().any(|c| c.from == from && c.to == to)
}

pub fn units_conversion_ratio(from: Unit, to: Unit) -> f64 {
    CONVERSION_RATES
        .iter()
        .find(|c| c.from == from && c.to == to)
        .map(|c| c.rate)
        .unwrap_or(1.0)
}

/// Rescales an inner iterator's points to `new_indep_units`/`new_dep_units`.
pub struct ConversionIterator {
    inner: Box<dyn DataIterator>,
    schema: SeriesSchema,
    original_indep_precision: Precision,
    original_dep_precision: Precision,
    indep_scale: f64,
    dep_scale: f64,
}

impl ConversionIterator {
    pub fn new(inner: Box<dyn DataIterator>, new_indep_units: Unit, new_dep_units: Unit) -> Result<Self, LogError> {
        let original = inner.schema().clone();

        if !units_compatible(original.indep_units, new_indep_units) {
            return Err(LogError::IncompatibleUnits { from: original.indep_units, to: new_indep_units });
        }
        if !units_compatible(original.dep_units, new_dep_units) {
            return Err(LogError::IncompatibleUnits { from: original.dep_units, to: new_dep_units });
        }

        let mut schema = original.clone();
        if original.indep_units != new_indep_units {
            schema.indep_precision = schema.indep_precision.demote_on_unit_change();
        }
        schema.indep_units = new_indep_units;
        if original.dep_units != new_dep_units {
            schema.dep_precision = schema.dep_precision.demote_on_unit_change();
        }
        schema.dep_units = new_dep_units;

        let indep_scale = units_conversion_ratio(original.indep_units, new_indep_units);
        let dep_scale = units_conversion_ratio(original.dep_units, new_dep_units);

        Ok(ConversionIterator {
            inner,
            schema,
            original_indep_precision: original.indep_precision,
            original_dep_precision: original.dep_precision,
            indep_scale,
            dep_scale,
        })
    }

    fn convert_axis(new_precision: Precision, _original_precision: Precision, scale: f64, value: Value) -> Value {
        if new_precision.is_precise() {
            debug_assert!((scale - 1.0).abs() < 1e-4, "unit unchanged but scale is {scale}");
            value
        } else {
            Value::Approximate(value.as_f64() * scale)
        }
    }
}

impl DataIterator for ConversionIterator {
    fn schema(&self) -> &SeriesSchema {
        &self.schema
    }

    fn valid(&mut self) -> Result<bool, LogError> {
        self.inner.valid()
    }

    fn advance(&mut self) {
        self.inner.advance()
    }

    fn read(&self) -> DataPoint {
        let p = self.inner.read();
        DataPoint {
            indep: Self::convert_axis(self.schema.indep_precision, self.original_indep_precision, self.indep_scale, p.indep),
            dep: Self::convert_axis(self.schema.dep_precision, self.original_dep_precision, self.dep_scale, p.dep),
        }
    }

    fn rewind(&mut self) -> Result<(), LogError> {
        self.inner.rewind()
    }
}
