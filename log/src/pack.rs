//! Per-point packing and unpacking, dispatched on a series' axis
//! precisions. The independent axis delta-encodes against the previous
//! point in the same block when it is [`Precision::PreciseInteger`];
//! every other combination packs each point's absolute value.

use std::io::{self, Read, Write};

use benchlog_codec::{fixed, halffloat, varint};

use crate::schema::{DataPoint, Precision, Value};

fn pack_value<W: Write>(precision: Precision, value: Value, out: &mut W) -> io::Result<()> {
    match precision {
        Precision::PreciseInteger => {
            let v = match value {
                Value::Precise(v) => v,
                Value::Approximate(v) => v as u64,
            };
            let mut buf = Vec::new();
            varint::encode(v, &mut buf);
            out.write_all(&buf)
        }
        Precision::Half => {
            let h = halffloat::compress(value.as_f64() as f32);
            fixed::write_u16_be(out, h)
        }
        Precision::Single => fixed::write_f32_be(out, value.as_f64() as f32),
        Precision::Double => fixed::write_f64_be(out, value.as_f64()),
    }
}

fn unpack_value<R: Read>(precision: Precision, input: &mut R) -> io::Result<Value> {
    Ok(match precision {
        Precision::PreciseInteger => Value::Precise(read_varint(input)?),
        Precision::Half => Value::Approximate(halffloat::decompress(fixed::read_u16_be(input)?) as f64),
        Precision::Single => Value::Approximate(fixed::read_f32_be(input)? as f64),
        Precision::Double => Value::Approximate(fixed::read_f64_be(input)?),
    })
}

/// Varints aren't fixed-width, so they're read one byte at a time rather
/// than through [`benchlog_codec::varint::decode`], which wants the whole
/// encoding up front.
fn read_varint<R: Read>(input: &mut R) -> io::Result<u64> {
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

fn indep_as_u64(value: Value) -> u64 {
    match value {
        Value::Precise(v) => v,
        Value::Approximate(v) => v as u64,
    }
}

/// Pack one point, given the previous point packed into the same block (if
/// any), into `out`.
pub fn pack_point<W: Write>(
    indep_precision: Precision,
    dep_precision: Precision,
    prev: Option<&DataPoint>,
    point: &DataPoint,
    out: &mut W,
) -> io::Result<()> {
    if indep_precision == Precision::PreciseInteger {
        let value = indep_as_u64(point.indep);
        let delta = match prev {
            Some(p) => value - indep_as_u64(p.indep),
            None => value,
        };
        let mut buf = Vec::new();
        varint::encode(delta, &mut buf);
        out.write_all(&buf)?;
    } else {
        pack_value(indep_precision, point.indep, out)?;
    }

    pack_value(dep_precision, point.dep, out)
}

/// Unpack one point from `input`.
pub fn unpack_point<R: Read>(
    indep_precision: Precision,
    dep_precision: Precision,
    prev: Option<&DataPoint>,
    input: &mut R,
) -> io::Result<DataPoint> {
    let indep = if indep_precision == Precision::PreciseInteger {
        let delta = read_varint(input)?;
        let prev_value = prev.map(|p| indep_as_u64(p.indep)).unwrap_or(0);
        Value::Precise(prev_value + delta)
    } else {
        unpack_value(indep_precision, input)?
    };

    let dep = unpack_value(dep_precision, input)?;
    Ok(DataPoint { indep, dep })
}

/// Comparator used to sort a block's points by independent axis before
/// writing, so delta-encoding never has to represent a negative step.
pub fn indep_less(precision: Precision, a: &DataPoint, b: &DataPoint) -> std::cmp::Ordering {
    let (x, y) = match precision {
        Precision::PreciseInteger => (indep_as_u64(a.indep) as f64, indep_as_u64(b.indep) as f64),
        _ => (a.indep.as_f64(), b.indep.as_f64()),
    };
    x.total_cmp(&y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indep_less_is_a_total_order_even_with_nan() {
        let nan = DataPoint { indep: Value::Approximate(f64::NAN), dep: Value::Precise(0) };
        let one = DataPoint { indep: Value::Approximate(1.0), dep: Value::Precise(0) };
        let two = DataPoint { indep: Value::Approximate(2.0), dep: Value::Precise(0) };

        assert_eq!(indep_less(Precision::Double, &one, &two), std::cmp::Ordering::Less);
        assert_eq!(indep_less(Precision::Double, &two, &nan), std::cmp::Ordering::Less);
        assert_eq!(indep_less(Precision::Double, &one, &nan), std::cmp::Ordering::Less);
    }

    #[test]
    fn precise_indep_round_trips_with_delta() {
        let a = DataPoint { indep: Value::Precise(10), dep: Value::Precise(1) };
        let b = DataPoint { indep: Value::Precise(25), dep: Value::Precise(2) };
        let mut buf = Vec::new();
        pack_point(Precision::PreciseInteger, Precision::PreciseInteger, None, &a, &mut buf).unwrap();
        pack_point(Precision::PreciseInteger, Precision::PreciseInteger, Some(&a), &b, &mut buf).unwrap();

        let mut cursor = &buf[..];
        let got_a = unpack_point(Precision::PreciseInteger, Precision::PreciseInteger, None, &mut cursor).unwrap();
        assert_eq!(got_a, a);
        let got_b = unpack_point(Precision::PreciseInteger, Precision::PreciseInteger, Some(&got_a), &mut cursor).unwrap();
        assert_eq!(got_b, b);
    }

    #[test]
    fn approximate_dep_round_trips() {
        let p = DataPoint { indep: Value::Precise(3), dep: Value::Approximate(2.5) };
        let mut buf = Vec::new();
        pack_point(Precision::PreciseInteger, Precision::Double, None, &p, &mut buf).unwrap();
        let mut cursor = &buf[..];
        let got = unpack_point(Precision::PreciseInteger, Precision::Double, None, &mut cursor).unwrap();
        assert_eq!(got, p);
    }

    #[test]
    fn non_precise_indep_is_never_delta_encoded() {
        // A smaller value following a larger one would underflow a delta
        // encode; since single-precision independent axes are never
        // delta-encoded, this must round-trip regardless of ordering.
        let a = DataPoint { indep: Value::Approximate(100.0), dep: Value::Precise(1) };
        let b = DataPoint { indep: Value::Approximate(5.0), dep: Value::Precise(2) };
        let mut buf = Vec::new();
        pack_point(Precision::Single, Precision::PreciseInteger, None, &a, &mut buf).unwrap();
        pack_point(Precision::Single, Precision::PreciseInteger, Some(&a), &b, &mut buf).unwrap();

        let mut cursor = &buf[..];
        let got_a = unpack_point(Precision::Single, Precision::PreciseInteger, None, &mut cursor).unwrap();
        assert_eq!(got_a, a);
        let got_b = unpack_point(Precision::Single, Precision::PreciseInteger, Some(&got_a), &mut cursor).unwrap();
        assert_eq!(got_b, b);
    }
}
