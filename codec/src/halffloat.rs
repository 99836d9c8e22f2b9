//! Branch-free `f32 <-> u16` half-float conversion.
//!
//! Ported from the bit-twiddling algorithm attributed to Fabien Giesen
//! (released to the public domain); the arithmetic below uses `wrapping_*`
//! operations in place of C's implementation-defined signed overflow on the
//! same bit patterns.

const SHIFT: u32 = 13;
const SHIFT_SIGN: u32 = 16;

const INF_N: i32 = 0x7F80_0000u32 as i32; // flt32 infinity
const MAX_N: i32 = 0x477F_E000u32 as i32; // max flt16 normal as a flt32
const MIN_N: i32 = 0x3880_0000u32 as i32; // min flt16 normal as a flt32
const SIGN_N: i32 = 0x8000_0000u32 as i32; // flt32 sign bit

const INF_C: i32 = INF_N >> SHIFT;
const NAN_N: i32 = (INF_C + 1) << SHIFT; // minimum flt16 nan as a flt32
const MAX_C: i32 = MAX_N >> SHIFT;
const MIN_C: i32 = MIN_N >> SHIFT;
const SIGN_C: i32 = ((SIGN_N as u32) >> SHIFT_SIGN) as i32; // flt16 sign bit

const MUL_N: i32 = 0x5200_0000u32 as i32; // (1 << 23) / minN
const MUL_C: i32 = 0x3380_0000u32 as i32; // minN / (1 << (23 - shift))

const SUB_C: i32 = 0x0003_FF; // max flt32 subnormal down shifted
const NOR_C: i32 = 0x0004_00; // min flt32 normal down shifted

const MAX_D: i32 = INF_C - MAX_C - 1;
const MIN_D: i32 = MIN_C - SUB_C - 1;

/// Compress an `f32` to its nearest half-float bit pattern.
///
/// Subnormal half-float results are accepted silently (lossy), matching the
/// source this was ported from; this function never fails.
pub fn compress(value: f32) -> u16 {
    let mut v = value.to_bits() as i32;
    let mut sign = v & SIGN_N;
    v ^= sign;
    sign = ((sign as u32) >> SHIFT_SIGN) as i32; // logical shift

    // correct subnormals: the float product is truncated to an int32 value
    // (a numeric cast, not a bit reinterpretation) exactly as the C union
    // assignment `s.si = s.f * v.f;` does.
    let product = f32::from_bits(MUL_N as u32) * f32::from_bits(v as u32);
    let s_bits = product as i32;
    v ^= (s_bits ^ v) & -((MIN_N > v) as i32);

    v ^= (INF_N ^ v) & -(((INF_N > v) as i32) & ((v > MAX_N) as i32));
    v ^= (NAN_N ^ v) & -(((NAN_N > v) as i32) & ((v > INF_N) as i32));
    v = ((v as u32) >> SHIFT) as i32; // logical shift
    v ^= (v.wrapping_sub(MAX_D) ^ v) & -((v > MAX_C) as i32);
    v ^= (v.wrapping_sub(MIN_D) ^ v) & -((v > SUB_C) as i32);

    ((v as u32) | (sign as u32)) as u16
}

/// Expand a half-float bit pattern to `f32`.
pub fn decompress(value: u16) -> f32 {
    let mut v = value as i32;
    let mut sign = v & SIGN_C;
    v ^= sign;
    sign <<= SHIFT_SIGN;

    v ^= (v.wrapping_add(MIN_D) ^ v) & -((v > SUB_C) as i32);
    v ^= (v.wrapping_add(MAX_D) ^ v) & -((v > MAX_C) as i32);

    let s = f32::from_bits(MUL_C as u32) * (v as f32);
    let mask = -((NOR_C > v) as i32);
    v <<= SHIFT;
    v ^= (s.to_bits() as i32 ^ v) & mask;
    v |= sign;
    f32::from_bits(v as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_within_precision() {
        let values = [0.0f32, 1.0, -1.0, 3.14159, 65504.0, -65504.0, 0.001, 1234.5];
        for &f in &values {
            let h = compress(f);
            let back = decompress(h);
            let tolerance = (2f32).powi(-10) * f.abs();
            assert!(
                (back - f).abs() <= tolerance.max(1e-6),
                "f={f} back={back}"
            );
        }
    }

    #[test]
    fn preserves_zero_sign() {
        assert_eq!(decompress(compress(0.0f32)).to_bits(), 0.0f32.to_bits());
        assert_eq!(
            decompress(compress(-0.0f32)).to_bits(),
            (-0.0f32).to_bits()
        );
    }

    #[test]
    fn preserves_infinity() {
        assert_eq!(decompress(compress(f32::INFINITY)), f32::INFINITY);
        assert_eq!(decompress(compress(f32::NEG_INFINITY)), f32::NEG_INFINITY);
    }

    #[test]
    fn preserves_nan() {
        assert!(decompress(compress(f32::NAN)).is_nan());
    }

    #[test]
    fn clamps_overflow_to_infinity() {
        assert_eq!(decompress(compress(1.0e9)), f32::INFINITY);
        assert_eq!(decompress(compress(-1.0e9)), f32::NEG_INFINITY);
    }
}
