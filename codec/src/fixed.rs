//! Big-endian fixed-width codecs for the approximate-precision axes
//! (`half` packs to a raw `u16`, `single`/`double` to IEEE-754 `f32`/`f64`).

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use std::io::{self, Read, Write};

pub fn write_u16_be<W: Write>(w: &mut W, v: u16) -> io::Result<()> {
    w.write_u16::<BigEndian>(v)
}

pub fn read_u16_be<R: Read>(r: &mut R) -> io::Result<u16> {
    r.read_u16::<BigEndian>()
}

pub fn write_u32_be<W: Write>(w: &mut W, v: u32) -> io::Result<()> {
    w.write_u32::<BigEndian>(v)
}

pub fn read_u32_be<R: Read>(r: &mut R) -> io::Result<u32> {
    r.read_u32::<BigEndian>()
}

pub fn write_u64_be<W: Write>(w: &mut W, v: u64) -> io::Result<()> {
    w.write_u64::<BigEndian>(v)
}

pub fn read_u64_be<R: Read>(r: &mut R) -> io::Result<u64> {
    r.read_u64::<BigEndian>()
}

pub fn write_f32_be<W: Write>(w: &mut W, v: f32) -> io::Result<()> {
    w.write_f32::<BigEndian>(v)
}

pub fn read_f32_be<R: Read>(r: &mut R) -> io::Result<f32> {
    r.read_f32::<BigEndian>()
}

pub fn write_f64_be<W: Write>(w: &mut W, v: f64) -> io::Result<()> {
    w.write_f64::<BigEndian>(v)
}

pub fn read_f64_be<R: Read>(r: &mut R) -> io::Result<f64> {
    r.read_f64::<BigEndian>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_each_width() {
        let mut buf = Vec::new();
        write_u16_be(&mut buf, 0xBEEF).unwrap();
        write_u32_be(&mut buf, 0xDEAD_BEEF).unwrap();
        write_u64_be(&mut buf, 0x0102_0304_0506_0708).unwrap();
        write_f32_be(&mut buf, 1.5f32).unwrap();
        write_f64_be(&mut buf, -2.25f64).unwrap();

        let mut cursor = &buf[..];
        assert_eq!(read_u16_be(&mut cursor).unwrap(), 0xBEEF);
        assert_eq!(read_u32_be(&mut cursor).unwrap(), 0xDEAD_BEEF);
        assert_eq!(read_u64_be(&mut cursor).unwrap(), 0x0102_0304_0506_0708);
        assert_eq!(read_f32_be(&mut cursor).unwrap(), 1.5f32);
        assert_eq!(read_f64_be(&mut cursor).unwrap(), -2.25f64);
    }

    #[test]
    fn is_big_endian_on_the_wire() {
        let mut buf = Vec::new();
        write_u32_be(&mut buf, 1).unwrap();
        assert_eq!(buf, vec![0, 0, 0, 1]);
    }
}
