//! Bounds-checked big-endian reads over a borrowed byte buffer.
//!
//! Course files come from a big-endian console, so every multi-byte value
//! here is big-endian. Reads never slice past the end of the buffer; a
//! short read is a [`FormatError::Truncated`] naming the field that asked
//! for it.

use crate::error::{FormatError, Result};

/// Cursor over raw course bytes.
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Offset of the next read.
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Move the cursor to an absolute offset inside the buffer.
    pub fn seek(&mut self, pos: usize, what: &'static str) -> Result<()> {
        if pos > self.data.len() {
            return Err(FormatError::truncated(what, pos, 0, 0));
        }
        self.pos = pos;
        Ok(())
    }

    /// Advance past `n` bytes without interpreting them.
    pub fn skip(&mut self, n: usize, what: &'static str) -> Result<()> {
        self.take(n, what).map(|_| ())
    }

    fn take(&mut self, n: usize, what: &'static str) -> Result<&'a [u8]> {
        let left = self.data.len() - self.pos;
        if n > left {
            return Err(FormatError::truncated(what, self.pos, n, left));
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    pub fn read_u8(&mut self, what: &'static str) -> Result<u8> {
        Ok(self.take(1, what)?[0])
    }

    pub fn read_u16(&mut self, what: &'static str) -> Result<u16> {
        let b = self.take(2, what)?;
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }

    /// Read a 24-bit unsigned value (U8 archive name offsets).
    pub fn read_u24(&mut self, what: &'static str) -> Result<u32> {
        let b = self.take(3, what)?;
        Ok(u32::from_be_bytes([0, b[0], b[1], b[2]]))
    }

    pub fn read_u32(&mut self, what: &'static str) -> Result<u32> {
        let b = self.take(4, what)?;
        Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }

    pub fn read_f32(&mut self, what: &'static str) -> Result<f32> {
        Ok(f32::from_bits(self.read_u32(what)?))
    }

    /// Read a half-precision float, widened to f32.
    pub fn read_f16(&mut self, what: &'static str) -> Result<f32> {
        Ok(half_to_f32(self.read_u16(what)?))
    }

    /// Read a 4-byte section or file tag.
    pub fn read_tag(&mut self, what: &'static str) -> Result<[u8; 4]> {
        let b = self.take(4, what)?;
        Ok([b[0], b[1], b[2], b[3]])
    }

    pub fn read_vec2(&mut self, what: &'static str) -> Result<[f32; 2]> {
        Ok([self.read_f32(what)?, self.read_f32(what)?])
    }

    pub fn read_vec3(&mut self, what: &'static str) -> Result<[f32; 3]> {
        Ok([
            self.read_f32(what)?,
            self.read_f32(what)?,
            self.read_f32(what)?,
        ])
    }

    /// Read `n` u8 values into a fixed array.
    pub fn read_bytes<const N: usize>(&mut self, what: &'static str) -> Result<[u8; N]> {
        let b = self.take(N, what)?;
        let mut out = [0u8; N];
        out.copy_from_slice(b);
        Ok(out)
    }

    /// Read `n` u16 values into a fixed array.
    pub fn read_u16s<const N: usize>(&mut self, what: &'static str) -> Result<[u16; N]> {
        let mut out = [0u16; N];
        for v in out.iter_mut() {
            *v = self.read_u16(what)?;
        }
        Ok(out)
    }
}

/// Expand an IEEE 754 half-precision value to f32.
///
/// Exact: every binary16 value is representable in binary32, so plain
/// arithmetic reconstruction introduces no rounding.
pub fn half_to_f32(bits: u16) -> f32 {
    let sign = if bits & 0x8000 != 0 { -1.0f32 } else { 1.0 };
    let exponent = (bits >> 10) & 0x1f;
    let fraction = bits & 0x03ff;

    match exponent {
        0 => sign * f32::from(fraction) * (-24f32).exp2(),
        0x1f => {
            if fraction == 0 {
                sign * f32::INFINITY
            } else {
                f32::NAN
            }
        }
        _ => {
            let significand = 1.0 + f32::from(fraction) * (-10f32).exp2();
            sign * significand * (f32::from(exponent) - 15.0).exp2()
        }
    }
}
