//! Binary PGM ("P5") codec.
//!
//! Decode accepts any valid maxval and rescales samples to the internal
//! 0–255 range; encode always writes maxval 255, which makes a
//! decode→encode pass lossless for files that were already 8-bit.

use crate::error::SketchError;
use crate::raster::Raster;

/// Rescale one sample from [0, maxval] to [0, 255], rounding to nearest.
/// Out-of-range samples in damaged files clamp to white.
#[inline]
pub fn scale_sample(sample: u32, maxval: u32) -> u8 {
    ((sample * 255 + maxval / 2) / maxval).min(255) as u8
}

fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n' | 0x0B | 0x0C)
}

/// Byte cursor over the ASCII header.
struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Skip whitespace and `#` comments (comment runs to end of line).
    fn skip_space(&mut self) {
        while let Some(&b) = self.bytes.get(self.pos) {
            if is_space(b) {
                self.pos += 1;
            } else if b == b'#' {
                while self.pos < self.bytes.len() && self.bytes[self.pos] != b'\n' {
                    self.pos += 1;
                }
            } else {
                break;
            }
        }
    }

    /// Read a whitespace-delimited decimal integer.
    fn read_int(&mut self, what: &str) -> Result<u32, SketchError> {
        self.skip_space();
        let start = self.pos;
        while self
            .bytes
            .get(self.pos)
            .is_some_and(|b| b.is_ascii_digit())
        {
            self.pos += 1;
        }
        if start == self.pos {
            return Err(SketchError::InvalidDimension(format!(
                "{} is not a decimal number",
                what
            )));
        }
        let mut value: u64 = 0;
        for &d in &self.bytes[start..self.pos] {
            value = value * 10 + u64::from(d - b'0');
            if value > u64::from(u32::MAX) {
                return Err(SketchError::InvalidDimension(format!(
                    "{} is out of range",
                    what
                )));
            }
        }
        Ok(value as u32)
    }

    /// Consume the single whitespace byte separating header from samples.
    fn expect_delimiter(&mut self) -> Result<(), SketchError> {
        match self.bytes.get(self.pos) {
            Some(&b) if is_space(b) => {
                self.pos += 1;
                Ok(())
            },
            _ => Err(SketchError::InvalidDimension(
                "missing delimiter between header and pixel data".into(),
            )),
        }
    }
}

/// Decode a P5 PGM byte stream into a raster.
pub fn decode(bytes: &[u8]) -> Result<Raster, SketchError> {
    if bytes.len() < 2 || &bytes[..2] != b"P5" {
        return Err(SketchError::InvalidHeader);
    }
    let mut cursor = Cursor { bytes, pos: 2 };
    let width = cursor.read_int("width")?;
    let height = cursor.read_int("height")?;
    let maxval = cursor.read_int("maxval")?;
    if maxval == 0 || maxval > 65535 {
        return Err(SketchError::InvalidDimension(format!(
            "maxval {} is outside 1..=65535",
            maxval
        )));
    }
    cursor.expect_delimiter()?;

    let count = (width as usize)
        .checked_mul(height as usize)
        .ok_or_else(|| SketchError::InvalidDimension("image size overflows".into()))?;
    let data = &bytes[cursor.pos..];

    let mut pixels = Vec::with_capacity(count);
    if maxval <= 255 {
        if data.len() < count {
            return Err(SketchError::TruncatedImage {
                expected: count,
                found: data.len(),
            });
        }
        for &sample in &data[..count] {
            pixels.push(scale_sample(u32::from(sample), maxval));
        }
    } else {
        // Two bytes per sample, big-endian
        if data.len() < count * 2 {
            return Err(SketchError::TruncatedImage {
                expected: count * 2,
                found: data.len(),
            });
        }
        for pair in data[..count * 2].chunks_exact(2) {
            let sample = u32::from(u16::from_be_bytes([pair[0], pair[1]]));
            pixels.push(scale_sample(sample, maxval));
        }
    }

    Raster::from_raw(width, height, pixels)
        .ok_or_else(|| SketchError::InvalidDimension("pixel count mismatch".into()))
}

/// Serialize a raster as an 8-bit P5 PGM stream.
pub fn encode(raster: &Raster) -> Vec<u8> {
    let header = format!("P5 {} {} 255\n", raster.width(), raster.height());
    let mut out = Vec::with_capacity(header.len() + raster.as_bytes().len());
    out.extend_from_slice(header.as_bytes());
    out.extend_from_slice(raster.as_bytes());
    out
}
