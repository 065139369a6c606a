//! Pixel record and how it maps onto raster bytes.
//!
//! A [`Pixel`] holds three 8-bit channels. P5 stores one sample per pixel, so
//! [`SampleLayout`] decides how a record is filled from, and flattened back
//! into, the byte stream.

use rgb::Rgb;

/// A three-channel 8-bit pixel record.
pub type Pixel = Rgb<u8>;

/// A pixel with all three channels set to `value`.
#[inline]
pub fn gray(value: u8) -> Pixel {
    Rgb {
        r: value,
        g: value,
        b: value,
    }
}

/// Mapping between [`Pixel`] records and P5 raster bytes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SampleLayout {
    /// One byte per pixel in both directions.
    ///
    /// Decoding a byte `v` yields `(v, v, v)`. Encoding writes the red channel,
    /// so gray images survive a round trip unchanged.
    #[default]
    Gray8,
    /// Raster bytes fill record memory directly, one channel per byte.
    ///
    /// Decoding copies `width × height` raster bytes into the record memory
    /// in channel order (`r0 g0 b0 r1 ...`) and leaves the remainder zero.
    /// Encoding writes all three channels of every record, so the raster is
    /// three times the size that was read.
    LegacyRecord,
}

impl SampleLayout {
    /// Raster bytes consumed when decoding `pixel_count` pixels.
    ///
    /// Both layouts read one byte per pixel.
    pub fn decoded_raster_len(self, pixel_count: usize) -> usize {
        pixel_count
    }

    /// Raster bytes written when encoding `pixel_count` pixels.
    pub fn encoded_raster_len(self, pixel_count: usize) -> usize {
        match self {
            Self::Gray8 => pixel_count,
            Self::LegacyRecord => pixel_count * 3,
        }
    }

    /// Fill `out` from raster bytes. `raw.len()` must equal `out.len()`.
    pub(crate) fn unpack(self, raw: &[u8], out: &mut [Pixel]) {
        debug_assert_eq!(raw.len(), out.len());
        match self {
            Self::Gray8 => {
                for (px, &v) in out.iter_mut().zip(raw) {
                    *px = gray(v);
                }
            }
            Self::LegacyRecord => {
                for (i, &v) in raw.iter().enumerate() {
                    let px = &mut out[i / 3];
                    match i % 3 {
                        0 => px.r = v,
                        1 => px.g = v,
                        _ => px.b = v,
                    }
                }
            }
        }
    }

    /// Append the raster bytes for `pixels` to `out`.
    pub(crate) fn pack(self, pixels: &[Pixel], out: &mut Vec<u8>) {
        match self {
            Self::Gray8 => out.extend(pixels.iter().map(|px| px.r)),
            Self::LegacyRecord => {
                for px in pixels {
                    out.extend_from_slice(&[px.r, px.g, px.b]);
                }
            }
        }
    }
}

impl core::fmt::Display for SampleLayout {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Self::Gray8 => "gray8",
            Self::LegacyRecord => "legacy-record",
        })
    }
}
