//! Owned pixel storage.
//!
//! [`ImageBuffer`] wraps an `imgref::ImgVec<Pixel>` and guarantees that the
//! pixel vector holds exactly `width × height` records in row-major order.
//! [`Dimensions`] is the validated size that every constructor starts from.

use core::fmt;
use std::io::{self, Write};

use imgref::{ImgRef, ImgVec};

use crate::error::{FormatError, PgmError};
use crate::pixel::{gray, Pixel};

/// A validated image size: both sides are at least 1 and the pixel count
/// fits in `usize`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Dimensions {
    width: u32,
    height: u32,
}

impl Dimensions {
    /// Validate a width/height pair.
    ///
    /// Fails with [`FormatError::InvalidDimensions`] if either side is zero or
    /// `width * height` overflows `usize`.
    pub fn new(width: u32, height: u32) -> Result<Self, PgmError> {
        if width == 0 || height == 0 {
            return Err(FormatError::InvalidDimensions(format!(
                "{width}x{height}, both sides must be positive"
            ))
            .into());
        }
        (width as usize)
            .checked_mul(height as usize)
            .ok_or_else(|| {
                FormatError::InvalidDimensions(format!("{width}x{height} overflows pixel count"))
            })?;
        Ok(Self { width, height })
    }

    /// Compile-time constructor for known-good constants.
    pub(crate) const fn from_const(width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0);
        Self { width, height }
    }

    /// Validate signed values as they come out of a text header.
    pub fn from_signed(width: i64, height: i64) -> Result<Self, PgmError> {
        if width <= 0 || height <= 0 {
            return Err(FormatError::InvalidDimensions(format!(
                "{width}x{height}, both sides must be positive"
            ))
            .into());
        }
        let w = u32::try_from(width)
            .map_err(|_| FormatError::InvalidDimensions(format!("width {width} too large")))?;
        let h = u32::try_from(height)
            .map_err(|_| FormatError::InvalidDimensions(format!("height {height} too large")))?;
        Self::new(w, h)
    }

    /// Width in pixels.
    #[inline]
    pub fn width(self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(self) -> u32 {
        self.height
    }

    /// `width * height`. Cannot overflow, checked at construction.
    #[inline]
    pub fn pixel_count(self) -> usize {
        self.width as usize * self.height as usize
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Row-major pixel buffer of exactly `width × height` records.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageBuffer {
    img: ImgVec<Pixel>,
}

impl ImageBuffer {
    /// Zero-filled buffer.
    pub fn new(dims: Dimensions) -> Self {
        Self::filled(dims, Pixel::default())
    }

    /// Buffer with every pixel set to `pixel`.
    pub fn filled(dims: Dimensions, pixel: Pixel) -> Self {
        let buf = vec![pixel; dims.pixel_count()];
        Self {
            img: ImgVec::new(buf, dims.width as usize, dims.height as usize),
        }
    }

    /// Take ownership of a row-major pixel vector.
    ///
    /// Fails with [`PgmError::SizeMismatch`] unless `pixels.len() == width * height`.
    pub fn from_pixels(dims: Dimensions, pixels: Vec<Pixel>) -> Result<Self, PgmError> {
        let expected = dims.pixel_count();
        if pixels.len() != expected {
            return Err(PgmError::SizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            img: ImgVec::new(pixels, dims.width as usize, dims.height as usize),
        })
    }

    /// Wrap a vector whose length is known to be `dims.pixel_count()`.
    pub(crate) fn from_exact(dims: Dimensions, pixels: Vec<Pixel>) -> Self {
        debug_assert_eq!(pixels.len(), dims.pixel_count());
        Self {
            img: ImgVec::new(pixels, dims.width as usize, dims.height as usize),
        }
    }

    /// Build from one intensity byte per pixel; each becomes `(v, v, v)`.
    pub fn from_gray(dims: Dimensions, samples: &[u8]) -> Result<Self, PgmError> {
        Self::from_pixels(dims, samples.iter().map(|&v| gray(v)).collect())
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.img.width() as u32
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.img.height() as u32
    }

    /// Size of this buffer.
    pub fn dimensions(&self) -> Dimensions {
        Dimensions {
            width: self.width(),
            height: self.height(),
        }
    }

    /// All pixels, row-major.
    #[inline]
    pub fn pixels(&self) -> &[Pixel] {
        self.img.buf()
    }

    /// All pixels, row-major, mutable. The length cannot change.
    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [Pixel] {
        self.img.buf_mut()
    }

    /// Pixel at `(x, y)`, or `None` outside the image.
    pub fn get(&self, x: u32, y: u32) -> Option<Pixel> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.pixels()[y as usize * self.img.width() + x as usize])
    }

    /// One row of pixels.
    ///
    /// # Panics
    ///
    /// If `y >= height`.
    pub fn row(&self, y: u32) -> &[Pixel] {
        let w = self.img.width();
        let start = y as usize * w;
        &self.pixels()[start..start + w]
    }

    /// Iterate over rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Pixel]> {
        self.pixels().chunks_exact(self.img.width())
    }

    /// Borrow as an `imgref` view.
    pub fn as_img(&self) -> ImgRef<'_, Pixel> {
        self.img.as_ref()
    }

    /// Consume and return the pixel vector.
    pub fn into_pixels(self) -> Vec<Pixel> {
        self.img.into_buf()
    }

    /// Write every channel value as text, one line per row, each value
    /// followed by a space.
    pub fn write_dump<W: Write>(&self, mut out: W) -> io::Result<()> {
        for row in self.rows() {
            for px in row {
                write!(out, "{} {} {} ", px.r, px.g, px.b)?;
            }
            writeln!(out)?;
        }
        out.flush()
    }
}

impl From<ImageBuffer> for ImgVec<Pixel> {
    fn from(buffer: ImageBuffer) -> Self {
        buffer.img
    }
}

impl fmt::Debug for ImageBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageBuffer")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish_non_exhaustive()
    }
}
