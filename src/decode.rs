//! P5 decoding.
//!
//! [`decode`] reads a file with default settings. [`DecodeRequest`] carries
//! limits, the header grammar and the sample layout for callers that need
//! them.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::debug;

use crate::buffer::ImageBuffer;
use crate::error::PgmError;
use crate::header::{Header, HeaderStyle};
use crate::limits::Limits;
use crate::pixel::{Pixel, SampleLayout};

/// Decode the P5 file at `path` with default settings.
///
/// Equivalent to `DecodeRequest::new().decode_file(path)`.
pub fn decode(path: impl AsRef<Path>) -> Result<ImageBuffer, PgmError> {
    DecodeRequest::new().decode_file(path)
}

/// Decode settings.
///
/// ```no_run
/// use zenpgm::{DecodeRequest, HeaderStyle, Limits};
///
/// let image = DecodeRequest::new()
///     .with_header_style(HeaderStyle::Netpbm)
///     .with_limits(Limits::none().with_max_pixels(50_000_000))
///     .decode_file("scan.pgm")?;
/// println!("{}x{}", image.width(), image.height());
/// # Ok::<(), zenpgm::PgmError>(())
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DecodeRequest {
    limits: Limits,
    layout: SampleLayout,
    style: HeaderStyle,
}

impl DecodeRequest {
    /// Legacy header, [`SampleLayout::Gray8`], no limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply resource limits, checked before the pixel buffer is allocated.
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Choose how raster bytes fill pixel records.
    pub fn with_layout(mut self, layout: SampleLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Choose the header grammar.
    pub fn with_header_style(mut self, style: HeaderStyle) -> Self {
        self.style = style;
        self
    }

    /// The configured limits.
    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// The configured sample layout.
    pub fn layout(&self) -> SampleLayout {
        self.layout
    }

    /// The configured header grammar.
    pub fn header_style(&self) -> HeaderStyle {
        self.style
    }

    /// Parse the header only. No pixel memory is allocated.
    pub fn probe(&self, data: &[u8]) -> Result<Header, PgmError> {
        Header::parse(data, self.style)
    }

    /// Decode the file at `path`.
    ///
    /// The file is closed before this returns, on success and on error.
    pub fn decode_file(&self, path: impl AsRef<Path>) -> Result<ImageBuffer, PgmError> {
        let path = path.as_ref();
        let mut file = File::open(path).map_err(|e| PgmError::io("open", path, e))?;
        let mut data = Vec::new();
        file.read_to_end(&mut data)
            .map_err(|e| PgmError::io("read", path, e))?;
        drop(file);
        debug!("read {} bytes from {}", data.len(), path.display());
        self.decode_bytes(&data)
    }

    /// Decode everything `reader` yields.
    pub fn decode_reader<R: Read>(&self, mut reader: R) -> Result<ImageBuffer, PgmError> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        self.decode_bytes(&data)
    }

    /// Decode an in-memory P5 file.
    pub fn decode_bytes(&self, data: &[u8]) -> Result<ImageBuffer, PgmError> {
        let header = self.probe(data)?;
        let dims = header.dimensions;

        self.limits.check_allocation(
            dims.width(),
            dims.height(),
            core::mem::size_of::<Pixel>(),
        )?;

        let raster = &data[header.header_len()..];
        let expected = self.layout.decoded_raster_len(dims.pixel_count());
        if raster.len() < expected {
            return Err(PgmError::ShortRead {
                expected,
                actual: raster.len(),
            });
        }
        if raster.len() > expected {
            debug!(
                "ignoring {} trailing bytes after the raster",
                raster.len() - expected
            );
        }

        let mut image = ImageBuffer::new(dims);
        self.layout
            .unpack(&raster[..expected], image.pixels_mut());
        debug!("decoded {dims} image with {} layout", self.layout);
        Ok(image)
    }
}
