//! P5 encoding.
//!
//! Output is always the three-line header `P5`, `{width} {height}`, `255`
//! followed by the raster, with an optional `#` comment line after the magic.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::debug;

use crate::buffer::ImageBuffer;
use crate::error::{FormatError, PgmError};
use crate::header::write_header;
use crate::pixel::SampleLayout;

/// Encode `buffer` to `path` with default settings.
///
/// Equivalent to `EncodeRequest::new().encode_file(path, buffer)`.
pub fn encode(path: impl AsRef<Path>, buffer: &ImageBuffer) -> Result<(), PgmError> {
    EncodeRequest::new().encode_file(path, buffer)
}

/// Encode settings.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EncodeRequest {
    layout: SampleLayout,
    comment: Option<String>,
}

impl EncodeRequest {
    /// [`SampleLayout::Gray8`], no comment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Choose how pixel records are flattened into raster bytes.
    pub fn with_layout(mut self, layout: SampleLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Add a `# comment` line after the magic.
    ///
    /// Files with a comment line can be read back with either header style.
    /// The comment is validated when encoding; it must not contain a line break.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// The configured sample layout.
    pub fn layout(&self) -> SampleLayout {
        self.layout
    }

    /// The configured comment, if any.
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Encode into a new byte vector.
    pub fn encode_to_vec(&self, buffer: &ImageBuffer) -> Result<Vec<u8>, PgmError> {
        let mut out = Vec::new();
        self.encode_to_writer(buffer, &mut out)?;
        Ok(out)
    }

    /// Encode into `writer`. The writer is flushed before returning.
    pub fn encode_to_writer<W: Write>(
        &self,
        buffer: &ImageBuffer,
        mut writer: W,
    ) -> Result<(), PgmError> {
        let comment = self.checked_comment()?;
        let raster = self.raster(buffer);
        write_header(&mut writer, buffer.dimensions(), comment)?;
        writer.write_all(&raster)?;
        writer.flush()?;
        Ok(())
    }

    /// Create (or truncate) `path` and encode into it.
    ///
    /// The file is closed before this returns, on success and on error.
    pub fn encode_file(
        &self,
        path: impl AsRef<Path>,
        buffer: &ImageBuffer,
    ) -> Result<(), PgmError> {
        let path = path.as_ref();
        let comment = self.checked_comment()?;
        let raster = self.raster(buffer);

        let file = File::create(path).map_err(|e| PgmError::io("create", path, e))?;
        let mut writer = BufWriter::new(file);
        write_header(&mut writer, buffer.dimensions(), comment)
            .and_then(|()| writer.write_all(&raster))
            .and_then(|()| writer.flush())
            .map_err(|e| PgmError::io("write", path, e))?;
        debug!(
            "wrote {} image ({} raster bytes, {} layout) to {}",
            buffer.dimensions(),
            raster.len(),
            self.layout,
            path.display()
        );
        Ok(())
    }

    fn checked_comment(&self) -> Result<Option<&str>, FormatError> {
        match self.comment.as_deref() {
            Some(c) if c.contains(['\n', '\r']) => Err(FormatError::InvalidComment),
            other => Ok(other),
        }
    }

    fn raster(&self, buffer: &ImageBuffer) -> Vec<u8> {
        let pixels = buffer.pixels();
        let mut raster = Vec::with_capacity(self.layout.encoded_raster_len(pixels.len()));
        self.layout.pack(pixels, &mut raster);
        raster
    }
}
