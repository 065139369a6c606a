//! Error types for decode, resample and encode.

use std::io;
use std::path::PathBuf;

use crate::format::PnmMagic;
use crate::limits::LimitExceeded;

/// Errors produced by the P5 pipeline.
///
/// Every variant is fatal for the operation that produced it. There is no
/// partial output.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum PgmError {
    /// A file could not be opened, created, read or written.
    #[error("failed to {op} {}: {source}", .path.display())]
    Io {
        /// What was being attempted (`"open"`, `"create"`, `"read"`, `"write"`).
        op: &'static str,
        /// The file involved.
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// I/O failure on a reader or writer that has no path attached.
    #[error("I/O error: {0}")]
    Stream(#[from] io::Error),

    /// The header is malformed or describes something we do not decode.
    #[error(transparent)]
    Format(#[from] FormatError),

    /// The raster ended before `width * height` samples were read.
    #[error("short read: expected {expected} raster bytes, found {actual}")]
    ShortRead {
        /// Bytes the header promised.
        expected: usize,
        /// Bytes actually available.
        actual: usize,
    },

    /// A configured resource limit was exceeded.
    #[error("limit exceeded: {0}")]
    Limit(#[from] LimitExceeded),

    /// A pixel vector does not match the dimensions it was paired with.
    #[error("pixel count {actual} does not match dimensions ({expected} expected)")]
    SizeMismatch {
        /// `width * height`.
        expected: usize,
        /// Length of the supplied vector.
        actual: usize,
    },
}

impl PgmError {
    pub(crate) fn io(op: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            op,
            path: path.into(),
            source,
        }
    }

    /// Whether this is a header/format problem rather than I/O or a limit.
    pub fn is_format(&self) -> bool {
        matches!(self, Self::Format(_) | Self::ShortRead { .. })
    }
}

/// Header-level format errors.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum FormatError {
    /// The magic token is not `P5`.
    #[error("unsupported format: expected P5, found {found:?}{}", describe(.variant))]
    UnsupportedMagic {
        /// The token that was read (lossy UTF-8, truncated).
        found: String,
        /// The PNM variant the token names, if any.
        variant: Option<PnmMagic>,
    },

    /// Width or height is missing, unparsable, or not positive.
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// The maxval field is outside 1..=255.
    #[error("unsupported maxval {0}, only 8-bit samples (1..=255) are supported")]
    UnsupportedMaxval(u32),

    /// The data ended inside the header.
    #[error("truncated header: {0}")]
    TruncatedHeader(&'static str),

    /// An encoder comment would break the header line structure.
    #[error("comment must be a single line")]
    InvalidComment,
}

fn describe(variant: &Option<PnmMagic>) -> String {
    match variant {
        Some(magic) => format!(" ({magic})"),
        None => String::new(),
    }
}
