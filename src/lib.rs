//! Binary PGM (P5) decoding, nearest-neighbor resampling and encoding.
//!
//! - [`decode`] / [`DecodeRequest`]: read a P5 file into an [`ImageBuffer`]
//! - [`resample`]: nearest-neighbor resize to new [`Dimensions`]
//! - [`encode`] / [`EncodeRequest`]: write an [`ImageBuffer`] as P5
//! - [`run`] / [`PipelineConfig`]: all three stages, file to file
//! - [`Limits`]: caps checked before any pixel allocation
//!
//! Two header grammars are accepted, see [`HeaderStyle`]. Pixels are
//! three-channel records ([`Pixel`]); [`SampleLayout`] decides how they map
//! onto the single-sample P5 raster.
//!
//! ```no_run
//! use zenpgm::{decode, encode, resample, Dimensions};
//!
//! let image = decode("map.pgm")?;
//! let half = Dimensions::new(image.width() / 2, image.height() / 2)?;
//! encode("map_half.pgm", &resample(&image, half))?;
//! # Ok::<(), zenpgm::PgmError>(())
//! ```

#![forbid(unsafe_code)]

mod buffer;
mod config;
mod decode;
mod encode;
mod error;
mod format;
mod header;
mod limits;
mod pipeline;
mod pixel;
mod resample;

pub use buffer::{Dimensions, ImageBuffer};
pub use config::{DEFAULT_HEIGHT, DEFAULT_INPUT, DEFAULT_OUTPUT, DEFAULT_WIDTH, PipelineConfig};
pub use decode::{DecodeRequest, decode};
pub use encode::{EncodeRequest, encode};
pub use error::{FormatError, PgmError};
pub use format::PnmMagic;
pub use header::{Header, HeaderStyle, SKIP_LIMIT};
pub use limits::{LimitExceeded, Limits};
pub use pipeline::{PipelineReport, run};
pub use pixel::{Pixel, SampleLayout, gray};
pub use resample::{axis_map, resample, resample_with_limits, source_index};

// Re-exports for callers working with the pixel storage directly.
pub use imgref::{ImgRef, ImgVec};
pub use rgb;
pub use rgb::Rgb;
