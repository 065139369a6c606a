//! Settings for one decode, resample, encode run.

use std::path::{Path, PathBuf};

use crate::buffer::Dimensions;
use crate::decode::DecodeRequest;
use crate::encode::EncodeRequest;
use crate::error::PgmError;
use crate::limits::Limits;

/// Input file read when no other path is given.
pub const DEFAULT_INPUT: &str = "map_tsudanuma_move_orign.pgm";
/// Output file written when no other path is given.
pub const DEFAULT_OUTPUT: &str = "map_tsudanuma_move_1472x1000.pgm";
/// Default target width.
pub const DEFAULT_WIDTH: u32 = 1472;
/// Default target height.
pub const DEFAULT_HEIGHT: u32 = 1000;

const DEFAULT_TARGET: Dimensions = Dimensions::from_const(DEFAULT_WIDTH, DEFAULT_HEIGHT);

/// Everything [`run`](crate::run) needs.
///
/// ```
/// use zenpgm::{HeaderStyle, Limits, PipelineConfig};
///
/// let config = PipelineConfig::new("in.pgm", "out.pgm", 640, 480)?
///     .with_limits(Limits::none().with_max_pixels(10_000_000));
/// assert_eq!(config.target().width(), 640);
/// assert_eq!(config.decode().header_style(), HeaderStyle::Legacy);
/// # Ok::<(), zenpgm::PgmError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PipelineConfig {
    input: PathBuf,
    output: PathBuf,
    target: Dimensions,
    decode: DecodeRequest,
    encode: EncodeRequest,
    limits: Limits,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            target: DEFAULT_TARGET,
            decode: DecodeRequest::new(),
            encode: EncodeRequest::new(),
            limits: Limits::none(),
        }
    }
}

impl PipelineConfig {
    /// Default settings with explicit paths and target size.
    ///
    /// Fails if `width` or `height` is zero.
    pub fn new(
        input: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
        width: u32,
        height: u32,
    ) -> Result<Self, PgmError> {
        Ok(Self::default()
            .with_input(input)
            .with_output(output)
            .with_target(Dimensions::new(width, height)?))
    }

    /// Set the file to read.
    pub fn with_input(mut self, input: impl Into<PathBuf>) -> Self {
        self.input = input.into();
        self
    }

    /// Set the file to write.
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    /// Set the resample target.
    pub fn with_target(mut self, target: Dimensions) -> Self {
        self.target = target;
        self
    }

    /// Set decode options. Their limits are replaced by [`Self::limits`] at run time.
    pub fn with_decode(mut self, decode: DecodeRequest) -> Self {
        self.decode = decode;
        self
    }

    /// Set encode options.
    pub fn with_encode(mut self, encode: EncodeRequest) -> Self {
        self.encode = encode;
        self
    }

    /// Limits applied to the decoded image and to the resample target.
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    pub fn input(&self) -> &Path {
        &self.input
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    pub fn target(&self) -> Dimensions {
        self.target
    }

    pub fn decode(&self) -> &DecodeRequest {
        &self.decode
    }

    pub fn encode(&self) -> &EncodeRequest {
        &self.encode
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }
}
