//! Decode, resample and encode in one call.

use log::{info, warn};

use crate::buffer::{Dimensions, ImageBuffer};
use crate::config::PipelineConfig;
use crate::error::PgmError;
use crate::format::PnmMagic;
use crate::resample::resample_with_limits;

/// What a successful [`run`] produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PipelineReport {
    /// Size of the decoded input.
    pub input: Dimensions,
    /// Size written to the output file.
    pub output: Dimensions,
    /// The resampled image, as written.
    pub image: ImageBuffer,
}

/// Decode `config.input()`, resample to `config.target()` and encode to
/// `config.output()`.
///
/// Stages run in order and the first failure is returned. Nothing is written
/// if decoding or resampling fails.
pub fn run(config: &PipelineConfig) -> Result<PipelineReport, PgmError> {
    let decoder = config.decode().with_limits(*config.limits());
    let input = decoder.decode_file(config.input())?;
    info!(
        "decoded {} ({})",
        config.input().display(),
        input.dimensions()
    );

    let image = resample_with_limits(&input, config.target(), config.limits())?;
    info!("resampled {} -> {}", input.dimensions(), image.dimensions());

    let output = config.output();
    if !output
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(PnmMagic::is_pgm_extension)
    {
        warn!(
            "output {} does not have a .pgm or .pnm extension",
            output.display()
        );
    }
    config.encode().encode_file(output, &image)?;
    info!("wrote {}", output.display());

    Ok(PipelineReport {
        input: input.dimensions(),
        output: image.dimensions(),
        image,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::DecodeRequest;
    use crate::encode::EncodeRequest;
    use crate::header::HeaderStyle;
    use crate::limits::Limits;
    use crate::pixel::gray;
    use std::path::Path;

    // The legacy reader expects a line between the magic and the dimensions.
    fn write_fixture(path: &Path, image: &ImageBuffer) {
        EncodeRequest::new()
            .with_comment("fixture")
            .encode_file(path, image)
            .unwrap();
    }

    #[test]
    fn resizes_file_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.pgm");
        let output = dir.path().join("out.pgm");
        let source =
            ImageBuffer::from_gray(Dimensions::new(2, 2).unwrap(), &[10, 20, 30, 40]).unwrap();
        write_fixture(&input, &source);

        let config = PipelineConfig::new(&input, &output, 4, 4).unwrap();
        let report = run(&config).unwrap();
        assert_eq!(report.input.to_string(), "2x2");
        assert_eq!(report.output.to_string(), "4x4");

        let written = DecodeRequest::new()
            .with_header_style(HeaderStyle::Netpbm)
            .decode_file(&output)
            .unwrap();
        assert_eq!(written, report.image);
        assert_eq!(written.row(0), &[gray(10), gray(10), gray(20), gray(20)]);
        assert_eq!(written.row(3), &[gray(30), gray(30), gray(40), gray(40)]);
    }

    #[test]
    fn missing_input_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.pgm");
        let config = PipelineConfig::new(dir.path().join("absent.pgm"), &output, 4, 4).unwrap();
        let err = run(&config).unwrap_err();
        assert!(matches!(err, PgmError::Io { op: "open", .. }));
        assert!(!output.exists());
    }

    #[test]
    fn target_limit_stops_before_encode() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.pgm");
        let output = dir.path().join("out.pgm");
        write_fixture(&input, &ImageBuffer::new(Dimensions::new(4, 4).unwrap()));

        let config = PipelineConfig::new(&input, &output, 400, 400)
            .unwrap()
            .with_limits(Limits::none().with_max_pixels(1_000));
        assert!(matches!(run(&config), Err(PgmError::Limit(_))));
        assert!(!output.exists());
    }
}
