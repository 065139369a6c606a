use std::fs;
use std::path::Path;

use zenpgm::{
    DecodeRequest, Dimensions, EncodeRequest, FormatError, HeaderStyle, ImageBuffer, PgmError,
    PipelineConfig, SampleLayout, decode, gray, run,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Header in the shape the legacy reader expects: magic, one skipped line,
/// dimensions, maxval.
fn legacy_file(width: u32, height: u32, raster: &[u8]) -> Vec<u8> {
    let mut data = format!("P5\n# scanned map\n{width} {height}\n255\n").into_bytes();
    data.extend_from_slice(raster);
    data
}

fn read_netpbm(path: &Path) -> ImageBuffer {
    DecodeRequest::new()
        .with_header_style(HeaderStyle::Netpbm)
        .decode_file(path)
        .unwrap()
}

#[test]
fn upscale_two_by_two() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.pgm");
    let output = dir.path().join("out.pgm");
    fs::write(&input, legacy_file(2, 2, &[10, 20, 30, 40])).unwrap();

    let report = run(&PipelineConfig::new(&input, &output, 4, 4).unwrap()).unwrap();
    assert_eq!(report.input, Dimensions::new(2, 2).unwrap());

    let bytes = fs::read(&output).unwrap();
    let mut expected = b"P5\n4 4\n255\n".to_vec();
    for row in [[10, 10, 20, 20], [10, 10, 20, 20], [30, 30, 40, 40], [30, 30, 40, 40]] {
        expected.extend_from_slice(&row);
    }
    assert_eq!(bytes, expected);
}

#[test]
fn round_trip_preserves_dimensions() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.pgm");
    let output = dir.path().join("out.pgm");
    let raster: Vec<u8> = (0..35u8).collect();
    fs::write(&input, legacy_file(7, 5, &raster)).unwrap();

    let config = PipelineConfig::new(&input, &output, 7, 5).unwrap();
    run(&config).unwrap();

    let original = decode(&input).unwrap();
    let written = read_netpbm(&output);
    assert_eq!(written.width(), 7);
    assert_eq!(written.height(), 5);
    assert_eq!(written, original);
}

#[test]
fn downscale_keeps_corner() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.pgm");
    let output = dir.path().join("out.pgm");
    let raster: Vec<u8> = (0..64u8).map(|v| v.wrapping_mul(3).wrapping_add(1)).collect();
    fs::write(&input, legacy_file(8, 8, &raster)).unwrap();

    run(&PipelineConfig::new(&input, &output, 3, 5).unwrap()).unwrap();
    let written = read_netpbm(&output);
    assert_eq!(written.get(0, 0), Some(gray(raster[0])));
    assert_eq!(written.pixels().len(), 15);
}

#[test]
fn legacy_record_output_is_three_bytes_per_pixel() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.pgm");
    let output = dir.path().join("out.pgm");
    fs::write(&input, legacy_file(3, 2, &[1, 2, 3, 4, 5, 6])).unwrap();

    let config = PipelineConfig::new(&input, &output, 3, 2)
        .unwrap()
        .with_decode(DecodeRequest::new().with_layout(SampleLayout::LegacyRecord))
        .with_encode(EncodeRequest::new().with_layout(SampleLayout::LegacyRecord));
    run(&config).unwrap();

    let bytes = fs::read(&output).unwrap();
    let header = b"P5\n3 2\n255\n";
    assert!(bytes.starts_with(header));
    assert_eq!(bytes.len() - header.len(), 3 * 2 * 3);
    // The six input bytes fill the first two records; the rest stay zero.
    assert_eq!(&bytes[header.len()..header.len() + 6], &[1, 2, 3, 4, 5, 6]);
    assert!(bytes[header.len() + 6..].iter().all(|&b| b == 0));
}

#[test]
fn p4_input_is_rejected_and_nothing_written() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.pbm");
    let output = dir.path().join("out.pgm");
    fs::write(&input, b"P4\n# bitmap\n8 1\n\xff").unwrap();

    let err = run(&PipelineConfig::new(&input, &output, 4, 4).unwrap()).unwrap_err();
    assert!(err.is_format());
    assert!(matches!(
        err,
        PgmError::Format(FormatError::UnsupportedMagic { .. })
    ));
    assert!(!output.exists());
}

#[test]
fn zero_width_input_is_rejected() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.pgm");
    let output = dir.path().join("out.pgm");
    fs::write(&input, legacy_file(0, 4, &[])).unwrap();

    let err = run(&PipelineConfig::new(&input, &output, 4, 4).unwrap()).unwrap_err();
    assert!(matches!(
        err,
        PgmError::Format(FormatError::InvalidDimensions(_))
    ));
}

#[test]
fn truncated_raster_is_short_read() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.pgm");
    let output = dir.path().join("out.pgm");
    fs::write(&input, legacy_file(4, 4, &[0; 10])).unwrap();

    let err = run(&PipelineConfig::new(&input, &output, 2, 2).unwrap()).unwrap_err();
    assert!(matches!(
        err,
        PgmError::ShortRead {
            expected: 16,
            actual: 10
        }
    ));
    assert!(!output.exists());
}

#[test]
fn netpbm_input_with_comments() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.pgm");
    let output = dir.path().join("out.pgm");
    fs::write(&input, b"P5 # made elsewhere\n2 # wide\n1\n255\n\x07\x09").unwrap();

    let config = PipelineConfig::new(&input, &output, 4, 1)
        .unwrap()
        .with_decode(DecodeRequest::new().with_header_style(HeaderStyle::Netpbm));
    let report = run(&config).unwrap();
    assert_eq!(report.image.pixels(), &[gray(7), gray(7), gray(9), gray(9)]);
}

#[test]
fn dump_of_resized_image() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.pgm");
    let output = dir.path().join("out.pgm");
    fs::write(&input, legacy_file(1, 1, &[5])).unwrap();

    let report = run(&PipelineConfig::new(&input, &output, 2, 1).unwrap()).unwrap();
    let mut text = Vec::new();
    report.image.write_dump(&mut text).unwrap();
    assert_eq!(String::from_utf8(text).unwrap(), "5 5 5 5 5 5 \n");
}
