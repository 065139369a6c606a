//! `pgm-resize`: resize a binary PGM file with nearest-neighbor sampling.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::builder::PossibleValue;
use clap::{Parser, ValueEnum};

use zenpgm::{
    DEFAULT_HEIGHT, DEFAULT_INPUT, DEFAULT_OUTPUT, DEFAULT_WIDTH, DecodeRequest, EncodeRequest,
    HeaderStyle, Limits, PgmError, PipelineConfig, SampleLayout,
};

#[derive(Debug, Parser)]
#[command(version, about = "Resize a binary PGM (P5) image")]
struct Args {
    /// File to read.
    #[arg(long, default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// File to write.
    #[arg(long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Target width in pixels.
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    width: u32,

    /// Target height in pixels.
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    height: u32,

    /// How pixel records map onto raster bytes.
    #[arg(long, value_enum, default_value_t = Layout::Gray8)]
    layout: Layout,

    /// Header grammar of the input file.
    #[arg(long, value_enum, default_value_t = Grammar::Legacy)]
    header: Grammar,

    /// Refuse images (input or output) with more pixels than this.
    #[arg(long)]
    max_pixels: Option<u64>,

    /// Dump the resized pixels to stdout.
    #[arg(long)]
    print: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Layout {
    Gray8,
    LegacyRecord,
}

impl ValueEnum for Layout {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Gray8, Self::LegacyRecord]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        match self {
            Self::Gray8 => Some(PossibleValue::new("gray8")),
            Self::LegacyRecord => Some(PossibleValue::new("legacy-record")),
        }
    }
}

impl From<Layout> for SampleLayout {
    fn from(layout: Layout) -> Self {
        match layout {
            Layout::Gray8 => SampleLayout::Gray8,
            Layout::LegacyRecord => SampleLayout::LegacyRecord,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Grammar {
    Legacy,
    Netpbm,
}

impl ValueEnum for Grammar {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Legacy, Self::Netpbm]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        match self {
            Self::Legacy => Some(PossibleValue::new("legacy")),
            Self::Netpbm => Some(PossibleValue::new("netpbm")),
        }
    }
}

impl From<Grammar> for HeaderStyle {
    fn from(grammar: Grammar) -> Self {
        match grammar {
            Grammar::Legacy => HeaderStyle::Legacy,
            Grammar::Netpbm => HeaderStyle::Netpbm,
        }
    }
}

impl Args {
    fn config(&self) -> Result<PipelineConfig, PgmError> {
        let layout = SampleLayout::from(self.layout);
        let mut limits = Limits::none();
        if let Some(max) = self.max_pixels {
            limits = limits.with_max_pixels(max);
        }
        Ok(
            PipelineConfig::new(&self.input, &self.output, self.width, self.height)?
                .with_decode(
                    DecodeRequest::new()
                        .with_layout(layout)
                        .with_header_style(self.header.into()),
                )
                .with_encode(EncodeRequest::new().with_layout(layout))
                .with_limits(limits),
        )
    }
}

fn resize(args: &Args) -> Result<(), PgmError> {
    let report = zenpgm::run(&args.config()?)?;
    println!(
        "Input Image Dimensions: {} x {}",
        report.input.width(),
        report.input.height()
    );
    if args.print {
        report.image.write_dump(io::stdout().lock())?;
    }
    println!("Image resolution changed successfully.");
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    match resize(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("pgm-resize: {err}");
            ExitCode::FAILURE
        }
    }
}
