//! pdfsift - Extract text from a PDF file
//!
//! Parses the document, decodes every selected object's stream on a pool
//! of workers and writes the recovered text to `<FILE>.txt`, a chosen
//! file, or stdout.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use pdfsift_core::PdfObject;
use pdfsift_core::api::ExtractOptions;
use pdfsift_core::pipeline::reducer::write_to;
use pdfsift_core::pipeline::{
    ConcurrentPipeline, cmap_processor, identity_filter, image_only_filter, objstm_only_filter,
    printing_reducer, simple_extractor, text_only_filter, writing_reducer,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Which objects to extract from.
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum FilterKind {
    /// Objects without a /Type (page content)
    #[default]
    Text,
    /// Every object
    All,
    /// /XObject objects
    Image,
    /// /ObjStm objects
    Objstm,
}

impl FilterKind {
    fn predicate(self) -> fn(&PdfObject) -> bool {
        match self {
            Self::Text => text_only_filter,
            Self::All => identity_filter,
            Self::Image => image_only_filter,
            Self::Objstm => objstm_only_filter,
        }
    }
}

/// Extract the text of a PDF file into <FILE>.txt.
#[derive(Parser, Debug)]
#[command(name = "pdfsift")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the PDF file
    file: PathBuf,

    /// Write the text here instead of <FILE>.txt
    #[arg(short, long, conflicts_with = "stdout")]
    output: Option<PathBuf>,

    /// Print the text of each object to stdout
    #[arg(long, action = ArgAction::SetTrue)]
    stdout: bool,

    /// Number of workers (defaults to the available parallelism)
    #[arg(short = 'j', long)]
    workers: Option<usize>,

    /// Bound of each stage queue
    #[arg(long, default_value_t = pdfsift_core::api::DEFAULT_QUEUE_CAPACITY)]
    queue_capacity: usize,

    /// Objects to extract from
    #[arg(long, value_enum, default_value_t = FilterKind::Text)]
    filter: FilterKind,

    /// Use debug logging level
    #[arg(short = 'd', long, action = ArgAction::SetTrue)]
    debug: bool,
}

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(args: &Args) -> Result<()> {
    let mut options = ExtractOptions::default().with_queue_capacity(args.queue_capacity);
    options.workers = args.workers;

    let pipeline = ConcurrentPipeline::open(&args.file, options)
        .with_context(|| format!("failed to open {}", args.file.display()))?;
    let filter = args.filter.predicate();

    if args.stdout {
        pipeline.run(filter, simple_extractor, cmap_processor, printing_reducer)?;
        return Ok(());
    }

    let written = match &args.output {
        Some(output) => pipeline.run(filter, simple_extractor, cmap_processor, |outputs, _| {
            write_to(outputs, output)
        })?,
        None => pipeline.run(filter, simple_extractor, cmap_processor, writing_reducer)?,
    };
    tracing::debug!(path = %written.display(), "output complete");
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.debug);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error processing {}: {:#}", args.file.display(), e);
            ExitCode::FAILURE
        }
    }
}
