//! XmbCodec CLI — convert binary scene containers to XML text and back.
//!
//! # Usage
//! ```
//! xmbcodec --export --input scene.exml --output scene.xml
//! xmbcodec --input scene.xml --output scene.exml
//! xmbcodec --export --directory --recursive --input datas/
//! ```
//!
//! Without `--export` the direction is import (XML → binary). In
//! directory mode output paths are derived from each input by
//! extension substitution (`.exml` ⇄ `.xml`); per-file failures are
//! printed to stderr and do not fail the run.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use xmbcodec_batch::{convert, BatchEngine, BatchOutcome, BatchRequest, Direction};
use xmbcodec_container::XmbCodec;

#[derive(Debug, Parser)]
#[command(
    name = "xmbcodec",
    about = "Convert binary scene containers (.exml) to XML documents and back",
    version
)]
struct Cli {
    /// Export binary containers to XML; omit to import XML back to binary
    #[arg(short = 'x', long)]
    export: bool,

    /// Input file, or directory root with --directory
    #[arg(short, long)]
    input: PathBuf,

    /// Output file (single-file mode only; directory mode derives
    /// output paths by extension substitution)
    #[arg(short, long, required_unless_present = "directory")]
    output: Option<PathBuf>,

    /// Treat --input as a directory root and convert every matching file
    #[arg(short, long)]
    directory: bool,

    /// Descend into subdirectories during directory processing
    #[arg(short, long, requires = "directory")]
    recursive: bool,

    /// Echo each input path to stdout before processing it
    #[arg(short, long)]
    verbose: bool,

    /// Upper bound on parallel conversions (0 = one per core)
    #[arg(long, default_value_t = 0)]
    jobs: usize,

    /// Print the batch summary as JSON (directory mode)
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let direction = if cli.export {
        Direction::Export
    } else {
        Direction::Import
    };
    let codec = Arc::new(XmbCodec::new());

    if cli.directory {
        run_batch(&cli, direction, codec)
    } else {
        run_single(&cli, direction, &*codec)
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_single(cli: &Cli, direction: Direction, codec: &XmbCodec) -> Result<()> {
    let output = cli
        .output
        .as_deref()
        .context("--output is required in single-file mode")?;

    if cli.verbose {
        println!("{}", cli.input.display());
    }

    convert(codec, direction, &cli.input, output)
        .with_context(|| format!("{} {}", direction, cli.input.display()))?;
    Ok(())
}

fn run_batch(cli: &Cli, direction: Direction, codec: Arc<XmbCodec>) -> Result<()> {
    if cli.output.is_some() {
        eprintln!("note: --output is ignored in directory mode");
    }

    let mut request = BatchRequest::new(&cli.input, direction)
        .recursive(cli.recursive)
        .concurrency(cli.jobs);
    if cli.verbose {
        request = request.on_start(|path| println!("{}", path.display()));
    }

    let outcome = BatchEngine::new(codec)
        .run(request)
        .with_context(|| format!("batch {} under {}", direction, cli.input.display()))?;

    for failure in &outcome.failures {
        eprintln!("{}: {}", failure.input.display(), failure.message);
    }
    report(cli, &outcome)?;

    // Per-file failures do not fail the run; the summary carries them.
    Ok(())
}

fn report(cli: &Cli, outcome: &BatchOutcome) -> Result<()> {
    if cli.json {
        println!("{}", serde_json::to_string_pretty(outcome)?);
    } else {
        println!(
            "{} converted, {} failed ({} total)",
            outcome.converted.len(),
            outcome.failures.len(),
            outcome.total
        );
    }
    Ok(())
}
