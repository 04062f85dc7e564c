use std::path::PathBuf;

use clap::Parser;
use poly2rle::Mode;

#[derive(Parser, Debug)]
#[command(name = "poly2rle", version, about = "Convert poly2d annotations to RLE masks")]
struct Cli {
    /// Label JSON file, or a directory of label JSON files.
    #[arg(short = 'i', long)]
    input: PathBuf,

    /// Output file, or output directory for seg_track mode.
    #[arg(short = 'o', long)]
    output: PathBuf,

    /// Conversion mode.
    #[arg(short = 'm', long, value_enum, default_value_t = Mode::SemSeg)]
    mode: Mode,

    /// Number of worker threads for loading and conversion.
    #[arg(long, default_value_t = default_nproc())]
    nproc: usize,

    /// Configuration file overriding any config embedded in the input.
    #[arg(long)]
    config: Option<String>,
}

fn default_nproc() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let dataset = poly2rle::load(&cli.input, cli.nproc)?;
    poly2rle::convert(
        dataset,
        cli.mode,
        &cli.output,
        cli.config.as_deref(),
        cli.nproc,
    )?;

    tracing::info!("Finished!");
    Ok(())
}
