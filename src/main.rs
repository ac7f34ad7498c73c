use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use quadcodec::partition::DEFAULT_THRESHOLD;
use quadcodec::raster::io::{load_image, save_image};
use quadcodec::{
    CodecConfig, Compressor, PartitionConfig, RenderConfig, Rgb, TreeCodec, TruncationPolicy,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "qtc", about = "Quadtree image partitioning and .qtc codec")]
struct Cli {
    /// Log debug output (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Partition an image and write it as a .qtc stream.
    Compress {
        /// Input image (PNG, JPEG, BMP or TIFF).
        image: PathBuf,
        /// Standard-deviation threshold; higher values give coarser trees.
        #[arg(short, long, default_value_t = DEFAULT_THRESHOLD, allow_negative_numbers = true)]
        threshold: f64,
        /// Output path (default: input path with a .qtc extension).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Decode a .qtc stream and write the reconstructed image.
    Load {
        /// Input .qtc stream.
        stream: PathBuf,
        /// Output image (default: input path with a .png extension).
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Outline every leaf region in black.
        #[arg(long)]
        outlines: bool,
        /// Fail on truncated structure bits instead of reading them as false.
        #[arg(long)]
        strict: bool,
    },
    /// Print tree statistics for a .qtc stream.
    Info {
        /// Input .qtc stream.
        stream: PathBuf,
        /// Fail on truncated structure bits instead of reading them as false.
        #[arg(long)]
        strict: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Compress {
            image,
            threshold,
            output,
        } => run_compress(&image, threshold, output)?,
        Commands::Load {
            stream,
            output,
            outlines,
            strict,
        } => run_load(&stream, output, outlines, strict)?,
        Commands::Info { stream, strict } => run_info(&stream, strict)?,
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn codec_config(strict: bool) -> CodecConfig {
    let truncation = if strict {
        TruncationPolicy::Strict
    } else {
        TruncationPolicy::Permissive
    };
    CodecConfig::default().with_truncation(truncation)
}

fn run_compress(image_path: &Path, threshold: f64, output: Option<PathBuf>) -> Result<()> {
    let config = PartitionConfig::new(threshold).context("invalid threshold")?;
    let grid = load_image(image_path)
        .with_context(|| format!("failed to load image {}", image_path.display()))?;
    if grid.width() == 0 || grid.height() == 0 {
        bail!("image {} has no pixels", image_path.display());
    }

    let compressed = Compressor::new(config)
        .compress(&grid)
        .with_context(|| format!("failed to compress {}", image_path.display()))?;

    let output = output.unwrap_or_else(|| image_path.with_extension("qtc"));
    std::fs::write(&output, &compressed.bytes)
        .with_context(|| format!("failed to write {}", output.display()))?;

    println!(
        "{}\t{}x{}\tleaves={}\tbytes={}",
        output.display(),
        compressed.width,
        compressed.height,
        compressed.leaf_count,
        compressed.bytes.len()
    );
    Ok(())
}

fn run_load(
    stream_path: &Path,
    output: Option<PathBuf>,
    outlines: bool,
    strict: bool,
) -> Result<()> {
    let bytes = std::fs::read(stream_path)
        .with_context(|| format!("failed to read {}", stream_path.display()))?;
    let render = RenderConfig::default()
        .with_outlines(outlines)
        .with_outline_color(Rgb::BLACK);

    let grid = Compressor::new(PartitionConfig::default())
        .decompress(&bytes, &render, &codec_config(strict))
        .with_context(|| format!("failed to decode {}", stream_path.display()))?;

    let output = output.unwrap_or_else(|| stream_path.with_extension("png"));
    save_image(&grid, &output)
        .with_context(|| format!("failed to write image {}", output.display()))?;

    println!("{}\t{}x{}", output.display(), grid.width(), grid.height());
    Ok(())
}

fn run_info(stream_path: &Path, strict: bool) -> Result<()> {
    let bytes = std::fs::read(stream_path)
        .with_context(|| format!("failed to read {}", stream_path.display()))?;
    let decoded = TreeCodec::new(codec_config(strict))
        .decode_stream(&bytes)
        .with_context(|| format!("failed to decode {}", stream_path.display()))?;
    let summary = decoded.root.summary();

    println!("dimensions\t{}x{}", decoded.width, decoded.height);
    println!("nodes\t{}", summary.nodes);
    println!("leaves\t{}", summary.leaves);
    println!("depth\t{}", summary.depth);
    println!("bytes\t{}", bytes.len());
    println!("blake3\t{}", blake3::hash(&bytes).to_hex());
    Ok(())
}
