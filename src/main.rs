use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use halftone_restore::{HalftoneMethod, PipelineOptions, MIN_EXTENT};
use inverse_halftone::models::{RestoreConfig, DEFAULT_DIMENSION};
use inverse_halftone::services::{RestoreReport, RestoreService, StreamService};

#[derive(Parser)]
#[command(name = "inverse-halftone")]
#[command(about = "Restore grayscale images from error-diffused and dithered halftones")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Restore a halftone with the general filtering pipeline
    Restore {
        /// Input halftone (PGM, PNG or raw bytes)
        input: PathBuf,

        /// Output file, written in the input's format
        output: PathBuf,

        /// Halftoning method: error-diffusion (1), dispersed-dither (2) or clustered-dither (3)
        #[arg(short, long)]
        method: Option<String>,

        /// Edge gain (0 disables edge enhancement)
        #[arg(short, long)]
        gain: Option<u32>,

        /// Edge noise threshold in gray levels
        #[arg(short, long)]
        threshold: Option<u32>,

        /// Rows of a raw input file
        #[arg(long)]
        rows: Option<usize>,

        /// Columns of a raw input file (defaults to rows)
        #[arg(long)]
        cols: Option<usize>,

        /// YAML file with default settings
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Restore an error-diffused halftone with the adaptive streaming engine
    Fast {
        /// Input halftone (PGM, PNG or raw bytes)
        input: PathBuf,

        /// Output file, written in the input's format
        output: PathBuf,

        /// Rows of a raw input file
        #[arg(long, default_value_t = DEFAULT_DIMENSION)]
        rows: usize,

        /// Columns of a raw input file (defaults to rows)
        #[arg(long)]
        cols: Option<usize>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Restore {
            input,
            output,
            method,
            gain,
            threshold,
            rows,
            cols,
            config,
        }) => {
            init_logging();
            let config = resolve_config(config.as_deref(), method, gain, threshold, rows, cols)?;
            run_restore_command(&input, &output, &config)
        }
        Some(Commands::Fast {
            input,
            output,
            rows,
            cols,
        }) => {
            init_logging();
            run_fast_command(&input, &output, rows, cols.unwrap_or(rows))
        }
        None => {
            run_status_command();
            Ok(())
        }
    }
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "inverse_halftone=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

/// Load the config file if given, then apply command-line overrides
fn resolve_config(
    path: Option<&Path>,
    method: Option<String>,
    gain: Option<u32>,
    threshold: Option<u32>,
    rows: Option<usize>,
    cols: Option<usize>,
) -> anyhow::Result<RestoreConfig> {
    let mut config = match path {
        Some(path) => RestoreConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => RestoreConfig::default(),
    };

    if let Some(method) = method {
        config.method = method;
    }
    if let Some(gain) = gain {
        config.gain = gain;
    }
    if let Some(threshold) = threshold {
        config.threshold = threshold;
    }
    if let Some(rows) = rows {
        config.rows = rows;
        // A new row count resets columns unless they are given too.
        config.cols = cols;
    } else if cols.is_some() {
        config.cols = cols;
    }
    Ok(config)
}

fn run_restore_command(input: &Path, output: &Path, config: &RestoreConfig) -> anyhow::Result<()> {
    let service = RestoreService::from_config(config).context("Invalid restoration settings")?;
    let report = service
        .restore_file(input, output)
        .with_context(|| format!("Failed to restore {}", input.display()))?;

    print_report(&report);
    Ok(())
}

fn run_fast_command(input: &Path, output: &Path, rows: usize, cols: usize) -> anyhow::Result<()> {
    let service = StreamService::new(rows, cols);
    let report = service
        .restore_file(input, output)
        .with_context(|| format!("Failed to restore {}", input.display()))?;

    print_report(&report);
    Ok(())
}

fn print_report(report: &RestoreReport) {
    println!("{:.6} sec", report.elapsed.as_secs_f64());
}

fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    let defaults = PipelineOptions::default();

    println!("inverse-halftone v{VERSION}");
    println!("Grayscale restoration of halftoned images\n");

    println!("Methods:");
    for method in HalftoneMethod::ALL {
        let marker = if method == defaults.method { " (default)" } else { "" };
        println!("  {}  {}{}", method.code(), method.name(), marker);
    }

    println!("\nDefaults:");
    println!("  gain      = {}", defaults.gain);
    println!("  threshold = {}", defaults.threshold);
    println!("  raw size  = {DEFAULT_DIMENSION}x{DEFAULT_DIMENSION}");
    println!("  min size  = {MIN_EXTENT}x{MIN_EXTENT}");

    println!("\nFormats: PGM (P5), PNG (8-bit grayscale), raw bytes");

    println!("\nUsage:");
    println!("  inverse-halftone restore <INPUT> <OUTPUT> [--method M] [--gain G] [--threshold T]");
    println!("  inverse-halftone fast <INPUT> <OUTPUT> [--rows R] [--cols C]");
}
