//! rcopy - Range Copy
//!
//! Copy one large file with many workers, powered by rangecopy.

use clap::{Parser, ValueEnum};
use rangecopy::{
    CopyOptions, CopyStats, Error as RangecopyError, ErrorCode, copy_file, parse_byte_size,
};
use serde_json::{Value, json};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// rcopy - Parallel single-file copy
///
/// Splits the source into one byte range per worker and copies all ranges
/// concurrently with positioned reads and writes.
///
/// Usage:
///   rcopy SOURCE DEST
///   rcopy SOURCE DIRECTORY
///
/// Defaults for --jobs and --block-size come from RANGECOPY_THREADS and
/// RANGECOPY_BLOCK_SIZE when set.
#[derive(Parser, Debug)]
#[command(name = "rcopy", version, about, long_about = None)]
struct Args {
    /// Source file
    source: PathBuf,

    /// Destination file, or a directory to copy into
    dest: PathBuf,

    /// Number of workers (byte ranges copied concurrently)
    #[arg(short = 'j', long)]
    jobs: Option<usize>,

    /// Bytes moved per read/write step (e.g. 65536, 64K, 4M)
    #[arg(short = 'b', long, value_name = "SIZE")]
    block_size: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value = "human")]
    output: OutputMode,

    /// Print nothing on success
    #[arg(short = 'q', long)]
    quiet: bool,

    /// Verbose output
    #[arg(short = 'v', long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
enum OutputMode {
    Human,
    Json,
}

type CliResult<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
enum CliError {
    #[error("Invalid block size '{value}': expected a positive number with optional K/M/G/T suffix")]
    InvalidBlockSize { value: String },

    #[error("Number of jobs must be at least 1")]
    ZeroJobs,

    #[error("Failed to copy {path}: {source}")]
    CopyFile {
        path: PathBuf,
        source: RangecopyError,
    },

    #[error("Failed to serialize JSON output: {source}")]
    JsonSerialize { source: serde_json::Error },
}

impl CliError {
    fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidBlockSize { .. } | Self::ZeroJobs => ErrorCode::InvalidInput,
            Self::CopyFile { source, .. } => source.code(),
            Self::JsonSerialize { .. } => ErrorCode::Internal,
        }
    }
}

fn exit_code_for(code: ErrorCode) -> i32 {
    match code {
        ErrorCode::InvalidInput => 2,
        _ => 1,
    }
}

fn main() {
    let args = Args::parse();
    init_logging(&args);

    let output = args.output;
    if let Err(error) = run(&args) {
        if output == OutputMode::Json {
            // Best effort; the stderr line below carries the same information
            let _ = print_json_value(&failure_json(&error));
        }
        eprintln!("error[{}]: {}", error.code(), error);
        std::process::exit(exit_code_for(error.code()));
    }
}

fn init_logging(args: &Args) {
    let default_level = if args.verbose {
        "debug"
    } else if args.quiet {
        "error"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(args: &Args) -> CliResult<()> {
    let options = build_options(args)?;

    tracing::debug!(
        workers = options.workers,
        block_size = options.block_size,
        "effective options"
    );

    let stats = copy_file(&args.source, &args.dest, &options).map_err(|source| {
        CliError::CopyFile {
            path: args.source.clone(),
            source,
        }
    })?;

    match args.output {
        OutputMode::Json => print_json_value(&success_json(&args.source, &stats))?,
        OutputMode::Human if !args.quiet => print_stats(&args.source, &stats, args.verbose),
        OutputMode::Human => {}
    }
    Ok(())
}

/// Flags override the environment, which overrides the hardware defaults.
fn build_options(args: &Args) -> CliResult<CopyOptions> {
    let mut options = CopyOptions::from_env();

    if let Some(jobs) = args.jobs {
        if jobs == 0 {
            return Err(CliError::ZeroJobs);
        }
        options = options.with_workers(jobs);
    }

    if let Some(ref value) = args.block_size {
        let bytes = parse_byte_size(value)
            .filter(|&n| n > 0)
            .and_then(|n| usize::try_from(n).ok())
            .ok_or_else(|| CliError::InvalidBlockSize {
                value: value.clone(),
            })?;
        options = options.with_block_size(bytes);
    }

    Ok(options)
}

fn success_json(source: &Path, stats: &CopyStats) -> Value {
    json!({
        "schema_version": "1.0",
        "source": display_path(source),
        "destination": display_path(&stats.destination),
        "bytes_copied": stats.bytes_copied,
        "workers": stats.workers,
        "block_size": stats.block_size,
        "duration_ms": u64::try_from(stats.duration.as_millis()).unwrap_or(u64::MAX),
    })
}

fn failure_json(error: &CliError) -> Value {
    json!({
        "schema_version": "1.0",
        "error_code": error.code().as_str(),
        "error_message": error.to_string(),
    })
}

fn print_stats(source: &Path, stats: &CopyStats, verbose: bool) {
    let bytes_str = format_bytes(stats.bytes_copied);

    if verbose {
        println!("Copy completed in {:?}", stats.duration);
        println!("  Source:         {}", source.display());
        println!("  Destination:    {}", stats.destination.display());
        println!("  Total size:     {}", bytes_str);
        println!("  Workers:        {}", stats.workers);
        println!("  Block size:     {}", format_bytes(stats.block_size as u64));

        if let Some(speed) = stats.throughput() {
            println!("  Speed:          {}/s", format_bytes(speed as u64));
        }
    } else {
        println!(
            "Copied {} -> {} ({})",
            source.display(),
            stats.destination.display(),
            bytes_str
        );
    }
}

fn print_json_value(value: &Value) -> CliResult<()> {
    let serialized =
        serde_json::to_string(value).map_err(|source| CliError::JsonSerialize { source })?;
    println!("{serialized}");
    Ok(())
}

fn display_path(path: &Path) -> String {
    path.display().to_string()
}

fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;
    const TB: u64 = GB * 1024;

    if bytes >= TB {
        format!("{:.2} TB", bytes as f64 / TB as f64)
    } else if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
