use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use exif_shift::{config, exif, pipeline};

#[derive(Parser, Debug)]
#[command(
    name = "exif-shift",
    version,
    about = "Shift the EXIF date-taken of JPEG files by patching the raw bytes, without re-encoding"
)]
struct Cli {
    /// JPEG files or directories to process
    #[arg(value_name = "PATH")]
    paths: Vec<PathBuf>,

    /// Days to add to the date-taken (may be negative)
    #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
    days: i64,

    /// Hours to add to the date-taken (may be negative)
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    hours: i64,

    /// Minutes to add to the date-taken (may be negative)
    #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
    minutes: i64,

    /// Write patched copies into this directory instead of patching in place
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Maximum number of files patched in flight at once
    #[arg(short, long, value_name = "N")]
    jobs: Option<usize>,

    /// Path to config file (default: config.json next to binary)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Initialize a default config.json and exit
    #[arg(long)]
    init: bool,

    /// Print each file's current date-taken and exit
    #[arg(long = "show-dates")]
    show_dates: bool,

    /// Output results as JSON
    #[arg(long)]
    json: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    // Handle --init
    if cli.init {
        let config = config::Config::default();
        let path = cli.config.as_deref();
        config.save(path)?;
        let save_path = match path {
            Some(p) => p.to_path_buf(),
            None => config::Config::config_path()?,
        };
        println!("Default config written to {}", save_path.display());
        return Ok(());
    }

    if cli.paths.is_empty() {
        anyhow::bail!("No input files or directories specified. Use --help for usage.");
    }

    // Collect files
    let files = pipeline::collect_files(&cli.paths);
    if files.is_empty() {
        anyhow::bail!("No JPEG files found in the specified paths.");
    }

    // Handle --show-dates
    if cli.show_dates {
        for path in &files {
            match exif::read_date_taken(path).await {
                Ok(date) => println!(
                    "{}  {}",
                    date.format(exif::DATE_TAKEN_FORMAT),
                    path.display()
                ),
                Err(e) => println!("{:<19}  {} ({e})", "-", path.display()),
            }
        }
        return Ok(());
    }

    let shift = exif::TimeShift {
        days: cli.days,
        hours: cli.hours,
        minutes: cli.minutes,
    };
    if shift.is_zero() {
        anyhow::bail!("Time shift must not be zero. Pass --days, --hours and/or --minutes.");
    }

    // Load config and apply CLI overrides
    let mut config = config::Config::load(cli.config.as_deref())?;
    if let Some(dir) = cli.output_dir {
        config.output.destination_dir = Some(dir);
    }
    if let Some(jobs) = cli.jobs {
        config.concurrency = jobs;
    }

    let total = files.len();
    log::info!("Found {total} file(s) to patch");
    log::info!(
        "Shifting date-taken by {} day(s), {} hour(s), {} minute(s)",
        cli.days,
        cli.hours,
        cli.minutes
    );
    if let Some(dir) = &config.output.destination_dir {
        log::info!("Writing patched copies to {}", dir.display());
    }

    let outcome = pipeline::apply_batch(&files, shift, &config).await?;

    // Per-file results
    for (i, result) in outcome.results.iter().enumerate() {
        match (&result.shifted, &result.error) {
            (_, Some(err)) => {
                log::error!("[{}/{total}] {}: {err}", i + 1, result.path.display());
            }
            (Some(shifted), None) => {
                log::info!(
                    "[{}/{total}] {}: date-taken -> {}",
                    i + 1,
                    result.path.display(),
                    shifted.format(exif::DATE_TAKEN_FORMAT)
                );
            }
            (None, None) => {}
        }
    }

    // JSON output
    if cli.json {
        let json_results: Vec<serde_json::Value> = outcome
            .results
            .iter()
            .map(|r| {
                serde_json::json!({
                    "path": r.path.display().to_string(),
                    "destination": r.destination.display().to_string(),
                    "shifted": r
                        .shifted
                        .map(|d| d.format(exif::DATE_TAKEN_FORMAT).to_string()),
                    "error": r.error,
                })
            })
            .collect();

        println!("{}", serde_json::to_string_pretty(&json_results)?);
    }

    // Summary
    let success = outcome.results.iter().filter(|r| r.error.is_none()).count();
    let failed = outcome.results.iter().filter(|r| r.error.is_some()).count();
    log::info!("Done: {success} succeeded, {failed} failed out of {total} files");

    if !outcome.success {
        anyhow::bail!("{failed} file(s) failed");
    }

    Ok(())
}
