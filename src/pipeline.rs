use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use chrono::{Local, NaiveDateTime, TimeZone};
use filetime::FileTime;
use tokio::sync::Semaphore;
use walkdir::WalkDir;

use crate::config::Config;
use crate::error::ShiftError;
use crate::exif::{self, DATE_TAKEN_FORMAT, TimeShift};

/// Supported file extensions. Patching relies on the fixed-width ASCII date
/// text JPEG stores in its Exif block, so only JPEG is accepted.
const JPEG_EXTENSIONS: &[&str] = &["jpg", "jpeg"];

/// The result of patching a single file.
///
/// One record per input file, in input order. `error` carries the failure
/// message when this file's unit failed; a failed unit never affects its
/// siblings.
#[derive(Debug)]
pub struct FileResult {
    pub path: PathBuf,
    /// Where the patched bytes were written (equals `path` when patching in
    /// place).
    pub destination: PathBuf,
    /// The new date-taken value, when the patch was applied.
    pub shifted: Option<NaiveDateTime>,
    pub error: Option<String>,
}

impl FileResult {
    fn failed(path: PathBuf, destination: PathBuf, message: String) -> Self {
        Self {
            path,
            destination,
            shifted: None,
            error: Some(message),
        }
    }
}

/// Aggregate outcome of one batch run.
#[derive(Debug)]
pub struct BatchOutcome {
    /// `true` when every file was patched.
    pub success: bool,
    /// Human-readable summary: `Applied successfully.` or `Failed.` followed
    /// by one `name - reason` line per failed file.
    pub message: String,
    pub results: Vec<FileResult>,
}

/// Collect JPEG files from the given paths.
///
/// Accepts a mix of file paths and directory paths. Directories are walked
/// recursively (following symlinks); files without a JPEG extension are
/// skipped.
///
/// # Example
///
/// ```rust,no_run
/// use exif_shift::pipeline::collect_files;
/// use std::path::PathBuf;
///
/// let files = collect_files(&[
///     PathBuf::from("photo.jpg"),  // single file
///     PathBuf::from("./photos/"),  // entire directory
/// ]);
/// println!("Found {} files", files.len());
/// ```
pub fn collect_files(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_file() {
            if is_jpeg(path) {
                files.push(path.clone());
            } else {
                log::warn!("Skipping unsupported file: {}", path.display());
            }
        } else if path.is_dir() {
            for entry in WalkDir::new(path)
                .follow_links(true)
                .into_iter()
                .filter_map(|e| e.ok())
            {
                let p = entry.path();
                if p.is_file() && is_jpeg(p) {
                    files.push(p.to_path_buf());
                }
            }
        } else {
            log::warn!("Path does not exist: {}", path.display());
        }
    }

    files
}

/// Check if a file has a JPEG extension.
fn is_jpeg(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| JPEG_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Apply `shift` to every file, at most `config.concurrency` in flight.
///
/// The argument set is validated once up front: the file list must not be
/// empty, the net shift must not be zero, and a configured destination
/// directory must exist. After that each file is an independent
/// all-or-nothing unit; results come back in input order, and the aggregate
/// summary is appended to the run log when one is configured.
///
/// # Example
///
/// ```rust,no_run
/// use exif_shift::config::Config;
/// use exif_shift::exif::TimeShift;
/// use exif_shift::pipeline::{apply_batch, collect_files};
/// use std::path::PathBuf;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::default();
/// let files = collect_files(&[PathBuf::from("./photos/")]);
/// let shift = TimeShift { days: 0, hours: 2, minutes: 0 };
///
/// let outcome = apply_batch(&files, shift, &config).await?;
/// println!("{}", outcome.message);
/// # Ok(())
/// # }
/// ```
pub async fn apply_batch(
    files: &[PathBuf],
    shift: TimeShift,
    config: &Config,
) -> Result<BatchOutcome, ShiftError> {
    if files.is_empty() {
        return Err(ShiftError::InvalidArgument(
            "no input files given".to_string(),
        ));
    }
    if shift.is_zero() {
        return Err(ShiftError::InvalidArgument(
            "time shift must not be zero".to_string(),
        ));
    }
    if let Some(dir) = &config.output.destination_dir {
        if !dir.is_dir() {
            return Err(ShiftError::InvalidArgument(format!(
                "destination directory does not exist: {}",
                dir.display()
            )));
        }
    }

    let limiter = Arc::new(Semaphore::new(config.concurrency.max(1)));
    let set_file_times = config.output.set_file_times;

    let mut tasks = Vec::with_capacity(files.len());
    for path in files {
        let path = path.clone();
        let destination = destination_for(&path, config.output.destination_dir.as_deref());
        let limiter = Arc::clone(&limiter);
        let task = tokio::spawn({
            let path = path.clone();
            let destination = destination.clone();
            async move {
                let _permit = limiter
                    .acquire_owned()
                    .await
                    .expect("semaphore is never closed");
                process_file(path, destination, shift, set_file_times).await
            }
        });
        tasks.push((path, destination, task));
    }

    let mut results = Vec::with_capacity(tasks.len());
    for (path, destination, task) in tasks {
        let result = match task.await {
            Ok(result) => result,
            Err(e) => FileResult::failed(path, destination, format!("task failed: {e}")),
        };
        results.push(result);
    }

    let failures: Vec<String> = results
        .iter()
        .filter_map(|r| {
            r.error.as_ref().map(|message| format!("{} - {message}", display_name(&r.path)))
        })
        .collect();

    let success = failures.is_empty();
    let message = if success {
        "Applied successfully.".to_string()
    } else {
        format!("Failed.\n{}", failures.join("\n"))
    };

    if let Some(log_path) = &config.output.log_file {
        if let Err(e) = append_run_log(Path::new(log_path), &message) {
            log::warn!("Failed to append run log {log_path}: {e}");
        }
    }

    Ok(BatchOutcome {
        success,
        message,
        results,
    })
}

/// Patch one file, then mirror the shifted date onto its file times when
/// configured. A file-times failure counts as a failure of the whole unit.
async fn process_file(
    path: PathBuf,
    destination: PathBuf,
    shift: TimeShift,
    set_file_times: bool,
) -> FileResult {
    let shifted = match exif::apply_shift(&path, &destination, shift).await {
        Ok(shifted) => shifted,
        Err(e) => return FileResult::failed(path, destination, e.to_string()),
    };

    if set_file_times {
        if let Err(e) = mirror_file_times(&destination, shifted) {
            return FileResult::failed(path, destination, format!("failed to set file times: {e}"));
        }
    }

    FileResult {
        path,
        destination,
        shifted: Some(shifted),
        error: None,
    }
}

/// Destination path for one source file: the configured directory keeps the
/// source file name, otherwise the file is patched in place.
fn destination_for(source: &Path, destination_dir: Option<&Path>) -> PathBuf {
    match (destination_dir, source.file_name()) {
        (Some(dir), Some(name)) => dir.join(name),
        _ => source.to_path_buf(),
    }
}

/// Set the file's access and modification times to the shifted date.
///
/// The date-taken field is local wall-clock time, so it is interpreted in
/// the local zone here as well.
fn mirror_file_times(path: &Path, date: NaiveDateTime) -> Result<(), ShiftError> {
    let moment = Local.from_local_datetime(&date).earliest().ok_or_else(|| {
        ShiftError::InvalidArgument(format!(
            "{} does not exist in the local time zone",
            date.format(DATE_TAKEN_FORMAT)
        ))
    })?;
    let times = FileTime::from_system_time(SystemTime::from(moment));
    filetime::set_file_times(path, times, times)?;
    Ok(())
}

/// Append one run's summary to the plain-text run log: a `[HH:MM:SS]`
/// header, the message, and a blank separator line.
fn append_run_log(path: &Path, message: &str) -> std::io::Result<()> {
    use std::io::Write;

    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    writeln!(file, "[{}]", Local::now().format("%H:%M:%S"))?;
    writeln!(file, "{message}")?;
    writeln!(file)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
